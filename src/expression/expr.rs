use std::f64::consts;

use nalgebra::DVector;

// ─────────────────────────────────────────────────────────────────────────────
// Constant / Function
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::E => consts::E
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// 自然對數；`log` 與 `ln` 皆對應到此。
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs,
    Pow
}

impl Function {
    pub fn arity(&self) -> usize {
        match self {
            Function::Pow => 2,
            _ => 1
        }
    }

    /// 參數個數由 parser 保證與 `arity()` 相符；不符時回傳 NaN。
    pub fn apply(&self, args: &[f64]) -> f64 {
        match (self, args) {
            (Function::Pow, [base, exponent]) => base.powf(*exponent),
            (Function::Pow, _) => f64::NAN,
            (function, [x]) => function.apply_unary(*x),
            _ => f64::NAN
        }
    }

    fn apply_unary(&self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Log10 => x.log10(),
            Function::Log2 => x.log2(),
            Function::Sqrt => x.sqrt(),
            Function::Abs => x.abs(),
            Function::Pow => f64::NAN
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Expr
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow
}

impl BinaryOp {
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs)
        }
    }
}

/// 單一自由變數 x 的運算式樹。
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(Constant),
    Variable,
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Vec<Expr>)
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn neg(operand: Expr) -> Expr {
        Expr::Neg(Box::new(operand))
    }

    /// IEEE-754 語意：定義域外（`ln(-1)`、`0/0`）得 NaN，溢位得 ±inf。
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Constant(constant) => constant.value(),
            Expr::Variable => x,
            Expr::Neg(operand) => -operand.eval(x),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval(x), rhs.eval(x)),
            Expr::Call(function, args) => {
                let values: Vec<f64> = args.iter().map(|arg| arg.eval(x)).collect();
                function.apply(&values)
            }
        }
    }

    /// 整批求值：每個節點對整個向量運算一次，而非逐點走訪整棵樹。
    pub fn eval_batch(&self, xs: &DVector<f64>) -> DVector<f64> {
        match self {
            Expr::Number(value) => DVector::from_element(xs.len(), *value),
            Expr::Constant(constant) => DVector::from_element(xs.len(), constant.value()),
            Expr::Variable => xs.clone(),
            Expr::Neg(operand) => -operand.eval_batch(xs),
            Expr::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval_batch(xs);
                let rhs = rhs.eval_batch(xs);
                lhs.zip_map(&rhs, |l, r| op.apply(l, r))
            }
            Expr::Call(function, args) => match args.as_slice() {
                [arg] => arg.eval_batch(xs).map(|v| function.apply(&[v])),
                [lhs, rhs] => {
                    let lhs = lhs.eval_batch(xs);
                    let rhs = rhs.eval_batch(xs);
                    lhs.zip_map(&rhs, |l, r| function.apply(&[l, r]))
                }
                _ => DVector::from_element(xs.len(), f64::NAN)
            }
        }
    }
}
