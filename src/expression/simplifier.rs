use thiserror::Error;

use crate::expression::expr::{
    BinaryOp,
    Expr,
    Function
};

/// 化簡失敗；呼叫端會退回原始公式字串。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimplifyError {
    #[error("constant subexpression evaluates to {0}")]
    NonFiniteConstant(f64),
}

// ─────────────────────────────────────────────────────────────────────────────
// 僅供顯示用的代數化簡
//
// - 常數摺疊只在結果「精確」時進行（整數結果的除法、次方與函數呼叫），
//   1/3、sqrt(2) 之類保留原樣。
// - 恆等式：e+0、e*1、e/1、e^1、e^0、1^e、0*e、0/e、--e、pow(a, b) → a^b。
// - 化簡後的樹中不會出現負的 Number，負數一律以 Neg(Number) 表示。
//
// 求值永遠使用未化簡的樹；0*x 在 x = inf 時為 NaN，化簡後的 0 不是。
// ─────────────────────────────────────────────────────────────────────────────

pub fn simplify(expr: &Expr) -> Result<Expr, SimplifyError> {
    match expr {
        Expr::Number(value) => number(*value),
        Expr::Constant(_) | Expr::Variable => Ok(expr.clone()),
        Expr::Neg(operand) => Ok(negate(simplify(operand)?)),
        Expr::Binary(op, lhs, rhs) => simplify_binary(*op, simplify(lhs)?, simplify(rhs)?),
        Expr::Call(Function::Pow, args) if args.len() == 2 => {
            simplify_binary(BinaryOp::Pow, simplify(&args[0])?, simplify(&args[1])?)
        }
        Expr::Call(function, args) => {
            let args = args.iter().map(simplify).collect::<Result<Vec<_>, _>>()?;
            let values: Option<Vec<f64>> = args.iter().map(as_number).collect();
            if let Some(values) = values {
                let folded = function.apply(&values);
                if !folded.is_finite() {
                    return Err(SimplifyError::NonFiniteConstant(folded));
                }
                if is_exact(folded) {
                    return number(folded);
                }
            }
            Ok(Expr::Call(*function, args))
        }
    }
}

fn number(value: f64) -> Result<Expr, SimplifyError> {
    if !value.is_finite() {
        return Err(SimplifyError::NonFiniteConstant(value));
    }
    if value < 0.0 {
        Ok(Expr::neg(Expr::Number(-value)))
    } else {
        // -0.0 同樣顯示為 0
        Ok(Expr::Number(value.abs()))
    }
}

fn as_number(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Number(value) => Some(*value),
        Expr::Neg(operand) => match operand.as_ref() {
            Expr::Number(value) => Some(-value),
            _ => None,
        },
        _ => None,
    }
}

fn is_exact(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15
}

fn negate(operand: Expr) -> Expr {
    match operand {
        Expr::Neg(inner) => *inner,
        Expr::Number(value) if value == 0.0 => Expr::Number(0.0),
        other => Expr::neg(other),
    }
}

fn simplify_binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Result<Expr, SimplifyError> {
    if let (Some(l), Some(r)) = (as_number(&lhs), as_number(&rhs)) {
        let folded = op.apply(l, r);
        if !folded.is_finite() {
            return Err(SimplifyError::NonFiniteConstant(folded));
        }
        let exact = match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => true,
            BinaryOp::Div | BinaryOp::Pow => is_exact(folded),
        };
        if exact {
            return number(folded);
        }
    }

    let lhs_value = as_number(&lhs);
    let rhs_value = as_number(&rhs);
    let simplified = match op {
        BinaryOp::Add => match (lhs_value, rhs_value, rhs) {
            (Some(l), _, rhs) if l == 0.0 => rhs,
            (_, Some(r), _) if r == 0.0 => lhs,
            (_, _, Expr::Neg(inner)) => Expr::binary(BinaryOp::Sub, lhs, *inner),
            (_, _, rhs) => Expr::binary(BinaryOp::Add, lhs, rhs),
        },
        BinaryOp::Sub => match (lhs_value, rhs_value, rhs) {
            (_, Some(r), _) if r == 0.0 => lhs,
            (Some(l), _, rhs) if l == 0.0 => negate(rhs),
            (_, _, Expr::Neg(inner)) => Expr::binary(BinaryOp::Add, lhs, *inner),
            (_, _, rhs) => Expr::binary(BinaryOp::Sub, lhs, rhs),
        },
        BinaryOp::Mul => match (lhs_value, rhs_value) {
            (Some(l), _) if l == 0.0 => Expr::Number(0.0),
            (_, Some(r)) if r == 0.0 => Expr::Number(0.0),
            (Some(l), _) if l == 1.0 => rhs,
            (_, Some(r)) if r == 1.0 => lhs,
            (Some(l), _) if l == -1.0 => negate(rhs),
            (_, Some(r)) if r == -1.0 => negate(lhs),
            _ => Expr::binary(BinaryOp::Mul, lhs, rhs),
        },
        BinaryOp::Div => match (lhs_value, rhs_value) {
            (_, Some(r)) if r == 0.0 => {
                return Err(SimplifyError::NonFiniteConstant(f64::INFINITY))
            }
            (Some(l), _) if l == 0.0 => Expr::Number(0.0),
            (_, Some(r)) if r == 1.0 => lhs,
            (_, Some(r)) if r == -1.0 => negate(lhs),
            _ => Expr::binary(BinaryOp::Div, lhs, rhs),
        },
        BinaryOp::Pow => match (lhs_value, rhs_value) {
            (_, Some(r)) if r == 0.0 => Expr::Number(1.0),
            (_, Some(r)) if r == 1.0 => lhs,
            (Some(l), _) if l == 1.0 => Expr::Number(1.0),
            _ => Expr::binary(BinaryOp::Pow, lhs, rhs),
        },
    };
    Ok(simplified)
}
