use crate::expression::expr::{
    BinaryOp,
    Expr,
    Function
};
use crate::expression::symboltable::VARIABLE_NAME;

const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => PREC_SUM,
        Expr::Binary(BinaryOp::Mul | BinaryOp::Div, _, _) => PREC_PRODUCT,
        Expr::Neg(_) => PREC_NEG,
        Expr::Binary(BinaryOp::Pow, _, _) => PREC_POWER,
        Expr::Number(_) | Expr::Constant(_) | Expr::Variable | Expr::Call(_, _) => PREC_ATOM,
    }
}

fn op_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Add | BinaryOp::Sub => PREC_SUM,
        BinaryOp::Mul | BinaryOp::Div => PREC_PRODUCT,
        BinaryOp::Pow => PREC_POWER,
    }
}

fn needs_parens_left(op: BinaryOp, lhs: &Expr) -> bool {
    let prec = precedence(lhs);
    match op {
        // (-x)^2、(x^2)^3 都要括號
        BinaryOp::Pow => prec <= PREC_POWER,
        _ => prec < op_precedence(op),
    }
}

fn needs_parens_right(op: BinaryOp, rhs: &Expr) -> bool {
    let prec = precedence(rhs);
    if matches!(rhs, Expr::Neg(_)) {
        return true;
    }
    match op {
        // 次方右結合，其餘左結合
        BinaryOp::Pow => prec < PREC_POWER,
        _ => prec <= op_precedence(op),
    }
}

fn format_number(value: f64) -> String {
    format!("{}", value)
}

// ─────────────────────────────────────────────────────────────────────────────
// 純文字：x^2 + 1、1/(1 + x^2)、-sin(π*x)
// ─────────────────────────────────────────────────────────────────────────────

pub fn to_text(expr: &Expr) -> String {
    match expr {
        Expr::Number(value) => format_number(*value),
        Expr::Constant(constant) => constant.display_name().to_owned(),
        Expr::Variable => VARIABLE_NAME.to_owned(),
        Expr::Neg(operand) => {
            if precedence(operand) < PREC_NEG {
                format!("-({})", to_text(operand))
            } else {
                format!("-{}", to_text(operand))
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs_text = parenthesize(to_text(lhs), needs_parens_left(*op, lhs));
            let rhs_text = parenthesize(to_text(rhs), needs_parens_right(*op, rhs));
            let symbol = match op {
                BinaryOp::Add => " + ",
                BinaryOp::Sub => " - ",
                BinaryOp::Mul => "*",
                BinaryOp::Div => "/",
                BinaryOp::Pow => "^",
            };
            format!("{}{}{}", lhs_text, symbol, rhs_text)
        }
        Expr::Call(function, args) => {
            let args: Vec<String> = args.iter().map(to_text).collect();
            format!("{}({})", function.display_name(), args.join(", "))
        }
    }
}

fn parenthesize(text: String, wrap: bool) -> String {
    if wrap { format!("({})", text) } else { text }
}

// ─────────────────────────────────────────────────────────────────────────────
// LaTeX：\frac{1}{1 + x^{2}}、e^{- x^{2}}、\sin\left(x\right)
// ─────────────────────────────────────────────────────────────────────────────

pub fn to_latex(expr: &Expr) -> String {
    match expr {
        Expr::Number(value) => format_number(*value),
        Expr::Constant(constant) => constant.latex_name().to_owned(),
        Expr::Variable => VARIABLE_NAME.to_owned(),
        Expr::Neg(operand) => {
            if precedence(operand) < PREC_NEG {
                format!("- \\left({}\\right)", to_latex(operand))
            } else {
                format!("- {}", to_latex(operand))
            }
        }
        Expr::Binary(BinaryOp::Div, lhs, rhs) => {
            format!("\\frac{{{}}}{{{}}}", to_latex(lhs), to_latex(rhs))
        }
        Expr::Binary(BinaryOp::Pow, lhs, rhs) => {
            let base = latex_parenthesize(to_latex(lhs), needs_parens_left(BinaryOp::Pow, lhs));
            format!("{}^{{{}}}", base, to_latex(rhs))
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs_text = latex_parenthesize(to_latex(lhs), needs_parens_left(*op, lhs));
            let rhs_text = latex_parenthesize(to_latex(rhs), needs_parens_right(*op, rhs));
            let symbol = match op {
                BinaryOp::Add => " + ",
                BinaryOp::Sub => " - ",
                _ => " \\cdot ",
            };
            format!("{}{}{}", lhs_text, symbol, rhs_text)
        }
        Expr::Call(function, args) => latex_call(*function, args),
    }
}

fn latex_call(function: Function, args: &[Expr]) -> String {
    match (function, args) {
        (Function::Sqrt, [arg]) => format!("\\sqrt{{{}}}", to_latex(arg)),
        (Function::Abs, [arg]) => format!("\\left|{}\\right|", to_latex(arg)),
        (Function::Exp, [arg]) => format!("e^{{{}}}", to_latex(arg)),
        (Function::Pow, [base, exponent]) => to_latex(&Expr::binary(
            BinaryOp::Pow,
            base.clone(),
            exponent.clone(),
        )),
        _ => {
            let name = function.latex_name().unwrap_or(function.display_name());
            let args: Vec<String> = args.iter().map(to_latex).collect();
            format!("{}\\left({}\\right)", name, args.join(", "))
        }
    }
}

fn latex_parenthesize(text: String, wrap: bool) -> String {
    if wrap { format!("\\left({}\\right)", text) } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::parser::parse;

    fn text(source: &str) -> String {
        to_text(&parse(source).unwrap())
    }

    fn latex(source: &str) -> String {
        to_latex(&parse(source).unwrap())
    }

    #[test]
    fn test_minimal_parentheses() {
        assert_eq!(text("1 / (1 + x ** 2)"), "1/(1 + x^2)");
        assert_eq!(text("(x + 1) * (x - 1)"), "(x + 1)*(x - 1)");
        assert_eq!(text("x - (1 - x)"), "x - (1 - x)");
        assert_eq!(text("(x - 1) - x"), "x - 1 - x");
        assert_eq!(text("x / (2 * x)"), "x/(2*x)");
        assert_eq!(text("(-x) ^ 2"), "(-x)^2");
        assert_eq!(text("-x ^ 2"), "-x^2");
        assert_eq!(text("2 ^ 3 ^ x"), "2^3^x");
        assert_eq!(text("(2 ^ 3) ^ x"), "(2^3)^x");
        assert_eq!(text("-(x + 1)"), "-(x + 1)");
        assert_eq!(text("x * -x"), "x*(-x)");
        assert_eq!(text("-(2 * x)"), "-(2*x)");
        assert_eq!(text("x * (2 / x)"), "x*(2/x)");
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(text("np.arcsin(x) + ln(x)"), "asin(x) + log(x)");
        assert_eq!(text("pi * x"), "π*x");
        assert_eq!(text("pow(x, 0.5)"), "pow(x, 0.5)");
    }

    #[test]
    fn test_rendered_text_parses_back_to_same_tree() {
        for source in [
            "1 / (1 + x ** 2)",
            "x - (1 - x)",
            "(-x) ^ 2",
            "2 ^ -x",
            "sin(pi * x) / (x + 1)",
        ] {
            let expr = parse(source).unwrap();
            assert_eq!(parse(&to_text(&expr)).unwrap(), expr, "{}", source);
        }
    }

    #[test]
    fn test_latex() {
        assert_eq!(latex("1 / (1 + x ** 2)"), "\\frac{1}{1 + x^{2}}");
        assert_eq!(latex("np.exp(-x**2)"), "e^{- x^{2}}");
        assert_eq!(latex("sin(x)"), "\\sin\\left(x\\right)");
        assert_eq!(latex("sqrt(abs(x))"), "\\sqrt{\\left|x\\right|}");
        assert_eq!(latex("(x + 1) * pi"), "\\left(x + 1\\right) \\cdot \\pi");
        assert_eq!(latex("(x + 1) ^ 2"), "\\left(x + 1\\right)^{2}");
    }
}
