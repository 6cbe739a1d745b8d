use serde::Serialize;

use crate::expression::compiledfunction::CompiledFunction;
use crate::expression::expressionerror::ExpressionError;
use crate::expression::formatter::{
    to_latex,
    to_text
};
use crate::expression::parser::parse;
use crate::expression::simplifier::simplify;

/// 公式的顯示形式。化簡失敗時 `text` 與 `latex` 皆為原始字串，
/// `normalized` 為 false。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayForm {
    text: String,
    latex: String,
    normalized: bool
}

impl DisplayForm {
    pub fn verbatim(source: &str) -> DisplayForm {
        DisplayForm {
            text: source.to_owned(),
            latex: source.to_owned(),
            normalized: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn latex(&self) -> &str {
        &self.latex
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }
}

pub struct CompiledExpression {
    function: CompiledFunction,
    display: DisplayForm
}

impl CompiledExpression {
    pub fn function(&self) -> &CompiledFunction {
        &self.function
    }

    pub fn display(&self) -> &DisplayForm {
        &self.display
    }

    pub fn into_parts(self) -> (CompiledFunction, DisplayForm) {
        (self.function, self.display)
    }
}

/// 將公式編譯為可求值的函數，並產生顯示用的正規化字串。
///
/// 只接受純算術運算式：變數 `x`、數字、`+ - * / ^ **`、括號，以及
/// 白名單內的函數與常數。其他一律回傳 `ExpressionError`，輸入絕不會被
/// 當成程式碼執行。
pub fn compile(text: &str) -> Result<CompiledExpression, ExpressionError> {
    let expr = parse(text)?;
    let display = match simplify(&expr) {
        Ok(simplified) => DisplayForm {
            text: to_text(&simplified),
            latex: to_latex(&simplified),
            normalized: true,
        },
        Err(_) => DisplayForm::verbatim(text),
    };
    Ok(CompiledExpression {
        function: CompiledFunction::new(text, expr),
        display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compile_runge() {
        let compiled = compile("1 / (1 + x ** 2)").unwrap();
        assert_eq!(compiled.display().text(), "1/(1 + x^2)");
        assert_eq!(compiled.display().latex(), "\\frac{1}{1 + x^{2}}");
        assert!(compiled.display().normalized());
        assert_relative_eq!(compiled.function().eval(3.0), 0.1);
    }

    #[test]
    fn test_display_falls_back_to_source() {
        let compiled = compile("x + 1/0").unwrap();
        assert_eq!(compiled.display(), &DisplayForm::verbatim("x + 1/0"));
        assert_eq!(compiled.function().eval(1.0), f64::INFINITY);
    }

    #[test]
    fn test_eval_many_matches_eval() {
        let (function, _) = compile("np.sin(x) * x - 2").unwrap().into_parts();
        let xs = [0.0, 0.5, 1.0, 10.0];
        let ys = function.eval_many(&xs);
        assert_eq!(ys.len(), xs.len());
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(*y, function.eval(*x));
        }
    }

    #[test]
    fn test_rejects_code() {
        for text in [
            "__import__('os').system('ls')",
            "open('/etc/passwd')",
            "x; y",
            "exec(x)",
            "x if x else 1",
            "lambda x: x",
        ] {
            assert!(compile(text).is_err(), "{} should not compile", text);
        }
    }

    #[test]
    fn test_compiled_function_is_shareable_across_threads() {
        let (function, _) = compile("x * x").unwrap().into_parts();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let function = function.clone();
                std::thread::spawn(move || function.eval(i as f64))
            })
            .collect();
        let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![0.0, 1.0, 4.0, 9.0]);
    }
}
