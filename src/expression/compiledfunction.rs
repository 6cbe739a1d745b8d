use std::sync::Arc;

use nalgebra::DVector;

use crate::expression::expr::Expr;
use crate::math::curve::curve::Curve;

/// 編譯完成、不可變的 f(x)。
///
/// 內部以 `Arc` 共享運算式樹，clone 成本固定，且可跨執行緒同時求值。
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    source: Arc<str>,
    expr: Arc<Expr>
}

impl CompiledFunction {
    pub fn new(source: &str, expr: Expr) -> CompiledFunction {
        CompiledFunction {
            source: Arc::from(source),
            expr: Arc::new(expr),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        self.expr
            .eval_batch(&DVector::from_column_slice(xs))
            .iter()
            .copied()
            .collect()
    }
}

impl Curve for CompiledFunction {
    fn value(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    fn values(&self, xs: &DVector<f64>) -> DVector<f64> {
        self.expr.eval_batch(xs)
    }
}
