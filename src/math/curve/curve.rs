use nalgebra::DVector;

/// 單變數實函數 y = f(x)。
///
/// `values` 預設逐點呼叫 `value`；可整批求值的實作（例如編譯後的運算式）
/// 應覆寫它。
pub trait Curve: Send + Sync {
    fn value(&self, x: f64) -> f64;

    fn values(&self, xs: &DVector<f64>) -> DVector<f64> {
        xs.map(|x| self.value(x))
    }
}

impl<F> Curve for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}
