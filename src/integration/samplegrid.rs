use nalgebra::DVector;

/// `points` 個等距點，第一點恰為 `start`、最後一點恰為 `end`。
///
/// `points` 須 ≥ 2（呼叫端保證）。中間點以 `start + k·step` 計算，
/// 不做累加，避免誤差累積。
pub fn linspace(start: f64, end: f64, points: usize) -> DVector<f64> {
    let last = points - 1;
    let step = (end - start) / last as f64;
    DVector::from_fn(points, |k, _| {
        if k == last {
            end
        } else {
            start + k as f64 * step
        }
    })
}
