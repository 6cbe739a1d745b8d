use nalgebra::DVector;

use crate::integration::integralestimate::IntegralEstimate;
use crate::integration::integrationerror::{
    EvaluationFailure,
    IntegrationError
};
use crate::integration::samplegrid::linspace;
use crate::math::curve::curve::Curve;

/// 以 N 個等寬梯形近似 ∫_a^b f(x) dx：
///
///   T = (dx / 2) · Σ_{k=1}^{N} (f(x_k) + f(x_{k-1})),  x_k = a + k·dx,  dx = (b - a) / N
///
/// `a > b` 時 dx 為負，結果即 -∫_b^a；`a == b` 時面積為 0。
/// 任一取樣點得到 NaN 或 ±inf 都視為求值失敗，回報第一個出錯的 x。
pub fn integrate<C>(f: &C, a: f64, b: f64, n: usize) -> Result<IntegralEstimate, IntegrationError>
where
    C: Curve + ?Sized,
{
    let points = match n.checked_add(1) {
        Some(points) if n > 0 => points,
        _ => return Err(IntegrationError::InvalidSubdivision { n }),
    };

    let xs = linspace(a, b, points);
    let ys = f.values(&xs);
    check_samples(&xs, &ys)?;

    let dx = (b - a) / n as f64;
    let area = trapezoid_sum(&ys, dx);
    Ok(IntegralEstimate::new(area, xs, ys))
}

/// (dx / 2) · (Σ y_right + Σ y_left)；少於兩個取樣點時面積為 0。
pub fn trapezoid_sum(ys: &DVector<f64>, dx: f64) -> f64 {
    if ys.len() < 2 {
        return 0.0;
    }
    let n = ys.len() - 1;
    let y_right = ys.rows(1, n).sum();
    let y_left = ys.rows(0, n).sum();
    (dx / 2.0) * (y_right + y_left)
}

fn check_samples(xs: &DVector<f64>, ys: &DVector<f64>) -> Result<(), IntegrationError> {
    xs.iter()
        .zip(ys.iter())
        .find_map(|(&x, &y)| EvaluationFailure::classify(y).map(|cause| (x, cause)))
        .map_or(Ok(()), |(x, cause)| Err(IntegrationError::Evaluation { x, cause }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{
        assert_abs_diff_eq,
        assert_relative_eq
    };
    use crate::math::curve::nonparametriccurve::nonparametriccurve::NonparametricCurve;

    #[test]
    fn test_linear_single_trapezoid_is_exact() {
        let estimate = integrate(&|x: f64| x, 0.0, 1.0, 1).unwrap();
        assert_eq!(estimate.area(), 0.5);
    }

    #[test]
    fn test_runge_function() {
        let estimate = integrate(&|x: f64| 1.0 / (1.0 + x * x), 0.0, 5.0, 10).unwrap();
        assert_abs_diff_eq!(estimate.area(), 1.37340, epsilon = 1e-3);
        assert_relative_eq!(estimate.area(), 1.3731040812301096, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_layout() {
        let estimate = integrate(&f64::sin, 0.0, 2.0, 8).unwrap();
        assert_eq!(estimate.sample_xs().len(), 9);
        assert_eq!(estimate.sample_ys().len(), 9);
        assert_eq!(estimate.subdivisions(), 8);
        assert_eq!(estimate.sample_xs()[0], 0.0);
        assert_eq!(estimate.sample_xs()[8], 2.0);
        for (x, y) in estimate.sample_xs().iter().zip(estimate.sample_ys().iter()) {
            assert_eq!(*y, x.sin());
        }
        assert_eq!(estimate.min_x(), 0.0);
        assert_eq!(estimate.max_x(), 2.0);
    }

    #[test]
    fn test_zero_subdivisions_rejected() {
        assert_eq!(
            integrate(&|x: f64| x, 0.0, 1.0, 0),
            Err(IntegrationError::InvalidSubdivision { n: 0 })
        );
    }

    #[test]
    fn test_subdivision_count_without_room_for_endpoint_rejected() {
        assert_eq!(
            integrate(&|x: f64| x, 0.0, 1.0, usize::MAX),
            Err(IntegrationError::InvalidSubdivision { n: usize::MAX })
        );
    }

    #[test]
    fn test_trapezoid_sum_needs_two_samples() {
        assert_eq!(trapezoid_sum(&DVector::from_vec(vec![]), 0.5), 0.0);
        assert_eq!(trapezoid_sum(&DVector::from_vec(vec![3.0]), 0.5), 0.0);
        assert_eq!(trapezoid_sum(&DVector::from_vec(vec![1.0, 3.0]), 0.5), 1.0);
    }

    #[test]
    fn test_reversed_interval_negates_area() {
        let forward = integrate(&|x: f64| x * x, 1.0, 3.0, 20).unwrap();
        let backward = integrate(&|x: f64| x * x, 3.0, 1.0, 20).unwrap();
        assert_relative_eq!(backward.area(), -forward.area(), epsilon = 1e-12);
        assert_eq!(backward.sample_xs()[0], 3.0);
        assert_eq!(backward.sample_xs()[20], 1.0);
        assert_eq!(backward.min_x(), 1.0);
        assert_eq!(backward.max_x(), 3.0);
    }

    #[test]
    fn test_degenerate_interval_has_zero_area() {
        let estimate = integrate(&|x: f64| x.exp(), 2.0, 2.0, 5).unwrap();
        assert_eq!(estimate.area(), 0.0);
        assert_eq!(estimate.sample_xs().len(), 6);
    }

    #[test]
    fn test_evaluation_failure_reports_first_bad_sample() {
        // 1/x 在 x = 0 有極點
        let error = integrate(&|x: f64| 1.0 / x, -1.0, 1.0, 4).unwrap_err();
        assert_eq!(
            error,
            IntegrationError::Evaluation { x: 0.0, cause: EvaluationFailure::Infinite }
        );

        let error = integrate(&|x: f64| x.ln(), -1.0, 1.0, 2).unwrap_err();
        assert_eq!(
            error,
            IntegrationError::Evaluation { x: -1.0, cause: EvaluationFailure::NotANumber }
        );
    }

    #[test]
    fn test_strips_cover_estimate() {
        let estimate = integrate(&|x: f64| x * x, 0.0, 1.0, 4).unwrap();
        let strips = estimate.strips();
        assert_eq!(strips.len(), 4);
        let total: f64 = strips.iter().map(|strip| strip.area()).sum();
        assert_relative_eq!(total, estimate.area(), epsilon = 1e-12);

        let polygon = strips[1].polygon();
        assert_eq!(polygon[0].x(), 0.25);
        assert_eq!(polygon[0].y(), 0.0);
        assert_eq!(polygon[1].y(), 0.0625);
        assert_eq!(polygon[2].x(), 0.5);
        assert_eq!(polygon[2].y(), 0.25);
        assert_eq!(polygon[3].y(), 0.0);
        assert_relative_eq!(strips[1].slope(), 0.75);
    }
}
