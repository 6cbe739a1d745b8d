use serde::Serialize;

use crate::integration::integralestimate::IntegralEstimate;
use crate::integration::integrationerror::IntegrationError;
use crate::integration::trapezoid::integrate;
use crate::math::curve::curve::Curve;

/// 參考曲線預設取樣點數。
pub const DEFAULT_REFERENCE_RESOLUTION: usize = 1000;

/// 以細格點取樣的參考曲線：同時用於繪製 f(x) 與作為「真值」積分。
///
/// 解析度是點數而非梯形數，`resolution` 個點對應 `resolution - 1` 個梯形。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCurve {
    resolution: usize,
    samples: IntegralEstimate
}

impl ReferenceCurve {
    pub fn sample<C>(f: &C, a: f64, b: f64, resolution: usize) -> Result<ReferenceCurve, IntegrationError>
    where
        C: Curve + ?Sized,
    {
        if resolution < 2 {
            return Err(IntegrationError::InvalidReferenceResolution { resolution });
        }
        let samples = integrate(f, a, b, resolution - 1)?;
        Ok(ReferenceCurve { resolution, samples })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn area(&self) -> f64 {
        self.samples.area()
    }

    pub fn samples(&self) -> &IntegralEstimate {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_resolution_matches_fine_trapezoid() {
        let runge = |x: f64| 1.0 / (1.0 + x * x);
        let reference = ReferenceCurve::sample(&runge, 0.0, 5.0, DEFAULT_REFERENCE_RESOLUTION).unwrap();
        assert_eq!(reference.samples().sample_xs().len(), 1000);
        assert_relative_eq!(reference.area(), 1.3734007360647493, epsilon = 1e-12);
        // atan(5)
        assert_relative_eq!(reference.area(), 5.0f64.atan(), epsilon = 1e-7);
    }

    #[test]
    fn test_resolution_below_two_rejected() {
        for resolution in [0, 1] {
            assert_eq!(
                ReferenceCurve::sample(&|x: f64| x, 0.0, 1.0, resolution),
                Err(IntegrationError::InvalidReferenceResolution { resolution })
            );
        }
    }
}
