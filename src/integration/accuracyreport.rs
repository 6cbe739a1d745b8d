use serde::Serialize;

use crate::integration::integrationerror::IntegrationError;

/// 估計值相對於參考積分的誤差。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyReport {
    reference: f64,
    estimate: f64,
    absolute: f64,
    /// 參考值恰為 0 時無定義
    relative: Option<f64>
}

impl AccuracyReport {
    pub fn new(reference: f64, estimate: f64) -> AccuracyReport {
        let absolute = (reference - estimate).abs();
        let relative = if reference == 0.0 {
            None
        } else {
            Some(absolute / reference.abs())
        };
        AccuracyReport { reference, estimate, absolute, relative }
    }

    pub fn reference(&self) -> f64 {
        self.reference
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn absolute_error(&self) -> f64 {
        self.absolute
    }

    pub fn relative_error(&self) -> Result<f64, IntegrationError> {
        self.relative.ok_or(IntegrationError::DivisionByZero)
    }

    /// `digits` 位小數；相對誤差無定義時為 "undefined"。
    pub fn format_relative_error(&self, digits: usize) -> String {
        match self.relative {
            Some(relative) => format!("{:.*}", digits, relative),
            None => "undefined".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_errors() {
        let report = AccuracyReport::new(2.0, 1.5);
        assert_eq!(report.absolute_error(), 0.5);
        assert_relative_eq!(report.relative_error().unwrap(), 0.25);

        let report = AccuracyReport::new(-2.0, -1.5);
        assert_eq!(report.absolute_error(), 0.5);
        assert_relative_eq!(report.relative_error().unwrap(), 0.25);
    }

    #[test]
    fn test_zero_reference() {
        let report = AccuracyReport::new(0.0, 1e-3);
        assert_eq!(report.absolute_error(), 1e-3);
        assert_eq!(report.relative_error(), Err(IntegrationError::DivisionByZero));
        assert_eq!(report.format_relative_error(5), "undefined");
    }

    #[test]
    fn test_format_relative_error() {
        assert_eq!(AccuracyReport::new(4.0, 3.0).format_relative_error(5), "0.25000");
    }
}
