use log::{
    debug,
    warn
};
use serde::Serialize;
use thiserror::Error;

use crate::configuration::{
    Configuration,
    IntegrationSettings
};
use crate::expression::compiler::{
    compile,
    DisplayForm
};
use crate::expression::expressionerror::ExpressionError;
use crate::integration::accuracyreport::AccuracyReport;
use crate::integration::integralestimate::{
    IntegralEstimate,
    TrapezoidStrip
};
use crate::integration::integrationerror::IntegrationError;
use crate::integration::referencecurve::ReferenceCurve;
use crate::integration::trapezoid::integrate;
use crate::integrationproblem::IntegrationProblem;
use crate::manager::managererror::ManagerError;

#[derive(Debug, Error)]
pub enum TrapezoidError {
    #[error("invalid expression: {0}")]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error("interval bound {name} must be a finite number, got {value}")]
    NonFiniteBound { name: &'static str, value: f64 },

    #[error(transparent)]
    Configuration(#[from] ManagerError),
}

fn check_bound(name: &'static str, value: f64) -> Result<(), TrapezoidError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TrapezoidError::NonFiniteBound { name, value })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TrapezoidMethod
// ─────────────────────────────────────────────────────────────────────────────

/// 前端（視窗、CLI）唯一需要呼叫的入口：給定公式、區間與 N，
/// 回傳估計值、取樣點、參考曲線與誤差。每次呼叫彼此獨立。
pub struct TrapezoidMethod {
    settings: IntegrationSettings
}

impl TrapezoidMethod {
    pub fn new(settings: IntegrationSettings) -> TrapezoidMethod {
        TrapezoidMethod { settings }
    }

    pub fn from_configuration(configuration: &Configuration) -> TrapezoidMethod {
        TrapezoidMethod::new(configuration.settings())
    }

    pub fn settings(&self) -> IntegrationSettings {
        self.settings
    }

    pub fn compute(&self, formula: &str, a: f64, b: f64, n: usize) -> Result<TrapezoidReport, TrapezoidError> {
        check_bound("a", a)?;
        check_bound("b", b)?;

        let (function, display) = compile(formula)?.into_parts();
        debug!("compiled '{}' as f(x) = {}", function.source(), display.text());

        let estimate = integrate(&function, a, b, n)?;
        debug!("trapezoid rule on [{}, {}] with N = {}: {}", a, b, n, estimate.area());

        // 參考曲線只影響誤差報告；細格點上的求值失敗不讓整次計算失敗
        let reference = match ReferenceCurve::sample(&function, a, b, self.settings.reference_resolution()) {
            Ok(reference) => Some(reference),
            Err(error @ IntegrationError::Evaluation { .. }) => {
                warn!("reference curve for '{}' omitted: {}", function.source(), error);
                None
            }
            Err(error) => return Err(error.into()),
        };
        let accuracy = reference
            .as_ref()
            .map(|reference| AccuracyReport::new(reference.area(), estimate.area()));

        Ok(TrapezoidReport {
            formula: function.source().to_owned(),
            display,
            a,
            b,
            n,
            estimate,
            reference,
            accuracy,
            display_digits: self.settings.display_digits(),
        })
    }

    pub fn compute_problem(&self, problem: &IntegrationProblem) -> Result<TrapezoidReport, TrapezoidError> {
        self.compute(problem.formula(), problem.a(), problem.b(), problem.n())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TrapezoidReport
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TrapezoidReport {
    formula: String,
    display: DisplayForm,
    a: f64,
    b: f64,
    n: usize,
    estimate: IntegralEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<ReferenceCurve>,
    accuracy: Option<AccuracyReport>,
    #[serde(skip)]
    display_digits: usize
}

impl TrapezoidReport {
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn display(&self) -> &DisplayForm {
        &self.display
    }

    pub fn interval(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn estimate(&self) -> &IntegralEstimate {
        &self.estimate
    }

    pub fn area(&self) -> f64 {
        self.estimate.area()
    }

    pub fn reference(&self) -> Option<&ReferenceCurve> {
        self.reference.as_ref()
    }

    pub fn accuracy(&self) -> Option<&AccuracyReport> {
        self.accuracy.as_ref()
    }

    pub fn strips(&self) -> Vec<TrapezoidStrip> {
        self.estimate.strips()
    }

    /// 梯形頂點的最高 y 值（至少為 0），繪圖層用來擺放資訊框。
    pub fn max_strip_height(&self) -> f64 {
        self.strips()
            .iter()
            .map(TrapezoidStrip::max_y)
            .fold(0.0, f64::max)
    }

    /// 資訊框文字，每行一項。
    pub fn summary(&self) -> String {
        self.render(format!("f(x) = {}", self.display.text()))
    }

    /// 同 `summary`，但 f(x) 以 `$...$` 包住的 LaTeX 呈現，供繪圖標題使用。
    pub fn latex_summary(&self) -> String {
        self.render(format!("f(x) = ${}$", self.display.latex()))
    }

    fn render(&self, formula_line: String) -> String {
        let digits = self.display_digits;
        let (absolute, relative) = match &self.accuracy {
            Some(accuracy) => (
                format!("{:.*}", digits, accuracy.absolute_error()),
                accuracy.format_relative_error(digits),
            ),
            None => ("unavailable".to_owned(), "unavailable".to_owned()),
        };
        [
            formula_line,
            format!("interval = [{}, {}]", self.a, self.b),
            format!("N = {}", self.n),
            format!("Area = {:.*}", digits, self.estimate.area()),
            format!("Absolute error: {}", absolute),
            format!("Relative error: {}", relative),
        ]
        .join("\n")
    }
}
