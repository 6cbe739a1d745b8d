use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::fs::File;
use std::io::BufReader;

use serde::{
    Deserialize,
    Serialize
};

use crate::integration::referencecurve::DEFAULT_REFERENCE_RESOLUTION;
use crate::integrationproblem::IntegrationProblem;
use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};

pub const DEFAULT_DISPLAY_DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    /// 參考曲線的取樣點數
    reference_resolution: usize,
    /// 摘要中面積與誤差的小數位數
    display_digits: usize
}

impl IntegrationSettings {
    pub fn new(reference_resolution: usize, display_digits: usize) -> IntegrationSettings {
        IntegrationSettings { reference_resolution, display_digits }
    }

    pub fn reference_resolution(&self) -> usize {
        self.reference_resolution
    }

    pub fn display_digits(&self) -> usize {
        self.display_digits
    }

    pub fn with_reference_resolution(self, reference_resolution: usize) -> IntegrationSettings {
        IntegrationSettings { reference_resolution, ..self }
    }
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        IntegrationSettings::new(DEFAULT_REFERENCE_RESOLUTION, DEFAULT_DISPLAY_DIGITS)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    settings: Option<IntegrationSettings>,
    #[serde(default)]
    problems: Vec<serde_json::Value>
}

/// 設定檔格式：
///
/// ```json
/// {
///     "settings": { "reference_resolution": 1000, "display_digits": 5 },
///     "problems": [
///         { "name": "runge", "formula": "1 / (1 + x ** 2)", "a": 0, "b": 5, "n": 10 }
///     ]
/// }
/// ```
///
/// 兩個欄位皆可省略；同名的 problem 會覆蓋內建範例。
pub struct Configuration {
    settings_cell: RefCell<IntegrationSettings>,
    problem_manager: Manager<IntegrationProblem>
}

impl Configuration {
    pub fn new() -> Configuration {
        let problem_manager = Manager::new(ManagerError::from_json_or_json_parse_error);
        for problem in builtin_problems() {
            let name = problem.name().to_owned();
            problem_manager.insert(&name, problem);
        }
        Configuration {
            settings_cell: RefCell::new(IntegrationSettings::default()),
            problem_manager
        }
    }

    pub fn settings(&self) -> IntegrationSettings {
        *self.settings_cell.borrow()
    }

    pub fn set_settings(&self, settings: IntegrationSettings) {
        *self.settings_cell.borrow_mut() = settings;
    }

    pub fn problem_manager(&self) -> &Manager<IntegrationProblem> {
        &self.problem_manager
    }

    pub fn from_reader(&self, file_path: &str) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.from_json_value(json_value)
    }

    pub fn from_json_value(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        if let Some(settings) = json_prop.settings {
            self.set_settings(settings);
        }
        self.problem_manager.insert_obj_from_json_vec(&json_prop.problems)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

fn builtin_problems() -> Vec<IntegrationProblem> {
    vec![
        IntegrationProblem::new("runge", "1 / (1 + x ** 2)", 0.0, 5.0, 10),
        IntegrationProblem::new("gaussian", "np.exp(-x**2)", 0.0, 1.0, 4),
        IntegrationProblem::new("sine", "np.sin(x)", 0.0, FRAC_PI_2, 100),
        IntegrationProblem::new("inverse_square", "1/x**2", 1.0, 2.0, 5),
    ]
}
