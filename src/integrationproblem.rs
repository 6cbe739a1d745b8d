use serde::{
    Deserialize,
    Serialize
};

/// 一組具名的求積輸入：公式、區間與梯形個數。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationProblem {
    name: String,
    formula: String,
    a: f64,
    b: f64,
    n: usize
}

impl IntegrationProblem {
    pub fn new(name: &str, formula: &str, a: f64, b: f64, n: usize) -> IntegrationProblem {
        IntegrationProblem {
            name: name.to_owned(),
            formula: formula.to_owned(),
            a,
            b,
            n
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn n(&self) -> usize {
        self.n
    }
}
