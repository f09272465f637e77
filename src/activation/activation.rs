use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Element-wise activation shared by every neuron of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Logistic function, output in (0, 1).
    #[default]
    Sigmoid,
    Tanh,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    /// Derivative at the pre-activation value `x` (the weighted sum that
    /// produced the neuron's output, not the output itself).
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }
}
