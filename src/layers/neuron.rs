use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};

/// A single unit: one weight per incoming signal and no bias.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<f64>,
    activator: ActivationFunction,
    weighted_sum: f64,  // pre-activation value, needed for the derivative
    output: f64,
    delta: f64,
}

impl Neuron {
    pub fn new(weights: Vec<f64>, activation: ActivationFunction) -> Neuron {
        Neuron {
            weights,
            activator: activation,
            weighted_sum: 0.0,
            output: 0.0,
            delta: 0.0,
        }
    }

    /// Weights drawn uniformly from [-1, 1).
    pub fn random<R: Rng>(fan_in: usize, activation: ActivationFunction, rng: &mut R) -> Neuron {
        let weights = (0..fan_in).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect();
        Neuron::new(weights, activation)
    }

    /// Computes `activation(weights · input)` and caches both the sum and the output.
    pub fn output(&mut self, input: &[f64]) -> Result<f64> {
        let z = self.dot(input)?;
        self.weighted_sum = z;
        self.output = self.activator.function(z);
        Ok(self.output)
    }

    /// Same value as `output()` without touching the cache.
    pub fn evaluate(&self, input: &[f64]) -> Result<f64> {
        Ok(self.activator.function(self.dot(input)?))
    }

    fn dot(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(NetError::shape("neuron input", self.weights.len(), input.len()));
        }
        Ok(self.weights.iter().zip(input).map(|(w, x)| w * x).sum())
    }

    /// Activation slope at the last forward pass.
    pub fn slope(&self) -> f64 {
        self.activator.derivative(self.weighted_sum)
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub(crate) fn weight(&self, k: usize) -> f64 {
        self.weights[k]
    }

    pub(crate) fn adjust_weight(&mut self, k: usize, amount: f64) {
        self.weights[k] += amount;
    }

    pub fn last_output(&self) -> f64 {
        self.output
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn output_is_sigmoid_of_dot_product() {
        let mut neuron = Neuron::new(vec![0.5, -0.25], ActivationFunction::Sigmoid);
        let out = neuron.output(&[2.0, 4.0]).unwrap();
        // 0.5*2 - 0.25*4 = 0
        assert!((out - 0.5).abs() < 1e-12);
        assert_eq!(neuron.last_output(), out);
        assert!((neuron.slope() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_input_length() {
        let mut neuron = Neuron::new(vec![0.1, 0.2, 0.3], ActivationFunction::Sigmoid);
        match neuron.output(&[1.0, 2.0]) {
            Err(NetError::ShapeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn evaluate_leaves_cache_alone() {
        let mut neuron = Neuron::new(vec![1.0], ActivationFunction::Sigmoid);
        neuron.output(&[0.0]).unwrap();
        let v = neuron.evaluate(&[3.0]).unwrap();
        assert!(v > 0.9);
        assert!((neuron.last_output() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn random_weights_are_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let neuron = Neuron::random(32, ActivationFunction::Sigmoid, &mut rng);
        assert_eq!(neuron.fan_in(), 32);
        assert!(neuron.weights().iter().all(|w| (-1.0..1.0).contains(w)));
    }

    #[test]
    fn adjust_weight_adds_in_place() {
        let mut neuron = Neuron::new(vec![0.2, 0.4], ActivationFunction::Sigmoid);
        neuron.adjust_weight(1, -0.1);
        assert!((neuron.weight(1) - 0.3).abs() < 1e-12);
        assert_eq!(neuron.weight(0), 0.2);
    }
}
