use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::layers::neuron::Neuron;

/// A fully connected layer of neurons sharing the same fan-in.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
    input_cache: Vec<f64>,   // what the last forward pass fed in; read by the weight update
    output_cache: Vec<f64>,
    previous: Option<usize>, // index of the feeding layer; None means raw features
}

impl Layer {
    /// Builds a layer from explicit neurons. All of them must have the same fan-in.
    pub fn new(neurons: Vec<Neuron>, previous: Option<usize>) -> Result<Layer> {
        if neurons.is_empty() {
            return Err(NetError::InvalidArchitecture("a layer needs at least one neuron".into()));
        }
        let fan_in = neurons[0].fan_in();
        if let Some(odd) = neurons.iter().find(|n| n.fan_in() != fan_in) {
            return Err(NetError::shape("layer fan-in", fan_in, odd.fan_in()));
        }

        Ok(Layer {
            neurons,
            input_cache: Vec::new(),
            output_cache: Vec::new(),
            previous,
        })
    }

    pub fn random<R: Rng>(
        size: usize,
        fan_in: usize,
        previous: Option<usize>,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Layer> {
        let neurons = (0..size)
            .map(|_| Neuron::random(fan_in, activation, rng))
            .collect();
        Layer::new(neurons, previous)
    }

    /// Forward pass; caches the input and every neuron's output.
    pub fn outputs(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        self.input_cache = input.to_vec();
        let outputs = self.neurons.iter_mut()
            .map(|neuron| neuron.output(input))
            .collect::<Result<Vec<f64>>>()?;
        self.output_cache = outputs.clone();
        Ok(outputs)
    }

    /// Forward pass that leaves every cache untouched.
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        self.neurons.iter().map(|neuron| neuron.evaluate(input)).collect()
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.fan_in() {
            return Err(NetError::shape("layer input", self.fan_in(), input.len()));
        }
        Ok(())
    }

    /// Output-layer deltas: `(expected_i - output_i) * slope_i`.
    pub fn compute_output_deltas(&mut self, expected: &[f64]) -> Result<()> {
        if expected.len() != self.size() {
            return Err(NetError::shape("expected output", self.size(), expected.len()));
        }
        for (neuron, target) in self.neurons.iter_mut().zip(expected) {
            let delta = (target - neuron.last_output()) * neuron.slope();
            neuron.set_delta(delta);
        }
        Ok(())
    }

    /// Hidden-layer deltas from the layer directly downstream of this one.
    ///
    /// Neuron `i` collects `weight_i * delta` from every downstream neuron and
    /// scales the sum by its own slope.
    pub fn compute_hidden_deltas(&mut self, next: &Layer) -> Result<()> {
        if next.fan_in() != self.size() {
            return Err(NetError::shape("downstream fan-in", self.size(), next.fan_in()));
        }
        for (i, neuron) in self.neurons.iter_mut().enumerate() {
            let downstream: f64 = next.neurons.iter()
                .map(|n| n.weight(i) * n.delta())
                .sum();
            neuron.set_delta(downstream * neuron.slope());
        }
        Ok(())
    }

    /// `weight_k += lr * delta * input_k`, using the input cached by the last `outputs()`.
    /// Fails if no forward pass has cached an input yet.
    pub fn apply_deltas(&mut self, learning_rate: f64) -> Result<()> {
        if self.input_cache.len() != self.fan_in() {
            return Err(NetError::shape("cached layer input", self.fan_in(), self.input_cache.len()));
        }
        for neuron in &mut self.neurons {
            let step = learning_rate * neuron.delta();
            for (k, x) in self.input_cache.iter().enumerate() {
                neuron.adjust_weight(k, step * x);
            }
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn fan_in(&self) -> usize {
        self.neurons[0].fan_in()
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn last_input(&self) -> &[f64] {
        &self.input_cache
    }

    pub fn last_output(&self) -> &[f64] {
        &self.output_cache
    }

    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.neurons.iter().map(|n| n.weights().to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(weights: Vec<Vec<f64>>) -> Layer {
        let neurons = weights.into_iter()
            .map(|w| Neuron::new(w, ActivationFunction::Sigmoid))
            .collect();
        Layer::new(neurons, None).unwrap()
    }

    #[test]
    fn outputs_follow_neuron_order_and_cache_input() {
        let mut l = layer(vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![-10.0, -10.0]]);
        let out = l.outputs(&[1.0, 1.0]).unwrap();
        assert_eq!(out.len(), 3);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!(out[1] > 0.99);
        assert!(out[2] < 0.01);
        assert_eq!(l.last_input(), &[1.0, 1.0]);
        assert_eq!(l.last_output(), out.as_slice());
    }

    #[test]
    fn mixed_fan_in_is_rejected() {
        let neurons = vec![
            Neuron::new(vec![0.1, 0.2], ActivationFunction::Sigmoid),
            Neuron::new(vec![0.1], ActivationFunction::Sigmoid),
        ];
        assert!(matches!(Layer::new(neurons, None), Err(NetError::ShapeMismatch { .. })));
        assert!(matches!(Layer::new(vec![], None), Err(NetError::InvalidArchitecture(_))));
    }

    #[test]
    fn wrong_width_fails_before_caching() {
        let mut l = layer(vec![vec![0.3, 0.3]]);
        l.outputs(&[1.0, 2.0]).unwrap();
        assert!(l.outputs(&[1.0]).is_err());
        assert_eq!(l.last_input(), &[1.0, 2.0]);
    }

    #[test]
    fn hidden_deltas_sum_downstream_contributions() {
        let mut hidden = layer(vec![vec![0.0], vec![0.0]]);
        hidden.outputs(&[1.0]).unwrap(); // both outputs 0.5, slope 0.25

        let mut output = layer(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        output.neurons[0].set_delta(0.1);
        output.neurons[1].set_delta(-0.2);

        hidden.compute_hidden_deltas(&output).unwrap();
        // neuron 0: (1.0*0.1 + 3.0*-0.2) * 0.25
        assert!((hidden.neurons()[0].delta() - (-0.125)).abs() < 1e-12);
        // neuron 1: (2.0*0.1 + 4.0*-0.2) * 0.25
        assert!((hidden.neurons()[1].delta() - (-0.15)).abs() < 1e-12);
    }

    #[test]
    fn apply_deltas_uses_cached_input() {
        let mut l = layer(vec![vec![0.0, 0.0]]);
        l.outputs(&[2.0, -1.0]).unwrap();
        l.compute_output_deltas(&[1.0]).unwrap(); // (1 - 0.5) * 0.25
        l.apply_deltas(0.5).unwrap();
        let w = l.weights();
        assert!((w[0][0] - 0.5 * 0.125 * 2.0).abs() < 1e-12);
        assert!((w[0][1] - 0.5 * 0.125 * -1.0).abs() < 1e-12);
    }

    #[test]
    fn downstream_width_must_match_layer_size() {
        let mut hidden = layer(vec![vec![0.1], vec![0.2], vec![0.3]]);
        hidden.outputs(&[1.0]).unwrap();
        let next = layer(vec![vec![1.0, 2.0]]);
        assert!(matches!(
            hidden.compute_hidden_deltas(&next),
            Err(NetError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn apply_deltas_needs_a_forward_pass_first() {
        let mut l = layer(vec![vec![0.4, 0.6]]);
        assert!(matches!(
            l.apply_deltas(0.5),
            Err(NetError::ShapeMismatch { expected: 2, actual: 0, .. })
        ));
        assert_eq!(l.weights(), vec![vec![0.4, 0.6]]);
        assert_eq!(l.size(), 1);
    }
}
