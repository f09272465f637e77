use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::layers::{dense::Layer, neuron::Neuron};
use crate::loss::mse::MseLoss;
use crate::network::spec::NetworkSpec;
use crate::network::validation::Validation;

/// A feed-forward network trained one example at a time.
///
/// `layers` holds the hidden layers followed by the output layer; the input
/// width is implied by the first layer's fan-in.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    learning_rate: f64,
}

impl Network {
    /// Builds a sigmoid network from `[input, hidden.., output]` widths.
    pub fn new<R: Rng>(layer_sizes: &[usize], learning_rate: f64, rng: &mut R) -> Result<Network> {
        Network::with_activation(layer_sizes, learning_rate, ActivationFunction::Sigmoid, rng)
    }

    pub fn with_activation<R: Rng>(
        layer_sizes: &[usize],
        learning_rate: f64,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Network> {
        if layer_sizes.len() < 3 {
            return Err(NetError::InvalidArchitecture(format!(
                "need input, hidden and output widths, got {} size(s)",
                layer_sizes.len()
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(NetError::InvalidArchitecture("layer widths must be non-zero".into()));
        }

        let mut layers = Vec::with_capacity(layer_sizes.len() - 1);
        for (i, pair) in layer_sizes.windows(2).enumerate() {
            layers.push(Layer::random(pair[1], pair[0], i.checked_sub(1), activation, rng)?);
        }

        Network::from_layers(layers, learning_rate)
    }

    /// Seeds a `StdRng` with `spec.seed` so initial weights are reproducible.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(spec.seed);
        Network::with_activation(&spec.layer_sizes, spec.learning_rate, spec.activation, &mut rng)
    }

    /// Builds a network from explicit weights, indexed `[layer][neuron][input]`.
    pub fn from_weights(
        weights: Vec<Vec<Vec<f64>>>,
        learning_rate: f64,
        activation: ActivationFunction,
    ) -> Result<Network> {
        let layers = weights.into_iter()
            .enumerate()
            .map(|(i, layer)| {
                let neurons = layer.into_iter()
                    .map(|w| Neuron::new(w, activation))
                    .collect();
                Layer::new(neurons, i.checked_sub(1))
            })
            .collect::<Result<Vec<Layer>>>()?;

        Network::from_layers(layers, learning_rate)
    }

    fn from_layers(layers: Vec<Layer>, learning_rate: f64) -> Result<Network> {
        if layers.len() < 2 {
            return Err(NetError::InvalidArchitecture(
                "need at least one hidden layer and an output layer".into(),
            ));
        }
        for pair in layers.windows(2) {
            if pair[1].fan_in() != pair[0].size() {
                return Err(NetError::shape("layer fan-in", pair[0].size(), pair[1].fan_in()));
            }
        }
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(NetError::InvalidArchitecture(format!(
                "learning rate must be a non-negative number, got {learning_rate}"
            )));
        }

        Ok(Network { layers, learning_rate })
    }

    /// Forward pass; every layer caches its input and outputs for backprop.
    pub fn outputs(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.outputs(&current)?;
        }
        Ok(current)
    }

    /// Forward pass without touching any cached state.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.evaluate(&current)?;
        }
        Ok(current)
    }

    /// Fills every neuron's delta for the forward pass just run.
    fn backpropagate(&mut self, expected: &[f64]) -> Result<()> {
        let last = self.layers.len() - 1;
        self.layers[last].compute_output_deltas(expected)?;

        // Walk output-ward to input-ward; each layer hands its deltas to the one feeding it.
        for idx in (1..self.layers.len()).rev() {
            if let Some(prev) = self.layers[idx].previous() {
                let (head, tail) = self.layers.split_at_mut(idx);
                head[prev].compute_hidden_deltas(&tail[0])?;
            }
        }
        Ok(())
    }

    fn update_weights(&mut self) -> Result<()> {
        for layer in &mut self.layers {
            layer.apply_deltas(self.learning_rate)?;
        }
        Ok(())
    }

    /// One online-gradient-descent step. Returns the squared error of the
    /// forward pass taken before the update.
    pub fn train_step(&mut self, input: &[f64], expected: &[f64]) -> Result<f64> {
        self.check_sample(input, expected)?;
        let output = self.step(input, expected)?;
        Ok(MseLoss::squared_error(&output, expected))
    }

    /// Forward, backward, update. Returns the output seen before the update.
    fn step(&mut self, input: &[f64], expected: &[f64]) -> Result<Vec<f64>> {
        let output = self.outputs(input)?;
        self.backpropagate(expected)?;
        self.update_weights()?;
        Ok(output)
    }

    /// One epoch over `inputs` in the given order. Shapes are checked for every
    /// row before any weight changes.
    pub fn train(&mut self, inputs: &[Vec<f64>], expecteds: &[Vec<f64>]) -> Result<()> {
        self.train_epoch(inputs, expecteds).map(|_| ())
    }

    /// Same as `train`, returning the mean squared error seen during the epoch.
    pub(crate) fn train_epoch(&mut self, inputs: &[Vec<f64>], expecteds: &[Vec<f64>]) -> Result<f64> {
        if inputs.len() != expecteds.len() {
            return Err(NetError::shape("training targets", inputs.len(), expecteds.len()));
        }
        for (input, expected) in inputs.iter().zip(expecteds) {
            self.check_sample(input, expected)?;
        }

        let mut total_loss = 0.0;
        for (input, expected) in inputs.iter().zip(expecteds) {
            let output = self.step(input, expected)?;
            total_loss += MseLoss::loss(&output, expected);
        }
        let mean = if inputs.is_empty() { 0.0 } else { total_loss / inputs.len() as f64 };
        debug!(samples = inputs.len(), loss = mean, "trained one epoch");
        Ok(mean)
    }

    /// Runs every input forward, maps the output through `interpret` and
    /// counts matches against `expected_labels`. No weights or caches change.
    pub fn validate<L, F>(&self, inputs: &[Vec<f64>], expected_labels: &[L], interpret: F) -> Result<Validation>
    where
        L: PartialEq,
        F: Fn(&[f64]) -> L,
    {
        if inputs.len() != expected_labels.len() {
            return Err(NetError::shape("validation labels", inputs.len(), expected_labels.len()));
        }

        let mut correct = 0;
        for (input, expected) in inputs.iter().zip(expected_labels) {
            let output = self.predict(input)?;
            if interpret(&output) == *expected {
                correct += 1;
            }
        }

        let result = Validation::new(correct, inputs.len());
        info!(correct = result.correct, total = result.total, accuracy = result.accuracy, "validated");
        Ok(result)
    }

    fn check_sample(&self, input: &[f64], expected: &[f64]) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(NetError::shape("feature vector", self.input_size(), input.len()));
        }
        if expected.len() != self.output_size() {
            return Err(NetError::shape("target vector", self.output_size(), expected.len()));
        }
        Ok(())
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].fan_in()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Snapshot of every weight, indexed `[layer][neuron][input]`.
    pub fn weights(&self) -> Vec<Vec<Vec<f64>>> {
        self.layers.iter().map(|l| l.weights()).collect()
    }
}
