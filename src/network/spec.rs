use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;

fn default_seed() -> u64 {
    42
}

fn default_epochs() -> usize {
    1
}

/// A serializable description of a network plus how to train it.
///
/// Only the architecture and hyperparameters live here; trained weights are
/// never written out.
///
/// Fields:
/// - `layer_sizes`   — input width, one or more hidden widths, output width
/// - `learning_rate` — step size shared by every weight update
/// - `activation`    — activation used by every neuron
/// - `seed`          — seed for weight initialisation
/// - `epochs`        — number of passes over the training rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layer_sizes: Vec<usize>,
    pub learning_rate: f64,
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
}

impl NetworkSpec {
    pub fn new(layer_sizes: Vec<usize>, learning_rate: f64) -> NetworkSpec {
        NetworkSpec {
            layer_sizes,
            learning_rate,
            activation: ActivationFunction::default(),
            seed: default_seed(),
            epochs: default_epochs(),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let spec: NetworkSpec =
            serde_json::from_str(r#"{ "layer_sizes": [4, 6, 3], "learning_rate": 0.3 }"#).unwrap();
        assert_eq!(spec, NetworkSpec::new(vec![4, 6, 3], 0.3));
        assert_eq!(spec.activation, ActivationFunction::Sigmoid);
    }

    #[test]
    fn save_then_load_from_disk() {
        let mut spec = NetworkSpec::new(vec![13, 7, 3], 0.9);
        spec.epochs = 10;
        spec.seed = 3;
        let path = std::env::temp_dir().join("ferrite_mlp_spec_test.json");
        let path = path.to_str().unwrap();
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded, spec);
    }
}
