use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::data::csv::{Dataset, IRIS_FEATURES, WINE_FEATURES};
use crate::data::labels::ClassLabel;
use crate::data::normalize::{normalize_by_feature_scaling, FeatureScaler};
use crate::error::Result;
use crate::network::{Network, NetworkSpec, Validation};
use crate::train::{train_loop, TrainConfig};

/// Where the min-max statistics come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// Every row, train and held-out together, before the split.
    #[default]
    WholeDataset,
    /// Training rows only; the held-out rows reuse those statistics.
    TrainOnly,
}

/// One shuffle → scale → split → train → validate run.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub spec: NetworkSpec,
    /// Rows, counted from the front, used for training.
    pub train_len: usize,
    pub scaling: Scaling,
    /// Shuffle rows with this seed before splitting; `None` keeps file order.
    pub shuffle_seed: Option<u64>,
}

impl Experiment {
    /// 4 features, 3 species; 140 rows train, the rest validate.
    pub fn iris(hidden: usize, learning_rate: f64, epochs: usize) -> Experiment {
        Experiment::three_class(IRIS_FEATURES, hidden, learning_rate, epochs, 140)
    }

    /// 13 features, 3 cultivars; 150 rows train, the rest validate.
    pub fn wine(hidden: usize, learning_rate: f64, epochs: usize) -> Experiment {
        Experiment::three_class(WINE_FEATURES, hidden, learning_rate, epochs, 150)
    }

    fn three_class(features: usize, hidden: usize, learning_rate: f64, epochs: usize, train_len: usize) -> Experiment {
        let mut spec = NetworkSpec::new(vec![features, hidden, 3], learning_rate);
        spec.epochs = epochs;
        Experiment {
            spec,
            train_len,
            scaling: Scaling::WholeDataset,
            shuffle_seed: None,
        }
    }

    pub fn run<L: ClassLabel>(&self, mut dataset: Dataset<L>) -> Result<Validation> {
        if let Some(seed) = self.shuffle_seed {
            dataset.shuffle(&mut StdRng::seed_from_u64(seed));
        }
        if self.scaling == Scaling::WholeDataset {
            normalize_by_feature_scaling(&mut dataset.features)?;
        }

        let (mut train, mut test) = dataset.split(self.train_len)?;
        if self.scaling == Scaling::TrainOnly {
            let scaler = FeatureScaler::fit(&train.features)?;
            scaler.transform(&mut train.features)?;
            scaler.transform(&mut test.features)?;
        }
        info!(train = train.len(), validate = test.len(), scaling = ?self.scaling, "dataset prepared");

        let mut network = Network::from_spec(&self.spec)?;
        let targets = train.targets()?;
        train_loop(&mut network, &train.features, &targets, &TrainConfig::new(self.spec.epochs))?;
        network.validate(&test.features, &test.labels, L::from_output)
    }
}
