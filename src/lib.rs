pub mod error;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;
pub mod experiment;
pub mod logging;

// Convenience re-exports
pub use error::{NetError, Result};
pub use activation::activation::ActivationFunction;
pub use layers::{dense::Layer, neuron::Neuron};
pub use network::{Network, NetworkSpec, Validation};
pub use loss::mse::MseLoss;
pub use train::{train_loop, EpochStats, TrainConfig};
pub use data::normalize::{normalize_by_feature_scaling, FeatureScaler};
pub use experiment::{Experiment, Scaling};
