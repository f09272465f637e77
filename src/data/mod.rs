pub mod csv;
pub mod labels;
pub mod normalize;

pub use csv::{load_iris, load_wine, Dataset};
pub use labels::{interpret_iris, interpret_wine, one_hot, ClassLabel, IrisSpecies, WineClass};
pub use normalize::{normalize_by_feature_scaling, FeatureScaler};
