pub mod network;
pub mod spec;
pub mod validation;

pub use network::Network;
pub use spec::NetworkSpec;
pub use validation::Validation;
