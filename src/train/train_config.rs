/// Configuration for a `train_loop` run.
///
/// Samples are always visited in the order given; shuffle before calling if
/// a different order is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs }
    }
}
