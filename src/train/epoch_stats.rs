use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean squared error over all samples, measured during the epoch.
    pub train_loss: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
