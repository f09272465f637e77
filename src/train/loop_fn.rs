use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` for `config.epochs` epochs of online gradient descent and
/// returns the statistics of every completed epoch.
///
/// Each epoch is exactly one `Network::train` over the rows in order, so the
/// result is reproducible for a fixed initial network.
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let train_loss = network.train_epoch(train_inputs, train_labels)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        debug!(epoch, total = config.epochs, train_loss, elapsed_ms, "epoch finished");
        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        });
    }

    if let Some(last) = history.last() {
        info!(epochs = last.epoch, train_loss = last.train_loss, "training finished");
    }
    Ok(history)
}
