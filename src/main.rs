use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ferrite_mlp::data::{load_iris, load_wine};
use ferrite_mlp::{logging, Experiment, NetworkSpec, Scaling};

#[derive(Parser)]
#[command(name = "ferrite-mlp", about = "Train and validate a small MLP on a tabular dataset")]
struct Cli {
    /// Log per-epoch progress
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Iris species (4 features). Defaults: 6 hidden, rate 0.3, 50 epochs
    Iris(RunArgs),
    /// Wine cultivars (13 features). Defaults: 7 hidden, rate 0.9, 10 epochs
    Wine(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// CSV file with the dataset
    #[arg(short, long, value_name = "PATH")]
    data: PathBuf,
    /// NetworkSpec JSON; explicit flags override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of hidden neurons
    #[arg(long, value_name = "INT")]
    hidden: Option<usize>,
    /// Learning rate between 0.0 and 1.0
    #[arg(short, long, value_name = "FLOAT", value_parser = parse_learning_rate)]
    learning_rate: Option<f64>,
    /// Passes over the training rows
    #[arg(short, long, value_name = "INT")]
    epochs: Option<usize>,
    /// Seed for the initial weights
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,
    /// Seed for shuffling rows before the split
    #[arg(long, value_name = "INT", default_value_t = 0)]
    shuffle_seed: u64,
    /// Keep file order instead of shuffling
    #[arg(long)]
    no_shuffle: bool,
    /// Fit feature scaling on the training rows only
    #[arg(long)]
    train_only_stats: bool,
}

fn parse_learning_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    check_learning_rate(rate)
}

fn check_learning_rate(rate: f64) -> Result<f64, String> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("learning rate must be between 0.0 - 1.0, got {rate}"));
    }
    Ok(rate)
}

impl RunArgs {
    fn experiment(&self, mut experiment: Experiment) -> Result<Experiment, Box<dyn Error>> {
        if let Some(path) = &self.config {
            let path = path.to_str().ok_or("config path is not valid UTF-8")?;
            experiment.spec = NetworkSpec::load_json(path)?;
        }

        let spec = &mut experiment.spec;
        if let Some(hidden) = self.hidden {
            let input = spec.layer_sizes.first().copied().unwrap_or_default();
            let output = spec.layer_sizes.last().copied().unwrap_or_default();
            spec.layer_sizes = vec![input, hidden, output];
        }
        if let Some(rate) = self.learning_rate {
            spec.learning_rate = rate;
        }
        if let Some(epochs) = self.epochs {
            spec.epochs = epochs;
        }
        if let Some(seed) = self.seed {
            spec.seed = seed;
        }
        check_learning_rate(spec.learning_rate)?;

        experiment.shuffle_seed = (!self.no_shuffle).then_some(self.shuffle_seed);
        if self.train_only_stats {
            experiment.scaling = Scaling::TrainOnly;
        }
        Ok(experiment)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    logging::init_logging(if args.verbose { "debug" } else { "warn" })?;

    let result = match args.command {
        Command::Iris(run) => {
            let experiment = run.experiment(Experiment::iris(6, 0.3, 50))?;
            experiment.run(load_iris(&run.data)?)?
        }
        Command::Wine(run) => {
            let experiment = run.experiment(Experiment::wine(7, 0.9, 10))?;
            experiment.run(load_wine(&run.data)?)?
        }
    };

    println!("{result}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iris_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["ferrite-mlp", "iris", "--data", "iris.csv"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Iris(run) => run,
            Command::Wine(_) => panic!("expected the iris subcommand"),
        }
    }

    fn write_config(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn flag_rate_outside_unit_range_is_rejected() {
        let argv = ["ferrite-mlp", "iris", "--data", "iris.csv", "--learning-rate", "1.5"];
        assert!(Cli::try_parse_from(argv).is_err());
        assert_eq!(iris_args(&["-l", "0.7"]).learning_rate, Some(0.7));
    }

    #[test]
    fn config_rate_outside_unit_range_is_rejected() {
        let path = write_config(
            "ferrite_mlp_cli_bad_rate.json",
            r#"{ "layer_sizes": [4, 6, 3], "learning_rate": 5.0 }"#,
        );
        let result = iris_args(&["--config", path.to_str().unwrap()])
            .experiment(Experiment::iris(6, 0.3, 50));
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn flags_override_config_values() {
        let path = write_config(
            "ferrite_mlp_cli_override.json",
            r#"{ "layer_sizes": [4, 5, 3], "learning_rate": 5.0, "epochs": 3 }"#,
        );
        let experiment = iris_args(&["--config", path.to_str().unwrap(), "--learning-rate", "0.4", "--hidden", "8"])
            .experiment(Experiment::iris(6, 0.3, 50))
            .unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(experiment.spec.learning_rate, 0.4);
        assert_eq!(experiment.spec.layer_sizes, vec![4, 8, 3]);
        assert_eq!(experiment.spec.epochs, 3);
        assert_eq!(experiment.shuffle_seed, Some(0));
    }
}
