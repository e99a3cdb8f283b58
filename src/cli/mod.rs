//! Command-line parsing for the scoring service and the model trainer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! scoring and fitting code. Flags left unset fall back to the environment
//! (see `app`), then to built-in defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::scoring::Jitter;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "altcredit", version, about = "Alternative-data credit scoring service and model trainer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP scoring service.
    Serve(ServeArgs),
    /// Score one JSON request from a file or stdin and print the JSON reply.
    Score(ScoreArgs),
    /// Fit the logistic model on the credit dataset and write the artifacts.
    Train(TrainArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Address to bind (env: ALTCREDIT_HOST, default 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (env: PORT, default 5000).
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Jitter mode: `on`, `off`, or a fixed number of points (env: ALTCREDIT_JITTER).
    #[arg(long)]
    pub jitter: Option<Jitter>,
}

#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// JSON request file; reads stdin when omitted.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Jitter mode: `on`, `off`, or a fixed number of points (env: ALTCREDIT_JITTER).
    #[arg(long, conflicts_with = "seed")]
    pub jitter: Option<Jitter>,

    /// Draw the jitter from a generator seeded with this value.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Parser, Clone)]
pub struct TrainArgs {
    /// Whitespace-delimited training data (21 columns, no header).
    #[arg(long, default_value = "credit_data.csv")]
    pub data: PathBuf,

    /// Where to write the fitted classifier.
    #[arg(long, default_value = "credit_model.json")]
    pub model_out: PathBuf,

    /// Where to write the fitted scaler.
    #[arg(long, default_value = "scaler.json")]
    pub scaler_out: PathBuf,

    /// Seed for the train/test shuffle.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Inverse L2 regularization strength.
    #[arg(long, default_value_t = 1.0)]
    pub c: f64,

    /// Maximum Newton iterations.
    #[arg(long, default_value_t = 100)]
    pub max_iter: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_defaults() {
        let cli = Cli::parse_from(["altcredit", "train"]);
        let Command::Train(args) = cli.command else {
            panic!("expected train");
        };
        assert_eq!(args.data, PathBuf::from("credit_data.csv"));
        assert_eq!(args.seed, 42);
        assert_eq!(args.test_fraction, 0.2);
    }

    #[test]
    fn serve_parses_jitter_modes() {
        let cli = Cli::parse_from(["altcredit", "serve", "--port", "8080", "--jitter", "off"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.jitter, Some(Jitter::Disabled));
    }

    #[test]
    fn score_rejects_seed_with_jitter() {
        assert!(Cli::try_parse_from(["altcredit", "score", "--seed", "1", "--jitter", "off"]).is_err());
        assert!(Cli::try_parse_from(["altcredit", "score", "--jitter", "bogus"]).is_err());
    }
}
