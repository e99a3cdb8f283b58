//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging and loads `.env`
//! - parses CLI arguments
//! - resolves configuration (flags, then environment, then defaults)
//! - dispatches to the service, one-shot scoring, or the trainer

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::{Command, ScoreArgs, ServeArgs, TrainArgs};
use crate::domain::{ServeConfig, TrainConfig};
use crate::error::AppError;
use crate::scoring::{HeuristicScorer, Jitter, sample_jitter};
use crate::server::Reply;

pub mod pipeline;

pub const ENV_HOST: &str = "ALTCREDIT_HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_JITTER: &str = "ALTCREDIT_JITTER";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Entry point for the `altcredit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    crate::logging::init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Score(args) => handle_score(args),
        Command::Train(args) => handle_train(args),
    }
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let config = serve_config_from_args(&args, |key| std::env::var(key).ok())?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::io(format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(crate::server::serve(config))
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let jitter = score_jitter(args.seed, args.jitter, std::env::var(ENV_JITTER).ok())?;
    let body = read_request(args.input.as_ref())?;

    let reply = crate::server::evaluate_request(&HeuristicScorer::new(jitter), &body);
    println!("{}", reply.body);
    reply_to_result(&reply)
}

/// `--seed` pins one draw from a seeded generator; otherwise flag, then env, then default.
fn score_jitter(
    seed: Option<u64>,
    flag: Option<Jitter>,
    env_value: Option<String>,
) -> Result<Jitter, AppError> {
    match seed {
        Some(seed) => Ok(Jitter::Fixed(sample_jitter(&mut StdRng::seed_from_u64(seed)))),
        None => resolve_jitter(flag, env_value),
    }
}

/// Client errors exit 2 (usage), scoring failures exit 4 (numeric).
fn reply_to_result(reply: &Reply) -> Result<(), AppError> {
    if reply.status.is_success() {
        return Ok(());
    }
    let message = reply.body["error"].as_str().unwrap_or("scoring failed");
    if reply.status.is_client_error() {
        Err(AppError::usage(message))
    } else {
        Err(AppError::numeric(message))
    }
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let config = train_config_from_args(&args)?;
    let run = pipeline::run_training(&config)?;
    println!("{}", crate::report::format_training_summary(&run, &config));
    Ok(())
}

fn read_request(path: Option<&PathBuf>) -> Result<Vec<u8>, AppError> {
    match path {
        Some(path) => std::fs::read(path)
            .map_err(|e| AppError::usage(format!("Failed to read request '{}': {e}", path.display()))),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| AppError::usage(format!("Failed to read request from stdin: {e}")))?;
            Ok(buf)
        }
    }
}

/// Resolve service settings: flag, then environment (via `env`), then default.
pub fn serve_config_from_args(
    args: &ServeArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ServeConfig, AppError> {
    let host = args
        .host
        .clone()
        .or_else(|| env(ENV_HOST))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match (args.port, env(ENV_PORT)) {
        (Some(port), _) => port,
        (None, Some(raw)) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| AppError::usage(format!("Invalid {ENV_PORT} value '{raw}'.")))?,
        (None, None) => DEFAULT_PORT,
    };

    let jitter = resolve_jitter(args.jitter, env(ENV_JITTER))?;

    Ok(ServeConfig { host, port, jitter })
}

fn resolve_jitter(flag: Option<Jitter>, env_value: Option<String>) -> Result<Jitter, AppError> {
    match (flag, env_value) {
        (Some(jitter), _) => Ok(jitter),
        (None, Some(raw)) => raw
            .parse::<Jitter>()
            .map_err(|e| AppError::usage(format!("Invalid {ENV_JITTER}: {e}"))),
        (None, None) => Ok(Jitter::default()),
    }
}

pub fn train_config_from_args(args: &TrainArgs) -> Result<TrainConfig, AppError> {
    if !(args.test_fraction.is_finite() && args.test_fraction > 0.0 && args.test_fraction < 1.0) {
        return Err(AppError::usage(format!(
            "--test-fraction must be in (0, 1), got {}.",
            args.test_fraction
        )));
    }
    if args.max_iter == 0 {
        return Err(AppError::usage("--max-iter must be > 0."));
    }

    Ok(TrainConfig {
        data_path: args.data.clone(),
        model_path: args.model_out.clone(),
        scaler_path: args.scaler_out.clone(),
        seed: args.seed,
        test_fraction: args.test_fraction,
        c: args.c,
        max_iter: args.max_iter,
        ..TrainConfig::default()
    })
}
