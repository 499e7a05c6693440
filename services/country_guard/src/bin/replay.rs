//! Replay a scripted attempt chain against a configured handler
//!
//! Usage:
//!   country-guard-replay --config config/country_guard.toml --handler contact \
//!       --script attempts.json
//!
//! The script names the inferred country and the declared country of each
//! attempt. Every Validate, and the Commit following each acceptance, is
//! printed to stdout as one JSON line; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use country_guard::{
    ActorLocks, AttemptContext, CommitReport, CountryMatchValidator, CountryName,
    InMemoryRetryStore, RetryStateKey, RetryStateStore, StaticGeolocator, Submission,
    ValidationOutcome,
};
use guard_config::GuardConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "country-guard-replay")]
#[command(about = "Replay country guard attempts against a handler configuration")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Environment overlay to apply (config/environments/<name>.toml)
    #[arg(short, long)]
    environment: Option<String>,

    /// Handler id to replay against
    #[arg(long)]
    handler: String,

    /// Attempt script (JSON)
    #[arg(short, long)]
    script: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Deserialize)]
struct Script {
    form_id: String,
    actor_id: String,
    inferred_country: CountryName,
    /// Record committed after each accepted attempt
    #[serde(default)]
    record: Submission,
    attempts: Vec<CountryName>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
enum Step<'a> {
    Validate {
        attempt: usize,
        declared: &'a CountryName,
        outcome: &'a ValidationOutcome,
    },
    Commit {
        attempt: usize,
        report: &'a CommitReport,
        record: &'a Submission,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = GuardConfig::load(Some(&args.config), args.environment.as_deref())
        .with_context(|| format!("Failed to load configuration {:?}", args.config))?;

    init_logging(
        args.log_level.as_deref().unwrap_or(&config.logging.level),
        args.json_logs || config.logging.json,
    )?;

    info!("Replaying {:?} against handler {}", args.script, args.handler);

    let handler = config.handler(&args.handler).map_err(|e| {
        error!("Failed to load handler {}: {:#}", args.handler, e);
        e
    })?;
    let validator = CountryMatchValidator::new(handler);

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {:?}", args.script))?;
    let script: Script = serde_json::from_str(&text).context("Failed to parse script")?;

    run(&validator, &args.handler, &script)
}

fn run(validator: &CountryMatchValidator, handler_id: &str, script: &Script) -> Result<()> {
    let store = InMemoryRetryStore::new();
    let locks = ActorLocks::new();
    let geolocator = StaticGeolocator::new(script.inferred_country.clone());
    let key = RetryStateKey::new(&script.form_id, handler_id, &script.actor_id);
    let ctx = AttemptContext::new(key.clone(), &geolocator, &store);

    for (index, declared) in script.attempts.iter().enumerate() {
        let attempt = index + 1;

        locks.with_lock(&key, || -> Result<()> {
            let outcome = validator.validate(&ctx, declared)?;
            emit(&Step::Validate {
                attempt,
                declared,
                outcome: &outcome,
            })?;

            if outcome.is_accepted() {
                let mut record = script.record.clone();
                let report = validator.commit(&ctx, &mut record, declared)?;
                emit(&Step::Commit {
                    attempt,
                    report: &report,
                    record: &record,
                })?;
            }
            Ok(())
        })?;
    }

    if let Some(state) = store.get(&key)? {
        info!(
            "Chain ended with open streak: {} rejected {} time(s)",
            state.previous_country, state.previous_failures
        );
    }
    locks.release(&key);
    Ok(())
}

fn emit(step: &Step<'_>) -> Result<()> {
    println!("{}", serde_json::to_string(step)?);
    Ok(())
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
