mod error_mapping;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fairweather_core::{AppError, Config};
use fairweather_scoring::{
    classify_message, Activity, ActivityTags, Evaluator, FixedUvIndex, HttpUvLookup,
    RankingOptions, UvLookup, WeatherObservation,
};

use crate::error_mapping::{config_load_error, IntoAppError};

/// Weather suitability scores for activities
#[derive(Debug, Parser)]
#[command(name = "fairweather", version, about)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one activity against a current-weather JSON file
    Evaluate {
        #[arg(long)]
        observation: PathBuf,
        /// Comma-separated sensitivity tags, e.g. rain-prohibited,wind-moderate
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Use this UV index instead of looking it up
        #[arg(long)]
        uv: Option<f64>,
    },
    /// Rank a JSON list of activities for the given weather
    Rank {
        #[arg(long)]
        observation: PathBuf,
        #[arg(long)]
        activities: PathBuf,
        #[arg(long)]
        uv: Option<f64>,
    },
    /// Print the recommendation message for a score
    Classify { score: u8 },
}

fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    let (config, _) = Config::load_validated(path).map_err(config_load_error)?;
    Ok(config)
}

fn uv_source(uv: Option<f64>, config: Option<&Config>) -> Result<Arc<dyn UvLookup>, AppError> {
    if let Some(index) = uv {
        return Ok(Arc::new(FixedUvIndex(index)));
    }

    let uv_config = config.map(|c| c.uv.clone()).unwrap_or_default();
    let lookup = HttpUvLookup::with_timeout(
        &uv_config.base_url,
        uv_config.resolved_api_key(),
        Duration::from_secs(uv_config.timeout_secs),
    )
    .map_err(IntoAppError::into_app_error)?;

    Ok(Arc::new(lookup))
}

fn read_observation(path: &Path) -> Result<WeatherObservation, AppError> {
    let raw = std::fs::read_to_string(path)?;
    WeatherObservation::from_json(&raw).map_err(IntoAppError::into_app_error)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Classify { score } => {
            println!("{}", classify_message(score));
        }
        Command::Evaluate {
            observation,
            tags,
            uv,
        } => {
            let observation = read_observation(&observation)?;
            let tags: ActivityTags = tags.iter().map(|t| t.trim()).collect();

            let config = match uv {
                Some(_) => None,
                None => Some(load_config(cli.config.as_deref())?),
            };
            let evaluator = Evaluator::new(uv_source(uv, config.as_ref())?);

            let result = evaluator.evaluate(&observation, &tags).await;
            print_json(&result)?;
        }
        Command::Rank {
            observation,
            activities,
            uv,
        } => {
            let observation = read_observation(&observation)?;
            let raw = std::fs::read_to_string(&activities)?;
            let activities: Vec<Activity> = serde_json::from_str(&raw).with_context(|| {
                format!("Failed to parse activities file {}", activities.display())
            })?;

            let config = load_config(cli.config.as_deref())?;
            let options = RankingOptions {
                min_score: config.ranking.min_score,
                limit: config.ranking.limit,
            };
            let evaluator = Evaluator::new(uv_source(uv, Some(&config))?);

            let ranked = evaluator.rank(&observation, &activities, options).await;
            print_json(&ranked)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = fairweather_core::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
