mod cli;
mod config;
mod errors;
mod processing;

use clap::Parser;
use glycoseek::GlycopeptideScorer;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{
    Config,
    InputConfig,
};

#[cfg(target_os = "windows")]
use mimalloc::MiMalloc;

#[cfg(target_os = "windows")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> std::result::Result<(), errors::CliError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        ) // This uses RUST_LOG environment variable
        .init();

    let args = Cli::parse();

    let conf = match std::fs::File::open(args.config.clone()) {
        Ok(x) => x,
        Err(e) => {
            return Err(errors::CliError::Io {
                source: e.to_string(),
                path: Some(args.config.to_string_lossy().to_string()),
            });
        }
    };
    let config: Result<Config, _> = serde_json::from_reader(conf);
    let config = match config {
        Ok(x) => x,
        Err(e) => {
            return Err(errors::CliError::ParseError { msg: e.to_string() });
        }
    };
    let config = config.with_cli_args(args)?;
    info!("Parsed configuration: {:#?}", config);

    let Some(output_config) = config.output.clone() else {
        return Err(errors::CliError::Config {
            source: "No output directory specified".to_string(),
        });
    };
    if let Err(e) = std::fs::create_dir_all(&output_config.directory) {
        return Err(errors::CliError::Io {
            source: e.to_string(),
            path: Some(output_config.directory.to_string_lossy().to_string()),
        });
    }

    let scorer = GlycopeptideScorer::new(config.analysis.scoring.clone());
    match config.input {
        Some(InputConfig::Job { path }) => {
            processing::process_job(path, &scorer, config.analysis.chunk_size, &output_config)?;
        }
        None => {
            return Err(errors::CliError::Config {
                source: "No input specified".to_string(),
            });
        }
    }

    Ok(())
}
