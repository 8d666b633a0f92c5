use glycoseek::ScoringParameters;
use glycoseek::models::Dissociation;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::errors;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum InputConfig {
    #[serde(rename = "job")]
    Job { path: PathBuf },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub scoring: ScoringParameters,
}

fn default_chunk_size() -> usize {
    1000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            scoring: ScoringParameters::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "ndjson")]
    NdJson,
    #[serde(rename = "csv")]
    Csv,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::NdJson => "results.ndjson",
            OutputFormat::Csv => "results.csv",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Command line values take precedence over the config file.
    pub fn with_cli_args(mut self, args: Cli) -> Result<Self, errors::CliError> {
        if let Some(job_file) = args.job_file {
            self.input = Some(InputConfig::Job { path: job_file });
        }
        if self.input.is_none() {
            return Err(errors::CliError::Config {
                source: "No input provided, please provide one in either the config file or with the --job-file flag".to_string(),
            });
        }

        if let Some(output_dir) = args.output_dir {
            let format = self.output.as_ref().map(|x| x.format).unwrap_or_default();
            self.output = Some(OutputConfig {
                directory: output_dir,
                format,
            });
        }
        match self.output.as_mut() {
            Some(output) => {
                if args.csv {
                    output.format = OutputFormat::Csv;
                }
            }
            None => {
                return Err(errors::CliError::Config {
                    source: "No output directory provided, please provide one in either the config file or with the --output-dir flag".to_string(),
                });
            }
        }

        if let Some(dissociation) = args.dissociation {
            let parsed: Dissociation =
                serde_json::from_value(serde_json::Value::String(dissociation.to_lowercase()))
                    .map_err(|e| errors::CliError::Config {
                        source: format!("Invalid dissociation method {:?}: {}", dissociation, e),
                    })?;
            self.analysis.scoring.dissociation = parsed;
        }

        if self.analysis.chunk_size == 0 {
            return Err(errors::CliError::Config {
                source: "chunk_size must be larger than 0".to_string(),
            });
        }
        Ok(self)
    }
}
