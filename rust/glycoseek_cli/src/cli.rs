use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Path to the scoring job file (will over-write the config file)
    #[arg(short, long)]
    pub job_file: Option<PathBuf>,

    /// Path to the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Dissociation method of the spectra, one of hcd, exd or ethcd
    /// (will over-write the config file)
    #[arg(short, long)]
    pub dissociation: Option<String>,

    /// Write csv instead of ndjson
    #[arg(long)]
    pub csv: bool,
}
