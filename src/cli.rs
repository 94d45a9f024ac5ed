//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::config::BoardConfig;

/// Output format for conversion reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML format (default)
    #[default]
    Yaml,
    /// JSON format
    Json,
}

/// Terminal board of draggable color swatches with an HSL mixer.
///
/// Without a color argument the interactive board is launched.
#[derive(Parser, Debug)]
#[command(name = "swatchboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Convert an HSL triple, e.g. "210,80,40", and print it
    #[arg(long, value_name = "H,S,L", conflicts_with = "rgb")]
    pub hsl: Option<String>,

    /// Convert an rgb()/rgba() string, e.g. "rgb(12, 34, 56)", and print it
    #[arg(long, value_name = "RGB")]
    pub rgb: Option<String>,

    /// Report format for --hsl and --rgb
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to TOML file and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Random swatches to place when the config seeds none
    #[arg(long, value_name = "N")]
    pub swatches: Option<usize>,

    /// Seed for swatch colors and positions (random if not given)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Swatch diameter in columns
    #[arg(long, value_name = "SIZE")]
    pub swatch_size: Option<f64>,

    /// Log file path (default: swatchboard.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Whether a one-shot conversion was requested instead of the board.
    pub fn is_conversion(&self) -> bool {
        self.hsl.is_some() || self.rgb.is_some()
    }

    /// Apply flags that were given on the command line over `config`.
    pub fn apply_overrides(&self, config: &mut BoardConfig) {
        if let Some(count) = self.swatches {
            config.stage.initial_swatches = count;
        }
        if let Some(size) = self.swatch_size {
            config.stage.swatch_size = size;
        }
    }
}
