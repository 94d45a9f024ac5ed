//! CLI entry point for swatchboard.

use std::io::stdout;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;

use swatchboard::cli::Cli;
use swatchboard::config::BoardConfig;
use swatchboard::convert::{ColorReport, parse_hsl_triple};
use swatchboard::logging::init_logging;
use swatchboard::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut stdout());
        return Ok(());
    }

    if cli.is_conversion() {
        let report = match (&cli.hsl, &cli.rgb) {
            (Some(hsl), _) => ColorReport::from_hsl(parse_hsl_triple(hsl)?),
            (None, Some(rgb)) => ColorReport::from_rgb_text(rgb)?,
            (None, None) => return Err(eyre!("No color given")),
        };
        print!("{}", report.render(cli.format)?);
        return Ok(());
    }

    let mut config = BoardConfig::load(cli.config.as_deref()).wrap_err_with(|| match &cli.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config".to_string(),
    })?;
    cli.apply_overrides(&mut config);
    config.validate().wrap_err("Invalid command line override")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote config to {}", path.display());
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), Some(&cli.log_level));
    info!(
        swatch_size = config.stage.swatch_size,
        seeds = config.swatches.len(),
        "Starting swatchboard"
    );

    tui::run(&config, cli.seed)
}
