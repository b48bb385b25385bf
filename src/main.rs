//! widgrid - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use widgrid::config::ConfigError;
use widgrid::model::AppError;
use widgrid::source::SourceOptions;
use widgrid::view::{ColorConfig, GridStyles};

/// widgrid - windowed grid of live widgets in the terminal
#[derive(Parser, Debug)]
#[command(name = "widgrid")]
#[command(version)]
#[command(about = "Scrollable grid of live-updating widgets that only renders what is on screen")]
pub struct Args {
    /// JSON array of widgets (generated when omitted)
    #[arg(short, long)]
    pub widgets: Option<PathBuf>,

    /// JSON-lines update stream, `-` for stdin (simulated when omitted)
    #[arg(short, long)]
    pub updates: Option<PathBuf>,

    /// Number of widgets to generate when no widgets file is given
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(0..=1_000_000))]
    pub count: Option<u64>,

    /// Simulator tick interval in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub update_interval_ms: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = widgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = widgrid::config::merge_config(config_file);
        let with_env = widgrid::config::apply_env_overrides(merged)?;
        let count = args.count.map(|n| n as usize);
        widgrid::config::apply_cli_overrides(with_env, count, args.update_interval_ms)
    };

    widgrid::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let geometry = config.geometry().map_err(ConfigError::from)?;
    let options = SourceOptions {
        widgets: args.widgets.clone(),
        updates: args.updates.clone(),
        count: config.widget_count,
        update_interval: config.update_interval(),
    };
    let source = widgrid::source::open_source(&options, Instant::now())?;

    let styles = GridStyles::new(ColorConfig::from_env_and_args(args.no_color));
    widgrid::view::run_with_source(source, geometry, config.settle_delay(), styles)?;

    Ok(())
}
