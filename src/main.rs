use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use termfolio::app::{App, AppConfig, ThemeChoice};

/// Animated portfolio page for the terminal.
#[derive(Parser, Debug)]
#[command(name = "termfolio", version, about)]
struct Cli {
    /// Color theme to start with.
    #[arg(long, value_parser = parse_theme, default_value = "dark")]
    theme: ThemeChoice,

    /// Disable the pointer grid/crosshair overlay.
    #[arg(long)]
    no_overlay: bool,

    /// Animation speed multiplier (2.0 runs everything twice as fast).
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Write log output to this file instead of stderr.
    ///
    /// Stderr logging is unreadable once the alternate screen is active, so
    /// anything beyond startup diagnostics wants a file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_theme(s: &str) -> Result<ThemeChoice, String> {
    match s {
        "dark" => Ok(ThemeChoice::Dark),
        "light" => Ok(ThemeChoice::Light),
        other => Err(format!("unknown theme '{other}' (expected dark or light)")),
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = AppConfig {
        theme: cli.theme,
        overlay: !cli.no_overlay,
        speed: cli.speed,
    };

    let mut app = App::new(config)?;
    let result = app.run();
    app.shutdown()?;
    result
}
