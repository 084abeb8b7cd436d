mod config;
mod glyphs;
mod ico;
mod render;
mod sink;

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use config::AppConfig;
use glyphs::SpriteSheet;
use render::IconCompositor;
use sink::{DisplaySink, FileSink};

#[derive(Parser)]
#[command(name = "battray", about = "Battery percentage tray icon renderer")]
struct Cli {
    /// Battery percentage to render (0-100). Omit with --watch.
    percent: Option<u32>,

    /// Output .ico path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Digit sprite sheet PNG (overrides the bundled sheet).
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Read percentages from stdin, one per line, re-rendering on change.
    #[arg(long)]
    watch: bool,

    /// Save --out and --sheet as defaults in the config file.
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("battray=debug".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::load();

    let sheet_path = cli.sheet.or(config.sheet_path);

    // A missing or undersized sheet is fatal before any render happens.
    let sheet = match &sheet_path {
        Some(path) => SpriteSheet::from_path(path)
            .with_context(|| format!("failed to load sprite sheet {}", path.display()))?,
        None => SpriteSheet::bundled().context("bundled sprite sheet is corrupt")?,
    };
    info!(
        "sprite sheet loaded: {}x{}, digit width {}",
        sheet.width(),
        sheet.height(),
        sheet.digit_width()
    );

    let out = cli
        .out
        .or(config.output_path)
        .unwrap_or_else(|| PathBuf::from("battray.ico"));

    if cli.save_config {
        AppConfig {
            sheet_path: sheet_path.clone(),
            output_path: Some(out.clone()),
            poll_interval_secs: config.poll_interval_secs,
        }
        .save()?;
    }

    let compositor = IconCompositor::new(sheet);
    let mut sink = FileSink::new(&out);

    if cli.watch {
        let interval = Duration::from_secs(config.poll_interval_secs);
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        sink::run(
            compositor,
            interval,
            move || loop {
                match lines.next()? {
                    Ok(line) => match line.trim().parse::<u32>() {
                        Ok(value) => break Some(value),
                        Err(_) => warn!("ignoring unparsable percentage: {:?}", line),
                    },
                    Err(e) => {
                        warn!("stdin read error: {}", e);
                        break None;
                    }
                }
            },
            &mut sink,
        )?;
    } else {
        let percent = cli
            .percent
            .context("PERCENT is required unless --watch is given")?;
        let canvas = compositor.render(percent);
        let icon = ico::encode(&canvas)?;
        sink.install(icon, &format!("{}%", percent))?;
        info!("icon written to {}", out.display());
    }

    Ok(())
}
