//! handpoint - scripted headless session for the hand-landmark interpreter.
//!
//! Replays synthetic hand poses over a grid of items and logs the resulting
//! hover, open and close events.

mod headless;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use handpoint::CloseGesture;

#[derive(Parser, Debug)]
#[command(name = "handpoint", about = "Hand-landmark pointing session (headless)")]
struct Cli {
    /// Viewport size as WxH
    #[arg(long, default_value = "1280x720")]
    resolution: String,

    /// Simulated camera frame rate
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Grid size as COLSxROWS
    #[arg(long, default_value = "4x3")]
    grid: String,

    /// Item index the script opens
    #[arg(long, default_value_t = 2)]
    item: u32,

    /// Close gesture: thumbs-up or thumbs-up-or-pinch
    #[arg(long, default_value = "thumbs-up")]
    close_gesture: String,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("handpoint {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handpoint=info".into()),
        )
        .init();

    info!("handpoint v{} starting", env!("CARGO_PKG_VERSION"));

    let (width, height) = headless::HeadlessConfig::parse_resolution(&cli.resolution)
        .with_context(|| format!("invalid resolution {:?}, expected WxH", cli.resolution))?;
    let (columns, rows) = headless::HeadlessConfig::parse_resolution(&cli.grid)
        .with_context(|| format!("invalid grid {:?}, expected COLSxROWS", cli.grid))?;

    let close_gesture = match cli.close_gesture.as_str() {
        "thumbs-up" => CloseGesture::ThumbsUp,
        "thumbs-up-or-pinch" => CloseGesture::ThumbsUpOrPinch,
        other => bail!("unknown close gesture: {other}. Use: thumbs-up or thumbs-up-or-pinch"),
    };

    let config = headless::HeadlessConfig {
        width,
        height,
        fps: cli.fps,
        columns,
        rows,
        item: cli.item,
        close_gesture,
    };

    let summary = headless::run(&config)?;
    info!(
        "{} ticks, {} opens, {} closes, {} hover changes, {} diagnostics, final mode {}",
        summary.ticks,
        summary.opens.len(),
        summary.closes,
        summary.hover_changes,
        summary.diagnostics,
        summary.final_mode.map_or("none", |m| m.as_str())
    );
    Ok(())
}
