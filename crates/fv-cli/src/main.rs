//! FieldView batch renderer.
//!
//! Loads a JSON session (field, planes, clicks), writes one PPM per plotted
//! plane plus a legend strip for z-parallel planes, and prints what lies
//! under each click.

use std::path::PathBuf;

use clap::Parser;
use fv_cli::{run, Session};
use fv_color::{Palette, Scale};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fieldview")]
#[command(about = "Render cutting planes through a 3D vector field")]
struct Cli {
    /// Path to a session JSON file
    session: PathBuf,

    /// Directory for the rendered images
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Palette number (1 cool-warm, 2 rainbow, anything else grayscale)
    #[arg(long)]
    color_cycle: Option<i32>,

    /// Use the logarithmic value scale
    #[arg(long)]
    log: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!("Loading session from: {}", cli.session.display());
    let mut session = match Session::load(&cli.session) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load session: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(cycle) = cli.color_cycle {
        session.settings.palette = Palette::from_cycle(cycle);
    }
    if cli.log {
        session.settings.scale = Scale::Log;
    }

    let report = match run(&session, &cli.out_dir) {
        Ok(r) => r,
        Err(e) => {
            error!("Run failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("Failed to encode report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    info!(
        "{} image(s) written, {} plane(s) skipped",
        report.written.len(),
        report.failed_planes.len()
    );
    for click in &report.clicks {
        match (&click.result, &click.error) {
            (Some(result), _) => println!("({}, {}) {}", click.x, click.y, result),
            (None, Some(e)) => println!("({}, {}) error: {}", click.x, click.y, e),
            (None, None) => {}
        }
    }
}
