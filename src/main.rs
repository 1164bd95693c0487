use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use fractal_raster::cli::{default_output_path, Cli, Command};
use fractal_raster::config::RenderConfig;
use fractal_raster::core::CancelToken;
use fractal_raster::persist::{ImageSink, PngWriter};
use fractal_raster::render::{render_mandelbrot, render_snowflake, RenderOutcome};

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

/// Cancel `token` after `secs` seconds from a detached thread
fn arm_timeout(token: &CancelToken, secs: u64) {
    let token = token.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(secs));
        warn!("Render timeout of {}s reached, cancelling", secs);
        token.cancel();
    });
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let cancel = CancelToken::new();
    if let Some(secs) = cli.timeout_secs {
        arm_timeout(&cancel, secs);
    }

    let rendered = match &cli.command {
        Command::Snowflake(args) => {
            args.apply(&mut config.snowflake);
            render_snowflake(&config.snowflake, &cancel)
        }
        Command::Mandelbrot(args) => {
            args.apply(&mut config.mandelbrot);
            render_mandelbrot(&config.mandelbrot, &cancel)
        }
    };

    if rendered.summary.outcome == RenderOutcome::Cancelled {
        warn!("Render cancelled; saving the part drawn so far");
    }
    if cli.summary {
        let json = serde_json::to_string_pretty(&rendered.summary).context("serializing summary")?;
        println!("{}", json);
    }

    let path: PathBuf = match cli.command.output() {
        Some(path) => path.clone(),
        None => default_output_path(cli.command.kind(), chrono::Utc::now()),
    };

    // The render stands even if saving fails; report and exit non-zero.
    match PngWriter.persist(&rendered.canvas, &path) {
        Ok(()) => {
            info!("Done");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
