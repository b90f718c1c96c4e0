//! CLI entry point for droidpane.

mod app;
mod cli;

use std::io::IsTerminal;

use clap::Parser;
use droidpane::config::load_config;
use droidpane::render::{RenderSink, Renderer};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DROIDPANE_LOG";

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_logging(args.verbose);

    let color = !args.no_color && std::io::stderr().is_terminal();
    let renderer = Renderer::new(color);

    // `init` must work even when the existing config is broken.
    if let cli::Command::Init { force } = &args.command {
        if let Err(msg) = app::run_init(&renderer, *force) {
            renderer.error(&msg);
            std::process::exit(1);
        }
        return;
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(1);
        }
    };

    if let Err(msg) = app::run(&renderer, &config, args.command).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
