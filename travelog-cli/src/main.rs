mod cli;
mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use travelog_core::{Config, HttpApi, SessionStore, Travelog};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("travelog: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let store = SessionStore::new(&config);
    let api = HttpApi::new(&config, store.load_cookie())?;

    let mut app = Travelog::with_config(config, api);
    app.session.prefs = store.load_prefs();

    let renderer = Renderer::new(RenderOptions {
        use_color: cli.color.use_color(),
        dark_mode: app.session.prefs.dark_mode,
        storage_base_url: app.config.storage_base_url.clone(),
    });

    commands::dispatch(cli.command, &mut app, &store, &renderer).await
}
