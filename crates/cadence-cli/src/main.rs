//! Cadence CLI Application
//!
//! Command-line interface for the Cadence content planner.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::Args;
use cadence_core::{CadenceError, Config, ControllerBuilder, OperationStatus};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let renderer = TerminalRenderer::new(!args.no_color);

    match run(args, renderer.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut status = OperationStatus::failure(format!("{error:#}"));
            if let Some(hint) = error
                .downcast_ref::<CadenceError>()
                .and_then(|e| e.remedy().hint())
            {
                status = status.with_hint(hint);
            }
            renderer.render_error(&status.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, renderer: TerminalRenderer) -> Result<()> {
    let Args {
        data_file,
        config,
        command,
        ..
    } = args;

    let config = Config::load(config.as_deref());

    let controller = ControllerBuilder::new()
        .with_config(config)
        .with_data_file(data_file)
        .build()
        .await
        .context("Failed to initialize controller")?;

    info!("Cadence started");

    Cli::new(controller, renderer).run(command).await
}
