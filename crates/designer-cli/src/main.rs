//! `ved`: command-line driver for the VE-Designer planning wizard.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use designer_core::{DesignerBuilder, SessionContext};
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        backend_url,
        token,
        user,
        locale,
        no_cache,
        no_color,
        command,
    } = Args::parse();

    let designer = DesignerBuilder::new()
        .with_database_path(database_file)
        .with_backend_url(backend_url)
        .with_cache(!no_cache)
        .build()
        .await
        .context("Failed to initialize designer")?;

    let mut ctx = SessionContext::new(user).with_locale(locale);
    if let Some(token) = token {
        ctx = ctx.with_access_token(token);
    }

    info!("VE-Designer started");
    let cli = Cli::new(designer, TerminalRenderer::new(!no_color), ctx);

    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Nav(args)) => cli.show_nav(args).await,
        Some(Commands::Step { command }) => cli.handle_step_command(command).await,
        None => cli.list_plans().await,
    }
}
