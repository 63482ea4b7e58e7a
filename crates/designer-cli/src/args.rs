use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{NavArgs, PlanCommands, StepCommands};

/// Command-line driver for the VE-Designer planning wizard
///
/// Plans a virtual exchange step by step: every step page seeds a form from
/// the plan, validates your edits and saves them together with the step's
/// progress before moving on. Works against a local SQLite file or a
/// VE-Collab backend.
#[derive(Parser)]
#[command(version, about, name = "ved")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/ve-designer/designer.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Base URL of a VE-Collab backend; takes precedence over the database
    #[arg(long, global = true, env = "VE_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, global = true, env = "VE_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// User id to act as
    #[arg(long, global = true, env = "VE_USER", default_value = "local")]
    pub user: String,

    /// Locale sent to the backend
    #[arg(long, global = true, default_value = designer_core::session::DEFAULT_LOCALE)]
    pub locale: String,

    /// Do not cache loaded plans
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show the side progress navigation of a plan
    #[command(alias = "n")]
    Nav(NavArgs),
    /// Open and submit wizard steps
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
}
