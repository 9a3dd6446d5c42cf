//! Astro CLI - AstroBits docs engine.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server
//! - `build`: Render every page to a static site
//! - `scaffold`: Generate placeholder pages
//! - `install`: Install UI components and their dependencies
//! - `health`: Check collaborator credentials and local tooling
//! - `env init`: Write a placeholder `.env.local`

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    BuildArgs, Completion, EnvCommand, HealthArgs, InstallArgs, ScaffoldArgs, ServeArgs,
};
use output::Output;

/// Astro - AstroBits documentation engine.
#[derive(Parser)]
#[command(name = "astro", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server.
    Serve(ServeArgs),
    /// Build a static documentation site.
    Build(BuildArgs),
    /// Generate placeholder documentation pages.
    Scaffold(ScaffoldArgs),
    /// Install UI components and their dependencies.
    Install(InstallArgs),
    /// Check credentials and local tooling.
    Health(HealthArgs),
    /// Environment file commands.
    #[command(subcommand)]
    Env(EnvCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(err) => Err(err.into()),
        },
        Commands::Build(args) => args.execute(),
        Commands::Scaffold(args) => args.execute(),
        Commands::Install(args) => args.execute(),
        Commands::Health(args) => args.execute(),
        Commands::Env(cmd) => cmd.execute(),
    };

    match result {
        Ok(completion) => completion.exit_code(),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
