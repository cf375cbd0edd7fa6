// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use archetype_cli::commands;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archetype")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Archetype-based webpack builds and dev server", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Verbose mode: show all webpack output and served requests
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: only show errors (useful for CI)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved webpack configuration
    Config {
        /// Print a webpack.config.js module instead of JSON
        #[arg(long)]
        module: bool,
    },
    /// Build the project once
    Build,
    /// Start development server with hot reload
    Dev {
        /// Port to run the dev server on (default from archetype.toml)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to (default from archetype.toml)
        #[arg(long)]
        host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match cli.command {
        Commands::Config { module } => commands::config::run(module).await,
        Commands::Build => commands::build::run(cli.verbose).await,
        Commands::Dev { port, host } => {
            commands::dev::run(host, port, cli.verbose, cli.quiet).await
        }
    }
}
