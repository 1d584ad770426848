//
//  argocd-rs
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use argocd_rs::cli::{Cli, Commands};
use argocd_rs::exit_codes;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

/// Logs go to stderr, filtered by `ARGOCD_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("ARGOCD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login(cmd) => cmd.run(&cli.global).await,
        Commands::Logout(cmd) => cmd.run(&cli.global).await,
        Commands::Account(cmd) => cmd.run(&cli.global).await,
        Commands::App(cmd) => cmd.run(&cli.global).await,
        Commands::Cluster(cmd) => cmd.run(&cli.global).await,
        Commands::Proj(cmd) => cmd.run(&cli.global).await,
        Commands::Repo(cmd) => cmd.run(&cli.global).await,
        Commands::Repocreds(cmd) => cmd.run(&cli.global).await,
        Commands::Context(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("argocd-rs version {}", argocd_rs::VERSION);
            Ok(())
        }
    }
}
