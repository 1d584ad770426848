//
//  argocd-rs
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command-Line Interface
//!
//! The `argocd-rs` binary: a thin clap front end over the library client.
//!
//! ## Command Structure
//!
//! ```text
//! argocd-rs
//! ├── login [SERVER]           Log in and store the session token
//! ├── logout                   Drop the stored token
//! ├── account (list|get|can-i|user-info)
//! ├── app (list|get|delete|sync|manifests)
//! ├── cluster (list|get)
//! ├── proj (list|get)
//! ├── repo (list|get)
//! ├── repocreds list
//! ├── context (list|use)
//! └── version
//! ```
//!
//! ## Connection Settings
//!
//! Every command resolves its server and credentials from the global flags
//! first, then from the selected config context:
//!
//! | Flag | Environment | Context field |
//! |------|-------------|---------------|
//! | `--server` | `ARGOCD_SERVER` | `server` |
//! | `--username` | `ARGOCD_USERNAME` | `username` |
//! | `--password` | `ARGOCD_PASSWORD` | |
//! | `--auth-token` | `ARGOCD_AUTH_TOKEN` | `auth_token` |
//! | `--strict-tls` | | `strict_tls` |

mod account;
mod app;
mod cluster;
mod connect;
mod context;
mod login;
mod project;
mod repo;
mod repocreds;

pub use account::AccountCommand;
pub use app::AppCommand;
pub use cluster::ClusterCommand;
pub use connect::{connect, resolve_connection, Connection};
pub use context::ContextCommand;
pub use login::{LoginArgs, LogoutArgs};
pub use project::ProjectCommand;
pub use repo::RepoCommand;
pub use repocreds::RepoCredsCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

#[derive(Parser, Debug)]
#[command(
    name = "argocd-rs",
    version,
    about = "Work with Argo CD from the command line",
    long_about = "argocd-rs is a client for the Argo CD REST API.\n\n\
                  It lists and inspects applications, clusters, projects and repositories, \
                  and drives syncs from your terminal.",
    propagate_version = true,
    after_help = "Use 'argocd-rs <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Flags accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Argo CD server URL
    #[arg(long, global = true, env = "ARGOCD_SERVER")]
    pub server: Option<String>,

    /// Account to log in as
    #[arg(long, global = true, env = "ARGOCD_USERNAME")]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, global = true, env = "ARGOCD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Session or API token; skips the login
    #[arg(long, global = true, env = "ARGOCD_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Config context to use instead of the current one
    #[arg(long, global = true, env = "ARGOCD_CONTEXT")]
    pub context: Option<String>,

    /// Validate the server certificate over https
    #[arg(long, global = true)]
    pub strict_tls: bool,

    /// Treat non-200 responses as empty results instead of errors
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Config file path
    #[arg(long, global = true, env = "ARGOCD_RS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the config file named by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        match &self.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.output)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to an Argo CD server
    Login(LoginArgs),

    /// Log out of the current context
    Logout(LogoutArgs),

    /// Manage accounts
    Account(AccountCommand),

    /// Manage applications
    #[command(visible_alias = "application")]
    App(AppCommand),

    /// Manage clusters
    Cluster(ClusterCommand),

    /// Manage projects
    #[command(visible_alias = "project")]
    Proj(ProjectCommand),

    /// Manage repositories
    Repo(RepoCommand),

    /// Manage repository credential templates
    Repocreds(RepoCredsCommand),

    /// Switch between stored contexts
    #[command(visible_alias = "ctx")]
    Context(ContextCommand),

    /// Print the version
    Version,
}
