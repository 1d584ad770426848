//
//  argocd-rs
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Argo CD Client Library
//!
//! A typed client for the Argo CD REST API, plus the `argocd-rs` command-line
//! tool built on it.
//!
//! ## Overview
//!
//! One [`Client`] owns the server address, credentials, session token and TLS
//! policy. Resource services borrow it to issue requests under
//! `<server>/api/v1/`. The token is obtained lazily: [`Client::init`] logs in
//! with the username and password the first time it is needed and stores the
//! token exactly once.
//!
//! ## Module Structure
//!
//! - [`api`]: The client, request pipeline and resource services
//! - [`auth`]: The login seam and JWT claim inspection
//! - [`config`]: The CLI's TOML config file of stored contexts
//! - [`output`]: Table, JSON and YAML rendering for the CLI
//! - [`cli`]: The clap command tree
//! - [`interactive`]: Terminal prompts
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use argocd_rs::{options, Client};
//! use argocd_rs::api::v1::applications::ApplicationQuery;
//!
//! # async fn run() -> Result<(), argocd_rs::ArgoError> {
//! let client = Client::new(
//!     "https://argocd.example.com",
//!     "admin",
//!     "secret",
//!     "",
//!     [options::user_agent("deploy-bot/1.0")],
//! )?;
//! client.init().await?;
//!
//! for app in client.applications().list(&ApplicationQuery::default()).await? {
//!     println!("{} {}", app.metadata.name, app.status.sync.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Library calls return [`ArgoError`]. Non-200 responses are errors by
//! default; [`options::lenient_status`] turns them into empty results.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod interactive;
pub mod output;

pub use api::options;
pub use api::{ArgoError, AuthToken, Client, HttpMethod};
pub use cli::Cli;
pub use config::Config;

/// Application version, from Cargo.toml.
///
/// ```rust
/// use argocd_rs::VERSION;
///
/// println!("argocd-rs version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` the CLI sends.
pub const USER_AGENT: &str = concat!("argocd-rs/", env!("CARGO_PKG_VERSION"));

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1`: General errors (`2` is used by clap for usage errors)
/// - `4`: Authentication issues
/// - `8`: Missing resources
/// - `32`: Server or network unavailable
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;

    pub const ERROR: i32 = 1;

    /// Not logged in, or the token was rejected.
    pub const AUTH_ERROR: i32 = 4;

    /// The named resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The server could not be reached or failed.
    pub const UNAVAILABLE: i32 = 32;

    /// Picks an exit code for a failed command.
    ///
    /// Looks for an [`ArgoError`](crate::ArgoError) anywhere in the error chain.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        use crate::ArgoError;

        let argo = err.chain().find_map(|e| e.downcast_ref::<ArgoError>());
        match argo {
            Some(ArgoError::EmptyToken) => AUTH_ERROR,
            // gRPC code 16 is Unauthenticated, 7 is PermissionDenied.
            Some(ArgoError::Api { status: 401 | 403, .. })
            | Some(ArgoError::Api { code: Some(7 | 16), .. }) => AUTH_ERROR,
            Some(ArgoError::Api { status: 404, .. }) | Some(ArgoError::Api { code: Some(5), .. }) => {
                NOT_FOUND
            }
            Some(ArgoError::Transport(_)) | Some(ArgoError::Api { status: 500..=599, .. }) => UNAVAILABLE,
            _ => ERROR,
        }
    }

}
