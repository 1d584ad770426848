//
//  argocd-rs
//  cli/connect.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resolves which server and credentials a command talks to.
//!
//! Priority: flags and environment first, then the config context. The
//! context is the one named by `--context`, else the one stored for
//! `--server`, else the current context when no `--server` was given.

use std::time::Duration;

use anyhow::{bail, Context as _, Result};

use crate::api::options::{self, ClientOption};
use crate::api::Client;
use crate::config::{context_name_for, Config};
use crate::USER_AGENT;

use super::GlobalOptions;

/// Fully resolved connection settings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Connection {
    /// Config context the settings came from, if any.
    pub context: Option<String>,
    pub server: String,
    pub username: String,
    pub password: String,
    pub auth_token: String,
    pub strict_tls: bool,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("context", &self.context)
            .field("server", &self.server)
            .field("username", &self.username)
            .field("has_token", &!self.auth_token.is_empty())
            .field("strict_tls", &self.strict_tls)
            .finish_non_exhaustive()
    }
}

/// Merges the global flags with the config file.
pub fn resolve_connection(config: &Config, global: &GlobalOptions) -> Result<Connection> {
    let context_name = match (&global.context, &global.server) {
        (Some(name), _) => {
            if config.context(name).is_none() {
                bail!("Context '{}' does not exist. Run 'argocd-rs context list'.", name);
            }
            Some(name.clone())
        }
        (None, Some(server)) => {
            let name = context_name_for(server);
            config.context(&name).map(|_| name)
        }
        (None, None) => config.current().map(|(name, _)| name.to_string()),
    };
    let ctx = context_name.as_deref().and_then(|name| config.context(name));

    let server = global
        .server
        .clone()
        .or_else(|| ctx.map(|c| c.server.clone()))
        .filter(|s| !s.trim().is_empty());
    let Some(server) = server else {
        bail!("No Argo CD server configured. Pass --server or run 'argocd-rs login <SERVER>'.");
    };

    Ok(Connection {
        context: context_name,
        server,
        username: global
            .username
            .clone()
            .or_else(|| ctx.and_then(|c| c.username.clone()))
            .unwrap_or_default(),
        password: global.password.clone().unwrap_or_default(),
        auth_token: global
            .auth_token
            .clone()
            .or_else(|| ctx.and_then(|c| c.auth_token.clone()))
            .unwrap_or_default(),
        strict_tls: global.strict_tls || ctx.is_some_and(|c| c.strict_tls),
    })
}

impl Connection {
    /// Client options implied by the connection and the global flags.
    pub fn client_options(&self, global: &GlobalOptions) -> Vec<ClientOption> {
        let mut opts = vec![options::user_agent(USER_AGENT)];
        if self.strict_tls {
            opts.push(options::strict_tls());
        }
        if global.lenient {
            opts.push(options::lenient_status());
        }
        if let Some(secs) = global.timeout {
            opts.push(options::timeout(Duration::from_secs(secs)));
        }
        opts
    }

    /// Builds an uninitialised client.
    pub fn client(&self, global: &GlobalOptions) -> Result<Client> {
        Client::new(
            &self.server,
            &self.username,
            &self.password,
            &self.auth_token,
            self.client_options(global),
        )
        .with_context(|| format!("Invalid server '{}'", self.server))
    }
}

/// Builds an authenticated client for the current command.
pub async fn connect(global: &GlobalOptions) -> Result<Client> {
    let config = global.load_config()?;
    let connection = resolve_connection(&config, global)?;
    tracing::debug!(?connection, "resolved connection");

    if connection.auth_token.is_empty() && connection.password.is_empty() {
        bail!(
            "Not logged in to {}. Run 'argocd-rs login' or pass --auth-token.",
            connection.server
        );
    }

    let client = connection.client(global)?;
    client
        .init()
        .await
        .with_context(|| format!("Failed to log in to {}", connection.server))?;
    Ok(client)
}
