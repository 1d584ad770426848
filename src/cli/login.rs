//
//  argocd-rs
//  cli/login.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `login` and `logout`.
//!
//! `login` exchanges a username and password for a session token (or takes
//! a token from stdin) and stores it in a config context named after the
//! server. `logout` asks the server to end the session and forgets the token.

use anyhow::{bail, Context as _, Result};
use clap::Args;

use crate::auth::token::read_token_from_stdin;
use crate::auth::{decode_claims, validate_token};
use crate::config::{context_name_for, ContextConfig};
use crate::interactive::{can_prompt, prompt_input_with_default, prompt_password};
use crate::output::format_time;

use super::{connect, resolve_connection, GlobalOptions};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Server URL; defaults to --server or the current context
    pub server: Option<String>,

    /// Context name to store the login under
    #[arg(long)]
    pub name: Option<String>,

    /// Read a session or API token from stdin instead of logging in
    #[arg(long)]
    pub auth_token_stdin: bool,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Context to log out of; defaults to the current context
    pub context: Option<String>,
}

impl LoginArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer();
        let mut config = global.load_config()?;

        let mut global = global.clone();
        if self.server.is_some() {
            global.server = self.server.clone();
        }
        let mut connection = resolve_connection(&config, &global)?;
        // A fresh login never reuses a stored token.
        connection.auth_token.clear();

        let token = if self.auth_token_stdin {
            let token = read_token_from_stdin()?;
            if !validate_token(&token) {
                bail!("Invalid token read from stdin");
            }
            token
        } else {
            if connection.username.is_empty() {
                connection.username = if can_prompt() {
                    prompt_input_with_default("Username", "admin")?
                } else {
                    bail!("No username given. Pass --username or set ARGOCD_USERNAME.");
                };
            }
            if connection.password.is_empty() {
                connection.password = if can_prompt() {
                    prompt_password(&format!("Password for {}", connection.username))?
                } else {
                    bail!("No password given. Pass --password or set ARGOCD_PASSWORD.");
                };
            }

            let client = connection.client(&global)?;
            client
                .init()
                .await
                .with_context(|| format!("Failed to log in to {}", connection.server))?;
            client.token().unwrap_or_default().to_string()
        };

        let claims = decode_claims(&token).ok();
        let username = claims
            .as_ref()
            .map(|c| c.username().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| connection.username.clone());

        let name = self
            .name
            .clone()
            .or(connection.context.clone())
            .unwrap_or_else(|| context_name_for(&connection.server));
        config.upsert_context(
            name.clone(),
            ContextConfig {
                server: connection.server.clone(),
                username: Some(username.clone()).filter(|u| !u.is_empty()),
                auth_token: Some(token),
                strict_tls: connection.strict_tls,
            },
        );
        config.use_context(&name)?;
        global.save_config(&config)?;
        tracing::debug!(context = %name, "stored session token");

        writer.write_success(&format!(
            "Logged in to {} as '{}' (context '{}')",
            connection.server, username, name
        ));
        if let Some(expires) = claims.and_then(|c| c.expires_at()) {
            writer.write_success(&format!("Session expires {}", format_time(Some(expires))));
        }
        Ok(())
    }
}

impl LogoutArgs {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer();
        let mut config = global.load_config()?;

        let name = self
            .context
            .clone()
            .or_else(|| global.context.clone())
            .or_else(|| config.current_context.clone());
        let Some(name) = name else {
            bail!("No context selected. Run 'argocd-rs context list'.");
        };
        let Some(ctx) = config.context(&name) else {
            bail!("Context '{}' does not exist", name);
        };
        if ctx.auth_token.is_none() {
            writer.write_success(&format!("Not logged in to '{}'", name));
            return Ok(());
        }

        let mut session_global = global.clone();
        session_global.context = Some(name.clone());
        session_global.server = None;
        match connect(&session_global).await {
            Ok(client) => {
                if let Err(e) = client.sessions().delete().await {
                    writer.write_warning(&format!("Server did not end the session: {e}"));
                }
            }
            Err(e) => writer.write_warning(&format!("{e:#}")),
        }

        if let Some(ctx) = config.contexts.get_mut(&name) {
            ctx.auth_token = None;
        }
        global.save_config(&config)?;
        writer.write_success(&format!("Logged out of '{}'", name));
        Ok(())
    }
}
