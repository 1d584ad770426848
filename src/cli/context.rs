//
//  argocd-rs
//  cli/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `context list`, `context use` and `context delete`: stored logins from the
//! config file.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::output::TableOutput;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ContextCommand {
    #[command(subcommand)]
    pub command: ContextSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContextSubcommand {
    /// List stored contexts
    #[command(visible_alias = "ls")]
    List,

    /// Make a context current
    Use(UseArgs),

    /// Forget a stored context and its token
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct UseArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct ContextRow {
    current: bool,
    name: String,
    server: String,
    username: String,
    logged_in: bool,
}

impl TableOutput for ContextRow {
    fn headers() -> Vec<&'static str> {
        vec!["CURRENT", "NAME", "SERVER", "USER"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let user = if self.logged_in {
            self.username.clone()
        } else {
            format!("{} (logged out)", self.username).trim().to_string()
        };
        vec![
            if self.current { "*" } else { "" }.to_string(),
            self.name.clone(),
            self.server.clone(),
            user,
        ]
    }
}

fn rows(config: &Config) -> Vec<ContextRow> {
    config
        .contexts
        .iter()
        .map(|(name, ctx)| ContextRow {
            current: config.current_context.as_deref() == Some(name.as_str()),
            name: name.clone(),
            server: ctx.server.clone(),
            username: ctx.username.clone().unwrap_or_default(),
            logged_in: ctx.auth_token.is_some(),
        })
        .collect()
}

impl ContextCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ContextSubcommand::List => {
                let config = global.load_config()?;
                global.writer().write_list(&rows(&config))
            }
            ContextSubcommand::Use(args) => {
                let mut config = global.load_config()?;
                config.use_context(&args.name)?;
                global.save_config(&config)?;
                global
                    .writer()
                    .write_success(&format!("Switched to context '{}'", args.name));
                Ok(())
            }
            ContextSubcommand::Delete(args) => {
                let mut config = global.load_config()?;
                if config.remove_context(&args.name).is_none() {
                    bail!("Context '{}' does not exist", args.name);
                }
                global.save_config(&config)?;
                global
                    .writer()
                    .write_success(&format!("Deleted context '{}'", args.name));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextConfig;

    #[test]
    fn test_rows_mark_current_and_logged_out() {
        let mut config = Config::default();
        config.upsert_context(
            "prod",
            ContextConfig {
                server: "https://prod".into(),
                username: Some("admin".into()),
                auth_token: Some("t".into()),
                strict_tls: false,
            },
        );
        config.upsert_context("dev", ContextConfig::new("https://dev"));

        let rows = rows(&config);
        assert_eq!(rows[0].name, "dev");
        assert_eq!(rows[0].row(false), vec!["", "dev", "https://dev", "(logged out)"]);
        assert_eq!(rows[1].row(false), vec!["*", "prod", "https://prod", "admin"]);
    }
}
