//
//  argocd-rs
//  cli/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::v1::accounts::{Account, CanIRequest};
use crate::api::v1::sessions::UserInfo;
use crate::output::{format_bool, format_time, OutputFormat, TableOutput};

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: AccountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountSubcommand {
    /// List accounts
    #[command(visible_alias = "ls")]
    List,

    /// Show one account and its tokens
    Get(GetArgs),

    /// Check whether the current user may perform an action
    ///
    /// Example: `argocd-rs account can-i sync applications 'default/*'`
    #[command(name = "can-i")]
    CanI(CanIArgs),

    /// Show who the current session belongs to
    #[command(name = "user-info", visible_alias = "whoami")]
    UserInfo,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Account name; defaults to the logged-in account
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct CanIArgs {
    /// e.g. `get`, `create`, `sync`
    pub action: String,

    /// e.g. `applications`, `clusters`, `projects`
    pub resource: String,

    /// Object path, e.g. `default/guestbook` or `*`
    #[arg(default_value = "*")]
    pub subresource: String,
}

fn unix_time(secs: i64) -> Option<chrono::DateTime<Utc>> {
    (secs > 0)
        .then(|| Utc.timestamp_opt(secs, 0).single())
        .flatten()
}

impl TableOutput for Account {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "ENABLED", "CAPABILITIES", "TOKENS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            format_bool(self.enabled, color),
            self.capabilities.join(", "),
            self.tokens.len().to_string(),
        ]
    }

    fn detail(&self, color: bool) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Name", self.name.clone()),
            ("Enabled", format_bool(self.enabled, color)),
            ("Capabilities", self.capabilities.join(", ")),
        ];
        for token in &self.tokens {
            let expires = match unix_time(token.expires_at) {
                Some(t) => format_time(Some(t)),
                None => "never".to_string(),
            };
            fields.push((
                "Token",
                format!(
                    "{} (issued {}, expires {})",
                    token.id,
                    format_time(unix_time(token.issued_at)),
                    expires
                ),
            ));
        }
        fields
    }
}

impl TableOutput for UserInfo {
    fn headers() -> Vec<&'static str> {
        vec!["LOGGED IN", "USERNAME", "ISSUER", "GROUPS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            format_bool(self.logged_in, color),
            self.username.clone(),
            self.iss.clone(),
            self.groups.join(", "),
        ]
    }
}

#[derive(Debug, Serialize)]
struct CanIAnswer {
    allowed: bool,
}

impl AccountCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AccountSubcommand::List => self.list(global).await,
            AccountSubcommand::Get(args) => self.get(args, global).await,
            AccountSubcommand::CanI(args) => self.can_i(args, global).await,
            AccountSubcommand::UserInfo => self.user_info(global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let accounts = client.accounts().list_accounts().await?;
        global.writer().write_list(&accounts.items)
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let name = match &args.name {
            Some(name) => name.clone(),
            None => client.sessions().get_user_info().await?.username,
        };
        let account = client.accounts().get_account(&name).await?;
        global.writer().write(&account)
    }

    async fn can_i(&self, args: &CanIArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let request = CanIRequest::new(&args.resource, &args.action).subresource(&args.subresource);
        let allowed = client.accounts().can_i(&request).await?.is_allowed();

        let writer = global.writer();
        match writer.format() {
            OutputFormat::Table => println!("{}", if allowed { "yes" } else { "no" }),
            _ => writer.write_value(&CanIAnswer { allowed })?,
        }
        Ok(())
    }

    async fn user_info(&self, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let info = client.sessions().get_user_info().await?;
        global.writer().write(&info)
    }
}
