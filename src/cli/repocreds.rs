//
//  argocd-rs
//  cli/repocreds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::repo_creds::RepoCreds;
use crate::output::{format_bool, TableOutput};

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct RepoCredsCommand {
    #[command(subcommand)]
    pub command: RepoCredsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoCredsSubcommand {
    /// List credential templates
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only the template for this URL prefix
    #[arg(long)]
    pub url: Option<String>,
}

impl TableOutput for RepoCreds {
    fn headers() -> Vec<&'static str> {
        vec!["URL PATTERN", "TYPE", "USERNAME", "SSH CREDS", "OCI"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.url.clone(),
            self.repo_type.clone(),
            self.username.clone(),
            format_bool(!self.ssh_private_key.is_empty(), color),
            format_bool(self.enable_oci, color),
        ]
    }
}

impl RepoCredsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoCredsSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let creds = client
            .repo_creds()
            .list_repository_credentials(args.url.as_deref())
            .await?;
        global.writer().write_list(&creds.items)
    }
}
