//
//  argocd-rs
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::repositories::Repository;
use crate::output::{format_bool, format_status, truncate, TableOutput};

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one repository
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Re-check connection state instead of using the cache
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repository URL
    pub url: String,

    /// Re-check connection state instead of using the cache
    #[arg(long)]
    pub refresh: bool,
}

impl TableOutput for Repository {
    fn headers() -> Vec<&'static str> {
        vec!["TYPE", "NAME", "REPO", "INSECURE", "OCI", "LFS", "CREDS", "STATUS", "MESSAGE", "PROJECT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let state = self.connection_state.clone().unwrap_or_default();
        vec![
            self.repo_type.clone(),
            self.name.clone(),
            self.repo.clone(),
            format_bool(self.insecure, color),
            format_bool(self.enable_oci, color),
            format_bool(self.enable_lfs, color),
            format_bool(self.inherited_creds || !self.username.is_empty(), color),
            format_status(&state.status, color),
            truncate(&state.message, 60),
            self.project.clone(),
        ]
    }
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => self.list(args, global).await,
            RepoSubcommand::Get(args) => self.get(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let repos = client.repositories().list_repositories(args.refresh).await?;
        global.writer().write_list(&repos.items)
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let repo = client
            .repositories()
            .get_repository(&args.url, args.refresh)
            .await?;
        global.writer().write(&repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_row() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "repo": "https://github.com/argoproj/argocd-example-apps",
            "type": "git",
            "inheritedCreds": true,
            "connectionState": {"status": "Failed", "message": "authentication required"}
        }))
        .unwrap();

        let row = repo.row(false);
        assert_eq!(row[0], "git");
        assert_eq!(row[6], "Yes");
        assert_eq!(row[7], "Failed");
        assert_eq!(row[8], "authentication required");
    }
}
