//
//  argocd-rs
//  cli/cluster.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::clusters::{Cluster, ClusterId, ClusterQuery};
use crate::output::{format_status, truncate, TableOutput};

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct ClusterCommand {
    #[command(subcommand)]
    pub command: ClusterSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ClusterSubcommand {
    /// List clusters
    #[command(visible_alias = "ls")]
    List,

    /// Show one cluster by API server URL or name
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API server URL (`https://...`) or cluster name
    pub server: String,
}

impl TableOutput for Cluster {
    fn headers() -> Vec<&'static str> {
        vec!["SERVER", "NAME", "VERSION", "STATUS", "MESSAGE", "PROJECT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let state = self.connection_state();
        let version = self
            .info
            .as_ref()
            .map(|i| i.server_version.clone())
            .unwrap_or_default();
        vec![
            self.server.clone(),
            self.name.clone(),
            version,
            format_status(&state.status, color),
            truncate(&state.message, 60),
            self.project.clone(),
        ]
    }

    fn detail(&self, color: bool) -> Vec<(&'static str, String)> {
        let state = self.connection_state();
        let mut fields = vec![
            ("Server", self.server.clone()),
            ("Name", self.name.clone()),
            ("Status", format_status(&state.status, color)),
        ];
        if !state.message.is_empty() {
            fields.push(("Message", state.message.clone()));
        }
        if let Some(info) = &self.info {
            fields.push(("Version", info.server_version.clone()));
            fields.push(("Applications", info.applications_count.to_string()));
            fields.push(("Resources", info.cache_info.resources_count.to_string()));
        }
        if !self.namespaces.is_empty() {
            fields.push(("Namespaces", self.namespaces.join(", ")));
        }
        if !self.project.is_empty() {
            fields.push(("Project", self.project.clone()));
        }
        fields
    }
}

impl ClusterCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ClusterSubcommand::List => self.list(global).await,
            ClusterSubcommand::Get(args) => self.get(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let clusters = client.clusters().list(&ClusterQuery::default()).await?;
        global.writer().write_list(&clusters.items)
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let cluster = client.clusters().get(&ClusterId::parse(&args.server)).await?;
        global.writer().write(&cluster)
    }
}
