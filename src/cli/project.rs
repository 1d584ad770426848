//
//  argocd-rs
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::projects::{AppProject, GroupKind};
use crate::output::{truncate, TableOutput};

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List,

    /// Show one project
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub name: String,
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn group_kinds(kinds: &[GroupKind]) -> String {
    let kinds: Vec<String> = kinds
        .iter()
        .map(|gk| {
            if gk.group.is_empty() {
                gk.kind.clone()
            } else {
                format!("{}/{}", gk.group, gk.kind)
            }
        })
        .collect();
    join_or_dash(&kinds)
}

impl TableOutput for AppProject {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "DESCRIPTION", "DESTINATIONS", "SOURCES"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let destinations: Vec<String> = self
            .spec
            .destinations
            .iter()
            .map(|d| {
                let cluster = if d.server.is_empty() { &d.name } else { &d.server };
                format!("{},{}", cluster, d.namespace)
            })
            .collect();
        vec![
            self.metadata.name.clone(),
            truncate(&self.spec.description, 40),
            join_or_dash(&destinations),
            join_or_dash(&self.spec.source_repos),
        ]
    }

    fn detail(&self, color: bool) -> Vec<(&'static str, String)> {
        let row = self.row(color);
        vec![
            ("Name", self.metadata.name.clone()),
            ("Description", self.spec.description.clone()),
            ("Destinations", row[2].clone()),
            ("Repositories", row[3].clone()),
            (
                "Allowed Cluster Resources",
                group_kinds(&self.spec.cluster_resource_whitelist),
            ),
            (
                "Denied Namespaced Resources",
                group_kinds(&self.spec.namespace_resource_blacklist),
            ),
            ("Roles", self.spec.roles.len().to_string()),
        ]
    }
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List => self.list(global).await,
            ProjectSubcommand::Get(args) => self.get(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let projects = client.projects().list(None).await?;
        global.writer().write_list(&projects.items)
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let project = client.projects().get(&args.name).await?;
        global.writer().write(&project)
    }
}
