//
//  argocd-rs
//  cli/app.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use console::style;

use crate::api::v1::applications::{
    Application, ApplicationQuery, DeleteOptions, LogEntry, LogsQuery, SyncRequest,
};
use crate::interactive::{can_prompt, prompt_confirm_with_default};
use crate::output::{
    format_age, format_status, manifest_to_yaml, truncate, write_json_lines, OutputFormat,
    TableOutput,
};

use super::{connect, GlobalOptions};

#[derive(Args, Debug)]
pub struct AppCommand {
    #[command(subcommand)]
    pub command: AppSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppSubcommand {
    /// List applications
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one application
    Get(GetArgs),

    /// Delete an application
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Sync an application to its target state
    Sync(SyncArgs),

    /// Print the rendered manifests of an application
    Manifests(ManifestsArgs),

    /// Print container logs of an application's pods
    Logs(LogsArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only applications in these projects
    #[arg(long, short = 'p')]
    pub project: Vec<String>,

    /// Label selector, e.g. `team=payments`
    #[arg(long, short = 'l')]
    pub selector: Option<String>,

    /// Only applications sourced from this repository
    #[arg(long, short = 'r')]
    pub repo: Option<String>,

    /// Namespace the applications live in
    #[arg(long, short = 'N')]
    pub app_namespace: Option<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub name: String,

    /// Refresh before answering: `normal` or `hard`
    #[arg(long, value_parser = ["normal", "hard"])]
    pub refresh: Option<String>,

    #[arg(long, short = 'N')]
    pub app_namespace: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub name: String,

    /// Delete the application's resources as well
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub cascade: bool,

    /// `foreground`, `background` or `orphan`
    #[arg(long, value_parser = ["foreground", "background", "orphan"])]
    pub propagation_policy: Option<String>,

    #[arg(long, short = 'N')]
    pub app_namespace: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    pub name: String,

    /// Revision to sync to instead of the target revision
    #[arg(long)]
    pub revision: Option<String>,

    /// Delete resources no longer in git
    #[arg(long)]
    pub prune: bool,

    /// Preview the sync without applying it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ManifestsArgs {
    pub name: String,

    /// Render this revision instead of the target revision
    #[arg(long)]
    pub revision: Option<String>,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    pub name: String,

    /// Only this pod
    #[arg(long)]
    pub pod: Option<String>,

    #[arg(long, short = 'c')]
    pub container: Option<String>,

    /// Lines from the end of each log
    #[arg(long)]
    pub tail: Option<i64>,

    /// Only lines newer than this many seconds
    #[arg(long)]
    pub since_seconds: Option<i64>,

    /// Only lines containing this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Logs of the previous container instance
    #[arg(long)]
    pub previous: bool,
}

impl LogsArgs {
    fn query(&self) -> LogsQuery {
        LogsQuery {
            container: self.container.clone(),
            tail_lines: self.tail,
            since_seconds: self.since_seconds,
            filter: self.filter.clone(),
            previous: self.previous,
            ..Default::default()
        }
    }
}

/// Log records worth printing; the empty end-of-stream marker is dropped.
fn printable_logs(entries: Vec<LogEntry>) -> Vec<LogEntry> {
    entries
        .into_iter()
        .filter(|e| !(e.last && e.content.is_empty()))
        .collect()
}

fn destination(app: &Application) -> String {
    let dest = &app.spec.destination;
    let cluster = if dest.server.is_empty() { &dest.name } else { &dest.server };
    if dest.namespace.is_empty() {
        cluster.clone()
    } else {
        format!("{}/{}", cluster, dest.namespace)
    }
}

fn source_summary(app: &Application) -> (String, String, String) {
    let source = app.spec.source.as_ref().or_else(|| app.spec.sources.first());
    match source {
        Some(src) => {
            let path = if src.chart.is_empty() { &src.path } else { &src.chart };
            (src.repo_url.clone(), path.clone(), src.target_revision.clone())
        }
        None => Default::default(),
    }
}

impl TableOutput for Application {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "PROJECT", "SYNC", "HEALTH", "DESTINATION", "REPO", "AGE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let name = if color {
            style(&self.metadata.name).bold().to_string()
        } else {
            self.metadata.name.clone()
        };
        let (repo, _, _) = source_summary(self);
        vec![
            name,
            self.spec.project.clone(),
            format_status(&self.status.sync.status, color),
            format_status(&self.status.health.status, color),
            destination(self),
            truncate(&repo, 50),
            format_age(self.metadata.creation_timestamp.as_deref(), Utc::now()),
        ]
    }

    fn detail(&self, color: bool) -> Vec<(&'static str, String)> {
        let (repo, path, target) = source_summary(self);
        let mut fields = vec![
            ("Name", self.metadata.name.clone()),
            ("Project", self.spec.project.clone()),
            ("Server", self.spec.destination.server.clone()),
            ("Namespace", self.spec.destination.namespace.clone()),
            ("Repo", repo),
            ("Path", path),
            ("Target", target),
            ("Sync Status", format_status(&self.status.sync.status, color)),
            ("Health Status", format_status(&self.status.health.status, color)),
        ];
        if !self.status.sync.revision.is_empty() {
            fields.push(("Revision", self.status.sync.revision.clone()));
        }
        if let Some(op) = &self.status.operation_state {
            fields.push(("Last Operation", format_status(&op.phase, color)));
            if !op.message.is_empty() {
                fields.push(("Message", op.message.clone()));
            }
        }
        fields.push((
            "Age",
            format_age(self.metadata.creation_timestamp.as_deref(), Utc::now()),
        ));
        fields
    }
}

impl AppCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AppSubcommand::List(args) => self.list(args, global).await,
            AppSubcommand::Get(args) => self.get(args, global).await,
            AppSubcommand::Delete(args) => self.delete(args, global).await,
            AppSubcommand::Sync(args) => self.sync(args, global).await,
            AppSubcommand::Manifests(args) => self.manifests(args, global).await,
            AppSubcommand::Logs(args) => self.logs(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let query = ApplicationQuery {
            projects: args.project.clone(),
            selector: args.selector.clone(),
            repo: args.repo.clone(),
            app_namespace: args.app_namespace.clone(),
            ..Default::default()
        };
        let apps = client.applications().list(&query).await?;
        global.writer().write_list(&apps.items)
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let query = ApplicationQuery {
            refresh: args.refresh.clone(),
            app_namespace: args.app_namespace.clone(),
            ..Default::default()
        };
        let app = client.applications().get(&args.name, &query).await?;
        global.writer().write(&app)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer();
        if !args.yes {
            if !can_prompt() {
                bail!("Refusing to delete '{}' without --yes", args.name);
            }
            let prompt = format!("Delete application '{}'?", args.name);
            if !prompt_confirm_with_default(&prompt, false)? {
                writer.write_warning("Aborted");
                return Ok(());
            }
        }

        let client = connect(global).await?;
        let options = DeleteOptions {
            cascade: Some(args.cascade),
            propagation_policy: args.propagation_policy.clone(),
            app_namespace: args.app_namespace.clone(),
        };
        client.applications().delete(&args.name, &options).await?;
        writer.write_success(&format!("Application '{}' deleted", args.name));
        Ok(())
    }

    async fn sync(&self, args: &SyncArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let request = SyncRequest {
            revision: args.revision.clone().unwrap_or_default(),
            prune: args.prune,
            dry_run: args.dry_run,
            ..Default::default()
        };
        let app = client.applications().sync(&args.name, &request).await?;

        let writer = global.writer();
        if writer.format() == OutputFormat::Table {
            writer.write_success(&format!("Sync of '{}' started", args.name));
            Ok(())
        } else {
            writer.write(&app)
        }
    }

    async fn manifests(&self, args: &ManifestsArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let response = client
            .applications()
            .get_manifests(&args.name, args.revision.as_deref())
            .await?;

        let writer = global.writer();
        match writer.format() {
            OutputFormat::Table | OutputFormat::Yaml => {
                let docs: Vec<String> = response
                    .manifests
                    .iter()
                    .map(|m| manifest_to_yaml(m))
                    .collect();
                println!("{}", docs.join("\n---\n"));
                Ok(())
            }
            OutputFormat::Json => writer.write_value(&response),
        }
    }

    async fn logs(&self, args: &LogsArgs, global: &GlobalOptions) -> Result<()> {
        let client = connect(global).await?;
        let query = args.query();
        let entries = match &args.pod {
            Some(pod) => client.applications().pod_logs(&args.name, pod, &query).await?,
            None => client.applications().application_pod_logs(&args.name, &query).await?,
        };
        let entries = printable_logs(entries);

        match global.writer().format() {
            OutputFormat::Json => write_json_lines(&mut std::io::stdout().lock(), &entries),
            OutputFormat::Table | OutputFormat::Yaml => {
                for entry in &entries {
                    println!("{}", entry.content);
                }
                Ok(())
            }
        }
    }
}
