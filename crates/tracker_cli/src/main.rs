//! Maintenance CLI for the tracker database.
//!
//! # Responsibility
//! - Open one connection per invocation and run a single tracker operation.
//! - Print results as JSON using the core's view contract.
//!
//! The caller id is taken as given; this tool does no authentication.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracker_core::seed::populate_seed_data;
use tracker_core::{
    default_log_level, init_logging, open_db, LoggingConfig, ProjectView, TrackerService,
};
use uuid::Uuid;

/// Project/comment tracker maintenance tool.
#[derive(Parser)]
#[command(name = "tracker", version, long_about = None)]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "TRACKER_DB_PATH", default_value = "tracker.db", global = true)]
    db: PathBuf,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "TRACKER_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset.
    #[arg(long, env = "TRACKER_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema if it does not exist.
    Init,
    /// Replace all rows with the canonical seed dataset.
    Seed,
    /// List all owners.
    Owners,
    /// Print the total number of projects.
    Count,
    /// Project operations.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Comment operations.
    #[command(subcommand)]
    Comment(CommentCommand),
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// Create a project for an owner.
    Add {
        #[arg(long)]
        owner: Uuid,
        #[arg(long)]
        name: String,
    },
    /// Show a project with its comments.
    Get(ProjectRef),
    /// Delete a project and its comments, printing what was deleted.
    Delete(ProjectRef),
}

#[derive(Args)]
struct ProjectRef {
    #[arg(long)]
    owner: Uuid,
    #[arg(long)]
    id: Uuid,
}

#[derive(Subcommand)]
enum CommentCommand {
    /// Add a comment to a project.
    Add {
        #[arg(long)]
        commenter: Uuid,
        #[arg(long)]
        project: Uuid,
        #[arg(long)]
        message: String,
    },
    /// Replace a comment's message.
    Update {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        message: String,
    },
    /// List comments of one project.
    List {
        #[arg(long)]
        project: Uuid,
    },
    /// List comments across every project of one owner.
    ListByOwner {
        #[arg(long)]
        owner: Uuid,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string()),
        log_dir: cli.log_dir.clone(),
    };
    init_logging(&logging).map_err(anyhow::Error::msg)?;

    let mut conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;

    let output = run(&mut conn, cli.command)?;

    info!("event=cli_command module=cli status=ok");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(conn: &mut Connection, command: Commands) -> Result<Value> {
    let value = match command {
        // Schema creation already happened in `open_db`.
        Commands::Init => json!({ "message": "OK" }),
        Commands::Seed => {
            let summary = populate_seed_data(conn)?;
            json!({
                "owners": summary.owners,
                "projects": summary.projects,
                "comments": summary.comments,
            })
        }
        Commands::Owners => serde_json::to_value(service(conn)?.list_owners()?)?,
        Commands::Count => serde_json::to_value(service(conn)?.get_num_projects()?)?,
        Commands::Project(ProjectCommand::Add { owner, name }) => {
            serde_json::to_value(service(conn)?.add_project(owner, &name)?)?
        }
        Commands::Project(ProjectCommand::Get(target)) => {
            found_or_empty(service(conn)?.get_project(target.owner, target.id)?)?
        }
        Commands::Project(ProjectCommand::Delete(target)) => {
            found_or_empty(service(conn)?.delete_project(target.owner, target.id)?)?
        }
        Commands::Comment(CommentCommand::Add {
            commenter,
            project,
            message,
        }) => serde_json::to_value(service(conn)?.add_comment(commenter, project, &message)?)?,
        Commands::Comment(CommentCommand::Update { id, message }) => {
            serde_json::to_value(service(conn)?.update_comment(id, &message)?)?
        }
        Commands::Comment(CommentCommand::List { project }) => {
            serde_json::to_value(service(conn)?.list_comments(project)?)?
        }
        Commands::Comment(CommentCommand::ListByOwner { owner }) => {
            serde_json::to_value(service(conn)?.list_comments_by_owner(owner)?)?
        }
    };
    Ok(value)
}

fn service(conn: &mut Connection) -> Result<TrackerService<'_>> {
    Ok(TrackerService::try_new(conn)?)
}

/// Not found prints `{}`.
fn found_or_empty(view: Option<ProjectView>) -> Result<Value> {
    match view {
        Some(view) => Ok(serde_json::to_value(view)?),
        None => Ok(json!({})),
    }
}
