use std::sync::Arc;

use clap::{Parser, Subcommand};

use marquee_core::{Caller, MarqueeService};
use marquee_storage::{Store, StoreError};
use marquee_store_sqlite::SqliteStore;

mod commands;
mod config;

use config::CliConfig;

// ────────────────────────────────────── CLI Types ──────────────────────────────────────

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Movie-night planning: groups, suggestions, and votes")]
struct Cli {
    /// Database URL (sqlite://path/to/db.db); defaults to ~/.marquee/store.db
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Email of the user to act as (overrides the configured identity)
    #[arg(long, global = true, env = "MARQUEE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Identity commands (register users, pick who you act as)
    User {
        #[command(subcommand)]
        user_cmd: UserCommand,
    },
    /// Group commands
    Group {
        #[command(subcommand)]
        group_cmd: GroupCommand,
    },
    /// Propose a movie or TV title to a group
    Suggest {
        /// Group ID
        group: String,
        /// Title to propose
        title: String,
        /// movie or tv
        #[arg(long, default_value = "movie")]
        kind: String,
        /// Optional blurb shown alongside the title
        #[arg(long)]
        description: Option<String>,
    },
    /// Cast or change your vote on a suggestion
    Vote {
        /// Suggestion ID
        suggestion: String,
        /// want, fine or dont_want
        ballot: String,
    },
    /// Ranked suggestion list for a group
    Suggestions {
        /// Group ID
        group: String,
        /// Count only this member's votes (repeatable; email)
        #[arg(long = "voter")]
        voters: Vec<String>,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Register a new user
    Register {
        /// Email address (stored lower-cased)
        email: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Set the default identity for subsequent commands
    Use {
        /// Email of a registered user
        email: String,
    },
    /// Show the configured identity
    Current,
}

#[derive(Subcommand)]
enum GroupCommand {
    /// Create a new group (you become its admin)
    Create {
        /// Group name
        name: String,
    },
    /// List your groups with their members
    List,
    /// Show one group and your role in it
    Show {
        /// Group ID
        group: String,
    },
    /// Invite a registered user by email (admins only)
    Invite {
        /// Group ID
        group: String,
        /// Invitee email (matched case-insensitively)
        email: String,
    },
    /// List a group's members
    Members {
        /// Group ID
        group: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store = match &cli.database_url {
        Some(url) => SqliteStore::open(url).await?,
        None => SqliteStore::open_default().await?,
    };
    let store: Arc<dyn Store> = Arc::new(store);
    let svc = MarqueeService::new(store);

    let config = CliConfig::load()?;

    match cli.command {
        Command::User { user_cmd } => match user_cmd {
            UserCommand::Register { email, name } => {
                commands::user::cmd_user_register(&svc, email, name).await
            }
            UserCommand::Use { email } => commands::user::cmd_user_use(&svc, config, email).await,
            UserCommand::Current => commands::user::cmd_user_current(&config),
        },
        Command::Group { group_cmd } => {
            let caller = resolve_caller(&svc, cli.user.as_deref(), &config).await?;
            match group_cmd {
                GroupCommand::Create { name } => {
                    commands::group::cmd_group_create(&svc, &caller, name).await
                }
                GroupCommand::List => commands::group::cmd_group_list(&svc, &caller).await,
                GroupCommand::Show { group } => {
                    commands::group::cmd_group_show(&svc, &caller, &group).await
                }
                GroupCommand::Invite { group, email } => {
                    commands::group::cmd_group_invite(&svc, &caller, &group, email).await
                }
                GroupCommand::Members { group } => {
                    commands::group::cmd_group_members(&svc, &caller, &group).await
                }
            }
        }
        Command::Suggest {
            group,
            title,
            kind,
            description,
        } => {
            let caller = resolve_caller(&svc, cli.user.as_deref(), &config).await?;
            commands::suggestion::cmd_suggest(&svc, &caller, &group, title, kind, description)
                .await
        }
        Command::Vote { suggestion, ballot } => {
            let caller = resolve_caller(&svc, cli.user.as_deref(), &config).await?;
            commands::suggestion::cmd_vote(&svc, &caller, &suggestion, ballot).await
        }
        Command::Suggestions { group, voters } => {
            let caller = resolve_caller(&svc, cli.user.as_deref(), &config).await?;
            commands::suggestion::cmd_suggestions(&svc, &caller, &group, voters).await
        }
    }
}

/// Resolve the acting identity: the `--user` flag wins, then the configured
/// default; with neither, the caller stays anonymous and the core rejects
/// the operation itself.
async fn resolve_caller(
    svc: &MarqueeService,
    flag: Option<&str>,
    config: &CliConfig,
) -> Result<Caller, Box<dyn std::error::Error>> {
    let email = match flag.or(config.current_user.as_deref()) {
        Some(email) => email,
        None => return Ok(Caller::Anonymous),
    };

    match svc.store.get_user_by_email(email).await {
        Ok(user) => Ok(Caller::User(user.id)),
        Err(StoreError::NotFound) => {
            Err(format!("no registered user with email {email}").into())
        }
        Err(e) => Err(e.into()),
    }
}
