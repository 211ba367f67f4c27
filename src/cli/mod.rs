//! # Terminal Front End
//!
//! The `user-admin` binary: argument parsing ([`Cli`]), command flows
//! ([`commands`]), output ([`render`]) and the console side channels
//! ([`console`]).

pub mod commands;
pub mod console;
pub mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info_span, Instrument};

use crate::clients::{HttpUserClient, UserCollection};
use crate::config::ClientConfig;
use crate::controller::{Confirm, FixedConfirm, Notification, Notifier};
use crate::lifecycle::AdminSystem;
use crate::model::{DraftField, UserDraft, UserId, UserStatus};

use self::console::{ConsoleNotifier, PromptConfirm};

#[derive(Debug, Parser)]
#[command(name = "user-admin", version, about = "Manage the users of a remote collection")]
pub struct Cli {
    #[command(flatten)]
    pub config: ClientConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one page of users
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a single user
    Show { id: UserId },
    /// Create a user
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value_t = UserStatus::Active)]
        status: UserStatus,
    },
    /// Change fields of an existing user
    Update {
        id: UserId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        status: Option<UserStatus>,
    },
    /// Delete a user after confirmation
    Delete {
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::List { .. } => "list",
            Command::Show { .. } => "show",
            Command::Create { .. } => "create",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
        }
    }
}

/// Runs one command and maps its outcome to the process exit code.
///
/// # Errors
///
/// Returns an error when the system cannot be started or the controller stops
/// unexpectedly. Failed operations are reported and give a failure exit code.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let Cli { config, command } = cli;
    let span = info_span!("command", name = command.name());
    let notifier = Arc::new(ConsoleNotifier::new());

    let succeeded = execute(&config, command, Arc::clone(&notifier))
        .instrument(span)
        .await?;
    debug!(succeeded, errors = notifier.error_count(), "Command finished");

    if succeeded && notifier.error_count() == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn execute(
    config: &ClientConfig,
    command: Command,
    notifier: Arc<ConsoleNotifier>,
) -> Result<bool> {
    match command {
        Command::Show { id } => show(config, &id, notifier.as_ref()).await,
        Command::List { page } => {
            let system = connect(config, notifier, false)?;
            let outcome = commands::list(&system.users, page).await;
            finish(system, outcome).await
        }
        Command::Create {
            name,
            email,
            status,
        } => {
            let system = connect(config, notifier, false)?;
            let draft = UserDraft::new(name, email, status.as_str());
            let outcome = commands::create(&system.users, draft).await;
            finish(system, outcome).await
        }
        Command::Update {
            id,
            name,
            email,
            status,
        } => {
            let changes = [
                (DraftField::Name, name),
                (DraftField::Email, email),
                (DraftField::Status, status.map(|s| s.to_string())),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)))
            .collect();
            let system = connect(config, notifier, false)?;
            let outcome = commands::update(&system.users, &id, changes).await;
            finish(system, outcome).await
        }
        Command::Delete { id, yes } => {
            let system = connect(config, notifier, yes)?;
            let outcome = commands::delete(&system.users, &id).await;
            finish(system, outcome).await
        }
    }
}

/// Starts the controller; `assume_yes` answers the delete prompt up front.
fn connect(
    config: &ClientConfig,
    notifier: Arc<ConsoleNotifier>,
    assume_yes: bool,
) -> Result<AdminSystem> {
    let confirm: Arc<dyn Confirm> = if assume_yes {
        Arc::new(FixedConfirm::new(true))
    } else {
        Arc::new(PromptConfirm)
    };
    AdminSystem::connect(config, notifier, confirm)
        .context("failed to start the user list controller")
}

async fn finish(system: AdminSystem, outcome: Result<bool>) -> Result<bool> {
    system.shutdown().await?;
    outcome
}

async fn show(config: &ClientConfig, id: &UserId, notifier: &dyn Notifier) -> Result<bool> {
    let client = HttpUserClient::from_config(config)?;
    match client.get(id).await {
        Ok(user) => {
            println!("{}", render::user_details(&user));
            Ok(true)
        }
        Err(error) => {
            notifier.notify(Notification::error(format!(
                "Failed to fetch user: {}",
                error.describe()
            )));
            Ok(false)
        }
    }
}
