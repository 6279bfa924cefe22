// ABOUTME: Library side of the tagkeep operator CLI
// ABOUTME: Environment configuration, logging setup, terminal display, and command wiring

pub mod config;
pub mod display;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tagkeep_commands::{Command, CommandContext, CommandOutcome, TagCommands};
use tagkeep_core::DefaultTranslator;
use tagkeep_pages::{NavigationInput, PageDisplay};
use tagkeep_security::{AccessGate, Actor, StaticPermissions};
use tagkeep_storage::{connect, StorageConfig};
use tagkeep_tags::TagStorage;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

/// Install the global subscriber, `info` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Open the database and wire the tag commands for the configured operator
pub async fn build_commands(
    config: &Config,
    display: Arc<dyn PageDisplay>,
) -> anyhow::Result<TagCommands> {
    let pool = connect(&StorageConfig::file(config.database_path.clone())).await?;
    info!("Using tag database at {}", config.database_path.display());

    let permissions = config.owners.iter().fold(
        StaticPermissions::default().with_level(config.actor.clone(), config.access_level),
        |permissions, owner| permissions.with_owner(owner.clone()),
    );

    let commands = TagCommands::new(
        TagStorage::new(pool),
        AccessGate::new(Arc::new(permissions)),
        Arc::new(DefaultTranslator),
        display,
        config.tags.clone(),
    )
    .with_owners(config.owners.iter().cloned());

    Ok(commands)
}

/// Run one command as the configured operator
pub async fn run_command(
    commands: &TagCommands,
    config: &Config,
    command: Command,
    mentions: Vec<String>,
    inputs: mpsc::Receiver<NavigationInput>,
) -> CommandOutcome {
    let actor = Actor::new(config.actor.clone(), config.scope.clone());
    let ctx = CommandContext::new(actor).with_mentions(mentions.into_iter().map(Into::into));

    commands.execute(&ctx, command, inputs).await
}
