// ABOUTME: Command boundary for the Tagkeep tag commands
// ABOUTME: Scope and access gating, command handlers, and localized replies

pub mod command;
pub mod config;
pub mod error;
pub mod handlers;
pub mod reply;

pub use command::{Command, CommandContext, CommandOutcome};
pub use config::TagsConfig;
pub use error::{CommandError, CommandResult};
pub use handlers::TagCommands;
