// ABOUTME: The tag commands, their arguments, and what each one requires
// ABOUTME: Also carries the invocation context handed to every handler

use tagkeep_core::ActorId;
use tagkeep_pages::SessionSummary;
use tagkeep_security::{Actor, Requirement, MODERATOR_TIER};

/// A parsed tag command with its raw, not yet validated, arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `tag <name>`
    Show { name: String },
    /// `tags create <name> <content>`
    Create { name: String, content: String },
    /// `tags alias <alias> <target>`
    Alias { alias: String, target: String },
    /// `tags edit <name> <content>`
    Edit { name: String, content: String },
    /// `tags delete <name>`
    Delete { name: String },
    /// `tags unalias <alias>`
    Unalias { alias: String },
    /// `tags list`
    List,
    /// `tags raw <name>`
    Raw { name: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Show { .. } => "tag",
            Command::Create { .. } => "tags create",
            Command::Alias { .. } => "tags alias",
            Command::Edit { .. } => "tags edit",
            Command::Delete { .. } => "tags delete",
            Command::Unalias { .. } => "tags unalias",
            Command::List => "tags list",
            Command::Raw { .. } => "tags raw",
        }
    }

    /// What the invoker needs to run this command. Mutations need the
    /// moderator tier, reads need nothing.
    pub fn requirement(&self) -> Requirement {
        match self {
            Command::Create { .. }
            | Command::Alias { .. }
            | Command::Edit { .. }
            | Command::Delete { .. }
            | Command::Unalias { .. } => Requirement::Level(MODERATOR_TIER),
            Command::Show { .. } | Command::List | Command::Raw { .. } => Requirement::None,
        }
    }
}

/// Who invoked a command, from where, and whom the request mentioned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub actor: Actor,
    pub mentions: Vec<ActorId>,
}

impl CommandContext {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            mentions: Vec::new(),
        }
    }

    pub fn with_mentions(mut self, mentions: impl IntoIterator<Item = ActorId>) -> Self {
        self.mentions = mentions.into_iter().collect();
        self
    }

    pub fn scope(&self) -> Option<&str> {
        self.actor.scope.as_deref()
    }
}

/// What the invoker gets back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A text reply
    Reply(String),
    /// Pages were shown and the navigation session has ended
    Displayed(SessionSummary),
    /// Nothing at all, the command does not answer here
    Silent,
}
