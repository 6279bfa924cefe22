// ABOUTME: Tag command handlers
// ABOUTME: Gates each command, runs it against the tag store, and turns failures into replies

use std::sync::Arc;

use tagkeep_core::{escape_markdown, validate_tag_name, ActorId, Translator};
use tagkeep_pages::{
    paginate_list, paginate_single, NavigationInput, NavigationPolicy, NavigationSession,
    PageDisplay, PageSource,
};
use tagkeep_security::{AccessGate, ScopeGate};
use tagkeep_tags::{AliasCreateInput, TagCreateInput, TagStorage};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::command::{Command, CommandContext, CommandOutcome};
use crate::config::TagsConfig;
use crate::error::{CommandError, CommandResult};
use crate::reply;

pub struct TagCommands {
    storage: TagStorage,
    gate: AccessGate,
    scopes: ScopeGate,
    translator: Arc<dyn Translator>,
    display: Arc<dyn PageDisplay>,
    config: TagsConfig,
    owners: Vec<ActorId>,
}

impl TagCommands {
    pub fn new(
        storage: TagStorage,
        gate: AccessGate,
        translator: Arc<dyn Translator>,
        display: Arc<dyn PageDisplay>,
        config: TagsConfig,
    ) -> Self {
        let scopes = ScopeGate::new(config.allowed_scopes.iter().cloned());

        Self {
            storage,
            gate,
            scopes,
            translator,
            display,
            config,
            owners: Vec::new(),
        }
    }

    /// Bot owners, who may navigate any page session
    pub fn with_owners(mut self, owners: impl IntoIterator<Item = ActorId>) -> Self {
        self.owners = owners.into_iter().collect();
        self
    }

    pub fn storage(&self) -> &TagStorage {
        &self.storage
    }

    /// Run a command and turn every outcome, failures included, into what
    /// the invoker should see.
    pub async fn execute(
        &self,
        ctx: &CommandContext,
        command: Command,
        inputs: mpsc::Receiver<NavigationInput>,
    ) -> CommandOutcome {
        match self.run(ctx, &command, inputs).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let name = command.name();
                if e.is_unexpected() {
                    error!("Command {} by {} failed: {}", name, ctx.actor.id, e);
                } else {
                    debug!("Command {} by {} rejected: {}", name, ctx.actor.id, e);
                }

                match reply::error_reply(self.translator.as_ref(), &command, &e) {
                    Some(text) => CommandOutcome::Reply(text),
                    None => CommandOutcome::Silent,
                }
            }
        }
    }

    /// Run a command, stopping at the first failure
    pub async fn run(
        &self,
        ctx: &CommandContext,
        command: &Command,
        inputs: mpsc::Receiver<NavigationInput>,
    ) -> CommandResult<CommandOutcome> {
        self.scopes.check(ctx.scope())?;
        self.gate.require(&ctx.actor, command.requirement()).await?;

        match command {
            Command::Show { name } => self.show(ctx, name, inputs).await,
            Command::Create { name, content } => self.create(ctx, name, content).await,
            Command::Alias { alias, target } => self.alias(ctx, alias, target).await,
            Command::Edit { name, content } => self.edit(name, content).await,
            Command::Delete { name } => self.delete(name).await,
            Command::Unalias { alias } => self.unalias(alias).await,
            Command::List => self.list(ctx, inputs).await,
            Command::Raw { name } => self.raw(name).await,
        }
    }

    async fn show(
        &self,
        ctx: &CommandContext,
        name: &str,
        inputs: mpsc::Receiver<NavigationInput>,
    ) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(name)?;
        let tag = self.storage.lookup(&name, true).await?;

        let source = paginate_single(tag, self.config.public_base_url.clone());
        self.display_pages(ctx, Box::new(source), inputs).await
    }

    async fn create(
        &self,
        ctx: &CommandContext,
        name: &str,
        content: &str,
    ) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(name)?;

        let tag = self
            .storage
            .create_tag(TagCreateInput {
                name,
                content: content.to_string(),
                owner_id: ctx.actor.id.clone(),
            })
            .await?;

        Ok(CommandOutcome::Reply(reply::tag_created(self.translator.as_ref(), &tag)))
    }

    async fn alias(
        &self,
        ctx: &CommandContext,
        alias: &str,
        target: &str,
    ) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(alias)?;
        let target = validate_tag_name(target)?;

        let alias = self
            .storage
            .aliases()
            .create_alias(AliasCreateInput {
                name,
                target,
                owner_id: ctx.actor.id.clone(),
            })
            .await?;

        let tag = self
            .storage
            .get_tag(&alias.tag_id)
            .await?
            .ok_or_else(|| CommandError::NotFound(alias.tag_id.clone()))?;

        Ok(CommandOutcome::Reply(reply::alias_created(self.translator.as_ref(), &alias, &tag)))
    }

    async fn edit(&self, name: &str, content: &str) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(name)?;
        let tag = self.storage.edit_tag(&name, content).await?;

        Ok(CommandOutcome::Reply(reply::tag_edited(self.translator.as_ref(), &tag)))
    }

    async fn delete(&self, name: &str) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(name)?;
        let tag = self.storage.delete_tag(&name).await?;

        Ok(CommandOutcome::Reply(reply::tag_deleted(self.translator.as_ref(), &tag)))
    }

    async fn unalias(&self, alias: &str) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(alias)?;
        let alias = self.storage.aliases().delete_alias(&name).await?;

        Ok(CommandOutcome::Reply(reply::alias_deleted(self.translator.as_ref(), &alias)))
    }

    async fn list(
        &self,
        ctx: &CommandContext,
        inputs: mpsc::Receiver<NavigationInput>,
    ) -> CommandResult<CommandOutcome> {
        let tags = self.storage.list_by_popularity().await?;
        debug!("Listing {} tag(s)", tags.len());

        let source = paginate_list(
            tags,
            self.config.list_page_size,
            self.translator.clone(),
            self.config.public_base_url.clone(),
        );
        self.display_pages(ctx, Box::new(source), inputs).await
    }

    async fn raw(&self, name: &str) -> CommandResult<CommandOutcome> {
        let name = validate_tag_name(name)?;
        let tag = self.storage.lookup(&name, false).await?;

        Ok(CommandOutcome::Reply(escape_markdown(&tag.content)))
    }

    async fn display_pages(
        &self,
        ctx: &CommandContext,
        source: Box<dyn PageSource>,
        inputs: mpsc::Receiver<NavigationInput>,
    ) -> CommandResult<CommandOutcome> {
        let policy = NavigationPolicy::new(
            ctx.actor.id.clone(),
            ctx.mentions.iter().cloned(),
            self.owners.iter().cloned(),
        );
        let session = NavigationSession::new(source, policy, self.config.navigation_timeout);

        let summary = session.run(self.display.as_ref(), inputs).await?;
        info!(
            "Page session for {} ended on page {} ({:?})",
            ctx.actor.id, summary.final_page, summary.ended_by
        );

        Ok(CommandOutcome::Displayed(summary))
    }
}
