// ABOUTME: Interactive navigation session over a page source
// ABOUTME: Shows the first page, reacts to navigation input, and clears controls when idle

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use tagkeep_core::ActorId;

use crate::navigation::{NavigationAction, NavigationEvent, NavigationPolicy, NavigationState};
use crate::page::Page;
use crate::source::PageSource;

/// Handle to a displayed message that can later be edited
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef(pub String);

impl MessageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to send page: {0}")]
    Send(String),

    #[error("Failed to edit page: {0}")]
    Edit(String),

    #[error("Failed to update navigation controls: {0}")]
    Controls(String),

    #[error("Page {0} is out of range")]
    MissingPage(usize),
}

/// Where pages are shown. Implemented by whatever front end hosts the session.
#[async_trait]
pub trait PageDisplay: Send + Sync {
    async fn send_page(&self, page: &Page) -> Result<MessageRef, DisplayError>;

    async fn edit_page(&self, message: &MessageRef, page: &Page) -> Result<(), DisplayError>;

    async fn add_controls(
        &self,
        message: &MessageRef,
        controls: &[NavigationAction],
    ) -> Result<(), DisplayError>;

    async fn clear_controls(&self, message: &MessageRef) -> Result<(), DisplayError>;
}

/// A control pressed by an actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationInput {
    pub actor: ActorId,
    pub action: NavigationAction,
}

impl NavigationInput {
    pub fn new(actor: impl Into<ActorId>, action: NavigationAction) -> Self {
        Self {
            actor: actor.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not allowed, or not one of the offered controls
    Ignored,
    /// Accepted, but already at the edge of the page range
    Unchanged,
    Moved(usize),
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Stopped,
    TimedOut,
    InputClosed,
    SinglePage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub final_page: usize,
    pub ended_by: EndReason,
}

pub struct NavigationSession {
    source: Box<dyn PageSource>,
    policy: NavigationPolicy,
    idle_timeout: Duration,
    controls: Vec<NavigationAction>,
    state: NavigationState,
    shown: usize,
}

impl NavigationSession {
    pub fn new(
        source: Box<dyn PageSource>,
        policy: NavigationPolicy,
        idle_timeout: Duration,
    ) -> Self {
        let controls = NavigationAction::controls_for(source.page_count());

        Self {
            source,
            policy,
            idle_timeout,
            controls,
            state: NavigationState::new(),
            shown: 0,
        }
    }

    pub fn controls(&self) -> &[NavigationAction] {
        &self.controls
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Apply one input to the session state without touching the display
    pub fn handle_input(&mut self, input: &NavigationInput) -> InputOutcome {
        if self.state.is_ended() {
            return InputOutcome::Ended;
        }

        if !self.policy.may_navigate(&input.actor) {
            debug!("Ignoring navigation from {}: not allowed", input.actor);
            return InputOutcome::Ignored;
        }

        if !self.controls.contains(&input.action) {
            debug!("Ignoring {} control: not offered", input.action);
            return InputOutcome::Ignored;
        }

        let before = self.state.current_page();
        let event = NavigationEvent::Action(input.action);
        self.state = self.state.apply(event, self.source.page_count());

        match self.state {
            NavigationState::Ended => InputOutcome::Ended,
            NavigationState::Active { page } if Some(page) == before => InputOutcome::Unchanged,
            NavigationState::Active { page } => InputOutcome::Moved(page),
        }
    }

    /// Run the session until it is stopped, times out, or input closes.
    ///
    /// The idle timer restarts after every accepted input. Controls are
    /// removed from the message however the session ends.
    pub async fn run(
        mut self,
        display: &dyn PageDisplay,
        mut inputs: mpsc::Receiver<NavigationInput>,
    ) -> Result<SessionSummary, DisplayError> {
        let first = self.page(0)?;
        let message = display.send_page(&first).await?;

        if !self.source.is_paginating() {
            self.state = NavigationState::Ended;
            return Ok(SessionSummary {
                final_page: 0,
                ended_by: EndReason::SinglePage,
            });
        }

        let result = match display.add_controls(&message, &self.controls).await {
            Ok(()) => self.navigate(display, &message, &mut inputs).await,
            Err(e) => Err(e),
        };

        if let Err(e) = display.clear_controls(&message).await {
            warn!("Failed to clear navigation controls: {}", e);
        }

        let ended_by = result?;
        debug!("Navigation ended on page {}: {:?}", self.shown, ended_by);

        Ok(SessionSummary {
            final_page: self.shown,
            ended_by,
        })
    }

    async fn navigate(
        &mut self,
        display: &dyn PageDisplay,
        message: &MessageRef,
        inputs: &mut mpsc::Receiver<NavigationInput>,
    ) -> Result<EndReason, DisplayError> {
        let mut deadline = Instant::now() + self.idle_timeout;

        loop {
            let input = match timeout_at(deadline, inputs.recv()).await {
                Err(_) => {
                    let pages = self.source.page_count();
                    self.state = self.state.apply(NavigationEvent::Timeout, pages);
                    return Ok(EndReason::TimedOut);
                }
                Ok(None) => {
                    self.state = NavigationState::Ended;
                    return Ok(EndReason::InputClosed);
                }
                Ok(Some(input)) => input,
            };

            match self.handle_input(&input) {
                InputOutcome::Ignored => {}
                InputOutcome::Unchanged => {
                    deadline = Instant::now() + self.idle_timeout;
                }
                InputOutcome::Moved(index) => {
                    deadline = Instant::now() + self.idle_timeout;

                    let page = self.page(index)?;
                    display.edit_page(message, &page).await?;
                    self.shown = index;
                }
                InputOutcome::Ended => return Ok(EndReason::Stopped),
            }
        }
    }

    fn page(&self, index: usize) -> Result<Page, DisplayError> {
        self.source
            .get_page(index)
            .ok_or(DisplayError::MissingPage(index))
    }
}
