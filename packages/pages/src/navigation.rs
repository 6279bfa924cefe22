// ABOUTME: Navigation controls and the page navigation state machine
// ABOUTME: Decides which controls a page set gets and who may press them

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tagkeep_core::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    First,
    Previous,
    Next,
    Last,
    Stop,
}

impl NavigationAction {
    /// Controls offered for a page set of `page_count` pages, in display order.
    ///
    /// A single page gets no controls; two pages skip the first/last jumps.
    pub fn controls_for(page_count: usize) -> Vec<NavigationAction> {
        match page_count {
            0 | 1 => Vec::new(),
            2 => vec![Self::Previous, Self::Next, Self::Stop],
            _ => vec![
                Self::First,
                Self::Previous,
                Self::Next,
                Self::Last,
                Self::Stop,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Last => "last",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    Action(NavigationAction),
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Active { page: usize },
    Ended,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::Active { page: 0 }
    }

    /// Apply an event to the state.
    ///
    /// Moves that would leave the page range keep the current page. Once
    /// ended, the state never changes again.
    pub fn apply(self, event: NavigationEvent, page_count: usize) -> Self {
        let page = match self {
            Self::Active { page } => page,
            Self::Ended => return Self::Ended,
        };
        let last = page_count.saturating_sub(1);

        let action = match event {
            NavigationEvent::Timeout => return Self::Ended,
            NavigationEvent::Action(action) => action,
        };

        let page = match action {
            NavigationAction::Stop => return Self::Ended,
            NavigationAction::First => 0,
            NavigationAction::Previous => page.saturating_sub(1),
            NavigationAction::Next if page < last => page + 1,
            NavigationAction::Next => page,
            NavigationAction::Last => last,
        };

        Self::Active { page }
    }

    pub fn current_page(&self) -> Option<usize> {
        match self {
            Self::Active { page } => Some(*page),
            Self::Ended => None,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// Who may operate a navigation session: the invoker, anyone the invoking
/// message mentioned, and the bot owners.
#[derive(Debug, Clone, Default)]
pub struct NavigationPolicy {
    allowed: HashSet<ActorId>,
}

impl NavigationPolicy {
    pub fn new(
        invoker: ActorId,
        mentioned: impl IntoIterator<Item = ActorId>,
        owners: impl IntoIterator<Item = ActorId>,
    ) -> Self {
        let mut allowed: HashSet<ActorId> = mentioned.into_iter().collect();
        allowed.extend(owners);
        allowed.insert(invoker);
        Self { allowed }
    }

    pub fn may_navigate(&self, actor: &ActorId) -> bool {
        self.allowed.contains(actor)
    }
}
