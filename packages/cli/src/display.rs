// ABOUTME: Terminal rendering of tag pages
// ABOUTME: Prints pages to a writer and reads navigation controls typed on stdin

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use tagkeep_core::ActorId;
use tagkeep_pages::{
    DisplayError, MessageRef, NavigationAction, NavigationInput, Page, PageDisplay,
};
use tokio::sync::mpsc;
use tracing::debug;

/// Shows pages on a terminal. Each sent page counts as one message.
pub struct TerminalDisplay<W: Write + Send> {
    out: Mutex<W>,
    next_message: AtomicUsize,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            next_message: AtomicUsize::new(1),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self, text: &str) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("terminal writer poisoned"))?;
        writeln!(out, "{}", text)?;
        out.flush()
    }
}

#[async_trait]
impl<W: Write + Send> PageDisplay for TerminalDisplay<W> {
    async fn send_page(&self, page: &Page) -> Result<MessageRef, DisplayError> {
        let id = self.next_message.fetch_add(1, Ordering::Relaxed);
        self.write(&render_page(page))
            .map_err(|e| DisplayError::Send(e.to_string()))?;
        Ok(MessageRef::new(id.to_string()))
    }

    async fn edit_page(&self, message: &MessageRef, page: &Page) -> Result<(), DisplayError> {
        debug!("Redrawing message {}", message.0);
        self.write(&render_page(page))
            .map_err(|e| DisplayError::Edit(e.to_string()))
    }

    async fn add_controls(
        &self,
        _message: &MessageRef,
        controls: &[NavigationAction],
    ) -> Result<(), DisplayError> {
        self.write(&render_controls(controls).dimmed().to_string())
            .map_err(|e| DisplayError::Controls(e.to_string()))
    }

    async fn clear_controls(&self, _message: &MessageRef) -> Result<(), DisplayError> {
        self.write(&"Navigation ended.".dimmed().to_string())
            .map_err(|e| DisplayError::Controls(e.to_string()))
    }
}

/// Plain-text rendering of a page
pub fn render_page(page: &Page) -> String {
    let mut lines = Vec::new();

    if let Some(title) = &page.title {
        lines.push(title.bold().to_string());
    }
    if let Some(url) = &page.url {
        lines.push(url.blue().underline().to_string());
    }
    if let Some(description) = &page.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    if let Some(image) = &page.image_url {
        lines.push(format!("{} {}", "Image:".dimmed(), image));
    }

    if !page.fields.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        for field in &page.fields {
            table.add_row(vec![field.name.clone(), field.value.clone()]);
        }
        lines.push(table.to_string());
    }

    lines.join("\n")
}

pub fn render_controls(controls: &[NavigationAction]) -> String {
    controls
        .iter()
        .map(|action| format!("[{}]{}", control_key(*action), &action.as_str()[1..]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn control_key(action: NavigationAction) -> char {
    match action {
        NavigationAction::First => 'f',
        NavigationAction::Previous => 'p',
        NavigationAction::Next => 'n',
        NavigationAction::Last => 'l',
        NavigationAction::Stop => 's',
    }
}

/// Map a typed line to a control: its first letter or its full name
pub fn parse_control(line: &str) -> Option<NavigationAction> {
    let line = line.trim().to_lowercase();

    [
        NavigationAction::First,
        NavigationAction::Previous,
        NavigationAction::Next,
        NavigationAction::Last,
        NavigationAction::Stop,
    ]
    .into_iter()
    .find(|action| line == action.as_str() || line == control_key(*action).to_string())
}

/// Feed controls typed on stdin into a navigation session as `actor`.
///
/// Reading happens on a plain thread so a pending read never holds up exit.
/// The channel closes when stdin does.
pub fn spawn_stdin_controls(actor: ActorId) -> mpsc::Receiver<NavigationInput> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };

            let Some(action) = parse_control(&line) else {
                continue;
            };
            let input = NavigationInput::new(actor.clone(), action);
            if tx.blocking_send(input).is_err() {
                break;
            }
        }
    });

    rx
}
