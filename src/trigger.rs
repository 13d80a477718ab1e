//! Key filter that turns the trigger key into an expansion.
//!
//! The handler sits in the host's key dispatch chain. On the trigger key it
//! starts a completion session and commits it when there is something to
//! insert; every other key, and a trigger with nothing to expand, is passed
//! through to the next handler.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::config::TriggerKey;
use crate::session::{CompletionSession, DocumentView, EditError, InsertionSink};

/// What the host should do with a key after the handler has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was consumed by an expansion.
    Handled,
    /// Forward the key to the next handler.
    PassThrough,
}

impl TriggerKey {
    /// Whether `key` is a press of this trigger.
    pub fn matches(self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self {
            Self::Tab => key.code == KeyCode::Tab && key.modifiers.is_empty(),
            Self::Enter => key.code == KeyCode::Enter && key.modifiers.is_empty(),
            Self::CtrlSpace => {
                key.code == KeyCode::Char(' ') && key.modifiers == KeyModifiers::CONTROL
            }
        }
    }

    /// A key event that fires this trigger.
    pub fn key_event(self) -> KeyEvent {
        match self {
            Self::Tab => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            Self::Enter => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Self::CtrlSpace => KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerHandler {
    trigger: TriggerKey,
}

impl TriggerHandler {
    pub const fn new(trigger: TriggerKey) -> Self {
        Self { trigger }
    }

    pub const fn trigger(&self) -> TriggerKey {
        self.trigger
    }

    /// Handle one key event against `host`.
    ///
    /// Sink errors are returned as-is; the document is left untouched.
    pub fn handle_key<H>(&self, key: &KeyEvent, host: &mut H) -> Result<KeyOutcome, EditError>
    where
        H: DocumentView + InsertionSink + ?Sized,
    {
        if !self.trigger.matches(key) {
            return Ok(KeyOutcome::PassThrough);
        }

        let mut session = CompletionSession::start(&*host);
        if session.commit(host)? {
            Ok(KeyOutcome::Handled)
        } else {
            trace!(?key, "nothing to expand, passing trigger through");
            Ok(KeyOutcome::PassThrough)
        }
    }
}

impl Default for TriggerHandler {
    fn default() -> Self {
        Self::new(TriggerKey::default())
    }
}
