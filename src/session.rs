//! Completion sessions.
//!
//! A session captures one trigger: it resolves the token before the cursor,
//! expands it, and offers the result as a completion set. The host then either
//! commits the selected completion into an [`InsertionSink`] or dismisses it.

use thiserror::Error;
use tracing::debug;

use crate::abbrev::{self, Expansion};
use crate::span::{self, TextSource, TokenSpan};

/// Moniker and display name of the completion set offered by a session.
pub const COMPLETION_SET_NAME: &str = "HTML";

/// Read access to the host document at trigger time.
pub trait DocumentView {
    type Text: TextSource + ?Sized;

    fn text(&self) -> &Self::Text;

    /// Cursor position as a char offset into [`Self::text`].
    fn cursor(&self) -> usize;
}

/// Receives a committed expansion.
pub trait InsertionSink {
    /// Replace `span` with `markup` and move the cursor to `caret_offset`
    /// chars past the start of the inserted text.
    fn replace_and_place_caret(
        &mut self,
        span: TokenSpan,
        markup: &str,
        caret_offset: usize,
    ) -> Result<(), EditError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("span {start}..{end} is outside the document ({len} chars)")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
    #[error("caret offset {caret} is outside the inserted text ({len} chars)")]
    CaretOutOfBounds { caret: usize, len: usize },
}

/// A single completion entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text shown in the completion list (the abbreviation itself).
    pub display_text: String,
    /// Markup inserted on commit.
    pub insertion_text: String,
    pub description: String,
    /// Char offset of the caret within `insertion_text`.
    pub caret_offset: usize,
}

impl Completion {
    fn from_expansion(token: &str, expansion: Expansion) -> Self {
        Self {
            display_text: token.to_string(),
            insertion_text: expansion.markup,
            description: token.to_string(),
            caret_offset: expansion.caret_offset,
        }
    }
}

/// Completions that apply to one span of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSet {
    pub moniker: &'static str,
    pub display_name: &'static str,
    pub span: TokenSpan,
    pub completions: Vec<Completion>,
}

impl CompletionSet {
    /// Build the set for the token before the cursor.
    ///
    /// The set is always produced; it is empty when there is no token or the
    /// token does not expand.
    pub fn for_cursor<T: TextSource + ?Sized>(text: &T, cursor: usize) -> Self {
        let _scope = crate::perf::scope("session.completion_set");
        let mut set = Self {
            moniker: COMPLETION_SET_NAME,
            display_name: COMPLETION_SET_NAME,
            span: span::token_span(text, cursor),
            completions: Vec::new(),
        };
        if let Some(token) = span::resolve_token(text, cursor) {
            crate::perf::log_event(
                "span.resolve",
                format!("start={} end={} text={:?}", token.span.start, token.span.end, token.text),
            );
            if let Some(expansion) = abbrev::expand(&token.text) {
                set.completions
                    .push(Completion::from_expansion(&token.text, expansion));
            }
        }
        set
    }

    /// The completion to commit, if any. There is at most one candidate.
    pub fn select_best_match(&self) -> Option<&Completion> {
        self.completions.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Committed,
    Dismissed,
}

/// One completion trigger, from start to commit or dismissal.
#[derive(Debug)]
pub struct CompletionSession {
    completion_set: CompletionSet,
    state: SessionState,
}

impl CompletionSession {
    /// Start a session at the view's cursor.
    pub fn start<V: DocumentView + ?Sized>(view: &V) -> Self {
        let completion_set = CompletionSet::for_cursor(view.text(), view.cursor());
        debug!(
            span = ?completion_set.span,
            completions = completion_set.completions.len(),
            "completion session started"
        );
        Self {
            completion_set,
            state: SessionState::Active,
        }
    }

    pub const fn completion_set(&self) -> &CompletionSet {
        &self.completion_set
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The completion that [`Self::commit`] would insert.
    pub fn selected(&self) -> Option<&Completion> {
        if self.state != SessionState::Active {
            return None;
        }
        self.completion_set.select_best_match()
    }

    /// Insert the selected completion into `sink`.
    ///
    /// Returns `Ok(false)` and dismisses the session when nothing is selected.
    /// On a sink error the session stays active so the host may retry.
    pub fn commit<S: InsertionSink + ?Sized>(&mut self, sink: &mut S) -> Result<bool, EditError> {
        let Some(completion) = self.selected() else {
            self.dismiss();
            return Ok(false);
        };
        sink.replace_and_place_caret(
            self.completion_set.span,
            &completion.insertion_text,
            completion.caret_offset,
        )?;
        crate::perf::log_event(
            "session.commit",
            format!(
                "span={:?} markup={:?} caret={}",
                self.completion_set.span, completion.insertion_text, completion.caret_offset
            ),
        );
        self.state = SessionState::Committed;
        debug!("completion session committed");
        Ok(true)
    }

    /// End the session without inserting anything.
    pub fn dismiss(&mut self) {
        if self.state == SessionState::Active {
            self.state = SessionState::Dismissed;
            debug!("completion session dismissed");
        }
    }
}
