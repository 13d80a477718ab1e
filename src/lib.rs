// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. abbrev::AbbreviationChain)
    clippy::module_name_repetitions
)]

//! # Quicktag
//!
//! Markup abbreviation expansion for text editors.
//!
//! Type a compact abbreviation such as `ul.list/li`, press the trigger key,
//! and it is replaced by nested markup with the cursor placed inside the
//! innermost element:
//!
//! ```text
//! ul.list/li   =>   <ul class="list"><li>|</li></ul>
//! ```
//!
//! ## Architecture
//!
//! Each trigger runs one pure cycle:
//! - **Resolve**: find the token before the cursor ([`span`])
//! - **Expand**: parse the token into a chain and build markup ([`abbrev`])
//! - **Commit**: hand the result to the host ([`session`], [`trigger`])
//!
//! The host is modelled by two traits, [`session::DocumentView`] and
//! [`session::InsertionSink`]; [`editor::EditorBuffer`] implements both.
//!
//! ## Modules
//!
//! - [`span`]: Token span resolution
//! - [`abbrev`]: Abbreviation parsing and expansion
//! - [`session`]: Completion sets and sessions
//! - [`trigger`]: Trigger-key handling
//! - [`editor`]: Rope-backed reference host
//! - [`config`]: Persisted default flags
//! - [`perf`]: Timing and debug event log

pub mod abbrev;
pub mod config;
pub mod editor;
pub mod perf;
pub mod session;
pub mod span;
pub mod trigger;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::abbrev::{expand, Expansion};
    pub use crate::editor::EditorBuffer;
    pub use crate::session::{CompletionSession, DocumentView, EditError, InsertionSink};
    pub use crate::span::{resolve_token, Token, TokenSpan};
    pub use crate::trigger::{KeyOutcome, TriggerHandler};
}
