//! Reference editor host.
//!
//! Provides a rope-backed text buffer with cursor management that serves as
//! both the document view and the insertion sink for completion sessions.

mod buffer;

pub use buffer::{Cursor, EditorBuffer};
