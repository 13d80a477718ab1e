//! Markup abbreviation parsing and expansion.
//!
//! An abbreviation is a `/`-separated chain of segments, each an element name
//! with at most one `#id` or `.class` attribute:
//!
//! ```
//! let expansion = quicktag::abbrev::expand("ul.list/li").unwrap();
//! assert_eq!(expansion.markup, r#"<ul class="list"><li></li></ul>"#);
//! assert_eq!(&expansion.markup[expansion.caret_offset..], "</li></ul>");
//! ```

mod expand;
mod parser;
mod types;

pub use expand::{expand, expand_chain};
pub use parser::{parse_chain, parse_segment, CHILD_SEPARATOR};
pub use types::{AbbreviationChain, Attribute, AttributeKind, Expansion, Segment};
