//! Abbreviation parsing.

use super::types::{AbbreviationChain, Attribute, AttributeKind, Segment};

/// Separates parent and child segments.
pub const CHILD_SEPARATOR: char = '/';

/// Parse an abbreviation into a chain of segments.
///
/// Entries with a blank element name are dropped, so `a//b/` parses the same
/// as `a/b`.
pub fn parse_chain(text: &str) -> AbbreviationChain {
    let segments = text
        .split(CHILD_SEPARATOR)
        .filter_map(parse_segment)
        .collect();
    AbbreviationChain::new(segments)
}

/// Parse one entry. `#` wins over `.` regardless of position, and only the
/// first occurrence splits: `div#a#b` is element `div` with id `a#b`.
pub fn parse_segment(entry: &str) -> Option<Segment> {
    let kind = if entry.contains(AttributeKind::Id.delimiter()) {
        Some(AttributeKind::Id)
    } else if entry.contains(AttributeKind::Class.delimiter()) {
        Some(AttributeKind::Class)
    } else {
        None
    };

    match kind.and_then(|kind| entry.split_once(kind.delimiter()).map(|split| (kind, split))) {
        Some((kind, (element, value))) => Segment::new(
            element,
            Some(Attribute {
                kind,
                value: value.to_string(),
            }),
        ),
        None => Segment::new(entry, None),
    }
}
