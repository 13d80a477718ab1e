//! Core abbreviation types.

use std::fmt;

/// Which attribute a segment delimiter introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `#` delimiter
    Id,
    /// `.` delimiter
    Class,
}

impl AttributeKind {
    /// Attribute name as written in markup.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Class => "class",
        }
    }

    /// Delimiter character in abbreviation syntax.
    pub const fn delimiter(self) -> char {
        match self {
            Self::Id => '#',
            Self::Class => '.',
        }
    }
}

/// A single attribute attached to a segment.
///
/// The value is kept verbatim and may be empty (`div#` yields `id=""`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: String,
}

/// One `/`-delimited unit of an abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    element: String,
    attribute: Option<Attribute>,
}

impl Segment {
    /// Create a segment. Returns `None` if the element name is blank.
    pub fn new(element: &str, attribute: Option<Attribute>) -> Option<Self> {
        let element = element.trim();
        if element.is_empty() {
            return None;
        }
        Some(Self {
            element: element.to_string(),
            attribute,
        })
    }

    /// The element (tag) name, trimmed.
    pub fn element(&self) -> &str {
        &self.element
    }

    pub const fn attribute(&self) -> Option<&Attribute> {
        self.attribute.as_ref()
    }

    /// Write the opening tag, e.g. `<ul class="list">`.
    pub fn write_open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.element);
        if let Some(attr) = &self.attribute {
            out.push(' ');
            out.push_str(attr.kind.name());
            out.push_str("=\"");
            out.push_str(&attr.value);
            out.push('"');
        }
        out.push('>');
    }

    /// Write the closing tag, e.g. `</ul>`.
    pub fn write_close_tag(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.element);
        out.push('>');
    }
}

/// Renders the segment back in abbreviation syntax.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element)?;
        if let Some(attr) = &self.attribute {
            write!(f, "{}{}", attr.kind.delimiter(), attr.value)?;
        }
        Ok(())
    }
}

/// Ordered segments, outermost first.
///
/// The chain is linear: each segment is the only child of the one before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationChain {
    segments: Vec<Segment>,
}

impl AbbreviationChain {
    pub const fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Nesting depth of the expansion.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for AbbreviationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Expanded markup and where the caret belongs inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Nested markup to insert.
    pub markup: String,
    /// Char offset into `markup`: the start of the trailing closing-tag run.
    pub caret_offset: usize,
}

impl Expansion {
    /// Markup before and after the caret.
    pub fn split_at_caret(&self) -> (&str, &str) {
        let byte = self
            .markup
            .char_indices()
            .nth(self.caret_offset)
            .map_or(self.markup.len(), |(byte, _)| byte);
        self.markup.split_at(byte)
    }
}
