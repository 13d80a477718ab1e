//! Expanding a chain into nested markup.

use super::parser::parse_chain;
use super::types::{AbbreviationChain, Expansion};

/// Parse and expand an abbreviation.
///
/// Returns `None` when no element survives parsing (`""`, `"/"`, `"#x"`).
pub fn expand(text: &str) -> Option<Expansion> {
    let _scope = crate::perf::scope("abbrev.expand");
    let chain = parse_chain(text);
    let expansion = expand_chain(&chain);
    crate::perf::log_event(
        "abbrev.expand",
        format!(
            "token={text:?} depth={} produced={}",
            chain.depth(),
            expansion.is_some()
        ),
    );
    expansion
}

/// Expand an already parsed chain.
///
/// Builds from the innermost segment outward, wrapping the accumulated markup
/// at each level. The caret lands where the innermost element's content goes.
pub fn expand_chain(chain: &AbbreviationChain) -> Option<Expansion> {
    if chain.is_empty() {
        return None;
    }

    let mut markup = String::new();
    let mut caret_offset = 0;
    for segment in chain.segments().iter().rev() {
        let mut wrapped = String::new();
        segment.write_open_tag(&mut wrapped);
        caret_offset += wrapped.chars().count();
        wrapped.push_str(&markup);
        segment.write_close_tag(&mut wrapped);
        markup = wrapped;
    }

    Some(Expansion {
        markup,
        caret_offset,
    })
}
