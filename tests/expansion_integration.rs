use quicktag::abbrev::expand;
use quicktag::editor::EditorBuffer;
use quicktag::session::{CompletionSession, DocumentView, SessionState};
use quicktag::span::{resolve_token, TokenSpan};
use quicktag::trigger::{KeyOutcome, TriggerHandler};

/// Type `text` into a fresh buffer, press the trigger, and return the buffer.
fn type_and_trigger(text: &str) -> (EditorBuffer, KeyOutcome) {
    let mut buf = EditorBuffer::empty();
    buf.insert_str(text);
    let handler = TriggerHandler::default();
    let outcome = handler
        .handle_key(&handler.trigger().key_event(), &mut buf)
        .unwrap();
    (buf, outcome)
}

fn text_around_cursor(buf: &EditorBuffer) -> (String, String) {
    let text = buf.text();
    let split = text
        .char_indices()
        .nth(buf.cursor_offset())
        .map_or(text.len(), |(byte, _)| byte);
    (text[..split].to_string(), text[split..].to_string())
}

#[test]
fn test_div_with_id() {
    let (buf, outcome) = type_and_trigger("div#main");
    assert_eq!(outcome, KeyOutcome::Handled);
    let (before, after) = text_around_cursor(&buf);
    assert_eq!(before, r#"<div id="main">"#);
    assert_eq!(after, "</div>");
}

#[test]
fn test_list_with_class() {
    let (buf, _) = type_and_trigger("ul.list/li");
    let (before, after) = text_around_cursor(&buf);
    assert_eq!(before, r#"<ul class="list"><li>"#);
    assert_eq!(after, "</li></ul>");
}

#[test]
fn test_three_plain_levels() {
    let (buf, _) = type_and_trigger("a/b/c");
    assert_eq!(buf.text(), "<a><b><c></c></b></a>");
    let (_, after) = text_around_cursor(&buf);
    assert_eq!(after, "</c></b></a>");
}

#[test]
fn test_empty_class_value() {
    let (buf, outcome) = type_and_trigger("span.");
    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(buf.text(), r#"<span class=""></span>"#);
}

#[test]
fn test_whitespace_only_offers_nothing() {
    assert_eq!(resolve_token("   ", 3), None);
    let (buf, outcome) = type_and_trigger("   ");
    assert_eq!(outcome, KeyOutcome::PassThrough);
    assert_eq!(buf.text(), "   ");
}

#[test]
fn test_cursor_at_document_start_is_empty() {
    assert_eq!(resolve_token("div#main", 0), None);
}

#[test]
fn test_separator_and_empty_tokens_do_not_expand() {
    assert_eq!(expand("/"), None);
    assert_eq!(expand(""), None);
    let (buf, outcome) = type_and_trigger("text /");
    assert_eq!(outcome, KeyOutcome::PassThrough);
    assert_eq!(buf.text(), "text /");
}

#[test]
fn test_expansion_mid_document_keeps_surrounding_text() {
    let mut buf = EditorBuffer::from_text("<body>\n  section.hero/h1\n</body>\n");
    buf.move_to(1, 17);
    let handler = TriggerHandler::default();
    let outcome = handler
        .handle_key(&handler.trigger().key_event(), &mut buf)
        .unwrap();
    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(
        buf.line_at(1),
        Some(r#"  <section class="hero"><h1></h1></section>"#.to_string())
    );
    assert_eq!(buf.line_at(2), Some("</body>".to_string()));
    let (before, after) = text_around_cursor(&buf);
    assert!(before.ends_with("<h1>"));
    assert!(after.starts_with("</h1></section>\n</body>"));
}

#[test]
fn test_session_exposes_completion_before_commit() {
    let mut buf = EditorBuffer::from_text("nav#top/ul");
    buf.move_to_offset(10);
    let mut session = CompletionSession::start(&buf);
    assert_eq!(DocumentView::cursor(&buf), 10);
    let set = session.completion_set();
    assert_eq!(set.span, TokenSpan::new(0, 10));
    let completion = session.selected().unwrap();
    assert_eq!(completion.display_text, "nav#top/ul");
    assert_eq!(
        completion.insertion_text,
        r#"<nav id="top"><ul></ul></nav>"#
    );

    assert_eq!(session.commit(&mut buf), Ok(true));
    assert_eq!(session.state(), SessionState::Committed);
    assert_eq!(buf.text(), r#"<nav id="top"><ul></ul></nav>"#);
}

#[test]
fn test_stale_span_is_reported() {
    let mut buf = EditorBuffer::from_text("p.note");
    buf.move_to_offset(6);
    let mut session = CompletionSession::start(&buf);

    let mut edited = EditorBuffer::from_text("p");
    assert!(session.commit(&mut edited).is_err());
    assert_eq!(edited.text(), "p");
    assert_eq!(session.state(), SessionState::Active);
}
