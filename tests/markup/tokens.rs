//! Token stream tests

use proptest::prelude::*;
use statline_foundation::ErrorKind;
use statline_markup::token::parse_int;
use statline_markup::{Document, TokenStream};

// =============================================================================
// Flattening
// =============================================================================

#[test]
fn tags_separate_tokens() {
    let stream = TokenStream::from_markup(
        "<tr><td>Current Hit Points:</td><td><b>1,200</b></td></tr>\n<tr><td>Maximum Hit Points:</td></tr>",
    );
    assert_eq!(
        stream.tokens(),
        &["Current Hit Points:", "1,200", "Maximum Hit Points:"]
    );
}

#[test]
fn entities_decode_and_whitespace_collapses() {
    let stream = TokenStream::from_markup("<td>20</td><td>&nbsp;(base:   15)</td><td>Fish &amp; Chips</td>");
    assert_eq!(stream.tokens(), &["20", "(base: 15)", "Fish & Chips"]);
}

#[test]
fn comments_and_quoted_brackets_are_not_text() {
    let stream = TokenStream::from_markup(
        r#"<!-- hidden <b>text</b> --><a title="a > b">Link</a>"#,
    );
    assert_eq!(stream.tokens(), &["Link"]);
}

#[test]
fn apostrophe_in_unquoted_attribute_stays_inside_the_tag() {
    let stream = TokenStream::from_markup("<td title=Seal's>Meat:</td><td>5</td>");
    assert_eq!(stream.tokens(), &["Meat:", "5"]);

    let stream = TokenStream::from_markup(
        "<td title=Tamer's>Meat:</td><td>5</td><td>Sign:</td><td>The Wombat's</td>",
    );
    assert_eq!(stream.tokens(), &["Meat:", "5", "Sign:", "The Wombat's"]);
}

// =============================================================================
// Seeking
// =============================================================================

#[test]
fn seek_then_read() {
    let doc = Document::parse("<td>Meat:</td><td>12,345</td><td>Ascensions:</td><td>3</td>");
    let mut tokens = doc.token_stream();
    tokens.seek("Asc").unwrap();
    assert_eq!(tokens.read_int().unwrap(), 3);
    assert!(tokens.is_exhausted());
}

#[test]
fn seek_considers_the_token_just_consumed() {
    let mut tokens = TokenStream::new(["Maximum HP:", "100", "Current MP:", "7"]);
    tokens.seek("Maximum").unwrap();
    tokens.read_int().unwrap();
    // the base probe consumes the next label
    assert_eq!(tokens.next_token().unwrap(), "Current MP:");
    assert_eq!(tokens.seek("Current").unwrap(), "Current MP:");
    assert_eq!(tokens.read_int().unwrap(), 7);
}

#[test]
fn missing_label_exhausts_stream() {
    let mut tokens = TokenStream::new(["Muscle:", "10"]);
    let err = tokens.seek("Moxie").unwrap_err();
    match err.kind {
        ErrorKind::MalformedDocument { label } => assert_eq!(label, "Moxie"),
        other => panic!("unexpected {other}"),
    }
    assert!(tokens.is_exhausted());
    assert!(tokens.next_token().is_err());
}

#[test]
fn optional_labels_leave_cursor_alone() {
    let mut tokens = TokenStream::new(["Class:", "Turtle Tamer", "Muscle:", "5"]);
    assert!(tokens.try_seek("Sign:").is_none());
    assert_eq!(tokens.position(), 0);

    let mut bounded = TokenStream::new(["Muscle:", "5", "Class:", "x"]);
    assert!(bounded.try_seek_before("Class:", "Mus").is_none());
    assert_eq!(bounded.position(), 0);

    assert_eq!(tokens.try_seek_before("Class:", "Mus"), Some("Class:"));
    assert_eq!(tokens.next_token().unwrap(), "Turtle Tamer");
}

#[test]
fn seek_any_reports_which_label() {
    let mut tokens = TokenStream::new(["Moxie:", "4", "Drunkenness:", "3", "Adventures:", "9"]);
    let found = tokens.seek_any(&["Temul", "Inebr", "Tipsi", "Drunk", "Adven"]).unwrap();
    assert_eq!(found, 3);
    assert_eq!(tokens.read_int().unwrap(), 3);
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn read_int_rejects_words() {
    let mut tokens = TokenStream::new(["lots"]);
    let err = tokens.read_int().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedNumber { ref token } if token == "lots"));
    assert_eq!(err.context.and_then(|c| c.position), Some(0));
}

#[test]
fn signs_and_separators() {
    assert_eq!(parse_int("+5").unwrap(), 5);
    assert_eq!(parse_int("-1,000").unwrap(), -1000);
    assert_eq!(parse_int(" 42 ").unwrap(), 42);
    assert!(parse_int("").is_err());
}

fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn grouped_numbers_parse(n in 0u64..1_000_000_000_000) {
        prop_assert_eq!(parse_int(&grouped(n)).unwrap(), i64::try_from(n).unwrap());
    }
}
