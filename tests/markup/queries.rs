//! Document tree and structural query tests

use statline_foundation::ErrorKind;
use statline_markup::{Document, DocumentView, NodeQuery};

const SKILL_TABLE: &str = r#"<html><body><table><tr><td>
    <a onclick="javascript:poop(&quot;desc_skill.php?whichskill=3&self=true&quot;)">Smash</a> (<b>P</b>)<br>
    <a onclick="javascript:poop(&quot;desc_skill.php?whichskill=5&self=true&quot;)">Bash</a><br>
    <a onclick="javascript:poop(&quot;desc_skill.php?whichskill=8&self=true&quot;)">Crash</a> (<b>HP</b>)<br>
    <a href="account.php">Options</a>
    <span id="permskills">
      <a onclick="javascript:poop(&quot;desc_skill.php?whichskill=9&self=true&quot;)">Locked</a> (<b>P</b>)
    </span>
</td></tr></table></body></html>"#;

fn skill_query() -> NodeQuery {
    NodeQuery::elements("a")
        .with_attribute_containing("onclick", "whichskill")
        .excluding_within_id("permskills")
        .with_following_sibling("b")
}

#[test]
fn markers_interleave_in_document_order() {
    let doc = Document::parse(SKILL_TABLE);
    let nodes = doc.select(&skill_query()).unwrap();
    let summary: Vec<_> = nodes
        .iter()
        .map(|n| (n.tag.as_str(), n.text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", "Smash"),
            ("b", "P"),
            ("a", "Bash"),
            ("a", "Crash"),
            ("b", "HP"),
        ]
    );
}

#[test]
fn attribute_values_are_decoded() {
    let doc = Document::parse(SKILL_TABLE);
    let nodes = doc.select(&skill_query()).unwrap();
    let onclick = nodes[0].attribute("ONCLICK").unwrap();
    assert!(onclick.contains("\"desc_skill.php?whichskill=3"));
}

#[test]
fn unclosed_markup_still_yields_a_tree() {
    let doc = Document::parse(
        "<table><tr><td><a onclick='whichskill=1'>One</a></span><td><a onclick='whichskill=2'>Two</a>",
    );
    let nodes = doc.select(&NodeQuery::elements("a")).unwrap();
    let texts: Vec<_> = nodes.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["One", "Two"]);
}

#[test]
fn script_bodies_are_not_markup() {
    let doc = Document::parse("<script>if (a < b) { x = '<a>'; }</script><a>real</a>");
    let nodes = doc.select(&NodeQuery::elements("a")).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].text, "real");
}

#[test]
fn invalid_queries_fail_structurally() {
    let doc = Document::parse(SKILL_TABLE);
    let bad_attribute = NodeQuery::elements("a").with_attribute_containing("", "x");
    let err = doc.select(&bad_attribute).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StructuralQuery(_)));

    let bad_sibling = NodeQuery::elements("a").with_following_sibling("");
    assert!(doc.select(&bad_sibling).is_err());
}

#[test]
fn raw_text_probes() {
    let doc = Document::parse(SKILL_TABLE);
    assert!(doc.contains("permskills"));
    assert!(!doc.contains("Hardcore"));
    assert_eq!(doc.raw(), SKILL_TABLE);
}
