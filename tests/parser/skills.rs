//! Skill extraction tests against the captured sheet

use statline_foundation::{SkillCatalog, SkillId};
use statline_markup::Document;
use statline_parser::{Anomaly, ParseContext, SkillSetExtractor, StatusSnapshotParser};

use crate::{SHEET, formula, skills};

fn ids(names: &[&str]) -> Vec<SkillId> {
    let catalog = skills();
    names
        .iter()
        .map(|name| catalog.skill_id(name).unwrap())
        .collect()
}

#[test]
fn sheet_skills_in_page_order() {
    let catalog = skills();
    let context = ParseContext::default();
    let parsed = StatusSnapshotParser::new(&context, &catalog, &formula)
        .parse_raw(SHEET)
        .unwrap();
    let skills = parsed.snapshot.skills;

    let available: Vec<_> = skills.available.iter().copied().collect();
    assert_eq!(
        available,
        ids(&[
            "Seal Clubbing Frenzy",
            "Patience of the Tortoise",
            "Lunge Smack",
            "Transcendent Olfaction",
            "Summon Candy Heart",
            "Moxie of the Mariachi",
        ])
    );
    let permed: Vec<_> = skills.permed.iter().copied().collect();
    assert_eq!(
        permed,
        ids(&["Seal Clubbing Frenzy", "Patience of the Tortoise", "Transcendent Olfaction"])
    );
}

#[test]
fn locked_skills_are_not_listed() {
    let catalog = skills();
    let context = ParseContext::default();
    let out = SkillSetExtractor::new(&catalog, &context)
        .extract(&Document::parse(SHEET), "Seal Clubber")
        .unwrap();
    let noodles = catalog.skill_id("Entangling Noodles").unwrap();
    assert!(!out.skills.has(noodles));
    assert!(!out.skills.is_permed(noodles));
}

#[test]
fn display_text_resolves_links_without_an_id() {
    let catalog = skills();
    let context = ParseContext::default();
    let out = SkillSetExtractor::new(&catalog, &context)
        .extract(&Document::parse(SHEET), "Seal Clubber")
        .unwrap();
    assert!(out.skills.has(SkillId(6)));
    assert!(out.anomalies.is_empty());
}

#[test]
fn bad_moon_hides_bookshelf_and_olfaction() {
    let catalog = skills();
    let context = ParseContext::default().with_restrictions(true, false);
    let out = SkillSetExtractor::new(&catalog, &context)
        .extract(&Document::parse(SHEET), "Seal Clubber")
        .unwrap();

    assert!(!out.skills.has(SkillId::OLFACTION));
    assert!(!out.skills.has(SkillId(8201)));
    assert!(out.skills.has(SkillId(1006)));
    // the (P) after Olfaction has no included skill to attach to
    assert_eq!(out.anomalies, vec![Anomaly::StrayMarker("P".into())]);

    let lifted = context.with_king_liberated(true);
    let out = SkillSetExtractor::new(&catalog, &lifted)
        .extract(&Document::parse(SHEET), "Seal Clubber")
        .unwrap();
    assert!(out.skills.has(SkillId(8201)));
    assert!(!out.skills.has(SkillId::OLFACTION));
}

#[test]
fn implied_skills_append_after_listed_ones() {
    let catalog = skills();
    let context = ParseContext::default()
        .with_golden_mr_accessories(2)
        .with_can_seek_birds(true);
    let out = SkillSetExtractor::new(&catalog, &context)
        .extract(&Document::parse(SHEET), "Seal Clubber")
        .unwrap();

    let available: Vec<_> = out.skills.available.iter().copied().collect();
    let tail = &available[available.len() - 2..];
    assert_eq!(tail, ids(&["The Smile of Mr. A.", "Seek out a Bird"]).as_slice());
    assert!(!out.skills.is_permed(tail[0]));
}

#[test]
fn cowrruption_needs_effect_and_class() {
    let catalog = skills();
    let cowrruption = catalog.skill_id("Absorb Cowrruption").unwrap();
    let context = ParseContext::default().with_effect("Cowrruption");

    let extractor = SkillSetExtractor::new(&catalog, &context);
    let doc = Document::parse(SHEET);
    assert!(extractor.extract(&doc, "cow puncher").unwrap().skills.has(cowrruption));
    assert!(!extractor.extract(&doc, "Seal Clubber").unwrap().skills.has(cowrruption));

    let plain = ParseContext::default();
    let out = SkillSetExtractor::new(&catalog, &plain)
        .extract(&doc, "Cow Puncher")
        .unwrap();
    assert!(!out.skills.has(cowrruption));
}
