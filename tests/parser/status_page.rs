//! Status page parsing tests

use statline_foundation::{ErrorKind, Stat};
use statline_parser::{
    ConsumptionRestriction, ParseContext, Pool, ResourceMode, StatValue, StatusSnapshotParser,
};

use crate::{SHEET, formula, skills};

fn parse(raw: &str, context: &ParseContext) -> statline_foundation::Result<statline_parser::StatusParse> {
    let skills = skills();
    StatusSnapshotParser::new(context, &skills, &formula).parse_raw(raw)
}

/// The smallest page that carries every required label.
fn minimal(mana: &str) -> String {
    format!(
        "<b>Min</b> (#7)<br>Turtle Tamer<table>\
         <tr><td>Current HP:</td><td>50</td></tr>\
         <tr><td>Maximum HP:</td><td>100</td></tr>\
         {mana}\
         <tr><td>Muscle:</td><td>20</td><td>(base: 15)</td><td>(3)</td></tr>\
         <tr><td>Mysticality:</td><td>1</td><td>(0)</td></tr>\
         <tr><td>Moxie:</td><td>1</td><td>(0)</td></tr>\
         <tr><td>Adventures remaining:</td><td>0</td></tr>\
         <tr><td>Meat:</td><td>0</td></tr>\
         <tr><td>Turns played:</td><td>0</td></tr>\
         <tr><td>Days played:</td><td>1</td></tr></table>"
    )
}

const MANA: &str = "<tr><td>Current MP:</td><td>5</td></tr><tr><td>Maximum MP:</td><td>5</td></tr>";

// =============================================================================
// Captured sheet
// =============================================================================

#[test]
fn captured_sheet_parses_completely() {
    let parsed = parse(SHEET, &ParseContext::default()).unwrap();
    let sheet = parsed.snapshot;

    assert_eq!(sheet.avatar.as_deref(), Some("otherimages/classav1a.gif"));
    assert_eq!(sheet.user_id, 1_234_567);
    assert_eq!(sheet.level, Some(14));
    assert_eq!(sheet.class_name, "Seal Clubber");

    assert_eq!(sheet.hp, Pool::new(180, 210, 190));
    assert_eq!(sheet.mana, Pool::new(40, 45, 45));
    assert_eq!(sheet.muscle, StatValue::new(150, 121, formula(121, 14)));
    assert_eq!(sheet.mysticality, StatValue::new(95, 95, formula(95, 37)));
    assert_eq!(sheet.moxie, StatValue::new(88, 80, formula(80, 5)));

    assert_eq!(sheet.inebriety, 7);
    assert_eq!(sheet.adventures, 42);
    assert_eq!(sheet.meat, 1_234_567);
    assert_eq!(sheet.ascensions, 12);
    assert_eq!(sheet.turns_this_run, 1234);
    assert_eq!(sheet.days_this_run, 9);
    assert_eq!(sheet.sign.as_deref(), Some("Wallaby"));

    assert!(!sheet.path_restricted);
    assert_eq!(sheet.consumption, ConsumptionRestriction::None);
    assert!(!sheet.hardcore);
    assert!(!sheet.ronin);
    assert!(sheet.has_store);
    assert!(sheet.has_display_case);

    assert_eq!(sheet.base_stats().get(Stat::Moxie), 80);
    assert!(parsed.anomalies.is_empty());
}

#[test]
fn minimal_sheet_matches_known_values() {
    let sheet = parse(&minimal(MANA), &ParseContext::default()).unwrap().snapshot;
    assert_eq!(sheet.hp, Pool::new(50, 100, 100));
    assert_eq!(sheet.muscle, StatValue::new(20, 15, formula(15, 3)));
    assert_eq!(sheet.class_name, "Turtle Tamer");
    assert_eq!(sheet.level, None);
    assert_eq!(sheet.avatar, None);
    assert_eq!(sheet.sign, None);
    assert_eq!(sheet.ascensions, 0);
}

// =============================================================================
// Game modes
// =============================================================================

#[test]
fn no_mana_mode_needs_no_mana_block() {
    let context = ParseContext::new(ResourceMode::NoMana);
    let sheet = parse(&minimal(""), &context).unwrap().snapshot;
    assert_eq!(sheet.mana, Pool::default());
    assert_eq!(sheet.muscle.base, 15);
}

#[test]
fn zombie_horde_is_one_number() {
    let horde = "<tr><td>Zombie Horde:</td><td>1,066</td></tr>";
    let context = ParseContext::new(ResourceMode::ZombieHorde);
    let sheet = parse(&minimal(horde), &context).unwrap().snapshot;
    assert_eq!(sheet.mana, Pool::new(1066, 1066, 1066));
}

#[test]
fn mana_mode_without_mana_block_fails() {
    let err = parse(&minimal(""), &ParseContext::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedDocument { .. }));
}

// =============================================================================
// Run counters
// =============================================================================

#[test]
fn missing_this_run_turns_row_is_fatal() {
    let raw = SHEET.replace("Turns played (this run):", "Turns played:");
    assert!(raw.contains("(this run)"));

    let err = parse(&raw, &ParseContext::default()).unwrap_err();
    match &err.kind {
        ErrorKind::MalformedDocument { label } => assert!(label.contains("(this run)")),
        other => panic!("unexpected {other}"),
    }
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("charsheet"));
    assert_eq!(context.stack, vec!["turns".to_string()]);
}

#[test]
fn without_run_marker_first_counter_counts() {
    let raw = SHEET
        .replace("Turns played (total):", "Turns played:")
        .replace("Turns played (this run):", "Turns this ascension:")
        .replace("Days played (total):", "Days played:")
        .replace("Days played (this run):", "Days this ascension:");
    let sheet = parse(&raw, &ParseContext::default()).unwrap().snapshot;
    assert_eq!(sheet.turns_this_run, 50_000);
    assert_eq!(sheet.days_this_run, 1_000);
}

// =============================================================================
// Optional sections and flags
// =============================================================================

#[test]
fn sober_character_skips_inebriety() {
    let raw = SHEET.replace("<tr><td align=right>Inebriety:</td><td><b>7</b></td></tr>", "");
    let sheet = parse(&raw, &ParseContext::default()).unwrap().snapshot;
    assert_eq!(sheet.inebriety, 0);
    assert_eq!(sheet.adventures, 42);
}

#[test]
fn drunkenness_labels_vary() {
    for label in ["Temulency:", "Tipsiness:", "Drunkenness:"] {
        let raw = SHEET.replace("Inebriety:", label);
        let sheet = parse(&raw, &ParseContext::default()).unwrap().snapshot;
        assert_eq!(sheet.inebriety, 7, "{label}");
    }
}

#[test]
fn class_label_after_stats_is_ignored() {
    let raw = SHEET
        .replace("<tr><td align=right>Class:</td><td><b>Seal Clubber</b></td></tr>", "")
        .replace("</table>\n<p>You have", "<tr><td>Class:</td><td>Pastamancer</td></tr></table>\n<p>You have");
    let sheet = parse(&raw, &ParseContext::default()).unwrap().snapshot;
    assert_eq!(sheet.class_name, "Lord of the Seals");
}

#[test]
fn restriction_flags_come_from_raw_text() {
    let raw = SHEET.replace(
        "<p>You have a store",
        "<p>You are in Hardcore mode.<br>You may not receive items from other players.<br>\
         <a href=\"standard.php\">Standard</a><br>\
         You may not consume any alcohol.<br>You may not eat or drink anything.<br>You have a store",
    );
    let sheet = parse(&raw, &ParseContext::default()).unwrap().snapshot;
    assert!(sheet.hardcore);
    assert!(sheet.ronin);
    assert!(!sheet.can_interact());
    assert!(sheet.path_restricted);
    // the stricter marker wins regardless of page order
    assert_eq!(sheet.consumption, ConsumptionRestriction::NoFoodOrDrink);
}

#[test]
fn unreadable_meat_names_the_field() {
    let raw = SHEET.replace("<b>1,234,567</b>", "<b>a lot</b>");
    let err = parse(&raw, &ParseContext::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedNumber { ref token } if token == "a lot"));
    assert_eq!(err.context.unwrap().stack, vec!["meat".to_string()]);
}

#[test]
fn truncated_page_fails_without_partial_result() {
    let cut = SHEET.find("Adventures remaining").unwrap();
    let err = parse(&SHEET[..cut], &ParseContext::default()).unwrap_err();
    assert!(err.is_parse_failure());
}

#[test]
fn apostrophes_in_unquoted_attributes_do_not_hide_labels() {
    let raw = SHEET.replace(
        "<tr><td align=right>Meat:</td>",
        "<tr><td align=right title=Tamer's>Meat:</td>",
    );
    let sheet = parse(&raw, &ParseContext::default()).unwrap().snapshot;
    let expected = parse(SHEET, &ParseContext::default()).unwrap().snapshot;
    assert_eq!(sheet.meat, 1_234_567);
    assert_eq!(sheet, expected);
}
