//! Parse-then-commit tests

use statline_foundation::{ErrorKind, Stat};
use statline_markup::Document;
use statline_parser::{
    CharacterStatusSnapshot, ParseContext, StatValue, StatusJson, StatusSnapshotParser,
    StatusStore, commit_status_json, parse_and_commit,
};

use crate::{SHEET, formula, skills};

#[derive(Default)]
struct Store {
    status: CharacterStatusSnapshot,
    commits: usize,
}

impl StatusStore for Store {
    fn adventures(&self) -> i64 {
        self.status.adventures
    }

    fn commit(&mut self, snapshot: CharacterStatusSnapshot) {
        self.status = snapshot;
        self.commits += 1;
    }

    fn commit_stat_values(&mut self, stats: &StatusJson) {
        let (value, base) = stats.stat(Stat::Muscle);
        self.status.muscle = StatValue::new(value, base, self.status.muscle.subpoints);
        let (value, base) = stats.stat(Stat::Mysticality);
        self.status.mysticality = StatValue::new(value, base, self.status.mysticality.subpoints);
        let (value, base) = stats.stat(Stat::Moxie);
        self.status.moxie = StatValue::new(value, base, self.status.moxie.subpoints);
    }
}

#[test]
fn second_sheet_reports_adventures_spent() {
    let catalog = skills();
    let context = ParseContext::default();
    let parser = StatusSnapshotParser::new(&context, &catalog, &formula);

    let mut store = Store::default();
    let mut deltas = Vec::new();
    let first = parse_and_commit(&parser, &Document::parse(SHEET), &mut store, &mut |d: i64| {
        deltas.push(d);
    })
    .unwrap();
    assert_eq!(first.adventures_delta, 42);

    let later = SHEET.replace("<b>42</b>", "<b>30</b>");
    let second = parse_and_commit(&parser, &Document::parse(later), &mut store, &mut |d: i64| {
        deltas.push(d);
    })
    .unwrap();
    assert_eq!(second.adventures_delta, -12);
    assert_eq!(deltas, vec![42, -12]);
    assert_eq!(store.commits, 2);
}

#[test]
fn failed_sheet_keeps_previous_state() {
    let catalog = skills();
    let context = ParseContext::default();
    let parser = StatusSnapshotParser::new(&context, &catalog, &formula);

    let mut store = Store::default();
    let mut ignore = |_: i64| {};
    parse_and_commit(&parser, &Document::parse(SHEET), &mut store, &mut ignore).unwrap();
    let before = store.status.clone();

    let broken = SHEET.replace("Meat:", "Money:");
    assert!(parse_and_commit(&parser, &Document::parse(broken), &mut store, &mut ignore).is_err());
    assert_eq!(store.status, before);
    assert_eq!(store.commits, 1);
}

#[test]
fn json_updates_value_and_base_only() {
    let catalog = skills();
    let context = ParseContext::default();
    let parser = StatusSnapshotParser::new(&context, &catalog, &formula);
    let mut store = Store::default();
    parse_and_commit(&parser, &Document::parse(SHEET), &mut store, &mut |_: i64| {}).unwrap();

    let json = r#"{"playerid": "1234567", "muscle": "160", "rawmuscle": "125",
                   "mysticality": 95, "rawmysticality": 95, "moxie": 90, "rawmoxie": 81}"#;
    let stats = commit_status_json(json, &mut store).unwrap();
    assert_eq!(stats.stat(Stat::Muscle), (160, 125));
    assert_eq!(store.status.muscle, StatValue::new(160, 125, formula(121, 14)));
    assert_eq!(store.status.moxie.base, 81);
    assert_eq!(store.status.adventures, 42);
    assert_eq!(store.commits, 1);
}

#[test]
fn json_missing_raw_stat_is_rejected() {
    let mut store = Store::default();
    let json = r#"{"muscle": 1, "mysticality": 1, "rawmysticality": 1, "moxie": 1, "rawmoxie": 1}"#;
    let err = commit_status_json(json, &mut store).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedJson(_)));
    assert_eq!(store.status, CharacterStatusSnapshot::default());
}

#[test]
fn extreme_adventure_count_saturates_delta() {
    let catalog = skills();
    let context = ParseContext::default();
    let parser = StatusSnapshotParser::new(&context, &catalog, &formula);

    let mut store = Store::default();
    let mut deltas = Vec::new();
    parse_and_commit(&parser, &Document::parse(SHEET), &mut store, &mut |d: i64| {
        deltas.push(d);
    })
    .unwrap();

    let sheet = SHEET.replace("<b>42</b>", "<b>-9,223,372,036,854,775,808</b>");
    let report = parse_and_commit(&parser, &Document::parse(sheet), &mut store, &mut |d: i64| {
        deltas.push(d);
    })
    .unwrap();
    assert_eq!(report.adventures_delta, i64::MIN);
    assert_eq!(store.status.adventures, i64::MIN);
    assert_eq!(deltas, vec![42, i64::MIN]);
}
