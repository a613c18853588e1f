//! Saving and restoring a session

use std::fs;

use statline_foundation::{ErrorKind, OutfitId, SkillId};
use statline_runtime::config::{
    DATA_DIR_VAR, GOLDEN_MR_VAR, MODE_VAR, RESTRICTIONS_VAR, SEEK_BIRDS_VAR,
};
use statline_runtime::{RuntimeConfig, Session};
use statline_runtime::serialize;

use crate::{SHEET, data_dir, scratch, session};

#[test]
fn restore_rebuilds_outfits() {
    let path = scratch("restore.msgpack");

    let mut original = session();
    original.apply_status_page(SHEET).unwrap();
    for name in ["filthy knitted dread sack", "filthy corduroys"] {
        let item = original.item_id(name).unwrap();
        original.set_item_count(item, 1);
    }
    original.save(&path).unwrap();

    let mut restored = session();
    let report = restored.restore(&path).unwrap();
    assert_eq!(report.added, vec![OutfitId(3)]);
    assert_eq!(restored.state(), original.state());
    assert_eq!(restored.log(), original.log());
    assert_eq!(restored.state().status().adventures, 42);

    fs::remove_file(&path).unwrap();
}

#[test]
fn restore_failure_keeps_state() {
    let path = scratch("garbage.msgpack");
    fs::write(&path, b"not a save").unwrap();

    let mut session = session();
    session.apply_status_page(SHEET).unwrap();
    let before = session.state().clone();

    let err = session.restore(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SerializationError(_)));
    assert_eq!(session.state(), &before);

    fs::remove_file(&path).unwrap();
}

#[test]
fn dump_is_readable_json() {
    let mut session = session();
    session.apply_status_page(SHEET).unwrap();
    let json = serialize::to_json(&session.saved()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], serialize::FORMAT_VERSION);
    assert_eq!(value["state"]["status"]["class_name"], "Seal Clubber");
}

#[test]
fn environment_overrides() {
    let config = RuntimeConfig::from_lookup(|key| match key {
        k if k == DATA_DIR_VAR => Some("/srv/statline".to_string()),
        k if k == MODE_VAR => Some("zombie".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.table_path("items.txt").to_str(), Some("/srv/statline/items.txt"));
    assert_eq!(config.parse_context().mode.to_string(), "zombie");

    let err = RuntimeConfig::from_lookup(|key| (key == MODE_VAR).then(|| "mystery".to_string()))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
}

#[test]
fn environment_drives_skill_gating() {
    let config = RuntimeConfig::from_lookup(|key| match key {
        k if k == RESTRICTIONS_VAR => Some("bad-moon".to_string()),
        k if k == GOLDEN_MR_VAR => Some("1".to_string()),
        k if k == SEEK_BIRDS_VAR => Some("true".to_string()),
        _ => None,
    })
    .unwrap()
    .with_data_dir(data_dir());
    let mut session = Session::load(config).unwrap();
    session.apply_status_page(SHEET).unwrap();

    let skills = &session.state().status().skills.available;
    assert!(!skills.contains(&SkillId(19)));
    assert!(!skills.contains(&SkillId(8201)));
    assert!(skills.contains(&SkillId(7226)));
    assert!(skills.contains(&SkillId(7317)));
}
