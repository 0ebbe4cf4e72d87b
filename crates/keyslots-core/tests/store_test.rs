// Keyslots Slot Store Integration Tests
//
// File-level behavior of the slot store: the exact bytes written, and what
// survives each operation.

use std::fs;
use std::path::PathBuf;

use keyslots_core::store::DEFAULT_HEADER;
use keyslots_core::{ClearOutcome, InitOutcome, KeyCode, SlotId, SlotStore};

fn store_in(dir: &tempfile::TempDir) -> (SlotStore, PathBuf) {
    let path = dir.path().join("clipboard_slots.dat");
    let mut store = SlotStore::new(&path);
    store.initialize().unwrap();
    (store, path)
}

fn id(s: &str) -> SlotId {
    SlotId::from(s)
}

#[test]
fn test_fresh_store_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let (_, path) = store_in(&dir);

    let mut expected = format!("{}\n", DEFAULT_HEADER);
    for n in 1..=10 {
        expected.push_str(&format!("SLOT{}|\n", n));
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_initialize_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("slots.dat");
    let mut store = SlotStore::new(&path);

    assert!(matches!(store.initialize().unwrap(), InitOutcome::Created));
    assert!(path.exists());
}

#[test]
fn test_initialize_leaves_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.dat");
    let original = "KEY_SAVE1=A\nKEY_LOAD=bogus\nSLOT3|three\n";
    fs::write(&path, original).unwrap();

    let mut store = SlotStore::new(&path);
    match store.initialize().unwrap() {
        InitOutcome::Loaded { errors } => assert_eq!(errors.len(), 1),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(store.config().save1, KeyCode(0x41));
    assert_eq!(store.config().load, KeyCode(0xDE));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(store.read_slot(&id("3")).unwrap(), "three");
}

#[test]
fn test_content_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = store_in(&dir);

    for content in ["", "plain", "a|b", "back\\slash", "two\nlines\r\n", "tab\there", "\\n literal", "é ç à"] {
        store.write_slot(&id("77"), content).unwrap();
        assert_eq!(store.read_slot(&id("77")).unwrap(), content);
    }
}

#[test]
fn test_write_leaves_other_lines_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.dat");
    fs::write(&path, "# my notes\nSLOT1|one\nSLOT2|two\\nlines\nSLOT99|odd\\qescape\n").unwrap();
    let mut store = SlotStore::new(&path);
    store.initialize().unwrap();

    store.write_slot(&id("1"), "ONE").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# my notes\n"));
    assert!(text.contains("SLOT1|ONE\n"));
    assert!(text.contains("SLOT2|two\\nlines\n"));
    assert!(text.contains("SLOT99|odd\\qescape\n"));
    assert!(text.contains("SLOT10|\n"));
}

#[test]
fn test_crlf_header_kept_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.dat");
    fs::write(&path, "# hdr\r\nKEY_SAVE1=A\r\nSLOT1|one\r\n").unwrap();
    let mut store = SlotStore::new(&path);
    store.initialize().unwrap();
    assert_eq!(store.config().save1, KeyCode(0x41));

    store.write_slot(&id("2"), "x").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# hdr\r\nKEY_SAVE1=A\r\nSLOT1|one\r\nSLOT2|x\r\n"));
    assert_eq!(store.read_slot(&id("1")).unwrap(), "one");
}

#[test]
fn test_clear_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    store.write_slot(&id("4"), "four").unwrap();
    store.write_slot(&id("123"), "many").unwrap();

    assert_eq!(store.clear_slot(&id("4")).unwrap(), ClearOutcome::Emptied);
    assert_eq!(store.clear_slot(&id("123")).unwrap(), ClearOutcome::Deleted);
    assert_eq!(store.clear_slot(&id("123")).unwrap(), ClearOutcome::NotFound);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("SLOT4|\n"));
    assert!(!text.contains("SLOT123"));
}

#[test]
fn test_clear_missing_primary_leaves_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.dat");
    let original = "# mine\nSLOT1|one\n";
    fs::write(&path, original).unwrap();
    let mut store = SlotStore::new(&path);
    store.initialize().unwrap();

    assert_eq!(store.clear_slot(&id("3")).unwrap(), ClearOutcome::NotFound);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(store.clear_slot(&id("1")).unwrap(), ClearOutcome::Emptied);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\nSLOT1|\n");
}

#[test]
fn test_clear_all_secondary_keeps_primaries_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    store.write_slot(&id("1"), "first\nline").unwrap();
    store.write_slot(&id("10"), "ten|pipe").unwrap();
    store.write_slot(&id("11"), "eleven").unwrap();
    store.write_slot(&id("note"), "named").unwrap();

    let before = fs::read_to_string(&path).unwrap();
    assert_eq!(store.clear_all_secondary().unwrap(), 2);
    let after = fs::read_to_string(&path).unwrap();

    let kept: String = before
        .lines()
        .filter(|l| !l.starts_with("SLOT11|") && !l.starts_with("SLOTnote|"))
        .map(|l| format!("{}\n", l))
        .collect();
    assert_eq!(after, kept);
}

#[test]
fn test_listing_order() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = store_in(&dir);
    for slot in ["zeta", "100", "12", "alpha", "5"] {
        store.write_slot(&id(slot), slot).unwrap();
    }

    let ids: Vec<String> = store.list_slots().unwrap().into_iter().map(|r| r.id.to_string()).collect();
    assert_eq!(
        ids,
        ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "12", "100", "alpha", "zeta"]
    );
}

#[test]
fn test_missing_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    fs::remove_file(&path).unwrap();

    assert!(store.read_slot(&id("1")).is_err());
    assert!(store.list_slots().is_err());
    assert!(store.write_slot(&id("1"), "x").is_err());
}
