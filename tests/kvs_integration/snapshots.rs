//! Snapshot Tests
//!
//! Generation growth, the cap, rotation order and restore.

use crate::common::*;

#[test]
fn count_grows_across_reopen_then_caps() {
    let t = TestDir::new();
    let mut counts = Vec::new();

    for i in 0..5 {
        let kvs = t.open_optional(1);
        counts.push(kvs.snapshot_count());
        kvs.set_value("round", KvsValue::from(i)).unwrap();
        // dropped here, flushing a new generation
    }

    assert_eq!(counts, vec![0, 1, 2, 3, 3]);
    assert!(!t.kvs_file(1, MAX_SNAPSHOTS).exists());
    assert!(!t.hash_file(1, MAX_SNAPSHOTS).exists());
}

#[test]
fn max_snapshot_count_is_three() {
    let t = TestDir::new();
    let kvs = t.open_optional(1);
    kvs.set_flush_on_exit(false);
    assert_eq!(kvs.max_snapshot_count(), 3);
    assert_eq!(KvsApi::max_snapshot_count(&kvs), MAX_SNAPSHOTS);
}

#[test]
fn generations_hold_newest_first() {
    let t = TestDir::new();
    let kvs = t.open_optional(2);
    kvs.set_flush_on_exit(false);

    for i in 1..=4 {
        kvs.set_value("n", KvsValue::from(i)).unwrap();
        kvs.flush().unwrap();
    }

    assert_eq!(t.read_snapshot(2, 0), serde_json::json!({ "n": 4.0 }));
    assert_eq!(t.read_snapshot(2, 1), serde_json::json!({ "n": 3.0 }));
    assert_eq!(t.read_snapshot(2, 2), serde_json::json!({ "n": 2.0 }));
}

#[test]
fn restore_replaces_current_map() {
    let t = TestDir::new();
    let kvs = t.open_optional(3);
    kvs.set_flush_on_exit(false);

    kvs.set_value("only_old", KvsValue::from(true)).unwrap();
    kvs.flush().unwrap();
    kvs.reset().unwrap();
    kvs.set_value("only_new", KvsValue::from(true)).unwrap();
    kvs.flush().unwrap();

    kvs.snapshot_restore(SnapshotId::new(1)).unwrap();
    assert_eq!(kvs.get_all_keys().unwrap(), vec!["only_old".to_string()]);

    kvs.snapshot_restore(SnapshotId::new(0)).unwrap();
    assert_eq!(kvs.get_all_keys().unwrap(), vec!["only_new".to_string()]);
}

#[test]
fn restore_does_not_touch_disk() {
    let t = TestDir::new();
    let kvs = t.open_optional(4);
    kvs.set_flush_on_exit(false);
    kvs.set_value("n", KvsValue::from(1)).unwrap();
    kvs.flush().unwrap();
    kvs.set_value("n", KvsValue::from(2)).unwrap();
    kvs.flush().unwrap();

    kvs.snapshot_restore(SnapshotId::new(1)).unwrap();
    assert_eq!(kvs.snapshot_count(), 2);
    assert_eq!(t.read_snapshot(4, 0), serde_json::json!({ "n": 2.0 }));
}

#[test]
fn restore_out_of_range() {
    let t = TestDir::new();
    let kvs = t.open_optional(5);
    kvs.set_flush_on_exit(false);

    assert_code(kvs.snapshot_restore(SnapshotId::new(0)), ErrorCode::InvalidSnapshotId);
    kvs.flush().unwrap();
    assert_code(kvs.snapshot_restore(SnapshotId::new(1)), ErrorCode::InvalidSnapshotId);
    assert_code(
        kvs.snapshot_restore(SnapshotId::new(MAX_SNAPSHOTS)),
        ErrorCode::InvalidSnapshotId,
    );
}

#[test]
fn filename_queries() {
    let t = TestDir::new();
    let kvs = t.open_optional(6);
    kvs.set_flush_on_exit(false);

    for generation in 0..MAX_SNAPSHOTS {
        let id = SnapshotId::new(generation);
        assert_eq!(kvs.get_kvs_filename(id).unwrap(), t.kvs_file(6, generation));
        assert_eq!(kvs.get_hash_filename(id).unwrap(), t.hash_file(6, generation));
    }
    assert_code(
        kvs.get_kvs_filename(SnapshotId::new(MAX_SNAPSHOTS)),
        ErrorCode::InvalidSnapshotId,
    );
    assert_code(
        kvs.get_hash_filename(SnapshotId::new(MAX_SNAPSHOTS)),
        ErrorCode::InvalidSnapshotId,
    );
}
