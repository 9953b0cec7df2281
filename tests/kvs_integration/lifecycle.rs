//! Lifecycle Tests
//!
//! Drop-time flushing, handle moves and persistence across reopen.

use crate::common::*;
use std::collections::HashMap;

#[test]
fn values_survive_reopen() {
    let t = TestDir::new();
    let nested: HashMap<String, KvsValue> = [
        ("inner".to_string(), KvsValue::from(vec![KvsValue::from(1), KvsValue::Null])),
        ("flag".to_string(), KvsValue::from(false)),
    ]
    .into_iter()
    .collect();

    {
        let kvs = t.open_optional(1);
        kvs.set_value("number", KvsValue::from(123.0)).unwrap();
        kvs.set_value("string", KvsValue::from("First")).unwrap();
        kvs.set_value("null", KvsValue::Null).unwrap();
        kvs.set_value("object", KvsValue::from(nested.clone())).unwrap();
    }

    let kvs = t
        .open(1, OpenNeedDefaults::Optional, OpenNeedKvs::Required)
        .unwrap();
    kvs.set_flush_on_exit(false);
    assert_eq!(kvs.get_value("number").unwrap(), KvsValue::Number(123.0));
    assert_eq!(kvs.get_value("string").unwrap(), KvsValue::from("First"));
    assert!(kvs.get_value("null").unwrap().is_null());
    assert_eq!(kvs.get_value("object").unwrap(), KvsValue::Object(nested));
}

#[test]
fn removal_and_reset_persist_on_flush() {
    let t = TestDir::new();
    {
        let kvs = t.open_optional(2);
        kvs.set_value("a", KvsValue::from(1)).unwrap();
        kvs.set_value("b", KvsValue::from(2)).unwrap();
    }
    {
        let kvs = t.open_optional(2);
        kvs.remove_key("a").unwrap();
    }
    {
        let kvs = t.open_optional(2);
        assert_eq!(kvs.get_all_keys().unwrap(), vec!["b".to_string()]);
        kvs.reset().unwrap();
        // reset alone leaves the previous generation on disk
        assert_eq!(t.read_snapshot(2, 0), serde_json::json!({ "b": 2.0 }));
    }

    let kvs = t.open_optional(2);
    kvs.set_flush_on_exit(false);
    assert!(kvs.get_all_keys().unwrap().is_empty());
}

#[test]
fn disabled_flush_on_exit_writes_nothing() {
    let t = TestDir::new();
    {
        let kvs = t.open_optional(3);
        kvs.set_value("k", KvsValue::from("v")).unwrap();
        kvs.set_flush_on_exit(false);
    }
    assert!(!t.kvs_file(3, 0).exists());
    assert!(!t.hash_file(3, 0).exists());
}

#[test]
fn flag_can_be_reenabled() {
    let t = TestDir::new();
    {
        let kvs = t.open_optional(3);
        kvs.set_flush_on_exit(false);
        kvs.set_flush_on_exit(true);
    }
    assert!(t.kvs_file(3, 0).exists());
}

#[test]
fn moved_handle_flushes_once() {
    let t = TestDir::new();
    let kvs = t.open_optional(4);
    kvs.set_value("k", KvsValue::from(1)).unwrap();

    let moved = kvs;
    let boxed = Box::new(moved);
    drop(boxed);

    assert!(t.kvs_file(4, 0).exists());
    assert!(!t.kvs_file(4, 1).exists());
}

#[test]
fn assigning_over_a_handle_releases_the_old_one() {
    let t = TestDir::new();

    let mut target = t.open_optional(123);
    target.set_value("target", KvsValue::from(1)).unwrap();
    target.set_flush_on_exit(false);

    let source = t.open_optional(5);
    source.set_value("source", KvsValue::from(2)).unwrap();

    // The old target is dropped here and honors its own disabled flag
    target = source;
    assert!(!t.kvs_file(123, 0).exists());

    assert_eq!(target.instance_id(), InstanceId::new(5));
    assert_eq!(target.get_value("source").unwrap(), KvsValue::from(2));
    assert!(target.flush_on_exit());

    drop(target);
    assert_eq!(t.read_snapshot(5, 0), serde_json::json!({ "source": 2.0 }));
    assert!(!t.kvs_file(5, 1).exists());
}

#[test]
fn assigning_over_a_flushing_handle_persists_it() {
    let t = TestDir::new();

    let mut target = t.open_optional(6);
    target.set_value("old", KvsValue::from(true)).unwrap();

    let source = t.open_optional(7);
    source.set_flush_on_exit(false);

    target = source;
    assert_eq!(t.read_snapshot(6, 0), serde_json::json!({ "old": true }));

    drop(target);
    assert!(!t.kvs_file(7, 0).exists());
}
