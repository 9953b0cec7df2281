//! Open Policy Tests
//!
//! Required/optional handling of the defaults file and generation 0.

use crate::common::*;

#[test]
fn scenario_a_both_files_required_and_present() {
    let t = TestDir::new();
    t.write_defaults(123, r#"{ "default": 1 }"#);
    t.write_snapshot(123, 0, r#"{ "kvs": 2 }"#);

    let kvs = t
        .open(123, OpenNeedDefaults::Required, OpenNeedKvs::Required)
        .unwrap();
    kvs.set_flush_on_exit(false);

    assert_eq!(kvs.get_value("kvs").unwrap(), KvsValue::Number(2.0));
    assert_eq!(kvs.get_default_value("default").unwrap(), KvsValue::Number(1.0));
    assert_eq!(kvs.get_value("default").unwrap(), KvsValue::Number(1.0));
    assert_eq!(kvs.get_all_keys().unwrap(), vec!["kvs".to_string()]);
}

#[test]
fn scenario_b_missing_hash_fails_for_both_policies() {
    let t = TestDir::new();
    t.write_snapshot(123, 0, r#"{ "kvs": 2 }"#);
    std::fs::remove_file(t.hash_file(123, 0)).unwrap();

    assert_code(
        t.open(123, OpenNeedDefaults::Optional, OpenNeedKvs::Required),
        ErrorCode::KvsHashFileReadError,
    );
    assert_code(
        t.open(123, OpenNeedDefaults::Optional, OpenNeedKvs::Optional),
        ErrorCode::KvsHashFileReadError,
    );
}

#[test]
fn scenario_c_missing_snapshot() {
    let t = TestDir::new();

    let kvs = t
        .open(123, OpenNeedDefaults::Optional, OpenNeedKvs::Optional)
        .unwrap();
    kvs.set_flush_on_exit(false);
    assert!(kvs.get_all_keys().unwrap().is_empty());

    assert_code(
        t.open(123, OpenNeedDefaults::Optional, OpenNeedKvs::Required),
        ErrorCode::KvsFileReadError,
    );
}

#[test]
fn missing_required_defaults_fails() {
    let t = TestDir::new();
    assert_code(
        t.open(7, OpenNeedDefaults::Required, OpenNeedKvs::Optional),
        ErrorCode::KvsFileReadError,
    );
}

#[test]
fn missing_optional_defaults_is_empty() {
    let t = TestDir::new();
    let kvs = t.open_optional(7);
    kvs.set_flush_on_exit(false);
    assert_code(kvs.get_default_value("anything"), ErrorCode::KeyNotFound);
}

#[test]
fn defaults_are_not_hash_checked() {
    let t = TestDir::new();
    t.write_defaults(8, r#"{ "d": "x" }"#);
    std::fs::write(t.path().join("kvs_8_default.hash"), [0u8, 0, 0, 0]).unwrap();

    let kvs = t
        .open(8, OpenNeedDefaults::Required, OpenNeedKvs::Optional)
        .unwrap();
    kvs.set_flush_on_exit(false);
    assert_eq!(kvs.get_default_value("d").unwrap(), KvsValue::from("x"));
}

#[test]
fn invalid_defaults_json_fails() {
    let t = TestDir::new();
    t.write_defaults(9, "{ not json");
    assert_code(
        t.open(9, OpenNeedDefaults::Optional, OpenNeedKvs::Optional),
        ErrorCode::JsonParserError,
    );
}

#[test]
fn builder_and_config_open() {
    let t = TestDir::new();
    t.write_snapshot(10, 0, r#"{ "a": [1, "two", null] }"#);

    let kvs = KvsBuilder::new(InstanceId::new(10))
        .dir(t.path())
        .need_kvs(true)
        .flush_on_exit(false)
        .build()
        .unwrap();
    assert_eq!(
        kvs.get_value("a").unwrap(),
        KvsValue::Array(vec![
            KvsValue::Number(1.0),
            KvsValue::from("two"),
            KvsValue::Null
        ])
    );

    let config: KvsConfig = serde_json::from_value(serde_json::json!({
        "need_defaults": true,
        "dir": t.path(),
    }))
    .unwrap();
    assert_code(
        Kvs::open_with_config(InstanceId::new(10), &config),
        ErrorCode::KvsFileReadError,
    );
}
