//! Model Tests
//!
//! Random operation sequences checked against a plain `HashMap`, across a
//! flush and reopen.

use crate::common::*;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Set(String, i32),
    Remove(String),
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let key = "[a-d]{1,2}";
    prop_oneof![
        6 => (key, any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => key.prop_map(Op::Remove),
        1 => Just(Op::Reset),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn store_matches_model_after_reopen(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let t = TestDir::new();
        let mut model: HashMap<String, KvsValue> = HashMap::new();

        {
            let kvs = t.open_optional(1);
            for op in &ops {
                match op {
                    Op::Set(k, v) => {
                        kvs.set_value(k, KvsValue::from(*v)).unwrap();
                        model.insert(k.clone(), KvsValue::from(*v));
                    }
                    Op::Remove(k) => {
                        let removed = kvs.remove_key(k);
                        prop_assert_eq!(removed.is_ok(), model.remove(k).is_some());
                    }
                    Op::Reset => {
                        kvs.reset().unwrap();
                        model.clear();
                    }
                }
            }
        }

        let kvs = t.open(1, OpenNeedDefaults::Optional, OpenNeedKvs::Required).unwrap();
        kvs.set_flush_on_exit(false);
        let mut expected: Vec<String> = model.keys().cloned().collect();
        expected.sort();
        prop_assert_eq!(kvs.get_all_keys().unwrap(), expected);
        for (k, v) in &model {
            prop_assert_eq!(&kvs.get_value(k).unwrap(), v);
        }
    }
}
