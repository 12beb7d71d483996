#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagged_json::{json, parser::parse, value::Value};

use crate::test_lib::{get_expected_value, read_test_data, TestResult};

mod test_lib;

#[test]
fn deserialize_test_data() -> TestResult {
    let value: Value = serde_json::from_str(&read_test_data())?;
    assert_eq!(get_expected_value(), value);
    Ok(())
}

#[test]
fn serialize_test_data() -> TestResult {
    let json = serde_json::to_string(&get_expected_value())?;
    assert_eq!(get_expected_value(), parse(&json));
    Ok(())
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Config {
    name: String,
    retries: u32,
    ratio: f64,
    tags: Vec<String>,
    limits: BTreeMap<String, Option<i64>>,
}

#[test]
fn struct_conversion() -> TestResult {
    let config = Config {
        name: "service".to_owned(),
        retries: 3,
        ratio: 0.25,
        tags: vec!["a".to_owned(), "b".to_owned()],
        limits: BTreeMap::from([("max".to_owned(), Some(-10)), ("min".to_owned(), None)]),
    };

    // Struct to `Value`, going through JSON text
    let value: Value = serde_json::from_str(&serde_json::to_string(&config)?)?;
    assert_eq!(
        json!(
            r#"{"limits": {"max": -10, "min": null}, "name": "service", "ratio": 0.25, "retries": 3, "tags": ["a", "b"]}"#
        ),
        value
    );

    // `Value` back to struct
    let deserialized: Config = serde_json::from_str(&serde_json::to_string(&value)?)?;
    assert_eq!(config, deserialized);
    Ok(())
}

#[test]
fn serialize_error_sentinel() {
    let value = Value::from_iter([Value::from(1), parse("[")]);
    match serde_json::to_string(&value) {
        Err(e) => assert_eq!(
            "cannot serialize the error sentinel of a failed parse",
            e.to_string()
        ),
        Ok(json) => panic!("Should have failed, but got: {json}"),
    }
}
