//! Common library module for integration tests
// See https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests
// Not every test file uses every function
#![allow(dead_code)]

use std::path::PathBuf;

use tagged_json::value::{Object, Value};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn get_test_data_file_path() -> PathBuf {
    // Get path of test file, see https://stackoverflow.com/a/30004252
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/test_data.json");
    path
}

pub fn read_test_data() -> String {
    match std::fs::read_to_string(get_test_data_file_path()) {
        Ok(json) => json,
        Err(e) => panic!("Failed reading test data: {e}"),
    }
}

fn object<const N: usize>(members: [(&str, Value); N]) -> Value {
    members
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect()
}

fn array<const N: usize>(items: [Value; N]) -> Value {
    Value::from_iter(items)
}

/// Gets the value expected for the JSON document at the path returned by [`get_test_data_file_path`]
pub fn get_expected_value() -> Value {
    array([
        // Arrays
        array([]),
        //   Array with single item
        array([Value::from(1)]),
        //   Array with multiple items
        array([
            Value::from(1),
            Value::from("a"),
            Value::from(true),
            object([(
                "nested",
                array([object([("nested2", array([Value::from(2)]))])]),
            )]),
        ]),
        // Objects
        Value::from(Object::new()),
        //   Object with single member
        object([("name", Value::from(1))]),
        //   Object with multiple members, last duplicate member wins
        object([
            ("name1", Value::from(2)),
            ("name2", Value::from("value")),
            ("", Value::from(3)),
        ]),
        // Strings
        Value::from("string value"),
        Value::from("\0 test \n\t \\ \""),
        Value::from("unicode \u{00A7} \u{0C80} \u{1805} \u{1D106}"),
        // Numbers
        Value::from(0),
        Value::from(-1234),
        Value::from(567.89),
        Value::from(100e-10),
        Value::from(6.070e+010),
        // Booleans
        Value::from(true),
        Value::from(false),
        Value::Null,
    ])
}

/// Converts a serde_json value, used as reference implementation in tests
pub fn from_serde(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::from(b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(n) => Value::from(n),
            None => panic!("Unsupported number: {n}"),
        },
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(array) => array.into_iter().map(from_serde).collect(),
        serde_json::Value::Object(object) => object
            .into_iter()
            .map(|(name, value)| (name, from_serde(value)))
            .collect(),
    }
}
