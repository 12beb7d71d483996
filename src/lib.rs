#![warn(missing_docs)]
#![forbid(unsafe_code)]
// Allow needless `return` because that makes it sometimes more obvious that
// an expression is the result of the function
#![allow(clippy::needless_return)]
// Allow `assert_eq!(true, ...)` because in some cases it is used to check a bool
// value and not a 'flag' / 'state', and `assert_eq!` makes that more explicit
#![allow(clippy::bool_assert_comparison)]
// Enable 'unused' warnings for doc tests (are disabled by default)
#![doc(test(no_crate_inject))]
#![doc(test(attr(warn(unused))))]
// Fail on warnings in doc tests
#![doc(test(attr(deny(warnings))))]
// When `docsrs` configuration flag is set enable banner for features in documentation
// See https://stackoverflow.com/q/61417452
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! tagged-json is a small [RFC 8259](https://www.rfc-editor.org/rfc/rfc8259.html) JSON library
//! built around an in-memory value tree.
//!
//! It consists of three parts:
//! - [`value`]: the [`Value`] model, a tagged union over the JSON data types with typed access
//!   and indexing
//! - [`parser`]: a strict recursive descent parser which turns a complete JSON text into a
//!   `Value`, all-or-nothing
//! - [`writer`]: a serializer which turns a `Value` into canonical single-line text
//!
//! A failed parse does not produce a partial tree; instead [`parser::parse`] returns the
//! [`Value::Error`] sentinel, and [`parser::try_parse`] reports the kind and position of the
//! first problem.
//!
//! # Terminology
//!
//! This crate uses the same terminology as the JSON specification:
//!
//! - *object*: `{ ... }`
//!   - *member*: Entry in an object. For example the JSON object `{"a": 1}` has the member
//!     `"a": 1` where `"a"` is the member *name* and `1` is the member *value*.
//! - *array*: `[ ... ]`
//! - *literal*:
//!   - *boolean*: `true` or `false`
//!   - `null`
//! - *number*: number value, for example `123.4e+10`
//! - *string*: string value, for example `"text in \"quotes\""`
//!
//! # Usage examples
//!
//! ## Parsing
//! ```
//! # use tagged_json::parser::parse;
//! let value = parse(r#"{"n": null, "a": [1, 2, 3]}"#);
//!
//! assert!(value.is_object());
//! assert_eq!(3, value["a"].size());
//! assert_eq!(2.0, *value["a"][1].get::<f64>());
//!
//! // Malformed JSON results in the error sentinel
//! assert!(parse("[1, 2,]").is_error());
//! ```
//!
//! ## Building and writing
//! ```
//! # use tagged_json::{json, value::*, writer::dump};
//! let mut value = json!(r#"{"tags": []}"#);
//! value["tags"].get_mut::<Array>().push(Value::from("new"));
//! value["count"] = Value::from(1);
//!
//! assert_eq!(r#"{"count": 1, "tags": ["new"]}"#, dump(&value));
//! assert_eq!(dump(&value), value.to_string());
//! ```
//!
//! # Serde integration
//! Optional integration with [Serde](https://docs.rs/serde/latest/serde/) exists to convert a
//! [`Value`] to and from any Serde data format. It is enabled with the `serde` feature.

pub mod parser;
pub mod stream;
pub mod value;
pub mod writer;

mod json_number;

pub use value::Value;

/// Parses a JSON text literal at the point of use
///
/// Expands to a call of [`parser::parse`], so malformed JSON results in the
/// [`Value::Error`] sentinel.
///
/// # Examples
/// ```
/// # use tagged_json::json;
/// let value = json!(r#"{"key": [1, true]}"#);
/// assert_eq!(2, value["key"].size());
///
/// assert!(json!("[1,").is_error());
/// ```
#[macro_export]
macro_rules! json {
    ($text:literal) => {
        $crate::parser::parse($text)
    };
}
