//! Module for parsing JSON text
//!
//! [`parse`] converts a complete JSON document into a [`Value`]. Parsing is all-or-nothing: if
//! the text is malformed anywhere, the result is the [`Value::Error`] sentinel and no partially
//! built value is returned. [`try_parse`] follows the same grammar but returns a [`ParseError`]
//! describing the first problem instead, which is useful for troubleshooting malformed JSON.
//!
//! # Examples
//! ```
//! # use tagged_json::parser::*;
//! let value = parse(r#"{"n": null, "a": [1, 2, 3]}"#);
//! assert_eq!(3, value["a"].size());
//! assert!(value["n"].is_null());
//!
//! assert!(parse("[1,").is_error());
//!
//! let error = try_parse("[1 2]").unwrap_err();
//! assert_eq!(SyntaxErrorKind::MissingComma, error.kind);
//! assert_eq!(3, error.position.column);
//! ```

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::value::Value;

mod text_parser;
use text_parser::TextParser;

/// Position in the JSON text at which a [`ParseError`] occurred
///
/// # Examples
/// Consider the following JSON document:
/// ```json
/// {
///   "a": nul
/// }
/// ```
/// The position of the malformed `nul` is:
/// - line: 1
///   Line numbering starts at 0 and it is in the second line
/// - column: 7
///   Column numbering starts at 0 and the `n` of `nul` is the 8th character in that line,
///   respectively there are 7 characters in front of it
/// - byte position: 9
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct ParserPosition {
    /// Line number, starting at 0
    ///
    /// The characters _CR_ (U+000D), _LF_ (U+000A) and _CR LF_ are considered line breaks. Escaped
    /// line breaks in member names and string values are not considered line breaks.
    pub line: u64,
    /// Character column within the current line, starting at 0
    ///
    /// For all Unicode characters this value is incremented only by one, regardless of how many
    /// bytes their UTF-8 encoding has.
    pub column: u64,
    /// Byte offset within the JSON text, starting at 0
    pub byte_pos: u64,
}

impl Display for ParserPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, column {} (byte pos {})",
            self.line, self.column, self.byte_pos
        )
    }
}

/// Describes why parsing failed
#[non_exhaustive]
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum SyntaxErrorKind {
    /// A literal value is incomplete or invalid, for example `tru` instead of `true`
    InvalidLiteral,
    /// A JSON number is malformed, for example `01` (leading 0 is not allowed)
    MalformedNumber,
    /// A JSON number is too large in magnitude to be represented as `f64`, for example `1e309`
    ///
    /// Numbers which are too small in magnitude, for example `1e-10000`, are not an error;
    /// they are parsed as `0.0`.
    NumberOutOfRange,
    /// A control character was encountered in the raw JSON data of a member name or string value
    ///
    /// The JSON specification requires that Unicode characters in the range from `0x00` to `0x1F`
    /// (inclusive) must be escaped when part of member name or string value.
    NotEscapedControlCharacter,
    /// An unknown escape sequence (`\...`) was encountered
    UnknownEscapeSequence,
    /// A malformed escape sequence was encountered, for example `\u00` instead of `\u0000`
    MalformedEscapeSequence,
    /// An unpaired UTF-16 surrogate was encountered in a member name or a string value
    ///
    /// A high surrogate escape sequence such as `\uD834` must be directly followed by a low
    /// surrogate escape sequence such as `\uDD1E`, and a low surrogate must not appear on its own.
    UnpairedSurrogatePairEscapeSequence,
    /// A comma (`,`) is missing between array items or object members
    MissingComma,
    /// A trailing comma was used, for example `[1,]`
    TrailingComma,
    /// A colon (`:`) is missing between member name and member value
    MissingColon,
    /// A member name or the end of an object (`}`) was expected but something else was encountered
    ExpectingMemberNameOrObjectEnd,
    /// A closing bracket (`]` or `}`) was encountered where it was not expected
    UnexpectedClosingBracket,
    /// A value was expected but something else was encountered, for example `NaN`
    MalformedJson,
    /// The JSON document is incomplete, for example a closing `]` is missing
    IncompleteDocument,
    /// Unexpected trailing data was detected after the top-level value
    TrailingData,
    /// The JSON arrays and objects are nested deeper than
    /// [`ParserSettings::max_nesting_depth`] allows
    MaxNestingDepthExceeded,
}

/// Error which occurred while parsing JSON text
///
/// Only returned by [`try_parse`] and [`try_parse_custom`]; [`parse`] collapses every error
/// to the [`Value::Error`] sentinel.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("JSON syntax error {kind} at {position}")]
pub struct ParseError {
    /// Kind of the error
    pub kind: SyntaxErrorKind,
    /// Position where the error occurred in the JSON text
    pub position: ParserPosition,
}

/// Default value of [`ParserSettings::max_nesting_depth`]
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 128;

/// Settings to customize the parser behavior
///
/// These settings are used by [`parse_custom`] and [`try_parse_custom`]. To avoid repeating the
/// default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use tagged_json::parser::ParserSettings;
/// ParserSettings {
///     max_nesting_depth: 16,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct ParserSettings {
    /// Maximum number of JSON arrays and objects which may be nested in each other
    ///
    /// For example a maximum nesting depth of 2 allows `[{}]` but rejects `[[[]]]` with
    /// [`SyntaxErrorKind::MaxNestingDepthExceeded`]. A value of 0 only allows scalar top-level
    /// values.
    ///
    /// The parser recurses once per nesting level, so the maximum nesting depth protects against
    /// deeply nested JSON data exhausting the call stack. High values should therefore be used
    /// with care.
    pub max_nesting_depth: u32,
}

impl Default for ParserSettings {
    /// Creates the default parser settings
    ///
    /// - max nesting depth: [`DEFAULT_MAX_NESTING_DEPTH`]
    fn default() -> Self {
        ParserSettings {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Parses a complete JSON document with [default settings](ParserSettings::default)
///
/// Returns the parsed value, or the [`Value::Error`] sentinel if the text is not a single valid
/// JSON value optionally surrounded by whitespace.
pub fn parse(text: &str) -> Value {
    parse_custom(text, &ParserSettings::default())
}

/// Parses a complete JSON document with custom settings
///
/// See [`parse`].
pub fn parse_custom(text: &str, settings: &ParserSettings) -> Value {
    try_parse_custom(text, settings).unwrap_or(Value::Error)
}

/// Parses a complete JSON document with [default settings](ParserSettings::default), reporting
/// why parsing failed
///
/// The returned value is never [`Value::Error`]. The error describes the first problem in the
/// text; the remainder of the text is not inspected.
pub fn try_parse(text: &str) -> Result<Value, ParseError> {
    try_parse_custom(text, &ParserSettings::default())
}

/// Parses a complete JSON document with custom settings, reporting why parsing failed
///
/// See [`try_parse`].
pub fn try_parse_custom(text: &str, settings: &ParserSettings) -> Result<Value, ParseError> {
    TextParser::new(text, settings).parse_document()
}

/// Parses a complete JSON document, see [`try_parse`]
impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse(s)
    }
}
