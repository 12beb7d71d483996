//! Module for writing JSON text
//!
//! [`dump`] serializes a [`Value`] to its canonical text form: a single line, object members in
//! name order, `", "` between array items and object members and `": "` between member name and
//! member value. The same format is used by the [`Display`] implementation of `Value`.
//!
//! # Examples
//! ```
//! # use tagged_json::{parser::parse, writer::*};
//! let value = parse(r#"{"n":null,"a":[1,2,3]}"#);
//! assert_eq!(r#"{"a": [1, 2, 3], "n": null}"#, dump(&value));
//!
//! let settings = DumpSettings {
//!     escape_forward_slash: false,
//!     ..Default::default()
//! };
//! assert_eq!(r#""a/b""#, dump_custom(&parse(r#""a\/b""#), &settings));
//! ```

use std::fmt::{Display, Formatter, Write};

use crate::value::{Array, Object, Value};

/// Text written for the [`Value::Error`] sentinel
///
/// This is not valid JSON; it marks the place where a failed parse result was serialized.
pub const ERROR_TEXT: &str = "parse error";

/// Settings to customize the serializer output
///
/// The settings only affect how member names and string values are escaped; all compliant JSON
/// parsers consider the output of all setting combinations identical.
///
/// These settings are used by [`dump_custom`], [`dump_into_custom`] and [`dump_to`]. To avoid
/// repeating the default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use tagged_json::writer::DumpSettings;
/// DumpSettings {
///     escape_all_non_ascii: true,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct DumpSettings {
    /// Whether to escape the forward slash `/` as `\/`
    ///
    /// JSON permits but does not require this escape. Escaping it prevents the sequence `</`
    /// from appearing in the output, for example when JSON is embedded in HTML.
    pub escape_forward_slash: bool,

    /// Whether to escape all non-ASCII characters
    ///
    /// When enabled all Unicode characters in member names and string values whose code point
    /// is >= `0x80` are written as `\uXXXX` escape sequence; characters outside the Basic
    /// Multilingual Plane are written as UTF-16 surrogate pair, for example `𝄞` is written as
    /// `\uD834\uDD1E`.
    /// This can be useful when interacting with legacy systems which do not properly support
    /// non-ASCII input.
    pub escape_all_non_ascii: bool,
}

impl Default for DumpSettings {
    /// Creates the default dump settings
    ///
    /// - escape forward slash: true
    /// - escape all non-ASCII: false (= only `"`, `\`, `/` and control characters `0x00` to
    ///   `0x1F` are escaped)
    fn default() -> Self {
        DumpSettings {
            escape_forward_slash: true,
            escape_all_non_ascii: false,
        }
    }
}

/// Serializes a value to a new string with [default settings](DumpSettings::default)
pub fn dump(value: &Value) -> String {
    dump_custom(value, &DumpSettings::default())
}

/// Serializes a value to a new string with custom settings
pub fn dump_custom(value: &Value, settings: &DumpSettings) -> String {
    let mut out = String::new();
    dump_into_custom(value, &mut out, settings);
    out
}

/// Appends the serialized value to `out` with [default settings](DumpSettings::default)
///
/// Existing content of `out` is kept. If `out` has enough spare capacity, no allocation
/// is performed.
pub fn dump_into(value: &Value, out: &mut String) {
    dump_into_custom(value, out, &DumpSettings::default());
}

/// Appends the serialized value to `out` with custom settings
///
/// See [`dump_into`].
pub fn dump_into_custom(value: &Value, out: &mut String, settings: &DumpSettings) {
    if let Err(e) = dump_to(value, out, settings) {
        unreachable!("Writing to String failed: {e}");
    }
}

/// Serializes a value to a [`std::fmt::Write`]
///
/// Returns an error only if the underlying writer fails.
pub fn dump_to<W: Write + ?Sized>(
    value: &Value,
    writer: &mut W,
    settings: &DumpSettings,
) -> std::fmt::Result {
    ValueWriter { writer, settings }.write_value(value)
}

/// Writes the canonical dump with default settings, see [`dump`]
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dump_to(self, f, &DumpSettings::default())
    }
}

struct ValueWriter<'a, W: Write + ?Sized> {
    writer: &'a mut W,
    settings: &'a DumpSettings,
}

impl<W: Write + ?Sized> ValueWriter<'_, W> {
    fn write_value(&mut self, value: &Value) -> std::fmt::Result {
        match value {
            Value::Null => self.writer.write_str("null"),
            Value::Boolean(b) => self.writer.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_number(*n),
            Value::String(s) => self.write_string(s),
            Value::Array(array) => self.write_array(array),
            Value::Object(object) => self.write_object(object),
            Value::Error => self.writer.write_str(ERROR_TEXT),
        }
    }

    fn write_number(&mut self, n: f64) -> std::fmt::Result {
        // JSON has no representation for NaN and infinity
        if !n.is_finite() {
            return self.writer.write_str("null");
        }

        // Both formats produce the shortest representation which parses back to the same value;
        // the exponent form avoids long runs of zeros for very large and very small magnitudes
        let magnitude = n.abs();
        if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
            write!(self.writer, "{n:e}")
        } else {
            write!(self.writer, "{n}")
        }
    }

    fn write_array(&mut self, array: &Array) -> std::fmt::Result {
        self.writer.write_char('[')?;
        for (index, item) in array.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(", ")?;
            }
            self.write_value(item)?;
        }
        self.writer.write_char(']')
    }

    fn write_object(&mut self, object: &Object) -> std::fmt::Result {
        self.writer.write_char('{')?;
        for (index, (name, value)) in object.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(", ")?;
            }
            self.write_string(name)?;
            self.writer.write_str(": ")?;
            self.write_value(value)?;
        }
        self.writer.write_char('}')
    }
}

// Implementation with string writing methods
impl<W: Write + ?Sized> ValueWriter<'_, W> {
    fn should_escape(&self, c: char) -> bool {
        matches!(c, '"' | '\\')
            // Control characters which must be escaped per JSON specification
            || matches!(c, '\u{0}'..='\u{1F}')
            || (c == '/' && self.settings.escape_forward_slash)
            || (self.settings.escape_all_non_ascii && !c.is_ascii())
    }

    fn write_unicode_escape(&mut self, value: u32) -> std::fmt::Result {
        // For convenience `value` is u32, but it is actually u16
        debug_assert!(value <= u16::MAX as u32);
        write!(self.writer, "\\u{value:04X}")
    }

    fn write_escaped_char(&mut self, c: char) -> std::fmt::Result {
        let escape = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '/' => "\\/",
            '\u{0008}' => "\\b",
            '\u{000C}' => "\\f",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\0'..='\u{FFFF}' => return self.write_unicode_escape(c as u32),
            _ => {
                // Encode as surrogate pair
                let temp = (c as u32) - 0x10000;
                let high = (temp >> 10) + 0xD800;
                let low = (temp & ((1 << 10) - 1)) + 0xDC00;

                self.write_unicode_escape(high)?;
                return self.write_unicode_escape(low);
            }
        };
        self.writer.write_str(escape)
    }

    fn write_string(&mut self, value: &str) -> std::fmt::Result {
        self.writer.write_char('"')?;

        let mut next_to_write_index = 0;
        for (index, c) in value.char_indices() {
            if self.should_escape(c) {
                if index > next_to_write_index {
                    self.writer.write_str(&value[next_to_write_index..index])?;
                }
                self.write_escaped_char(c)?;
                next_to_write_index = index + c.len_utf8();
            }
        }
        // Write remaining chars
        if next_to_write_index < value.len() {
            self.writer.write_str(&value[next_to_write_index..])?;
        }

        self.writer.write_char('"')
    }
}
