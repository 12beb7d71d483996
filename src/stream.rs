//! Adapters between values and byte streams
//!
//! [`read_value`] reads one whitespace-delimited token from a [`BufRead`] and parses it;
//! [`write_value`] writes the [dump](crate::writer::dump) of a value to a [`Write`].
//!
//! Because tokens end at the first whitespace, [`read_value`] only handles JSON documents
//! which contain no whitespace at all, not even inside string values. Documents written by
//! [`write_value`] generally do contain whitespace; read those with
//! [`std::io::Read::read_to_string`] and [`parse`] instead.
//!
//! # Examples
//! ```
//! # use tagged_json::{parser::parse, stream::*};
//! let mut reader = "  [1,2]\n{\"a\":true} ".as_bytes();
//! let first = read_value(&mut reader)?;
//! let second = read_value(&mut reader)?;
//! assert_eq!(parse("[1, 2]"), first);
//! assert_eq!(parse(r#"{"a": true}"#), second);
//!
//! let mut out = Vec::<u8>::new();
//! write_value(&mut out, &first)?;
//! assert_eq!(b"[1, 2]", out.as_slice());
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{BufRead, ErrorKind, Write};

use crate::{parser::parse, value::Value, writer::dump};

/// Consumes bytes as long as `predicate` holds, appending them to `token` if provided
fn consume_while<R: BufRead + ?Sized>(
    reader: &mut R,
    mut token: Option<&mut Vec<u8>>,
    predicate: impl Fn(u8) -> bool,
) -> std::io::Result<()> {
    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            return Ok(());
        }

        let count = buf.iter().position(|b| !predicate(*b));
        let consumed = count.unwrap_or(buf.len());
        if let Some(token) = token.as_deref_mut() {
            token.extend_from_slice(&buf[..consumed]);
        }
        reader.consume(consumed);

        if count.is_some() {
            return Ok(());
        }
    }
}

/// Reads the next whitespace-delimited token from `reader` and parses it
///
/// Leading ASCII whitespace is skipped, then all bytes up to the next ASCII whitespace (or the
/// end of the stream) are consumed and parsed with [`parse`]. The whitespace after the token
/// is left in the reader. Malformed JSON, including an empty token at the end of the stream,
/// results in [`Value::Error`].
///
/// # Errors
/// Returns an error if reading from `reader` fails, or with [`ErrorKind::InvalidData`] if the
/// token is not valid UTF-8.
pub fn read_value<R: BufRead + ?Sized>(reader: &mut R) -> std::io::Result<Value> {
    consume_while(reader, None, |b| b.is_ascii_whitespace())?;

    let mut token = Vec::new();
    consume_while(reader, Some(&mut token), |b| !b.is_ascii_whitespace())?;

    let text =
        String::from_utf8(token).map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
    Ok(parse(&text))
}

/// Writes the [dump](crate::writer::dump) of `value` to `writer`
///
/// No trailing line break is written.
///
/// # Errors
/// Returns an error if writing to `writer` fails.
pub fn write_value<W: Write + ?Sized>(writer: &mut W, value: &Value) -> std::io::Result<()> {
    writer.write_all(dump(value).as_bytes())
}
