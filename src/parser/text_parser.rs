use crate::{
    json_number::consume_json_number,
    value::{Array, Object, Value},
};

use super::{ParseError, ParserPosition, ParserSettings, SyntaxErrorKind};

type ParseResult<T> = Result<T, ParseError>;

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Recursive descent parser over a complete JSON text
///
/// Operates on the UTF-8 bytes of the text; every structural JSON character is ASCII, so slicing
/// at those positions always yields valid `str` boundaries.
pub(super) struct TextParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    /// Byte index of the next byte to consume
    pos: usize,
    /// Number of arrays and objects currently entered
    depth: u32,
    settings: &'a ParserSettings,
}

impl<'a> TextParser<'a> {
    pub(super) fn new(text: &'a str, settings: &'a ParserSettings) -> Self {
        TextParser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            settings,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn position_at(&self, byte_pos: usize) -> ParserPosition {
        let mut line = 0;
        let mut column = 0;
        let mut prev_cr = false;

        for &byte in &self.bytes[..byte_pos] {
            match byte {
                b'\r' => {
                    line += 1;
                    column = 0;
                }
                b'\n' => {
                    // CR LF is a single line break
                    if !prev_cr {
                        line += 1;
                    }
                    column = 0;
                }
                // UTF-8 continuation byte
                _ if byte & 0b1100_0000 == 0b1000_0000 => {}
                _ => column += 1,
            }
            prev_cr = byte == b'\r';
        }

        ParserPosition {
            line,
            column,
            byte_pos: byte_pos as u64,
        }
    }

    fn error_at<T>(&self, kind: SyntaxErrorKind, byte_pos: usize) -> ParseResult<T> {
        Err(ParseError {
            kind,
            position: self.position_at(byte_pos),
        })
    }

    fn error<T>(&self, kind: SyntaxErrorKind) -> ParseResult<T> {
        self.error_at(kind, self.pos)
    }

    pub(super) fn parse_document(mut self) -> ParseResult<Value> {
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.skip_whitespace();

        if self.pos < self.bytes.len() {
            return self.error(SyntaxErrorKind::TrailingData);
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.peek() {
            None => self.error(SyntaxErrorKind::IncompleteDocument),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b't') => self.parse_literal("true", Value::Boolean(true)),
            Some(b'f') => self.parse_literal("false", Value::Boolean(false)),
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(b']' | b'}') => self.error(SyntaxErrorKind::UnexpectedClosingBracket),
            Some(_) => self.error(SyntaxErrorKind::MalformedJson),
        }
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> ParseResult<Value> {
        let rest = &self.bytes[self.pos..];
        let end = self.pos + literal.len();

        if !rest.starts_with(literal.as_bytes())
            // Reject literals directly followed by other identifier chars, e.g. `truex`
            || self
                .bytes
                .get(end)
                .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            return self.error(SyntaxErrorKind::InvalidLiteral);
        }

        self.pos = end;
        Ok(value)
    }

    fn parse_number(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        let end = match consume_json_number(self.bytes, start) {
            Some(end) => end,
            None => return self.error(SyntaxErrorKind::MalformedNumber),
        };

        let number = match self.text[start..end].parse::<f64>() {
            Ok(number) => number,
            Err(_) => return self.error(SyntaxErrorKind::MalformedNumber),
        };
        // Overflow produces infinity; underflow silently produces 0.0, which is accepted
        if !number.is_finite() {
            return self.error(SyntaxErrorKind::NumberOutOfRange);
        }

        self.pos = end;
        Ok(Value::Number(number))
    }

    /// Parses a string value or member name; `pos` must be at the opening quote
    fn parse_string(&mut self) -> ParseResult<String> {
        debug_assert_eq!(Some(b'"'), self.peek());
        self.pos += 1;
        let mut result = String::new();

        loop {
            // Copy all bytes which need no special handling at once
            let chunk_len = self.bytes[self.pos..]
                .iter()
                .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
                .unwrap_or(self.bytes.len() - self.pos);
            result.push_str(&self.text[self.pos..self.pos + chunk_len]);
            self.pos += chunk_len;

            match self.peek() {
                None => return self.error(SyntaxErrorKind::IncompleteDocument),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(result);
                }
                Some(b'\\') => result.push(self.parse_escape()?),
                Some(_) => return self.error(SyntaxErrorKind::NotEscapedControlCharacter),
            }
        }
    }

    /// Parses an escape sequence; `pos` must be at the backslash
    fn parse_escape(&mut self) -> ParseResult<char> {
        let escape_start = self.pos;
        self.pos += 1;

        let c = match self.peek() {
            None => return self.error(SyntaxErrorKind::IncompleteDocument),
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.parse_unicode_escape(escape_start);
            }
            Some(_) => return self.error_at(SyntaxErrorKind::UnknownEscapeSequence, escape_start),
        };
        self.pos += 1;
        Ok(c)
    }

    /// Reads the 4 hex digits of a `\uXXXX` escape; `pos` must be directly behind the `u`
    fn read_unicode_escape(&mut self, escape_start: usize) -> ParseResult<u32> {
        let mut code_point = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                None => return self.error(SyntaxErrorKind::IncompleteDocument),
                Some(b) => match (b as char).to_digit(16) {
                    Some(digit) => digit,
                    None => {
                        return self
                            .error_at(SyntaxErrorKind::MalformedEscapeSequence, escape_start)
                    }
                },
            };
            code_point = (code_point << 4) | digit;
            self.pos += 1;
        }
        Ok(code_point)
    }

    fn parse_unicode_escape(&mut self, escape_start: usize) -> ParseResult<char> {
        let code_point = self.read_unicode_escape(escape_start)?;

        let code_point = match code_point {
            0xD800..=0xDBFF => {
                // High surrogate must be followed by an escaped low surrogate
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return self.error_at(
                        SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence,
                        escape_start,
                    );
                }
                let low_start = self.pos;
                self.pos += 2;
                let low = self.read_unicode_escape(low_start)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return self.error_at(
                        SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence,
                        escape_start,
                    );
                }
                0x10000 + ((code_point - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return self.error_at(
                    SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence,
                    escape_start,
                )
            }
            _ => code_point,
        };

        match char::from_u32(code_point) {
            Some(c) => Ok(c),
            None => self.error_at(SyntaxErrorKind::MalformedEscapeSequence, escape_start),
        }
    }

    fn enter_container(&mut self) -> ParseResult<()> {
        if self.depth >= self.settings.max_nesting_depth {
            return self.error(SyntaxErrorKind::MaxNestingDepthExceeded);
        }
        self.depth += 1;
        self.pos += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter_container()?;
        let mut array = Array::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(array));
        }

        loop {
            array.push(self.parse_value()?);
            self.skip_whitespace();

            match self.peek() {
                None => return self.error(SyntaxErrorKind::IncompleteDocument),
                Some(b',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() == Some(b']') {
                        return self.error(SyntaxErrorKind::TrailingComma);
                    }
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b'}') => return self.error(SyntaxErrorKind::UnexpectedClosingBracket),
                Some(_) => return self.error(SyntaxErrorKind::MissingComma),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(array))
    }

    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter_container()?;
        let mut object = Object::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(object));
        }

        loop {
            match self.peek() {
                Some(b'"') => {}
                None => return self.error(SyntaxErrorKind::IncompleteDocument),
                Some(b'}') => return self.error(SyntaxErrorKind::TrailingComma),
                Some(_) => return self.error(SyntaxErrorKind::ExpectingMemberNameOrObjectEnd),
            }
            let name = self.parse_string()?;

            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.pos += 1,
                None => return self.error(SyntaxErrorKind::IncompleteDocument),
                Some(_) => return self.error(SyntaxErrorKind::MissingColon),
            }
            self.skip_whitespace();

            let value = self.parse_value()?;
            // Last occurrence of a duplicate member name wins
            object.insert(name, value);
            self.skip_whitespace();

            match self.peek() {
                None => return self.error(SyntaxErrorKind::IncompleteDocument),
                Some(b',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b']') => return self.error(SyntaxErrorKind::UnexpectedClosingBracket),
                Some(_) => return self.error(SyntaxErrorKind::MissingComma),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(object))
    }
}
