//! Scalar decoders.
//!
//! Every decoder is a pure function of the value bytes. The `pub` functions
//! take the text of a single value (for strings, the complete token including
//! its quotes) and report errors with spans relative to that text. The
//! [`Value`](crate::Value) accessors call the `*_in` variants which report
//! spans relative to the whole document.

use crate::Span;
use crate::error::{Error, ErrorKind};
use crate::lex;
use std::borrow::Cow;

#[cfg(test)]
#[path = "./decode_tests.rs"]
mod tests;

fn whole(text: &[u8]) -> Span {
    Span::new(0, u32::try_from(text.len()).unwrap_or(u32::MAX))
}

/// Decodes a TOML integer: optional sign, optional `0x`/`0o`/`0b` prefix,
/// digits with single `_` separators between them.
pub fn integer(text: &[u8]) -> Result<i64, Error> {
    integer_in(text, whole(text))
}

/// Decodes `true` or `false`.
pub fn boolean(text: &[u8]) -> Result<bool, Error> {
    boolean_in(text, whole(text))
}

/// Decodes a complete string token into `out`, returning the decoded length.
///
/// If `out` is too small, the bytes that fit are written and
/// [`ErrorKind::BufferTooSmall`] reports the full length. Invalid strings
/// write nothing.
pub fn string(text: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    expect_string_token(text)?;
    string_in(text, whole(text), out)
}

/// Length in bytes of the decoded string token.
pub fn string_len(text: &[u8]) -> Result<usize, Error> {
    expect_string_token(text)?;
    string_len_in(text, whole(text))
}

/// Decodes a TOML float, including `inf` and `nan` with an optional sign.
#[cfg(feature = "float")]
#[cfg_attr(docsrs, doc(cfg(feature = "float")))]
pub fn float(text: &[u8]) -> Result<f64, Error> {
    float_in(text, whole(text))
}

/// Decodes an offset date-time, local date-time, local date or local time.
#[cfg(feature = "date")]
#[cfg_attr(docsrs, doc(cfg(feature = "date")))]
pub fn datetime(text: &[u8]) -> Result<crate::DateTime, Error> {
    datetime_in(text, whole(text))
}

fn expect_string_token(text: &[u8]) -> Result<(), Error> {
    if lex::scan_string(text, 0) == Some(text.len()) {
        return Ok(());
    }
    let kind = match text.first() {
        Some(b'"' | b'\'') => ErrorKind::UnterminatedString,
        _ => ErrorKind::Wanted {
            expected: "a string",
            found: lex::token_desc(text, 0).0,
        },
    };
    Err(Error::new(kind, 0, text.len()))
}

pub(crate) fn integer_in(src: &[u8], span: Span) -> Result<i64, Error> {
    let text = span.slice(src);
    let invalid = || Error::from((ErrorKind::InvalidNumber, span));
    let overflow = || Error::from((ErrorKind::OutOfRange("i64"), span));

    let (negative, rest) = match text {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, text),
    };
    let (radix, digits) = match rest {
        [b'0', b'x', digits @ ..] => (16, digits),
        [b'0', b'o', digits @ ..] => (8, digits),
        [b'0', b'b', digits @ ..] => (2, digits),
        _ => (10, rest),
    };
    if digits.is_empty() || (radix == 10 && digits.len() > 1 && digits[0] == b'0') {
        return Err(invalid());
    }

    let mut magnitude = 0u64;
    let mut after_digit = false;
    for &b in digits {
        if b == b'_' {
            if !after_digit {
                return Err(invalid());
            }
            after_digit = false;
            continue;
        }
        let Some(digit) = (b as char).to_digit(radix) else {
            return Err(invalid());
        };
        after_digit = true;
        magnitude = match magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(digit as u64))
        {
            Some(m) => m,
            None => return Err(overflow()),
        };
    }
    if !after_digit {
        return Err(invalid());
    }

    if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(overflow());
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| overflow())
    }
}

pub(crate) fn boolean_in(src: &[u8], span: Span) -> Result<bool, Error> {
    match span.slice(src) {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(Error::from((
            ErrorKind::Wanted {
                expected: "a boolean",
                found: lex::token_desc(src, span.start as usize).0,
            },
            span,
        ))),
    }
}

pub(crate) fn string_len_in(src: &[u8], span: Span) -> Result<usize, Error> {
    let mut len = 0;
    for byte in Unescape::new(src, span) {
        byte?;
        len += 1;
    }
    Ok(len)
}

pub(crate) fn string_in(src: &[u8], span: Span, out: &mut [u8]) -> Result<usize, Error> {
    let required = string_len_in(src, span)?;
    for (slot, byte) in out.iter_mut().zip(Unescape::new(src, span)) {
        *slot = byte?;
    }
    if required > out.len() {
        return Err(Error::from((ErrorKind::BufferTooSmall { required }, span)));
    }
    Ok(required)
}

pub(crate) fn string_cow_in(src: &[u8], span: Span) -> Result<Cow<'_, [u8]>, Error> {
    let body = Unescape::new(src, span);
    if !body.has_escapes() {
        string_len_in(src, span)?;
        return Ok(Cow::Borrowed(body.remaining()));
    }
    let mut out = Vec::with_capacity(span.len());
    for byte in body {
        out.push(byte?);
    }
    Ok(Cow::Owned(out))
}

#[cfg(feature = "float")]
pub(crate) fn float_in(src: &[u8], span: Span) -> Result<f64, Error> {
    let text = span.slice(src);
    let invalid = || Error::from((ErrorKind::InvalidNumber, span));

    let (negative, rest) = match text {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, text),
    };
    let sign = if negative { -1.0 } else { 1.0 };
    match rest {
        b"inf" => return Ok(f64::INFINITY * sign),
        b"nan" => return Ok(f64::NAN.copysign(sign)),
        _ => {}
    }

    let Some(int_end) = digit_run(rest, 0) else {
        return Err(invalid());
    };
    if rest[0] == b'0' && int_end > 1 {
        return Err(invalid());
    }
    let mut pos = int_end;
    let mut fractional = false;
    if rest.get(pos) == Some(&b'.') {
        pos = digit_run(rest, pos + 1).ok_or_else(invalid)?;
        fractional = true;
    }
    if let Some(b'e' | b'E') = rest.get(pos) {
        pos += 1;
        if let Some(b'+' | b'-') = rest.get(pos) {
            pos += 1;
        }
        pos = digit_run(rest, pos).ok_or_else(invalid)?;
        fractional = true;
    }
    if pos != rest.len() || !fractional {
        return Err(invalid());
    }

    // Strip separators into a stack buffer so parsing stays allocation free.
    let mut buf = [0u8; 128];
    let mut len = 0;
    for &b in text.iter().filter(|b| **b != b'_') {
        let Some(slot) = buf.get_mut(len) else {
            return Err(invalid());
        };
        *slot = b;
        len += 1;
    }
    let Ok(digits) = std::str::from_utf8(&buf[..len]) else {
        return Err(invalid());
    };
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(Error::from((ErrorKind::OutOfRange("f64"), span))),
        Err(_) => Err(invalid()),
    }
}

/// End of a run of decimal digits with single `_` separators starting at
/// `start`, or `None` if no digit is there.
#[cfg(feature = "float")]
fn digit_run(text: &[u8], start: usize) -> Option<usize> {
    if !text.get(start)?.is_ascii_digit() {
        return None;
    }
    let mut pos = start + 1;
    loop {
        match text.get(pos) {
            Some(b) if b.is_ascii_digit() => pos += 1,
            Some(b'_') if text.get(pos + 1).is_some_and(u8::is_ascii_digit) => pos += 2,
            _ => return Some(pos),
        }
    }
}

#[cfg(feature = "date")]
pub(crate) fn datetime_in(src: &[u8], span: Span) -> Result<crate::DateTime, Error> {
    match crate::DateTime::munch(span.slice(src)) {
        Some((len, value)) if len == span.len() => Ok(value),
        _ => Err(Error::from((ErrorKind::InvalidDateTime, span))),
    }
}

/// Lazily decodes the body of a string token (or quoted key atom) one byte at
/// a time.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Clone)]
pub(crate) struct Unescape<'a> {
    src: &'a [u8],
    pos: usize,
    end: usize,
    basic: bool,
    multiline: bool,
    utf8: [u8; 4],
    utf8_pos: u8,
    utf8_len: u8,
    failed: bool,
}

impl<'a> Unescape<'a> {
    /// `span` must cover a complete string token, delimiters included.
    pub(crate) fn new(src: &'a [u8], span: Span) -> Self {
        let start = span.start as usize;
        let token_end = (span.end as usize).min(src.len());
        let quote = src.get(start).copied().unwrap_or(b'\'');
        let multiline = token_end.saturating_sub(start) >= 6 && lex::is_triple(src, start, quote);
        let delim = if multiline { 3 } else { 1 };
        let mut pos = start + delim;
        if multiline {
            pos += lex::newline_len(src, pos);
        }
        let end = token_end.saturating_sub(delim).max(pos.min(token_end));
        Self {
            src,
            pos: pos.min(end),
            end,
            basic: quote == b'"',
            multiline,
            utf8: [0; 4],
            utf8_pos: 0,
            utf8_len: 0,
            failed: false,
        }
    }

    /// The undecoded bytes that have not been consumed yet.
    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.src[self.pos..self.end]
    }

    pub(crate) fn has_escapes(&self) -> bool {
        self.basic && self.remaining().contains(&b'\\')
    }

    fn fail(&mut self, kind: ErrorKind, start: usize, end: usize) -> Option<Result<u8, Error>> {
        self.failed = true;
        Some(Err(Error::new(kind, start, end)))
    }

    fn escape(&mut self) -> Result<Option<u8>, Error> {
        let at = self.pos;
        let Some(&c) = self.src[..self.end].get(at + 1) else {
            return Err(Error::new(ErrorKind::UnterminatedString, at, self.end));
        };
        self.pos = at + 2;
        let byte = match c {
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'f' => 0x0c,
            b'r' => b'\r',
            b'"' => b'"',
            b'\\' => b'\\',
            b'u' => return self.unicode(at, 4).map(Some),
            b'U' => return self.unicode(at, 8).map(Some),
            b' ' | b'\t' | b'\n' | b'\r' if self.multiline => {
                self.line_continuation(at)?;
                return Ok(None);
            }
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidEscape(lex::char_at(self.src, at + 1)),
                    at,
                    at + 2,
                ));
            }
        };
        Ok(Some(byte))
    }

    /// A backslash followed by optional whitespace and a newline trims all
    /// whitespace and newlines up to the next significant byte.
    fn line_continuation(&mut self, at: usize) -> Result<(), Error> {
        let mut pos = lex::skip_ws(self.src, at + 1).min(self.end);
        match lex::newline_len(self.src, pos) {
            0 => {
                return Err(Error::new(
                    ErrorKind::InvalidEscape(lex::char_at(self.src, at + 1)),
                    at,
                    at + 2,
                ));
            }
            n => pos += n,
        }
        while pos < self.end {
            if lex::is_ws(self.src[pos]) {
                pos += 1;
                continue;
            }
            match lex::newline_len(self.src, pos) {
                0 => break,
                n => pos += n,
            }
        }
        self.pos = pos.min(self.end);
        Ok(())
    }

    fn unicode(&mut self, at: usize, digits: usize) -> Result<u8, Error> {
        let mut value = 0u32;
        for i in at + 2..at + 2 + digits {
            let digit = if i < self.end {
                (self.src[i] as char).to_digit(16)
            } else {
                None
            };
            let Some(digit) = digit else {
                return Err(Error::new(
                    ErrorKind::InvalidHexEscape(lex::char_at(self.src, i)),
                    i,
                    i + 1,
                ));
            };
            value = (value << 4) | digit;
        }
        let end = at + 2 + digits;
        let Some(ch) = char::from_u32(value) else {
            return Err(Error::new(ErrorKind::InvalidEscapeValue(value), at, end));
        };
        self.pos = end;
        let len = ch.encode_utf8(&mut self.utf8).len();
        self.utf8_len = len as u8;
        self.utf8_pos = 1;
        Ok(self.utf8[0])
    }
}

impl Iterator for Unescape<'_> {
    type Item = Result<u8, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.utf8_pos < self.utf8_len {
            let byte = self.utf8[self.utf8_pos as usize];
            self.utf8_pos += 1;
            return Some(Ok(byte));
        }
        self.utf8_len = 0;
        self.utf8_pos = 0;
        if self.failed {
            return None;
        }
        loop {
            if self.pos >= self.end {
                return None;
            }
            let at = self.pos;
            let b = self.src[at];
            if self.basic && b == b'\\' {
                match self.escape() {
                    Ok(Some(byte)) => return Some(Ok(byte)),
                    Ok(None) => continue,
                    Err(err) => {
                        self.failed = true;
                        return Some(Err(err));
                    }
                }
            }
            let allowed = match b {
                b'\t' => true,
                b'\n' => self.multiline,
                b'\r' => self.multiline && self.src.get(at + 1) == Some(&b'\n'),
                0x00..=0x1f | 0x7f => false,
                _ => true,
            };
            if !allowed {
                return self.fail(ErrorKind::InvalidCharInString(b as char), at, at + 1);
            }
            self.pos += 1;
            return Some(Ok(b));
        }
    }
}

impl std::iter::FusedIterator for Unescape<'_> {}
