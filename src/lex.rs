//! Lexical primitives shared by every iterator.
//!
//! All functions take the full source and a byte offset and return a new
//! offset; none of them allocate or fail except the key scanner.

use crate::error::{Error, ErrorKind};

#[cfg(test)]
#[path = "./lex_tests.rs"]
mod tests;

/// Returns `true` for bytes allowed in a bare key: `[A-Za-z0-9_-]`.
#[inline]
pub fn is_bare_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Length of the newline at `pos`: 1 for `\n`, 2 for `\r\n`, 0 otherwise.
#[inline]
pub(crate) fn newline_len(src: &[u8], pos: usize) -> usize {
    match src.get(pos) {
        Some(b'\n') => 1,
        Some(b'\r') if src.get(pos + 1) == Some(&b'\n') => 2,
        _ => 0,
    }
}

#[inline]
pub(crate) fn skip_ws(src: &[u8], mut pos: usize) -> usize {
    while pos < src.len() && is_ws(src[pos]) {
        pos += 1;
    }
    pos
}

/// Offset of the newline ending the line that contains `pos`, or `src.len()`.
pub(crate) fn line_end(src: &[u8], mut pos: usize) -> usize {
    while pos < src.len() {
        if newline_len(src, pos) != 0 {
            return pos;
        }
        pos += 1;
    }
    src.len()
}

/// Offset of the first byte of the line following `pos`.
pub(crate) fn next_line(src: &[u8], pos: usize) -> usize {
    let end = line_end(src, pos);
    end + newline_len(src, end)
}

/// Number of bytes from `pos` up to, but not including, the next newline.
pub fn line_length(src: &[u8], pos: usize) -> usize {
    line_end(src, pos).saturating_sub(pos)
}

/// Skips whitespace, newlines and comments, stopping at the first
/// significant byte or at `src.len()`.
pub fn skip_blanks(src: &[u8], mut pos: usize) -> usize {
    loop {
        pos = skip_ws(src, pos);
        if src.get(pos) == Some(&b'#') {
            pos = line_end(src, pos);
        }
        match newline_len(src, pos) {
            0 => return pos,
            n => pos += n,
        }
    }
}

/// Returns `true` if the three bytes at `pos` are all `quote`.
#[inline]
pub(crate) fn is_triple(src: &[u8], pos: usize, quote: u8) -> bool {
    src.get(pos..pos + 3) == Some(&[quote, quote, quote][..])
}

/// End offset of a multi-line closing delimiter starting at `pos`.
///
/// Up to two quotes directly before the closing triple belong to the content.
pub(crate) fn multiline_close_end(src: &[u8], pos: usize, quote: u8) -> usize {
    let mut run = 0;
    while src.get(pos + run) == Some(&quote) && run < 5 {
        run += 1;
    }
    pos + run
}

/// Scans the string token starting at `start` (which must be a quote) and
/// returns the offset just past its closing delimiter.
///
/// Returns `None` for unterminated strings, including single-line strings
/// interrupted by a newline.
pub(crate) fn scan_string(src: &[u8], start: usize) -> Option<usize> {
    let quote = *src.get(start)?;
    let basic = quote == b'"';
    if is_triple(src, start, quote) {
        let mut i = start + 3;
        while i < src.len() {
            let b = src[i];
            if basic && b == b'\\' {
                i += 2;
                continue;
            }
            if b == quote && is_triple(src, i, quote) {
                return Some(multiline_close_end(src, i, quote));
            }
            i += 1;
        }
        return None;
    }

    let mut i = start + 1;
    while let Some(&b) = src.get(i) {
        match b {
            b'\\' if basic => {
                if matches!(src.get(i + 1), Some(b'\n' | b'\r')) {
                    return None;
                }
                i += 2;
            }
            b'\n' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Scans a possibly dotted key starting at `start` and returns the offset
/// just past its last atom. Whitespace around dots is part of the key.
pub(crate) fn scan_key(src: &[u8], start: usize) -> Result<usize, Error> {
    let mut pos = start;
    loop {
        let end = match src.get(pos) {
            Some(&b) if is_bare_key_char(b) => {
                let mut end = pos + 1;
                while end < src.len() && is_bare_key_char(src[end]) {
                    end += 1;
                }
                end
            }
            Some(&q @ (b'"' | b'\'')) => {
                if is_triple(src, pos, q) {
                    return Err(Error::new(ErrorKind::MultilineStringKey, pos, pos + 3));
                }
                match scan_string(src, pos) {
                    Some(end) => end,
                    None => {
                        return Err(Error::new(
                            ErrorKind::UnterminatedString,
                            pos,
                            line_end(src, pos),
                        ));
                    }
                }
            }
            _ => {
                let (found, end) = token_desc(src, pos);
                return Err(Error::new(
                    ErrorKind::Wanted {
                        expected: "a table key",
                        found,
                    },
                    pos,
                    end,
                ));
            }
        };
        let after = skip_ws(src, end);
        if src.get(after) != Some(&b'.') {
            return Ok(end);
        }
        pos = skip_ws(src, after + 1);
    }
}

/// Describes the token at `pos` for error messages and returns its end.
pub(crate) fn token_desc(src: &[u8], pos: usize) -> (&'static str, usize) {
    match src.get(pos) {
        None => ("eof", src.len()),
        Some(b'\n' | b'\r') => ("a newline", pos + 1),
        Some(b' ' | b'\t') => ("whitespace", skip_ws(src, pos)),
        Some(b'#') => ("a comment", pos + 1),
        Some(b'=') => ("an equals", pos + 1),
        Some(b'.') => ("a period", pos + 1),
        Some(b',') => ("a comma", pos + 1),
        Some(b':') => ("a colon", pos + 1),
        Some(b'+') => ("a plus", pos + 1),
        Some(b'{') => ("a left brace", pos + 1),
        Some(b'}') => ("a right brace", pos + 1),
        Some(b'[') => ("a left bracket", pos + 1),
        Some(b']') => ("a right bracket", pos + 1),
        Some(b'\'' | b'"') => ("a string", pos + 1),
        Some(&b) if is_bare_key_char(b) => {
            let mut end = pos + 1;
            while end < src.len() && is_bare_key_char(src[end]) {
                end += 1;
            }
            ("an identifier", end)
        }
        Some(_) => ("a character", pos + 1),
    }
}

/// Decodes the (possibly multi-byte) character at `pos` for error messages.
pub(crate) fn char_at(src: &[u8], pos: usize) -> char {
    let Some(&lead) = src.get(pos) else {
        return '\0';
    };
    let width = match lead {
        0x00..=0x7f => return lead as char,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return char::REPLACEMENT_CHARACTER,
    };
    let end = (pos + width).min(src.len());
    std::str::from_utf8(&src[pos..end])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
