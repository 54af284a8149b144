//! Value classification and span scanning.

use crate::lex;
use crate::value::Kind;

#[cfg(test)]
#[path = "./classify_tests.rs"]
mod tests;

/// Where a value appears, which decides what terminates a scalar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    /// Right hand side of a `key = value` line.
    TopLevel,
    /// Element of an array or value of an inline table entry.
    Nested,
}

/// Classifies the value starting at `offset` in `src`.
///
/// The value is treated as the right hand side of a key line, so a scalar
/// ends at a comment or newline.
pub fn classify(src: &[u8], offset: usize) -> Kind {
    scan_value(src, offset, Context::TopLevel).0
}

/// Returns the kind of the value at `start` and the offset just past it.
///
/// Scalars end before `#`, a newline, or (when nested) `,`, `]`, `}`, with
/// trailing whitespace trimmed. Strings and compounds end after their closing
/// delimiter. An unterminated string or compound is `Unknown` and spans the
/// same bytes a scalar would.
pub(crate) fn scan_value(src: &[u8], start: usize, ctx: Context) -> (Kind, usize) {
    let Some(&first) = src.get(start) else {
        return (Kind::Unknown, start);
    };
    let closed = match first {
        b'"' | b'\'' => lex::scan_string(src, start).map(|end| (Kind::String, end)),
        b'[' => scan_compound(src, start).map(|end| (Kind::Array, end)),
        b'{' => scan_compound(src, start).map(|end| (Kind::InlineTable, end)),
        _ => {
            let end = scalar_end(src, start, ctx);
            return (classify_scalar(&src[start..end]), end);
        }
    };
    match closed {
        Some(found) => found,
        None => (Kind::Unknown, scalar_end(src, start, ctx)),
    }
}

fn scalar_end(src: &[u8], start: usize, ctx: Context) -> usize {
    let mut end = start;
    while let Some(&b) = src.get(end) {
        let stop = match b {
            b'#' | b'\n' => true,
            b'\r' => src.get(end + 1) == Some(&b'\n'),
            b',' | b']' | b'}' => ctx == Context::Nested,
            _ => false,
        };
        if stop {
            break;
        }
        end += 1;
    }
    while end > start && lex::is_ws(src[end - 1]) {
        end -= 1;
    }
    end
}

fn classify_scalar(text: &[u8]) -> Kind {
    match text {
        b"true" => return Kind::True,
        b"false" => return Kind::False,
        _ => {}
    }
    let (signed, unsigned) = match text {
        [b'+' | b'-', rest @ ..] => (true, rest),
        _ => (false, text),
    };
    if unsigned == b"inf" || unsigned == b"nan" {
        return float_kind();
    }
    if let [b'0', b'x' | b'o' | b'b', ..] = unsigned {
        return Kind::Integer;
    }
    if !unsigned.first().is_some_and(u8::is_ascii_digit) {
        return Kind::Unknown;
    }
    if !signed && looks_like_datetime(unsigned) {
        return date_kind();
    }
    if unsigned.iter().any(|b| matches!(b, b'.' | b'e' | b'E')) {
        return float_kind();
    }
    Kind::Integer
}

/// `YYYY-MM-` starts a date, `HH:MM` starts a local time.
fn looks_like_datetime(text: &[u8]) -> bool {
    let digit = |i: usize| text.get(i).is_some_and(u8::is_ascii_digit);
    let at = |i: usize, b: u8| text.get(i) == Some(&b);
    let date = (0..4).all(digit) && at(4, b'-') && digit(5) && digit(6) && at(7, b'-');
    let time = digit(0) && digit(1) && at(2, b':') && digit(3) && digit(4);
    date || time
}

fn float_kind() -> Kind {
    if cfg!(feature = "float") {
        Kind::Float
    } else {
        Kind::Unknown
    }
}

fn date_kind() -> Kind {
    if cfg!(feature = "date") {
        Kind::Date
    } else {
        Kind::Unknown
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Normal,
    Comment,
    BasicString,
    LiteralString,
    BasicMultiline,
    LiteralMultiline,
    EscapePending { multiline: bool },
}

/// Walks the balanced `[...]` or `{...}` starting at `start` and returns the
/// offset just past the closing delimiter.
///
/// Brackets and braces share one depth counter. Returns `None` when the input
/// ends first or a single-line string runs into a newline.
pub(crate) fn scan_compound(src: &[u8], start: usize) -> Option<usize> {
    let mut state = State::Normal;
    let mut depth = 0u32;
    let mut i = start;
    while let Some(&b) = src.get(i) {
        match state {
            State::Normal => match b {
                b'[' | b'{' => depth += 1,
                b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                b'#' => state = State::Comment,
                b'"' | b'\'' => {
                    let multiline = lex::is_triple(src, i, b);
                    state = match (b, multiline) {
                        (b'"', false) => State::BasicString,
                        (b'"', true) => State::BasicMultiline,
                        (_, false) => State::LiteralString,
                        (_, true) => State::LiteralMultiline,
                    };
                    if multiline {
                        i += 3;
                        continue;
                    }
                }
                _ => {}
            },
            State::Comment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BasicString => match b {
                b'\\' => state = State::EscapePending { multiline: false },
                b'"' => state = State::Normal,
                b'\n' => return None,
                _ => {}
            },
            State::LiteralString => match b {
                b'\'' => state = State::Normal,
                b'\n' => return None,
                _ => {}
            },
            State::BasicMultiline | State::LiteralMultiline => {
                let quote = if state == State::BasicMultiline {
                    b'"'
                } else {
                    b'\''
                };
                if b == b'\\' && state == State::BasicMultiline {
                    state = State::EscapePending { multiline: true };
                } else if b == quote && lex::is_triple(src, i, quote) {
                    i = lex::multiline_close_end(src, i, quote);
                    state = State::Normal;
                    continue;
                }
            }
            State::EscapePending { multiline } => {
                if !multiline && (b == b'\n' || b == b'\r') {
                    return None;
                }
                state = if multiline {
                    State::BasicMultiline
                } else {
                    State::BasicString
                };
            }
        }
        i += 1;
    }
    None
}
