#![allow(clippy::question_mark)]
use crate::Span;
use std::fmt::{self, Debug, Display};

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

/// Error produced while walking or decoding a TOML document.
///
/// Errors never invalidate the cursors they were produced from; `span` points
/// at the offending bytes so callers can report a diagnostic and either skip
/// the line or stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The span where the error occurs.
    pub span: Span,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self { kind, span }
    }
}

impl Error {
    #[cold]
    pub(crate) fn new(kind: ErrorKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start as u32, end as u32),
        }
    }
}

/// The kinds of errors that can occur while walking a document.
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// EOF was reached when looking for a key, value or delimiter.
    UnexpectedEof,

    /// The input file is larger than the maximum supported size of 4GiB.
    FileTooLarge,

    /// An invalid character not allowed in a string was found.
    InvalidCharInString(char),

    /// An invalid character was found as an escape.
    InvalidEscape(char),

    /// An invalid character was found in a hex escape.
    InvalidHexEscape(char),

    /// An invalid escape value was specified in a hex escape in a string.
    ///
    /// Valid values are in the plane of unicode codepoints.
    InvalidEscapeValue(u32),

    /// An unterminated string was found where EOF or a newline was found
    /// before the closing delimiter.
    UnterminatedString,

    /// Multiline strings are not allowed for keys or table names.
    MultilineStringKey,

    /// A number does not match the integer or float grammar.
    InvalidNumber,

    /// A value does not match the RFC 3339 subset used by TOML.
    InvalidDateTime,

    /// The number cannot be represented by the target type.
    OutOfRange(&'static str),

    /// The caller supplied output buffer cannot hold the decoded bytes.
    BufferTooSmall {
        /// Number of bytes the complete decoded value requires.
        required: usize,
    },

    /// Wanted one sort of token, but found another.
    Wanted {
        /// Expected token type.
        expected: &'static str,
        /// Actually found token type.
        found: &'static str,
    },
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedEof => "unexpected-eof",
            Self::FileTooLarge => "file-too-large",
            Self::InvalidCharInString(..) => "invalid-char-in-string",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::InvalidHexEscape(..) => "invalid-hex-escape",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::UnterminatedString => "unterminated-string",
            Self::MultilineStringKey => "multiline-string-key",
            Self::InvalidNumber => "invalid-number",
            Self::InvalidDateTime => "invalid-datetime",
            Self::OutOfRange(_) => "out-of-range",
            Self::BufferTooSmall { .. } => "buffer-too-small",
            Self::Wanted { .. } => "wanted",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

macro_rules! rtry {
    ($($tt:tt)*) => {
        if let Err(err) = $($tt)* {
            return Err(err);
        }
    };
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => f.write_str("unexpected eof encountered"),
            ErrorKind::FileTooLarge => f.write_str("file is too large (maximum 4GiB)"),
            ErrorKind::InvalidCharInString(c) => {
                rtry!(f.write_str("invalid character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidEscape(c) => {
                rtry!(f.write_str("invalid escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidHexEscape(c) => {
                rtry!(f.write_str("invalid hex escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidEscapeValue(c) => {
                rtry!(f.write_str("invalid escape value: `"));
                rtry!(write!(f, "{c:#x}"));
                f.write_str("`")
            }
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::MultilineStringKey => {
                f.write_str("multiline strings are not allowed for key")
            }
            ErrorKind::InvalidNumber => f.write_str("invalid number"),
            ErrorKind::InvalidDateTime => f.write_str("invalid date-time"),
            ErrorKind::OutOfRange(kind) => {
                rtry!(f.write_str("out of range of '"));
                rtry!(f.write_str(kind));
                f.write_str("'")
            }
            ErrorKind::BufferTooSmall { required } => {
                write!(f, "output buffer too small, {required} bytes required")
            }
            ErrorKind::Wanted { expected, found } => {
                rtry!(f.write_str("expected "));
                rtry!(f.write_str(expected));
                rtry!(f.write_str(", found "));
                f.write_str(found)
            }
        }
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        let diag =
            codespan_reporting::diagnostic::Diagnostic::error().with_code(self.kind.to_string());

        use codespan_reporting::diagnostic::Label;

        let span: std::ops::Range<usize> = self.span.into();
        match &self.kind {
            ErrorKind::InvalidCharInString(c) => diag.with_labels(vec![
                Label::primary(fid, span)
                    .with_message(format!("invalid character '{}' in string", Escape(*c))),
            ]),
            ErrorKind::InvalidEscape(c) => {
                diag.with_labels(vec![Label::primary(fid, span).with_message(format!(
                    "invalid escape character '{}' in string",
                    Escape(*c)
                ))])
            }
            ErrorKind::InvalidHexEscape(c) => diag.with_labels(vec![
                Label::primary(fid, span)
                    .with_message(format!("invalid hex escape '{}'", Escape(*c))),
            ]),
            ErrorKind::InvalidEscapeValue(_) => diag.with_labels(vec![
                Label::primary(fid, span).with_message("invalid escape value"),
            ]),
            ErrorKind::UnterminatedString => diag.with_labels(vec![
                Label::primary(fid, span).with_message("eof reached before string terminator"),
            ]),
            ErrorKind::MultilineStringKey => diag.with_labels(vec![
                Label::primary(fid, span).with_message("multiline keys are not allowed"),
            ]),
            ErrorKind::InvalidNumber => diag.with_labels(vec![
                Label::primary(fid, span).with_message("unable to parse number"),
            ]),
            ErrorKind::InvalidDateTime => diag.with_labels(vec![
                Label::primary(fid, span).with_message("unable to parse date-time"),
            ]),
            ErrorKind::OutOfRange(kind) => diag
                .with_message(format!("number is out of range of '{kind}'"))
                .with_labels(vec![Label::primary(fid, span)]),
            ErrorKind::BufferTooSmall { required } => diag
                .with_message(format!("decoding requires {required} bytes"))
                .with_labels(vec![Label::primary(fid, span)]),
            ErrorKind::Wanted { expected, .. } => diag.with_labels(vec![
                Label::primary(fid, span).with_message(format!("expected {expected}")),
            ]),
            ErrorKind::UnexpectedEof => diag
                .with_message("unexpected end of file")
                .with_labels(vec![Label::primary(fid, span)]),
            ErrorKind::FileTooLarge => diag
                .with_message("file is too large (maximum 4GiB)")
                .with_labels(vec![Label::primary(fid, span)]),
        }
    }
}
