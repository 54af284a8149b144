use crate::classify::{self, Context};
use crate::decode;
use crate::{Error, ErrorKind, Span};
use std::borrow::Cow;
use std::fmt;

#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

/// The kind of a TOML value, as determined by [`classify`](crate::classify).
///
/// `Float` and `Date` are only produced when the `float` and `date` features
/// are enabled; otherwise those values classify as `Unknown`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Kind {
    /// Bytes that do not form any recognized value.
    #[default]
    Unknown,
    False,
    True,
    Integer,
    Float,
    /// Offset date-time, local date-time, local date or local time.
    Date,
    String,
    Array,
    InlineTable,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 9] = [
        Kind::Unknown,
        Kind::False,
        Kind::True,
        Kind::Integer,
        Kind::Float,
        Kind::Date,
        Kind::String,
        Kind::Array,
        Kind::InlineTable,
    ];

    /// Short lowercase name, e.g. `"inline-table"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::False => "false",
            Kind::True => "true",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Date => "date",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::InlineTable => "inline-table",
        }
    }

    /// Description used in error messages, e.g. `"an integer"`.
    pub fn describe(self) -> &'static str {
        match self {
            Kind::Unknown => "an unknown value",
            Kind::False | Kind::True => "a boolean",
            Kind::Integer => "an integer",
            Kind::Float => "a float",
            Kind::Date => "a date-time",
            Kind::String => "a string",
            Kind::Array => "an array",
            Kind::InlineTable => "an inline table",
        }
    }

    pub fn is_bool(self) -> bool {
        matches!(self, Kind::True | Kind::False)
    }

    /// Arrays and inline tables.
    pub fn is_compound(self) -> bool {
        matches!(self, Kind::Array | Kind::InlineTable)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cursor at a value in the source.
///
/// The span covers the whole value: scalars without trailing whitespace or
/// comments, strings including their quotes, and compounds from the opening
/// bracket to the matching close.
///
/// Decoding never changes the cursor, so every accessor can be called any
/// number of times.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Value<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) span: Span,
    pub(crate) kind: Kind,
}

impl<'a> Value<'a> {
    pub(crate) fn scan(src: &'a [u8], start: usize, ctx: Context) -> Self {
        let (kind, end) = classify::scan_value(src, start, ctx);
        Value {
            src,
            span: Span::new(start as u32, end as u32),
            kind,
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Byte offset of the first byte of the value.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.span.start
    }

    /// The undecoded source bytes of the value.
    #[inline]
    pub fn raw(&self) -> &'a [u8] {
        self.span.slice(self.src)
    }

    pub(crate) fn expect(&self, kind: Kind) -> Result<(), Error> {
        if self.kind == kind {
            return Ok(());
        }
        Err(self.wanted(kind.describe()))
    }

    pub(crate) fn wanted(&self, expected: &'static str) -> Error {
        Error::from((
            ErrorKind::Wanted {
                expected,
                found: self.kind.describe(),
            },
            self.span,
        ))
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        if !self.kind.is_bool() {
            return Err(self.wanted("a boolean"));
        }
        decode::boolean_in(self.src, self.span)
    }

    pub fn as_integer(&self) -> Result<i64, Error> {
        self.expect(Kind::Integer)?;
        decode::integer_in(self.src, self.span)
    }

    /// Decodes the string into `out` and returns the decoded length.
    ///
    /// When `out` is too small the bytes that fit are written and
    /// [`ErrorKind::BufferTooSmall`] carries the required length, so a caller
    /// can retry with a larger buffer:
    ///
    /// ```
    /// let doc = toml_cursor::Document::new("name = \"caf\\u00e9\"")?;
    /// let root = doc.root();
    /// let entry = root.next_key(None)?.unwrap();
    /// let mut small = [0u8; 2];
    /// let err = entry.value().decode_string(&mut small).unwrap_err();
    /// let toml_cursor::ErrorKind::BufferTooSmall { required } = err.kind else {
    ///     unreachable!()
    /// };
    /// let mut buf = vec![0u8; required];
    /// let len = entry.value().decode_string(&mut buf)?;
    /// assert_eq!(&buf[..len], "café".as_bytes());
    /// # Ok::<(), toml_cursor::Error>(())
    /// ```
    pub fn decode_string(&self, out: &mut [u8]) -> Result<usize, Error> {
        self.expect(Kind::String)?;
        decode::string_in(self.src, self.span, out)
    }

    /// Length of the decoded string, for sizing the buffer passed to
    /// [`decode_string`](Self::decode_string).
    pub fn string_len(&self) -> Result<usize, Error> {
        self.expect(Kind::String)?;
        decode::string_len_in(self.src, self.span)
    }

    /// Decodes the string, borrowing from the source when it contains no
    /// escapes.
    pub fn string_cow(&self) -> Result<Cow<'a, [u8]>, Error> {
        self.expect(Kind::String)?;
        decode::string_cow_in(self.src, self.span)
    }

    #[cfg(feature = "float")]
    #[cfg_attr(docsrs, doc(cfg(feature = "float")))]
    pub fn as_float(&self) -> Result<f64, Error> {
        self.expect(Kind::Float)?;
        decode::float_in(self.src, self.span)
    }

    #[cfg(feature = "date")]
    #[cfg_attr(docsrs, doc(cfg(feature = "date")))]
    pub fn as_datetime(&self) -> Result<crate::DateTime, Error> {
        self.expect(Kind::Date)?;
        decode::datetime_in(self.src, self.span)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind)
            .field("span", &(self.span.start..self.span.end))
            .field("raw", &String::from_utf8_lossy(self.raw()))
            .finish()
    }
}
