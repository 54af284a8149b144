use crate::decode::Unescape;
use crate::lex;
use crate::value::{Kind, Value};
use crate::{Error, ErrorKind, Span};
use std::fmt;

#[cfg(test)]
#[path = "./key_tests.rs"]
mod tests;

/// A cursor at a (possibly dotted) key or table header name.
///
/// The span runs from the first byte of the first atom to the last byte of
/// the last atom; whitespace around the dots is included.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Key<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) span: Span,
}

/// A single segment of a dotted key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Atom<'a> {
    src: &'a [u8],
    /// The atom including its quotes, if any.
    pub span: Span,
}

impl<'a> Atom<'a> {
    /// `true` for `"basic"` and `'literal'` atoms.
    pub fn is_quoted(&self) -> bool {
        matches!(self.raw().first(), Some(b'"' | b'\''))
    }

    pub fn raw(&self) -> &'a [u8] {
        self.span.slice(self.src)
    }

    fn bytes(&self) -> AtomBytes<'a> {
        if self.is_quoted() {
            AtomBytes::Quoted(Unescape::new(self.src, self.span))
        } else {
            AtomBytes::Bare(self.raw().iter())
        }
    }
}

/// Iterator over the [`Atom`]s of a [`Key`].
#[derive(Clone)]
pub struct Atoms<'a> {
    src: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Iterator for Atoms<'a> {
    type Item = Atom<'a>;

    fn next(&mut self) -> Option<Atom<'a>> {
        if self.pos >= self.end {
            return None;
        }
        let start = self.pos;
        let end = match self.src[start] {
            b'"' | b'\'' => lex::scan_string(self.src, start).unwrap_or(self.end),
            _ => {
                let mut end = start;
                while end < self.end && lex::is_bare_key_char(self.src[end]) {
                    end += 1;
                }
                end.max(start + 1)
            }
        }
        .min(self.end);
        // Skip the separating dot and any whitespace around it.
        let mut next = lex::skip_ws(self.src, end);
        if self.src.get(next) == Some(&b'.') {
            next = lex::skip_ws(self.src, next + 1);
        }
        self.pos = next.max(end);
        Some(Atom {
            src: self.src,
            span: Span::new(start as u32, end as u32),
        })
    }
}

impl std::iter::FusedIterator for Atoms<'_> {}

#[derive(Clone)]
enum AtomBytes<'a> {
    Bare(std::slice::Iter<'a, u8>),
    Quoted(Unescape<'a>),
}

impl Iterator for AtomBytes<'_> {
    type Item = Result<u8, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            AtomBytes::Bare(iter) => iter.next().map(|b| Ok(*b)),
            AtomBytes::Quoted(unescape) => unescape.next(),
        }
    }
}

/// Iterator over the normalized bytes of a key: atoms decoded and joined
/// with `.`.
#[derive(Clone)]
pub(crate) struct KeyBytes<'a> {
    atoms: Atoms<'a>,
    current: Option<AtomBytes<'a>>,
    started: bool,
}

impl Iterator for KeyBytes<'_> {
    type Item = Result<u8, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(byte) = current.next() {
                    return Some(byte);
                }
            }
            let atom = self.atoms.next()?;
            self.current = Some(atom.bytes());
            if self.started {
                return Some(Ok(b'.'));
            }
            self.started = true;
        }
    }
}

impl<'a> Key<'a> {
    /// Parses `name` as a TOML key, which must span the whole input apart
    /// from surrounding whitespace.
    pub(crate) fn parse(name: &'a [u8]) -> Option<Key<'a>> {
        let start = lex::skip_ws(name, 0);
        let end = lex::scan_key(name, start).ok()?;
        if lex::skip_ws(name, end) != name.len() {
            return None;
        }
        Some(Key {
            src: name,
            span: Span::new(start as u32, end as u32),
        })
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The key as written in the source.
    #[inline]
    pub fn raw(&self) -> &'a [u8] {
        self.span.slice(self.src)
    }

    /// `true` if the key has more than one atom.
    pub fn is_dotted(&self) -> bool {
        self.atoms().nth(1).is_some()
    }

    pub fn atoms(&self) -> Atoms<'a> {
        Atoms {
            src: self.src,
            pos: self.span.start as usize,
            end: self.span.end as usize,
        }
    }

    pub(crate) fn bytes(&self) -> KeyBytes<'a> {
        KeyBytes {
            atoms: self.atoms(),
            current: None,
            started: false,
        }
    }

    /// Length of the normalized key written by [`decode`](Self::decode).
    pub fn decoded_len(&self) -> Result<usize, Error> {
        let mut len = 0;
        for byte in self.bytes() {
            byte?;
            len += 1;
        }
        Ok(len)
    }

    /// Writes the normalized key into `out`: quoted atoms are decoded,
    /// whitespace around dots is dropped, and atoms are joined with `.`.
    ///
    /// Follows the same truncation rules as
    /// [`Value::decode_string`](crate::Value::decode_string).
    pub fn decode(&self, out: &mut [u8]) -> Result<usize, Error> {
        let required = self.decoded_len()?;
        for (slot, byte) in out.iter_mut().zip(self.bytes()) {
            *slot = byte?;
        }
        if required > out.len() {
            return Err(Error::from((
                ErrorKind::BufferTooSmall { required },
                self.span,
            )));
        }
        Ok(required)
    }

    /// Compares the normalized key with `name`, itself written in TOML key
    /// syntax, so `a . "b"` matches `"a.b"` and `a.b`.
    ///
    /// Returns `false` if `name` is not a valid key or either side contains
    /// an invalid escape.
    pub fn matches(&self, name: &str) -> bool {
        let Some(other) = Key::parse(name.as_bytes()) else {
            return false;
        };
        let mut ours = self.bytes();
        let mut theirs = other.bytes();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(Ok(a)), Some(Ok(b))) if a == b => {}
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key({:?} @ {}..{})",
            String::from_utf8_lossy(self.raw()),
            self.span.start,
            self.span.end
        )
    }
}

/// A `key = value` pair from a table or inline table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry<'a> {
    pub(crate) key: Key<'a>,
    pub(crate) value: Value<'a>,
    /// Where the next entry search starts.
    pub(crate) resume: u32,
}

impl<'a> Entry<'a> {
    #[inline]
    pub fn key(&self) -> Key<'a> {
        self.key
    }

    #[inline]
    pub fn value(&self) -> Value<'a> {
        self.value
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.value.kind
    }

    /// Span from the first byte of the key to the end of the value.
    pub fn span(&self) -> Span {
        Span::new(self.key.span.start, self.value.span.end)
    }
}
