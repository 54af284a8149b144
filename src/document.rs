use crate::table::{self, Table};
use crate::{Error, ErrorKind, lex};

#[cfg(test)]
#[path = "./document_tests.rs"]
mod tests;

/// A borrowed TOML source.
///
/// The source ends at its first NUL byte, if any. Creating a document does
/// no parsing; every table, key and value is found lazily by the cursor
/// methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Document<'a> {
    src: &'a [u8],
}

impl<'a> Document<'a> {
    /// Wraps `source`, stopping at the first `\0`.
    ///
    /// Fails with [`ErrorKind::FileTooLarge`] if the source does not fit in
    /// 32-bit offsets.
    pub fn new<S: AsRef<[u8]> + ?Sized>(source: &'a S) -> Result<Self, Error> {
        let bytes = source.as_ref();
        let len = nul_position(bytes);
        if u32::try_from(len).is_err() {
            return Err(Error::new(ErrorKind::FileTooLarge, 0, 0));
        }
        Ok(Document { src: &bytes[..len] })
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.src
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.src.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    /// Zero based line and byte column of `offset`.
    pub fn line_col(&self, offset: u32) -> (usize, usize) {
        let offset = (offset as usize).min(self.src.len());
        let before = &self.src[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count();
        let line_start = before
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |i| i + 1);
        (line, offset - line_start)
    }

    /// The root table, whether or not it has any keys.
    pub fn root(&self) -> Table<'a> {
        Table::root(self.src)
    }

    /// Returns the table following `prev`, or the first table when `prev` is
    /// `None`.
    ///
    /// The root table comes first if anything other than whitespace and
    /// comments precedes the first header. Headers are yielded in source
    /// order; repeated headers are not merged.
    pub fn next_table(&self, prev: Option<&Table<'a>>) -> Result<Option<Table<'a>>, Error> {
        let pos = match prev {
            None => {
                let pos = lex::skip_blanks(self.src, 0);
                match self.src.get(pos) {
                    None => return Ok(None),
                    Some(b'[') => pos,
                    Some(_) => return Ok(Some(self.root())),
                }
            }
            Some(prev) => table::skip_body(self.src, prev.body as usize),
        };
        if pos >= self.src.len() {
            return Ok(None);
        }
        table::parse_header(self.src, pos).map(Some)
    }

    /// Iterator over all tables in source order.
    pub fn tables(&self) -> Tables<'a> {
        Tables {
            doc: *self,
            prev: None,
            done: false,
        }
    }
}

fn nul_position(bytes: &[u8]) -> usize {
    bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len())
}

/// Iterator returned by [`Document::tables`].
///
/// Yields an error at most once, after which it is exhausted.
pub struct Tables<'a> {
    doc: Document<'a>,
    prev: Option<Table<'a>>,
    done: bool,
}

impl<'a> Iterator for Tables<'a> {
    type Item = Result<Table<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.doc.next_table(self.prev.as_ref()) {
            Ok(Some(table)) => {
                self.prev = Some(table);
                Some(Ok(table))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Tables<'_> {}
