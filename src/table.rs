use crate::classify::Context;
use crate::key::{Entry, Key};
use crate::value::Value;
use crate::{Error, ErrorKind, Span, lex};

#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

/// How a table was introduced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Keys before the first header.
    Root,
    /// `[name]`
    Standard,
    /// `[[name]]`, one table per occurrence.
    ArrayOfTables,
}

/// A cursor at a table.
///
/// For headed tables the cursor sits at the first byte after the closing
/// `]` of the header; for the root table it is the start of the document.
/// The table's region extends to the next header or the end of the source.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) kind: TableKind,
    /// Whole header including brackets; empty for the root table.
    pub(crate) header: Span,
    pub(crate) name: Span,
    pub(crate) body: u32,
}

impl<'a> Table<'a> {
    pub(crate) fn root(src: &'a [u8]) -> Self {
        Table {
            src,
            kind: TableKind::Root,
            header: Span::at(0),
            name: Span::at(0),
            body: 0,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.kind == TableKind::Root
    }

    /// `true` for `[[name]]` tables.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.kind == TableKind::ArrayOfTables
    }

    #[inline]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Offset of the first byte after the header.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.body
    }

    /// The header name, `None` for the root table.
    pub fn name(&self) -> Option<Key<'a>> {
        if self.is_root() {
            return None;
        }
        Some(Key {
            src: self.src,
            span: self.name,
        })
    }

    /// Span of the header including its brackets, `None` for the root table.
    pub fn header_span(&self) -> Option<Span> {
        (!self.is_root()).then_some(self.header)
    }

    /// Span from the table cursor to the next header or end of input.
    pub fn region(&self) -> Span {
        Span::new(self.body, skip_body(self.src, self.body as usize) as u32)
    }

    /// Returns the key line following `prev`, or the first key line of the
    /// table when `prev` is `None`. Stops at the next header.
    ///
    /// A line that is not of the form `key = value` is an error; the error
    /// span points at the offending bytes.
    pub fn next_key(&self, prev: Option<&Entry<'a>>) -> Result<Option<Entry<'a>>, Error> {
        let start = prev.map_or(self.body, |prev| prev.resume) as usize;
        let pos = lex::skip_blanks(self.src, start);
        match self.src.get(pos) {
            None | Some(b'[') => Ok(None),
            Some(_) => parse_key_line(self.src, pos).map(Some),
        }
    }

    /// Iterator over the key lines of this table.
    pub fn keys(&self) -> Keys<'a> {
        Keys {
            table: *self,
            prev: None,
            done: false,
        }
    }
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Table");
        s.field("kind", &self.kind);
        if let Some(name) = self.name() {
            s.field("name", &String::from_utf8_lossy(name.raw()));
        }
        s.field("offset", &self.body).finish()
    }
}

/// Parses `key = value` at `pos`; the entry resumes on the following line.
pub(crate) fn parse_key_line(src: &[u8], pos: usize) -> Result<Entry<'_>, Error> {
    let (key, value) = parse_pair(src, pos, Context::TopLevel)?;
    Ok(Entry {
        key,
        value,
        resume: lex::next_line(src, value.span.end as usize) as u32,
    })
}

/// Parses `key = value` at `pos` without consuming anything after the value.
pub(crate) fn parse_pair(
    src: &[u8],
    pos: usize,
    ctx: Context,
) -> Result<(Key<'_>, Value<'_>), Error> {
    let key_end = lex::scan_key(src, pos)?;
    let eq = lex::skip_ws(src, key_end);
    if src.get(eq) != Some(&b'=') {
        let (found, end) = lex::token_desc(src, eq);
        return Err(Error::new(
            ErrorKind::Wanted {
                expected: "an equals",
                found,
            },
            eq,
            end,
        ));
    }
    let key = Key {
        src,
        span: Span::new(pos as u32, key_end as u32),
    };
    let value = Value::scan(src, lex::skip_ws(src, eq + 1), ctx);
    Ok((key, value))
}

/// Parses the header starting at the `[` at `pos`.
pub(crate) fn parse_header(src: &[u8], pos: usize) -> Result<Table<'_>, Error> {
    let is_array = src.get(pos + 1) == Some(&b'[');
    let name_start = lex::skip_ws(src, pos + 1 + is_array as usize);
    let name_end = lex::scan_key(src, name_start)?;
    let mut end = lex::skip_ws(src, name_end);
    for _ in 0..1 + is_array as usize {
        if src.get(end) != Some(&b']') {
            let (found, token_end) = lex::token_desc(src, end);
            return Err(Error::new(
                ErrorKind::Wanted {
                    expected: "a right bracket",
                    found,
                },
                end,
                token_end,
            ));
        }
        end += 1;
    }
    Ok(Table {
        src,
        kind: if is_array {
            TableKind::ArrayOfTables
        } else {
            TableKind::Standard
        },
        header: Span::new(pos as u32, end as u32),
        name: Span::new(name_start as u32, name_end as u32),
        body: end as u32,
    })
}

/// Offset of the next header at or after `pos`, or `src.len()`.
///
/// Key lines are parsed rather than scanned line by line so that `[` at the
/// start of a line inside a multi-line string or array is not mistaken for
/// a header. Lines that do not parse are skipped.
pub(crate) fn skip_body(src: &[u8], mut pos: usize) -> usize {
    loop {
        pos = lex::skip_blanks(src, pos);
        match src.get(pos) {
            None | Some(b'[') => return pos,
            Some(_) => {
                pos = match parse_key_line(src, pos) {
                    Ok(entry) => entry.resume as usize,
                    Err(_) => lex::next_line(src, pos),
                };
            }
        }
    }
}

/// Iterator returned by [`Table::keys`].
///
/// Yields an error at most once, after which it is exhausted.
pub struct Keys<'a> {
    table: Table<'a>,
    prev: Option<Entry<'a>>,
    done: bool,
}

impl<'a> Iterator for Keys<'a> {
    type Item = Result<Entry<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.table.next_key(self.prev.as_ref()) {
            Ok(Some(entry)) => {
                self.prev = Some(entry);
                Some(Ok(entry))
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

impl std::iter::FusedIterator for Keys<'_> {}
