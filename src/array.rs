//! Iteration over the elements of arrays and the entries of inline tables.

use crate::classify::Context;
use crate::key::Entry;
use crate::table::parse_pair;
use crate::value::{Kind, Value};
use crate::{Error, ErrorKind, lex};

#[cfg(test)]
#[path = "./array_tests.rs"]
mod tests;

impl<'a> Value<'a> {
    /// Returns the array element following `prev`, or the first element when
    /// `prev` is `None`.
    ///
    /// Whitespace, newlines, comments and a trailing comma are skipped.
    pub fn next_element(&self, prev: Option<&Value<'a>>) -> Result<Option<Value<'a>>, Error> {
        self.expect(Kind::Array)?;
        let Some(pos) = self.next_item_start(prev.map(|v| v.span.end))? else {
            return Ok(None);
        };
        Ok(Some(Value::scan(self.src, pos, Context::Nested)))
    }

    /// Returns the inline table entry following `prev`, or the first entry
    /// when `prev` is `None`.
    pub fn next_entry(&self, prev: Option<&Entry<'a>>) -> Result<Option<Entry<'a>>, Error> {
        self.expect(Kind::InlineTable)?;
        let Some(pos) = self.next_item_start(prev.map(|e| e.resume))? else {
            return Ok(None);
        };
        let (key, value) = parse_pair(self.src, pos, Context::Nested)?;
        Ok(Some(Entry {
            key,
            value,
            resume: value.span.end,
        }))
    }

    /// Finds the start of the next item inside this compound, given where
    /// the previous item ended.
    fn next_item_start(&self, prev_end: Option<u32>) -> Result<Option<usize>, Error> {
        let close = (self.span.end as usize).saturating_sub(1);
        let mut pos = match prev_end {
            None => self.span.start as usize + 1,
            Some(end) => end as usize,
        };
        pos = lex::skip_blanks(self.src, pos);
        if prev_end.is_some() {
            if pos >= close {
                return Ok(None);
            }
            if self.src[pos] != b',' {
                let (found, end) = lex::token_desc(self.src, pos);
                return Err(Error::new(
                    ErrorKind::Wanted {
                        expected: "a comma",
                        found,
                    },
                    pos,
                    end,
                ));
            }
            pos = lex::skip_blanks(self.src, pos + 1);
        }
        if pos >= close {
            return Ok(None);
        }
        Ok(Some(pos))
    }

    /// Iterator over the elements of an array.
    pub fn elements(&self) -> Elements<'a> {
        Elements {
            array: *self,
            prev: None,
            done: false,
        }
    }

    /// Iterator over the entries of an inline table.
    pub fn entries(&self) -> Entries<'a> {
        Entries {
            table: *self,
            prev: None,
            done: false,
        }
    }
}

/// Iterator returned by [`Value::elements`].
///
/// Yields an error at most once, after which it is exhausted.
pub struct Elements<'a> {
    array: Value<'a>,
    prev: Option<Value<'a>>,
    done: bool,
}

impl<'a> Iterator for Elements<'a> {
    type Item = Result<Value<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.array.next_element(self.prev.as_ref()) {
            Ok(Some(value)) => {
                self.prev = Some(value);
                Some(Ok(value))
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

impl std::iter::FusedIterator for Elements<'_> {}

/// Iterator returned by [`Value::entries`].
///
/// Yields an error at most once, after which it is exhausted.
pub struct Entries<'a> {
    table: Value<'a>,
    prev: Option<Entry<'a>>,
    done: bool,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Entry<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.table.next_entry(self.prev.as_ref()) {
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

impl std::iter::FusedIterator for Entries<'_> {}
