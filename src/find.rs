//! Lookup by name, index and key path.
//!
//! Lookups are linear scans built on the cursor iterators; nothing is
//! indexed or cached. Names are written in TOML key syntax and compared
//! after normalization, see [`Key::matches`](crate::Key::matches).

use crate::document::Document;
use crate::key::Entry;
use crate::table::Table;
use crate::value::{Kind, Value};
use crate::Error;

#[cfg(test)]
#[path = "./find_tests.rs"]
mod tests;

impl<'a> Document<'a> {
    /// Finds the first table whose header name matches `name`.
    ///
    /// The empty name finds the root table. For arrays of tables the first
    /// occurrence is returned.
    pub fn find_table(&self, name: &str) -> Result<Option<Table<'a>>, Error> {
        if name.is_empty() {
            return Ok(Some(self.root()));
        }
        for table in self.tables() {
            let table = table?;
            if table.name().is_some_and(|key| key.matches(name)) {
                return Ok(Some(table));
            }
        }
        Ok(None)
    }

    /// Resolves a colon separated path such as `"servers.alpha:ports:0"`.
    ///
    /// The first segment names a table (empty for the root table). Each
    /// following segment is a key of the current table or inline table, or
    /// a decimal index into the current array. A path without any `:` names
    /// no value and resolves to `None`.
    pub fn find_path(&self, path: &str) -> Result<Option<Value<'a>>, Error> {
        let mut segments = path.split(':');
        let Some(table_name) = segments.next() else {
            return Ok(None);
        };
        let Some(first_key) = segments.next() else {
            return Ok(None);
        };
        let Some(table) = self.find_table(table_name)? else {
            return Ok(None);
        };
        let Some(entry) = table.find_key(first_key)? else {
            return Ok(None);
        };
        let mut current = entry.value();
        for segment in segments {
            let next = match current.kind() {
                Kind::Array => match segment.parse::<usize>() {
                    Ok(index) => current.element(index)?,
                    Err(_) => None,
                },
                Kind::InlineTable => current.find_entry(segment)?.map(|e| e.value()),
                _ => None,
            };
            let Some(next) = next else {
                return Ok(None);
            };
            current = next;
        }
        Ok(Some(current))
    }
}

impl<'a> Table<'a> {
    /// Finds the first key line of this table whose key matches `name`.
    pub fn find_key(&self, name: &str) -> Result<Option<Entry<'a>>, Error> {
        for entry in self.keys() {
            let entry = entry?;
            if entry.key().matches(name) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

impl<'a> Value<'a> {
    /// Finds the first entry of an inline table whose key matches `name`.
    pub fn find_entry(&self, name: &str) -> Result<Option<Entry<'a>>, Error> {
        for entry in self.entries() {
            let entry = entry?;
            if entry.key().matches(name) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// Returns the array element at `index`.
    pub fn element(&self, index: usize) -> Result<Option<Value<'a>>, Error> {
        for (i, element) in self.elements().enumerate() {
            let element = element?;
            if i == index {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }
}
