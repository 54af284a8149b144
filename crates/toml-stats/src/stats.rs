//! Walks a document and tallies what it finds.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use foldhash::HashMap;
use std::fmt::Write as _;
use toml_cursor::{Document, Error, Key, Kind, Span, Table, Value};

#[cfg(test)]
#[path = "./stats_tests.rs"]
mod tests;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub tables: usize,
    /// Key lines plus inline table entries.
    pub keys: usize,
    kinds: [usize; Kind::ALL.len()],
}

impl Stats {
    pub fn count(&self, kind: Kind) -> usize {
        self.kinds[kind as usize]
    }

    fn record(&mut self, kind: Kind) {
        self.kinds[kind as usize] += 1;
    }

    pub fn bools(&self) -> usize {
        self.count(Kind::True) + self.count(Kind::False)
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  {:2} table(s)", self.tables)?;
        writeln!(f, "  {:2} key(s)", self.keys)?;
        writeln!(f, "  {:2} bool(s)", self.bools())?;
        writeln!(f, "  {:2} integer(s)", self.count(Kind::Integer))?;
        writeln!(f, "  {:2} string(s)", self.count(Kind::String))?;
        writeln!(f, "  {:2} float(s)", self.count(Kind::Float))?;
        writeln!(f, "  {:2} date(s)", self.count(Kind::Date))?;
        writeln!(f, "  {:2} unknown(s)", self.count(Kind::Unknown))?;
        writeln!(f, "  {:2} array(s)", self.count(Kind::Array))?;
        write!(f, "  {:2} inline-table(s)", self.count(Kind::InlineTable))
    }
}

/// Everything learned from one document.
#[derive(Default)]
pub struct Report {
    pub stats: Stats,
    pub diags: Vec<Diagnostic<()>>,
    /// `path = value` lines, only filled when values were requested.
    pub values: Vec<String>,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.diags
            .iter()
            .any(|d| d.severity == codespan_reporting::diagnostic::Severity::Error)
    }
}

struct Walker {
    report: Report,
    collect_values: bool,
    headers: HashMap<String, Span>,
}

pub fn walk(doc: &Document<'_>, collect_values: bool) -> Report {
    let mut walker = Walker {
        report: Report::default(),
        collect_values,
        headers: HashMap::default(),
    };
    for table in doc.tables() {
        match table {
            Ok(table) => walker.table(&table),
            Err(err) => {
                walker.error(&err);
                break;
            }
        }
    }
    walker.report
}

fn normalized(key: &Key<'_>) -> Result<String, Error> {
    let mut buf = vec![0u8; key.decoded_len()?];
    key.decode(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Walker {
    fn error(&mut self, err: &Error) {
        self.report.diags.push(err.to_diagnostic(()));
    }

    fn table(&mut self, table: &Table<'_>) {
        self.report.stats.tables += 1;
        let mut path = String::new();
        if let (Some(name), Some(header)) = (table.name(), table.header_span()) {
            match normalized(&name) {
                Ok(name) => path = name,
                Err(err) => return self.error(&err),
            }
            if !table.is_array() {
                self.check_duplicate(&path, header);
            }
        }
        for entry in table.keys() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return self.error(&err),
            };
            self.report.stats.keys += 1;
            let key = match normalized(&entry.key()) {
                Ok(key) => key,
                Err(err) => {
                    self.error(&err);
                    continue;
                }
            };
            let path = join(&path, &key);
            self.value(&path, &entry.value());
        }
    }

    fn check_duplicate(&mut self, name: &str, header: Span) {
        if let Some(first) = self.headers.get(name) {
            self.report.diags.push(
                Diagnostic::warning()
                    .with_code("duplicate-table")
                    .with_message(format!("table `{name}` is defined more than once"))
                    .with_labels(vec![
                        Label::secondary((), *first).with_message("first defined here"),
                        Label::primary((), header).with_message("defined again"),
                    ]),
            );
        } else {
            self.headers.insert(name.to_owned(), header);
        }
    }

    fn value(&mut self, path: &str, value: &Value<'_>) {
        let kind = value.kind();
        self.report.stats.record(kind);
        match kind {
            Kind::Array => {
                for (i, element) in value.elements().enumerate() {
                    match element {
                        Ok(element) => self.value(&format!("{path}[{i}]"), &element),
                        Err(err) => return self.error(&err),
                    }
                }
            }
            Kind::InlineTable => {
                for entry in value.entries() {
                    let entry = match entry {
                        Ok(entry) => entry,
                        Err(err) => return self.error(&err),
                    };
                    self.report.stats.keys += 1;
                    match normalized(&entry.key()) {
                        Ok(key) => self.value(&join(path, &key), &entry.value()),
                        Err(err) => self.error(&err),
                    }
                }
            }
            Kind::Unknown => self.report.diags.push(
                Diagnostic::warning()
                    .with_code("unknown-value")
                    .with_message(format!("`{path}` has a value of unknown type"))
                    .with_labels(vec![Label::primary((), value.span())]),
            ),
            _ => match scalar(value) {
                Ok(text) => {
                    if self.collect_values {
                        self.report.values.push(format!("{path} = {text}"));
                    }
                }
                Err(err) => self.error(&err),
            },
        }
    }
}

fn join(table: &str, key: &str) -> String {
    if table.is_empty() {
        key.to_owned()
    } else {
        format!("{table}.{key}")
    }
}

/// Decodes a scalar into its display form.
pub fn scalar(value: &Value<'_>) -> Result<String, Error> {
    let mut out = String::new();
    match value.kind() {
        Kind::True | Kind::False => {
            let _ = write!(out, "{}", value.as_bool()?);
        }
        Kind::Integer => {
            let _ = write!(out, "{}", value.as_integer()?);
        }
        Kind::Float => {
            let mut buffer = zmij::Buffer::new();
            out.push_str(buffer.format(value.as_float()?));
        }
        Kind::Date => {
            let _ = write!(out, "{}", value.as_datetime()?);
        }
        Kind::String => {
            let mut buf = vec![0u8; value.string_len()?];
            value.decode_string(&mut buf)?;
            let _ = write!(out, "{:?}", String::from_utf8_lossy(&buf));
        }
        _ => out.push_str(&String::from_utf8_lossy(value.raw())),
    }
    Ok(out)
}
