#![allow(missing_docs)]

use codespan_reporting::diagnostic::{Diagnostic, Label};
use toml_cursor::{Document, Error, Kind, Value};

pub type File<'s> = codespan_reporting::files::SimpleFile<&'static str, &'s str>;

pub fn emit_diags(
    f: &File<'_>,
    error: impl IntoIterator<Item = Diagnostic<()>>,
) -> String {
    let mut output = codespan_reporting::term::termcolor::NoColor::new(Vec::new());

    for diag in error {
        codespan_reporting::term::emit_to_write_style(
            &mut output,
            &codespan_reporting::term::Config::default(),
            f,
            &diag,
        )
        .expect("uhm...oops?");
    }

    String::from_utf8(output.into_inner()).unwrap()
}

fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Walks the whole document and renders one line per table, key, element and
/// inline entry, with scalars decoded.
///
/// Structural errors end the walk of the enclosing container and are printed
/// in place.
pub fn render(src: &str) -> String {
    let mut lines = Vec::new();
    let doc = match Document::new(src) {
        Ok(doc) => doc,
        Err(err) => return error_line(&err),
    };
    for table in doc.tables() {
        let table = match table {
            Ok(table) => table,
            Err(err) => {
                lines.push(error_line(&err));
                break;
            }
        };
        lines.push(match table.name() {
            None => "[root]".to_owned(),
            Some(name) if table.is_array() => format!("[[{}]]", lossy(name.raw())),
            Some(name) => format!("[{}]", lossy(name.raw())),
        });
        for entry in table.keys() {
            match entry {
                Ok(entry) => {
                    let label = format!("{}: ", lossy(entry.key().raw()));
                    render_value(&mut lines, 1, &label, &entry.value());
                }
                Err(err) => {
                    lines.push(format!("  {}", error_line(&err)));
                    break;
                }
            }
        }
    }
    lines.join("\n")
}

fn error_line(err: &Error) -> String {
    format!("error: {err} @ {}..{}", err.span.start, err.span.end)
}

fn render_value(lines: &mut Vec<String>, depth: usize, label: &str, value: &Value<'_>) {
    let indent = "  ".repeat(depth);
    match value.kind() {
        Kind::Array => {
            lines.push(format!("{indent}{label}array"));
            for element in value.elements() {
                match element {
                    Ok(element) => render_value(lines, depth + 1, "- ", &element),
                    Err(err) => {
                        lines.push(format!("{indent}  {}", error_line(&err)));
                        break;
                    }
                }
            }
        }
        Kind::InlineTable => {
            lines.push(format!("{indent}{label}inline-table"));
            for entry in value.entries() {
                match entry {
                    Ok(entry) => {
                        let label = format!("{}: ", lossy(entry.key().raw()));
                        render_value(lines, depth + 1, &label, &entry.value());
                    }
                    Err(err) => {
                        lines.push(format!("{indent}  {}", error_line(&err)));
                        break;
                    }
                }
            }
        }
        kind => {
            let decoded = match scalar(value) {
                Ok(text) => text,
                Err(err) => error_line(&err),
            };
            lines.push(format!("{indent}{label}{kind} = {decoded}"));
        }
    }
}

fn scalar(value: &Value<'_>) -> Result<String, Error> {
    Ok(match value.kind() {
        Kind::True | Kind::False => value.as_bool()?.to_string(),
        Kind::Integer => value.as_integer()?.to_string(),
        Kind::Float => format!("{:?}", value.as_float()?),
        Kind::Date => value.as_datetime()?.to_string(),
        Kind::String => format!("{:?}", lossy(&value.string_cow()?)),
        _ => format!("raw {:?}", lossy(value.raw())),
    })
}

/// Collects a diagnostic for every structural error, decode failure and
/// unknown value in the document.
pub fn collect_diags(src: &str) -> Vec<Diagnostic<()>> {
    let mut diags = Vec::new();
    let doc = match Document::new(src) {
        Ok(doc) => doc,
        Err(err) => {
            diags.push(err.to_diagnostic(()));
            return diags;
        }
    };
    for table in doc.tables() {
        let table = match table {
            Ok(table) => table,
            Err(err) => {
                diags.push(err.to_diagnostic(()));
                break;
            }
        };
        for entry in table.keys() {
            match entry {
                Ok(entry) => collect_value(&entry.value(), &mut diags),
                Err(err) => {
                    diags.push(err.to_diagnostic(()));
                    break;
                }
            }
        }
    }
    diags
}

fn collect_value(value: &Value<'_>, diags: &mut Vec<Diagnostic<()>>) {
    let nested: Result<(), Error> = match value.kind() {
        Kind::Array => value.elements().try_for_each(|element| {
            collect_value(&element?, diags);
            Ok(())
        }),
        Kind::InlineTable => value.entries().try_for_each(|entry| {
            collect_value(&entry?.value(), diags);
            Ok(())
        }),
        Kind::Unknown => {
            diags.push(
                Diagnostic::note()
                    .with_code("unknown")
                    .with_labels(vec![
                        Label::primary((), value.span()).with_message("unrecognized value"),
                    ]),
            );
            Ok(())
        }
        _ => scalar(value).map(drop),
    };
    if let Err(err) = nested {
        diags.push(err.to_diagnostic(()));
    }
}

/// Renders every diagnostic of `src` as plain text.
pub fn report(name: &'static str, src: &str) -> String {
    let file = File::new(name, src);
    emit_diags(&file, collect_diags(src))
}
