use super::*;

fn names<'a>(doc: &Document<'a>) -> Vec<String> {
    doc.tables()
        .map(|t| {
            let t = t.unwrap();
            match t.name() {
                Some(name) => String::from_utf8_lossy(name.raw()).into_owned(),
                None => "<root>".to_owned(),
            }
        })
        .collect()
}

#[test]
fn stops_at_nul() {
    let doc = Document::new(b"a = 1\0[ignored]\n").unwrap();
    assert_eq!(doc.as_bytes(), b"a = 1");
    assert_eq!(doc.len(), 5);
    assert_eq!(names(&doc), ["<root>"]);

    let doc = Document::new("\0a = 1").unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.next_table(None), Ok(None));
}

#[test]
fn empty_and_blank_documents() {
    for src in ["", "   \n\t\n", "# just a comment\n\n# another"] {
        let doc = Document::new(src).unwrap();
        assert_eq!(doc.next_table(None), Ok(None), "{src:?}");
        assert_eq!(doc.tables().count(), 0);
    }
}

#[test]
fn root_only_when_content_precedes_headers() {
    let doc = Document::new("# header comment\n\n[a]\nx = 1\n").unwrap();
    assert_eq!(names(&doc), ["a"]);

    let doc = Document::new("x = 1\n[a]\n").unwrap();
    assert_eq!(names(&doc), ["<root>", "a"]);

    let doc = Document::new("x = 1\ny = 2\n").unwrap();
    let tables: Vec<_> = doc.tables().collect::<Result<_, _>>().unwrap();
    assert_eq!(tables.len(), 1);
    assert!(tables[0].is_root());
    assert_eq!(tables[0].offset(), 0);
}

#[test]
fn tables_in_source_order() {
    let src = "[a]\n[b.c]\n[[d]]\n[ a ]\n[[d]]\n['e f'.\"g\"]\n";
    let doc = Document::new(src).unwrap();
    assert_eq!(names(&doc), ["a", "b.c", "d", "a", "d", "'e f'.\"g\""]);
}

#[test]
fn table_cursor_follows_header() {
    let src = "title = 1\n[owner]\nname = 2\n";
    let doc = Document::new(src).unwrap();
    let root = doc.next_table(None).unwrap().unwrap();
    assert!(root.is_root());
    let owner = doc.next_table(Some(&root)).unwrap().unwrap();
    assert_eq!(owner.offset() as usize, src.find("]\n").unwrap() + 1);
    assert_eq!(owner.header_span(), Some(crate::Span::new(10, 17)));
    assert_eq!(doc.next_table(Some(&owner)), Ok(None));
}

#[test]
fn brackets_inside_values_are_not_headers() {
    let src = "s = \"\"\"\n[not]\n\"\"\"\narr = [\n[1],\n[2],\n]\n[real]\n";
    let doc = Document::new(src).unwrap();
    assert_eq!(names(&doc), ["<root>", "real"]);
}

#[test]
fn malformed_headers() {
    let doc = Document::new("[a\nx = 1").unwrap();
    let err = doc.next_table(None).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::Wanted {
            expected: "a right bracket",
            found: "a newline"
        }
    );
    assert_eq!(err.span, crate::Span::new(2, 3));

    let doc = Document::new("[]").unwrap();
    assert!(doc.next_table(None).is_err());

    let doc = Document::new("[[a] ]").unwrap();
    assert!(doc.next_table(None).is_err());

    let mut tables = Document::new("[ok]\n[bad\n[never]").unwrap().tables();
    assert!(tables.next().unwrap().is_ok());
    assert!(tables.next().unwrap().is_err());
    assert!(tables.next().is_none());
}

#[test]
fn line_and_column() {
    let doc = Document::new("a = 1\nbb = 2\n").unwrap();
    assert_eq!(doc.line_col(0), (0, 0));
    assert_eq!(doc.line_col(4), (0, 4));
    assert_eq!(doc.line_col(6), (1, 0));
    assert_eq!(doc.line_col(11), (1, 5));
    assert_eq!(doc.line_col(1000), (2, 0));
}
