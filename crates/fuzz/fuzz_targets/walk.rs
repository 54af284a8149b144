#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_cursor::{Document, Kind, Span, Value};

fn check_span(src: &[u8], span: Span) {
    assert!(span.start <= span.end);
    assert!(span.end as usize <= src.len());
}

fn visit(src: &[u8], value: &Value<'_>) {
    check_span(src, value.span());
    let len = match value.kind() {
        Kind::Array => {
            let mut last = None;
            for element in value.elements() {
                let Ok(element) = element else { break };
                if let Some(last) = last {
                    assert!(element.offset() > last);
                }
                last = Some(element.offset());
                visit(src, &element);
            }
            return;
        }
        Kind::InlineTable => {
            for entry in value.entries() {
                let Ok(entry) = entry else { break };
                check_span(src, entry.key().span());
                visit(src, &entry.value());
            }
            return;
        }
        Kind::String => value.string_len(),
        Kind::Integer => value.as_integer().map(|_| 0),
        Kind::Float => value.as_float().map(|_| 0),
        Kind::Date => value.as_datetime().map(|_| 0),
        Kind::True | Kind::False => value.as_bool().map(|_| 0),
        Kind::Unknown => return,
    };
    if let (Kind::String, Ok(len)) = (value.kind(), len) {
        let mut buf = vec![0u8; len];
        assert_eq!(value.decode_string(&mut buf), Ok(len));
        assert_eq!(value.string_cow().unwrap(), buf);
        if len > 0 {
            let err = value.decode_string(&mut buf[..len - 1]).unwrap_err();
            assert_eq!(
                err.kind,
                toml_cursor::ErrorKind::BufferTooSmall { required: len }
            );
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = Document::new(data) else {
        return;
    };
    let src = doc.as_bytes();
    for table in doc.tables() {
        let Ok(table) = table else { break };
        let mut last = None;
        for entry in table.keys() {
            let Ok(entry) = entry else { break };
            let offset = entry.key().span().start;
            if let Some(last) = last {
                assert!(offset > last);
            }
            last = Some(offset);
            assert!(entry.key().atoms().count() > 0);
            let _ = entry.key().decoded_len();
            visit(src, &entry.value());
        }
    }
});
