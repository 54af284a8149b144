use super::*;

#[test]
fn display_all_error_kinds() {
    let cases: Vec<(ErrorKind, &str)> = vec![
        (ErrorKind::UnexpectedEof, "unexpected-eof"),
        (ErrorKind::FileTooLarge, "file-too-large"),
        (ErrorKind::InvalidCharInString('x'), "invalid-char-in-string"),
        (ErrorKind::InvalidEscape('z'), "invalid-escape"),
        (ErrorKind::InvalidHexEscape('g'), "invalid-hex-escape"),
        (ErrorKind::InvalidEscapeValue(0xD800), "invalid-escape-value"),
        (ErrorKind::UnterminatedString, "unterminated-string"),
        (ErrorKind::MultilineStringKey, "multiline-string-key"),
        (ErrorKind::InvalidNumber, "invalid-number"),
        (ErrorKind::InvalidDateTime, "invalid-datetime"),
        (ErrorKind::OutOfRange("i64"), "out-of-range"),
        (ErrorKind::BufferTooSmall { required: 3 }, "buffer-too-small"),
        (
            ErrorKind::Wanted {
                expected: "an equals",
                found: "a newline",
            },
            "wanted",
        ),
    ];
    for (kind, code) in cases {
        assert_eq!(kind.to_string(), code);
        assert_eq!(format!("{kind:?}"), code);
    }
}

#[test]
fn error_messages() {
    let err = |kind| Error::from((kind, Span::new(0, 1)));

    assert_eq!(
        err(ErrorKind::OutOfRange("i64")).to_string(),
        "out of range of 'i64'"
    );
    assert_eq!(
        err(ErrorKind::Wanted {
            expected: "an equals",
            found: "a newline"
        })
        .to_string(),
        "expected an equals, found a newline"
    );
    assert_eq!(
        err(ErrorKind::BufferTooSmall { required: 12 }).to_string(),
        "output buffer too small, 12 bytes required"
    );
    assert_eq!(
        err(ErrorKind::InvalidEscape('\t')).to_string(),
        "invalid escape character in string: `\\t`"
    );
    assert_eq!(
        err(ErrorKind::InvalidEscapeValue(0xD800)).to_string(),
        "invalid escape value: `0xd800`"
    );
    assert_eq!(
        err(ErrorKind::InvalidCharInString('\u{7}')).to_string(),
        "invalid character in string: `\\u{7}`"
    );
}

#[test]
fn error_new_records_span() {
    let e = Error::new(ErrorKind::InvalidNumber, 4, 9);
    assert_eq!(e.span, Span::new(4, 9));
    assert_eq!(e.kind, ErrorKind::InvalidNumber);
}

#[cfg(feature = "reporting")]
#[test]
fn diagnostic_carries_code_and_label() {
    let e = Error::new(ErrorKind::InvalidNumber, 6, 10);
    let diag = e.to_diagnostic(());
    assert_eq!(diag.code.as_deref(), Some("invalid-number"));
    assert_eq!(diag.labels.len(), 1);
    assert_eq!(diag.labels[0].range, 6..10);
}
