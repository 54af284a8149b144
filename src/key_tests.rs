use super::*;

fn key(src: &str) -> Key<'_> {
    Key::parse(src.as_bytes()).unwrap()
}

fn normalized(key: &Key<'_>) -> String {
    let mut buf = vec![0u8; key.decoded_len().unwrap()];
    assert_eq!(key.decode(&mut buf), Ok(buf.len()));
    String::from_utf8(buf).unwrap()
}

#[test]
fn atoms_of_dotted_keys() {
    let k = key("site . \"google.com\".'x y'");
    let atoms: Vec<&[u8]> = k.atoms().map(|a| a.raw()).collect();
    assert_eq!(atoms, [&b"site"[..], b"\"google.com\"", b"'x y'"]);
    let quoted: Vec<bool> = k.atoms().map(|a| a.is_quoted()).collect();
    assert_eq!(quoted, [false, true, true]);
    assert!(k.is_dotted());
    assert!(!key("plain").is_dotted());
    assert!(!key("\"a.b\"").is_dotted());
}

#[test]
fn normalization() {
    assert_eq!(normalized(&key("a")), "a");
    assert_eq!(normalized(&key("a.b.c")), "a.b.c");
    assert_eq!(normalized(&key("a . b\t. c")), "a.b.c");
    assert_eq!(normalized(&key("\"quoted\"")), "quoted");
    assert_eq!(normalized(&key("site.\"google.com\"")), "site.google.com");
    assert_eq!(normalized(&key("'C:\\dir'")), "C:\\dir");
    assert_eq!(normalized(&key("\"\\u00e9t\\u00e9\"")), "été");
    assert_eq!(normalized(&key("\"\"")), "");
    assert_eq!(normalized(&key("a.\"\".b")), "a..b");
}

#[test]
fn decode_truncates_and_reports() {
    let k = key("alpha.beta");
    let mut out = [0u8; 4];
    let err = k.decode(&mut out).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BufferTooSmall { required: 10 });
    assert_eq!(&out, b"alph");
    assert_eq!(err.span, Span::new(0, 10));
}

#[test]
fn invalid_escapes_in_keys() {
    let k = key("\"bad\\q\"");
    assert_eq!(
        k.decoded_len().unwrap_err().kind,
        ErrorKind::InvalidEscape('q')
    );
    assert!(!k.matches("badq"));
}

#[test]
fn matching() {
    let k = key("a . \"b\"");
    assert!(k.matches("a.b"));
    assert!(k.matches("a . b"));
    assert!(k.matches("\"a\".'b'"));
    assert!(!k.matches("a"));
    assert!(!k.matches("a.b.c"));
    assert!(!k.matches("a.c"));
    assert!(!k.matches(""));
    assert!(!k.matches("a b"));

    assert!(key("\"has space\"").matches("\"has space\""));
    assert!(key("\"\\u0041\"").matches("A"));
    assert!(key("dog.\"tater.man\"").matches("dog.tater.man"));
}

#[test]
fn parse_rejects_partial_names() {
    assert!(Key::parse(b"a b").is_none());
    assert!(Key::parse(b"a.").is_none());
    assert!(Key::parse(b"").is_none());
    assert!(Key::parse(b"=").is_none());
    assert_eq!(Key::parse(b"  a.b  ").unwrap().raw(), b"a.b");
}

#[test]
fn debug_output() {
    let src = b"x = 1\n\"k\" = 2";
    let k = Key {
        src,
        span: Span::new(6, 9),
    };
    assert_eq!(format!("{k:?}"), "Key(\"\\\"k\\\"\" @ 6..9)");
}
