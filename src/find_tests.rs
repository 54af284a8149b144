use super::*;
use crate::ErrorKind;

const SRC: &str = r#"
title = "example"
owner.name = "Tom"

[servers.alpha]
ip = "10.0.0.1"
ports = [ 8000, 8001, [ 1, 2 ] ]
limits = { cpu = 2, "mem usage" = { soft = 512 } }

[[products]]
name = "Hammer"

[[products]]
name = "Nail"
"#;

fn doc() -> Document<'static> {
    Document::new(SRC).unwrap()
}

fn int_at(path: &str) -> i64 {
    doc().find_path(path).unwrap().unwrap().as_integer().unwrap()
}

#[test]
fn tables_by_name() {
    let doc = doc();
    let alpha = doc.find_table("servers.alpha").unwrap().unwrap();
    assert_eq!(alpha.name().unwrap().raw(), b"servers.alpha");
    assert!(doc.find_table("servers . \"alpha\"").unwrap().is_some());
    assert!(doc.find_table("servers").unwrap().is_none());
    assert!(doc.find_table("missing").unwrap().is_none());
    assert!(doc.find_table("").unwrap().unwrap().is_root());

    let first = doc.find_table("products").unwrap().unwrap();
    assert!(first.is_array());
    let name = first.find_key("name").unwrap().unwrap();
    assert_eq!(name.value().raw(), b"\"Hammer\"");
}

#[test]
fn keys_by_name() {
    let root = doc().root();
    assert!(root.find_key("title").unwrap().is_some());
    assert!(root.find_key("owner.name").unwrap().is_some());
    assert!(root.find_key("owner").unwrap().is_none());
    assert!(root.find_key("ip").unwrap().is_none());
}

#[test]
fn inline_entries_and_elements() {
    let alpha = doc().find_table("servers.alpha").unwrap().unwrap();
    let limits = alpha.find_key("limits").unwrap().unwrap().value();
    let cpu = limits.find_entry("cpu").unwrap().unwrap();
    assert_eq!(cpu.value().as_integer(), Ok(2));
    assert!(limits.find_entry("\"mem usage\"").unwrap().is_some());
    assert!(limits.find_entry("gpu").unwrap().is_none());

    let ports = alpha.find_key("ports").unwrap().unwrap().value();
    assert_eq!(ports.element(1).unwrap().unwrap().as_integer(), Ok(8001));
    assert!(ports.element(3).unwrap().is_none());
}

#[test]
fn paths() {
    assert_eq!(int_at("servers.alpha:ports:0"), 8000);
    assert_eq!(int_at("servers.alpha:ports:2:1"), 2);
    assert_eq!(int_at("servers.alpha:limits:cpu"), 2);
    assert_eq!(int_at("servers.alpha:limits:\"mem usage\":soft"), 512);

    let doc = doc();
    let title = doc.find_path(":title").unwrap().unwrap();
    assert_eq!(title.raw(), b"\"example\"");
    assert!(doc.find_path(":owner.name").unwrap().is_some());

    for missing in [
        "",
        "title",
        "servers.alpha",
        "servers.alpha:nope",
        "servers.alpha:ports:9",
        "servers.alpha:ports:x",
        "servers.alpha:ip:0",
        "nope:title",
    ] {
        assert_eq!(doc.find_path(missing), Ok(None), "{missing:?}");
    }
}

#[test]
fn lookup_propagates_structural_errors() {
    let doc = Document::new("a = 1\noops\n[t]\n").unwrap();
    let err = doc.root().find_key("b").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Wanted { .. }));

    let doc = Document::new("a = [1 2, \"x\" 3]").unwrap();
    let array = doc.root().find_key("a").unwrap().unwrap().value();
    assert!(array.element(0).unwrap().is_some());
    assert!(array.element(2).is_err());
}
