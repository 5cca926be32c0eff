//! Serialization tests over the public API

use twine_xml::{
    content, element, read_element, write_content, write_document, write_element,
    write_external_entity, Content, Element, Item, NO_ATTRS,
};

#[test]
fn acceptance_example_div() {
    let b = Element::empty("b").unwrap();
    let div = element("div", NO_ATTRS, [Item::from("x"), Item::from(b), Item::from("y")]).unwrap();
    assert_eq!(write_element(&div), "<div>x<b/>y</div>");
}

#[test]
fn canonical_empty_content_always_self_closes() {
    // However the element was constructed, empty content means the
    // self-closing form.
    let built = Element::empty("a").unwrap();
    let parsed = read_element("<a></a>").unwrap();
    assert_eq!(write_element(&built), "<a/>");
    assert_eq!(write_element(&parsed), "<a/>");
}

#[test]
fn whitespace_only_content_is_not_empty() {
    let e = element("a", NO_ATTRS, [" "]).unwrap();
    assert_eq!(write_element(&e), "<a> </a>");
}

#[test]
fn attribute_order_is_deterministic() {
    let forward = element("e", [("alpha", "1"), ("beta", "2"), ("gamma", "3")], Vec::<Item>::new())
        .unwrap();
    let reverse = element("e", [("gamma", "3"), ("beta", "2"), ("alpha", "1")], Vec::<Item>::new())
        .unwrap();
    let text = write_element(&forward);
    assert_eq!(text, write_element(&reverse));
    assert_eq!(text, "<e alpha=\"1\" beta=\"2\" gamma=\"3\"/>");
}

#[test]
fn serialization_is_idempotent() {
    let e = read_element("<r b=\"2\" a=\"1\">x&lt;y<c/></r>").unwrap();
    let first = write_element(&e);
    let second = write_element(&e);
    assert_eq!(first, second);
}

#[test]
fn char_data_metacharacters_are_escaped() {
    let c = content(["2 < 3 & 4 > 3"]).unwrap();
    assert_eq!(write_content(&c), "2 &#x3C; 3 &#x26; 4 > 3");
}

#[test]
fn cdata_end_sequence_cannot_appear_in_output() {
    let c = content(["a]]>b"]).unwrap();
    let text = write_content(&c);
    assert!(!text.contains("]]>"));
    assert_eq!(text, "a]]&#x3E;b");
}

#[test]
fn carriage_return_survives_round_trip_via_escape() {
    // A literal CR in the tree must not reach output bare, or parsing
    // would canonicalize it away.
    let c = content(["a\rb"]).unwrap();
    assert_eq!(write_content(&c), "a&#xD;b");
}

#[test]
fn attribute_values_use_double_quotes_and_escape_whitespace() {
    let e = element("a", [("x", "tab\there \"and\" line\nbreak")], Vec::<Item>::new()).unwrap();
    assert_eq!(
        write_element(&e),
        "<a x=\"tab&#x9;here &#x22;and&#x22; line&#xA;break\"/>"
    );
}

#[test]
fn document_declaration_forms() {
    let root = Element::empty("r").unwrap();
    assert_eq!(
        write_document(&root, None).unwrap(),
        "<?xml version=\"1.0\" standalone=\"yes\"?><r/>"
    );
    assert_eq!(
        write_document(&root, Some("ISO-8859-1")).unwrap(),
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" standalone=\"yes\"?><r/>"
    );
}

#[test]
fn document_rejects_invalid_encoding_name() {
    let root = Element::empty("r").unwrap();
    assert!(write_document(&root, Some("8-bit")).is_err());
    assert!(write_document(&root, Some("")).is_err());
}

#[test]
fn external_entity_declaration_only_with_encoding() {
    let c = content(["x"]).unwrap();
    assert_eq!(write_external_entity(&c, None).unwrap(), "x");
    assert_eq!(
        write_external_entity(&c, Some("UTF-8")).unwrap(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>x"
    );
}

#[test]
fn empty_content_writes_as_empty_string() {
    assert_eq!(write_content(&Content::empty()), "");
}

#[test]
fn written_documents_reparse() {
    let root = element(
        "doc",
        [("version", "2"), ("about", "<escaping> & such")],
        [
            Item::from("intro "),
            Item::from(element("item", [("id", "1")], ["first"]).unwrap()),
            Item::from(" outro"),
        ],
    )
    .unwrap();
    let text = write_document(&root, Some("UTF-8")).unwrap();
    let reparsed = twine_xml::read_document(&text).unwrap();
    assert_eq!(reparsed, root);
}
