use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use twine_xml::{read_document, read_element, write_element};

const SIMPLE_XML: &str = "<root><child>text</child></root>";
const ATTR_XML: &str = "<root id=\"1\" name=\"test\"><item value=\"42\"/></root>";
const ESCAPED_XML: &str =
    "<p>1 &lt; 2 &amp;&amp; <![CDATA[raw < text]]> tail &#x2192; end</p>";
const DOC_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- prologue -->\n<feed><entry id=\"1\">first</entry><entry id=\"2\"/></feed>";

fn bench_parse_simple(c: &mut Criterion) {
    c.bench_function("parse_element_simple", |b| {
        b.iter(|| read_element(black_box(SIMPLE_XML)))
    });
}

fn bench_parse_attrs(c: &mut Criterion) {
    c.bench_function("parse_element_attrs", |b| {
        b.iter(|| read_element(black_box(ATTR_XML)))
    });
}

fn bench_parse_escapes(c: &mut Criterion) {
    c.bench_function("parse_element_escapes", |b| {
        b.iter(|| read_element(black_box(ESCAPED_XML)))
    });
}

fn bench_parse_document(c: &mut Criterion) {
    c.bench_function("parse_document", |b| {
        b.iter(|| read_document(black_box(DOC_XML)))
    });
}

fn bench_write(c: &mut Criterion) {
    let tree = read_element(ATTR_XML).expect("benchmark input parses");
    c.bench_function("write_element_attrs", |b| {
        b.iter(|| write_element(black_box(&tree)))
    });
}

criterion_group!(
    benches,
    bench_parse_simple,
    bench_parse_attrs,
    bench_parse_escapes,
    bench_parse_document,
    bench_write
);
criterion_main!(benches);
