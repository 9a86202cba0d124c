//! Integration tests for SVG output
//!
//! Every document is fed through a standard XML parser to check that it is
//! well-formed and that elements come out in input order.

use barcode_render::{render_vector, Raster, RenderError, RenderOptions, Rgb, SymbolGeometry, Vector};
use proptest::prelude::*;
use roxmltree::{Document, ParsingOptions};

fn parse(svg: &str) -> Document<'_> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(svg, options).expect("SVG is not well-formed XML")
}

fn sample_symbol() -> Vector {
    Vector::new(64.4, 32.0)
        .rect(4.0, 0.0, 1.5, 24.0)
        .rect(7.25, 0.0, 3.0, 24.0)
        .hexagon(20.0, 10.0, 4.0)
        .hexagon(24.0, 10.0, 4.0)
        .circle(40.0, 10.0, 6.0, false)
        .circle(40.0, 10.0, 2.0, true)
        .text(32.0, 30.0, 8.0, "<&>\"'")
}

#[test]
fn test_document_is_well_formed() {
    let options = RenderOptions::default()
        .with_foreground(Rgb::new(0x11, 0x22, 0x33))
        .with_background(Rgb::new(0xee, 0xdd, 0xcc));
    let svg = render_vector(&sample_symbol().into(), &options).unwrap();
    let doc = parse(&svg);

    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.tag_name().namespace(), Some("http://www.w3.org/2000/svg"));
    assert_eq!(root.attribute("width"), Some("65"));
    assert_eq!(root.attribute("height"), Some("32"));

    let group = root
        .children()
        .find(|n| n.has_tag_name("g"))
        .expect("missing group");
    assert_eq!(group.attribute("id"), Some("barcode"));
    assert_eq!(group.attribute("fill"), Some("#112233"));

    let names: Vec<&str> = group
        .children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(names, ["rect", "rect", "rect", "path", "path", "circle", "circle", "text"]);

    let background = group.children().find(|n| n.is_element()).unwrap();
    assert_eq!(background.attribute("fill"), Some("#EEDDCC"));
    assert_eq!(background.attribute("width"), Some("65"));

    let circles: Vec<_> = group.children().filter(|n| n.has_tag_name("circle")).collect();
    assert_eq!(circles[0].attribute("fill"), Some("#112233"));
    assert_eq!(circles[1].attribute("fill"), Some("#EEDDCC"));
    assert_eq!(circles[0].attribute("r"), Some("3.00"));
}

#[test]
fn test_text_is_escaped() {
    let svg = render_vector(&sample_symbol().into(), &RenderOptions::default()).unwrap();
    assert!(svg.contains("&lt;&amp;&gt;&quot;&#39;"));

    let doc = parse(&svg);
    let text = doc
        .descendants()
        .find(|n| n.has_tag_name("text"))
        .expect("missing text");
    assert_eq!(text.text().map(str::trim), Some("<&>\"'"));
    assert_eq!(text.attribute("text-anchor"), Some("middle"));
}

#[test]
fn test_empty_symbol() {
    let svg = render_vector(&Vector::new(0.0, 0.0).into(), &RenderOptions::default()).unwrap();
    let doc = parse(&svg);
    assert_eq!(doc.root_element().attribute("width"), Some("0"));
    assert!(svg.ends_with("</g>\n</svg>\n"));
}

#[test]
fn test_raster_is_rejected() {
    let geometry: SymbolGeometry = Raster::from_rows(&["1"]).unwrap().into();
    assert!(matches!(
        render_vector(&geometry, &RenderOptions::default()),
        Err(RenderError::TypeMismatch { .. })
    ));
}

#[test]
fn test_oversized_document_fails() {
    let mut vector = Vector::new(100.0, 100.0);
    // Each rectangle line is over 60 bytes, so this passes 4 MiB.
    vector.rectangles = (0..80_000)
        .map(|i| barcode_render::Rect {
            x: (i % 100) as f32,
            y: (i / 100) as f32,
            width: 1.0,
            height: 1.0,
        })
        .collect();
    assert!(matches!(
        render_vector(&vector.into(), &RenderOptions::default()),
        Err(RenderError::OutputTooLarge { limit }) if limit == 4 * 1024 * 1024
    ));
}

#[test]
fn test_non_finite_coordinates_fail() {
    let vector = Vector::new(10.0, 10.0).circle(f32::NAN, 1.0, 1.0, false);
    assert!(matches!(
        render_vector(&vector.into(), &RenderOptions::default()),
        Err(RenderError::MalformedGeometry(_))
    ));
}

#[test]
fn test_labels_outside_xml_fail() {
    for label in ["A\u{1}B", "x\0y", "\u{FFFE}"] {
        let vector = Vector::new(10.0, 10.0).text(5.0, 9.0, 4.0, label);
        assert!(
            matches!(
                render_vector(&vector.into(), &RenderOptions::default()),
                Err(RenderError::MalformedGeometry(_))
            ),
            "label {label:?} rendered"
        );
    }
}

#[test]
fn test_whitespace_labels_stay_well_formed() {
    let vector = Vector::new(10.0, 10.0).text(5.0, 9.0, 4.0, "a\tb\nc");
    let svg = render_vector(&vector.into(), &RenderOptions::default()).unwrap();
    let doc = parse(&svg);
    let text = doc.descendants().find(|n| n.has_tag_name("text")).unwrap();
    assert_eq!(text.text().map(str::trim), Some("a\tb\nc"));
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"'é]{0,24}"
}

proptest! {
    /// Arbitrary labels and primitives always yield parseable XML
    #[test]
    fn prop_svg_well_formed(
        label in label_strategy(),
        rects in prop::collection::vec((0f32..500.0, 0f32..500.0, 0f32..20.0, 0f32..20.0), 0..20),
        hexes in prop::collection::vec((0f32..500.0, 0f32..500.0, 0f32..10.0), 0..10),
    ) {
        let mut vector = Vector::new(500.0, 500.0).text(250.0, 490.0, 10.0, label.clone());
        for (x, y, w, h) in rects {
            vector = vector.rect(x, y, w, h);
        }
        for (x, y, d) in hexes {
            vector = vector.hexagon(x, y, d);
        }
        let geometry = SymbolGeometry::Vector(vector);
        let svg = render_vector(&geometry, &RenderOptions::default()).unwrap();

        let doc = parse(&svg);
        let text = doc.descendants().find(|n| n.has_tag_name("text")).unwrap();
        prop_assert_eq!(text.text().unwrap_or("").trim(), label.trim());

        // Same input, same bytes.
        prop_assert_eq!(render_vector(&geometry, &RenderOptions::default()).unwrap(), svg);
    }
}
