//! Layout language tests: syntax (parse success/failure) and semantics
//! (schema validation surfaced through parse).

use bitband::{parse, FieldValue};

// ==================== Syntax: valid layouts ====================

#[test]
fn parse_minimal_layout() {
    let src = r#"
layout qa: u8 {
  cloud: bit 0;
}
"#;
    let layout = parse(src).expect("parse");
    assert_eq!(layout.name, "qa");
    assert_eq!(layout.schema.word_width(), 8);
    assert_eq!(layout.schema.fields().len(), 1);
    assert_eq!(layout.schema.fields()[0].name(), "cloud");
    assert_eq!(layout.schema.fields()[0].width(), 1);
}

#[test]
fn parse_empty_layout() {
    let layout = parse("layout empty: u16 { }").expect("parse");
    assert!(layout.schema.is_empty());
    assert_eq!(layout.schema.word_width(), 16);
}

#[test]
fn parse_all_word_types() {
    for (word, width) in [("u8", 8), ("u16", 16), ("u32", 32), ("u64", 64)] {
        let src = format!("layout w: {} {{ x: bit 0; }}", word);
        let layout = parse(&src).expect("parse");
        assert_eq!(layout.schema.word_width(), width, "word type {}", word);
    }
}

#[test]
fn parse_bit_range_field() {
    let src = r#"
layout qa: u16 {
  confidence: bits 8-9;
}
"#;
    let layout = parse(src).expect("parse");
    let f = layout.schema.field("confidence").expect("field");
    assert_eq!(f.offset(), 8);
    assert_eq!(f.width(), 2);
    assert!(!f.has_labels());
}

#[test]
fn parse_single_position_range() {
    let layout = parse("layout qa: u8 { x: bits 3-3; }").expect("parse");
    let f = layout.schema.field("x").expect("field");
    assert_eq!(f.offset(), 3);
    assert_eq!(f.width(), 1);
}

#[test]
fn parse_label_block() {
    let src = r#"
layout qa: u8 {
  confidence: bits 1-2 {
    0 = "none";
    1 = "low";
    2 = "medium";
    3 = "high";
  }
}
"#;
    let layout = parse(src).expect("parse");
    let f = layout.schema.field("confidence").expect("field");
    assert_eq!(f.labels().count(), 4);
    assert_eq!(f.label_for(2), Some("medium"));
    assert_eq!(f.code_for("high"), Some(3));
}

#[test]
fn parse_single_bit_shorthand() {
    let src = r#"
layout qa: u8 {
  snow: bit 5 = "snow";
}
"#;
    let layout = parse(src).expect("parse");
    let f = layout.schema.field("snow").expect("field");
    assert_eq!(f.label_for(0), Some("no snow"));
    assert_eq!(f.label_for(1), Some("snow"));
}

#[test]
fn parse_with_comments() {
    let src = r#"
// Landsat-style layout
layout qa: u8 {
  fill: bit 0; // fill flag
  /* block comment */
  cloud: bit 3 = "cloud";
}
"#;
    let layout = parse(src).expect("parse");
    assert_eq!(layout.schema.fields().len(), 2);
}

#[test]
fn parse_labels_with_spaces_and_aliases() {
    let src = r#"
layout qa: u8 {
  shadow: bits 0-1 {
    1 = "shadow low prob";
    2 = "shadow high prob";
    3 = "shadow high prob";
  }
}
"#;
    let layout = parse(src).expect("parse");
    let f = layout.schema.field("shadow").expect("field");
    assert_eq!(f.code_for("shadow high prob"), Some(2));
}

#[test]
fn parse_fields_keep_declaration_order() {
    let src = r#"
layout qa: u16 {
  high: bits 8-11;
  low: bits 0-3;
}
"#;
    let layout = parse(src).expect("parse");
    let names: Vec<&str> = layout.schema.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["high", "low"]);
}

#[test]
fn parsed_layout_decodes() {
    let src = r#"
layout qa: u8 {
  cloud: bit 0 { 0 = "clear"; 1 = "cloud"; }
  extra: bits 4-7;
}
"#;
    let layout = parse(src).expect("parse");
    let codec = bitband::Codec::new(&layout.schema);
    let record = codec.decode_one(0b0101_0001).expect("decode");
    assert_eq!(record.get("cloud"), Some(&FieldValue::Label("cloud".into())));
    assert_eq!(record.get("extra"), Some(&FieldValue::Code(5)));
}

// ==================== Syntax: parse errors ====================

#[test]
fn parse_empty_source_fails() {
    assert!(parse("").is_err());
}

#[test]
fn parse_unclosed_brace_fails() {
    let src = r#"
layout qa: u8 {
  x: bit 0;
"#;
    assert!(parse(src).is_err());
}

#[test]
fn parse_wrong_keyword_fails() {
    assert!(parse("layut qa: u8 { x: bit 0; }").is_err());
}

#[test]
fn parse_missing_word_type_fails() {
    assert!(parse("layout qa { x: bit 0; }").is_err());
}

#[test]
fn parse_unknown_word_type_fails() {
    assert!(parse("layout qa: u12 { x: bit 0; }").is_err());
}

#[test]
fn parse_field_without_semicolon_fails() {
    let src = r#"
layout qa: u8 {
  x: bit 0
}
"#;
    assert!(parse(src).is_err());
}

#[test]
fn parse_label_entry_without_semicolon_fails() {
    let src = r#"
layout qa: u8 {
  x: bit 0 { 0 = "clear" }
}
"#;
    assert!(parse(src).is_err());
}

#[test]
fn parse_trailing_garbage_fails() {
    assert!(parse("layout qa: u8 { x: bit 0; } extra").is_err());
}

// ==================== Semantics: schema errors through parse ====================

#[test]
fn reversed_bit_range_fails() {
    let src = r#"
layout qa: u8 {
  x: bits 5-2;
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("start bit"));
}

#[test]
fn shorthand_on_multi_bit_range_fails() {
    let src = r#"
layout qa: u8 {
  x: bits 0-1 = "wide";
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("single bit"));
}

#[test]
fn duplicate_field_name_fails() {
    let src = r#"
layout qa: u8 {
  x: bit 0;
  x: bit 1;
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("duplicate field name"));
}

#[test]
fn overlapping_fields_fail() {
    let src = r#"
layout qa: u8 {
  a: bits 0-3;
  b: bits 3-4;
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("overlaps"));
}

#[test]
fn field_past_word_end_fails() {
    let src = r#"
layout qa: u8 {
  x: bits 6-8;
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("8-bit word"));
}

#[test]
fn label_code_out_of_field_range_fails() {
    let src = r#"
layout qa: u8 {
  x: bits 0-1 {
    4 = "impossible";
  }
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("does not fit"));
}

#[test]
fn duplicate_label_code_fails() {
    let src = r#"
layout qa: u8 {
  x: bits 0-1 {
    1 = "a";
    1 = "b";
  }
}
"#;
    let r = parse(src);
    assert!(r.is_err());
    assert!(r.unwrap_err().contains("declared twice"));
}
