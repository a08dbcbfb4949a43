//! Parse layout text into a validated [`Schema`] using PEST.
//!
//! ```text
//! layout qa_pixel: u16 {
//!     fill: bit 0;
//!     cloud: bit 3 = "cloud";
//!     cloud_confidence: bits 8-9 {
//!         0 = "none";
//!         1 = "low";
//!         2 = "medium";
//!         3 = "high";
//!     }
//!     extra: bits 12-15;
//! }
//! ```
//!
//! `bit N` declares a single bit, `bits A-B` an inclusive range. A label
//! block attaches a code-to-label map; `= "label"` on a single bit is
//! shorthand for `{ 0 = "no label"; 1 = "label"; }`. Plain fields decode
//! numerically. The crate never reads files: callers load the text
//! themselves and hand it to [`parse`].

use crate::schema::{BitField, Schema};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct LayoutParser;

/// A parsed layout: the band name from the header plus its validated schema.
#[derive(Debug, Clone)]
pub struct Layout {
    pub name: String,
    pub schema: Schema,
}

/// Parse layout source into a [`Layout`].
pub fn parse(source: &str) -> Result<Layout, String> {
    let pairs = LayoutParser::parse(Rule::layout_file, source)
        .map_err(|e| format!("Parse error: {}", e))?;
    let file = pairs.into_iter().next().ok_or("Empty parse")?;
    let layout = file
        .into_inner()
        .find(|p| p.as_rule() == Rule::layout)
        .ok_or("Missing layout block")?;
    build_layout(layout)
}

fn build_layout(pair: Pair<Rule>) -> Result<Layout, String> {
    let mut name = String::new();
    let mut word_width = 0u32;
    let mut fields = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::word_type => {
                word_width = match inner.as_str() {
                    "u8" => 8,
                    "u16" => 16,
                    "u32" => 32,
                    "u64" => 64,
                    other => return Err(format!("unknown word type: {}", other)),
                }
            }
            Rule::field => fields.push(build_field(inner)?),
            _ => {}
        }
    }
    if name.is_empty() {
        return Err("layout: missing name".to_string());
    }
    let schema = Schema::from_fields(word_width, fields).map_err(|e| e.to_string())?;
    Ok(Layout { name, schema })
}

fn build_field(pair: Pair<Rule>) -> Result<BitField, String> {
    let mut name = String::new();
    let mut offset = 0u32;
    let mut width = 0u32;
    let mut labels: Vec<(u64, String)> = Vec::new();
    let mut shorthand = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::single_bit => {
                let position = inner.into_inner().next().ok_or("bit: missing position")?;
                offset = parse_position(position.as_str())?;
                width = 1;
            }
            Rule::bit_range => {
                let mut it = inner.into_inner();
                let start = parse_position(it.next().ok_or("bits: missing start")?.as_str())?;
                let end = parse_position(it.next().ok_or("bits: missing end")?.as_str())?;
                if start > end {
                    return Err(format!(
                        "field {}: start bit must not exceed end bit",
                        name
                    ));
                }
                offset = start;
                width = end - start + 1;
            }
            Rule::shorthand => {
                let text = inner.into_inner().next().ok_or("shorthand: missing label")?;
                shorthand = Some(string_text(text));
            }
            Rule::label_block => {
                for entry in inner.into_inner() {
                    if entry.as_rule() != Rule::label_entry {
                        continue;
                    }
                    let mut it = entry.into_inner();
                    let code = it
                        .next()
                        .ok_or("label: missing code")?
                        .as_str()
                        .parse::<u64>()
                        .map_err(|e| format!("label code: {}", e))?;
                    let label = string_text(it.next().ok_or("label: missing text")?);
                    labels.push((code, label));
                }
            }
            _ => {}
        }
    }
    if let Some(positive) = shorthand {
        if width != 1 {
            return Err(format!(
                "field {}: `= \"label\"` shorthand needs a single bit",
                name
            ));
        }
        labels.push((0, format!("no {}", positive)));
        labels.push((1, positive));
    }
    BitField::with_labels(&name, offset, width, labels).map_err(|e| e.to_string())
}

fn string_text(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

fn parse_position(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|e| format!("bit position {}: {}", s, e))
}
