//! Format schemas and records for display.

use crate::schema::Schema;
use crate::value::{FieldValue, Record};

/// One-line rendering of a decoded value.
pub fn value_summary(value: &FieldValue) -> String {
    match value {
        FieldValue::Code(code) => format!("{}", code),
        FieldValue::Label(label) => label.clone(),
        FieldValue::Undefined(code) => format!("undefined({})", code),
    }
}

/// Multi-line rendering of one record, one `field: value` line per field.
/// Labeled values carry their canonical code in parentheses.
pub fn record_to_dump(schema: &Schema, record: &Record) -> String {
    let mut lines = Vec::with_capacity(record.len());
    for (name, value) in record.iter() {
        let line = match value {
            FieldValue::Label(label) => match schema.field(name).and_then(|f| f.code_for(label)) {
                Some(code) => format!("{}: {} ({})", name, label, code),
                None => format!("{}: {}", name, label),
            },
            _ => format!("{}: {}", name, value_summary(value)),
        };
        lines.push(line);
    }
    lines.join("\n")
}

/// Bit-layout table for a schema: one line per field in declaration order,
/// plus a trailing line counting reserved bits when there are any.
pub fn schema_to_dump(schema: &Schema) -> String {
    let mut lines = vec![format!("word: {} bits", schema.word_width())];
    for field in schema.fields() {
        let range = if field.width() == 1 {
            format!("bit {}", field.offset())
        } else {
            format!(
                "bits {}-{}",
                field.offset(),
                field.offset() + field.width() - 1
            )
        };
        if field.has_labels() {
            let labels = field
                .labels()
                .map(|(code, label)| format!("{}={}", code, label))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("{} ({}): {}", field.name(), range, labels));
        } else {
            lines.push(format!("{} ({})", field.name(), range));
        }
    }
    let reserved = schema.reserved_mask();
    if reserved != 0 {
        lines.push(format!("reserved: {} bit(s)", reserved.count_ones()));
    }
    lines.join("\n")
}

/// Flat list of display names, one per declared label entry, in declaration
/// order. Unlabeled fields contribute their field name alone.
pub fn label_names(schema: &Schema) -> Vec<String> {
    let mut out = Vec::new();
    for field in schema.fields() {
        if !field.has_labels() {
            out.push(field.name().to_string());
            continue;
        }
        for (_, label) in field.labels() {
            out.push(format!("{} - {}", field.name(), label));
        }
    }
    out
}
