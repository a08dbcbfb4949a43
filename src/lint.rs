//! Advisory diagnostics for constructed schemas.
//!
//! Construction already rejects hard errors (overlap, duplicate names, codes
//! past the field width). Lint reports the things that are legal but worth a
//! second look before a layout ships:
//!
//! - **PartialLabelMap**: a labeled field whose map does not cover every
//!   representable code, so decode can yield undefined values.
//! - **AliasedLabels**: one label bound to several codes; encode resolves to
//!   the lowest.
//! - **SingleLabelBit**: a single-bit field declaring only one label.
//! - **UncoveredBits**: word bits belonging to no field.

use crate::schema::Schema;

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// Identifies which rule produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    PartialLabelMap,
    AliasedLabels,
    SingleLabelBit,
    UncoveredBits,
}

/// A single lint finding, attributed to a field where one applies.
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub field: Option<String>,
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
}

/// Run all lint rules on a schema. Findings come out in field declaration
/// order, schema-level findings last.
pub fn lint(schema: &Schema) -> Vec<LintMessage> {
    let mut out = Vec::new();

    for field in schema.fields() {
        if !field.has_labels() {
            continue;
        }
        let declared = field.labels().count() as u64;
        let total = if field.width() == 64 {
            u64::MAX
        } else {
            1u64 << field.width()
        };
        if declared < total {
            out.push(LintMessage {
                field: Some(field.name().to_string()),
                rule: LintRule::PartialLabelMap,
                severity: Severity::Warning,
                message: format!(
                    "{} of {} codes labeled; the rest decode as undefined",
                    declared, total
                ),
            });
        }

        let mut reported: Vec<&str> = Vec::new();
        for (_, label) in field.labels() {
            if reported.contains(&label) {
                continue;
            }
            let aliases: Vec<u64> = field
                .labels()
                .filter(|(_, l)| *l == label)
                .map(|(c, _)| c)
                .collect();
            if aliases.len() > 1 {
                reported.push(label);
                let canonical = aliases.iter().copied().min().unwrap_or(0);
                out.push(LintMessage {
                    field: Some(field.name().to_string()),
                    rule: LintRule::AliasedLabels,
                    severity: Severity::Warning,
                    message: format!(
                        "label {:?} bound to codes {:?}; encode uses {}",
                        label, aliases, canonical
                    ),
                });
            }
        }

        if field.width() == 1 && declared == 1 {
            out.push(LintMessage {
                field: Some(field.name().to_string()),
                rule: LintRule::SingleLabelBit,
                severity: Severity::Warning,
                message: "single-bit field labels only one of its two codes".to_string(),
            });
        }
    }

    let reserved = schema.reserved_mask();
    if reserved != 0 {
        out.push(LintMessage {
            field: None,
            rule: LintRule::UncoveredBits,
            severity: Severity::Info,
            message: format!(
                "{} reserved bit(s): ignored on decode, zeroed by encode",
                reserved.count_ones()
            ),
        });
    }

    out
}
