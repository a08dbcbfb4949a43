//! Batch field extraction and per-label membership masks.
//!
//! These are the array-oriented counterparts of single-sample decode: pull
//! one field's codes out of a whole band with plain shift/mask arithmetic, or
//! turn a code or label into a boolean per-sample mask. The input batch is
//! validated against the word width up front; a bad sample fails the call.

use crate::codec::{Codec, CodecError};

/// One named mask: `mask[i]` is true where `field` decodes to `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMask {
    pub field: String,
    pub label: String,
    pub code: u64,
    pub mask: Vec<bool>,
}

/// Extract one field's raw codes across a band.
pub fn field_codes(codec: &Codec, field: &str, raws: &[u64]) -> Result<Vec<u64>, CodecError> {
    let f = codec
        .schema()
        .field(field)
        .ok_or_else(|| CodecError::UnknownField(field.to_string()))?;
    codec.check_words(raws)?;
    let (offset, mask) = (f.offset(), f.mask());
    Ok(raws.iter().map(|&raw| (raw >> offset) & mask).collect())
}

/// Per-sample mask of where `field` extracts exactly `code`.
pub fn code_mask(
    codec: &Codec,
    field: &str,
    code: u64,
    raws: &[u64],
) -> Result<Vec<bool>, CodecError> {
    let f = codec
        .schema()
        .field(field)
        .ok_or_else(|| CodecError::UnknownField(field.to_string()))?;
    if code > f.mask() {
        return Err(CodecError::CodeOutOfRange {
            field: field.to_string(),
            code,
            width: f.width(),
        });
    }
    codec.check_words(raws)?;
    let (offset, mask) = (f.offset(), f.mask());
    Ok(raws.iter().map(|&raw| (raw >> offset) & mask == code).collect())
}

/// Per-sample mask of where `field` decodes to `label`. Every code aliased to
/// the label counts as a match, not only the canonical lowest one.
pub fn label_mask(
    codec: &Codec,
    field: &str,
    label: &str,
    raws: &[u64],
) -> Result<Vec<bool>, CodecError> {
    let f = codec
        .schema()
        .field(field)
        .ok_or_else(|| CodecError::UnknownField(field.to_string()))?;
    let codes: Vec<u64> = f
        .labels()
        .filter(|(_, l)| *l == label)
        .map(|(c, _)| c)
        .collect();
    if codes.is_empty() {
        return Err(CodecError::UnknownLabel {
            field: field.to_string(),
            label: label.to_string(),
        });
    }
    codec.check_words(raws)?;
    let (offset, mask) = (f.offset(), f.mask());
    Ok(raws
        .iter()
        .map(|&raw| codes.contains(&((raw >> offset) & mask)))
        .collect())
}

/// One [`LabelMask`] per declared label entry of `field`, in declaration
/// order. Aliased entries produce separate masks.
pub fn label_masks(codec: &Codec, field: &str, raws: &[u64]) -> Result<Vec<LabelMask>, CodecError> {
    let f = codec
        .schema()
        .field(field)
        .ok_or_else(|| CodecError::UnknownField(field.to_string()))?;
    codec.check_words(raws)?;
    let (offset, mask) = (f.offset(), f.mask());
    Ok(f.labels()
        .map(|(code, label)| LabelMask {
            field: field.to_string(),
            label: label.to_string(),
            code,
            mask: raws.iter().map(|&raw| (raw >> offset) & mask == code).collect(),
        })
        .collect())
}
