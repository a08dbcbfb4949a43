//! In-place edits over existing sample buffers.
//!
//! A pure [`encode_one`](crate::codec::Codec::encode_one) always starts from
//! an all-zero word: unnamed fields become code 0 and reserved bits are
//! cleared. These helpers are the explicit alternative for callers holding an
//! existing band who want untouched bits to pass through. Every operation
//! validates its inputs first and leaves the buffer unmodified on error.

use crate::codec::{Codec, CodecError};
use crate::value::{FieldValue, Record};

/// Overlay the record's fields onto each word in `raws`. Fields not named in
/// the record, and reserved bits, keep their current contents.
pub fn apply_in_place(codec: &Codec, record: &Record, raws: &mut [u64]) -> Result<(), CodecError> {
    let mut patches: Vec<(u32, u64, u64)> = Vec::with_capacity(record.len());
    for (name, value) in record.iter() {
        let field = codec
            .schema()
            .field(name)
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))?;
        let code = codec.resolve_code(field, value)?;
        patches.push((field.offset(), field.mask(), code));
    }
    codec.check_words(raws)?;
    for raw in raws.iter_mut() {
        for &(offset, mask, code) in &patches {
            *raw = (*raw & !(mask << offset)) | (code << offset);
        }
    }
    Ok(())
}

/// Read-modify-write one field across a band.
pub fn set_field_in_place(
    codec: &Codec,
    field: &str,
    value: &FieldValue,
    raws: &mut [u64],
) -> Result<(), CodecError> {
    let record = Record::new().with(field, value.clone());
    apply_in_place(codec, &record, raws)
}

/// Force reserved bits to zero across a band, matching what a pure encode
/// would have produced for them. Field bits are untouched.
pub fn zero_reserved_in_place(codec: &Codec, raws: &mut [u64]) -> Result<(), CodecError> {
    codec.check_words(raws)?;
    let keep = codec.schema().covered_mask();
    for raw in raws.iter_mut() {
        *raw &= keep;
    }
    Ok(())
}
