//! Decode raw samples into records and encode records back into raw samples.
//!
//! A [`Codec`] borrows an immutable [`Schema`] and carries no state of its
//! own, so one schema can serve any number of codecs and threads. Strict
//! operations fail the whole batch on the first invalid element; the lenient
//! variant is separate and explicit.

use crate::schema::{BitField, Schema};
use crate::value::{FieldValue, Record};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("raw value {raw} does not fit in the declared {word_width}-bit word")]
    WordOutOfRange { raw: u64, word_width: u32 },
    #[error("field {field}: code {code} does not fit in {width} bit(s)")]
    CodeOutOfRange { field: String, code: u64, width: u32 },
    #[error("field {field}: no label {label:?} in the label map")]
    UnknownLabel { field: String, label: String },
}

/// Stateless bidirectional mapping between raw words and [`Record`]s.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    schema: &'a Schema,
}

impl<'a> Codec<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Codec { schema }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub(crate) fn check_word(&self, raw: u64) -> Result<(), CodecError> {
        let word_width = self.schema.word_width();
        if word_width < 64 && raw >> word_width != 0 {
            return Err(CodecError::WordOutOfRange { raw, word_width });
        }
        Ok(())
    }

    pub(crate) fn check_words(&self, raws: &[u64]) -> Result<(), CodecError> {
        for &raw in raws {
            self.check_word(raw)?;
        }
        Ok(())
    }

    /// Decode one raw word into a record, fields in schema declaration order.
    ///
    /// Labeled fields whose extracted code has no declared label decode to
    /// [`FieldValue::Undefined`] carrying the code; nothing is guessed.
    pub fn decode_one(&self, raw: u64) -> Result<Record, CodecError> {
        self.check_word(raw)?;
        Ok(self.decode_unchecked(raw))
    }

    fn decode_unchecked(&self, raw: u64) -> Record {
        let mut record = Record::new();
        for field in self.schema.fields() {
            let code = field.extract(raw);
            let value = if !field.has_labels() {
                FieldValue::Code(code)
            } else {
                match field.label_for(code) {
                    Some(label) => FieldValue::Label(label.to_string()),
                    None => FieldValue::Undefined(code),
                }
            };
            record.set(field.name(), value);
        }
        record
    }

    /// Decode a batch, preserving order and length. The whole input is
    /// validated against the word width before any record is produced, so a
    /// bad sample fails the batch instead of yielding a partial result.
    pub fn decode_many(&self, raws: &[u64]) -> Result<Vec<Record>, CodecError> {
        self.check_words(raws)?;
        Ok(raws.iter().map(|&raw| self.decode_unchecked(raw)).collect())
    }

    /// Best-effort batch decode: one outcome per input element. This is the
    /// explicit opt-in; [`decode_many`](Codec::decode_many) is the default.
    pub fn decode_many_lenient(&self, raws: &[u64]) -> Vec<Result<Record, CodecError>> {
        raws.iter().map(|&raw| self.decode_one(raw)).collect()
    }

    /// Streaming decode. Records are produced one at a time, so peak memory
    /// is whatever the caller chooses to accumulate.
    pub fn decode_iter<I>(&self, raws: I) -> impl Iterator<Item = Result<Record, CodecError>> + 'a
    where
        I: IntoIterator<Item = u64>,
        I::IntoIter: 'a,
    {
        let codec = *self;
        raws.into_iter().map(move |raw| codec.decode_one(raw))
    }

    /// Encode a record into one raw word.
    ///
    /// Schema fields absent from the record encode as code 0; reserved bits
    /// are zero. Names absent from the schema are an error, never ignored.
    pub fn encode_one(&self, record: &Record) -> Result<u64, CodecError> {
        for (name, _) in record.iter() {
            if self.schema.field(name).is_none() {
                return Err(CodecError::UnknownField(name.to_string()));
            }
        }
        let mut raw = 0u64;
        for field in self.schema.fields() {
            let code = match record.get(field.name()) {
                Some(value) => self.resolve_code(field, value)?,
                None => 0,
            };
            raw |= code << field.offset();
        }
        Ok(raw)
    }

    /// Element-wise inverse of [`decode_many`](Codec::decode_many); fails the
    /// batch on the first invalid record.
    pub fn encode_many(&self, records: &[Record]) -> Result<Vec<u64>, CodecError> {
        records.iter().map(|record| self.encode_one(record)).collect()
    }

    /// Resolve a supplied value to the raw code for `field`. Labels go
    /// through the lowest-code alias; numeric codes are range-checked.
    pub(crate) fn resolve_code(
        &self,
        field: &BitField,
        value: &FieldValue,
    ) -> Result<u64, CodecError> {
        match value {
            FieldValue::Code(code) | FieldValue::Undefined(code) => {
                if *code > field.mask() {
                    return Err(CodecError::CodeOutOfRange {
                        field: field.name().to_string(),
                        code: *code,
                        width: field.width(),
                    });
                }
                Ok(*code)
            }
            FieldValue::Label(label) => {
                field
                    .code_for(label)
                    .ok_or_else(|| CodecError::UnknownLabel {
                        field: field.name().to_string(),
                        label: label.clone(),
                    })
            }
        }
    }
}
