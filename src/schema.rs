//! Bit layout description: named fields over a fixed-width integer word.
//!
//! A [`Schema`] declares which bits of a sample word carry which flag. It is
//! built once, validated as it is built, and then shared read-only by any
//! number of [`Codec`](crate::codec::Codec)s.

use std::collections::HashMap;

/// Errors raised while building a [`BitField`] or [`Schema`]. Construction is
/// all-or-nothing: a failed call never yields a partially usable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field {name}: width must be at least 1 bit")]
    ZeroWidth { name: String },
    #[error("field {name}: width {width} exceeds 64 bits")]
    WidthTooLarge { name: String, width: u32 },
    #[error("word width must be between 1 and 64, got {0}")]
    InvalidWordWidth(u32),
    #[error("field {name}: bits {start}..={end} exceed the {word_width}-bit word")]
    FieldPastWordEnd {
        name: String,
        start: u32,
        end: u32,
        word_width: u32,
    },
    #[error("field {name}: bit range overlaps field {other}")]
    Overlap { name: String, other: String },
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    #[error("field {name}: label code {code} does not fit in {width} bit(s)")]
    LabelCodeOutOfRange { name: String, code: u64, width: u32 },
    #[error("field {name}: label code {code} declared twice")]
    DuplicateLabelCode { name: String, code: u64 },
}

/// One named bit field: a contiguous run of `width` bits whose
/// least-significant bit sits at `offset`, with an optional code-to-label map.
///
/// Labels may alias (several codes bound to one string); label codes must be
/// unique and fit in the field's width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitField {
    name: String,
    offset: u32,
    width: u32,
    labels: Vec<(u64, String)>,
}

impl BitField {
    /// A field without labels: it decodes to its raw code.
    pub fn new(name: impl Into<String>, offset: u32, width: u32) -> Result<Self, SchemaError> {
        Self::with_labels(name, offset, width, Vec::<(u64, String)>::new())
    }

    /// A field with a code-to-label map, kept in declaration order.
    pub fn with_labels<L, S>(
        name: impl Into<String>,
        offset: u32,
        width: u32,
        labels: L,
    ) -> Result<Self, SchemaError>
    where
        L: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let name = name.into();
        if width == 0 {
            return Err(SchemaError::ZeroWidth { name });
        }
        if width > 64 {
            return Err(SchemaError::WidthTooLarge { name, width });
        }
        let max = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        let mut checked: Vec<(u64, String)> = Vec::new();
        for (code, label) in labels {
            if code > max {
                return Err(SchemaError::LabelCodeOutOfRange { name, code, width });
            }
            if checked.iter().any(|(c, _)| *c == code) {
                return Err(SchemaError::DuplicateLabelCode { name, code });
            }
            checked.push((code, label.into()));
        }
        Ok(BitField {
            name,
            offset,
            width,
            labels: checked,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Unshifted mask covering `width` bits.
    pub fn mask(&self) -> u64 {
        if self.width == 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Declared `(code, label)` entries in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = (u64, &str)> {
        self.labels.iter().map(|(c, l)| (*c, l.as_str()))
    }

    /// Label declared for `code`, if any.
    pub fn label_for(&self, code: u64) -> Option<&str> {
        self.labels
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, l)| l.as_str())
    }

    /// Code bound to `label`. When several codes alias the same label, the
    /// lowest code wins, so encode is deterministic.
    pub fn code_for(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .filter(|(_, l)| l == label)
            .map(|(c, _)| *c)
            .min()
    }

    pub(crate) fn extract(&self, raw: u64) -> u64 {
        (raw >> self.offset) & self.mask()
    }
}

/// An ordered set of non-overlapping [`BitField`]s over one word width.
///
/// Fields keep their declaration order; that order is the contract for
/// [`Record`](crate::value::Record) field ordering on decode. Bits covered by
/// no field are reserved: ignored on decode, zeroed by a pure encode (see
/// [`patch`](crate::patch) for the explicit pass-through alternative).
#[derive(Debug, Clone)]
pub struct Schema {
    word_width: u32,
    fields: Vec<BitField>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// An empty schema for a word of `word_width` bits (1 to 64).
    pub fn new(word_width: u32) -> Result<Self, SchemaError> {
        if word_width == 0 || word_width > 64 {
            return Err(SchemaError::InvalidWordWidth(word_width));
        }
        Ok(Schema {
            word_width,
            fields: Vec::new(),
            by_name: HashMap::new(),
        })
    }

    /// Bulk construction from a declarative field list.
    pub fn from_fields<I>(word_width: u32, fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = BitField>,
    {
        let mut schema = Schema::new(word_width)?;
        for field in fields {
            schema.add_field(field)?;
        }
        Ok(schema)
    }

    /// Append a field, rejecting duplicates, overlaps, and fields that run
    /// past the word end.
    pub fn add_field(&mut self, field: BitField) -> Result<(), SchemaError> {
        let start = field.offset() as u64;
        let end = start + field.width() as u64; // exclusive
        if end > self.word_width as u64 {
            return Err(SchemaError::FieldPastWordEnd {
                name: field.name().to_string(),
                start: field.offset(),
                end: (end - 1) as u32,
                word_width: self.word_width,
            });
        }
        if self.by_name.contains_key(field.name()) {
            return Err(SchemaError::DuplicateField(field.name().to_string()));
        }
        for existing in &self.fields {
            let e_start = existing.offset() as u64;
            let e_end = e_start + existing.width() as u64;
            if start < e_end && e_start < end {
                return Err(SchemaError::Overlap {
                    name: field.name().to_string(),
                    other: existing.name().to_string(),
                });
            }
        }
        self.by_name
            .insert(field.name().to_string(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    pub fn word_width(&self) -> u32 {
        self.word_width
    }

    /// Lookup by name.
    pub fn field(&self, name: &str) -> Option<&BitField> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[BitField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Mask covering the whole declared word.
    pub fn word_mask(&self) -> u64 {
        if self.word_width == 64 {
            u64::MAX
        } else {
            (1u64 << self.word_width) - 1
        }
    }

    /// Union of all field bits.
    pub fn covered_mask(&self) -> u64 {
        self.fields
            .iter()
            .fold(0, |acc, f| acc | (f.mask() << f.offset()))
    }

    /// Word bits belonging to no field.
    pub fn reserved_mask(&self) -> u64 {
        self.word_mask() & !self.covered_mask()
    }
}
