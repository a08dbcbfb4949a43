//! # bitband: bit-field codec for integer quality bands
//!
//! Remote-sensing products pack several boolean and categorical flags into
//! each pixel of an integer quality band (cloud state, confidence levels,
//! saturation, and so on, each in its own bit range). `bitband` maps between
//! those raw integer samples and named flag values, driven by a declarative
//! layout: build a [`Schema`] in code or [`parse`] one from layout text, then
//! decode and encode through a [`Codec`].
//!
//! ## Layout text
//!
//! ```text
//! layout qa_pixel: u16 {
//!     fill: bit 0;
//!     cloud: bit 3 { 0 = "clear"; 1 = "cloud"; }
//!     cloud_confidence: bits 8-9 {
//!         0 = "none";
//!         1 = "low";
//!         2 = "medium";
//!         3 = "high";
//!     }
//! }
//! ```
//!
//! ## Usage
//!
//! ```
//! use bitband::{parse, Codec, FieldValue};
//!
//! let layout = parse(r#"
//! layout qa: u8 {
//!     cloud: bit 0 { 0 = "clear"; 1 = "cloud"; }
//!     confidence: bits 1-2 {
//!         0 = "none";
//!         1 = "low";
//!         2 = "medium";
//!         3 = "high";
//!     }
//! }
//! "#).unwrap();
//!
//! let codec = Codec::new(&layout.schema);
//! let record = codec.decode_one(0b0000_0011).unwrap();
//! assert_eq!(record.get("cloud"), Some(&FieldValue::Label("cloud".into())));
//! assert_eq!(record.get("confidence"), Some(&FieldValue::Label("low".into())));
//!
//! let raw = codec.encode_one(&record).unwrap();
//! assert_eq!(raw, 0b0000_0011);
//! ```
//!
//! Codes without a declared label decode to [`FieldValue::Undefined`] rather
//! than an error or a guess; raw values wider than the declared word fail
//! with [`CodecError::WordOutOfRange`]. Batch paths ([`Codec::decode_many`],
//! [`band::decode_band`], [`mask`]) validate whole batches and share the same
//! shift/mask core as the scalar path.

pub mod band;
pub mod codec;
pub mod dump;
pub mod lint;
pub mod mask;
pub mod parser;
pub mod patch;
pub mod schema;
pub mod value;

pub use band::{
    decode_band, encode_band, read_samples, write_samples, BandError, Endianness, SampleFormat,
};
pub use codec::{Codec, CodecError};
pub use parser::{parse, Layout};
pub use schema::{BitField, Schema, SchemaError};
pub use value::{FieldValue, Record};
