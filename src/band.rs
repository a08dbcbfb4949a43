//! Packed byte buffers to sample arrays and back, plus chunked band decode.
//!
//! Raster containers hand over bands as contiguous byte buffers with a fixed
//! sample width and byte order. These helpers do the boundary conversion so
//! the codec itself only ever sees `u64` words. [`decode_band`] converts and
//! decodes in bounded chunks so intermediate allocation stays proportional to
//! the chunk, not the band.

use crate::codec::{Codec, CodecError};
use crate::value::Record;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order for multi-byte samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

/// Storage width of one sample in a packed band buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    U8,
    U16,
    U32,
    U64,
}

impl SampleFormat {
    pub fn sample_bytes(self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::U16 => 2,
            SampleFormat::U32 => 4,
            SampleFormat::U64 => 8,
        }
    }

    fn max_value(self) -> u64 {
        match self {
            SampleFormat::U8 => u8::MAX as u64,
            SampleFormat::U16 => u16::MAX as u64,
            SampleFormat::U32 => u32::MAX as u64,
            SampleFormat::U64 => u64::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BandError {
    #[error("band length {len} is not a multiple of the {sample_bytes}-byte sample size")]
    Truncated { len: usize, sample_bytes: usize },
    #[error("sample {raw} does not fit in a {format:?} sample")]
    SampleOverflow { raw: u64, format: SampleFormat },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Read a packed buffer into sample words. The buffer must hold a whole
/// number of samples.
pub fn read_samples(
    bytes: &[u8],
    format: SampleFormat,
    endianness: Endianness,
) -> Result<Vec<u64>, BandError> {
    let sample_bytes = format.sample_bytes();
    if bytes.len() % sample_bytes != 0 {
        return Err(BandError::Truncated {
            len: bytes.len(),
            sample_bytes,
        });
    }
    let out = match (format, endianness) {
        (SampleFormat::U8, _) => bytes.iter().map(|&b| b as u64).collect(),
        (SampleFormat::U16, Endianness::Big) => bytes
            .chunks_exact(2)
            .map(|c| BigEndian::read_u16(c) as u64)
            .collect(),
        (SampleFormat::U16, Endianness::Little) => bytes
            .chunks_exact(2)
            .map(|c| LittleEndian::read_u16(c) as u64)
            .collect(),
        (SampleFormat::U32, Endianness::Big) => bytes
            .chunks_exact(4)
            .map(|c| BigEndian::read_u32(c) as u64)
            .collect(),
        (SampleFormat::U32, Endianness::Little) => bytes
            .chunks_exact(4)
            .map(|c| LittleEndian::read_u32(c) as u64)
            .collect(),
        (SampleFormat::U64, Endianness::Big) => bytes
            .chunks_exact(8)
            .map(BigEndian::read_u64)
            .collect(),
        (SampleFormat::U64, Endianness::Little) => bytes
            .chunks_exact(8)
            .map(LittleEndian::read_u64)
            .collect(),
    };
    Ok(out)
}

/// Write sample words back into a packed buffer. The whole batch is
/// range-checked against the sample format before anything is written.
pub fn write_samples(
    raws: &[u64],
    format: SampleFormat,
    endianness: Endianness,
) -> Result<Vec<u8>, BandError> {
    for &raw in raws {
        if raw > format.max_value() {
            return Err(BandError::SampleOverflow { raw, format });
        }
    }
    let sample_bytes = format.sample_bytes();
    let mut out = vec![0u8; raws.len() * sample_bytes];
    for (chunk, &raw) in out.chunks_exact_mut(sample_bytes).zip(raws) {
        match (format, endianness) {
            (SampleFormat::U8, _) => chunk[0] = raw as u8,
            (SampleFormat::U16, Endianness::Big) => BigEndian::write_u16(chunk, raw as u16),
            (SampleFormat::U16, Endianness::Little) => LittleEndian::write_u16(chunk, raw as u16),
            (SampleFormat::U32, Endianness::Big) => BigEndian::write_u32(chunk, raw as u32),
            (SampleFormat::U32, Endianness::Little) => LittleEndian::write_u32(chunk, raw as u32),
            (SampleFormat::U64, Endianness::Big) => BigEndian::write_u64(chunk, raw),
            (SampleFormat::U64, Endianness::Little) => LittleEndian::write_u64(chunk, raw),
        }
    }
    Ok(out)
}

/// Decode a packed band buffer chunk by chunk. `chunk_len` is the number of
/// samples converted at a time; it bounds the intermediate allocation while
/// the decoded records accumulate into one output vector.
pub fn decode_band(
    codec: &Codec,
    bytes: &[u8],
    format: SampleFormat,
    endianness: Endianness,
    chunk_len: usize,
) -> Result<Vec<Record>, BandError> {
    let sample_bytes = format.sample_bytes();
    if bytes.len() % sample_bytes != 0 {
        return Err(BandError::Truncated {
            len: bytes.len(),
            sample_bytes,
        });
    }
    let chunk_len = chunk_len.max(1);
    let mut out = Vec::with_capacity(bytes.len() / sample_bytes);
    for chunk in bytes.chunks(chunk_len * sample_bytes) {
        let samples = read_samples(chunk, format, endianness)?;
        out.extend(codec.decode_many(&samples)?);
    }
    Ok(out)
}

/// Inverse of [`decode_band`]: encode records and pack them into bytes,
/// chunk by chunk.
pub fn encode_band(
    codec: &Codec,
    records: &[Record],
    format: SampleFormat,
    endianness: Endianness,
    chunk_len: usize,
) -> Result<Vec<u8>, BandError> {
    let chunk_len = chunk_len.max(1);
    let mut out = Vec::with_capacity(records.len() * format.sample_bytes());
    for chunk in records.chunks(chunk_len) {
        let raws = codec.encode_many(chunk)?;
        out.extend(write_samples(&raws, format, endianness)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_round_trip_both_orders() {
        let raws = vec![0u64, 1, 0x1234, 0xffff];
        for endianness in [Endianness::Big, Endianness::Little] {
            let bytes = write_samples(&raws, SampleFormat::U16, endianness).expect("write");
            assert_eq!(bytes.len(), 8);
            let back = read_samples(&bytes, SampleFormat::U16, endianness).expect("read");
            assert_eq!(back, raws);
        }
    }

    #[test]
    fn u16_byte_order_differs() {
        let bytes = write_samples(&[0x1234], SampleFormat::U16, Endianness::Big).expect("write");
        assert_eq!(bytes, vec![0x12, 0x34]);
        let bytes = write_samples(&[0x1234], SampleFormat::U16, Endianness::Little).expect("write");
        assert_eq!(bytes, vec![0x34, 0x12]);
    }

    #[test]
    fn truncated_buffer_rejected() {
        let r = read_samples(&[0u8, 1, 2], SampleFormat::U16, Endianness::Big);
        assert_eq!(
            r,
            Err(BandError::Truncated {
                len: 3,
                sample_bytes: 2
            })
        );
    }

    #[test]
    fn overflowing_sample_rejected() {
        let r = write_samples(&[256], SampleFormat::U8, Endianness::Big);
        assert!(matches!(r, Err(BandError::SampleOverflow { raw: 256, .. })));
    }
}
