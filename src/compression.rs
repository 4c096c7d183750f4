//! Compression envelope for stored records
//!
//! Every record written by a store starts with a one-byte scheme tag,
//! followed by the (possibly compressed) payload. The writer picks the
//! scheme; the reader recovers it purely from the tag byte, so a store
//! can be reconfigured over time without invalidating records written
//! under an earlier scheme.
//!
//! ## Record Format
//!
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Tag (1)  │   Payload (0..n bytes)      │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! Tag values:
//! - `0x00` — uncompressed, payload is the original bytes
//! - `0x01` — DEFLATE, payload is a deflate stream
//!
//! A zero-length record carries no tag at all; it is a tombstone and is
//! handled by the store layer before decoding reaches this module.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::error::{FolioError, Result};

/// Tag byte for uncompressed records
const TAG_NONE: u8 = 0x00;

/// Tag byte for DEFLATE-compressed records
const TAG_DEFLATE: u8 = 0x01;

/// Compression scheme for stored records
///
/// Selects how `compress` encodes a payload. Decoding never needs a
/// `Compression` value: `expand` dispatches on the record's tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// No compression; bytes are stored unchanged after the tag
    #[default]
    None,

    /// DEFLATE via flate2, default compression level
    Deflate,
}

impl Compression {
    /// Encode `data` as a self-describing record: tag byte + payload
    ///
    /// Works for any input, including empty. The result is never empty
    /// (it always carries at least the tag byte).
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => {
                let mut record = Vec::with_capacity(1 + data.len());
                record.push(TAG_NONE);
                record.extend_from_slice(data);
                Ok(record)
            }
            Compression::Deflate => {
                let mut record = vec![TAG_DEFLATE];
                let mut encoder = DeflateEncoder::new(&mut record, flate2::Compression::default());
                encoder.write_all(data)?;
                encoder.finish()?;
                Ok(record)
            }
        }
    }

    /// Decode a record produced by any `compress` variant
    ///
    /// The scheme is taken from the record's first byte; the caller does
    /// not need to know which scheme wrote it.
    ///
    /// Errors:
    /// - `Corrupt` for an empty record, an unrecognized tag, or a
    ///   malformed compressed stream
    pub fn expand(record: &[u8]) -> Result<Vec<u8>> {
        let (&tag, payload) = record
            .split_first()
            .ok_or_else(|| FolioError::Corrupt("empty record has no scheme tag".to_string()))?;

        match Compression::from_tag(tag)? {
            Compression::None => Ok(payload.to_vec()),
            Compression::Deflate => {
                let mut data = Vec::new();
                DeflateDecoder::new(payload)
                    .read_to_end(&mut data)
                    .map_err(|e| {
                        FolioError::Corrupt(format!("malformed deflate stream: {}", e))
                    })?;
                Ok(data)
            }
        }
    }

    /// Resolve a scheme from its tag byte
    pub fn from_tag(tag: u8) -> Result<Compression> {
        match tag {
            TAG_NONE => Ok(Compression::None),
            TAG_DEFLATE => Ok(Compression::Deflate),
            other => Err(FolioError::Corrupt(format!(
                "unrecognized compression tag: 0x{:02x}",
                other
            ))),
        }
    }

    /// The tag byte this scheme writes
    pub fn tag(&self) -> u8 {
        match self {
            Compression::None => TAG_NONE,
            Compression::Deflate => TAG_DEFLATE,
        }
    }
}
