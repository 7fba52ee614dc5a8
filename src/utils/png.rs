// src/utils/png.rs
//! PNG chunk-stream manipulation.
//!
//! Baking is a structural edit, not a re-encode: the file is parsed into an
//! ordered chunk list, exactly one chunk is inserted, and the list is
//! written back out. Untouched chunks re-serialize byte-identically because
//! their CRC is a pure function of type tag and payload.

use crate::error::BakeError;

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// One PNG chunk: 4-byte type tag plus payload. Length and CRC are framing,
/// recomputed on serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub chunk_type: [u8; 4],
    pub payload: Vec<u8>,
}

impl Chunk {
    pub fn new(chunk_type: [u8; 4], payload: Vec<u8>) -> Self {
        Self {
            chunk_type,
            payload,
        }
    }

    /// True for the pixel-data chunks (`IDAT`).
    pub fn is_image_data(&self) -> bool {
        &self.chunk_type == b"IDAT"
    }
}

/// CRC-32 over type tag and payload, as PNG framing requires.
fn chunk_crc(chunk_type: &[u8; 4], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(payload);
    hasher.finalize()
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Parses a PNG byte stream into its ordered chunk sequence.
///
/// # Errors
/// [`BakeError::Png`] on a missing signature, truncated framing, a CRC
/// mismatch, or a stream not bracketed by an `IHDR` header and an `IEND`
/// terminator. A malformed input must never yield a silently-corrupt edit.
pub fn parse(bytes: &[u8]) -> Result<Vec<Chunk>, BakeError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(BakeError::Png("missing PNG signature".into()));
    }

    let mut chunks = Vec::new();
    let mut offset = PNG_SIGNATURE.len();
    while offset < bytes.len() {
        if bytes.len() - offset < 12 {
            return Err(BakeError::Png(format!(
                "truncated chunk framing at offset {}",
                offset
            )));
        }
        let length = read_u32(bytes, offset) as usize;
        let chunk_type = [
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ];
        let data_start = offset + 8;
        let data_end = data_start
            .checked_add(length)
            .ok_or_else(|| BakeError::Png("chunk length overflow".into()))?;
        if data_end + 4 > bytes.len() {
            return Err(BakeError::Png(format!(
                "truncated {} chunk at offset {}",
                String::from_utf8_lossy(&chunk_type),
                offset
            )));
        }
        let payload = bytes[data_start..data_end].to_vec();
        let declared_crc = read_u32(bytes, data_end);
        if declared_crc != chunk_crc(&chunk_type, &payload) {
            return Err(BakeError::Png(format!(
                "CRC mismatch in {} chunk",
                String::from_utf8_lossy(&chunk_type)
            )));
        }
        chunks.push(Chunk::new(chunk_type, payload));
        offset = data_end + 4;
    }

    match (chunks.first(), chunks.last()) {
        (Some(first), Some(last))
            if &first.chunk_type == b"IHDR" && &last.chunk_type == b"IEND" =>
        {
            Ok(chunks)
        }
        _ => Err(BakeError::Png(
            "chunk stream must start with IHDR and end with IEND".into(),
        )),
    }
}

/// Serializes a chunk sequence back into a complete PNG byte stream,
/// recomputing length and CRC framing for each chunk.
pub fn serialize(chunks: &[Chunk]) -> Vec<u8> {
    let body: usize = chunks.iter().map(|chunk| chunk.payload.len() + 12).sum();
    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + body);
    out.extend_from_slice(&PNG_SIGNATURE);
    for chunk in chunks {
        out.extend_from_slice(&(chunk.payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&chunk.chunk_type);
        out.extend_from_slice(&chunk.payload);
        out.extend_from_slice(&chunk_crc(&chunk.chunk_type, &chunk.payload).to_be_bytes());
    }
    out
}

/// Inserts `new_chunk` immediately before the first chunk matching
/// `predicate`, or before the final (stream-terminator) chunk when nothing
/// matches. Relative order of all existing chunks is preserved.
pub fn insert_before<F>(mut chunks: Vec<Chunk>, predicate: F, new_chunk: Chunk) -> Vec<Chunk>
where
    F: Fn(&Chunk) -> bool,
{
    let position = chunks
        .iter()
        .position(predicate)
        .unwrap_or_else(|| chunks.len().saturating_sub(1));
    chunks.insert(position, new_chunk);
    chunks
}
