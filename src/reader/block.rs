//! LZ4 block decompression
//!
//! Compressed chunks in the binary model format are prefixed by a 12-byte
//! header:
//! - Compressed length (u32, little-endian)
//! - Decompressed length (u32, little-endian)
//! - 4 reserved bytes
//!
//! A compressed length of 0 marks a stored block whose payload follows
//! verbatim. Otherwise the payload is a raw LZ4 block (no frame, no
//! checksum) that must consume exactly the compressed length and produce
//! exactly the decompressed length.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::BlockConfig;
use crate::error::{DecodeError, Result};

use super::Cursor;

/// Size of the block header in bytes.
pub const BLOCK_HEADER_SIZE: usize = 12;

/// Bits of the token used by the match length.
const ML_BITS: u32 = 4;
/// Nibble value that signals an extended length.
const RUN_MASK: usize = 0x0F;
/// Shortest match LZ4 can encode.
const MIN_MATCH: usize = 4;
/// Upper bound on output bytes per input byte.
const MAX_EXPANSION: usize = 255;

/// Parsed block header. Only lives for one decompression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Payload size; 0 for a stored block
    pub compressed_len: u32,
    /// Size of the output
    pub decompressed_len: u32,
}

impl BlockHeader {
    /// Read the header and skip its reserved bytes.
    ///
    /// Consumes all 12 header bytes or none.
    pub fn parse(cursor: &mut Cursor) -> Result<Self> {
        cursor.ensure(BLOCK_HEADER_SIZE)?;
        let compressed_len = cursor.read_u32_le()?;
        let decompressed_len = cursor.read_u32_le()?;
        cursor.advance(4);
        Ok(Self {
            compressed_len,
            decompressed_len,
        })
    }

    /// Whether the payload is stored uncompressed.
    pub fn is_stored(&self) -> bool {
        self.compressed_len == 0
    }
}

/// Decompress the block at the cursor using [`BlockConfig::default`].
///
/// On success the cursor sits just past the block payload.
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use rbx_bytes::{decompress_block, Cursor};
///
/// // Stored block: compressed length 0, three payload bytes
/// let data = [0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, b'a', b'b', b'c'];
/// let mut cursor = Cursor::new(Bytes::copy_from_slice(&data));
/// let out = decompress_block(&mut cursor).unwrap();
/// assert_eq!(&out[..], b"abc");
/// assert_eq!(cursor.position(), 15);
/// ```
pub fn decompress_block(cursor: &mut Cursor) -> Result<Bytes> {
    decompress_block_with_config(cursor, &BlockConfig::default())
}

/// Decompress the block at the cursor.
///
/// # Errors
/// - `BufferUnderrun` if the header, the payload, or a literal run does not
///   fit in the available bytes
/// - `MalformedStream` if the LZ4 sequences do not end exactly on the
///   payload boundary, reference bytes before the start of the output, or
///   do not produce exactly the declared length
/// - `LimitExceeded` if an LZ4 block declares a length over
///   `config.max_decompressed_len` (stored blocks are not limited)
///
/// On error the cursor position is unspecified.
pub fn decompress_block_with_config(cursor: &mut Cursor, config: &BlockConfig) -> Result<Bytes> {
    let header = BlockHeader::parse(cursor)?;
    let compressed_len = header.compressed_len as usize;
    let decompressed_len = header.decompressed_len as usize;

    debug!(
        offset = cursor.position() - BLOCK_HEADER_SIZE,
        compressed_len,
        decompressed_len,
        stored = header.is_stored(),
        "Decoding block"
    );

    // Stored payloads are views into the input and allocate nothing
    if header.is_stored() {
        return cursor.read_bytes(decompressed_len);
    }

    if decompressed_len > config.max_decompressed_len {
        return Err(DecodeError::LimitExceeded {
            declared: decompressed_len,
            limit: config.max_decompressed_len,
        });
    }

    cursor.ensure(compressed_len)?;
    let start = cursor.position();
    let end = start + compressed_len;

    let output = decode_sequences(cursor, end, decompressed_len)?;

    if cursor.position() != end {
        return Err(DecodeError::malformed(format!(
            "LZ4 input size mismatch: consumed {} of {} bytes",
            cursor.position() - start,
            compressed_len
        )));
    }
    if output.len() != decompressed_len {
        return Err(DecodeError::malformed(format!(
            "LZ4 output size mismatch: produced {} of {} bytes",
            output.len(),
            decompressed_len
        )));
    }

    trace!(compressed_len, decompressed_len, "Block decoded");
    Ok(Bytes::from(output))
}

/// Decompress the block at the cursor and return a fresh cursor over the
/// result.
pub fn decompress_block_to_cursor(cursor: &mut Cursor) -> Result<Cursor> {
    decompress_block(cursor).map(Cursor::new)
}

/// Read an LZ4 length continuation: every byte is added, and reading stops
/// after the first byte that is not 255.
#[inline]
fn read_extended_length(cursor: &mut Cursor, mut length: usize) -> Result<usize> {
    loop {
        let byte = cursor.read_u8()?;
        length = length
            .checked_add(byte as usize)
            .ok_or_else(|| DecodeError::malformed("LZ4 length overflows usize"))?;
        if byte != 0xFF {
            return Ok(length);
        }
    }
}

/// Run the LZ4 sequence loop until the cursor reaches `end`.
fn decode_sequences(cursor: &mut Cursor, end: usize, capacity: usize) -> Result<Vec<u8>> {
    // LZ4 expands at most ~255x, so a lying header cannot force a large reservation
    let input_len = end - cursor.position();
    let mut output: Vec<u8> = Vec::with_capacity(capacity.min(input_len.saturating_mul(MAX_EXPANSION)));

    while cursor.position() < end {
        let token = cursor.read_u8()?;

        // Literals
        let mut literal_len = (token >> ML_BITS) as usize;
        if literal_len == RUN_MASK {
            literal_len = read_extended_length(cursor, literal_len)?;
        }

        let available = end.saturating_sub(cursor.position());
        if literal_len > available {
            return Err(DecodeError::underrun(cursor.position(), literal_len, available));
        }
        if output.len() + literal_len > capacity {
            return Err(DecodeError::malformed(format!(
                "LZ4 literal run of {} bytes overflows declared output of {} bytes",
                literal_len, capacity
            )));
        }
        output.extend_from_slice(cursor.lookahead(literal_len)?);
        cursor.advance(literal_len);

        // The last sequence carries literals only
        if cursor.position() >= end {
            break;
        }

        // Match
        let offset = cursor.read_u16_le()? as usize;
        let mut match_len = token as usize & RUN_MASK;
        if match_len == RUN_MASK {
            match_len = read_extended_length(cursor, match_len)?;
        }
        let match_len = match_len
            .checked_add(MIN_MATCH)
            .ok_or_else(|| DecodeError::malformed("LZ4 length overflows usize"))?;

        if cursor.position() > end {
            return Err(DecodeError::malformed(format!(
                "LZ4 sequence runs {} bytes past the block boundary",
                cursor.position() - end
            )));
        }
        if offset == 0 || offset > output.len() {
            return Err(DecodeError::malformed(format!(
                "LZ4 match offset {} is outside the {} bytes produced so far",
                offset,
                output.len()
            )));
        }
        if output.len() + match_len > capacity {
            return Err(DecodeError::malformed(format!(
                "LZ4 match of {} bytes overflows declared output of {} bytes",
                match_len, capacity
            )));
        }

        // Byte by byte: the source may overlap the bytes being written
        let copy_start = output.len() - offset;
        for i in 0..match_len {
            let byte = output[copy_start + i];
            output.push(byte);
        }
    }

    Ok(output)
}
