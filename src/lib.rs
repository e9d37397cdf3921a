//! Decoding engine for the Roblox binary model format
//!
//! This library turns flat byte buffers into typed values: fixed-width
//! integers in both byte orders, floats and doubles reconstructed from their
//! raw words, the format's compact rotated float, LZ4-compressed blocks, and
//! byte-plane interleaved arrays.
//!
//! # Example
//! ```
//! use bytes::Bytes;
//! use rbx_bytes::{decompress_block, interleaved_i32, Cursor};
//!
//! // A compressed block holding two interleaved zigzag integers (2 and -2)
//! let block = [
//!     9, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0, // header
//!     0x80, 0, 0, 0, 0, 0, 0, 4, 3,       // one literal run of 8 bytes
//! ];
//! let mut cursor = Cursor::new(Bytes::copy_from_slice(&block));
//! let mut inner = Cursor::new(decompress_block(&mut cursor).unwrap());
//! assert_eq!(interleaved_i32(&mut inner, 2).unwrap(), vec![2, -2]);
//! ```

pub mod config;
pub mod error;
pub mod reader;

// Re-export main types
pub use config::BlockConfig;
pub use error::{DecodeError, DecodeErrorKind, Result};
pub use reader::{
    decompress_block, decompress_block_to_cursor, decompress_block_with_config, interleaved,
    interleaved_i32, interleaved_u32, interleaved_u32_with, interleaved_vendor_f32, parse_double,
    parse_float, parse_vendor_float, zigzag_decode_u32, BlockHeader, Cursor, BLOCK_HEADER_SIZE,
};
