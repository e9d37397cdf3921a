//! Byte-level reader components
//!
//! This module provides the decoding engine for the binary model format:
//! a bounds-checked cursor with scalar reads, LZ4 block decompression, and
//! interleaved array decoding.

mod block;
mod cursor;
pub mod interleave;
pub mod numeric;

pub use block::{
    decompress_block, decompress_block_to_cursor, decompress_block_with_config, BlockHeader,
    BLOCK_HEADER_SIZE,
};
pub use cursor::Cursor;
pub use interleave::{
    interleaved, interleaved_i32, interleaved_u32, interleaved_u32_with, interleaved_vendor_f32,
};
pub use numeric::{parse_double, parse_float, parse_vendor_float, zigzag_decode_u32};
