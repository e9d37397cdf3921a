//! Interleaved (byte-plane) array decoding.
//!
//! Arrays of multi-byte values are stored transposed: the first byte of
//! every element, then the second byte of every element, and so on. For
//! `count` elements of `width` bytes, byte `j` of element `i` lives at
//! `j * count + i`. Grouping like bytes together makes the run far more
//! compressible by the LZ4 stage that usually wraps it.
//!
//! Note the two entry points differ in cursor handling:
//! [`interleaved`] only reads, while [`interleaved_u32_with`] and its
//! specializations advance past the run.

use crate::error::{DecodeError, Result};

use super::numeric::{parse_vendor_float, zigzag_decode_u32};
use super::Cursor;

/// Regroup `byte_count` transposed bytes into `byte_count / width`
/// elements of `width` bytes each.
///
/// The cursor is **not** advanced; callers step past the run themselves.
///
/// # Errors
/// - `InvalidGeometry` if `width` is 0 or does not divide `byte_count`
/// - `BufferUnderrun` if fewer than `byte_count` bytes remain
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use rbx_bytes::{interleaved, Cursor};
///
/// let cursor = Cursor::new(Bytes::from_static(&[1, 2, 3, 4]));
/// let elements = interleaved(&cursor, 4, 2).unwrap();
/// assert_eq!(elements, vec![vec![1, 3], vec![2, 4]]);
/// assert_eq!(cursor.position(), 0);
/// ```
pub fn interleaved(cursor: &Cursor, byte_count: usize, width: usize) -> Result<Vec<Vec<u8>>> {
    if width == 0 || byte_count % width != 0 {
        return Err(DecodeError::InvalidGeometry { byte_count, width });
    }
    let planes = cursor.lookahead(byte_count)?;
    let count = byte_count / width;

    let elements: Vec<Vec<u8>> = (0..count)
        .map(|i| (0..width).map(|j| planes[j * count + i]).collect())
        .collect();
    Ok(elements)
}

/// Decode `count` transposed 32-bit words, most significant plane first,
/// and pass each through `transform`. Advances the cursor by `count * 4`.
pub fn interleaved_u32_with<T, F>(cursor: &mut Cursor, count: usize, mut transform: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> T,
{
    let byte_count = count
        .checked_mul(4)
        .ok_or_else(|| DecodeError::underrun(cursor.position(), usize::MAX, cursor.remaining()))?;
    let planes = cursor.lookahead(byte_count)?;

    let values: Vec<T> = (0..count)
        .map(|i| {
            let word = u32::from_be_bytes([
                planes[i],
                planes[(i + count) % byte_count],
                planes[(i + count * 2) % byte_count],
                planes[(i + count * 3) % byte_count],
            ]);
            transform(word)
        })
        .collect();

    cursor.advance(byte_count);
    Ok(values)
}

/// Decode `count` transposed big-endian `u32` words.
pub fn interleaved_u32(cursor: &mut Cursor, count: usize) -> Result<Vec<u32>> {
    interleaved_u32_with(cursor, count, |word| word)
}

/// Decode `count` transposed zigzag-encoded `i32` values.
pub fn interleaved_i32(cursor: &mut Cursor, count: usize) -> Result<Vec<i32>> {
    interleaved_u32_with(cursor, count, zigzag_decode_u32)
}

/// Decode `count` transposed compact-layout floats.
pub fn interleaved_vendor_f32(cursor: &mut Cursor, count: usize) -> Result<Vec<f32>> {
    interleaved_u32_with(cursor, count, parse_vendor_float)
}
