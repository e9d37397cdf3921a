//! Read cursor over an immutable byte buffer.
//!
//! The buffer is a [`Bytes`] handle: cloning a [`Cursor`] shares the
//! underlying storage and only duplicates the position, so any number of
//! cursors (on any number of threads) can walk the same buffer independently.
//!
//! All reads are bounds-checked. A read that needs more bytes than remain
//! fails with [`DecodeError::BufferUnderrun`] and leaves the position
//! untouched.

use bytes::Bytes;

use crate::error::{DecodeError, Result};

use super::numeric::{parse_double, parse_float, parse_vendor_float};

/// A position over a shared, immutable byte buffer.
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use rbx_bytes::Cursor;
///
/// let mut cursor = Cursor::new(Bytes::from_static(&[0x01, 0x02, 0x03, 0x04]));
/// assert_eq!(cursor.peek_u16_le().unwrap(), 0x0201);
/// assert_eq!(cursor.read_u16_be().unwrap(), 0x0102);
/// assert_eq!(cursor.remaining(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Bytes,
    position: usize,
}

impl Cursor {
    /// Create a cursor at position 0.
    pub fn new(buffer: Bytes) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// The shared buffer this cursor reads from.
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Total length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move to an absolute position.
    ///
    /// Not validated here: seeking past the end is allowed, and the next
    /// read fails instead.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Move forward by `n` bytes without reading. Validated lazily like
    /// [`Cursor::seek`].
    pub fn advance(&mut self, n: usize) {
        self.position = self.position.saturating_add(n);
    }

    /// Bytes left between the position and the end of the buffer (0 when
    /// the cursor has been moved past the end).
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Check that `n` bytes are readable from the current position.
    ///
    /// A position past the end fails even for `n == 0`.
    pub(crate) fn ensure(&self, n: usize) -> Result<()> {
        let available = self.remaining();
        if n > available || self.position > self.buffer.len() {
            return Err(DecodeError::underrun(self.position, n, available));
        }
        Ok(())
    }

    /// Borrow the next `n` bytes without advancing.
    pub fn lookahead(&self, n: usize) -> Result<&[u8]> {
        self.ensure(n)?;
        Ok(&self.buffer[self.position..self.position + n])
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.buffer[self.position..self.position + N]);
        self.position += N;
        Ok(bytes)
    }

    /// Run `read`, then restore the position whatever the outcome.
    ///
    /// Every read method on this type can be peeked this way:
    /// ```
    /// use bytes::Bytes;
    /// use rbx_bytes::Cursor;
    ///
    /// let mut cursor = Cursor::new(Bytes::from_static(&[0xFE, 0xFF]));
    /// assert_eq!(cursor.peek(|c| c.read_i16_le()).unwrap(), -2);
    /// assert_eq!(cursor.position(), 0);
    /// ```
    pub fn peek<T, F>(&mut self, read: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.position;
        let result = read(self);
        self.position = saved;
        result
    }

    // ------------------------------------------------------------------
    // Integers
    // ------------------------------------------------------------------

    /// Read one unsigned byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Alias of [`Cursor::read_u8`].
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read_u8()
    }

    /// Read a little-endian `u16`.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a big-endian `u16`.
    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read a little-endian `u32`.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a big-endian `u32`.
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read one signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_array().map(i8::from_le_bytes)
    }

    /// Read a little-endian `i16`.
    #[inline]
    pub fn read_i16_le(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Read a big-endian `i16`.
    #[inline]
    pub fn read_i16_be(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_be_bytes)
    }

    /// Read a little-endian `i32`.
    #[inline]
    pub fn read_i32_le(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read a big-endian `i32`.
    #[inline]
    pub fn read_i32_be(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    // ------------------------------------------------------------------
    // Floating point
    // ------------------------------------------------------------------

    /// Read a little-endian float (denormals flush to zero, see
    /// [`parse_float`]).
    #[inline]
    pub fn read_f32_le(&mut self) -> Result<f32> {
        self.read_u32_le().map(parse_float)
    }

    /// Read a big-endian float.
    #[inline]
    pub fn read_f32_be(&mut self) -> Result<f32> {
        self.read_u32_be().map(parse_float)
    }

    /// Read a little-endian double: low word first, then high word.
    #[inline]
    pub fn read_f64_le(&mut self) -> Result<f64> {
        let bytes = self.read_array::<8>()?;
        let low = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let high = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(parse_double(high, low))
    }

    /// Read a big-endian double: high word first, then low word.
    #[inline]
    pub fn read_f64_be(&mut self) -> Result<f64> {
        let bytes = self.read_array::<8>()?;
        let high = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let low = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(parse_double(high, low))
    }

    /// Read a compact-layout float stored little-endian.
    #[inline]
    pub fn read_vendor_f32_le(&mut self) -> Result<f32> {
        self.read_u32_le().map(parse_vendor_float)
    }

    /// Read a compact-layout float stored big-endian.
    #[inline]
    pub fn read_vendor_f32_be(&mut self) -> Result<f32> {
        self.read_u32_be().map(parse_vendor_float)
    }

    // ------------------------------------------------------------------
    // Spans
    // ------------------------------------------------------------------

    /// Read exactly `n` bytes as text.
    ///
    /// There is no length prefix or terminator; the caller supplies `n`
    /// from earlier metadata. Invalid UTF-8 sequences are replaced with
    /// U+FFFD rather than rejected.
    pub fn read_string(&mut self, n: usize) -> Result<String> {
        let text = String::from_utf8_lossy(self.lookahead(n)?).into_owned();
        self.position += n;
        Ok(text)
    }

    /// Read a zero-copy view of the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.ensure(n)?;
        let view = self.buffer.slice(self.position..self.position + n);
        self.position += n;
        Ok(view)
    }

    /// Compare the next bytes against `pattern`.
    ///
    /// The cursor moves past `pattern.len()` bytes whether or not they match.
    pub fn match_bytes(&mut self, pattern: &[u8]) -> Result<bool> {
        let matched = self.lookahead(pattern.len())? == pattern;
        self.position += pattern.len();
        Ok(matched)
    }

    // ------------------------------------------------------------------
    // Peeks
    // ------------------------------------------------------------------

    /// Peek one unsigned byte.
    pub fn peek_u8(&mut self) -> Result<u8> {
        self.peek(Self::read_u8)
    }

    /// Alias of [`Cursor::peek_u8`].
    pub fn peek_byte(&mut self) -> Result<u8> {
        self.peek(Self::read_byte)
    }

    /// Peek a little-endian `u16`.
    pub fn peek_u16_le(&mut self) -> Result<u16> {
        self.peek(Self::read_u16_le)
    }

    /// Peek a big-endian `u16`.
    pub fn peek_u16_be(&mut self) -> Result<u16> {
        self.peek(Self::read_u16_be)
    }

    /// Peek a little-endian `u32`.
    pub fn peek_u32_le(&mut self) -> Result<u32> {
        self.peek(Self::read_u32_le)
    }

    /// Peek a big-endian `u32`.
    pub fn peek_u32_be(&mut self) -> Result<u32> {
        self.peek(Self::read_u32_be)
    }

    /// Peek a little-endian float.
    pub fn peek_f32_le(&mut self) -> Result<f32> {
        self.peek(Self::read_f32_le)
    }

    /// Peek a big-endian float.
    pub fn peek_f32_be(&mut self) -> Result<f32> {
        self.peek(Self::read_f32_be)
    }

    /// Peek a little-endian double.
    pub fn peek_f64_le(&mut self) -> Result<f64> {
        self.peek(Self::read_f64_le)
    }

    /// Peek a big-endian double.
    pub fn peek_f64_be(&mut self) -> Result<f64> {
        self.peek(Self::read_f64_be)
    }

    /// Peek `n` bytes as text.
    pub fn peek_string(&mut self, n: usize) -> Result<String> {
        self.peek(|c| c.read_string(n))
    }
}
