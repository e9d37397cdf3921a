//! Error types for byte-level decoding

use thiserror::Error;

/// Errors that can occur while decoding a buffer.
///
/// Every failure is terminal for the enclosing parse: nothing here is
/// retried, and no partial result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// An operation needed more bytes than the buffer holds.
    #[error("Unexpected end of buffer at offset {offset}: need {needed} bytes, {available} available")]
    BufferUnderrun {
        /// Cursor position the read started from
        offset: usize,
        /// Bytes the operation required
        needed: usize,
        /// Bytes actually left in the buffer (or block)
        available: usize,
    },

    /// The decoded structure is internally inconsistent.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    /// Interleave parameters do not describe whole elements.
    #[error("Invalid interleave geometry: {byte_count} bytes cannot be split into {width}-byte elements")]
    InvalidGeometry {
        /// Total bytes in the interleaved run
        byte_count: usize,
        /// Bytes per element
        width: usize,
    },

    /// A block header declared more output than the configured limit allows.
    #[error("Declared decompressed length {declared} exceeds limit of {limit} bytes")]
    LimitExceeded {
        /// Length claimed by the block header
        declared: usize,
        /// Configured ceiling
        limit: usize,
    },
}

impl DecodeError {
    /// Get the failure class of this error.
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::BufferUnderrun { .. } => DecodeErrorKind::BufferUnderrun,
            DecodeError::MalformedStream(_) => DecodeErrorKind::MalformedStream,
            DecodeError::InvalidGeometry { .. } => DecodeErrorKind::InvalidGeometry,
            DecodeError::LimitExceeded { .. } => DecodeErrorKind::LimitExceeded,
        }
    }

    pub(crate) fn underrun(offset: usize, needed: usize, available: usize) -> Self {
        DecodeError::BufferUnderrun {
            offset,
            needed,
            available,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        DecodeError::MalformedStream(message.into())
    }
}

/// Payload-free classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// Read past the end of the available bytes
    BufferUnderrun,
    /// Internally inconsistent compressed stream
    MalformedStream,
    /// Interleave byte count not divisible by element width
    InvalidGeometry,
    /// Block header over the configured size ceiling
    LimitExceeded,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;
