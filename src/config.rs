//! Decoder configuration

/// Default ceiling on a single block's decompressed size (256 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_LEN: usize = 256 * 1024 * 1024;

/// Configuration for block decompression.
///
/// Block headers come straight from untrusted input, so the declared
/// output length of an LZ4 block is checked against `max_decompressed_len`
/// before the output buffer is allocated. Stored blocks are zero-copy views
/// of the input and are not limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockConfig {
    /// Largest decompressed length a header may declare (default: 256MB)
    pub max_decompressed_len: usize,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            max_decompressed_len: DEFAULT_MAX_DECOMPRESSED_LEN,
        }
    }
}

impl BlockConfig {
    /// Create a new block configuration.
    pub fn new(max_decompressed_len: usize) -> Self {
        Self {
            max_decompressed_len,
        }
    }

    /// Set the decompressed length ceiling.
    pub fn with_max_decompressed_len(mut self, max_decompressed_len: usize) -> Self {
        self.max_decompressed_len = max_decompressed_len;
        self
    }
}
