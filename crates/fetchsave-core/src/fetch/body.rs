//! Accumulated response body for one transfer.

/// Append-only byte buffer filled by the transfer's write callback.
///
/// Bytes are kept raw until [`BodyBuffer::into_text`] so a UTF-8 sequence
/// split across two chunks still decodes as one character.
#[derive(Debug, Default)]
pub struct BodyBuffer {
    bytes: Vec<u8>,
    chunks: usize,
    limit: Option<u64>,
}

/// Returned by [`BodyBuffer::push`] when a chunk would take the body past its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitExceeded {
    pub limit: u64,
}

impl BodyBuffer {
    pub fn new(limit: Option<u64>) -> Self {
        Self {
            bytes: Vec::new(),
            chunks: 0,
            limit,
        }
    }

    /// Append one chunk in arrival order. The chunk is rejected whole if it
    /// would exceed the limit; the buffer is left as it was.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), LimitExceeded> {
        if let Some(limit) = self.limit {
            let total = self.bytes.len() as u64 + chunk.len() as u64;
            if total > limit {
                return Err(LimitExceeded { limit });
            }
        }
        self.bytes.extend_from_slice(chunk);
        self.chunks += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of chunks accepted so far.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Decode as UTF-8 regardless of what the server declared. Invalid
    /// sequences become U+FFFD.
    pub fn into_text(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}
