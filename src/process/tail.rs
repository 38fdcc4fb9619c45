//! process::tail
//!
//! Fixed-capacity buffer that keeps the newest bytes written to it.

/// Accumulates bytes up to `cap`, dropping from the front on overflow.
///
/// When an append would exceed the cap, the oldest bytes are discarded so
/// that `cap - 1` of the newest bytes remain. The length never exceeds `cap`.
#[derive(Debug, Clone)]
pub struct TailBuffer {
    buf: Vec<u8>,
    cap: usize,
    truncated: bool,
}

impl TailBuffer {
    /// Create an empty buffer. `cap` must be at least 1.
    pub fn new(cap: usize) -> Self {
        Self {
            buf: Vec::new(),
            cap: cap.max(1),
            truncated: false,
        }
    }

    /// Append a chunk.
    pub fn push(&mut self, chunk: &[u8]) {
        if chunk.len() >= self.cap {
            // Nothing already buffered can survive.
            self.buf.clear();
            self.buf
                .extend_from_slice(&chunk[chunk.len() - (self.cap - 1)..]);
            self.truncated = true;
            return;
        }
        self.buf.extend_from_slice(chunk);
        if self.buf.len() > self.cap {
            let excess = self.buf.len() - (self.cap - 1);
            self.buf.drain(..excess);
            self.truncated = true;
        }
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether any bytes were dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Decode as UTF-8, skipping a partial character left at the front by
    /// truncation.
    pub fn into_string(self) -> String {
        let start = if self.truncated {
            self.buf
                .iter()
                .take_while(|b| (**b & 0xC0) == 0x80)
                .count()
        } else {
            0
        };
        String::from_utf8_lossy(&self.buf[start..]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_cap_keeps_everything() {
        let mut tail = TailBuffer::new(10);
        tail.push(b"abc");
        tail.push(b"def");
        assert!(!tail.truncated());
        assert_eq!(tail.into_string(), "abcdef");
    }

    #[test]
    fn exactly_cap_is_not_truncated() {
        let mut tail = TailBuffer::new(4);
        tail.push(b"ab");
        tail.push(b"cd");
        assert_eq!(tail.len(), 4);
        assert!(!tail.truncated());
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut tail = TailBuffer::new(5);
        tail.push(b"abcd");
        tail.push(b"efg");
        assert!(tail.truncated());
        assert_eq!(tail.len(), 4);
        assert_eq!(tail.into_string(), "defg");
    }

    #[test]
    fn single_huge_chunk() {
        let mut tail = TailBuffer::new(5);
        tail.push(b"xx");
        tail.push(b"0123456789");
        assert_eq!(tail.into_string(), "6789");
    }

    #[test]
    fn never_exceeds_cap() {
        let mut tail = TailBuffer::new(7);
        for i in 0..100u8 {
            tail.push(&vec![b'a' + (i % 26); (i % 9) as usize]);
            assert!(tail.len() <= 7);
        }
    }

    #[test]
    fn partial_utf8_prefix_is_skipped() {
        let mut tail = TailBuffer::new(4);
        // "é" is two bytes; truncation to 3 bytes splits it.
        tail.push("aé".as_bytes());
        tail.push("zz".as_bytes());
        assert_eq!(tail.into_string(), "zz");
    }
}
