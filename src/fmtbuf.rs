//! Bounded formatting buffer.
//!
//! Overlay text and log messages are formatted through a hard size cap:
//! output that would exceed the cap is truncated at a character boundary
//! instead of growing the buffer or reporting an error.

use std::fmt;

/// `fmt::Write` sink that silently truncates once `cap` bytes are reached.
pub(crate) struct BoundedWriter {
    buf: String,
    cap: usize,
}

impl BoundedWriter {
    pub(crate) fn new(cap: usize) -> Self {
        Self {
            buf: String::new(),
            cap,
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.cap - self.buf.len();
        if s.len() <= remaining {
            self.buf.push_str(s);
        } else {
            let mut end = remaining;
            while end > 0 && !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buf.push_str(&s[..end]);
        }
        // Truncation is the contract, not an error.
        Ok(())
    }
}
