use crate::errors::Result;
use std::io::BufRead;

/// Forward-only reader over a stream of machine code that keeps track of how many bytes have
/// been consumed.
pub struct ByteSource<R> {
    reader: R,
    position: usize,
}

impl<R: BufRead> ByteSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next byte without consuming it, or `None` at the end of the stream.
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        let buffer = self.reader.fill_buf()?;
        Ok(buffer.first().copied())
    }

    /// Consumes the next byte, or returns `None` at the end of the stream.
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
            self.position += 1;
        }
        Ok(byte)
    }
}
