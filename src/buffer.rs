use std::io::{ErrorKind, Read, Write};

use crate::{consts::CHUNK_SIZE, error::QoiError};

/// A chunked byte-stream adapter over a [`Read`] source.
///
/// Bytes are pulled from the source [`CHUNK_SIZE`] at a time so the per-chunk
/// work of the decoder never turns into a read call per byte.
pub struct Reader<R: Read> {
    source: R,
    buffer: [u8; CHUNK_SIZE],
    filled: usize,   // how many bytes of the buffer hold source data
    position: usize, // next unconsumed byte, always <= filled
}

impl<R: Read> Reader<R> {
    pub fn new(source: R) -> Self {
        Self {source, buffer: [0; CHUNK_SIZE], filled: 0, position: 0}
    }
    /// Consumes one byte from the stream.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the source ends before a byte is available or the source fails to read.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, QoiError> {
        if self.position == self.filled {
            self.refill()?;
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }
    /// Consumes `N` bytes from the stream.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the source ends before `N` bytes are available or the source fails to read.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], QoiError> {
        let mut output = [0; N];
        for byte in &mut output {
            *byte = self.read_byte()?;
        }
        Ok(output)
    }
    /// Consumes four bytes from the stream as a big-endian unsigned integer.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the source ends before four bytes are available or the source fails to read.
    #[inline]
    pub fn read_be_u32(&mut self) -> Result<u32, QoiError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }
    fn refill(&mut self) -> Result<(), QoiError> {
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(0) => return Err(QoiError::UnexpectedEndOfStream),
                Ok(amount) => {
                    self.filled = amount;
                    self.position = 0;
                    return Ok(());
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => {}, // the Read contract asks callers to retry
                Err(e) => return Err(QoiError::Io(e)),
            }
        }
    }
}

/// A chunked byte-stream adapter over a [`Write`] sink.
///
/// Bytes accumulate in a [`CHUNK_SIZE`] buffer and reach the sink in full chunks,
/// plus whatever remains when [`Writer::flush`] is called.
pub struct Writer<W: Write> {
    sink: W,
    buffer: [u8; CHUNK_SIZE],
    written: usize, // how many bytes of the buffer are waiting to reach the sink
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W) -> Self {
        Self {sink, buffer: [0; CHUNK_SIZE], written: 0}
    }
    /// Appends one byte to the stream.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sink fails to write a full chunk.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<(), QoiError> {
        if self.written == CHUNK_SIZE {
            self.drain()?;
        }
        self.buffer[self.written] = byte;
        self.written += 1;
        Ok(())
    }
    /// Appends a slice of bytes to the stream.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sink fails to write a full chunk.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), QoiError> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }
    /// Appends a big-endian unsigned integer to the stream as four bytes.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sink fails to write a full chunk.
    #[inline]
    pub fn write_be_u32(&mut self, value: u32) -> Result<(), QoiError> {
        self.write_bytes(&value.to_be_bytes())
    }
    /// Drains the remaining buffered bytes and flushes the sink.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sink fails to write or flush.
    pub fn flush(&mut self) -> Result<(), QoiError> {
        self.drain()?;
        self.sink.flush()?;
        Ok(())
    }
    fn drain(&mut self) -> Result<(), QoiError> {
        if self.written != 0 {
            self.sink.write_all(&self.buffer[..self.written])?;
            self.written = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Reader, Writer};
    use crate::error::QoiError;
    #[test]
    fn good_read_byte_and_be_u32() {
        let input = [0xab, 0, 0, 2, 64, 7];
        let mut reader = Reader::new(&input[..]);
        assert_eq!(reader.read_byte().unwrap(), 0xab);
        assert_eq!(reader.read_be_u32().unwrap(), 576);
        assert_eq!(reader.read_byte().unwrap(), 7);
    }
    #[test]
    fn good_read_array() {
        let input = [5, 6, 7, 8];
        let mut reader = Reader::new(&input[..]);
        let bytes: [u8; 3] = reader.read_array().unwrap();
        assert_eq!(bytes, [5, 6, 7]);
    }
    #[test]
    fn bad_read_past_end() {
        let input = [1, 2];
        let mut reader = Reader::new(&input[..]);
        assert_eq!(reader.read_byte().unwrap(), 1);
        assert_eq!(reader.read_byte().unwrap(), 2);
        assert!(matches!(reader.read_byte(), Err(QoiError::UnexpectedEndOfStream)));
    }
    #[test]
    fn bad_read_be_u32_truncated() {
        let input = [0, 0, 1];
        let mut reader = Reader::new(&input[..]);
        assert!(matches!(reader.read_be_u32(), Err(QoiError::UnexpectedEndOfStream)));
    }
    #[test]
    fn good_write_reaches_sink_on_flush() {
        let mut sink = Vec::new();
        let mut writer = Writer::new(&mut sink);
        writer.write_byte(9).unwrap();
        writer.write_be_u32(576).unwrap();
        writer.write_bytes(&[1, 2, 3]).unwrap();
        writer.flush().unwrap();
        assert_eq!(sink, [9, 0, 0, 2, 64, 1, 2, 3]);
    }
    #[test]
    fn good_write_drains_full_chunks() {
        let mut sink = Vec::new();
        let mut writer = Writer::new(&mut sink);
        for _ in 0..crate::consts::CHUNK_SIZE + 1 {
            writer.write_byte(42).unwrap();
        }
        writer.flush().unwrap();
        assert_eq!(sink.len(), crate::consts::CHUNK_SIZE + 1);
        assert!(sink.iter().all(|&byte| byte == 42));
    }
}
