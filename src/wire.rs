//! Little-endian byte cursors shared by every codec in this crate.
//!
//! All multi-byte payload fields on the wire are little-endian. The only
//! big-endian integer in the whole format is the frame length prefix written
//! by `channel::FramedChannel`, which follows the host transport's
//! convention instead of ours.

use bytemuck::Pod;

use crate::error::{GridWireError, Result};

/// An append-only writer over an owned byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a length-prefixed UTF-8 string (u32 byte length, then bytes).
    pub fn put_str(&mut self, value: &str) {
        self.put_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Bulk-writes a slice of POD values in little-endian order.
    ///
    /// On little-endian targets this is a single zero-copy append through
    /// `bytemuck::cast_slice`; elsewhere it falls back to per-value writes.
    pub fn put_pod_slice<T: Pod + LittleEndian>(&mut self, values: &[T]) {
        if cfg!(target_endian = "little") {
            self.buf.extend_from_slice(bytemuck::cast_slice(values));
        } else {
            for value in values {
                value.put_le(&mut self.buf);
            }
        }
    }
}

/// The POD value types the bulk writer knows how to byte-swap.
pub trait LittleEndian: Copy {
    fn put_le(self, buf: &mut Vec<u8>);
}

macro_rules! impl_little_endian {
    ($($ty:ty),*) => {
        $(impl LittleEndian for $ty {
            fn put_le(self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }
        })*
    };
}

impl_little_endian!(u32, i32, f32, f64);

/// A consuming reader over a borrowed byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails with `MalformedRecord` unless every byte has been consumed.
    pub fn expect_end(&self, what: &str) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(GridWireError::MalformedRecord(format!(
                "{} bytes of trailing garbage after {what} payload",
                self.remaining()
            )))
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(GridWireError::MalformedRecord(format!(
                "unexpected end of payload: needed {count} bytes, {} remain",
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn get_i32(&mut self) -> Result<i32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(i32::from_le_bytes(bytes))
    }

    pub fn get_i64(&mut self) -> Result<i64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(i64::from_le_bytes(bytes))
    }

    pub fn get_f32(&mut self) -> Result<f32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(f32::from_le_bytes(bytes))
    }

    pub fn get_f64(&mut self) -> Result<f64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(f64::from_le_bytes(bytes))
    }

    /// Reads a length-prefixed UTF-8 string written by `ByteWriter::put_str`.
    pub fn get_str(&mut self) -> Result<String> {
        let len = self.get_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|err| {
            GridWireError::MalformedRecord(format!("invalid UTF-8 in string field: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.put_u8(7);
        writer.put_u32(0xDEAD_BEEF);
        writer.put_i32(-42);
        writer.put_i64(-1_000_000_000_000);
        writer.put_f32(1.5);
        writer.put_f64(-2.25);
        writer.put_str("+proj=longlat");

        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.get_u8().unwrap(), 7);
        assert_eq!(reader.get_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.get_i32().unwrap(), -42);
        assert_eq!(reader.get_i64().unwrap(), -1_000_000_000_000);
        assert_eq!(reader.get_f32().unwrap(), 1.5);
        assert_eq!(reader.get_f64().unwrap(), -2.25);
        assert_eq!(reader.get_str().unwrap(), "+proj=longlat");
        assert!(reader.expect_end("test").is_ok());
    }

    #[test]
    fn test_pod_slice_matches_per_value_writes() {
        let values: [u32; 3] = [1, 2, 0xFFFF_0000];
        let mut bulk = ByteWriter::new();
        bulk.put_pod_slice(&values);

        let mut scalar = ByteWriter::new();
        for &v in &values {
            scalar.put_u32(v);
        }
        assert_eq!(bulk.into_bytes(), scalar.into_bytes());
    }

    #[test]
    fn test_short_buffer_is_an_error() {
        let bytes = [1u8, 2, 3];
        let mut reader = ByteReader::new(&bytes);
        assert!(reader.get_u32().is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let bytes = [1u8, 2, 3, 4, 5];
        let mut reader = ByteReader::new(&bytes);
        reader.get_u32().unwrap();
        assert!(reader.expect_end("test").is_err());
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let mut writer = ByteWriter::new();
        writer.put_u32(2);
        writer.put_u8(0xFF);
        writer.put_u8(0xFE);
        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert!(reader.get_str().is_err());
    }
}
