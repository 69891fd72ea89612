//! Codecs for the two grid-position key shapes.

use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::{Record, SpaceTimeKey, SpatialKey};
use crate::wire::{ByteReader, ByteWriter};

pub(crate) fn encode_spatial_key(key: &SpatialKey, writer: &mut ByteWriter) {
    writer.put_i32(key.col);
    writer.put_i32(key.row);
}

pub(crate) fn decode_spatial_key(reader: &mut ByteReader<'_>) -> Result<SpatialKey> {
    Ok(SpatialKey {
        col: reader.get_i32()?,
        row: reader.get_i32()?,
    })
}

pub(crate) fn encode_space_time_key(key: &SpaceTimeKey, writer: &mut ByteWriter) {
    writer.put_i32(key.col);
    writer.put_i32(key.row);
    writer.put_i64(key.instant);
}

pub(crate) fn decode_space_time_key(reader: &mut ByteReader<'_>) -> Result<SpaceTimeKey> {
    Ok(SpaceTimeKey {
        col: reader.get_i32()?,
        row: reader.get_i32()?,
        instant: reader.get_i64()?,
    })
}

/// The registered codec for the standalone `"SpatialKey"` schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpatialKeyCodec;

impl RecordCodec for SpatialKeyCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::SpatialKey(key) = record else {
            return Err(GridWireError::MalformedRecord(
                "SpatialKey codec was handed a different record shape".into(),
            ));
        };
        let mut writer = ByteWriter::with_capacity(8);
        encode_spatial_key(key, &mut writer);
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let key = decode_spatial_key(&mut reader)?;
        reader.expect_end("SpatialKey")?;
        Ok(vec![Record::SpatialKey(key)])
    }
}

/// The registered codec for the standalone `"SpaceTimeKey"` schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpaceTimeKeyCodec;

impl RecordCodec for SpaceTimeKeyCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::SpaceTimeKey(key) = record else {
            return Err(GridWireError::MalformedRecord(
                "SpaceTimeKey codec was handed a different record shape".into(),
            ));
        };
        let mut writer = ByteWriter::with_capacity(16);
        encode_space_time_key(key, &mut writer);
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let key = decode_space_time_key(&mut reader)?;
        reader.expect_end("SpaceTimeKey")?;
        Ok(vec![Record::SpaceTimeKey(key)])
    }
}
