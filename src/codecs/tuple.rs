//! The tuple composition codec: one key (shape chosen out-of-band) followed
//! by one multiband tile.
//!
//! The key kind is not embedded per record. It arrives with the schema name
//! carried in the surrounding channel metadata, and the registry bakes it
//! into the codec it hands back — this struct is the crate's dynamic
//! dispatch point made static.

use crate::codecs::geometry::{
    decode_projected_extent, decode_temporal_projected_extent, encode_projected_extent,
    encode_temporal_projected_extent,
};
use crate::codecs::key::{
    decode_space_time_key, decode_spatial_key, encode_space_time_key, encode_spatial_key,
};
use crate::codecs::multiband::{decode_multiband, encode_multiband, multiband_encoded_len};
use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::{KeyKind, Record, TileKey};
use crate::wire::{ByteReader, ByteWriter};

/// The codec for `(key, multiband tile)` wire records of one fixed key
/// kind.
#[derive(Debug, Clone, Copy)]
pub struct TupleCodec {
    key_kind: KeyKind,
}

impl TupleCodec {
    pub fn new(key_kind: KeyKind) -> Self {
        Self { key_kind }
    }

    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    fn encode_key(&self, key: &TileKey, writer: &mut ByteWriter) {
        match key {
            TileKey::ProjectedExtent(pe) => encode_projected_extent(pe, writer),
            TileKey::TemporalProjectedExtent(tpe) => {
                encode_temporal_projected_extent(tpe, writer)
            }
            TileKey::Spatial(k) => encode_spatial_key(k, writer),
            TileKey::SpaceTime(k) => encode_space_time_key(k, writer),
        }
    }

    fn decode_key(&self, reader: &mut ByteReader<'_>) -> Result<TileKey> {
        Ok(match self.key_kind {
            KeyKind::ProjectedExtent => TileKey::ProjectedExtent(decode_projected_extent(reader)?),
            KeyKind::TemporalProjectedExtent => {
                TileKey::TemporalProjectedExtent(decode_temporal_projected_extent(reader)?)
            }
            KeyKind::SpatialKey => TileKey::Spatial(decode_spatial_key(reader)?),
            KeyKind::SpaceTimeKey => TileKey::SpaceTime(decode_space_time_key(reader)?),
        })
    }
}

impl RecordCodec for TupleCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::Tuple(key, value) = record else {
            return Err(GridWireError::MalformedRecord(
                "Tuple codec was handed a non-Tuple record".into(),
            ));
        };
        if key.kind() != self.key_kind {
            return Err(GridWireError::MalformedRecord(format!(
                "tuple key is a {}, codec expects a {}",
                key.kind(),
                self.key_kind
            )));
        }

        let mut writer = ByteWriter::with_capacity(multiband_encoded_len(value) + 64);
        self.encode_key(key, &mut writer);
        encode_multiband(value, &mut writer)?;
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let key = self.decode_key(&mut reader)?;
        // The multiband value runs to the end of the record.
        let value = decode_multiband(&mut reader)?;
        Ok(vec![Record::Tuple(key, value)])
    }
}
