//! The multiband composition codec: an ordered stack of nested tile
//! payloads, band count implicit in the enclosing payload length.

use crate::codecs::tile::{decode_tile, encode_tile, tile_encoded_len};
use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::raster::validate_bands;
use crate::types::{MultibandTile, Record};
use crate::wire::{ByteReader, ByteWriter};

/// Encodes every band in order. Band agreement (shape, cell type, no-data)
/// is re-checked here because the band vector is reachable through public
/// constructors that predate the validation.
pub(crate) fn encode_multiband(mb: &MultibandTile, writer: &mut ByteWriter) -> Result<()> {
    validate_bands(mb.bands())?;
    for band in mb.bands() {
        encode_tile(band, writer)?;
    }
    Ok(())
}

/// Decodes nested tiles until the reader is exhausted.
///
/// Shared attributes (cell type, no-data) are whatever band 0 carries;
/// later bands are deliberately not re-validated against it, so payloads
/// from permissive older writers still load.
pub(crate) fn decode_multiband(reader: &mut ByteReader<'_>) -> Result<MultibandTile> {
    let mut bands = Vec::new();
    while !reader.is_empty() {
        bands.push(decode_tile(reader)?);
    }
    MultibandTile::from_decoded_bands(bands)
}

pub(crate) fn multiband_encoded_len(mb: &MultibandTile) -> usize {
    mb.bands().iter().map(tile_encoded_len).sum()
}

/// The registered codec for the `"MultibandTile"` schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultibandCodec;

impl RecordCodec for MultibandCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::MultibandTile(mb) = record else {
            return Err(GridWireError::MalformedRecord(
                "MultibandTile codec was handed a non-MultibandTile record".into(),
            ));
        };
        let mut writer = ByteWriter::with_capacity(multiband_encoded_len(mb));
        encode_multiband(mb, &mut writer)?;
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let mb = decode_multiband(&mut reader)?;
        Ok(vec![Record::MultibandTile(mb)])
    }
}
