//! Codecs for extents, CRS references, and the two projected-extent key
//! shapes.
//!
//! The CRS sub-message is always the `(epsg, proj4)` pair. Decode dispatch:
//! a nonzero epsg wins; otherwise the proj4 field is authoritative. EPSG
//! code 0 is therefore unrepresentable on the wire — `Epsg(0)` encodes to
//! the same bytes as `Proj4("")` and comes back as the latter. The peer
//! systems share this boundary, so it is preserved rather than hardened.

use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::{CrsRef, Extent, ProjectedExtent, Record, TemporalProjectedExtent};
use crate::wire::{ByteReader, ByteWriter};

pub(crate) fn encode_extent(extent: &Extent, writer: &mut ByteWriter) {
    writer.put_f64(extent.xmin);
    writer.put_f64(extent.ymin);
    writer.put_f64(extent.xmax);
    writer.put_f64(extent.ymax);
}

pub(crate) fn decode_extent(reader: &mut ByteReader<'_>) -> Result<Extent> {
    Ok(Extent {
        xmin: reader.get_f64()?,
        ymin: reader.get_f64()?,
        xmax: reader.get_f64()?,
        ymax: reader.get_f64()?,
    })
}

pub(crate) fn encode_crs(crs: &CrsRef, writer: &mut ByteWriter) {
    match crs {
        CrsRef::Epsg(code) => {
            writer.put_i32(*code);
            writer.put_str("");
        }
        CrsRef::Proj4(proj4) => {
            writer.put_i32(0);
            writer.put_str(proj4);
        }
    }
}

pub(crate) fn decode_crs(reader: &mut ByteReader<'_>) -> Result<CrsRef> {
    let epsg = reader.get_i32()?;
    let proj4 = reader.get_str()?;
    if epsg != 0 {
        Ok(CrsRef::Epsg(epsg))
    } else {
        Ok(CrsRef::Proj4(proj4))
    }
}

pub(crate) fn encode_projected_extent(pe: &ProjectedExtent, writer: &mut ByteWriter) {
    encode_extent(&pe.extent, writer);
    encode_crs(&pe.crs, writer);
}

pub(crate) fn decode_projected_extent(reader: &mut ByteReader<'_>) -> Result<ProjectedExtent> {
    Ok(ProjectedExtent {
        extent: decode_extent(reader)?,
        crs: decode_crs(reader)?,
    })
}

pub(crate) fn encode_temporal_projected_extent(
    tpe: &TemporalProjectedExtent,
    writer: &mut ByteWriter,
) {
    encode_extent(&tpe.extent, writer);
    encode_crs(&tpe.crs, writer);
    writer.put_i64(tpe.instant);
}

pub(crate) fn decode_temporal_projected_extent(
    reader: &mut ByteReader<'_>,
) -> Result<TemporalProjectedExtent> {
    Ok(TemporalProjectedExtent {
        extent: decode_extent(reader)?,
        crs: decode_crs(reader)?,
        instant: reader.get_i64()?,
    })
}

/// The registered codec for the standalone `"ProjectedExtent"` schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectedExtentCodec;

impl RecordCodec for ProjectedExtentCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::ProjectedExtent(pe) = record else {
            return Err(GridWireError::MalformedRecord(
                "ProjectedExtent codec was handed a different record shape".into(),
            ));
        };
        let mut writer = ByteWriter::new();
        encode_projected_extent(pe, &mut writer);
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let pe = decode_projected_extent(&mut reader)?;
        reader.expect_end("ProjectedExtent")?;
        Ok(vec![Record::ProjectedExtent(pe)])
    }
}

/// The registered codec for the standalone `"TemporalProjectedExtent"`
/// schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemporalProjectedExtentCodec;

impl RecordCodec for TemporalProjectedExtentCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::TemporalProjectedExtent(tpe) = record else {
            return Err(GridWireError::MalformedRecord(
                "TemporalProjectedExtent codec was handed a different record shape".into(),
            ));
        };
        let mut writer = ByteWriter::new();
        encode_temporal_projected_extent(tpe, &mut writer);
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let tpe = decode_temporal_projected_extent(&mut reader)?;
        reader.expect_end("TemporalProjectedExtent")?;
        Ok(vec![Record::TemporalProjectedExtent(tpe)])
    }
}
