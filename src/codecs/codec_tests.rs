use std::io::Cursor;

use rand::Rng;

use super::*;
use crate::channel::FramedChannel;
use crate::error::GridWireError;
use crate::registry::CodecRegistry;
use crate::traits::RecordCodec;
use crate::types::{
    CellBuffer, CellType, CrsRef, Extent, KeyKind, MultibandTile, ProjectedExtent, Record,
    SpaceTimeKey, SpatialKey, TemporalProjectedExtent, Tile, TileKey,
};
use crate::wire::{ByteReader, ByteWriter};

/// Wires `log` output into the test harness; RUST_LOG=trace shows frame and
/// dispatch tracing when a test fails.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One representative 2x2 tile per cell type, each with a no-data sentinel.
fn representative_tiles() -> Vec<Tile> {
    vec![
        Tile::new(2, 2, CellType::Bit, Some(0.0), CellBuffer::U8(vec![0, 1, 1, 0])).unwrap(),
        Tile::new(2, 2, CellType::Byte, Some(-128.0), CellBuffer::I8(vec![0, 0, 1, 1])).unwrap(),
        Tile::new(2, 2, CellType::Ubyte, Some(255.0), CellBuffer::U8(vec![0, 255, 7, 1])).unwrap(),
        Tile::new(
            2,
            2,
            CellType::Short,
            Some(-32768.0),
            CellBuffer::I16(vec![-32768, 0, 5, 32767]),
        )
        .unwrap(),
        Tile::new(
            2,
            2,
            CellType::Ushort,
            Some(65535.0),
            CellBuffer::U16(vec![0, 1, 65535, 42]),
        )
        .unwrap(),
        Tile::new(
            2,
            2,
            CellType::Int,
            Some(f64::from(i32::MIN)),
            CellBuffer::I32(vec![i32::MIN, -1, 0, i32::MAX]),
        )
        .unwrap(),
        Tile::new(
            2,
            2,
            CellType::Float,
            Some(-9999.0),
            CellBuffer::F32(vec![0.5, -1.25, 3.0, 4.5]),
        )
        .unwrap(),
        Tile::new(
            2,
            2,
            CellType::Double,
            Some(-9999.0),
            CellBuffer::F64(vec![0.125, -2.5, 1e100, -0.0]),
        )
        .unwrap(),
    ]
}

fn band(fill: i32) -> Tile {
    Tile::new(2, 2, CellType::Int, Some(-1.0), CellBuffer::I32(vec![fill; 4])).unwrap()
}

fn wgs84_extent() -> Extent {
    Extent::new(-180.0, -90.0, 180.0, 90.0)
}

//==================================================================================
// Tile
//==================================================================================

#[test]
fn test_every_cell_type_roundtrips_exactly() {
    let codec = TileCodec;
    for tile in representative_tiles() {
        let record = Record::Tile(tile);
        let bytes = codec.encode(&record).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, vec![record]);
    }
}

#[test]
fn test_tile_without_no_data_stays_without() {
    let codec = TileCodec;
    let tile = Tile::new(1, 3, CellType::Ubyte, None, CellBuffer::U8(vec![9, 8, 7])).unwrap();
    let bytes = codec.encode(&Record::Tile(tile)).unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    let Record::Tile(tile) = &decoded[0] else {
        panic!("expected a Tile record");
    };
    assert_eq!(tile.no_data, None);
}

#[test]
fn test_zero_no_data_is_still_present() {
    // A sentinel of 0 is a legitimate value and must not collapse to "absent".
    let codec = TileCodec;
    let tile = Tile::new(1, 2, CellType::Int, Some(0.0), CellBuffer::I32(vec![1, 2])).unwrap();
    let bytes = codec.encode(&Record::Tile(tile)).unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    let Record::Tile(tile) = &decoded[0] else {
        panic!("expected a Tile record");
    };
    assert_eq!(tile.no_data, Some(0.0));
}

#[test]
fn test_declared_dimensions_exceeding_cells_is_malformed() {
    // Declares 2x3 = 6 cells but stores only 4.
    let mut writer = ByteWriter::new();
    writer.put_u32(2);
    writer.put_u32(3);
    writer.put_u8(CellType::Int.code());
    writer.put_u8(0);
    for value in [1i32, 2, 3, 4] {
        writer.put_i32(value);
    }

    let err = TileCodec.decode(&writer.into_bytes()).unwrap_err();
    assert!(matches!(err, GridWireError::MalformedTile(_)));
}

#[test]
fn test_trailing_bytes_after_tile_are_rejected() {
    let tile = Tile::new(1, 1, CellType::Int, None, CellBuffer::I32(vec![5])).unwrap();
    let mut bytes = TileCodec.encode(&Record::Tile(tile)).unwrap();
    bytes.push(0xAB);
    let err = TileCodec.decode(&bytes).unwrap_err();
    assert!(matches!(err, GridWireError::MalformedRecord(_)));
}

#[test]
fn test_unknown_cell_type_discriminant_fails_decode() {
    let mut writer = ByteWriter::new();
    writer.put_u32(1);
    writer.put_u32(1);
    writer.put_u8(42);
    writer.put_u8(0);
    let err = TileCodec.decode(&writer.into_bytes()).unwrap_err();
    assert!(matches!(err, GridWireError::UnknownCellType(42)));
}

#[test]
fn test_random_tiles_roundtrip() {
    let mut rng = rand::rng();
    let codec = TileCodec;
    let (rows, cols) = (7u32, 5u32);
    let count = (rows * cols) as usize;

    for _ in 0..8 {
        let tiles = vec![
            Tile::new(
                rows,
                cols,
                CellType::Bit,
                None,
                CellBuffer::U8((0..count).map(|_| rng.random_range(0..=1)).collect()),
            )
            .unwrap(),
            Tile::new(
                rows,
                cols,
                CellType::Short,
                Some(-1.0),
                CellBuffer::I16((0..count).map(|_| rng.random_range(i16::MIN..=i16::MAX)).collect()),
            )
            .unwrap(),
            Tile::new(
                rows,
                cols,
                CellType::Double,
                Some(-9999.0),
                CellBuffer::F64((0..count).map(|_| rng.random_range(-1e6..1e6)).collect()),
            )
            .unwrap(),
        ];
        for tile in tiles {
            let record = Record::Tile(tile);
            let bytes = codec.encode(&record).unwrap();
            assert_eq!(codec.decode(&bytes).unwrap(), vec![record]);
        }
    }
}

//==================================================================================
// MultibandTile
//==================================================================================

#[test]
fn test_three_band_roundtrip_preserves_order() {
    let mb = MultibandTile::new(vec![band(1), band(2), band(3)]).unwrap();
    let codec = MultibandCodec;
    let bytes = codec.encode(&Record::MultibandTile(mb.clone())).unwrap();
    let decoded = codec.decode(&bytes).unwrap();

    let Record::MultibandTile(out) = &decoded[0] else {
        panic!("expected a MultibandTile record");
    };
    assert_eq!(out.band_count(), 3);
    assert_eq!(out, &mb);
    for (i, b) in out.bands().iter().enumerate() {
        assert_eq!(b.cells, CellBuffer::I32(vec![i as i32 + 1; 4]));
    }
}

#[test]
fn test_single_band_wraps_without_special_case() {
    let mb = MultibandTile::from_band(band(7));
    let codec = MultibandCodec;
    let bytes = codec.encode(&Record::MultibandTile(mb.clone())).unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, vec![Record::MultibandTile(mb)]);
}

#[test]
fn test_inconsistent_bands_rejected_at_encode() {
    // from_decoded_bands skips validation, standing in for data built by a
    // permissive writer; the encode path must still refuse it.
    let odd = Tile::new(1, 4, CellType::Int, Some(-1.0), CellBuffer::I32(vec![0; 4])).unwrap();
    let mb = MultibandTile::from_decoded_bands(vec![band(1), odd]).unwrap();
    let err = MultibandCodec.encode(&Record::MultibandTile(mb)).unwrap_err();
    assert!(matches!(err, GridWireError::InconsistentMultiband(_)));
}

#[test]
fn test_empty_multiband_payload_is_malformed() {
    let err = MultibandCodec.decode(&[]).unwrap_err();
    assert!(matches!(err, GridWireError::MalformedRecord(_)));
}

//==================================================================================
// Geometry & keys
//==================================================================================

#[test]
fn test_extent_field_order_is_fixed() {
    let mut writer = ByteWriter::new();
    geometry::encode_extent(&wgs84_extent(), &mut writer);
    let bytes = writer.into_bytes();
    assert_eq!(bytes.len(), 32);
    assert_eq!(bytes[0..8], (-180.0f64).to_le_bytes());
    assert_eq!(bytes[8..16], (-90.0f64).to_le_bytes());
    assert_eq!(bytes[16..24], 180.0f64.to_le_bytes());
    assert_eq!(bytes[24..32], 90.0f64.to_le_bytes());

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(geometry::decode_extent(&mut reader).unwrap(), wgs84_extent());
}

#[test]
fn test_epsg_crs_dispatch() {
    let pe = ProjectedExtent {
        extent: wgs84_extent(),
        crs: CrsRef::Epsg(4326),
    };
    let codec = ProjectedExtentCodec;
    let bytes = codec.encode(&Record::ProjectedExtent(pe.clone())).unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, vec![Record::ProjectedExtent(pe)]);
}

#[test]
fn test_proj4_crs_dispatch() {
    let pe = ProjectedExtent {
        extent: wgs84_extent(),
        crs: CrsRef::Proj4("+proj=longlat +datum=WGS84 +no_defs".into()),
    };
    let codec = ProjectedExtentCodec;
    let bytes = codec.encode(&Record::ProjectedExtent(pe.clone())).unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, vec![Record::ProjectedExtent(pe)]);
}

#[test]
fn test_epsg_zero_decodes_as_empty_proj4() {
    // EPSG 0 is unrepresentable on the wire: zero means "use the proj4
    // field". Pinned so nobody hardens one side without the other.
    let pe = ProjectedExtent {
        extent: wgs84_extent(),
        crs: CrsRef::Epsg(0),
    };
    let codec = ProjectedExtentCodec;
    let bytes = codec.encode(&Record::ProjectedExtent(pe)).unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    let Record::ProjectedExtent(out) = &decoded[0] else {
        panic!("expected a ProjectedExtent record");
    };
    assert_eq!(out.crs, CrsRef::Proj4(String::new()));
}

#[test]
fn test_temporal_projected_extent_roundtrip() {
    let tpe = TemporalProjectedExtent {
        extent: Extent::new(0.0, 0.0, 10.0, 10.0),
        crs: CrsRef::Epsg(3857),
        instant: 1_500_000_000_000,
    };
    let codec = TemporalProjectedExtentCodec;
    let bytes = codec
        .encode(&Record::TemporalProjectedExtent(tpe.clone()))
        .unwrap();
    let decoded = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, vec![Record::TemporalProjectedExtent(tpe)]);
}

#[test]
fn test_key_roundtrips() {
    let spatial = Record::SpatialKey(SpatialKey { col: -3, row: 12 });
    let bytes = SpatialKeyCodec.encode(&spatial).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(SpatialKeyCodec.decode(&bytes).unwrap(), vec![spatial]);

    let space_time = Record::SpaceTimeKey(SpaceTimeKey {
        col: 7,
        row: -1,
        instant: -62_135_596_800_000,
    });
    let bytes = SpaceTimeKeyCodec.encode(&space_time).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(SpaceTimeKeyCodec.decode(&bytes).unwrap(), vec![space_time]);
}

#[test]
fn test_short_key_payload_is_malformed() {
    let err = SpatialKeyCodec.decode(&[1, 2, 3]).unwrap_err();
    assert!(matches!(err, GridWireError::MalformedRecord(_)));
}

//==================================================================================
// Tuples
//==================================================================================

fn sample_value() -> MultibandTile {
    MultibandTile::new(vec![band(10), band(20)]).unwrap()
}

fn sample_keys() -> Vec<TileKey> {
    vec![
        TileKey::ProjectedExtent(ProjectedExtent {
            extent: wgs84_extent(),
            crs: CrsRef::Epsg(4326),
        }),
        TileKey::TemporalProjectedExtent(TemporalProjectedExtent {
            extent: wgs84_extent(),
            crs: CrsRef::Proj4("+proj=merc".into()),
            instant: 42,
        }),
        TileKey::Spatial(SpatialKey { col: 2, row: 3 }),
        TileKey::SpaceTime(SpaceTimeKey {
            col: 2,
            row: 3,
            instant: 99,
        }),
    ]
}

#[test]
fn test_tuple_roundtrip_for_all_key_kinds() {
    for key in sample_keys() {
        let codec = TupleCodec::new(key.kind());
        let record = Record::Tuple(key, sample_value());
        let bytes = codec.encode(&record).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, vec![record]);
    }
}

#[test]
fn test_tuple_key_kind_mismatch_rejected_at_encode() {
    let codec = TupleCodec::new(KeyKind::SpaceTimeKey);
    let record = Record::Tuple(TileKey::Spatial(SpatialKey { col: 0, row: 0 }), sample_value());
    let err = codec.encode(&record).unwrap_err();
    assert!(matches!(err, GridWireError::MalformedRecord(_)));
}

//==================================================================================
// End to end: registry + framed channel
//==================================================================================

#[test]
fn test_framed_tuple_stream_end_to_end() {
    init_logging();
    let registry = CodecRegistry::new();
    let schema = "Tuple2[SpaceTimeKey,MultibandTile]";
    let codec = registry.resolve(schema).unwrap();

    let records: Vec<Record> = (0..4)
        .map(|i| {
            Record::Tuple(
                TileKey::SpaceTime(SpaceTimeKey {
                    col: i,
                    row: i * 2,
                    instant: i64::from(i) * 1_000,
                }),
                sample_value(),
            )
        })
        .collect();

    let mut channel = FramedChannel::new(Cursor::new(Vec::new()));
    for record in &records {
        channel.write_record(codec.as_ref(), record).unwrap();
    }

    let mut channel = FramedChannel::new(Cursor::new(channel.into_inner().into_inner()));
    let decoded = channel.read_to_end(codec.as_ref()).unwrap();
    assert_eq!(decoded, records);
}
