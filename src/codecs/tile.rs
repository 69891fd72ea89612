//! The single-band tile codec: the per-cell-type encode/decode kernels at
//! the bottom of the codec stack.
//!
//! A tile travels as `rows, cols, cell-type code, no-data presence flag,
//! [no-data value], cells`, where the no-data value and every cell are
//! written in the packed container matching the cell type. Widening on
//! encode and narrowing on decode go through `num_traits::AsPrimitive`;
//! values outside the logical type's range are undefined input and are
//! truncated, never checked.

use num_traits::AsPrimitive;

use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::{CellBuffer, CellContainer, CellType, Record, Tile};
use crate::wire::{ByteReader, ByteWriter};

/// Encodes one tile into `writer`, leaving the cursor after the last cell
/// so tiles can nest inside multiband and tuple payloads.
pub(crate) fn encode_tile(tile: &Tile, writer: &mut ByteWriter) -> Result<()> {
    tile.validate()?;

    writer.put_u32(tile.rows);
    writer.put_u32(tile.cols);
    writer.put_u8(tile.cell_type.code());

    match tile.no_data {
        Some(no_data) => {
            writer.put_u8(1);
            put_container_value(writer, tile.cell_type.container(), no_data);
        }
        None => writer.put_u8(0),
    }

    // validate() guarantees the buffer variant matches the cell type, so
    // the container is implied by the variant here.
    match &tile.cells {
        CellBuffer::U8(cells) => writer.put_pod_slice(&widen::<u8, u32>(cells)),
        CellBuffer::U16(cells) => writer.put_pod_slice(&widen::<u16, u32>(cells)),
        CellBuffer::I8(cells) => writer.put_pod_slice(&widen::<i8, i32>(cells)),
        CellBuffer::I16(cells) => writer.put_pod_slice(&widen::<i16, i32>(cells)),
        CellBuffer::I32(cells) => writer.put_pod_slice(cells),
        CellBuffer::F32(cells) => writer.put_pod_slice(cells),
        CellBuffer::F64(cells) => writer.put_pod_slice(cells),
    }

    Ok(())
}

/// Decodes one tile from `reader`, consuming exactly its own bytes.
pub(crate) fn decode_tile(reader: &mut ByteReader<'_>) -> Result<Tile> {
    let rows = reader.get_u32()?;
    let cols = reader.get_u32()?;
    let cell_type = CellType::from_code(reader.get_u8()?)?;
    let container = cell_type.container();

    let no_data = match reader.get_u8()? {
        0 => None,
        1 => Some(get_container_value(reader, container)?),
        other => {
            return Err(GridWireError::MalformedTile(format!(
                "invalid no-data presence flag {other}"
            )))
        }
    };

    let count = usize::try_from(u64::from(rows) * u64::from(cols)).map_err(|_| {
        GridWireError::MalformedTile(format!(
            "declared {rows}x{cols} cells exceed the platform usize"
        ))
    })?;
    let cell_bytes = count.checked_mul(container.value_width()).ok_or_else(|| {
        GridWireError::MalformedTile(format!("cell byte length overflow for {rows}x{cols}"))
    })?;
    if reader.remaining() < cell_bytes {
        return Err(GridWireError::MalformedTile(format!(
            "declared {rows}x{cols} = {count} cells need {cell_bytes} bytes, \
             payload holds {}",
            reader.remaining()
        )));
    }

    let cells = match cell_type {
        CellType::Bit | CellType::Ubyte => CellBuffer::U8(narrow_u32(reader, count)?),
        CellType::Ushort => CellBuffer::U16(narrow_u32(reader, count)?),
        CellType::Byte => CellBuffer::I8(narrow_i32(reader, count)?),
        CellType::Short => CellBuffer::I16(narrow_i32(reader, count)?),
        CellType::Int => CellBuffer::I32(narrow_i32(reader, count)?),
        CellType::Float => {
            let mut cells = Vec::with_capacity(count);
            for _ in 0..count {
                cells.push(reader.get_f32()?);
            }
            CellBuffer::F32(cells)
        }
        CellType::Double => {
            let mut cells = Vec::with_capacity(count);
            for _ in 0..count {
                cells.push(reader.get_f64()?);
            }
            CellBuffer::F64(cells)
        }
    };

    Tile::new(rows, cols, cell_type, no_data, cells)
}

/// The exact byte length `encode_tile` will produce for this tile.
pub(crate) fn tile_encoded_len(tile: &Tile) -> usize {
    let width = tile.cell_type.container().value_width();
    4 + 4 + 1 + 1 + tile.no_data.map_or(0, |_| width) + tile.cells.len() * width
}

fn widen<T, U>(cells: &[T]) -> Vec<U>
where
    T: AsPrimitive<U>,
    U: Copy + 'static,
{
    cells.iter().map(|value| value.as_()).collect()
}

fn narrow_u32<T>(reader: &mut ByteReader<'_>, count: usize) -> Result<Vec<T>>
where
    u32: AsPrimitive<T>,
    T: Copy + 'static,
{
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(reader.get_u32()?.as_());
    }
    Ok(values)
}

fn narrow_i32<T>(reader: &mut ByteReader<'_>, count: usize) -> Result<Vec<T>>
where
    i32: AsPrimitive<T>,
    T: Copy + 'static,
{
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(reader.get_i32()?.as_());
    }
    Ok(values)
}

fn put_container_value(writer: &mut ByteWriter, container: CellContainer, value: f64) {
    match container {
        CellContainer::Uint32 => writer.put_u32(value as u32),
        CellContainer::Sint32 => writer.put_i32(value as i32),
        CellContainer::Float32 => writer.put_f32(value as f32),
        CellContainer::Float64 => writer.put_f64(value),
    }
}

fn get_container_value(reader: &mut ByteReader<'_>, container: CellContainer) -> Result<f64> {
    Ok(match container {
        CellContainer::Uint32 => f64::from(reader.get_u32()?),
        CellContainer::Sint32 => f64::from(reader.get_i32()?),
        CellContainer::Float32 => f64::from(reader.get_f32()?),
        CellContainer::Float64 => reader.get_f64()?,
    })
}

/// The registered codec for the standalone `"Tile"` schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct TileCodec;

impl RecordCodec for TileCodec {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let Record::Tile(tile) = record else {
            return Err(GridWireError::MalformedRecord(
                "Tile codec was handed a non-Tile record".into(),
            ));
        };
        let mut writer = ByteWriter::with_capacity(tile_encoded_len(tile));
        encode_tile(tile, &mut writer)?;
        Ok(writer.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let mut reader = ByteReader::new(bytes);
        let tile = decode_tile(&mut reader)?;
        reader.expect_end("Tile")?;
        Ok(vec![Record::Tile(tile)])
    }
}
