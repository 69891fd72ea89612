//! Immutable raster value types: single-band tiles and multiband stacks.
//!
//! These are pure values. Encode and decode never mutate a tile in place;
//! every decode constructs a fresh one.

use crate::error::{GridWireError, Result};
use crate::types::cell_type::CellType;

/// The in-memory cell storage for one band, flat in row-major order.
///
/// One variant per storage width. `Bit` shares the `U8` variant with
/// `Ubyte`, holding 0/1 samples.
#[derive(Debug, Clone, PartialEq)]
pub enum CellBuffer {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl CellBuffer {
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this buffer variant is the storage form of
    /// `cell_type`.
    pub fn matches(&self, cell_type: CellType) -> bool {
        matches!(
            (cell_type, self),
            (CellType::Bit, Self::U8(_))
                | (CellType::Ubyte, Self::U8(_))
                | (CellType::Byte, Self::I8(_))
                | (CellType::Short, Self::I16(_))
                | (CellType::Ushort, Self::U16(_))
                | (CellType::Int, Self::I32(_))
                | (CellType::Float, Self::F32(_))
                | (CellType::Double, Self::F64(_))
        )
    }
}

/// A single-band raster: dimensions, cell type, optional no-data sentinel,
/// and the flat row-major cell buffer.
///
/// The no-data sentinel is held as `f64`, which represents every packed
/// container value exactly (u32, i32, f32, and f64 all embed losslessly).
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub rows: u32,
    pub cols: u32,
    pub cell_type: CellType,
    pub no_data: Option<f64>,
    pub cells: CellBuffer,
}

impl Tile {
    /// Constructs a tile, validating the dimension and storage invariants.
    pub fn new(
        rows: u32,
        cols: u32,
        cell_type: CellType,
        no_data: Option<f64>,
        cells: CellBuffer,
    ) -> Result<Self> {
        let tile = Self {
            rows,
            cols,
            cell_type,
            no_data,
            cells,
        };
        tile.validate()?;
        Ok(tile)
    }

    /// Checks `cells.len() == rows * cols` and that the buffer variant is
    /// the storage form of `cell_type`.
    pub fn validate(&self) -> Result<()> {
        let expected = self.cell_count()?;
        if self.cells.len() != expected {
            return Err(GridWireError::MalformedTile(format!(
                "declared {}x{} = {} cells, buffer holds {}",
                self.rows,
                self.cols,
                expected,
                self.cells.len()
            )));
        }
        if !self.cells.matches(self.cell_type) {
            return Err(GridWireError::MalformedTile(format!(
                "cell buffer does not match cell type {}",
                self.cell_type
            )));
        }
        Ok(())
    }

    /// `rows * cols` with overflow checked against the platform usize.
    pub fn cell_count(&self) -> Result<usize> {
        let count = u64::from(self.rows) * u64::from(self.cols);
        usize::try_from(count).map_err(|_| {
            GridWireError::MalformedTile(format!(
                "cell count {count} exceeds the platform usize"
            ))
        })
    }
}

/// An ordered stack of same-shaped, same-typed tiles. Band order is
/// significant and preserved through encode/decode.
#[derive(Debug, Clone, PartialEq)]
pub struct MultibandTile {
    bands: Vec<Tile>,
}

impl MultibandTile {
    /// Constructs a multiband tile, enforcing that every band agrees with
    /// band 0 in shape, cell type, and no-data.
    pub fn new(bands: Vec<Tile>) -> Result<Self> {
        validate_bands(&bands)?;
        Ok(Self { bands })
    }

    /// Wraps a lone band as a 1-band multiband tile.
    pub fn from_band(band: Tile) -> Self {
        Self { bands: vec![band] }
    }

    /// Assembles a stack straight off the wire. Only emptiness is rejected;
    /// band agreement is the writing side's contract, and payloads from
    /// permissive older writers must still load.
    pub(crate) fn from_decoded_bands(bands: Vec<Tile>) -> Result<Self> {
        if bands.is_empty() {
            return Err(GridWireError::MalformedRecord(
                "multiband payload holds no bands".into(),
            ));
        }
        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[Tile] {
        &self.bands
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn into_bands(self) -> Vec<Tile> {
        self.bands
    }

    /// The shared cell type, read from band 0.
    pub fn cell_type(&self) -> CellType {
        self.bands[0].cell_type
    }

    /// The shared no-data sentinel, read from band 0.
    pub fn no_data(&self) -> Option<f64> {
        self.bands[0].no_data
    }
}

/// Rejects an empty stack and any band disagreeing with band 0.
pub(crate) fn validate_bands(bands: &[Tile]) -> Result<()> {
    let first = bands.first().ok_or_else(|| {
        GridWireError::InconsistentMultiband("multiband tile has no bands".into())
    })?;
    for (index, band) in bands.iter().enumerate().skip(1) {
        if band.cell_type != first.cell_type {
            return Err(GridWireError::InconsistentMultiband(format!(
                "band {index} has cell type {}, band 0 has {}",
                band.cell_type, first.cell_type
            )));
        }
        if band.no_data != first.no_data {
            return Err(GridWireError::InconsistentMultiband(format!(
                "band {index} no-data {:?} disagrees with band 0 {:?}",
                band.no_data, first.no_data
            )));
        }
        if band.rows != first.rows || band.cols != first.cols {
            return Err(GridWireError::InconsistentMultiband(format!(
                "band {index} is {}x{}, band 0 is {}x{}",
                band.rows, band.cols, first.rows, first.cols
            )));
        }
    }
    Ok(())
}
