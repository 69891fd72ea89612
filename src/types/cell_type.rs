//! This module defines the canonical, type-safe representation of raster
//! cell types used throughout the gridwire codecs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridWireError, Result};

/// The canonical representation of a single raster sample's numeric type.
///
/// The discriminant values are part of the wire contract and must never be
/// reordered: peers identify cell encodings by these codes alone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellType {
    Bit,
    Byte,
    Ubyte,
    Short,
    Ushort,
    Int,
    Float,
    Double,
}

/// The four packed containers a cell value travels in on the wire.
///
/// Several logical cell types share a container: Bit, Ubyte, and Ushort all
/// widen into the unsigned 32-bit form, and Byte, Short, and Int into the
/// signed 32-bit form. Float and Double each have their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContainer {
    Uint32,
    Sint32,
    Float32,
    Float64,
}

impl CellContainer {
    /// The width in bytes of one packed value in this container.
    pub fn value_width(self) -> usize {
        match self {
            Self::Uint32 | Self::Sint32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

impl CellType {
    /// The wire discriminant for this cell type.
    pub fn code(self) -> u8 {
        match self {
            Self::Bit => 0,
            Self::Byte => 1,
            Self::Ubyte => 2,
            Self::Short => 3,
            Self::Ushort => 4,
            Self::Int => 5,
            Self::Float => 6,
            Self::Double => 7,
        }
    }

    /// The total inverse of [`CellType::code`].
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Bit),
            1 => Ok(Self::Byte),
            2 => Ok(Self::Ubyte),
            3 => Ok(Self::Short),
            4 => Ok(Self::Ushort),
            5 => Ok(Self::Int),
            6 => Ok(Self::Float),
            7 => Ok(Self::Double),
            other => Err(GridWireError::UnknownCellType(other)),
        }
    }

    /// The packed wire container matching this cell type.
    pub fn container(self) -> CellContainer {
        match self {
            Self::Bit | Self::Ubyte | Self::Ushort => CellContainer::Uint32,
            Self::Byte | Self::Short | Self::Int => CellContainer::Sint32,
            Self::Float => CellContainer::Float32,
            Self::Double => CellContainer::Float64,
        }
    }

    /// Returns `true` if the cell type is a floating-point type.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bit => "BIT",
            Self::Byte => "BYTE",
            Self::Ubyte => "UBYTE",
            Self::Short => "SHORT",
            Self::Ushort => "USHORT",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
        };
        write!(f, "{name}")
    }
}
