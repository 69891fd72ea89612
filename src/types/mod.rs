//! The immutable value types carried by the gridwire codecs.

pub mod cell_type;
pub mod geo;
pub mod key;
pub mod raster;
pub mod record;

pub use cell_type::{CellContainer, CellType};
pub use geo::{CrsRef, Extent, ProjectedExtent, TemporalProjectedExtent};
pub use key::{SpaceTimeKey, SpatialKey};
pub use raster::{CellBuffer, MultibandTile, Tile};
pub use record::{KeyKind, Record, TileKey};
