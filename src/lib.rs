//! This file is the root of the `gridwire` Rust crate.
//!
//! gridwire moves typed, multi-band raster tiles and their geospatial keys
//! across a host/backend boundary as a compact binary wire format. The
//! crate owns the codecs (per-cell-type tile encoding, multiband
//! composition, extent/CRS/key records, key+tile tuples), the
//! schema-name-keyed codec registry, and the length-prefixed framed
//! channel. Raster processing itself, file formats, and the transport
//! carrying the framed bytes all live elsewhere.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod channel;
pub mod codecs;
pub mod config;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;
pub mod wire;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use channel::{open_channel, FramedChannel};
pub use config::WireConfig;
pub use error::{GridWireError, Result};
pub use registry::{CodecRegistry, SchemaKind};
pub use traits::RecordCodec;
pub use types::{
    CellBuffer, CellContainer, CellType, CrsRef, Extent, KeyKind, MultibandTile,
    ProjectedExtent, Record, SpaceTimeKey, SpatialKey, TemporalProjectedExtent, Tile, TileKey,
};
