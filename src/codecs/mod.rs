// In: src/codecs/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Codec Layer
// ====================================================================================
//
// Leaves first:
//
//   1. [tile]      -> one band: header fields + cells in one of the four
//                     packed containers selected by cell type
//   2. [multiband] -> ordered concatenation of tile payloads, band count
//                     implicit in the enclosing payload length
//   3. [geometry]  -> extents, the (epsg, proj4) CRS pair, projected and
//                     temporal-projected extents
//   4. [key]       -> the 2D and 3D grid-position keys
//   5. [tuple]     -> key payload (kind fixed per codec instance) followed
//                     by the multiband value
//
// Every codec is a pure function over immutable inputs; the `*Codec` unit
// structs adapt them to the `RecordCodec` trait the registry dispatches
// through.
// ====================================================================================

pub mod geometry;
pub mod key;
pub mod multiband;
pub mod tile;
pub mod tuple;

pub use geometry::{ProjectedExtentCodec, TemporalProjectedExtentCodec};
pub use key::{SpaceTimeKeyCodec, SpatialKeyCodec};
pub use multiband::MultibandCodec;
pub use tile::TileCodec;
pub use tuple::TupleCodec;

#[cfg(test)]
mod codec_tests;
