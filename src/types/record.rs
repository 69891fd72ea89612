//! The tagged record unions flowing through the registry and channel.
//!
//! `TileKey`/`KeyKind` replace the per-field runtime type checks the host
//! side historically used: the key kind is resolved once at the schema
//! level and carried alongside the record, never re-derived per field.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::types::geo::{ProjectedExtent, TemporalProjectedExtent};
use crate::types::key::{SpaceTimeKey, SpatialKey};
use crate::types::raster::{MultibandTile, Tile};

/// The key slot of a wire tuple: one of the four key/geometry shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TileKey {
    ProjectedExtent(ProjectedExtent),
    TemporalProjectedExtent(TemporalProjectedExtent),
    Spatial(SpatialKey),
    SpaceTime(SpaceTimeKey),
}

impl TileKey {
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::ProjectedExtent(_) => KeyKind::ProjectedExtent,
            Self::TemporalProjectedExtent(_) => KeyKind::TemporalProjectedExtent,
            Self::Spatial(_) => KeyKind::SpatialKey,
            Self::SpaceTime(_) => KeyKind::SpaceTimeKey,
        }
    }
}

/// The fieldless discriminant of [`TileKey`], supplied out-of-band by the
/// schema name so decoders know which key shape occupies the tuple's key
/// slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    ProjectedExtent,
    TemporalProjectedExtent,
    SpatialKey,
    SpaceTimeKey,
}

impl KeyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::ProjectedExtent => "ProjectedExtent",
            Self::TemporalProjectedExtent => "TemporalProjectedExtent",
            Self::SpatialKey => "SpatialKey",
            Self::SpaceTimeKey => "SpaceTimeKey",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ProjectedExtent" => Some(Self::ProjectedExtent),
            "TemporalProjectedExtent" => Some(Self::TemporalProjectedExtent),
            "SpatialKey" => Some(Self::SpatialKey),
            "SpaceTimeKey" => Some(Self::SpaceTimeKey),
            _ => None,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One logical record on the wire: every built-in schema shape, plus an
/// opaque extension variant for override codecs carrying record shapes
/// outside the built-in set.
#[derive(Clone)]
pub enum Record {
    Tile(Tile),
    MultibandTile(MultibandTile),
    ProjectedExtent(ProjectedExtent),
    TemporalProjectedExtent(TemporalProjectedExtent),
    SpatialKey(SpatialKey),
    SpaceTimeKey(SpaceTimeKey),
    /// A (key, multiband tile) pair. The value side of a tuple is always a
    /// multiband tile; single-band values travel as 1-band stacks.
    Tuple(TileKey, MultibandTile),
    /// An override codec's record. Compared by identity, not contents.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tile(tile) => f.debug_tuple("Tile").field(tile).finish(),
            Self::MultibandTile(mb) => f.debug_tuple("MultibandTile").field(mb).finish(),
            Self::ProjectedExtent(pe) => f.debug_tuple("ProjectedExtent").field(pe).finish(),
            Self::TemporalProjectedExtent(tpe) => {
                f.debug_tuple("TemporalProjectedExtent").field(tpe).finish()
            }
            Self::SpatialKey(key) => f.debug_tuple("SpatialKey").field(key).finish(),
            Self::SpaceTimeKey(key) => f.debug_tuple("SpaceTimeKey").field(key).finish(),
            Self::Tuple(key, mb) => f.debug_tuple("Tuple").field(key).field(mb).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tile(a), Self::Tile(b)) => a == b,
            (Self::MultibandTile(a), Self::MultibandTile(b)) => a == b,
            (Self::ProjectedExtent(a), Self::ProjectedExtent(b)) => a == b,
            (Self::TemporalProjectedExtent(a), Self::TemporalProjectedExtent(b)) => a == b,
            (Self::SpatialKey(a), Self::SpatialKey(b)) => a == b,
            (Self::SpaceTimeKey(a), Self::SpaceTimeKey(b)) => a == b,
            (Self::Tuple(ka, va), Self::Tuple(kb, vb)) => ka == kb && va == vb,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
