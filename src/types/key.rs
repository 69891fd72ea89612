//! Grid-position keys: the 2D spatial key and its spatiotemporal variant.

use serde::{Deserialize, Serialize};

/// A 2D grid position (column, row).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpatialKey {
    pub col: i32,
    pub row: i32,
}

/// A 3D grid position (column, row, time instant).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceTimeKey {
    pub col: i32,
    pub row: i32,
    pub instant: i64,
}
