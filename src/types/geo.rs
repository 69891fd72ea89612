//! Geospatial value types carried on the key side of the wire: extents,
//! coordinate reference identifiers, and projected extents.

use serde::{Deserialize, Serialize};

/// A rectangular bounding box. The codec does not validate `xmin <= xmax`
/// or `ymin <= ymax`; that ordering is the caller's responsibility.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

/// A coordinate reference identifier: either a registry code or a raw
/// projection string.
///
/// The wire form collapses both into an `(epsg, proj4)` pair where a
/// nonzero epsg wins on decode. `Epsg(0)` is therefore unrepresentable and
/// comes back as `Proj4("")`, matching the peer systems' historical
/// behavior.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum CrsRef {
    Epsg(i32),
    Proj4(String),
}

/// An extent paired with the CRS it is expressed in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectedExtent {
    pub extent: Extent,
    pub crs: CrsRef,
}

/// A projected extent stamped with an integer time instant
/// (milliseconds since the epoch, by the peers' convention).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TemporalProjectedExtent {
    pub extent: Extent,
    pub crs: CrsRef,
    pub instant: i64,
}
