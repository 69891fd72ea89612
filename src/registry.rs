//! Schema-name-keyed codec dispatch.
//!
//! The registry is an explicit, constructed object passed into the call
//! sites that need it — never a module-level singleton — so tests can build
//! isolated registries and the populate-once/read-many discipline falls out
//! of the borrow rules: overrides go in through `&mut self`, and once the
//! registry is shared every lookup is `&self` and lock-free.

use std::collections::HashMap;
use std::sync::Arc;

use log::trace;

use crate::codecs::{
    MultibandCodec, ProjectedExtentCodec, SpaceTimeKeyCodec, SpatialKeyCodec,
    TemporalProjectedExtentCodec, TileCodec, TupleCodec,
};
use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::{KeyKind, Record};

/// The closed set of built-in schema shapes a name can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Tile,
    MultibandTile,
    ProjectedExtent,
    TemporalProjectedExtent,
    SpatialKey,
    SpaceTimeKey,
    Tuple(KeyKind),
}

impl SchemaKind {
    /// Parses a schema name. Tuple schemas are spelled
    /// `Tuple2[<KeyType>,MultibandTile]`; the value side is always a
    /// multiband tile, so any other right-hand type is a miss.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Tile" => return Some(Self::Tile),
            "MultibandTile" => return Some(Self::MultibandTile),
            "ProjectedExtent" => return Some(Self::ProjectedExtent),
            "TemporalProjectedExtent" => return Some(Self::TemporalProjectedExtent),
            "SpatialKey" => return Some(Self::SpatialKey),
            "SpaceTimeKey" => return Some(Self::SpaceTimeKey),
            _ => {}
        }
        let inner = name.strip_prefix("Tuple2[")?.strip_suffix(']')?;
        let (key_name, value_name) = inner.split_once(',')?;
        if value_name.trim() != "MultibandTile" {
            return None;
        }
        KeyKind::from_name(key_name.trim()).map(Self::Tuple)
    }

    /// The canonical name this kind resolves from.
    pub fn name(self) -> String {
        match self {
            Self::Tile => "Tile".into(),
            Self::MultibandTile => "MultibandTile".into(),
            Self::ProjectedExtent => "ProjectedExtent".into(),
            Self::TemporalProjectedExtent => "TemporalProjectedExtent".into(),
            Self::SpatialKey => "SpatialKey".into(),
            Self::SpaceTimeKey => "SpaceTimeKey".into(),
            Self::Tuple(kind) => format!("Tuple2[{},MultibandTile]", kind.name()),
        }
    }

    fn codec(self) -> Arc<dyn RecordCodec> {
        match self {
            Self::Tile => Arc::new(TileCodec),
            Self::MultibandTile => Arc::new(MultibandCodec),
            Self::ProjectedExtent => Arc::new(ProjectedExtentCodec),
            Self::TemporalProjectedExtent => Arc::new(TemporalProjectedExtentCodec),
            Self::SpatialKey => Arc::new(SpatialKeyCodec),
            Self::SpaceTimeKey => Arc::new(SpaceTimeKeyCodec),
            Self::Tuple(kind) => Arc::new(TupleCodec::new(kind)),
        }
    }
}

/// Resolves schema names to codec pairs, overrides first, then the
/// built-in set.
#[derive(Default)]
pub struct CodecRegistry {
    overrides: HashMap<String, Arc<dyn RecordCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitutes a custom codec for a named type. An override shadows a
    /// built-in of the same name. Registration happens at startup, before
    /// the registry is shared; afterwards the map is read-only.
    pub fn register_override(
        &mut self,
        name: impl Into<String>,
        codec: Arc<dyn RecordCodec>,
    ) -> &mut Self {
        let name = name.into();
        trace!("registering override codec for schema '{name}'");
        self.overrides.insert(name, codec);
        self
    }

    /// Resolves the codec for `schema_name`, failing with
    /// `UnknownSchemaName` when neither an override nor a built-in matches.
    pub fn resolve(&self, schema_name: &str) -> Result<Arc<dyn RecordCodec>> {
        if let Some(codec) = self.overrides.get(schema_name) {
            trace!("schema '{schema_name}' resolved to an override codec");
            return Ok(Arc::clone(codec));
        }
        match SchemaKind::from_name(schema_name) {
            Some(kind) => {
                trace!("schema '{schema_name}' resolved to built-in {kind:?}");
                Ok(kind.codec())
            }
            None => Err(GridWireError::UnknownSchemaName(schema_name.to_string())),
        }
    }

    /// Encodes one record under the named schema.
    pub fn encode(&self, record: &Record, schema_name: &str) -> Result<Vec<u8>> {
        self.resolve(schema_name)?.encode(record)
    }

    /// Decodes one frame payload under the named schema into the records it
    /// holds.
    pub fn decode(&self, bytes: &[u8], schema_name: &str) -> Result<Vec<Record>> {
        self.resolve(schema_name)?.decode(bytes)
    }
}
