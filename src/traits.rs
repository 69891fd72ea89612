//! This module defines the shared codec trait the registry and channel
//! dispatch through.

use crate::error::Result;
use crate::types::Record;

/// A symmetric encode/decode pair for one schema's records.
///
/// Implementations must be pure: no shared mutable state, so distinct
/// records can be encoded and decoded on any number of worker threads with
/// zero coordination.
///
/// `decode` takes one frame's payload and returns the logical records it
/// held. Every built-in codec produces exactly one record per frame, but
/// the channel never assumes arity 1: the writing side is free to batch
/// several records into a frame, and a custom codec may unpack them.
pub trait RecordCodec: Send + Sync + std::fmt::Debug {
    /// Encodes one record into a frame payload.
    fn encode(&self, record: &Record) -> Result<Vec<u8>>;

    /// Decodes one frame payload into the records it contains.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>>;
}
