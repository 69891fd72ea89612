// In: src/error.rs

//! This module defines the single, unified error type for the entire gridwire library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridWireError {
    // =========================================================================
    // === Codec Errors (Specific to the wire format)
    // =========================================================================
    /// A cell-type discriminant outside the eight known values.
    #[error("Unknown cell type discriminant: {0}")]
    UnknownCellType(u8),

    /// A tile payload whose declared dimensions disagree with its stored cells,
    /// or whose cell buffer does not match its cell type.
    #[error("Malformed tile: {0}")]
    MalformedTile(String),

    /// Bands of a multiband tile disagree in shape, cell type, or no-data.
    #[error("Inconsistent multiband tile: {0}")]
    InconsistentMultiband(String),

    /// A key, extent, or tuple payload with the wrong shape: short buffer,
    /// trailing bytes, or an invalid proj4 string.
    #[error("Malformed record payload: {0}")]
    MalformedRecord(String),

    // =========================================================================
    // === Dispatch & Framing Errors
    // =========================================================================
    /// Neither a built-in nor an override codec exists for the requested name.
    #[error("No codec registered for schema name '{0}'")]
    UnknownSchemaName(String),

    /// The byte stream ended inside a length-prefixed frame.
    #[error("Truncated frame: {0}")]
    TruncatedFrame(String),

    /// A frame length prefix exceeding the configured maximum.
    #[error("Frame of {0} bytes exceeds configured maximum of {1} bytes")]
    OversizedFrame(usize, usize),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during config handover.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, GridWireError>;
