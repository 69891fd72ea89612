//! Length-prefixed framing over a synchronous byte stream.
//!
//! A frame is a 4-byte **big-endian** length followed by that many payload
//! bytes. Big-endian is the host transport's historical convention (the
//! Java side writes frame lengths with `DataOutputStream`); every field
//! *inside* a payload is little-endian per `wire`. Both choices are fixed.
//!
//! The channel is single-consumer and blocking. It defines record
//! boundaries only; connection-level timeouts and cancellation belong to
//! the external transport.

use std::io::{ErrorKind, Read, Write};

use log::trace;

use crate::config::WireConfig;
use crate::error::{GridWireError, Result};
use crate::traits::RecordCodec;
use crate::types::Record;

/// A framed view over a byte stream.
#[derive(Debug)]
pub struct FramedChannel<S> {
    stream: S,
    config: WireConfig,
}

/// Opens a channel over `stream` with the default configuration.
pub fn open_channel<S>(stream: S) -> FramedChannel<S> {
    FramedChannel::new(stream)
}

impl<S> FramedChannel<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, WireConfig::default())
    }

    pub fn with_config(stream: S, config: WireConfig) -> Self {
        Self { stream, config }
    }

    /// Tears down the channel, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Write> FramedChannel<S> {
    /// Writes one payload as a self-delimited frame.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        if payload.len() > u32::MAX as usize {
            return Err(GridWireError::OversizedFrame(
                payload.len(),
                u32::MAX as usize,
            ));
        }
        trace!("writing frame of {} bytes", payload.len());
        self.stream.write_all(&(payload.len() as u32).to_be_bytes())?;
        self.stream.write_all(payload)?;
        Ok(())
    }

    /// Encodes `record` with `codec` and writes it as one frame.
    pub fn write_record(&mut self, codec: &dyn RecordCodec, record: &Record) -> Result<()> {
        let payload = codec.encode(record)?;
        self.write_frame(&payload)
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.stream.flush()?)
    }
}

impl<S: Read> FramedChannel<S> {
    /// Reads the next frame's payload.
    ///
    /// Returns `Ok(None)` on a clean end of stream at a frame boundary.
    /// A stream ending anywhere inside a frame is a `TruncatedFrame`, and a
    /// length prefix beyond `WireConfig::max_frame_len` is rejected before
    /// any payload allocation.
    pub fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut prefix = [0u8; 4];
        let mut filled = 0;
        while filled < prefix.len() {
            match self.stream.read(&mut prefix[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(GridWireError::TruncatedFrame(format!(
                        "stream ended after {filled} of 4 length-prefix bytes"
                    )))
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }

        let len = u32::from_be_bytes(prefix) as usize;
        if len > self.config.max_frame_len {
            return Err(GridWireError::OversizedFrame(len, self.config.max_frame_len));
        }

        let mut payload = vec![0u8; len];
        self.stream.read_exact(&mut payload).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                GridWireError::TruncatedFrame(format!(
                    "stream ended inside a {len}-byte frame payload"
                ))
            } else {
                GridWireError::Io(err)
            }
        })?;
        trace!("read frame of {len} bytes");
        Ok(Some(payload))
    }

    /// Reads the next frame and decodes it with `codec`.
    ///
    /// One decode call per frame: the batch holds exactly the records that
    /// call produced (typically one, but the channel does not assume
    /// arity 1).
    pub fn read_batch(&mut self, codec: &dyn RecordCodec) -> Result<Option<Vec<Record>>> {
        match self.read_frame()? {
            Some(payload) => Ok(Some(codec.decode(&payload)?)),
            None => Ok(None),
        }
    }

    /// Drains the channel, decoding every remaining frame in order.
    pub fn read_to_end(&mut self, codec: &dyn RecordCodec) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(batch) = self.read_batch(codec)? {
            records.extend(batch);
        }
        Ok(records)
    }
}
