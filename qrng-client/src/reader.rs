//! Streaming reads of arbitrary length
//!
//! The service caps every request at `max_length` values. [`QrngClient::fill`]
//! splits larger buffers into consecutive chunks, each fetched with one
//! request and copied to its offset, and stops at the first failing chunk.
//!
//! # Guarantees
//!
//! - `fill` on an empty buffer makes no request
//! - a buffer of at most `max_length` bytes costs exactly one request
//! - a larger buffer costs `ceil(len / max_length)` requests, all but the
//!   last asking for `max_length` bytes
//! - on failure, `filled` counts only the chunks that completed before the
//!   failing one and nothing after that offset is written

use crate::client::QrngClient;
use crate::fetcher::Fetcher;
use crate::{Error, Result};
use std::io::{self, Read};
use tracing::{debug, warn};

/// Outcome of a fill that may stop part way
#[derive(Debug)]
#[must_use]
pub struct ReadOutcome {
    /// Bytes written at the start of the buffer
    pub filled: usize,
    /// Failure that ended the fill early
    pub error: Option<Error>,
}

impl ReadOutcome {
    fn complete(filled: usize) -> Self {
        Self { filled, error: None }
    }

    fn partial(filled: usize, error: Error) -> Self {
        Self {
            filled,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Byte count on success, the error otherwise
    pub fn into_result(self) -> Result<usize> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.filled),
        }
    }
}

impl<F: Fetcher> QrngClient<F> {
    /// Fill `buf` with random bytes, chunking requests as needed.
    ///
    /// A buffer no larger than `max_length` is a single chunk.
    pub fn fill(&self, buf: &mut [u8]) -> ReadOutcome {
        let requested = buf.len();
        let mut filled = 0;

        for chunk in buf.chunks_mut(self.max_length().max(1)) {
            match self.uint8(chunk.len()) {
                Ok(bytes) => {
                    chunk.copy_from_slice(&bytes);
                    filled += bytes.len();
                }
                Err(e) => {
                    warn!("Fill stopped after {} of {} bytes: {}", filled, requested, e);
                    return ReadOutcome::partial(filled, e);
                }
            }
        }

        debug!("Filled {} bytes", filled);
        ReadOutcome::complete(filled)
    }

    /// Fill all of `buf` or fail.
    ///
    /// On error the buffer contents are unspecified. Failures after some bytes
    /// were written are reported as [`Error::PartialRead`].
    pub fn fill_exact(&self, buf: &mut [u8]) -> Result<()> {
        let requested = buf.len();
        let mut filled = 0;

        while filled < requested {
            let outcome = self.fill(&mut buf[filled..]);
            filled += outcome.filled;

            match outcome.error {
                Some(e) if filled == 0 => return Err(e),
                Some(e) => {
                    return Err(Error::PartialRead {
                        filled,
                        requested,
                        source: Box::new(e),
                    })
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// A read that stops part way returns the bytes it got and drops the failure.
/// Each call starts fresh, so a later read only fails if its own requests do.
/// Use [`QrngClient::fill`] to see both the count and the error.
impl<F: Fetcher> Read for &QrngClient<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let outcome = self.fill(buf);
        match outcome.error {
            None => Ok(outcome.filled),
            Some(e) if outcome.filled > 0 => {
                warn!("Returning {} bytes, dropping error: {}", outcome.filled, e);
                Ok(outcome.filled)
            }
            Some(e) => Err(io::Error::other(e)),
        }
    }
}

impl<F: Fetcher> Read for QrngClient<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&*self).read(buf)
    }
}

impl<F: Fetcher> rand::RngCore for QrngClient<F> {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    /// Panics if the service fails; use `try_fill_bytes` to handle errors.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.fill_exact(dest) {
            panic!("quantum random number service failed: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_exact(dest).map_err(rand::Error::new)
    }
}
