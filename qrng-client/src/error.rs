// SPDX-License-Identifier: MIT
//
// QRNG Client: Quantum Random Numbers over HTTP
// Copyright (c) 2025 Valer Bocan, PhD, CSSLP
// Email: valer.bocan@upt.ro
//
// Department of Computer and Information Technology
// Politehnica University of Timisoara
//
// https://github.com/vbocan/qrng-data-diode

//! Error types for the QRNG client
//!
//! Provides a unified error taxonomy using `thiserror` for ergonomic error handling.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Request parameter checked by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Length,
    BlockSize,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Length => f.write_str("length"),
            Param::BlockSize => f.write_str("block size"),
        }
    }
}

/// Core error type for QRNG client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request parameter below the minimum of 1
    #[error("{param} is too small: {value}")]
    TooSmall { param: Param, value: usize },

    /// Request parameter above the service maximum
    #[error("{param} is too large: {value} (maximum {max})")]
    TooLarge { param: Param, value: usize, max: usize },

    /// Service could not be reached or the body could not be read
    #[error("cannot load random numbers: {0}")]
    Transport(#[source] reqwest::Error),

    /// Service answered with a non-success HTTP status
    #[error("cannot load random numbers: HTTP {status}")]
    Status { status: u16 },

    /// Response body did not match the expected schema
    #[error("cannot parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response carried `"success": false`
    #[error("cannot parse response: service reported failure")]
    ServiceRejected,

    /// Response held a different number of values than requested
    #[error("cannot parse response: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Hex block was not valid hexadecimal
    #[error("cannot parse response: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A complete fill was required but the stream failed part way
    #[error("partial read: {filled} of {requested} bytes filled")]
    PartialRead {
        filled: usize,
        requested: usize,
        #[source]
        source: Box<Error>,
    },

    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Rejected before any network access
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::TooSmall { .. } | Error::TooLarge { .. })
    }

    /// Failure reaching or reading from the service
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Status { .. })
    }

    /// Response arrived but was not what was asked for
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::Decode(_) | Error::ServiceRejected | Error::LengthMismatch { .. } | Error::Hex(_)
        )
    }
}
