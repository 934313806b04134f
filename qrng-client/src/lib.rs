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

//! QRNG Client Library
//!
//! Blocking client for the ANU quantum random numbers JSON API.
//!
//! # Architecture
//!
//! The library is organized into modules representing core concerns:
//! - `validate`: Range checks applied before any request
//! - `fetcher`: One-request-per-call HTTP access, behind the `Fetcher` trait
//! - `client`: Typed accessors (`uint8`, `uint16`, `hex16`)
//! - `reader`: Arbitrary-length byte reads on top of bounded requests
//! - `config`: Configuration from `QRNG_*` environment variables
//! - `error`: Unified error types
//!
//! # Example
//!
//! ```no_run
//! use qrng_client::QrngClient;
//!
//! let client = QrngClient::anu()?;
//! let words = client.uint16(8)?;
//!
//! let mut key = [0u8; 4096];
//! client.fill_exact(&mut key)?;
//! # Ok::<(), qrng_client::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod reader;
pub mod validate;

pub use client::{decode_hex_block, QrngClient};
pub use config::ClientConfig;
pub use error::{Error, Param, Result};
pub use fetcher::{Fetcher, FetcherConfig, HttpFetcher, ValueKind};
pub use reader::ReadOutcome;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest number of values the service returns in one request
pub const MAX_LENGTH: usize = 1024;
