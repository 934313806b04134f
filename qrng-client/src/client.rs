//! Typed accessors for the QRNG service
//!
//! [`QrngClient`] replaces a process-wide random source: construct one and pass
//! it (or a reference to it) to whatever needs random values. It holds no
//! mutable state, so a shared `&QrngClient` is safe to use from many threads
//! whenever its fetcher is.

use crate::config::ClientConfig;
use crate::fetcher::{Fetcher, FetcherConfig, HttpFetcher, ANU_API_URL};
use crate::{validate, Error, Result};
use url::Url;

/// Client for the quantum random numbers service
pub struct QrngClient<F = HttpFetcher> {
    fetcher: F,
    max_length: usize,
}

impl QrngClient<HttpFetcher> {
    /// Client for the public ANU endpoint with default settings
    pub fn anu() -> Result<Self> {
        let url = Url::parse(ANU_API_URL)
            .map_err(|e| Error::Config(format!("Invalid base_url '{}': {}", ANU_API_URL, e)))?;
        let fetcher = HttpFetcher::new(FetcherConfig::new(url))?;
        Ok(Self::with_fetcher(fetcher, crate::MAX_LENGTH))
    }

    /// Client built from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config.fetcher_config()?)?;
        Ok(Self::with_fetcher(fetcher, config.max_length))
    }
}

impl<F: Fetcher> QrngClient<F> {
    /// Client over an arbitrary fetcher
    pub fn with_fetcher(fetcher: F, max_length: usize) -> Self {
        Self { fetcher, max_length }
    }

    /// Largest number of values a single request may ask for
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Underlying fetcher, e.g. to inspect a test double after use
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Byte-sized random numbers
    pub fn uint8(&self, length: usize) -> Result<Vec<u8>> {
        validate::length(length, self.max_length)?;
        let values = self.fetcher.fetch_uint8(length)?;
        expect_len(values, length)
    }

    /// Word-sized random numbers
    pub fn uint16(&self, length: usize) -> Result<Vec<u16>> {
        validate::length(length, self.max_length)?;
        let values = self.fetcher.fetch_uint16(length)?;
        expect_len(values, length)
    }

    /// Hexadecimal random blocks of `block_size` bytes each
    pub fn hex16(&self, length: usize, block_size: usize) -> Result<Vec<String>> {
        validate::length(length, self.max_length)?;
        validate::block_size(block_size, self.max_length)?;
        let values = self.fetcher.fetch_hex16(length, block_size)?;
        expect_len(values, length)
    }
}

fn expect_len<T>(values: Vec<T>, expected: usize) -> Result<Vec<T>> {
    if values.len() != expected {
        tracing::warn!("Received {} values, expected {}", values.len(), expected);
        return Err(Error::LengthMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// Decode one hex block into raw bytes
pub fn decode_hex_block(block: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(block)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Param;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns `length + extra` values and counts calls
    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
        extra: isize,
    }

    impl CountingFetcher {
        fn sized(&self, length: usize) -> usize {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (length as isize + self.extra).max(0) as usize
        }
    }

    impl Fetcher for CountingFetcher {
        fn fetch_uint8(&self, length: usize) -> Result<Vec<u8>> {
            Ok(vec![0xAB; self.sized(length)])
        }

        fn fetch_uint16(&self, length: usize) -> Result<Vec<u16>> {
            Ok(vec![0xABCD; self.sized(length)])
        }

        fn fetch_hex16(&self, length: usize, block_size: usize) -> Result<Vec<String>> {
            Ok(vec!["ab".repeat(block_size); self.sized(length)])
        }
    }

    fn client(extra: isize) -> QrngClient<CountingFetcher> {
        QrngClient::with_fetcher(CountingFetcher { extra, ..Default::default() }, 1024)
    }

    fn calls(client: &QrngClient<CountingFetcher>) -> usize {
        client.fetcher().calls.load(Ordering::SeqCst)
    }

    #[test]
    fn test_uint8_exact_length() {
        let client = client(0);
        for length in [1, 2, 511, 1024] {
            assert_eq!(client.uint8(length).unwrap().len(), length);
        }
        assert_eq!(calls(&client), 4);
    }

    #[test]
    fn test_uint16_exact_length() {
        let client = client(0);
        assert_eq!(client.uint16(1).unwrap(), vec![0xABCD]);
        assert_eq!(client.uint16(1024).unwrap().len(), 1024);
    }

    #[test]
    fn test_length_out_of_range_skips_fetcher() {
        let client = client(0);

        assert!(matches!(client.uint8(0), Err(Error::TooSmall { param: Param::Length, .. })));
        assert!(matches!(client.uint8(1025), Err(Error::TooLarge { param: Param::Length, .. })));
        assert!(matches!(client.uint16(0), Err(Error::TooSmall { .. })));
        assert!(matches!(client.uint16(1025), Err(Error::TooLarge { .. })));
        assert_eq!(calls(&client), 0);
    }

    #[test]
    fn test_hex16_validates_both_parameters() {
        let client = client(0);

        assert_eq!(client.hex16(1, 1).unwrap(), vec!["ab".to_string()]);
        assert!(matches!(client.hex16(0, 1), Err(Error::TooSmall { param: Param::Length, .. })));
        assert!(matches!(client.hex16(1025, 1), Err(Error::TooLarge { param: Param::Length, .. })));
        assert!(matches!(client.hex16(1, 0), Err(Error::TooSmall { param: Param::BlockSize, .. })));
        assert!(matches!(
            client.hex16(1, 1025),
            Err(Error::TooLarge { param: Param::BlockSize, .. })
        ));
        assert_eq!(calls(&client), 1);
    }

    #[test]
    fn test_short_response_is_decode_error() {
        let client = client(-1);
        let err = client.uint8(10).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 10, actual: 9 }));
        assert!(err.is_decode());
    }

    #[test]
    fn test_long_response_is_decode_error() {
        let client = client(1);
        assert!(matches!(
            client.hex16(3, 2),
            Err(Error::LengthMismatch { expected: 3, actual: 4 })
        ));
    }

    #[test]
    fn test_custom_maximum() {
        let client = QrngClient::with_fetcher(CountingFetcher::default(), 8);
        assert!(client.uint8(8).is_ok());
        assert!(client.uint8(9).is_err());
        assert!(client.hex16(1, 9).is_err());
    }

    #[test]
    fn test_decode_hex_block() {
        assert_eq!(decode_hex_block("a1ff00").unwrap(), vec![0xa1, 0xff, 0x00]);
        assert!(decode_hex_block("zz").unwrap_err().is_decode());
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = ClientConfig {
            max_length: 0,
            ..Default::default()
        };
        assert!(QrngClient::from_config(&config).is_err());
    }
}
