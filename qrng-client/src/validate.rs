//! Request parameter validation
//!
//! Every request is checked against `[1, max]` before it can reach a fetcher.

use crate::error::{Error, Param, Result};

/// Check that `value` lies within `[1, max]`
pub fn check(param: Param, value: usize, max: usize) -> Result<()> {
    if value < 1 {
        return Err(Error::TooSmall { param, value });
    }
    if value > max {
        return Err(Error::TooLarge { param, value, max });
    }
    Ok(())
}

/// Check a value count
pub fn length(value: usize, max: usize) -> Result<()> {
    check(Param::Length, value, max)
}

/// Check a hex block size
pub fn block_size(value: usize, max: usize) -> Result<()> {
    check(Param::BlockSize, value, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        assert!(length(1, 1024).is_ok());
        assert!(length(1024, 1024).is_ok());
        assert!(block_size(512, 1024).is_ok());
    }

    #[test]
    fn test_too_small() {
        match length(0, 1024) {
            Err(Error::TooSmall { param: Param::Length, value: 0 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_too_large() {
        match block_size(1025, 1024) {
            Err(Error::TooLarge { param: Param::BlockSize, value: 1025, max: 1024 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_custom_maximum() {
        assert!(length(16, 16).is_ok());
        assert!(length(17, 16).is_err());
    }
}
