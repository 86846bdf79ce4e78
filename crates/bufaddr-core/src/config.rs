//! Accessor configuration.

use crate::error::ConfigError;

/// Validation policy for a [`BufferAddressAccessor`](crate::BufferAddressAccessor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessorConfig {
    /// Reject strided handles with
    /// [`AccessError::NonContiguous`](crate::AccessError::NonContiguous).
    /// Default `true`: consumers that take a bare pointer assume
    /// back-to-back elements.
    pub require_contiguous: bool,
    /// Minimum alignment demanded of the buffer address, in bytes, on top
    /// of the element's own alignment. Must be a power of two. Default 1.
    pub min_alignment: usize,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self {
            require_contiguous: true,
            min_alignment: 1,
        }
    }
}

impl AccessorConfig {
    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_alignment.is_power_of_two() {
            return Err(ConfigError::InvalidAlignment {
                value: self.min_alignment,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = AccessorConfig::default();
        assert!(cfg.require_contiguous);
        assert_eq!(cfg.min_alignment, 1);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn alignment_must_be_power_of_two() {
        for bad in [0, 3, 12, 100] {
            let cfg = AccessorConfig {
                min_alignment: bad,
                ..Default::default()
            };
            assert_eq!(
                cfg.validate(),
                Err(ConfigError::InvalidAlignment { value: bad })
            );
        }
        let cfg = AccessorConfig {
            min_alignment: 64,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
