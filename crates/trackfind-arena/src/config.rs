//! Arena configuration parameters.

use crate::error::ArenaError;

/// Sizing for a visited-tile table and its overflow link pool.
///
/// Both sizes are fixed for the lifetime of a search run; nothing grows on
/// demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of hash buckets.
    ///
    /// Default: 1024. Must be a power of two between 4 and 65536.
    pub bucket_count: usize,

    /// Number of overflow link records available to chained buckets.
    ///
    /// Default: 1024. Must be at least 1 and below `u16::MAX`, which is
    /// reserved as the end-of-chain sentinel.
    pub link_capacity: usize,
}

impl ArenaConfig {
    /// Default bucket count.
    pub const DEFAULT_BUCKET_COUNT: usize = 0x400;

    /// Default overflow link capacity.
    pub const DEFAULT_LINK_CAPACITY: usize = 0x400;

    /// Largest accepted bucket count.
    pub const MAX_BUCKET_COUNT: usize = 1 << 16;

    /// Create a config with explicit sizes.
    pub fn new(bucket_count: usize, link_capacity: usize) -> Self {
        Self {
            bucket_count,
            link_capacity,
        }
    }

    /// Check the sizing invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the bucket count is not a
    /// power of two in `4..=65536`, or the link capacity is zero or does not
    /// fit below the sentinel index.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.bucket_count.is_power_of_two()
            || self.bucket_count < 4
            || self.bucket_count > Self::MAX_BUCKET_COUNT
        {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "bucket_count must be a power of two in 4..={}, got {}",
                    Self::MAX_BUCKET_COUNT,
                    self.bucket_count
                ),
            });
        }
        if self.link_capacity == 0 || self.link_capacity >= u16::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "link_capacity must be in 1..{}, got {}",
                    u16::MAX,
                    self.link_capacity
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_COUNT, Self::DEFAULT_LINK_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ArenaConfig::default();
        assert_eq!(config.bucket_count, 1024);
        assert_eq!(config.link_capacity, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_power_of_two_buckets_rejected() {
        let config = ArenaConfig::new(1000, 16);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn link_capacity_bounds() {
        assert!(ArenaConfig::new(64, 0).validate().is_err());
        assert!(ArenaConfig::new(64, u16::MAX as usize).validate().is_err());
        let just_under = u16::MAX as usize - 1;
        assert!(ArenaConfig::new(64, just_under).validate().is_ok());
    }
}
