//! Construction-time configuration for the synchronous blocks.

use std::num::NonZeroUsize;

use crate::ConfigError;

/// Default FIFO depth, matching the reference testbench instance.
pub const DEFAULT_FIFO_DEPTH: usize = 8;

/// Top-level immutable configuration for a FIFO instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FifoConfig {
    /// Number of element slots; must be at least 1.
    pub depth: usize,
    /// Enables deterministic trace callback dispatch.
    pub tracing_enabled: bool,
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_FIFO_DEPTH,
            tracing_enabled: false,
        }
    }
}

impl FifoConfig {
    /// Creates a configuration with the given depth and tracing disabled.
    #[must_use]
    pub const fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            tracing_enabled: false,
        }
    }

    /// Validates the depth precondition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDepth`] when `depth == 0`.
    pub fn validated_depth(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.depth).ok_or(ConfigError::ZeroDepth)
    }
}

#[cfg(test)]
mod tests {
    use super::{FifoConfig, DEFAULT_FIFO_DEPTH};
    use crate::ConfigError;

    #[test]
    fn default_config_matches_reference_instance() {
        let config = FifoConfig::default();

        assert_eq!(config.depth, DEFAULT_FIFO_DEPTH);
        assert_eq!(config.depth, 8);
        assert!(!config.tracing_enabled);
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert_eq!(
            FifoConfig::with_depth(0).validated_depth(),
            Err(ConfigError::ZeroDepth)
        );
    }

    #[test]
    fn positive_depth_is_accepted() {
        let depth = FifoConfig::with_depth(3)
            .validated_depth()
            .expect("depth 3 is valid");
        assert_eq!(depth.get(), 3);
    }
}
