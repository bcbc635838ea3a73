//! Configuration for the layout engine

/// Configuration options for rectangle derivation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Origin (left/top) used when an axis has no origin information
    pub default_origin: f64,

    /// Extent (width/height) used when an axis has no extent information
    pub default_extent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_origin: 0.0,
            default_extent: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback origin for unconstrained axes
    pub fn with_default_origin(mut self, origin: f64) -> Self {
        self.default_origin = origin;
        self
    }

    /// Set the fallback extent for unconstrained axes
    pub fn with_default_extent(mut self, extent: f64) -> Self {
        self.default_extent = extent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.default_origin, 0.0);
        assert_eq!(config.default_extent, 100.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_default_origin(5.0)
            .with_default_extent(50.0);
        assert_eq!(config.default_origin, 5.0);
        assert_eq!(config.default_extent, 50.0);
    }
}
