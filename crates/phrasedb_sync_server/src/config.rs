//! Server configuration.

/// Configuration for the sync authority.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of changes accepted in one push.
    pub max_push_batch: usize,
}

impl ServerConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_push_batch: 1000,
        }
    }

    /// Sets the maximum push batch size.
    #[must_use]
    pub fn with_max_push_batch(mut self, limit: usize) -> Self {
        self.max_push_batch = limit;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_default() {
        let config = ServerConfig::new().with_max_push_batch(5);
        assert_eq!(config.max_push_batch, 5);
    }
}
