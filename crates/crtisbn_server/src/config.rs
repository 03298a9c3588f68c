//! Server configuration.

/// Configuration for the request handler.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Largest count a batch-generate request may ask for.
    pub max_batch: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { max_batch: 250 }
    }
}

impl ServerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch-generate ceiling.
    #[must_use]
    pub const fn max_batch(mut self, value: usize) -> Self {
        self.max_batch = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(ServerConfig::default().max_batch, 250);
    }

    #[test]
    fn builder_pattern() {
        assert_eq!(ServerConfig::new().max_batch(10).max_batch, 10);
    }
}
