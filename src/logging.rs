use crate::di::{ServiceCollection, ServiceDescriptor};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Process-wide tracing setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logging {
    filter: String,
}

impl Logging {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Install the global subscriber. `RUST_LOG` wins over the configured filter.
    /// Returns false if a subscriber was already installed.
    pub fn init(&self) -> bool {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.filter.clone()));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_level(true)
                    .with_target(false),
            )
            .try_init()
            .is_ok()
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER)
    }
}

impl ServiceCollection {
    /// Register a default [`Logging`] singleton unless one is already registered.
    pub fn add_logging(&mut self) -> &mut Self {
        self.try_add(ServiceDescriptor::instance(Arc::new(Logging::default())))
    }
}
