//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the session store with mock implementations.

use super::error::ResolutionError;
use crate::knowledge::{self, Resolution};
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Produces a reply for a user query
#[async_trait]
pub trait ResolutionBackend: Send + Sync {
    /// Resolve a trimmed, validated query
    async fn resolve(&self, query: &str) -> Result<Resolution, ResolutionError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ResolutionBackend + ?Sized> ResolutionBackend for Arc<T> {
    async fn resolve(&self, query: &str) -> Result<Resolution, ResolutionError> {
        (**self).resolve(query).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Knowledge-base lookup behind a randomized delay that stands in for a
/// real backend call
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    min_delay: Duration,
    max_delay: Duration,
}

impl SimulatedBackend {
    /// `min_delay` must not exceed `max_delay`; the bounds are swapped if it does
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        if min_delay <= max_delay {
            Self {
                min_delay,
                max_delay,
            }
        } else {
            Self {
                min_delay: max_delay,
                max_delay: min_delay,
            }
        }
    }

    /// Pick a delay uniformly from the configured range
    pub fn pick_delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        rand::thread_rng().gen_range(self.min_delay..=self.max_delay)
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(3000))
    }
}

#[async_trait]
impl ResolutionBackend for SimulatedBackend {
    async fn resolve(&self, query: &str) -> Result<Resolution, ResolutionError> {
        let delay = self.pick_delay();
        tracing::debug!(delay_ms = delay.as_millis(), "Simulating backend latency");
        tokio::time::sleep(delay).await;
        Ok(knowledge::resolve(query))
    }
}
