//! HTTP API for FinanceBot

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::{ResolutionBackend, SessionRegistry, SimulatedBackend};
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState<B: ResolutionBackend + 'static = SimulatedBackend> {
    pub registry: Arc<SessionRegistry<B>>,
}

impl<B: ResolutionBackend + 'static> AppState<B> {
    pub fn new(backend: B) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new(backend)),
        }
    }
}

impl<B: ResolutionBackend + 'static> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}
