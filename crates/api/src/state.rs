//! Application state

use director_business::DirectorService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DirectorService>,
}

impl AppState {
    pub fn new(service: DirectorService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
