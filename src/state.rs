//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::library::Library;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    library: Library,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        let library = Library::new(config.library.documents_dir.clone());
        Self {
            inner: Arc::new(AppStateInner { config, library }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document library
    pub fn library(&self) -> &Library {
        &self.inner.library
    }
}
