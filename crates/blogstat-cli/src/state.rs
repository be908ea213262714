//! Shared application state.
//!
//! [`AppState<C>`] pairs the configuration with the annotation [`Engine`].
//! Both are read-only once built; cloning shares them.

use std::sync::Arc;

use blogstat_core::ConfigProvider;
use blogstat_lexical::Engine;

/// Configuration plus the process-wide annotation engine.
#[derive(Debug)]
pub struct AppState<C: ConfigProvider> {
    config: Arc<C>,
    engine: Engine,
}

impl<C: ConfigProvider> AppState<C> {
    /// Bundle a configuration with an initialized engine.
    pub fn new(config: C, engine: Engine) -> Self {
        Self::from_arc(Arc::new(config), engine)
    }

    /// Like [`new`](Self::new) for a configuration that is already shared.
    pub fn from_arc(config: Arc<C>, engine: Engine) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Cloneable handle to the configuration.
    pub fn config_arc(&self) -> Arc<C> {
        Arc::clone(&self.config)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Convenience for `state.config().project_name()`.
    pub fn project_name(&self) -> &str {
        self.config.project_name()
    }
}

impl<C: ConfigProvider> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            engine: self.engine.clone(),
        }
    }
}
