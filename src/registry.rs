use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use crate::Logger;

/// An explicit name→logger registry.
///
/// Owned by the application's composition root and passed where lookup is
/// needed; there is no process-wide registry. Registering a second logger
/// under the same name overwrites the first.
#[derive(Default)]
pub struct Registry {
    loggers: StdMutex<HashMap<String, Arc<Logger>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `logger` under its own name, returning the logger it
    /// displaced, if any.
    /// # Panics
    /// Panics if the registry lock is poisoned.
    pub fn register(&self, logger: Arc<Logger>) -> Option<Arc<Logger>> {
        self.loggers
            .lock()
            .unwrap()
            .insert(logger.name().to_owned(), logger)
    }

    /// Looks up a logger by name.
    /// # Panics
    /// Panics if the registry lock is poisoned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.lock().unwrap().get(name).cloned()
    }

    /// Returns the logger registered under `name`, creating and registering
    /// one with the default configuration if none exists.
    /// # Panics
    /// Panics if the registry lock is poisoned.
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.lock().unwrap();
        loggers
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(Logger::new(name)))
            .clone()
    }
}
