//! Explicit logger registry
//!
//! There is no implicitly constructed root logger. An application builds a
//! [`LoggerRegistry`] around its root logger once at startup, registers any
//! named loggers, and may then install it process-wide with
//! [`install_global`]. Until that happens [`global`] returns `None`.

use super::error::{LoggerError, Result};
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// Root logger plus named loggers, looked up by name.
#[derive(Debug)]
pub struct LoggerRegistry {
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new(root: Logger) -> Self {
        Self {
            root: Arc::new(root),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Register a named logger.
    ///
    /// Fails if the name is taken, including by the root logger.
    pub fn register(&self, logger: Logger) -> Result<Arc<Logger>> {
        if logger.name() == self.root.name() {
            return Err(LoggerError::config(
                "LoggerRegistry",
                format!("'{}' is the root logger's name", logger.name()),
            ));
        }

        let mut loggers = self.loggers.write();
        if loggers.contains_key(logger.name()) {
            return Err(LoggerError::config(
                "LoggerRegistry",
                format!("logger '{}' is already registered", logger.name()),
            ));
        }

        let logger = Arc::new(logger);
        loggers.insert(logger.name().to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    /// The logger registered under `name`, or the root logger if `name` is the
    /// root's name.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        if name == self.root.name() {
            return Some(self.root());
        }
        self.loggers.read().get(name).cloned()
    }

    /// Like [`get`](LoggerRegistry::get), falling back to the root logger.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        self.get(name).unwrap_or_else(|| self.root())
    }

    /// Names of the registered loggers (root excluded), sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Install `registry` as the process-wide registry.
///
/// Succeeds once; later calls fail and leave the installed registry alone.
pub fn install_global(registry: LoggerRegistry) -> Result<&'static LoggerRegistry> {
    let mut slot = Some(registry);
    let installed = GLOBAL_REGISTRY.get_or_init(|| {
        slot.take()
            .unwrap_or_else(|| LoggerRegistry::new(Logger::root()))
    });
    if slot.is_some() {
        return Err(LoggerError::config(
            "LoggerRegistry",
            "a global registry is already installed",
        ));
    }
    Ok(installed)
}

/// The process-wide registry, if one was installed.
pub fn global() -> Option<&'static LoggerRegistry> {
    GLOBAL_REGISTRY.get()
}
