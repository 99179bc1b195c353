// src/bin/staffdb_cli/context.rs
use anyhow::{Context as _, Result};
use staffdb::{Config, EmployeeStore};
use crate::formatters::{OutputFormat, Formatter};
use crate::formatters::text::TextFormatter;
use crate::formatters::json::JsonFormatter;
use crate::formatters::table::TableFormatter;

/// CLI execution context
pub struct Context {
    /// Resolved configuration
    config: Config,

    /// Verbosity level
    verbosity: u8,

    /// Current formatter
    formatter: Box<dyn Formatter>,
}

impl Context {
    pub fn new(config: Config, verbosity: u8, format: OutputFormat, colored: bool) -> Self {
        let formatter: Box<dyn Formatter> = match (format, colored) {
            (OutputFormat::Text, true) => Box::new(TextFormatter::new()),
            (OutputFormat::Text, false) => Box::new(TextFormatter::without_colors()),
            (OutputFormat::Table, true) => Box::new(TableFormatter::new()),
            (OutputFormat::Table, false) => Box::new(TableFormatter::without_colors()),
            (OutputFormat::Json, _) => Box::new(JsonFormatter::new()),
        };

        Context {
            config,
            verbosity,
            formatter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Open the configured database, run `f`, then close the connection.
    ///
    /// On error the store is dropped instead, which also releases the
    /// connection.
    pub fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut EmployeeStore) -> Result<T>,
    {
        let path = &self.config.database_path;
        let mut store = EmployeeStore::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?
            .with_options(self.config.store);

        let value = f(&mut store)?;
        store.close()?;
        Ok(value)
    }
}
