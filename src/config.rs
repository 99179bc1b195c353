//! Runtime configuration
//!
//! Defaults reproduce the reference workload: a one million row dataset
//! loaded in batches of ten thousand, plus one hundred rows that match the
//! benchmark filter.

use std::path::PathBuf;

/// Page count used by `PRAGMA cache_size` when optimizing
pub const DEFAULT_CACHE_SIZE_PAGES: i64 = 20_000;

/// Options that affect how the store talks to SQLite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Value for `PRAGMA cache_size` applied by `apply_optimizations`
    pub cache_size_pages: i64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            cache_size_pages: DEFAULT_CACHE_SIZE_PAGES,
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    pub store: StoreOptions,
    /// Rows per `insert_batch` call during generation
    pub batch_size: usize,
    /// Uniformly random employees to generate
    pub random_count: usize,
    /// Male employees with an "F" surname to generate
    pub biased_count: usize,
    /// Rows shown by the performance report
    pub preview_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("employees.db"),
            store: StoreOptions::default(),
            batch_size: 10_000,
            random_count: 1_000_000,
            biased_count: 100,
            preview_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("employees.db"));
        assert_eq!(config.store.cache_size_pages, 20_000);
        assert_eq!(config.batch_size, 10_000);
        assert_eq!(config.random_count, 1_000_000);
        assert_eq!(config.biased_count, 100);
    }
}
