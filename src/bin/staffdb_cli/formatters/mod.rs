pub mod formatter;
pub mod json;
pub mod table;
pub mod text;

pub use formatter::Formatter;
use clap::ValueEnum;

/// Available output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text columns
    Text,

    /// JSON documents
    Json,

    /// Bordered tables
    Table,
}
