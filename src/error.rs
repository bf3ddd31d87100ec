use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the identifier column of one input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error(
        "ID column \"{column}\" not found in {}. Available columns: {available:?}",
        path.display()
    )]
    MissingColumn {
        path: PathBuf,
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid id_index {index} for {}; file has {columns} columns", path.display())]
    IndexOutOfRange {
        path: PathBuf,
        index: usize,
        columns: usize,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing path for {0}; pass it on the command line or set it in the config file")]
    MissingPath(&'static str),

    #[error("invalid delimiter {0:?}; expected a single ASCII character or one of comma, tab, pipe, semicolon")]
    InvalidDelimiter(String),

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
