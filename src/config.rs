// src/config.rs
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    compare::KeyMode,
    error::ConfigError,
    load::{IdColumn, LoadOptions},
};

pub const DEFAULT_ID_COLUMN: &str = "ID";

/// Partially specified run settings, as read from a YAML file or the command line.
/// Unset fields fall through to the next layer and finally to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub file1: Option<PathBuf>,
    pub file2: Option<PathBuf>,
    pub id_column: Option<String>,
    pub use_header: Option<bool>,
    pub id_index: Option<usize>,
    /// Delimiter spec, see [`parse_delimiter`]. `auto` means sniff.
    pub delimiter1: Option<String>,
    pub delimiter2: Option<String>,
    pub normalize: Option<bool>,
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `over` on top of `self`; set fields in `over` win.
    pub fn merge(self, over: FileConfig) -> FileConfig {
        FileConfig {
            file1: over.file1.or(self.file1),
            file2: over.file2.or(self.file2),
            id_column: over.id_column.or(self.id_column),
            use_header: over.use_header.or(self.use_header),
            id_index: over.id_index.or(self.id_index),
            delimiter1: over.delimiter1.or(self.delimiter1),
            delimiter2: over.delimiter2.or(self.delimiter2),
            normalize: over.normalize.or(self.normalize),
            output_dir: over.output_dir.or(self.output_dir),
        }
    }

    pub fn resolve(self) -> Result<RunConfig, ConfigError> {
        let file1 = self.file1.ok_or(ConfigError::MissingPath("file1"))?;
        let file2 = self.file2.ok_or(ConfigError::MissingPath("file2"))?;

        let id_column = if self.use_header.unwrap_or(true) {
            IdColumn::Header(
                self.id_column
                    .unwrap_or_else(|| DEFAULT_ID_COLUMN.to_string()),
            )
        } else {
            IdColumn::Index(self.id_index.unwrap_or(0))
        };

        Ok(RunConfig {
            file1,
            file2,
            id_column,
            delimiter1: parse_delimiter_opt(self.delimiter1.as_deref())?,
            delimiter2: parse_delimiter_opt(self.delimiter2.as_deref())?,
            key_mode: KeyMode::from_flag(self.normalize.unwrap_or(true)),
            output_dir: self.output_dir,
        })
    }
}

/// Fully resolved settings for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub id_column: IdColumn,
    pub delimiter1: Option<u8>,
    pub delimiter2: Option<u8>,
    pub key_mode: KeyMode,
    /// Overrides the `Outputs` directory beside `file1`.
    pub output_dir: Option<PathBuf>,
}

impl RunConfig {
    pub fn load_options(&self, delimiter: Option<u8>) -> LoadOptions {
        LoadOptions {
            delimiter,
            id_column: self.id_column.clone(),
        }
    }
}

/// Parse a delimiter given as a single ASCII character or by name
/// (`comma`, `tab`, `pipe`, `semicolon`, or a literal `\t`).
pub fn parse_delimiter(spec: &str) -> Result<u8, ConfigError> {
    match spec.to_ascii_lowercase().as_str() {
        "comma" => return Ok(b','),
        "tab" | "\\t" => return Ok(b'\t'),
        "pipe" => return Ok(b'|'),
        "semicolon" => return Ok(b';'),
        _ => {}
    }
    match spec.as_bytes() {
        [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
        _ => Err(ConfigError::InvalidDelimiter(spec.to_string())),
    }
}

fn parse_delimiter_opt(spec: Option<&str>) -> Result<Option<u8>, ConfigError> {
    match spec {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("auto") => Ok(None),
        Some(s) => parse_delimiter(s).map(Some),
    }
}
