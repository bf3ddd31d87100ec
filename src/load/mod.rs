// src/load/mod.rs
pub mod delimiter;

use csv::ReaderBuilder;
use std::{
    collections::HashSet,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::LoadError;
use delimiter::{delimiter_name, detect_delimiter, DEFAULT_DELIMITER};

/// Which column of the input holds the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdColumn {
    /// File has a header row; pick the column with this exact name.
    Header(String),
    /// File has no header row; pick the zero-based column.
    Index(usize),
}

impl IdColumn {
    pub fn has_header(&self) -> bool {
        matches!(self, IdColumn::Header(_))
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter; sniffed from the file when `None`.
    pub delimiter: Option<u8>,
    pub id_column: IdColumn,
}

/// The unique identifiers of one input file, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Delimiter actually used to parse the file.
    pub delimiter: u8,
    pub has_header: bool,
    /// Trimmed, non-empty, unique identifiers.
    pub ids: Vec<String>,
}

impl LoadedFile {
    fn empty(path: &Path, delimiter: u8, has_header: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter,
            has_header,
            ids: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Read the identifier column of `path`.
///
/// Every field is read as text, so identifiers like `00123` keep their form.
/// Values are trimmed, blank values (and rows too short to have the column)
/// are skipped, and repeated identifiers keep only their first occurrence.
/// A file without any records loads as an empty set.
#[tracing::instrument(level = "info", skip(path, opts), fields(path = %path.as_ref().display()))]
pub fn load_ids<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<LoadedFile, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let delimiter = match opts.delimiter {
        Some(d) => d,
        None => detect_delimiter(path, DEFAULT_DELIMITER),
    };
    let has_header = opts.id_column.has_header();
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_header)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let index = match &opts.id_column {
        IdColumn::Header(name) => {
            let headers = rdr.headers().map_err(csv_err)?;
            if headers.is_empty() {
                debug!("empty file");
                return Ok(LoadedFile::empty(path, delimiter, has_header));
            }
            match headers.iter().position(|h| h == name) {
                Some(i) => i,
                None => {
                    return Err(LoadError::MissingColumn {
                        path: path.to_path_buf(),
                        column: name.clone(),
                        available: headers.iter().map(str::to_string).collect(),
                    })
                }
            }
        }
        IdColumn::Index(i) => *i,
    };

    let mut records = rdr.into_records().peekable();
    if !has_header {
        match records.peek() {
            None => {
                debug!("empty file");
                return Ok(LoadedFile::empty(path, delimiter, has_header));
            }
            Some(Ok(first)) if index >= first.len() => {
                return Err(LoadError::IndexOutOfRange {
                    path: path.to_path_buf(),
                    index,
                    columns: first.len(),
                });
            }
            _ => {}
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut ids = Vec::new();
    let mut rows = 0usize;
    for record in records {
        let record = record.map_err(csv_err)?;
        rows += 1;
        let Some(raw) = record.get(index) else {
            continue;
        };
        let id = raw.trim();
        if id.is_empty() || seen.contains(id) {
            continue;
        }
        seen.insert(id.to_string());
        ids.push(id.to_string());
    }

    info!(
        rows,
        unique = ids.len(),
        delimiter = %delimiter_name(delimiter),
        "loaded identifiers"
    );

    Ok(LoadedFile {
        path: path.to_path_buf(),
        delimiter,
        has_header,
        ids,
    })
}
