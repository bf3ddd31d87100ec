pub mod normalize;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::load::LoadedFile;
use normalize::normalize_id;

/// How identifiers are turned into comparison keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Trimmed identifier, case and separator sensitive.
    Exact,
    /// [`normalize_id`] applied to the identifier.
    Normalized,
}

impl KeyMode {
    pub fn from_flag(normalize: bool) -> Self {
        if normalize {
            KeyMode::Normalized
        } else {
            KeyMode::Exact
        }
    }

    pub fn key(&self, id: &str) -> String {
        match self {
            KeyMode::Exact => id.trim().to_string(),
            KeyMode::Normalized => normalize_id(id),
        }
    }
}

/// Sorted keys of one file, each mapped to the original identifier that
/// represents it in reports.
///
/// When several originals share a key the first one fed to [`KeyIndex::build`]
/// is kept and later ones are ignored.
#[derive(Debug, Clone)]
pub struct KeyIndex {
    keys: BTreeMap<String, String>,
}

impl KeyIndex {
    pub fn build<'a, I>(ids: I, mode: KeyMode) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut keys = BTreeMap::new();
        for id in ids {
            keys.entry(mode.key(id)).or_insert_with(|| id.to_string());
        }
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn representative(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Counts of unique keys, written as the summary report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub unique_in_file1: usize,
    pub unique_in_file2: usize,
    pub matches: usize,
    pub only_in_file1: usize,
    pub only_in_file2: usize,
}

impl Summary {
    /// `(metric, count)` rows in report order.
    pub fn rows(&self) -> [(&'static str, usize); 5] {
        [
            ("Unique in File1", self.unique_in_file1),
            ("Unique in File2", self.unique_in_file2),
            ("Matches", self.matches),
            ("Only in File1", self.only_in_file1),
            ("Only in File2", self.only_in_file2),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Match,
    OnlyInFile1,
    OnlyInFile2,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Match => "MATCH",
            Status::OnlyInFile1 => "ONLY_IN_FILE1",
            Status::OnlyInFile2 => "ONLY_IN_FILE2",
        }
    }
}

/// Display identifiers per outcome, each list sorted by key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comparison {
    pub matches: Vec<String>,
    pub only_in_1: Vec<String>,
    pub only_in_2: Vec<String>,
    pub summary: Summary,
}

impl Comparison {
    /// Every reported identifier with its status: matches first, then file 1, then file 2.
    pub fn statuses(&self) -> impl Iterator<Item = (&str, Status)> {
        tagged(&self.matches, Status::Match)
            .chain(tagged(&self.only_in_1, Status::OnlyInFile1))
            .chain(tagged(&self.only_in_2, Status::OnlyInFile2))
    }
}

fn tagged(ids: &[String], status: Status) -> impl Iterator<Item = (&str, Status)> + '_ {
    ids.iter().map(move |id| (id.as_str(), status))
}

/// Compare the identifiers of two loaded files under `mode`.
pub fn compare(file1: &LoadedFile, file2: &LoadedFile, mode: KeyMode) -> Comparison {
    let left = KeyIndex::build(file1.ids.iter().map(String::as_str), mode);
    let right = KeyIndex::build(file2.ids.iter().map(String::as_str), mode);
    compare_indexes(&left, &right)
}

/// Set comparison over two key indexes.
///
/// Matches display file 1's representative, falling back to file 2's and
/// finally the key itself.
pub fn compare_indexes(left: &KeyIndex, right: &KeyIndex) -> Comparison {
    let resolve = |key: &str, primary: &KeyIndex, fallback: Option<&KeyIndex>| -> String {
        primary
            .representative(key)
            .or_else(|| fallback.and_then(|f| f.representative(key)))
            .unwrap_or(key)
            .to_string()
    };

    let mut matches = Vec::new();
    let mut only_in_1 = Vec::new();
    for key in left.keys() {
        if right.contains(key) {
            matches.push(resolve(key, left, Some(right)));
        } else {
            only_in_1.push(resolve(key, left, None));
        }
    }
    let only_in_2: Vec<String> = right
        .keys()
        .filter(|key| !left.contains(key))
        .map(|key| resolve(key, right, None))
        .collect();

    let summary = Summary {
        unique_in_file1: left.len(),
        unique_in_file2: right.len(),
        matches: matches.len(),
        only_in_file1: only_in_1.len(),
        only_in_file2: only_in_2.len(),
    };

    Comparison {
        matches,
        only_in_1,
        only_in_2,
        summary,
    }
}
