pub mod display;

use anyhow::{Context, Result};
use csv::Writer;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::compare::{Comparison, Summary};

/// Directory created beside the first input file.
pub const OUTPUT_DIR_NAME: &str = "Outputs";

pub const MATCHES_FILE: &str = "id_matches.csv";
pub const ONLY_IN_FILE1_FILE: &str = "id_only_in_file1.csv";
pub const ONLY_IN_FILE2_FILE: &str = "id_only_in_file2.csv";
pub const SUMMARY_FILE: &str = "id_diff_summary.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub matches: PathBuf,
    pub only_in_file1: PathBuf,
    pub only_in_file2: PathBuf,
    pub summary: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            matches: dir.join(MATCHES_FILE),
            only_in_file1: dir.join(ONLY_IN_FILE1_FILE),
            only_in_file2: dir.join(ONLY_IN_FILE2_FILE),
            summary: dir.join(SUMMARY_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            &self.matches,
            &self.only_in_file1,
            &self.only_in_file2,
            &self.summary,
        ]
    }
}

/// `Outputs` under the directory of `file1`, or under the working directory
/// when `file1` is a bare file name.
pub fn default_output_dir(file1: &Path) -> PathBuf {
    let base = match file1.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join(OUTPUT_DIR_NAME)
}

/// Write the three ID lists and the summary into `dir`, creating it if needed.
/// Existing report files are overwritten.
pub fn write_reports(dir: &Path, comparison: &Comparison) -> Result<ReportPaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let paths = ReportPaths::in_dir(dir);
    write_ids(&paths.matches, &comparison.matches)?;
    write_ids(&paths.only_in_file1, &comparison.only_in_1)?;
    write_ids(&paths.only_in_file2, &comparison.only_in_2)?;
    write_summary(&paths.summary, &comparison.summary)?;

    info!(dir = %dir.display(), "reports written");
    Ok(paths)
}

fn write_ids(path: &Path, ids: &[String]) -> Result<()> {
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["ID"])?;
    for id in ids {
        wtr.write_record([id])
            .with_context(|| format!("writing {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["Metric", "Count"])?;
    for (metric, count) in summary.rows() {
        wtr.write_record([metric, count.to_string().as_str()])
            .with_context(|| format!("writing {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}
