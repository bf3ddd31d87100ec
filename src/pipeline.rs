use anyhow::Result;
use tracing::info;

use crate::{
    compare::{compare, Comparison},
    config::RunConfig,
    load::{load_ids, LoadedFile},
    report::{default_output_dir, write_reports, ReportPaths},
};

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub file1: LoadedFile,
    pub file2: LoadedFile,
    pub comparison: Comparison,
    pub reports: ReportPaths,
}

/// Load both files, compare them and write the reports.
///
/// Both files are loaded before any output is touched, so a load failure
/// leaves the output directory as it was.
pub fn run(cfg: &RunConfig) -> Result<RunOutcome> {
    let file1 = load_ids(&cfg.file1, &cfg.load_options(cfg.delimiter1))?;
    info!("File1: {} unique IDs", file1.len());
    let file2 = load_ids(&cfg.file2, &cfg.load_options(cfg.delimiter2))?;
    info!("File2: {} unique IDs", file2.len());

    let comparison = compare(&file1, &file2, cfg.key_mode);
    info!(
        mode = ?cfg.key_mode,
        matches = comparison.summary.matches,
        only_in_file1 = comparison.summary.only_in_file1,
        only_in_file2 = comparison.summary.only_in_file2,
        "comparison complete"
    );

    let out_dir = cfg
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&cfg.file1));
    let reports = write_reports(&out_dir, &comparison)?;

    Ok(RunOutcome {
        file1,
        file2,
        comparison,
        reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compare::{KeyMode, Summary},
        error::LoadError,
        load::IdColumn,
        report::OUTPUT_DIR_NAME,
    };
    use std::{fs, path::Path};
    use tempfile::tempdir;

    fn config(dir: &Path, key_mode: KeyMode) -> RunConfig {
        RunConfig {
            file1: dir.join("file1.csv"),
            file2: dir.join("file2.csv"),
            id_column: IdColumn::Header("ID".to_string()),
            delimiter1: None,
            delimiter2: None,
            key_mode,
            output_dir: None,
        }
    }

    #[test]
    fn end_to_end_normalized() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("file1.csv"), "ID\nA1\nA2\na1\n")?;
        fs::write(dir.path().join("file2.csv"), "ID;Name\nA1;x\nA3;y\n")?;

        let outcome = run(&config(dir.path(), KeyMode::Normalized))?;
        assert_eq!(outcome.file2.delimiter, b';');

        let out = dir.path().join(OUTPUT_DIR_NAME);
        assert_eq!(outcome.reports.matches, out.join("id_matches.csv"));
        assert_eq!(fs::read_to_string(out.join("id_matches.csv"))?, "ID\nA1\n");
        assert_eq!(
            fs::read_to_string(out.join("id_only_in_file1.csv"))?,
            "ID\nA2\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("id_only_in_file2.csv"))?,
            "ID\nA3\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("id_diff_summary.csv"))?,
            "Metric,Count\nUnique in File1,2\nUnique in File2,2\nMatches,1\nOnly in File1,1\nOnly in File2,1\n"
        );
        Ok(())
    }

    #[test]
    fn exact_mode_counts_case_variants() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("file1.csv"), "ID\nA1\nA2\na1\n")?;
        fs::write(dir.path().join("file2.csv"), "ID\nA1\nA3\n")?;

        let outcome = run(&config(dir.path(), KeyMode::Exact))?;
        let s = outcome.comparison.summary;
        assert_eq!(
            (s.unique_in_file1, s.unique_in_file2, s.matches, s.only_in_file1, s.only_in_file2),
            (3, 2, 1, 2, 1)
        );
        assert_eq!(outcome.comparison.only_in_1, vec!["A2", "a1"]);
        Ok(())
    }

    #[test]
    fn missing_input_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("file1.csv"), "ID\nA1\n")?;

        let err = run(&config(dir.path(), KeyMode::Normalized)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotFound { .. })
        ));
        assert!(!dir.path().join(OUTPUT_DIR_NAME).exists());
        Ok(())
    }

    #[test]
    fn bad_column_in_second_file_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("file1.csv"), "ID\nA1\n")?;
        fs::write(dir.path().join("file2.csv"), "Key,Name\nA1,x\n")?;

        let err = run(&config(dir.path(), KeyMode::Normalized)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn { .. })
        ));
        assert!(!dir.path().join(OUTPUT_DIR_NAME).exists());
        Ok(())
    }

    #[test]
    fn empty_inputs_produce_empty_reports() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("file1.csv"), "")?;
        fs::write(dir.path().join("file2.csv"), "ID\n")?;
        let out = dir.path().join("custom");
        let mut cfg = config(dir.path(), KeyMode::Normalized);
        cfg.output_dir = Some(out.clone());

        let outcome = run(&cfg)?;
        assert_eq!(outcome.comparison.summary, Summary::default());
        for path in outcome.reports.all() {
            assert!(path.starts_with(&out));
            assert!(path.exists());
        }
        assert_eq!(fs::read_to_string(out.join("id_matches.csv"))?, "ID\n");
        Ok(())
    }
}
