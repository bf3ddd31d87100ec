use anyhow::{Context, Result};
use clap::Parser;
use iddiff::{
    config::FileConfig,
    pipeline,
    report::display::{status_table, summary_table},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "iddiff",
    version,
    about = "Compare the ID column of two delimited files and report matches and differences"
)]
struct Args {
    /// First input file
    file1: Option<PathBuf>,

    /// Second input file
    file2: Option<PathBuf>,

    /// YAML run configuration; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the ID column; implies --header
    #[arg(long, conflicts_with_all = ["no_header", "id_index"])]
    id_column: Option<String>,

    /// Files have a header row (the default unless the config file says otherwise)
    #[arg(long, conflicts_with = "no_header")]
    header: bool,

    /// Files have no header row; select the ID column with --id-index
    #[arg(long)]
    no_header: bool,

    /// Zero-based index of the ID column; implies --no-header
    #[arg(long, conflicts_with = "header")]
    id_index: Option<usize>,

    /// Delimiter of file 1 (character, comma, tab, pipe, semicolon or auto)
    #[arg(long)]
    delimiter1: Option<String>,

    /// Delimiter of file 2
    #[arg(long)]
    delimiter2: Option<String>,

    /// Ignore case and separators when comparing (the default)
    #[arg(long, conflicts_with = "no_normalize")]
    normalize: bool,

    /// Compare identifiers exactly instead of ignoring case and separators
    #[arg(long)]
    no_normalize: bool,

    /// Write reports here instead of an Outputs directory beside file 1
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print only the summary table
    #[arg(long)]
    summary_only: bool,

    /// Print the summary as JSON on stdout instead of tables
    #[arg(long)]
    json: bool,
}

impl Args {
    fn overrides(&self) -> FileConfig {
        let use_header = if self.header || self.id_column.is_some() {
            Some(true)
        } else if self.no_header || self.id_index.is_some() {
            Some(false)
        } else {
            None
        };
        let normalize = match (self.normalize, self.no_normalize) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        FileConfig {
            file1: self.file1.clone(),
            file2: self.file2.clone(),
            id_column: self.id_column.clone(),
            use_header,
            id_index: self.id_index,
            delimiter1: self.delimiter1.clone(),
            delimiter2: self.delimiter2.clone(),
            normalize,
            output_dir: self.output_dir.clone(),
        }
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let base = match &args.config {
        Some(path) => FileConfig::from_yaml_file(path)?,
        None => FileConfig::default(),
    };
    let cfg = base
        .merge(args.overrides())
        .resolve()
        .context("invalid run configuration")?;
    info!(file1 = %cfg.file1.display(), file2 = %cfg.file2.display(), "startup");

    let outcome = pipeline::run(&cfg)?;
    let comparison = &outcome.comparison;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison.summary)?);
        for path in outcome.reports.all() {
            info!(path = %path.display(), "report saved");
        }
        return Ok(());
    }

    summary_table(&comparison.summary).printstd();
    if !args.summary_only {
        status_table(comparison).printstd();
    }
    println!("\nReports saved:");
    for path in outcome.reports.all() {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iddiff::{compare::KeyMode, load::IdColumn};

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("iddiff").chain(argv.iter().copied()))
    }

    fn yaml_headerless_exact() -> FileConfig {
        FileConfig {
            file1: Some("a.csv".into()),
            file2: Some("b.csv".into()),
            use_header: Some(false),
            id_index: Some(1),
            normalize: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn header_and_normalize_flags_override_config_file() -> Result<()> {
        let args = parse(&["--header", "--normalize"])?;
        let cfg = yaml_headerless_exact().merge(args.overrides()).resolve()?;
        assert_eq!(cfg.id_column, IdColumn::Header("ID".to_string()));
        assert_eq!(cfg.key_mode, KeyMode::Normalized);
        Ok(())
    }

    #[test]
    fn id_column_implies_header_mode() -> Result<()> {
        let args = parse(&["--id-column", "AccountNo"])?;
        let cfg = yaml_headerless_exact().merge(args.overrides()).resolve()?;
        assert_eq!(cfg.id_column, IdColumn::Header("AccountNo".to_string()));
        Ok(())
    }

    #[test]
    fn id_index_implies_headerless_mode() -> Result<()> {
        let args = parse(&["a.csv", "b.csv", "--id-index", "2"])?;
        let cfg = FileConfig::default().merge(args.overrides()).resolve()?;
        assert_eq!(cfg.id_column, IdColumn::Index(2));
        Ok(())
    }

    #[test]
    fn contradictory_flags_are_rejected() {
        assert!(parse(&["--header", "--no-header"]).is_err());
        assert!(parse(&["--id-column", "ID", "--no-header"]).is_err());
        assert!(parse(&["--id-index", "1", "--header"]).is_err());
        assert!(parse(&["--id-column", "ID", "--id-index", "1"]).is_err());
        assert!(parse(&["--normalize", "--no-normalize"]).is_err());
    }

    #[test]
    fn no_flags_leave_config_untouched() -> Result<()> {
        let args = parse(&[])?;
        assert_eq!(args.overrides(), FileConfig::default());
        Ok(())
    }
}
