use prettytable::{format, Cell, Row, Table};

use crate::compare::{Comparison, Status, Summary};

fn style(status: Status) -> &'static str {
    match status {
        Status::Match => "Fg",
        Status::OnlyInFile1 | Status::OnlyInFile2 => "Fr",
    }
}

pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Metric").style_spec("b"),
        Cell::new("Count").style_spec("b"),
    ]));
    for (metric, count) in summary.rows() {
        table.add_row(Row::new(vec![
            Cell::new(metric),
            Cell::new(&count.to_string()).style_spec("r"),
        ]));
    }
    table
}

/// One row per reported identifier; matches in green, the rest in red.
pub fn status_table(comparison: &Comparison) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("ID").style_spec("b"),
        Cell::new("Status").style_spec("b"),
    ]));
    for (id, status) in comparison.statuses() {
        let spec = style(status);
        table.add_row(Row::new(vec![
            Cell::new(id).style_spec(spec),
            Cell::new(status.label()).style_spec(spec),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare, KeyMode};
    use crate::load::LoadedFile;
    use std::path::PathBuf;

    fn loaded(ids: &[&str]) -> LoadedFile {
        LoadedFile {
            path: PathBuf::from("mem.csv"),
            delimiter: b',',
            has_header: true,
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn status_rows_carry_labels() {
        let cmp = compare(&loaded(&["A", "B"]), &loaded(&["A", "C"]), KeyMode::Exact);
        let table = status_table(&cmp);
        assert_eq!(table.len(), 3);
        let cell = |r: usize, c: usize| {
            table
                .get_row(r)
                .and_then(|row| row.get_cell(c))
                .map(|cell| cell.get_content())
        };
        assert_eq!(cell(0, 1).as_deref(), Some("MATCH"));
        assert_eq!(cell(1, 0).as_deref(), Some("B"));
        assert_eq!(cell(2, 1).as_deref(), Some("ONLY_IN_FILE2"));
    }

    #[test]
    fn summary_has_five_rows() {
        let table = summary_table(&Summary::default());
        assert_eq!(table.len(), 5);
        let rendered = table.to_string();
        assert!(rendered.contains("Only in File2"));
    }
}
