//! Table building: turn filtered pipe-delimited lines into a grid.
//!
//! Input lines have already had separator rows removed by the assembler.
//! Each line is split on `|`; the first and last fields (the empty strings
//! outside the leading and trailing delimiters) are dropped and the rest are
//! trimmed and inline-formatted.
//!
//! Row 0 fixes the column count. Later rows are padded with empty cells or
//! truncated to match, so the result is always rectangular.

use crate::document::{Cell, Table};
use crate::pipeline::inline::parse_inline;
use std::cmp::Ordering;
use tracing::debug;

/// Build a table from separator-free table lines.
///
/// Returns `None` when no line yields a cell.
pub fn build_table<S: AsRef<str>>(lines: &[S]) -> Option<Table> {
    let mut rows: Vec<Vec<Cell>> = lines
        .iter()
        .map(|line| split_cells(line.as_ref()))
        .filter(|cells| !cells.is_empty())
        .map(|cells| cells.into_iter().map(parse_inline).collect())
        .collect();

    let columns = rows.first()?.len();

    for (idx, row) in rows.iter_mut().enumerate().skip(1) {
        match row.len().cmp(&columns) {
            Ordering::Less => {
                debug!("Table row {}: padding {} -> {} cells", idx, row.len(), columns);
                row.resize_with(columns, Vec::new);
            }
            Ordering::Greater => {
                debug!(
                    "Table row {}: truncating {} -> {} cells",
                    idx,
                    row.len(),
                    columns
                );
                row.truncate(columns);
            }
            Ordering::Equal => {}
        }
    }

    Some(Table {
        rows,
        header_row: 0,
    })
}

/// Split a row into trimmed cell strings, dropping the outermost fields.
fn split_cells(line: &str) -> Vec<&str> {
    let fields: Vec<&str> = line.trim().split('|').collect();
    if fields.len() <= 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1]
        .iter()
        .map(|f| f.trim())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{plain_text, TextSegment};

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows
            .iter()
            .map(|r| r.iter().map(|c| plain_text(c)).collect())
            .collect()
    }

    #[test]
    fn header_and_one_data_row() {
        let t = build_table(&["| A | B |", "| 1 | 2 |"]).unwrap();
        assert_eq!(t.header_row, 0);
        assert_eq!(t.columns(), 2);
        assert_eq!(texts(&t), vec![vec!["A", "B"], vec!["1", "2"]]);
    }

    #[test]
    fn cells_are_inline_formatted() {
        let t = build_table(&["| **Key** | Value |"]).unwrap();
        assert_eq!(t.rows[0][0], vec![TextSegment::bold("Key")]);
        assert_eq!(t.rows[0][1], vec![TextSegment::normal("Value")]);
    }

    #[test]
    fn empty_cells_have_no_segments() {
        let t = build_table(&["| A |  | C |"]).unwrap();
        assert_eq!(t.columns(), 3);
        assert!(t.rows[0][1].is_empty());
    }

    #[test]
    fn missing_trailing_pipe_drops_last_field() {
        // `| a | b` splits to ["", " a ", " b"]; the last field is discarded.
        let t = build_table(&["| a | b"]).unwrap();
        assert_eq!(texts(&t), vec![vec!["a"]]);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = build_table(&["| A | B | C |", "| 1 |"]).unwrap();
        assert_eq!(t.rows[1].len(), 3);
        assert!(t.rows[1][1].is_empty());
        assert!(t.rows[1][2].is_empty());
    }

    #[test]
    fn long_rows_are_truncated() {
        let t = build_table(&["| A | B |", "| 1 | 2 | 3 | 4 |"]).unwrap();
        assert_eq!(texts(&t)[1], vec!["1", "2"]);
    }

    #[test]
    fn rows_without_cells_are_skipped() {
        let t = build_table(&["|", "| A |", "||"]).unwrap();
        // "||" yields one empty cell, "|" yields none.
        assert_eq!(t.row_count(), 2);
        assert_eq!(texts(&t), vec![vec!["A"], vec![""]]);
    }

    #[test]
    fn no_rows_means_no_table() {
        assert!(build_table::<&str>(&[]).is_none());
        assert!(build_table(&["|"]).is_none());
    }
}
