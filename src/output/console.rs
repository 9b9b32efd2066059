//! Console rendering of result sets

use crate::output::traits::OutputResult;
use crate::state::ResultSet;
use std::io::Write;

/// Writes every row on its own line, fields separated by a space
pub fn write_plain<W: Write>(out: &mut W, results: &ResultSet) -> OutputResult<()> {
    for row in results.rows() {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// Writes the result set as an aligned table
pub fn write_pretty<W: Write>(out: &mut W, results: &ResultSet) -> OutputResult<()> {
    out.write_all(format_table(results).as_bytes())?;
    Ok(())
}

/// Formats a result set as a bordered table with a header separator
///
/// Columns are left-aligned and sized to their widest cell.
pub fn format_table(results: &ResultSet) -> String {
    let widths: Vec<usize> = (0..results.arity())
        .map(|column| {
            results
                .rows()
                .iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut table = String::new();
    table.push_str(&border);
    table.push_str(&format_row(results.header(), &widths));
    table.push_str(&border);
    for row in results.data_rows() {
        table.push_str(&format_row(row, &widths));
    }
    table.push_str(&border);
    table
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in row.iter().zip(widths) {
        let padding = width - cell.chars().count();
        line.push_str(&format!(" {}{} |", cell, " ".repeat(padding)));
    }
    line.push('\n');
    line
}
