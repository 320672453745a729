//! Result rendering: box-drawn tables, JSON and CSV.

use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A result row that can be printed in every output format.
pub trait Tabular: Serialize {
    /// Column headers, in display order.
    const HEADERS: &'static [&'static str];

    /// Formatted cells matching [`Tabular::HEADERS`].
    fn cells(&self, precision: usize) -> Vec<String>;
}

/// Formats a float with a fixed number of decimals.
pub fn fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Formats an optional float, `-` when absent.
pub fn fixed_or_dash(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| fixed(v, precision))
}

/// Writes `rows` to `out` in the requested format.
pub fn render<T: Tabular>(
    rows: &[T],
    format: OutputFormat,
    precision: usize,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(rows, precision, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(T::HEADERS)?;
            for row in rows {
                writer.write_record(row.cells(precision))?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_table<T: Tabular>(rows: &[T], precision: usize, out: &mut dyn Write) -> Result<()> {
    let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells(precision)).collect();
    let widths: Vec<usize> = T::HEADERS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |values: &[String]| {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!(" {:<width$} ", v, width = *w))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let headers: Vec<String> = T::HEADERS.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(out, "{}", line(&headers))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in &cells {
        writeln!(out, "{}", line(row))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}
