//! # Screen Rendering
//!
//! Renders a [`ReportDocument`] as plain text for the terminal.
//!
//! ```text
//! Sales Recap Report
//! ==================
//! Printed: 15/03/2024 10:20:00
//! Period:  2024-03-01 to 2024-03-31
//!
//! Total orders       2 transactions
//! Total revenue      Rp 150.000
//!
//! Sales by Channel
//! Channel  Orders     Revenue
//! -------  ------  ----------
//! A             1  Rp 100.000
//! B             1   Rp 50.000
//! ```

use std::fmt::{self, Write};

use crate::document::{fit, Align, ReportDocument, Table};

/// Widest a text column may grow before cells are shortened.
pub const MAX_COLUMN_CHARS: usize = 28;

const COLUMN_GAP: &str = "  ";

/// Renders the whole document.
pub fn render_text(doc: &ReportDocument) -> String {
    doc.to_string()
}

impl fmt::Display for ReportDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self)
    }
}

fn write_report<W: Write + ?Sized>(out: &mut W, doc: &ReportDocument) -> fmt::Result {
    writeln!(out, "{}", doc.title)?;
    writeln!(out, "{}", "=".repeat(doc.title.chars().count()))?;
    writeln!(out, "Printed: {}", doc.printed_label())?;
    writeln!(out, "Period:  {}", doc.period)?;
    writeln!(out)?;

    let label_width = doc
        .summary
        .iter()
        .map(|line| line.label.chars().count())
        .max()
        .unwrap_or(0);
    for line in &doc.summary {
        writeln!(out, "{}{}{}", pad(&line.label, label_width, Align::Left), COLUMN_GAP, line.value)?;
    }

    for table in &doc.tables {
        writeln!(out)?;
        render_table(out, table)?;
    }

    Ok(())
}

/// Renders a single table with its title.
pub fn render_table<W: Write + ?Sized>(out: &mut W, table: &Table) -> fmt::Result {
    writeln!(out, "{}", table.title)?;

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let widest_cell = table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            widest_cell
                .min(MAX_COLUMN_CHARS)
                .max(column.heading.chars().count())
        })
        .collect();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(&column.heading, *width, column.align))
        .collect();
    writeln!(out, "{}", header.join(COLUMN_GAP).trim_end())?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join(COLUMN_GAP))?;

    if table.is_empty() {
        return writeln!(out, "{}", table.empty_message);
    }

    for row in &table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (column, width))| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad(&fit(cell, *width), *width, column.align)
            })
            .collect();
        writeln!(out, "{}", cells.join(COLUMN_GAP).trim_end())?;
    }

    Ok(())
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}
