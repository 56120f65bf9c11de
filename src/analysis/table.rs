/*
    This module holds the predictive parse table
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::Grammar;

// Synthetic lookahead column marking the end of the input
pub const END_MARKER: &str = "$";

// The production chosen for one (non-terminal, lookahead) pair
#[derive(Debug, PartialEq, Clone)]
pub struct CellEntry {
    pub generator: String,
    pub production: String,
}

impl CellEntry {
    pub fn representation(&self) -> String {
        format!("{} -> {}", self.generator, self.production)
    }
}

// Sparse table: one row per non-terminal, one column per terminal plus
// the end marker, both in catalog order. Filled once by the analysis
// engine; there are no public mutators afterwards.
#[derive(Debug)]
pub struct PredictiveTable {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<Option<CellEntry>>>,
}

impl PredictiveTable {
    pub(super) fn new(grammar: &Grammar) -> Self {
        let rows = grammar.non_terminal_symbols.clone();

        let mut columns = grammar.terminal_symbols.clone();
        columns.push(END_MARKER.to_string());

        let cells = rows.iter()
            .map(|_| columns.iter().map(|_| None).collect())
            .collect();

        PredictiveTable { rows, columns, cells }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    // The entry at (non_terminal, lookahead), if the cell exists and
    // has been filled. An empty cell means "parse error here".
    pub fn entry(&self, non_terminal: &str, lookahead: &str) -> Option<&CellEntry> {
        let row = self.rows.iter().position(|r| r == non_terminal)?;
        let column = self.columns.iter().position(|c| c == lookahead)?;
        self.cells[row][column].as_ref()
    }

    // Cell text for display: `generator -> production`, or nothing
    pub fn cell_text(&self, non_terminal: &str, lookahead: &str) -> String {
        self.entry(non_terminal, lookahead)
            .map(CellEntry::representation)
            .unwrap_or_default()
    }

    // Writes outside the row/column sets are dropped, like lookaheads
    // that never got a column (an ε escaping through a nullable FIRST)
    pub(super) fn set(&mut self, non_terminal: &str, lookahead: &str, entry: CellEntry) {
        let Some(row) = self.rows.iter().position(|r| r == non_terminal) else {
            return;
        };
        let Some(column) = self.columns.iter().position(|c| c == lookahead) else {
            return;
        };
        self.cells[row][column] = Some(entry);
    }
}

impl Display for PredictiveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.cells.iter().flatten().flatten()
            .map(|entry| entry.representation().chars().count())
            .chain(self.columns.iter().map(|c| c.chars().count()))
            .chain(self.rows.iter().map(|r| r.chars().count()))
            .max()
            .unwrap_or(0)
            + 2;

        let header = self.columns.iter()
            .map(|column| format!("{column:width$}"))
            .join("");
        writeln!(f, "{:width$}{}", "", header.trim_end())?;

        for row in &self.rows {
            let line = self.columns.iter()
                .map(|column| format!("{:width$}", self.cell_text(row, column)))
                .join("");
            writeln!(f, "{row:width$}{}", line.trim_end())?;
        }

        Ok(())
    }
}
