//! Loading the per-turn metrics CSV
//!
//! Columns are looked up by header name, so their order in the file does not
//! matter and unknown columns are ignored. Every required column is resolved
//! before the first data row is read.

use crate::error::{ReportError, Result};
use crate::metrics::{Column, MetricsRow, MetricsTable, Player, TERMINAL_COLUMN, TURN_COLUMN};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header positions of every column the table needs
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    turn: usize,
    manhattan: [usize; 2],
    shortest_path: [usize; 2],
    walls_placed: [usize; 2],
    is_terminal: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, source: &Path) -> Result<Self> {
        let require = |name: &str| {
            find_column(headers, name).ok_or_else(|| ReportError::MissingColumn {
                column: name.to_string(),
                path: source.to_path_buf(),
            })
        };

        let turn = require(TURN_COLUMN)?;
        let mut manhattan = [0; 2];
        let mut shortest_path = [0; 2];
        let mut walls_placed = [0; 2];

        for column in Column::REQUIRED {
            for player in Player::ALL {
                let idx = require(player.column(column))?;
                match column {
                    Column::Manhattan => manhattan[player.index()] = idx,
                    Column::ShortestPath => shortest_path[player.index()] = idx,
                    Column::WallsPlaced => walls_placed[player.index()] = idx,
                    Column::Divergence => {}
                }
            }
        }

        Ok(Self {
            turn,
            manhattan,
            shortest_path,
            walls_placed,
            is_terminal: find_column(headers, TERMINAL_COLUMN),
        })
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Load a metrics table from a CSV file
pub fn load(path: &Path) -> Result<MetricsTable> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    let table = from_reader(file, path)?;

    tracing::info!("Loaded {} turns from {}", table.len(), path.display());
    Ok(table)
}

/// Load a metrics table from any reader
///
/// `source` only names the input in errors and log lines.
pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<MetricsTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers, source)?;
    tracing::debug!("Resolved columns: {:?}", columns);

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        rows.push(parse_row(&record, &headers, &columns, row_idx + 1)?);
    }

    if rows.is_empty() {
        return Err(ReportError::EmptyTable {
            path: source.to_path_buf(),
        });
    }

    let table = MetricsTable::new(rows);

    if !table.turns_increasing() {
        tracing::warn!(
            "Turn numbers in {} are not strictly increasing; plotting in file order",
            source.display()
        );
    }
    if columns.is_terminal.is_some() {
        tracing::debug!("{} terminal rows", table.terminal_rows());
    }

    Ok(table)
}

fn parse_row(
    record: &StringRecord,
    headers: &StringRecord,
    columns: &ColumnIndex,
    row: usize,
) -> Result<MetricsRow> {
    let cell = |idx: usize| Cell {
        value: record.get(idx).unwrap_or_default(),
        column: headers.get(idx).unwrap_or_default(),
        row,
    };

    let mut manhattan = [0.0; 2];
    let mut shortest_path = [0.0; 2];
    let mut walls_placed = [0; 2];
    for player in Player::ALL {
        let i = player.index();
        manhattan[i] = cell(columns.manhattan[i]).float()?;
        shortest_path[i] = cell(columns.shortest_path[i]).float()?;
        walls_placed[i] = cell(columns.walls_placed[i]).int()?;
    }

    let is_terminal = match columns.is_terminal {
        Some(idx) => cell(idx).flag(),
        None => None,
    };

    Ok(MetricsRow {
        turn: cell(columns.turn).int()?,
        manhattan,
        shortest_path,
        walls_placed,
        is_terminal,
    })
}

/// A single field with enough context to report a parse failure
struct Cell<'a> {
    value: &'a str,
    column: &'a str,
    row: usize,
}

impl Cell<'_> {
    fn invalid(&self) -> ReportError {
        ReportError::InvalidValue {
            column: self.column.to_string(),
            row: self.row,
            value: self.value.to_string(),
        }
    }

    fn float(&self) -> Result<f64> {
        self.value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid())
    }

    /// Integer column; integral floats such as `3.0` are accepted
    fn int(&self) -> Result<i64> {
        if let Ok(v) = self.value.parse::<i64>() {
            return Ok(v);
        }
        match self.float() {
            Ok(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
            _ => Err(self.invalid()),
        }
    }

    /// Optional boolean column; anything unrecognised is treated as absent
    fn flag(&self) -> Option<bool> {
        if self.value.is_empty() {
            return None;
        }
        match self.value.to_ascii_lowercase().as_str() {
            "true" | "yes" => return Some(true),
            "false" | "no" => return Some(false),
            _ => {}
        }
        match self.value.parse::<f64>() {
            Ok(v) if !v.is_nan() => Some(v != 0.0),
            _ => {
                tracing::warn!(
                    "Ignoring unrecognised {} value '{}' at row {}",
                    self.column,
                    self.value,
                    self.row
                );
                None
            }
        }
    }
}
