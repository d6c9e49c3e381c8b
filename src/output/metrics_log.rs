//! Append-only writer for the per-turn metrics CSV

use crate::error::{ReportError, Result};
use crate::metrics::MetricsRow;
use csv::WriterBuilder;
use serde::{Serialize, Serializer};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// On-disk column layout, header taken from the field names
#[derive(Debug, Serialize)]
struct LogRecord {
    turn: i64,
    #[serde(serialize_with = "distance")]
    p0_manhattan: f64,
    #[serde(serialize_with = "distance")]
    p1_manhattan: f64,
    #[serde(serialize_with = "distance")]
    p0_shortest_path: f64,
    #[serde(serialize_with = "distance")]
    p1_shortest_path: f64,
    p0_walls_placed: i64,
    p1_walls_placed: i64,
    is_terminal: u8,
}

/// Whole distances are written as integers (`5`, not `5.0`)
fn distance<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    const EXACT: f64 = (1u64 << 53) as f64;
    if value.fract() == 0.0 && value.abs() < EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl From<&MetricsRow> for LogRecord {
    fn from(row: &MetricsRow) -> Self {
        Self {
            turn: row.turn,
            p0_manhattan: row.manhattan[0],
            p1_manhattan: row.manhattan[1],
            p0_shortest_path: row.shortest_path[0],
            p1_shortest_path: row.shortest_path[1],
            p0_walls_placed: row.walls_placed[0],
            p1_walls_placed: row.walls_placed[1],
            is_terminal: u8::from(row.is_terminal.unwrap_or(false)),
        }
    }
}

/// Metrics file that rows are appended to, one per turn
#[derive(Debug, Clone)]
pub struct MetricsLog {
    path: PathBuf,
}

impl MetricsLog {
    /// Create or truncate the file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::write(&path, "").map_err(|e| ReportError::io(&path, e))?;
        Ok(Self { path })
    }

    /// Append to an existing file, or one that will be created on first write
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the file is empty
    pub fn append(&self, row: &MetricsRow) -> Result<()> {
        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ReportError::io(&self.path, e))?;

        let mut wtr = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        wtr.serialize(LogRecord::from(row))?;
        wtr.flush().map_err(|e| ReportError::io(&self.path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::metrics::tests::sample_table;

    const HEADER: &str = "turn,p0_manhattan,p1_manhattan,p0_shortest_path,p1_shortest_path,p0_walls_placed,p1_walls_placed,is_terminal";

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = MetricsLog::create(dir.path().join("game_metrics.csv")).unwrap();

        for row in sample_table().rows() {
            log.append(row).unwrap();
        }

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.iter().filter(|l| **l == HEADER).count(), 1);
    }

    #[test]
    fn test_rows_match_logger_text() {
        let dir = tempfile::tempdir().unwrap();
        let log = MetricsLog::create(dir.path().join("game_metrics.csv")).unwrap();

        let mut rows = sample_table().rows().to_vec();
        rows[1].is_terminal = Some(true);
        rows[2].manhattan[0] = 2.5;
        for row in &rows {
            log.append(row).unwrap();
        }

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "0,5,4,5,4,0,0,0");
        assert_eq!(lines[2], "1,4,3,6,3,1,0,1");
        assert_eq!(lines[3], "2,2.5,2,3,2,1,2,0");
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_metrics.csv");
        fs::write(&path, "stale contents\n").unwrap();

        let log = MetricsLog::create(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        log.append(&sample_table().rows()[0]).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with(HEADER));
    }

    #[test]
    fn test_open_appends_to_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_metrics.csv");
        let rows = sample_table().rows().to_vec();

        MetricsLog::create(&path).unwrap().append(&rows[0]).unwrap();
        MetricsLog::open(&path).append(&rows[1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_log_is_readable_by_loader() {
        let dir = tempfile::tempdir().unwrap();
        let log = MetricsLog::create(dir.path().join("game_metrics.csv")).unwrap();

        let mut rows = sample_table().rows().to_vec();
        rows[2].is_terminal = Some(true);
        for row in &rows {
            log.append(row).unwrap();
        }

        let table = dataset::load(log.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1].shortest_path, rows[1].shortest_path);
        assert_eq!(table.rows()[2].walls_placed, rows[2].walls_placed);
        assert_eq!(table.rows()[0].is_terminal, Some(false));
        assert_eq!(table.rows()[2].is_terminal, Some(true));
    }
}
