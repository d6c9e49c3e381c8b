//! The four panels of the metrics figure, independent of any backend

use crate::metrics::{Column, MetricsTable, Player};
use std::ops::Range;

/// Point marker drawn on each sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

/// One line on a panel
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub marker: Marker,
    /// `(turn, value)` in row order
    pub points: Vec<(f64, f64)>,
}

/// A single subplot
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
    /// Horizontal dashed line at this y value
    pub reference_line: Option<f64>,
}

/// Fraction of the data span added on each side of an axis
const AXIS_MARGIN: f64 = 0.05;

impl Panel {
    fn values(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    /// Padded x-axis range over every series
    pub fn x_range(&self) -> Range<f64> {
        padded(self.values().map(|(x, _)| *x))
    }

    /// Padded y-axis range, including the reference line
    pub fn y_range(&self) -> Range<f64> {
        padded(self.values().map(|(_, y)| *y).chain(self.reference_line))
    }
}

fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let span = max - min;
    if !span.is_finite() {
        return 0.0..1.0;
    }
    if span == 0.0 {
        return (min - 0.5)..(max + 0.5);
    }
    (min - span * AXIS_MARGIN)..(max + span * AXIS_MARGIN)
}

fn distance_panel(table: &MetricsTable, player: Player) -> Panel {
    Panel {
        title: format!("{}: Manhattan vs Shortest Path", player.label()),
        x_label: "Turn Number",
        y_label: "Distance to Goal",
        series: vec![
            Series {
                label: "Manhattan Distance".to_string(),
                marker: Marker::Circle,
                points: table.series(player, Column::Manhattan),
            },
            Series {
                label: "Shortest Path (BFS)".to_string(),
                marker: Marker::Square,
                points: table.series(player, Column::ShortestPath),
            },
        ],
        reference_line: None,
    }
}

fn both_players_panel(
    table: &MetricsTable,
    column: Column,
    title: &str,
    y_label: &'static str,
    suffix: &str,
) -> Panel {
    Panel {
        title: title.to_string(),
        x_label: "Turn Number",
        y_label,
        series: Player::ALL
            .iter()
            .zip([Marker::Circle, Marker::Square])
            .map(|(player, marker)| Series {
                label: format!("{} {}", player.label(), suffix),
                marker,
                points: table.series(*player, column),
            })
            .collect(),
        reference_line: None,
    }
}

/// Build the panels in grid order: top-left, top-right, bottom-left, bottom-right
///
/// The divergence panel reads the derived columns, so the table should
/// have been through [`MetricsTable::derive_divergence`].
pub fn build_panels(table: &MetricsTable) -> [Panel; 4] {
    let mut divergence = both_players_panel(
        table,
        Column::Divergence,
        "Divergence: Shows Wall Impact",
        "Shortest Path - Manhattan",
        "Divergence",
    );
    divergence.reference_line = Some(0.0);

    [
        distance_panel(table, Player::Zero),
        distance_panel(table, Player::One),
        divergence,
        both_players_panel(
            table,
            Column::WallsPlaced,
            "Wall Placement Over Time",
            "Walls Placed",
            "Walls",
        ),
    ]
}
