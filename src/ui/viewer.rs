//! Four-panel chart view for the terminal

use crate::visualization::{Panel, Series};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use std::path::Path;

const SERIES_COLORS: [Color; 2] = [Color::Cyan, Color::Yellow];

pub struct Viewer<'a> {
    panels: &'a [Panel],
    footer: String,
}

impl<'a> Viewer<'a> {
    pub fn new(panels: &'a [Panel], output: &Path) -> Self {
        Self {
            panels,
            footer: format!("Saved to {}  |  q / Esc: quit", output.display()),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(frame.area());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        let mut cells = Vec::with_capacity(4);
        for row in rows.iter() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            cells.extend(cols.iter().copied());
        }

        for (panel, area) in self.panels.iter().zip(cells) {
            self.render_panel(frame, area, panel);
        }

        frame.render_widget(
            Paragraph::new(self.footer.as_str()).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, panel: &Panel) {
        let x = panel.x_range();
        let y = panel.y_range();

        // Owned here so the datasets can borrow it
        let reference: Vec<(f64, f64)> = panel
            .reference_line
            .map(|v| vec![(x.start, v), (x.end, v)])
            .unwrap_or_default();

        let mut datasets: Vec<Dataset> = panel
            .series
            .iter()
            .zip(SERIES_COLORS)
            .map(|(series, color)| series_dataset(series, color))
            .collect();

        if !reference.is_empty() {
            datasets.insert(
                0,
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::DarkGray))
                    .data(&reference),
            );
        }

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(panel.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray)),
            )
            .x_axis(
                Axis::default()
                    .title(panel.x_label)
                    .style(Style::default().fg(Color::Gray))
                    .bounds([x.start, x.end])
                    .labels(vec![
                        Span::raw(format!("{:.0}", x.start)),
                        Span::raw(format!("{:.0}", (x.start + x.end) / 2.0)),
                        Span::raw(format!("{:.0}", x.end)),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(panel.y_label)
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y.start, y.end])
                    .labels(vec![
                        Span::raw(format!("{:.1}", y.start)),
                        Span::raw(format!("{:.1}", y.end)),
                    ]),
            );

        frame.render_widget(chart, area);
    }
}

fn series_dataset(series: &Series, color: Color) -> Dataset<'_> {
    Dataset::default()
        .name(series.label.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&series.points)
}
