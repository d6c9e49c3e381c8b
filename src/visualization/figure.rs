//! 2x2 metrics figure rendered to a PNG

use super::panels::{Marker, Panel};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Series colors, in series order
const PALETTE: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

/// Resolved through the system font database
const FONT: &str = "sans-serif";

/// Sizes in points, converted to pixels at the configured DPI
const TITLE_PT: f64 = 12.0;
const LABEL_PT: f64 = 10.0;
const TICK_PT: f64 = 9.0;
const LINE_PT: f64 = 1.5;
const MARKER_PT: f64 = 3.0;

fn plot_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Plot(err.to_string())
}

fn font_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Plot(format!(
        "no usable {} font ({}); install a TrueType font such as DejaVu Sans",
        FONT, err
    ))
}

/// Fail with a readable error before drawing if text cannot be rendered
fn check_font(scale: Scale) -> Result<()> {
    (FONT, scale.px(TICK_PT))
        .into_font()
        .box_size("0")
        .map(|_| ())
        .map_err(font_err)
}

/// Pixel sizes for one rendering
#[derive(Debug, Clone, Copy)]
struct Scale {
    dpi: f64,
}

impl Scale {
    fn px(&self, pt: f64) -> u32 {
        (pt * self.dpi / 72.0).round().max(1.0) as u32
    }
}

pub struct FigurePlotter;

impl FigurePlotter {
    /// Render the panels to `config.output_path`, replacing any existing file
    pub fn plot(panels: &[Panel], config: &ReportConfig) -> Result<()> {
        let root = BitMapBackend::new(&config.output_path, config.pixel_size()).into_drawing_area();
        Self::draw(root, panels, config)?;

        tracing::info!("Figure written to {}", config.output_path.display());
        Ok(())
    }

    /// Render the panels into an RGB pixel buffer instead of a file
    pub fn render_to_buffer(panels: &[Panel], config: &ReportConfig) -> Result<Vec<u8>> {
        let (w, h) = config.pixel_size();
        let mut buffer = vec![0u8; w as usize * h as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            Self::draw(root, panels, config)?;
        }
        Ok(buffer)
    }

    fn draw<DB: DrawingBackend>(
        root: DrawingArea<DB, Shift>,
        panels: &[Panel],
        config: &ReportConfig,
    ) -> Result<()> {
        config.validate()?;
        let scale = Scale {
            dpi: config.dpi as f64,
        };
        check_font(scale)?;

        root.fill(&WHITE).map_err(plot_err)?;

        let areas = root.split_evenly((2, 2));
        for (panel, area) in panels.iter().zip(areas.iter()) {
            tracing::debug!("Drawing panel '{}'", panel.title);
            Self::draw_panel(panel, area, scale)?;
        }

        root.present().map_err(plot_err)?;
        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        panel: &Panel,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> Result<()> {
        let x_range = panel.x_range();
        let y_range = panel.y_range();

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, scale.px(TITLE_PT)))
            .margin(scale.px(8.0))
            .x_label_area_size(scale.px(28.0))
            .y_label_area_size(scale.px(36.0))
            .build_cartesian_2d(x_range.clone(), y_range)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(panel.x_label)
            .y_desc(panel.y_label)
            .axis_desc_style((FONT, scale.px(LABEL_PT)))
            .label_style((FONT, scale.px(TICK_PT)))
            .bold_line_style(&BLACK.mix(0.3))
            .light_line_style(&WHITE.mix(0.0))
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()
            .map_err(plot_err)?;

        if let Some(y) = panel.reference_line {
            let style = BLACK.mix(0.3).stroke_width(scale.px(1.0));
            chart
                .draw_series(dashes(x_range).map(|(x0, x1)| {
                    PathElement::new(vec![(x0, y), (x1, y)], style)
                }))
                .map_err(plot_err)?;
        }

        let line_width = scale.px(LINE_PT);
        let r = (scale.px(MARKER_PT) / 2).max(1) as i32;

        for (series, color) in panel.series.iter().zip(PALETTE.iter().copied()) {
            let line = color.stroke_width(line_width);
            let anno = chart
                .draw_series(LineSeries::new(series.points.iter().copied(), line))
                .map_err(plot_err)?
                .label(series.label.as_str());

            match series.marker {
                Marker::Circle => {
                    anno.legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (20, 0)], line)
                            + Circle::new((10, 0), r, color.filled())
                    });
                    chart
                        .draw_series(series.points.iter().map(|&p| {
                            EmptyElement::at(p) + Circle::new((0, 0), r, color.filled())
                        }))
                        .map_err(plot_err)?;
                }
                Marker::Square => {
                    anno.legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(0, 0), (20, 0)], line)
                            + Rectangle::new([(10 - r, -r), (10 + r, r)], color.filled())
                    });
                    chart
                        .draw_series(series.points.iter().map(|&p| {
                            EmptyElement::at(p)
                                + Rectangle::new([(-r, -r), (r, r)], color.filled())
                        }))
                        .map_err(plot_err)?;
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT, scale.px(TICK_PT)))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .draw()
            .map_err(plot_err)?;

        Ok(())
    }
}

/// Dash segments covering `range`, dash and gap the same length
fn dashes(range: std::ops::Range<f64>) -> impl Iterator<Item = (f64, f64)> {
    const DASHES: usize = 40;
    let step = (range.end - range.start) / (DASHES * 2) as f64;
    (0..DASHES).map(move |i| {
        let x0 = range.start + step * (2 * i) as f64;
        (x0, x0 + step)
    })
}
