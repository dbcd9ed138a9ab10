//! Cartesian Plotting
//!
//! Growth curves are drawn through the [`PlotSurface`] trait, which exposes the
//! handful of operations the pipeline needs: draw axes, plot points or a
//! series, annotate, block until the output is final, and dispose. The caller
//! owns the surface and disposes of it when done.
//!
//! [`SvgPlot`] is the provided surface. It maps Cartesian coordinates, with y
//! growing upwards, onto a canvas whose origin sits a configurable number of
//! pixels from the bottom-left corner. Drawing calls are recorded as
//! [`PlotElement`]s and rendered with `plotters` onto an `SVGBackend` when the
//! plot is blocked.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::aggregate::AverageSeries;
use crate::config::{PlotConfig, MIN_CANVAS_SIZE};
use crate::error::{GrowthError, Result};

/// Free space kept between a fitted curve and the canvas edge, in pixels.
const FIT_MARGIN: f64 = 30.0;

/// Canvas background unless overridden.
pub const HONEYDEW: RGBColor = RGBColor(240, 255, 240);

/// Axis appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesStyle {
    pub line_width: u32,
    pub colour: RGBColor,
    /// Tick length in pixels; 0 draws no ticks.
    pub tick_length: f64,
    /// Distance between x ticks in plot units.
    pub tick_interval_x: f64,
    /// Distance between y ticks in plot units.
    pub tick_interval_y: f64,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            line_width: 1,
            colour: BLACK,
            tick_length: 0.0,
            tick_interval_x: 1.0,
            tick_interval_y: 1.0,
        }
    }
}

/// Drawing operations for a 2-D Cartesian plot.
pub trait PlotSurface {
    fn draw_axes(&mut self, style: &AxesStyle);

    /// Plot a filled point centred on `(x, y)`; `diameter` is in pixels.
    fn plot_point(&mut self, x: f64, y: f64, diameter: f64, colour: RGBColor);

    fn plot_series(&mut self, points: &[(f64, f64)], diameter: f64, colour: RGBColor) {
        for &(x, y) in points {
            self.plot_point(x, y, diameter, colour);
        }
    }

    /// Place `text` with its top-left corner at `(x, y)`.
    fn annotate(&mut self, text: &str, x: f64, y: f64, size: u32, colour: RGBColor);

    /// Wait until the plot is complete; for file-backed surfaces, flush it.
    fn block(&mut self) -> Result<()>;

    fn dispose(self)
    where
        Self: Sized;
}

/// One recorded drawing call of an [`SvgPlot`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlotElement {
    Axes(AxesStyle),
    Point {
        x: f64,
        y: f64,
        diameter: f64,
        colour: RGBColor,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size: u32,
        colour: RGBColor,
    },
}

/// A plot rendered as an SVG document.
#[derive(Debug, Clone)]
pub struct SvgPlot {
    title: String,
    path: PathBuf,
    width: u32,
    height: u32,
    origin_x: f64,
    origin_y: f64,
    scale_x: f64,
    scale_y: f64,
    background: RGBColor,
    elements: Vec<PlotElement>,
}

impl SvgPlot {
    /// Create an empty plot with explicit scales (pixels per plot unit).
    pub fn new(
        title: impl Into<String>,
        path: impl Into<PathBuf>,
        config: &PlotConfig,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<Self> {
        if config.width <= MIN_CANVAS_SIZE || config.height <= MIN_CANVAS_SIZE {
            return Err(GrowthError::InvalidParameter(
                "specified canvas is too small".to_string(),
            ));
        }
        if !(scale_x > 0.0) {
            return Err(GrowthError::InvalidParameter(format!(
                "scale_x must be positive, got {}",
                scale_x
            )));
        }
        if !(scale_y > 0.0) {
            return Err(GrowthError::InvalidParameter(format!(
                "scale_y must be positive, got {}",
                scale_y
            )));
        }

        Ok(Self {
            title: title.into(),
            path: path.into(),
            width: config.width,
            height: config.height,
            origin_x: f64::from(config.origin_x),
            origin_y: f64::from(config.origin_y),
            scale_x,
            scale_y,
            background: HONEYDEW,
            elements: Vec::new(),
        })
    }

    /// Create a plot scaled so `num_points` x values and y values up to
    /// `max_y` fill the quadrant right of and above the origin.
    pub fn fitted(
        title: impl Into<String>,
        path: impl Into<PathBuf>,
        config: &PlotConfig,
        num_points: usize,
        max_y: u64,
    ) -> Result<Self> {
        config.validate()?;

        let usable_x = (f64::from(config.width) - f64::from(config.origin_x) - FIT_MARGIN).max(1.0);
        let usable_y = (f64::from(config.height) - f64::from(config.origin_y) - FIT_MARGIN).max(1.0);
        let scale_x = usable_x / num_points.max(1) as f64;
        let scale_y = usable_y / max_y.max(1) as f64;

        Self::new(title, path, config, scale_x, scale_y)
    }

    pub fn with_background(mut self, colour: RGBColor) -> Self {
        self.background = colour;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drawing calls recorded so far, in order.
    pub fn elements(&self) -> &[PlotElement] {
        &self.elements
    }

    /// Canvas pixel position of plot coordinate `(x, y)`.
    pub fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        let cx = self.origin_x + x * self.scale_x;
        let cy = f64::from(self.height) - (self.origin_y + y * self.scale_y);
        (cx, cy)
    }

    /// Visible plot-unit range along x and y.
    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let min_x = -self.origin_x / self.scale_x;
        let max_x = (f64::from(self.width) - self.origin_x) / self.scale_x;
        let min_y = -self.origin_y / self.scale_y;
        let max_y = (f64::from(self.height) - self.origin_y) / self.scale_y;
        ((min_x, max_x), (min_y, max_y))
    }

    /// Axis lines through the origin followed by one segment per tick, in
    /// plot units.
    pub fn axis_segments(&self, style: &AxesStyle) -> Vec<Vec<(f64, f64)>> {
        let ((min_x, max_x), (min_y, max_y)) = self.bounds();
        let mut segments = vec![
            vec![(min_x, 0.0), (max_x, 0.0)],
            vec![(0.0, min_y), (0.0, max_y)],
        ];

        if style.tick_length <= 0.0 {
            return segments;
        }
        // Ticks are sized in pixels, so convert the half length per axis.
        let half_x = style.tick_length / 2.0 / self.scale_x;
        let half_y = style.tick_length / 2.0 / self.scale_y;

        if style.tick_interval_x > 0.0 {
            for x in tick_positions(min_x, max_x, style.tick_interval_x) {
                segments.push(vec![(x, -half_y), (x, half_y)]);
            }
        }
        if style.tick_interval_y > 0.0 {
            for y in tick_positions(min_y, max_y, style.tick_interval_y) {
                segments.push(vec![(-half_x, y), (half_x, y)]);
            }
        }

        segments
    }

    /// Render the recorded elements into an SVG document held in memory.
    pub fn to_svg(&self) -> Result<String> {
        let mut buffer = String::new();
        self.render(SVGBackend::with_string(&mut buffer, (self.width, self.height)).into_drawing_area())?;
        Ok(buffer)
    }

    fn render<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&self.background).map_err(plot_error)?;

        let ((min_x, max_x), (min_y, max_y)) = self.bounds();
        let mut chart = ChartBuilder::on(&root)
            .build_cartesian_2d(min_x..max_x, min_y..max_y)
            .map_err(plot_error)?;

        for element in &self.elements {
            match element {
                PlotElement::Axes(style) => {
                    let x_lines = tick_positions(min_x, max_x, style.tick_interval_x).len();
                    let y_lines = tick_positions(min_y, max_y, style.tick_interval_y).len();
                    chart
                        .configure_mesh()
                        .x_labels(x_lines.max(2))
                        .y_labels(y_lines.max(2))
                        .bold_line_style(style.colour.mix(0.1))
                        .light_line_style(TRANSPARENT)
                        .draw()
                        .map_err(plot_error)?;

                    let line = style.colour.stroke_width(style.line_width);
                    chart
                        .draw_series(
                            self.axis_segments(style)
                                .into_iter()
                                .map(|points| PathElement::new(points, line)),
                        )
                        .map_err(plot_error)?;
                }
                PlotElement::Point {
                    x,
                    y,
                    diameter,
                    colour,
                } => {
                    let radius = (diameter / 2.0).round().max(1.0) as i32;
                    chart
                        .draw_series(std::iter::once(Circle::new((*x, *y), radius, colour.filled())))
                        .map_err(plot_error)?;
                }
                PlotElement::Text {
                    text,
                    x,
                    y,
                    size,
                    colour,
                } => {
                    let style = ("sans-serif", f64::from(*size)).into_font().color(colour);
                    chart
                        .draw_series(std::iter::once(Text::new(text.clone(), (*x, *y), style)))
                        .map_err(plot_error)?;
                }
            }
        }

        let title_style = ("sans-serif", 14.0).into_font().color(&BLACK);
        root.draw(&Text::new(self.title.clone(), (6, 6), title_style))
            .map_err(plot_error)?;
        root.present().map_err(plot_error)?;
        Ok(())
    }
}

impl PlotSurface for SvgPlot {
    fn draw_axes(&mut self, style: &AxesStyle) {
        self.elements.push(PlotElement::Axes(style.clone()));
    }

    fn plot_point(&mut self, x: f64, y: f64, diameter: f64, colour: RGBColor) {
        self.elements.push(PlotElement::Point {
            x,
            y,
            diameter,
            colour,
        });
    }

    fn annotate(&mut self, text: &str, x: f64, y: f64, size: u32, colour: RGBColor) {
        self.elements.push(PlotElement::Text {
            text: text.to_string(),
            x,
            y,
            size,
            colour,
        });
    }

    fn block(&mut self) -> Result<()> {
        let root = SVGBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
        self.render(root)?;
        info!(path = %self.path.display(), elements = self.elements.len(), "Plot written");
        Ok(())
    }

    fn dispose(self) {}
}

/// Draw one growth curve: axes, one red point per prefix length and a legend
/// reading `T(n) = <label>`.
pub fn plot_average_series<S: PlotSurface>(surface: &mut S, series: &AverageSeries, label: &str) {
    let n = series.len() as f64;
    let max_y = series.max() as f64;

    surface.draw_axes(&AxesStyle {
        tick_length: 4.0,
        tick_interval_x: tick_interval(n),
        tick_interval_y: tick_interval(max_y),
        ..AxesStyle::default()
    });

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(x, &y)| (x as f64, y as f64))
        .collect();
    surface.plot_series(&points, 6.0, RED);

    surface.annotate("T(n)", 1.0, max_y, 9, BLACK);
    surface.annotate("n", n, max_y * 0.02, 9, BLACK);
    surface.annotate("Legend:", n * 0.6, max_y * 0.2, 12, BLUE);
    surface.annotate(&format!("T(n) = {}", label), n * 0.6, max_y * 0.14, 12, RED);
}

/// Tick spacing for values in `[0, extent]`: the step between the key points
/// plotters picks for at most ten labels, never below 1.
pub fn tick_interval(extent: f64) -> f64 {
    if !(extent > 10.0) {
        return 1.0;
    }
    let points = RangedCoordf64::from(0.0..extent).key_points(10usize);
    match points.as_slice() {
        [first, second, ..] => (second - first).max(1.0),
        _ => 1.0,
    }
}

/// Nonzero multiples of `interval` within `[min, max]`.
fn tick_positions(min: f64, max: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) {
        return Vec::new();
    }
    let first = (min / interval).ceil() as i64;
    let last = (max / interval).floor() as i64;
    (first..=last)
        .filter(|&k| k != 0)
        .map(|k| k as f64 * interval)
        .collect()
}

fn plot_error(e: impl Display) -> GrowthError {
    GrowthError::Plot(e.to_string())
}
