// Figure rendering: PNG and SVG through plotters, JSON through serde

use crate::color::{default_color, parse_color, CssColor};
use crate::figure::{Figure, Scatter};
use crate::{OutputFormat, RenderOptions};
use anyhow::{bail, Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

pub const DEFAULT_MODE: &str = "lines";
pub const DEFAULT_MARKER_SIZE: f64 = 6.0;
const LINE_WIDTH: u32 = 2;

/// Which primitives a trace is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawMode {
    pub lines: bool,
    pub markers: bool,
}

impl DrawMode {
    /// Parse a `+`-joined flag list such as `lines+markers`, or `none`
    pub fn parse(mode: &str) -> Result<Self> {
        let mut parsed = DrawMode::default();
        if mode.trim() == "none" {
            return Ok(parsed);
        }

        for flag in mode.split('+') {
            match flag.trim() {
                "lines" => parsed.lines = true,
                "markers" => parsed.markers = true,
                _ => bail!(
                    "Invalid mode '{}' (expected \"lines\", \"markers\" or \"lines+markers\")",
                    mode
                ),
            }
        }

        Ok(parsed)
    }
}

/// A trace with every default filled in, ready to draw
#[derive(Debug, Clone)]
struct PreparedTrace {
    points: Vec<(f64, f64)>,
    mode: DrawMode,
    color: CssColor,
    radius: i32,
    name: String,
}

/// Apply renderer defaults and reject bad modes, colours and lengths before
/// anything is drawn.
fn prepare(figure: &Figure) -> Result<Vec<PreparedTrace>> {
    figure
        .traces()
        .iter()
        .enumerate()
        .map(|(idx, trace)| prepare_trace(idx, trace))
        .collect()
}

fn prepare_trace(idx: usize, trace: &Scatter) -> Result<PreparedTrace> {
    if trace.x.len() != trace.y.len() {
        bail!(
            "X and Y data must have the same length (trace {}: x: {}, y: {})",
            idx,
            trace.x.len(),
            trace.y.len()
        );
    }

    let mode = DrawMode::parse(trace.mode.as_deref().unwrap_or(DEFAULT_MODE))
        .with_context(|| format!("Trace {}", idx))?;

    let color = match trace.marker.color.as_deref() {
        Some(c) => parse_color(c).with_context(|| format!("Trace {}", idx))?,
        None => default_color(idx),
    };

    let size = trace.marker.size.unwrap_or(DEFAULT_MARKER_SIZE);
    if !size.is_finite() || size < 0.0 {
        bail!("Trace {}: invalid marker size {}", idx, size);
    }

    Ok(PreparedTrace {
        points: trace.x.iter().copied().zip(trace.y.iter().copied()).collect(),
        mode,
        color,
        // Plotly sizes are diameters
        radius: ((size / 2.0).round() as i32).max(1),
        name: trace
            .name
            .clone()
            .unwrap_or_else(|| format!("trace {}", idx)),
    })
}

/// Render a figure in the requested output format
pub fn render_figure(figure: &Figure, options: &RenderOptions) -> Result<Vec<u8>> {
    match options.format {
        OutputFormat::Json => {
            let json = figure.to_json().context("Failed to serialize figure")?;
            Ok(json.into_bytes())
        }
        OutputFormat::Png => {
            check_size(options)?;
            render_png(figure, &prepare(figure)?, options)
        }
        OutputFormat::Svg => {
            check_size(options)?;
            render_svg(figure, &prepare(figure)?, options).map(String::into_bytes)
        }
    }
}

fn check_size(options: &RenderOptions) -> Result<()> {
    if options.width == 0 || options.height == 0 {
        bail!("Image size must be non-zero ({}x{})", options.width, options.height);
    }
    Ok(())
}

fn render_png(
    figure: &Figure,
    traces: &[PreparedTrace],
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(root, figure, traces)?;
    }

    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(&buffer, width, height, image::ColorType::Rgb8)
        .context("Failed to encode PNG")?;

    Ok(png_bytes)
}

fn render_svg(
    figure: &Figure,
    traces: &[PreparedTrace],
    options: &RenderOptions,
) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        draw(root, figure, traces)?;
    }
    Ok(svg)
}

fn draw<DB>(root: DrawingArea<DB, Shift>, figure: &Figure, traces: &[PreparedTrace]) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;

    let (x_range, y_range) = axis_ranges(traces);

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(figure.labels.title.as_deref().unwrap_or(""), ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .x_desc(figure.labels.x.as_deref().unwrap_or(""))
        .y_desc(figure.labels.y.as_deref().unwrap_or(""))
        .draw()
        .context("Failed to draw mesh")?;

    let show_legend = figure.show_legend();

    for trace in traces {
        let color = trace.color.to_plotters();
        let radius = trace.radius;
        let mut labelled = !show_legend;

        if trace.mode.lines {
            for run in finite_runs(&trace.points) {
                let mut series = chart
                    .draw_series(LineSeries::new(run, color.stroke_width(LINE_WIDTH)))
                    .context("Failed to draw line series")?;
                if !labelled {
                    series.label(trace.name.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                    });
                    labelled = true;
                }
            }
        }

        if trace.mode.markers {
            let mut series = chart
                .draw_series(
                    trace
                        .points
                        .iter()
                        .filter(|p| p.0.is_finite() && p.1.is_finite())
                        .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
                )
                .context("Failed to draw point series")?;
            if !labelled {
                series
                    .label(trace.name.as_str())
                    .legend(move |(x, y)| Circle::new((x + 10, y), radius.min(5), color.filled()));
            }
        }
    }

    if show_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .context("Failed to draw legend")?;
    }

    root.present().context("Failed to present drawing")?;
    Ok(())
}

/// Shared x/y ranges over every finite point, padded by 5%
fn axis_ranges(traces: &[PreparedTrace]) -> (Range<f64>, Range<f64>) {
    let finite = || {
        traces
            .iter()
            .flat_map(|t| t.points.iter())
            .filter(|p| p.0.is_finite() && p.1.is_finite())
    };

    let x_min = finite().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = finite().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = finite().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = finite().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    (padded(x_min, x_max), padded(y_min, y_max))
}

fn padded(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        // No data at all
        0.0..1.0
    } else if min == max {
        (min - 1.0)..(max + 1.0)
    } else {
        // Scale before subtracting so spans near f64::MAX stay finite
        let padding = max * 0.05 - min * 0.05;
        let (lo, hi) = (min - padding, max + padding);
        if lo.is_finite() && hi.is_finite() {
            lo..hi
        } else {
            min..max
        }
    }
}

/// Split a polyline at non-finite points so gaps are not bridged
fn finite_runs(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}
