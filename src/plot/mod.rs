//! Gradation curve plotting
//!
//! Renders the control points of a gradation as a percent-passing curve on
//! a logarithmic sieve-size axis, using the plotters SVG backend.

use miette::Diagnostic;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::evaluation::CurvePoint;

/// Errors that can occur while plotting
#[derive(Debug, Error, Diagnostic)]
pub enum PlotError {
    #[error("nothing to plot: the gradation curve has no points")]
    #[diagnostic(code(bailey::plot::empty_curve))]
    EmptyCurve,

    #[error("sieve size {0} mm cannot be placed on a log axis")]
    #[diagnostic(code(bailey::plot::non_positive_size))]
    NonPositiveSize(f64),

    #[error("unsupported plot file '{}'", .0.display())]
    #[diagnostic(
        code(bailey::plot::unsupported_extension),
        help("plots are written as SVG; use a .svg file name")
    )]
    UnsupportedExtension(PathBuf),

    #[error("drawing failed: {0}")]
    #[diagnostic(code(bailey::plot::drawing))]
    Drawing(String),

    #[error("cannot write plot file: {0}")]
    #[diagnostic(code(bailey::plot::io))]
    Io(#[from] std::io::Error),
}

/// Plot appearance
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub caption: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            caption: "Gradation Curve (control points)".to_string(),
        }
    }
}

impl PlotOptions {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

/// Render the curve as an SVG document
pub fn render_svg(curve: &[CurvePoint], options: &PlotOptions) -> Result<String, PlotError> {
    let (x_min, x_max) = size_range(curve)?;
    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::Drawing(format!("{:?}", e)))?;

        // Pad the axis so the end points are not drawn on the frame
        let mut chart = ChartBuilder::on(&root)
            .caption(&options.caption, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d((x_min * 0.8..x_max * 1.25).log_scale(), 0.0f64..100.0f64)
            .map_err(|e| PlotError::Drawing(format!("{:?}", e)))?;

        chart
            .configure_mesh()
            .x_desc("Sieve Size (mm) - Log Scale")
            .y_desc("Percent Passing (%)")
            .x_label_formatter(&|x| format!("{:.2}", x))
            .draw()
            .map_err(|e| PlotError::Drawing(format!("{:?}", e)))?;

        let points: Vec<(f64, f64)> = curve.iter().map(|p| (p.size_mm, p.passing)).collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(format!("{:?}", e)))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 4, BLUE.filled())),
            )
            .map_err(|e| PlotError::Drawing(format!("{:?}", e)))?;

        root.present()
            .map_err(|e| PlotError::Drawing(format!("{:?}", e)))?;
    }

    Ok(svg)
}

/// Render the curve and write it to `path` (must end in `.svg`)
pub fn write_svg(
    curve: &[CurvePoint],
    options: &PlotOptions,
    path: impl AsRef<Path>,
) -> Result<(), PlotError> {
    let path = path.as_ref();
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return Err(PlotError::UnsupportedExtension(path.to_path_buf()));
    }

    let svg = render_svg(curve, options)?;
    std::fs::write(path, svg)?;
    tracing::info!(path = %path.display(), points = curve.len(), "gradation plot written");
    Ok(())
}

/// Smallest and largest sieve size on the curve
fn size_range(curve: &[CurvePoint]) -> Result<(f64, f64), PlotError> {
    if curve.is_empty() {
        return Err(PlotError::EmptyCurve);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in curve {
        if !(point.size_mm > 0.0 && point.size_mm.is_finite()) {
            return Err(PlotError::NonPositiveSize(point.size_mm));
        }
        min = min.min(point.size_mm);
        max = max.max(point.size_mm);
    }

    Ok((min, max))
}
