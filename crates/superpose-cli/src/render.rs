//! Bitmap rendering with plotters: the complex-field GIF and the quiver PNG.

use std::error::Error;
use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use superpose_core::animation::{mode_colour, ComplexAnimation, Direction};
use superpose_core::grid::linspace;
use superpose_core::quiver::QuiverField;

use crate::runner::RenderOptions;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// Arrowhead half-angle in radians.
const HEAD_ANGLE: f64 = 0.45;
/// Arrowhead length as a fraction of the arrow.
const HEAD_FRACTION: f64 = 0.3;

fn rgb(idx: usize) -> RGBColor {
    let [r, g, b] = mode_colour(idx).1;
    RGBColor(r, g, b)
}

/// Render the three-panel complex-field animation to an animated GIF.
pub fn write_complex_gif(anim: &ComplexAnimation, path: &Path, options: &RenderOptions) -> Result<()> {
    draw_complex_gif(anim, path, options)
        .map_err(|e| anyhow::anyhow!("GIF rendering failed ({}): {}", path.display(), e))?;
    println!("Animation written to: {}", path.display());
    Ok(())
}

fn draw_complex_gif(anim: &ComplexAnimation, path: &Path, options: &RenderOptions) -> DrawResult {
    let delay_ms = 1000 / options.fps.max(1);
    let root = BitMapBackend::gif(path, (options.width, options.height), delay_ms)?.into_drawing_area();

    let n = anim.frames.first().map_or(0, |f| f.total.len());
    let xs: Vec<f64> = linspace(anim.x_range[0], anim.x_range[1], n).to_vec();
    let [right, left] = panel_modes(anim);

    for frame in &anim.frames {
        root.fill(&WHITE)?;
        let panels = root.split_evenly((3, 1));

        let caption = format!("Right-moving and static modes, t={:.2}", frame.t);
        let series: Vec<_> = right.iter().map(|&i| (&frame.parts[i], rgb(i))).collect();
        draw_panel(&panels[0], &caption, &xs, &series, anim.x_range, options.limit)?;

        let series: Vec<_> = left.iter().map(|&i| (&frame.parts[i], rgb(i))).collect();
        draw_panel(&panels[1], "Left-moving modes", &xs, &series, anim.x_range, options.limit)?;

        draw_panel(&panels[2], "Total", &xs, &[(&frame.total, BLACK)], anim.x_range, options.limit)?;

        root.present()?;
    }
    log::debug!("Encoded {} GIF frames at {} ms", anim.frames.len(), delay_ms);
    Ok(())
}

/// Mode indices drawn in the first and second panel. Modes with `k = 0`
/// share the first panel with the right-moving ones.
fn panel_modes(anim: &ComplexAnimation) -> [Vec<usize>; 2] {
    let mut first = anim.modes_moving(Direction::Right);
    first.extend(anim.modes_moving(Direction::Static));
    first.sort_unstable();
    [first, anim.modes_moving(Direction::Left)]
}

type Series<'a> = (&'a ndarray::Array1<num_complex::Complex64>, RGBColor);

/// One panel: real part solid, imaginary part dashed.
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    caption: &str,
    xs: &[f64],
    series: &[Series<'_>],
    x_range: [f64; 2],
    limit: f64,
) -> DrawResult {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(8)
        .x_label_area_size(25)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range[0]..x_range[1], -limit..limit)?;

    chart.configure_mesh().x_desc("x").y_desc("E").draw()?;

    for &(values, colour) in series {
        let re = xs.iter().zip(values.iter()).map(|(&x, z)| (x, z.re));
        let im = xs.iter().zip(values.iter()).map(|(&x, z)| (x, z.im));
        chart
            .draw_series(LineSeries::new(re, colour.stroke_width(2)))?
            .label("Re")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], colour));
        chart
            .draw_series(DashedLineSeries::new(im, 6, 4, colour.stroke_width(1)))?
            .label("Im")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 6, y)], colour));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Render a quiver field to a PNG, arrows scaled to the mesh spacing.
pub fn write_quiver_png(field: &QuiverField, path: &Path, options: &RenderOptions) -> Result<()> {
    draw_quiver(field, path, options)
        .map_err(|e| anyhow::anyhow!("PNG rendering failed ({}): {}", path.display(), e))?;
    println!("Quiver plot written to: {}", path.display());
    Ok(())
}

fn draw_quiver(field: &QuiverField, path: &Path, options: &RenderOptions) -> DrawResult {
    // Equal aspect: a square canvas over a square range.
    let side = options.width.min(options.height);
    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&WHITE)?;

    let bounds = |a: &ndarray::Array2<f64>| {
        a.iter().fold([f64::INFINITY, f64::NEG_INFINITY], |[lo, hi], &v| [lo.min(v), hi.max(v)])
    };
    let [x0, x1] = bounds(&field.x);
    let [y0, y1] = bounds(&field.y);
    let lo = x0.min(y0);
    let hi = x1.max(y1);

    let (ny, nx) = field.x.dim();
    let spacing = (hi - lo) / (nx.max(ny).max(2) - 1) as f64;
    let max = field.max_magnitude();
    let scale = if max > 0.0 { 0.9 * spacing / max } else { 0.0 };
    let pad = spacing;

    let mut chart = ChartBuilder::on(&root)
        .caption("Re E(x, y)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d((lo - pad)..(hi + pad), (lo - pad)..(hi + pad))?;

    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

    let colour = rgb(0);
    chart.draw_series(
        field
            .rows()
            .filter(|[_, _, u, v]| u.hypot(*v) > 0.0)
            .flat_map(|[x, y, u, v]| arrow_paths(x, y, scale * u, scale * v))
            .map(|path| PathElement::new(path, colour)),
    )?;

    root.present()?;
    Ok(())
}

/// Shaft and two head strokes of an arrow from `(x, y)` along `(dx, dy)`.
fn arrow_paths(x: f64, y: f64, dx: f64, dy: f64) -> [Vec<(f64, f64)>; 3] {
    let tip = (x + dx, y + dy);
    let len = dx.hypot(dy) * HEAD_FRACTION;
    let back = dy.atan2(dx) + std::f64::consts::PI;
    let barb = |angle: f64| (tip.0 + len * angle.cos(), tip.1 + len * angle.sin());
    [
        vec![(x, y), tip],
        vec![tip, barb(back + HEAD_ANGLE)],
        vec![tip, barb(back - HEAD_ANGLE)],
    ]
}
