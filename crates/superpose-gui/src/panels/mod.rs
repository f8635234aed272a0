//! GUI panels for the Superpose dashboard.

pub mod bases;
pub mod complex;
pub mod polarised;
pub mod quiver;

use egui::Color32;

/// Palette entry of mode `idx` as an egui colour.
pub fn mode_colour32(idx: usize) -> Color32 {
    let [r, g, b] = superpose_core::animation::mode_colour(idx).1;
    Color32::from_rgb(r, g, b)
}

/// Real/imaginary slider pair for one complex coefficient.
pub fn complex_sliders(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut num_complex::Complex64,
    range: std::ops::RangeInclusive<f64>,
) -> bool {
    let re = ui.add(
        egui::Slider::new(&mut value.re, range.clone())
            .step_by(0.1)
            .text(format!("{label} real")),
    );
    let im = ui.add(
        egui::Slider::new(&mut value.im, range)
            .step_by(0.1)
            .text(format!("{label} imag")),
    );
    re.changed() || im.changed()
}
