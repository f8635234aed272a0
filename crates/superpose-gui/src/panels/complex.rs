//! Complex 1D panel: two counter-propagating modes with coefficient and time sliders.
//!
//! No reality constraint is imposed; the panel shows the complex sum
//! $j_1 e^{i(x - t)} + j_2 e^{i(-x - t)}$ directly.

use egui::{Color32, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};
use num_complex::Complex64;

use superpose_core::grid::Grid1d;
use superpose_core::superposition::{complex_parts, ComplexParts};
use superpose_core::types::{FieldConvention, Mode1d, DEFAULT_WAVE_SPEED};

/// Half-width of the sampled x range.
const HALF_WIDTH: f64 = 10.0;
const POINTS: usize = 200;
const Y_LIMIT: f64 = 3.0;

/// State for the complex-field panel.
#[derive(Debug)]
pub struct ComplexPanel {
    /// Coefficient of the right-moving mode (`k = 1`).
    pub j1: Complex64,
    /// Coefficient of the left-moving mode (`k = -1`).
    pub j2: Complex64,
    pub t: f64,
    grid: Option<Grid1d>,
}

impl Default for ComplexPanel {
    fn default() -> Self {
        Self {
            j1: Complex64::new(2.0, 0.0),
            j2: Complex64::new(1.0, 0.0),
            t: 0.0,
            grid: Grid1d::new(-HALF_WIDTH, HALF_WIDTH, POINTS).ok(),
        }
    }
}

impl ComplexPanel {
    fn modes(&self) -> [Mode1d; 2] {
        [Mode1d::scalar(1.0, self.j1), Mode1d::scalar(-1.0, self.j2)]
    }

    /// Mode phasors and their sum at the current slider settings.
    pub fn parts(&self) -> Option<ComplexParts> {
        let grid = self.grid.as_ref()?;
        match complex_parts(&self.modes(), grid, self.t, DEFAULT_WAVE_SPEED, FieldConvention::Complex) {
            Ok(parts) => Some(parts),
            Err(e) => {
                log::error!("Failed to evaluate field: {}", e);
                None
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Complex 1D field");
        ui.separator();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_max_width(260.0);
                super::complex_sliders(ui, "j1 (k=1)", &mut self.j1, -10.0..=10.0);
                super::complex_sliders(ui, "j2 (k=-1)", &mut self.j2, -10.0..=10.0);
                ui.add(egui::Slider::new(&mut self.t, -10.0..=10.0).step_by(0.05).text("time t"));
                if ui.button("Reset").clicked() {
                    *self = Self::default();
                }
            });

            ui.separator();

            ui.vertical(|ui| {
                let Some(parts) = self.parts() else {
                    ui.label("Field could not be evaluated.");
                    return;
                };
                let Some(grid) = self.grid.as_ref() else {
                    return;
                };
                ui.label(format!("E(x, t): modes and total, t={:.2}", parts.t));

                let height = (ui.available_height() / 3.0 - 8.0).max(120.0);
                let (blue, red) = (Color32::from_rgb(31, 119, 180), Color32::from_rgb(214, 39, 40));
                let dotted = LineStyle::dotted_dense();
                let panels = [
                    ("mode_1_plot", "Mode 1", &parts.parts[0], dotted, blue, red),
                    ("mode_2_plot", "Mode 2", &parts.parts[1], dotted, blue, red),
                    ("total_plot", "Total", &parts.total, LineStyle::Solid, Color32::BLUE, Color32::RED),
                ];
                for (id, label, values, re_style, re_colour, im_colour) in panels {
                    let re: PlotPoints = grid.x.iter().zip(values.iter()).map(|(&x, z)| [x, z.re]).collect();
                    let im: PlotPoints = grid.x.iter().zip(values.iter()).map(|(&x, z)| [x, z.im]).collect();
                    Plot::new(id)
                        .height(height)
                        .y_axis_label(label)
                        .include_x(-HALF_WIDTH)
                        .include_x(HALF_WIDTH)
                        .include_y(-Y_LIMIT)
                        .include_y(Y_LIMIT)
                        .allow_drag(false)
                        .allow_zoom(false)
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(
                                Line::new(re)
                                    .name(format!("Re[{label}]"))
                                    .color(re_colour)
                                    .style(re_style)
                                    .width(2.0),
                            );
                            plot_ui.line(
                                Line::new(im)
                                    .name(format!("Im[{label}]"))
                                    .color(im_colour)
                                    .style(LineStyle::dashed_dense())
                                    .width(2.0),
                            );
                        });
                }
            });
        });
    }
}
