//! Quiver 2D panel: four basis modes combined by slider coefficients.

use egui::Ui;
use egui_plot::{Arrows, Plot, PlotPoints};
use num_complex::Complex64;

use superpose_core::presets::{preset, Scene};
use superpose_core::quiver::{QuiverBasis, QuiverField};

/// State for the quiver panel.
pub struct QuiverPanel {
    basis: Option<QuiverBasis>,
    pub coeffs: Vec<Complex64>,
    /// Cached field for the current coefficients.
    field: Option<QuiverField>,
    pub error_message: Option<String>,
}

impl Default for QuiverPanel {
    fn default() -> Self {
        let mut panel = Self { basis: None, coeffs: Vec::new(), field: None, error_message: None };
        match preset("four-orientation") {
            Ok(Scene::Quiver { modes, grid }) => {
                panel.coeffs = modes.iter().map(|m| m.amplitude).collect();
                panel.basis = Some(QuiverBasis::new(&modes, grid));
                panel.recompute();
            }
            Ok(other) => panel.error_message = Some(format!("Unexpected scene '{}'", other.kind())),
            Err(e) => panel.error_message = Some(e.to_string()),
        }
        panel
    }
}

impl QuiverPanel {
    fn recompute(&mut self) {
        let Some(basis) = &self.basis else { return };
        match basis.combine(&self.coeffs) {
            Ok(field) => {
                self.field = Some(field);
                self.error_message = None;
            }
            Err(e) => {
                log::error!("Failed to combine basis fields: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Arrow origins and tips, scaled so the longest arrow spans 90% of a mesh cell.
    pub fn arrows(&self) -> Option<(Vec<[f64; 2]>, Vec<[f64; 2]>)> {
        let field = self.field.as_ref()?;
        let (_, nx) = field.x.dim();
        let width = field.x.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b))
            - field.x.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let spacing = width / (nx.max(2) - 1) as f64;
        let max = field.max_magnitude();
        let scale = if max > 0.0 { 0.9 * spacing / max } else { 0.0 };

        Some(
            field
                .rows()
                .map(|[x, y, u, v]| ([x, y], [x + scale * u, y + scale * v]))
                .unzip(),
        )
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("2D electric field");
        ui.separator();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_max_width(260.0);
                let mut changed = false;
                for (i, j) in self.coeffs.iter_mut().enumerate() {
                    changed |= super::complex_sliders(ui, &format!("j{}", i + 1), j, -2.0..=2.0);
                }
                if changed {
                    self.recompute();
                }
                if let Some(field) = &self.field {
                    ui.add_space(8.0);
                    ui.label(format!("max |E| = {:.3}", field.max_magnitude()));
                }
                if let Some(err) = &self.error_message {
                    ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
                }
            });

            ui.separator();

            if let Some((origins, tips)) = self.arrows() {
                let origins: PlotPoints = origins.into_iter().collect();
                let tips: PlotPoints = tips.into_iter().collect();
                Plot::new("quiver_plot")
                    .data_aspect(1.0)
                    .x_axis_label("x")
                    .y_axis_label("y")
                    .show(ui, |plot_ui| {
                        plot_ui.arrows(Arrows::new(origins, tips).color(super::mode_colour32(0)));
                    });
            }
        });
    }
}
