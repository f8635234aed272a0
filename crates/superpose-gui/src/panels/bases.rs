//! Basis panel: real and imaginary parts of $e^{ikx}$.

use egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use superpose_core::grid::Grid1d;
use superpose_core::superposition::basis_function;

#[derive(Debug)]
pub struct BasesPanel {
    /// Wavenumbers shown.
    pub k_values: Vec<f64>,
    grid: Option<Grid1d>,
}

impl Default for BasesPanel {
    fn default() -> Self {
        Self {
            k_values: vec![1.0, -1.0],
            grid: Grid1d::new(-10.0, 10.0, 200).ok(),
        }
    }
}

impl BasesPanel {
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Basis functions: real and imaginary parts");
        ui.separator();

        ui.horizontal(|ui| {
            for (i, k) in self.k_values.iter_mut().enumerate() {
                ui.add(egui::DragValue::new(k).speed(0.1).prefix(format!("k{} = ", i + 1)));
            }
            if ui.button("+").clicked() {
                self.k_values.push(2.0);
            }
            if self.k_values.len() > 1 && ui.button("-").clicked() {
                self.k_values.pop();
            }
        });
        ui.add_space(4.0);

        let Some(grid) = &self.grid else { return };
        Plot::new("bases_plot")
            .x_axis_label("x")
            .y_axis_label("Amplitude")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, &k) in self.k_values.iter().enumerate() {
                    let e = basis_function(k, grid);
                    let colour = super::mode_colour32(i);
                    let re: PlotPoints = grid.x.iter().zip(e.iter()).map(|(&x, z)| [x, z.re]).collect();
                    let im: PlotPoints = grid.x.iter().zip(e.iter()).map(|(&x, z)| [x, z.im]).collect();
                    plot_ui.line(Line::new(re).name(format!("Re[exp({k}ix)]")).color(colour));
                    plot_ui.line(
                        Line::new(im)
                            .name(format!("Im[exp({k}ix)]"))
                            .color(colour)
                            .style(LineStyle::dashed_dense()),
                    );
                }
            });
    }
}
