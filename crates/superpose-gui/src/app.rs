//! Main application state and egui integration.

use eframe::egui;

use crate::panels;

/// The main Superpose application.
pub struct SuperposeApp {
    /// Which panel is currently selected in the sidebar.
    active_panel: Panel,
    /// State for the polarised panel.
    pub polarised_state: panels::polarised::PolarisedPanel,
    /// State for the complex-field panel.
    pub complex_state: panels::complex::ComplexPanel,
    /// State for the quiver panel.
    pub quiver_state: panels::quiver::QuiverPanel,
    /// State for the bases panel.
    pub bases_state: panels::bases::BasesPanel,
}

/// Sidebar navigation panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Polarised,
    Complex,
    Quiver,
    Bases,
}

impl Default for SuperposeApp {
    fn default() -> Self {
        Self {
            active_panel: Panel::Polarised,
            polarised_state: panels::polarised::PolarisedPanel::default(),
            complex_state: panels::complex::ComplexPanel::default(),
            quiver_state: panels::quiver::QuiverPanel::default(),
            bases_state: panels::bases::BasesPanel::default(),
        }
    }
}

impl eframe::App for SuperposeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sidebar navigation
        egui::SidePanel::left("nav_panel")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.heading("Superpose");
                ui.separator();

                ui.selectable_value(&mut self.active_panel, Panel::Polarised, "Polarised");
                ui.selectable_value(&mut self.active_panel, Panel::Complex, "Complex 1D");
                ui.selectable_value(&mut self.active_panel, Panel::Quiver, "Quiver 2D");
                ui.selectable_value(&mut self.active_panel, Panel::Bases, "Bases");
            });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| match self.active_panel {
            Panel::Polarised => self.polarised_state.ui(ui),
            Panel::Complex => self.complex_state.ui(ui),
            Panel::Quiver => self.quiver_state.ui(ui),
            Panel::Bases => self.bases_state.ui(ui),
        });
    }
}
