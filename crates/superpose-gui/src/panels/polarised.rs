//! Polarised panel: playback of a precomputed polarised 1D animation.

use egui::{Color32, Ui};
use egui_plot::{Arrows, Legend, Line, Plot, PlotPoints};

use superpose_core::animation::PolarisedAnimation;
use superpose_core::presets::{preset, Scene, PRESETS};

/// Seconds each frame stays on screen during playback.
const FRAME_SECONDS: f64 = 0.06;

/// State for the polarised animation panel.
pub struct PolarisedPanel {
    pub preset: &'static str,
    /// Polarised preset names, listed once at start-up.
    preset_names: Vec<&'static str>,
    animation: Option<PolarisedAnimation>,
    pub frame: usize,
    pub playing: bool,
    /// Time (egui clock) of the last frame advance.
    last_advance: f64,
    pub error_message: Option<String>,
}

impl Default for PolarisedPanel {
    fn default() -> Self {
        let mut panel = Self {
            preset: "circular",
            preset_names: polarised_presets().collect(),
            animation: None,
            frame: 0,
            playing: false,
            last_advance: 0.0,
            error_message: None,
        };
        panel.load();
        panel
    }
}

/// Presets that describe a polarised 1D scene.
fn polarised_presets() -> impl Iterator<Item = &'static str> {
    PRESETS
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| matches!(preset(name), Ok(Scene::Polarised { .. })))
}

impl PolarisedPanel {
    /// Build the selected preset and precompute its frames.
    fn load(&mut self) {
        self.frame = 0;
        self.animation = None;
        let result = match preset(self.preset) {
            Ok(Scene::Polarised { modes, grid, settings }) => {
                PolarisedAnimation::build(&modes, &grid, &settings).map_err(|e| e.to_string())
            }
            Ok(other) => Err(format!("'{}' is a {} scene", self.preset, other.kind())),
            Err(e) => Err(e.to_string()),
        };
        match result {
            Ok(anim) => {
                log::info!("Loaded preset '{}' with {} frames", self.preset, anim.frames.len());
                self.animation = Some(anim);
                self.error_message = None;
            }
            Err(e) => {
                log::error!("Failed to load preset '{}': {}", self.preset, e);
                self.error_message = Some(e);
            }
        }
    }

    /// Move to the next frame, wrapping at the end.
    pub fn advance(&mut self) {
        if let Some(anim) = &self.animation {
            self.frame = (self.frame + 1) % anim.frames.len().max(1);
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("Polarised field");
        ui.separator();

        let previous = self.preset;
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Preset")
                .selected_text(self.preset)
                .show_ui(ui, |ui| {
                    for &name in &self.preset_names {
                        ui.selectable_value(&mut self.preset, name, name);
                    }
                });
            let label = if self.playing { "Pause" } else { "Play" };
            if ui.button(label).clicked() {
                self.playing = !self.playing;
            }
        });
        if self.preset != previous {
            self.load();
        }

        if let Some(err) = &self.error_message {
            ui.colored_label(Color32::RED, format!("Error: {}", err));
        }
        if self.playing {
            let now = ui.input(|i| i.time);
            if now - self.last_advance >= FRAME_SECONDS {
                self.last_advance = now;
                self.advance();
            }
            ui.ctx().request_repaint();
        }

        let Some(anim) = &self.animation else { return };
        let count = anim.frames.len();

        let mut frame_idx = self.frame;
        ui.add(egui::Slider::new(&mut frame_idx, 0..=count.saturating_sub(1)).text("frame"));
        self.frame = frame_idx.min(count.saturating_sub(1));

        let Some(frame) = anim.frames.get(self.frame) else { return };
        ui.label(format!("t = {}", frame.label));
        ui.add_space(4.0);

        let b = anim.bounds;
        ui.horizontal(|ui| {
            let half = (ui.available_width() / 2.0 - 8.0).max(200.0);

            // Field components along x, or the probe history when no trace is drawn.
            let (v, w, x_label): (PlotPoints, PlotPoints, &str) = match &frame.trace {
                Some(points) => (
                    points.iter().map(|p| [p[0], p[1]]).collect(),
                    points.iter().map(|p| [p[0], p[2]]).collect(),
                    "x",
                ),
                None => (
                    anim.frames[..=self.frame].iter().map(|f| [f.t, f.total_arrow.head[1]]).collect(),
                    anim.frames[..=self.frame].iter().map(|f| [f.t, f.total_arrow.head[2]]).collect(),
                    "t",
                ),
            };
            Plot::new("components_plot")
                .width(half)
                .x_axis_label(x_label)
                .y_axis_label("E")
                .include_y(b.y[0].min(b.z[0]))
                .include_y(b.y[1].max(b.z[1]))
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(v).name("v (y component)").color(Color32::from_rgb(50, 120, 220)).width(2.0));
                    plot_ui.line(Line::new(w).name("w (z component)").color(Color32::from_rgb(220, 50, 50)).width(2.0));
                });

            // Probe arrows in the transverse plane.
            Plot::new("probe_plot")
                .width(half)
                .data_aspect(1.0)
                .x_axis_label("y")
                .y_axis_label("z")
                .include_x(b.y[0])
                .include_x(b.y[1])
                .include_y(b.z[0])
                .include_y(b.z[1])
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    for (i, arrow) in frame.mode_arrows.iter().enumerate() {
                        plot_ui.arrows(
                            Arrows::new(vec![[arrow.tail[1], arrow.tail[2]]], vec![[arrow.head[1], arrow.head[2]]])
                                .name(format!("mode {}", i + 1))
                                .color(super::mode_colour32(i)),
                        );
                    }
                    let total = frame.total_arrow;
                    let [tr, tg, tb] = superpose_core::animation::TOTAL_COLOUR.1;
                    plot_ui.arrows(
                        Arrows::new(vec![[total.tail[1], total.tail[2]]], vec![[total.head[1], total.head[2]]])
                            .name("total")
                            .color(Color32::from_rgb(tr, tg, tb)),
                    );
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarised_presets_listed() {
        let panel = PolarisedPanel::default();
        let names = &panel.preset_names;
        assert!(names.contains(&"circular"));
        assert!(names.contains(&"beat"));
        assert!(!names.contains(&"four-orientation"));
    }

    #[test]
    fn test_advance_wraps() {
        let mut panel = PolarisedPanel::default();
        assert!(panel.error_message.is_none());
        let count = panel.animation.as_ref().unwrap().frames.len();
        panel.frame = count - 1;
        panel.advance();
        assert_eq!(panel.frame, 0);
    }

    #[test]
    fn test_switching_preset_reloads() {
        let mut panel = PolarisedPanel::default();
        panel.frame = 10;
        panel.preset = "beat";
        panel.load();
        assert_eq!(panel.frame, 0);
        let anim = panel.animation.as_ref().unwrap();
        assert!(anim.frames[0].trace.is_none());
    }
}
