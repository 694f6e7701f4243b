//! Right-panel tool controls: tool choice, stroke sizes, shape kind,
//! opacity, filters, and the save/load buttons.

use eframe::egui;

use crate::canvas::{ShapeKind, StyleState, Tool};

/// Stroke widths offered by the size dropdowns.
pub const SIZE_PRESETS: [u32; 8] = [1, 2, 5, 10, 15, 20, 25, 30];

/// One-shot requests the panel hands back to the app for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolsPanelAction {
    ApplyGrayscale,
    ApplySepia,
    ApplyInvert,
    SaveImage,
    LoadImage,
}

#[derive(Default)]
pub struct ToolsPanel;

impl ToolsPanel {
    /// Render the panel.  Style edits land directly in `style`; anything
    /// that needs the canvas or a dialog comes back as an action.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        style: &mut StyleState,
    ) -> Option<ToolsPanelAction> {
        let mut action = None;

        ui.heading("Tools");
        ui.separator();

        ui.horizontal_wrapped(|ui| {
            for &tool in Tool::all() {
                if ui
                    .selectable_label(style.tool == tool, tool.label())
                    .clicked()
                {
                    style.tool = tool;
                }
            }
        });

        ui.add_space(6.0);
        self.show_tool_options(ui, style);

        ui.add_space(6.0);
        ui.label("Opacity");
        let mut opacity = style.opacity_percent();
        if ui
            .add(egui::Slider::new(&mut opacity, 0.0..=100.0).suffix("%"))
            .changed()
        {
            style.set_opacity(opacity);
        }

        ui.separator();
        ui.heading("Filters");
        if ui.button("Grayscale").clicked() {
            action = Some(ToolsPanelAction::ApplyGrayscale);
        }
        if ui.button("Sepia").clicked() {
            action = Some(ToolsPanelAction::ApplySepia);
        }
        if ui.button("Invert Colors").clicked() {
            action = Some(ToolsPanelAction::ApplyInvert);
        }

        ui.separator();
        ui.heading("Image");
        if ui.button("Save Image…").clicked() {
            action = Some(ToolsPanelAction::SaveImage);
        }
        if ui.button("Load Image…").clicked() {
            action = Some(ToolsPanelAction::LoadImage);
        }

        action
    }

    /// Per-tool options.  Pencil and eraser keep separate widths, so
    /// switching tools swaps which one the dropdown edits.
    fn show_tool_options(&mut self, ui: &mut egui::Ui, style: &mut StyleState) {
        match style.tool {
            Tool::Pencil => {
                ui.label("Size");
                size_combo(ui, "pencil_size", &mut style.brush_size);
            }
            Tool::Eraser => {
                ui.label("Size");
                size_combo(ui, "eraser_size", &mut style.eraser_size);
            }
            Tool::Shape => {
                ui.label("Shape");
                for &kind in ShapeKind::all() {
                    ui.radio_value(&mut style.shape, kind, kind.label());
                }
            }
            // Fill has no options; it takes the active color as-is.
            Tool::Fill => {}
        }
    }
}

fn size_combo(ui: &mut egui::Ui, id: &str, size: &mut u32) {
    egui::ComboBox::from_id_source(id)
        .selected_text(format!("{}px", size))
        .width(70.0)
        .show_ui(ui, |ui| {
            for &preset in SIZE_PRESETS.iter() {
                if ui
                    .selectable_label(*size == preset, format!("{}px", preset))
                    .clicked()
                {
                    *size = preset;
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DEFAULT_BRUSH_SIZE, DEFAULT_ERASER_SIZE};

    #[test]
    fn default_sizes_appear_in_the_dropdown() {
        assert!(SIZE_PRESETS.contains(&DEFAULT_BRUSH_SIZE));
        assert!(SIZE_PRESETS.contains(&DEFAULT_ERASER_SIZE));
    }

    #[test]
    fn size_presets_are_sorted_and_unique() {
        assert!(SIZE_PRESETS.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
