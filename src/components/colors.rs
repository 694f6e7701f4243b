//! Color controls: the hue/saturation palette, hex entry, the system
//! picker button, and a swatch previewing the brush at its current opacity.

use eframe::egui;
use egui::{Color32, Stroke};

use crate::canvas::{StyleState, format_color, palette_image, palette_pick, parse_color};

/// Resolution of the palette texture, drawn scaled down to the widget size.
const PALETTE_RESOLUTION: u32 = 300;
/// On-screen edge length of the palette widget.
const PALETTE_DISPLAY: f32 = 200.0;

#[derive(Default)]
pub struct ColorsPanel {
    hex_input: String,
    palette: Option<egui::TextureHandle>,
}

impl ColorsPanel {
    pub fn show(&mut self, ui: &mut egui::Ui, style: &mut StyleState) {
        ui.heading("Colors");
        ui.separator();

        self.draw_palette(ui, style);
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Hex").monospace());
            self.draw_hex_field(ui, style);
            ui.color_edit_button_srgb(&mut style.color);
        });

        ui.add_space(4.0);
        draw_active_swatch(ui, style);
    }

    /// Hue runs left to right, saturation top to bottom (full at the top).
    fn draw_palette(&mut self, ui: &mut egui::Ui, style: &mut StyleState) {
        let texture = self.palette.get_or_insert_with(|| {
            let img = palette_image(PALETTE_RESOLUTION);
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [img.width() as usize, img.height() as usize],
                img.as_raw(),
            );
            ui.ctx()
                .load_texture("palette", color_image, egui::TextureOptions::LINEAR)
        });

        let (rect, resp) = ui.allocate_exact_size(
            egui::Vec2::splat(PALETTE_DISPLAY),
            egui::Sense::click_and_drag(),
        );
        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        if (resp.dragged() || resp.clicked())
            && let Some(pos) = resp.interact_pointer_pos()
        {
            let x_ratio = (pos.x - rect.min.x) / rect.width();
            let y_ratio = (pos.y - rect.min.y) / rect.height();
            style.color = palette_pick(x_ratio, y_ratio);
        }
    }

    fn draw_hex_field(&mut self, ui: &mut egui::Ui, style: &mut StyleState) {
        let resp = ui.add_sized(
            [64.0, 18.0],
            egui::TextEdit::singleline(&mut self.hex_input).font(egui::TextStyle::Monospace),
        );
        if resp.lost_focus() {
            // Commit whatever was typed; junk falls back to opaque white.
            style.color = parse_color(&self.hex_input);
        }
        if !resp.has_focus() {
            self.hex_input = format_color(style.color);
        }
    }
}

/// Swatch of the active color at the active opacity, over a checkerboard
/// so translucency is visible.
fn draw_active_swatch(ui: &mut egui::Ui, style: &StyleState) {
    let width = ui.available_width().min(PALETTE_DISPLAY);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 24.0), egui::Sense::hover());
    let painter = ui.painter();
    draw_checkerboard(painter, rect, 10.0);
    let [r, g, b] = style.color;
    painter.rect_filled(
        rect,
        2.0,
        Color32::from_rgba_unmultiplied(r, g, b, style.alpha()),
    );
    painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::from_gray(100)));
}

/// Draw a checkerboard pattern inside `rect` (for transparency preview).
pub fn draw_checkerboard(painter: &egui::Painter, rect: egui::Rect, cell: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_gray(200));
    let cols = (rect.width() / cell).ceil() as i32;
    let rows = (rect.height() / cell).ceil() as i32;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 1 {
                let cr = egui::Rect::from_min_size(
                    egui::pos2(
                        rect.min.x + col as f32 * cell,
                        rect.min.y + row as f32 * cell,
                    ),
                    egui::Vec2::splat(cell),
                )
                .intersect(rect);
                painter.rect_filled(cr, 0.0, Color32::from_gray(150));
            }
        }
    }
}
