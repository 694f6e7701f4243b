//! The application shell: window layout, pointer gestures, canvas texture
//! upload, and the plumbing between panels, ops, and file handling.

use std::sync::Arc;

use eframe::egui;
use egui::{Color32, Stroke};

use crate::canvas::{
    Canvas, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, ShapeKind, StyleState, Tool,
};
use crate::components::colors::{ColorsPanel, draw_checkerboard};
use crate::components::tools::{ToolsPanel, ToolsPanelAction};
use crate::io::FileHandler;
use crate::ops::{fill, filters, shapes, strokes};
use crate::{log_err, log_info, log_warn};

pub struct EaselApp {
    canvas: Canvas,
    style: StyleState,
    file_handler: FileHandler,

    tools_panel: ToolsPanel,
    colors_panel: ColorsPanel,

    // The canvas texture is rebuilt lazily: ops mark the canvas dirty and
    // the next frame re-uploads the buffer.
    canvas_texture: Option<egui::TextureHandle>,
    canvas_dirty: bool,

    /// Previous stroke point while the pencil or eraser is held down.
    last_point: Option<(i32, i32)>,
    /// Press position of an in-progress shape gesture.
    shape_anchor: Option<(i32, i32)>,

    status_line: String,
}

impl EaselApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        log_info!(
            "Canvas ready at {}x{}",
            DEFAULT_CANVAS_WIDTH,
            DEFAULT_CANVAS_HEIGHT
        );
        Self {
            canvas: Canvas::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            style: StyleState::default(),
            file_handler: FileHandler::new(),
            tools_panel: ToolsPanel::default(),
            colors_panel: ColorsPanel::default(),
            canvas_texture: None,
            canvas_dirty: true,
            last_point: None,
            shape_anchor: None,
            status_line: String::from("Ready"),
        }
    }

    // --- Panel actions -----------------------------------------------------

    fn handle_panel_action(&mut self, action: ToolsPanelAction) {
        match action {
            ToolsPanelAction::ApplyGrayscale => {
                filters::apply_grayscale(&mut self.canvas);
                self.canvas_dirty = true;
                self.status_line = String::from("Grayscale filter applied");
                log_info!("Applied grayscale filter");
            }
            ToolsPanelAction::ApplySepia => {
                filters::apply_sepia(&mut self.canvas);
                self.canvas_dirty = true;
                self.status_line = String::from("Sepia filter applied");
                log_info!("Applied sepia filter");
            }
            ToolsPanelAction::ApplyInvert => {
                filters::apply_invert(&mut self.canvas);
                self.canvas_dirty = true;
                self.status_line = String::from("Colors inverted");
                log_info!("Applied invert filter");
            }
            ToolsPanelAction::SaveImage => self.save_image(),
            ToolsPanelAction::LoadImage => self.load_image(),
        }
    }

    fn save_image(&mut self) {
        // Dialog cancellation is a plain no-op, not an error.
        let Some(path) = self.file_handler.pick_save_path() else {
            return;
        };
        match self.file_handler.save_image(self.canvas.image(), &path) {
            Ok(()) => {
                let shown = self
                    .file_handler
                    .current_path
                    .as_deref()
                    .unwrap_or(&path)
                    .display();
                self.status_line = format!("Saved {}", shown);
                log_info!("Saved canvas to {}", shown);
            }
            Err(e) => {
                self.status_line = format!("Save failed: {}", e);
                log_err!("Save to {} failed: {}", path.display(), e);
            }
        }
    }

    fn load_image(&mut self) {
        let Some(path) = self.file_handler.pick_open_path() else {
            return;
        };
        match self
            .file_handler
            .load_image(&path, self.canvas.width(), self.canvas.height())
        {
            Ok(image) => {
                self.canvas.replace(image);
                self.canvas_dirty = true;
                self.status_line = format!("Loaded {}", path.display());
                log_info!("Loaded {} into the canvas", path.display());
            }
            Err(e) => {
                self.status_line = format!("Load failed: {}", e);
                log_warn!("Load of {} failed: {}", path.display(), e);
            }
        }
    }

    // --- Canvas widget -----------------------------------------------------

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(self.canvas.width() as f32, self.canvas.height() as f32);
        let rect = egui::Rect::from_center_size(ui.available_rect_before_wrap().center(), size);
        let _response = ui
            .allocate_rect(rect, egui::Sense::click_and_drag())
            .on_hover_cursor(egui::CursorIcon::Crosshair);

        self.handle_pointer(ui.ctx(), rect);

        let painter = ui.painter_at(rect);
        draw_checkerboard(&painter, rect, 10.0);

        self.refresh_texture(ui.ctx());
        if let Some(texture) = &self.canvas_texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        self.draw_shape_preview(&painter, rect, ui.ctx());
    }

    /// Upload the pixel buffer to the GPU when something changed.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.canvas_dirty && self.canvas_texture.is_some() {
            return;
        }
        let image = self.canvas.image();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            image.as_raw(),
        );
        // Nearest filtering keeps pixel edges crisp at the 1:1 scale we draw.
        let options = egui::TextureOptions {
            magnification: egui::TextureFilter::Nearest,
            minification: egui::TextureFilter::Nearest,
            ..Default::default()
        };
        let data = egui::ImageData::Color(Arc::new(color_image));
        match &mut self.canvas_texture {
            Some(tex) => tex.set(data, options),
            None => self.canvas_texture = Some(ctx.load_texture("canvas", data, options)),
        }
        self.canvas_dirty = false;
    }

    // --- Pointer gestures --------------------------------------------------

    fn handle_pointer(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        let (pressed, down, released, pointer) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });
        let Some(pointer) = pointer else {
            return;
        };

        // Canvas coordinates.  Once a gesture is running these may leave the
        // canvas; the ops clip, so strokes re-enter cleanly.
        let x = (pointer.x - rect.min.x).floor() as i32;
        let y = (pointer.y - rect.min.y).floor() as i32;

        if pressed && rect.contains(pointer) && !ctx.is_pointer_over_area() {
            self.begin_gesture(x, y);
        } else if down && !pressed {
            self.extend_stroke(x, y);
        }
        if released {
            self.finish_gesture(x, y);
        }
    }

    fn begin_gesture(&mut self, x: i32, y: i32) {
        match self.style.tool {
            Tool::Pencil => {
                strokes::draw_line(
                    &mut self.canvas,
                    x,
                    y,
                    x,
                    y,
                    self.style.active_rgba(),
                    self.style.brush_size,
                );
                self.last_point = Some((x, y));
                self.canvas_dirty = true;
            }
            Tool::Eraser => {
                strokes::erase_line(&mut self.canvas, x, y, x, y, self.style.eraser_size);
                self.last_point = Some((x, y));
                self.canvas_dirty = true;
            }
            Tool::Fill => {
                fill::flood_fill(&mut self.canvas, x, y, self.style.active_rgba());
                self.canvas_dirty = true;
            }
            Tool::Shape => {
                self.shape_anchor = Some((x, y));
            }
        }
    }

    fn extend_stroke(&mut self, x: i32, y: i32) {
        let Some((lx, ly)) = self.last_point else {
            return;
        };
        if (lx, ly) == (x, y) {
            return;
        }
        match self.style.tool {
            Tool::Pencil => strokes::draw_line(
                &mut self.canvas,
                lx,
                ly,
                x,
                y,
                self.style.active_rgba(),
                self.style.brush_size,
            ),
            Tool::Eraser => {
                strokes::erase_line(&mut self.canvas, lx, ly, x, y, self.style.eraser_size)
            }
            _ => return,
        }
        self.last_point = Some((x, y));
        self.canvas_dirty = true;
    }

    fn finish_gesture(&mut self, x: i32, y: i32) {
        if let Some((ax, ay)) = self.shape_anchor.take() {
            shapes::draw_shape_outline(
                &mut self.canvas,
                self.style.shape,
                ax,
                ay,
                x,
                y,
                self.style.active_rgba(),
            );
            self.canvas_dirty = true;
        }
        self.last_point = None;
    }

    /// Rubber-band outline for the shape being dragged, in the active color.
    /// Nothing is committed to pixels until release.
    fn draw_shape_preview(&self, painter: &egui::Painter, rect: egui::Rect, ctx: &egui::Context) {
        let Some((ax, ay)) = self.shape_anchor else {
            return;
        };
        let Some(pointer) = ctx.input(|i| i.pointer.latest_pos()) else {
            return;
        };

        let anchor = egui::pos2(rect.min.x + ax as f32, rect.min.y + ay as f32);
        let preview = egui::Rect::from_two_pos(anchor, pointer);
        let [r, g, b] = self.style.color;
        let stroke = Stroke::new(
            2.0,
            Color32::from_rgba_unmultiplied(r, g, b, self.style.alpha()),
        );

        match self.style.shape {
            ShapeKind::Rectangle => {
                painter.rect_stroke(preview, 0.0, stroke);
            }
            ShapeKind::Ellipse => {
                let center = preview.center();
                let radii = preview.size() * 0.5;
                let points: Vec<egui::Pos2> = (0..64)
                    .map(|i| {
                        let t = i as f32 / 64.0 * std::f32::consts::TAU;
                        egui::pos2(center.x + radii.x * t.cos(), center.y + radii.y * t.sin())
                    })
                    .collect();
                painter.add(egui::Shape::closed_line(points, stroke));
            }
        }
    }

    fn sync_window_title(&self, ctx: &egui::Context) {
        let title = match self
            .file_handler
            .current_path
            .as_deref()
            .and_then(|p| p.file_name())
        {
            Some(name) => format!("Easel - {}", name.to_string_lossy()),
            None => String::from("Easel"),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

impl eframe::App for EaselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_window_title(ctx);

        let mut action = None;
        egui::SidePanel::right("controls")
            .exact_width(240.0)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.tools_panel.show(ui, &mut self.style);
                    ui.add_space(10.0);
                    self.colors_panel.show(ui, &mut self.style);
                });
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_line);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{}×{}", self.canvas.width(), self.canvas.height()));
                });
            });
        });

        if let Some(action) = action {
            self.handle_panel_action(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_canvas(ui);
        });
    }
}
