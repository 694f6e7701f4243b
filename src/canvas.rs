//! Canvas pixel buffer and the style/tool state applied to drawing operations.
//!
//! The `Canvas` owns the RGBA raster being edited.  It is created once at
//! startup (transparent, fixed size), mutated in place by every drawing and
//! filter operation, and replaced wholesale only when an image is loaded.
//! All coordinates crossing this boundary are `i32` so that gesture positions
//! left of or above the canvas clip silently instead of wrapping.

use image::{Rgba, RgbaImage};

/// Default canvas size for a fresh session.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1000;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 700;

/// Default stroke widths for the pencil and the eraser.
pub const DEFAULT_BRUSH_SIZE: u32 = 5;
pub const DEFAULT_ERASER_SIZE: u32 = 10;

/// Starting brush color.
pub const DEFAULT_COLOR: &str = "#7c7dc9";

// ============================================================================
// PIXEL BUFFER
// ============================================================================

/// A fixed-size RGBA pixel buffer.
///
/// Out-of-bounds policy (one consistent rule everywhere): `get` returns
/// `None`, `set` is a silent no-op.  Drawing operations clip through these
/// without failing.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    /// Read a pixel.  `None` when the coordinate is outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if self.in_bounds(x, y) {
            Some(*self.image.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Write a pixel.  Silently ignored when the coordinate is outside the
    /// buffer.
    pub fn set(&mut self, x: i32, y: i32, px: Rgba<u8>) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, px);
        }
    }

    /// Swap in a new buffer wholesale.  Width and height follow the new image.
    pub fn replace(&mut self, image: RgbaImage) {
        self.image = image;
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }
}

// ============================================================================
// TOOL & STYLE STATE
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Shape,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
            Tool::Shape => "Shape",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[Tool::Pencil, Tool::Eraser, Tool::Fill, Tool::Shape]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
        }
    }

    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Rectangle, ShapeKind::Ellipse]
    }
}

/// Current tool, sizes, color, opacity and shape kind.
///
/// One instance lives for the whole session; the panels mutate it and the
/// gesture dispatch reads it.  Opacity is stored both as the slider percent
/// and as the derived 8-bit alpha so the two can never drift apart: every
/// change goes through [`StyleState::set_opacity`].
#[derive(Clone, Debug)]
pub struct StyleState {
    pub tool: Tool,
    pub brush_size: u32,
    pub eraser_size: u32,
    pub color: [u8; 3],
    pub shape: ShapeKind,
    opacity_percent: f32,
    alpha: u8,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            brush_size: DEFAULT_BRUSH_SIZE,
            eraser_size: DEFAULT_ERASER_SIZE,
            color: parse_color(DEFAULT_COLOR),
            shape: ShapeKind::Rectangle,
            opacity_percent: 100.0,
            alpha: 255,
        }
    }
}

impl StyleState {
    /// Set the stroke opacity from a 0 to 100 percentage.
    ///
    /// The percent is clamped before the linear map to alpha, so out-of-range
    /// slider or caller input can never produce an out-of-range channel.
    /// 50% maps to 128 (round half away from zero).
    pub fn set_opacity(&mut self, percent: f32) {
        let percent = percent.clamp(0.0, 100.0);
        self.opacity_percent = percent;
        self.alpha = (percent / 100.0 * 255.0).round() as u8;
    }

    pub fn opacity_percent(&self) -> f32 {
        self.opacity_percent
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// The RGBA value every pencil stroke, shape outline and flood fill
    /// writes: current color with the derived alpha.
    pub fn active_rgba(&self) -> Rgba<u8> {
        Rgba([self.color[0], self.color[1], self.color[2], self.alpha])
    }
}

// ============================================================================
// COLOR PARSING & HSV
// ============================================================================

const FALLBACK_WHITE: [u8; 3] = [255, 255, 255];

/// Parse `#RRGGBB` or `#RGB` hex text (leading `#` optional) into an RGB
/// triple.  Anything else, including stray characters or wrong lengths,
/// falls back to opaque white without surfacing an error.
pub fn parse_color(text: &str) -> [u8; 3] {
    let hex = text.trim().trim_start_matches('#');
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return FALLBACK_WHITE;
    }
    match (hex.len(), u32::from_str_radix(hex, 16)) {
        (6, Ok(v)) => [
            ((v >> 16) & 0xFF) as u8,
            ((v >> 8) & 0xFF) as u8,
            (v & 0xFF) as u8,
        ],
        (3, Ok(v)) => [
            (((v >> 8) & 0xF) * 0x11) as u8,
            (((v >> 4) & 0xF) * 0x11) as u8,
            ((v & 0xF) * 0x11) as u8,
        ],
        _ => FALLBACK_WHITE,
    }
}

/// Format an RGB triple as lowercase `#rrggbb`, round-tripping with
/// [`parse_color`].
pub fn format_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// HSV → RGB with all inputs in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let h6 = h * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h6 as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}

/// Map a normalized palette pick position to a color: x sweeps the hue,
/// y sweeps saturation from full (top) to none (bottom), value stays 1.
pub fn palette_pick(x_ratio: f32, y_ratio: f32) -> [u8; 3] {
    let hue = x_ratio.clamp(0.0, 1.0);
    let saturation = 1.0 - y_ratio.clamp(0.0, 1.0);
    hsv_to_rgb(hue, saturation, 1.0)
}

/// Build the hue/saturation sweep the palette widget displays.
pub fn palette_image(resolution: u32) -> RgbaImage {
    let mut img = RgbaImage::new(resolution, resolution);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let [r, g, b] = palette_pick(
            x as f32 / resolution as f32,
            y as f32 / resolution as f32,
        );
        *px = Rgba([r, g, b, 255]);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_fully_transparent() {
        let canvas = Canvas::new(8, 6);
        assert_eq!(canvas.width(), 8);
        assert_eq!(canvas.height(), 6);
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(canvas.get(x, y), Some(Rgba([0, 0, 0, 0])));
            }
        }
    }

    #[test]
    fn get_returns_none_out_of_bounds() {
        let canvas = Canvas::new(4, 4);
        assert_eq!(canvas.get(-1, 0), None);
        assert_eq!(canvas.get(0, -1), None);
        assert_eq!(canvas.get(4, 0), None);
        assert_eq!(canvas.get(0, 4), None);
        assert!(canvas.get(3, 3).is_some());
    }

    #[test]
    fn set_out_of_bounds_is_a_silent_no_op() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set(-1, 2, Rgba([255, 0, 0, 255]));
        canvas.set(4, 2, Rgba([255, 0, 0, 255]));
        canvas.set(2, 100, Rgba([255, 0, 0, 255]));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(canvas.get(x, y), Some(Rgba([0, 0, 0, 0])));
            }
        }
    }

    #[test]
    fn set_then_get_round_trips_in_bounds() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set(1, 2, Rgba([10, 20, 30, 40]));
        assert_eq!(canvas.get(1, 2), Some(Rgba([10, 20, 30, 40])));
    }

    #[test]
    fn replace_swaps_buffer_and_dimensions() {
        let mut canvas = Canvas::new(4, 4);
        let swapped = RgbaImage::from_pixel(10, 3, Rgba([1, 2, 3, 4]));
        canvas.replace(swapped);
        assert_eq!(canvas.width(), 10);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.get(9, 2), Some(Rgba([1, 2, 3, 4])));
    }

    #[test]
    fn opacity_endpoints_map_exactly() {
        let mut style = StyleState::default();
        style.set_opacity(0.0);
        assert_eq!(style.alpha(), 0);
        style.set_opacity(100.0);
        assert_eq!(style.alpha(), 255);
    }

    #[test]
    fn opacity_fifty_percent_rounds_up_to_128() {
        let mut style = StyleState::default();
        style.set_opacity(50.0);
        assert_eq!(style.alpha(), 128);
    }

    #[test]
    fn opacity_input_is_clamped() {
        let mut style = StyleState::default();
        style.set_opacity(-20.0);
        assert_eq!(style.alpha(), 0);
        assert_eq!(style.opacity_percent(), 0.0);
        style.set_opacity(400.0);
        assert_eq!(style.alpha(), 255);
        assert_eq!(style.opacity_percent(), 100.0);
    }

    #[test]
    fn active_rgba_combines_color_and_alpha() {
        let mut style = StyleState::default();
        style.color = [12, 34, 56];
        style.set_opacity(50.0);
        assert_eq!(style.active_rgba(), Rgba([12, 34, 56, 128]));
    }

    #[test]
    fn parse_color_recovers_six_digit_hex() {
        assert_eq!(parse_color("#7c7dc9"), [0x7C, 0x7D, 0xC9]);
        assert_eq!(parse_color("7C7DC9"), [0x7C, 0x7D, 0xC9]);
        assert_eq!(parse_color(format_color([1, 2, 3]).as_str()), [1, 2, 3]);
    }

    #[test]
    fn parse_color_doubles_shorthand_digits() {
        assert_eq!(parse_color("#abc"), [0xAA, 0xBB, 0xCC]);
        assert_eq!(parse_color("#f00"), [255, 0, 0]);
    }

    #[test]
    fn parse_color_falls_back_to_white() {
        assert_eq!(parse_color("not-a-color"), [255, 255, 255]);
        assert_eq!(parse_color(""), [255, 255, 255]);
        assert_eq!(parse_color("#12345"), [255, 255, 255]);
        assert_eq!(parse_color("#ggg"), [255, 255, 255]);
        assert_eq!(parse_color("#ффффф7"), [255, 255, 255]);
    }

    #[test]
    fn hsv_corners_convert_exactly() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(0.0, 0.0, 1.0), [255, 255, 255]);
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), [0, 0, 0]);
    }

    #[test]
    fn palette_pick_inverts_saturation_vertically() {
        // Top-left: hue 0 at full saturation.
        assert_eq!(palette_pick(0.0, 0.0), [255, 0, 0]);
        // Bottom edge: saturation 0 at value 1 is white for any hue.
        assert_eq!(palette_pick(0.3, 1.0), [255, 255, 255]);
    }

    #[test]
    fn palette_image_is_opaque_and_sized() {
        let img = palette_image(32);
        assert_eq!(img.dimensions(), (32, 32));
        assert!(img.pixels().all(|px| px[3] == 255));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }
}
