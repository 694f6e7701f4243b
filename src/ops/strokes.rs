//! Freehand stroke rendering for the pencil and eraser tools.
//!
//! Strokes are destructive: every covered pixel is set to the stroke color
//! verbatim, alpha included, never blended with what was underneath.  The
//! eraser is the same geometry writing fully transparent pixels.

use image::Rgba;

use crate::canvas::Canvas;

/// Draw a straight segment of the given stroke width between two points.
///
/// Walks the segment with Bresenham's line algorithm and stamps a filled
/// disc at every step.  Degenerate input (`x0 == x1 && y0 == y1`) still
/// stamps a single dot.  Coordinates outside the canvas clip silently.
pub fn draw_line(
    canvas: &mut Canvas,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
    width: u32,
) {
    let mut x = x0;
    let mut y = y0;
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        stamp_disc(canvas, x, y, color, width);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Same geometry as [`draw_line`] but the written color is always
/// `(0, 0, 0, 0)`, independent of the current color and opacity.
pub fn erase_line(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, width: u32) {
    draw_line(canvas, x0, y0, x1, y1, Rgba([0, 0, 0, 0]), width);
}

/// Stamp a filled disc of diameter `width` centered on `(cx, cy)`.
///
/// An odd diameter centers on the stamp pixel and keeps the classic
/// integer-radius membership test.  An even diameter has no center pixel:
/// the disc midpoint sits half a pixel up-left and distances are measured
/// in half-pixel units against it, so the stamp covers exactly `width`
/// pixels across with the extra pixel of span on the low side.
fn stamp_disc(canvas: &mut Canvas, cx: i32, cy: i32, color: Rgba<u8>, width: u32) {
    if width == 0 {
        return;
    }
    let w = width as i32;
    let lo = -(w / 2);
    let hi = (w - 1) / 2;
    // Offsets doubled so the half-pixel shift of even widths stays integral.
    let shift = 1 - w % 2;
    let limit = if shift == 0 { (w - 1) * (w - 1) } else { w * w };
    for dy in lo..=hi {
        for dx in lo..=hi {
            let ex = 2 * dx + shift;
            let ey = 2 * dy + shift;
            if ex * ex + ey * ey <= limit {
                canvas.set(cx + dx, cy + dy, color);
            }
        }
    }
}
