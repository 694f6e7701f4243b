//! Rectangle and ellipse outlines.
//!
//! Outlines are always 2 px wide, grow inward from the bounding box spanned
//! by the two corner points, and are never filled.  Corner order is
//! irrelevant: the box is normalized before any pixel is written.

use image::Rgba;

use crate::canvas::{Canvas, ShapeKind};

/// Fixed outline thickness for shapes.
const OUTLINE_WIDTH: i32 = 2;

/// Draw the outline of `kind` into the bounding box spanned by the two
/// corners.  Pixels are overwritten with `color` (alpha included); parts of
/// the box outside the canvas clip silently.
pub fn draw_shape_outline(
    canvas: &mut Canvas,
    kind: ShapeKind,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    match kind {
        ShapeKind::Rectangle => rectangle_outline(canvas, x0, y0, x1, y1, color),
        ShapeKind::Ellipse => ellipse_outline(canvas, x0, y0, x1, y1, color),
    }
}

/// Two concentric one-pixel rectangles: the box itself and the box inset
/// by one.  Boxes too small for the inner ring just skip it.
fn rectangle_outline(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    for inset in 0..OUTLINE_WIDTH {
        rectangle_ring(
            canvas,
            x0 + inset,
            y0 + inset,
            x1 - inset,
            y1 - inset,
            color,
        );
    }
}

fn rectangle_ring(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    if x0 > x1 || y0 > y1 {
        return;
    }
    for x in x0.max(0)..=x1.min(canvas.width() as i32 - 1) {
        canvas.set(x, y0, color);
        canvas.set(x, y1, color);
    }
    for y in y0.max(0)..=y1.min(canvas.height() as i32 - 1) {
        canvas.set(x0, y, color);
        canvas.set(x1, y, color);
    }
}

/// Scan the bounding box and keep the pixels inside the outer ellipse but
/// outside an inner ellipse whose semi-axes are shrunk by the outline width.
/// When the inner axes collapse to zero the whole ellipse fills in (tiny
/// shapes degrade to dots and bars rather than failing).
fn ellipse_outline(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    let cx = (x0 + x1) as f32 * 0.5;
    let cy = (y0 + y1) as f32 * 0.5;
    // Half a pixel of slack so the arc reaches the box edges at the axis
    // midpoints (pixel centers sit on integer coordinates).
    let rx = (x1 - x0) as f32 * 0.5 + 0.5;
    let ry = (y1 - y0) as f32 * 0.5 + 0.5;
    let inner_rx = rx - OUTLINE_WIDTH as f32;
    let inner_ry = ry - OUTLINE_WIDTH as f32;

    for y in y0.max(0)..=y1.min(canvas.height() as i32 - 1) {
        for x in x0.max(0)..=x1.min(canvas.width() as i32 - 1) {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if !inside_ellipse(dx, dy, rx, ry) {
                continue;
            }
            let inside_inner = inner_rx > 0.0
                && inner_ry > 0.0
                && inside_ellipse(dx, dy, inner_rx, inner_ry);
            if !inside_inner {
                canvas.set(x, y, color);
            }
        }
    }
}

fn inside_ellipse(dx: f32, dy: f32, rx: f32, ry: f32) -> bool {
    let nx = dx / rx;
    let ny = dy / ry;
    nx * nx + ny * ny <= 1.0
}
