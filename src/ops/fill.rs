//! Iterative 4-connected flood fill.

use image::Rgba;

use crate::canvas::Canvas;

/// Repaint the contiguous region of pixels matching the color under the
/// seed point.
///
/// The target color is read once from `(x, y)` before any write; a seed
/// outside the canvas, or a target already equal to `fill`, is a no-op.
/// Traversal uses an explicit LIFO work list (never recursion) and pushes
/// the four edge-sharing neighbors of every repainted pixel.  Each pixel is
/// repainted at most once: once written it no longer matches the captured
/// target, so it can't be pushed again.
pub fn flood_fill(canvas: &mut Canvas, x: i32, y: i32, fill: Rgba<u8>) {
    let Some(target) = canvas.get(x, y) else {
        return;
    };
    if target == fill {
        return;
    }

    let w = canvas.width() as usize;
    let h = canvas.height() as usize;
    let buf: &mut [u8] = canvas.image_mut();
    let tc = target.0;
    let fc = fill.0;

    #[inline(always)]
    fn pixel(buf: &[u8], idx: usize) -> [u8; 4] {
        let o = idx * 4;
        [buf[o], buf[o + 1], buf[o + 2], buf[o + 3]]
    }

    #[inline(always)]
    fn write(buf: &mut [u8], idx: usize, px: [u8; 4]) {
        let o = idx * 4;
        buf[o..o + 4].copy_from_slice(&px);
    }

    // The work list stores packed flat indices (y * width + x) to keep it
    // compact; canvas pixel counts stay far below u32::MAX.
    let mut stack: Vec<u32> = Vec::with_capacity(4096);
    let seed = y as usize * w + x as usize;
    write(buf, seed, fc);
    stack.push(seed as u32);

    while let Some(idx) = stack.pop() {
        let i = idx as usize;
        let px = i % w;
        let py = i / w;

        // Left
        if px > 0 && pixel(buf, i - 1) == tc {
            write(buf, i - 1, fc);
            stack.push((i - 1) as u32);
        }
        // Right
        if px + 1 < w && pixel(buf, i + 1) == tc {
            write(buf, i + 1, fc);
            stack.push((i + 1) as u32);
        }
        // Up
        if py > 0 && pixel(buf, i - w) == tc {
            write(buf, i - w, fc);
            stack.push((i - w) as u32);
        }
        // Down
        if py + 1 < h && pixel(buf, i + w) == tc {
            write(buf, i + w, fc);
            stack.push((i + w) as u32);
        }
    }
}
