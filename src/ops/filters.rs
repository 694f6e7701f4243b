// ============================================================================
// IMAGE FILTERS: grayscale, sepia, color inversion
// ============================================================================

use image::Rgba;

use crate::canvas::Canvas;

/// ITU-R 601-2 luminance, truncated to an integer channel value.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) as u8
}

/// Desaturate the whole canvas.  Every pixel, transparent ones included,
/// collapses to its luminance and comes out fully opaque.
pub fn apply_grayscale(canvas: &mut Canvas) {
    for px in canvas.image_mut().pixels_mut() {
        let [r, g, b, _] = px.0;
        let lum = luma(r, g, b);
        *px = Rgba([lum, lum, lum, 255]);
    }
}

/// Warm sepia tone: luminance scaled per channel (1.3 / 1.1 / 0.9) and
/// clamped at 255.  Output is fully opaque.
pub fn apply_sepia(canvas: &mut Canvas) {
    for px in canvas.image_mut().pixels_mut() {
        let [r, g, b, _] = px.0;
        let gray = luma(r, g, b) as f32;
        *px = Rgba([
            (gray * 1.3).min(255.0) as u8,
            (gray * 1.1).min(255.0) as u8,
            (gray * 0.9).min(255.0) as u8,
            255,
        ]);
    }
}

/// Invert the color channels of every pixel.  Alpha is left untouched, so
/// transparent areas stay transparent.
pub fn apply_invert(canvas: &mut Canvas) {
    for px in canvas.image_mut().pixels_mut() {
        let [r, g, b, a] = px.0;
        *px = Rgba([255 - r, 255 - g, 255 - b, a]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with(px: Rgba<u8>) -> Canvas {
        let mut canvas = Canvas::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                canvas.set(x, y, px);
            }
        }
        canvas
    }

    #[test]
    fn grayscale_flattens_channels_and_forces_opacity() {
        let mut canvas = canvas_with(Rgba([60, 100, 160, 77]));
        apply_grayscale(&mut canvas);
        // 0.299 * 60 + 0.587 * 100 + 0.114 * 160 = 94.88, truncated.
        assert_eq!(canvas.get(1, 1), Some(Rgba([94, 94, 94, 255])));
    }

    #[test]
    fn grayscale_makes_transparent_pixels_opaque_black() {
        let mut canvas = Canvas::new(4, 4);
        apply_grayscale(&mut canvas);
        assert_eq!(canvas.get(0, 0), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn sepia_scales_the_luminance_per_channel() {
        let mut canvas = canvas_with(Rgba([60, 100, 160, 77]));
        apply_sepia(&mut canvas);
        // gray = 94; 94 * 1.3 = 122.2, 94 * 1.1 = 103.4, 94 * 0.9 = 84.6.
        assert_eq!(canvas.get(2, 3), Some(Rgba([122, 103, 84, 255])));
    }

    #[test]
    fn sepia_clamps_bright_pixels_and_stays_warm() {
        let mut canvas = canvas_with(Rgba([250, 240, 230, 255]));
        apply_sepia(&mut canvas);
        let Rgba([r, g, b, a]) = canvas.get(0, 0).unwrap();
        assert_eq!((r, g), (255, 255));
        assert_eq!(a, 255);
        assert!(r >= g && g >= b, "sepia must order channels warm to cool");
    }

    #[test]
    fn invert_flips_channels_and_keeps_alpha() {
        let mut canvas = canvas_with(Rgba([10, 20, 30, 128]));
        apply_invert(&mut canvas);
        assert_eq!(canvas.get(3, 0), Some(Rgba([245, 235, 225, 128])));
    }

    #[test]
    fn invert_twice_restores_the_original_image() {
        let mut canvas = Canvas::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                let v = (x * 31 + y * 7) as u8;
                canvas.set(x, y, Rgba([v, v.wrapping_mul(3), 255 - v, v / 2]));
            }
        }
        let before = canvas.image().clone();
        apply_invert(&mut canvas);
        apply_invert(&mut canvas);
        assert_eq!(canvas.image().as_raw(), before.as_raw());
    }
}
