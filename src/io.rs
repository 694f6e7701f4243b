//! File dialogs plus image load/save for the canvas.

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tga::TgaEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, RgbaImage};
use rfd::FileDialog;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Fixed encode quality for JPEG output.
const JPEG_QUALITY: u8 = 90;

/// Raster formats a save path can imply through its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Tga,
    Webp,
}

impl SaveFormat {
    /// Map a bare extension (no dot) to a format, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<SaveFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "tga" => Some(SaveFormat::Tga),
            "webp" => Some(SaveFormat::Webp),
            _ => None,
        }
    }

    /// Format implied by a path's extension, if it carries a recognized one.
    pub fn for_path(path: &Path) -> Option<SaveFormat> {
        path.extension()
            .and_then(|ext| SaveFormat::from_extension(&ext.to_string_lossy()))
    }

    /// Filter name shown in the save dialog.
    pub fn label(&self) -> &'static str {
        match self {
            SaveFormat::Png => "PNG Image",
            SaveFormat::Jpeg => "JPEG Image",
            SaveFormat::Bmp => "Bitmap",
            SaveFormat::Tga => "Targa",
            SaveFormat::Webp => "WebP Image",
        }
    }
}

/// Tracks the file the canvas is tied to and fronts the native dialogs.
pub struct FileHandler {
    /// Path of the most recent successful load or save.
    pub current_path: Option<PathBuf>,
    /// Format implied by that path.
    pub last_format: SaveFormat,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            current_path: None,
            last_format: SaveFormat::Png,
        }
    }

    /// Native open dialog filtered to the raster formats we can decode.
    /// Cancelling returns `None`.
    pub fn pick_open_path(&self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .add_filter(
                "Images",
                &["png", "jpg", "jpeg", "webp", "bmp", "tga", "ico", "tiff", "tif"],
            )
            .add_filter("All Files", &["*"]);
        if let Some(dir) = self.current_path.as_ref().and_then(|p| p.parent()) {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }

    /// Native save dialog, PNG filter first.  Cancelling returns `None`.
    pub fn pick_save_path(&self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .add_filter(SaveFormat::Png.label(), &["png"])
            .add_filter(SaveFormat::Jpeg.label(), &["jpg", "jpeg"])
            .add_filter(SaveFormat::Bmp.label(), &["bmp"])
            .add_filter(SaveFormat::Tga.label(), &["tga"])
            .add_filter(SaveFormat::Webp.label(), &["webp"]);
        if let Some(path) = &self.current_path {
            if let Some(name) = path.file_name() {
                let name = name.to_string_lossy().to_string();
                dialog = dialog.set_file_name(&name);
            }
            if let Some(dir) = path.parent() {
                dialog = dialog.set_directory(dir);
            }
        }
        dialog.save_file()
    }

    /// Decode an image file and stretch it to the canvas size.
    ///
    /// The canvas keeps one size for the whole session, so a picture of any
    /// other size is resampled (never cropped) to fit.  On success the
    /// handler remembers the path and the format it implies.
    pub fn load_image(
        &mut self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, ImageError> {
        let decoded = image::open(path)?.to_rgba8();
        let rgba = if decoded.dimensions() == (width, height) {
            decoded
        } else {
            imageops::resize(&decoded, width, height, FilterType::CatmullRom)
        };
        self.current_path = Some(path.to_path_buf());
        self.last_format = SaveFormat::for_path(path).unwrap_or_default();
        Ok(rgba)
    }

    /// Encode the canvas to `path`, picking the format from its extension.
    ///
    /// A path without a recognized extension gets `.png` appended so the
    /// default stays lossless with alpha intact.  The handler state is only
    /// updated once the write succeeds.
    pub fn save_image(&mut self, image: &RgbaImage, path: &Path) -> Result<(), ImageError> {
        let (path, format) = match SaveFormat::for_path(path) {
            Some(format) => (path.to_path_buf(), format),
            None => {
                let mut name = path.as_os_str().to_os_string();
                name.push(".png");
                (PathBuf::from(name), SaveFormat::Png)
            }
        };

        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        match format {
            SaveFormat::Png => {
                let encoder = PngEncoder::new(&mut writer);
                #[allow(deprecated)]
                encoder.encode(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ColorType::Rgba8,
                )?;
            }
            SaveFormat::Jpeg => {
                // JPEG has no alpha channel, flatten to RGB first.
                let rgb_image = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
                encoder.encode(
                    rgb_image.as_raw(),
                    rgb_image.width(),
                    rgb_image.height(),
                    image::ColorType::Rgb8,
                )?;
            }
            SaveFormat::Bmp => {
                let mut encoder = BmpEncoder::new(&mut writer);
                encoder.encode(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ColorType::Rgba8,
                )?;
            }
            SaveFormat::Tga => {
                let encoder = TgaEncoder::new(&mut writer);
                encoder.encode(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ColorType::Rgba8,
                )?;
            }
            SaveFormat::Webp => {
                let dyn_img = DynamicImage::ImageRgba8(image.clone());
                dyn_img.save(&path)?;
            }
        }
        writer.flush()?;

        self.current_path = Some(path);
        self.last_format = format;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x * 17) as u8, (y * 11) as u8, (x + y) as u8, 200])
        })
    }

    #[test]
    fn png_save_and_reload_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = sample_image(16, 12);

        let mut handler = FileHandler::new();
        handler.save_image(&img, &path).unwrap();
        assert_eq!(handler.current_path.as_deref(), Some(path.as_path()));
        assert_eq!(handler.last_format, SaveFormat::Png);

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.as_raw(), img.as_raw());
    }

    #[test]
    fn missing_extension_defaults_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = FileHandler::new();
        handler
            .save_image(&sample_image(4, 4), &dir.path().join("plain"))
            .unwrap();

        let expected = dir.path().join("plain.png");
        assert!(expected.exists());
        assert_eq!(handler.current_path.as_deref(), Some(expected.as_path()));
        assert_eq!(image::open(&expected).unwrap().to_rgba8().dimensions(), (4, 4));
    }

    #[test]
    fn unrecognized_extension_also_gains_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = FileHandler::new();
        handler
            .save_image(&sample_image(4, 4), &dir.path().join("notes.txt"))
            .unwrap();
        assert!(dir.path().join("notes.txt.png").exists());
        assert_eq!(handler.last_format, SaveFormat::Png);
    }

    #[test]
    fn jpeg_save_drops_alpha_but_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let mut handler = FileHandler::new();
        handler.save_image(&sample_image(20, 10), &path).unwrap();
        assert_eq!(handler.last_format, SaveFormat::Jpeg);

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (20, 10));
        assert!(reloaded.pixels().all(|px| px.0[3] == 255));
    }

    #[test]
    fn from_extension_maps_known_formats_case_insensitively() {
        assert_eq!(SaveFormat::from_extension("PNG"), Some(SaveFormat::Png));
        assert_eq!(SaveFormat::from_extension("JpG"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("jpeg"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("webp"), Some(SaveFormat::Webp));
        assert_eq!(SaveFormat::from_extension("svg"), None);
        assert_eq!(SaveFormat::from_extension(""), None);
    }

    #[test]
    fn every_format_carries_a_distinct_filter_label() {
        let formats = [
            SaveFormat::Png,
            SaveFormat::Jpeg,
            SaveFormat::Bmp,
            SaveFormat::Tga,
            SaveFormat::Webp,
        ];
        for (i, format) in formats.iter().enumerate() {
            assert!(!format.label().is_empty());
            for other in &formats[i + 1..] {
                assert_ne!(format.label(), other.label());
            }
        }
    }

    #[test]
    fn load_stretches_to_the_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        sample_image(8, 4).save(&path).unwrap();

        let mut handler = FileHandler::new();
        let loaded = handler.load_image(&path, 32, 16).unwrap();
        assert_eq!(loaded.dimensions(), (32, 16));
        assert_eq!(handler.current_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn load_at_matching_size_keeps_pixels_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.png");
        let img = sample_image(16, 16);
        img.save(&path).unwrap();

        let mut handler = FileHandler::new();
        let loaded = handler.load_image(&path, 16, 16).unwrap();
        assert_eq!(loaded.as_raw(), img.as_raw());
    }

    #[test]
    fn load_of_a_missing_file_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut handler = FileHandler::new();
        let result = handler.load_image(&dir.path().join("nope.png"), 8, 8);
        assert!(result.is_err());
        assert!(handler.current_path.is_none());
    }
}
