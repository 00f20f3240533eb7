use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use orb_renderer::Framebuffer;

/// Encoding picked from the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("jpg" | "jpeg") => ImageFormat::Jpeg,
            _ => ImageFormat::Png,
        }
    }
}

/// Write the framebuffer to `path`, JPEG at `quality` or PNG.
pub fn save_image(framebuffer: &Framebuffer, path: &Path, quality: u8) -> Result<()> {
    let image = RgbaImage::from_raw(
        framebuffer.width,
        framebuffer.height,
        framebuffer.as_bytes().to_vec(),
    )
    .context("Framebuffer size does not match its dimensions")?;

    match ImageFormat::from_path(path) {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
            encoder
                .encode_image(&rgb)
                .with_context(|| format!("Failed to encode JPEG {}", path.display()))?;
        }
        ImageFormat::Png => {
            image
                .save_with_format(path, image::ImageFormat::Png)
                .with_context(|| format!("Failed to write PNG {}", path.display()))?;
        }
    }

    log::info!("Saved {}x{} image to {}", framebuffer.width, framebuffer.height, path.display());
    Ok(())
}
