//! Band-based image partitioning.
//!
//! Divides the image into horizontal bands of whole rows that are rendered
//! independently, one worker and one random stream per band.

use rand::RngCore;

use crate::renderer::{color_to_rgba, render_pixel};
use crate::{RenderConfig, Scene};

/// A contiguous run of image rows, `start_row..end_row`, counted from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Position of this band in the partition
    pub index: usize,
    /// First row (inclusive)
    pub start_row: u32,
    /// Last row (exclusive)
    pub end_row: u32,
}

impl Band {
    /// Create a new band.
    pub fn new(index: usize, start_row: u32, end_row: u32) -> Self {
        Self {
            index,
            start_row,
            end_row,
        }
    }

    /// Number of rows in this band.
    pub fn height(&self) -> u32 {
        self.end_row - self.start_row
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.height() as usize * width as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start_row == self.end_row
    }
}

/// Split `height` rows into `workers` bands.
///
/// Every band gets `height / workers` rows and the last band also takes the
/// remainder. With more workers than rows the leading bands are empty and the
/// last band holds the whole image.
pub fn partition_rows(height: u32, workers: usize) -> Vec<Band> {
    if workers == 0 {
        return Vec::new();
    }

    let rows_per_band = (height as usize / workers) as u32;
    let mut bands: Vec<Band> = (0..workers)
        .map(|i| {
            let start = i as u32 * rows_per_band;
            Band::new(i, start, start + rows_per_band)
        })
        .collect();

    if let Some(last) = bands.last_mut() {
        last.end_row = height;
    }

    bands
}

/// Seed for the random stream of band `index`.
pub fn band_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

/// Result of rendering a band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandImage {
    /// The band that was rendered
    pub band: Band,
    /// RGBA pixels in row-major order, top row first
    pub pixels: Vec<[u8; 4]>,
}

impl BandImage {
    /// Create a new band image.
    pub fn new(band: Band, pixels: Vec<[u8; 4]>) -> Self {
        Self { band, pixels }
    }
}

/// Render every pixel of one band.
///
/// Draws all randomness from `rng`, so a given seed always reproduces the
/// same band regardless of which thread runs it.
pub fn render_band(
    band: &Band,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> BandImage {
    log::debug!(
        "Band {} started: rows {}..{}",
        band.index,
        band.start_row,
        band.end_row
    );

    let mut pixels = Vec::with_capacity(band.pixel_count(config.width));
    for row in band.start_row..band.end_row {
        for x in 0..config.width {
            let color = render_pixel(scene.camera(), scene, x, row, config, rng);
            pixels.push(color_to_rgba(color));
        }
    }

    log::debug!("Band {} finished: {} pixels", band.index, pixels.len());
    BandImage::new(*band, pixels)
}
