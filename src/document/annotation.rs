use std::path::Path;
use anyhow::Context;
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

/// Regions of interest drawn on a reference page.
#[derive(Debug, Serialize, Deserialize)]
pub struct Annotation {
    pub boxes: Vec<Region>,
}

/// A labelled rectangle given by its center and size, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

impl Annotation {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read annotation {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid annotation file {}", path.display()))
    }
}

impl Region {
    /// Pixel bounds `(left, top, right, bottom)` clamped to an image of the given size.
    fn bounds(&self, image_width: u32, image_height: u32) -> (u32, u32, u32, u32) {
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        (
            clamp(self.x - self.width / 2.0, image_width),
            clamp(self.y - self.height / 2.0, image_height),
            clamp(self.x + self.width / 2.0, image_width),
            clamp(self.y + self.height / 2.0, image_height),
        )
    }
}

pub fn crop(image: &DynamicImage, region: &Region) -> anyhow::Result<DynamicImage> {
    let (width, height) = image.dimensions();
    let (left, top, right, bottom) = region.bounds(width, height);
    if right <= left || bottom <= top {
        anyhow::bail!("Region '{}' lies outside the {}x{} page", region.label, width, height);
    }
    log::debug!("Cropped '{}' at ({}, {}, {}, {})", region.label, region.x, region.y, region.width, region.height);
    Ok(image.crop_imm(left, top, right - left, bottom - top))
}
