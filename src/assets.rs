//! Optional decorative assets (the card logo).
//!
//! A logo that cannot be loaded is never fatal: [`load_logo_or_warn`] logs the
//! [`AssetError`] and the cards are laid out without one.

use crate::error::AssetError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use refcards_traits::ResourceProvider;
use refcards_types::{PixelFormat, Raster, ResourceKey};

/// Pixel width the logo is resampled to before embedding.
pub const LOGO_EMBED_WIDTH: u32 = 120;

/// A decoded logo ready to be embedded.
#[derive(Debug, Clone)]
pub struct Logo {
    raster: Raster,
    source_width: u32,
    source_height: u32,
}

impl Logo {
    /// The resampled, alpha-flattened RGB raster to embed.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Pixel dimensions of the file as supplied.
    pub fn source_dimensions(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// Width over height of the original file; this is what card layout uses.
    pub fn aspect_ratio(&self) -> f32 {
        self.source_width as f32 / self.source_height as f32
    }
}

/// Composites every pixel over white and drops the alpha channel.
fn flatten_onto_white(image: &DynamicImage) -> Vec<u8> {
    let rgba = image.to_rgba8();
    let mut rgb = Vec::with_capacity(rgba.width() as usize * rgba.height() as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        for channel in [r, g, b] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

/// Decodes PNG or JPEG bytes into a [`Logo`].
pub fn decode_logo(key: &str, bytes: &[u8]) -> Result<Logo, AssetError> {
    let image = image::load_from_memory(bytes).map_err(|e| AssetError::Decode {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    let (source_width, source_height) = image.dimensions();
    if source_width == 0 || source_height == 0 {
        return Err(AssetError::Empty(key.to_string()));
    }

    let embed_height = ((LOGO_EMBED_WIDTH as f64 * source_height as f64 / source_width as f64)
        .round() as u32)
        .max(1);
    let resized = image.resize_exact(LOGO_EMBED_WIDTH, embed_height, FilterType::Lanczos3);
    let pixels = flatten_onto_white(&resized);

    let raster = Raster::new(resized.width(), resized.height(), PixelFormat::Rgb8, pixels)
        .ok_or_else(|| AssetError::Decode {
            key: key.to_string(),
            message: "pixel buffer size mismatch".to_string(),
        })?;

    log::debug!(
        "Decoded logo '{}' ({}x{} -> {}x{})",
        key,
        source_width,
        source_height,
        raster.width(),
        raster.height()
    );
    Ok(Logo {
        raster,
        source_width,
        source_height,
    })
}

pub fn load_logo(provider: &dyn ResourceProvider, key: &ResourceKey) -> Result<Logo, AssetError> {
    let bytes = provider
        .load(key.as_str())
        .map_err(|source| AssetError::Unavailable {
            key: key.to_string(),
            source,
        })?;
    decode_logo(key.as_str(), &bytes)
}

/// Loads the logo, or logs why it could not be loaded and returns `None`.
pub fn load_logo_or_warn(provider: &dyn ResourceProvider, key: &ResourceKey) -> Option<Logo> {
    match load_logo(provider, key) {
        Ok(logo) => Some(logo),
        Err(e) => {
            log::warn!("Continuing without logo via {}: {}", provider.name(), e);
            None
        }
    }
}
