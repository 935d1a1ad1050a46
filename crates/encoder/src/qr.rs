use image::{GrayImage, Luma};
use qrcode::types::QrError;
use qrcode::{Color as ModuleColor, QrCode};
use refcards_traits::{CodeEncoder, EncodeError};
use refcards_types::{PixelFormat, Raster};

pub const DEFAULT_RASTER_SIZE: u32 = 300;
pub const DEFAULT_QUIET_ZONE_MODULES: u32 = 2;

const DARK: Luma<u8> = Luma([0x00]);
const LIGHT: Luma<u8> = Luma([0xFF]);

#[derive(Debug, Clone, Copy)]
pub struct QrCodeEncoder {
    size: u32,
    quiet_zone: u32,
}

impl Default for QrCodeEncoder {
    fn default() -> Self {
        Self {
            size: DEFAULT_RASTER_SIZE,
            quiet_zone: DEFAULT_QUIET_ZONE_MODULES,
        }
    }
}

impl QrCodeEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target edge length of the square output raster, in pixels.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Rasterizes the module matrix. The output is exactly `self.size` pixels
    /// square unless the symbol plus quiet zone has more modules than that, in
    /// which case one pixel per module is used.
    fn rasterize(&self, code: &QrCode) -> GrayImage {
        let modules = code.to_colors();
        let module_count = code.width() as u32;
        let total_modules = module_count + 2 * self.quiet_zone;
        let edge = self.size.max(total_modules);
        let scale = edge as f32 / total_modules as f32;

        GrayImage::from_fn(edge, edge, |px, py| {
            let mx = (px as f32 / scale).floor() as i64 - self.quiet_zone as i64;
            let my = (py as f32 / scale).floor() as i64 - self.quiet_zone as i64;
            let range = 0..module_count as i64;
            if !range.contains(&mx) || !range.contains(&my) {
                return LIGHT;
            }
            let idx = my as usize * module_count as usize + mx as usize;
            match modules.get(idx) {
                Some(ModuleColor::Dark) => DARK,
                _ => LIGHT,
            }
        })
    }
}

impl CodeEncoder for QrCodeEncoder {
    fn encode(&self, url: &str) -> Result<Raster, EncodeError> {
        let code = QrCode::new(url.as_bytes()).map_err(|e| match e {
            QrError::DataTooLong => EncodeError::DataTooLong { len: url.len() },
            other => EncodeError::Failed(other.to_string()),
        })?;
        log::trace!(
            "Encoded {} bytes as a {}x{} module symbol",
            url.len(),
            code.width(),
            code.width()
        );

        let image = self.rasterize(&code);
        let (width, height) = image.dimensions();
        Raster::new(width, height, PixelFormat::Luma8, image.into_raw())
            .ok_or_else(|| EncodeError::Failed("rasterized buffer has unexpected length".into()))
    }

    fn name(&self) -> &'static str {
        "QrCodeEncoder"
    }
}
