//! QR code encoder for refcards.
//!
//! [`QrCodeEncoder`] renders a URL as a black-on-white grayscale raster with a
//! fixed pixel size and quiet zone, using the scheme's default error-correction
//! level.

mod qr;

pub use qr::{QrCodeEncoder, DEFAULT_QUIET_ZONE_MODULES, DEFAULT_RASTER_SIZE};
