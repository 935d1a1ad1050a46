#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use refcards_traits::{CodeEncoder, EncodeError};
use refcards_types::{PixelFormat, Raster};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// `count` referral links, one per line
pub fn referral_links(count: usize) -> String {
    (1..=count)
        .map(|i| format!("https://cursor.com/referral?code=CODE{:04}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A CSV export with a header, blank lines and links in the second column
pub fn csv_export() -> String {
    [
        "name,link",
        "alice,https://example.com/a",
        "",
        "bob,https://example.com/b,extra",
        "carol,no link here",
        "dave,http://example.com/d",
    ]
    .join("\n")
}

/// A PNG logo of the given size, encoded in memory
pub fn png_logo(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, _| {
        if x % 2 == 0 {
            Rgba([20, 20, 20, 255])
        } else {
            Rgba([200, 0, 0, 128])
        }
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode test logo");
    out.into_inner()
}

fn tiny_raster() -> Raster {
    Raster::new(1, 1, PixelFormat::Luma8, vec![0]).expect("1x1 raster")
}

/// Counts calls and returns a 1x1 raster
#[derive(Debug, Default)]
pub struct CountingEncoder {
    pub calls: AtomicUsize,
}

impl CodeEncoder for CountingEncoder {
    fn encode(&self, _url: &str) -> Result<Raster, EncodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(tiny_raster())
    }

    fn name(&self) -> &'static str {
        "CountingEncoder"
    }
}

/// Sleeps less for later links so completions arrive out of order
#[derive(Debug)]
pub struct SlowFirstEncoder {
    pub total: u64,
}

impl CodeEncoder for SlowFirstEncoder {
    fn encode(&self, url: &str) -> Result<Raster, EncodeError> {
        let n: u64 = url
            .rsplit("CODE")
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        std::thread::sleep(Duration::from_millis(self.total.saturating_sub(n) * 4));
        Ok(tiny_raster())
    }

    fn name(&self) -> &'static str {
        "SlowFirstEncoder"
    }
}

/// Fails on every URL containing `needle`
#[derive(Debug)]
pub struct FailingEncoder {
    pub needle: &'static str,
}

impl CodeEncoder for FailingEncoder {
    fn encode(&self, url: &str) -> Result<Raster, EncodeError> {
        if url.contains(self.needle) {
            Err(EncodeError::Failed(format!("refused {}", url)))
        } else {
            Ok(tiny_raster())
        }
    }

    fn name(&self) -> &'static str {
        "FailingEncoder"
    }
}

/// Blocks each call long enough for a test to cancel the job midway
#[derive(Debug)]
pub struct SleepyEncoder {
    pub delay: Duration,
}

impl CodeEncoder for SleepyEncoder {
    fn encode(&self, _url: &str) -> Result<Raster, EncodeError> {
        std::thread::sleep(self.delay);
        Ok(tiny_raster())
    }

    fn name(&self) -> &'static str {
        "SleepyEncoder"
    }
}
