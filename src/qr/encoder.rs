//! QR code encoder and symbol renderer

use crate::error::{Error, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};

const MAX_VERSION: i16 = 40;

/// QR code encoder
///
/// Picks the smallest version at or above `min_version` that holds the payload.
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    ecc_level: EcLevel,
    min_version: i16,
}

impl QrEncoder {
    /// Create an encoder with high error correction, so the centre of the
    /// symbol can be covered by a logo, starting at version 4.
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::H,
            min_version: 4,
        }
    }

    /// Use a specific error correction level
    pub fn with_ecc_level(mut self, ecc_level: EcLevel) -> Self {
        self.ecc_level = ecc_level;
        self
    }

    /// Use a different starting version (clamped to 1..=40)
    pub fn with_min_version(mut self, min_version: i16) -> Self {
        self.min_version = min_version.clamp(1, MAX_VERSION);
        self
    }

    /// Encode raw bytes into a QR symbol
    pub fn encode(&self, data: &[u8]) -> Result<QrSymbol> {
        for version in self.min_version..=MAX_VERSION {
            match QrCode::with_version(data, Version::Normal(version), self.ecc_level) {
                Ok(code) => {
                    tracing::debug!(
                        version,
                        ecc_level = ?self.ecc_level,
                        modules = code.width(),
                        "Encoded QR symbol"
                    );
                    return Ok(QrSymbol { code, version });
                }
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::QrEncode(format!(
            "{} bytes do not fit any QR version at {:?} error correction",
            data.len(),
            self.ecc_level
        )))
    }

    /// Encode a string into a QR symbol
    pub fn encode_str(&self, data: &str) -> Result<QrSymbol> {
        self.encode(data.as_bytes())
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// How a symbol is laid out in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolStyle {
    /// Pixel width of one module
    pub box_size: u32,
    /// Quiet zone width, in modules
    pub border: u32,
    /// Colour of dark modules
    pub dark: Rgba<u8>,
    /// Colour of light modules and the quiet zone
    pub light: Rgba<u8>,
}

/// An encoded QR symbol, ready to be rendered
pub struct QrSymbol {
    code: QrCode,
    version: i16,
}

impl QrSymbol {
    /// QR version number (1..=40)
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Error correction level the symbol was built with
    pub fn ecc_level(&self) -> EcLevel {
        self.code.error_correction_level()
    }

    /// Number of modules per side, excluding the quiet zone
    pub fn modules(&self) -> u32 {
        self.code.width() as u32
    }

    /// Side length in pixels once rendered with `style`
    pub fn pixel_size(&self, style: &SymbolStyle) -> u32 {
        (self.modules() + 2 * style.border) * style.box_size
    }

    /// Render the symbol onto a new opaque canvas
    pub fn render(&self, style: &SymbolStyle) -> RgbaImage {
        let side = self.pixel_size(style);
        let mut canvas = RgbaImage::from_pixel(side, side, style.light);
        if style.box_size == 0 {
            return canvas;
        }

        let width = self.code.width();
        for y in 0..width {
            for x in 0..width {
                if self.code[(x, y)] != Color::Dark {
                    continue;
                }
                let left = (style.border + x as u32) * style.box_size;
                let top = (style.border + y as u32) * style.box_size;
                draw_filled_rect_mut(
                    &mut canvas,
                    Rect::at(left as i32, top as i32).of_size(style.box_size, style.box_size),
                    style.dark,
                );
            }
        }

        canvas
    }
}
