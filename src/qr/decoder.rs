//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};

/// QR code decoder
///
/// Images are binarised at their Otsu level before detection. Light-on-dark
/// symbols are handled by retrying with the binarised image inverted.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a dark-on-light QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        self.decode_gray(img.to_luma8())
    }

    /// Decode a QR code regardless of polarity
    pub fn decode_any(&self, img: &DynamicImage) -> Result<QrPayload> {
        let gray = img.to_luma8();
        let level = otsu_level(&gray);

        match self.decode_gray(threshold(&gray, level, ThresholdType::Binary)) {
            Ok(payload) => Ok(payload),
            Err(err) => {
                tracing::debug!("Dark-on-light decode failed ({err}), trying inverted");
                self.decode_gray(threshold(&gray, level, ThresholdType::BinaryInverted))
            }
        }
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();

        let mut last_error = Error::NoQrCodeFound;
        for grid in grids {
            match grid.decode() {
                Ok((meta, content)) => {
                    tracing::debug!(
                        "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                        meta.version,
                        meta.ecc_level,
                        content.len()
                    );
                    return Ok(QrPayload::from_bytes(content.into_bytes()));
                }
                Err(e) => last_error = Error::QrDecode(format!("Decode failed: {:?}", e)),
            }
        }

        Err(last_error)
    }
}
