//! The two branded asset pipelines and the run that writes them
//!
//! Both variants are rendered fully in memory before anything touches the
//! filesystem, so a failed render or a missing logo leaves no output behind.

use crate::canvas::{
    BLUE, Bounds, LIGHT_BLUE, Logo, NAVY, SLATE, outlined_disc, outlined_rounded_rect, stroke_ring,
};
use crate::config::AssetConfig;
use crate::error::{Error, Result};
use crate::qr::{QrDecoder, QrEncoder, QrSymbol, SymbolStyle};
use image::{ImageFormat, Rgba, RgbaImage};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Space between the canvas edge and the pasted symbol in the styled variant
const CARD_PADDING: u32 = 30;
const CARD_RADIUS: i32 = 40;
const CARD_OUTLINE_WIDTH: i32 = 3;
const BADGE_OUTLINE_WIDTH: i32 = 2;
const GLOW_RINGS: i32 = 5;
const GLOW_SPACING: i32 = 3;
const GLOW_WIDTH: i32 = 2;
const GLOW_MAX_ALPHA: i32 = 30;

const STYLED_SYMBOL: SymbolStyle = SymbolStyle {
    box_size: 12,
    border: 3,
    dark: BLUE,
    light: NAVY,
};

const SIMPLE_SYMBOL: SymbolStyle = SymbolStyle {
    box_size: 10,
    border: 4,
    dark: LIGHT_BLUE,
    light: NAVY,
};

/// Which of the two assets an image is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Rounded card, glow rings and badge
    StyledDark,
    /// Badge drawn straight onto the symbol
    SimpleDark,
}

impl Variant {
    /// Module layout and colours for this variant
    pub fn symbol_style(self) -> SymbolStyle {
        match self {
            Variant::StyledDark => STYLED_SYMBOL,
            Variant::SimpleDark => SIMPLE_SYMBOL,
        }
    }

    /// Gap between the logo and the badge rim
    fn badge_margin(self) -> i32 {
        match self {
            Variant::StyledDark => 15,
            Variant::SimpleDark => 12,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::StyledDark => write!(f, "Dark"),
            Variant::SimpleDark => write!(f, "Simple dark"),
        }
    }
}

/// A written asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    /// Which pipeline produced it
    pub variant: Variant,
    /// Where it was written
    pub path: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

/// Renders and writes the QR assets described by an [`AssetConfig`]
pub struct AssetGenerator {
    config: AssetConfig,
    encoder: QrEncoder,
}

impl AssetGenerator {
    /// Create a generator for `config`
    pub fn new(config: AssetConfig) -> Self {
        let encoder = QrEncoder::new().with_min_version(config.min_version);
        Self { config, encoder }
    }

    /// Render both variants and write them as PNG files.
    pub fn generate(&self) -> Result<Vec<GeneratedAsset>> {
        let logo = Logo::load(&self.config.logo)?;
        let (logo_w, logo_h) = logo.dimensions();
        info!(
            logo = %logo.source().display(),
            width = logo_w,
            height = logo_h,
            "Loaded logo"
        );
        let symbol = self.encoder.encode_str(&self.config.payload)?;
        info!(
            payload = %self.config.payload,
            version = symbol.version(),
            modules = symbol.modules(),
            "Encoded payload"
        );

        let rendered = [
            (
                Variant::StyledDark,
                &self.config.styled_output,
                render_styled(&symbol, &logo),
            ),
            (
                Variant::SimpleDark,
                &self.config.simple_output,
                render_simple(&symbol, &logo),
            ),
        ];

        let mut assets = Vec::with_capacity(rendered.len());
        for (variant, path, image) in rendered {
            write_png(&image, path)?;
            info!(
                %variant,
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                "Wrote QR asset"
            );
            assets.push(GeneratedAsset {
                variant,
                path: path.clone(),
                width: image.width(),
                height: image.height(),
            });
        }

        Ok(assets)
    }

    /// Decode a written asset and check it carries the configured payload.
    pub fn verify(&self, asset: &GeneratedAsset) -> Result<()> {
        let image = image::open(&asset.path)?;
        let expected = &self.config.payload;

        let found = match QrDecoder::new().decode_any(&image) {
            Ok(payload) => payload.text,
            Err(Error::NoQrCodeFound) | Err(Error::QrDecode(_)) => None,
            Err(err) => return Err(err),
        };

        if found.as_deref() == Some(expected.as_str()) {
            tracing::debug!(path = %asset.path.display(), "Asset decodes to expected payload");
            Ok(())
        } else {
            Err(Error::Verification {
                path: asset.path.clone(),
                expected: expected.clone(),
                found,
            })
        }
    }
}

/// Symbol on a rounded card, with glow rings around a badge holding the logo.
pub fn render_styled(symbol: &QrSymbol, logo: &Logo) -> RgbaImage {
    let style = Variant::StyledDark.symbol_style();
    let qr = symbol.render(&style);
    let (qr_width, qr_height) = qr.dimensions();
    let padding = CARD_PADDING;

    let mut canvas = RgbaImage::from_pixel(qr_width + 2 * padding, qr_height + 2 * padding, NAVY);

    let half = (padding / 2) as i32;
    let card = Bounds {
        left: half,
        top: half,
        right: (qr_width + padding) as i32 + half,
        bottom: (qr_height + padding) as i32 + half,
    };
    outlined_rounded_rect(&mut canvas, card, CARD_RADIUS, SLATE, BLUE, CARD_OUTLINE_WIDTH);
    image::imageops::replace(&mut canvas, &qr, padding as i64, padding as i64);

    let logo = logo.thumbnail(qr_width / 4, qr_width / 4);
    let (logo_w, logo_h) = logo.dimensions();
    let radius = badge_radius(&logo, Variant::StyledDark);
    let center = (
        (padding + qr_width / 2) as i32,
        (padding + qr_height / 2) as i32,
    );

    for ring in (1..=GLOW_RINGS).rev() {
        let alpha = GLOW_MAX_ALPHA * (GLOW_RINGS + 1 - ring) / GLOW_RINGS;
        let glow = Rgba([BLUE.0[0], BLUE.0[1], BLUE.0[2], alpha as u8]);
        stroke_ring(&mut canvas, center, radius + ring * GLOW_SPACING, GLOW_WIDTH, glow);
    }

    outlined_disc(&mut canvas, center, radius, NAVY, BLUE, BADGE_OUTLINE_WIDTH);
    logo.paste(
        &mut canvas,
        (padding + (qr_width - logo_w) / 2) as i64,
        (padding + (qr_height - logo_h) / 2) as i64,
    );

    canvas
}

/// Symbol with the logo on a plain badge, no card or glow.
pub fn render_simple(symbol: &QrSymbol, logo: &Logo) -> RgbaImage {
    let style = Variant::SimpleDark.symbol_style();
    let mut canvas = symbol.render(&style);
    let (width, height) = canvas.dimensions();

    let logo = logo.thumbnail(width / 4, width / 4);
    let (logo_w, logo_h) = logo.dimensions();
    let radius = badge_radius(&logo, Variant::SimpleDark);
    let center = ((width / 2) as i32, (height / 2) as i32);

    outlined_disc(&mut canvas, center, radius, NAVY, LIGHT_BLUE, BADGE_OUTLINE_WIDTH);
    logo.paste(
        &mut canvas,
        ((width - logo_w) / 2) as i64,
        ((height - logo_h) / 2) as i64,
    );

    canvas
}

fn badge_radius(logo: &Logo, variant: Variant) -> i32 {
    let (w, h) = logo.dimensions();
    (w.max(h) / 2) as i32 + variant.badge_margin()
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> QrSymbol {
        QrEncoder::new().encode_str("https://scipi.ro").unwrap()
    }

    fn logo(width: u32, height: u32) -> Logo {
        Logo::from_image(RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn test_styled_dimensions() {
        let img = render_styled(&symbol(), &logo(32, 32));
        // (33 modules + 2 * 3 border) * 12px + 2 * 30px padding
        assert_eq!(img.dimensions(), (528, 528));
    }

    #[test]
    fn test_styled_layers() {
        let img = render_styled(&symbol(), &logo(32, 32));

        // Outside the card
        assert_eq!(*img.get_pixel(0, 0), NAVY);
        // Card outline and surface on the left edge, midway down
        assert_eq!(*img.get_pixel(15, 264), BLUE);
        assert_eq!(*img.get_pixel(20, 264), SLATE);
        // Quiet zone of the pasted symbol
        assert_eq!(*img.get_pixel(31, 264), NAVY);
        // Logo sits in the centre
        assert_eq!(*img.get_pixel(264, 264), Rgba([255, 255, 255, 255]));
        // Badge rim: radius 16 + 15 = 31
        assert_eq!(*img.get_pixel(264 + 31, 264), BLUE);
        assert_eq!(*img.get_pixel(264 + 25, 264), NAVY);
    }

    #[test]
    fn test_styled_logo_is_capped() {
        let img = render_styled(&symbol(), &logo(1000, 1000));
        // Logo thumbnailed to 468 / 4 = 117px, badge radius 58 + 15
        assert_eq!(*img.get_pixel(264, 264), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(264 + 73, 264), BLUE);
        assert_eq!(img.dimensions(), (528, 528));

        let payload = QrDecoder::new()
            .decode_any(&image::DynamicImage::ImageRgba8(img))
            .unwrap();
        assert_eq!(payload.as_str(), Some("https://scipi.ro"));
    }

    #[test]
    fn test_styled_glow_rings_are_translucent() {
        let img = render_styled(&symbol(), &logo(32, 32));
        let glow = |alpha: u8| Rgba([BLUE.0[0], BLUE.0[1], BLUE.0[2], alpha]);

        // Badge radius 31; rings end at 31 + 3i for i = 1..=5, two pixels wide
        assert_eq!(*img.get_pixel(264 + 34, 264), glow(30));
        assert_eq!(*img.get_pixel(264 + 33, 264), glow(30));
        assert_eq!(*img.get_pixel(264 + 37, 264), glow(24));
        assert_eq!(*img.get_pixel(264 + 40, 264), glow(18));
        assert_eq!(*img.get_pixel(264 + 43, 264), glow(12));
        assert_eq!(*img.get_pixel(264 + 46, 264), glow(6));
        // Gaps between rings keep the opaque symbol underneath
        assert_eq!(img.get_pixel(264 + 35, 264).0[3], 255);
    }

    #[test]
    fn test_simple_dimensions_and_badge() {
        let img = render_simple(&symbol(), &logo(40, 20));
        // (33 + 2 * 4) * 10
        assert_eq!(img.dimensions(), (410, 410));
        assert_eq!(*img.get_pixel(0, 0), NAVY);
        assert_eq!(*img.get_pixel(205, 205), Rgba([255, 255, 255, 255]));
        // Badge radius 20 + 12 = 32
        assert_eq!(*img.get_pixel(205 + 32, 205), LIGHT_BLUE);
        assert_eq!(*img.get_pixel(205 + 25, 205), NAVY);
    }

    #[test]
    fn test_variants_decode() {
        let decoder = QrDecoder::new();
        for img in [
            render_styled(&symbol(), &logo(32, 32)),
            render_simple(&symbol(), &logo(32, 32)),
        ] {
            let payload = decoder
                .decode_any(&image::DynamicImage::ImageRgba8(img))
                .unwrap();
            assert_eq!(payload.as_str(), Some("https://scipi.ro"));
        }
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(Variant::StyledDark.to_string(), "Dark");
        assert_eq!(Variant::SimpleDark.to_string(), "Simple dark");
    }
}
