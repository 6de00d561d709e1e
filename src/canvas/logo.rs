//! Logo asset loading and compositing

use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// A logo image held in RGBA form
#[derive(Debug, Clone)]
pub struct Logo {
    image: RgbaImage,
    source: PathBuf,
}

impl Logo {
    /// Read and decode the logo at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| Error::Logo {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        Ok(Self {
            image,
            source: path.to_path_buf(),
        })
    }

    /// Wrap an in-memory image
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            source: PathBuf::new(),
        }
    }

    /// Where the logo was loaded from (empty for in-memory logos)
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Pixel dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Copy of the logo shrunk to fit inside `max_width` x `max_height`.
    ///
    /// Aspect ratio is preserved and the logo is never enlarged.
    pub fn thumbnail(&self, max_width: u32, max_height: u32) -> Logo {
        let (width, height) = thumbnail_size(self.dimensions(), (max_width, max_height));
        let image = if (width, height) == self.dimensions() {
            self.image.clone()
        } else {
            imageops::resize(&self.image, width, height, FilterType::Lanczos3)
        };

        Logo {
            image,
            source: self.source.clone(),
        }
    }

    /// Alpha-composite the logo onto `canvas` with its top-left corner at `(x, y)`.
    pub fn paste(&self, canvas: &mut RgbaImage, x: i64, y: i64) {
        imageops::overlay(canvas, &self.image, x, y);
    }
}

/// Size of an image of `original` dimensions after fitting it inside `bound`.
///
/// The constrained side takes the bound; the other side is whichever of the
/// floor or ceiling of the scaled value keeps the aspect ratio closest.
pub fn thumbnail_size(original: (u32, u32), bound: (u32, u32)) -> (u32, u32) {
    let (width, height) = original;
    let (max_w, max_h) = (bound.0.max(1), bound.1.max(1));

    if width == 0 || height == 0 || (max_w >= width && max_h >= height) {
        return original;
    }

    let aspect = width as f64 / height as f64;
    if max_w as f64 / max_h as f64 >= aspect {
        let target = max_h as f64 * aspect;
        let w = closest(target, |n| (aspect - n / max_h as f64).abs());
        (w, max_h)
    } else {
        let target = max_w as f64 / aspect;
        let h = closest(target, |n| (aspect - max_w as f64 / n).abs());
        (max_w, h)
    }
}

fn closest(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (value.floor(), value.ceil());
    let best = if floor > 0.0 && error(floor) <= error(ceil) {
        floor
    } else {
        ceil
    };
    (best as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_thumbnail_size_never_enlarges() {
        assert_eq!(thumbnail_size((64, 32), (117, 117)), (64, 32));
        assert_eq!(thumbnail_size((117, 117), (117, 117)), (117, 117));
    }

    #[test]
    fn test_thumbnail_size_square() {
        assert_eq!(thumbnail_size((512, 512), (117, 117)), (117, 117));
    }

    #[test]
    fn test_thumbnail_size_keeps_aspect() {
        assert_eq!(thumbnail_size((400, 200), (100, 100)), (100, 50));
        assert_eq!(thumbnail_size((200, 400), (100, 100)), (50, 100));
        assert_eq!(thumbnail_size((300, 200), (102, 102)), (102, 68));
    }

    #[test]
    fn test_thumbnail_size_only_one_side_over() {
        assert_eq!(thumbnail_size((300, 50), (100, 100)), (100, 17));
    }

    #[test]
    fn test_thumbnail_size_degenerate_side_is_one_pixel() {
        assert_eq!(thumbnail_size((1000, 1), (10, 10)), (10, 1));
    }

    #[test]
    fn test_thumbnail_resizes_image() {
        let logo = Logo::from_image(RgbaImage::from_pixel(200, 100, Rgba([255, 0, 0, 255])));
        let thumb = logo.thumbnail(50, 50);
        assert_eq!(thumb.dimensions(), (50, 25));
        assert_eq!(logo.dimensions(), (200, 100));
    }

    #[test]
    fn test_paste_respects_alpha() {
        let mut logo_image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        logo_image.put_pixel(1, 0, Rgba([255, 0, 0, 0]));
        let logo = Logo::from_image(logo_image);

        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        logo.paste(&mut canvas, 1, 1);

        assert_eq!(*canvas.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(2, 1), Rgba([0, 0, 255, 255]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Logo::load("does/not/exist.png").unwrap_err();
        assert!(matches!(err, Error::Logo { .. }));
        assert!(err.to_string().contains("does/not/exist.png"));
    }

    #[test]
    fn test_load_jpeg_logo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fav.jpg");
        image::RgbImage::from_pixel(10, 4, image::Rgb([200, 40, 90]))
            .save(&path)
            .unwrap();

        let logo = Logo::load(&path).unwrap();
        assert_eq!(logo.dimensions(), (10, 4));
        assert_eq!(logo.thumbnail(5, 5).dimensions(), (5, 2));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fav.png");
        RgbaImage::from_pixel(8, 6, Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let logo = Logo::load(&path).unwrap();
        assert_eq!(logo.dimensions(), (8, 6));
        assert_eq!(logo.source(), path.as_path());
    }
}
