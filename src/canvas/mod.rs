//! Drawing primitives for decorating rendered symbols
//!
//! Shapes take inclusive pixel bounds and are clipped to the canvas. Every
//! shape writes its colour as-is, alpha included, without blending.

pub mod logo;

pub use logo::Logo;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut};
use imageproc::rect::Rect;

/// Page background, `#0f172a`
pub const NAVY: Rgba<u8> = Rgba([0x0f, 0x17, 0x2a, 0xff]);
/// Card surface, `#1e293b`
pub const SLATE: Rgba<u8> = Rgba([0x1e, 0x29, 0x3b, 0xff]);
/// Primary brand blue, `#3B82F6`
pub const BLUE: Rgba<u8> = Rgba([0x3b, 0x82, 0xf6, 0xff]);
/// Lighter brand blue, `#60a5fa`
pub const LIGHT_BLUE: Rgba<u8> = Rgba([0x60, 0xa5, 0xfa, 0xff]);

/// Axis-aligned box with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Leftmost column
    pub left: i32,
    /// Topmost row
    pub top: i32,
    /// Rightmost column
    pub right: i32,
    /// Bottom row
    pub bottom: i32,
}

impl Bounds {
    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: i32) -> Self {
        Self {
            left: self.left + amount,
            top: self.top + amount,
            right: self.right - amount,
            bottom: self.bottom - amount,
        }
    }

    fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Fill a rectangle with rounded corners.
pub fn fill_rounded_rect(canvas: &mut RgbaImage, bounds: Bounds, radius: i32, color: Rgba<u8>) {
    if bounds.is_empty() {
        return;
    }

    let (w, h) = (bounds.width(), bounds.height());
    let r = radius.clamp(0, (w.min(h) - 1) / 2);

    if w > 2 * r {
        draw_filled_rect_mut(
            canvas,
            Rect::at(bounds.left + r, bounds.top).of_size((w - 2 * r) as u32, h as u32),
            color,
        );
    }
    if h > 2 * r {
        draw_filled_rect_mut(
            canvas,
            Rect::at(bounds.left, bounds.top + r).of_size(w as u32, (h - 2 * r) as u32),
            color,
        );
    }
    if r > 0 {
        for (cx, cy) in [
            (bounds.left + r, bounds.top + r),
            (bounds.right - r, bounds.top + r),
            (bounds.left + r, bounds.bottom - r),
            (bounds.right - r, bounds.bottom - r),
        ] {
            draw_filled_circle_mut(canvas, (cx, cy), r, color);
        }
    }
}

/// Rounded rectangle with an outline of `width` pixels drawn inside `bounds`.
pub fn outlined_rounded_rect(
    canvas: &mut RgbaImage,
    bounds: Bounds,
    radius: i32,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    width: i32,
) {
    fill_rounded_rect(canvas, bounds, radius, outline);
    fill_rounded_rect(canvas, bounds.inset(width), radius - width, fill);
}

/// Disc of `radius` around `center` with an outline of `width` pixels on its rim.
pub fn outlined_disc(
    canvas: &mut RgbaImage,
    center: (i32, i32),
    radius: i32,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    width: i32,
) {
    draw_filled_circle_mut(canvas, center, radius, outline);
    if radius > width {
        draw_filled_circle_mut(canvas, center, radius - width, fill);
    }
}

/// Stroke a ring `width` pixels wide whose outer edge sits at `radius`.
///
/// Ring pixels are replaced by `color`, so a translucent colour leaves
/// translucent pixels in the canvas.
pub fn stroke_ring(
    canvas: &mut RgbaImage,
    center: (i32, i32),
    radius: i32,
    width: i32,
    color: Rgba<u8>,
) {
    for step in 0..width.max(0) {
        let r = radius - step;
        if r < 0 {
            break;
        }
        draw_hollow_circle_mut(canvas, center, r, color);
    }
}
