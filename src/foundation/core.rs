use crate::foundation::error::{RivermapError, RivermapResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Drawable area in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with both dimensions `> 0`.
    pub fn new(width: u32, height: u32) -> RivermapResult<Self> {
        if width == 0 || height == 0 {
            return Err(RivermapError::validation(
                "canvas width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Canvas dimensions as a floating point [`Size`].
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Pure red, used when a continent has no configured color.
    pub const FALLBACK_RED: Self = Self::opaque(255, 0, 0);

    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGB channels and an explicit alpha.
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from an `[r, g, b]` triple.
    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        Self::opaque(rgb[0], rgb[1], rgb[2])
    }

    /// Drop alpha and return the `[r, g, b]` triple.
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Per-frame host input: the current canvas and pointer position.
///
/// The pointer is `None` until the host has sampled one; no hover hit-test runs without it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Current canvas dimensions. Resizes are picked up by passing a new value here.
    pub canvas: Canvas,
    /// Pointer position in canvas coordinates.
    pub pointer: Option<Point>,
}

impl FrameInput {
    /// Frame input without a sampled pointer.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            pointer: None,
        }
    }

    /// Return a copy with the pointer set to `(x, y)`.
    pub fn with_pointer(mut self, x: f64, y: f64) -> Self {
        self.pointer = Some(Point::new(x, y));
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
