use crate::assets::decode::MapImage;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::RivermapResult;

/// Horizontal text anchor relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    /// Origin is the left edge.
    #[default]
    Left,
    /// Origin is the horizontal center.
    Center,
    /// Origin is the right edge.
    Right,
}

/// Vertical text anchor relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    /// Origin is the top of the first line.
    #[default]
    Top,
    /// Origin is the vertical center of the text block.
    Center,
}

/// Text fill, size and anchoring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Horizontal anchor.
    pub h_align: HAlign,
    /// Vertical anchor.
    pub v_align: VAlign,
}

impl TextStyle {
    /// Left/top anchored text.
    pub fn new(size_px: f32, color: Rgba8) -> Self {
        Self {
            size_px,
            color,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
        }
    }

    /// Return a copy with different anchors.
    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

/// Outline color and thickness.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels, centered on the outline.
    pub width: f64,
}

/// Drawing capability consumed by the visualization.
///
/// Every call is self-contained: colors, stroke widths and text styles are passed explicitly
/// instead of living in ambient drawing state. Circles are addressed by diameter.
pub trait DrawSurface {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba8) -> RivermapResult<()>;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> RivermapResult<()>;

    /// Fill a circle without outline.
    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) -> RivermapResult<()>;

    /// Outline a circle without fill.
    fn stroke_circle(
        &mut self,
        center: Point,
        diameter: f64,
        stroke: StrokeStyle,
    ) -> RivermapResult<()>;

    /// Stroke a straight segment.
    fn line(&mut self, from: Point, to: Point, stroke: StrokeStyle) -> RivermapResult<()>;

    /// Draw a single line of text anchored at `origin`.
    fn text(&mut self, text: &str, origin: Point, style: TextStyle) -> RivermapResult<()>;

    /// Blit `image` scaled into `dest`.
    fn image(&mut self, image: &MapImage, dest: Rect) -> RivermapResult<()>;
}
