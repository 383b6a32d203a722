use crate::assets::decode::MapImage;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::RivermapResult;
use crate::render::surface::{DrawSurface, StrokeStyle, TextStyle};

/// A single recorded drawing call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// [`DrawSurface::clear`].
    Clear {
        /// Fill color.
        color: Rgba8,
    },
    /// [`DrawSurface::fill_rect`].
    FillRect {
        /// Rectangle bounds.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// [`DrawSurface::fill_circle`].
    FillCircle {
        /// Circle center.
        center: Point,
        /// Circle diameter.
        diameter: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// [`DrawSurface::stroke_circle`].
    StrokeCircle {
        /// Circle center.
        center: Point,
        /// Circle diameter.
        diameter: f64,
        /// Outline style.
        stroke: StrokeStyle,
    },
    /// [`DrawSurface::line`].
    Line {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Stroke style.
        stroke: StrokeStyle,
    },
    /// [`DrawSurface::text`].
    Text {
        /// Text content.
        text: String,
        /// Anchor point.
        origin: Point,
        /// Size, color and anchoring.
        style: TextStyle,
    },
    /// [`DrawSurface::image`].
    Image {
        /// Native image width.
        width: u32,
        /// Native image height.
        height: u32,
        /// Destination rectangle.
        dest: Rect,
    },
}

/// Surface that records drawing calls instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take the recorded calls, leaving the recorder empty.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Rgba8) -> RivermapResult<()> {
        self.ops.push(DrawOp::Clear { color });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> RivermapResult<()> {
        self.ops.push(DrawOp::FillRect { rect, color });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) -> RivermapResult<()> {
        self.ops.push(DrawOp::FillCircle {
            center,
            diameter,
            color,
        });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        diameter: f64,
        stroke: StrokeStyle,
    ) -> RivermapResult<()> {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            diameter,
            stroke,
        });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: StrokeStyle) -> RivermapResult<()> {
        self.ops.push(DrawOp::Line { from, to, stroke });
        Ok(())
    }

    fn text(&mut self, text: &str, origin: Point, style: TextStyle) -> RivermapResult<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            style,
        });
        Ok(())
    }

    fn image(&mut self, image: &MapImage, dest: Rect) -> RivermapResult<()> {
        self.ops.push(DrawOp::Image {
            width: image.width,
            height: image.height,
            dest,
        });
        Ok(())
    }
}
