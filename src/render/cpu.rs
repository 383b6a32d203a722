use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::assets::decode::MapImage;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{RivermapError, RivermapResult};
use crate::render::backend::FrameRGBA;
use crate::render::surface::{DrawSurface, HAlign, StrokeStyle, TextStyle, VAlign};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

const CIRCLE_TOLERANCE: f64 = 0.1;

struct FontSlot {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

struct ImagePaint {
    key: usize,
    paint: vello_cpu::Image,
}

/// CPU raster surface powered by `vello_cpu` for shapes and text.
///
/// Text needs font bytes; without them text calls are no-ops.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    font: Option<FontSlot>,
    image_cache: Option<ImagePaint>,
    warned_no_font: bool,
}

impl CpuSurface {
    /// Surface covering `canvas`, optionally able to draw text with `font_bytes`.
    pub fn new(canvas: Canvas, font_bytes: Option<&[u8]>) -> RivermapResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| RivermapError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| RivermapError::render("canvas height exceeds u16"))?;

        let font = match font_bytes {
            Some(bytes) => Some(FontSlot {
                engine: TextLayoutEngine::from_font_bytes(bytes)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    0,
                ),
            }),
            None => None,
        };

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            font,
            image_cache: None,
            warned_no_font: false,
        })
    }

    /// Rasterize everything drawn so far and read back the frame.
    pub fn finish(mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn reset_state(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn set_stroke(&mut self, stroke: StrokeStyle) {
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(stroke.width).with_caps(vello_cpu::kurbo::Cap::Round),
        );
        self.ctx.set_paint(color_to_cpu(stroke.color));
    }

    fn image_paint_for(&mut self, image: &MapImage) -> RivermapResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&image.rgba8_premul) as usize;
        if let Some(p) = self.image_cache.as_ref().filter(|p| p.key == key) {
            return Ok(p.paint.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache = Some(ImagePaint {
            key,
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self, color: Rgba8) -> RivermapResult<()> {
        self.reset_state();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> RivermapResult<()> {
        self.reset_state();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) -> RivermapResult<()> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Ok(());
        }
        self.reset_state();
        self.ctx.set_paint(color_to_cpu(color));
        let path = vello_cpu::kurbo::Circle::new(point_to_cpu(center), diameter * 0.5)
            .to_path(CIRCLE_TOLERANCE);
        self.ctx.fill_path(&path);
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        diameter: f64,
        stroke: StrokeStyle,
    ) -> RivermapResult<()> {
        if !(diameter.is_finite() && diameter > 0.0 && stroke.width > 0.0) {
            return Ok(());
        }
        self.reset_state();
        self.set_stroke(stroke);
        let path = vello_cpu::kurbo::Circle::new(point_to_cpu(center), diameter * 0.5)
            .to_path(CIRCLE_TOLERANCE);
        self.ctx.stroke_path(&path);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: StrokeStyle) -> RivermapResult<()> {
        if stroke.width <= 0.0 {
            return Ok(());
        }
        self.reset_state();
        self.set_stroke(stroke);
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        self.ctx.stroke_path(&path);
        Ok(())
    }

    fn text(&mut self, text: &str, origin: Point, style: TextStyle) -> RivermapResult<()> {
        let Some(slot) = self.font.as_mut() else {
            if !self.warned_no_font {
                tracing::debug!("no font loaded; skipping text");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let layout = slot
            .engine
            .layout_line(text, style.size_px, TextBrushRgba8::from(style.color))?;
        let dx = match style.h_align {
            HAlign::Left => 0.0,
            HAlign::Center => -f64::from(layout.width()) * 0.5,
            HAlign::Right => -f64::from(layout.width()),
        };
        let dy = match style.v_align {
            VAlign::Top => 0.0,
            VAlign::Center => -f64::from(layout.height()) * 0.5,
        };

        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x + dx,
            origin.y + dy,
        )));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&slot.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn image(&mut self, image: &MapImage, dest: Rect) -> RivermapResult<()> {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.image_paint_for(image)?;
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));

        self.reset_state();
        self.ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(
                    dest.width() / iw,
                    dest.height() / ih,
                ),
        );
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        Ok(())
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> RivermapResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RivermapError::render("map image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RivermapError::render("map image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(RivermapError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
