use crate::assets::dataset::DataTable;
use crate::assets::decode::MapImage;
use crate::foundation::core::{FrameInput, Point, Rect, Rgba8, Size};
use crate::foundation::diagnostics::Diagnostic;
use crate::foundation::error::RivermapResult;
use crate::foundation::math::contain_fit;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::render::surface::{DrawSurface, TextStyle};
use crate::scene::config::VizConfig;
use crate::scene::records::{ContinentRecord, ResolvedColors, assign_colors, prepare};
use crate::viz::legend::draw_legend;
use crate::viz::overlay::{OverlayInput, draw_overlay};

/// Canvas clear color.
pub const BACKGROUND: Rgba8 = Rgba8::BLACK;
/// Title anchor (top-left).
pub const TITLE_ORIGIN: Point = Point::new(50.0, 30.0);
/// Title font size.
pub const TITLE_SIZE_PX: f32 = 28.0;

/// Outcome of one drawn frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Size the map was drawn at.
    pub display: Size,
    /// Continents whose tooltip was drawn, in draw order.
    pub hovered: Vec<String>,
    /// Advisory findings raised while drawing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Prepared visualization state: built once by [`Visualizer::setup`], then drawn every frame.
#[derive(Clone, Debug)]
pub struct Visualizer {
    config: VizConfig,
    map: MapImage,
    records: Vec<ContinentRecord>,
    colors: ResolvedColors,
    setup_diagnostics: Vec<Diagnostic>,
}

impl Visualizer {
    /// Parse records from `table` and resolve their colors.
    ///
    /// Fails only on malformed data or configuration; missing color entries are recorded in
    /// [`Visualizer::setup_diagnostics`].
    #[tracing::instrument(skip_all, fields(map_w = map.width, map_h = map.height))]
    pub fn setup(table: &DataTable, map: MapImage, config: VizConfig) -> RivermapResult<Self> {
        config.validate()?;
        let records = prepare(table)?;
        let (colors, setup_diagnostics) = assign_colors(&records, &config.color_table);
        tracing::info!(
            records = records.len(),
            warnings = setup_diagnostics.len(),
            "visualizer ready"
        );
        Ok(Self {
            config,
            map,
            records,
            colors,
            setup_diagnostics,
        })
    }

    /// Parsed continent records, in dataset order.
    pub fn records(&self) -> &[ContinentRecord] {
        &self.records
    }

    /// Resolved continent colors.
    pub fn colors(&self) -> &ResolvedColors {
        &self.colors
    }

    /// Diagnostics raised during setup.
    pub fn setup_diagnostics(&self) -> &[Diagnostic] {
        &self.setup_diagnostics
    }

    /// Active configuration.
    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    /// Background map image.
    pub fn map(&self) -> &MapImage {
        &self.map
    }

    /// Size the map is drawn at on `canvas`.
    pub fn display_size(&self, canvas: Size) -> Size {
        contain_fit(self.map.size(), canvas)
    }

    /// Draw one frame: background, title, fitted map, overlay and legend.
    #[tracing::instrument(skip(self, surface), level = "debug")]
    pub fn draw_frame(
        &self,
        surface: &mut dyn DrawSurface,
        input: FrameInput,
    ) -> RivermapResult<FrameReport> {
        let canvas = input.canvas.size();
        surface.clear(BACKGROUND)?;
        surface.text(
            &self.config.title,
            TITLE_ORIGIN,
            TextStyle::new(TITLE_SIZE_PX, Rgba8::WHITE),
        )?;

        let display = self.display_size(canvas);
        surface.image(&self.map, Rect::from_origin_size(Point::ORIGIN, display))?;

        let overlay = draw_overlay(
            surface,
            &OverlayInput {
                display,
                native: self.map.size(),
                records: &self.records,
                colors: &self.colors,
                positions: &self.config.position_table,
                labels: &self.config.labels,
                pointer: input.pointer,
            },
        )?;

        draw_legend(
            surface,
            canvas.height,
            &self.config.color_table,
            &self.records,
            &self.config.labels,
        )?;

        Ok(FrameReport {
            display,
            hovered: overlay.hovered,
            diagnostics: overlay.diagnostics,
        })
    }

    /// Rasterize one frame on the CPU. Text is drawn only when `font_bytes` is given.
    pub fn render_rgba(
        &self,
        input: FrameInput,
        font_bytes: Option<&[u8]>,
    ) -> RivermapResult<(FrameRGBA, FrameReport)> {
        let mut surface = CpuSurface::new(input.canvas, font_bytes)?;
        let report = self.draw_frame(&mut surface, input)?;
        Ok((surface.finish(), report))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viz/visualizer.rs"]
mod tests;
