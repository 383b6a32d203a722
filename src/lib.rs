//! rivermap renders a world map annotated with per-continent river statistics.
//!
//! Each continent gets a filled circle sized by its main river count and a ring whose stroke
//! width follows its tributary count, placed at a fixed relative position on the background
//! map. A static legend explains both scales, and hovering a circle shows a tooltip.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`DataTable`] (header-addressed CSV) and [`MapImage`] (decoded raster)
//! 2. **Prepare**: [`Visualizer::setup`] parses [`ContinentRecord`]s and resolves colors once
//! 3. **Draw**: [`Visualizer::draw_frame`] issues calls against any [`DrawSurface`] each frame
//! 4. **Rasterize** (optional): [`CpuSurface`] turns the calls into a [`FrameRGBA`]
//!
//! Missing color or position entries never fail a frame; they surface as [`Diagnostic`]s and
//! `tracing` warnings. Malformed datasets fail at load time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;
mod scene;
mod viz;

pub use crate::assets::dataset::DataTable;
pub use crate::assets::decode::{MapImage, decode_image, load_image};
pub use crate::foundation::core::{Canvas, FrameInput, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::diagnostics::Diagnostic;
pub use crate::foundation::error::{RivermapError, RivermapResult};
pub use crate::foundation::math::{arrow_segments, contain_fit, map_range};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::recorder::{DrawOp, RecordingSurface};
pub use crate::render::surface::{DrawSurface, HAlign, StrokeStyle, TextStyle, VAlign};
pub use crate::scene::config::{
    ColorEntry, ColorTable, Labels, PositionEntry, PositionTable, VizConfig,
};
pub use crate::scene::records::{
    COL_CONTINENT, COL_RIVER_COUNT, COL_TRIBUTARY_SUM, ContinentRecord, ResolvedColors,
    assign_colors, prepare,
};
pub use crate::viz::legend::{
    ARROW_HEAD_PX, LEGEND_CIRCLE_SCALE, LEGEND_MAX_RIVERS, LEGEND_MIN_RIVERS,
    LEGEND_RING_WEIGHT_PER_TRIBUTARY, draw_arrow, draw_legend, legend_ring_weight,
    tributary_range,
};
pub use crate::viz::overlay::{
    CIRCLE_MAX_PX, CIRCLE_MIN_PX, Marker, OVERLAY_SCALE, OverlayInput, OverlayReport,
    RING_PADDING_PX, RING_WEIGHT_PER_TRIBUTARY, circle_base_diameter, circle_diameter,
    draw_overlay, hit_test, layout_markers, ring_weight, river_count_range,
};
pub use crate::viz::visualizer::{
    BACKGROUND, FrameReport, TITLE_ORIGIN, TITLE_SIZE_PX, Visualizer,
};
