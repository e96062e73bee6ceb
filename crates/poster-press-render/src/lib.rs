//! Text fitting, draw-command IR, and two-pass poster layout for `poster-press`.
//!
//! Layout is backend-agnostic: every measurement goes through a
//! [`TextMeasurer`], and the result is a [`PosterPlan`] of [`DrawCommand`]s that
//! a raster backend paints in order.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod fit;
mod layout_config;
mod layout_engine;
mod measure;
mod render_ir;

pub use fit::{
    shrink_to_fit, wrap_and_shrink, wrap_greedy, FittedFace, WrapLimits, WrappedText,
    SHRINK_FLOOR_PX, SIZE_STEP_PX, WRAP_FLOOR_PX,
};
pub use layout_config::{
    CardConfig, CardLabels, EmptyCellStyle, FooterConfig, GridConfig, HeaderConfig,
    LayoutConfig, MetaLayout, RenderProfile,
};
pub use layout_engine::{header_height, CellPlan, HeaderProbe, LayoutEngine, LayoutError, PosterPlan};
pub use measure::{TextExtent, TextMeasurer};
pub use render_ir::{
    DrawCommand, GradientCommand, PanelCommand, Rect, StrikeMode, Stroke, TextCommand,
    WatermarkCommand,
};
