//! Raster backend for `poster-press-render` plans.
//!
//! Resolves typefaces, measures and draws text, paints gradients and rounded
//! panels, composites translucent watermark layers, and encodes the finished
//! canvas as JPEG.

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

mod canvas;
mod encode;
mod error;
mod font;
mod paint;
mod preview;
mod renderer;

pub use canvas::{AlphaLayer, Canvas, CoverageTarget};
pub use encode::{write_jpeg, EncodeOptions, DEFAULT_JPEG_QUALITY};
pub use error::RasterError;
pub use font::{Face, FaceSource, FontConfig, TypefaceResolver};
pub use paint::{draw_text, paint_gradient, paint_panel, vertical_gradient};
pub use preview::{preview_request, render_theme_previews, PreviewOutcome};
pub use renderer::{paint_plan, PosterRenderer, RenderOutput};
