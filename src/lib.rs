//! Data model and theme palettes for fixed-size promotional posters.
//!
//! This crate holds everything a render call consumes: the [`PosterRequest`]
//! record, its [`Item`] cards, and the [`ThemePalette`] colors. Layout lives in
//! `poster-press-render`; painting and encoding live in `poster-press-raster`.

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

mod copy;
mod error;
mod request;
mod theme;

pub use copy::{
    compose_info_line, format_amount, split_subtitle, SubtitleParts, FULL_WIDTH_BAR,
    HALF_WIDTH_BAR,
};
pub use error::RequestError;
pub use request::{CanvasSize, GridSpec, Item, PosterRequest, MAX_GRID_CELLS};
pub use theme::{Rgb, ThemeId, ThemePalette, ThemeTable};
