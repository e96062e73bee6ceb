use serde::{Deserialize, Serialize};

/// Tight pixel bounding box of a rendered string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

impl TextExtent {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Face loading and text measurement hook shared by layout and backends.
///
/// Layout decisions are only as stable as this trait: for identical
/// `(text, face)` pairs `measure` must return identical extents, and the face
/// returned for a size must be the one the backend later draws with.
pub trait TextMeasurer {
    /// Loaded face at one pixel size.
    type Face: Clone;

    /// Resolve a face at `size_px`. Never fails; implementations fall back to a
    /// built-in face when nothing better loads.
    fn face(&self, size_px: i32) -> Self::Face;

    /// Tight bounding box of `text` drawn with `face` and no stroke.
    fn measure(&self, text: &str, face: &Self::Face) -> TextExtent;

    /// Width-only convenience over [`measure`](Self::measure).
    fn width(&self, text: &str, face: &Self::Face) -> i32 {
        self.measure(text, face).width
    }
}
