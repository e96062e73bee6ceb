//! Font-size fitting and per-character line wrapping.

use crate::measure::TextMeasurer;

/// Smallest size [`shrink_to_fit`] will try.
pub const SHRINK_FLOOR_PX: i32 = 14;
/// Default smallest size for [`wrap_and_shrink`].
pub const WRAP_FLOOR_PX: i32 = 16;
/// Size decrement between fitting attempts.
pub const SIZE_STEP_PX: i32 = 2;

/// Face chosen by a fitting pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedFace<F> {
    pub face: F,
    pub size_px: i32,
}

/// Face and lines chosen by [`wrap_and_shrink`].
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedText<F> {
    pub face: F,
    pub size_px: i32,
    pub lines: Vec<String>,
}

/// Bounds for [`wrap_and_shrink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapLimits {
    pub max_width: i32,
    pub max_lines: usize,
    pub start_px: i32,
    pub floor_px: i32,
}

impl WrapLimits {
    pub fn new(max_width: i32, max_lines: usize, start_px: i32) -> Self {
        Self {
            max_width,
            max_lines,
            start_px,
            floor_px: WRAP_FLOOR_PX,
        }
    }
}

/// Largest size `<= start_px` at which `text` fits `max_width` on one line.
///
/// Steps down by [`SIZE_STEP_PX`]. When nothing fits, the face at
/// [`SHRINK_FLOOR_PX`] is returned and the text overflows.
pub fn shrink_to_fit<M: TextMeasurer>(
    measurer: &M,
    text: &str,
    max_width: i32,
    start_px: i32,
) -> FittedFace<M::Face> {
    let mut size = start_px;
    while size >= SHRINK_FLOOR_PX {
        let face = measurer.face(size);
        if measurer.width(text, &face) <= max_width {
            return FittedFace {
                face,
                size_px: size,
            };
        }
        size -= SIZE_STEP_PX;
    }
    FittedFace {
        face: measurer.face(SHRINK_FLOOR_PX),
        size_px: SHRINK_FLOOR_PX,
    }
}

/// Break `text` into lines no wider than `max_width`, one character at a time.
///
/// No word boundaries are assumed. A character wider than the limit on its own
/// is emitted as a single-character line.
pub fn wrap_greedy<M: TextMeasurer>(
    measurer: &M,
    text: &str,
    face: &M::Face,
    max_width: i32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buf = String::new();
    for ch in text.chars() {
        buf.push(ch);
        if measurer.width(&buf, face) <= max_width {
            continue;
        }
        buf.pop();
        if !buf.is_empty() {
            lines.push(core::mem::take(&mut buf));
        }
        buf.push(ch);
    }
    if !buf.is_empty() {
        lines.push(buf);
    }
    lines
}

/// Wrap `text`, shrinking the face until the line budget and width both hold.
///
/// Stops at `limits.floor_px`; the last wrap is returned even if it still
/// overflows.
pub fn wrap_and_shrink<M: TextMeasurer>(
    measurer: &M,
    text: &str,
    limits: WrapLimits,
) -> WrappedText<M::Face> {
    let mut size = limits.start_px;
    let mut face = measurer.face(size);
    let mut lines = wrap_greedy(measurer, text, &face, limits.max_width);
    while size > limits.floor_px && violates(measurer, &lines, &face, limits) {
        size -= SIZE_STEP_PX;
        face = measurer.face(size);
        lines = wrap_greedy(measurer, text, &face, limits.max_width);
    }
    WrappedText {
        face,
        size_px: size,
        lines,
    }
}

fn violates<M: TextMeasurer>(
    measurer: &M,
    lines: &[String],
    face: &M::Face,
    limits: WrapLimits,
) -> bool {
    lines.len() > limits.max_lines
        || lines
            .iter()
            .any(|line| measurer.width(line, face) > limits.max_width)
}
