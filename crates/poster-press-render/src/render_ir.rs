use poster_press::Rgb;
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle. `width`/`height` count pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering the inclusive box `(x1, y1)..=(x2, y2)`.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: (x2 - x1 + 1).max(0),
            height: (y2 - y1 + 1).max(0),
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Outline stroke drawn inside a panel's bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgb,
    pub width: u32,
}

/// How many passes a text command is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeMode {
    #[default]
    Single,
    /// Drawn twice, the second pass one pixel to the right.
    Double,
}

/// Vertical two-color gradient fill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientCommand {
    pub rect: Rect,
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Filled rounded rectangle with optional outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelCommand {
    pub rect: Rect,
    pub radius: u32,
    pub fill: Rgb,
    pub outline: Option<Stroke>,
}

/// Opaque text positioned by the top-left of its layout box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCommand {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub size_px: i32,
    pub color: Rgb,
    pub strike: StrikeMode,
}

/// Translucent text drawn on its own transparent layer, then composited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkCommand {
    /// Bounds of the transparent layer in canvas coordinates.
    pub layer: Rect,
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub size_px: i32,
    pub color: Rgb,
    pub alpha: u8,
}

/// Backend-agnostic paint operation, executed in plan order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    Gradient(GradientCommand),
    Panel(PanelCommand),
    Text(TextCommand),
    Watermark(WatermarkCommand),
}

impl DrawCommand {
    pub fn as_text(&self) -> Option<&TextCommand> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_panel(&self) -> Option<&PanelCommand> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn as_watermark(&self) -> Option<&WatermarkCommand> {
        match self {
            Self::Watermark(mark) => Some(mark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_corners_round_trip() {
        let rect = Rect::from_corners(10, 20, 19, 20);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 1);
        assert_eq!(rect.right(), 19);
        assert_eq!(rect.bottom(), 20);
    }

    #[test]
    fn inverted_corners_are_empty() {
        assert!(Rect::from_corners(10, 10, 5, 20).is_empty());
    }

    #[test]
    fn containment_checks_all_edges() {
        let outer = Rect::new(0, 0, 100, 100);
        assert!(outer.contains(Rect::new(10, 10, 90, 90)));
        assert!(!outer.contains(Rect::new(10, 10, 91, 10)));
    }
}
