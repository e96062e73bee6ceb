use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::RequestError;
use crate::theme::ThemePalette;

/// Output raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1440,
        }
    }
}

/// Largest grid, in cells, a request may ask for.
pub const MAX_GRID_CELLS: usize = 4096;

/// Item grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of cells, which caps how many items render.
    pub fn capacity(self) -> usize {
        (self.columns as usize).saturating_mul(self.rows as usize)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 3,
        }
    }
}

/// One card on the poster grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display code. Rendered as text even when it looks numeric.
    pub code: String,
    /// First amount (up-front deposit).
    #[serde(default)]
    pub primary: Option<f64>,
    /// Second amount (monthly minimum).
    #[serde(default)]
    pub secondary: Option<f64>,
}

impl Item {
    pub fn new(code: impl Into<String>, primary: Option<f64>, secondary: Option<f64>) -> Self {
        Self {
            code: code.into(),
            primary,
            secondary,
        }
    }

    /// Code with surrounding whitespace removed.
    pub fn display_code(&self) -> &str {
        self.code.trim()
    }

    /// Whether both amounts are present and equal within 1e-6.
    pub fn amounts_match(&self) -> bool {
        match (self.primary, self.secondary) {
            (Some(a), Some(b)) => (a - b).abs() < 1e-6,
            _ => false,
        }
    }
}

/// Fully-resolved input for one poster render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosterRequest {
    /// Where the encoded image is written.
    pub output_path: PathBuf,
    pub title: String,
    /// Date and category joined by `｜` or `|`.
    pub subtitle: String,
    pub tagline: String,
    /// Cards in row-major order. Entries past the grid capacity are ignored.
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub canvas: CanvasSize,
    /// Watermark text drawn translucently inside each card.
    #[serde(default)]
    pub branding_label: Option<String>,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hotline: Option<String>,
    /// Line budget for the category part of the subtitle.
    #[serde(default = "default_subtitle_max_lines")]
    pub subtitle_max_lines: usize,
    #[serde(default)]
    pub palette: Arc<ThemePalette>,
}

fn default_subtitle_max_lines() -> usize {
    2
}

impl PosterRequest {
    /// Request with default canvas, grid and palette.
    pub fn new(
        output_path: impl Into<PathBuf>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        tagline: impl Into<String>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            tagline: tagline.into(),
            items,
            canvas: CanvasSize::default(),
            branding_label: None,
            grid: GridSpec::default(),
            location: None,
            hotline: None,
            subtitle_max_lines: default_subtitle_max_lines(),
            palette: Arc::new(ThemePalette::default()),
        }
    }

    /// Decode a request from JSON and validate its geometry.
    pub fn from_json_str(json: &str) -> Result<Self, RequestError> {
        let request: Self = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    pub fn with_palette(mut self, palette: Arc<ThemePalette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_branding(mut self, label: impl Into<String>) -> Self {
        self.branding_label = Some(label.into());
        self
    }

    pub fn with_contact(mut self, location: Option<String>, hotline: Option<String>) -> Self {
        self.location = location;
        self.hotline = hotline;
        self
    }

    /// Reject geometry that cannot produce a raster.
    ///
    /// A grid with zero columns or rows is rejected here; the layout engine
    /// itself treats such a grid as one column/row. Grids above
    /// [`MAX_GRID_CELLS`] are rejected as well.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.canvas.is_empty() {
            return Err(RequestError::EmptyCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if self.grid.capacity() == 0 {
            return Err(RequestError::EmptyGrid {
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        if self.grid.capacity() > MAX_GRID_CELLS {
            return Err(RequestError::GridTooLarge {
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        Ok(())
    }

    /// Items that will occupy grid cells, in row-major order.
    pub fn visible_items(&self) -> &[Item] {
        let end = self.items.len().min(self.grid.capacity());
        &self.items[..end]
    }
}
