//! Layout constants for the two poster engine generations.
//!
//! Ratios are fractions of canvas width/height (or of the region named in the
//! field doc) and are truncated to whole pixels at use.

use poster_press::{GridSpec, Rgb};
use serde::{Deserialize, Serialize};

/// Engine generation whose card layout and spacing to reproduce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderProfile {
    /// Two amount lines per card, 3x3 grid, roomier header spacing.
    #[default]
    Current,
    /// Merged amount line when both amounts match, 3x4 grid, tighter header.
    Legacy,
}

impl RenderProfile {
    /// Grid the profile was designed around.
    pub fn default_grid(self) -> GridSpec {
        match self {
            Self::Current => GridSpec::new(3, 3),
            Self::Legacy => GridSpec::new(3, 4),
        }
    }
}

/// How a card presents its two amounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaLayout {
    /// Primary and secondary on separate lines, always.
    TwoLines,
    /// One line; only the primary amount when both amounts match.
    MergedWhenEqual,
}

/// Treatment of grid cells with no item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyCellStyle {
    /// Paint the card panel with no content.
    Panel,
    /// Leave the cell unpainted.
    Blank,
}

/// Fixed label text placed around card amounts and contact details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardLabels {
    pub primary: &'static str,
    pub secondary: &'static str,
    /// Separator between amounts on a merged line.
    pub merged_separator: &'static str,
    pub location: &'static str,
    pub hotline: &'static str,
}

impl Default for CardLabels {
    fn default() -> Self {
        Self {
            primary: "预存",
            secondary: "低消",
            merged_separator: " / ",
            location: "归属地：",
            hotline: "选号热线：",
        }
    }
}

/// Header band: height policy and title/date/category placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderConfig {
    /// Header height for a single category line (of canvas height).
    pub base_ratio: f64,
    /// Extra header height per category line past the first.
    pub per_line_ratio: f64,
    /// Header height cap.
    pub max_ratio: f64,
    /// Title top offset (of header height).
    pub title_top_ratio: f64,
    pub title_start_ratio: f64,
    pub title_width_ratio: f64,
    /// Gap between title and date line.
    pub title_gap_ratio: f64,
    pub date_start_ratio: f64,
    pub date_width_ratio: f64,
    /// Gap between date line and first category line.
    pub date_gap_ratio: f64,
    pub category_start_ratio: f64,
    pub category_width_ratio: f64,
    /// Gap after each category line.
    pub category_gap_ratio: f64,
}

/// Content card and grid placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Card overlap into the header (of canvas height).
    pub container_overlap_ratio: f64,
    /// Horizontal card inset (of canvas width).
    pub container_margin_ratio: f64,
    /// Gap between card bottom and footer (of canvas height).
    pub container_bottom_gap_ratio: f64,
    pub container_radius: u32,
    pub container_fill: Rgb,
    pub container_outline_width: u32,
    pub padding_x_ratio: f64,
    pub padding_y_ratio: f64,
    /// Cell inset on each side (of cell width).
    pub cell_inset_x_ratio: f64,
    /// Cell inset on each side (of cell height).
    pub cell_inset_y_ratio: f64,
    pub cell_radius: u32,
    pub cell_outline_width: u32,
    pub empty_cells: EmptyCellStyle,
}

/// Per-card text placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardConfig {
    /// Code start size (of cell height), capped by `code_size_width_ratio`.
    pub code_size_cell_ratio: f64,
    pub code_size_width_ratio: f64,
    /// Horizontal padding removed from the code's width budget (of cell width).
    pub code_padding_ratio: f64,
    /// Code top offset (of card height).
    pub code_top_ratio: f64,
    pub code_color: Rgb,
    pub meta_size_cell_ratio: f64,
    pub meta_size_width_ratio: f64,
    /// Gap between code and first amount line (of card height).
    pub meta_gap_ratio: f64,
    /// Gap between the two amount lines (of card height).
    pub meta_line_gap_ratio: f64,
    pub meta_color: Rgb,
    pub meta_layout: MetaLayout,
    pub watermark_size_cell_ratio: f64,
    pub watermark_size_width_ratio: f64,
    /// Watermark distance from the card bottom (of card height).
    pub watermark_bottom_ratio: f64,
    pub watermark_color: Rgb,
    pub watermark_alpha: u8,
}

/// Footer band placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FooterConfig {
    pub height_ratio: f64,
    /// Info line top offset (of footer height).
    pub info_top_ratio: f64,
    pub info_size_ratio: f64,
    pub info_gap_ratio: f64,
    pub tagline_size_ratio: f64,
    pub tagline_width_ratio: f64,
    pub tagline_max_lines: usize,
    pub tagline_gap_ratio: f64,
}

/// Complete layout policy for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub profile: RenderProfile,
    pub header: HeaderConfig,
    pub grid: GridConfig,
    pub card: CardConfig,
    pub footer: FooterConfig,
    pub labels: CardLabels,
}

impl LayoutConfig {
    /// Constants for the given engine generation.
    pub fn for_profile(profile: RenderProfile) -> Self {
        let current = Self::default();
        match profile {
            RenderProfile::Current => current,
            RenderProfile::Legacy => Self {
                profile,
                header: HeaderConfig {
                    base_ratio: 0.24,
                    title_top_ratio: 0.22,
                    title_gap_ratio: 0.010,
                    date_gap_ratio: 0.010,
                    category_gap_ratio: 0.002,
                    ..current.header
                },
                grid: GridConfig {
                    empty_cells: EmptyCellStyle::Blank,
                    ..current.grid
                },
                card: CardConfig {
                    code_top_ratio: 0.15,
                    meta_gap_ratio: 0.10,
                    meta_layout: MetaLayout::MergedWhenEqual,
                    ..current.card
                },
                ..current
            },
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            profile: RenderProfile::Current,
            header: HeaderConfig {
                base_ratio: 0.26,
                per_line_ratio: 0.03,
                max_ratio: 0.34,
                title_top_ratio: 0.20,
                title_start_ratio: 0.070,
                title_width_ratio: 0.9,
                title_gap_ratio: 0.020,
                date_start_ratio: 0.031,
                date_width_ratio: 0.9,
                date_gap_ratio: 0.018,
                category_start_ratio: 0.036,
                category_width_ratio: 0.88,
                category_gap_ratio: 0.008,
            },
            grid: GridConfig {
                container_overlap_ratio: 0.03,
                container_margin_ratio: 0.05,
                container_bottom_gap_ratio: 0.02,
                container_radius: 28,
                container_fill: Rgb::WHITE,
                container_outline_width: 2,
                padding_x_ratio: 0.05,
                padding_y_ratio: 0.02,
                cell_inset_x_ratio: 0.04,
                cell_inset_y_ratio: 0.06,
                cell_radius: 18,
                cell_outline_width: 2,
                empty_cells: EmptyCellStyle::Panel,
            },
            card: CardConfig {
                code_size_cell_ratio: 0.50,
                code_size_width_ratio: 0.066,
                code_padding_ratio: 0.10,
                code_top_ratio: 0.14,
                code_color: Rgb(28, 35, 52),
                meta_size_cell_ratio: 0.18,
                meta_size_width_ratio: 0.028,
                meta_gap_ratio: 0.08,
                meta_line_gap_ratio: 0.02,
                meta_color: Rgb(88, 96, 118),
                meta_layout: MetaLayout::TwoLines,
                watermark_size_cell_ratio: 0.16,
                watermark_size_width_ratio: 0.024,
                watermark_bottom_ratio: 0.06,
                watermark_color: Rgb(55, 120, 240),
                watermark_alpha: 72,
            },
            footer: FooterConfig {
                height_ratio: 0.15,
                info_top_ratio: 0.18,
                info_size_ratio: 0.026,
                info_gap_ratio: 0.006,
                tagline_size_ratio: 0.038,
                tagline_width_ratio: 0.92,
                tagline_max_lines: 3,
                tagline_gap_ratio: 0.008,
            },
            labels: CardLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_profile_overrides_only_divergent_constants() {
        let current = LayoutConfig::for_profile(RenderProfile::Current);
        let legacy = LayoutConfig::for_profile(RenderProfile::Legacy);
        assert_eq!(legacy.profile, RenderProfile::Legacy);
        assert_eq!(legacy.header.base_ratio, 0.24);
        assert_eq!(legacy.header.max_ratio, current.header.max_ratio);
        assert_eq!(legacy.card.meta_layout, MetaLayout::MergedWhenEqual);
        assert_eq!(legacy.footer, current.footer);
        assert_eq!(RenderProfile::Legacy.default_grid(), GridSpec::new(3, 4));
    }
}
