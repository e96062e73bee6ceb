//! Two-pass poster layout.
//!
//! Pass one ([`LayoutEngine::probe_header`]) wraps the category text only to
//! learn how tall the header must be. Pass two ([`LayoutEngine::plan`]) paints
//! the header at that height and re-wraps the category for placement. The
//! result is a [`PosterPlan`] whose commands a backend executes in order.

use core::fmt;
use poster_press::{
    compose_info_line, format_amount, split_subtitle, CanvasSize, GridSpec, Item, PosterRequest,
    Rgb, ThemePalette, MAX_GRID_CELLS,
};
use serde::Serialize;

use crate::fit::{shrink_to_fit, wrap_and_shrink, wrap_greedy, FittedFace, WrapLimits, WrappedText};
use crate::layout_config::{EmptyCellStyle, HeaderConfig, LayoutConfig, MetaLayout};
use crate::measure::{TextExtent, TextMeasurer};
use crate::render_ir::{
    DrawCommand, GradientCommand, PanelCommand, Rect, StrikeMode, Stroke, TextCommand,
    WatermarkCommand,
};

/// Result of the header probe pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderProbe {
    /// Category lines produced by wrap-and-shrink.
    pub category_lines: usize,
    /// Size the category settled on.
    pub category_size_px: i32,
    /// Header band height in pixels.
    pub header_height: i32,
}

/// One grid cell in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellPlan {
    pub row: u32,
    pub column: u32,
    /// Card rectangle after insetting the cell.
    pub card: Rect,
    /// Index into the request's items, `None` for an empty cell.
    pub item_index: Option<usize>,
}

/// Finished layout: region geometry plus ordered draw commands.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PosterPlan {
    pub canvas: CanvasSize,
    pub header: HeaderProbe,
    pub footer_height: i32,
    /// Content card behind the grid.
    pub container: Rect,
    pub cells: Vec<CellPlan>,
    pub commands: Vec<DrawCommand>,
}

impl PosterPlan {
    /// Text commands in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    /// Cells holding an item.
    pub fn populated_cells(&self) -> impl Iterator<Item = &CellPlan> {
        self.cells.iter().filter(|cell| cell.item_index.is_some())
    }

    /// Pretty JSON snapshot of the plan for debugging and regression fixtures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Errors for layouts that cannot be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Canvas has a zero dimension.
    EmptyCanvas { width: u32, height: u32 },
    /// Canvas dimension does not fit signed pixel coordinates.
    CanvasTooLarge { width: u32, height: u32 },
    /// Grid exceeds the cell cap or leaves cells under one pixel.
    GridTooLarge { columns: u32, rows: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCanvas { width, height } => {
                write!(f, "canvas has zero area ({}x{})", width, height)
            }
            Self::CanvasTooLarge { width, height } => {
                write!(f, "canvas too large ({}x{})", width, height)
            }
            Self::GridTooLarge { columns, rows } => {
                write!(f, "grid too large ({}x{})", columns, rows)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Header band height for a category wrapped into `category_lines` lines.
///
/// Grows by `per_line_ratio` per extra line and is capped at `max_ratio` of the
/// canvas height.
pub fn header_height(canvas_height: i32, category_lines: usize, config: &HeaderConfig) -> i32 {
    let extra_lines = category_lines.saturating_sub(1) as f64;
    let ratio = (config.base_ratio + extra_lines * config.per_line_ratio).min(config.max_ratio);
    px(canvas_height, ratio)
}

/// Truncate `total * ratio` to whole pixels.
fn px(total: i32, ratio: f64) -> i32 {
    (f64::from(total) * ratio) as i32
}

/// Truncated `min(a_total * a_ratio, b_total * b_ratio)`, at least 1px.
fn min_px(a_total: i32, a_ratio: f64, b_total: i32, b_ratio: f64) -> i32 {
    let size = (f64::from(a_total) * a_ratio).min(f64::from(b_total) * b_ratio) as i32;
    size.max(1)
}

/// Grid with zero dimensions raised to one, bounded by [`MAX_GRID_CELLS`].
#[derive(Clone, Copy, Debug)]
struct GridDims {
    columns: u32,
    rows: u32,
}

impl GridDims {
    fn from_spec(spec: GridSpec) -> Result<Self, LayoutError> {
        let dims = Self {
            columns: spec.columns.max(1),
            rows: spec.rows.max(1),
        };
        if GridSpec::new(dims.columns, dims.rows).capacity() > MAX_GRID_CELLS {
            return Err(LayoutError::GridTooLarge {
                columns: spec.columns,
                rows: spec.rows,
            });
        }
        Ok(dims)
    }

    fn cells(self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

#[derive(Clone, Copy, Debug)]
struct Canvas {
    width: i32,
    height: i32,
}

impl Canvas {
    fn from_size(size: CanvasSize) -> Result<Self, LayoutError> {
        if size.is_empty() {
            return Err(LayoutError::EmptyCanvas {
                width: size.width,
                height: size.height,
            });
        }
        match (i32::try_from(size.width), i32::try_from(size.height)) {
            (Ok(width), Ok(height)) => Ok(Self { width, height }),
            _ => Err(LayoutError::CanvasTooLarge {
                width: size.width,
                height: size.height,
            }),
        }
    }

    fn center_x(self) -> i32 {
        self.width / 2
    }
}

/// Poster layout engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Probe pass: size the header from the category's wrapped line count.
    pub fn probe_header<M: TextMeasurer>(
        &self,
        request: &PosterRequest,
        measurer: &M,
    ) -> Result<HeaderProbe, LayoutError> {
        let canvas = Canvas::from_size(request.canvas)?;
        let category = split_subtitle(&request.subtitle).category;
        let wrapped = self.wrap_category(measurer, canvas, category, request.subtitle_max_lines);
        let header = HeaderProbe {
            category_lines: wrapped.lines.len(),
            category_size_px: wrapped.size_px,
            header_height: header_height(canvas.height, wrapped.lines.len(), &self.config.header),
        };
        log::debug!(
            "header probe: {} category line(s) at {}px -> header {}px",
            header.category_lines,
            header.category_size_px,
            header.header_height
        );
        Ok(header)
    }

    /// Full layout: probe the header, then place and emit every element.
    pub fn plan<M: TextMeasurer>(
        &self,
        request: &PosterRequest,
        measurer: &M,
    ) -> Result<PosterPlan, LayoutError> {
        let canvas = Canvas::from_size(request.canvas)?;
        let palette: &ThemePalette = &request.palette;
        let dims = GridDims::from_spec(request.grid)?;
        let mut commands = Vec::with_capacity(16 + dims.cells() + request.visible_items().len() * 5);

        commands.push(DrawCommand::Gradient(GradientCommand {
            rect: Rect::new(0, 0, canvas.width, canvas.height),
            top: palette.bg_top,
            bottom: palette.bg_bottom,
        }));

        let header = self.probe_header(request, measurer)?;
        self.emit_header(&mut commands, request, measurer, canvas, header);

        let footer_height = px(canvas.height, self.config.footer.height_ratio);
        let container = self.container_rect(canvas, header.header_height, footer_height);
        commands.push(DrawCommand::Panel(PanelCommand {
            rect: container,
            radius: self.config.grid.container_radius,
            fill: self.config.grid.container_fill,
            outline: Some(Stroke {
                color: palette.card_border,
                width: self.config.grid.container_outline_width,
            }),
        }));

        let cells = self.emit_grid(&mut commands, request, measurer, canvas, container, dims)?;
        self.emit_footer(&mut commands, request, measurer, canvas, footer_height);

        Ok(PosterPlan {
            canvas: request.canvas,
            header,
            footer_height,
            container,
            cells,
            commands,
        })
    }

    fn wrap_category<M: TextMeasurer>(
        &self,
        measurer: &M,
        canvas: Canvas,
        category: &str,
        max_lines: usize,
    ) -> WrappedText<M::Face> {
        let header = &self.config.header;
        wrap_and_shrink(
            measurer,
            category,
            WrapLimits::new(
                px(canvas.width, header.category_width_ratio),
                max_lines,
                px(canvas.height, header.category_start_ratio),
            ),
        )
    }

    fn emit_header<M: TextMeasurer>(
        &self,
        commands: &mut Vec<DrawCommand>,
        request: &PosterRequest,
        measurer: &M,
        canvas: Canvas,
        header: HeaderProbe,
    ) {
        let cfg = &self.config.header;
        let palette = &request.palette;
        let header_h = header.header_height;
        let cx = canvas.center_x();

        commands.push(DrawCommand::Gradient(GradientCommand {
            rect: Rect::new(0, 0, canvas.width, header_h),
            top: palette.header_top,
            bottom: palette.header_bottom,
        }));

        let title = shrink_to_fit(
            measurer,
            &request.title,
            px(canvas.width, cfg.title_width_ratio),
            px(canvas.height, cfg.title_start_ratio),
        );
        let title_y = px(header_h, cfg.title_top_ratio);
        let title_extent = push_centered(
            commands,
            measurer,
            &title,
            cx,
            title_y,
            &request.title,
            palette.title_color,
            StrikeMode::Single,
        );
        let mut y = title_y + title_extent.height + px(canvas.height, cfg.title_gap_ratio);

        let parts = split_subtitle(&request.subtitle);
        if !parts.date.is_empty() {
            let date = shrink_to_fit(
                measurer,
                parts.date,
                px(canvas.width, cfg.date_width_ratio),
                px(canvas.height, cfg.date_start_ratio),
            );
            let extent = push_centered(
                commands,
                measurer,
                &date,
                cx,
                y,
                parts.date,
                palette.subtitle_color,
                StrikeMode::Single,
            );
            y += extent.height + px(canvas.height, cfg.date_gap_ratio);
        }

        // Recomputed rather than reused from the probe: placement starts from
        // the finalized header, not the probe's state.
        let category =
            self.wrap_category(measurer, canvas, parts.category, request.subtitle_max_lines);
        let fitted = FittedFace {
            face: category.face,
            size_px: category.size_px,
        };
        for line in &category.lines {
            let extent = push_centered(
                commands,
                measurer,
                &fitted,
                cx,
                y,
                line,
                palette.subtitle_color,
                StrikeMode::Single,
            );
            y += extent.height + px(canvas.height, cfg.category_gap_ratio);
        }
    }

    fn container_rect(&self, canvas: Canvas, header_h: i32, footer_h: i32) -> Rect {
        let grid = &self.config.grid;
        let top = header_h - px(canvas.height, grid.container_overlap_ratio);
        let margin = px(canvas.width, grid.container_margin_ratio);
        let bottom = canvas.height - footer_h - px(canvas.height, grid.container_bottom_gap_ratio);
        Rect::from_corners(margin, top, canvas.width - margin, bottom)
    }

    fn emit_grid<M: TextMeasurer>(
        &self,
        commands: &mut Vec<DrawCommand>,
        request: &PosterRequest,
        measurer: &M,
        canvas: Canvas,
        container: Rect,
        dims: GridDims,
    ) -> Result<Vec<CellPlan>, LayoutError> {
        let grid = &self.config.grid;
        let card_cfg = &self.config.card;

        let grid_left = container.x + px(canvas.width, grid.padding_x_ratio);
        let grid_right = container.right() - px(canvas.width, grid.padding_x_ratio);
        let grid_top = container.y + px(canvas.height, grid.padding_y_ratio);
        let grid_bottom = container.bottom() - px(canvas.height, grid.padding_y_ratio);

        let GridDims { columns, rows } = dims;
        // Both dimensions are bounded by the cell cap, so they fit in i32.
        let cell_w = (grid_right - grid_left).div_euclid(columns as i32);
        let cell_h = (grid_bottom - grid_top).div_euclid(rows as i32);
        if cell_w < 1 || cell_h < 1 {
            return Err(LayoutError::GridTooLarge {
                columns: request.grid.columns,
                rows: request.grid.rows,
            });
        }

        let sizes = CardSizes {
            code_start: min_px(
                cell_h,
                card_cfg.code_size_cell_ratio,
                canvas.width,
                card_cfg.code_size_width_ratio,
            ),
            meta: min_px(
                cell_h,
                card_cfg.meta_size_cell_ratio,
                canvas.width,
                card_cfg.meta_size_width_ratio,
            ),
            watermark: min_px(
                cell_h,
                card_cfg.watermark_size_cell_ratio,
                canvas.width,
                card_cfg.watermark_size_width_ratio,
            ),
            code_padding: px(cell_w, card_cfg.code_padding_ratio),
            canvas_width: canvas.width,
        };

        let visible = request.visible_items();
        if request.items.len() > visible.len() {
            log::warn!(
                "grid {}x{} shows {} of {} items",
                columns,
                rows,
                visible.len(),
                request.items.len()
            );
        }

        let inset_x = px(cell_w, grid.cell_inset_x_ratio);
        let inset_y = px(cell_h, grid.cell_inset_y_ratio);
        let mut cells = Vec::with_capacity(dims.cells());
        for row in 0..rows {
            for column in 0..columns {
                let index = (row * columns + column) as usize;
                let c = column as i32;
                let r = row as i32;
                let card = Rect::from_corners(
                    grid_left + c * cell_w + inset_x,
                    grid_top + r * cell_h + inset_y,
                    grid_left + (c + 1) * cell_w - inset_x,
                    grid_top + (r + 1) * cell_h - inset_y,
                );
                let item = visible.get(index);
                match item {
                    Some(item) => {
                        self.emit_card(commands, request, measurer, card, sizes, item);
                    }
                    None if grid.empty_cells == EmptyCellStyle::Panel => {
                        commands.push(self.card_panel(&request.palette, card));
                    }
                    None => {}
                }
                cells.push(CellPlan {
                    row,
                    column,
                    card,
                    item_index: item.map(|_| index),
                });
            }
        }
        Ok(cells)
    }

    fn card_panel(&self, palette: &ThemePalette, card: Rect) -> DrawCommand {
        DrawCommand::Panel(PanelCommand {
            rect: card,
            radius: self.config.grid.cell_radius,
            fill: palette.card_fill,
            outline: Some(Stroke {
                color: palette.card_border,
                width: self.config.grid.cell_outline_width,
            }),
        })
    }

    fn emit_card<M: TextMeasurer>(
        &self,
        commands: &mut Vec<DrawCommand>,
        request: &PosterRequest,
        measurer: &M,
        card: Rect,
        sizes: CardSizes,
        item: &Item,
    ) {
        let cfg = &self.config.card;
        let labels = &self.config.labels;
        // Card geometry follows the inclusive-corner convention.
        let (x1, y1, x2, y2) = (card.x, card.y, card.right(), card.bottom());
        let card_h = y2 - y1;
        let cx = (x1 + x2).div_euclid(2);

        commands.push(self.card_panel(&request.palette, card));

        let code = item.display_code();
        let code_y = y1 + px(card_h, cfg.code_top_ratio);
        let code_face = shrink_to_fit(
            measurer,
            code,
            (x2 - x1) - sizes.code_padding,
            sizes.code_start,
        );
        let code_extent = push_centered(
            commands,
            measurer,
            &code_face,
            cx,
            code_y,
            code,
            cfg.code_color,
            StrikeMode::Single,
        );

        let meta = FittedFace {
            face: measurer.face(sizes.meta),
            size_px: sizes.meta,
        };
        let mut meta_y = code_y + code_extent.height + px(card_h, cfg.meta_gap_ratio);
        let primary = format!("{}{}", labels.primary, format_amount(item.primary));
        let secondary = format!("{}{}", labels.secondary, format_amount(item.secondary));
        match cfg.meta_layout {
            MetaLayout::TwoLines => {
                let extent = push_centered(
                    commands,
                    measurer,
                    &meta,
                    cx,
                    meta_y,
                    &primary,
                    cfg.meta_color,
                    StrikeMode::Double,
                );
                meta_y += extent.height + px(card_h, cfg.meta_line_gap_ratio);
                push_centered(
                    commands,
                    measurer,
                    &meta,
                    cx,
                    meta_y,
                    &secondary,
                    cfg.meta_color,
                    StrikeMode::Double,
                );
            }
            MetaLayout::MergedWhenEqual => {
                let line = if item.amounts_match() {
                    primary
                } else {
                    format!("{}{}{}", primary, labels.merged_separator, secondary)
                };
                push_centered(
                    commands,
                    measurer,
                    &meta,
                    cx,
                    meta_y,
                    &line,
                    cfg.meta_color,
                    StrikeMode::Double,
                );
            }
        }

        let Some(label) = request.branding_label.as_deref().filter(|s| !s.is_empty()) else {
            return;
        };
        let face = measurer.face(sizes.watermark);
        let extent = measurer.measure(label, &face);
        let x = cx - extent.width / 2;
        let y = y2 - extent.height - px(card_h, cfg.watermark_bottom_ratio);
        let layer_top = y1.min(y);
        commands.push(DrawCommand::Watermark(WatermarkCommand {
            layer: Rect::new(0, layer_top, sizes.canvas_width, y2 - layer_top + 1),
            x,
            y,
            text: label.to_string(),
            size_px: sizes.watermark,
            color: cfg.watermark_color,
            alpha: cfg.watermark_alpha,
        }));
    }

    fn emit_footer<M: TextMeasurer>(
        &self,
        commands: &mut Vec<DrawCommand>,
        request: &PosterRequest,
        measurer: &M,
        canvas: Canvas,
        footer_h: i32,
    ) {
        let cfg = &self.config.footer;
        let palette = &request.palette;
        let cx = canvas.center_x();
        let footer_top = canvas.height - footer_h;

        commands.push(DrawCommand::Gradient(GradientCommand {
            rect: Rect::new(0, footer_top, canvas.width, footer_h),
            top: palette.footer_top,
            bottom: palette.footer_bottom,
        }));

        let mut y = footer_top + px(footer_h, cfg.info_top_ratio);
        let info = compose_info_line(
            request.location.as_deref(),
            request.hotline.as_deref(),
            self.config.labels.location,
            self.config.labels.hotline,
        );
        if let Some(info) = info {
            let size = px(canvas.height, cfg.info_size_ratio).max(1);
            let face = FittedFace {
                face: measurer.face(size),
                size_px: size,
            };
            let extent = push_centered(
                commands,
                measurer,
                &face,
                cx,
                y,
                &info,
                palette.subtitle_color,
                StrikeMode::Single,
            );
            y += extent.height + px(canvas.height, cfg.info_gap_ratio);
        }

        let size = px(canvas.height, cfg.tagline_size_ratio).max(1);
        let tagline = FittedFace {
            face: measurer.face(size),
            size_px: size,
        };
        let lines = wrap_greedy(
            measurer,
            &request.tagline,
            &tagline.face,
            px(canvas.width, cfg.tagline_width_ratio),
        );
        for line in lines.iter().take(cfg.tagline_max_lines) {
            let extent = push_centered(
                commands,
                measurer,
                &tagline,
                cx,
                y,
                line,
                palette.tagline_color,
                StrikeMode::Single,
            );
            y += extent.height + px(canvas.height, cfg.tagline_gap_ratio);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct CardSizes {
    code_start: i32,
    meta: i32,
    watermark: i32,
    code_padding: i32,
    canvas_width: i32,
}

#[allow(clippy::too_many_arguments)]
fn push_centered<M: TextMeasurer>(
    commands: &mut Vec<DrawCommand>,
    measurer: &M,
    face: &FittedFace<M::Face>,
    center_x: i32,
    y: i32,
    text: &str,
    color: Rgb,
    strike: StrikeMode,
) -> TextExtent {
    let extent = measurer.measure(text, &face.face);
    commands.push(DrawCommand::Text(TextCommand {
        x: center_x - extent.width / 2,
        y,
        text: text.to_string(),
        size_px: face.size_px,
        color,
        strike,
    }));
    extent
}
