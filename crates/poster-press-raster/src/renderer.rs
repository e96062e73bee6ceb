use image::RgbImage;
use poster_press::PosterRequest;
use poster_press_render::{
    DrawCommand, LayoutConfig, LayoutEngine, PosterPlan, StrikeMode, TextCommand, TextMeasurer,
    WatermarkCommand,
};
use std::path::PathBuf;

use crate::canvas::{AlphaLayer, Canvas, CoverageTarget};
use crate::encode::{write_jpeg, EncodeOptions};
use crate::font::{FaceSource, FontConfig, TypefaceResolver};
use crate::paint::{draw_text, paint_gradient, paint_panel};
use crate::RasterError;

use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;

/// Summary of a poster written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Encoded file size.
    pub bytes: u64,
    pub face_source: FaceSource,
}

/// Lays out and rasterizes poster requests.
///
/// Holds configuration only. Fonts are resolved fresh for every render, so
/// concurrent renders share nothing mutable.
#[derive(Clone, Debug, Default)]
pub struct PosterRenderer {
    engine: LayoutEngine,
    fonts: FontConfig,
    encode: EncodeOptions,
}

impl PosterRenderer {
    pub fn new(layout: LayoutConfig, fonts: FontConfig) -> Self {
        Self {
            engine: LayoutEngine::new(layout),
            fonts,
            encode: EncodeOptions::default(),
        }
    }

    pub fn with_encode_options(mut self, encode: EncodeOptions) -> Self {
        self.encode = encode;
        self
    }

    pub fn layout(&self) -> &LayoutConfig {
        self.engine.config()
    }

    pub fn fonts(&self) -> &FontConfig {
        &self.fonts
    }

    /// Layout only, measured with the fonts a render would use.
    pub fn plan(&self, request: &PosterRequest) -> Result<PosterPlan, RasterError> {
        let resolver = TypefaceResolver::new(self.fonts.clone());
        Ok(self.engine.plan(request, &resolver)?)
    }

    /// Render to an in-memory RGB image.
    pub fn render_image(&self, request: &PosterRequest) -> Result<RgbImage, RasterError> {
        let resolver = TypefaceResolver::new(self.fonts.clone());
        let plan = self.engine.plan(request, &resolver)?;
        paint_plan(&plan, &resolver)
    }

    /// Render and write the JPEG to `request.output_path`.
    pub fn render(&self, request: &PosterRequest) -> Result<RenderOutput, RasterError> {
        let resolver = TypefaceResolver::new(self.fonts.clone());
        let plan = self.engine.plan(request, &resolver)?;
        let image = paint_plan(&plan, &resolver)?;
        let bytes = write_jpeg(&image, &request.output_path, self.encode)?;
        log::info!(
            "rendered {} ({} item(s), theme {})",
            request.output_path.display(),
            plan.populated_cells().count(),
            request.palette.name
        );
        Ok(RenderOutput {
            path: request.output_path.clone(),
            width: image.width(),
            height: image.height(),
            bytes,
            face_source: resolver.source(),
        })
    }
}

/// Execute every command of `plan` in order onto a fresh canvas.
///
/// `fonts` must be the measurer the plan was laid out with.
pub fn paint_plan(plan: &PosterPlan, fonts: &TypefaceResolver) -> Result<RgbImage, RasterError> {
    let mut canvas = Canvas::new(plan.canvas.width, plan.canvas.height)?;
    for command in &plan.commands {
        match command {
            DrawCommand::Gradient(gradient) => paint_gradient(&mut canvas, gradient),
            DrawCommand::Panel(panel) => paint_panel(&mut canvas, panel),
            DrawCommand::Text(text) => paint_text(&mut canvas, fonts, text),
            DrawCommand::Watermark(mark) => paint_watermark(&mut canvas, fonts, mark),
        }
    }
    Ok(canvas.into_rgb())
}

fn paint_text<T>(target: &mut T, fonts: &TypefaceResolver, command: &TextCommand)
where
    T: CoverageTarget + DrawTarget<Color = Rgb888, Error = Infallible>,
{
    if command.text.is_empty() {
        return;
    }
    let face = fonts.face(command.size_px);
    draw_text(target, &face, &command.text, command.x, command.y, command.color);
    if command.strike == StrikeMode::Double {
        draw_text(
            target,
            &face,
            &command.text,
            command.x + 1,
            command.y,
            command.color,
        );
    }
}

fn paint_watermark(canvas: &mut Canvas, fonts: &TypefaceResolver, command: &WatermarkCommand) {
    let Some(mut layer) = AlphaLayer::new(command.layer, command.alpha) else {
        return;
    };
    let face = fonts.face(command.size_px);
    draw_text(
        &mut layer,
        &face,
        &command.text,
        command.x,
        command.y,
        command.color,
    );
    canvas.composite(&layer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_press::{CanvasSize, Item, Rgb, ThemeId};

    fn request(items: Vec<Item>) -> PosterRequest {
        PosterRequest::new(
            "unused.jpg",
            "吉祥号码",
            "2025年10月1日｜国庆专场",
            "限时抢购",
            items,
        )
        .with_canvas(CanvasSize::new(360, 480))
        .with_palette(ThemeId::NationalDay.palette().into())
        .with_branding("南昌移动")
        .with_contact(Some("南昌".into()), Some("13507094669".into()))
    }

    fn renderer() -> PosterRenderer {
        PosterRenderer::new(LayoutConfig::default(), FontConfig::builtin_only())
    }

    #[test]
    fn image_matches_canvas_with_header_and_footer_bands() {
        let request = request(vec![Item::new("13800138000", Some(1000.0), Some(58.0))]);
        let image = renderer().render_image(&request).unwrap();
        assert_eq!(image.dimensions(), (360, 480));
        let top = request.palette.header_top;
        assert_eq!(image.get_pixel(0, 0).0, [top.0, top.1, top.2]);
        let bottom = request.palette.footer_bottom;
        assert_eq!(image.get_pixel(0, 479).0, [bottom.0, bottom.1, bottom.2]);
    }

    #[test]
    fn populated_card_carries_code_ink() {
        let request = request(vec![Item::new("13800138000", Some(1000.0), Some(58.0))]);
        let renderer = renderer();
        let plan = renderer.plan(&request).unwrap();
        let code = plan
            .texts()
            .find(|text| text.text == "13800138000")
            .unwrap()
            .clone();
        let image = renderer.render_image(&request).unwrap();
        let Rgb(r, g, b) = renderer.layout().card.code_color;
        let inked = (0..20)
            .flat_map(|dy| (0..60).map(move |dx| (code.x + dx, code.y + dy)))
            .filter(|&(x, y)| image.get_pixel(x as u32, y as u32).0 == [r, g, b])
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn watermark_is_translucent() {
        let request = request(vec![Item::new("13800138000", Some(1000.0), Some(58.0))]);
        let renderer = renderer();
        let plan = renderer.plan(&request).unwrap();
        let mark = plan
            .commands
            .iter()
            .find_map(DrawCommand::as_watermark)
            .unwrap()
            .clone();
        let image = renderer.render_image(&request).unwrap();
        let Rgb(r, g, b) = mark.color;
        let mut touched = false;
        for y in mark.y..mark.y + 20 {
            for x in mark.x..mark.x + 80 {
                let px = image.get_pixel(x as u32, y as u32).0;
                assert_ne!(px, [r, g, b]);
                touched |= px[2] > px[0] && px != [255, 255, 255];
            }
        }
        assert!(touched);
    }

    #[test]
    fn empty_canvas_is_a_layout_error() {
        let request = request(Vec::new()).with_canvas(CanvasSize::new(0, 100));
        assert!(matches!(
            renderer().render_image(&request),
            Err(RasterError::Layout(_))
        ));
    }
}
