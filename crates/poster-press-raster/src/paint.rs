//! Painters for the draw-command IR.

use ab_glyph::{Font, ScaleFont};
use core::convert::Infallible;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{DrawTarget, Point, Primitive, Size};
use embedded_graphics::primitives::{
    PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use poster_press::Rgb;
use poster_press_render::{GradientCommand, PanelCommand, Rect};

use crate::canvas::{Canvas, CoverageTarget};
use crate::font::{layout_glyphs, Face};

fn to_rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.0, color.1, color.2)
}

/// Row `y` of a `height`-row top-to-bottom luma ramp.
fn mask_value(y: u32, height: u32) -> u8 {
    if height <= 1 {
        return 0;
    }
    (255 * u64::from(y) / u64::from(height - 1)) as u8
}

/// `width`x`height` vertical gradient from `top` to `bottom`.
///
/// The ramp is a luma mask whose row `y` holds `255 * y / (height - 1)`, used
/// to blend the two solid colors. A single row is solid `top`.
pub fn vertical_gradient(width: u32, height: u32, top: Rgb, bottom: Rgb) -> RgbaImage {
    let mask = GrayImage::from_fn(1, height, |_, y| Luma([mask_value(y, height)]));
    RgbaImage::from_fn(width, height, |_, y| {
        let Rgb(r, g, b) = top.mix(bottom, mask.get_pixel(0, y).0[0]);
        Rgba([r, g, b, 255])
    })
}

/// Paste a gradient at the command's rectangle, clipped to the canvas.
pub fn paint_gradient(canvas: &mut Canvas, command: &GradientCommand) {
    let rect = command.rect;
    if rect.is_empty() {
        return;
    }
    let gradient = vertical_gradient(
        rect.width as u32,
        rect.height as u32,
        command.top,
        command.bottom,
    );
    image::imageops::replace(
        canvas.image_mut(),
        &gradient,
        i64::from(rect.x),
        i64::from(rect.y),
    );
}

fn eg_rect(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x, rect.y),
        Size::new(rect.width as u32, rect.height as u32),
    )
}

/// Filled rounded rectangle with the outline stroked inside its bounds.
pub fn paint_panel<T>(target: &mut T, command: &PanelCommand)
where
    T: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    if command.rect.is_empty() {
        return;
    }
    let mut style = PrimitiveStyleBuilder::new().fill_color(to_rgb888(command.fill));
    if let Some(stroke) = command.outline {
        style = style
            .stroke_color(to_rgb888(stroke.color))
            .stroke_width(stroke.width)
            .stroke_alignment(StrokeAlignment::Inside);
    }
    let radius = Size::new(command.radius, command.radius);
    let Ok(()) = RoundedRectangle::with_equal_corners(eg_rect(command.rect), radius)
        .into_styled(style.build())
        .draw(target);
}

/// Draw one pass of `text` with its layout box's top-left at `(x, y)`.
pub fn draw_text<T>(target: &mut T, face: &Face, text: &str, x: i32, y: i32, color: Rgb)
where
    T: CoverageTarget + DrawTarget<Color = Rgb888, Error = Infallible>,
{
    match face {
        Face::Outline { font, scale, .. } => {
            let baseline = y as f32 + font.as_scaled(*scale).ascent();
            let (glyphs, _) = layout_glyphs(font, *scale, text, x as f32, baseline);
            for glyph in glyphs {
                let Some(outlined) = font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    target.plot(left + gx as i32, top + gy as i32, color, coverage);
                });
            }
        }
        Face::Builtin { font, .. } => {
            let style = MonoTextStyle::new(*font, to_rgb888(color));
            let Ok(_) = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
                .draw(target);
        }
    }
}
