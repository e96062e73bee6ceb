use core::convert::Infallible;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use image::{Rgba, RgbImage, RgbaImage};
use poster_press::Rgb;
use poster_press_render::Rect;

use crate::RasterError;

fn rgb888(color: Rgb888) -> Rgb {
    Rgb(color.r(), color.g(), color.b())
}

fn blend_channel(dst: u8, src: u8, coverage: f32) -> u8 {
    let value = f32::from(dst) + (f32::from(src) - f32::from(dst)) * coverage;
    value.round().clamp(0.0, 255.0) as u8
}

/// Anti-aliased pixel sink used by outline text drawing.
pub trait CoverageTarget {
    /// Paint `color` at `(x, y)` with `coverage` in `0.0..=1.0`. Out of bounds is ignored.
    fn plot(&mut self, x: i32, y: i32, color: Rgb, coverage: f32);
}

/// Opaque RGBA drawing surface for one poster.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas; the first gradient paints every pixel opaque.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let bytes = u64::from(width) * u64::from(height) * 4;
        if width == 0 || height == 0 || usize::try_from(bytes).is_err() || bytes > isize::MAX as u64
        {
            return Err(RasterError::CanvasAllocation { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Some(Rgb(r, g, b))
    }

    /// Alpha-composite a layer at its canvas origin.
    pub fn composite(&mut self, layer: &AlphaLayer) {
        image::imageops::overlay(
            &mut self.image,
            &layer.image,
            i64::from(layer.bounds.x),
            i64::from(layer.bounds.y),
        );
    }

    /// Drop the alpha channel for encoding.
    pub fn into_rgb(self) -> RgbImage {
        image::DynamicImage::ImageRgba8(self.image).to_rgb8()
    }

    fn in_bounds(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }
}

impl CoverageTarget for Canvas {
    fn plot(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        let Some((x, y)) = self.in_bounds(x, y) else {
            return;
        };
        let coverage = coverage.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x, y);
        let [r, g, b, _] = pixel.0;
        *pixel = Rgba([
            blend_channel(r, color.0, coverage),
            blend_channel(g, color.1, coverage),
            blend_channel(b, color.2, coverage),
            255,
        ]);
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.in_bounds(point.x, point.y) {
                let Rgb(r, g, b) = rgb888(color);
                self.image.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }
        Ok(())
    }
}

/// Transparent layer for translucent text. Drawing uses canvas coordinates.
///
/// Every painted pixel carries the layer's alpha, so overlapping strokes do
/// not darken each other the way repeated blends onto the canvas would.
#[derive(Clone, Debug)]
pub struct AlphaLayer {
    image: RgbaImage,
    bounds: Rect,
    alpha: u8,
}

impl AlphaLayer {
    /// `None` when `bounds` is empty.
    pub fn new(bounds: Rect, alpha: u8) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        let width = u32::try_from(bounds.width).ok()?;
        let height = u32::try_from(bounds.height).ok()?;
        Some(Self {
            image: RgbaImage::new(width, height),
            bounds,
            alpha,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn local(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let lx = u32::try_from(x - self.bounds.x).ok()?;
        let ly = u32::try_from(y - self.bounds.y).ok()?;
        (lx < self.image.width() && ly < self.image.height()).then_some((lx, ly))
    }
}

impl CoverageTarget for AlphaLayer {
    fn plot(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        let Some((x, y)) = self.local(x, y) else {
            return;
        };
        let alpha = (f32::from(self.alpha) * coverage.clamp(0.0, 1.0)).round() as u8;
        let pixel = self.image.get_pixel_mut(x, y);
        if alpha > pixel.0[3] {
            *pixel = Rgba([color.0, color.1, color.2, alpha]);
        }
    }
}

impl OriginDimensions for AlphaLayer {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for AlphaLayer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let color = rgb888(color);
            self.plot(point.x, point.y, color, 1.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::Point;

    #[test]
    fn oversized_canvas_is_rejected() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(RasterError::CanvasAllocation { .. })
        ));
        assert!(Canvas::new(4, 4).is_ok());
    }

    #[test]
    fn coverage_blends_toward_color() {
        let mut canvas = Canvas::new(2, 1).unwrap();
        canvas
            .draw_iter([Pixel(Point::new(0, 0), Rgb888::new(0, 0, 0))])
            .unwrap();
        canvas.plot(0, 0, Rgb(200, 100, 50), 0.5);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb(100, 50, 25)));
        canvas.plot(-1, 0, Rgb::WHITE, 1.0);
        canvas.plot(5, 5, Rgb::WHITE, 1.0);
    }

    #[test]
    fn layer_composites_at_its_origin_with_fixed_alpha() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let white = (0..4)
            .flat_map(|y| (0..4).map(move |x| Pixel(Point::new(x, y), Rgb888::WHITE)))
            .collect::<Vec<_>>();
        canvas.draw_iter(white).unwrap();

        let mut layer = AlphaLayer::new(Rect::new(2, 2, 2, 2), 128).unwrap();
        layer
            .draw_iter([
                Pixel(Point::new(2, 2), Rgb888::BLACK),
                Pixel(Point::new(2, 2), Rgb888::BLACK),
                Pixel(Point::new(0, 0), Rgb888::BLACK),
            ])
            .unwrap();
        canvas.composite(&layer);

        let blended = canvas.pixel(2, 2).unwrap();
        assert!(blended.0 > 120 && blended.0 < 135, "{:?}", blended);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(Rgb::WHITE));
    }

    #[test]
    fn empty_layer_bounds_yield_none() {
        assert!(AlphaLayer::new(Rect::new(0, 0, 0, 5), 72).is_none());
    }
}
