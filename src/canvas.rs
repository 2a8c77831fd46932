use crate::{CanvasError, Colour, FontMetrics, Px, SizedFont};
use image::{DynamicImage, RgbaImage};
use owned_ttf_parser::OutlineBuilder;
use std::path::Path;
use tiny_skia::{FillRule, IntSize, Paint, Path as SkPath, PathBuilder, Pixmap, Transform};

/// A surface text can be drawn onto.
///
/// `F` is the font type the canvas knows how to render. Layout hands each
/// line of text to [Canvas::draw_text] exactly once, with `(x, y)` being the
/// top-left corner of the line.
pub trait Canvas<F> {
    fn draw_text(&mut self, x: Px, y: Px, text: &str, font: &F, colour: Colour);
}

/// A raster surface backed by a [tiny_skia::Pixmap], which renders glyph
/// outlines from [SizedFont]s.
pub struct PixmapCanvas {
    pub pixmap: Pixmap,
}

impl PixmapCanvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Result<PixmapCanvas, CanvasError> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;
        Ok(PixmapCanvas { pixmap })
    }

    /// Create a canvas holding a copy of `image`
    pub fn from_image(image: &DynamicImage) -> Result<PixmapCanvas, CanvasError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let size = IntSize::from_wh(width, height).ok_or(CanvasError::InvalidSize { width, height })?;

        let mut data = rgba.into_raw();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = premultiply(px[0], a);
            px[1] = premultiply(px[1], a);
            px[2] = premultiply(px[2], a);
        }

        let pixmap = Pixmap::from_vec(data, size).ok_or(CanvasError::InvalidSize { width, height })?;
        Ok(PixmapCanvas { pixmap })
    }

    /// Load an image file from disk as a canvas
    pub fn open<P: AsRef<Path>>(path: P) -> Result<PixmapCanvas, CanvasError> {
        let data = std::fs::read(path)?;
        let image = image::load_from_memory(&data)?;
        Self::from_image(&image)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Copy the canvas out into a straight-alpha RGBA image
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        for (out, px) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = px.demultiply();
            *out = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    /// Save the canvas to disk, picking the image format from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl<'f> Canvas<SizedFont<'f>> for PixmapCanvas {
    fn draw_text(&mut self, x: Px, y: Px, text: &str, font: &SizedFont<'f>, colour: Colour) {
        let face = font.font.face();
        let scale = font.font.scaling(font.size);
        let baseline = y + font.ascent();
        let paint = fill_paint(colour);

        let mut pen_x = x;
        let mut drawn = 0usize;
        for ch in text.chars() {
            let Some(gid) = font.font.glyph(ch) else {
                continue;
            };

            let mut builder = GlyphPathBuilder::new(pen_x.0, baseline.0, scale);
            if face.outline_glyph(gid, &mut builder).is_some() {
                // glyphs like spaces have an advance but no outline
                if let Some(path) = builder.finish() {
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                    drawn += 1;
                }
            }
            pen_x += font.font.advance(gid, font.size);
        }

        log::trace!(
            "drew {drawn} glyphs of {text:?} at ({x}, {y}), width {}",
            font.width(text)
        );
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}

fn fill_paint(colour: Colour) -> Paint<'static> {
    let [r, g, b, a] = colour.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Converts font-unit outlines (y up) into pixel paths (y down) anchored at a
/// point on the baseline
struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    baseline: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(origin_x: f32, baseline: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            baseline,
            scale,
        }
    }

    fn finish(self) -> Option<SkPath> {
        self.builder.finish()
    }

    fn px(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.baseline - y * self.scale)
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.px(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.px(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.px(x1, y1);
        let (x, y) = self.px(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.px(x1, y1);
        let (x2, y2) = self.px(x2, y2);
        let (x, y) = self.px(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(matches!(
            PixmapCanvas::new(0, 10),
            Err(CanvasError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn images_survive_the_trip_through_the_pixmap() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 1, image::Rgba([10, 200, 30, 255]));

        let canvas = PixmapCanvas::from_image(&DynamicImage::ImageRgba8(img.clone()))
            .expect("can build canvas");
        assert_eq!(canvas.width(), 3);
        assert_eq!(canvas.height(), 2);
        assert_eq!(canvas.to_image(), img);
    }

    #[test]
    fn glyph_outlines_are_flipped_onto_the_baseline() {
        let builder = GlyphPathBuilder::new(10.0, 50.0, 0.5);
        assert_eq!(builder.px(0.0, 0.0), (10.0, 50.0));
        assert_eq!(builder.px(20.0, 40.0), (20.0, 30.0));
    }

    #[test]
    fn paint_takes_the_clamped_colour_bytes() {
        let paint = fill_paint(Colour::new_rgb(2.0, 0.0, 0.5));
        match paint.shader {
            tiny_skia::Shader::SolidColor(c) => assert_eq!(
                c.to_color_u8(),
                tiny_skia::ColorU8::from_rgba(255, 0, 128, 255)
            ),
            _ => panic!("expected a solid colour"),
        }
        assert!(paint.anti_alias);
    }

    #[test]
    fn blank_canvas_exports_transparent_pixels() {
        let image = PixmapCanvas::new(2, 3).expect("valid size").to_image();
        assert_eq!(image.dimensions(), (2, 3));
        assert!(image.pixels().all(|px| px.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn premultiplication_rounds() {
        assert_eq!(premultiply(255, 255), 255);
        assert_eq!(premultiply(255, 0), 0);
        assert_eq!(premultiply(200, 128), 100);
    }
}
