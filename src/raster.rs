//! Software rasterizer that flattens the committed scene into an RGBA bitmap
//! for PNG export.

use std::borrow::Cow;

use ab_glyph::{Font, FontArc, FontRef, FontVec, ScaleFont, point};
use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::document::Document;
use crate::element::{CapturedRegion, Element, Shape, TextAnnotation};

/// Pixel dimensions of a canvas rectangle
fn canvas_pixel_size(canvas: Rect) -> (u32, u32) {
    (
        canvas.width().round().max(0.0) as u32,
        canvas.height().round().max(0.0) as u32,
    )
}

/// Render every element of `doc` in stacking order.
///
/// Pixel (0, 0) maps to `canvas.min`. With `background = None` untouched
/// pixels stay fully transparent.
pub fn rasterize(doc: &Document, canvas: Rect, background: Option<Color32>) -> RgbaImage {
    let (width, height) = canvas_pixel_size(canvas);
    let fill = background.map_or(Rgba([0, 0, 0, 0]), |c| Rgba(c.to_srgba_unmultiplied()));
    let mut img = RgbaImage::from_pixel(width, height, fill);
    let origin = canvas.min.to_vec2();
    let font = default_font();

    for element in doc.elements() {
        match element {
            Element::Region(region) => draw_region(&mut img, region, origin),
            Element::Shape(shape) => draw_shape(&mut img, shape, origin),
            Element::Text(text) => {
                if let Some((font, tweak)) = &font {
                    draw_text(&mut img, font, tweak, text, origin);
                }
            }
        }
    }
    img
}

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Color32) {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 0 {
        return;
    }
    let dst = img.get_pixel(x, y).0;
    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    img.put_pixel(
        x,
        y,
        Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]),
    );
}

fn draw_disc(img: &mut RgbaImage, center: Pos2, radius: f32, color: Color32) {
    if radius <= 0.0 || img.width() == 0 || img.height() == 0 {
        return;
    }
    let radius_sq = radius * radius;
    let max_px = (img.width() - 1) as f32;
    let max_py = (img.height() - 1) as f32;
    let min_x = (center.x - radius).floor().max(0.0) as i32;
    let max_x = (center.x + radius).ceil().min(max_px) as i32;
    let min_y = (center.y - radius).floor().max(0.0) as i32;
    let max_y = (center.y + radius).ceil().min(max_py) as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_sq {
                blend_pixel(img, x as u32, y as u32, color);
            }
        }
    }
}

/// Stamp discs along the segment; overlapping stamps of an opaque color are harmless
fn draw_segment(img: &mut RgbaImage, start: Pos2, end: Pos2, color: Color32, width: f32) {
    let delta = end - start;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
    let radius = (width / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        draw_disc(img, start + delta * t, radius, color);
    }
}

fn draw_shape(img: &mut RgbaImage, shape: &Shape, origin: Vec2) {
    let style = shape.style();
    for sub_path in shape.path().sub_paths() {
        if sub_path.points.len() == 1 {
            draw_disc(img, sub_path.points[0] - origin, style.width / 2.0, style.color);
            continue;
        }
        for (a, b) in sub_path.segments() {
            draw_segment(img, a - origin, b - origin, style.color, style.width);
        }
    }
}

/// Nearest-neighbour blit of the captured bitmap into the region's rectangle
fn draw_region(img: &mut RgbaImage, region: &CapturedRegion, origin: Vec2) {
    let source = region.image();
    let (src_w, src_h) = source.dimensions();
    let rect = region.rect().translate(-origin);
    if src_w == 0 || src_h == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }

    let min_x = rect.min.x.floor().max(0.0) as u32;
    let min_y = rect.min.y.floor().max(0.0) as u32;
    let max_x = (rect.max.x.ceil().max(0.0) as u32).min(img.width());
    let max_y = (rect.max.y.ceil().max(0.0) as u32).min(img.height());

    for y in min_y..max_y {
        for x in min_x..max_x {
            let u = (x as f32 + 0.5 - rect.min.x) / rect.width();
            let v = (y as f32 + 0.5 - rect.min.y) / rect.height();
            if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                continue;
            }
            let sx = ((u * src_w as f32) as u32).min(src_w - 1);
            let sy = ((v * src_h as f32) as u32).min(src_h - 1);
            let [r, g, b, a] = source.get_pixel(sx, sy).0;
            blend_pixel(img, x, y, Color32::from_rgba_unmultiplied(r, g, b, a));
        }
    }
}

/// The proportional UI font egui ships with, so exports match the overlay
fn default_font() -> Option<(FontArc, egui::FontTweak)> {
    let definitions = egui::FontDefinitions::default();
    let family = definitions.families.get(&egui::FontFamily::Proportional)?;
    let name = family.first()?;
    let data = definitions.font_data.get(name)?;
    let font = match &data.font {
        Cow::Borrowed(bytes) => FontRef::try_from_slice_and_index(*bytes, data.index)
            .map(FontArc::from)
            .ok(),
        Cow::Owned(bytes) => FontVec::try_from_vec_and_index(bytes.clone(), data.index)
            .map(FontArc::from)
            .ok(),
    };
    if font.is_none() {
        log::warn!("Default font {name} could not be parsed; text will be skipped in exports");
    }
    Some((font?, data.tweak))
}

fn draw_text(
    img: &mut RgbaImage,
    font: &FontArc,
    tweak: &egui::FontTweak,
    text: &TextAnnotation,
    origin: Vec2,
) {
    if text.content().is_empty() {
        return;
    }
    let size = text.font_size();
    let color = text.color();
    let pos = text.position() - origin;
    let scaled = font.as_scaled(size * tweak.scale);
    let mut caret = point(pos.x, pos.y + scaled.ascent() + tweak.y_offset * size);
    for ch in text.content().chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = caret;
        caret.x += scaled.h_advance(glyph.id);
        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            let px = x as i32 + bounds.min.x as i32;
            let py = y as i32 + bounds.min.y as i32;
            if px >= 0 && py >= 0 && px < img.width() as i32 && py < img.height() as i32 {
                let alpha = (color.a() as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                let blended = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha);
                blend_pixel(img, px as u32, py as u32, blended);
            }
        });
    }
}
