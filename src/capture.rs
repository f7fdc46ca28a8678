//! Screen-pixel capture behind a trait so the controller runs without a display.

use egui::{Pos2, Rect};
use image::{Rgba, RgbaImage};
use screenshots::Screen;

use crate::error::CaptureError;

/// Source of the pixels under a cut selection
pub trait ScreenCapture {
    /// Grab the pixels inside `area` (canvas coordinates)
    fn capture(&mut self, area: Rect) -> Result<RgbaImage, CaptureError>;

    /// Where the canvas origin sits on the desktop. Backends that read real
    /// screen pixels need it to translate canvas coordinates.
    fn set_screen_origin(&mut self, _origin: Pos2) {}
}

fn pixel_size(area: Rect) -> Result<(u32, u32), CaptureError> {
    let width = area.width().round().max(0.0) as u32;
    let height = area.height().round().max(0.0) as u32;
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyArea { width, height });
    }
    Ok((width, height))
}

/// Reads the desktop through the `screenshots` crate.
///
/// The overlay window is transparent, so the pixels returned are whatever the
/// compositor shows underneath, including strokes already drawn there.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenshotsCapture {
    origin: Pos2,
}

impl ScreenshotsCapture {
    /// `area` moved from canvas into desktop coordinates
    fn desktop_area(&self, area: Rect) -> Rect {
        area.translate(self.origin.to_vec2())
    }
}

impl ScreenCapture for ScreenshotsCapture {
    fn capture(&mut self, area: Rect) -> Result<RgbaImage, CaptureError> {
        let (width, height) = pixel_size(area)?;
        let desktop = self.desktop_area(area);
        let (x, y) = (desktop.min.x.round() as i32, desktop.min.y.round() as i32);
        let center = desktop.center();

        let screen = Screen::from_point(center.x as i32, center.y as i32)
            .map_err(|err| CaptureError::Backend(err.to_string()))?;
        // capture_area wants coordinates relative to the display it runs on
        let shot = screen
            .capture_area(
                x - screen.display_info.x,
                y - screen.display_info.y,
                width,
                height,
            )
            .map_err(|err| CaptureError::Backend(err.to_string()))?;
        log::debug!("Captured {width}x{height} at ({x}, {y}) from display {}", screen.display_info.id);

        // screenshots links its own `image` version, so rebuild from raw bytes
        let (w, h) = shot.dimensions();
        RgbaImage::from_raw(w, h, shot.into_raw())
            .ok_or_else(|| CaptureError::Backend(format!("Malformed {w}x{h} capture buffer")))
    }

    fn set_screen_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }
}

const PLACEHOLDER_FILL: Rgba<u8> = Rgba([230, 230, 230, 204]);
const PLACEHOLDER_FRAME: Rgba<u8> = Rgba([0, 122, 255, 255]);
const PLACEHOLDER_FRAME_WIDTH: u32 = 2;

/// Stand-in capture that yields a translucent light-gray card with a blue frame
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderCapture;

impl ScreenCapture for PlaceholderCapture {
    fn capture(&mut self, area: Rect) -> Result<RgbaImage, CaptureError> {
        let (width, height) = pixel_size(area)?;
        let frame = PLACEHOLDER_FRAME_WIDTH;
        Ok(RgbaImage::from_fn(width, height, |x, y| {
            let on_frame =
                x < frame || y < frame || x + frame >= width || y + frame >= height;
            if on_frame { PLACEHOLDER_FRAME } else { PLACEHOLDER_FILL }
        }))
    }
}
