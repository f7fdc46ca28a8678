use std::path::PathBuf;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::element::DEFAULT_FONT_SIZE;
use crate::grid::GridConfig;

pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;
pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=20.0;

/// User settings, persisted through eframe storage between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct OverlayConfig {
    pub stroke_color: Color32,
    /// Reserved for filled shapes; shown in the palette but not yet drawn
    pub fill_color: Color32,
    pub stroke_width: f32,
    pub font_size: f32,
    pub grid: GridConfig,
    /// Where command+S writes; falls back to the desktop, then the working directory
    pub export_dir: Option<PathBuf>,
    /// Flatten exports onto this color; `None` keeps the overlay's transparency
    pub export_background: Option<Color32>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            grid: GridConfig::default(),
            export_dir: None,
            export_background: None,
        }
    }
}

impl OverlayConfig {
    pub fn clamp_stroke_width(width: f32) -> f32 {
        width.clamp(*STROKE_WIDTH_RANGE.start(), *STROKE_WIDTH_RANGE.end())
    }
}
