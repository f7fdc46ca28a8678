//! Alignment grid: snapping, cell-size inference and the derived grid visuals.

use egui::{Pos2, Rect, pos2};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CELL_SIZE: f32 = 20.0;
/// Smallest cell size accepted from any source; keeps visual generation finite
pub const MIN_CELL_SIZE: f32 = 1.0;
/// Exclusive range a drawn rectangle's short side must fall in to become the cell size
pub const INFERRED_CELL_RANGE: (f32, f32) = (5.0, 200.0);

/// Persistent grid settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_size: f32,
    /// Whether the grid is shown
    pub enabled: bool,
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            enabled: false,
            snap: false,
        }
    }
}

/// Lines and intersection markers for one cell size over one canvas
#[derive(Debug, Clone, PartialEq)]
pub struct GridVisuals {
    pub cell_size: f32,
    pub bounds: Rect,
    pub lines: Vec<[Pos2; 2]>,
    pub points: Vec<Pos2>,
}

impl GridVisuals {
    /// Evenly spaced lines on multiples of `cell_size` plus a marker at every intersection
    pub fn generate(cell_size: f32, bounds: Rect) -> Self {
        let cell_size = cell_size.max(MIN_CELL_SIZE);
        let xs = multiples_within(cell_size, bounds.min.x, bounds.max.x);
        let ys = multiples_within(cell_size, bounds.min.y, bounds.max.y);

        let mut lines = Vec::with_capacity(xs.len() + ys.len());
        for &x in &xs {
            lines.push([pos2(x, bounds.min.y), pos2(x, bounds.max.y)]);
        }
        for &y in &ys {
            lines.push([pos2(bounds.min.x, y), pos2(bounds.max.x, y)]);
        }

        let points = xs
            .iter()
            .flat_map(|&x| ys.iter().map(move |&y| pos2(x, y)))
            .collect();

        Self {
            cell_size,
            bounds,
            lines,
            points,
        }
    }
}

/// Every multiple of `step` in `[min, max]`, both ends inclusive.
///
/// Lines sit on absolute multiples rather than offsets from `min`, so the grid
/// agrees with `snap` however the canvas is placed.
fn multiples_within(step: f32, min: f32, max: f32) -> Vec<f32> {
    if min.is_nan() || max.is_nan() || min > max {
        return Vec::new();
    }
    // ceil/floor pull the range inward: a bound that is itself a multiple is
    // kept, anything else rounds to the nearest multiple inside the range
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f32 * step).collect()
}

/// Grid state owned by the controller
#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    bounds: Rect,
    visuals: Option<GridVisuals>,
}

impl Grid {
    pub fn new(config: GridConfig, bounds: Rect) -> Self {
        let mut grid = Self {
            config: GridConfig {
                cell_size: config.cell_size.max(MIN_CELL_SIZE),
                ..config
            },
            bounds,
            visuals: None,
        };
        grid.regenerate();
        grid
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn is_shown(&self) -> bool {
        self.config.enabled
    }

    pub fn snap_enabled(&self) -> bool {
        self.config.snap
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Current visuals; `None` while the grid is hidden
    pub fn visuals(&self) -> Option<&GridVisuals> {
        self.visuals.as_ref()
    }

    /// Quantize a point to the nearest cell boundary when snapping is on
    pub fn snap(&self, point: Pos2) -> Pos2 {
        if !self.config.snap {
            return point;
        }
        let size = self.config.cell_size;
        pos2(
            (point.x / size).round() * size,
            (point.y / size).round() * size,
        )
    }

    /// Show or hide the grid. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.config.enabled = !self.config.enabled;
        self.regenerate();
        log::info!("Grid {}", if self.config.enabled { "shown" } else { "hidden" });
        self.config.enabled
    }

    /// Turn snapping on or off. Returns the new state.
    pub fn toggle_snap(&mut self) -> bool {
        self.config.snap = !self.config.snap;
        log::info!("Snap to grid {}", if self.config.snap { "on" } else { "off" });
        self.config.snap
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.regenerate();
        }
    }

    /// Adopt the short side of a freshly drawn rectangle as the cell size.
    ///
    /// Applied only when it lies strictly inside [`INFERRED_CELL_RANGE`].
    /// Returns whether the cell size changed.
    pub fn update_cell_size_from_rectangle(&mut self, width: f32, height: f32) -> bool {
        let candidate = width.min(height);
        let (low, high) = INFERRED_CELL_RANGE;
        if !(candidate > low && candidate < high) {
            log::debug!("Ignoring grid size candidate {candidate}");
            return false;
        }
        self.config.cell_size = candidate;
        self.regenerate();
        log::info!("Grid cell size set to {candidate}");
        true
    }

    fn regenerate(&mut self) {
        self.visuals = self
            .config
            .enabled
            .then(|| GridVisuals::generate(self.config.cell_size, self.bounds));
    }
}
