#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod capture;
pub mod command;
pub mod components;
pub mod config;
pub mod controller;
pub mod document;
pub mod element;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod texture_manager;
pub mod tool;

pub use app::OverlayApp;
pub use capture::{PlaceholderCapture, ScreenCapture, ScreenshotsCapture};
pub use command::{Action, UndoLog};
pub use config::OverlayConfig;
pub use controller::{Controller, Notice, NoticeKind};
pub use document::Document;
pub use element::{CapturedRegion, Element, Shape, TextAnnotation};
pub use error::{CaptureError, ExportError};
pub use geometry::{ShapePath, build_path};
pub use grid::{Grid, GridConfig};
pub use input::{InputEvent, Request};
pub use renderer::Renderer;
pub use state::GestureState;
pub use tool::Tool;
