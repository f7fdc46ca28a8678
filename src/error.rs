use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the canvas to disk
#[derive(Error, Debug)]
pub enum ExportError {
    /// The canvas has no area to rasterize
    #[error("Cannot export an empty canvas ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
    /// The target directory could not be prepared
    #[error("Failed to prepare export directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The PNG encoder rejected the bitmap or the write failed
    #[error("Failed to write PNG to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur while grabbing pixels under a selection
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture area is empty ({width}x{height})")]
    EmptyArea { width: u32, height: u32 },
    #[error("Screen capture backend failed: {0}")]
    Backend(String),
}
