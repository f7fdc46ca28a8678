//! Writing the flattened canvas to disk.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;

/// `Drawing_<unix seconds>.png` inside `dir`, the desktop, or the working directory
pub fn default_export_path(dir: Option<&Path>) -> PathBuf {
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(dirs_next::desktop_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("Drawing_{}.png", chrono::Utc::now().timestamp()))
}

/// Encode `bitmap` as PNG at `path`, creating missing parent directories
pub fn save_png(bitmap: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas { width, height });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    bitmap
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ExportError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Exported {}x{} canvas to {}", width, height, path.display());
    Ok(())
}
