// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image loading with format validation

use crate::error::{Error, Result};
use image::{DynamicImage, ImageReader};
use std::path::Path;
use tracing::info;

/// File extensions the pipeline accepts, lowercase without the dot
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

/// Whether a path carries a supported image extension (case-insensitive)
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Load an image from disk
///
/// The extension is validated before any decode attempt, so a corrupt
/// `.txt` file fails with `UnsupportedFormat` rather than `Decode`.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    if !is_supported(path) {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string();
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let reader = ImageReader::open(path)?;
    let format = reader.format();
    let image = reader.decode().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        format = ?format,
        "loaded image"
    );

    Ok(image)
}
