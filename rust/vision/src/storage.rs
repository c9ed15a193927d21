// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence sink for processed images and thumbnails

use crate::error::{Error, Result};
use crate::normalize;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default subfolder for pipeline output
pub const DEFAULT_SUBFOLDER: &str = "processed";

/// Subfolder for generated thumbnails
pub const THUMBNAIL_SUBFOLDER: &str = "thumbnails";

/// Filesystem sink rooted at a data directory
///
/// Outputs land at `<data_root>/<subfolder>/<name>.png`, always PNG
/// regardless of the source format. Directories are created on demand.
#[derive(Debug, Clone)]
pub struct OutputSink {
    data_root: PathBuf,
}

impl OutputSink {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Write a processed image and return the final path
    pub fn save(&self, image: &RgbImage, name: &str, subfolder: &str) -> Result<PathBuf> {
        let dir = self.data_root.join(subfolder);
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{name}.png"));
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::Encode {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), "saved processed image");
        Ok(path)
    }

    /// Write an aspect-fit thumbnail under the thumbnails subfolder
    pub fn save_thumbnail(
        &self,
        image: &DynamicImage,
        name: &str,
        max_size: u32,
    ) -> Result<PathBuf> {
        let thumb = normalize::thumbnail(image, max_size);
        self.save(&thumb, name, THUMBNAIL_SUBFOLDER)
    }
}
