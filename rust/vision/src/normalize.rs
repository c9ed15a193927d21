// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canvas normalization: aspect-preserving resize with centered padding

use image::{imageops, imageops::FilterType, DynamicImage, Rgb, RgbImage};

/// Normalize an image onto a square canvas of exactly `target_size`
///
/// The source is scaled uniformly so its longer dimension fits the canvas
/// (never upscaled past its natural size), then pasted centered over a
/// background-filled canvas. Content is never cropped.
pub fn resize_to_canvas(image: &DynamicImage, target_size: u32, background: [u8; 3]) -> RgbImage {
    let scaled = fit_within(&image.to_rgb8(), target_size, target_size);

    let mut canvas = RgbImage::from_pixel(target_size, target_size, Rgb(background));
    let paste_x = (target_size - scaled.width()) / 2;
    let paste_y = (target_size - scaled.height()) / 2;
    imageops::replace(&mut canvas, &scaled, i64::from(paste_x), i64::from(paste_y));

    canvas
}

/// Aspect-preserving downscale without padding
///
/// Used for gallery thumbnails; an image already within the bound is
/// returned at its natural size.
pub fn thumbnail(image: &DynamicImage, max_size: u32) -> RgbImage {
    fit_within(&image.to_rgb8(), max_size, max_size)
}

/// Scale an image down to fit within a bounding box, never up
fn fit_within(image: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return image.clone();
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);

    imageops::resize(image, new_width, new_height, FilterType::Lanczos3)
}
