//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::request::CropRect;

/// Calculate the dimensions of a bounding-box thumbnail.
///
/// Downscale only: a source that already fits within `max_size × max_size`
/// keeps its dimensions. Otherwise the longer edge becomes `max_size` and
/// the shorter edge is scaled to match, never dropping below one pixel.
/// A `max_size` of zero is treated as one.
///
/// # Examples
/// ```
/// # use image_tool::imaging::calculate_thumbnail_dimensions;
/// // 100x50 landscape into a 40px box → 40x20
/// assert_eq!(calculate_thumbnail_dimensions((100, 50), 40), (40, 20));
///
/// // Already small enough → unchanged
/// assert_eq!(calculate_thumbnail_dimensions((30, 20), 128), (30, 20));
/// ```
pub fn calculate_thumbnail_dimensions(source: (u32, u32), max_size: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let max_size = max_size.max(1);

    if src_w <= max_size && src_h <= max_size {
        return source;
    }

    if src_w >= src_h {
        // Landscape or square: width is the long edge
        let h = (src_h as f64 * max_size as f64 / src_w as f64).round() as u32;
        (max_size, h.max(1))
    } else {
        // Portrait: height is the long edge
        let w = (src_w as f64 * max_size as f64 / src_h as f64).round() as u32;
        (w.max(1), max_size)
    }
}

/// Unsigned crop region `(x, y, width, height)` as the `image` crate takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Translate a signed `(left, top, right, bottom)` rectangle into a region.
///
/// Negative coordinates clamp to zero and inverted extents become empty.
/// Bounds against the actual image are left to the library, which clamps
/// the region to the raster.
pub fn crop_region(rect: CropRect) -> CropRegion {
    let left = to_pixel(rect.left);
    let top = to_pixel(rect.top);
    let right = to_pixel(rect.right);
    let bottom = to_pixel(rect.bottom);

    CropRegion {
        x: left,
        y: top,
        width: right.saturating_sub(left),
        height: bottom.saturating_sub(top),
    }
}

fn to_pixel(coord: i64) -> u32 {
    coord.clamp(0, u32::MAX as i64) as u32
}
