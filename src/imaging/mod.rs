//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Resize** | `resize_exact`, configurable filter |
//! | **Thumbnail** | bounding-box fit + `resize_exact` |
//! | **Flip** | `fliph` / `flipv` |
//! | **Crop** | `crop_imm` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Request → parameters → backend → [`OperationOutcome`](crate::outcome::OperationOutcome)

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{CropRegion, calculate_thumbnail_dimensions, crop_region};
pub use operations::{
    DEFAULT_THUMBNAIL_SIZE, OperationSettings, create_thumbnail, crop_image, flip_image,
    flip_image_named, resize_image, run,
};
pub use params::{CropParams, FlipParams, Quality, ResizeParams, Resampling, ThumbnailParams};
pub use rust_backend::RustBackend;
