//! High-level image operations.
//!
//! These functions turn a request into backend parameters, call the backend,
//! and fold the result into an [`OperationOutcome`]. They never panic and
//! never propagate a failure past their return value: the caller decides what
//! to print and which exit status to use.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{CropParams, FlipParams, Quality, ResizeParams, Resampling, ThumbnailParams};
use crate::outcome::{Completed, OperationError, OperationOutcome};
use crate::request::{CropRect, FlipDirection, Operation, OperationRequest};
use std::path::Path;
use tracing::{info, info_span, warn};

/// Thumbnail bounding box used when the caller gives none.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 128;

/// Tunables shared by all operations, usually derived from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSettings {
    pub resize_filter: Resampling,
    pub thumbnail_filter: Resampling,
    pub thumbnail_size: u32,
    pub quality: Quality,
}

impl Default for OperationSettings {
    fn default() -> Self {
        Self {
            resize_filter: Resampling::default(),
            thumbnail_filter: Resampling::default(),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            quality: Quality::default(),
        }
    }
}

fn conclude(
    operation: Operation,
    output: &Path,
    result: Result<Dimensions, BackendError>,
) -> OperationOutcome {
    match result {
        Ok(dimensions) => {
            info!(
                output = %output.display(),
                width = dimensions.width,
                height = dimensions.height,
                "wrote image"
            );
            Ok(Completed {
                operation,
                output: output.to_path_buf(),
                dimensions,
            })
        }
        Err(err) => {
            warn!(error = %err, "{} failed", operation.name());
            Err(OperationError::from(err))
        }
    }
}

/// Scale `input` to exactly `width × height` and write it to `output`.
pub fn resize_image(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    settings: &OperationSettings,
) -> OperationOutcome {
    let params = ResizeParams {
        source: input.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        filter: settings.resize_filter,
        quality: settings.quality,
    };
    conclude(
        Operation::Resize { width, height },
        output,
        backend.resize(&params),
    )
}

/// Plan a thumbnail operation without executing it.
///
/// Resolves the bounding box: an explicit `size` wins, otherwise the
/// configured default applies.
pub fn plan_thumbnail(
    input: &Path,
    output: &Path,
    size: Option<u32>,
    settings: &OperationSettings,
) -> ThumbnailParams {
    ThumbnailParams {
        source: input.to_path_buf(),
        output: output.to_path_buf(),
        max_size: size.unwrap_or(settings.thumbnail_size),
        filter: settings.thumbnail_filter,
        quality: settings.quality,
    }
}

/// Downscale `input` to fit a `size × size` box and write it to `output`.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    size: Option<u32>,
    settings: &OperationSettings,
) -> OperationOutcome {
    let params = plan_thumbnail(input, output, size, settings);
    conclude(
        Operation::Thumbnail {
            size: Some(params.max_size),
        },
        output,
        backend.thumbnail(&params),
    )
}

/// Mirror `input` along `direction` and write it to `output`.
pub fn flip_image(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    direction: FlipDirection,
    settings: &OperationSettings,
) -> OperationOutcome {
    let params = FlipParams {
        source: input.to_path_buf(),
        output: output.to_path_buf(),
        direction,
        quality: settings.quality,
    };
    conclude(Operation::Flip { direction }, output, backend.flip(&params))
}

/// Like [`flip_image`], with the direction given by name.
///
/// The input is still opened first, so a missing or undecodable file is
/// reported as such even when the direction is also wrong. Anything other
/// than `horizontal` or `vertical` then fails with `InvalidParameter` and
/// nothing is written.
pub fn flip_image_named(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    direction: &str,
    settings: &OperationSettings,
) -> OperationOutcome {
    match direction.parse::<FlipDirection>() {
        Ok(direction) => flip_image(backend, input, output, direction, settings),
        Err(invalid) => {
            if let Err(err) = backend.open(input) {
                warn!(error = %err, "flip failed");
                return Err(err.into());
            }
            warn!(error = %invalid, "flip rejected");
            Err(invalid)
        }
    }
}

/// Extract `rect` from `input` and write it to `output`.
///
/// The rectangle is not checked against the image; see
/// [`crop_region`](super::calculations::crop_region) for how it is mapped.
pub fn crop_image(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    rect: CropRect,
    settings: &OperationSettings,
) -> OperationOutcome {
    let params = CropParams {
        source: input.to_path_buf(),
        output: output.to_path_buf(),
        rect,
        quality: settings.quality,
    };
    conclude(Operation::Crop(rect), output, backend.crop(&params))
}

/// Run the operation a request describes.
pub fn run(
    backend: &impl ImageBackend,
    request: OperationRequest,
    settings: &OperationSettings,
) -> OperationOutcome {
    let span = info_span!(
        "operation",
        name = request.operation.name(),
        input = %request.input.display(),
        output = %request.output.display(),
    );
    let _guard = span.enter();

    let OperationRequest {
        input,
        output,
        operation,
    } = request;

    match operation {
        Operation::Resize { width, height } => {
            resize_image(backend, &input, &output, width, height, settings)
        }
        Operation::Thumbnail { size } => create_thumbnail(backend, &input, &output, size, settings),
        Operation::Flip { direction } => flip_image(backend, &input, &output, direction, settings),
        Operation::Crop(rect) => crop_image(backend, &input, &output, rect, settings),
    }
}
