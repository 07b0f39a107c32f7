//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` with content sniffing |
//! | Resize | `DynamicImage::resize_exact` |
//! | Thumbnail | [`calculate_thumbnail_dimensions`] + `resize_exact` |
//! | Flip | `DynamicImage::fliph` / `flipv` |
//! | Crop | [`crop_region`] + `DynamicImage::crop_imm` |
//! | Encode | format from the output extension; JPEG at the configured quality |
//! | Write | staged `tempfile::NamedTempFile` in the destination directory, renamed on success |
//!
//! The decoded raster lives only inside one backend call and is dropped on
//! every return path.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_thumbnail_dimensions, crop_region};
use super::params::{CropParams, FlipParams, Quality, ResizeParams, ThumbnailParams};
use crate::request::FlipDirection;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, Limits};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_error(path: &Path, err: std::io::Error) -> BackendError {
    if err.kind() == std::io::ErrorKind::NotFound {
        BackendError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        BackendError::Open {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file contents first and falls back to the
/// extension, so a PNG named `photo.jpg` still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let reader = ImageReader::open(path)
        .map_err(|e| open_error(path, e))?
        .with_guessed_format()
        .map_err(|e| open_error(path, e))?;
    trace!(path = %path.display(), format = ?reader.format(), "decoding");

    reader.decode().map_err(|e| decode_error(path, e))
}

fn decode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(err) => open_error(path, err),
        // A valid image over the decoder's memory limits is not a format problem
        limits @ ImageError::Limits(_) => BackendError::Open {
            path: path.to_path_buf(),
            source: std::io::Error::other(limits),
        },
        other => BackendError::UnrecognizedFormat {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// Upper bound on the working memory of a single resize.
const RESIZE_MEMORY_BUDGET: u64 = 2 * 1024 * 1024 * 1024;

/// Refuse a resize whose buffers would not fit [`RESIZE_MEMORY_BUDGET`].
///
/// The resampler keeps a `width × source height` RGBA `f32` pass alongside
/// the final `width × height` raster. Both are allocated infallibly, so an
/// oversized request has to be caught before it starts.
fn reserve_resize(img: &DynamicImage, width: u32, height: u32) -> Result<(), BackendError> {
    let intermediate = u64::from(width)
        .saturating_mul(u64::from(img.height()))
        .saturating_mul(4 * size_of::<f32>() as u64);
    let output = u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(u64::from(img.color().bytes_per_pixel()));

    let mut limits = Limits::default();
    limits.max_alloc = Some(RESIZE_MEMORY_BUDGET);
    limits
        .reserve(intermediate.saturating_add(output))
        .map_err(|e| BackendError::Processing {
            reason: format!("cannot resize to {width}x{height}: {e}"),
        })
}

fn dimensions_of(img: &DynamicImage) -> Dimensions {
    Dimensions {
        width: img.width(),
        height: img.height(),
    }
}

/// Encode `img` in `format`. JPEG honours `quality`; other formats use their defaults.
fn encode<W: Write + Seek>(
    img: &DynamicImage,
    writer: &mut W,
    format: ImageFormat,
    quality: Quality,
) -> Result<(), ImageError> {
    match format {
        ImageFormat::Jpeg => {
            img.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.value()))
        }
        other => img.write_to(writer, other),
    }
}

/// Save a DynamicImage to the given path, inferring format from extension.
///
/// The image is encoded into a temp file beside the destination and renamed
/// into place only once encoding finished. On any error the temp file is
/// removed when it drops, so nothing is left at `path`.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let save_error = |reason: String| BackendError::Save {
        path: path.to_path_buf(),
        reason,
    };

    let format = ImageFormat::from_path(path).map_err(|e| save_error(e.to_string()))?;
    if !format.writing_enabled() {
        return Err(save_error(format!("no encoder available for {format:?} output")));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::Builder::new()
        .prefix(".image-tool-")
        .tempfile_in(dir)
        .map_err(|e| save_error(e.to_string()))?;
    debug!(staged = %staged.path().display(), ?format, "encoding");

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        encode(img, &mut writer, format, quality).map_err(|e| save_error(e.to_string()))?;
        writer.flush().map_err(|e| save_error(e.to_string()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| save_error(e.to_string()))?;
    }

    staged
        .persist(path)
        .map_err(|e| save_error(e.error.to_string()))?;
    Ok(())
}

/// Save and report the written dimensions.
fn finish(img: DynamicImage, path: &Path, quality: Quality) -> Result<Dimensions, BackendError> {
    let dims = dimensions_of(&img);
    save_image(&img, path, quality)?;
    Ok(dims)
}

impl ImageBackend for RustBackend {
    fn open(&self, source: &Path) -> Result<Dimensions, BackendError> {
        load_image(source).map(|img| dimensions_of(&img))
    }

    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        reserve_resize(&img, params.width, params.height)?;
        let resized = img.resize_exact(params.width, params.height, params.filter.filter_type());
        finish(resized, &params.output, params.quality)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let source = (img.width(), img.height());
        let (width, height) = calculate_thumbnail_dimensions(source, params.max_size);

        let thumb = if (width, height) == source {
            img
        } else {
            img.resize_exact(width, height, params.filter.filter_type())
        };
        finish(thumb, &params.output, params.quality)
    }

    fn flip(&self, params: &FlipParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let flipped = match params.direction {
            FlipDirection::Horizontal => img.fliph(),
            FlipDirection::Vertical => img.flipv(),
        };
        finish(flipped, &params.output, params.quality)
    }

    fn crop(&self, params: &CropParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let region = crop_region(params.rect);
        debug!(?region, rect = %params.rect, "cropping");
        let cropped = img.crop_imm(region.x, region.y, region.width, region.height);
        finish(cropped, &params.output, params.quality)
    }
}
