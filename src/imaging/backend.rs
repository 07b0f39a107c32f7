//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations every backend must
//! support: resize, thumbnail, flip, and crop. Each takes a parameter struct
//! naming the source, the destination and the transform, and returns the
//! dimensions of the raster it wrote.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` defined below.
//!
//! Backend errors are already phrased for the user: their `Display` output is
//! exactly what the CLI prints.

use super::params::{CropParams, FlipParams, ResizeParams, ThumbnailParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The input path does not exist.
    #[error("Error: Input file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// The input exists but no decoder accepts its contents.
    #[error(
        "Error: Cannot identify image file. The file at {} may be corrupted or not a valid image.",
        .path.display()
    )]
    UnrecognizedFormat { path: PathBuf, reason: String },

    /// Any other failure while reading the input.
    #[error("An error occurred while opening image {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The transform itself could not run, e.g. it would exceed the memory budget.
    #[error("An error occurred during image processing or saving: {reason}")]
    Processing { reason: String },

    /// Encoding or writing the output failed. Nothing was left at `path`.
    #[error("Error saving image to {}: {reason}", .path.display())]
    Save { path: PathBuf, reason: String },
}

/// Width and height of a raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Implementations open `params.source`, transform it, and write
/// `params.output`. The output must exist after a call if and only if the
/// call returned `Ok`.
pub trait ImageBackend {
    /// Decode `source` and report its dimensions. Writes nothing.
    fn open(&self, source: &Path) -> Result<Dimensions, BackendError>;

    /// Scale to exactly `width × height`.
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError>;

    /// Downscale to fit within `max_size × max_size`, keeping the aspect ratio.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, BackendError>;

    /// Mirror along the requested axis.
    fn flip(&self, params: &FlipParams) -> Result<Dimensions, BackendError>;

    /// Extract a rectangular region.
    fn crop(&self, params: &CropParams) -> Result<Dimensions, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::request::{CropRect, FlipDirection};
    use std::cell::RefCell;

    /// Mock backend that records operations without executing them.
    ///
    /// Every call succeeds with `dimensions` unless a failure was queued with
    /// [`MockBackend::failing_with`].
    pub struct MockBackend {
        pub dimensions: Dimensions,
        pub failure: RefCell<Option<BackendError>>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Open {
            source: String,
        },
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
        },
        Thumbnail {
            source: String,
            output: String,
            max_size: u32,
        },
        Flip {
            source: String,
            output: String,
            direction: FlipDirection,
        },
        Crop {
            source: String,
            output: String,
            rect: CropRect,
        },
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self {
                dimensions: Dimensions {
                    width: 10,
                    height: 10,
                },
                failure: RefCell::new(None),
                operations: RefCell::new(Vec::new()),
            }
        }
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_with(error: BackendError) -> Self {
            Self {
                failure: RefCell::new(Some(error)),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }

        fn finish(&self, op: RecordedOp) -> Result<Dimensions, BackendError> {
            self.operations.borrow_mut().push(op);
            match self.failure.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(self.dimensions),
            }
        }
    }

    fn lossy(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    impl ImageBackend for MockBackend {
        fn open(&self, source: &Path) -> Result<Dimensions, BackendError> {
            self.finish(RecordedOp::Open {
                source: lossy(source),
            })
        }

        fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
            self.finish(RecordedOp::Resize {
                source: lossy(&params.source),
                output: lossy(&params.output),
                width: params.width,
                height: params.height,
            })
        }

        fn thumbnail(&self, params: &ThumbnailParams) -> Result<Dimensions, BackendError> {
            self.finish(RecordedOp::Thumbnail {
                source: lossy(&params.source),
                output: lossy(&params.output),
                max_size: params.max_size,
            })
        }

        fn flip(&self, params: &FlipParams) -> Result<Dimensions, BackendError> {
            self.finish(RecordedOp::Flip {
                source: lossy(&params.source),
                output: lossy(&params.output),
                direction: params.direction,
            })
        }

        fn crop(&self, params: &CropParams) -> Result<Dimensions, BackendError> {
            self.finish(RecordedOp::Crop {
                source: lossy(&params.source),
                output: lossy(&params.output),
                rect: params.rect,
            })
        }
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.png".into(),
                output: "/output.png".into(),
                width: 800,
                height: 600,
                filter: Default::default(),
                quality: Quality::default(),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 800,
                height: 600,
                ..
            }
        ));
    }

    #[test]
    fn mock_returns_queued_failure_once() {
        let backend = MockBackend::failing_with(BackendError::NotFound {
            path: "/missing.png".into(),
        });
        let params = FlipParams {
            source: "/missing.png".into(),
            output: "/out.png".into(),
            direction: FlipDirection::Horizontal,
            quality: Quality::default(),
        };

        assert!(matches!(
            backend.flip(&params),
            Err(BackendError::NotFound { .. })
        ));
        assert!(backend.flip(&params).is_ok());
        assert_eq!(backend.get_operations().len(), 2);
    }

    #[test]
    fn error_messages_are_user_facing() {
        let err = BackendError::UnrecognizedFormat {
            path: "notes.txt".into(),
            reason: "format could not be determined".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error: Cannot identify image file. The file at notes.txt may be corrupted or not a valid image."
        );

        let err = BackendError::Processing {
            reason: "memory limit exceeded".into(),
        };
        assert_eq!(
            err.to_string(),
            "An error occurred during image processing or saving: memory limit exceeded"
        );

        let err = BackendError::Open {
            path: "locked.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "An error occurred while opening image locked.png: denied"
        );
    }
}
