//! Operation outcomes.
//!
//! Every operation returns an [`OperationOutcome`]: either a [`Completed`]
//! value carrying the confirmation message, or an [`OperationError`] whose
//! `Display` is the message shown to the user and whose [`ErrorKind`] is the
//! tag the dispatcher inspects. Nothing here is ever raised as a panic.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::imaging::{BackendError, Dimensions};
use crate::request::Operation;

/// Result of running one operation.
pub type OperationOutcome = Result<Completed, OperationError>;

/// Failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    UnrecognizedFormat,
    OpenError,
    InvalidParameter,
    ProcessingError,
    SaveError,
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Error: Invalid flip direction '{0}'. Choose 'horizontal' or 'vertical'.")]
    InvalidDirection(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperationError::InvalidDirection(_) => ErrorKind::InvalidParameter,
            OperationError::Backend(BackendError::NotFound { .. }) => ErrorKind::InputNotFound,
            OperationError::Backend(BackendError::UnrecognizedFormat { .. }) => {
                ErrorKind::UnrecognizedFormat
            }
            OperationError::Backend(BackendError::Open { .. }) => ErrorKind::OpenError,
            OperationError::Backend(BackendError::Processing { .. }) => ErrorKind::ProcessingError,
            OperationError::Backend(BackendError::Save { .. }) => ErrorKind::SaveError,
        }
    }
}

/// A successfully written output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub operation: Operation,
    pub output: PathBuf,
    /// Dimensions of the raster that was written.
    pub dimensions: Dimensions,
}

impl fmt::Display for Completed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = self.output.display();
        match self.operation {
            Operation::Resize { .. } => {
                write!(f, "Image resized successfully and saved to {output}")
            }
            Operation::Thumbnail { .. } => {
                write!(f, "Thumbnail created successfully and saved to {output}")
            }
            Operation::Flip { direction } => {
                write!(f, "Image flipped {} and saved to {output}", direction.adverb())
            }
            Operation::Crop(_) => write!(f, "Image cropped successfully and saved to {output}"),
        }
    }
}
