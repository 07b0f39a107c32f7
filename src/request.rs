//! Operation requests built once per invocation.
//!
//! An [`OperationRequest`] is the whole of what the dispatcher knows about the
//! work to do: where to read, where to write, and which transform to apply.
//! It is immutable and passed by value into [`imaging::run`](crate::imaging::run).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::outcome::OperationError;

/// Mirror axis for a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FlipDirection {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
}

impl FlipDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            FlipDirection::Horizontal => "horizontal",
            FlipDirection::Vertical => "vertical",
        }
    }

    /// Adverb used in success messages ("flipped horizontally").
    pub fn adverb(self) -> &'static str {
        match self {
            FlipDirection::Horizontal => "horizontally",
            FlipDirection::Vertical => "vertically",
        }
    }
}

impl fmt::Display for FlipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlipDirection {
    type Err = OperationError;

    /// Exact, case-sensitive match on `horizontal` / `vertical`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(FlipDirection::Horizontal),
            "vertical" => Ok(FlipDirection::Vertical),
            other => Err(OperationError::InvalidDirection(other.to_string())),
        }
    }
}

/// Absolute pixel rectangle `(left, top, right, bottom)`.
///
/// Coordinates are signed and unvalidated: negative, out-of-range and
/// inverted rectangles are representable and handed to the backend as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropRect {
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and an extent, as the `crop` subcommand takes them.
    pub fn from_origin_and_size(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// The transform to apply, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Resize { width: u32, height: u32 },
    /// `size: None` falls back to the configured default (128 unless overridden).
    Thumbnail { size: Option<u32> },
    Flip { direction: FlipDirection },
    Crop(CropRect),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Resize { .. } => "resize",
            Operation::Thumbnail { .. } => "thumbnail",
            Operation::Flip { .. } => "flip",
            Operation::Crop(_) => "crop",
        }
    }
}

/// One operation on one input file, writing one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub operation: Operation,
}

impl OperationRequest {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        operation: Operation,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            operation,
        }
    }
}
