//! Command-line surface and dispatcher validation.
//!
//! clap enforces what it can (required flags, integer syntax, the flip
//! direction value set). What it cannot express lives in
//! [`Command::into_action`], which turns parsed arguments into an
//! [`OperationRequest`] or a [`DispatchError`].

use crate::outcome::OperationOutcome;
use crate::request::{CropRect, FlipDirection, Operation, OperationRequest};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a failed dispatch or a failed operation under `--strict`.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "image-tool")]
#[command(version)]
#[command(about = "A simple image manipulation tool.")]
#[command(long_about = "\
A simple image manipulation tool.

Each command reads one image, applies one transform, and writes the result
to a new file. The output format follows the output file's extension
(png, jpg, gif, bmp, tif, webp).

Examples:
  image-tool resize photo.jpg small.jpg --width 640 --height 480
  image-tool thumbnail photo.jpg thumb.png --size 96
  image-tool flip photo.jpg mirrored.jpg --direction horizontal
  image-tool crop photo.jpg detail.png --x 10 --y 20 --width 200 --height 100

Run 'image-tool gen-config' to print a documented config file.")]
pub struct Cli {
    /// Increase log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Read settings from a TOML config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Exit with a non-zero status when the operation itself fails
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Positional input and output paths shared by every operation.
#[derive(Args, Debug, Clone)]
pub struct Files {
    /// Path to the input image file
    pub input_file: PathBuf,
    /// Path to save the result
    pub output_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ResizeArgs {
    #[command(flatten)]
    pub files: Files,
    /// New width for the image
    #[arg(long, required = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,
    /// New height for the image
    #[arg(long, required = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct ThumbnailArgs {
    #[command(flatten)]
    pub files: Files,
    /// Max size of the thumbnail [default: 128, or thumbnail.default_size from the config]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct FlipArgs {
    #[command(flatten)]
    pub files: Files,
    /// Direction to flip
    #[arg(long, value_enum)]
    pub direction: FlipDirection,
}

#[derive(Args, Debug, Clone)]
pub struct CropArgs {
    #[command(flatten)]
    pub files: Files,
    /// X-coordinate of the top-left corner of the crop area
    #[arg(long, allow_negative_numbers = true)]
    pub x: i64,
    /// Y-coordinate of the top-left corner of the crop area
    #[arg(long, allow_negative_numbers = true)]
    pub y: i64,
    /// Width of the crop area
    #[arg(long, allow_negative_numbers = true)]
    pub width: i64,
    /// Height of the crop area
    #[arg(long, allow_negative_numbers = true)]
    pub height: i64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resize an image to an exact width and height
    Resize(ResizeArgs),
    /// Create a thumbnail that fits within a square, keeping the aspect ratio
    Thumbnail(ThumbnailArgs),
    /// Flip an image horizontally or vertically
    Flip(FlipArgs),
    /// Crop a rectangle out of an image
    Crop(CropArgs),
    /// Print a stock config file with all options documented
    GenConfig,
}

/// Validation failures caught before any operation runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Error: Both --width and --height are required for resize.")]
    MissingResizeDimensions,
    #[error("Error: Crop width and height must be positive values.")]
    NonPositiveCropSize,
}

/// What the binary should do after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(OperationRequest),
    GenConfig,
}

fn request(files: Files, operation: Operation) -> OperationRequest {
    OperationRequest::new(files.input_file, files.output_file, operation)
}

impl Command {
    /// Validate the parsed arguments and build the request.
    pub fn into_action(self) -> Result<Action, DispatchError> {
        let req = match self {
            Command::Resize(args) => {
                // clap marks both flags required; this covers parsers built without that
                let (Some(width), Some(height)) = (args.width, args.height) else {
                    return Err(DispatchError::MissingResizeDimensions);
                };
                request(args.files, Operation::Resize { width, height })
            }
            Command::Thumbnail(args) => request(args.files, Operation::Thumbnail { size: args.size }),
            Command::Flip(args) => request(
                args.files,
                Operation::Flip {
                    direction: args.direction,
                },
            ),
            Command::Crop(args) => {
                if args.width <= 0 || args.height <= 0 {
                    return Err(DispatchError::NonPositiveCropSize);
                }
                let rect = CropRect::from_origin_and_size(args.x, args.y, args.width, args.height);
                request(args.files, Operation::Crop(rect))
            }
            Command::GenConfig => return Ok(Action::GenConfig),
        };
        Ok(Action::Run(req))
    }
}

/// Exit status for a finished operation.
///
/// Operation failures are reported but exit zero unless `strict` is set.
pub fn exit_status(outcome: &OperationOutcome, strict: bool) -> u8 {
    match outcome {
        Err(_) if strict => EXIT_FAILURE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{BackendError, Dimensions};
    use crate::outcome::{Completed, OperationError};
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("image-tool").chain(args.iter().copied())).unwrap()
    }

    fn action(args: &[&str]) -> Result<Action, DispatchError> {
        parse(args).command.expect("subcommand").into_action()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses_to_none() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn resize_builds_request() {
        let got = action(&["resize", "in.png", "out.png", "--width", "50", "--height", "25"]);
        assert_eq!(
            got,
            Ok(Action::Run(OperationRequest::new(
                "in.png",
                "out.png",
                Operation::Resize {
                    width: 50,
                    height: 25
                }
            )))
        );
    }

    #[test]
    fn resize_requires_both_flags_at_parse_time() {
        let result = Cli::try_parse_from(["image-tool", "resize", "in.png", "out.png", "--width", "5"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn resize_rejects_zero_dimension() {
        let result = Cli::try_parse_from([
            "image-tool", "resize", "in.png", "out.png", "--width", "0", "--height", "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn resize_runtime_check_catches_missing_dimension() {
        let cmd = Command::Resize(ResizeArgs {
            files: Files {
                input_file: "in.png".into(),
                output_file: "out.png".into(),
            },
            width: Some(5),
            height: None,
        });
        assert_eq!(cmd.into_action(), Err(DispatchError::MissingResizeDimensions));
    }

    #[test]
    fn thumbnail_size_is_optional() {
        let got = action(&["thumbnail", "in.png", "out.png"]);
        assert!(matches!(
            got,
            Ok(Action::Run(OperationRequest {
                operation: Operation::Thumbnail { size: None },
                ..
            }))
        ));

        let got = action(&["thumbnail", "in.png", "out.png", "--size", "64"]);
        assert!(matches!(
            got,
            Ok(Action::Run(OperationRequest {
                operation: Operation::Thumbnail { size: Some(64) },
                ..
            }))
        ));
    }

    #[test]
    fn flip_accepts_only_known_directions() {
        let got = action(&["flip", "in.png", "out.png", "--direction", "vertical"]);
        assert!(matches!(
            got,
            Ok(Action::Run(OperationRequest {
                operation: Operation::Flip {
                    direction: FlipDirection::Vertical
                },
                ..
            }))
        ));

        let result = Cli::try_parse_from([
            "image-tool", "flip", "in.png", "out.png", "--direction", "diagonal",
        ]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn crop_converts_origin_and_size_to_rectangle() {
        let got = action(&[
            "crop", "in.png", "out.png", "--x", "2", "--y", "3", "--width", "6", "--height", "4",
        ]);
        assert_eq!(
            got,
            Ok(Action::Run(OperationRequest::new(
                "in.png",
                "out.png",
                Operation::Crop(CropRect::new(2, 3, 8, 7))
            )))
        );
    }

    #[test]
    fn crop_accepts_negative_origin() {
        let got = action(&[
            "crop", "in.png", "out.png", "--x", "-2", "--y", "0", "--width", "6", "--height", "4",
        ]);
        assert!(matches!(
            got,
            Ok(Action::Run(OperationRequest {
                operation: Operation::Crop(CropRect { left: -2, right: 4, .. }),
                ..
            }))
        ));
    }

    #[test]
    fn crop_rejects_non_positive_size() {
        for (w, h) in [("0", "5"), ("5", "0"), ("-3", "5"), ("5", "-1")] {
            let got = action(&[
                "crop", "in.png", "out.png", "--x", "0", "--y", "0", "--width", w, "--height", h,
            ]);
            assert_eq!(got, Err(DispatchError::NonPositiveCropSize), "{w}x{h}");
        }
    }

    #[test]
    fn gen_config_action() {
        assert_eq!(action(&["gen-config"]), Ok(Action::GenConfig));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = parse(&["thumbnail", "a.png", "b.png", "-dd", "--strict", "--config", "c.toml"]);
        assert_eq!(cli.debug, 2);
        assert!(cli.strict);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn exit_status_reproduces_zero_on_operation_failure() {
        let failed: OperationOutcome = Err(OperationError::from(BackendError::NotFound {
            path: "x.png".into(),
        }));
        assert_eq!(exit_status(&failed, false), 0);
        assert_eq!(exit_status(&failed, true), EXIT_FAILURE);

        let ok: OperationOutcome = Ok(Completed {
            operation: Operation::Thumbnail { size: Some(5) },
            output: "y.png".into(),
            dimensions: Dimensions {
                width: 5,
                height: 5,
            },
        });
        assert_eq!(exit_status(&ok, true), 0);
    }
}
