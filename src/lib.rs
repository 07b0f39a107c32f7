//! # image-tool
//!
//! A small command-line image manipulation tool: resize, thumbnail, flip and
//! crop. Each invocation opens one image, applies one geometric transform and
//! writes the result to a new file. Pixel work is delegated to the `image`
//! crate; this crate owns the request/outcome contract around it.
//!
//! # Flow
//!
//! ```text
//! argv ──clap──▶ Cli ──into_action──▶ OperationRequest ──imaging::run──▶ OperationOutcome ──▶ stdout
//!                          │                                                  │
//!                    DispatchError (exit 1)                      exit 0 (or 1 with --strict)
//! ```
//!
//! Every operation runs in two phases:
//!
//! 1. **Open**: decode the input. Fails with *input not found*,
//!    *unrecognized format* or a generic *open error*.
//! 2. **Transform & save**: apply the transform and write the output.
//!    Fails with a *processing error* or a *save error*. Output is staged in a temp file next to the
//!    destination and renamed into place, so a failed save never leaves a
//!    partial file behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cli`] | clap definitions and dispatcher validation |
//! | [`request`] | `OperationRequest`: input, output, and the transform to apply |
//! | [`outcome`] | `OperationOutcome`, success messages and the error taxonomy |
//! | [`imaging`] | Backend trait, `image`-crate backend, dimension math, operations |
//! | [`config`] | Optional TOML config: filters, default thumbnail size, JPEG quality |
//! | [`output`] | Formatting of outcome lines for stdout |

pub mod cli;
pub mod config;
pub mod imaging;
pub mod outcome;
pub mod output;
pub mod request;

#[cfg(test)]
pub(crate) mod test_helpers;
