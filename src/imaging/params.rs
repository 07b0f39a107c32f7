//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`operations`](super::operations) module (which turns
//! a request into concrete parameters) and the [`backend`](super::backend)
//! (which does the pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 75). Clamped on construction.
//! - [`Resampling`] — Filter used when scaling.
//! - [`ResizeParams`], [`ThumbnailParams`], [`FlipParams`], [`CropParams`] — one per operation.

use crate::request::{CropRect, FlipDirection};
use image::imageops::FilterType;
use serde::Deserialize;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100). Only JPEG output uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Resampling filter, named as it appears in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resampling {
    Nearest,
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl Resampling {
    pub fn filter_type(self) -> FilterType {
        match self {
            Resampling::Nearest => FilterType::Nearest,
            Resampling::Triangle => FilterType::Triangle,
            Resampling::CatmullRom => FilterType::CatmullRom,
            Resampling::Gaussian => FilterType::Gaussian,
            Resampling::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parameters for an exact resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub filter: Resampling,
    pub quality: Quality,
}

/// Parameters for a bounding-box thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Neither output dimension may exceed this.
    pub max_size: u32,
    pub filter: Resampling,
    pub quality: Quality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlipParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub direction: FlipDirection,
    pub quality: Quality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rect: CropRect,
    pub quality: Quality,
}
