// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid plane dimensions: {0}x{1}")]
    InvalidDimension(usize, usize),
    #[error("Plane size too large: {0}x{1}")]
    PlaneSizeTooLarge(usize, usize),
    #[error("Invalid cutoff_frequency {0}: must be finite and non-negative")]
    InvalidCutoff(f64),
    #[error("Only planar YUV or grayscale input is supported")]
    UnsupportedColorFamily,
    #[error("Unsupported bit depth: {0}, only 8-bit samples are supported")]
    UnsupportedBitDepth(u32),
    #[error("Overlay requires an 8-bit format, got {0}-bit")]
    OverlayUnsupported(u32),
    #[error("Overlay enabled but no renderer was injected")]
    MissingOverlayRenderer,
    #[error("Row stride {0} is smaller than plane width {1}")]
    StrideTooSmall(usize, usize),
    #[error("Plane buffer holds {0} samples, at least {1} required")]
    PlaneTooSmall(usize, usize),
    #[error("Plane size {0}x{1} does not match filter size {2}x{3}")]
    PlaneSizeMismatch(usize, usize, usize, usize),
    #[error("Copy of different size: {0}x{1} into {2}x{3}")]
    CopyOfDifferentSize(usize, usize, usize, usize),
    #[error("Chroma layout of source and destination frames differ")]
    ChromaLayoutMismatch,
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
