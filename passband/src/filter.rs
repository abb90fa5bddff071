// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use passband_transforms::Dct2dPlan;
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    frame::{FrameMut, FrameRef},
    options::{FilterMode, FilterOptions},
    overlay::{BANNER_LINES, OverlayRenderer},
    stream::{ColorFamily, VideoFormat},
};

/// Frequency-domain attenuation of one luma plane: forward cosine
/// transform, coefficient clamp, inverse transform.
///
/// A filter instance owns its working buffers and transform plans, sized
/// once at construction for a fixed plane size. One instance must not be
/// driven by two frame-processing calls at a time; hosts that process
/// frames in parallel create one instance per execution context.
pub struct LowPassFilter {
    width: usize,
    height: usize,
    limit: f32,
    options: FilterOptions,
    overlay: Option<Box<dyn OverlayRenderer>>,
    plan: Dct2dPlan,
    spatial: Vec<f32>,
    spectral: Vec<f32>,
}

impl LowPassFilter {
    /// Validates dimensions, format and parameters, then allocates the two
    /// working buffers and builds the paired transform plans. Everything
    /// that can fail fails here; on a constructed filter, `apply` and
    /// `process_frame` succeed for every frame matching the fixed size.
    #[instrument(skip(overlay), err)]
    pub fn new(
        width: usize,
        height: usize,
        format: &VideoFormat,
        options: FilterOptions,
        overlay: Option<Box<dyn OverlayRenderer>>,
    ) -> Result<LowPassFilter> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension(width, height));
        }
        if format.color_family == ColorFamily::Rgb {
            return Err(Error::UnsupportedColorFamily);
        }
        if options.overlay && format.bits_per_sample != 8 {
            return Err(Error::OverlayUnsupported(format.bits_per_sample));
        }
        if format.bits_per_sample != 8 {
            return Err(Error::UnsupportedBitDepth(format.bits_per_sample));
        }
        if !options.cutoff_frequency.is_finite() || options.cutoff_frequency < 0.0 {
            return Err(Error::InvalidCutoff(options.cutoff_frequency));
        }
        if options.overlay && overlay.is_none() {
            return Err(Error::MissingOverlayRenderer);
        }

        let len = width
            .checked_mul(height)
            .ok_or(Error::PlaneSizeTooLarge(width, height))?;
        debug!("allocating two {len}-sample working buffers");
        let mut spatial = Vec::new();
        spatial.try_reserve_exact(len)?;
        spatial.resize(len, 0.0);
        let mut spectral = Vec::new();
        spectral.try_reserve_exact(len)?;
        spectral.resize(len, 0.0);
        let plan = Dct2dPlan::new(width, height);

        Ok(LowPassFilter {
            width,
            height,
            limit: options.cutoff_frequency.exp() as f32,
            options,
            overlay,
            plan,
            spatial,
            spectral,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Pixel-domain working buffer. The extractor fills it before `apply`
    /// and reads the filtered plane from it afterwards.
    pub fn spatial(&self) -> &[f32] {
        &self.spatial
    }

    pub fn spatial_mut(&mut self) -> &mut [f32] {
        &mut self.spatial
    }

    /// Transform-domain coefficients left by the most recent `apply`,
    /// after the clamp.
    pub fn coefficients(&self) -> &[f32] {
        &self.spectral
    }

    /// Runs the forward transform over the spatial buffer, clamps every
    /// coefficient from above to `exp(cutoff_frequency)`, and runs the
    /// inverse transform back into the spatial buffer.
    ///
    /// The clamp is an upper bound only: coefficients at or below the
    /// limit, negative ones included, pass through bit-for-bit. The result
    /// is unnormalized; one pass scales an otherwise unclamped plane by
    /// `round_trip_gain(width, height)`, and the write-back saturation
    /// absorbs the excursion.
    pub fn apply(&mut self) {
        match self.options.mode {
            FilterMode::LowPass => {
                self.plan.forward(&self.spatial, &mut self.spectral);
                for coefficient in self.spectral.iter_mut() {
                    *coefficient = self.limit.min(*coefficient);
                }
                self.plan.inverse(&self.spectral, &mut self.spatial);
            }
        }
    }

    /// Processes one frame: luma through extract, `apply` and saturating
    /// write-back, chroma copied verbatim, then the diagnostic banner when
    /// enabled. The stages run strictly in that order.
    pub fn process_frame(&mut self, src: &FrameRef<'_>, dst: &mut FrameMut<'_>) -> Result<()> {
        self.check_luma(src.luma.size())?;
        self.check_luma(dst.luma.size())?;

        src.luma.extract_to(&mut self.spatial);
        self.apply();
        dst.luma.write_saturated(&self.spatial);

        match (src.chroma.as_ref(), dst.chroma.as_mut()) {
            (None, None) => {}
            (Some(src_chroma), Some(dst_chroma)) => {
                for (src_plane, dst_plane) in src_chroma.iter().zip(dst_chroma.iter_mut()) {
                    dst_plane.copy_from(src_plane)?;
                }
            }
            _ => return Err(Error::ChromaLayoutMismatch),
        }

        if self.options.overlay {
            if let Some(renderer) = self.overlay.as_deref() {
                for (line, text) in BANNER_LINES.iter().enumerate() {
                    renderer.draw_line(&mut dst.luma, line, text);
                }
            }
        }
        Ok(())
    }

    fn check_luma(&self, size: (usize, usize)) -> Result<()> {
        if size != (self.width, self.height) {
            return Err(Error::PlaneSizeMismatch(
                size.0,
                size.1,
                self.width,
                self.height,
            ));
        }
        Ok(())
    }
}
