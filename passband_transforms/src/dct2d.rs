// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::sync::Arc;

use rustdct::{DctPlanner, RequiredScratch, TransformType2And3};

/// Gain applied on top of the textbook DCT-II/DCT-III sums along each axis.
/// One forward plus one inverse pass along a single axis of length `n`
/// multiplies every sample by `AXIS_GAIN * AXIS_GAIN * n / 2`.
pub const AXIS_GAIN: f32 = 2.0;

/// Factor by which one [`Dct2dPlan::forward`] followed by one
/// [`Dct2dPlan::inverse`] scales every sample: `4 * width * height`.
/// Callers that need a unit round trip divide by this; the plan itself
/// applies no normalization.
pub fn round_trip_gain(width: usize, height: usize) -> f32 {
    AXIS_GAIN * AXIS_GAIN * (width * height) as f32
}

/// Precomputed execution plan for a forward 2D DCT-II and the matching
/// inverse 2D DCT-III over `width x height` buffers.
///
/// Building a plan is comparatively expensive; a plan is built once per
/// stream and reused for every frame. The dimensions are fixed for the
/// plan's lifetime, and all buffers (transpose and scratch space included)
/// are allocated here, never per transform.
pub struct Dct2dPlan {
    width: usize,
    height: usize,
    row_forward: Arc<dyn TransformType2And3<f32>>,
    row_inverse: Arc<dyn TransformType2And3<f32>>,
    col_forward: Arc<dyn TransformType2And3<f32>>,
    col_inverse: Arc<dyn TransformType2And3<f32>>,
    columns: Vec<f32>,
    scratch: Vec<f32>,
}

impl Dct2dPlan {
    pub fn new(width: usize, height: usize) -> Dct2dPlan {
        assert!(width > 0 && height > 0, "plan dimensions must be positive");
        let mut planner = DctPlanner::<f32>::new();
        let row_forward = planner.plan_dct2(width);
        let row_inverse = planner.plan_dct3(width);
        let col_forward = planner.plan_dct2(height);
        let col_inverse = planner.plan_dct3(height);
        let scratch_len = row_forward
            .get_scratch_len()
            .max(row_inverse.get_scratch_len())
            .max(col_forward.get_scratch_len())
            .max(col_inverse.get_scratch_len());
        Dct2dPlan {
            width,
            height,
            row_forward,
            row_inverse,
            col_forward,
            col_inverse,
            columns: vec![0.0; width * height],
            scratch: vec![0.0; scratch_len],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Forward transform: pixel rows into unnormalized DCT-II coefficients,
    /// lowest frequency first along each axis.
    pub fn forward(&mut self, spatial: &[f32], spectral: &mut [f32]) {
        assert_eq!(spatial.len(), self.width * self.height);
        assert_eq!(spectral.len(), self.width * self.height);
        spectral.copy_from_slice(spatial);
        for row in spectral.chunks_exact_mut(self.width) {
            self.row_forward
                .process_dct2_with_scratch(row, &mut self.scratch);
        }
        transpose(spectral, self.width, self.height, &mut self.columns);
        for column in self.columns.chunks_exact_mut(self.height) {
            self.col_forward
                .process_dct2_with_scratch(column, &mut self.scratch);
        }
        transpose(&self.columns, self.height, self.width, spectral);
        for value in spectral.iter_mut() {
            *value *= AXIS_GAIN * AXIS_GAIN;
        }
    }

    /// Inverse transform: coefficients back to pixel rows via the paired
    /// DCT-III. Composed with [`Dct2dPlan::forward`] this scales every
    /// sample by [`round_trip_gain`].
    pub fn inverse(&mut self, spectral: &[f32], spatial: &mut [f32]) {
        assert_eq!(spectral.len(), self.width * self.height);
        assert_eq!(spatial.len(), self.width * self.height);
        spatial.copy_from_slice(spectral);
        for row in spatial.chunks_exact_mut(self.width) {
            self.row_inverse
                .process_dct3_with_scratch(row, &mut self.scratch);
        }
        transpose(spatial, self.width, self.height, &mut self.columns);
        for column in self.columns.chunks_exact_mut(self.height) {
            self.col_inverse
                .process_dct3_with_scratch(column, &mut self.scratch);
        }
        transpose(&self.columns, self.height, self.width, spatial);
        for value in spatial.iter_mut() {
            *value *= AXIS_GAIN * AXIS_GAIN;
        }
    }
}

/// `input` holds `rows` rows of `cols` values; `output` receives `cols` rows
/// of `rows` values.
fn transpose(input: &[f32], cols: usize, rows: usize, output: &mut [f32]) {
    debug_assert_eq!(input.len(), cols * rows);
    debug_assert_eq!(output.len(), cols * rows);
    for y in 0..rows {
        for x in 0..cols {
            output[x * rows + y] = input[y * cols + x];
        }
    }
}
