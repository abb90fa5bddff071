// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// Read-only view of one host-owned plane of 8-bit samples.
///
/// Rows are `width` samples long and start `stride` samples apart. The view
/// never owns the buffer and is not kept beyond one frame-processing call.
#[derive(Clone, Copy)]
pub struct PlaneRef<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

/// Writable counterpart of [`PlaneRef`].
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

fn plane_layout_check(len: usize, width: usize, height: usize, stride: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension(width, height));
    }
    if stride < width {
        return Err(Error::StrideTooSmall(stride, width));
    }
    let required = (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(width))
        .ok_or(Error::PlaneSizeTooLarge(width, height))?;
    if len < required {
        return Err(Error::PlaneTooSmall(len, required));
    }
    Ok(())
}

impl<'a> PlaneRef<'a> {
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> Result<PlaneRef<'a>> {
        plane_layout_check(data.len(), width, height, stride)?;
        Ok(PlaneRef {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn row(&self, row: usize) -> &'a [u8] {
        debug_assert!(row < self.height);
        let start = row * self.stride;
        &self.data[start..start + self.width]
    }

    /// Marshals the samples into a contiguous float buffer of
    /// `width * height` values, row by row.
    pub fn extract_to(&self, dst: &mut [f32]) {
        assert_eq!(dst.len(), self.width * self.height);
        for (y, dst_row) in dst.chunks_exact_mut(self.width).enumerate() {
            for (value, sample) in dst_row.iter_mut().zip(self.row(y)) {
                *value = f32::from(*sample);
            }
        }
    }
}

fn saturate_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl<'a> PlaneMut<'a> {
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<PlaneMut<'a>> {
        plane_layout_check(data.len(), width, height, stride)?;
        Ok(PlaneMut {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn row(&mut self, row: usize) -> &mut [u8] {
        debug_assert!(row < self.height);
        let start = row * self.stride;
        &mut self.data[start..start + self.width]
    }

    pub fn as_plane_ref(&self) -> PlaneRef<'_> {
        PlaneRef {
            data: self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Writes a contiguous float buffer back into the 8-bit plane, rounding
    /// and clamping to `[0, 255]`. The clamp is the only protection against
    /// out-of-range values produced upstream.
    pub fn write_saturated(&mut self, src: &[f32]) {
        assert_eq!(src.len(), self.width * self.height);
        for (y, src_row) in src.chunks_exact(self.width).enumerate() {
            for (sample, value) in self.row(y).iter_mut().zip(src_row) {
                *sample = saturate_to_u8(*value);
            }
        }
    }

    /// Byte-for-byte row copy from a same-sized plane.
    pub fn copy_from(&mut self, src: &PlaneRef<'_>) -> Result<()> {
        if src.size() != self.size() {
            return Err(Error::CopyOfDifferentSize(
                src.width,
                src.height,
                self.width,
                self.height,
            ));
        }
        for y in 0..self.height {
            self.row(y).copy_from_slice(src.row(y));
        }
        Ok(())
    }
}
