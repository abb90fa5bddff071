// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::plane::{PlaneMut, PlaneRef};

/// Borrowed planes of one source frame: a luma plane plus either no chroma
/// or exactly two chroma planes. Chroma may be subsampled; each plane
/// carries its own dimensions.
pub struct FrameRef<'a> {
    pub luma: PlaneRef<'a>,
    pub chroma: Option<[PlaneRef<'a>; 2]>,
}

/// Borrowed planes of one destination frame.
pub struct FrameMut<'a> {
    pub luma: PlaneMut<'a>,
    pub chroma: Option<[PlaneMut<'a>; 2]>,
}

impl<'a> FrameRef<'a> {
    pub fn gray(luma: PlaneRef<'a>) -> FrameRef<'a> {
        FrameRef { luma, chroma: None }
    }

    pub fn yuv(luma: PlaneRef<'a>, u: PlaneRef<'a>, v: PlaneRef<'a>) -> FrameRef<'a> {
        FrameRef {
            luma,
            chroma: Some([u, v]),
        }
    }
}

impl<'a> FrameMut<'a> {
    pub fn gray(luma: PlaneMut<'a>) -> FrameMut<'a> {
        FrameMut { luma, chroma: None }
    }

    pub fn yuv(luma: PlaneMut<'a>, u: PlaneMut<'a>, v: PlaneMut<'a>) -> FrameMut<'a> {
        FrameMut {
            luma,
            chroma: Some([u, v]),
        }
    }
}
