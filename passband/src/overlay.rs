// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::plane::PlaneMut;

/// Text lines drawn into the output luma plane when the overlay is enabled.
pub const BANNER_LINES: [&str; 3] = [
    "PASSBAND",
    concat!(" VERSION ", env!("CARGO_PKG_VERSION")),
    " MODE LOW-PASS",
];

/// Renders one ASCII diagnostic line into an 8-bit plane.
///
/// Implementations are supplied by the host adapter and injected into the
/// filter at construction. The filter invokes them only after the luma
/// write-back, and only when the overlay was validated at construction.
pub trait OverlayRenderer {
    /// Draws `text` at the fixed origin of text line `line`.
    fn draw_line(&self, plane: &mut PlaneMut<'_>, line: usize, text: &str);
}
