// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use passband::overlay::OverlayRenderer;
use passband::plane::PlaneMut;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
pub const CELL_WIDTH: usize = GLYPH_WIDTH + 1;
pub const CELL_HEIGHT: usize = GLYPH_HEIGHT + 1;

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// 5x7 glyph rows; the most significant of the low five bits is the
/// leftmost pixel. Characters outside the table render as blank cells.
fn glyph(c: char) -> [u8; GLYPH_HEIGHT] {
    match c {
        'A' => [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'B' => [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e],
        'C' => [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e],
        'D' => [0x1c, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1c],
        'E' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f],
        'F' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10],
        'G' => [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f],
        'H' => [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'I' => [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f],
        'M' => [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'P' => [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10],
        'Q' => [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d],
        'R' => [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11],
        'S' => [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e],
        'T' => [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a],
        'X' => [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0a, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f],
        '0' => [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e],
        '1' => [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e],
        '2' => [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f],
        '3' => [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e],
        '4' => [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02],
        '5' => [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e],
        '6' => [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e],
        '7' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e],
        '9' => [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0c, 0x0c],
        '-' => [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00],
        _ => [0x00; GLYPH_HEIGHT],
    }
}

/// Stamps banner text into a plane as 6x8 character cells, foreground on
/// a solid background, clipped at the plane bounds. Line `n` starts at
/// pixel row `n * 8`, column 0.
pub struct BitmapOverlay;

impl OverlayRenderer for BitmapOverlay {
    fn draw_line(&self, plane: &mut PlaneMut<'_>, line: usize, text: &str) {
        let (width, height) = plane.size();
        let top = line * CELL_HEIGHT;
        for (index, c) in text.chars().enumerate() {
            let rows = glyph(c.to_ascii_uppercase());
            let left = index * CELL_WIDTH;
            if left >= width {
                break;
            }
            for (dy, bits) in rows.iter().enumerate() {
                let y = top + dy;
                if y >= height {
                    return;
                }
                let row = plane.row(y);
                for dx in 0..CELL_WIDTH {
                    let x = left + dx;
                    if x >= width {
                        break;
                    }
                    let lit = dx < GLYPH_WIDTH && (bits >> (GLYPH_WIDTH - 1 - dx)) & 1 == 1;
                    row[x] = if lit { FOREGROUND } else { BACKGROUND };
                }
            }
            // Bottom spacing row of the cell.
            let y = top + GLYPH_HEIGHT;
            if y < height {
                let row = plane.row(y);
                for dx in 0..CELL_WIDTH {
                    let x = left + dx;
                    if x >= width {
                        break;
                    }
                    row[x] = BACKGROUND;
                }
            }
        }
    }
}
