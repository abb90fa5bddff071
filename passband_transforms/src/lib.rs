// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]

pub mod dct2d;

pub use dct2d::*;

#[cfg(test)]
mod tests;
