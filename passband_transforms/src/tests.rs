// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::*;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::f64::consts::PI;
use test_log::test;

/// Textbook DCT-II along each row of a `rows x cols` matrix, times
/// [`AXIS_GAIN`], computed in f64.
fn slow_forward_rows(input: &[f64], cols: usize, rows: usize) -> Vec<f64> {
    let mut output = vec![0.0f64; input.len()];
    for y in 0..rows {
        for k in 0..cols {
            let mut sum = 0.0;
            for n in 0..cols {
                sum += input[y * cols + n]
                    * (PI * (n as f64 + 0.5) * k as f64 / cols as f64).cos();
            }
            output[y * cols + k] = sum * f64::from(AXIS_GAIN);
        }
    }
    output
}

/// Matching DCT-III along each row: `y_n = x_0 + 2 * sum_k x_k cos(...)`.
fn slow_inverse_rows(input: &[f64], cols: usize, rows: usize) -> Vec<f64> {
    let mut output = vec![0.0f64; input.len()];
    for y in 0..rows {
        for n in 0..cols {
            let mut sum = input[y * cols];
            for k in 1..cols {
                sum += 2.0
                    * input[y * cols + k]
                    * (PI * k as f64 * (n as f64 + 0.5) / cols as f64).cos();
            }
            output[y * cols + n] = sum;
        }
    }
    output
}

fn slow_transpose(input: &[f64], cols: usize, rows: usize) -> Vec<f64> {
    let mut output = vec![0.0f64; input.len()];
    for y in 0..rows {
        for x in 0..cols {
            output[x * rows + y] = input[y * cols + x];
        }
    }
    output
}

fn slow_forward_2d(input: &[f64], width: usize, height: usize) -> Vec<f64> {
    let rows = slow_forward_rows(input, width, height);
    let transposed = slow_transpose(&rows, width, height);
    let columns = slow_forward_rows(&transposed, height, width);
    slow_transpose(&columns, height, width)
}

fn slow_inverse_2d(input: &[f64], width: usize, height: usize) -> Vec<f64> {
    let rows = slow_inverse_rows(input, width, height);
    let transposed = slow_transpose(&rows, width, height);
    let columns = slow_inverse_rows(&transposed, height, width);
    slow_transpose(&columns, height, width)
}

fn random_plane(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0f32..1.0)).collect()
}

#[track_caller]
fn check_close(a: f64, b: f64, max_err: f64) {
    let abs = (a - b).abs();
    let rel = abs / a.abs().max(b.abs());
    assert!(
        abs < max_err || rel < max_err,
        "a: {a} b: {b} abs diff: {abs:?} rel diff: {rel:?}"
    );
}

#[track_caller]
fn check_all_close(a: &[f64], b: &[f64], max_err: f64) {
    assert_eq!(a.len(), b.len());
    for (a, b) in a.iter().zip(b.iter()) {
        check_close(*a, *b, max_err);
    }
}

#[test]
fn forward_matches_slow_reference() {
    const WIDTH: usize = 7;
    const HEIGHT: usize = 5;
    let spatial = random_plane(WIDTH * HEIGHT, 0);
    let slow_input: Vec<f64> = spatial.iter().map(|&x| f64::from(x)).collect();
    let expected = slow_forward_2d(&slow_input, WIDTH, HEIGHT);

    let mut plan = Dct2dPlan::new(WIDTH, HEIGHT);
    let mut spectral = vec![0.0f32; WIDTH * HEIGHT];
    plan.forward(&spatial, &mut spectral);

    let got: Vec<f64> = spectral.iter().map(|&x| f64::from(x)).collect();
    check_all_close(&got, &expected, 1e-3);
}

#[test]
fn inverse_matches_slow_reference() {
    const WIDTH: usize = 6;
    const HEIGHT: usize = 11;
    let spectral = random_plane(WIDTH * HEIGHT, 1);
    let slow_input: Vec<f64> = spectral.iter().map(|&x| f64::from(x)).collect();
    let expected = slow_inverse_2d(&slow_input, WIDTH, HEIGHT);

    let mut plan = Dct2dPlan::new(WIDTH, HEIGHT);
    let mut spatial = vec![0.0f32; WIDTH * HEIGHT];
    plan.inverse(&spectral, &mut spatial);

    let got: Vec<f64> = spatial.iter().map(|&x| f64::from(x)).collect();
    check_all_close(&got, &expected, 1e-3);
}

#[test]
fn round_trip_scales_by_named_gain() {
    const WIDTH: usize = 12;
    const HEIGHT: usize = 9;
    let mut rng = XorShiftRng::seed_from_u64(2);
    let spatial: Vec<f32> = (0..WIDTH * HEIGHT)
        .map(|_| rng.random_range(0.0f32..255.0))
        .collect();

    let mut plan = Dct2dPlan::new(WIDTH, HEIGHT);
    let mut spectral = vec![0.0f32; WIDTH * HEIGHT];
    let mut restored = vec![0.0f32; WIDTH * HEIGHT];
    plan.forward(&spatial, &mut spectral);
    plan.inverse(&spectral, &mut restored);

    let gain = round_trip_gain(WIDTH, HEIGHT);
    for (got, want) in restored.iter().zip(spatial.iter()) {
        check_close(f64::from(got / gain), f64::from(*want), 1e-3);
    }
}

#[test]
fn constant_plane_concentrates_in_dc() {
    const WIDTH: usize = 8;
    const HEIGHT: usize = 6;
    const VALUE: f32 = 128.0;
    let spatial = vec![VALUE; WIDTH * HEIGHT];
    let mut plan = Dct2dPlan::new(WIDTH, HEIGHT);
    let mut spectral = vec![0.0f32; WIDTH * HEIGHT];
    plan.forward(&spatial, &mut spectral);

    check_close(
        f64::from(spectral[0]),
        f64::from(round_trip_gain(WIDTH, HEIGHT) * VALUE),
        1e-4,
    );
    for &coefficient in &spectral[1..] {
        assert!(
            coefficient.abs() < 0.5,
            "non-DC coefficient {coefficient} left by a constant plane"
        );
    }
}

#[test]
fn unit_dc_inverts_to_unit_plane() {
    const WIDTH: usize = 4;
    const HEIGHT: usize = 4;
    let mut spectral = vec![0.0f32; WIDTH * HEIGHT];
    spectral[0] = 1.0;
    let mut plan = Dct2dPlan::new(WIDTH, HEIGHT);
    let mut spatial = vec![0.0f32; WIDTH * HEIGHT];
    plan.inverse(&spectral, &mut spatial);
    for &value in &spatial {
        check_close(f64::from(value), 1.0, 1e-5);
    }
}

#[test]
fn single_row_and_single_column_plans() {
    let mut plan = Dct2dPlan::new(5, 1);
    let spatial = [1.0f32, 2.0, 3.0, 4.0, 5.0];
    let mut spectral = [0.0f32; 5];
    let mut restored = [0.0f32; 5];
    plan.forward(&spatial, &mut spectral);
    plan.inverse(&spectral, &mut restored);
    let gain = round_trip_gain(5, 1);
    for (got, want) in restored.iter().zip(spatial.iter()) {
        check_close(f64::from(got / gain), f64::from(*want), 1e-5);
    }

    let mut plan = Dct2dPlan::new(1, 5);
    plan.forward(&spatial, &mut spectral);
    plan.inverse(&spectral, &mut restored);
    for (got, want) in restored.iter().zip(spatial.iter()) {
        check_close(f64::from(got / gain), f64::from(*want), 1e-5);
    }
}

#[test]
#[should_panic]
fn zero_width_plan_is_rejected() {
    Dct2dPlan::new(0, 4);
}

#[test]
#[should_panic]
fn zero_height_plan_is_rejected() {
    Dct2dPlan::new(4, 0);
}
