// Copyright (c) the Passband Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

mod font;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use font::BitmapOverlay;
use passband::filter::LowPassFilter;
use passband::frame::{FrameMut, FrameRef};
use passband::options::{FilterMode, FilterOptions};
use passband::overlay::OverlayRenderer;
use passband::plane::{PlaneMut, PlaneRef};
use passband::stream::{ColorFamily, VideoFormat};

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum PixelFormat {
    Gray,
    Yuv420,
    Yuv444,
}

impl PixelFormat {
    fn chroma_size(self, width: usize, height: usize) -> Option<(usize, usize)> {
        match self {
            PixelFormat::Gray => None,
            PixelFormat::Yuv420 => Some((width.div_ceil(2), height.div_ceil(2))),
            PixelFormat::Yuv444 => Some((width, height)),
        }
    }

    fn video_format(self) -> VideoFormat {
        let color_family = match self {
            PixelFormat::Gray => ColorFamily::Gray,
            PixelFormat::Yuv420 | PixelFormat::Yuv444 => ColorFamily::Yuv,
        };
        VideoFormat {
            color_family,
            bits_per_sample: 8,
        }
    }
}

/// Spectral low-pass filter for raw planar 8-bit video.
#[derive(Parser)]
struct Opt {
    /// Input file of consecutive raw planar frames, no container
    input: PathBuf,

    /// Output file, same layout as the input
    output: PathBuf,

    /// Luma plane width in pixels
    #[clap(long)]
    width: usize,

    /// Luma plane height in pixels
    #[clap(long)]
    height: usize,

    /// Plane layout of the input
    #[clap(long, value_enum, default_value = "yuv420")]
    format: PixelFormat,

    /// Transform coefficients are clamped to exp(cutoff_frequency)
    #[clap(long, default_value_t = 10.0)]
    cutoff_frequency: f64,

    /// Draw the version banner into the output luma plane
    #[clap(long)]
    info: bool,

    /// Stop after this many frames
    #[clap(long)]
    frames: Option<usize>,
}

/// Fills each plane buffer in order. Returns false on a clean end of input
/// before the first byte of a frame; input ending mid-frame is an error.
fn read_frame(reader: &mut impl Read, planes: &mut [&mut [u8]]) -> Result<bool> {
    let mut read_any = false;
    for plane in planes.iter_mut() {
        let mut filled = 0;
        while filled < plane.len() {
            let n = reader
                .read(&mut plane[filled..])
                .wrap_err("cannot read input")?;
            if n == 0 {
                if read_any || filled > 0 {
                    bail!("input ends in the middle of a frame");
                }
                return Ok(false);
            }
            filled += n;
            read_any = true;
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let opt = Opt::parse();
    let format = opt.format.video_format();
    let options = FilterOptions {
        cutoff_frequency: opt.cutoff_frequency,
        overlay: opt.info,
        mode: FilterMode::LowPass,
    };
    let overlay = opt
        .info
        .then(|| Box::new(BitmapOverlay) as Box<dyn OverlayRenderer>);
    let mut filter = LowPassFilter::new(opt.width, opt.height, &format, options, overlay)?;

    let mut input = BufReader::new(
        File::open(&opt.input).wrap_err_with(|| format!("cannot open {}", opt.input.display()))?,
    );
    let mut output = BufWriter::new(
        File::create(&opt.output)
            .wrap_err_with(|| format!("cannot create {}", opt.output.display()))?,
    );

    let chroma = opt.format.chroma_size(opt.width, opt.height);
    let luma_len = opt.width * opt.height;
    let chroma_len = chroma.map_or(0, |(w, h)| w * h);

    let mut src_y = vec![0u8; luma_len];
    let mut src_u = vec![0u8; chroma_len];
    let mut src_v = vec![0u8; chroma_len];
    let mut dst_y = vec![0u8; luma_len];
    let mut dst_u = vec![0u8; chroma_len];
    let mut dst_v = vec![0u8; chroma_len];

    let mut frames = 0usize;
    loop {
        if opt.frames.is_some_and(|limit| frames == limit) {
            break;
        }
        if !read_frame(
            &mut input,
            &mut [&mut src_y[..], &mut src_u[..], &mut src_v[..]],
        )? {
            break;
        }

        let src_frame = match chroma {
            None => FrameRef::gray(PlaneRef::new(&src_y, opt.width, opt.height, opt.width)?),
            Some((cw, ch)) => FrameRef::yuv(
                PlaneRef::new(&src_y, opt.width, opt.height, opt.width)?,
                PlaneRef::new(&src_u, cw, ch, cw)?,
                PlaneRef::new(&src_v, cw, ch, cw)?,
            ),
        };
        let mut dst_frame = match chroma {
            None => FrameMut::gray(PlaneMut::new(&mut dst_y, opt.width, opt.height, opt.width)?),
            Some((cw, ch)) => FrameMut::yuv(
                PlaneMut::new(&mut dst_y, opt.width, opt.height, opt.width)?,
                PlaneMut::new(&mut dst_u, cw, ch, cw)?,
                PlaneMut::new(&mut dst_v, cw, ch, cw)?,
            ),
        };
        filter.process_frame(&src_frame, &mut dst_frame)?;
        drop(dst_frame);

        output.write_all(&dst_y).wrap_err("cannot write output")?;
        if chroma.is_some() {
            output.write_all(&dst_u).wrap_err("cannot write output")?;
            output.write_all(&dst_v).wrap_err("cannot write output")?;
        }
        frames += 1;
        debug!(frame = frames, "frame processed");
    }
    output.flush().wrap_err("cannot flush output")?;
    info!("processed {frames} frames");
    Ok(())
}
