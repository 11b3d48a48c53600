/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use framestage::{
    check, convert, convert_parallel, fill_parallel, frame_size, partition, partition_all,
    split_frame_mut, FillColor, FrameError, FrameView, PartitionRequest, PixelFormat,
    RemainderPolicy,
};
use rand::Rng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn make_gradient() -> Vec<u8> {
    let mut rng = rand::rng();
    let mut rgb = vec![0u8; WIDTH as usize * HEIGHT as usize * 3];
    for (y, row) in rgb.chunks_exact_mut(WIDTH as usize * 3).enumerate() {
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            px[0] = (x * 255 / WIDTH as usize) as u8;
            px[1] = (y * 255 / HEIGHT as usize) as u8;
            px[2] = rng.random_range(0..16u8);
        }
    }
    rgb
}

/// Converts with plain scoped threads, one slice each.
fn convert_scoped(
    from: PixelFormat,
    src: &[u8],
    to: PixelFormat,
    threads: u32,
    flipped: bool,
) -> Result<Vec<u8>, FrameError> {
    let request = PartitionRequest::new(WIDTH, HEIGHT)
        .with_threads(0, threads)
        .with_remainder(RemainderPolicy::AssignToLast);
    let src_regions = partition_all(from, &request, src.len())?;
    let mut dst = vec![0u8; frame_size(to, WIDTH, HEIGHT, 0)?];
    let dst_regions = partition_all(to, &request.with_flipped(flipped), dst.len())?;

    let views = split_frame_mut(&mut dst, &dst_regions)?;
    std::thread::scope(|scope| {
        let workers: Vec<_> = views
            .into_iter()
            .zip(src_regions.iter())
            .map(|(mut dst_view, src_region)| {
                scope.spawn(move || {
                    let src_view = FrameView::new(src, src_region)?;
                    convert(&src_view, &mut dst_view)
                })
            })
            .collect();
        workers
            .into_iter()
            .try_for_each(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
    })?;
    Ok(dst)
}

fn main() -> Result<(), FrameError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let threads = std::thread::available_parallelism()
        .map(|v| v.get() as u32)
        .unwrap_or(4);
    let rgb24 = make_gradient();

    for to in [PixelFormat::Rgb32, PixelFormat::Rgb565, PixelFormat::Rgb555] {
        let start = Instant::now();
        let packed = convert_scoped(PixelFormat::Rgb24, &rgb24, to, threads, true)?;
        println!(
            "RGB24 -> {} flipped on {} threads: {:?}",
            to,
            threads,
            start.elapsed()
        );

        let back = convert_scoped(to, &packed, PixelFormat::Rgb24, threads, true)?;
        let exact = back == rgb24;
        println!("{} -> RGB24 round trip exact: {}", to, exact);
    }

    let request = PartitionRequest::new(WIDTH, HEIGHT)
        .with_threads(0, threads)
        .with_remainder(RemainderPolicy::AssignToLast);
    let color = FillColor::Yuv {
        y: 81,
        u: 90,
        v: 240,
        alpha: 0xFF,
    };
    let mut yuy2 = vec![0u8; frame_size(PixelFormat::Yuy2, WIDTH, HEIGHT, 0)?];
    let yuy2_regions = partition_all(PixelFormat::Yuy2, &request, yuy2.len())?;
    fill_parallel(color, &mut yuy2, &yuy2_regions)?;

    for to in [
        PixelFormat::I420,
        PixelFormat::Nv12,
        PixelFormat::Imc2,
        PixelFormat::Y41p,
    ] {
        let mut dst = vec![0u8; frame_size(to, WIDTH, HEIGHT, 0)?];
        let dst_regions = partition_all(to, &request, dst.len())?;
        let start = Instant::now();
        convert_parallel(&yuy2, &yuy2_regions, &mut dst, &dst_regions)?;
        let elapsed = start.elapsed();

        let whole = partition(to, &PartitionRequest::new(WIDTH, HEIGHT), dst.len())?;
        let solid = check(color, &FrameView::new(&dst, &whole)?)?;
        println!("YUY2 -> {} on rayon: {:?}, solid: {}", to, elapsed, solid);
    }

    Ok(())
}
