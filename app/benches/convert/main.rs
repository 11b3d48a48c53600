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
use criterion::{criterion_group, criterion_main, Criterion};
use framestage::{
    convert, convert_parallel, frame_size, partition, partition_all, FrameView, FrameViewMut,
    PartitionRequest, PixelFormat,
};
use rand::Rng;

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn random_frame(format: PixelFormat) -> Vec<u8> {
    let mut rng = rand::rng();
    let size = frame_size(format, WIDTH, HEIGHT, 0).unwrap();
    (0..size).map(|_| rng.random()).collect()
}

fn bench_pair(c: &mut Criterion, from: PixelFormat, to: PixelFormat) {
    let src = random_frame(from);
    let mut dst = vec![0u8; frame_size(to, WIDTH, HEIGHT, 0).unwrap()];
    let request = PartitionRequest::new(WIDTH, HEIGHT);
    let src_region = partition(from, &request, src.len()).unwrap();
    let dst_region = partition(to, &request, dst.len()).unwrap();

    c.bench_function(&format!("framestage {} -> {}", from, to), |b| {
        b.iter(|| {
            let src_view = FrameView::new(&src, &src_region).unwrap();
            let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
            convert(&src_view, &mut dst_view).unwrap();
        })
    });

    let threads = std::thread::available_parallelism()
        .map(|v| v.get() as u32)
        .unwrap_or(4);
    let request = request.with_threads(0, threads);
    let src_regions = partition_all(from, &request, src.len()).unwrap();
    let dst_regions = partition_all(to, &request, dst.len()).unwrap();

    c.bench_function(&format!("framestage {} -> {} rayon", from, to), |b| {
        b.iter(|| {
            convert_parallel(&src, &src_regions, &mut dst, &dst_regions).unwrap();
        })
    });
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_pair(c, PixelFormat::Rgb24, PixelFormat::Rgb32);
    bench_pair(c, PixelFormat::Rgb32, PixelFormat::Rgb24);
    bench_pair(c, PixelFormat::Rgb565, PixelFormat::Rgb555);
    bench_pair(c, PixelFormat::Rgb8, PixelFormat::Rgb24);
    bench_pair(c, PixelFormat::Yuy2, PixelFormat::I420);
    bench_pair(c, PixelFormat::I420, PixelFormat::Nv12);
    bench_pair(c, PixelFormat::Nv12, PixelFormat::Nv12);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
