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

#![no_main]

use framestage::{
    convert, frame_size, partition, FrameError, FrameView, FrameViewMut, PartitionRequest,
    PixelFormat,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, u8, bool, bool, u8)| {
    let from = PixelFormat::ALL[data.0 as usize % PixelFormat::ALL.len()];
    let to = PixelFormat::ALL[data.1 as usize % PixelFormat::ALL.len()];
    fuzz_convert(from, to, data.2, data.3, data.4, data.5, data.6);
});

fn fuzz_convert(
    from: PixelFormat,
    to: PixelFormat,
    width: u8,
    height: u8,
    src_flipped: bool,
    dst_flipped: bool,
    seed: u8,
) {
    let (width, height) = (width as u32, height as u32);
    let (Ok(src_size), Ok(dst_size)) = (
        frame_size(from, width, height, 0),
        frame_size(to, width, height, 0),
    ) else {
        return;
    };
    let src: Vec<u8> = (0..src_size)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect();
    let mut dst = vec![0u8; dst_size];

    let request = PartitionRequest::new(width, height);
    let src_region = partition(from, &request.with_flipped(src_flipped), src_size).unwrap();
    let dst_region = partition(to, &request.with_flipped(dst_flipped), dst_size).unwrap();
    let src_view = FrameView::new(&src, &src_region).unwrap();
    let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
    match convert(&src_view, &mut dst_view) {
        Ok(()) | Err(FrameError::UnsupportedConversion { .. }) => {}
        Err(e) => panic!("{} -> {} {}x{}: {}", from, to, width, height, e),
    }
}
