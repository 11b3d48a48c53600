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
    check, fill, frame_size, partition, FillColor, FrameView, FrameViewMut, PartitionRequest,
    PixelFormat,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, u16, bool, [u8; 4])| {
    let format = PixelFormat::ALL[data.0 as usize % PixelFormat::ALL.len()];
    fuzz_fill(format, data.1, data.2, data.3, data.4, data.5);
});

fn fuzz_fill(format: PixelFormat, width: u8, height: u8, stride: u16, flipped: bool, color: [u8; 4]) {
    if format == PixelFormat::Cljr {
        return;
    }
    let (width, height, stride) = (width as u32, height as u32, stride as u32);
    let Ok(size) = frame_size(format, width, height, stride) else {
        return;
    };
    let descriptor = format.descriptor();
    let color = match descriptor.palette_entries() {
        Some(entries) => FillColor::Index((color[0] as usize % entries) as u8),
        None if descriptor.is_rgb() => FillColor::Rgb {
            red: color[0],
            green: color[1],
            blue: color[2],
            alpha: color[3],
        },
        None => FillColor::Yuv {
            y: color[0],
            u: color[1],
            v: color[2],
            alpha: color[3],
        },
    };

    let mut frame = vec![0x5Au8; size];
    let request = PartitionRequest::new(width, height)
        .with_stride(stride)
        .with_flipped(flipped);
    let region = partition(format, &request, size).unwrap();
    fill(color, &mut FrameViewMut::new(&mut frame, &region).unwrap()).unwrap();
    let view = FrameView::new(&frame, &region).unwrap();
    assert!(check(color, &view).unwrap());
}
