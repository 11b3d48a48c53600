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
    frame_size, partition_all, split_frame_mut, FrameError, PartitionRequest, PixelFormat,
    RemainderPolicy,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, u8, u16, bool, bool)| {
    let format = PixelFormat::ALL[data.0 as usize % PixelFormat::ALL.len()];
    fuzz_partition(format, data.1, data.2, data.3, data.4, data.5, data.6);
});

fn fuzz_partition(
    format: PixelFormat,
    width: u8,
    height: u8,
    threads: u8,
    stride: u16,
    flipped: bool,
    assign_to_last: bool,
) {
    let size = match frame_size(format, width as u32, height as u32, stride as u32) {
        Ok(size) => size,
        Err(FrameError::ZeroBaseSize) | Err(FrameError::EmptyChromaPlane(_)) => return,
        Err(e) => panic!("{} {}x{}: {}", format, width, height, e),
    };
    let remainder = if assign_to_last {
        RemainderPolicy::AssignToLast
    } else {
        RemainderPolicy::Drop
    };
    let request = PartitionRequest::new(width as u32, height as u32)
        .with_threads(0, threads as u32)
        .with_stride(stride as u32)
        .with_flipped(flipped)
        .with_remainder(remainder);
    let regions = match partition_all(format, &request, size) {
        Ok(regions) => regions,
        Err(FrameError::ZeroThreadCount) => return,
        Err(e) => panic!("{} {}x{} / {}: {}", format, width, height, threads, e),
    };
    for region in regions.iter() {
        assert!(region.required_len().unwrap() <= size);
    }
    let mut frame = vec![0u8; size];
    split_frame_mut(&mut frame, &regions).unwrap();
}
