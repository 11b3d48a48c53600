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
//! Thread-sliced partitioning and bit-exact layout conversion of RGB and YUV frames.
//!
//! A frame is cut into [Region]s with [partition] or [partition_all], one per worker.
//! Regions hold offsets and signed strides only; they are bound to the caller's buffers
//! through [FrameView] and [FrameViewMut], and [split_frame_mut] hands out one disjoint
//! mutable view per region so workers can write the same frame concurrently.
//!
//! The crate never spawns threads. With the `rayon` feature [convert_parallel] and
//! [fill_parallel] run inside whatever rayon pool the caller is in.
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod convert;
mod fill;
mod format;
mod frame_error;
mod palette;
mod parallel;
mod partition;
mod region;
mod rgb_convert;
mod rgb_pixel;
mod yuv_convert;

pub use format::ChromaOrder;
pub use format::FormatDescriptor;
pub use format::LayoutFamily;
pub use format::MinStride;
pub use format::PackedYuvLayout;
pub use format::PixelFormat;
pub use format::RgbPacking;

pub use frame_error::FrameError;
pub use frame_error::MismatchedSize;

pub use palette::Palette;
pub use palette::PaletteEntry;

pub use region::split_frame_mut;
pub use region::ChromaRegion;
pub use region::FrameView;
pub use region::FrameViewMut;
pub use region::PlaneId;
pub use region::PlaneRegion;
pub use region::Region;

pub use partition::frame_size;
pub use partition::partition;
pub use partition::partition_all;
pub use partition::PartitionRequest;
pub use partition::RemainderPolicy;

pub use rgb_pixel::pack_rgb555;
pub use rgb_pixel::pack_rgb565;
pub use rgb_pixel::rgb555_to_rgb565;
pub use rgb_pixel::rgb565_to_rgb555;
pub use rgb_pixel::unpack_rgb555;
pub use rgb_pixel::unpack_rgb565;
pub use rgb_pixel::Rgba8;

pub use convert::convert;

pub use fill::check;
pub use fill::fill;
pub use fill::FillColor;

pub use parallel::convert_parallel;
pub use parallel::fill_parallel;
