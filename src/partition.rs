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
use crate::format::{ChromaOrder, LayoutFamily, PixelFormat, RgbPacking};
use crate::frame_error::{check_buffer_len, checked_add, checked_mul, FrameError, MismatchedSize};
use crate::palette::Palette;
use crate::region::{ChromaRegion, PlaneRegion, Region};

/// What happens to the `height % thread_count` rows that do not fill a whole slice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RemainderPolicy {
    /// Every thread gets `height / thread_count` rows, the rest is left untouched.
    #[default]
    Drop,
    /// The last thread also takes the leftover rows of every plane.
    AssignToLast,
}

/// Geometry and slicing parameters of one partition call.
///
/// `stride` is a hint: `0` asks for tightly packed rows and smaller values are raised
/// to the minimum row width of the format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PartitionRequest<'p> {
    pub thread_index: u32,
    pub thread_count: u32,
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub flipped: bool,
    pub palette: Option<&'p Palette>,
    pub remainder: RemainderPolicy,
}

impl<'p> PartitionRequest<'p> {
    /// Whole frame, one thread, packed rows, top-down.
    pub fn new(width: u32, height: u32) -> PartitionRequest<'p> {
        PartitionRequest {
            thread_index: 0,
            thread_count: 1,
            width,
            height,
            stride: 0,
            flipped: false,
            palette: None,
            remainder: RemainderPolicy::Drop,
        }
    }

    pub fn with_threads(self, thread_index: u32, thread_count: u32) -> PartitionRequest<'p> {
        PartitionRequest {
            thread_index,
            thread_count,
            ..self
        }
    }

    pub fn with_stride(self, stride: u32) -> PartitionRequest<'p> {
        PartitionRequest { stride, ..self }
    }

    pub fn with_flipped(self, flipped: bool) -> PartitionRequest<'p> {
        PartitionRequest { flipped, ..self }
    }

    pub fn with_palette(self, palette: &'p Palette) -> PartitionRequest<'p> {
        PartitionRequest {
            palette: Some(palette),
            ..self
        }
    }

    pub fn with_remainder(self, remainder: RemainderPolicy) -> PartitionRequest<'p> {
        PartitionRequest { remainder, ..self }
    }
}

/// First row and row count of slice `index` out of `count` over `total` rows.
#[inline]
fn slice_rows(total: usize, index: usize, count: usize, policy: RemainderPolicy) -> (usize, usize) {
    let slice = total / count;
    let first = index * slice;
    let rows = match policy {
        RemainderPolicy::AssignToLast if index + 1 == count => total - first,
        _ => slice,
    };
    (first, rows)
}

/// Places rows `first..first + rows` of a plane with `total_rows` rows starting at `base`.
///
/// Flipped planes start at their own last stored row and walk upwards.
#[allow(clippy::too_many_arguments)]
fn place_plane(
    base: usize,
    stride: usize,
    width: usize,
    row_bytes: usize,
    total_rows: usize,
    first: usize,
    rows: usize,
    flipped: bool,
) -> Result<PlaneRegion, FrameError> {
    let signed_stride = isize::try_from(stride).map_err(|_| FrameError::PointerOverflow)?;
    let (offset, stride) = if flipped && total_rows > 0 {
        let row = (total_rows - 1).saturating_sub(first);
        (checked_add(base, checked_mul(stride, row)?)?, -signed_stride)
    } else {
        (checked_add(base, checked_mul(stride, first)?)?, signed_stride)
    };
    Ok(PlaneRegion {
        offset,
        stride,
        width,
        rows,
        row_bytes,
    })
}

#[inline]
const fn align16(rows: usize) -> usize {
    (rows + 15) & !15
}

/// Computes the region thread `request.thread_index` owns in a frame of `format`.
///
/// Every precondition is validated here, including that `buffer_len` bytes hold every
/// row of the returned slice.
pub fn partition(
    format: PixelFormat,
    request: &PartitionRequest,
    buffer_len: usize,
) -> Result<Region, FrameError> {
    if request.thread_count == 0 {
        return Err(FrameError::ZeroThreadCount);
    }
    if request.thread_index >= request.thread_count {
        return Err(FrameError::ThreadIndexOutOfRange {
            index: request.thread_index,
            count: request.thread_count,
        });
    }
    if request.width == 0 || request.height == 0 {
        return Err(FrameError::ZeroBaseSize);
    }

    let descriptor = format.descriptor();
    let width = request.width as usize;
    let height = request.height as usize;
    let hint = request.stride as usize;
    let index = request.thread_index as usize;
    let count = request.thread_count as usize;
    let policy = request.remainder;
    let flipped = request.flipped;

    let palette = match (descriptor.family, request.palette) {
        (LayoutFamily::PackedRgb(RgbPacking::Indexed { bits }), palette) => {
            let required = 1usize << bits;
            match palette {
                Some(palette) if palette.len() < required => {
                    return Err(FrameError::PaletteTooShort(MismatchedSize {
                        expected: required,
                        received: palette.len(),
                    }));
                }
                Some(palette) => Some(*palette),
                None => Some(Palette::greyscale(bits)),
            }
        }
        (_, Some(_)) => return Err(FrameError::PaletteNotSupported(format)),
        (_, None) => None,
    };

    let min_row_bytes = descriptor.min_row_bytes(width);
    if min_row_bytes == 0 {
        return Err(FrameError::ZeroBaseSize);
    }

    let (first, rows) = slice_rows(height, index, count, policy);

    let region = match descriptor.family {
        LayoutFamily::PackedRgb(_)
        | LayoutFamily::PackedYuv(_)
        | LayoutFamily::Luma { .. }
        | LayoutFamily::Opaque => {
            let row_stride = hint.max(min_row_bytes);
            let primary = place_plane(
                0,
                row_stride,
                width,
                min_row_bytes,
                height,
                first,
                rows,
                flipped,
            )?;
            let remainder = match descriptor.family {
                LayoutFamily::PackedRgb(RgbPacking::Indexed { bits }) if bits < 8 => {
                    let bits = bits as usize;
                    (width * bits) % 8 / bits
                }
                _ => 0,
            };
            let sample_layout = match descriptor.family {
                LayoutFamily::PackedYuv(layout) => Some(layout),
                _ => None,
            };
            Region {
                format,
                thread_index: index,
                width,
                height: rows,
                flipped,
                primary,
                chroma: ChromaRegion::None,
                palette,
                remainder,
                sample_layout,
            }
        }
        LayoutFamily::Planar { h, v, order } => {
            let uv_width = width / h;
            let uv_height = height / v;
            if uv_width == 0 || uv_height == 0 {
                return Err(FrameError::EmptyChromaPlane(format));
            }
            let (y_stride, uv_stride) = if hint <= width {
                (width, uv_width)
            } else {
                (hint, hint)
            };
            let primary = place_plane(0, y_stride, width, width, height, first, rows, flipped)?;

            let first_base = checked_mul(y_stride, height)?;
            let second_base = checked_add(first_base, checked_mul(uv_stride, uv_height)?)?;
            let (uv_first, uv_rows) = slice_rows(uv_height, index, count, policy);
            let first_plane = place_plane(
                first_base, uv_stride, uv_width, uv_width, uv_height, uv_first, uv_rows, flipped,
            )?;
            let second_plane = place_plane(
                second_base,
                uv_stride,
                uv_width,
                uv_width,
                uv_height,
                uv_first,
                uv_rows,
                flipped,
            )?;
            let (u, v) = match order {
                ChromaOrder::Uv => (first_plane, second_plane),
                ChromaOrder::Vu => (second_plane, first_plane),
            };
            Region {
                format,
                thread_index: index,
                width,
                height: rows,
                flipped,
                primary,
                chroma: ChromaRegion::Planar { u, v },
                palette,
                remainder: 0,
                sample_layout: None,
            }
        }
        LayoutFamily::SemiPlanar { order } => {
            let uv_width = width / 2;
            let uv_height = height / 2;
            if uv_width == 0 || uv_height == 0 {
                return Err(FrameError::EmptyChromaPlane(format));
            }
            let stride = hint.max(width);
            let primary = place_plane(0, stride, width, width, height, first, rows, flipped)?;
            let (uv_first, uv_rows) = slice_rows(uv_height, index, count, policy);
            let uv = place_plane(
                checked_mul(stride, height)?,
                stride,
                uv_width,
                uv_width * 2,
                uv_height,
                uv_first,
                uv_rows,
                flipped,
            )?;
            Region {
                format,
                thread_index: index,
                width,
                height: rows,
                flipped,
                primary,
                chroma: ChromaRegion::Interleaved { uv, order },
                palette,
                remainder: 0,
                sample_layout: None,
            }
        }
        LayoutFamily::Imc {
            order,
            side_by_side,
        } => {
            let uv_width = width / 2;
            let uv_height = height / 2;
            if uv_width == 0 || uv_height == 0 {
                return Err(FrameError::EmptyChromaPlane(format));
            }
            let stride = hint.max(width);
            let primary = place_plane(0, stride, width, width, height, first, rows, flipped)?;
            let (first_base, second_base) = if side_by_side {
                let base = checked_mul(stride, height)?;
                (base, checked_add(base, uv_width)?)
            } else {
                let first_rows = align16(height);
                let second_rows = align16(checked_add(first_rows, uv_height)?);
                (
                    checked_mul(first_rows, stride)?,
                    checked_mul(second_rows, stride)?,
                )
            };
            let (uv_first, uv_rows) = slice_rows(uv_height, index, count, policy);
            let first_plane = place_plane(
                first_base, stride, uv_width, uv_width, uv_height, uv_first, uv_rows, flipped,
            )?;
            let second_plane = place_plane(
                second_base,
                stride,
                uv_width,
                uv_width,
                uv_height,
                uv_first,
                uv_rows,
                flipped,
            )?;
            let (u, v) = match order {
                ChromaOrder::Uv => (first_plane, second_plane),
                ChromaOrder::Vu => (second_plane, first_plane),
            };
            Region {
                format,
                thread_index: index,
                width,
                height: rows,
                flipped,
                primary,
                chroma: ChromaRegion::Planar { u, v },
                palette,
                remainder: 0,
                sample_layout: None,
            }
        }
    };

    check_buffer_len(region.required_len()?, buffer_len)?;

    log::trace!(
        "{} slice {}/{}: {}x{} rows from {} stride {} chroma {:?}",
        format,
        index,
        count,
        width,
        rows,
        region.primary.offset,
        region.primary.stride,
        region.chroma_size()
    );

    Ok(region)
}

/// Regions of every thread of `request.thread_count`, in thread order.
///
/// `request.thread_index` is ignored.
pub fn partition_all(
    format: PixelFormat,
    request: &PartitionRequest,
    buffer_len: usize,
) -> Result<Vec<Region>, FrameError> {
    if request.thread_count == 0 {
        return Err(FrameError::ZeroThreadCount);
    }
    (0..request.thread_count)
        .map(|thread_index| {
            let request = request.with_threads(thread_index, request.thread_count);
            partition(format, &request, buffer_len)
        })
        .collect()
}

/// Bytes a buffer needs to hold a whole `width` x `height` frame of `format`.
pub fn frame_size(
    format: PixelFormat,
    width: u32,
    height: u32,
    stride: u32,
) -> Result<usize, FrameError> {
    let request = PartitionRequest::new(width, height).with_stride(stride);
    partition(format, &request, usize::MAX)?.required_len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteEntry;
    use crate::region::{split_frame_mut, PlaneId};
    use rand::Rng;
    use std::ops::Range;

    fn expected_chroma_rows(format: PixelFormat, height: usize) -> usize {
        match format.descriptor().family {
            LayoutFamily::Planar { v, .. } => height / v,
            LayoutFamily::SemiPlanar { .. } | LayoutFamily::Imc { .. } => height / 2,
            _ => 0,
        }
    }

    #[test]
    fn test_packed_offsets() {
        let request = PartitionRequest::new(10, 8);
        let regions = partition_all(PixelFormat::Rgb24, &request.with_threads(0, 2), 240).unwrap();
        assert_eq!(regions[0].primary.offset, 0);
        assert_eq!(regions[1].primary.offset, 120);
        assert_eq!(regions[1].primary.stride, 30);
        assert_eq!(regions[1].height, 4);

        let flipped = request.with_threads(0, 2).with_flipped(true);
        let regions = partition_all(PixelFormat::Rgb24, &flipped, 240).unwrap();
        assert_eq!(regions[0].primary.offset, 210);
        assert_eq!(regions[1].primary.offset, 90);
        assert_eq!(regions[0].primary.stride, -30);
        assert!(regions[1].flipped);
    }

    #[test]
    fn test_small_stride_hint_is_raised() {
        let request = PartitionRequest::new(10, 2).with_stride(7);
        let region = partition(PixelFormat::Rgb565, &request, 40).unwrap();
        assert_eq!(region.primary.stride, 20);
        let request = PartitionRequest::new(10, 2).with_stride(32);
        let region = partition(PixelFormat::Rgb565, &request, 64).unwrap();
        assert_eq!(region.primary.stride, 32);
        assert_eq!(region.primary.row_bytes, 20);
    }

    #[test]
    fn test_indexed_rows_and_default_palette() {
        let region = partition(PixelFormat::Rgb1, &PartitionRequest::new(13, 2), 4).unwrap();
        assert_eq!(region.primary.stride, 2);
        assert_eq!(region.remainder, 5);
        let palette = region.palette.unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.lookup(1), PaletteEntry::new(255, 255, 255));

        let region = partition(PixelFormat::Rgb4, &PartitionRequest::new(5, 1), 3).unwrap();
        assert_eq!(region.primary.stride, 3);
        assert_eq!(region.remainder, 1);
        assert_eq!(region.palette.unwrap().len(), 16);

        let region = partition(PixelFormat::Rgb8, &PartitionRequest::new(5, 1), 5).unwrap();
        assert_eq!(region.remainder, 0);
        assert_eq!(region.palette.unwrap().len(), 256);
    }

    #[test]
    fn test_planar_offsets() {
        let region = partition(PixelFormat::I420, &PartitionRequest::new(8, 4), 48).unwrap();
        assert_eq!(region.primary.stride, 8);
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!((u.offset, u.stride, u.rows, u.width), (32, 4, 2, 4));
                assert_eq!(v.offset, 40);
            }
            _ => panic!("I420 must be planar"),
        }

        let region = partition(PixelFormat::Yv12, &PartitionRequest::new(8, 4), 48).unwrap();
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!(v.offset, 32);
                assert_eq!(u.offset, 40);
            }
            _ => panic!("YV12 must be planar"),
        }

        let padded = PartitionRequest::new(8, 4).with_stride(16);
        let region = partition(PixelFormat::I420, &padded, 128).unwrap();
        assert_eq!(region.primary.stride, 16);
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!((u.offset, u.stride), (64, 16));
                assert_eq!((v.offset, v.stride), (96, 16));
            }
            _ => panic!("I420 must be planar"),
        }

        let region = partition(PixelFormat::Yv16, &PartitionRequest::new(8, 4), 64).unwrap();
        assert_eq!(region.chroma_size(), Some((4, 4)));
        assert_eq!(frame_size(PixelFormat::Yuv9, 16, 8, 0), Ok(128 + 8 + 8));
    }

    #[test]
    fn test_flipped_chroma_starts_at_last_row() {
        let request = PartitionRequest::new(8, 4).with_flipped(true);
        let region = partition(PixelFormat::I420, &request, 48).unwrap();
        assert_eq!(region.primary.offset, 24);
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!((u.offset, u.stride), (36, -4));
                assert_eq!((v.offset, v.stride), (44, -4));
            }
            _ => panic!("I420 must be planar"),
        }
    }

    #[test]
    fn test_semi_planar_offsets() {
        let request = PartitionRequest::new(6, 4).with_threads(1, 2);
        let region = partition(PixelFormat::Nv12, &request, 36).unwrap();
        assert_eq!(region.primary.offset, 12);
        match region.chroma {
            ChromaRegion::Interleaved { uv, order } => {
                assert_eq!(order, ChromaOrder::Uv);
                assert_eq!((uv.offset, uv.rows, uv.row_bytes), (30, 1, 6));
            }
            _ => panic!("NV12 must be interleaved"),
        }
    }

    #[test]
    fn test_imc_offsets() {
        let region = partition(PixelFormat::Imc1, &PartitionRequest::new(16, 16), 1024).unwrap();
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!((v.offset, v.stride, v.rows), (256, 16, 8));
                assert_eq!(u.offset, 512);
            }
            _ => panic!("IMC1 must be planar"),
        }
        let region = partition(PixelFormat::Imc3, &PartitionRequest::new(16, 16), 1024).unwrap();
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!(u.offset, 256);
                assert_eq!(v.offset, 512);
            }
            _ => panic!("IMC3 must be planar"),
        }
        let region = partition(PixelFormat::Imc2, &PartitionRequest::new(16, 16), 384).unwrap();
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!((v.offset, u.offset), (256, 264));
                assert_eq!(u.stride, 16);
            }
            _ => panic!("IMC2 must be planar"),
        }
        // Unaligned heights keep both chroma planes on their own 16 row boundary.
        let region = partition(PixelFormat::Imc3, &PartitionRequest::new(4, 17), 4096).unwrap();
        match region.chroma {
            ChromaRegion::Planar { u, v } => {
                assert_eq!(u.offset, 32 * 4);
                assert_eq!(v.offset, 48 * 4);
            }
            _ => panic!("IMC3 must be planar"),
        }
    }

    #[test]
    fn test_rejected_requests() {
        let request = PartitionRequest::new(8, 8);
        assert_eq!(
            partition(PixelFormat::Rgb24, &request.with_threads(0, 0), 1024),
            Err(FrameError::ZeroThreadCount)
        );
        assert_eq!(
            partition(PixelFormat::Rgb24, &request.with_threads(3, 3), 1024),
            Err(FrameError::ThreadIndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            partition(PixelFormat::Rgb24, &PartitionRequest::new(0, 8), 1024),
            Err(FrameError::ZeroBaseSize)
        );
        assert_eq!(
            partition(PixelFormat::I420, &PartitionRequest::new(1, 8), 1024),
            Err(FrameError::EmptyChromaPlane(PixelFormat::I420))
        );
        assert_eq!(
            partition(PixelFormat::Rgb24, &request, 191),
            Err(FrameError::BufferTooSmall(MismatchedSize {
                expected: 192,
                received: 191
            }))
        );
        let palette = Palette::new(&[PaletteEntry::new(1, 2, 3); 4]);
        assert_eq!(
            partition(PixelFormat::Rgb24, &request.with_palette(&palette), 1024),
            Err(FrameError::PaletteNotSupported(PixelFormat::Rgb24))
        );
        assert_eq!(
            partition(PixelFormat::Rgb4, &request.with_palette(&palette), 1024),
            Err(FrameError::PaletteTooShort(MismatchedSize {
                expected: 16,
                received: 4
            }))
        );
        assert!(partition(PixelFormat::Rgb1, &request.with_palette(&palette), 1024).is_ok());
    }

    #[test]
    fn test_slices_cover_every_row_once() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let format = PixelFormat::ALL[rng.random_range(0..PixelFormat::ALL.len())];
            let width = rng.random_range(8..64u32);
            let height = rng.random_range(4..64u32);
            let threads = rng.random_range(1..6u32);
            let stride = if rng.random_bool(0.5) {
                0
            } else {
                rng.random_range(0..256u32)
            };
            let policy = if rng.random_bool(0.5) {
                RemainderPolicy::Drop
            } else {
                RemainderPolicy::AssignToLast
            };
            let request = PartitionRequest::new(width, height)
                .with_threads(0, threads)
                .with_stride(stride)
                .with_flipped(rng.random_bool(0.5))
                .with_remainder(policy);
            let size = frame_size(format, width, height, stride).unwrap();
            let regions = partition_all(format, &request, size).unwrap();

            let mut rows: Vec<Range<usize>> = Vec::new();
            let mut primary_rows = 0usize;
            let mut chroma_rows = 0usize;
            for region in regions.iter() {
                for (plane, placement) in region.planes().into_iter().flatten() {
                    for row in 0..placement.rows {
                        let range = placement.row_range(row).unwrap();
                        assert!(range.end <= size, "{} row outside of frame", format);
                        rows.push(range);
                    }
                    match plane {
                        PlaneId::Primary => primary_rows += placement.rows,
                        PlaneId::U | PlaneId::Chroma => chroma_rows += placement.rows,
                        PlaneId::V => {}
                    }
                }
            }
            rows.sort_by_key(|r| r.start);
            for pair in rows.windows(2) {
                assert!(
                    pair[0].end <= pair[1].start,
                    "{} rows {:?} and {:?} overlap",
                    format,
                    pair[0],
                    pair[1]
                );
            }

            let height = height as usize;
            let threads = threads as usize;
            let chroma_height = expected_chroma_rows(format, height);
            match policy {
                RemainderPolicy::Drop => {
                    assert_eq!(primary_rows, height / threads * threads);
                    assert_eq!(chroma_rows, chroma_height / threads * threads);
                }
                RemainderPolicy::AssignToLast => {
                    assert_eq!(primary_rows, height);
                    assert_eq!(chroma_rows, chroma_height);
                }
            }
        }
    }

    #[test]
    fn test_workers_write_their_own_slices() {
        let (width, height, threads) = (7u32, 10u32, 3u32);
        let request = PartitionRequest::new(width, height)
            .with_threads(0, threads)
            .with_flipped(true);
        let size = frame_size(PixelFormat::Rgb24, width, height, 0).unwrap();
        let regions = partition_all(PixelFormat::Rgb24, &request, size).unwrap();
        let mut frame = vec![0u8; size];
        {
            let views = split_frame_mut(&mut frame, &regions).unwrap();
            std::thread::scope(|scope| {
                for mut view in views {
                    scope.spawn(move || {
                        let value = view.region().thread_index as u8 + 1;
                        for row in 0..view.region().height {
                            view.row_mut(PlaneId::Primary, row).unwrap().fill(value);
                        }
                    });
                }
            });
        }
        // Flipped slices fill the buffer bottom up; the single dropped row is stored first.
        let row_bytes = width as usize * 3;
        assert!(frame[..row_bytes].iter().all(|&v| v == 0));
        for (row, chunk) in frame.chunks_exact(row_bytes).enumerate().skip(1) {
            let expected = 3 - ((row - 1) / 3) as u8;
            assert!(chunk.iter().all(|&v| v == expected), "row {}", row);
        }
    }
}
