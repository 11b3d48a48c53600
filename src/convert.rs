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
use crate::format::LayoutFamily;
use crate::frame_error::FrameError;
use crate::region::{FrameView, FrameViewMut};
use crate::rgb_convert::convert_rgb;
use crate::yuv_convert::convert_yuv;

/// Copies every plane row by row, following both strides.
///
/// Copying between a top-down and a bottom-up region of the same format re-stores the
/// frame flipped.
fn copy_planes(src: &FrameView, dst: &mut FrameViewMut) -> Result<(), FrameError> {
    let src_region = src.region();
    let dst_region = dst.region();
    for (plane, placement) in dst_region.planes().into_iter().flatten() {
        let source = src_region
            .plane(plane)
            .ok_or(FrameError::PlaneMismatch(plane))?;
        if source.rows != placement.rows || source.row_bytes != placement.row_bytes {
            return Err(FrameError::PlaneMismatch(plane));
        }
        for row in 0..placement.rows {
            let src_row = src.row(plane, row)?;
            dst.row_mut(plane, row)?.copy_from_slice(src_row);
        }
    }
    Ok(())
}

/// Transcodes the pixels of `src` into `dst`.
///
/// Both views must cover the same pixel extent. Supported pairs:
/// * any format to itself, including CLJR, as a plane copy;
/// * any RGB layout, indexed ones included, to any non-indexed RGB layout;
/// * any YUV layout to any other YUV layout except CLJR.
///
/// RGB to YUV and back is rejected with [FrameError::UnsupportedConversion].
///
/// # Example
///
/// ```
/// use framestage::{convert, frame_size, partition, FrameView, FrameViewMut, PartitionRequest, PixelFormat};
///
/// let request = PartitionRequest::new(2, 1);
/// let rgb24 = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
/// let mut rgb32 = vec![0u8; frame_size(PixelFormat::Rgb32, 2, 1, 0).unwrap()];
/// let src_region = partition(PixelFormat::Rgb24, &request, rgb24.len()).unwrap();
/// let dst_region = partition(PixelFormat::Rgb32, &request, rgb32.len()).unwrap();
/// let src = FrameView::new(&rgb24, &src_region).unwrap();
/// let mut dst = FrameViewMut::new(&mut rgb32, &dst_region).unwrap();
/// convert(&src, &mut dst).unwrap();
/// assert_eq!(rgb32, [0x10, 0x20, 0x30, 0xFF, 0x40, 0x50, 0x60, 0xFF]);
/// ```
pub fn convert(src: &FrameView, dst: &mut FrameViewMut) -> Result<(), FrameError> {
    let src_region = src.region();
    let dst_region = dst.region();
    if src_region.width != dst_region.width || src_region.height != dst_region.height {
        return Err(FrameError::DimensionMismatch {
            source: (src_region.width, src_region.height),
            destination: (dst_region.width, dst_region.height),
        });
    }

    if src_region.format == dst_region.format {
        log::trace!("copying {} slice {}", src_region.format, src_region.thread_index);
        return copy_planes(src, dst);
    }

    let from = src_region.format.descriptor();
    let to = dst_region.format.descriptor();
    match (from.family, to.family) {
        (LayoutFamily::PackedRgb(_), LayoutFamily::PackedRgb(_)) => convert_rgb(src, dst),
        _ if from.is_yuv() && to.is_yuv() => convert_yuv(src, dst),
        _ => {
            log::debug!(
                "no kernel converts {} to {}",
                src_region.format,
                dst_region.format
            );
            Err(FrameError::UnsupportedConversion {
                from: src_region.format,
                to: dst_region.format,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;
    use crate::partition::{frame_size, partition, partition_all, PartitionRequest};
    use crate::region::{split_frame_mut, PlaneId};
    use rand::Rng;

    #[test]
    fn test_every_format_copies_onto_itself() {
        let mut rng = rand::rng();
        for format in PixelFormat::ALL {
            let width = rng.random_range(8..24u32);
            let height = rng.random_range(4..24u32);
            let request = PartitionRequest::new(width, height);
            let size = frame_size(format, width, height, 0).unwrap();
            let src: Vec<u8> = (0..size).map(|_| rng.random()).collect();
            let mut dst = vec![0u8; size];
            let src_region = partition(format, &request, size).unwrap();
            let dst_region = partition(format, &request, size).unwrap();
            let src_view = FrameView::new(&src, &src_region).unwrap();
            let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
            convert(&src_view, &mut dst_view).unwrap();

            let dst_view = FrameView::new(&dst, &dst_region).unwrap();
            for (plane, placement) in src_region.planes().into_iter().flatten() {
                for row in 0..placement.rows {
                    assert_eq!(
                        src_view.row(plane, row).unwrap(),
                        dst_view.row(plane, row).unwrap(),
                        "{} {:?} row {}",
                        format,
                        plane,
                        row
                    );
                }
            }
        }
    }

    #[test]
    fn test_short_hand_built_row_is_rejected_before_access() {
        let request = PartitionRequest::new(2, 1);
        let src = [0u8; 4];
        let mut dst = [0u8; 6];
        let mut src_region = partition(PixelFormat::Rgb565, &request, 4).unwrap();
        src_region.primary.row_bytes = 2;
        let dst_region = partition(PixelFormat::Rgb24, &request, 6).unwrap();
        assert_eq!(
            FrameView::new(&src, &src_region).unwrap_err(),
            FrameError::BufferTooSmall(crate::MismatchedSize {
                expected: 4,
                received: 2
            })
        );
        let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
        let whole = partition(PixelFormat::Rgb565, &request, 4).unwrap();
        let src_view = FrameView::new(&src, &whole).unwrap();
        convert(&src_view, &mut dst_view).unwrap();
    }

    #[test]
    fn test_copy_into_flipped_region_reverses_rows() {
        let request = PartitionRequest::new(2, 3);
        let src: Vec<u8> = (0..6).collect();
        let mut dst = vec![0u8; 6];
        let src_region = partition(PixelFormat::Y800, &request, 6).unwrap();
        let dst_region = partition(PixelFormat::Y800, &request.with_flipped(true), 6).unwrap();
        let src_view = FrameView::new(&src, &src_region).unwrap();
        let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
        convert(&src_view, &mut dst_view).unwrap();
        assert_eq!(dst, vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_mismatched_pairs_are_rejected() {
        let request = PartitionRequest::new(4, 2);
        let src = [0u8; 32];
        let mut dst = [0u8; 32];
        let src_region = partition(PixelFormat::Rgb32, &request, 32).unwrap();
        let src_view = FrameView::new(&src, &src_region).unwrap();

        let smaller = partition(PixelFormat::Rgb24, &PartitionRequest::new(4, 1), 32).unwrap();
        let mut dst_view = FrameViewMut::new(&mut dst, &smaller).unwrap();
        assert_eq!(
            convert(&src_view, &mut dst_view),
            Err(FrameError::DimensionMismatch {
                source: (4, 2),
                destination: (4, 1)
            })
        );

        let i420 = partition(PixelFormat::I420, &request, 32).unwrap();
        let mut dst_view = FrameViewMut::new(&mut dst, &i420).unwrap();
        assert_eq!(
            convert(&src_view, &mut dst_view),
            Err(FrameError::UnsupportedConversion {
                from: PixelFormat::Rgb32,
                to: PixelFormat::I420
            })
        );

        let cljr_region = partition(PixelFormat::Cljr, &request, 32).unwrap();
        let yuy2_region = partition(PixelFormat::Yuy2, &request, 32).unwrap();
        let cljr_view = FrameView::new(&src, &cljr_region).unwrap();
        let mut dst_view = FrameViewMut::new(&mut dst, &yuy2_region).unwrap();
        assert_eq!(
            convert(&cljr_view, &mut dst_view),
            Err(FrameError::UnsupportedConversion {
                from: PixelFormat::Cljr,
                to: PixelFormat::Yuy2
            })
        );
    }

    #[test]
    fn test_threads_convert_disjoint_slices() {
        let (width, height, threads) = (6u32, 9u32, 3u32);
        let request = PartitionRequest::new(width, height).with_threads(0, threads);
        let src_size = frame_size(PixelFormat::Rgb24, width, height, 0).unwrap();
        let dst_size = frame_size(PixelFormat::Rgb565, width, height, 0).unwrap();
        let src: Vec<u8> = (0..src_size).map(|i| (i % 251) as u8).collect();
        let mut dst = vec![0u8; dst_size];
        let src_regions = partition_all(PixelFormat::Rgb24, &request, src_size).unwrap();
        let dst_regions =
            partition_all(PixelFormat::Rgb565, &request.with_flipped(true), dst_size).unwrap();
        {
            let views = split_frame_mut(&mut dst, &dst_regions).unwrap();
            std::thread::scope(|scope| {
                for (mut dst_view, src_region) in views.into_iter().zip(src_regions.iter()) {
                    let src = &src;
                    scope.spawn(move || {
                        let src_view = FrameView::new(src, src_region).unwrap();
                        convert(&src_view, &mut dst_view).unwrap();
                    });
                }
            });
        }

        let whole = PartitionRequest::new(width, height);
        let mut expected = vec![0u8; dst_size];
        let src_region = partition(PixelFormat::Rgb24, &whole, src_size).unwrap();
        let dst_region = partition(PixelFormat::Rgb565, &whole.with_flipped(true), dst_size).unwrap();
        let src_view = FrameView::new(&src, &src_region).unwrap();
        let mut dst_view = FrameViewMut::new(&mut expected, &dst_region).unwrap();
        convert(&src_view, &mut dst_view).unwrap();
        assert_eq!(dst, expected);

        let check = FrameView::new(&dst, &dst_region).unwrap();
        assert_eq!(check.row(PlaneId::Primary, 0).unwrap(), &expected[96..108]);
    }
}
