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
use crate::format::{ChromaOrder, LayoutFamily, PackedYuvLayout};
use crate::frame_error::FrameError;
use crate::region::{ChromaRegion, FrameView, FrameViewMut, PlaneId, Region};
use crate::rgb_pixel::store_le;

/// Chroma value written when the source carries none.
pub(crate) const NEUTRAL_CHROMA: u8 = 0x80;

/// Where luma sample `x` of a row lives.
#[derive(Debug, Copy, Clone)]
pub(crate) enum LumaLayout {
    Plane,
    /// Little endian 16 bit samples, the high byte is significant
    Wide,
    Packed(PackedYuvLayout),
}

impl LumaLayout {
    #[inline(always)]
    fn position(layout: &PackedYuvLayout, x: usize, within: usize) -> usize {
        x / layout.pixels * layout.bytes + within
    }

    #[inline(always)]
    pub(crate) fn read(&self, row: &[u8], x: usize) -> Option<u8> {
        match self {
            LumaLayout::Plane => row.get(x).copied(),
            LumaLayout::Wide => row.get(x * 2 + 1).copied(),
            LumaLayout::Packed(layout) => row
                .get(Self::position(layout, x, layout.y[x % layout.pixels]))
                .copied(),
        }
    }

    /// Stores `value`; samples of a group cut off by the row end are skipped.
    #[inline(always)]
    pub(crate) fn write(&self, row: &mut [u8], x: usize, value: u8) {
        match self {
            LumaLayout::Plane => {
                if let Some(dst) = row.get_mut(x) {
                    *dst = value;
                }
            }
            LumaLayout::Wide => {
                if let Some(dst) = row.get_mut(x * 2..x * 2 + 2) {
                    store_le(dst, ((value as u16) << 8) | value as u16);
                }
            }
            LumaLayout::Packed(layout) => {
                let position = Self::position(layout, x, layout.y[x % layout.pixels]);
                if let Some(dst) = row.get_mut(position) {
                    *dst = value;
                }
            }
        }
    }

    #[inline(always)]
    pub(crate) fn read_alpha(&self, row: &[u8], x: usize) -> Option<u8> {
        match self {
            LumaLayout::Packed(layout) => layout
                .alpha
                .and_then(|alpha| row.get(Self::position(layout, x, alpha)).copied()),
            _ => None,
        }
    }

    #[inline(always)]
    pub(crate) fn write_alpha(&self, row: &mut [u8], x: usize, value: u8) {
        if let LumaLayout::Packed(layout) = self {
            if let Some(alpha) = layout.alpha {
                if let Some(dst) = row.get_mut(Self::position(layout, x, alpha)) {
                    *dst = value;
                }
            }
        }
    }

    #[inline]
    pub(crate) fn has_alpha(&self) -> bool {
        matches!(self, LumaLayout::Packed(layout) if layout.alpha.is_some())
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) enum ChromaLayout {
    None,
    Planar,
    Interleaved(ChromaOrder),
    /// Chroma shares the luma row
    Packed(PackedYuvLayout),
}

/// How a YUV region stores its samples, in the terms the kernels walk them.
#[derive(Debug, Copy, Clone)]
pub(crate) struct YuvShape {
    pub(crate) luma: LumaLayout,
    pub(crate) chroma: ChromaLayout,
    /// Luma pixels covered by one chroma sample, horizontally and vertically.
    pub(crate) decimation: (usize, usize),
    pub(crate) chroma_width: usize,
    pub(crate) chroma_rows: usize,
}

impl YuvShape {
    pub(crate) fn of(region: &Region) -> Result<YuvShape, FrameError> {
        let descriptor = region.format.descriptor();
        match descriptor.family {
            LayoutFamily::PackedYuv(layout) => {
                let horizontal = layout.pixels / layout.u.len();
                Ok(YuvShape {
                    luma: LumaLayout::Packed(layout),
                    chroma: ChromaLayout::Packed(layout),
                    decimation: (horizontal, 1),
                    chroma_width: region.width.div_ceil(horizontal),
                    chroma_rows: region.height,
                })
            }
            LayoutFamily::Luma { bytes_per_sample } => Ok(YuvShape {
                luma: if bytes_per_sample == 2 {
                    LumaLayout::Wide
                } else {
                    LumaLayout::Plane
                },
                chroma: ChromaLayout::None,
                decimation: (1, 1),
                chroma_width: 0,
                chroma_rows: 0,
            }),
            LayoutFamily::Planar { .. }
            | LayoutFamily::SemiPlanar { .. }
            | LayoutFamily::Imc { .. } => {
                let (chroma_width, chroma_rows) = region.chroma_size().unwrap_or((0, 0));
                let chroma = match region.chroma {
                    ChromaRegion::None => ChromaLayout::None,
                    ChromaRegion::Planar { .. } => ChromaLayout::Planar,
                    ChromaRegion::Interleaved { order, .. } => ChromaLayout::Interleaved(order),
                };
                Ok(YuvShape {
                    luma: LumaLayout::Plane,
                    chroma,
                    decimation: descriptor.chroma_decimation().unwrap_or((1, 1)),
                    chroma_width,
                    chroma_rows,
                })
            }
            LayoutFamily::PackedRgb(_) | LayoutFamily::Opaque => {
                Err(FrameError::UnsupportedFormat(region.format))
            }
        }
    }
}

/// One chroma row of a source, ready for sampling.
#[derive(Debug, Copy, Clone)]
pub(crate) enum ChromaRows<'a> {
    Neutral,
    Planar { u: &'a [u8], v: &'a [u8] },
    Interleaved { row: &'a [u8], order: ChromaOrder },
    Packed { row: &'a [u8], layout: PackedYuvLayout },
}

impl<'a> ChromaRows<'a> {
    pub(crate) fn fetch(
        view: &FrameView<'a>,
        shape: &YuvShape,
        cy: usize,
    ) -> Result<ChromaRows<'a>, FrameError> {
        if shape.chroma_rows == 0 {
            return Ok(ChromaRows::Neutral);
        }
        let cy = cy.min(shape.chroma_rows - 1);
        Ok(match shape.chroma {
            ChromaLayout::None => ChromaRows::Neutral,
            ChromaLayout::Planar => ChromaRows::Planar {
                u: view.row(PlaneId::U, cy)?,
                v: view.row(PlaneId::V, cy)?,
            },
            ChromaLayout::Interleaved(order) => ChromaRows::Interleaved {
                row: view.row(PlaneId::Chroma, cy)?,
                order,
            },
            ChromaLayout::Packed(layout) => ChromaRows::Packed {
                row: view.row(PlaneId::Primary, cy)?,
                layout,
            },
        })
    }

    /// U and V of chroma column `cx`, `None` where a packed group is cut off by the row end.
    #[inline(always)]
    pub(crate) fn try_sample(&self, cx: usize) -> (Option<u8>, Option<u8>) {
        match self {
            ChromaRows::Neutral => (Some(NEUTRAL_CHROMA), Some(NEUTRAL_CHROMA)),
            ChromaRows::Planar { u, v } => (u.get(cx).copied(), v.get(cx).copied()),
            ChromaRows::Interleaved { row, order } => {
                let first = row.get(cx * 2).copied();
                let second = row.get(cx * 2 + 1).copied();
                match order {
                    ChromaOrder::Uv => (first, second),
                    ChromaOrder::Vu => (second, first),
                }
            }
            ChromaRows::Packed { row, layout } => {
                let slots = layout.u.len();
                let base = cx / slots * layout.bytes;
                let slot = cx % slots;
                (
                    row.get(base + layout.u[slot]).copied(),
                    row.get(base + layout.v[slot]).copied(),
                )
            }
        }
    }

    #[inline(always)]
    pub(crate) fn sample(&self, cx: usize) -> (u8, u8) {
        let (u, v) = self.try_sample(cx);
        (u.unwrap_or(NEUTRAL_CHROMA), v.unwrap_or(NEUTRAL_CHROMA))
    }
}

/// Writes chroma row `cy` of `dst`, taking every U/V pair from `sample`.
///
/// Planar destinations are written one plane at a time.
pub(crate) fn write_chroma_row(
    dst: &mut FrameViewMut,
    shape: &YuvShape,
    cy: usize,
    sample: impl Fn(usize) -> (u8, u8),
) -> Result<(), FrameError> {
    match shape.chroma {
        ChromaLayout::None => {}
        ChromaLayout::Planar => {
            let row = dst.row_mut(PlaneId::U, cy)?;
            for (cx, dst) in row.iter_mut().take(shape.chroma_width).enumerate() {
                *dst = sample(cx).0;
            }
            let row = dst.row_mut(PlaneId::V, cy)?;
            for (cx, dst) in row.iter_mut().take(shape.chroma_width).enumerate() {
                *dst = sample(cx).1;
            }
        }
        ChromaLayout::Interleaved(order) => {
            let row = dst.row_mut(PlaneId::Chroma, cy)?;
            for (cx, pair) in row
                .chunks_exact_mut(2)
                .take(shape.chroma_width)
                .enumerate()
            {
                let (u, v) = sample(cx);
                let (first, second) = match order {
                    ChromaOrder::Uv => (u, v),
                    ChromaOrder::Vu => (v, u),
                };
                pair[0] = first;
                pair[1] = second;
            }
        }
        ChromaLayout::Packed(layout) => {
            let row = dst.row_mut(PlaneId::Primary, cy)?;
            let slots = layout.u.len();
            for cx in 0..shape.chroma_width {
                let (u, v) = sample(cx);
                let base = cx / slots * layout.bytes;
                let slot = cx % slots;
                if let Some(dst) = row.get_mut(base + layout.u[slot]) {
                    *dst = u;
                }
                if let Some(dst) = row.get_mut(base + layout.v[slot]) {
                    *dst = v;
                }
            }
        }
    }
    Ok(())
}

/// Transcodes between two YUV layouts.
///
/// Luma is copied sample for sample. Chroma is point sampled: every destination chroma
/// sample takes the source chroma sample covering its top-left luma pixel, and sources
/// without chroma yield neutral grey.
pub(crate) fn convert_yuv(src: &FrameView, dst: &mut FrameViewMut) -> Result<(), FrameError> {
    let src_region = src.region();
    let dst_region = dst.region();
    let unsupported = FrameError::UnsupportedConversion {
        from: src_region.format,
        to: dst_region.format,
    };
    let src_shape = YuvShape::of(src_region).map_err(|_| unsupported.clone())?;
    let dst_shape = YuvShape::of(dst_region).map_err(|_| unsupported)?;

    let width = dst_region.width;
    let height = dst_region.height;

    log::trace!(
        "yuv kernel {} -> {}, chroma {:?} -> {:?}",
        src_region.format,
        dst_region.format,
        src_shape.decimation,
        dst_shape.decimation
    );

    for row in 0..height {
        let src_row = src.row(PlaneId::Primary, row)?;
        let dst_row = dst.row_mut(PlaneId::Primary, row)?;
        for x in 0..width {
            if let Some(luma) = src_shape.luma.read(src_row, x) {
                dst_shape.luma.write(dst_row, x, luma);
            }
        }
        if dst_shape.luma.has_alpha() {
            for x in 0..width {
                let alpha = src_shape.luma.read_alpha(src_row, x).unwrap_or(0xFF);
                dst_shape.luma.write_alpha(dst_row, x, alpha);
            }
        }
    }

    let (dst_h, dst_v) = dst_shape.decimation;
    let (src_h, src_v) = src_shape.decimation;
    let last_column = src_shape.chroma_width.saturating_sub(1);
    for cy in 0..dst_shape.chroma_rows {
        let luma_row = (cy * dst_v).min(height.saturating_sub(1));
        let rows = ChromaRows::fetch(src, &src_shape, luma_row / src_v)?;
        write_chroma_row(dst, &dst_shape, cy, |cx| {
            let luma_column = (cx * dst_h).min(width - 1);
            rows.sample((luma_column / src_h).min(last_column))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;
    use crate::partition::{frame_size, partition, PartitionRequest};
    use rand::Rng;

    fn run(
        from: PixelFormat,
        from_request: &PartitionRequest,
        src: &[u8],
        to: PixelFormat,
        to_request: &PartitionRequest,
    ) -> Vec<u8> {
        let src_region = partition(from, from_request, src.len()).unwrap();
        let size = frame_size(to, to_request.width, to_request.height, to_request.stride).unwrap();
        let mut dst = vec![0u8; size];
        let dst_region = partition(to, to_request, dst.len()).unwrap();
        let src_view = FrameView::new(src, &src_region).unwrap();
        let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
        convert_yuv(&src_view, &mut dst_view).unwrap();
        dst
    }

    fn random_frame(format: PixelFormat, width: u32, height: u32) -> Vec<u8> {
        let mut rng = rand::rng();
        let size = frame_size(format, width, height, 0).unwrap();
        (0..size).map(|_| rng.random()).collect()
    }

    #[test]
    fn test_i420_to_yuy2() {
        let request = PartitionRequest::new(4, 2);
        let mut i420: Vec<u8> = (0..8).collect();
        i420.extend_from_slice(&[100, 101, 200, 201]);
        let yuy2 = run(PixelFormat::I420, &request, &i420, PixelFormat::Yuy2, &request);
        assert_eq!(
            yuy2,
            vec![0, 100, 1, 200, 2, 101, 3, 201, 4, 100, 5, 200, 6, 101, 7, 201]
        );
    }

    #[test]
    fn test_packed_422_point_samples_top_row() {
        let request = PartitionRequest::new(2, 2);
        let yuy2 = [1, 10, 2, 20, 3, 30, 4, 40];
        let i420 = run(PixelFormat::Yuy2, &request, &yuy2, PixelFormat::I420, &request);
        assert_eq!(i420, vec![1, 2, 3, 4, 10, 20]);
        let uyvy = run(PixelFormat::Yuy2, &request, &yuy2, PixelFormat::Uyvy, &request);
        assert_eq!(uyvy, vec![10, 1, 20, 2, 30, 3, 40, 4]);
    }

    #[test]
    fn test_same_decimation_is_exact() {
        let mut rng = rand::rng();
        let width = rng.random_range(1..20u32) * 2;
        let height = rng.random_range(1..20u32) * 2;
        let request = PartitionRequest::new(width, height);
        let nv12 = random_frame(PixelFormat::Nv12, width, height);
        let yv12 = run(PixelFormat::Nv12, &request, &nv12, PixelFormat::Yv12, &request);
        let imc2 = run(PixelFormat::Yv12, &request, &yv12, PixelFormat::Imc2, &request);
        let back = run(PixelFormat::Imc2, &request, &imc2, PixelFormat::Nv12, &request);
        assert_eq!(back, nv12);
    }

    #[test]
    fn test_luma_only_sources_are_grey() {
        let request = PartitionRequest::new(4, 2);
        let y800: Vec<u8> = (10..18).collect();
        let i420 = run(PixelFormat::Y800, &request, &y800, PixelFormat::I420, &request);
        assert_eq!(&i420[..8], &y800[..]);
        assert_eq!(&i420[8..], &[0x80; 4]);

        let y16 = run(PixelFormat::Y800, &request, &y800, PixelFormat::Y16, &request);
        assert_eq!(&y16[..4], &[10, 10, 11, 11]);
        let back = run(PixelFormat::Y16, &request, &y16, PixelFormat::Y800, &request);
        assert_eq!(back, y800);
    }

    #[test]
    fn test_ayuv_alpha_defaults_to_opaque() {
        let request = PartitionRequest::new(2, 1);
        let iyu2 = [1, 2, 3, 4, 5, 6];
        let ayuv = run(PixelFormat::Iyu2, &request, &iyu2, PixelFormat::Ayuv, &request);
        assert_eq!(ayuv, vec![3, 1, 2, 0xFF, 6, 4, 5, 0xFF]);

        let ayuv = [3, 1, 2, 0x40, 6, 4, 5, 0x20];
        let copy = run(PixelFormat::Ayuv, &request, &ayuv, PixelFormat::Ayuv, &request);
        assert_eq!(copy, ayuv.to_vec());
    }

    #[test]
    fn test_y41p_picks_every_fourth_chroma() {
        let request = PartitionRequest::new(8, 1);
        let yuy2: Vec<u8> = (0..4)
            .flat_map(|i| [i * 2, 10 + i, i * 2 + 1, 20 + i])
            .collect();
        let y41p = run(PixelFormat::Yuy2, &request, &yuy2, PixelFormat::Y41p, &request);
        assert_eq!(y41p, vec![10, 0, 20, 1, 12, 2, 22, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_flipped_planar_source() {
        let request = PartitionRequest::new(2, 4);
        let mut i420: Vec<u8> = (0..8).collect();
        i420.extend_from_slice(&[50, 51, 60, 61]);
        let yuy2 = run(
            PixelFormat::I420,
            &request.with_flipped(true),
            &i420,
            PixelFormat::Yuy2,
            &request,
        );
        assert_eq!(&yuy2[..4], &[6, 51, 7, 61]);
        assert_eq!(&yuy2[12..], &[0, 50, 1, 60]);
    }

    #[test]
    fn test_rgb_is_rejected() {
        let request = PartitionRequest::new(2, 1);
        let src_region = partition(PixelFormat::Rgb24, &request, 6).unwrap();
        let dst_region = partition(PixelFormat::Yuy2, &request, 4).unwrap();
        let src = [0u8; 6];
        let mut dst = [0u8; 4];
        let src_view = FrameView::new(&src, &src_region).unwrap();
        let mut dst_view = FrameViewMut::new(&mut dst, &dst_region).unwrap();
        assert_eq!(
            convert_yuv(&src_view, &mut dst_view),
            Err(FrameError::UnsupportedConversion {
                from: PixelFormat::Rgb24,
                to: PixelFormat::Yuy2
            })
        );
    }
}
