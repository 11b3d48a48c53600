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
use crate::format::{LayoutFamily, RgbPacking};
use crate::frame_error::FrameError;
use crate::region::{FrameView, FrameViewMut, PlaneId, Region};
use crate::rgb_pixel::{read_index, write_index, Rgba8, RgbTarget};
use crate::yuv_convert::{write_chroma_row, ChromaRows, YuvShape};

/// Solid color for [fill] and [check].
///
/// The variant must match the family of the frame: `Rgb` for direct RGB layouts,
/// `Index` for palette layouts and `Yuv` for every YUV layout except CLJR.
///
/// The alpha of `Rgb` only reaches RGBA and the 555 layouts. RGB32 is stored as xRGB,
/// so its fourth byte is always 0xFF whatever alpha is given.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FillColor {
    Rgb {
        red: u8,
        green: u8,
        blue: u8,
        alpha: u8,
    },
    Yuv {
        y: u8,
        u: u8,
        v: u8,
        alpha: u8,
    },
    Index(u8),
}

enum Pattern {
    Rgb { bytes: [u8; 4], bpp: usize },
    Index { bits: u8, index: u8 },
    Yuv { y: u8, u: u8, v: u8, alpha: u8 },
}

fn make_pattern(color: FillColor, region: &Region) -> Result<Pattern, FrameError> {
    let descriptor = region.format.descriptor();
    match (descriptor.family, color) {
        (LayoutFamily::PackedRgb(RgbPacking::Indexed { bits }), FillColor::Index(index)) => {
            let entries = 1usize << bits;
            if index as usize >= entries {
                return Err(FrameError::PaletteIndexOutOfRange { index, entries });
            }
            Ok(Pattern::Index { bits, index })
        }
        (
            LayoutFamily::PackedRgb(packing),
            FillColor::Rgb {
                red,
                green,
                blue,
                alpha,
            },
        ) => {
            let target =
                RgbTarget::from_packing(packing).ok_or(FrameError::ColorMismatch(region.format))?;
            Ok(Pattern::Rgb {
                bytes: target.pattern(Rgba8::new(red, green, blue, alpha)),
                bpp: target.bytes_per_pixel(),
            })
        }
        (LayoutFamily::Opaque, _) => Err(FrameError::UnsupportedFormat(region.format)),
        (_, FillColor::Yuv { y, u, v, alpha }) if descriptor.is_yuv() => {
            Ok(Pattern::Yuv { y, u, v, alpha })
        }
        _ => Err(FrameError::ColorMismatch(region.format)),
    }
}

/// Paints every pixel of the region with `color`.
///
/// Indexed rows only touch their `width` pixels, the padding bits of the last byte are
/// left as they were.
pub fn fill(color: FillColor, dst: &mut FrameViewMut) -> Result<(), FrameError> {
    let region = dst.region();
    let pattern = make_pattern(color, region)?;
    let width = region.width;

    log::trace!(
        "filling {} slice {} with {:?}",
        region.format,
        region.thread_index,
        color
    );

    match pattern {
        Pattern::Rgb { bytes, bpp } => {
            for row in 0..region.height {
                let row = dst.row_mut(PlaneId::Primary, row)?;
                for px in row.chunks_exact_mut(bpp).take(width) {
                    px.copy_from_slice(&bytes[..bpp]);
                }
            }
        }
        Pattern::Index { bits, index } => {
            for row in 0..region.height {
                let row = dst.row_mut(PlaneId::Primary, row)?;
                for x in 0..width {
                    write_index(bits, row, x, index);
                }
            }
        }
        Pattern::Yuv { y, u, v, alpha } => {
            let shape = YuvShape::of(region)?;
            for row in 0..region.height {
                let row = dst.row_mut(PlaneId::Primary, row)?;
                for x in 0..width {
                    shape.luma.write(row, x, y);
                    shape.luma.write_alpha(row, x, alpha);
                }
            }
            for cy in 0..shape.chroma_rows {
                write_chroma_row(dst, &shape, cy, |_| (u, v))?;
            }
        }
    }
    Ok(())
}

/// Whether every pixel of the region holds `color`, as [fill] would have written it.
///
/// Reads only, so repeated checks give the same answer.
pub fn check(color: FillColor, src: &FrameView) -> Result<bool, FrameError> {
    let region = src.region();
    let pattern = make_pattern(color, region)?;
    let width = region.width;

    match pattern {
        Pattern::Rgb { bytes, bpp } => {
            for row in 0..region.height {
                let row = src.row(PlaneId::Primary, row)?;
                if !row
                    .chunks_exact(bpp)
                    .take(width)
                    .all(|px| px == &bytes[..bpp])
                {
                    return Ok(false);
                }
            }
        }
        Pattern::Index { bits, index } => {
            for row in 0..region.height {
                let row = src.row(PlaneId::Primary, row)?;
                if (0..width).any(|x| read_index(bits, row, x) != index) {
                    return Ok(false);
                }
            }
        }
        Pattern::Yuv { y, u, v, alpha } => {
            let shape = YuvShape::of(region)?;
            for row in 0..region.height {
                let row = src.row(PlaneId::Primary, row)?;
                for x in 0..width {
                    if shape.luma.read(row, x).is_some_and(|luma| luma != y)
                        || shape.luma.read_alpha(row, x).is_some_and(|a| a != alpha)
                    {
                        return Ok(false);
                    }
                }
            }
            for cy in 0..shape.chroma_rows {
                let rows = ChromaRows::fetch(src, &shape, cy)?;
                for cx in 0..shape.chroma_width {
                    let (found_u, found_v) = rows.try_sample(cx);
                    if found_u.is_some_and(|c| c != u) || found_v.is_some_and(|c| c != v) {
                        return Ok(false);
                    }
                }
            }
        }
    }
    Ok(true)
}
