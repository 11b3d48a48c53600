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
use crate::palette::Palette;
use crate::region::{FrameView, FrameViewMut, PlaneId};
use crate::rgb_pixel::{decode_pixel, rgb555_to_rgb565, rgb565_to_rgb555, store_le, RgbTarget};

fn rgb_convert_impl<const TARGET: u8>(
    src: &FrameView,
    dst: &mut FrameViewMut,
    packing: RgbPacking,
    palette: &Palette,
) -> Result<(), FrameError> {
    let target: RgbTarget = TARGET.into();
    let bpp = target.bytes_per_pixel();
    let region = src.region();
    let width = region.width;

    for row in 0..region.height {
        let src_row = src.row(PlaneId::Primary, row)?;
        let dst_row = dst.row_mut(PlaneId::Primary, row)?;

        match (packing, target) {
            (RgbPacking::Bgra32 | RgbPacking::Bgrx32, RgbTarget::Bgr24) => {
                for (dst, src) in dst_row
                    .chunks_exact_mut(3)
                    .zip(src_row.chunks_exact(4))
                    .take(width)
                {
                    dst.copy_from_slice(&src[..3]);
                }
            }
            (RgbPacking::Bgr24, RgbTarget::Bgra32 | RgbTarget::Bgrx32) => {
                for (dst, src) in dst_row
                    .chunks_exact_mut(4)
                    .zip(src_row.chunks_exact(3))
                    .take(width)
                {
                    let word = u32::from_le_bytes([src[0], src[1], src[2], 0]) | 0xFF00_0000;
                    store_le(dst, word);
                }
            }
            (RgbPacking::Rgb565, RgbTarget::Rgb555 | RgbTarget::Argb1555) => {
                for (dst, src) in dst_row
                    .chunks_exact_mut(2)
                    .zip(src_row.chunks_exact(2))
                    .take(width)
                {
                    store_le(dst, rgb565_to_rgb555(u16::from_le_bytes([src[0], src[1]])));
                }
            }
            (RgbPacking::Rgb555 | RgbPacking::Argb1555, RgbTarget::Rgb565) => {
                for (dst, src) in dst_row
                    .chunks_exact_mut(2)
                    .zip(src_row.chunks_exact(2))
                    .take(width)
                {
                    store_le(dst, rgb555_to_rgb565(u16::from_le_bytes([src[0], src[1]])));
                }
            }
            _ => {
                for (x, dst) in dst_row.chunks_exact_mut(bpp).take(width).enumerate() {
                    target.encode(dst, decode_pixel(packing, palette, src_row, x));
                }
            }
        }
    }
    Ok(())
}

/// Transcodes between two RGB layouts, resolving indexed sources through their palette.
pub(crate) fn convert_rgb(src: &FrameView, dst: &mut FrameViewMut) -> Result<(), FrameError> {
    let from = src.region().format;
    let to = dst.region().format;
    let unsupported = FrameError::UnsupportedConversion { from, to };

    let packing = match from.descriptor().family {
        LayoutFamily::PackedRgb(packing) => packing,
        _ => return Err(unsupported),
    };
    let target = match to.descriptor().family {
        LayoutFamily::PackedRgb(packing) => RgbTarget::from_packing(packing),
        _ => None,
    }
    .ok_or(unsupported)?;

    let fallback;
    let palette = match (src.region().palette.as_ref(), packing) {
        (Some(palette), _) => palette,
        (None, RgbPacking::Indexed { bits }) => {
            fallback = Palette::greyscale(bits);
            &fallback
        }
        (None, _) => {
            fallback = Palette::greyscale(8);
            &fallback
        }
    };

    log::trace!("rgb kernel {} -> {}", from, to);

    match target {
        RgbTarget::Bgra32 => {
            rgb_convert_impl::<{ RgbTarget::Bgra32 as u8 }>(src, dst, packing, palette)
        }
        RgbTarget::Bgrx32 => {
            rgb_convert_impl::<{ RgbTarget::Bgrx32 as u8 }>(src, dst, packing, palette)
        }
        RgbTarget::Bgr24 => {
            rgb_convert_impl::<{ RgbTarget::Bgr24 as u8 }>(src, dst, packing, palette)
        }
        RgbTarget::Rgb565 => {
            rgb_convert_impl::<{ RgbTarget::Rgb565 as u8 }>(src, dst, packing, palette)
        }
        RgbTarget::Rgb555 => {
            rgb_convert_impl::<{ RgbTarget::Rgb555 as u8 }>(src, dst, packing, palette)
        }
        RgbTarget::Argb1555 => {
            rgb_convert_impl::<{ RgbTarget::Argb1555 as u8 }>(src, dst, packing, palette)
        }
    }
}
