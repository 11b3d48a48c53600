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
use crate::format::RgbPacking;
use crate::palette::Palette;
use num_traits::ToBytes;

/// An 8 bit per channel color, the common currency between RGB decoders and encoders.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Rgba8 {
        Rgba8 {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Packs 8 bit channels into RGB565, dropping the low bits.
#[inline(always)]
pub const fn pack_rgb565(red: u8, green: u8, blue: u8) -> u16 {
    ((red as u16 >> 3) << 11) | ((green as u16 >> 2) << 5) | (blue as u16 >> 3)
}

/// Expands RGB565 to 8 bit channels, the vacated low bits are zero.
#[inline(always)]
pub const fn unpack_rgb565(word: u16) -> (u8, u8, u8) {
    (
        ((word >> 11) << 3) as u8,
        (((word >> 5) & 0x3F) << 2) as u8,
        ((word & 0x1F) << 3) as u8,
    )
}

/// Packs 8 bit channels into RGB555, bit 15 is set for any nonzero alpha.
#[inline(always)]
pub const fn pack_rgb555(red: u8, green: u8, blue: u8, alpha: u8) -> u16 {
    let alpha_bit = if alpha != 0 { 0x8000 } else { 0 };
    alpha_bit | ((red as u16 >> 3) << 10) | ((green as u16 >> 3) << 5) | (blue as u16 >> 3)
}

/// Expands RGB555 to 8 bit channels and reports bit 15.
#[inline(always)]
pub const fn unpack_rgb555(word: u16) -> (u8, u8, u8, bool) {
    (
        (((word >> 10) & 0x1F) << 3) as u8,
        (((word >> 5) & 0x1F) << 3) as u8,
        ((word & 0x1F) << 3) as u8,
        word & 0x8000 != 0,
    )
}

/// Drops the low green bit and forces the alpha bit.
#[inline(always)]
pub const fn rgb565_to_rgb555(word: u16) -> u16 {
    0x8000 | ((word >> 1) & 0x7FE0) | (word & 0x1F)
}

#[inline(always)]
pub const fn rgb555_to_rgb565(word: u16) -> u16 {
    ((word & 0x7FE0) << 1) | (word & 0x1F)
}

/// Writes `word` little endian into the head of `dst`.
#[inline(always)]
pub(crate) fn store_le<W: ToBytes>(dst: &mut [u8], word: W) {
    let bytes = word.to_le_bytes();
    let bytes = bytes.as_ref();
    dst[..bytes.len()].copy_from_slice(bytes);
}

/// Non-indexed RGB packings, the only ones a kernel can write.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RgbTarget {
    Bgra32 = 0,
    Bgrx32 = 1,
    Bgr24 = 2,
    Rgb565 = 3,
    Rgb555 = 4,
    Argb1555 = 5,
}

impl From<u8> for RgbTarget {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => RgbTarget::Bgra32,
            1 => RgbTarget::Bgrx32,
            2 => RgbTarget::Bgr24,
            3 => RgbTarget::Rgb565,
            4 => RgbTarget::Rgb555,
            5 => RgbTarget::Argb1555,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl RgbTarget {
    #[inline]
    pub(crate) const fn from_packing(packing: RgbPacking) -> Option<RgbTarget> {
        match packing {
            RgbPacking::Bgra32 => Some(RgbTarget::Bgra32),
            RgbPacking::Bgrx32 => Some(RgbTarget::Bgrx32),
            RgbPacking::Bgr24 => Some(RgbTarget::Bgr24),
            RgbPacking::Rgb565 => Some(RgbTarget::Rgb565),
            RgbPacking::Rgb555 => Some(RgbTarget::Rgb555),
            RgbPacking::Argb1555 => Some(RgbTarget::Argb1555),
            RgbPacking::Indexed { .. } => None,
        }
    }

    #[inline(always)]
    pub(crate) const fn bytes_per_pixel(&self) -> usize {
        match self {
            RgbTarget::Bgra32 | RgbTarget::Bgrx32 => 4,
            RgbTarget::Bgr24 => 3,
            RgbTarget::Rgb565 | RgbTarget::Rgb555 | RgbTarget::Argb1555 => 2,
        }
    }

    /// Encodes `color` into the first `bytes_per_pixel()` bytes of `dst`.
    #[inline(always)]
    pub(crate) fn encode(&self, dst: &mut [u8], color: Rgba8) {
        match self {
            RgbTarget::Bgra32 | RgbTarget::Bgrx32 => {
                let alpha = if *self == RgbTarget::Bgra32 {
                    color.alpha
                } else {
                    0xFF
                };
                let word = ((alpha as u32) << 24)
                    | ((color.red as u32) << 16)
                    | ((color.green as u32) << 8)
                    | color.blue as u32;
                store_le(dst, word);
            }
            RgbTarget::Bgr24 => {
                dst[0] = color.blue;
                dst[1] = color.green;
                dst[2] = color.red;
            }
            RgbTarget::Rgb565 => {
                store_le(dst, pack_rgb565(color.red, color.green, color.blue));
            }
            RgbTarget::Rgb555 | RgbTarget::Argb1555 => {
                store_le(
                    dst,
                    pack_rgb555(color.red, color.green, color.blue, color.alpha),
                );
            }
        }
    }

    /// Encoded bytes of `color`, padded to four.
    #[inline]
    pub(crate) fn pattern(&self, color: Rgba8) -> [u8; 4] {
        let mut pattern = [0u8; 4];
        self.encode(&mut pattern, color);
        pattern
    }
}

/// Reads pixel `x` of a row stored with `packing`.
///
/// Formats without alpha read opaque; only BGRA and ARGB1555 carry it through.
#[inline(always)]
pub(crate) fn decode_pixel(packing: RgbPacking, palette: &Palette, row: &[u8], x: usize) -> Rgba8 {
    match packing {
        RgbPacking::Bgra32 | RgbPacking::Bgrx32 => {
            let px = &row[x * 4..x * 4 + 4];
            let alpha = if packing == RgbPacking::Bgra32 {
                px[3]
            } else {
                0xFF
            };
            Rgba8::new(px[2], px[1], px[0], alpha)
        }
        RgbPacking::Bgr24 => {
            let px = &row[x * 3..x * 3 + 3];
            Rgba8::new(px[2], px[1], px[0], 0xFF)
        }
        RgbPacking::Rgb565 => {
            let (r, g, b) = unpack_rgb565(u16::from_le_bytes([row[x * 2], row[x * 2 + 1]]));
            Rgba8::new(r, g, b, 0xFF)
        }
        RgbPacking::Rgb555 | RgbPacking::Argb1555 => {
            let (r, g, b, bit) = unpack_rgb555(u16::from_le_bytes([row[x * 2], row[x * 2 + 1]]));
            let alpha = if packing == RgbPacking::Rgb555 || bit {
                0xFF
            } else {
                0
            };
            Rgba8::new(r, g, b, alpha)
        }
        RgbPacking::Indexed { bits } => {
            let entry = palette.lookup(read_index(bits, row, x));
            Rgba8::new(entry.red, entry.green, entry.blue, 0xFF)
        }
    }
}

/// Palette index of pixel `x`; sub-byte pixels are packed most significant first.
#[inline(always)]
pub(crate) fn read_index(bits: u8, row: &[u8], x: usize) -> u8 {
    match bits {
        1 => (row[x / 8] >> (7 - (x % 8))) & 1,
        4 => {
            let shift = if x % 2 == 0 { 4 } else { 0 };
            (row[x / 2] >> shift) & 0x0F
        }
        _ => row[x],
    }
}

/// Stores palette index `index` for pixel `x`, leaving neighbouring pixels intact.
#[inline(always)]
pub(crate) fn write_index(bits: u8, row: &mut [u8], x: usize, index: u8) {
    match bits {
        1 => {
            let shift = 7 - (x % 8);
            let byte = &mut row[x / 8];
            *byte = (*byte & !(1 << shift)) | ((index & 1) << shift);
        }
        4 => {
            let shift = if x % 2 == 0 { 4 } else { 0 };
            let byte = &mut row[x / 2];
            *byte = (*byte & !(0x0F << shift)) | ((index & 0x0F) << shift);
        }
        _ => row[x] = index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteEntry;
    use rand::Rng;

    #[test]
    fn test_565_truncates() {
        let word = pack_rgb565(0xFF, 0x80, 0x40);
        assert_eq!(unpack_rgb565(word), (0xF8, 0x80, 0x40));
        assert_eq!(pack_rgb565(0xF8, 0xFC, 0xF8), 0xFFFF);
    }

    #[test]
    fn test_565_to_555_law() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let (r, g, b) = (rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>());
            let word = rgb565_to_rgb555(pack_rgb565(r, g, b));
            let (r5, g5, b5, alpha) = unpack_rgb555(word);
            assert!(alpha);
            assert_eq!(r5, r & 0xF8);
            assert_eq!(g5, g & 0xF8);
            assert_eq!(b5, b & 0xF8);
        }
        assert_eq!(rgb565_to_rgb555(pack_rgb565(0xF8, 0xFC, 0x1F)), 0xFFE3);
    }

    #[test]
    fn test_555_to_565_keeps_channels() {
        let word = pack_rgb555(0x80, 0x48, 0x10, 0xFF);
        assert_eq!(unpack_rgb565(rgb555_to_rgb565(word)), (0x80, 0x48, 0x10));
        assert_eq!(pack_rgb555(0x80, 0x48, 0x10, 0) & 0x8000, 0);
    }

    #[test]
    fn test_encode_decode_pixels() {
        let palette = Palette::greyscale(8);
        let color = Rgba8::new(0x30, 0x20, 0x10, 0x7F);
        let mut row = [0u8; 8];
        RgbTarget::Bgra32.encode(&mut row, color);
        assert_eq!(&row[..4], &[0x10, 0x20, 0x30, 0x7F]);
        assert_eq!(decode_pixel(RgbPacking::Bgra32, &palette, &row, 0), color);
        RgbTarget::Bgrx32.encode(&mut row[4..], color);
        assert_eq!(&row[4..], &[0x10, 0x20, 0x30, 0xFF]);
        assert_eq!(
            decode_pixel(RgbPacking::Bgrx32, &palette, &row, 1).alpha,
            0xFF
        );
        RgbTarget::Argb1555.encode(&mut row, Rgba8::new(0xF8, 0, 0, 0));
        assert_eq!(
            decode_pixel(RgbPacking::Argb1555, &palette, &row, 0),
            Rgba8::new(0xF8, 0, 0, 0)
        );
        assert_eq!(
            decode_pixel(RgbPacking::Rgb555, &palette, &row, 0).alpha,
            0xFF
        );
    }

    #[test]
    fn test_palette_lookup_order() {
        let mut entries = [PaletteEntry::default(); 256];
        entries[7] = PaletteEntry {
            blue: 10,
            green: 20,
            red: 30,
            alpha: 0,
        };
        let palette = Palette::new(&entries);
        let color = decode_pixel(RgbPacking::Indexed { bits: 8 }, &palette, &[7], 0);
        assert_eq!(color, Rgba8::new(30, 20, 10, 0xFF));
        let mut bgr = [0u8; 3];
        RgbTarget::Bgr24.encode(&mut bgr, color);
        assert_eq!(bgr, [10, 20, 30]);
    }

    #[test]
    fn test_sub_byte_indices() {
        let mut row = [0u8; 2];
        write_index(1, &mut row, 0, 1);
        write_index(1, &mut row, 9, 1);
        assert_eq!(row, [0x80, 0x40]);
        assert_eq!(read_index(1, &row, 9), 1);
        assert_eq!(read_index(1, &row, 8), 0);

        let mut row = [0u8; 2];
        write_index(4, &mut row, 1, 0xA);
        write_index(4, &mut row, 2, 0x5);
        assert_eq!(row, [0x0A, 0x50]);
        assert_eq!(read_index(4, &row, 2), 5);
    }
}
