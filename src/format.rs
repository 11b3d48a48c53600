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
use std::fmt::{Display, Formatter};

/// Every pixel layout the partitioner and the kernels understand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PixelFormat {
    /// 32 bit B, G, R, A with meaningful alpha
    Rgba,
    /// 32 bit B, G, R, X
    Rgb32,
    /// 24 bit B, G, R
    Rgb24,
    Rgb565,
    /// 15 bit RGB, the top bit carries a one bit alpha
    Rgb555,
    Argb1555,
    /// 8 bit palette indices
    Rgb8,
    /// 4 bit palette indices, high nibble is the left pixel
    Rgb4,
    /// 1 bit palette indices, most significant bit is the left pixel
    Rgb1,
    Yuy2,
    Uyvy,
    Yvyu,
    Vyuy,
    /// UYVY layout; the transparency bit in the luma LSB is carried as plain luma
    Y42t,
    Iyu1,
    Iyu2,
    Y41p,
    /// Y41P layout; the transparency bit in the luma LSB is carried as plain luma
    Y41t,
    Cljr,
    Ayuv,
    Y800,
    Y16,
    I420,
    Yv12,
    Yuv9,
    Yvu9,
    Yv16,
    Nv12,
    Nv21,
    Imc1,
    Imc2,
    Imc3,
    Imc4,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 33] = [
        PixelFormat::Rgba,
        PixelFormat::Rgb32,
        PixelFormat::Rgb24,
        PixelFormat::Rgb565,
        PixelFormat::Rgb555,
        PixelFormat::Argb1555,
        PixelFormat::Rgb8,
        PixelFormat::Rgb4,
        PixelFormat::Rgb1,
        PixelFormat::Yuy2,
        PixelFormat::Uyvy,
        PixelFormat::Yvyu,
        PixelFormat::Vyuy,
        PixelFormat::Y42t,
        PixelFormat::Iyu1,
        PixelFormat::Iyu2,
        PixelFormat::Y41p,
        PixelFormat::Y41t,
        PixelFormat::Cljr,
        PixelFormat::Ayuv,
        PixelFormat::Y800,
        PixelFormat::Y16,
        PixelFormat::I420,
        PixelFormat::Yv12,
        PixelFormat::Yuv9,
        PixelFormat::Yvu9,
        PixelFormat::Yv16,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::Imc1,
        PixelFormat::Imc2,
        PixelFormat::Imc3,
        PixelFormat::Imc4,
    ];

    pub const fn fourcc(&self) -> &'static str {
        match self {
            PixelFormat::Rgba => "RGBA",
            PixelFormat::Rgb32 => "RGB32",
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Rgb555 => "RGB555",
            PixelFormat::Argb1555 => "ARGB1555",
            PixelFormat::Rgb8 => "RGB8",
            PixelFormat::Rgb4 => "RGB4",
            PixelFormat::Rgb1 => "RGB1",
            PixelFormat::Yuy2 => "YUY2",
            PixelFormat::Uyvy => "UYVY",
            PixelFormat::Yvyu => "YVYU",
            PixelFormat::Vyuy => "VYUY",
            PixelFormat::Y42t => "Y42T",
            PixelFormat::Iyu1 => "IYU1",
            PixelFormat::Iyu2 => "IYU2",
            PixelFormat::Y41p => "Y41P",
            PixelFormat::Y41t => "Y41T",
            PixelFormat::Cljr => "CLJR",
            PixelFormat::Ayuv => "AYUV",
            PixelFormat::Y800 => "Y800",
            PixelFormat::Y16 => "Y16",
            PixelFormat::I420 => "I420",
            PixelFormat::Yv12 => "YV12",
            PixelFormat::Yuv9 => "YUV9",
            PixelFormat::Yvu9 => "YVU9",
            PixelFormat::Yv16 => "YV16",
            PixelFormat::Nv12 => "NV12",
            PixelFormat::Nv21 => "NV21",
            PixelFormat::Imc1 => "IMC1",
            PixelFormat::Imc2 => "IMC2",
            PixelFormat::Imc3 => "IMC3",
            PixelFormat::Imc4 => "IMC4",
        }
    }

    /// Static layout facts of this format.
    pub const fn descriptor(&self) -> FormatDescriptor {
        match self {
            PixelFormat::Rgba => FormatDescriptor::rgb(RgbPacking::Bgra32, MinStride::Bits(32)),
            PixelFormat::Rgb32 => FormatDescriptor::rgb(RgbPacking::Bgrx32, MinStride::Bits(32)),
            PixelFormat::Rgb24 => FormatDescriptor::rgb(RgbPacking::Bgr24, MinStride::Bits(24)),
            PixelFormat::Rgb565 => FormatDescriptor::rgb(RgbPacking::Rgb565, MinStride::Bits(16)),
            PixelFormat::Rgb555 => FormatDescriptor::rgb(RgbPacking::Rgb555, MinStride::Bits(16)),
            PixelFormat::Argb1555 => {
                FormatDescriptor::rgb(RgbPacking::Argb1555, MinStride::Bits(16))
            }
            PixelFormat::Rgb8 => {
                FormatDescriptor::rgb(RgbPacking::Indexed { bits: 8 }, MinStride::Bits(8))
            }
            PixelFormat::Rgb4 => {
                FormatDescriptor::rgb(RgbPacking::Indexed { bits: 4 }, MinStride::CeilBits(4))
            }
            PixelFormat::Rgb1 => {
                FormatDescriptor::rgb(RgbPacking::Indexed { bits: 1 }, MinStride::CeilBits(1))
            }
            PixelFormat::Yuy2 => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::YUYV, MinStride::Bits(16))
            }
            PixelFormat::Uyvy | PixelFormat::Y42t => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::UYVY, MinStride::Bits(16))
            }
            PixelFormat::Yvyu => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::YVYU, MinStride::Bits(16))
            }
            PixelFormat::Vyuy => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::VYUY, MinStride::Bits(16))
            }
            PixelFormat::Iyu1 => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::IYU1, MinStride::Bits(12))
            }
            PixelFormat::Iyu2 => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::IYU2, MinStride::Bits(24))
            }
            PixelFormat::Y41p | PixelFormat::Y41t => FormatDescriptor::packed_yuv(
                PackedYuvLayout::Y41P,
                MinStride::Groups {
                    pixels: 8,
                    bytes: 12,
                },
            ),
            PixelFormat::Ayuv => {
                FormatDescriptor::packed_yuv(PackedYuvLayout::AYUV, MinStride::Bits(32))
            }
            PixelFormat::Cljr => FormatDescriptor {
                family: LayoutFamily::Opaque,
                planes: 1,
                min_stride: MinStride::Bits(8),
            },
            PixelFormat::Y800 => FormatDescriptor {
                family: LayoutFamily::Luma { bytes_per_sample: 1 },
                planes: 1,
                min_stride: MinStride::Bits(8),
            },
            PixelFormat::Y16 => FormatDescriptor {
                family: LayoutFamily::Luma { bytes_per_sample: 2 },
                planes: 1,
                min_stride: MinStride::Bits(16),
            },
            PixelFormat::I420 => FormatDescriptor::planar(2, 2, ChromaOrder::Uv),
            PixelFormat::Yv12 => FormatDescriptor::planar(2, 2, ChromaOrder::Vu),
            PixelFormat::Yuv9 => FormatDescriptor::planar(4, 4, ChromaOrder::Uv),
            PixelFormat::Yvu9 => FormatDescriptor::planar(4, 4, ChromaOrder::Vu),
            PixelFormat::Yv16 => FormatDescriptor::planar(2, 1, ChromaOrder::Vu),
            PixelFormat::Nv12 => FormatDescriptor::semi_planar(ChromaOrder::Uv),
            PixelFormat::Nv21 => FormatDescriptor::semi_planar(ChromaOrder::Vu),
            PixelFormat::Imc1 => FormatDescriptor::imc(ChromaOrder::Vu, false),
            PixelFormat::Imc2 => FormatDescriptor::imc(ChromaOrder::Vu, true),
            PixelFormat::Imc3 => FormatDescriptor::imc(ChromaOrder::Uv, false),
            PixelFormat::Imc4 => FormatDescriptor::imc(ChromaOrder::Uv, true),
        }
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.fourcc())
    }
}

/// Order of the two chroma components, in memory or inside an interleaved pair.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChromaOrder {
    Uv = 0,
    Vu = 1,
}

/// Bit packing of a single-plane RGB pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RgbPacking {
    Bgra32,
    Bgrx32,
    Bgr24,
    Rgb565,
    Rgb555,
    Argb1555,
    Indexed { bits: u8 },
}

impl RgbPacking {
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, RgbPacking::Bgra32 | RgbPacking::Argb1555)
    }

    #[inline]
    pub const fn palette_entries(&self) -> Option<usize> {
        match self {
            RgbPacking::Indexed { bits } => Some(1usize << *bits),
            _ => None,
        }
    }
}

/// Byte positions of every sample inside one repeating group of a packed YUV row.
///
/// A group covers `pixels` pixels in `bytes` bytes. Luma of pixel `p` lives at `y[p]`,
/// chroma is shared by `pixels / u.len()` neighbouring pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PackedYuvLayout {
    pub pixels: usize,
    pub bytes: usize,
    pub y: &'static [usize],
    pub u: &'static [usize],
    pub v: &'static [usize],
    pub alpha: Option<usize>,
}

impl PackedYuvLayout {
    pub const YUYV: PackedYuvLayout = PackedYuvLayout::pair([0, 2], 1, 3);
    pub const UYVY: PackedYuvLayout = PackedYuvLayout::pair([1, 3], 0, 2);
    pub const YVYU: PackedYuvLayout = PackedYuvLayout::pair([0, 2], 3, 1);
    pub const VYUY: PackedYuvLayout = PackedYuvLayout::pair([1, 3], 2, 0);
    pub const IYU1: PackedYuvLayout = PackedYuvLayout {
        pixels: 4,
        bytes: 6,
        y: &[1, 2, 4, 5],
        u: &[0],
        v: &[3],
        alpha: None,
    };
    pub const Y41P: PackedYuvLayout = PackedYuvLayout {
        pixels: 8,
        bytes: 12,
        y: &[1, 3, 5, 7, 8, 9, 10, 11],
        u: &[0, 4],
        v: &[2, 6],
        alpha: None,
    };
    pub const IYU2: PackedYuvLayout = PackedYuvLayout {
        pixels: 1,
        bytes: 3,
        y: &[1],
        u: &[0],
        v: &[2],
        alpha: None,
    };
    pub const AYUV: PackedYuvLayout = PackedYuvLayout {
        pixels: 1,
        bytes: 4,
        y: &[2],
        u: &[1],
        v: &[0],
        alpha: Some(3),
    };

    const fn pair(y: [usize; 2], u: usize, v: usize) -> PackedYuvLayout {
        // The four 4:2:2 orderings only differ in these four positions.
        let y: &'static [usize] = match y {
            [0, 2] => &[0, 2],
            _ => &[1, 3],
        };
        let u: &'static [usize] = match u {
            0 => &[0],
            1 => &[1],
            2 => &[2],
            _ => &[3],
        };
        let v: &'static [usize] = match v {
            0 => &[0],
            1 => &[1],
            2 => &[2],
            _ => &[3],
        };
        PackedYuvLayout {
            pixels: 2,
            bytes: 4,
            y,
            u,
            v,
            alpha: None,
        }
    }

    #[inline]
    pub const fn first_y_position(&self) -> usize {
        self.y[0]
    }

    #[inline]
    pub const fn second_y_position(&self) -> usize {
        if self.y.len() > 1 {
            self.y[1]
        } else {
            self.y[0]
        }
    }

    #[inline]
    pub const fn u_position(&self) -> usize {
        self.u[0]
    }

    #[inline]
    pub const fn v_position(&self) -> usize {
        self.v[0]
    }

    /// Index into `u`/`v` used by pixel `pixel` of a group.
    #[inline]
    pub const fn chroma_slot(&self, pixel: usize) -> usize {
        pixel * self.u.len() / self.pixels
    }

    /// Whether `pixel` is the leftmost pixel sharing its chroma slot.
    #[inline]
    pub const fn starts_chroma_span(&self, pixel: usize) -> bool {
        (pixel * self.u.len()) % self.pixels == 0
    }
}

/// Minimum row byte width rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MinStride {
    /// `width * bits / 8`, truncated
    Bits(usize),
    /// `ceil(width * bits / 8)`
    CeilBits(usize),
    /// `width / pixels * bytes`, only whole groups
    Groups { pixels: usize, bytes: usize },
}

impl MinStride {
    #[inline]
    pub const fn row_bytes(&self, width: usize) -> usize {
        match self {
            MinStride::Bits(bits) => width * *bits / 8,
            MinStride::CeilBits(bits) => (width * *bits + 7) / 8,
            MinStride::Groups { pixels, bytes } => width / *pixels * *bytes,
        }
    }
}

/// The layout family decides which partitioning rule applies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayoutFamily {
    PackedRgb(RgbPacking),
    PackedYuv(PackedYuvLayout),
    /// Luma only, 1 or 2 bytes per sample
    Luma { bytes_per_sample: usize },
    /// Single plane without a sample table
    Opaque,
    /// Luma plane followed by two chroma planes decimated by `h` x `v`
    Planar {
        h: usize,
        v: usize,
        order: ChromaOrder,
    },
    /// Luma plane followed by one interleaved chroma plane at half height
    SemiPlanar { order: ChromaOrder },
    /// 4:2:0 with chroma rows sharing the luma stride; either two planes aligned to
    /// 16 rows or two half rows side by side
    Imc {
        order: ChromaOrder,
        side_by_side: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    pub family: LayoutFamily,
    pub planes: u8,
    pub min_stride: MinStride,
}

impl FormatDescriptor {
    const fn rgb(packing: RgbPacking, min_stride: MinStride) -> FormatDescriptor {
        FormatDescriptor {
            family: LayoutFamily::PackedRgb(packing),
            planes: 1,
            min_stride,
        }
    }

    const fn packed_yuv(layout: PackedYuvLayout, min_stride: MinStride) -> FormatDescriptor {
        FormatDescriptor {
            family: LayoutFamily::PackedYuv(layout),
            planes: 1,
            min_stride,
        }
    }

    const fn planar(h: usize, v: usize, order: ChromaOrder) -> FormatDescriptor {
        FormatDescriptor {
            family: LayoutFamily::Planar { h, v, order },
            planes: 3,
            min_stride: MinStride::Bits(8),
        }
    }

    const fn semi_planar(order: ChromaOrder) -> FormatDescriptor {
        FormatDescriptor {
            family: LayoutFamily::SemiPlanar { order },
            planes: 2,
            min_stride: MinStride::Bits(8),
        }
    }

    const fn imc(order: ChromaOrder, side_by_side: bool) -> FormatDescriptor {
        FormatDescriptor {
            family: LayoutFamily::Imc {
                order,
                side_by_side,
            },
            planes: 3,
            min_stride: MinStride::Bits(8),
        }
    }

    /// Minimum byte width of a row of the first plane.
    #[inline]
    pub const fn min_row_bytes(&self, width: usize) -> usize {
        self.min_stride.row_bytes(width)
    }

    #[inline]
    pub const fn palette_entries(&self) -> Option<usize> {
        match self.family {
            LayoutFamily::PackedRgb(packing) => packing.palette_entries(),
            _ => None,
        }
    }

    #[inline]
    pub const fn has_alpha(&self) -> bool {
        match self.family {
            LayoutFamily::PackedRgb(packing) => packing.has_alpha(),
            LayoutFamily::PackedYuv(layout) => layout.alpha.is_some(),
            _ => false,
        }
    }

    #[inline]
    pub const fn chroma_order(&self) -> Option<ChromaOrder> {
        match self.family {
            LayoutFamily::Planar { order, .. }
            | LayoutFamily::SemiPlanar { order }
            | LayoutFamily::Imc { order, .. } => Some(order),
            _ => None,
        }
    }

    /// Horizontal and vertical chroma decimation of multi-plane formats.
    #[inline]
    pub const fn chroma_decimation(&self) -> Option<(usize, usize)> {
        match self.family {
            LayoutFamily::Planar { h, v, .. } => Some((h, v)),
            LayoutFamily::SemiPlanar { .. } | LayoutFamily::Imc { .. } => Some((2, 2)),
            _ => None,
        }
    }

    /// Whether chroma plane bases are padded to a 16 row boundary.
    #[inline]
    pub const fn aligned_planes(&self) -> bool {
        matches!(
            self.family,
            LayoutFamily::Imc {
                side_by_side: false,
                ..
            }
        )
    }

    #[inline]
    pub const fn is_rgb(&self) -> bool {
        matches!(self.family, LayoutFamily::PackedRgb(_))
    }

    #[inline]
    pub const fn is_yuv(&self) -> bool {
        !matches!(
            self.family,
            LayoutFamily::PackedRgb(_) | LayoutFamily::Opaque
        )
    }
}
