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
use crate::format::PixelFormat;
use crate::region::PlaneId;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Every contract violation the partitioner, the views and the kernels can detect.
///
/// All of them are reported before any byte of a frame buffer is touched.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FrameError {
    ZeroBaseSize,
    ZeroThreadCount,
    ThreadIndexOutOfRange { index: u32, count: u32 },
    EmptyChromaPlane(PixelFormat),
    PointerOverflow,
    BufferTooSmall(MismatchedSize),
    RowOutOfBounds { plane: PlaneId, row: usize },
    OverlappingRegions { first: usize, second: usize },
    RegionCountMismatch(MismatchedSize),
    DimensionMismatch { source: (usize, usize), destination: (usize, usize) },
    PlaneMismatch(PlaneId),
    PaletteNotSupported(PixelFormat),
    PaletteTooShort(MismatchedSize),
    PaletteIndexOutOfRange { index: u8, entries: usize },
    ColorMismatch(PixelFormat),
    UnsupportedFormat(PixelFormat),
    UnsupportedConversion { from: PixelFormat, to: PixelFormat },
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            FrameError::ZeroThreadCount => f.write_str("Thread count must be at least 1"),
            FrameError::ThreadIndexOutOfRange { index, count } => f.write_fmt(format_args!(
                "Thread index {} is out of range for {} threads",
                index, count
            )),
            FrameError::EmptyChromaPlane(format) => f.write_fmt(format_args!(
                "Frame is too small to hold a chroma plane for {}",
                format
            )),
            FrameError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            FrameError::BufferTooSmall(size) => f.write_fmt(format_args!(
                "Buffer must have size at least {} but it is {}",
                size.expected, size.received
            )),
            FrameError::RowOutOfBounds { plane, row } => f.write_fmt(format_args!(
                "Row {} of {:?} plane lies outside of the buffer",
                row, plane
            )),
            FrameError::OverlappingRegions { first, second } => f.write_fmt(format_args!(
                "Regions {} and {} reference overlapping bytes",
                first, second
            )),
            FrameError::RegionCountMismatch(size) => f.write_fmt(format_args!(
                "Expected {} destination regions, but there are {}",
                size.expected, size.received
            )),
            FrameError::DimensionMismatch {
                source,
                destination,
            } => f.write_fmt(format_args!(
                "Source is {}x{} but destination is {}x{}",
                source.0, source.1, destination.0, destination.1
            )),
            FrameError::PlaneMismatch(plane) => f.write_fmt(format_args!(
                "{:?} plane extents of source and destination differ",
                plane
            )),
            FrameError::PaletteNotSupported(format) => {
                f.write_fmt(format_args!("{} does not take a palette", format))
            }
            FrameError::PaletteTooShort(size) => f.write_fmt(format_args!(
                "Palette must have at least {} entries, but it has {}",
                size.expected, size.received
            )),
            FrameError::PaletteIndexOutOfRange { index, entries } => f.write_fmt(format_args!(
                "Palette index {} is out of range for {} entries",
                index, entries
            )),
            FrameError::ColorMismatch(format) => f.write_fmt(format_args!(
                "Fill color kind does not match {}",
                format
            )),
            FrameError::UnsupportedFormat(format) => {
                f.write_fmt(format_args!("{} has no sample layout", format))
            }
            FrameError::UnsupportedConversion { from, to } => f.write_fmt(format_args!(
                "Conversion from {} to {} is not supported",
                from, to
            )),
        }
    }
}

impl Error for FrameError {}

#[inline]
pub(crate) fn checked_mul(v0: usize, v1: usize) -> Result<usize, FrameError> {
    v0.checked_mul(v1).ok_or(FrameError::PointerOverflow)
}

#[inline]
pub(crate) fn checked_add(v0: usize, v1: usize) -> Result<usize, FrameError> {
    v0.checked_add(v1).ok_or(FrameError::PointerOverflow)
}

#[inline]
pub(crate) fn check_buffer_len(required: usize, received: usize) -> Result<(), FrameError> {
    if required > received {
        return Err(FrameError::BufferTooSmall(MismatchedSize {
            expected: required,
            received,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(checked_mul(usize::MAX, 2), Err(FrameError::PointerOverflow));
        assert_eq!(checked_add(usize::MAX, 1), Err(FrameError::PointerOverflow));
        assert_eq!(checked_mul(3, 4), Ok(12));
    }

    #[test]
    fn test_buffer_len_message() {
        let err = check_buffer_len(100, 64).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Buffer must have size at least 100 but it is 64"
        );
        assert!(check_buffer_len(64, 64).is_ok());
    }
}
