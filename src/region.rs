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
use crate::format::{ChromaOrder, PackedYuvLayout, PixelFormat};
use crate::frame_error::{check_buffer_len, FrameError, MismatchedSize};
use crate::palette::Palette;
use std::ops::Range;

/// Names a plane inside a [Region].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneId {
    /// The only plane of packed formats, luma of planar ones
    Primary,
    U,
    V,
    /// Interleaved chroma of semi-planar formats
    Chroma,
}

/// Placement of one plane slice in a frame buffer.
///
/// Row `r` of the slice starts at `offset + r * stride`; a negative stride walks a
/// bottom-up buffer in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaneRegion {
    pub offset: usize,
    pub stride: isize,
    /// Samples per row, pixels for the primary plane and chroma samples otherwise.
    pub width: usize,
    pub rows: usize,
    /// Bytes of a row that belong to the image.
    pub row_bytes: usize,
}

impl PlaneRegion {
    #[inline]
    pub fn row_start(&self, row: usize) -> Option<usize> {
        let step = isize::try_from(row).ok()?.checked_mul(self.stride)?;
        self.offset.checked_add_signed(step)
    }

    #[inline]
    pub fn row_range(&self, row: usize) -> Option<Range<usize>> {
        if row >= self.rows {
            return None;
        }
        let start = self.row_start(row)?;
        Some(start..start.checked_add(self.row_bytes)?)
    }

    /// Smallest byte range holding every row of the slice.
    pub fn span(&self) -> Option<Range<usize>> {
        if self.rows == 0 || self.row_bytes == 0 {
            return None;
        }
        let first = self.row_start(0)?;
        let last = self.row_start(self.rows - 1)?;
        Some(first.min(last)..first.max(last).checked_add(self.row_bytes)?)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChromaRegion {
    None,
    Planar { u: PlaneRegion, v: PlaneRegion },
    Interleaved { uv: PlaneRegion, order: ChromaOrder },
}

/// Everything one worker needs to touch its share of one frame.
///
/// A region holds offsets, never addresses. It is bound to a buffer through
/// [FrameView] or [FrameViewMut].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub format: PixelFormat,
    pub thread_index: usize,
    pub width: usize,
    /// Rows of this slice.
    pub height: usize,
    pub flipped: bool,
    pub primary: PlaneRegion,
    pub chroma: ChromaRegion,
    /// Resolved color table of indexed formats.
    pub palette: Option<Palette>,
    /// Valid pixels in the last byte of an indexed row, zero when the row ends on a byte.
    pub remainder: usize,
    pub sample_layout: Option<PackedYuvLayout>,
}

impl Region {
    pub fn plane(&self, plane: PlaneId) -> Option<&PlaneRegion> {
        match (plane, &self.chroma) {
            (PlaneId::Primary, _) => Some(&self.primary),
            (PlaneId::U, ChromaRegion::Planar { u, .. }) => Some(u),
            (PlaneId::V, ChromaRegion::Planar { v, .. }) => Some(v),
            (PlaneId::Chroma, ChromaRegion::Interleaved { uv, .. }) => Some(uv),
            _ => None,
        }
    }

    /// Every plane of the region, primary first.
    pub fn planes(&self) -> [Option<(PlaneId, PlaneRegion)>; 3] {
        match self.chroma {
            ChromaRegion::None => [Some((PlaneId::Primary, self.primary)), None, None],
            ChromaRegion::Planar { u, v } => [
                Some((PlaneId::Primary, self.primary)),
                Some((PlaneId::U, u)),
                Some((PlaneId::V, v)),
            ],
            ChromaRegion::Interleaved { uv, .. } => [
                Some((PlaneId::Primary, self.primary)),
                Some((PlaneId::Chroma, uv)),
                None,
            ],
        }
    }

    /// Chroma samples per row and chroma rows of this slice.
    pub fn chroma_size(&self) -> Option<(usize, usize)> {
        match self.chroma {
            ChromaRegion::None => None,
            ChromaRegion::Planar { u, .. } => Some((u.width, u.rows)),
            ChromaRegion::Interleaved { uv, .. } => Some((uv.width, uv.rows)),
        }
    }

    pub fn row_range(&self, plane: PlaneId, row: usize) -> Result<Range<usize>, FrameError> {
        self.plane(plane)
            .and_then(|p| p.row_range(row))
            .ok_or(FrameError::RowOutOfBounds { plane, row })
    }

    /// Byte ranges touched by this region, sorted, with overlapping planes merged.
    ///
    /// Side by side chroma rows interleave in memory and collapse into one range.
    pub fn spans(&self) -> [Option<Range<usize>>; 3] {
        let mut ranges: [Option<Range<usize>>; 3] = [None, None, None];
        let mut count = 0usize;
        for (_, plane) in self.planes().into_iter().flatten() {
            if let Some(span) = plane.span() {
                ranges[count] = Some(span);
                count += 1;
            }
        }
        ranges[..count].sort_by_key(|r| r.as_ref().map(|r| r.start));

        let mut merged: [Option<Range<usize>>; 3] = [None, None, None];
        let mut merged_count = 0usize;
        for range in ranges.into_iter().flatten() {
            if merged_count > 0 {
                if let Some(last) = merged[merged_count - 1].as_mut() {
                    if range.start < last.end {
                        last.end = last.end.max(range.end);
                        continue;
                    }
                }
            }
            merged[merged_count] = Some(range);
            merged_count += 1;
        }
        merged
    }

    /// Checks that every plane holds the bytes the format needs for `width` samples
    /// and that the primary plane covers all `height` rows.
    pub fn check_geometry(&self) -> Result<(), FrameError> {
        let min_row_bytes = self.format.descriptor().min_row_bytes(self.width);
        if self.primary.row_bytes < min_row_bytes {
            return Err(FrameError::BufferTooSmall(MismatchedSize {
                expected: min_row_bytes,
                received: self.primary.row_bytes,
            }));
        }
        if self.primary.rows < self.height {
            return Err(FrameError::PlaneMismatch(PlaneId::Primary));
        }
        match self.chroma {
            ChromaRegion::None => {}
            ChromaRegion::Planar { u, v } => {
                if u.row_bytes < u.width {
                    return Err(FrameError::PlaneMismatch(PlaneId::U));
                }
                if v.row_bytes < v.width {
                    return Err(FrameError::PlaneMismatch(PlaneId::V));
                }
            }
            ChromaRegion::Interleaved { uv, .. } => {
                if uv.row_bytes < uv.width.saturating_mul(2) {
                    return Err(FrameError::PlaneMismatch(PlaneId::Chroma));
                }
            }
        }
        Ok(())
    }

    /// Bytes a buffer must have for every row of this region to fit.
    pub fn required_len(&self) -> Result<usize, FrameError> {
        let mut required = 0usize;
        for (_, plane) in self.planes().into_iter().flatten() {
            if plane.rows == 0 || plane.row_bytes == 0 {
                continue;
            }
            let span = plane.span().ok_or(FrameError::PointerOverflow)?;
            required = required.max(span.end);
        }
        Ok(required)
    }
}

/// Read-only binding of a [Region] to a frame buffer.
#[derive(Debug, Copy, Clone)]
pub struct FrameView<'a> {
    data: &'a [u8],
    region: &'a Region,
}

impl<'a> FrameView<'a> {
    pub fn new(data: &'a [u8], region: &'a Region) -> Result<FrameView<'a>, FrameError> {
        region.check_geometry()?;
        check_buffer_len(region.required_len()?, data.len())?;
        Ok(FrameView { data, region })
    }

    #[inline]
    pub fn region(&self) -> &'a Region {
        self.region
    }

    #[inline]
    pub fn row(&self, plane: PlaneId, row: usize) -> Result<&'a [u8], FrameError> {
        let range = self.region.row_range(plane, row)?;
        self.data
            .get(range)
            .ok_or(FrameError::RowOutOfBounds { plane, row })
    }
}

#[derive(Debug)]
struct Span<'a> {
    start: usize,
    data: &'a mut [u8],
}

/// Mutable binding of a [Region] to a frame buffer, or to the disjoint parts of one
/// handed out by [split_frame_mut].
#[derive(Debug)]
pub struct FrameViewMut<'a> {
    spans: [Option<Span<'a>>; 3],
    region: &'a Region,
}

impl<'a> FrameViewMut<'a> {
    pub fn new(data: &'a mut [u8], region: &'a Region) -> Result<FrameViewMut<'a>, FrameError> {
        region.check_geometry()?;
        check_buffer_len(region.required_len()?, data.len())?;
        Ok(FrameViewMut {
            spans: [Some(Span { start: 0, data }), None, None],
            region,
        })
    }

    #[inline]
    pub fn region(&self) -> &'a Region {
        self.region
    }

    pub fn row(&self, plane: PlaneId, row: usize) -> Result<&[u8], FrameError> {
        let range = self.region.row_range(plane, row)?;
        for span in self.spans.iter().flatten() {
            if range.start >= span.start && range.end <= span.start + span.data.len() {
                return Ok(&span.data[range.start - span.start..range.end - span.start]);
            }
        }
        Err(FrameError::RowOutOfBounds { plane, row })
    }

    pub fn row_mut(&mut self, plane: PlaneId, row: usize) -> Result<&mut [u8], FrameError> {
        let range = self.region.row_range(plane, row)?;
        for span in self.spans.iter_mut().flatten() {
            if range.start >= span.start && range.end <= span.start + span.data.len() {
                return Ok(&mut span.data[range.start - span.start..range.end - span.start]);
            }
        }
        Err(FrameError::RowOutOfBounds { plane, row })
    }
}

/// Splits one frame buffer into one mutable view per region.
///
/// Fails with [FrameError::OverlappingRegions] if any two regions share a byte, so the
/// returned views can be moved to different workers and written concurrently.
pub fn split_frame_mut<'a>(
    buffer: &'a mut [u8],
    regions: &'a [Region],
) -> Result<Vec<FrameViewMut<'a>>, FrameError> {
    let mut spans: Vec<(usize, usize, Range<usize>)> = Vec::with_capacity(regions.len() * 3);
    for (index, region) in regions.iter().enumerate() {
        region.check_geometry()?;
        for (slot, span) in region.spans().into_iter().enumerate() {
            if let Some(span) = span {
                if span.end > buffer.len() {
                    return Err(FrameError::BufferTooSmall(MismatchedSize {
                        expected: span.end,
                        received: buffer.len(),
                    }));
                }
                spans.push((index, slot, span));
            }
        }
    }
    spans.sort_by_key(|(_, _, range)| range.start);
    for pair in spans.windows(2) {
        if pair[1].2.start < pair[0].2.end {
            log::debug!(
                "regions {} and {} overlap at bytes {:?} and {:?}",
                pair[0].0,
                pair[1].0,
                pair[0].2,
                pair[1].2
            );
            return Err(FrameError::OverlappingRegions {
                first: pair[0].0.min(pair[1].0),
                second: pair[0].0.max(pair[1].0),
            });
        }
    }

    let mut views: Vec<FrameViewMut<'a>> = regions
        .iter()
        .map(|region| FrameViewMut {
            spans: [None, None, None],
            region,
        })
        .collect();

    let span_count = spans.len();
    let mut rest: &'a mut [u8] = buffer;
    let mut cursor = 0usize;
    for (index, slot, range) in spans {
        let taken = std::mem::take(&mut rest);
        let (_, tail) = taken.split_at_mut(range.start - cursor);
        let (chunk, tail) = tail.split_at_mut(range.end - range.start);
        views[index].spans[slot] = Some(Span {
            start: range.start,
            data: chunk,
        });
        rest = tail;
        cursor = range.end;
    }

    log::debug!(
        "split frame of {} regions into {} disjoint spans",
        regions.len(),
        span_count
    );
    Ok(views)
}
