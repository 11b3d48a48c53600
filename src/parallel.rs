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
use crate::convert::convert;
use crate::fill::{fill, FillColor};
use crate::frame_error::{FrameError, MismatchedSize};
use crate::region::{split_frame_mut, FrameView, Region};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::IntoParallelRefIterator;

/// Converts every slice of a frame, pairing `src_regions[i]` with `dst_regions[i]`.
///
/// With the `rayon` feature the slices run inside the rayon pool the caller is
/// currently in, otherwise one after another on the calling thread. No thread is
/// ever created here.
pub fn convert_parallel(
    src: &[u8],
    src_regions: &[Region],
    dst: &mut [u8],
    dst_regions: &[Region],
) -> Result<(), FrameError> {
    if src_regions.len() != dst_regions.len() {
        return Err(FrameError::RegionCountMismatch(MismatchedSize {
            expected: src_regions.len(),
            received: dst_regions.len(),
        }));
    }
    let views = split_frame_mut(dst, dst_regions)?;

    #[allow(unused_mut)]
    let mut iter;
    #[cfg(feature = "rayon")]
    {
        iter = views.into_par_iter().zip(src_regions.par_iter());
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = views.into_iter().zip(src_regions.iter());
    }

    iter.try_for_each(|(mut dst_view, src_region)| {
        let src_view = FrameView::new(src, src_region)?;
        convert(&src_view, &mut dst_view)
    })
}

/// Fills every slice of a frame with `color`, see [convert_parallel] for scheduling.
pub fn fill_parallel(
    color: FillColor,
    dst: &mut [u8],
    dst_regions: &[Region],
) -> Result<(), FrameError> {
    let views = split_frame_mut(dst, dst_regions)?;

    #[allow(unused_mut)]
    let mut iter;
    #[cfg(feature = "rayon")]
    {
        iter = views.into_par_iter();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = views.into_iter();
    }

    iter.try_for_each(|mut view| fill(color, &mut view))
}
