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
/// One palette slot, stored in the blue, green, red, alpha order of a DIB color table.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub alpha: u8,
}

impl PaletteEntry {
    pub const fn new(red: u8, green: u8, blue: u8) -> PaletteEntry {
        PaletteEntry {
            blue,
            green,
            red,
            alpha: 0xFF,
        }
    }
}

/// Color table for the indexed formats, up to 256 entries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Palette {
    entries: [PaletteEntry; 256],
    len: usize,
}

impl Palette {
    /// Builds a palette from the first 256 entries of `entries`.
    pub fn new(entries: &[PaletteEntry]) -> Palette {
        let len = entries.len().min(256);
        let mut table = [PaletteEntry::default(); 256];
        table[..len].copy_from_slice(&entries[..len]);
        Palette {
            entries: table,
            len,
        }
    }

    /// Evenly spaced grey ramp with `1 << bits` entries, black to white.
    ///
    /// This is what indexed frames use when the caller does not provide a palette.
    pub fn greyscale(bits: u8) -> Palette {
        let len = 1usize << bits.clamp(1, 8);
        let mut table = [PaletteEntry::default(); 256];
        for (index, entry) in table.iter_mut().take(len).enumerate() {
            let level = (index * 255 / (len - 1)) as u8;
            *entry = PaletteEntry::new(level, level, level);
        }
        Palette {
            entries: table,
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries[..self.len]
    }

    /// Entry for `index`. Indices past `len()` read as zeroed entries.
    #[inline(always)]
    pub fn lookup(&self, index: u8) -> PaletteEntry {
        self.entries[index as usize]
    }
}
