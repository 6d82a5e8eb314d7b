// This program is free software; you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation; either version 2 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA
// 02110-1301, USA.

use bit_vec::BitVec;

use crate::error::{Error, Result};

/// A BitArray is a fixed length bit vector whose accessors refuse,
/// rather than wrap, positions past its end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec,
}

impl BitArray {

    /// Create a BitArray of `len` bits, all unset.
    pub fn new(len: usize) -> BitArray {
        BitArray {
            bits: BitVec::from_elem(len, false),
        }
    }

    /// Get the number of bits in this BitArray
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Set the bit at `pos`.  Setting an already set bit is a no-op.
    ///
    /// # Errors
    ///
    /// `InternalError` if `pos` is not below `len()`
    pub fn set(&mut self, pos: usize) -> Result<()> {
        self.check(pos)?;
        self.bits.set(pos, true);
        Ok(())
    }

    /// Test the bit at `pos`.
    ///
    /// # Errors
    ///
    /// `InternalError` if `pos` is not below `len()`
    pub fn test(&self, pos: usize) -> Result<bool> {
        self.bits
            .get(pos)
            .ok_or_else(|| Error::out_of_range("bit position", pos as u64, self.len() as u64))
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| *b).count()
    }

    /// Unset every bit
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    fn check(&self, pos: usize) -> Result<()> {
        if pos < self.bits.len() {
            Ok(())
        } else {
            Err(Error::out_of_range("bit position", pos as u64, self.bits.len() as u64))
        }
    }
}
