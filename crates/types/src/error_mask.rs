use core::fmt;

use serde::{Deserialize, Serialize};

/// Set of bit positions flipped by one simulated fault.
///
/// Bit `i` set means encoding bit `i` is inverted. The number of set bits
/// is the fault's distance (Hamming weight).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMask(pub u32);

impl ErrorMask {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of flipped bits.
    pub fn distance(self) -> u32 {
        self.0.count_ones()
    }

    /// Applies the fault to an encoding word.
    pub fn apply(self, word: u32) -> u32 {
        word ^ self.0
    }

    /// Decomposes the mask into its single-bit masks, lowest bit first.
    pub fn bits(self) -> SingleBits {
        SingleBits { rest: self.0 }
    }
}

impl From<u32> for ErrorMask {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for ErrorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorMask({:#b})", self.0)
    }
}

impl fmt::Display for ErrorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Iterator over the single-bit masks of an [`ErrorMask`].
#[derive(Debug, Clone)]
pub struct SingleBits {
    rest: u32,
}

impl Iterator for SingleBits {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.rest == 0 {
            return None;
        }
        // Isolate the lowest set bit, then clear it.
        let bit = self.rest & self.rest.wrapping_neg();
        self.rest ^= bit;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SingleBits {}
