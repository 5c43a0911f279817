use core::fmt;

use serde::{Deserialize, Serialize};

/// Encoding width of an instruction word.
///
/// RISC-V style ISAs mix 16-bit compressed encodings with 32-bit base
/// encodings, so both widths can appear in one architecture's catalog.
/// The width decides which error-mask set an instruction is simulated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EncodingWidth {
    /// 16-bit compressed encoding.
    Half,
    /// 32-bit base encoding.
    Word,
}

impl EncodingWidth {
    pub const ALL: [EncodingWidth; 2] = [EncodingWidth::Half, EncodingWidth::Word];

    /// Number of bits in an encoding of this width.
    pub fn bits(self) -> u32 {
        match self {
            EncodingWidth::Half => 16,
            EncodingWidth::Word => 32,
        }
    }

    /// Mask with every bit of the encoding set.
    pub fn full_mask(self) -> u32 {
        match self {
            EncodingWidth::Half => 0xffff,
            EncodingWidth::Word => 0xffff_ffff,
        }
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            16 => Some(EncodingWidth::Half),
            32 => Some(EncodingWidth::Word),
            _ => None,
        }
    }
}

impl TryFrom<u8> for EncodingWidth {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("unsupported encoding width: {} bits", bits))
    }
}

impl From<EncodingWidth> for u8 {
    fn from(width: EncodingWidth) -> u8 {
        width.bits() as u8
    }
}

impl fmt::Display for EncodingWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
