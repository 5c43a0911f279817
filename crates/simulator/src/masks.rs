use types::{EncodingWidth, ErrorMask};

use crate::error::ConfigError;

/// Widest encoding an error mask can describe.
pub const MAX_WIDTH: u32 = 32;

/// Ascending iterator over every `width`-bit mask with exactly `weight`
/// bits set.
///
/// Uses Gosper's hack: from one combination, the next larger integer with
/// the same population count is
/// `((((x + c) ^ x) >> 2) / c) | (x + c)` where `c` is the lowest set bit
/// of `x`. Arithmetic is done in `u64` so the step past the largest 32-bit
/// combination cannot overflow.
#[derive(Debug, Clone)]
pub struct FixedWeight {
    next: u64,
    end: u64,
}

impl FixedWeight {
    /// Fails for widths above [`MAX_WIDTH`].
    pub fn new(width: u32, weight: u32) -> Result<Self, ConfigError> {
        if width > MAX_WIDTH {
            return Err(ConfigError::UnsupportedWidth(width));
        }
        Ok(Self::within_limit(width, weight))
    }

    fn within_limit(width: u32, weight: u32) -> Self {
        let end = 1u64 << width;
        let next = if weight == 0 || weight > width {
            end
        } else {
            (1u64 << weight) - 1
        };
        Self { next, end }
    }
}

impl Iterator for FixedWeight {
    type Item = ErrorMask;

    fn next(&mut self) -> Option<ErrorMask> {
        if self.next >= self.end {
            return None;
        }
        let x = self.next;
        let c = x & x.wrapping_neg();
        let r = x + c;
        self.next = (((r ^ x) >> 2) / c) | r;
        Some(ErrorMask(x as u32))
    }
}

/// Every error mask of a `width`-bit encoding with 1 to `limit` flipped
/// bits, strictly ascending, each exactly once.
///
/// CONSTRUCTION: for each multiplicity `k` in `1..=limit` all `k`-bit
/// combinations are collected, then the combined set is sorted. For
/// `limit >= width` the result is every non-zero `width`-bit value.
///
/// SIZE: the count is `sum(C(width, k))` for `k <= limit`; for a 32-bit
/// encoding and `limit = 3` that is 5488 masks.
///
/// Widths above [`MAX_WIDTH`] are rejected with
/// [`ConfigError::UnsupportedWidth`].
pub fn error_masks(width: u32, limit: u32) -> Result<Vec<ErrorMask>, ConfigError> {
    if width > MAX_WIDTH {
        return Err(ConfigError::UnsupportedWidth(width));
    }
    Ok(collect_masks(width, limit))
}

/// Mask set for one of the supported encoding widths.
pub fn masks_for(width: EncodingWidth, limit: u32) -> Vec<ErrorMask> {
    collect_masks(width.bits(), limit)
}

fn collect_masks(width: u32, limit: u32) -> Vec<ErrorMask> {
    let mut masks: Vec<ErrorMask> = (1..=limit.min(width))
        .flat_map(|k| FixedWeight::within_limit(width, k))
        .collect();
    masks.sort_unstable();
    masks
}

/// Error-mask sets for every encoding width, generated once per run and
/// shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct MaskTable {
    limit: u32,
    half: Vec<ErrorMask>,
    word: Vec<ErrorMask>,
}

impl MaskTable {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            half: masks_for(EncodingWidth::Half, limit),
            word: masks_for(EncodingWidth::Word, limit),
        }
    }

    /// Maximum fault multiplicity the table was built for.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn for_width(&self, width: EncodingWidth) -> &[ErrorMask] {
        match width {
            EncodingWidth::Half => &self.half,
            EncodingWidth::Word => &self.word,
        }
    }
}
