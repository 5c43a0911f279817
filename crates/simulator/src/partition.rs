use std::ops::Range;

/// Range of partition `index` when `len` items are split into `parts`
/// contiguous partitions.
///
/// With `k = len / parts` and `m = len % parts`, partition `i` covers
/// `i*k + min(i, m) .. (i+1)*k + min(i+1, m)`: the first `m` partitions
/// hold `k + 1` items, the rest `k`. Partitions are disjoint and in order,
/// so their concatenation is exactly `0..len`. When `parts > len` the
/// trailing partitions are empty.
///
/// RETURNS: `None` if `parts == 0` or `index >= parts`.
pub fn partition_range(len: usize, parts: usize, index: usize) -> Option<Range<usize>> {
    if parts == 0 || index >= parts {
        return None;
    }
    let k = len / parts;
    let m = len % parts;
    let start = index * k + index.min(m);
    let end = (index + 1) * k + (index + 1).min(m);
    Some(start..end)
}

/// All `parts` partition ranges of `len` items, in partition order.
pub fn partition_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    (0..parts)
        .filter_map(|i| partition_range(len, parts, i))
        .collect()
}

/// Splits `items` into `parts` contiguous sub-slices.
pub fn split<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    partition_ranges(items.len(), parts)
        .into_iter()
        .map(|r| &items[r])
        .collect()
}
