//! Allocation size arithmetic for array storage.
//!
//! Both functions work in bytes and never wrap: any multiplication or addition
//! that would exceed [`MAX_ALLOC_SIZE`] is reported as `None`, leaving it to the
//! caller to decide how fatal that is.

/// The largest allocation (in bytes) the global allocator can be asked for.
pub const MAX_ALLOC_SIZE: usize = isize::MAX as usize;

/// Blocks at or above this size grow by half their size instead of doubling.
pub const LARGE_BLOCK_THRESHOLD: usize = 1 << 26;

/// The outcome of [`growing_block_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowingBlockSize {
    /// Total block size in bytes, including `header_size`.
    pub size: usize,
    /// Number of elements that fit into the block after the header.
    pub element_count: usize,
}

/// Computes the exact size in bytes of a block holding `element_count`
/// elements of `element_size` bytes each, plus `header_size` bytes of
/// metadata.
///
/// Requesting zero elements yields a zero-sized block (nothing is allocated).
///
/// # Returns
///
/// `None` if the computation overflows or exceeds [`MAX_ALLOC_SIZE`].
///
/// # Examples
///
/// ```
/// use cowbuf_array::growth::block_size;
///
/// assert_eq!(block_size(0, 2, 2), Some(0));
/// assert_eq!(block_size(10, 2, 2), Some(22));
/// assert_eq!(block_size(usize::MAX, 2, 0), None);
/// ```
#[inline]
pub fn block_size(element_count: usize, element_size: usize, header_size: usize) -> Option<usize> {
    debug_assert_ne!(element_size, 0);
    if element_count == 0 {
        return Some(0);
    }
    let bytes = element_size
        .checked_mul(element_count)?
        .checked_add(header_size)?;
    (bytes <= MAX_ALLOC_SIZE).then_some(bytes)
}

/// Computes the size of a block able to hold at least `element_count`
/// elements, with extra room so that repeated appends are amortized O(1).
///
/// Growth policy:
/// - below [`LARGE_BLOCK_THRESHOLD`] the block is rounded to the next power of
///   two strictly greater than the exact size;
/// - above it the block grows by half of its exact size;
/// - when either would exceed [`MAX_ALLOC_SIZE`], the block grows by half of
///   the distance that remains to the limit, so growth keeps succeeding with
///   shrinking steps until the limit itself is reached.
///
/// # Returns
///
/// `None` if the exact size already overflows; see [`block_size`].
///
/// # Examples
///
/// ```
/// use cowbuf_array::growth::growing_block_size;
///
/// let grown = growing_block_size(5, 2, 2).unwrap();
/// assert_eq!(grown.size, 16);
/// assert_eq!(grown.element_count, 7);
/// ```
pub fn growing_block_size(
    element_count: usize,
    element_size: usize,
    header_size: usize,
) -> Option<GrowingBlockSize> {
    let bytes = block_size(element_count, element_size, header_size)?;
    if bytes == 0 {
        return Some(GrowingBlockSize {
            size: 0,
            element_count: 0,
        });
    }

    let grown = grow_bytes(bytes);
    let element_count = (grown - header_size) / element_size;
    Some(GrowingBlockSize {
        size: element_count * element_size + header_size,
        element_count,
    })
}

/// Returns the grown block size for an exact size of `bytes`.
///
/// `bytes` must not exceed [`MAX_ALLOC_SIZE`]; the result never does either.
#[inline]
fn grow_bytes(bytes: usize) -> usize {
    debug_assert!(bytes <= MAX_ALLOC_SIZE);
    let more = if bytes < LARGE_BLOCK_THRESHOLD {
        (bytes + 1).next_power_of_two()
    } else {
        bytes.saturating_add(bytes / 2)
    };
    if more > MAX_ALLOC_SIZE {
        bytes + (MAX_ALLOC_SIZE - bytes).div_ceil(2)
    } else {
        more
    }
}
