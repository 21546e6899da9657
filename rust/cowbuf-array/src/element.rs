//! Element types that can be stored in an [`ArrayData`](crate::ArrayData).

use std::fmt::Debug;
use std::hash::Hash;

/// A fixed-width code unit stored by value in array storage.
///
/// Elements are plain bytes (`bytemuck::Pod`), so storage can be zero-initialized,
/// copied with `memcpy` semantics and shared across threads. The zero value
/// doubles as the terminator written after the last logical element.
pub trait Element: bytemuck::Pod + Eq + Ord + Hash + Debug + Default + Send + Sync {
    /// The terminator value.
    const ZERO: Self;

    /// A single terminator slot with static lifetime; empty arrays point here
    /// instead of allocating.
    const TERMINATED_EMPTY: &'static [Self];
}

impl Element for u8 {
    const ZERO: u8 = 0;
    const TERMINATED_EMPTY: &'static [u8] = &[0];
}

impl Element for u16 {
    const ZERO: u16 = 0;
    const TERMINATED_EMPTY: &'static [u16] = &[0];
}

impl Element for u32 {
    const ZERO: u32 = 0;
    const TERMINATED_EMPTY: &'static [u32] = &[0];
}
