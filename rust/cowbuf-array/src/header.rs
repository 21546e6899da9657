//! The shared allocation behind heap-backed arrays.

use crate::element::Element;
use crate::growth;
use crate::stats;

bitflags::bitflags! {
    /// Properties of the storage an [`ArrayData`](crate::ArrayData) refers to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ArrayFlags: u8 {
        /// The storage may be written once it is exclusively owned.
        const MUTABLE = 0x01;
        /// The storage was allocated by this crate and is freed with the last handle.
        const OWNS_MEMORY = 0x02;
        /// The array aliases caller-provided memory.
        const RAW_DATA = 0x04;
        /// The capacity was requested explicitly; detaching keeps it.
        const CAPACITY_RESERVED = 0x08;
    }
}

/// How the capacity of a new header relates to the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllocationOption {
    /// Exactly the requested capacity.
    KeepSize,
    /// The requested capacity plus amortized growth room.
    Grow,
}

/// A single heap allocation of array slots.
///
/// The allocation always holds one slot more than its capacity: the slot right
/// after the last logical element is the terminator and is kept at
/// [`Element::ZERO`] by every mutation. Reference counting is provided by the
/// `Arc` the header lives in.
pub(crate) struct Header<T> {
    flags: ArrayFlags,
    slots: Box<[T]>,
}

impl<T: Element> Header<T> {
    /// Allocates a zero-initialized header able to hold at least `capacity`
    /// elements (plus the terminator slot).
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the size in bytes is not representable.
    /// Allocation failure aborts the process via the global allocator.
    pub(crate) fn allocate(capacity: usize, option: AllocationOption) -> Header<T> {
        debug_assert!(capacity > 0);
        let element_size = std::mem::size_of::<T>();
        let capacity = match option {
            AllocationOption::KeepSize => {
                growth::block_size(capacity, element_size, element_size).map(|_| capacity)
            }
            AllocationOption::Grow => {
                growth::growing_block_size(capacity, element_size, element_size)
                    .map(|g| g.element_count)
            }
        }
        .unwrap_or_else(|| capacity_overflow());

        let slots = bytemuck::allocation::zeroed_slice_box::<T>(capacity + 1);
        stats::record_allocation(capacity);
        Header {
            flags: ArrayFlags::MUTABLE | ArrayFlags::OWNS_MEMORY,
            slots,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub(crate) fn flags(&self) -> ArrayFlags {
        self.flags
    }

    #[inline]
    pub(crate) fn set_flags(&mut self, flags: ArrayFlags) {
        self.flags = flags;
    }

    /// All slots, including the terminator slot.
    #[inline]
    pub(crate) fn slots(&self) -> &[T] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
