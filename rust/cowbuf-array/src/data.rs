//! The array handle: shared, copy-on-write storage with slack at both ends.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::ptr::NonNull;
use std::sync::Arc;

use crate::element::Element;
use crate::header::{AllocationOption, ArrayFlags, Header, capacity_overflow};
use crate::stats;

/// A growable array of code units with shared, copy-on-write storage.
///
/// `ArrayData` refers to one of:
/// - a reference-counted heap allocation ([`Header`]) shared by every clone of
///   the handle, with the live elements somewhere inside it. The unused slots
///   before the first element ("prepend slack") and after the last one
///   ("append slack") let both ends grow without moving the content;
/// - static or caller-provided memory ("foreign" storage), aliased without any
///   allocation.
///
/// Cloning never copies elements. Every mutation first makes sure the handle
/// owns its allocation exclusively ("detach"), copying the content into a
/// private allocation when the storage is shared or foreign. Mutable access to
/// the elements is only handed out after that has happened.
///
/// The slot after the last element of a heap allocation always holds
/// [`Element::ZERO`].
#[derive(Clone)]
pub struct ArrayData<T: Element> {
    pub(crate) repr: Repr<T>,
    pub(crate) len: usize,
}

#[derive(Clone)]
pub(crate) enum Repr<T> {
    Heap {
        header: Arc<Header<T>>,
        offset: usize,
    },
    Foreign {
        ptr: NonNull<T>,
        kind: ForeignKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ForeignKind {
    /// Memory with static lifetime, including the shared empty array.
    Static,
    /// Caller-provided memory, see [`ArrayData::from_raw_data`].
    Raw,
}

/// The end of the allocation that is about to receive new elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GrowthPosition {
    AtBeginning,
    AtEnd,
}

// SAFETY: elements are `Pod + Send + Sync`. Heap storage is reference counted
// by `Arc` and only written while exclusively owned. Foreign storage is never
// written through the handle.
unsafe impl<T: Element> Send for ArrayData<T> {}

// SAFETY: see `Send`; shared access only ever reads.
unsafe impl<T: Element> Sync for ArrayData<T> {}

impl<T: Element> ArrayData<T> {
    /// Creates an empty array. Does not allocate.
    pub fn new() -> ArrayData<T> {
        ArrayData {
            repr: Repr::Foreign {
                ptr: static_ptr(T::TERMINATED_EMPTY),
                kind: ForeignKind::Static,
            },
            len: 0,
        }
    }

    /// Creates an empty array with room for at least `capacity` elements.
    ///
    /// The capacity is marked as reserved: detaching keeps it.
    pub fn with_capacity(capacity: usize) -> ArrayData<T> {
        if capacity == 0 {
            return ArrayData::new();
        }
        let mut header = Header::allocate(capacity, AllocationOption::KeepSize);
        header.set_flags(header.flags() | ArrayFlags::CAPACITY_RESERVED);
        ArrayData {
            repr: Repr::Heap {
                header: Arc::new(header),
                offset: 0,
            },
            len: 0,
        }
    }

    /// Creates an array holding a copy of `data`, with no slack.
    pub fn from_slice(data: &[T]) -> ArrayData<T> {
        if data.is_empty() {
            return ArrayData::new();
        }
        let mut header = Header::allocate(data.len(), AllocationOption::KeepSize);
        header.slots_mut()[..data.len()].copy_from_slice(data);
        ArrayData {
            repr: Repr::Heap {
                header: Arc::new(header),
                offset: 0,
            },
            len: data.len(),
        }
    }

    /// Creates an array of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> ArrayData<T> {
        let mut array = ArrayData::new();
        array.resize_with_value(len, value);
        array
    }

    /// Creates an array viewing static data. Does not allocate.
    ///
    /// The first mutation copies the data into a private allocation.
    pub fn from_static(data: &'static [T]) -> ArrayData<T> {
        ArrayData {
            repr: Repr::Foreign {
                ptr: static_ptr(data),
                kind: ForeignKind::Static,
            },
            len: data.len(),
        }
    }

    /// Creates an array viewing `len` elements at `ptr` without copying them.
    ///
    /// The view makes no terminator guarantee. The first mutation of the
    /// returned handle (or of any clone or sub-view of it) copies the elements
    /// into a private allocation; from then on that handle no longer refers to
    /// `ptr`.
    ///
    /// # Safety
    ///
    /// - `ptr` must be valid for reads of `len` elements, or `len` must be zero;
    /// - the memory must not be written and must stay alive for as long as the
    ///   returned handle, or any handle cloned or sliced from it, still refers
    ///   to it (that is, has not been mutated or dropped).
    pub unsafe fn from_raw_data(ptr: *const T, len: usize) -> ArrayData<T> {
        match NonNull::new(ptr as *mut T) {
            Some(ptr) => ArrayData {
                repr: Repr::Foreign {
                    ptr,
                    kind: ForeignKind::Raw,
                },
                len,
            },
            None => {
                assert_eq!(len, 0, "null pointer with non-zero length");
                ArrayData::new()
            }
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of element slots of the allocation, including the
    /// slack at both ends. Foreign storage has no capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Heap { header, .. } => header.capacity(),
            Repr::Foreign { .. } => 0,
        }
    }

    /// Returns the number of unused slots before the first element.
    #[inline]
    pub fn free_space_at_begin(&self) -> usize {
        match &self.repr {
            Repr::Heap { offset, .. } => *offset,
            Repr::Foreign { .. } => 0,
        }
    }

    /// Returns the number of unused slots after the last element.
    #[inline]
    pub fn free_space_at_end(&self) -> usize {
        match &self.repr {
            Repr::Heap { header, offset } => header.capacity() - offset - self.len,
            Repr::Foreign { .. } => 0,
        }
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.repr {
            Repr::Heap { header, offset } => &header.slots()[*offset..*offset + self.len],
            // SAFETY: foreign storage is valid for `len` reads, see the constructors.
            Repr::Foreign { ptr, .. } => unsafe {
                std::slice::from_raw_parts(ptr.as_ptr(), self.len)
            },
        }
    }

    /// Returns a pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).copied()
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<T> {
        self.as_slice().first().copied()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<T> {
        self.as_slice().last().copied()
    }

    /// Returns the flags of the storage this handle refers to.
    pub fn flags(&self) -> ArrayFlags {
        match &self.repr {
            Repr::Heap { header, .. } => header.flags(),
            Repr::Foreign {
                kind: ForeignKind::Static,
                ..
            } => ArrayFlags::empty(),
            Repr::Foreign {
                kind: ForeignKind::Raw,
                ..
            } => ArrayFlags::RAW_DATA,
        }
    }

    /// Returns the number of handles sharing this handle's allocation, or `0`
    /// for foreign storage.
    pub fn ref_count(&self) -> usize {
        match &self.repr {
            Repr::Heap { header, .. } => Arc::strong_count(header),
            Repr::Foreign { .. } => 0,
        }
    }

    /// Returns `true` if the allocation is shared with another handle.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    /// Returns `true` if this handle exclusively owns a heap allocation and can
    /// therefore be mutated in place.
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.ref_count() == 1
    }

    /// Returns `true` if this handle aliases caller-provided memory.
    #[inline]
    pub fn is_raw_data(&self) -> bool {
        matches!(
            self.repr,
            Repr::Foreign {
                kind: ForeignKind::Raw,
                ..
            }
        )
    }

    /// Returns `true` if this handle views static memory (this includes the
    /// empty array).
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(
            self.repr,
            Repr::Foreign {
                kind: ForeignKind::Static,
                ..
            }
        )
    }

    /// Returns `true` if both handles refer to the same storage, without
    /// comparing elements.
    pub fn is_shared_with(&self, other: &ArrayData<T>) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Heap { header: a, .. }, Repr::Heap { header: b, .. }) => Arc::ptr_eq(a, b),
            (Repr::Foreign { ptr: a, .. }, Repr::Foreign { ptr: b, .. }) => {
                a == b && self.len == other.len
            }
            _ => false,
        }
    }

    /// Returns the element stored right after the last one if the storage
    /// guarantees one, that is for heap storage and for the empty array.
    pub fn terminator(&self) -> Option<T> {
        match &self.repr {
            Repr::Heap { header, offset } => Some(header.slots()[offset + self.len]),
            Repr::Foreign {
                kind: ForeignKind::Static,
                ..
            } if self.len == 0 => Some(T::ZERO),
            Repr::Foreign { .. } => None,
        }
    }

    /// Returns the elements followed by a terminating [`Element::ZERO`],
    /// copying foreign storage into a private allocation if it has no
    /// guaranteed terminator.
    pub fn nul_terminated(&mut self) -> &[T] {
        if self.terminator().is_none() {
            self.detach();
        }
        match &self.repr {
            Repr::Heap { header, offset } => &header.slots()[*offset..=*offset + self.len],
            Repr::Foreign { .. } => T::TERMINATED_EMPTY,
        }
    }

    /// Copies the elements into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Checks the structural invariants of the handle.
    ///
    /// # Panics
    ///
    /// Panics if the live range exceeds the allocation, if the terminator slot
    /// of a heap allocation is not [`Element::ZERO`], or if a heap allocation
    /// lost its ownership flags.
    pub fn verify_invariants(&self) {
        match &self.repr {
            Repr::Heap { header, offset } => {
                assert!(
                    offset + self.len <= header.capacity(),
                    "live range out of bounds: offset {offset} + len {} > capacity {}",
                    self.len,
                    header.capacity()
                );
                assert!(
                    header.slots()[offset + self.len] == T::ZERO,
                    "terminator slot overwritten"
                );
                assert!(
                    header
                        .flags()
                        .contains(ArrayFlags::MUTABLE | ArrayFlags::OWNS_MEMORY),
                    "heap header without ownership flags"
                );
            }
            Repr::Foreign { .. } => {}
        }
    }

    #[inline]
    pub(crate) fn debug_verify(&self) {
        #[cfg(debug_assertions)]
        self.verify_invariants();
    }
}

/// Copy-on-write protocol.
impl<T: Element> ArrayData<T> {
    /// Makes sure this handle exclusively owns a heap allocation, copying the
    /// elements if the storage is shared or foreign. No-op for an empty array
    /// and for an already detached one.
    ///
    /// A private copy of shared heap storage has the same capacity and offset
    /// as the original, so the slack at both ends survives the copy.
    pub fn detach(&mut self) {
        if self.needs_detach() {
            self.reallocate_keeping_layout();
        }
    }

    #[inline]
    pub(crate) fn needs_detach(&self) -> bool {
        !self.is_detached()
    }

    /// Returns the header if it is exclusively owned.
    pub(crate) fn header_mut(&mut self) -> Option<&mut Header<T>> {
        match &mut self.repr {
            Repr::Heap { header, .. } => Arc::get_mut(header),
            Repr::Foreign { .. } => None,
        }
    }

    /// Returns all slots of the exclusively owned allocation together with the
    /// offset and length of the live range.
    ///
    /// # Panics
    ///
    /// Panics if the handle is not detached.
    pub(crate) fn unique_parts(&mut self) -> (&mut [T], &mut usize, &mut usize) {
        let ArrayData { repr, len } = self;
        match repr {
            Repr::Heap { header, offset } => {
                let header = Arc::get_mut(header).expect("exclusively owned array storage");
                (header.slots_mut(), offset, len)
            }
            Repr::Foreign { .. } => panic!("mutation of foreign array storage"),
        }
    }

    /// The capacity a private copy needs to hold `new_size` elements: a reserved
    /// capacity is kept, otherwise exactly `new_size`.
    #[inline]
    pub(crate) fn detach_capacity(&self, new_size: usize) -> usize {
        let capacity = self.capacity();
        if self.flags().contains(ArrayFlags::CAPACITY_RESERVED) && new_size < capacity {
            capacity
        } else {
            new_size
        }
    }

    /// Makes sure the handle is detached and has at least `n` free slots at
    /// `position`, preferring (in order) the existing slack, moving the content
    /// inside the current allocation, and allocating a grown one.
    pub(crate) fn detach_and_grow(&mut self, position: GrowthPosition, n: usize) {
        if !self.needs_detach() {
            let fits = n == 0
                || match position {
                    GrowthPosition::AtBeginning => self.free_space_at_begin() >= n,
                    GrowthPosition::AtEnd => self.free_space_at_end() >= n,
                };
            if fits || self.try_readjust_free_space(position, n) {
                return;
            }
        }
        self.reallocate_and_grow(position, n);
    }

    /// Moves the content of a detached handle inside its allocation so that `n`
    /// slots become free at `position`, if that is cheap enough.
    ///
    /// - growing at the end: move everything to the front if the front slack
    ///   can take `n` and the array is less than two thirds full;
    /// - growing at the beginning: balance the slack around the content if the
    ///   back slack can take `n` and the array is less than one third full.
    fn try_readjust_free_space(&mut self, position: GrowthPosition, n: usize) -> bool {
        let capacity = self.capacity();
        let size = self.len;
        let new_offset = match position {
            GrowthPosition::AtEnd
                if self.free_space_at_begin() >= n
                    && size.saturating_mul(3) < capacity.saturating_mul(2) =>
            {
                0
            }
            GrowthPosition::AtBeginning
                if self.free_space_at_end() >= n && size.saturating_mul(3) < capacity =>
            {
                n + (capacity - size - n) / 2
            }
            _ => return false,
        };
        self.relocate(new_offset);
        true
    }

    fn relocate(&mut self, new_offset: usize) {
        let (slots, offset, len) = self.unique_parts();
        let old_offset = *offset;
        let size = *len;
        slots.copy_within(old_offset..old_offset + size, new_offset);
        slots[new_offset + size] = T::ZERO;
        *offset = new_offset;
        stats::record_relocation(size, old_offset, new_offset);
    }

    /// Replaces the storage with a new private allocation with room for `n`
    /// more elements at `position`.
    ///
    /// The new allocation keeps the free space of the side that is not growing,
    /// so that mixed appends and prepends do not degrade to quadratic copying:
    /// - growing at the end, the content keeps its offset;
    /// - growing at the beginning, the slack that remains after reserving `n`
    ///   slots is split evenly around the content.
    pub(crate) fn reallocate_and_grow(&mut self, position: GrowthPosition, n: usize) {
        let size = self.len;
        let old_capacity = self.capacity();
        let kept_side = match position {
            GrowthPosition::AtEnd => self.free_space_at_end(),
            GrowthPosition::AtBeginning => self.free_space_at_begin(),
        };
        let minimal = size
            .max(old_capacity)
            .checked_add(n)
            .unwrap_or_else(|| capacity_overflow())
            - kept_side;
        if minimal == 0 {
            *self = ArrayData::new();
            return;
        }

        let capacity = self.detach_capacity(minimal);
        let option = if capacity > old_capacity {
            AllocationOption::Grow
        } else {
            AllocationOption::KeepSize
        };
        let mut header = Header::allocate(capacity, option);
        let new_capacity = header.capacity();
        let offset = match position {
            GrowthPosition::AtBeginning => n + (new_capacity - size - n) / 2,
            GrowthPosition::AtEnd => self.free_space_at_begin(),
        };
        header.slots_mut()[offset..offset + size].copy_from_slice(self.as_slice());
        header.set_flags(header.flags() | (self.flags() & ArrayFlags::CAPACITY_RESERVED));
        if size > 0 {
            stats::record_reallocation(size, old_capacity, new_capacity);
        }
        self.repr = Repr::Heap {
            header: Arc::new(header),
            offset,
        };
    }

    /// Replaces the storage with a private allocation of the same capacity,
    /// with the content at the same offset. Foreign storage is copied into an
    /// allocation of exactly `len` slots.
    fn reallocate_keeping_layout(&mut self) {
        let size = self.len;
        let old_capacity = self.capacity();
        let capacity = size.max(old_capacity);
        if capacity == 0 {
            *self = ArrayData::new();
            return;
        }

        let offset = self.free_space_at_begin();
        let mut header = Header::allocate(capacity, AllocationOption::KeepSize);
        header.slots_mut()[offset..offset + size].copy_from_slice(self.as_slice());
        header.set_flags(header.flags() | (self.flags() & ArrayFlags::CAPACITY_RESERVED));
        if size > 0 {
            stats::record_reallocation(size, old_capacity, capacity);
        }
        self.repr = Repr::Heap {
            header: Arc::new(header),
            offset,
        };
    }

    /// Replaces the storage with a new private allocation of exactly
    /// `capacity` slots holding the first `keep` elements at offset zero.
    pub(crate) fn reallocate_exact(&mut self, capacity: usize, keep: usize) {
        debug_assert!(keep <= capacity && keep <= self.len);
        if capacity == 0 {
            *self = ArrayData::new();
            return;
        }
        let old_capacity = self.capacity();
        let mut header = Header::allocate(capacity, AllocationOption::KeepSize);
        header.slots_mut()[..keep].copy_from_slice(&self.as_slice()[..keep]);
        header.set_flags(header.flags() | (self.flags() & ArrayFlags::CAPACITY_RESERVED));
        if keep > 0 {
            stats::record_reallocation(keep, old_capacity, capacity);
        }
        self.repr = Repr::Heap {
            header: Arc::new(header),
            offset: 0,
        };
        self.len = keep;
    }
}

#[inline]
fn static_ptr<T>(data: &'static [T]) -> NonNull<T> {
    NonNull::from(data).cast()
}

impl<T: Element> Default for ArrayData<T> {
    fn default() -> Self {
        ArrayData::new()
    }
}

impl<T: Element> Deref for ArrayData<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> AsRef<[T]> for ArrayData<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> Borrow<[T]> for ArrayData<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Element> fmt::Debug for ArrayData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayData")
            .field("values", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .field("offset", &self.free_space_at_begin())
            .field("flags", &self.flags())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

impl<T: Element> PartialEq for ArrayData<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element> Eq for ArrayData<T> {}

impl<T: Element> PartialEq<[T]> for ArrayData<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Element> PartialOrd for ArrayData<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for ArrayData<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Element> Hash for ArrayData<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<'a, T: Element> IntoIterator for &'a ArrayData<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: Element> From<&[T]> for ArrayData<T> {
    fn from(data: &[T]) -> Self {
        ArrayData::from_slice(data)
    }
}

impl<T: Element> From<Vec<T>> for ArrayData<T> {
    fn from(vec: Vec<T>) -> Self {
        ArrayData::from_slice(&vec)
    }
}

impl<T: Element> FromIterator<T> for ArrayData<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = ArrayData::new();
        array.extend(iter);
        array
    }
}
