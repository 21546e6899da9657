//! Mutating and extracting operations of [`ArrayData`].
//!
//! Positions and lengths are clamped rather than rejected: an insertion
//! position past the end inserts at the end, a range starting at or past the
//! end is empty, and a length reaching past the end stops there.

use std::sync::Arc;

use crate::data::{ArrayData, GrowthPosition, Repr};
use crate::element::Element;
use crate::header::{AllocationOption, ArrayFlags, Header};
use crate::stats;

impl<T: Element> ArrayData<T> {
    /// Returns the elements as a mutable slice, detaching first.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len == 0 {
            return &mut [];
        }
        self.detach();
        let (slots, offset, len) = self.unique_parts();
        let (start, end) = (*offset, *offset + *len);
        &mut slots[start..end]
    }

    /// Overwrites the element at `index`. Out-of-bounds indices are ignored.
    pub fn set(&mut self, index: usize, value: T) {
        if index < self.len {
            self.as_mut_slice()[index] = value;
        }
    }

    /// Appends one element.
    pub fn push(&mut self, value: T) {
        self.append(std::slice::from_ref(&value));
    }

    /// Prepends one element.
    pub fn push_front(&mut self, value: T) {
        self.prepend(std::slice::from_ref(&value));
    }

    /// Appends `data`, using the append slack when possible.
    pub fn append(&mut self, data: &[T]) {
        let n = data.len();
        if n == 0 {
            return;
        }
        self.detach_and_grow(GrowthPosition::AtEnd, n);
        let (slots, offset, len) = self.unique_parts();
        let end = *offset + *len;
        slots[end..end + n].copy_from_slice(data);
        slots[end + n] = T::ZERO;
        *len += n;
        self.debug_verify();
    }

    /// Appends the elements of `other`.
    ///
    /// An empty array adopts the heap storage of `other` instead of copying it.
    pub fn append_array(&mut self, other: &ArrayData<T>) {
        if self.is_empty()
            && !other.is_empty()
            && matches!(other.repr, Repr::Heap { .. })
            && !self.flags().contains(ArrayFlags::CAPACITY_RESERVED)
        {
            *self = other.clone();
            return;
        }
        self.append(other.as_slice());
    }

    /// Prepends `data`, using the prepend slack when possible.
    pub fn prepend(&mut self, data: &[T]) {
        self.insert(0, data);
    }

    /// Inserts `data` before position `index` (clamped to the length).
    ///
    /// Shifts whichever side of the insertion point is cheaper to move: the
    /// head moves towards the front if it is the shorter part and the prepend
    /// slack can take `data`, otherwise the tail moves towards the back.
    pub fn insert(&mut self, index: usize, data: &[T]) {
        let n = data.len();
        if n == 0 {
            return;
        }
        let size = self.len;
        let index = index.min(size);
        let position = if size != 0 && index == 0 {
            GrowthPosition::AtBeginning
        } else if index != size
            && index < size - index
            && !self.needs_detach()
            && self.free_space_at_begin() >= n
        {
            GrowthPosition::AtBeginning
        } else {
            GrowthPosition::AtEnd
        };
        self.detach_and_grow(position, n);

        let (slots, offset, len) = self.unique_parts();
        let start = *offset;
        let at = match position {
            GrowthPosition::AtBeginning => {
                slots.copy_within(start..start + index, start - n);
                *offset = start - n;
                *offset + index
            }
            GrowthPosition::AtEnd => {
                slots.copy_within(start + index..start + *len, start + index + n);
                start + index
            }
        };
        slots[at..at + n].copy_from_slice(data);
        *len += n;
        slots[*offset + *len] = T::ZERO;
        self.debug_verify();
    }

    /// Removes `count` elements starting at `index`.
    ///
    /// On exclusively owned storage the shorter side of the removed range is
    /// shifted to close the gap; removing a prefix only advances the start of
    /// the live range and turns the removed slots into prepend slack.
    pub fn remove(&mut self, index: usize, count: usize) {
        let size = self.len;
        if index >= size || count == 0 {
            return;
        }
        let count = count.min(size - index);
        if index + count == size {
            self.truncate(index);
            return;
        }

        if self.needs_detach() {
            self.rebuild_without(index, count);
        } else {
            let (slots, offset, len) = self.unique_parts();
            let start = *offset;
            if index < size - index - count {
                slots.copy_within(start..start + index, start + count);
                *offset = start + count;
            } else {
                slots.copy_within(start + index + count..start + size, start + index);
            }
            *len = size - count;
            slots[*offset + *len] = T::ZERO;
        }
        self.debug_verify();
    }

    /// Copies everything but `count` elements at `index` into a new private
    /// allocation.
    fn rebuild_without(&mut self, index: usize, count: usize) {
        let new_len = self.len - count;
        let capacity = self.detach_capacity(new_len);
        let mut header = Header::allocate(capacity, AllocationOption::KeepSize);
        let source = self.as_slice();
        let slots = header.slots_mut();
        slots[..index].copy_from_slice(&source[..index]);
        slots[index..new_len].copy_from_slice(&source[index + count..]);
        header.set_flags(header.flags() | (self.flags() & ArrayFlags::CAPACITY_RESERVED));
        stats::record_reallocation(new_len, self.capacity(), capacity);
        self.repr = Repr::Heap {
            header: Arc::new(header),
            offset: 0,
        };
        self.len = new_len;
    }

    /// Replaces `count` elements at `index` with `data`.
    ///
    /// Equal lengths overwrite in place. An `index` past the end appends.
    pub fn replace(&mut self, index: usize, count: usize, data: &[T]) {
        let size = self.len;
        let index = index.min(size);
        let count = count.min(size - index);
        if count == data.len() {
            if count > 0 {
                self.as_mut_slice()[index..index + count].copy_from_slice(data);
            }
            return;
        }
        self.remove(index, count);
        self.insert(index, data);
    }

    /// Shortens the array to `len` elements. No-op if it is not longer.
    ///
    /// Exclusively owned storage keeps its capacity; truncating shared storage
    /// to zero releases it.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        if !self.needs_detach() {
            let (slots, offset, size) = self.unique_parts();
            *size = len;
            slots[*offset + len] = T::ZERO;
        } else if len == 0 {
            *self = ArrayData::new();
        } else {
            let capacity = self.detach_capacity(len);
            self.reallocate_exact(capacity, len);
        }
        self.debug_verify();
    }

    /// Removes `n` elements from the end.
    pub fn chop(&mut self, n: usize) {
        self.truncate(self.len.saturating_sub(n));
    }

    /// Removes all elements.
    ///
    /// Exclusively owned storage with reserved capacity is kept; anything else
    /// is released and the array becomes the empty array.
    pub fn clear(&mut self) {
        let keep = self.is_detached() && self.flags().contains(ArrayFlags::CAPACITY_RESERVED);
        if keep {
            let (slots, offset, len) = self.unique_parts();
            *offset = 0;
            *len = 0;
            slots[0] = T::ZERO;
        } else {
            *self = ArrayData::new();
        }
    }

    /// Resizes the array to `len` elements, filling new ones with
    /// [`Element::ZERO`].
    pub fn resize(&mut self, len: usize) {
        self.resize_with_value(len, T::ZERO);
    }

    /// Resizes the array to `len` elements, filling new ones with `value`.
    pub fn resize_with_value(&mut self, len: usize, value: T) {
        let size = self.len;
        if len <= size {
            self.truncate(len);
            return;
        }
        self.detach_and_grow(GrowthPosition::AtEnd, len - size);
        let (slots, offset, count) = self.unique_parts();
        let start = *offset;
        slots[start + size..start + len].fill(value);
        slots[start + len] = T::ZERO;
        *count = len;
        self.debug_verify();
    }

    /// Makes sure the array can hold at least `capacity` elements without
    /// reallocating, and marks the capacity as reserved.
    ///
    /// Never shrinks the array; `reserve(0)` is a no-op.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity == 0 {
            return;
        }
        if self.needs_detach() || capacity > self.capacity() - self.free_space_at_begin() {
            let size = self.len;
            self.reallocate_exact(capacity.max(size), size);
        }
        if let Some(header) = self.header_mut() {
            header.set_flags(header.flags() | ArrayFlags::CAPACITY_RESERVED);
        }
        self.debug_verify();
    }

    /// Releases unused capacity and the reserved mark.
    ///
    /// No-op for shared or foreign storage.
    pub fn squeeze(&mut self) {
        if !self.is_detached() {
            return;
        }
        if self.len == 0 {
            *self = ArrayData::new();
            return;
        }
        if self.len < self.capacity() {
            let size = self.len;
            self.reallocate_exact(size, size);
        }
        if let Some(header) = self.header_mut() {
            header.set_flags(header.flags() - ArrayFlags::CAPACITY_RESERVED);
        }
        self.debug_verify();
    }

    /// Sets every element to `value`, after resizing to `len` if given.
    pub fn fill(&mut self, value: T, len: Option<usize>) {
        if let Some(len) = len {
            self.resize(len);
        }
        if self.len > 0 {
            self.as_mut_slice().fill(value);
        }
    }

    /// Replaces the whole content with a copy of `data`, reusing exclusively
    /// owned storage when it is large enough.
    pub fn assign(&mut self, data: &[T]) {
        let n = data.len();
        if n == 0 {
            self.clear();
            return;
        }
        if self.needs_detach() || n > self.capacity() {
            *self = ArrayData::from_slice(data);
            return;
        }
        let (slots, offset, len) = self.unique_parts();
        if *offset + n > slots.len() - 1 {
            *offset = 0;
        }
        let start = *offset;
        slots[start..start + n].copy_from_slice(data);
        slots[start + n] = T::ZERO;
        *len = n;
        self.debug_verify();
    }

    /// Replaces the whole content with the items of `iter`.
    pub fn assign_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if self.is_detached() {
            let (slots, offset, len) = self.unique_parts();
            *offset = 0;
            *len = 0;
            slots[0] = T::ZERO;
        } else {
            *self = ArrayData::new();
        }
        self.extend(iter);
    }

    /// Returns up to `len` elements starting at `index`, or everything from
    /// `index` on if `len` is `None`.
    ///
    /// The full range shares the storage with `self`. A sub-range of foreign
    /// storage is a view into the same memory; a sub-range of heap storage is
    /// copied.
    pub fn mid(&self, index: usize, len: Option<usize>) -> ArrayData<T> {
        let size = self.len;
        if index >= size {
            return ArrayData::new();
        }
        let count = len.map_or(size - index, |len| len.min(size - index));
        if count == size {
            return self.clone();
        }
        if count == 0 {
            return ArrayData::new();
        }
        match &self.repr {
            Repr::Foreign { ptr, kind } => ArrayData {
                repr: Repr::Foreign {
                    // SAFETY: `index < size`, within the viewed memory.
                    ptr: unsafe { ptr.add(index) },
                    kind: *kind,
                },
                len: count,
            },
            Repr::Heap { .. } => ArrayData::from_slice(&self.as_slice()[index..index + count]),
        }
    }

    /// Returns the first `n` elements.
    pub fn left(&self, n: usize) -> ArrayData<T> {
        self.mid(0, Some(n))
    }

    /// Returns the last `n` elements.
    pub fn right(&self, n: usize) -> ArrayData<T> {
        self.mid(self.len.saturating_sub(n), None)
    }

    /// Returns all but the last `n` elements.
    pub fn chopped(&self, n: usize) -> ArrayData<T> {
        self.left(self.len.saturating_sub(n))
    }
}

impl<T: Element> Extend<T> for ArrayData<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            self.detach_and_grow(GrowthPosition::AtEnd, lower);
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Element> Extend<&'a T> for ArrayData<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            self.push(*value);
        }
    }
}
