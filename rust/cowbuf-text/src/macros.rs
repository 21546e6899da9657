/// Implements the shared surface of a code unit array newtype
/// (`struct $Name(ArrayData<$T>)`): construction, zero-copy extraction,
/// searching and comparison, plus the conversion and container traits.
///
/// The full [`ArrayData`](cowbuf_array::ArrayData) API (length, capacity,
/// mutation) is reachable through `Deref`/`DerefMut`.
macro_rules! impl_code_unit_array {
    ($Name:ident, $T:ty) => {
        impl $Name {
            /// Creates an empty value. Does not allocate.
            #[inline]
            pub fn new() -> Self {
                Self(cowbuf_array::ArrayData::new())
            }

            pub fn with_capacity(capacity: usize) -> Self {
                Self(cowbuf_array::ArrayData::with_capacity(capacity))
            }

            pub fn from_slice(data: &[$T]) -> Self {
                Self(cowbuf_array::ArrayData::from_slice(data))
            }

            /// Creates a zero-copy view over static data.
            pub fn from_static(data: &'static [$T]) -> Self {
                Self(cowbuf_array::ArrayData::from_static(data))
            }

            /// Creates a zero-copy view over foreign memory.
            ///
            /// # Safety
            ///
            /// Same contract as
            /// [`ArrayData::from_raw_data`](cowbuf_array::ArrayData::from_raw_data).
            pub unsafe fn from_raw_data(ptr: *const $T, len: usize) -> Self {
                Self(unsafe { cowbuf_array::ArrayData::from_raw_data(ptr, len) })
            }

            #[inline]
            pub fn as_array(&self) -> &cowbuf_array::ArrayData<$T> {
                &self.0
            }

            #[inline]
            pub fn into_array(self) -> cowbuf_array::ArrayData<$T> {
                self.0
            }

            /// Returns `len` units starting at `index` (to the end if `None`).
            pub fn mid(&self, index: usize, len: Option<usize>) -> Self {
                Self(self.0.mid(index, len))
            }

            pub fn left(&self, n: usize) -> Self {
                Self(self.0.left(n))
            }

            pub fn right(&self, n: usize) -> Self {
                Self(self.0.right(n))
            }

            pub fn chopped(&self, n: usize) -> Self {
                Self(self.0.chopped(n))
            }

            pub fn index_of(
                &self,
                needle: &[$T],
                from: usize,
                cs: $crate::comparison::CaseSensitivity,
            ) -> Option<usize> {
                $crate::search::index_of(self.0.as_slice(), needle, from, cs)
            }

            pub fn last_index_of(
                &self,
                needle: &[$T],
                from: Option<usize>,
                cs: $crate::comparison::CaseSensitivity,
            ) -> Option<usize> {
                $crate::search::last_index_of(self.0.as_slice(), needle, from, cs)
            }

            pub fn contains(
                &self,
                needle: &[$T],
                cs: $crate::comparison::CaseSensitivity,
            ) -> bool {
                $crate::search::contains(self.0.as_slice(), needle, cs)
            }

            /// Counts overlapping occurrences of `needle`.
            pub fn count(&self, needle: &[$T], cs: $crate::comparison::CaseSensitivity) -> usize {
                $crate::search::count(self.0.as_slice(), needle, cs)
            }

            pub fn starts_with(
                &self,
                prefix: &[$T],
                cs: $crate::comparison::CaseSensitivity,
            ) -> bool {
                $crate::comparison::is_prefix(prefix, self.0.as_slice(), cs)
            }

            pub fn ends_with(
                &self,
                suffix: &[$T],
                cs: $crate::comparison::CaseSensitivity,
            ) -> bool {
                $crate::comparison::is_suffix(suffix, self.0.as_slice(), cs)
            }

            /// Ordinal comparison by code unit value.
            pub fn compare(
                &self,
                other: &[$T],
                cs: $crate::comparison::CaseSensitivity,
            ) -> std::cmp::Ordering {
                $crate::comparison::compare(self.0.as_slice(), other, cs)
            }
        }

        impl std::ops::Deref for $Name {
            type Target = cowbuf_array::ArrayData<$T>;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $Name {
            #[inline]
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl AsRef<[$T]> for $Name {
            fn as_ref(&self) -> &[$T] {
                self.0.as_slice()
            }
        }

        impl std::borrow::Borrow<[$T]> for $Name {
            fn borrow(&self) -> &[$T] {
                self.0.as_slice()
            }
        }

        impl PartialEq<[$T]> for $Name {
            fn eq(&self, other: &[$T]) -> bool {
                self.0.as_slice() == other
            }
        }

        impl From<cowbuf_array::ArrayData<$T>> for $Name {
            fn from(array: cowbuf_array::ArrayData<$T>) -> Self {
                Self(array)
            }
        }

        impl From<$Name> for cowbuf_array::ArrayData<$T> {
            fn from(value: $Name) -> Self {
                value.0
            }
        }

        impl From<&[$T]> for $Name {
            fn from(data: &[$T]) -> Self {
                Self::from_slice(data)
            }
        }

        impl From<Vec<$T>> for $Name {
            fn from(data: Vec<$T>) -> Self {
                Self(data.into())
            }
        }

        impl FromIterator<$T> for $Name {
            fn from_iter<I: IntoIterator<Item = $T>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl Extend<$T> for $Name {
            fn extend<I: IntoIterator<Item = $T>>(&mut self, iter: I) {
                self.0.extend(iter)
            }
        }

        impl<'a> Extend<&'a $T> for $Name {
            fn extend<I: IntoIterator<Item = &'a $T>>(&mut self, iter: I) {
                self.0.extend(iter)
            }
        }

        impl<'a> IntoIterator for &'a $Name {
            type Item = &'a $T;
            type IntoIter = std::slice::Iter<'a, $T>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.as_slice().iter()
            }
        }
    };
}
