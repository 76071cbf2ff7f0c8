#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! Resizable contiguous storage with value semantics.
//!
//! [`DynamicArray`] is the capacity-bound storage that [`ArrayQueue`] is
//! built on. It tracks two sizes: the logical length (`len`) that bounds
//! every index, and the high-water `capacity` of slots that have ever been
//! allocated. Shrinking drops the trailing elements but keeps their slots;
//! growing within `capacity` reuses the existing allocation.
//!
//! An optional default value, supplied through
//! [`with_default`](DynamicArray::with_default), fills any slot exposed by a
//! later [`resize`](DynamicArray::resize).
//!
//! # Complexity
//! - `get`, `get_mut`, `set`, `len`, `capacity` are **O(1)**.
//! - `resize` is **O(n)** in the number of slots it fills.
//!
//! [`ArrayQueue`]: super::ArrayQueue

use crate::error::ArrayError;

/// Growable array whose accesses are bounds-checked against its length.
///
/// # Examples
///
/// ```rust
/// use ringlink_queues::collections::DynamicArray;
///
/// let mut array = DynamicArray::with_default(2, 0_u32);
/// array.set(1, 7).unwrap();
/// array.resize(4);
///
/// assert_eq!(array.as_slice(), &[0, 7, 0, 0]);
/// assert!(array.get(4).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DynamicArray<T> {
    items: Vec<T>,
    len: usize,
    default_value: Option<T>,
}

impl<T: Default> DynamicArray<T> {
    /// Creates an array of `size` default-constructed elements.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut items = Vec::with_capacity(size);
        items.resize_with(size, T::default);
        Self { items, len: size, default_value: None }
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Creates an array of `size` copies of `default_value`.
    ///
    /// The value is remembered and used to fill slots exposed by later
    /// growth.
    #[must_use]
    pub fn with_default(size: usize, default_value: T) -> Self {
        let items = vec![default_value.clone(); size];
        Self { items, len: size, default_value: Some(default_value) }
    }
}

impl<T: Clone + Default> DynamicArray<T> {
    /// Changes the logical length to `new_len`.
    ///
    /// Existing elements below `new_len` are preserved. Elements past it are
    /// dropped immediately while their slots stay allocated. Slots exposed by
    /// growth hold the remembered default value, or `T::default()` when the
    /// array was built with [`new`](Self::new).
    pub fn resize(&mut self, new_len: usize) {
        if new_len == self.len {
            return;
        }

        let fill = self.default_value.clone().unwrap_or_default();

        if new_len < self.len {
            // Trailing elements are dropped now; their slots keep the fill.
            for slot in &mut self.items[new_len..self.len] {
                slot.clone_from(&fill);
            }
            self.len = new_len;
            return;
        }

        // Slots past `len` always hold the fill, so growth only extends.
        if new_len > self.items.len() {
            self.items.resize(new_len, fill);
        }
        self.len = new_len;
    }
}

impl<T> DynamicArray<T> {
    /// Returns the logical length.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the logical length is zero.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots (never less than `len`).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] when `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, ArrayError> {
        self.as_slice().get(index).ok_or(ArrayError::IndexOutOfRange { index, len: self.len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] when `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] when `index >= len()`; the
    /// array is left unchanged and `item` is dropped.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, ArrayError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, item))
    }

    /// Exchanges the full contents of two arrays.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.len]
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items[..self.len]
    }

    /// Returns an iterator over the live elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the live elements.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    /// Arrays are equal when their live elements are equal; capacity and
    /// the remembered default value do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Default> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
