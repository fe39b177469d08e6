//! Shared, copy-on-write element storage
//!
//! Every array value keeps its elements in a [`CowSlice`]. Cloning a slice
//! only bumps the reference count of the backing buffer, so values can be
//! aliased freely (for example when one item is broadcast against many).
//! The buffer is copied the first time an aliased slice is written to.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Bound, Deref, DerefMut, RangeBounds},
};

use ecow::EcoVec;

macro_rules! cowslice {
    ($($item:expr),* $(,)?) => {
        $crate::cowslice::CowSlice::from([$($item),*])
    };
}

pub(crate) use cowslice;

/// An element type that can be stored in a [`CowSlice`]
///
/// Elements that own buffers of their own type hand those buffers over when
/// they are released, so freeing a deeply nested value walks a work-list
/// instead of the call stack.
pub trait Release: Clone {
    /// Move the buffers owned by this element into `pending`
    fn release_into(&mut self, _pending: &mut Vec<EcoVec<Self>>) {}
}

impl Release for bool {}
impl Release for i64 {}
impl Release for f64 {}
impl Release for char {}

pub struct CowSlice<T: Release> {
    data: EcoVec<T>,
    start: usize,
    end: usize,
}

impl<T: Release> CowSlice<T> {
    pub fn new() -> Self {
        CowSlice {
            data: EcoVec::new(),
            start: 0,
            end: 0,
        }
    }
    pub fn from_elem(elem: T, len: usize) -> Self {
        let mut data = EcoVec::with_capacity(len);
        for _ in 0..len {
            data.push(elem.clone());
        }
        data.into()
    }
    /// Get a view of a subrange without copying
    pub fn slice<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => self.start + start,
            Bound::Excluded(&start) => self.start + start + 1,
            Bound::Unbounded => self.start,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => self.start + end + 1,
            Bound::Excluded(&end) => self.start + end,
            Bound::Unbounded => self.end,
        };
        assert!(start <= end);
        assert!(end <= self.end);
        Self {
            data: self.data.clone(),
            start,
            end,
        }
    }
    /// Take the backing buffer, leaving this slice empty
    pub(crate) fn take_buffer(&mut self) -> EcoVec<T> {
        self.start = 0;
        self.end = 0;
        mem::take(&mut self.data)
    }
    fn detach(&mut self) {
        if self.start != 0 || self.end != self.data.len() {
            self.data = EcoVec::from(&self.data[self.start..self.end]);
            self.start = 0;
            self.end = self.data.len();
        }
    }
}

/// Buffers shared with another slice are only released by their last owner.
impl<T: Release> Drop for CowSlice<T> {
    fn drop(&mut self) {
        if !mem::needs_drop::<T>() {
            return;
        }
        let mut pending = vec![self.take_buffer()];
        while let Some(mut data) = pending.pop() {
            if !data.is_unique() {
                continue;
            }
            while let Some(mut item) = data.pop() {
                item.release_into(&mut pending);
            }
        }
    }
}

impl<T: Release> Default for CowSlice<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Release> Clone for CowSlice<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: Release> Deref for CowSlice<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.data[self.start..self.end]
    }
}

impl<T: Release> DerefMut for CowSlice<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.detach();
        self.data.make_mut()
    }
}

#[test]
fn cow_slice_deref_mut() {
    let mut slice = CowSlice::from([1i64, 2, 3, 4]);
    slice[1] = 7;
    assert_eq!(slice, [1, 7, 3, 4]);

    let mut sub = slice.slice(1..=2);
    sub[1] = 5;
    assert_eq!(slice, [1, 7, 3, 4]);
    assert_eq!(sub, [7, 5]);
}

#[test]
fn cow_slice_shared_write() {
    let slice = CowSlice::from([1i64, 2, 3]);
    let mut alias = slice.clone();
    alias[0] = 9;
    assert_eq!(slice, [1, 2, 3]);
    assert_eq!(alias, [9, 2, 3]);
    let mut tail: CowSlice<i64> = slice.slice(1..);
    assert_eq!(tail, [2, 3]);
    assert_eq!(tail.take_buffer().len(), 3);
    assert!(tail.is_empty());
    assert_eq!(slice, [1, 2, 3]);
}

impl<T: Release> From<EcoVec<T>> for CowSlice<T> {
    fn from(data: EcoVec<T>) -> Self {
        Self {
            start: 0,
            end: data.len(),
            data,
        }
    }
}

impl<T: Release> From<Vec<T>> for CowSlice<T> {
    fn from(vec: Vec<T>) -> Self {
        EcoVec::from(vec).into()
    }
}

impl<'a, T: Release> From<&'a [T]> for CowSlice<T> {
    fn from(slice: &'a [T]) -> Self {
        EcoVec::from(slice).into()
    }
}

impl<T: Release, const N: usize> From<[T; N]> for CowSlice<T> {
    fn from(array: [T; N]) -> Self {
        EcoVec::from(array).into()
    }
}

impl<T: Release + fmt::Debug> fmt::Debug for CowSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl<T: Release> Borrow<[T]> for CowSlice<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T: Release> AsRef<[T]> for CowSlice<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T: Release + PartialEq> PartialEq for CowSlice<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Release + Eq> Eq for CowSlice<T> {}

impl<T: Release + PartialOrd> PartialOrd for CowSlice<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Release + PartialEq> PartialEq<[T]> for CowSlice<T> {
    fn eq(&self, other: &[T]) -> bool {
        **self == *other
    }
}

impl<T: Release + PartialEq, const N: usize> PartialEq<[T; N]> for CowSlice<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        **self == *other
    }
}

impl<T: Release + Hash> Hash for CowSlice<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state)
    }
}

impl<'a, T: Release> IntoIterator for &'a CowSlice<T> {
    type Item = &'a T;
    type IntoIter = <&'a [T] as IntoIterator>::IntoIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Release> FromIterator<T> for CowSlice<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<EcoVec<T>>().into()
    }
}
