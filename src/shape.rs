use std::{fmt, hash::Hash, ops::Deref};

use serde::*;
use tinyvec::{tiny_vec, TinyVec};

/// The extents of an array's axes
///
/// The length of a shape is the array's valence and the product of its
/// extents is the array's tally.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape {
    dims: TinyVec<[usize; 3]>,
}

impl Shape {
    /// The shape of a single
    pub fn scalar() -> Self {
        Shape { dims: tiny_vec![] }
    }
    pub fn list(len: usize) -> Self {
        Shape::from([len])
    }
    pub fn push(&mut self, dim: usize) {
        self.dims.push(dim);
    }
    pub fn extend_from_slice(&mut self, dims: &[usize]) {
        self.dims.extend_from_slice(dims);
    }
    pub fn valence(&self) -> usize {
        self.dims.len()
    }
    pub fn tally(&self) -> usize {
        self.dims.iter().product()
    }
    /// The tally, or `None` if it does not fit in a `usize`
    pub fn checked_tally(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }
    /// Split into the frame of the first `axis` axes and the cell shape of
    /// the rest
    ///
    /// Each of the frame's positions holds one cell of consecutive elements.
    pub fn split_at(&self, axis: usize) -> (Shape, Shape) {
        let (frame, cell) = self.dims.split_at(axis.min(self.valence()));
        (Shape::from(frame), Shape::from(cell))
    }
    /// The row-major stride of each axis
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.valence()];
        for i in (0..self.valence().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }
    pub(crate) fn flat_to_dims(&self, flat: usize, index: &mut Vec<usize>) {
        index.clear();
        let mut flat = flat;
        for &dim in self.dims.iter().rev() {
            index.push(flat % dim);
            flat /= dim;
        }
        index.reverse();
    }
    /// The flat position of an in-bounds address
    pub(crate) fn dims_to_flat(&self, index: &[usize]) -> Option<usize> {
        let mut flat = 0;
        for (&dim, &i) in self.dims.iter().zip(index) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        Some(flat)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.dims.iter()).finish()
    }
}

/// Extents separated by spaces, as the shape operation lists them
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{dim}")?;
        }
        Ok(())
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape {
            dims: dims.iter().copied().collect(),
        }
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        dims.as_slice().into()
    }
}

impl Deref for Shape {
    type Target = [usize];
    fn deref(&self) -> &Self::Target {
        &self.dims
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;
    fn into_iter(self) -> Self::IntoIter {
        self.dims.iter()
    }
}

impl FromIterator<usize> for Shape {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Shape {
            dims: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for Shape {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.dims.extend(iter);
    }
}

/// A list shape compares equal to its length
impl PartialEq<usize> for Shape {
    fn eq(&self, other: &usize) -> bool {
        self.dims[..] == [*other]
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape {
    fn eq(&self, other: &[usize; N]) -> bool {
        self.dims[..] == other[..]
    }
}

impl PartialEq<[usize]> for Shape {
    fn eq(&self, other: &[usize]) -> bool {
        self.dims[..] == *other
    }
}
