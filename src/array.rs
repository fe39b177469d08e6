use std::{cmp::Ordering, fmt};

use crate::{
    cowslice::{cowslice, CowSlice, Release},
    value::{Kind, Value},
    Shape,
};

/// A dense array of elements of one primitive type
#[derive(Clone)]
pub struct Array<T: Release> {
    pub shape: Shape,
    pub(crate) data: CowSlice<T>,
    pub(crate) meta: ArrayMeta,
}

/// Cached facts about an array's contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayMeta {
    sorted: bool,
}

impl ArrayMeta {
    /// Whether the elements are known to be in canonical order
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }
    pub(crate) fn mark_sorted(&mut self, sorted: bool) {
        self.sorted = sorted;
    }
    /// Clear the sortedness flag, returning its old value
    pub(crate) fn take_sorted(&mut self) -> bool {
        std::mem::take(&mut self.sorted)
    }
}

impl<T: Element> Array<T> {
    pub fn new(shape: impl Into<Shape>, data: impl Into<CowSlice<T>>) -> Self {
        let shape = shape.into();
        let data = data.into();
        debug_assert_eq!(shape.tally(), data.len(), "shape {shape} does not fit data");
        Array {
            shape,
            data,
            meta: ArrayMeta::default(),
        }
    }
    pub fn scalar(elem: T) -> Self {
        Array::new(Shape::scalar(), cowslice![elem])
    }
    pub fn list(data: impl Into<CowSlice<T>>) -> Self {
        let data = data.into();
        Array::new(Shape::list(data.len()), data)
    }
    pub fn empty(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        debug_assert_eq!(shape.tally(), 0);
        Array::new(shape, CowSlice::new())
    }
    /// An array of the given shape with every element the fill value
    pub fn filled(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let data = CowSlice::from_elem(T::fill(), shape.tally());
        Array::new(shape, data)
    }
    pub fn valence(&self) -> usize {
        self.shape.len()
    }
    pub fn tally(&self) -> usize {
        self.data.len()
    }
    pub fn is_atom(&self) -> bool {
        self.shape.is_empty()
    }
    pub fn data(&self) -> &[T] {
        &self.data
    }
    /// Get the elements for writing
    ///
    /// Writing may reorder the elements, so the sortedness flag is cleared.
    pub fn data_mut(&mut self) -> &mut [T] {
        self.meta.take_sorted();
        &mut self.data
    }
    pub fn meta(&self) -> &ArrayMeta {
        &self.meta
    }
    pub(crate) fn with_sorted(mut self, sorted: bool) -> Self {
        self.meta.mark_sorted(sorted);
        self
    }
    /// Reshape without touching the elements
    pub fn reshaped(mut self, shape: impl Into<Shape>) -> Self {
        self.shape = shape.into();
        debug_assert_eq!(self.shape.tally(), self.data.len());
        self
    }
    /// Check the elements for canonical order without consulting the flag
    pub fn scan_sorted(&self) -> bool {
        self.data
            .windows(2)
            .all(|w| w[0].up_cmp(&w[1]) != Ordering::Greater)
    }
    pub fn into_value(self) -> Value {
        T::wrap(self)
    }
}

impl<T: Element> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atom() {
            return write!(f, "{:?}", self.data[0]);
        }
        write!(f, "{:?}{:?}", self.shape, &*self.data)
    }
}

/// A type that can be stored in an [`Array`]
///
/// The four primitive element types are stored densely. [`Value`] is the
/// element type of heterogeneous containers.
pub trait Element: Release + fmt::Debug + 'static {
    const KIND: Kind;
    /// The element used to pad an overtake
    fn fill() -> Self;
    /// Box an array of this element type as a value
    fn wrap(array: Array<Self>) -> Value;
    /// Canonical order between two elements
    fn up_cmp(&self, other: &Self) -> Ordering;
    /// Structural equality between two elements
    fn same(&self, other: &Self) -> bool {
        self.up_cmp(other) == Ordering::Equal
    }
}

impl Element for bool {
    const KIND: Kind = Kind::Bool;
    fn fill() -> Self {
        false
    }
    fn wrap(array: Array<Self>) -> Value {
        Value::Bool(array)
    }
    fn up_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Element for i64 {
    const KIND: Kind = Kind::Int;
    fn fill() -> Self {
        0
    }
    fn wrap(array: Array<Self>) -> Value {
        Value::Int(array)
    }
    fn up_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Element for f64 {
    const KIND: Kind = Kind::Real;
    fn fill() -> Self {
        0.0
    }
    fn wrap(array: Array<Self>) -> Value {
        Value::Real(array)
    }
    fn up_cmp(&self, other: &Self) -> Ordering {
        real_cmp(*self, *other)
    }
}

impl Element for char {
    const KIND: Kind = Kind::Char;
    fn fill() -> Self {
        ' '
    }
    fn wrap(array: Array<Self>) -> Value {
        Value::Char(array)
    }
    fn up_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Element for Value {
    const KIND: Kind = Kind::Hetero;
    fn fill() -> Self {
        Value::fault(crate::Fault::Fill)
    }
    fn wrap(array: Array<Self>) -> Value {
        Value::Hetero(array)
    }
    fn up_cmp(&self, other: &Self) -> Ordering {
        crate::algorithm::compare::up_cmp(self, other)
    }
    fn same(&self, other: &Self) -> bool {
        crate::algorithm::compare::equal(self, other)
    }
}

/// Order reals with NaN above every number
pub(crate) fn real_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_mut_clears_sorted() {
        let mut arr = Array::<i64>::list([1, 2, 3]).with_sorted(true);
        assert!(arr.meta().is_sorted());
        arr.data_mut()[0] = 5;
        assert!(!arr.meta().is_sorted());
        assert!(!arr.scan_sorted());
    }

    #[test]
    fn filled_uses_element_fill() {
        let arr = Array::<char>::filled([2]);
        assert_eq!(arr.data(), [' ', ' ']);
        let arr = Array::<Value>::filled([1]);
        assert_eq!(arr.data()[0], Value::fault(crate::Fault::Fill));
    }

    #[test]
    fn nan_sorts_last() {
        assert_eq!(real_cmp(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(real_cmp(-1.0, f64::NAN), Ordering::Less);
        assert_eq!(real_cmp(0.0, -0.0), Ordering::Equal);
    }
}
