use std::fmt;

use ecow::EcoVec;
use enum_iterator::Sequence;
use once_cell::sync::Lazy;

use crate::{
    array::*,
    cowslice::{CowSlice, Release},
    Fault, Phrase, Shape,
};

/// The tag of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence)]
pub enum Kind {
    Bool,
    Int,
    Real,
    Char,
    Phrase,
    Fault,
    Hetero,
}

impl Kind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Bool | Kind::Int | Kind::Real)
    }
    /// Whether containers of this kind store raw primitives
    pub fn is_homogeneous(self) -> bool {
        matches!(self, Kind::Bool | Kind::Int | Kind::Real | Kind::Char)
    }
    /// The class used first when ordering atoms of different kinds
    pub(crate) fn class(self) -> u8 {
        match self {
            Kind::Bool | Kind::Int | Kind::Real => 0,
            Kind::Char => 1,
            Kind::Phrase => 2,
            Kind::Fault => 3,
            Kind::Hetero => 4,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "boolean",
            Kind::Int => "integer",
            Kind::Real => "real",
            Kind::Char => "character",
            Kind::Phrase => "phrase",
            Kind::Fault => "fault",
            Kind::Hetero => "heterogeneous",
        }
    }
}

/// An array value of any kind
///
/// Phrases and faults are always atoms. Every other variant is a container
/// whose shape may be empty, in which case it is an atom of that kind, except
/// for [`Value::Hetero`], whose valence-0 form holds one non-atomic item.
#[derive(Clone)]
pub enum Value {
    Bool(Array<bool>),
    Int(Array<i64>),
    Real(Array<f64>),
    Char(Array<char>),
    Phrase(Phrase),
    Fault(Fault),
    Hetero(Array<Value>),
}

/// Nested items are handed to the releasing slice instead of being dropped
/// in place.
impl Release for Value {
    fn release_into(&mut self, pending: &mut Vec<EcoVec<Value>>) {
        if let Value::Hetero(arr) = self {
            pending.push(arr.data.take_buffer());
        }
    }
}

static NULL: Lazy<Value> = Lazy::new(|| Value::Hetero(Array::empty([0]).with_sorted(true)));
static TRUE: Lazy<Value> = Lazy::new(|| Value::Bool(Array::scalar(true)));
static FALSE: Lazy<Value> = Lazy::new(|| Value::Bool(Array::scalar(false)));
static SCALAR: Lazy<Shape> = Lazy::new(Shape::scalar);

/// Match on the container variants of a value
///
/// Phrase and fault atoms go to the atom arm.
macro_rules! val_as_arr {
    ($v:expr, $atom:ident => $atom_body:expr, |$arr:ident| $body:expr) => {
        match $v {
            $crate::Value::Bool($arr) => $body,
            $crate::Value::Int($arr) => $body,
            $crate::Value::Real($arr) => $body,
            $crate::Value::Char($arr) => $body,
            $crate::Value::Hetero($arr) => $body,
            $atom @ ($crate::Value::Phrase(_) | $crate::Value::Fault(_)) => $atom_body,
        }
    };
}

pub(crate) use val_as_arr;

impl Value {
    /// The canonical empty list
    pub fn null() -> Self {
        NULL.clone()
    }
    /// One of the canonical boolean atoms
    pub fn truth(b: bool) -> Self {
        if b {
            TRUE.clone()
        } else {
            FALSE.clone()
        }
    }
    pub fn phrase(text: &str) -> Self {
        Value::Phrase(Phrase::new(text))
    }
    pub fn fault(fault: Fault) -> Self {
        Value::Fault(fault)
    }
    /// A list of characters
    pub fn string(s: &str) -> Self {
        Value::Char(Array::list(s.chars().collect::<CowSlice<_>>()))
    }
    /// A heterogeneous list of the given items, packed if possible
    pub fn list(items: Vec<Value>) -> Self {
        let shape = Shape::list(items.len());
        Value::from_items(shape, items)
    }
    /// A two-item list
    pub fn pair(a: Value, b: Value) -> Self {
        Value::list(vec![a, b])
    }
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Real(_) => Kind::Real,
            Value::Char(_) => Kind::Char,
            Value::Phrase(_) => Kind::Phrase,
            Value::Fault(_) => Kind::Fault,
            Value::Hetero(_) => Kind::Hetero,
        }
    }
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
    pub fn shape(&self) -> &Shape {
        val_as_arr!(self, _atom => &*SCALAR, |arr| &arr.shape)
    }
    pub fn valence(&self) -> usize {
        self.shape().len()
    }
    pub fn tally(&self) -> usize {
        val_as_arr!(self, _atom => 1, |arr| arr.tally())
    }
    pub fn is_empty(&self) -> bool {
        self.tally() == 0
    }
    /// Whether this is an atom, a value that is its own only item
    pub fn is_atomic(&self) -> bool {
        match self {
            Value::Phrase(_) | Value::Fault(_) => true,
            Value::Hetero(_) => false,
            val => val.valence() == 0,
        }
    }
    /// Whether every item is an atom
    pub fn is_simple(&self) -> bool {
        match self {
            Value::Hetero(arr) => arr.data.iter().all(Value::is_atomic),
            _ => true,
        }
    }
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Value::Fault(f) => Some(f),
            _ => None,
        }
    }
    pub fn is_fault(&self) -> bool {
        matches!(self, Value::Fault(_))
    }
    /// Whether this fault is one that combinators hand back unchanged
    ///
    /// The ordering sentinels are ordinary data.
    pub(crate) fn is_propagating_fault(&self) -> bool {
        matches!(self, Value::Fault(f) if !f.is_sentinel())
    }
    /// Whether the items are known to be in canonical order
    pub fn is_sorted(&self) -> bool {
        val_as_arr!(self, _atom => true, |arr| arr.is_atom() || arr.meta.is_sorted())
    }
    /// Set the sortedness flag
    ///
    /// Only operations that have established the order may set it.
    pub(crate) fn mark_sorted(&mut self, sorted: bool) {
        val_as_arr!(self, _atom => (), |arr| arr.meta.mark_sorted(sorted))
    }
    /// Forget that the items are known to be in canonical order
    pub fn clear_sorted(&mut self) {
        self.mark_sorted(false);
    }
    /// Get the item at a flat index
    ///
    /// The only item of an atom is the atom itself.
    pub fn item(&self, i: usize) -> Value {
        match self {
            Value::Bool(arr) => arr.data[i].into(),
            Value::Int(arr) => arr.data[i].into(),
            Value::Real(arr) => arr.data[i].into(),
            Value::Char(arr) => arr.data[i].into(),
            Value::Hetero(arr) => arr.data[i].clone(),
            atom => atom.clone(),
        }
    }
    pub fn items(&self) -> impl ExactSizeIterator<Item = Value> + '_ {
        (0..self.tally()).map(|i| self.item(i))
    }
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Value::Hetero(arr) => arr.data.to_vec(),
            val => val.items().collect(),
        }
    }
    /// Convert to a heterogeneous container of the same shape
    ///
    /// The sortedness flag is kept.
    pub fn explode(self) -> Array<Value> {
        match self {
            Value::Hetero(arr) => arr,
            val => {
                let shape = val.shape().clone();
                let sorted = val.is_sorted() && val.valence() > 0;
                let items: CowSlice<Value> = val.items().collect();
                Array::new(shape, items).with_sorted(sorted)
            }
        }
    }
    /// Build a value from items, packing them densely when they are all
    /// atoms of one homogeneous kind
    pub fn from_items(shape: Shape, items: impl Into<CowSlice<Value>>) -> Value {
        Value::Hetero(Array::new(shape, items)).implode()
    }
    /// Pack a heterogeneous container whose items are all atoms of one
    /// homogeneous kind
    ///
    /// A valence-0 container holding an atom becomes that atom.
    pub fn implode(self) -> Value {
        let arr = match self {
            Value::Hetero(arr) => arr,
            val => return val,
        };
        if arr.is_atom() && arr.data[0].is_atomic() {
            return arr.data[0].clone();
        }
        let Some(first) = arr.data.first() else {
            return Value::Hetero(arr);
        };
        let kind = first.kind();
        if !kind.is_homogeneous() || !arr.data.iter().all(|v| v.kind() == kind && v.is_atomic()) {
            return Value::Hetero(arr);
        }
        let sorted = arr.meta.is_sorted();
        macro_rules! pack {
            ($variant:ident) => {{
                let data: CowSlice<_> = arr
                    .data
                    .iter()
                    .map(|v| match v {
                        Value::$variant(a) => a.data[0].clone(),
                        _ => unreachable!(),
                    })
                    .collect();
                Value::$variant(Array::new(arr.shape.clone(), data).with_sorted(sorted))
            }};
        }
        match kind {
            Kind::Bool => pack!(Bool),
            Kind::Int => pack!(Int),
            Kind::Real => pack!(Real),
            Kind::Char => pack!(Char),
            _ => Value::Hetero(arr),
        }
    }
    /// Make a valence-0 value whose only item is this value
    ///
    /// An atom is already its own single.
    pub fn single(self) -> Value {
        if self.is_atomic() {
            self
        } else {
            Value::Hetero(Array::scalar(self))
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(arr) if arr.is_atom() => Some(arr.data[0]),
            _ => None,
        }
    }
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(arr) if arr.is_atom() => Some(arr.data[0]),
            _ => None,
        }
    }
    /// Get a numeric atom as a real
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Bool(arr) if arr.is_atom() => Some(arr.data[0] as u8 as f64),
            Value::Int(arr) if arr.is_atom() => Some(arr.data[0] as f64),
            Value::Real(arr) if arr.is_atom() => Some(arr.data[0]),
            _ => None,
        }
    }
    /// Get the items as integers
    ///
    /// Empty values of any kind give an empty list.
    pub fn as_ints(&self) -> Option<Vec<i64>> {
        match self {
            Value::Int(arr) => Some(arr.data.to_vec()),
            val if val.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }
    /// Convert a boolean container to integers
    pub fn to_int(self) -> Value {
        match self {
            Value::Bool(arr) => Value::Int(convert(arr, |b| b as i64)),
            val => val,
        }
    }
    /// Convert a boolean or integer container to reals
    pub fn to_real(self) -> Value {
        match self {
            Value::Bool(arr) => Value::Real(convert(arr, |b| b as u8 as f64)),
            Value::Int(arr) => Value::Real(convert(arr, |i| i as f64)),
            val => val,
        }
    }
}

/// Convert elements while keeping shape and, since the conversions used here
/// are monotonic, the sortedness flag
pub(crate) fn convert<A: Element, B: Element>(arr: Array<A>, f: impl Fn(A) -> B) -> Array<B> {
    let sorted = arr.meta.is_sorted();
    let data: EcoVec<B> = arr.data.iter().cloned().map(f).collect();
    Array::new(arr.shape, data).with_sorted(sorted)
}

macro_rules! value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(item: $ty) -> Self {
                Self::$variant(Array::scalar(item))
            }
        }
        impl From<Array<$ty>> for Value {
            fn from(array: Array<$ty>) -> Self {
                Self::$variant(array)
            }
        }
        impl From<Vec<$ty>> for Value {
            fn from(vec: Vec<$ty>) -> Self {
                Self::$variant(Array::list(vec))
            }
        }
        impl FromIterator<$ty> for Value {
            fn from_iter<I: IntoIterator<Item = $ty>>(iter: I) -> Self {
                Self::$variant(Array::list(iter.into_iter().collect::<CowSlice<_>>()))
            }
        }
    };
}

value_from!(bool, Bool);
value_from!(i64, Int);
value_from!(f64, Real);
value_from!(char, Char);

impl From<Array<Value>> for Value {
    fn from(array: Array<Value>) -> Self {
        Value::Hetero(array)
    }
}

impl From<Fault> for Value {
    fn from(fault: Fault) -> Self {
        Value::Fault(fault)
    }
}

impl From<Phrase> for Value {
    fn from(phrase: Phrase) -> Self {
        Value::Phrase(phrase)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::algorithm::compare::equal(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(arr) => arr.fmt(f),
            Value::Int(arr) => arr.fmt(f),
            Value::Real(arr) => arr.fmt(f),
            Value::Char(arr) => arr.fmt(f),
            Value::Phrase(p) => write!(f, "\"{p}"),
            Value::Fault(fault) => write!(f, "{fault}"),
            Value::Hetero(arr) => arr.fmt(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
