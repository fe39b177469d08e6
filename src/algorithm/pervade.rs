//! Algorithms for pervasive array operations
//!
//! A pervasive operator is defined on atoms and extends to containers by
//! recursing into their items. Arguments whose items are all stored densely
//! take a typed loop instead. If a typed loop meets an element it cannot
//! handle (an overflow or a zero divisor, say), the loop is abandoned and
//! the operation is redone item by item, so only the offending items become
//! faults.

use std::cmp::Ordering;

use ecow::EcoVec;
use tracing::trace;

use crate::{
    algorithm::{
        compare::{coerced_cmp, match_atoms},
        loops::{each_with, eachboth_with},
    },
    arith,
    array::*,
    Core, CoreResult, Fault, Kind, Value,
};

/// An operator of two arguments defined on atoms
pub trait BinaryPervasive {
    /// Apply the operator to two atoms
    fn atoms(&self, a: &Value, b: &Value) -> Value;
    /// Apply the operator to two dense containers of the same kind, at most
    /// one of which is an atom and which otherwise have the same shape
    ///
    /// `None` means there is no typed loop for these arguments, or that the
    /// loop gave up.
    fn fast(&self, _a: &Value, _b: &Value) -> Option<Value> {
        None
    }
    /// Whether numbers of different kinds are converted to a common kind
    /// before the operator sees them
    fn coerces(&self) -> bool {
        true
    }
}

/// An operator of one argument defined on atoms
pub trait UnaryPervasive {
    fn atom(&self, a: &Value) -> Value;
    fn fast(&self, _a: &Value) -> Option<Value> {
        None
    }
}

/// Convert two numeric values to the wider of their kinds
fn coerce(x: Value, y: Value) -> (Value, Value) {
    match (x.kind(), y.kind()) {
        (a, b) if a == b || !a.is_numeric() || !b.is_numeric() => (x, y),
        (Kind::Real, _) | (_, Kind::Real) => (x.to_real(), y.to_real()),
        _ => (x.to_int(), y.to_int()),
    }
}

pub fn bin_pervade<F: BinaryPervasive>(x: Value, y: Value, f: &F, env: &Core) -> CoreResult<Value> {
    let (x, y) = if f.coerces() { coerce(x, y) } else { (x, y) };
    if x.is_atomic() && y.is_atomic() {
        return Ok(f.atoms(&x, &y));
    }
    if x.kind() == y.kind()
        && x.kind().is_homogeneous()
        && (x.is_atomic() || y.is_atomic() || x.shape() == y.shape())
    {
        env.validate_size(x.tally().max(y.tally()))?;
        if let Some(res) = f.fast(&x, &y) {
            return Ok(res);
        }
        trace!(kind = x.type_name(), "no typed loop, pervading item by item");
    }
    eachboth_with(x, y, env, |a, b| bin_pervade(a, b, f, env))
}

pub fn mon_pervade<F: UnaryPervasive>(x: Value, f: &F, env: &Core) -> CoreResult<Value> {
    if x.is_atomic() {
        return Ok(f.atom(&x));
    }
    if x.kind().is_homogeneous() {
        if let Some(res) = f.fast(&x) {
            return Ok(res);
        }
    }
    each_with(x, env, |a| mon_pervade(a, f, env))
}

/// Zip two dense arrays, one of which may be an atom
///
/// Returns `None` as soon as `f` does.
pub(crate) fn zip<A, C>(a: &Array<A>, b: &Array<A>, f: impl Fn(A, A) -> Option<C>) -> Option<Array<C>>
where
    A: Element + Copy,
    C: Element,
{
    let shape = if a.is_atom() { &b.shape } else { &a.shape };
    let mut data = EcoVec::with_capacity(shape.tally());
    match (a.data(), b.data()) {
        (&[x], ys) if a.is_atom() => {
            for &y in ys {
                data.push(f(x, y)?);
            }
        }
        (xs, &[y]) if b.is_atom() => {
            for &x in xs {
                data.push(f(x, y)?);
            }
        }
        (xs, ys) => {
            for (&x, &y) in xs.iter().zip(ys) {
                data.push(f(x, y)?);
            }
        }
    }
    Some(Array::new(shape.clone(), data))
}

/// Map a dense array, giving up as soon as `f` returns `None`
pub(crate) fn map<A, C>(a: &Array<A>, f: impl Fn(A) -> Option<C>) -> Option<Array<C>>
where
    A: Element + Copy,
    C: Element,
{
    let mut data = EcoVec::with_capacity(a.tally());
    for &x in a.data() {
        data.push(f(x)?);
    }
    Some(Array::new(a.shape.clone(), data))
}

/// Combine two boolean arrays 64 lanes at a time
fn bool_words(a: &Array<bool>, b: &Array<bool>, word: impl Fn(u64, u64) -> u64) -> Array<bool> {
    fn lanes(arr: &Array<bool>, start: usize, end: usize) -> u64 {
        if arr.is_atom() {
            return if arr.data[0] { u64::MAX } else { 0 };
        }
        (arr.data[start..end])
            .iter()
            .enumerate()
            .fold(0, |w, (i, &bit)| w | (u64::from(bit) << i))
    }
    let shape = if a.is_atom() { &b.shape } else { &a.shape };
    let n = shape.tally();
    let mut data = EcoVec::with_capacity(n);
    for start in (0..n).step_by(64) {
        let end = (start + 64).min(n);
        let w = word(lanes(a, start, end), lanes(b, start, end));
        data.extend((0..end - start).map(|i| (w >> i) & 1 == 1));
    }
    Array::new(shape.clone(), data)
}

/// Two numeric atoms of the same kind
pub(crate) enum Num {
    Bool(bool, bool),
    Int(i64, i64),
    Real(f64, f64),
}

impl Num {
    fn of(a: &Value, b: &Value) -> Option<Num> {
        Some(match (a, b) {
            (Value::Bool(a), Value::Bool(b)) => Num::Bool(a.data[0], b.data[0]),
            (Value::Int(a), Value::Int(b)) => Num::Int(a.data[0], b.data[0]),
            (Value::Real(a), Value::Real(b)) => Num::Real(a.data[0], b.data[0]),
            _ => return None,
        })
    }
}

fn or_fault<T: Into<Value>>(res: Result<T, Fault>) -> Value {
    res.map_or_else(Value::from, Into::into)
}

fn overflow<T: Into<Value>>(res: Option<T>) -> Value {
    or_fault(res.ok_or(Fault::Overflow))
}

/// The fault rules shared by the arithmetic operators
///
/// Two faults give that fault if they are the same and the generic
/// arithmetic fault otherwise. One fault is passed on. Any non-numeric atom
/// gives the generic arithmetic fault.
fn arith_atoms(a: &Value, b: &Value, f: impl FnOnce(Num) -> Value) -> Value {
    match (a, b) {
        (Value::Fault(x), Value::Fault(y)) => Fault::arith_pair(x, y).into(),
        (Value::Fault(x), _) | (_, Value::Fault(x)) => x.clone().into(),
        _ => match Num::of(a, b) {
            Some(num) => f(num),
            None => Fault::Arith.into(),
        },
    }
}

fn arith_atom(a: &Value, f: impl FnOnce(&Value) -> Value) -> Value {
    match a {
        Value::Fault(x) => x.clone().into(),
        a if a.kind().is_numeric() => f(a),
        _ => Fault::Arith.into(),
    }
}

pub mod add {
    use super::*;
    pub fn int_int(a: i64, b: i64) -> Option<i64> {
        arith::add(a, b)
    }
    pub fn real_real(a: f64, b: f64) -> f64 {
        a + b
    }
    pub fn bool_bool(a: bool, b: bool) -> i64 {
        i64::from(a) + i64::from(b)
    }
    pub struct Add;
    impl BinaryPervasive for Add {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            arith_atoms(a, b, |num| match num {
                Num::Bool(a, b) => bool_bool(a, b).into(),
                Num::Int(a, b) => overflow(int_int(a, b)),
                Num::Real(a, b) => real_real(a, b).into(),
            })
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            Some(match (a, b) {
                (Value::Bool(a), Value::Bool(b)) => zip(a, b, |a, b| Some(bool_bool(a, b)))?.into(),
                (Value::Int(a), Value::Int(b)) => zip(a, b, int_int)?.into(),
                (Value::Real(a), Value::Real(b)) => zip(a, b, |a, b| Some(real_real(a, b)))?.into(),
                _ => return None,
            })
        }
    }
}

pub mod sub {
    use super::*;
    pub fn int_int(a: i64, b: i64) -> Option<i64> {
        arith::sub(a, b)
    }
    pub fn real_real(a: f64, b: f64) -> f64 {
        a - b
    }
    pub fn bool_bool(a: bool, b: bool) -> i64 {
        i64::from(a) - i64::from(b)
    }
    pub struct Sub;
    impl BinaryPervasive for Sub {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            arith_atoms(a, b, |num| match num {
                Num::Bool(a, b) => bool_bool(a, b).into(),
                Num::Int(a, b) => overflow(int_int(a, b)),
                Num::Real(a, b) => real_real(a, b).into(),
            })
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            Some(match (a, b) {
                (Value::Bool(a), Value::Bool(b)) => zip(a, b, |a, b| Some(bool_bool(a, b)))?.into(),
                (Value::Int(a), Value::Int(b)) => zip(a, b, int_int)?.into(),
                (Value::Real(a), Value::Real(b)) => zip(a, b, |a, b| Some(real_real(a, b)))?.into(),
                _ => return None,
            })
        }
    }
}

pub mod mul {
    use super::*;
    pub fn int_int(a: i64, b: i64) -> Option<i64> {
        arith::mul(a, b)
    }
    pub fn real_real(a: f64, b: f64) -> f64 {
        a * b
    }
    pub fn bool_bool(a: bool, b: bool) -> i64 {
        i64::from(a && b)
    }
    pub struct Mul;
    impl BinaryPervasive for Mul {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            arith_atoms(a, b, |num| match num {
                Num::Bool(a, b) => bool_bool(a, b).into(),
                Num::Int(a, b) => overflow(int_int(a, b)),
                Num::Real(a, b) => real_real(a, b).into(),
            })
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            Some(match (a, b) {
                (Value::Bool(a), Value::Bool(b)) => zip(a, b, |a, b| Some(bool_bool(a, b)))?.into(),
                (Value::Int(a), Value::Int(b)) => zip(a, b, int_int)?.into(),
                (Value::Real(a), Value::Real(b)) => zip(a, b, |a, b| Some(real_real(a, b)))?.into(),
                _ => return None,
            })
        }
    }
}

pub mod div {
    use super::*;
    pub fn real_real(a: f64, b: f64) -> Option<f64> {
        (b != 0.0).then(|| a / b)
    }
    fn real(num: Num) -> (f64, f64) {
        match num {
            Num::Bool(a, b) => (f64::from(u8::from(a)), f64::from(u8::from(b))),
            Num::Int(a, b) => (a as f64, b as f64),
            Num::Real(a, b) => (a, b),
        }
    }
    pub struct Div;
    impl BinaryPervasive for Div {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            arith_atoms(a, b, |num| {
                let (a, b) = real(num);
                or_fault(real_real(a, b).ok_or(Fault::DivZero))
            })
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            let (a, b) = (a.clone().to_real(), b.clone().to_real());
            match (&a, &b) {
                (Value::Real(a), Value::Real(b)) => Some(zip(a, b, real_real)?.into()),
                _ => None,
            }
        }
    }
}

pub mod pow {
    use super::*;
    use arith::Power;
    fn power_value(p: Power) -> Value {
        match p {
            Power::Int(i) => i.into(),
            Power::Real(r) => r.into(),
        }
    }
    pub fn int_int(a: i64, b: i64) -> Value {
        or_fault(arith::power_int_int(a, b).map(power_value))
    }
    pub fn real_real(a: f64, b: f64) -> Value {
        or_fault(arith::power_real_real(a, b).map(power_value))
    }
    pub struct Pow;
    impl BinaryPervasive for Pow {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            arith_atoms(a, b, |num| match num {
                Num::Bool(a, b) => int_int(i64::from(a), i64::from(b)),
                Num::Int(a, b) => int_int(a, b),
                Num::Real(a, b) => real_real(a, b),
            })
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            match (a, b) {
                (Value::Int(a), Value::Int(b)) => Some(
                    zip(a, b, |a, b| {
                        let exp = u64::try_from(b).ok()?;
                        arith::int_power(a, exp)
                    })?
                    .into(),
                ),
                (Value::Real(a), Value::Real(b)) => Some(
                    zip(a, b, |a, b| match arith::power_real_real(a, b) {
                        Ok(Power::Real(r)) => Some(r),
                        _ => None,
                    })?
                    .into(),
                ),
                _ => None,
            }
        }
    }
}

/// Integer-only arithmetic, where booleans count as integers and reals are
/// an arithmetic fault
fn int_atoms(a: &Value, b: &Value, f: impl FnOnce(i64, i64) -> Result<i64, Fault>) -> Value {
    arith_atoms(a, b, |num| match num {
        Num::Bool(a, b) => or_fault(f(i64::from(a), i64::from(b))),
        Num::Int(a, b) => or_fault(f(a, b)),
        Num::Real(..) => Fault::Arith.into(),
    })
}

fn int_fast(a: &Value, b: &Value, f: impl Fn(i64, i64) -> Result<i64, Fault>) -> Option<Value> {
    let (a, b) = (a.clone().to_int(), b.clone().to_int());
    match (&a, &b) {
        (Value::Int(a), Value::Int(b)) => Some(zip(a, b, |a, b| f(a, b).ok())?.into()),
        _ => None,
    }
}

pub mod quotient {
    use super::*;
    pub struct Quotient;
    impl BinaryPervasive for Quotient {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            int_atoms(a, b, arith::quotient)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            int_fast(a, b, arith::quotient)
        }
    }
}

pub mod modulo {
    use super::*;
    pub struct Modulo;
    impl BinaryPervasive for Modulo {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            int_atoms(a, b, arith::modulo)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            int_fast(a, b, arith::modulo)
        }
    }
}

/// Pick one of two atoms by their order
///
/// Numbers and characters can be picked between. Anything else follows the
/// arithmetic fault rules.
fn extremum_atoms(a: &Value, b: &Value, keep: Ordering) -> Value {
    match (a, b) {
        (Value::Fault(x), Value::Fault(y)) => Fault::arith_pair(x, y).into(),
        (Value::Fault(x), _) | (_, Value::Fault(x)) => x.clone().into(),
        _ if a.kind() == b.kind() && a.kind().is_homogeneous() => {
            if coerced_cmp(a, b) == keep {
                a.clone()
            } else {
                b.clone()
            }
        }
        _ => Fault::Arith.into(),
    }
}

fn extremum_fast(a: &Value, b: &Value, keep: Ordering) -> Option<Value> {
    fn pick<T: Element + Copy>(a: &Array<T>, b: &Array<T>, keep: Ordering) -> Option<Array<T>> {
        zip(a, b, |x, y| Some(if x.up_cmp(&y) == keep { x } else { y }))
    }
    Some(match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => pick(a, b, keep)?.into(),
        (Value::Int(a), Value::Int(b)) => pick(a, b, keep)?.into(),
        (Value::Real(a), Value::Real(b)) => pick(a, b, keep)?.into(),
        (Value::Char(a), Value::Char(b)) => pick(a, b, keep)?.into(),
        _ => return None,
    })
}

pub mod max {
    use super::*;
    pub struct Max;
    impl BinaryPervasive for Max {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            extremum_atoms(a, b, Ordering::Greater)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            extremum_fast(a, b, Ordering::Greater)
        }
    }
}

pub mod min {
    use super::*;
    pub struct Min;
    impl BinaryPervasive for Min {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            extremum_atoms(a, b, Ordering::Less)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            extremum_fast(a, b, Ordering::Less)
        }
    }
}

/// The pervasive comparisons
///
/// Comparisons never produce faults. Atoms of different classes compare by
/// class and the ordering sentinels are extremes.
pub struct Compare {
    test: fn(Ordering) -> bool,
    coerce: bool,
}

impl Compare {
    pub const LT: Compare = Compare {
        test: Ordering::is_lt,
        coerce: true,
    };
    pub const LTE: Compare = Compare {
        test: Ordering::is_le,
        coerce: true,
    };
    pub const GT: Compare = Compare {
        test: Ordering::is_gt,
        coerce: true,
    };
    pub const GTE: Compare = Compare {
        test: Ordering::is_ge,
        coerce: true,
    };
    /// Equality after numeric coercion
    pub const MATE: Compare = Compare {
        test: Ordering::is_eq,
        coerce: true,
    };
    /// Equality of kind and value
    pub const MATCH: Compare = Compare {
        test: Ordering::is_eq,
        coerce: false,
    };
}

impl BinaryPervasive for Compare {
    fn atoms(&self, a: &Value, b: &Value) -> Value {
        let res = if self.coerce {
            (self.test)(coerced_cmp(a, b))
        } else {
            match_atoms(a, b)
        };
        Value::from(res)
    }
    fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
        fn cmp<T: Element + Copy>(a: &Array<T>, b: &Array<T>, test: fn(Ordering) -> bool) -> Option<Value> {
            Some(zip(a, b, |x, y| Some(test(x.up_cmp(&y))))?.into())
        }
        match (a, b) {
            (Value::Bool(a), Value::Bool(b)) => cmp(a, b, self.test),
            (Value::Int(a), Value::Int(b)) => cmp(a, b, self.test),
            (Value::Real(a), Value::Real(b)) => cmp(a, b, self.test),
            (Value::Char(a), Value::Char(b)) => cmp(a, b, self.test),
            _ => None,
        }
    }
    fn coerces(&self) -> bool {
        self.coerce
    }
}

/// The fault rules shared by the logical operators
fn logical_atoms(a: &Value, b: &Value, f: impl FnOnce(bool, bool) -> bool) -> Value {
    match (a, b) {
        (Value::Fault(x), Value::Fault(y)) => Fault::logical_pair(x, y).into(),
        (Value::Fault(x), _) | (_, Value::Fault(x)) => x.clone().into(),
        _ => match (a.as_bool(), b.as_bool()) {
            (Some(a), Some(b)) => f(a, b).into(),
            _ => Fault::Logical.into(),
        },
    }
}

pub mod and {
    use super::*;
    pub struct And;
    impl BinaryPervasive for And {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            logical_atoms(a, b, |a, b| a && b)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            let (Value::Bool(x), Value::Bool(y)) = (a, b) else {
                return None;
            };
            Some(match (x.is_atom(), y.is_atom()) {
                (true, false) if x.data[0] => b.clone(),
                (false, true) if y.data[0] => a.clone(),
                (true, false) | (false, true) => {
                    let shape = if x.is_atom() { &y.shape } else { &x.shape };
                    Array::<bool>::filled(shape.clone()).into()
                }
                _ => bool_words(x, y, |a, b| a & b).into(),
            })
        }
    }
}

pub mod or {
    use super::*;
    pub struct Or;
    impl BinaryPervasive for Or {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            logical_atoms(a, b, |a, b| a || b)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            let (Value::Bool(x), Value::Bool(y)) = (a, b) else {
                return None;
            };
            Some(match (x.is_atom(), y.is_atom()) {
                (true, false) if !x.data[0] => b.clone(),
                (false, true) if !y.data[0] => a.clone(),
                _ => bool_words(x, y, |a, b| a | b).into(),
            })
        }
    }
}

pub mod xor {
    use super::*;
    pub struct Xor;
    impl BinaryPervasive for Xor {
        fn atoms(&self, a: &Value, b: &Value) -> Value {
            logical_atoms(a, b, |a, b| a != b)
        }
        fn fast(&self, a: &Value, b: &Value) -> Option<Value> {
            match (a, b) {
                (Value::Bool(a), Value::Bool(b)) => Some(bool_words(a, b, |a, b| a ^ b).into()),
                _ => None,
            }
        }
    }
}

pub mod not {
    use super::*;
    pub struct Not;
    impl UnaryPervasive for Not {
        fn atom(&self, a: &Value) -> Value {
            match a {
                Value::Fault(f) => f.clone().into(),
                a => match a.as_bool() {
                    Some(b) => (!b).into(),
                    None => Fault::Logical.into(),
                },
            }
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            match a {
                Value::Bool(a) => Some(map(a, |b| Some(!b))?.into()),
                _ => None,
            }
        }
    }
}

pub mod neg {
    use super::*;
    pub struct Neg;
    impl UnaryPervasive for Neg {
        fn atom(&self, a: &Value) -> Value {
            arith_atom(a, |a| match a {
                Value::Bool(b) => (-i64::from(b.data[0])).into(),
                Value::Int(i) => overflow(arith::neg(i.data[0])),
                Value::Real(r) => (-r.data[0]).into(),
                _ => Fault::Arith.into(),
            })
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            Some(match a {
                Value::Bool(a) => map(a, |b| Some(-i64::from(b)))?.into(),
                Value::Int(a) => map(a, arith::neg)?.into(),
                Value::Real(a) => map(a, |r| Some(-r))?.into(),
                _ => return None,
            })
        }
    }
}

pub mod abs {
    use super::*;
    pub struct Abs;
    impl UnaryPervasive for Abs {
        fn atom(&self, a: &Value) -> Value {
            arith_atom(a, |a| match a {
                Value::Bool(b) => i64::from(b.data[0]).into(),
                Value::Int(i) => overflow(arith::abs(i.data[0])),
                Value::Real(r) => r.data[0].abs().into(),
                _ => Fault::Arith.into(),
            })
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            Some(match a {
                Value::Bool(a) => map(a, |b| Some(i64::from(b)))?.into(),
                Value::Int(a) => map(a, arith::abs)?.into(),
                Value::Real(a) => map(a, |r| Some(r.abs()))?.into(),
                _ => return None,
            })
        }
    }
}

pub mod floor {
    use super::*;
    pub struct Floor;
    impl UnaryPervasive for Floor {
        fn atom(&self, a: &Value) -> Value {
            arith_atom(a, |a| match a {
                Value::Bool(b) => i64::from(b.data[0]).into(),
                Value::Int(_) => a.clone(),
                Value::Real(r) => or_fault(arith::floor(r.data[0])),
                _ => Fault::Arith.into(),
            })
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            Some(match a {
                Value::Bool(_) => a.clone().to_int(),
                Value::Int(_) => a.clone(),
                Value::Real(a) => map(a, |r| arith::floor(r).ok())?.into(),
                _ => return None,
            })
        }
    }
}

pub mod ceiling {
    use super::*;
    /// The ceiling is the opposite of the floor of the opposite
    pub struct Ceiling;
    impl UnaryPervasive for Ceiling {
        fn atom(&self, a: &Value) -> Value {
            match a {
                Value::Bool(b) => i64::from(b.data[0]).into(),
                Value::Int(_) => a.clone(),
                a => match floor::Floor.atom(&neg::Neg.atom(a)) {
                    down @ Value::Fault(_) => down,
                    down => neg::Neg.atom(&down),
                },
            }
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            Some(match a {
                Value::Bool(_) => a.clone().to_int(),
                Value::Int(_) => a.clone(),
                Value::Real(a) => map(a, |r| arith::floor(-r).ok().and_then(arith::neg))?.into(),
                _ => return None,
            })
        }
    }
}

pub mod recip {
    use super::*;
    pub struct Recip;
    impl UnaryPervasive for Recip {
        fn atom(&self, a: &Value) -> Value {
            div::Div.atoms(&Value::from(1.0), &a.clone().to_real())
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            match a.clone().to_real() {
                Value::Real(a) => Some(map(&a, |r| div::real_real(1.0, r))?.into()),
                _ => None,
            }
        }
    }
}

pub mod sign {
    use super::*;
    pub struct Sign;
    fn real_sign(r: f64) -> i64 {
        match real_cmp(r, 0.0) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
    impl UnaryPervasive for Sign {
        fn atom(&self, a: &Value) -> Value {
            arith_atom(a, |a| match a {
                Value::Bool(b) => i64::from(b.data[0]).into(),
                Value::Int(i) => i.data[0].signum().into(),
                Value::Real(r) => real_sign(r.data[0]).into(),
                _ => Fault::Arith.into(),
            })
        }
        fn fast(&self, a: &Value) -> Option<Value> {
            Some(match a {
                Value::Bool(_) => a.clone().to_int(),
                Value::Int(a) => map(a, |i| Some(i.signum()))?.into(),
                Value::Real(a) => map(a, |r| Some(real_sign(r)))?.into(),
                _ => return None,
            })
        }
    }
}
