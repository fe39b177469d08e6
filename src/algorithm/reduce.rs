//! Folding an operator over the items of a value

use ecow::EcoVec;
use tracing::trace;

use crate::{
    algorithm::{
        loops::Collector,
        pervade::{add, and, bin_pervade, mul, or},
    },
    arith,
    array::Array,
    primitive::{Operator, Prim},
    Core, CoreResult, Fault, Value,
};

/// Fold from the right: `x0 f (x1 f (... f xn))`
fn fold_right(x: Value, mut f: impl FnMut(Value, Value) -> CoreResult<Value>) -> CoreResult<Value> {
    let mut items = x.into_items();
    let Some(mut res) = items.pop() else {
        return Ok(Fault::Identity.into());
    };
    while let Some(item) = items.pop() {
        res = f(item, res)?;
    }
    Ok(res)
}

/// Fold a non-empty slice of integers from the right, giving up on overflow
fn right_fold_ints(data: &[i64], f: fn(i64, i64) -> Option<i64>) -> Option<i64> {
    let (&last, init) = data.split_last()?;
    init.iter().rev().try_fold(last, |acc, &i| f(i, acc))
}

fn right_fold_reals(data: &[f64], f: fn(f64, f64) -> f64) -> Option<f64> {
    let (&last, init) = data.split_last()?;
    Some(init.iter().rev().fold(last, |acc, &r| f(r, acc)))
}

/// Combine the items of a value with an operator, associating to the right
///
/// Folding nothing is an identity fault.
pub fn reduce<F: Operator + ?Sized>(f: &F, x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() {
        return Ok(x);
    }
    if x.is_empty() {
        return Ok(Fault::Identity.into());
    }
    match f.prim() {
        Some(Prim::Plus) => sum(x, env),
        Some(Prim::Times) => product(x, env),
        Some(Prim::And) => all(x, env),
        Some(Prim::Or) => any(x, env),
        _ => fold_right(x, |a, b| f.dyadic(a, b, env)),
    }
}

/// The sum of the items, zero for none
pub fn sum(x: Value, env: &Core) -> CoreResult<Value> {
    Ok(match x {
        x if x.is_fault() => x,
        x if x.is_empty() => 0i64.into(),
        Value::Bool(arr) => (arr.data.iter().filter(|&&b| b).count() as i64).into(),
        Value::Int(arr) => match right_fold_ints(arr.data(), arith::add) {
            Some(total) => total.into(),
            None => {
                trace!("integer sum overflowed, folding item by item");
                fold_right(Value::Int(arr), |a, b| bin_pervade(a, b, &add::Add, env))?
            }
        },
        Value::Real(arr) => right_fold_reals(arr.data(), |a, b| a + b).unwrap_or(0.0).into(),
        x if x.is_atomic() => Fault::Arith.into(),
        x => fold_right(x, |a, b| bin_pervade(a, b, &add::Add, env))?,
    })
}

/// The product of the items, one for none
pub fn product(x: Value, env: &Core) -> CoreResult<Value> {
    Ok(match x {
        x if x.is_fault() => x,
        x if x.is_empty() => 1i64.into(),
        Value::Bool(arr) => i64::from(arr.data.iter().all(|&b| b)).into(),
        Value::Int(arr) => match right_fold_ints(arr.data(), arith::mul) {
            Some(total) => total.into(),
            None => {
                trace!("integer product overflowed, folding item by item");
                fold_right(Value::Int(arr), |a, b| bin_pervade(a, b, &mul::Mul, env))?
            }
        },
        Value::Real(arr) => right_fold_reals(arr.data(), |a, b| a * b).unwrap_or(1.0).into(),
        x if x.is_atomic() => Fault::Arith.into(),
        x => fold_right(x, |a, b| bin_pervade(a, b, &mul::Mul, env))?,
    })
}

/// Whether every item is true, true for none
pub fn all(x: Value, env: &Core) -> CoreResult<Value> {
    Ok(match x {
        x if x.is_fault() => x,
        x if x.is_empty() => true.into(),
        Value::Bool(arr) => arr.data.iter().all(|&b| b).into(),
        x if x.is_atomic() => Fault::Logical.into(),
        x => fold_right(x, |a, b| bin_pervade(a, b, &and::And, env))?,
    })
}

/// Whether any item is true, false for none
pub fn any(x: Value, env: &Core) -> CoreResult<Value> {
    Ok(match x {
        x if x.is_fault() => x,
        x if x.is_empty() => false.into(),
        Value::Bool(arr) => arr.data.iter().any(|&b| b).into(),
        x if x.is_atomic() => Fault::Logical.into(),
        x => fold_right(x, |a, b| bin_pervade(a, b, &or::Or, env))?,
    })
}

/// Reduce every prefix of the items
///
/// Associative primitives take a single left-to-right pass instead.
pub fn accumulate<F: Operator + ?Sized>(f: &F, x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() || x.tally() <= 1 {
        return Ok(x);
    }
    if f.prim().is_some_and(|p| p.is_associative()) {
        return leftaccumulate(f, x, env);
    }
    let shape = x.shape().clone();
    let items = x.into_items();
    let mut out = Collector::new(shape, env)?;
    for i in 0..items.len() {
        let mut res = items[i].clone();
        for item in items[..i].iter().rev() {
            res = f.dyadic(item.clone(), res, env)?;
        }
        out.push(res);
    }
    Ok(out.finish())
}

/// Accumulate from the left, combining each item with the result so far
pub fn leftaccumulate<F: Operator + ?Sized>(f: &F, x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() || x.tally() <= 1 {
        return Ok(x);
    }
    if let (Some(Prim::Plus), Value::Int(arr)) = (f.prim(), &x) {
        if let Some(sums) = running_sum(arr) {
            return Ok(sums.into());
        }
        trace!("running sum overflowed, accumulating item by item");
    }
    let shape = x.shape().clone();
    let mut out = Collector::new(shape, env)?;
    let mut items = x.into_items().into_iter();
    let Some(mut acc) = items.next() else {
        return Ok(out.finish());
    };
    out.push(acc.clone());
    for item in items {
        acc = f.dyadic(acc, item, env)?;
        out.push(acc.clone());
    }
    Ok(out.finish())
}

fn running_sum(arr: &Array<i64>) -> Option<Array<i64>> {
    let mut data = EcoVec::with_capacity(arr.tally());
    let mut acc = 0i64;
    for &i in arr.data() {
        acc = arith::add(acc, i)?;
        data.push(acc);
    }
    Some(Array::new(arr.shape.clone(), data))
}
