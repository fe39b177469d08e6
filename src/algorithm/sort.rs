//! Sorting and grading

use std::{cmp::Ordering, convert::Infallible};

use tracing::{debug, trace};

use crate::{
    algorithm::{compare::up, structure::address},
    array::*,
    primitive::{Operator, Prim},
    value::val_as_arr,
    Core, CoreResult, Fatal, Fault, SortOp, Value,
};

/// Why a merge was abandoned
enum Abort {
    Invalid,
    Fatal(Fatal),
}

impl From<Fatal> for Abort {
    fn from(e: Fatal) -> Self {
        Abort::Fatal(e)
    }
}

/// Stable merge sort over item indices
///
/// Ascending runs already present are found first and then merged pairwise
/// until one remains. When `le(a, b)` holds for items from the left and
/// right runs, the left one goes first.
fn merge_order<E>(
    items: &[Value],
    mut le: impl FnMut(&Value, &Value) -> Result<bool, E>,
) -> Result<Vec<usize>, E> {
    let n = items.len();
    let mut bounds = vec![0];
    for i in 1..n {
        if !le(&items[i - 1], &items[i])? {
            bounds.push(i);
        }
    }
    bounds.push(n);
    let mut src: Vec<usize> = (0..n).collect();
    let mut dst = vec![0; n];
    while bounds.len() > 2 {
        let mut next = Vec::with_capacity(bounds.len() / 2 + 2);
        next.push(0);
        for w in bounds.windows(3).step_by(2) {
            let (start, mid, end) = (w[0], w[1], w[2]);
            let (mut i, mut j, mut k) = (start, mid, start);
            while i < mid && j < end {
                if le(&items[src[i]], &items[src[j]])? {
                    dst[k] = src[i];
                    i += 1;
                } else {
                    dst[k] = src[j];
                    j += 1;
                }
                k += 1;
            }
            dst[k..k + mid - i].copy_from_slice(&src[i..mid]);
            k += mid - i;
            dst[k..end].copy_from_slice(&src[j..end]);
            next.push(end);
        }
        // An odd run out is carried over as is
        let last = *next.last().unwrap_or(&0);
        if last < n {
            dst[last..n].copy_from_slice(&src[last..n]);
            next.push(n);
        }
        std::mem::swap(&mut src, &mut dst);
        bounds = next;
    }
    Ok(src)
}

/// The stable ordering of items under the canonical order
pub(crate) fn up_order(items: &[Value]) -> Vec<usize> {
    merge_order(items, |a, b| Ok::<_, Infallible>(up(a, b))).unwrap_or_else(|never| match never {})
}

/// Order items by an operator, which must answer with booleans
fn operator_order<F: Operator + ?Sized>(
    f: &F,
    items: &[Value],
    env: &Core,
) -> Result<Vec<usize>, Abort> {
    if f.prim() == Some(Prim::Up) {
        return Ok(up_order(items));
    }
    merge_order(items, |a, b| {
        f.dyadic(a.clone(), b.clone(), env)?
            .as_bool()
            .ok_or(Abort::Invalid)
    })
}

/// Whether the sort can be skipped because the items are known to be in
/// canonical order
fn already_sorted<F: Operator + ?Sized>(f: &F, x: &mut Value, env: &Core) -> bool {
    if f.prim() != Some(Prim::Up) {
        return false;
    }
    if x.is_sorted() {
        trace!("sortedness flag hit");
        return true;
    }
    env.config().check_sorted_scan && check_sorted(x)
}

/// Reorder the items of a value by a comparison operator
///
/// `f(a, b)` should be true when `a` may come before `b`. Items the operator
/// cannot tell apart keep their relative order.
pub fn sort<F: Operator + ?Sized>(f: &F, mut x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() || x.is_atomic() {
        return Ok(x);
    }
    if already_sorted(f, &mut x, env) {
        return Ok(x);
    }
    let items = x.items().collect::<Vec<_>>();
    let order = match operator_order(f, &items, env) {
        Ok(order) => order,
        Err(Abort::Invalid) => return Ok(Fault::InvalidComparison(SortOp::Sort).into()),
        Err(Abort::Fatal(e)) => return Err(e),
    };
    let sorted: Vec<Value> = order.into_iter().map(|i| items[i].clone()).collect();
    let mut res = Value::from_items(x.shape().clone(), sorted);
    res.mark_sorted(f.prim() == Some(Prim::Up));
    Ok(res)
}

/// The addresses of the items of a value in the order [`sort`] would put
/// them
///
/// Lists grade to integer indices.
pub fn grade<F: Operator + ?Sized>(f: &F, mut x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() {
        return Ok(x);
    }
    if x.valence() == 0 {
        return Ok(Value::null().single());
    }
    let order = if already_sorted(f, &mut x, env) {
        (0..x.tally()).collect()
    } else {
        let items = x.items().collect::<Vec<_>>();
        match operator_order(f, &items, env) {
            Ok(order) => order,
            Err(Abort::Invalid) => return Ok(Fault::InvalidComparison(SortOp::Grade).into()),
            Err(Abort::Fatal(e)) => return Err(e),
        }
    };
    let shape = x.shape();
    Ok(if x.valence() == 1 {
        order.into_iter().map(|i| i as i64).collect()
    } else {
        let addrs: Vec<Value> = order.into_iter().map(|i| address(shape, i)).collect();
        Value::Hetero(Array::new(shape.clone(), addrs))
    })
}

/// Sort by the canonical order
pub fn sortup(x: Value, env: &Core) -> CoreResult<Value> {
    sort(&Prim::Up, x, env)
}

/// Grade by the canonical order
pub fn gradeup(x: Value, env: &Core) -> CoreResult<Value> {
    grade(&Prim::Up, x, env)
}

/// Confirm that the items are in canonical order, setting the flag if so
pub fn check_sorted(x: &mut Value) -> bool {
    if x.is_sorted() {
        return true;
    }
    let sorted = val_as_arr!(&*x, _atom => true, |arr| arr.scan_sorted());
    if sorted {
        x.mark_sorted(true);
    }
    sorted
}

/// Sort dense elements in place without recursion
///
/// Partitions are three-way around a median of three and are pushed on an
/// explicit stack, the larger first. Partitions shorter than `cutoff` are
/// left for one insertion pass at the end.
fn quicksort<T: Clone>(v: &mut [T], cutoff: usize, cmp: impl Fn(&T, &T) -> Ordering) {
    use Ordering::*;
    let cutoff = cutoff.max(3);
    let mut stack = vec![(0, v.len())];
    while let Some((lo, hi)) = stack.pop() {
        if hi - lo < cutoff {
            continue;
        }
        let mid = lo + (hi - lo) / 2;
        if cmp(&v[mid], &v[lo]) == Less {
            v.swap(mid, lo);
        }
        if cmp(&v[hi - 1], &v[lo]) == Less {
            v.swap(hi - 1, lo);
        }
        if cmp(&v[hi - 1], &v[mid]) == Less {
            v.swap(hi - 1, mid);
        }
        let pivot = v[mid].clone();
        let (mut lt, mut i, mut gt) = (lo, lo, hi);
        while i < gt {
            match cmp(&v[i], &pivot) {
                Less => {
                    v.swap(lt, i);
                    lt += 1;
                    i += 1;
                }
                Greater => {
                    gt -= 1;
                    v.swap(i, gt);
                }
                Equal => i += 1,
            }
        }
        let (left, right) = ((lo, lt), (gt, hi));
        if lt - lo > hi - gt {
            stack.push(left);
            stack.push(right);
        } else {
            stack.push(right);
            stack.push(left);
        }
    }
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp(&v[j - 1], &v[j]) == Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn quicksorted<T: Element>(mut arr: Array<T>, env: &Core) -> Value {
    quicksort(arr.data_mut(), env.config().quicksort_cutoff, T::up_cmp);
    arr.with_sorted(true).into_value()
}

/// Sort by the canonical order, quicksorting dense containers
///
/// The result is the same as [`sortup`].
pub fn fast_sort(x: Value, env: &Core) -> CoreResult<Value> {
    if matches!(x, Value::Phrase(_) | Value::Fault(_)) {
        return Ok(Fault::new("invalid qsort type").into());
    }
    if x.is_sorted() {
        return Ok(x);
    }
    Ok(match x {
        Value::Bool(arr) => quicksorted(arr, env),
        Value::Int(arr) => quicksorted(arr, env),
        Value::Real(arr) => quicksorted(arr, env),
        Value::Char(arr) => quicksorted(arr, env),
        Value::Hetero(arr) => {
            debug!(tally = arr.tally(), "merge sorting a heterogeneous container");
            return sortup(Value::Hetero(arr), env);
        }
        atom => atom,
    })
}
