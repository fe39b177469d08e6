//! Transformers that recurse over the structure of a value
//!
//! All of them keep their own work stacks, so the depth of the data never
//! becomes depth of the host stack.

use tracing::{debug, trace};

use crate::{
    algorithm::{
        loops::{each_with, Collector},
        structure,
    },
    array::Array,
    primitive::{Monadic, Operator},
    value::val_as_arr,
    Core, CoreResult, Fatal, Fault, Shape, Value,
};

fn invalid_test() -> Value {
    Fault::new("invalid test in RECUR").into()
}

/// Get a subarray of consecutive elements as a new value sharing storage
pub(crate) fn cell(val: &Value, start: usize, shape: Shape) -> Value {
    let len = shape.tally();
    val_as_arr!(val, atom => atom.clone(), |arr| {
        Array::new(shape, arr.data.slice(start..start + len)).into_value()
    })
}

/// Apply an operator to the subarrays formed by the last `n` axes
///
/// The results are assembled so that the leading axes of the argument come
/// first. They must agree in kind and shape.
pub fn rank<F: Operator + ?Sized>(f: &F, n: Value, a: Value, env: &Core) -> CoreResult<Value> {
    if a.is_propagating_fault() {
        return Ok(a);
    }
    let Some(n) = n.as_int() else {
        return Ok(Fault::new("invalid left arg to RANK transform").into());
    };
    if a.is_atomic() {
        return Ok(f.monadic(a, env)?.single());
    }
    let va = a.valence();
    let Some(n) = usize::try_from(n).ok().filter(|&n| n <= va) else {
        return Ok(Fault::new("left arg to RANK transform out of range").into());
    };
    if a.is_empty() {
        return Ok(a);
    }
    if n == 0 {
        let results = each_with(a, env, |x| f.monadic(x.single(), env))?;
        return structure::mix(results, env);
    }
    let (lead, cell_shape) = a.shape().split_at(va - n);
    let cell_len = cell_shape.tally();
    let count = lead.tally();
    let mut results: Vec<Value> = Vec::with_capacity(count);
    for i in 0..count {
        let res = f.monadic(cell(&a, i * cell_len, cell_shape.clone()), env)?;
        if let Some(first) = results.first() {
            if first.kind() != res.kind() || first.shape() != res.shape() {
                trace!(first = ?first.shape(), this = ?res.shape(), "rank results disagree");
                return Ok(Fault::new("inconsistent results in RANK transform").into());
            }
        }
        results.push(res);
    }
    let mut shape = lead;
    shape.extend_from_slice(results[0].shape());
    let mut out = Collector::new(shape, env)?;
    for res in results {
        for item in res.into_items() {
            out.push(item);
        }
    }
    Ok(out.finish())
}

enum Task {
    Descend(Value),
    Join(Shape, usize),
}

/// Divide and conquer over a value
///
/// If `test` holds for a value, `endf` finishes it. Otherwise `structf`
/// splits it into parts, each part is processed in turn, and `joinf`
/// combines the results, arranged in the shape of the parts.
pub fn down<T, E, S, J>(test: &T, endf: &E, structf: &S, joinf: &J, a: Value, env: &Core) -> CoreResult<Value>
where
    T: Operator + ?Sized,
    E: Operator + ?Sized,
    S: Operator + ?Sized,
    J: Operator + ?Sized,
{
    let mut tasks = vec![Task::Descend(a)];
    let mut results: Vec<Value> = Vec::new();
    let mut high_water = 0;
    while let Some(task) = tasks.pop() {
        high_water = high_water.max(tasks.len() + 1);
        match task {
            Task::Descend(x) => match test.monadic(x.clone(), env)?.as_bool() {
                Some(true) => results.push(endf.monadic(x, env)?),
                Some(false) => {
                    let parts = structf.monadic(x, env)?;
                    tasks.push(Task::Join(parts.shape().clone(), parts.tally()));
                    let parts = parts.into_items();
                    tasks.extend(parts.into_iter().rev().map(Task::Descend));
                }
                None => return Ok(invalid_test()),
            },
            Task::Join(shape, n) => {
                let start = results.len().checked_sub(n).ok_or_else(|| {
                    Fatal::invariant("recursion joined more results than it produced")
                })?;
                let parts = results.split_off(start);
                let joined = Value::from_items(shape, parts);
                results.push(joinf.monadic(joined, env)?);
            }
        }
    }
    debug!(high_water, "down finished");
    results
        .pop()
        .ok_or_else(|| Fatal::invariant("recursion produced no result"))
}

/// Fold a list from the right, mapping each item first
///
/// The innermost result is `endf` applied to the empty list.
pub fn across<E, P, J>(endf: &E, parta: &P, joinf: &J, a: Value, env: &Core) -> CoreResult<Value>
where
    E: Operator + ?Sized,
    P: Operator + ?Sized,
    J: Operator + ?Sized,
{
    if a.is_propagating_fault() {
        return Ok(a);
    }
    let mut res = endf.monadic(Value::null(), env)?;
    for item in a.into_items().into_iter().rev() {
        let part = parta.monadic(item, env)?;
        res = joinf.dyadic(part, res, env)?;
    }
    Ok(res)
}

/// Linear recursion
///
/// While `test` fails, `parta` takes a piece of the value and `partb` takes
/// the rest. The pieces are then combined by `joinf` from the innermost out,
/// starting from `endf` of what is left.
pub fn recur<T, E, P, J, Q>(
    test: &T,
    endf: &E,
    parta: &P,
    joinf: &J,
    partb: &Q,
    a: Value,
    env: &Core,
) -> CoreResult<Value>
where
    T: Operator + ?Sized,
    E: Operator + ?Sized,
    P: Operator + ?Sized,
    J: Operator + ?Sized,
    Q: Operator + ?Sized,
{
    let mut pieces = Vec::new();
    let mut a = a;
    loop {
        match test.monadic(a.clone(), env)?.as_bool() {
            Some(true) => break,
            Some(false) => {
                pieces.push(parta.monadic(a.clone(), env)?);
                a = partb.monadic(a, env)?;
            }
            None => return Ok(invalid_test()),
        }
    }
    let mut res = endf.monadic(a, env)?;
    while let Some(piece) = pieces.pop() {
        res = joinf.dyadic(piece, res, env)?;
    }
    Ok(res)
}

fn pass() -> Monadic<impl Fn(Value, &Core) -> CoreResult<Value>> {
    Monadic(|x: Value, _: &Core| Ok(x))
}

/// Apply an operator to every atom at any depth, keeping the structure
pub fn leaf<F: Operator + ?Sized>(f: &F, a: Value, env: &Core) -> CoreResult<Value> {
    let atomic = Monadic(|x: Value, _: &Core| Ok(Value::from(x.is_atomic())));
    down(&atomic, f, &pass(), &pass(), a, env)
}

/// Apply an operator to every simple subarray at any depth, keeping the
/// structure
pub fn twig<F: Operator + ?Sized>(f: &F, a: Value, env: &Core) -> CoreResult<Value> {
    let simple = Monadic(|x: Value, _: &Core| Ok(Value::from(x.is_simple())));
    down(&simple, f, &pass(), &pass(), a, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dyadic, Prim};

    fn ints(v: &[i64]) -> Value {
        Value::from(v.to_vec())
    }

    #[test]
    fn rank_over_rows() {
        let env = Core::default();
        let table = Value::Int(Array::new([2, 3], [1i64, 2, 3, 4, 5, 6]));
        let res = rank(&Prim::Plus, Value::from(1i64), table.clone(), &env).unwrap();
        assert_eq!(res, ints(&[6, 15]));
        let res = rank(&Prim::Reverse, Value::from(1i64), table.clone(), &env).unwrap();
        assert_eq!(res, Value::Int(Array::new([2, 3], [3i64, 2, 1, 6, 5, 4])));
        let res = rank(&Prim::Tally, Value::from(2i64), table.clone(), &env).unwrap();
        assert_eq!(res, Value::from(6i64));
        let res = rank(&Prim::Plus, Value::from(3i64), table.clone(), &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("left arg to RANK transform out of range")));
        let res = rank(&Prim::Plus, Value::from('x'), table, &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("invalid left arg to RANK transform")));
    }

    #[test]
    fn rank_inconsistent() {
        let env = Core::default();
        let f = Monadic(|x: Value, _: &Core| {
            Ok(if x.item(0).as_int() == Some(1) {
                Value::from(vec![1i64, 2])
            } else {
                Value::from(0i64)
            })
        });
        let table = Value::Int(Array::new([2, 2], [1i64, 2, 3, 4]));
        let res = rank(&f, Value::from(1i64), table, &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("inconsistent results in RANK transform")));
    }

    #[test]
    fn down_sums_leaves() {
        let env = Core::default();
        let nested = Value::list(vec![
            Value::from(1i64),
            Value::list(vec![Value::from(2i64), ints(&[3, 4])]),
        ]);
        let atomic = Monadic(|x: Value, _: &Core| Ok(Value::from(x.is_atomic())));
        let res = down(&atomic, &Prim::Pass, &Prim::Pass, &Prim::Plus, nested, &env).unwrap();
        assert_eq!(res, Value::from(10i64));
        let bad = Monadic(|_: Value, _: &Core| Ok(Value::from(1i64)));
        let res = down(&bad, &Prim::Pass, &Prim::Pass, &Prim::Pass, Value::null(), &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("invalid test in RECUR")));
    }

    #[test]
    fn deep_structure_does_not_recurse() {
        let env = Core::default();
        let mut nested = Value::from(1i64);
        for _ in 0..50_000 {
            nested = Value::list(vec![nested, Value::from(1i64)]);
        }
        let res = leaf(&Prim::Opposite, nested, &env).unwrap();
        let total = down(
            &Monadic(|x: Value, _: &Core| Ok(Value::from(x.is_atomic()))),
            &Prim::Pass,
            &Prim::Pass,
            &Prim::Plus,
            res,
            &env,
        )
        .unwrap();
        assert_eq!(total, Value::from(-50_001i64));
    }

    #[test]
    fn leaf_and_twig() {
        let env = Core::default();
        let nested = Value::list(vec![Value::from(1i64), ints(&[2, 3])]);
        let res = leaf(&Prim::Opposite, nested.clone(), &env).unwrap();
        assert_eq!(res, Value::list(vec![Value::from(-1i64), ints(&[-2, -3])]));
        let res = twig(&Prim::Tally, nested, &env).unwrap();
        assert_eq!(res, Value::list(vec![Value::from(1i64), Value::from(2i64)]));
    }

    #[test]
    fn across_and_recur() {
        let env = Core::default();
        let zero = Monadic(|_: Value, _: &Core| Ok(Value::from(0i64)));
        let res = across(&zero, &Prim::Opposite, &Prim::Plus, ints(&[1, 2, 3]), &env).unwrap();
        assert_eq!(res, Value::from(-6i64));
        // factorial by linear recursion
        let is_zero = Monadic(|x: Value, _: &Core| Ok(Value::from(x.as_int() == Some(0))));
        let one = Monadic(|_: Value, _: &Core| Ok(Value::from(1i64)));
        let dec = Dyadic(|x: Value, y: Value, env: &Core| Prim::Minus.dyadic(x, y, env));
        let pred = Monadic(|x: Value, env: &Core| dec.dyadic(x, Value::from(1i64), env));
        let res = recur(&is_zero, &one, &Prim::Pass, &Prim::Times, &pred, Value::from(5i64), &env).unwrap();
        assert_eq!(res, Value::from(120i64));
    }
}
