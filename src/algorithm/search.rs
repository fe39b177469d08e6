//! Membership, occurrence search, and duplicate removal

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::{
    algorithm::{
        compare::{equal, up_cmp},
        sort::{check_sorted, up_order},
        structure::{self, address},
    },
    Core, CoreResult, Value,
};

/// The first index whose item is not below `x`, or past the end
fn lower_bound(x: &Value, y: &Value) -> usize {
    let (mut lo, mut hi) = (0, y.tally());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if up_cmp(&y.item(mid), x) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// The first index whose item is above `x`, or past the end
fn upper_bound(x: &Value, y: &Value) -> usize {
    let (mut lo, mut hi) = (0, y.tally());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if up_cmp(&y.item(mid), x) == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// The run of flat indices of `y` whose items equal `x`, when `y` is sorted
fn sorted_run(x: &Value, y: &Value) -> Option<(usize, usize)> {
    if !y.is_sorted() || y.is_empty() || y.is_atomic() {
        return None;
    }
    trace!(tally = y.tally(), "binary search");
    Some((lower_bound(x, y), upper_bound(x, y)))
}

/// The address of a flat index
///
/// Lists are addressed by integers.
fn address_of(y: &Value, i: usize) -> Value {
    match y.valence() {
        0 => Value::null(),
        1 => Value::from(i as i64),
        _ => address(y.shape(), i),
    }
}

/// The address one past the last item
fn gauge(y: &Value) -> Value {
    match y.valence() {
        0 => Value::null(),
        1 => Value::from(y.tally() as i64),
        _ => structure::shape_of(y),
    }
}

fn first_index(x: &Value, y: &Value) -> Option<usize> {
    match sorted_run(x, y) {
        Some((lo, hi)) => (lo < hi).then_some(lo),
        None => {
            trace!(tally = y.tally(), "linear search");
            y.items().position(|item| equal(&item, x))
        }
    }
}

/// Look for `x` among the items of `y`
///
/// The result pairs whether it was found with the address of its first
/// occurrence. A miss gives the address just past the end.
pub fn seek(x: Value, y: Value, _env: &Core) -> CoreResult<Value> {
    let (found, addr) = match first_index(&x, &y) {
        Some(i) => (true, address_of(&y, i)),
        None => (false, gauge(&y)),
    };
    Ok(Value::pair(found.into(), addr))
}

/// The address of the first occurrence of `x` among the items of `y`
pub fn find(x: Value, y: Value, _env: &Core) -> CoreResult<Value> {
    Ok(match first_index(&x, &y) {
        Some(i) => address_of(&y, i),
        None => gauge(&y),
    })
}

/// Whether `x` is an item of `y`
pub fn member(x: Value, y: Value, _env: &Core) -> CoreResult<Value> {
    Ok(first_index(&x, &y).is_some().into())
}

/// The addresses of every occurrence of `x` among the items of `y`
pub fn findall(x: Value, y: Value, _env: &Core) -> CoreResult<Value> {
    let indices: Vec<usize> = match sorted_run(&x, &y) {
        Some((lo, hi)) => (lo..hi).collect(),
        None => {
            trace!(tally = y.tally(), "linear search");
            (y.items().enumerate())
                .filter(|(_, item)| equal(item, &x))
                .map(|(i, _)| i)
                .collect()
        }
    };
    if indices.is_empty() {
        return Ok(Value::null());
    }
    let addrs: Vec<Value> = indices.into_iter().map(|i| address_of(&y, i)).collect();
    Ok(Value::from_items(crate::Shape::list(addrs.len()), addrs))
}

fn exceeds_crossover(a: usize, b: usize, env: &Core) -> bool {
    a.saturating_mul(b) > env.config().except_crossover
}

/// The items of a value with later duplicates removed, as a list
///
/// The first occurrences keep their order.
pub fn cull(x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() {
        return Ok(x);
    }
    let mut x = structure::list(x);
    let n = x.tally();
    if check_sorted(&mut x) {
        let keep: Vec<bool> = (0..n)
            .map(|i| i == 0 || !equal(&x.item(i - 1), &x.item(i)))
            .collect();
        return structure::sublist(keep.into(), x, env);
    }
    let items: Vec<Value> = x.items().collect();
    let mut keep = vec![false; n];
    if exceeds_crossover(n, n, env) {
        debug!(tally = n, "culling by sort and merge");
        let order = up_order(&items);
        for (k, &i) in order.iter().enumerate() {
            keep[i] = k == 0 || !equal(&items[order[k - 1]], &items[i]);
        }
    } else {
        debug!(tally = n, "culling by pairwise comparison");
        for i in 0..n {
            keep[i] = !(0..i).any(|j| keep[j] && equal(&items[j], &items[i]));
        }
    }
    structure::sublist(keep.into(), x, env)
}

/// The items of `x` that are not items of `y`, as a list
///
/// The kept items stay in their order in `x`, duplicates included.
pub fn except(x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() {
        return Ok(x);
    }
    let x = structure::list(x);
    let (tx, ty) = (x.tally(), y.tally());
    let xs: Vec<Value> = x.items().collect();
    let ys: Vec<Value> = y.items().collect();
    let keep: Vec<bool> = if tx == 1 || !exceeds_crossover(tx, ty, env) {
        debug!(tx, ty, "except by pairwise comparison");
        xs.iter().map(|a| !ys.iter().any(|b| equal(a, b))).collect()
    } else {
        debug!(tx, ty, "except by sort and merge");
        let x_order = up_order(&xs);
        let y_order = up_order(&ys);
        let mut keep = vec![true; tx];
        let mut j = 0;
        for &i in &x_order {
            while j < ty && up_cmp(&ys[y_order[j]], &xs[i]) == Ordering::Less {
                j += 1;
            }
            if j < ty && equal(&ys[y_order[j]], &xs[i]) {
                keep[i] = false;
            }
        }
        keep
    };
    if tx == 0 {
        return Ok(x);
    }
    structure::sublist(keep.into(), x, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreConfig, Fault};

    fn ints(v: &[i64]) -> Value {
        Value::from(v.to_vec())
    }

    fn sorted(v: &[i64]) -> Value {
        let mut x = ints(v);
        x.mark_sorted(true);
        x
    }

    #[test]
    fn seeking() {
        let env = Core::default();
        let res = seek(Value::from(3i64), ints(&[5, 3, 3]), &env).unwrap();
        assert_eq!(res, Value::pair(true.into(), Value::from(1i64)));
        let res = seek(Value::from(4i64), ints(&[5, 3, 3]), &env).unwrap();
        assert_eq!(res, Value::pair(false.into(), Value::from(3i64)));
        let res = seek(Value::from(3i64), sorted(&[1, 3, 3, 7]), &env).unwrap();
        assert_eq!(res, Value::pair(true.into(), Value::from(1i64)));
        let table = Value::from(vec!['a', 'b', 'c', 'd']);
        let table = structure::reshape(ints(&[2, 2]), table, &env).unwrap();
        assert_eq!(find(Value::from('c'), table.clone(), &env).unwrap(), ints(&[1, 0]));
        assert_eq!(find(Value::from('z'), table, &env).unwrap(), ints(&[2, 2]));
    }

    #[test]
    fn membership() {
        let env = Core::default();
        let x = ints(&[5, 3, 3]);
        assert_eq!(member(Value::from(3i64), x.clone(), &env).unwrap(), Value::from(true));
        assert_eq!(member(Value::from(4i64), x, &env).unwrap(), Value::from(false));
        assert_eq!(member(Value::from(7i64), sorted(&[1, 3, 7]), &env).unwrap(), Value::from(true));
        assert_eq!(member(Value::from(2i64), sorted(&[1, 3, 7]), &env).unwrap(), Value::from(false));
        let words = Value::list(vec![Value::string("ab"), Value::phrase("ab")]);
        assert_eq!(member(Value::phrase("ab"), words.clone(), &env).unwrap(), Value::from(true));
        assert_eq!(member(Value::string("ba"), words, &env).unwrap(), Value::from(false));
    }

    #[test]
    fn binary_and_linear_agree() {
        let env = Core::default();
        let data = [0, 1, 1, 2, 4, 4, 4, 9];
        for x in -1i64..11 {
            let fast = findall(Value::from(x), sorted(&data), &env).unwrap();
            let slow = findall(Value::from(x), ints(&data), &env).unwrap();
            assert_eq!(fast, slow, "{x}");
        }
        let all = findall(Value::from(4i64), sorted(&data), &env).unwrap();
        assert_eq!(all, ints(&[4, 5, 6]));
    }

    #[test]
    fn culling() {
        let env = Core::default();
        let x = ints(&[3, 1, 3, 2, 1]);
        let res = cull(x.clone(), &env).unwrap();
        assert_eq!(res, ints(&[3, 1, 2]));
        assert_eq!(cull(res.clone(), &env).unwrap(), res);
        let merged = Core::new(CoreConfig {
            except_crossover: 0,
            ..CoreConfig::default()
        });
        assert_eq!(cull(x, &merged).unwrap(), ints(&[3, 1, 2]));
        let res = cull(sorted(&[1, 1, 2]), &env).unwrap();
        assert_eq!(res, ints(&[1, 2]));
        assert!(res.is_sorted());
        let fault = Value::fault(Fault::Conform);
        assert_eq!(cull(fault.clone(), &env).unwrap(), fault);
    }

    #[test]
    fn excepting() {
        let merged = Core::new(CoreConfig {
            except_crossover: 0,
            ..CoreConfig::default()
        });
        for env in [Core::default(), merged] {
            let res = except(ints(&[1, 2, 2, 3]), ints(&[2]), &env).unwrap();
            assert_eq!(res, ints(&[1, 3]));
            let res = except(ints(&[4, 1, 4, 2]), ints(&[2, 9]), &env).unwrap();
            assert_eq!(res, ints(&[4, 1, 4]));
            let res = except(ints(&[1, 2]), ints(&[1, 2]), &env).unwrap();
            assert!(res.is_empty());
        }
    }
}
