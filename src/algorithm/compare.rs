//! Structural equality and the canonical total order
//!
//! Neither walk uses the host stack, so arbitrarily deep nesting is fine.

use std::{borrow::Cow, cmp::Ordering};

use crate::{array::*, Fault, Value};

/// Get an item, borrowing it when it is stored as a value
fn item_cow<'a>(val: &Cow<'a, Value>, i: usize) -> Cow<'a, Value> {
    match val {
        Cow::Borrowed(v) => {
            let v: &'a Value = v;
            match v {
                Value::Hetero(arr) => Cow::Borrowed(&arr.data[i]),
                v => Cow::Owned(v.item(i)),
            }
        }
        Cow::Owned(v) => Cow::Owned(v.item(i)),
    }
}

/// Compare two numeric atoms by value alone
fn num_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Real(_), _) | (_, Value::Real(_)) => {
            let (a, b) = (a.as_real().unwrap_or(0.0), b.as_real().unwrap_or(0.0));
            real_cmp(a, b)
        }
        _ => {
            let int = |v: &Value| v.as_int().or_else(|| v.as_bool().map(i64::from));
            int(a).cmp(&int(b))
        }
    }
}

/// Sentinel faults sit below or above every other value, atom or not
fn sentinel_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    Some(match (a.as_fault(), b.as_fault()) {
        (Some(x), Some(y)) if x == y => return None,
        (Some(Fault::Bottom), _) | (_, Some(Fault::Top)) => Ordering::Less,
        (Some(Fault::Top), _) | (_, Some(Fault::Bottom)) => Ordering::Greater,
        _ => return None,
    })
}

/// Compare two atoms in the canonical order
///
/// Atoms of different classes order numbers, then characters, then phrases,
/// then faults. Numbers of equal value order by kind.
pub(crate) fn atom_cmp(a: &Value, b: &Value) -> Ordering {
    atom_cmp_impl(a, b, true)
}

/// Compare two atoms the way the pervasive comparisons do
///
/// Numbers of equal value but different kinds compare equal.
pub(crate) fn coerced_cmp(a: &Value, b: &Value) -> Ordering {
    atom_cmp_impl(a, b, false)
}

fn atom_cmp_impl(a: &Value, b: &Value, by_kind: bool) -> Ordering {
    if let Some(ord) = sentinel_cmp(a, b) {
        return ord;
    }
    let (ka, kb) = (a.kind(), b.kind());
    if ka.class() != kb.class() {
        return ka.class().cmp(&kb.class());
    }
    match (a, b) {
        (Value::Char(x), Value::Char(y)) => x.data[0].cmp(&y.data[0]),
        (Value::Phrase(x), Value::Phrase(y)) => x.cmp(y),
        (Value::Fault(x), Value::Fault(y)) => x.cmp(y),
        _ if by_kind => num_cmp(a, b).then(ka.cmp(&kb)),
        _ => num_cmp(a, b),
    }
}

/// Whether two atoms are identical, kind included
pub(crate) fn match_atoms(a: &Value, b: &Value) -> bool {
    a.kind() == b.kind() && atom_cmp(a, b) == Ordering::Equal
}

fn slices_same<T: Element>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.same(b))
}

/// Structural equality
///
/// Containers are equal when their shapes are equal and their items are
/// pairwise equal, whatever their storage. Atoms must agree in kind.
pub fn equal(a: &Value, b: &Value) -> bool {
    let mut stack = vec![(Cow::Borrowed(a), Cow::Borrowed(b))];
    while let Some((a, b)) = stack.pop() {
        match (a.is_atomic(), b.is_atomic()) {
            (true, true) => {
                if !match_atoms(&a, &b) {
                    return false;
                }
                continue;
            }
            (false, false) => {}
            _ => return false,
        }
        if a.shape() != b.shape() {
            return false;
        }
        let same = match (&*a, &*b) {
            (Value::Bool(x), Value::Bool(y)) => slices_same(x.data(), y.data()),
            (Value::Int(x), Value::Int(y)) => slices_same(x.data(), y.data()),
            (Value::Real(x), Value::Real(y)) => slices_same(x.data(), y.data()),
            (Value::Char(x), Value::Char(y)) => slices_same(x.data(), y.data()),
            _ => {
                for i in 0..a.tally() {
                    stack.push((item_cow(&a, i), item_cow(&b, i)));
                }
                true
            }
        };
        if !same {
            return false;
        }
    }
    true
}

/// Compare two dense slices of one element type, falling back to tally and
/// shape when one is a prefix of the other
fn homogeneous_cmp<T: Element>(a: &Array<T>, b: &Array<T>) -> Ordering {
    for (x, y) in a.data().iter().zip(b.data()) {
        match x.up_cmp(y) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    tail_cmp(a.tally(), &a.shape, b.tally(), &b.shape)
}

fn tail_cmp(ta: usize, sa: &crate::Shape, tb: usize, sb: &crate::Shape) -> Ordering {
    ta.cmp(&tb)
        .then_with(|| sa.cmp(sb))
        .then_with(|| sa.len().cmp(&sb.len()))
}

/// The canonical total order
///
/// Containers compare by their first unequal pair of items in row-major
/// order, then by tally, then by shape. An empty container is below any
/// non-empty one. The result is [`Ordering::Equal`] exactly when
/// [`equal`] holds.
pub fn up_cmp(a: &Value, b: &Value) -> Ordering {
    let mut a = Cow::Borrowed(a);
    let mut b = Cow::Borrowed(b);
    loop {
        if a.is_atomic() && b.is_atomic() {
            return atom_cmp(&a, &b);
        }
        if let Some(ord) = sentinel_cmp(&a, &b) {
            return ord;
        }
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return a.shape().cmp(b.shape()),
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        match (&*a, &*b) {
            (Value::Bool(x), Value::Bool(y)) => return homogeneous_cmp(x, y),
            (Value::Int(x), Value::Int(y)) => return homogeneous_cmp(x, y),
            (Value::Real(x), Value::Real(y)) => return homogeneous_cmp(x, y),
            (Value::Char(x), Value::Char(y)) => return homogeneous_cmp(x, y),
            _ => {}
        }
        let n = a.tally().min(b.tally());
        let diverging = (0..n)
            .map(|i| (item_cow(&a, i), item_cow(&b, i)))
            .find(|(x, y)| !equal(x, y));
        match diverging {
            Some((x, y)) => {
                a = x;
                b = y;
            }
            None => return tail_cmp(a.tally(), a.shape(), b.tally(), b.shape()),
        }
    }
}

/// Whether `a` comes no later than `b` in the canonical order
pub fn up(a: &Value, b: &Value) -> bool {
    up_cmp(a, b) != Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Phrase;

    fn int(i: i64) -> Value {
        Value::from(i)
    }

    #[test]
    fn equality_ignores_storage() {
        let hetero = Value::Hetero(Array::list(vec![int(1), int(2)]));
        assert_eq!(hetero.kind(), crate::Kind::Hetero);
        assert!(equal(&hetero, &Value::from(vec![1i64, 2])));
        assert!(!equal(&int(1), &Value::from(1.0)));
        assert!(!equal(&int(1), &Value::from(true)));
        assert!(equal(&Value::null(), &Value::from(Vec::<i64>::new())));
        assert!(!equal(&Value::from(vec![1i64]), &int(1)));
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let mut a = int(0);
        let mut b = int(0);
        for _ in 0..100_000 {
            a = Value::list(vec![a]);
            b = Value::list(vec![b]);
        }
        assert!(equal(&a, &b));
        assert_eq!(up_cmp(&a, &b), Ordering::Equal);
        drop(a);
        drop(b);
    }

    #[test]
    fn class_order() {
        let values = [
            Value::fault(Fault::Bottom),
            Value::from(false),
            Value::from(1i64),
            Value::from(1.5),
            Value::from('a'),
            Value::Phrase(Phrase::new("abc")),
            Value::fault(Fault::Arith),
            Value::fault(Fault::Top),
        ];
        for w in values.windows(2) {
            assert_eq!(up_cmp(&w[0], &w[1]), Ordering::Less, "{:?} vs {:?}", w[0], w[1]);
        }
        assert_eq!(up_cmp(&Value::from(1i64), &Value::from(1.0)), Ordering::Less);
        assert_eq!(coerced_cmp(&Value::from(1i64), &Value::from(1.0)), Ordering::Equal);
    }

    #[test]
    fn containers_order_by_first_difference() {
        let a = Value::from(vec![1i64, 2, 3]);
        let b = Value::from(vec![1i64, 3]);
        assert_eq!(up_cmp(&a, &b), Ordering::Less);
        let c = Value::from(vec![1i64, 2]);
        assert_eq!(up_cmp(&c, &a), Ordering::Less);
        assert_eq!(up_cmp(&Value::null(), &int(-5)), Ordering::Less);
        assert_eq!(up_cmp(&Value::fault(Fault::Bottom), &Value::null()), Ordering::Less);
        let nested = Value::list(vec![Value::from(vec![1i64, 2]), int(0)]);
        let flat = Value::list(vec![int(1), int(0)]);
        assert_eq!(up_cmp(&flat, &nested), Ordering::Less);
    }
}
