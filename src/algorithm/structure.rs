//! Structural operations: building, selecting, and rearranging items

use ecow::{eco_format, EcoVec};

use crate::{
    algorithm::{
        loops::{each_with, Collector},
        recur::cell,
        select::pick_ref,
    },
    array::*,
    value::val_as_arr,
    Core, CoreResult, Fault, Shape, Value,
};

/// A one-item list holding the value
pub fn solitary(x: Value) -> Value {
    let mut list = Value::from_items(Shape::list(1), [x]);
    list.mark_sorted(true);
    list
}

/// The items in row-major order as a list
pub fn list(x: Value) -> Value {
    if x.is_atomic() {
        return solitary(x);
    }
    let len = x.tally();
    val_as_arr!(x, atom => atom, |arr| arr.reshaped(Shape::list(len)).into_value())
}

pub fn first(x: Value) -> Value {
    if x.is_atomic() {
        x
    } else if x.is_empty() {
        Fault::Fill.into()
    } else {
        x.item(0)
    }
}

/// All but the first item, as a list
pub fn rest(x: Value) -> Value {
    if x.tally() <= 1 {
        return Value::null();
    }
    let sorted = x.is_sorted();
    let len = x.tally() - 1;
    let rest = val_as_arr!(x, atom => atom, |arr| {
        Array::new(Shape::list(len), arr.data.slice(1..)).into_value()
    });
    let mut rest = rest.implode();
    rest.mark_sorted(sorted);
    rest
}

/// The items in the opposite order, keeping the shape
pub fn reverse(x: Value) -> Value {
    if x.valence() == 0 || x.is_empty() {
        return x;
    }
    val_as_arr!(x, atom => atom, |arr| {
        let mut arr = arr;
        arr.data_mut().reverse();
        arr.into_value()
    })
}

/// The shape as a list of integers
pub fn shape_of(x: &Value) -> Value {
    x.shape().iter().map(|&d| d as i64).collect()
}

/// Interpret a value as a shape
///
/// An integer is a list length. A list of non-negative integers is a shape,
/// and any empty value is the shape of a single.
fn valid_shape(x: &Value) -> Option<Shape> {
    if x.is_empty() {
        return Some(Shape::scalar());
    }
    match x {
        Value::Int(arr) => arr
            .data
            .iter()
            .map(|&d| usize::try_from(d).ok())
            .collect::<Option<Shape>>()
            .filter(|_| arr.valence() <= 1),
        _ => None,
    }
}

/// The address of a flat index in an array of the given shape
pub(crate) fn address(shape: &Shape, flat: usize) -> Value {
    let mut index = Vec::with_capacity(shape.len());
    shape.flat_to_dims(flat, &mut index);
    index.into_iter().map(|i| i as i64).collect()
}

/// Find the flat index of the item at an address
///
/// An integer addresses a list, and an empty address selects the item of a
/// single.
pub(crate) fn flat_index(addr: &Value, x: &Value) -> Option<usize> {
    let index: Vec<usize> = match addr {
        Value::Int(arr) if arr.valence() <= 1 => arr
            .data
            .iter()
            .map(|&i| usize::try_from(i).ok())
            .collect::<Option<_>>()?,
        addr if addr.is_empty() => Vec::new(),
        _ => return None,
    };
    if index.len() != x.valence() {
        return None;
    }
    x.shape().dims_to_flat(&index)
}

/// Join the items of the items of a value into one list
pub fn link(x: Value, env: &Core) -> CoreResult<Value> {
    let Value::Hetero(arr) = x else {
        return Ok(list(x));
    };
    let total = arr.data.iter().map(Value::tally).sum();
    if total == 0 {
        return Ok(Value::null());
    }
    let mut out = Collector::new(Shape::list(total), env)?;
    for item in arr.data.iter() {
        for sub in item.items() {
            out.push(sub);
        }
    }
    Ok(out.finish())
}

/// Arrange the items of `y` into a new shape, repeating them as needed
pub fn reshape(shape: Value, y: Value, env: &Core) -> CoreResult<Value> {
    let Some(shape) = valid_shape(&shape) else {
        return Ok(Fault::new("shape").into());
    };
    let y = if y.is_atomic() && !y.kind().is_homogeneous() {
        solitary(y)
    } else {
        y
    };
    if shape.is_empty() {
        return Ok(if y.is_empty() {
            Fault::Fill.into()
        } else {
            first(y).single()
        });
    }
    let count = env.validate_shape(&shape)?;
    if count == 0 {
        return Ok(Value::Hetero(Array::empty(shape)));
    }
    if y.is_empty() {
        return Ok(Value::Hetero(Array::filled(shape)));
    }
    Ok(val_as_arr!(y, atom => solitary(atom), |arr| {
        let data: EcoVec<_> = arr.data.iter().cycle().take(count).cloned().collect();
        Array::new(shape, data).into_value()
    })
    .implode())
}

/// Count up to an integer, or list the addresses of an array of a shape
pub fn tell(x: Value, env: &Core) -> CoreResult<Value> {
    if let Some(n) = x.as_int() {
        let Ok(n) = usize::try_from(n) else {
            return Ok(Fault::new("shape").into());
        };
        if n == 0 {
            return Ok(Value::null());
        }
        env.validate_size(n)?;
        let mut res: Value = (0..n as i64).collect();
        res.mark_sorted(true);
        return Ok(res);
    }
    let Some(shape) = valid_shape(&x) else {
        return Ok(Fault::new("shape").into());
    };
    let count = env.validate_shape(&shape)?;
    let items: EcoVec<Value> = (0..count).map(|i| address(&shape, i)).collect();
    Ok(Value::Hetero(Array::new(shape, items).with_sorted(true)))
}

/// Select the items of `x` at the addresses in `addrs`
///
/// The result has the shape of `addrs`. A single address of an array of
/// valence two or more picks one item.
pub fn choose(addrs: Value, x: Value, env: &Core) -> CoreResult<Value> {
    if addrs.is_propagating_fault() {
        return Ok(addrs);
    }
    if addrs.is_atomic() || (x.valence() > 1 && matches!(addrs, Value::Int(_))) {
        return Ok(pick_ref(&addrs, &x));
    }
    if addrs.is_empty() {
        return Ok(Value::Hetero(Array::empty(addrs.shape().clone())));
    }
    let mut out = Collector::new(addrs.shape().clone(), env)?;
    for addr in addrs.items() {
        out.push(pick_ref(&addr, &x));
    }
    Ok(out.finish())
}

/// The items of `x` followed by `y`, as a list
///
/// Appending to an empty value gives the solitary of `y`, and appending to
/// an atom gives the pair.
pub fn append(x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    if x.is_empty() {
        return Ok(solitary(y));
    }
    if x.is_atomic() {
        return Ok(Value::pair(x, y));
    }
    let n = x.tally() + 1;
    env.validate_size(n)?;
    let mut items = x.into_items();
    items.push(y);
    Ok(Value::from_items(Shape::list(n), items))
}

/// `x` followed by the items of `y`, as a list
pub fn hitch(x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    if y.is_empty() {
        return Ok(solitary(x));
    }
    if y.is_atomic() {
        return Ok(Value::pair(x, y));
    }
    let n = y.tally() + 1;
    env.validate_size(n)?;
    let mut items = Vec::with_capacity(n);
    items.push(x);
    items.extend(y.into_items());
    Ok(Value::from_items(Shape::list(n), items))
}

/// The shape that the items of `x` are spread over by [`pack`]
///
/// Items with exactly one item are spread over every position. All other
/// items must share a shape.
fn pack_shape(x: &Value) -> Option<Shape> {
    let mut spread = None;
    let mut widest: Option<Shape> = None;
    for item in x.items() {
        if item.tally() == 1 {
            if widest.as_ref().map_or(true, |w| item.valence() > w.valence()) {
                widest = Some(item.shape().clone());
            }
            continue;
        }
        match &spread {
            Some(shape) if shape != item.shape() => return None,
            Some(_) => {}
            None => spread = Some(item.shape().clone()),
        }
    }
    spread.or(widest)
}

/// Interchange the outer and inner structure of an array of arrays
///
/// The item of the result at each position holds the item at that position
/// of every item of `x`, arranged in the shape of `x`. Items with one item
/// are repeated to fit and the other items must have the same shape, or the
/// result is a conform fault.
pub fn pack(x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_atomic() {
        return Ok(x);
    }
    if x.is_simple() {
        return Ok(x.single());
    }
    let parts = x.items().collect::<Vec<_>>();
    let first_shape = parts[0].shape();
    let shape = if parts.iter().all(|p| p.shape() == first_shape) {
        first_shape.clone()
    } else {
        match pack_shape(&x) {
            Some(shape) => shape,
            None => return Ok(Fault::Conform.into()),
        }
    };
    let count = env.validate_shape(&shape)?;
    let mut out = Collector::new(shape, env)?;
    for i in 0..count {
        let items: Vec<Value> = (parts.iter())
            .map(|p| p.item(if p.tally() == 1 { 0 } else { i }))
            .collect();
        out.push(Value::from_items(x.shape().clone(), items));
    }
    Ok(out.finish())
}

/// Every combination of one item from each item of `x`
///
/// The result's shape is the shapes of the items of `x` joined, and each
/// combination is arranged in the shape of `x`.
pub fn cart(x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_atomic() {
        return Ok(x);
    }
    if x.is_empty() || x.kind().is_homogeneous() {
        return Ok(x.single());
    }
    if x.valence() == 0 {
        return each_with(x.item(0), env, |item| Ok(item.single()));
    }
    let parts = x.items().collect::<Vec<_>>();
    let mut shape = Shape::scalar();
    for part in &parts {
        shape.extend_from_slice(part.shape());
    }
    let count = env.validate_shape(&shape)?;
    if count == 0 {
        return Ok(Value::Hetero(Array::empty(shape)));
    }
    let radices: Shape = parts.iter().map(Value::tally).collect();
    let mut index = Vec::with_capacity(parts.len());
    let mut out = Collector::new(shape, env)?;
    for i in 0..count {
        radices.flat_to_dims(i, &mut index);
        let combo: Vec<Value> = (parts.iter().zip(&index))
            .map(|(part, &k)| part.item(k))
            .collect();
        out.push(Value::from_items(x.shape().clone(), combo));
    }
    Ok(out.finish())
}

fn keep<T: Element>(arr: &Array<T>, mask: &[bool]) -> Array<T> {
    let data: EcoVec<T> = (arr.data.iter().zip(mask.iter().cycle()))
        .filter(|(_, &keep)| keep)
        .map(|(x, _)| x.clone())
        .collect();
    Array::list(data)
}

/// Keep the items of `y` whose corresponding boolean in `mask` is true
///
/// A mask of the wrong length is repeated to fit.
pub fn sublist(mask: Value, y: Value, env: &Core) -> CoreResult<Value> {
    let mask = match &mask {
        Value::Bool(arr) => arr.data.to_vec(),
        m if m.is_empty() => Vec::new(),
        _ => return Ok(Fault::new("first arg of sublist not boolean").into()),
    };
    if mask.is_empty() && !y.is_empty() {
        return Ok(Fault::new("first arg of sublist is empty").into());
    }
    env.validate_size(y.tally())?;
    let sorted = y.is_sorted();
    let y = list(y);
    let kept = val_as_arr!(&y, atom => atom.clone(), |arr| keep(arr, &mask).into_value());
    if kept.is_empty() {
        return Ok(Value::null());
    }
    let mut kept = kept.implode();
    kept.mark_sorted(sorted);
    Ok(kept)
}

/// Turn an array of equally shaped items into one array with the items'
/// axes appended
pub fn mix(x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_empty() {
        let mut shape = x.shape().clone();
        shape.push(0);
        return Ok(Value::Hetero(Array::empty(shape)));
    }
    let item_shape = x.item(0).shape().clone();
    if x.items().any(|item| *item.shape() != item_shape) {
        return Ok(Fault::Conform.into());
    }
    let mut shape = x.shape().clone();
    shape.extend_from_slice(&item_shape);
    let mut out = Collector::new(shape, env)?;
    for item in x.items() {
        for sub in item.items() {
            out.push(sub);
        }
    }
    Ok(out.finish())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cut {
    Take,
    Drop,
}

impl Cut {
    fn name(self) -> &'static str {
        match self {
            Cut::Take => "take",
            Cut::Drop => "drop",
        }
    }
    /// The start and length of the kept range of an axis of extent `dim`
    fn range(self, n: i64, dim: usize) -> (i64, usize) {
        let dim = dim as i64;
        let mag = n.unsigned_abs().min(i64::MAX as u64) as i64;
        match (self, n >= 0) {
            (Cut::Take, true) => (0, mag as usize),
            (Cut::Take, false) => (dim - mag, mag as usize),
            (Cut::Drop, true) => (mag.min(dim), (dim - mag).max(0) as usize),
            (Cut::Drop, false) => (0, (dim - mag).max(0) as usize),
        }
    }
}

fn cut_elems<T: Element>(arr: &Array<T>, starts: &[i64], lengths: &Shape) -> Array<T> {
    // A list range entirely inside the array shares storage
    if let ([start], [len]) = (starts, &lengths[..]) {
        if *start >= 0 && (*start as usize) + len <= arr.tally() {
            let start = *start as usize;
            return Array::new(lengths.clone(), arr.data.slice(start..start + len));
        }
    }
    let n = lengths.tally();
    let strides = arr.shape.strides();
    let mut data = EcoVec::with_capacity(n);
    let mut index = vec![0usize; lengths.len()];
    for _ in 0..n {
        let mut flat = Some(0);
        for (axis, &r) in index.iter().enumerate() {
            let s = starts[axis] + r as i64;
            flat = flat.filter(|_| s >= 0 && (s as usize) < arr.shape[axis]);
            flat = flat.map(|f| f + s as usize * strides[axis]);
        }
        data.push(flat.map_or_else(T::fill, |f| arr.data[f].clone()));
        for axis in (0..index.len()).rev() {
            index[axis] += 1;
            if index[axis] < lengths[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
    Array::new(lengths.clone(), data)
}

fn take_drop(x: Value, y: Value, cut: Cut, env: &Core) -> CoreResult<Value> {
    let Some(counts) = x.as_ints() else {
        let msg = eco_format!("left argument in {} must be integers", cut.name());
        return Ok(Fault::new(&msg).into());
    };
    if y.valence() == 0 {
        return Ok(match cut {
            Cut::Take => {
                let dims: Value = counts.iter().map(|n| n.saturating_abs()).collect();
                reshape(dims, y, env)?
            }
            Cut::Drop if counts.is_empty() => y,
            Cut::Drop => Value::null(),
        });
    }
    if counts.len() != y.valence() {
        let msg = eco_format!("valence error in {}", cut.name());
        return Ok(Fault::new(&msg).into());
    }
    let (starts, lengths): (Vec<i64>, Shape) = (counts.iter().zip(y.shape().iter()))
        .map(|(&n, &dim)| cut.range(n, dim))
        .unzip();
    let count = env.validate_shape(&lengths)?;
    if count == 0 {
        return Ok(Value::Hetero(Array::empty(lengths)));
    }
    // A list range that stays inside the list keeps the order of its items
    let sorted = y.is_sorted()
        && matches!((&starts[..], &lengths[..]), ([start], [len])
            if *start >= 0 && *start as usize + len <= y.tally());
    let res = val_as_arr!(&y, atom => atom.clone(), |arr| {
        cut_elems(arr, &starts, &lengths).into_value()
    });
    let mut res = res.implode();
    res.mark_sorted(sorted);
    Ok(res)
}

/// Keep the given number of items along each axis
///
/// Negative counts take from the end. Taking more than there are pads with
/// the fill element.
pub fn take(x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    take_drop(x, y, Cut::Take, env)
}

/// Remove the given number of items along each axis
///
/// Negative counts drop from the end.
pub fn drop(x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    take_drop(x, y, Cut::Drop, env)
}

/// Split an array into the subarrays spanned by its last axes
///
/// The result has the first `n` axes and each item has the rest.
pub fn raise(n: Value, y: Value, env: &Core) -> CoreResult<Value> {
    let Some(n) = n
        .as_int()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n <= y.valence())
    else {
        return Ok(Fault::new("first arg of raise not an axis number").into());
    };
    if y.is_atomic() {
        return Ok(y);
    }
    let v = y.valence();
    if n == v {
        if y.kind().is_homogeneous() {
            return Ok(y);
        }
        let mut out = Collector::new(y.shape().clone(), env)?;
        for item in y.items() {
            out.push(item.single());
        }
        return Ok(out.finish());
    }
    let (outer, inner) = y.shape().split_at(n);
    let count = env.validate_shape(&outer)?;
    let len = inner.tally();
    let cells: EcoVec<Value> = (0..count)
        .map(|i| cell(&y, i * len, inner.clone()).implode())
        .collect();
    Ok(Value::Hetero(Array::new(outer, cells)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Value {
        Value::from(v.to_vec())
    }

    #[test]
    fn lists_and_items() {
        assert_eq!(solitary(Value::from(3i64)), ints(&[3]));
        assert_eq!(solitary(ints(&[1, 2])).tally(), 1);
        assert_eq!(first(ints(&[4, 5])), Value::from(4i64));
        assert_eq!(first(Value::null()), Value::fault(Fault::Fill));
        assert_eq!(rest(ints(&[4, 5, 6])), ints(&[5, 6]));
        assert_eq!(rest(ints(&[4])), Value::null());
        let table = Value::Int(Array::new([2, 2], [1i64, 2, 3, 4]));
        assert_eq!(list(table.clone()), ints(&[1, 2, 3, 4]));
        assert_eq!(reverse(table), Value::Int(Array::new([2, 2], [4i64, 3, 2, 1])));
        assert_eq!(shape_of(&Value::from(1i64)), Value::null());
    }

    #[test]
    fn rest_keeps_sortedness() {
        let mut x = ints(&[1, 2, 3]);
        x.mark_sorted(true);
        assert!(rest(x.clone()).is_sorted());
        assert!(!reverse(x).is_sorted());
    }

    #[test]
    fn linking() {
        let env = Core::default();
        let x = Value::list(vec![ints(&[1, 2]), Value::from(3i64), Value::null()]);
        assert_eq!(link(x, &env).unwrap(), ints(&[1, 2, 3]));
        let x = Value::list(vec![Value::string("ab"), Value::from(1i64)]);
        let linked = link(x, &env).unwrap();
        assert_eq!(linked.tally(), 3);
        assert_eq!(linked.kind(), crate::Kind::Hetero);
    }

    #[test]
    fn reshaping() {
        let env = Core::default();
        let res = reshape(ints(&[2, 3]), ints(&[1, 2]), &env).unwrap();
        assert_eq!(res, Value::Int(Array::new([2, 3], [1i64, 2, 1, 2, 1, 2])));
        let res = reshape(ints(&[2]), Value::null(), &env).unwrap();
        assert_eq!(res.item(0), Value::fault(Fault::Fill));
        let res = reshape(Value::null(), ints(&[7, 8]), &env).unwrap();
        assert_eq!(res, Value::from(7i64));
        let res = reshape(ints(&[-1]), ints(&[7, 8]), &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("shape")));
    }

    #[test]
    fn telling_and_choosing() {
        let env = Core::default();
        let t = tell(Value::from(4i64), &env).unwrap();
        assert_eq!(t, ints(&[0, 1, 2, 3]));
        assert!(t.is_sorted());
        let t = tell(ints(&[2, 2]), &env).unwrap();
        assert_eq!(t.shape(), &Shape::from([2, 2]));
        assert_eq!(t.item(3), ints(&[1, 1]));
        let x = Value::string("abcd");
        let res = choose(ints(&[3, 0]), x.clone(), &env).unwrap();
        assert_eq!(res, Value::string("da"));
        let res = choose(Value::from(9i64), x, &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("address")));
        let table = Value::Int(Array::new([2, 2], [1i64, 2, 3, 4]));
        let res = choose(t, table.clone(), &env).unwrap();
        assert_eq!(res, table);
    }

    #[test]
    fn sublists() {
        let env = Core::default();
        let mask = Value::from(vec![true, false, true]);
        let res = sublist(mask, Value::string("abc"), &env).unwrap();
        assert_eq!(res, Value::string("ac"));
        let res = sublist(Value::from(vec![false, true]), ints(&[1, 2, 3, 4]), &env).unwrap();
        assert_eq!(res, ints(&[2, 4]));
        let res = sublist(ints(&[1]), ints(&[1]), &env).unwrap();
        assert!(res.is_fault());
    }

    #[test]
    fn appending_and_hitching() {
        let env = Core::default();
        assert_eq!(append(ints(&[1, 2]), Value::from(3i64), &env).unwrap(), ints(&[1, 2, 3]));
        assert_eq!(hitch(Value::from(0i64), ints(&[1, 2]), &env).unwrap(), ints(&[0, 1, 2]));
        assert_eq!(append(Value::null(), Value::from(3i64), &env).unwrap(), ints(&[3]));
        assert_eq!(hitch(ints(&[1]), Value::null(), &env).unwrap(), solitary(ints(&[1])));
        let res = append(Value::from('a'), Value::from('b'), &env).unwrap();
        assert_eq!(res, Value::string("ab"));
        let res = append(Value::string("ab"), Value::string("cd"), &env).unwrap();
        assert_eq!(res.tally(), 3);
        assert_eq!(res.item(2), Value::string("cd"));
        let table = Value::Int(Array::new([2, 2], [1i64, 2, 3, 4]));
        let res = append(table, Value::from(5i64), &env).unwrap();
        assert_eq!(res, ints(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn packing() {
        let env = Core::default();
        let x = Value::list(vec![ints(&[1, 2, 3]), Value::string("abc")]);
        let res = pack(x, &env).unwrap();
        assert_eq!(res.tally(), 3);
        assert_eq!(res.item(0), Value::list(vec![Value::from(1i64), Value::from('a')]));
        let x = Value::list(vec![ints(&[1, 2]), Value::from(0i64)]);
        let res = pack(x, &env).unwrap();
        assert_eq!(res, Value::list(vec![ints(&[1, 0]), ints(&[2, 0])]));
        let x = Value::list(vec![ints(&[1, 2]), ints(&[1, 2, 3])]);
        assert_eq!(pack(x, &env).unwrap(), Value::fault(Fault::Conform));
        let simple = ints(&[1, 2]);
        assert_eq!(pack(simple.clone(), &env).unwrap(), simple.single());
    }

    #[test]
    fn cartesian_products() {
        let env = Core::default();
        let x = Value::list(vec![ints(&[1, 2]), Value::string("ab")]);
        let res = cart(x, &env).unwrap();
        assert_eq!(res.shape(), &Shape::from([2, 2]));
        assert_eq!(res.item(0), Value::list(vec![Value::from(1i64), Value::from('a')]));
        assert_eq!(res.item(3), Value::list(vec![Value::from(2i64), Value::from('b')]));
        let x = Value::list(vec![ints(&[1, 2]), Value::from(9i64)]);
        let res = cart(x, &env).unwrap();
        assert_eq!(res, Value::list(vec![ints(&[1, 9]), ints(&[2, 9])]));
        let x = Value::list(vec![ints(&[1, 2]), Value::null()]);
        let res = cart(x, &env).unwrap();
        assert!(res.is_empty());
        assert_eq!(res.shape(), &Shape::from([2, 0]));
        assert_eq!(cart(ints(&[1, 2]), &env).unwrap(), ints(&[1, 2]).single());
        assert_eq!(cart(Value::from(4i64), &env).unwrap(), Value::from(4i64));
    }

    #[test]
    fn mixing() {
        let env = Core::default();
        let x = Value::list(vec![ints(&[1, 2]), ints(&[3, 4])]);
        let res = mix(x, &env).unwrap();
        assert_eq!(res, Value::Int(Array::new([2, 2], [1i64, 2, 3, 4])));
        let x = Value::list(vec![ints(&[1, 2]), ints(&[3])]);
        assert_eq!(mix(x, &env).unwrap(), Value::fault(Fault::Conform));
        let res = mix(Value::null(), &env).unwrap();
        assert_eq!(res.shape(), &Shape::from([0, 0]));
    }

    #[test]
    fn taking_and_dropping() {
        let env = Core::default();
        let x = ints(&[1, 2, 3, 4]);
        assert_eq!(take(Value::from(2i64), x.clone(), &env).unwrap(), ints(&[1, 2]));
        assert_eq!(take(Value::from(-2i64), x.clone(), &env).unwrap(), ints(&[3, 4]));
        assert_eq!(take(Value::from(6i64), x.clone(), &env).unwrap(), ints(&[1, 2, 3, 4, 0, 0]));
        assert_eq!(take(Value::from(-5i64), x.clone(), &env).unwrap(), ints(&[0, 1, 2, 3, 4]));
        assert_eq!(drop(Value::from(1i64), x.clone(), &env).unwrap(), ints(&[2, 3, 4]));
        assert_eq!(drop(Value::from(-3i64), x.clone(), &env).unwrap(), ints(&[1]));
        assert!(drop(Value::from(9i64), x.clone(), &env).unwrap().is_empty());
        let res = take(ints(&[1, 2]), x, &env).unwrap();
        assert_eq!(res, Value::fault(Fault::new("valence error in take")));
        let table = Value::Int(Array::new([2, 3], [1i64, 2, 3, 4, 5, 6]));
        let res = take(ints(&[-1, 2]), table.clone(), &env).unwrap();
        assert_eq!(res, Value::Int(Array::new([1, 2], [4i64, 5])));
        let res = drop(ints(&[0, 1]), table, &env).unwrap();
        assert_eq!(res, Value::Int(Array::new([2, 2], [2i64, 3, 5, 6])));
        let padded = take(Value::from(2i64), Value::list(vec![ints(&[1])]), &env).unwrap();
        assert_eq!(padded.item(1), Value::fault(Fault::Fill));
    }

    #[test]
    fn cuts_of_sorted_lists_stay_sorted() {
        let env = Core::default();
        let mut x = ints(&[1, 3, 5, 7]);
        x.mark_sorted(true);
        assert!(take(Value::from(2i64), x.clone(), &env).unwrap().is_sorted());
        assert!(take(Value::from(-3i64), x.clone(), &env).unwrap().is_sorted());
        assert!(drop(Value::from(1i64), x.clone(), &env).unwrap().is_sorted());
        assert!(drop(Value::from(-1i64), x.clone(), &env).unwrap().is_sorted());
        let padded = take(Value::from(6i64), x.clone(), &env).unwrap();
        assert_eq!(padded, ints(&[1, 3, 5, 7, 0, 0]));
        assert!(!padded.is_sorted());
        assert!(!take(Value::from(-5i64), x, &env).unwrap().is_sorted());
        let unsorted = take(Value::from(2i64), ints(&[1, 3, 5]), &env).unwrap();
        assert!(!unsorted.is_sorted());
        let mut words = Value::list(vec![Value::string("ab"), Value::string("cd")]);
        words.mark_sorted(true);
        let kept = drop(Value::from(1i64), words, &env).unwrap();
        assert!(kept.is_sorted());
        assert_eq!(kept.item(0), Value::string("cd"));
    }

    #[test]
    fn raising() {
        let env = Core::default();
        let table = Value::Int(Array::new([2, 3], [1i64, 2, 3, 4, 5, 6]));
        let rows = raise(Value::from(1i64), table.clone(), &env).unwrap();
        assert_eq!(rows, Value::list(vec![ints(&[1, 2, 3]), ints(&[4, 5, 6])]));
        let whole = raise(Value::from(0i64), table.clone(), &env).unwrap();
        assert_eq!(whole, table.clone().single());
        assert_eq!(raise(Value::from(2i64), table.clone(), &env).unwrap(), table);
        assert!(raise(Value::from(3i64), table, &env).unwrap().is_fault());
    }
}
