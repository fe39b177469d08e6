//! Combinators that apply an operator item by item

use ecow::EcoVec;
use tracing::trace;

use crate::{
    algorithm::structure, array::Array, primitive::Operator, value::Value, Core, CoreResult,
    Fault, Kind, Shape,
};

enum Items {
    Bool(EcoVec<bool>),
    Int(EcoVec<i64>),
    Real(EcoVec<f64>),
    Char(EcoVec<char>),
    Hetero(EcoVec<Value>),
}

/// Accumulates the results of a combinator into a container of a known
/// shape
///
/// The container kind is guessed from the first result. A later result that
/// does not fit the guess widens everything collected so far to a
/// heterogeneous container, which is packed again at the end if possible.
pub(crate) struct Collector {
    shape: Shape,
    capacity: usize,
    items: Option<Items>,
}

impl Collector {
    pub fn new(shape: Shape, env: &Core) -> CoreResult<Self> {
        let capacity = env.validate_shape(&shape)?;
        Ok(Collector {
            shape,
            capacity,
            items: None,
        })
    }
    pub fn push(&mut self, val: Value) {
        let capacity = self.capacity;
        let items = self.items.get_or_insert_with(|| Self::guess(&val, capacity));
        let val = match (items, val) {
            (Items::Bool(data), Value::Bool(arr)) if arr.is_atom() => return data.push(arr.data[0]),
            (Items::Int(data), Value::Int(arr)) if arr.is_atom() => return data.push(arr.data[0]),
            (Items::Real(data), Value::Real(arr)) if arr.is_atom() => return data.push(arr.data[0]),
            (Items::Char(data), Value::Char(arr)) if arr.is_atom() => return data.push(arr.data[0]),
            (Items::Hetero(data), val) => return data.push(val),
            (_, val) => val,
        };
        self.widen();
        if let Some(Items::Hetero(data)) = &mut self.items {
            data.push(val);
        }
    }
    fn guess(first: &Value, capacity: usize) -> Items {
        match first.kind() {
            Kind::Bool if first.is_atomic() => Items::Bool(EcoVec::with_capacity(capacity)),
            Kind::Int if first.is_atomic() => Items::Int(EcoVec::with_capacity(capacity)),
            Kind::Real if first.is_atomic() => Items::Real(EcoVec::with_capacity(capacity)),
            Kind::Char if first.is_atomic() => Items::Char(EcoVec::with_capacity(capacity)),
            _ => Items::Hetero(EcoVec::with_capacity(capacity)),
        }
    }
    fn widen(&mut self) {
        fn boxed<T: Copy + Into<Value>>(data: &EcoVec<T>, capacity: usize) -> EcoVec<Value> {
            let mut vals = EcoVec::with_capacity(capacity);
            vals.extend(data.iter().map(|&x| x.into()));
            vals
        }
        let widened = match &self.items {
            Some(Items::Bool(data)) => boxed(data, self.capacity),
            Some(Items::Int(data)) => boxed(data, self.capacity),
            Some(Items::Real(data)) => boxed(data, self.capacity),
            Some(Items::Char(data)) => boxed(data, self.capacity),
            Some(Items::Hetero(_)) => return,
            None => EcoVec::with_capacity(self.capacity),
        };
        trace!(done = widened.len(), "results differ in kind, widening");
        self.items = Some(Items::Hetero(widened));
    }
    pub fn finish(self) -> Value {
        let shape = self.shape;
        match self.items {
            Some(Items::Bool(data)) => Array::new(shape, data).into(),
            Some(Items::Int(data)) => Array::new(shape, data).into(),
            Some(Items::Real(data)) => Array::new(shape, data).into(),
            Some(Items::Char(data)) => Array::new(shape, data).into(),
            Some(Items::Hetero(data)) => Value::Hetero(Array::new(shape, data)).implode(),
            None => Value::Hetero(Array::empty(shape)),
        }
    }
}

/// Apply a function to every item, keeping the shape
pub(crate) fn each_with(
    x: Value,
    env: &Core,
    mut f: impl FnMut(Value) -> CoreResult<Value>,
) -> CoreResult<Value> {
    if x.is_atomic() {
        return Ok(f(x)?.single());
    }
    if x.is_empty() {
        return Ok(x);
    }
    let mut out = Collector::new(x.shape().clone(), env)?;
    for item in x.into_items() {
        out.push(f(item)?);
    }
    Ok(out.finish())
}

/// Apply a function to corresponding items of two values
///
/// An argument with exactly one item is paired with every item of the
/// other. Otherwise the shapes must agree or the result is a conform fault.
pub(crate) fn eachboth_with(
    x: Value,
    y: Value,
    env: &Core,
    mut f: impl FnMut(Value, Value) -> CoreResult<Value>,
) -> CoreResult<Value> {
    let (xrep, yrep) = (x.tally() == 1, y.tally() == 1);
    let shape = match (xrep, yrep) {
        (true, true) if x.valence() >= y.valence() => x.shape().clone(),
        (true, true) | (true, false) => y.shape().clone(),
        (false, true) => x.shape().clone(),
        (false, false) if x.shape() == y.shape() => x.shape().clone(),
        (false, false) => {
            trace!(x = %x.shape(), y = %y.shape(), "shapes do not conform");
            return Ok(Fault::Conform.into());
        }
    };
    if shape.is_empty() {
        return Ok(f(x.item(0), y.item(0))?.single());
    }
    let n = shape.tally();
    if n == 0 {
        return Ok(Value::Hetero(Array::empty(shape)));
    }
    let mut out = Collector::new(shape, env)?;
    for i in 0..n {
        let a = x.item(if xrep { 0 } else { i });
        let b = y.item(if yrep { 0 } else { i });
        out.push(f(a, b)?);
    }
    Ok(out.finish())
}

/// Apply an operator to every item
pub fn each<F: Operator + ?Sized>(f: &F, x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() {
        return Ok(x);
    }
    each_with(x, env, |item| f.monadic(item, env))
}

/// Apply an operator to corresponding items of two values
pub fn eachboth<F: Operator + ?Sized>(f: &F, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    eachboth_with(x, y, env, |a, b| f.dyadic(a, b, env))
}

/// Apply an operator to every item of `x` with the whole of `y`
pub fn eachleft<F: Operator + ?Sized>(f: &F, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    eachboth(f, x, y.single(), env)
}

/// Apply an operator to the whole of `x` with every item of `y`
pub fn eachright<F: Operator + ?Sized>(
    f: &F,
    x: Value,
    y: Value,
    env: &Core,
) -> CoreResult<Value> {
    eachboth(f, x.single(), y, env)
}

/// Apply an operator to every pairing of an item of `x` with an item of `y`
///
/// The result's shape is the shape of `x` followed by the shape of `y`.
pub fn outer<F: Operator + ?Sized>(f: &F, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    let mut shape = x.shape().clone();
    shape.extend_from_slice(y.shape());
    if shape.is_empty() {
        return Ok(f.dyadic(x.item(0), y.item(0), env)?.single());
    }
    if x.is_empty() || y.is_empty() {
        env.validate_shape(&shape)?;
        return Ok(Value::Hetero(Array::empty(shape)));
    }
    let mut out = Collector::new(shape, env)?;
    for a in x.items() {
        for b in y.items() {
            out.push(f.dyadic(a.clone(), b, env)?);
        }
    }
    Ok(out.finish())
}

/// Apply an operator `n` times
pub fn fold<F: Operator + ?Sized>(f: &F, n: Value, x: Value, env: &Core) -> CoreResult<Value> {
    let Some(n) = n.as_int().filter(|&n| n >= 0) else {
        return Ok(Fault::new("fold count must be a non-negative integer").into());
    };
    let mut x = x;
    for _ in 0..n {
        x = f.monadic(x, env)?;
    }
    Ok(x)
}

/// Apply an operator to the corresponding items of all the items of `x`
///
/// This is [`each`] over the [`pack`](structure::pack) of `x`.
pub fn eachall<F: Operator + ?Sized>(f: &F, x: Value, env: &Core) -> CoreResult<Value> {
    if x.is_propagating_fault() {
        return Ok(x);
    }
    let packed = structure::pack(x, env)?;
    each(f, packed, env)
}

fn no_expr() -> Value {
    Fault::new("noexpr").into()
}

/// Choose an operator to apply by a chain of tests
///
/// `ops` alternates tests and operators: the operator after the first test
/// that holds is applied. A trailing operator is applied when no test
/// holds, and without one the result is the `noexpr` fault. A test that
/// does not give a boolean atom gives the logical fault.
pub fn fork(ops: &[&dyn Operator], x: Value, env: &Core) -> CoreResult<Value> {
    if ops.len() < 2 {
        return Ok(Fault::new("atlas to fork must have two or more operations").into());
    }
    for (i, pair) in ops.chunks(2).enumerate() {
        let [test, then] = pair else {
            trace!(tests = i, "fork falls through to its last operation");
            return pair[0].monadic(x, env);
        };
        match test.monadic(x.clone(), env)? {
            Value::Bool(b) if b.is_atom() => {
                if b.data[0] {
                    return then.monadic(x, env);
                }
            }
            _ => return Ok(Fault::Logical.into()),
        }
    }
    Ok(no_expr())
}

/// Apply an operator to each item in order, giving the last result
///
/// An empty value gives the `noexpr` fault.
pub fn iterate<F: Operator + ?Sized>(f: &F, x: Value, env: &Core) -> CoreResult<Value> {
    let mut last = None;
    for item in x.into_items() {
        last = Some(f.monadic(item, env)?);
    }
    Ok(last.unwrap_or_else(no_expr))
}

/// Apply an operator with its arguments swapped
pub fn converse<F: Operator + ?Sized>(f: &F, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
    f.dyadic(y, x, env)
}
