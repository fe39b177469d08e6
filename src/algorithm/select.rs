//! Selecting and replacing single items by address

use std::mem;

use tracing::trace;

use crate::{algorithm::structure::flat_index, Fault, Value};

fn address_fault() -> Value {
    Fault::new("address").into()
}

pub(crate) fn pick_ref(addr: &Value, x: &Value) -> Value {
    match flat_index(addr, x) {
        Some(i) => x.item(i),
        None => address_fault(),
    }
}

/// The item of `x` at an address
///
/// The address must have one integer per axis of `x`. A list is addressed
/// by an integer and a single by the empty list.
pub fn pick(addr: Value, x: Value) -> Value {
    pick_ref(&addr, &x)
}

/// Store an atom into a dense array without widening it
fn write_dense(a: &mut Value, i: usize, x: &Value) -> bool {
    match (a, x) {
        (Value::Bool(arr), Value::Bool(x)) if x.is_atom() => arr.data_mut()[i] = x.data[0],
        (Value::Int(arr), Value::Int(x)) if x.is_atom() => arr.data_mut()[i] = x.data[0],
        (Value::Real(arr), Value::Real(x)) if x.is_atom() => arr.data_mut()[i] = x.data[0],
        (Value::Char(arr), Value::Char(x)) if x.is_atom() => arr.data_mut()[i] = x.data[0],
        _ => return false,
    }
    true
}

/// Replace the item of `a` at an address with `x`
///
/// Storage that `a` shares with other values is copied first, so only `a`
/// observes the change. A dense array is widened when `x` is not an atom of
/// its kind, and packed again if the replacement makes that possible.
/// Returns `false`, leaving `a` untouched, when the address is not valid.
pub fn update(a: &mut Value, addr: &Value, x: Value) -> bool {
    let Some(i) = flat_index(addr, a) else {
        return false;
    };
    if a.valence() == 0 {
        *a = x.single();
        return true;
    }
    if write_dense(a, i, &x) {
        return true;
    }
    trace!(kind = a.type_name(), "widening to place an item");
    let mut arr = mem::replace(a, Value::null()).explode();
    arr.data_mut()[i] = x;
    *a = Value::Hetero(arr).implode();
    true
}

/// A copy of `a` with `x` at an address
pub fn place(x: Value, addr: Value, a: Value) -> Value {
    let mut a = a;
    if update(&mut a, &addr, x) {
        a
    } else {
        address_fault()
    }
}
