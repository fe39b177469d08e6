//! Rearranging and merging the axes of an array

use ecow::EcoVec;

use crate::{array::*, value::val_as_arr, Core, CoreResult, Fault, Shape, Value};

fn not_axes() -> CoreResult<Value> {
    Ok(Fault::new("left arg of fuse should contain axes of right arg").into())
}

/// Walk the result shape in row-major order, reading the source at the given
/// stride for each result axis
fn remap<T: Element>(arr: &Array<T>, shape: &Shape, strides: &[usize]) -> Array<T> {
    let n = shape.tally();
    let mut data = EcoVec::with_capacity(n);
    let mut index = vec![0usize; shape.len()];
    let mut offset = 0;
    for _ in 0..n {
        data.push(arr.data[offset].clone());
        for axis in (0..index.len()).rev() {
            index[axis] += 1;
            offset += strides[axis];
            if index[axis] < shape[axis] {
                break;
            }
            offset -= strides[axis] * index[axis];
            index[axis] = 0;
        }
    }
    Array::new(shape.clone(), data)
}

/// Permute the axes of `x`, merging grouped axes along their diagonal
///
/// Item `i` of `axes` names the axis of `x` that becomes axis `i` of the
/// result. An item that is a list of axes takes the diagonal through them,
/// as long as the shortest of them. Every axis of `x` must be named exactly
/// once.
pub fn fuse(axes: Value, x: Value, env: &Core) -> CoreResult<Value> {
    let v = x.valence();
    if v == 0 {
        let null_like = axes.is_empty() || (axes.tally() == 1 && axes.item(0).is_empty());
        return Ok(if null_like {
            x
        } else {
            Fault::new("left arg of fuse should be Null").into()
        });
    }
    if v == 1 {
        return Ok(if axes.as_ints().as_deref() == Some(&[0][..]) {
            x
        } else {
            Fault::new("left arg of fuse should be 0").into()
        });
    }
    let groups: Vec<Vec<i64>> = match &axes {
        Value::Int(arr) if arr.tally() == v => arr.data.iter().map(|&a| vec![a]).collect(),
        Value::Int(_) => return not_axes(),
        Value::Hetero(arr) => {
            let groups: Option<Vec<_>> = (arr.data.iter())
                .map(|group| match group {
                    Value::Int(g) if g.tally() > 0 => Some(g.data.to_vec()),
                    _ => None,
                })
                .collect();
            match groups {
                Some(groups) => groups,
                None => return Ok(Fault::new("invalid fuse").into()),
            }
        }
        _ => return Ok(Fault::new("invalid left arg of fuse").into()),
    };
    let source_strides = x.shape().strides();
    let mut used = vec![false; v];
    let mut shape = Shape::scalar();
    let mut strides = Vec::with_capacity(groups.len());
    for group in &groups {
        let mut extent = usize::MAX;
        let mut stride = 0;
        for &axis in group {
            let Some(axis) = usize::try_from(axis).ok().filter(|&a| a < v && !used[a]) else {
                return not_axes();
            };
            used[axis] = true;
            extent = extent.min(x.shape()[axis]);
            stride += source_strides[axis];
        }
        shape.push(extent);
        strides.push(stride);
    }
    if used.contains(&false) {
        return not_axes();
    }
    env.validate_shape(&shape)?;
    if x.is_empty() {
        return Ok(Value::Hetero(Array::empty(shape)));
    }
    Ok(val_as_arr!(&x, atom => atom.clone(), |arr| remap(arr, &shape, &strides).into_value()))
}

/// Reverse the order of the axes
pub fn transpose(x: Value, env: &Core) -> CoreResult<Value> {
    match x.valence() {
        0 | 1 => Ok(x),
        2 => {
            let (rows, cols) = (x.shape()[0], x.shape()[1]);
            let shape = Shape::from([cols, rows]);
            Ok(val_as_arr!(&x, atom => atom.clone(), |arr| {
                let data: EcoVec<_> = (0..rows * cols)
                    .map(|k| arr.data[(k % rows) * cols + k / rows].clone())
                    .collect();
                Array::new(shape, data).into_value()
            }))
        }
        v => {
            let axes: Value = (0..v as i64).rev().collect();
            fuse(axes, x, env)
        }
    }
}
