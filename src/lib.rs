//! The evaluation core of a nested array language
//!
//! Every value is an array. Atoms, lists, tables, and arrays of arrays are
//! all [`Value`]s, and errors made while computing on them are [`Fault`]
//! values that flow through later operations as ordinary data. Only
//! conditions that must stop evaluation outright surface as [`Fatal`].
//!
//! Operations take their arguments by value and an evaluation context
//! [`Core`]. Combinators take anything implementing [`Operator`], which
//! includes the primitives in [`Prim`] and the closure wrappers [`Monadic`]
//! and [`Dyadic`].

pub mod algorithm;
pub mod arith;
mod array;
mod config;
mod context;
mod cowslice;
mod error;
mod fault;
mod primitive;
mod shape;
mod value;

pub use self::{
    algorithm::{
        compare::{equal, up, up_cmp},
        loops::{
            converse, each, eachall, eachboth, eachleft, eachright, fold, fork, iterate, outer,
        },
        permute::{fuse, transpose},
        recur::{across, down, leaf, rank, recur, twig},
        reduce::{accumulate, all, any, leftaccumulate, product, reduce, sum},
        search::{cull, except, find, findall, member, seek},
        select::{pick, place, update},
        sort::{check_sorted, fast_sort, grade, gradeup, sort, sortup},
        structure::{
            append, cart, choose, drop, first, hitch, link, list, mix, pack, raise, reshape, rest,
            reverse, shape_of, solitary, sublist, take, tell,
        },
    },
    array::{Array, ArrayMeta, Element},
    config::CoreConfig,
    context::Core,
    error::*,
    fault::{Fault, Phrase, SortOp},
    primitive::{Dyadic, Monadic, Operator, Prim},
    shape::Shape,
    value::{Kind, Value},
};
