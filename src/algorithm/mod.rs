//! Algorithms for array operations and combinators

pub mod compare;
pub mod loops;
pub mod permute;
pub mod pervade;
pub mod recur;
pub mod reduce;
pub mod search;
pub mod select;
pub mod sort;
pub mod structure;
