//! Primitive operators and the seam through which combinators call operators

use std::fmt;

use ecow::eco_format;
use enum_iterator::Sequence;

use crate::{
    algorithm::{compare, pervade::*, permute, reduce, search, select, sort, structure},
    Core, CoreResult, Fault, Value,
};

/// Something that can be applied to one or two arguments
///
/// Every operator has both forms. An operator that only makes sense with two
/// arguments takes a pair when applied to one, and an operator of one
/// argument receives the pair of its two arguments.
pub trait Operator {
    fn monadic(&self, x: Value, env: &Core) -> CoreResult<Value>;
    fn dyadic(&self, x: Value, y: Value, env: &Core) -> CoreResult<Value>;
    /// The primitive this operator is, if any
    ///
    /// Combinators use this to pick specialized algorithms.
    fn prim(&self) -> Option<Prim> {
        None
    }
}

impl<O: Operator + ?Sized> Operator for &O {
    fn monadic(&self, x: Value, env: &Core) -> CoreResult<Value> {
        (**self).monadic(x, env)
    }
    fn dyadic(&self, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
        (**self).dyadic(x, y, env)
    }
    fn prim(&self) -> Option<Prim> {
        (**self).prim()
    }
}

/// An operator defined by a function of one argument
#[derive(Clone, Copy)]
pub struct Monadic<F>(pub F);

impl<F> Operator for Monadic<F>
where
    F: Fn(Value, &Core) -> CoreResult<Value>,
{
    fn monadic(&self, x: Value, env: &Core) -> CoreResult<Value> {
        (self.0)(x, env)
    }
    fn dyadic(&self, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
        (self.0)(Value::pair(x, y), env)
    }
}

/// An operator defined by a function of two arguments
#[derive(Clone, Copy)]
pub struct Dyadic<F>(pub F);

impl<F> Operator for Dyadic<F>
where
    F: Fn(Value, Value, &Core) -> CoreResult<Value>,
{
    fn monadic(&self, x: Value, env: &Core) -> CoreResult<Value> {
        match split_pair(x) {
            Ok((a, b)) => (self.0)(a, b, env),
            Err(_) => Ok(Fault::new("argument must be a pair").into()),
        }
    }
    fn dyadic(&self, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
        (self.0)(x, y, env)
    }
}

fn split_pair(x: Value) -> Result<(Value, Value), Value> {
    if x.tally() != 2 || x.is_atomic() {
        return Err(x);
    }
    Ok((x.item(0), x.item(1)))
}

/// A built-in operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum Prim {
    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    Power,
    Quotient,
    Mod,
    Max,
    Min,
    Opposite,
    Abs,
    Floor,
    Ceiling,
    Reciprocal,
    Sign,
    // Comparison
    Lt,
    Lte,
    Gt,
    Gte,
    Mate,
    Match,
    Equal,
    Unequal,
    Up,
    // Logic
    And,
    Or,
    Xor,
    Not,
    // Structure
    Pass,
    Single,
    Solitary,
    List,
    First,
    Rest,
    Link,
    Append,
    Hitch,
    Reverse,
    Tally,
    Shape,
    Valence,
    Tell,
    Reshape,
    Choose,
    Pick,
    Place,
    Sublist,
    Take,
    Drop,
    Raise,
    Mix,
    Transpose,
    Fuse,
    Pack,
    Cart,
    // Sorting and searching
    SortUp,
    GradeUp,
    Cull,
    Except,
    Find,
    FindAll,
    Seek,
    In,
}

impl Prim {
    pub fn name(&self) -> &'static str {
        match self {
            Prim::Plus => "plus",
            Prim::Minus => "minus",
            Prim::Times => "times",
            Prim::Divide => "divide",
            Prim::Power => "power",
            Prim::Quotient => "quotient",
            Prim::Mod => "mod",
            Prim::Max => "max",
            Prim::Min => "min",
            Prim::Opposite => "opposite",
            Prim::Abs => "abs",
            Prim::Floor => "floor",
            Prim::Ceiling => "ceiling",
            Prim::Reciprocal => "reciprocal",
            Prim::Sign => "sign",
            Prim::Lt => "lt",
            Prim::Lte => "lte",
            Prim::Gt => "gt",
            Prim::Gte => "gte",
            Prim::Mate => "mate",
            Prim::Match => "match",
            Prim::Equal => "equal",
            Prim::Unequal => "unequal",
            Prim::Up => "up",
            Prim::And => "and",
            Prim::Or => "or",
            Prim::Xor => "xor",
            Prim::Not => "not",
            Prim::Pass => "pass",
            Prim::Single => "single",
            Prim::Solitary => "solitary",
            Prim::List => "list",
            Prim::First => "first",
            Prim::Rest => "rest",
            Prim::Link => "link",
            Prim::Append => "append",
            Prim::Hitch => "hitch",
            Prim::Reverse => "reverse",
            Prim::Tally => "tally",
            Prim::Shape => "shape",
            Prim::Valence => "valence",
            Prim::Tell => "tell",
            Prim::Reshape => "reshape",
            Prim::Choose => "choose",
            Prim::Pick => "pick",
            Prim::Place => "place",
            Prim::Sublist => "sublist",
            Prim::Take => "take",
            Prim::Drop => "drop",
            Prim::Raise => "raise",
            Prim::Mix => "mix",
            Prim::Transpose => "transpose",
            Prim::Fuse => "fuse",
            Prim::Pack => "pack",
            Prim::Cart => "cart",
            Prim::SortUp => "sortup",
            Prim::GradeUp => "gradeup",
            Prim::Cull => "cull",
            Prim::Except => "except",
            Prim::Find => "find",
            Prim::FindAll => "findall",
            Prim::Seek => "seek",
            Prim::In => "in",
        }
    }
    /// Look up a primitive by name
    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<Prim>().find(|p| p.name() == name)
    }
    /// Whether folding this operator from the left gives the same result as
    /// folding it from the right
    pub fn is_associative(&self) -> bool {
        matches!(
            self,
            Prim::Plus | Prim::Times | Prim::Or | Prim::And | Prim::Link | Prim::Max | Prim::Min
        )
    }
    fn pair_fault(&self) -> Value {
        Fault::new(&eco_format!("argument of {} must be a pair", self.name())).into()
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operator for Prim {
    fn prim(&self) -> Option<Prim> {
        Some(*self)
    }
    fn monadic(&self, x: Value, env: &Core) -> CoreResult<Value> {
        Ok(match self {
            Prim::Plus => reduce::sum(x, env)?,
            Prim::Times => reduce::product(x, env)?,
            Prim::And => reduce::all(x, env)?,
            Prim::Or => reduce::any(x, env)?,
            Prim::Max | Prim::Min => reduce::reduce(self, x, env)?,
            Prim::Link => structure::link(x, env)?,
            Prim::Opposite => mon_pervade(x, &neg::Neg, env)?,
            Prim::Abs => mon_pervade(x, &abs::Abs, env)?,
            Prim::Floor => mon_pervade(x, &floor::Floor, env)?,
            Prim::Ceiling => mon_pervade(x, &ceiling::Ceiling, env)?,
            Prim::Reciprocal => mon_pervade(x, &recip::Recip, env)?,
            Prim::Sign => mon_pervade(x, &sign::Sign, env)?,
            Prim::Not => mon_pervade(x, &not::Not, env)?,
            Prim::Pass => x,
            Prim::Single => x.single(),
            Prim::Solitary => structure::solitary(x),
            Prim::List => structure::list(x),
            Prim::First => structure::first(x),
            Prim::Rest => structure::rest(x),
            Prim::Reverse => structure::reverse(x),
            Prim::Tally => Value::from(x.tally()),
            Prim::Shape => structure::shape_of(&x),
            Prim::Valence => Value::from(x.valence()),
            Prim::Tell => structure::tell(x, env)?,
            Prim::Mix => structure::mix(x, env)?,
            Prim::Transpose => permute::transpose(x, env)?,
            Prim::Pack => structure::pack(x, env)?,
            Prim::Cart => structure::cart(x, env)?,
            Prim::SortUp => sort::sortup(x, env)?,
            Prim::GradeUp => sort::gradeup(x, env)?,
            Prim::Cull => search::cull(x, env)?,
            _ => match split_pair(x) {
                Ok((a, b)) => return self.dyadic(a, b, env),
                Err(_) => self.pair_fault(),
            },
        })
    }
    fn dyadic(&self, x: Value, y: Value, env: &Core) -> CoreResult<Value> {
        Ok(match self {
            Prim::Plus => bin_pervade(x, y, &add::Add, env)?,
            Prim::Minus => bin_pervade(x, y, &sub::Sub, env)?,
            Prim::Times => bin_pervade(x, y, &mul::Mul, env)?,
            Prim::Divide => bin_pervade(x, y, &div::Div, env)?,
            Prim::Power => bin_pervade(x, y, &pow::Pow, env)?,
            Prim::Quotient => bin_pervade(x, y, &quotient::Quotient, env)?,
            Prim::Mod => bin_pervade(x, y, &modulo::Modulo, env)?,
            Prim::Max => bin_pervade(x, y, &max::Max, env)?,
            Prim::Min => bin_pervade(x, y, &min::Min, env)?,
            Prim::Lt => bin_pervade(x, y, &Compare::LT, env)?,
            Prim::Lte => bin_pervade(x, y, &Compare::LTE, env)?,
            Prim::Gt => bin_pervade(x, y, &Compare::GT, env)?,
            Prim::Gte => bin_pervade(x, y, &Compare::GTE, env)?,
            Prim::Mate => bin_pervade(x, y, &Compare::MATE, env)?,
            Prim::Match => bin_pervade(x, y, &Compare::MATCH, env)?,
            Prim::And => bin_pervade(x, y, &and::And, env)?,
            Prim::Or => bin_pervade(x, y, &or::Or, env)?,
            Prim::Xor => bin_pervade(x, y, &xor::Xor, env)?,
            Prim::Equal => compare::equal(&x, &y).into(),
            Prim::Unequal => (!compare::equal(&x, &y)).into(),
            Prim::Up => compare::up(&x, &y).into(),
            Prim::Link => structure::link(Value::pair(x, y), env)?,
            Prim::Reshape => structure::reshape(x, y, env)?,
            Prim::Append => structure::append(x, y, env)?,
            Prim::Hitch => structure::hitch(x, y, env)?,
            Prim::Choose => structure::choose(x, y, env)?,
            Prim::Pick => select::pick(x, y),
            Prim::Place => match split_pair(x) {
                Ok((item, addr)) => select::place(item, addr, y),
                Err(_) => Fault::new("first argument of place must be a pair").into(),
            },
            Prim::Sublist => structure::sublist(x, y, env)?,
            Prim::Take => structure::take(x, y, env)?,
            Prim::Drop => structure::drop(x, y, env)?,
            Prim::Raise => structure::raise(x, y, env)?,
            Prim::Fuse => permute::fuse(x, y, env)?,
            Prim::Except => search::except(x, y, env)?,
            Prim::Find => search::find(x, y, env)?,
            Prim::FindAll => search::findall(x, y, env)?,
            Prim::Seek => search::seek(x, y, env)?,
            Prim::In => search::member(x, y, env)?,
            _ => self.monadic(Value::pair(x, y), env)?,
        })
    }
}
