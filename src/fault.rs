//! Faults and phrases, the two kinds of atom that are compared by text

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use ecow::EcoString;
use serde::*;

/// Which sorting entry point produced an invalid comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOp {
    Sort,
    Grade,
}

/// An in-band error value
///
/// Faults are atoms. They flow through arithmetic and combinators as data
/// and are compared by their diagnostic text, so a [`Fault::Custom`] with the
/// text of a well-known fault is the same value as that fault.
#[derive(Debug, Clone)]
pub enum Fault {
    /// Generic arithmetic fault
    Arith,
    /// Generic logical fault
    Logical,
    DivZero,
    /// The sentinel that compares below everything
    Bottom,
    /// The sentinel that compares above everything
    Top,
    Overflow,
    Conform,
    Identity,
    Fill,
    NegativeDivisor,
    Power,
    InvalidComparison(SortOp),
    Custom(EcoString),
}

impl Fault {
    /// Make a fault from its diagnostic text
    ///
    /// A leading `?` is added when missing. Well-known texts map to their
    /// dedicated variants.
    pub fn new(text: &str) -> Self {
        let text = text.strip_prefix('?').unwrap_or(text);
        match text {
            "A" => Fault::Arith,
            "L" => Fault::Logical,
            "div" => Fault::DivZero,
            "O" => Fault::Bottom,
            "I" => Fault::Top,
            "Integer overflow" => Fault::Overflow,
            "conform" => Fault::Conform,
            "identity" => Fault::Identity,
            "fill" => Fault::Fill,
            "negative divisor" => Fault::NegativeDivisor,
            "power" => Fault::Power,
            "invalid comparison in SORT" => Fault::InvalidComparison(SortOp::Sort),
            "invalid comparison in GRADE" => Fault::InvalidComparison(SortOp::Grade),
            text => Fault::Custom(ecow::eco_format!("?{text}")),
        }
    }
    /// The diagnostic text, including the leading `?`
    pub fn text(&self) -> &str {
        match self {
            Fault::Arith => "?A",
            Fault::Logical => "?L",
            Fault::DivZero => "?div",
            Fault::Bottom => "?O",
            Fault::Top => "?I",
            Fault::Overflow => "?Integer overflow",
            Fault::Conform => "?conform",
            Fault::Identity => "?identity",
            Fault::Fill => "?fill",
            Fault::NegativeDivisor => "?negative divisor",
            Fault::Power => "?power",
            Fault::InvalidComparison(SortOp::Sort) => "?invalid comparison in SORT",
            Fault::InvalidComparison(SortOp::Grade) => "?invalid comparison in GRADE",
            Fault::Custom(text) => text,
        }
    }
    /// Whether this is one of the two ordering sentinels
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Fault::Bottom | Fault::Top)
    }
    /// Combine two faults met by an arithmetic operator
    pub fn arith_pair(a: &Fault, b: &Fault) -> Fault {
        if a == b {
            a.clone()
        } else {
            Fault::Arith
        }
    }
    /// Combine two faults met by a logical operator
    pub fn logical_pair(a: &Fault, b: &Fault) -> Fault {
        if a == b {
            a.clone()
        } else {
            Fault::Logical
        }
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for Fault {}

impl Hash for Fault {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state)
    }
}

impl PartialOrd for Fault {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinels sit at the extremes. Other faults order by text.
impl Ord for Fault {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            _ if self == other => Ordering::Equal,
            (Fault::Bottom, _) | (_, Fault::Top) => Ordering::Less,
            (Fault::Top, _) | (_, Fault::Bottom) => Ordering::Greater,
            _ => self.text().cmp(other.text()),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A symbolic word atom
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrase(pub EcoString);

impl Phrase {
    pub fn new(text: impl Into<EcoString>) -> Self {
        Phrase(text.into())
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
