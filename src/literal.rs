use std::fmt::{Display, Formatter};
use std::ops::{Neg, Not};

/// A signed reference to an input variable or a gate, in DIMACS style.
///
/// The magnitude is either an input variable (`1..=nvar`) or a gate
/// identity (`> nvar`). The sign denotes negation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal(i32);

impl Literal {
    /// Constant true. Never written to a clause or kept as a gate child
    /// once reductions have been applied.
    pub const TRUE: Literal = Literal(1_000_000_000);
    /// Constant false.
    pub const FALSE: Literal = Literal(-1_000_000_000);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Positive literal of the variable (or gate identity) `var`.
    pub const fn from_var(var: u32) -> Self {
        debug_assert!(var < Self::TRUE.0 as u32, "variable out of range");
        Self(var as i32)
    }

    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the internal (DIMACS) representation of the literal.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Return the magnitude of the literal.
    pub const fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub const fn is_true(self) -> bool {
        self.0 == Self::TRUE.0
    }

    pub const fn is_false(self) -> bool {
        self.0 == Self::FALSE.0
    }

    pub const fn is_constant(self) -> bool {
        self.is_true() || self.is_false()
    }

    /// Keep the sign of `self` but replace the magnitude with `var`.
    pub const fn with_var(self, var: u32) -> Self {
        debug_assert!(var < Self::TRUE.0 as u32, "variable out of range");
        if self.is_negated() {
            Self(-(var as i32))
        } else {
            Self(var as i32)
        }
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_true() {
            write!(f, "T")
        } else if self.is_false() {
            write!(f, "F")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Drop `FALSE` literals from a clause.
///
/// Returns `None` if the clause contains `TRUE` and is thus a tautology.
pub fn clean_clause(literals: impl IntoIterator<Item = Literal>) -> Option<Vec<Literal>> {
    let mut clause = Vec::new();
    for lit in literals {
        if lit.is_true() {
            return None;
        }
        if !lit.is_false() {
            clause.push(lit);
        }
    }
    Some(clause)
}
