use std::{fmt, ops::Index};

use num_dual::Dual64;

use super::VarId;

/// Read-only view of variable values passed to constraint expressions.
///
/// Indexing with a [`VarId`] yields the value as a dual number, so a single
/// expression provides both the residual and one directional derivative.
#[derive(Clone, Copy)]
pub struct Values<'a>(&'a [Dual64]);

impl<'a> Values<'a> {
    #[must_use]
    pub fn new(values: &'a [Dual64]) -> Self {
        Self(values)
    }
}

impl Index<VarId> for Values<'_> {
    type Output = Dual64;

    fn index(&self, var: VarId) -> &Dual64 {
        &self.0[var.0]
    }
}

/// A constraint expression evaluated over dual numbers.
pub type Expression = Box<dyn Fn(&Values<'_>) -> Dual64>;

/// Whether a constraint holds as `f(v) = 0` or `g(v) <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Equality,
    LessOrEqual,
}

/// A named equality or inequality constraint.
pub struct Constraint {
    name: String,
    sense: Sense,
    expr: Expression,
}

impl Constraint {
    pub(super) fn new(name: impl Into<String>, sense: Sense, expr: Expression) -> Self {
        Self {
            name: name.into(),
            sense,
            expr,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Evaluates the expression over a full vector of dual values.
    #[must_use]
    pub fn evaluate(&self, values: &[Dual64]) -> Dual64 {
        (self.expr)(&Values::new(values))
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .field("sense", &self.sense)
            .finish_non_exhaustive()
    }
}
