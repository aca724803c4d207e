//! An in-memory, equation-oriented model.
//!
//! An [`EquationSystem`] holds named scalar variables, each either free or
//! fixed, together with equality constraints `f(v) = 0` and inequality
//! constraints `g(v) <= 0`. Constraint expressions are written over
//! [`Dual64`] values so solvers get exact Jacobian columns by seeding one
//! variable at a time.
//!
//! ```
//! use ramp_core::EquationSystem;
//!
//! let mut system = EquationSystem::new();
//! let x = system.add_var("x", 1.0);
//! let y = system.add_var("y", 1.0);
//! system.add_equality("square", move |v| v[y] - v[x] * v[x]);
//! system.fix(x, 10.0).unwrap();
//!
//! assert_eq!(system.degrees_of_freedom(), 0);
//! ```

mod constraint;
mod variable;

pub use constraint::{Constraint, Expression, Sense, Values};
pub use variable::{VarId, Variable};

use num_dual::Dual64;
use thiserror::Error;

use crate::Model;

/// Errors raised when editing an [`EquationSystem`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("value {value} is not finite")]
    NonFiniteValue { value: f64 },

    #[error("lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds { lower: f64, upper: f64 },
}

/// Variables plus the equality and inequality constraints linking them.
#[derive(Debug, Default)]
pub struct EquationSystem {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl EquationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a free variable with an initial value and returns its handle.
    pub fn add_var(&mut self, name: impl Into<String>, value: f64) -> VarId {
        self.variables.push(Variable::new(name, value));
        VarId(self.variables.len() - 1)
    }

    /// Sets the bounds of `var`.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is non-finite or `lower > upper`.
    pub fn set_bounds(
        &mut self,
        var: VarId,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<(), Error> {
        for value in lower.into_iter().chain(upper) {
            check_finite(value)?;
        }
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if lower > upper {
                return Err(Error::InvertedBounds { lower, upper });
            }
        }

        let variable = &mut self.variables[var.0];
        variable.lower = lower;
        variable.upper = upper;
        Ok(())
    }

    /// Fixes `var` at `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not finite.
    pub fn fix(&mut self, var: VarId, value: f64) -> Result<(), Error> {
        check_finite(value)?;
        let variable = &mut self.variables[var.0];
        variable.value = value;
        variable.fixed = true;
        Ok(())
    }

    /// Releases `var` back to the solver, keeping its current value.
    pub fn unfix(&mut self, var: VarId) {
        self.variables[var.0].fixed = false;
    }

    /// Overwrites the value of `var` without changing whether it is fixed.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not finite.
    pub fn set_value(&mut self, var: VarId, value: f64) -> Result<(), Error> {
        check_finite(value)?;
        self.variables[var.0].value = value;
        Ok(())
    }

    #[must_use]
    pub fn value(&self, var: VarId) -> f64 {
        self.variables[var.0].value
    }

    #[must_use]
    pub fn is_fixed(&self, var: VarId) -> bool {
        self.variables[var.0].fixed
    }

    #[must_use]
    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.0]
    }

    /// Adds the constraint `expr(v) = 0`.
    pub fn add_equality<F>(&mut self, name: impl Into<String>, expr: F)
    where
        F: Fn(&Values<'_>) -> Dual64 + 'static,
    {
        self.constraints
            .push(Constraint::new(name, Sense::Equality, Box::new(expr)));
    }

    /// Adds the constraint `expr(v) <= 0`.
    pub fn add_inequality<F>(&mut self, name: impl Into<String>, expr: F)
    where
        F: Fn(&Values<'_>) -> Dual64 + 'static,
    {
        self.constraints
            .push(Constraint::new(name, Sense::LessOrEqual, Box::new(expr)));
    }

    pub fn equalities(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.sense() == Sense::Equality)
    }

    pub fn inequalities(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.sense() == Sense::LessOrEqual)
    }

    /// Returns the handles of all free variables in insertion order.
    #[must_use]
    pub fn free_vars(&self) -> Vec<VarId> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.fixed)
            .map(|(i, _)| VarId(i))
            .collect()
    }

    /// Free variables minus equality constraints.
    #[must_use]
    pub fn degrees_of_freedom(&self) -> isize {
        let free = self.variables.iter().filter(|v| !v.fixed).count() as isize;
        let equalities = self.equalities().count() as isize;
        free - equalities
    }

    /// Current values lifted to dual numbers with zero derivative.
    #[must_use]
    pub fn dual_values(&self) -> Vec<Dual64> {
        self.variables
            .iter()
            .map(|v| Dual64::new(v.value, 0.0))
            .collect()
    }

    /// Equality residuals at the current values.
    #[must_use]
    pub fn equality_residuals(&self) -> Vec<f64> {
        let values = self.dual_values();
        self.equalities().map(|c| c.evaluate(&values).re).collect()
    }

    /// Inequality values `g(v)` at the current values (feasible when `<= 0`).
    #[must_use]
    pub fn inequality_values(&self) -> Vec<f64> {
        let values = self.dual_values();
        self.inequalities()
            .map(|c| c.evaluate(&values).re)
            .collect()
    }

    /// Largest amount by which any variable lies outside its bounds.
    #[must_use]
    pub fn max_bound_violation(&self) -> f64 {
        self.variables
            .iter()
            .map(Variable::bound_violation)
            .fold(0.0, f64::max)
    }
}

impl Model for EquationSystem {
    type Var = VarId;
    type Snapshot = Vec<f64>;

    fn is_fixed(&self, var: VarId) -> bool {
        EquationSystem::is_fixed(self, var)
    }

    fn value(&self, var: VarId) -> f64 {
        EquationSystem::value(self, var)
    }

    fn bounds(&self, var: VarId) -> (Option<f64>, Option<f64>) {
        let variable = &self.variables[var.0];
        (variable.lower, variable.upper)
    }

    fn set_fixed_value(&mut self, var: VarId, value: f64) {
        let variable = &mut self.variables[var.0];
        variable.value = value;
        variable.fixed = true;
    }

    fn snapshot(&self) -> Vec<f64> {
        self.variables.iter().map(|v| v.value).collect()
    }

    fn restore(&mut self, snapshot: &Vec<f64>) {
        for (variable, &value) in self.variables.iter_mut().zip(snapshot) {
            variable.value = value;
        }
    }
}

fn check_finite(value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFiniteValue { value })
    }
}
