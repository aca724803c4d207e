use std::fmt::Debug;

/// A nonlinear system whose variables the continuation driver can move.
///
/// The driver only touches the fixed values of its homotopy inputs through
/// [`Model::set_fixed_value`]. Everything else in the model is changed by a
/// [`Solver`](crate::Solver) as a side effect of solving.
pub trait Model {
    /// Handle to a single variable.
    type Var: Copy + PartialEq + Debug;

    /// A saved copy of every variable value in the model.
    type Snapshot: Clone;

    /// Returns `true` if `var` is fixed (removed from the degrees of freedom).
    fn is_fixed(&self, var: Self::Var) -> bool;

    /// Returns the current value of `var`.
    fn value(&self, var: Self::Var) -> f64;

    /// Returns the `(lower, upper)` bounds of `var`.
    ///
    /// The default implementation reports an unbounded variable.
    fn bounds(&self, _var: Self::Var) -> (Option<f64>, Option<f64>) {
        (None, None)
    }

    /// Fixes `var` at `value`, overwriting any previous fixed value.
    fn set_fixed_value(&mut self, var: Self::Var, value: f64);

    /// Captures the current value of every variable.
    fn snapshot(&self) -> Self::Snapshot;

    /// Reloads variable values from a previously captured snapshot.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}
