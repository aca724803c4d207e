use ramp_core::Model;

use super::Error;

/// One homotopy variable and the straight line it travels.
#[derive(Debug, Clone, Copy)]
struct Leg<V> {
    var: V,
    start: f64,
    target: f64,
}

/// The validated set of homotopy variables.
///
/// All variables move in lockstep: at progress `p`, each one is fixed at
/// `start + p * (target - start)`.
#[derive(Debug, Clone)]
pub(super) struct Path<V> {
    legs: Vec<Leg<V>>,
}

impl<V: Copy + PartialEq> Path<V> {
    /// Pairs `variables` with `targets`, reading start values from `model`.
    pub(super) fn new<M>(model: &M, variables: &[V], targets: &[f64]) -> Result<Self, Error>
    where
        M: Model<Var = V>,
    {
        if variables.is_empty() {
            return Err(Error::NoVariables);
        }
        if variables.len() != targets.len() {
            return Err(Error::LengthMismatch {
                variables: variables.len(),
                targets: targets.len(),
            });
        }

        let mut legs = Vec::with_capacity(variables.len());
        for (index, (&var, &target)) in variables.iter().zip(targets).enumerate() {
            if !model.is_fixed(var) {
                return Err(Error::NotFixed { index });
            }
            if variables[..index].contains(&var) {
                return Err(Error::DuplicateVariable { index });
            }
            if !target.is_finite() {
                return Err(Error::NonFiniteTarget {
                    index,
                    value: target,
                });
            }
            let (lower, upper) = model.bounds(var);
            if lower.is_some_and(|lb| target < lb) || upper.is_some_and(|ub| target > ub) {
                return Err(Error::TargetOutOfBounds {
                    index,
                    target,
                    lower,
                    upper,
                });
            }

            legs.push(Leg {
                var,
                start: model.value(var),
                target,
            });
        }

        Ok(Self { legs })
    }

    pub(super) fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns `true` if every variable already sits at its target.
    #[allow(clippy::float_cmp)]
    pub(super) fn is_stationary(&self) -> bool {
        self.legs.iter().all(|leg| leg.start == leg.target)
    }

    /// Fixes every variable at its value for `progress`.
    ///
    /// At `progress >= 1` the targets themselves are used, so the final state
    /// lands exactly on them rather than on an interpolated approximation.
    pub(super) fn apply<M>(&self, model: &mut M, progress: f64)
    where
        M: Model<Var = V>,
    {
        for leg in &self.legs {
            let value = if progress >= 1.0 {
                leg.target
            } else {
                leg.start + progress * (leg.target - leg.start)
            };
            model.set_fixed_value(leg.var, value);
        }
    }
}
