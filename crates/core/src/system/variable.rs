/// Handle to a variable in an [`EquationSystem`](super::EquationSystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(super) usize);

impl VarId {
    /// Returns the position of the variable within its system.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named scalar variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(super) name: String,
    pub(super) value: f64,
    pub(super) fixed: bool,
    pub(super) lower: Option<f64>,
    pub(super) upper: Option<f64>,
}

impl Variable {
    pub(super) fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            fixed: false,
            lower: None,
            upper: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[must_use]
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Returns how far `value` lies outside the bounds (zero when inside).
    pub(super) fn bound_violation(&self) -> f64 {
        let below = self.lower.map_or(0.0, |lb| lb - self.value);
        let above = self.upper.map_or(0.0, |ub| self.value - ub);
        below.max(above).max(0.0)
    }
}
