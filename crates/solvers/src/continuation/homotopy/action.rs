/// Control actions supported by the homotopy solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop at the last accepted point and return the progress made so far.
    StopEarly,
}
