use thiserror::Error;

use crate::maze::Cell;

/// Rejected configuration, reported at construction time only
///
/// Nothing in normal operation can fail after construction: transitions and
/// updates are total over valid inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("{name} cell {cell:?} is outside the {size}x{size} grid")]
    OutOfBounds {
        name: &'static str,
        cell: Cell,
        size: usize,
    },
    #[error("start and goal must be distinct cells")]
    StartIsGoal,
    #[error("invalid value for `{name}`, must be in the interval [0, 1]")]
    Hyperparameter { name: &'static str },
    #[error("invalid decay schedule: `vi - vf` must have the same sign as `rate`")]
    Decay,
}
