/// Q-learning agents
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Configuration errors
pub mod error;

/// Exploration policies
pub mod exploration;

/// The maze environment
pub mod maze;

/// Per-episode metric reporting
pub mod report;

/// Training loop orchestration
pub mod trainer;

/// Live training visualization
#[cfg(feature = "viz")]
pub mod viz;
