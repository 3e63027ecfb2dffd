use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use strum::{EnumCount, IntoEnumIterator, VariantArray};

use crate::decay::{self, Decay};
use crate::error::ConfigError;
use crate::exploration::{Choice, EpsilonGreedy};
use crate::maze::{Action, Cell};

/// A dense action-value table covering every cell of a fixed-size grid
///
/// Rows are grid cells in row-major order; columns are actions in canonical
/// declaration order. The table is zero-initialized over the full grid at
/// construction, regardless of obstacle placement, and never changes shape
/// afterwards. Only [`QTableAgent::update`] mutates it.
#[derive(Clone, Debug)]
pub struct QTable {
    size: usize,
    values: Vec<[f64; Action::COUNT]>,
}

impl QTable {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![[0.0; Action::COUNT]; size * size],
        }
    }

    fn row(&self, state: Cell) -> &[f64; Action::COUNT] {
        &self.values[state.0 * self.size + state.1]
    }

    fn set(&mut self, state: Cell, action: Action, value: f64) {
        self.values[state.0 * self.size + state.1][action as usize] = value;
    }

    pub fn get(&self, state: Cell, action: Action) -> f64 {
        self.row(state)[action as usize]
    }

    /// The greedy action for `state`
    ///
    /// Ties resolve to the first action in canonical order, so an untrained
    /// (all-zero) row yields [`Action::Up`].
    pub fn best_action(&self, state: Cell) -> Action {
        let row = self.row(state);
        let mut best = Action::VARIANTS[0];
        for &action in &Action::VARIANTS[1..] {
            if row[action as usize] > row[best as usize] {
                best = action;
            }
        }
        best
    }

    /// The maximum estimated value for `state`, under the same tie-break rule
    /// as [`best_action`](Self::best_action)
    pub fn max_value(&self, state: Cell) -> f64 {
        self.get(state, self.best_action(state))
    }
}

/// Configuration for the [`QTableAgent`]
pub struct QTableAgentConfig<D: Decay = decay::Constant> {
    pub exploration: EpsilonGreedy<D>,
    pub alpha: f64,
    pub gamma: f64,
}

impl Default for QTableAgentConfig<decay::Constant> {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.1)),
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// A Q-learning agent over a dense per-cell action-value table
///
/// Action selection is epsilon-greedy against the table; learning is the
/// one-step temporal-difference update
/// `Q(s,a) += alpha * (reward + gamma * max_a' Q(s',a') - Q(s,a))`.
///
/// The agent owns its random source, so a [`seeded`](Self::seeded) agent in a
/// seeded maze reproduces a run exactly.
pub struct QTableAgent<D: Decay = decay::Constant> {
    q_table: QTable,
    exploration: EpsilonGreedy<D>,
    alpha: f64,   // learning rate
    gamma: f64,   // discount factor
    episode: u32, // current episode
    rng: StdRng,
}

impl<D: Decay> QTableAgent<D> {
    /// Initialize a new agent for a `grid_size` x `grid_size` maze
    ///
    /// **Errors** if `alpha` or `gamma` is not in the interval `[0, 1]`
    pub fn new(grid_size: usize, config: QTableAgentConfig<D>) -> Result<Self, ConfigError> {
        Self::with_rng(grid_size, config, StdRng::from_entropy())
    }

    /// Same as [`new`](Self::new), with a fixed seed for the exploration source
    pub fn seeded(
        grid_size: usize,
        config: QTableAgentConfig<D>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(grid_size, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        grid_size: usize,
        config: QTableAgentConfig<D>,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [("alpha", config.alpha), ("gamma", config.gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Hyperparameter { name });
            }
        }

        Ok(Self {
            q_table: QTable::new(grid_size),
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            episode: 0,
            rng,
        })
    }

    /// Choose an action for `state` with the epsilon-greedy policy
    pub fn select_action(&mut self, state: Cell) -> Action {
        match self.exploration.choose(&mut self.rng, self.episode) {
            Choice::Explore => Action::iter()
                .choose(&mut self.rng)
                .expect("there is always at least one action"),
            Choice::Exploit => self.q_table.best_action(state),
        }
    }

    /// Apply the one-step temporal-difference update for a transition
    pub fn update(&mut self, state: Cell, action: Action, reward: f64, next_state: Cell) {
        let q = self.q_table.get(state, action);
        let target = reward + self.gamma * self.q_table.max_value(next_state);
        self.q_table.set(state, action, q + self.alpha * (target - q));
    }

    /// Advance the episode counter driving the epsilon decay schedule
    pub fn next_episode(&mut self) {
        self.episode += 1;
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_epsilon_config() -> QTableAgentConfig {
        QTableAgentConfig {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.0)),
            ..Default::default()
        }
    }

    #[test]
    fn td_update_from_zero_table() {
        let mut agent = QTableAgent::seeded(10, QTableAgentConfig::default(), 0).unwrap();
        agent.update((0, 0), Action::Right, -1.0, (0, 1));
        assert_eq!(
            agent.q_table().get((0, 0), Action::Right),
            -0.1,
            "alpha * (reward + gamma * 0 - 0) with the defaults is exactly -0.1"
        );
    }

    #[test]
    fn update_bootstraps_from_the_best_next_action() {
        let mut agent = QTableAgent::seeded(3, QTableAgentConfig::default(), 0).unwrap();
        agent.q_table.set((0, 1), Action::Down, 10.0);
        agent.q_table.set((0, 1), Action::Left, 4.0);

        agent.update((0, 0), Action::Right, -1.0, (0, 1));
        let expected = 0.1 * (-1.0 + 0.9 * 10.0);
        assert_eq!(agent.q_table().get((0, 0), Action::Right), expected);
    }

    #[test]
    fn ties_resolve_to_the_first_action_in_canonical_order() {
        let mut table = QTable::new(3);
        assert_eq!(
            table.best_action((1, 1)),
            Action::Up,
            "All-zero row yields the first declared action"
        );

        table.set((1, 1), Action::Down, 2.0);
        table.set((1, 1), Action::Right, 2.0);
        assert_eq!(
            table.best_action((1, 1)),
            Action::Down,
            "Among tied maxima the earlier declared action wins"
        );
        assert_eq!(table.max_value((1, 1)), 2.0);
    }

    #[test]
    fn zero_epsilon_selection_is_repeatable() {
        let mut agent = QTableAgent::seeded(3, zero_epsilon_config(), 7).unwrap();
        agent.q_table.set((2, 0), Action::Right, 1.0);

        for _ in 0..50 {
            assert_eq!(
                agent.select_action((2, 0)),
                Action::Right,
                "Greedy selection is deterministic for a unique maximum"
            );
        }
    }

    #[test]
    fn hyperparameters_outside_the_unit_interval_are_rejected() {
        let config = QTableAgentConfig {
            alpha: 1.5,
            ..Default::default()
        };
        assert_eq!(
            QTableAgent::new(10, config).err().unwrap(),
            ConfigError::Hyperparameter { name: "alpha" }
        );

        let config = QTableAgentConfig {
            gamma: -0.1,
            ..Default::default()
        };
        assert_eq!(
            QTableAgent::new(10, config).err().unwrap(),
            ConfigError::Hyperparameter { name: "gamma" }
        );
    }
}
