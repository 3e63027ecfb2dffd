use rand::{thread_rng, Rng};
use strum::{EnumCount, EnumIter, FromRepr, VariantArray};

use crate::error::ConfigError;
use crate::report::Report;

/// Position coordinates in the grid as `(row, col)`
pub type Cell = (usize, usize);

/// A single grid cell marking
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Square {
    Open = 0,
    Obstacle = 1,
}

/// The four movement actions
///
/// Declaration order `Up, Down, Left, Right` is the canonical order: every
/// max-over-actions computation resolves ties to the first action in this
/// order, so greedy behavior is reproducible across runs.
#[derive(EnumCount, EnumIter, FromRepr, VariantArray, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// Construction parameters for a [`Maze`]
///
/// Every field is independently overridable from [`Default`], which gives a
/// 10x10 grid, 20 obstacle draws, start `(0, 0)`, goal `(9, 9)`, goal reward
/// `+100`, and step cost `-1`.
#[derive(Clone, Debug)]
pub struct MazeConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Number of obstacle coordinate pairs sampled at construction
    ///
    /// Sampling is with replacement: duplicates collapse, and draws landing on
    /// the start or goal cell are skipped, so the effective obstacle count may
    /// be lower than configured. The intent is approximate density.
    pub obstacles: usize,
    pub start: Cell,
    pub goal: Cell,
    /// Reward for the transition that enters the goal cell
    pub goal_reward: f64,
    /// Reward for every other step, obstacle hit or not
    pub step_cost: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 10,
            obstacles: 20,
            start: (0, 0),
            goal: (9, 9),
            goal_reward: 100.0,
            step_cost: -1.0,
        }
    }
}

/// The result of one environment transition
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StepOutcome {
    /// The agent's position after the move
    pub state: Cell,
    pub reward: f64,
    /// Whether the move entered the goal cell, ending the episode
    pub done: bool,
    /// Whether the move was reverted by an obstacle
    pub obstacle_hit: bool,
}

/// A square grid maze with randomly placed obstacles
///
/// The transition function is deterministic once the obstacle layout is fixed
/// at construction: a move one unit in the requested direction, clamped at
/// grid boundaries, and reverted (but flagged) if the destination is an
/// obstacle. Entering the goal cell terminates the episode.
///
/// The maze also records the observation surface a visualization layer needs:
/// the path taken this episode, the step count, and a [`Report`] accumulating
/// `"reward"` and `"steps"`. It never calls into any rendering code.
pub struct Maze {
    size: usize,
    grid: Vec<Square>,
    start: Cell,
    goal: Cell,
    goal_reward: f64,
    step_cost: f64,
    pos: Cell,
    steps: u32,
    path: Vec<Cell>,
    pub report: Report,
}

impl Maze {
    /// Build a maze, placing obstacles from [`thread_rng`]
    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut thread_rng())
    }

    /// Build a maze, placing obstacles from the provided random source
    pub fn with_rng(config: MazeConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        let MazeConfig {
            size,
            obstacles,
            start,
            goal,
            goal_reward,
            step_cost,
        } = config;

        if size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        for (name, cell) in [("start", start), ("goal", goal)] {
            if cell.0 >= size || cell.1 >= size {
                return Err(ConfigError::OutOfBounds { name, cell, size });
            }
        }
        if start == goal {
            return Err(ConfigError::StartIsGoal);
        }

        let mut grid = vec![Square::Open; size * size];
        for _ in 0..obstacles {
            let cell: Cell = (rng.gen_range(0..size), rng.gen_range(0..size));
            if cell != start && cell != goal {
                grid[cell.0 * size + cell.1] = Square::Obstacle;
            }
        }

        Ok(Self {
            size,
            grid,
            start,
            goal,
            goal_reward,
            step_cost,
            pos: start,
            steps: 0,
            path: vec![start],
            report: Report::new(vec!["reward", "steps"]),
        })
    }

    /// Reset to the start state, clearing the path, step count, and report
    pub fn reset(&mut self) -> Cell {
        self.pos = self.start;
        self.steps = 0;
        self.path.clear();
        self.path.push(self.start);
        self.report.take();
        self.pos
    }

    /// Take one step in the requested direction
    ///
    /// An action that would leave the grid is a no-op on that axis; this is
    /// not an obstacle hit and carries no penalty beyond the step cost. A move
    /// into an obstacle is reverted but flagged. The reward is the goal reward
    /// when the resulting cell is the goal, otherwise the step cost.
    ///
    /// Calling `step` after the episode is done is the caller's contract to
    /// avoid; see [`is_active`](Self::is_active).
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let (row, col) = self.pos;
        let candidate = match action {
            Action::Up if row > 0 => (row - 1, col),
            Action::Down if row + 1 < self.size => (row + 1, col),
            Action::Left if col > 0 => (row, col - 1),
            Action::Right if col + 1 < self.size => (row, col + 1),
            _ => (row, col),
        };

        let obstacle_hit = self.square(candidate) == Square::Obstacle;
        if !obstacle_hit {
            self.pos = candidate;
        }

        self.steps += 1;
        self.path.push(self.pos);

        let done = self.pos == self.goal;
        let reward = if done { self.goal_reward } else { self.step_cost };

        self.report.entry("steps").and_modify(|x| *x += 1.0);
        self.report.entry("reward").and_modify(|x| *x += reward);

        StepOutcome {
            state: self.pos,
            reward,
            done,
            obstacle_hit,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn position(&self) -> Cell {
        self.pos
    }

    /// Steps taken this episode
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Cells visited this episode, starting with the start cell
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn square(&self, cell: Cell) -> Square {
        self.grid[cell.0 * self.size + cell.1]
    }

    /// The full grid in row-major order
    pub fn grid(&self) -> &[Square] {
        &self.grid
    }

    /// Determine if the episode is still running
    pub fn is_active(&self) -> bool {
        self.pos != self.goal
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use strum::IntoEnumIterator;

    use super::*;

    fn open_maze(size: usize) -> Maze {
        let config = MazeConfig {
            size,
            obstacles: 0,
            start: (0, 0),
            goal: (size - 1, size - 1),
            ..Default::default()
        };
        Maze::with_rng(config, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn boundary_clamp() {
        let mut env = open_maze(3);
        for row in 0..3 {
            for col in 0..3 {
                for action in Action::iter() {
                    env.pos = (row, col);
                    let out = env.step(action);
                    assert!(
                        out.state.0 < 3 && out.state.1 < 3,
                        "Position stays on the grid from {:?} going {:?}",
                        (row, col),
                        action,
                    );
                    assert!(!out.obstacle_hit, "A clamped move is not an obstacle hit");
                }
            }
        }
    }

    #[test]
    fn clamped_move_costs_a_normal_step() {
        let mut env = open_maze(3);
        let out = env.step(Action::Up);
        assert_eq!(out.state, (0, 0), "Agent does not move off the top edge");
        assert_eq!(out.reward, -1.0, "No extra penalty for a clamped move");
        assert!(!out.done);
    }

    #[test]
    fn obstacle_hit_reverts_the_move() {
        let mut env = open_maze(3);
        env.grid[1] = Square::Obstacle; // (0, 1)

        let out = env.step(Action::Right);
        assert_eq!(out.state, (0, 0), "Move into an obstacle is reverted");
        assert!(out.obstacle_hit, "Obstacle hit is flagged");
        assert_eq!(out.reward, -1.0, "Obstacle hit costs a normal step");
        assert!(!out.done);

        let out = env.step(Action::Down);
        assert_eq!(out.state, (1, 0), "Moves around the obstacle still work");
        assert!(!out.obstacle_hit);
    }

    #[test]
    fn goal_yields_done_and_goal_reward() {
        let mut env = open_maze(3);
        env.pos = (2, 0);

        let out = env.step(Action::Right);
        assert_eq!(out.state, (2, 1));
        assert!(!out.done, "Done only on the transition entering the goal");
        assert_eq!(out.reward, -1.0);

        let out = env.step(Action::Right);
        assert_eq!(out.state, (2, 2));
        assert!(out.done, "Entering the goal terminates the episode");
        assert_eq!(out.reward, 100.0, "Goal reward overrides the step cost");
        assert!(!env.is_active());
    }

    #[test]
    fn reset_restores_the_start_state() {
        let mut env = open_maze(3);
        env.step(Action::Down);
        env.step(Action::Right);

        assert_eq!(env.reset(), (0, 0), "Reset returns the configured start");
        assert_eq!(env.position(), (0, 0));
        assert_eq!(env.steps(), 0, "Step count cleared");
        assert_eq!(env.path(), &[(0, 0)], "Path cleared to the start cell");
        assert_eq!(env.report["reward"], 0.0, "Report cleared");
        assert!(env.is_active());
    }

    #[test]
    fn path_records_visited_cells() {
        let mut env = open_maze(3);
        env.step(Action::Down);
        env.step(Action::Up);
        env.step(Action::Up); // clamped
        assert_eq!(
            env.path(),
            &[(0, 0), (1, 0), (0, 0), (0, 0)],
            "Path records the position after every step, clamped no-ops included"
        );
        assert_eq!(env.steps(), 3);
    }

    #[test]
    fn obstacle_density_is_approximate() {
        let config = MazeConfig::default();
        let env = Maze::with_rng(config.clone(), &mut StdRng::seed_from_u64(42)).unwrap();

        let count = env.grid().iter().filter(|&&s| s == Square::Obstacle).count();
        assert!(
            count <= config.obstacles,
            "Duplicate draws collapse, so the count never exceeds the configured number"
        );
        assert_eq!(env.square(env.start()), Square::Open, "Start is never blocked");
        assert_eq!(env.square(env.goal()), Square::Open, "Goal is never blocked");
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let err = Maze::new(MazeConfig {
            size: 0,
            ..Default::default()
        })
        .err()
        .unwrap();
        assert_eq!(err, ConfigError::ZeroSize);

        let err = Maze::new(MazeConfig {
            goal: (10, 3),
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::OutOfBounds { name: "goal", .. }));

        let err = Maze::new(MazeConfig {
            start: (4, 4),
            goal: (4, 4),
            ..Default::default()
        })
        .err()
        .unwrap();
        assert_eq!(err, ConfigError::StartIsGoal);
    }
}
