use log::{info, trace};

use crate::algo::q_table::QTableAgent;
use crate::decay::{Constant, Decay};
use crate::maze::{Cell, Maze};

/// Summary of one finished training episode
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EpisodeSummary {
    pub episode: u32,
    pub steps: u32,
    pub reward: f64,
    pub reached_goal: bool,
}

/// Drives the training loop
///
/// Each cycle asks the maze for the current state, asks the agent for an
/// action, feeds the action to the maze, and feeds the outcome back into the
/// agent's update rule. The maze itself never terminates an episode early; an
/// unreachable goal would loop forever, so a step cap can be set with
/// [`with_step_cap`](Self::with_step_cap).
pub struct Trainer<D: Decay = Constant> {
    maze: Maze,
    agent: QTableAgent<D>,
    episode: u32,
    step_cap: Option<u32>,
}

impl<D: Decay> Trainer<D> {
    pub fn new(maze: Maze, agent: QTableAgent<D>) -> Self {
        Self {
            maze,
            agent,
            episode: 0,
            step_cap: None,
        }
    }

    /// Bound every episode to at most `steps` steps
    pub fn with_step_cap(mut self, steps: u32) -> Self {
        self.step_cap = Some(steps);
        self
    }

    /// Run a single episode to termination (or to the step cap)
    pub fn run_episode(&mut self) -> EpisodeSummary {
        let mut state = self.maze.reset();
        let mut reached_goal = false;

        loop {
            let action = self.agent.select_action(state);
            let outcome = self.maze.step(action);
            self.agent.update(state, action, outcome.reward, outcome.state);
            trace!(
                "step {}: {:?} -{:?}-> {:?} reward {}{}",
                self.maze.steps(),
                state,
                action,
                outcome.state,
                outcome.reward,
                if outcome.obstacle_hit { " (obstacle hit)" } else { "" },
            );
            state = outcome.state;

            if outcome.done {
                reached_goal = true;
                break;
            }
            if self.step_cap.is_some_and(|cap| self.maze.steps() >= cap) {
                break;
            }
        }

        let report = self.maze.report.take();
        let summary = EpisodeSummary {
            episode: self.episode,
            steps: self.maze.steps(),
            reward: report["reward"],
            reached_goal,
        };
        info!(
            "episode {} complete - steps: {}, total reward: {}",
            summary.episode + 1,
            summary.steps,
            summary.reward,
        );

        self.agent.next_episode();
        self.episode += 1;
        summary
    }

    /// Run `episodes` episodes back to back
    pub fn run(&mut self, episodes: u32) {
        for _ in 0..episodes {
            self.run_episode();
        }
    }

    /// Follow the greedy policy from the start without exploring or learning
    ///
    /// Returns the visited cells, ending at the goal or after `max_steps`.
    pub fn greedy_rollout(&mut self, max_steps: u32) -> Vec<Cell> {
        let mut state = self.maze.reset();
        let mut rollout = vec![state];
        for _ in 0..max_steps {
            let outcome = self.maze.step(self.agent.q_table().best_action(state));
            state = outcome.state;
            rollout.push(state);
            if outcome.done {
                break;
            }
        }
        rollout
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn agent(&self) -> &QTableAgent<D> {
        &self.agent
    }

    /// Finished episodes so far
    pub fn episode(&self) -> u32 {
        self.episode
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::algo::q_table::QTableAgentConfig;
    use crate::decay;
    use crate::exploration::EpsilonGreedy;
    use crate::maze::MazeConfig;

    use super::*;

    fn open_maze(seed: u64) -> Maze {
        let config = MazeConfig {
            obstacles: 0,
            ..Default::default()
        };
        Maze::with_rng(config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn step_cap_bounds_an_episode() {
        let maze = open_maze(0);
        let agent = QTableAgent::seeded(10, QTableAgentConfig::default(), 0).unwrap();
        let mut trainer = Trainer::new(maze, agent).with_step_cap(5);

        let summary = trainer.run_episode();
        assert!(summary.steps <= 5, "Episode is cut off at the cap");
        assert!(!summary.reached_goal, "Five steps cannot reach the far corner");
        assert_eq!(summary.reward, -5.0, "Capped episode accumulated only step costs");
    }

    #[test]
    fn summaries_count_episodes() {
        let maze = open_maze(0);
        let agent = QTableAgent::seeded(10, QTableAgentConfig::default(), 0).unwrap();
        let mut trainer = Trainer::new(maze, agent).with_step_cap(50);

        assert_eq!(trainer.run_episode().episode, 0);
        assert_eq!(trainer.run_episode().episode, 1);
        assert_eq!(trainer.episode(), 2);
        assert_eq!(trainer.agent().episode(), 2, "Agent decay clock follows");
    }

    #[test]
    fn greedy_runs_are_identical_without_exploration() {
        // Zero epsilon and the fixed tie-break leave no randomness at all, so
        // two independent runs from all-zero tables trace the same cells.
        let run = |seed: u64| {
            let maze = open_maze(seed);
            let config = QTableAgentConfig {
                exploration: EpsilonGreedy::new(decay::Constant::new(0.0)),
                ..Default::default()
            };
            let agent = QTableAgent::seeded(10, config, seed).unwrap();
            let mut trainer = Trainer::new(maze, agent).with_step_cap(500);
            trainer.run_episode();
            trainer.maze().path().to_vec()
        };

        assert_eq!(run(1), run(2), "First-episode paths match cell for cell");
    }

    #[test]
    fn converges_to_a_manhattan_optimal_path() {
        // Regression check on the full loop: 10x10, no obstacles, defaults.
        // After enough episodes the greedy path must reach (9, 9) within the
        // Manhattan-optimal 18 steps.
        let maze = open_maze(3);
        let agent = QTableAgent::seeded(10, QTableAgentConfig::default(), 3).unwrap();
        let mut trainer = Trainer::new(maze, agent).with_step_cap(400);

        trainer.run(3000);

        let rollout = trainer.greedy_rollout(18);
        assert_eq!(
            rollout.last(),
            Some(&(9, 9)),
            "Greedy rollout reaches the goal in at most 18 steps"
        );
    }
}
