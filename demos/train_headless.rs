use std::{error::Error, fs, path::Path};

use qmaze::{
    algo::q_table::{QTableAgent, QTableAgentConfig},
    maze::{Maze, MazeConfig},
    trainer::Trainer,
};

const NUM_EPISODES: u32 = 400;
const STEP_CAP: u32 = 2000;

fn main() -> Result<(), Box<dyn Error>> {
    let out = Path::new("demos/out");
    fs::create_dir_all(out)?;

    let maze = Maze::new(MazeConfig::default())?;
    let agent = QTableAgent::new(maze.size(), QTableAgentConfig::default())?;
    let mut trainer = Trainer::new(maze, agent).with_step_cap(STEP_CAP);

    let mut wtr = csv::Writer::from_path(out.join("data.csv"))?;
    wtr.write_record(["episode", "steps", "reward"])?;

    for _ in 0..NUM_EPISODES {
        let summary = trainer.run_episode();
        wtr.write_record(&[
            summary.episode.to_string(),
            summary.steps.to_string(),
            summary.reward.to_string(),
        ])?;
    }

    wtr.flush()?;

    let rollout = trainer.greedy_rollout(2 * trainer.maze().size() as u32);
    println!("greedy rollout after training: {rollout:?}");

    Ok(())
}
