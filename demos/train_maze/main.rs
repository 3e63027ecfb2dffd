use qmaze::{
    algo::q_table::{QTableAgent, QTableAgentConfig},
    maze::{Maze, MazeConfig},
    trainer::Trainer,
    viz,
};

const NUM_EPISODES: u32 = 400;
const STEP_CAP: u32 = 2000;

fn main() {
    let maze = Maze::new(MazeConfig::default()).expect("default config is valid");
    let agent =
        QTableAgent::new(maze.size(), QTableAgentConfig::default()).expect("default config is valid");
    let plot_keys = maze.report.keys();
    let mut trainer = Trainer::new(maze, agent).with_step_cap(STEP_CAP);

    let (handle, tx) = viz::init(plot_keys, NUM_EPISODES);

    for _ in 0..NUM_EPISODES {
        let summary = trainer.run_episode();
        let snapshot = viz::MazeSnapshot::capture(trainer.maze(), trainer.agent().q_table());
        let update = viz::Update {
            episode: summary.episode,
            data: vec![summary.reward, summary.steps as f64],
            snapshot,
        };
        if tx.send(update).is_err() {
            // viz was closed with `q`
            break;
        }
    }
    drop(tx);

    let _ = handle.join();
}
