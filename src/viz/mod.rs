use std::{
    io,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::algo::q_table::QTable;
use crate::maze::{Action, Cell, Maze, Square};

use self::components::{help::render_help, Component, Logs, MazeMap, Plots};
use self::util::event_keycode;

mod components;
mod tui;
mod util;

const TABS: [&str; 3] = ["Maze", "Plots", "Logs"];

/// A copy of the maze observation surface sufficient to redraw the board
#[derive(Clone, Debug)]
pub struct MazeSnapshot {
    pub size: usize,
    pub obstacles: Vec<Cell>,
    pub start: Cell,
    pub goal: Cell,
    pub path: Vec<Cell>,
    pub position: Cell,
    /// Greedy action per open non-goal cell, for the policy overlay
    pub greedy: Vec<(Cell, Action)>,
}

impl MazeSnapshot {
    /// Capture the current maze and table state
    ///
    /// This is the pull side of the interface: the training loop captures a
    /// snapshot whenever it wants to publish one; the core never pushes.
    pub fn capture(maze: &Maze, q_table: &QTable) -> Self {
        let size = maze.size();
        let mut obstacles = Vec::new();
        let mut greedy = Vec::new();
        for row in 0..size {
            for col in 0..size {
                let cell = (row, col);
                match maze.square(cell) {
                    Square::Obstacle => obstacles.push(cell),
                    Square::Open if cell != maze.goal() => {
                        greedy.push((cell, q_table.best_action(cell)))
                    }
                    Square::Open => {}
                }
            }
        }

        Self {
            size,
            obstacles,
            start: maze.start(),
            goal: maze.goal(),
            path: maze.path().to_vec(),
            position: maze.position(),
            greedy,
        }
    }
}

/// One finished episode, as published by the training loop
pub struct Update {
    pub episode: u32,
    /// Metric values in the same order as the plot keys passed to [`init`]
    pub data: Vec<f64>,
    pub snapshot: MazeSnapshot,
}

#[derive(Default, Clone, Copy, PartialEq)]
enum State {
    #[default]
    Train,
    Quit,
}

pub struct App {
    state: State,
    episode: u32,
    total_episodes: u32,
    plot_names: Vec<&'static str>,
    maze_view: MazeMap,
    plots: Plots,
    logs: Logs,
    selected_tab: usize,
    show_help: bool,
}

impl App {
    pub fn new(plot_keys: Vec<&'static str>, episodes: u32) -> Self {
        Self {
            state: State::default(),
            episode: 0,
            total_episodes: episodes,
            plot_names: plot_keys.clone(),
            maze_view: MazeMap::new(),
            plots: Plots::new(plot_keys, episodes),
            logs: Logs::new(),
            selected_tab: 0,
            show_help: false,
        }
    }

    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut terminal = tui::init()?;

        while self.state != State::Quit {
            // Drain everything the trainer published since the last frame.
            // A disconnect means training finished; keep the final frame up
            // until the user quits.
            loop {
                match rx.try_recv() {
                    Ok(update) => self.apply(update),
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                let ev = event::read()?;
                self.handle_ui_event(&ev);
            }
        }

        tui::restore()
    }

    fn apply(&mut self, update: Update) {
        self.episode = update.episode + 1;
        let reward = self
            .plot_names
            .iter()
            .position(|&k| k == "reward")
            .and_then(|i| update.data.get(i).copied());
        self.maze_view.update(update.snapshot, self.episode, reward);
        self.plots.update(update.episode, &update.data);
    }

    fn handle_ui_event(&mut self, event: &Event) {
        let component: &mut dyn Component = match self.selected_tab {
            0 => &mut self.maze_view,
            1 => &mut self.plots,
            _ => &mut self.logs,
        };
        if component.handle_ui_event(event) {
            return;
        }

        let Some(key) = event_keycode(event) else {
            return;
        };
        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Tab => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {}
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(3),
            ])
            .split(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::horizontal(1)))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(vert[0], buf);

        match self.selected_tab {
            0 => self.maze_view.render_ref(vert[1], buf),
            1 => self.plots.render_ref(vert[1], buf),
            _ => self.logs.render_ref(vert[1], buf),
        }

        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Progress"),
            )
            .gauge_style(Color::Cyan)
            .ratio(f64::min(
                self.episode as f64 / self.total_episodes.max(1) as f64,
                1.0,
            ))
            .render(vert[2], buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}

/// Install the `tui-logger` sink and spawn the UI thread
///
/// **Returns** the thread handle and the channel the training loop publishes
/// [`Update`]s on. Dropping the sender (or finishing training) freezes the
/// final frame; the UI exits on `q`.
pub fn init(
    plot_keys: Vec<&'static str>,
    episodes: u32,
) -> (JoinHandle<io::Result<()>>, Sender<Update>) {
    let _ = tui_logger::init_logger(log::LevelFilter::Trace);
    tui_logger::set_default_level(log::LevelFilter::Debug);

    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || App::new(plot_keys, episodes).run(rx));

    (handle, tx)
}
