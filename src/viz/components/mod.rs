pub mod help;
pub mod log;
pub mod maze_map;
pub mod plot;

use crossterm::event::Event;
pub use log::Logs;
pub use maze_map::MazeMap;
pub use plot::Plots;
use ratatui::widgets::WidgetRef;

/// A tab body that renders itself and may consume key events
pub trait Component: WidgetRef {
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
