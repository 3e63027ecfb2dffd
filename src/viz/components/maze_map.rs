use crossterm::event::Event;
use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, BorderType, Paragraph, WidgetRef,
    },
};

use crate::maze::{Action, Cell};
use crate::viz::MazeSnapshot;

use super::Component;

/// Board view: obstacles, the episode path, the agent, start/goal markers,
/// and the greedy-policy arrow for every open cell
pub struct MazeMap {
    snapshot: Option<MazeSnapshot>,
    title: String,
}

impl MazeMap {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            title: String::from("Maze"),
        }
    }

    pub fn update(&mut self, snapshot: MazeSnapshot, episode: u32, reward: Option<f64>) {
        self.title = match reward {
            Some(reward) => format!("Episode: {episode} | Total Reward: {reward:.0}"),
            None => format!("Episode: {episode}"),
        };
        self.snapshot = Some(snapshot);
    }

    fn draw_board(&self, ctx: &mut Context, s: &MazeSnapshot) {
        // Row 0 is the top of the board; canvas y grows upward.
        let flip = |(row, col): Cell| (col as f64, (s.size - 1 - row) as f64);

        for w in s.path.windows(2) {
            let (x1, y1) = flip(w[0]);
            let (x2, y2) = flip(w[1]);
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color: Color::Yellow,
            });
        }

        ctx.layer();

        for &(cell, action) in &s.greedy {
            let (x, y) = flip(cell);
            let arrow = match action {
                Action::Up => "↑",
                Action::Down => "↓",
                Action::Left => "←",
                Action::Right => "→",
            };
            ctx.print(x, y, Span::styled(arrow, Style::default().dark_gray()));
        }

        for &cell in &s.obstacles {
            let (x, y) = flip(cell);
            ctx.print(x, y, Span::styled("■", Style::default().green()));
        }

        let (x, y) = flip(s.start);
        ctx.print(x, y, Span::styled("S", Style::default().blue().bold()));
        let (x, y) = flip(s.goal);
        ctx.print(x, y, Span::styled("G", Style::default().yellow().bold()));

        let (x, y) = flip(s.position);
        ctx.draw(&Points {
            coords: &[(x, y)],
            color: Color::Red,
        });
    }
}

impl WidgetRef for MazeMap {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());

        let Some(s) = &self.snapshot else {
            Paragraph::new("Waiting for the first episode...")
                .block(block)
                .render(area, buf);
            return;
        };

        let bound = s.size as f64 - 0.5;
        Canvas::default()
            .block(block)
            .x_bounds([-0.5, bound])
            .y_bounds([-0.5, bound])
            .paint(|ctx| self.draw_board(ctx, s))
            .render(area, buf);
    }
}

impl Component for MazeMap {
    fn handle_ui_event(&mut self, _event: &Event) -> bool {
        false
    }
}
