use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, symbols::Marker, widgets::*};

use crate::viz::util::event_keycode;

use super::Component;

/// A single metric charted against episodes
pub struct Plot {
    y_title: String,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    data: Vec<(f64, f64)>,
}

impl Plot {
    pub fn new(y_title: &str, episodes: u32) -> Self {
        Self {
            y_title: String::from(y_title),
            x_bounds: [0.0, episodes.max(1) as f64],
            y_bounds: [f64::MAX, f64::MIN],
            data: Vec::new(),
        }
    }

    pub fn update(&mut self, point: (f64, f64)) {
        self.x_bounds[1] = self.x_bounds[1].max(point.0);
        self.y_bounds[0] = self.y_bounds[0].min(point.1);
        self.y_bounds[1] = self.y_bounds[1].max(point.1);
        self.data.push(point);
    }

    fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
        bounds.iter().map(|b| format!("{b:.1}").bold()).collect()
    }
}

impl Widget for &Plot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .cyan()
            .data(&self.data);

        let x_axis = Axis::default()
            .title("Episode")
            .dark_gray()
            .labels(Plot::labels(self.x_bounds))
            .bounds(self.x_bounds);

        let y_axis = Axis::default()
            .title(self.y_title.as_str())
            .dark_gray()
            .labels(Plot::labels(self.y_bounds))
            .bounds(self.y_bounds);

        Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Plots")
                    .padding(Padding::uniform(2)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// One plot per metric, switched with the arrow keys
pub struct Plots {
    names: Vec<&'static str>,
    plots: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn new(names: Vec<&'static str>, episodes: u32) -> Self {
        let plots = names.iter().map(|k| Plot::new(k, episodes)).collect();
        Self {
            names,
            plots,
            selected: 0,
        }
    }

    pub fn update(&mut self, episode: u32, data: &[f64]) {
        for (plot, &metric) in self.plots.iter_mut().zip(data) {
            plot.update((episode as f64, metric));
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        Tabs::new(self.names.iter().copied())
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected)
            .render(area, buf);

        if !self.plots.is_empty() {
            self.plots[self.selected].render(area, buf);
        }
    }
}

impl Component for Plots {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        let Some(key) = event_keycode(event) else {
            return false;
        };

        let len = self.plots.len().max(1);
        match key {
            KeyCode::Left => self.selected = (self.selected + len - 1) % len,
            KeyCode::Right => self.selected = (self.selected + 1) % len,
            _ => return false,
        }
        true
    }
}
