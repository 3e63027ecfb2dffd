use ratatui::{prelude::*, widgets::*};

pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let mut lines = vec![
        vec![
            Span::from("  q  ").light_cyan().bold(),
            Span::raw(" : Stop training and exit"),
        ],
        vec![
            Span::from("  h  ").light_cyan().bold(),
            Span::raw(" : Toggle this help popup"),
        ],
        vec![
            Span::from(" Tab ").light_cyan().bold(),
            Span::raw(" : Switch tabs"),
        ],
    ];

    match selected_tab {
        1 => lines.push(vec![
            Span::from("⬅ / ➡").light_cyan().bold(),
            Span::raw(" : Switch plots"),
        ]),
        2 => lines.extend([
            vec![
                Span::from("⬆ / ⬇").light_cyan().bold(),
                Span::raw(" : Switch log target"),
            ],
            vec![
                Span::from("⬅ / ➡").light_cyan().bold(),
                Span::raw(" : Show fewer/more log levels"),
            ],
            vec![
                Span::from("  f  ").light_cyan().bold(),
                Span::raw(" : Toggle focus on the selected target"),
            ],
            vec![
                Span::from("  s  ").light_cyan().bold(),
                Span::raw(" : Toggle the target selector widget"),
            ],
            vec![
                Span::from("PgUp ").light_cyan().bold(),
                Span::raw(" : Scroll up in log history"),
            ],
            vec![
                Span::from("PgDn ").light_cyan().bold(),
                Span::raw(" : Scroll down in log history"),
            ],
            vec![
                Span::from(" Esc ").light_cyan().bold(),
                Span::raw(" : Leave page mode"),
            ],
        ]),
        _ => {}
    }

    let lines = lines.into_iter().map(Line::from).collect::<Vec<_>>();

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length((lines.len() + 4) as u16),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(72),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
