use crate::ui::layout::calculate_screen_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_scoring_transition(f: &mut Frame) {
    let layout = calculate_screen_chunks(f.area(), 5);

    let content = vec![
        Line::from(Span::styled(
            " Keep Learning! ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Calculating your final score is..."),
        Line::from(""),
        Line::from(Span::styled(
            "0",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )),
    ];
    let body = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(body, layout.content_area);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
