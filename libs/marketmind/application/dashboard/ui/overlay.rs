//! Modal, confirmation, alert and error panel

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::dashboard::App;
use crate::application::search::SuggestionState;

/// Rectangle of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn draw_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 12, frame.area());
    frame.render_widget(Clear, area);

    let modal = &app.modal;
    let save_style = if modal.can_save() {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Ticker: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}_", modal.input()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    match modal.suggestions() {
        SuggestionState::Hidden => {}
        SuggestionState::Validating => lines.push(Line::from(Span::styled(
            "Validating symbol...",
            Style::default().fg(Color::Blue),
        ))),
        SuggestionState::Matches(candidates) => {
            for (i, candidate) in candidates.iter().enumerate() {
                let style = if i == modal.highlighted() {
                    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<8}", candidate.symbol), style),
                    Span::styled(
                        format!(" {}", candidate.display_name()),
                        Style::default().fg(Color::Gray),
                    ),
                ]));
            }
        }
        SuggestionState::NoMatch => lines.push(Line::from(Span::styled(
            "No listed US symbol found",
            Style::default().fg(Color::Gray),
        ))),
        SuggestionState::Degraded(_) => lines.push(Line::from(Span::styled(
            "Search unavailable, you can still submit the ticker directly",
            Style::default().fg(Color::Red),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Enter=save ", save_style),
        Span::styled("  Tab=pick  Up/Down=move  Esc=cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Track Earnings ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

pub fn draw_confirm(frame: &mut Frame, ticker: &str) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::from(format!("Unsubscribe {}?", ticker)),
        Line::from(Span::styled("y=confirm  n=cancel", Style::default().fg(Color::DarkGray))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, area);
}

pub fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 6, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Alert ")
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}

pub fn draw_error_panel(frame: &mut Frame, app: &App, area: Rect) {
    let reason = app.store.error.as_deref().unwrap_or("Unknown error");
    let lines = vec![
        Line::from(Span::styled(
            "Unable to reach the market database",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(reason.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Check the documents configuration and restart the dashboard.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Connection Failed "));
    frame.render_widget(panel, area);
}
