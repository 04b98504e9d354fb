//! UI widgets for the dashboard

pub mod calendar;
pub mod dashboard;
pub mod news;
pub mod overlay;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::App;
use crate::domain::{ConnectionStatus, Tab};

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + tabs
            Constraint::Min(0),    // Active view
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);

    if app.modal.is_open() {
        overlay::draw_modal(frame, app);
    }
    if let Some(ticker) = &app.pending_unsubscribe {
        overlay::draw_confirm(frame, ticker);
    }
    if let Some(message) = &app.alert {
        overlay::draw_alert(frame, message);
    }
}

fn connection_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Synced => Color::Green,
        ConnectionStatus::Failed => Color::Red,
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(34)])
        .split(area);

    let titles: Vec<Line> = Tab::NAVIGABLE
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();
    let selected = Tab::NAVIGABLE
        .iter()
        .position(|t| *t == app.store.active_tab);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" MarketMind "))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let status = app.store.connection;
    let status_line = Line::from(vec![
        Span::styled("● ", Style::default().fg(connection_color(status))),
        Span::raw(status.label()),
        Span::styled(
            format!("  updated {}", app.store.last_updated_clock().unwrap_or("--:--")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let status = Paragraph::new(status_line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[1]);
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    match app.store.active_tab {
        Tab::Dashboard => dashboard::draw(frame, app, area),
        Tab::Calendar => calendar::draw(frame, app, area),
        Tab::News => news::draw_intelligence(frame, app, area),
        Tab::Error => overlay::draw_error_panel(frame, app, area),
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.store.active_tab {
        Tab::Dashboard => "q=quit tab=next view [ ]=featured event a=subscribe",
        Tab::Calendar => "q=quit tab=next view j/k=select x=unsubscribe a=subscribe",
        Tab::News => "q=quit tab=next view f=filter a=subscribe",
        Tab::Error => "q=quit",
    };

    let footer_text = match app.status_message.as_deref() {
        Some(status) if !status.is_empty() => format!(" {} | {}", status, hints),
        _ => format!(" {}", hints),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
