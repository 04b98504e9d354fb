//! Calendar tab

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::application::dashboard::App;
use crate::application::views::calendar::CALENDAR_EMPTY;
use crate::application::views::CalendarRow;

fn row_item(row: &CalendarRow) -> ListItem<'static> {
    let line = match row {
        CalendarRow::Pending { ticker } => Line::from(vec![
            Span::styled(" ⏳ --    ", Style::default().fg(Color::DarkGray)),
            Span::styled(ticker.clone(), Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
            Span::styled(" SYNCING", Style::default().fg(Color::Blue)),
            Span::styled(
                "  waiting for the release date",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        CalendarRow::Macro {
            day_label,
            time_label,
            title,
            previous,
            forecast,
            ..
        } => Line::from(vec![
            Span::styled(format!(" {} {:<5} ", day_label, time_label), Style::default().fg(Color::DarkGray)),
            Span::styled(title.clone(), Style::default().fg(Color::White)),
            Span::styled(format!("  prev {}", previous), Style::default().fg(Color::Gray)),
            Span::styled(format!("  fcst {}", forecast), Style::default().fg(Color::Blue)),
        ]),
        CalendarRow::Custom {
            day_label,
            time_label,
            title,
            financials_url,
            ..
        } => Line::from(vec![
            Span::styled(format!(" {} {:<5} ", day_label, time_label), Style::default().fg(Color::DarkGray)),
            Span::styled(title.clone(), Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)),
            Span::styled(" READY", Style::default().fg(Color::Green)),
            Span::styled(format!("  {}", financials_url), Style::default().fg(Color::Blue)),
        ]),
    };
    ListItem::new(line)
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let calendar = &app.views().calendar;
    let title = format!(
        " Calendar ({} pending, {} ready) ",
        calendar.pending_count(),
        calendar.ready_count()
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if calendar.is_empty() {
        let empty = Paragraph::new(format!(" {}", CALENDAR_EMPTY))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = calendar.rows.iter().map(row_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.calendar_index));
    frame.render_stateful_widget(list, area, &mut state);
}
