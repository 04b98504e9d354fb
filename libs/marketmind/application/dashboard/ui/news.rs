//! News cards and the intelligence tab

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::application::dashboard::App;
use crate::application::views::news::INTELLIGENCE_EMPTY;
use crate::application::views::NewsCard;
use crate::domain::{Impact, ScoreTier};

pub fn impact_style(impact: Impact) -> Style {
    match impact {
        Impact::Bullish => Style::default().fg(Color::Green),
        Impact::Bearish => Style::default().fg(Color::Red),
        Impact::Neutral => Style::default().fg(Color::Gray),
    }
}

pub fn score_style(tier: ScoreTier) -> Style {
    match tier {
        ScoreTier::Critical => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        ScoreTier::Elevated => Style::default().fg(Color::Black).bg(Color::Yellow),
        ScoreTier::Normal => Style::default().fg(Color::Gray),
    }
}

/// Three-line card: score and title, impact and reason, link
pub fn card_item(card: &NewsCard) -> ListItem<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", card.score_label()), score_style(card.tier)),
            Span::raw(" "),
            Span::styled(card.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(format!("  [{}] ", card.impact), impact_style(card.classification)),
            Span::styled(card.reason.clone(), Style::default().fg(Color::DarkGray)),
        ]),
    ];
    if let Some(link) = &card.link {
        lines.push(Line::from(Span::styled(
            format!("  {}", link),
            Style::default().fg(Color::Blue),
        )));
    }
    ListItem::new(lines)
}

pub fn draw_cards(frame: &mut Frame, cards: &[NewsCard], empty: &str, title: String, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(title);

    if cards.is_empty() {
        let empty = Paragraph::new(format!(" {}", empty))
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = cards.iter().map(card_item).collect();
    frame.render_widget(List::new(items).block(block), area);
}

pub fn draw_intelligence(frame: &mut Frame, app: &App, area: Rect) {
    let cards = &app.views().intelligence;
    let title = format!(
        " Intelligence [{}] ({}) ",
        app.store.news_filter.label(),
        cards.len()
    );
    draw_cards(frame, cards, INTELLIGENCE_EMPTY, title, area);
}
