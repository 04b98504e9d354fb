//! Dashboard tab: featured event, earnings slider, top news, sentiment

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::news;
use crate::application::dashboard::App;
use crate::application::scheduler::{CountdownState, TimerId};
use crate::application::views::hero::EMPTY_PLACEHOLDER;
use crate::application::views::news::DASHBOARD_EMPTY;
use crate::application::views::{HeroCard, HeroView};

const SLIDER_HEIGHT: u16 = 6;
const EARNINGS_CARD_WIDTH: u16 = 26;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let views = app.views();
    let slider_height = if views.earnings.is_hidden() { 0 } else { SLIDER_HEIGHT };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),             // Hero
            Constraint::Length(slider_height), // Earnings slider
            Constraint::Min(0),                // News + sentiment
        ])
        .split(area);

    draw_hero(frame, app, rows[0]);
    if slider_height > 0 {
        draw_earnings(frame, app, rows[1]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(rows[2]);

    news::draw_cards(
        frame,
        &views.dashboard_news,
        DASHBOARD_EMPTY,
        " Top Intelligence ".to_string(),
        bottom[0],
    );
    draw_sentiment(frame, app, bottom[1]);
}

fn countdown_span(state: Option<&CountdownState>, warn_when_urgent: bool) -> Span<'static> {
    match state {
        Some(CountdownState::Running { label, urgent }) => {
            let color = if *urgent && warn_when_urgent {
                Color::Red
            } else if *urgent {
                Color::Yellow
            } else {
                Color::Cyan
            };
            Span::styled(label.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        Some(live @ CountdownState::Live) => Span::styled(
            live.label().to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        ),
        None => Span::raw(""),
    }
}

fn draw_hero(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Featured Release ");

    let card: &HeroCard = match &app.views().hero {
        HeroView::Featured(card) => card,
        HeroView::Placeholder => {
            let empty = Paragraph::new(format!(" {}", EMPTY_PLACEHOLDER))
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }
    };

    let timer = match card.released_label() {
        Some(released) => Span::styled(released, Style::default().fg(Color::DarkGray)),
        None => countdown_span(app.renderer.countdown(TimerId::Hero), true),
    };

    let selector = card
        .options
        .get(card.selected)
        .map(|o| o.label.as_str())
        .unwrap_or_default();

    let lines = vec![
        Line::from(vec![
            Span::styled(card.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            timer,
        ]),
        Line::from(Span::styled(
            format!("[{}/{}] {}", card.selected + 1, card.options.len(), selector),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled("Prev ", Style::default().fg(Color::DarkGray)),
            Span::raw(card.previous.clone()),
            Span::styled("   Fcst ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.forecast.clone(), Style::default().fg(Color::Blue)),
            Span::styled("   Actual ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.actual.clone(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Analysis: ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw(card.analysis.clone()),
        ]),
    ];

    let hero = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(hero, area);
}

fn draw_earnings(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Upcoming Earnings ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = &app.views().earnings.items;
    let visible = (inner.width / EARNINGS_CARD_WIDTH).max(1) as usize;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(EARNINGS_CARD_WIDTH); visible.min(items.len())])
        .split(inner);

    for (item, column) in items.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", item.ticker),
                    Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", item.day_label), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(item.title.clone()),
            Line::from(countdown_span(app.renderer.countdown(item.timer), false)),
        ];
        frame.render_widget(Paragraph::new(lines), *column);
    }
}

fn draw_sentiment(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Sentiment ");
    let Some(chart) = app.renderer.chart() else {
        frame.render_widget(block, area);
        return;
    };

    let colors = [Color::Green, Color::Red];
    let bars: Vec<Bar> = chart
        .bars()
        .iter()
        .zip(colors)
        .map(|((label, value), color)| {
            Bar::default()
                // Scaled by ten to keep one decimal of resolution
                .value((value * 10.0).round().max(0.0) as u64)
                .text_value(format!("{:.1}", value))
                .label(Line::from(*label))
                .style(Style::default().fg(color))
        })
        .collect();

    let barchart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(barchart, area);
}
