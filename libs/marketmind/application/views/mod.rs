//! View renderers
//!
//! Each renderer is a pure function of the store and the current time and
//! produces a view model. `RenderOrchestrator` fans out to all of them on
//! every store change and hands the declared countdowns to the scheduler.

pub mod calendar;
pub mod countdown;
pub mod earnings;
pub mod hero;
pub mod news;
pub mod sentiment;

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::application::scheduler::{CountdownScheduler, CountdownState, Tick, TimerId};
use crate::domain::Store;

pub use calendar::{CalendarRow, CalendarView};
pub use earnings::{EarningsItem, EarningsSlider};
pub use hero::{HeroCard, HeroStatus, HeroView, MacroOption};
pub use news::NewsCard;
pub use sentiment::SentimentChart;

use countdown::SECONDS_PER_DAY;

/// Time windows used by the renderers, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindows {
    /// Featured event further out than this yields to the previous one
    pub hero_lookahead: f64,
    pub earnings_horizon: f64,
    pub calendar_horizon: f64,
}

impl ViewWindows {
    pub fn from_days(hero_lookahead: f64, earnings_horizon: f64, calendar_horizon: f64) -> Self {
        Self {
            hero_lookahead: hero_lookahead * SECONDS_PER_DAY,
            earnings_horizon: earnings_horizon * SECONDS_PER_DAY,
            calendar_horizon: calendar_horizon * SECONDS_PER_DAY,
        }
    }
}

impl Default for ViewWindows {
    fn default() -> Self {
        Self::from_days(3.0, 7.0, 30.0)
    }
}

/// Output of the latest full render
#[derive(Debug, Clone, Default)]
pub struct RenderedViews {
    pub hero: HeroView,
    pub earnings: EarningsSlider,
    pub dashboard_news: Vec<NewsCard>,
    pub intelligence: Vec<NewsCard>,
    pub calendar: CalendarView,
}

pub struct RenderOrchestrator {
    windows: ViewWindows,
    scheduler: CountdownScheduler,
    chart: Option<SentimentChart>,
    views: RenderedViews,
    countdowns: HashMap<TimerId, CountdownState>,
    render_count: u64,
}

impl RenderOrchestrator {
    pub fn new(windows: ViewWindows) -> Self {
        Self::with_scheduler(windows, CountdownScheduler::new())
    }

    pub fn with_scheduler(windows: ViewWindows, scheduler: CountdownScheduler) -> Self {
        Self {
            windows,
            scheduler,
            chart: None,
            views: RenderedViews::default(),
            countdowns: HashMap::new(),
            render_count: 0,
        }
    }

    /// Re-render every view unconditionally
    pub fn render(&mut self, store: &Store, now: f64) -> &RenderedViews {
        let (hero, hero_countdown) = hero::render_hero(
            &store.macro_events,
            store.selected_macro_key.as_deref(),
            now,
            self.windows.hero_lookahead,
        );
        self.scheduler.set_hero(hero_countdown);

        let (earnings, slider_countdowns) =
            earnings::render_earnings(&store.custom_events, now, self.windows.earnings_horizon);
        self.scheduler.replace_slider(slider_countdowns);

        let dashboard_news = news::dashboard_news(&store.news_articles, news::DASHBOARD_NEWS_LIMIT);
        let intelligence = news::intelligence(&store.news_articles, store.news_filter);
        let calendar = calendar::render_calendar(store, now, self.windows.calendar_horizon);

        match self.chart.as_mut() {
            Some(chart) => chart.update(&store.news_articles),
            None => self.chart = Some(SentimentChart::new(&store.news_articles)),
        }

        self.views = RenderedViews {
            hero,
            earnings,
            dashboard_news,
            intelligence,
            calendar,
        };

        // Fresh labels for the new countdown set
        self.countdowns.clear();
        let ticks = self.scheduler.tick(now);
        self.apply_ticks(&ticks);

        self.render_count += 1;
        debug!(
            "[Render] #{} with {} live countdowns",
            self.render_count,
            self.scheduler.active_count()
        );

        &self.views
    }

    /// Advance countdowns if a tick is due
    pub fn poll_countdowns(&mut self, at: Instant, now: f64) -> Vec<Tick> {
        let ticks = self.scheduler.poll(at, now);
        self.apply_ticks(&ticks);
        ticks
    }

    fn apply_ticks(&mut self, ticks: &[Tick]) {
        for tick in ticks {
            self.countdowns.insert(tick.id, tick.state.clone());
        }
    }

    pub fn views(&self) -> &RenderedViews {
        &self.views
    }

    pub fn chart(&self) -> Option<&SentimentChart> {
        self.chart.as_ref()
    }

    pub fn scheduler(&self) -> &CountdownScheduler {
        &self.scheduler
    }

    /// Latest state of a countdown, kept after it goes live
    pub fn countdown(&self, id: TimerId) -> Option<&CountdownState> {
        self.countdowns.get(&id)
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn windows(&self) -> ViewWindows {
        self.windows
    }
}
