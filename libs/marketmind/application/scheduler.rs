//! Countdown Scheduler
//!
//! Owns every recurring one-second countdown of the dashboard. Renderers
//! declare `{id, expires_at}` entries; the UI loop polls the scheduler and
//! applies the emitted ticks. Re-declaring replaces the previous set, so a
//! render can never leave stale timers behind.

use std::time::{Duration, Instant};

use chrono::Utc;

use super::views::countdown::{format_clock, format_earnings, RELEASING_NOW, SECONDS_PER_DAY, WARNING_THRESHOLD_SECS};

/// Wall clock as fractional epoch seconds
pub fn epoch_seconds_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    Hero,
    /// Position in the earnings slider
    Earnings(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownFormat {
    /// `T-HH:MM:SS`
    Clock,
    /// `N days, HH hours` falling back to the clock
    Earnings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub id: TimerId,
    pub expires_at: f64,
    pub format: CountdownFormat,
}

impl Countdown {
    pub fn hero(expires_at: f64) -> Self {
        Self {
            id: TimerId::Hero,
            expires_at,
            format: CountdownFormat::Clock,
        }
    }

    pub fn earnings(index: usize, expires_at: f64) -> Self {
        Self {
            id: TimerId::Earnings(index),
            expires_at,
            format: CountdownFormat::Earnings,
        }
    }

    pub fn state_at(&self, now: f64) -> CountdownState {
        let remaining = self.expires_at - now;
        if remaining <= 0.0 {
            return CountdownState::Live;
        }

        match self.format {
            CountdownFormat::Clock => CountdownState::Running {
                label: format_clock(remaining),
                urgent: remaining < WARNING_THRESHOLD_SECS,
            },
            CountdownFormat::Earnings => CountdownState::Running {
                label: format_earnings(remaining),
                urgent: remaining < SECONDS_PER_DAY,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CountdownState {
    Running { label: String, urgent: bool },
    /// Reached zero; the timer has stopped
    Live,
}

impl CountdownState {
    pub fn label(&self) -> &str {
        match self {
            CountdownState::Running { label, .. } => label,
            CountdownState::Live => RELEASING_NOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub id: TimerId,
    pub state: CountdownState,
}

pub struct CountdownScheduler {
    hero: Option<Countdown>,
    slider: Vec<Countdown>,
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Default for CountdownScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownScheduler {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            hero: None,
            slider: Vec::new(),
            interval,
            last_tick: None,
        }
    }

    /// Replace the hero countdown; there is never more than one
    pub fn set_hero(&mut self, countdown: Option<Countdown>) {
        self.hero = countdown;
    }

    /// Clear every slider countdown and register the new set
    pub fn replace_slider(&mut self, countdowns: Vec<Countdown>) {
        self.slider = countdowns;
    }

    pub fn hero(&self) -> Option<&Countdown> {
        self.hero.as_ref()
    }

    pub fn slider_len(&self) -> usize {
        self.slider.len()
    }

    pub fn active_count(&self) -> usize {
        self.slider.len() + usize::from(self.hero.is_some())
    }

    /// Emit one tick per live countdown; expired ones go live and stop
    pub fn tick(&mut self, now: f64) -> Vec<Tick> {
        let mut ticks = Vec::with_capacity(self.active_count());

        if let Some(hero) = self.hero {
            let state = hero.state_at(now);
            if state == CountdownState::Live {
                self.hero = None;
            }
            ticks.push(Tick { id: hero.id, state });
        }

        self.slider.retain(|countdown| {
            let state = countdown.state_at(now);
            let running = state != CountdownState::Live;
            ticks.push(Tick {
                id: countdown.id,
                state,
            });
            running
        });

        ticks
    }

    /// Tick when at least one interval has passed since the last tick
    pub fn poll(&mut self, at: Instant, now: f64) -> Vec<Tick> {
        let due = self
            .last_tick
            .map_or(true, |last| at.saturating_duration_since(last) >= self.interval);
        if !due {
            return Vec::new();
        }
        self.last_tick = Some(at);
        self.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    #[test]
    fn test_replace_slider_leaves_one_per_item() {
        let mut scheduler = CountdownScheduler::new();
        scheduler.replace_slider(vec![Countdown::earnings(0, NOW + 10.0), Countdown::earnings(1, NOW + 20.0)]);
        scheduler.replace_slider(vec![Countdown::earnings(0, NOW + 30.0)]);
        scheduler.set_hero(Some(Countdown::hero(NOW + 5.0)));
        scheduler.set_hero(Some(Countdown::hero(NOW + 6.0)));

        assert_eq!(scheduler.slider_len(), 1);
        assert_eq!(scheduler.active_count(), 2);
        assert_eq!(scheduler.hero().map(|c| c.expires_at), Some(NOW + 6.0));
    }

    #[test]
    fn test_tick_labels_and_urgency() {
        let mut scheduler = CountdownScheduler::new();
        scheduler.set_hero(Some(Countdown::hero(NOW + 3_723.0)));
        scheduler.replace_slider(vec![Countdown::earnings(0, NOW + 2.0 * 86_400.0 + 3_600.0)]);

        let ticks = scheduler.tick(NOW);
        assert_eq!(
            ticks,
            vec![
                Tick {
                    id: TimerId::Hero,
                    state: CountdownState::Running {
                        label: "T-01:02:03".to_string(),
                        urgent: false
                    }
                },
                Tick {
                    id: TimerId::Earnings(0),
                    state: CountdownState::Running {
                        label: "2 days, 01 hours".to_string(),
                        urgent: false
                    }
                },
            ]
        );

        let ticks = scheduler.tick(NOW + 3_723.0 - 60.0);
        assert!(matches!(ticks[0].state, CountdownState::Running { urgent: true, .. }));
    }

    #[test]
    fn test_expired_timers_go_live_once() {
        let mut scheduler = CountdownScheduler::new();
        scheduler.set_hero(Some(Countdown::hero(NOW + 1.0)));
        scheduler.replace_slider(vec![Countdown::earnings(0, NOW + 1.0), Countdown::earnings(1, NOW + 100.0)]);

        let ticks = scheduler.tick(NOW + 1.0);
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].state, CountdownState::Live);
        assert_eq!(ticks[0].state.label(), RELEASING_NOW);
        assert_eq!(scheduler.active_count(), 1);

        let ticks = scheduler.tick(NOW + 2.0);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].id, TimerId::Earnings(1));
    }

    #[test]
    fn test_poll_respects_interval() {
        let mut scheduler = CountdownScheduler::new();
        scheduler.set_hero(Some(Countdown::hero(NOW + 100.0)));
        let start = Instant::now();

        assert_eq!(scheduler.poll(start, NOW).len(), 1);
        assert!(scheduler.poll(start + Duration::from_millis(500), NOW).is_empty());
        assert_eq!(scheduler.poll(start + Duration::from_secs(1), NOW + 1.0).len(), 1);
    }
}
