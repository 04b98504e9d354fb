//! MarketMind Watch - Headless dashboard feed
//!
//! Follows the same document subscriptions as the terminal dashboard and
//! logs every re-render, release and earnings countdown as it fires.
//!
//! Usage:
//!   MARKETMIND_CONFIG_PATH=config/dashboard.yaml ./marketmind_watch
//!   ./marketmind_watch config/dashboard.yaml

use std::time::Instant;

use anyhow::Result;
use marketmind::application::views::{HeroView, RenderOrchestrator, ViewWindows};
use marketmind::application::{
    apply_event, epoch_seconds_now, CountdownState, ListenerLayer, ListenerOutcome, WriteCommands,
};
use marketmind::domain::{DocumentKind, Store};
use marketmind::infrastructure::{
    init_tracing_with_level, open_document_source, DashboardConfig, ShutdownManager,
};
use marketmind_dashboard::bin_common::{load_config_from_env, parse_args, BinaryRunner, ConfigType, RunConfig};
use tracing::{info, warn};

struct Watcher {
    run_config: RunConfig,
    shutdown: ShutdownManager,
    listener: ListenerLayer,
    commands: WriteCommands,
    store: Store,
    renderer: RenderOrchestrator,
    reconcile_on_load: bool,
    reconciled: bool,
    updates: u64,
}

impl Watcher {
    async fn new(config: &DashboardConfig, shutdown: ShutdownManager) -> Result<Self> {
        let source = open_document_source(&config.documents);
        let listener = ListenerLayer::attach(source.as_ref(), &config.documents.collection).await?;
        let windows = ViewWindows::from_days(
            config.windows.hero_lookahead_days,
            config.windows.earnings_days,
            config.windows.calendar_days,
        );

        Ok(Self {
            run_config: RunConfig::new("MarketMind Watch")
                .with_heartbeat(60)
                .with_loop_interval(0.25),
            shutdown,
            listener,
            commands: WriteCommands::new(source, config.documents.collection.clone()),
            store: Store::new(),
            renderer: RenderOrchestrator::new(windows),
            reconcile_on_load: config.reconcile_on_load,
            reconciled: false,
            updates: 0,
        })
    }

    /// Apply pending events; Err once the store is gone
    fn drain(&mut self) -> Result<bool> {
        let mut changed = false;
        for (kind, event) in self.listener.drain() {
            match apply_event(&mut self.store, kind, event) {
                ListenerOutcome::Unchanged => {}
                ListenerOutcome::Updated(_) => changed = true,
                ListenerOutcome::Fatal => {
                    anyhow::bail!(self.store.error.clone().unwrap_or_default());
                }
            }
        }
        Ok(changed)
    }

    async fn maybe_reconcile(&mut self) {
        if !self.reconcile_on_load
            || self.reconciled
            || !self.store.has_received(DocumentKind::Watchlist)
            || !self.store.has_received(DocumentKind::CustomCalendar)
        {
            return;
        }
        self.reconciled = true;
        if let Err(e) = self.commands.reconcile_orphans().await {
            warn!("[Watch] Reconciliation failed: {}", e);
        }
    }

    fn log_views(&mut self) {
        let views = self.renderer.render(&self.store, epoch_seconds_now());

        match &views.hero {
            HeroView::Featured(card) => info!(
                "[Watch] Featured: {} ({}) prev {} / fcst {} / act {}",
                card.title,
                card.released_label().unwrap_or("upcoming"),
                card.previous,
                card.forecast,
                card.actual
            ),
            HeroView::Placeholder => info!("[Watch] No macro events"),
        }
        for item in &views.earnings.items {
            info!("[Watch] Earnings {} on {}", item.ticker, item.day_label);
        }
        for card in views.dashboard_news.iter().take(3) {
            info!("[Watch] News {} {}: {}", card.score_label(), card.impact, card.title);
        }
        info!(
            "[Watch] Calendar: {} scheduled, {} pending",
            views.calendar.ready_count(),
            views.calendar.pending_count()
        );
        if let Some(chart) = self.renderer.chart() {
            let totals = chart.totals();
            info!("[Watch] Sentiment: bull {:.1} / bear {:.1}", totals.bull, totals.bear);
        }
    }
}

impl BinaryRunner for Watcher {
    async fn run(&mut self) -> Result<()> {
        let interval = self.run_config.loop_interval();
        let heartbeat = self.run_config.heartbeat();
        let mut last_heartbeat = Instant::now();

        while self.shutdown.is_running() {
            if self.drain()? {
                self.updates += 1;
                self.log_views();
                self.maybe_reconcile().await;
            }

            for tick in self.renderer.poll_countdowns(Instant::now(), epoch_seconds_now()) {
                if tick.state == CountdownState::Live {
                    info!("[Watch] {:?} is live", tick.id);
                }
            }

            if last_heartbeat.elapsed() >= heartbeat {
                info!(
                    "[Watch] Heartbeat: {} ({} updates, {} countdowns)",
                    self.store.connection.label(),
                    self.updates,
                    self.renderer.scheduler().active_count()
                );
                last_heartbeat = Instant::now();
            }

            self.shutdown.interruptible_sleep(interval).await;
        }

        self.listener.close();
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }

    fn stats(&self) -> Option<String> {
        Some(format!("Processed {} store updates", self.updates))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config_path = load_config_from_env(ConfigType::from_args(&parse_args()));
    let config = DashboardConfig::load(&config_path)?;

    init_tracing_with_level(&config.log_level);
    config.log();

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    let mut watcher = Watcher::new(&config, shutdown).await?;
    watcher.execute().await
}
