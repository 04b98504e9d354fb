//! Main application state and logic for the terminal dashboard

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use docsync::DocumentSource;
use tokio::runtime::Handle;
use tracing::{error, info, warn};

use crate::application::commands::{CommandError, Confirmation, UnsubscribeOutcome, WriteCommands};
use crate::application::listener::{apply_event, ListenerLayer, ListenerOutcome};
use crate::application::modal::{SearchRequest, SubscriptionModal};
use crate::application::scheduler::epoch_seconds_now;
use crate::application::search::SearchDebouncer;
use crate::application::views::{HeroView, RenderOrchestrator, RenderedViews, ViewWindows};
use crate::domain::{DocumentKind, Store, Tab};
use crate::infrastructure::{
    open_document_source, DashboardConfig, JsonFileStore, KeyValueStore, SymbolSearch,
    YahooSearchClient, SELECTED_MACRO_KEY,
};

/// Wiring options independent of where the collaborators come from
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub collection: String,
    pub windows: ViewWindows,
    pub search_debounce: Duration,
    pub reconcile_on_load: bool,
}

impl AppOptions {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            collection: config.documents.collection.clone(),
            windows: ViewWindows::from_days(
                config.windows.hero_lookahead_days,
                config.windows.earnings_days,
                config.windows.calendar_days,
            ),
            search_debounce: config.search.debounce(),
            reconcile_on_load: config.reconcile_on_load,
        }
    }
}

/// Main application state
pub struct App {
    /// Latest document snapshots and UI state
    pub store: Store,
    /// View models and countdowns derived from the store
    pub renderer: RenderOrchestrator,
    /// Subscription modal
    pub modal: SubscriptionModal,
    /// Ticker awaiting unsubscribe confirmation
    pub pending_unsubscribe: Option<String>,
    /// Blocking message shown until dismissed
    pub alert: Option<String>,
    /// Selected row on the calendar tab
    pub calendar_index: usize,
    /// Status message to show in footer
    pub status_message: Option<String>,
    /// Whether to quit
    pub should_quit: bool,
    listener: Option<ListenerLayer>,
    commands: WriteCommands,
    search: SearchDebouncer,
    preferences: Arc<dyn KeyValueStore>,
    runtime: Handle,
    clock: fn() -> f64,
    reconcile_on_load: bool,
    reconciled: bool,
}

impl App {
    /// Build every collaborator from configuration
    pub async fn initialize(runtime: Handle, config: &DashboardConfig) -> Result<Self> {
        info!("[Dashboard] Opening document source...");
        let source = open_document_source(&config.documents);

        let search: Arc<dyn SymbolSearch> = Arc::new(YahooSearchClient::new(
            config.search.base_url.clone(),
            config.search.quotes_count,
            config.search.timeout(),
        )?);

        let preferences: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::open(&config.preferences_path));

        Ok(Self::from_parts(runtime, source, search, preferences, AppOptions::from_config(config)).await)
    }

    /// Attach listeners; a failure here puts the dashboard in the error state
    pub async fn from_parts(
        runtime: Handle,
        source: Arc<dyn DocumentSource>,
        search: Arc<dyn SymbolSearch>,
        preferences: Arc<dyn KeyValueStore>,
        options: AppOptions,
    ) -> Self {
        let mut store = Store::new().with_selected_macro_key(preferences.get(SELECTED_MACRO_KEY));

        let listener = match ListenerLayer::attach(source.as_ref(), &options.collection).await {
            Ok(listener) => Some(listener),
            Err(e) => {
                error!("[Dashboard] Failed to attach listeners: {}", e);
                store.enter_error_state(format!("Initialization failed: {}", e));
                None
            }
        };

        let mut app = Self {
            store,
            renderer: RenderOrchestrator::new(options.windows),
            modal: SubscriptionModal::new(),
            pending_unsubscribe: None,
            alert: None,
            calendar_index: 0,
            status_message: None,
            should_quit: false,
            listener,
            commands: WriteCommands::new(source, options.collection),
            search: SearchDebouncer::new(search, runtime.clone(), options.search_debounce),
            preferences,
            runtime,
            clock: epoch_seconds_now,
            reconcile_on_load: options.reconcile_on_load,
            reconciled: false,
        };
        app.render();
        app
    }

    /// Replace the wall clock
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self.render();
        self
    }

    pub fn now(&self) -> f64 {
        (self.clock)()
    }

    pub fn views(&self) -> &RenderedViews {
        self.renderer.views()
    }

    /// Full re-render of every view
    pub fn render(&mut self) {
        let now = self.now();
        self.renderer.render(&self.store, now);
        let rows = self.renderer.views().calendar.rows.len();
        self.calendar_index = self.calendar_index.min(rows.saturating_sub(1));
    }

    /// One loop turn: listener events, countdowns, search results
    pub fn on_tick(&mut self) {
        if self.drain_listeners() {
            self.render();
            self.maybe_reconcile();
        }

        let now = self.now();
        self.renderer.poll_countdowns(Instant::now(), now);

        if let Some(state) = self.search.poll() {
            self.modal.apply_suggestions(state);
        }
    }

    /// Apply every pending listener event; true when the store changed
    fn drain_listeners(&mut self) -> bool {
        let Some(listener) = &self.listener else {
            return false;
        };

        let mut changed = false;
        for (kind, event) in listener.drain() {
            match apply_event(&mut self.store, kind, event) {
                ListenerOutcome::Unchanged => {}
                ListenerOutcome::Updated(_) | ListenerOutcome::Fatal => changed = true,
            }
        }
        changed
    }

    fn maybe_reconcile(&mut self) {
        if !self.reconcile_on_load
            || self.reconciled
            || self.store.is_error()
            || !self.store.has_received(DocumentKind::Watchlist)
            || !self.store.has_received(DocumentKind::CustomCalendar)
        {
            return;
        }
        self.reconciled = true;

        match self.runtime.block_on(self.commands.reconcile_orphans()) {
            Ok(0) => {}
            Ok(dropped) => {
                self.status_message = Some(format!("Dropped {} stale calendar entries", dropped));
            }
            Err(e) => warn!("[Dashboard] Reconciliation failed: {}", e),
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.store.set_tab(tab);
        self.render();
    }

    pub fn next_tab(&mut self) {
        self.shift_tab(1);
    }

    pub fn prev_tab(&mut self) {
        self.shift_tab(Tab::NAVIGABLE.len() - 1);
    }

    fn shift_tab(&mut self, offset: usize) {
        if let Some(index) = Tab::NAVIGABLE.iter().position(|t| *t == self.store.active_tab) {
            let next = Tab::NAVIGABLE[(index + offset) % Tab::NAVIGABLE.len()];
            self.set_tab(next);
        }
    }

    pub fn cycle_news_filter(&mut self) {
        self.store.news_filter = self.store.news_filter.next();
        self.render();
    }

    /// Feature another macro event and persist the choice
    pub fn select_macro(&mut self, forward: bool) {
        let HeroView::Featured(card) = &self.views().hero else {
            return;
        };
        let len = card.options.len();
        if len == 0 {
            return;
        }
        let index = if forward {
            (card.selected + 1) % len
        } else {
            (card.selected + len - 1) % len
        };
        let key = card.options[index].key.clone();

        if let Err(e) = self.preferences.set(SELECTED_MACRO_KEY, &key) {
            warn!("[Dashboard] Failed to persist macro selection: {}", e);
        }
        self.store.selected_macro_key = Some(key);
        self.render();
    }

    pub fn next_calendar_row(&mut self) {
        let rows = self.views().calendar.rows.len();
        if rows > 0 {
            self.calendar_index = (self.calendar_index + 1) % rows;
        }
    }

    pub fn prev_calendar_row(&mut self) {
        let rows = self.views().calendar.rows.len();
        if rows > 0 {
            self.calendar_index = (self.calendar_index + rows - 1) % rows;
        }
    }

    pub fn open_modal(&mut self) {
        self.modal.open();
    }

    pub fn close_modal(&mut self) {
        self.search.cancel();
        self.modal.close();
    }

    fn dispatch_search(&mut self, request: SearchRequest) {
        match request {
            SearchRequest::Schedule(query) => {
                self.search.schedule(query);
            }
            SearchRequest::Cancel => self.search.cancel(),
        }
    }

    pub fn modal_input(&mut self, c: char) {
        let request = self.modal.push_char(c);
        self.dispatch_search(request);
    }

    pub fn modal_backspace(&mut self) {
        let request = self.modal.backspace();
        self.dispatch_search(request);
    }

    pub fn modal_select_highlighted(&mut self) {
        if self.modal.select_highlighted() {
            self.search.cancel();
        }
    }

    /// Send the modal's ticker to the watchlist
    pub fn submit_subscription(&mut self) {
        if !self.modal.can_save() {
            return;
        }
        let input = self.modal.input().to_string();

        match self.runtime.block_on(self.commands.subscribe(&self.store, &input)) {
            Ok(ticker) => {
                self.close_modal();
                self.status_message = Some(format!("Subscribed {}, waiting for sync", ticker));
            }
            Err(e) => self.alert = Some(alert_message("Submit failed", &e)),
        }
    }

    /// Ask for confirmation to unsubscribe the selected calendar row
    pub fn request_unsubscribe(&mut self) {
        let target = self
            .views()
            .calendar
            .rows
            .get(self.calendar_index)
            .and_then(|row| row.unsubscribe_target())
            .map(str::to_string);
        self.pending_unsubscribe = target;
    }

    pub fn resolve_unsubscribe(&mut self, confirmation: Confirmation) {
        let Some(ticker) = self.pending_unsubscribe.take() else {
            return;
        };

        let result = self
            .runtime
            .block_on(self.commands.unsubscribe(&self.store, &ticker, confirmation));
        match result {
            Ok(UnsubscribeOutcome::Declined) => {}
            Ok(UnsubscribeOutcome::Removed) => {
                self.status_message = Some(format!("Unsubscribed {}", ticker));
            }
            Err(e) => self.alert = Some(alert_message("Unsubscribe failed", &e)),
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Route a key press to the topmost surface
    pub fn handle_key(&mut self, code: KeyCode) {
        if self.alert.is_some() {
            self.dismiss_alert();
            return;
        }

        if self.pending_unsubscribe.is_some() {
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.resolve_unsubscribe(Confirmation::Accepted),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.resolve_unsubscribe(Confirmation::Declined)
                }
                _ => {}
            }
            return;
        }

        if self.modal.is_open() {
            match code {
                KeyCode::Esc => self.close_modal(),
                KeyCode::Enter => self.submit_subscription(),
                KeyCode::Tab => self.modal_select_highlighted(),
                KeyCode::Down => self.modal.highlight_next(),
                KeyCode::Up => self.modal.highlight_prev(),
                KeyCode::Backspace => self.modal_backspace(),
                KeyCode::Char(c) => self.modal_input(c),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.next_tab(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.prev_tab(),
            KeyCode::Char('1') => self.set_tab(Tab::Dashboard),
            KeyCode::Char('2') => self.set_tab(Tab::Calendar),
            KeyCode::Char('3') => self.set_tab(Tab::News),
            KeyCode::Char('a') if !self.store.is_error() => self.open_modal(),
            KeyCode::Char('f') => self.cycle_news_filter(),
            KeyCode::Char(']') => self.select_macro(true),
            KeyCode::Char('[') => self.select_macro(false),
            KeyCode::Char('j') | KeyCode::Down => self.next_calendar_row(),
            KeyCode::Char('k') | KeyCode::Up => self.prev_calendar_row(),
            KeyCode::Char('x') | KeyCode::Delete if self.store.active_tab == Tab::Calendar => {
                self.request_unsubscribe()
            }
            _ => {}
        }
    }

    /// Close subscriptions and pending lookups
    pub fn shutdown(&mut self) {
        info!("[Dashboard] Shutting down...");
        self.search.cancel();
        if let Some(listener) = self.listener.as_mut() {
            listener.close();
        }
    }
}

fn alert_message(action: &str, error: &CommandError) -> String {
    match error {
        CommandError::NotConnected | CommandError::EmptyTicker => error.to_string(),
        _ => format!("{}: {}", action, error),
    }
}
