//! Dashboard application tests
//!
//! `App` drives async work through `block_on`, so these tests own a runtime
//! instead of running inside one.

mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::fixtures::*;
use common::{fixed_now, path, seeded_source, StaticSearch, DAY, NOW};
use crossterm::event::KeyCode;
use docsync::{DocSyncError, MemoryDocumentSource};
use marketmind::application::dashboard::{App, AppOptions};
use marketmind::application::views::{CalendarRow, HeroView, ViewWindows};
use marketmind::application::SuggestionState;
use marketmind::domain::{ConnectionStatus, DocumentKind, Tab, DEFAULT_COLLECTION};
use marketmind::infrastructure::{KeyValueStore, MemoryStore, SymbolSearch, SELECTED_MACRO_KEY};
use tokio::runtime::Runtime;

fn options() -> AppOptions {
    AppOptions {
        collection: DEFAULT_COLLECTION.to_string(),
        windows: ViewWindows::default(),
        search_debounce: Duration::from_millis(20),
        reconcile_on_load: false,
    }
}

// App drops before the runtime it spawns search tasks on
struct Harness {
    app: App,
    source: MemoryDocumentSource,
    preferences: Arc<MemoryStore>,
    _runtime: Runtime,
}

fn harness_with(source: MemoryDocumentSource, search: StaticSearch, options: AppOptions) -> Harness {
    let runtime = Runtime::new().unwrap();
    let preferences = Arc::new(MemoryStore::new());
    let search: Arc<dyn SymbolSearch> = Arc::new(search);
    let app = runtime
        .block_on(App::from_parts(
            runtime.handle().clone(),
            Arc::new(source.clone()),
            search,
            preferences.clone(),
            options,
        ))
        .with_clock(fixed_now);

    let mut harness = Harness {
        app,
        source,
        preferences,
        _runtime: runtime,
    };
    harness.app.on_tick();
    harness
}

fn harness(source: MemoryDocumentSource) -> Harness {
    harness_with(source, StaticSearch::default(), options())
}

/// Tick until `done` holds or the deadline passes
fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        app.on_tick();
        if done(app) {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(KeyCode::Char(c));
    }
}

#[test]
fn test_first_tick_syncs_and_renders() {
    let h = harness(seeded_source(
        vec![macro_event(NOW + 3_600.0, "CPI")],
        vec![article("Fed holds", 8.0, "利多")],
        vec![custom_event("NVDA", NOW + DAY)],
        &["NVDA"],
    ));

    assert_eq!(h.app.store.connection, ConnectionStatus::Synced);
    assert!(matches!(h.app.views().hero, HeroView::Featured(ref card) if card.title == "CPI"));
    assert_eq!(h.app.views().dashboard_news.len(), 1);
    assert_eq!(h.app.views().earnings.items[0].ticker, "NVDA");
    assert!(h.app.renderer.render_count() >= 2);
}

#[test]
fn test_tab_navigation_wraps() {
    let mut h = harness(seeded_source(vec![], vec![], vec![], &[]));
    assert_eq!(h.app.store.active_tab, Tab::Dashboard);

    h.app.handle_key(KeyCode::Tab);
    assert_eq!(h.app.store.active_tab, Tab::Calendar);
    h.app.handle_key(KeyCode::Char('3'));
    assert_eq!(h.app.store.active_tab, Tab::News);
    h.app.handle_key(KeyCode::Tab);
    assert_eq!(h.app.store.active_tab, Tab::Dashboard);
    h.app.handle_key(KeyCode::BackTab);
    assert_eq!(h.app.store.active_tab, Tab::News);
}

#[test]
fn test_news_filter_cycles_intelligence_feed() {
    let mut h = harness(seeded_source(
        vec![],
        vec![article("up", 9.0, "多"), article("down", 4.0, "空"), article("flat", 5.0, "中性")],
        vec![],
        &[],
    ));
    assert_eq!(h.app.views().intelligence.len(), 3);

    h.app.handle_key(KeyCode::Char('f'));
    assert_eq!(h.app.views().intelligence.len(), 1);
    assert_eq!(h.app.views().intelligence[0].title, "up");

    h.app.handle_key(KeyCode::Char('f'));
    assert_eq!(h.app.views().intelligence[0].title, "down");
}

#[test]
fn test_macro_selection_is_persisted() {
    let mut h = harness(seeded_source(
        vec![macro_event(NOW + 3_600.0, "CPI"), macro_event(NOW + 2.0 * DAY, "NFP")],
        vec![],
        vec![],
        &[],
    ));

    h.app.handle_key(KeyCode::Char(']'));

    let HeroView::Featured(card) = &h.app.views().hero else {
        panic!("expected a featured event");
    };
    assert_eq!(card.title, "NFP");
    assert_eq!(h.preferences.get(SELECTED_MACRO_KEY), Some(card.key.clone()));
}

#[test]
fn test_submit_subscription_writes_watchlist() {
    let mut h = harness(seeded_source(vec![], vec![], vec![], &[]));

    h.app.handle_key(KeyCode::Char('a'));
    assert!(h.app.modal.is_open());
    type_text(&mut h.app, "msft");
    h.app.handle_key(KeyCode::Enter);

    assert!(!h.app.modal.is_open());
    assert!(h.app.alert.is_none());
    let watchlist = h.source.document(&path(DocumentKind::Watchlist)).unwrap();
    assert_eq!(watchlist["tickers"], serde_json::json!(["MSFT"]));

    // The write comes back through the listener as a pending row
    assert!(tick_until(&mut h.app, |app| app.views().calendar.pending_count() == 1));
}

#[test]
fn test_search_suggestions_fill_the_input() {
    let search = StaticSearch::with_symbols(&[("NVDA", "NVIDIA Corp", "EQUITY"), ("NVDL", "Leveraged", "ETF")]);
    let mut h = harness_with(seeded_source(vec![], vec![], vec![], &[]), search, options());

    h.app.handle_key(KeyCode::Char('a'));
    type_text(&mut h.app, "nv");
    assert_eq!(h.app.modal.suggestions(), &SuggestionState::Validating);

    assert!(tick_until(&mut h.app, |app| matches!(
        app.modal.suggestions(),
        SuggestionState::Matches(m) if m.len() == 2
    )));

    h.app.handle_key(KeyCode::Down);
    h.app.handle_key(KeyCode::Tab);
    assert_eq!(h.app.modal.input(), "NVDL");
    assert_eq!(h.app.modal.suggestions(), &SuggestionState::Hidden);
}

#[test]
fn test_offline_search_still_allows_save() {
    let mut h = harness_with(seeded_source(vec![], vec![], vec![], &[]), StaticSearch::offline(), options());

    h.app.handle_key(KeyCode::Char('a'));
    type_text(&mut h.app, "zzz");
    assert!(tick_until(&mut h.app, |app| matches!(
        app.modal.suggestions(),
        SuggestionState::Degraded(_)
    )));
    assert!(h.app.modal.can_save());

    h.app.handle_key(KeyCode::Enter);
    let watchlist = h.source.document(&path(DocumentKind::Watchlist)).unwrap();
    assert_eq!(watchlist["tickers"], serde_json::json!(["ZZZ"]));
}

#[test]
fn test_unsubscribe_requires_confirmation() {
    let mut h = harness(seeded_source(vec![], vec![], vec![custom_event("AAPL", NOW + DAY)], &["AAPL"]));
    h.app.handle_key(KeyCode::Char('2'));
    assert!(matches!(h.app.views().calendar.rows[0], CalendarRow::Custom { ref ticker, .. } if ticker == "AAPL"));

    h.app.handle_key(KeyCode::Char('x'));
    assert_eq!(h.app.pending_unsubscribe.as_deref(), Some("AAPL"));
    h.app.handle_key(KeyCode::Char('n'));
    assert!(h.app.pending_unsubscribe.is_none());
    assert_eq!(h.source.write_count(), 0);

    h.app.handle_key(KeyCode::Char('x'));
    h.app.handle_key(KeyCode::Char('y'));
    assert_eq!(h.source.write_count(), 2);
    assert!(tick_until(&mut h.app, |app| app.views().calendar.is_empty()));
}

#[test]
fn test_partial_unsubscribe_raises_alert() {
    let mut h = harness(seeded_source(vec![], vec![], vec![custom_event("AAPL", NOW + DAY)], &["AAPL"]));
    h.source.reject_writes(
        &path(DocumentKind::CustomCalendar),
        DocSyncError::WriteRejected("permission denied".to_string()),
    );
    h.app.handle_key(KeyCode::Char('2'));
    h.app.handle_key(KeyCode::Char('x'));
    h.app.handle_key(KeyCode::Char('y'));

    let alert = h.app.alert.clone().unwrap();
    assert!(alert.starts_with("Unsubscribe failed"));

    // Any key dismisses
    h.app.handle_key(KeyCode::Char('q'));
    assert!(h.app.alert.is_none());
    assert!(!h.app.should_quit);
}

#[test]
fn test_missing_store_enters_error_state() {
    let mut h = harness(seeded_source(vec![], vec![], vec![], &[]));
    h.source.fail(&path(DocumentKind::News), DocSyncError::NotFound("market_data".to_string()));
    h.app.on_tick();

    assert_eq!(h.app.store.active_tab, Tab::Error);
    h.app.handle_key(KeyCode::Char('1'));
    assert_eq!(h.app.store.active_tab, Tab::Error);

    // Modal stays closed; a direct submit reports the disconnection
    h.app.handle_key(KeyCode::Char('a'));
    assert!(!h.app.modal.is_open());
    h.app.modal.open();
    let _ = h.app.modal.set_input("AAPL");
    h.app.submit_subscription();
    assert_eq!(h.app.alert.as_deref(), Some("Database not connected"));
    assert_eq!(h.source.write_count(), 0);
}

#[test]
fn test_reconcile_on_load_drops_orphans() {
    let mut opts = options();
    opts.reconcile_on_load = true;
    let h = harness_with(
        seeded_source(
            vec![],
            vec![],
            vec![custom_event("AAPL", NOW + DAY), custom_event("OLD", NOW + DAY)],
            &["AAPL"],
        ),
        StaticSearch::default(),
        opts,
    );

    let calendar = h.source.document(&path(DocumentKind::CustomCalendar)).unwrap();
    assert_eq!(calendar["events"].as_array().unwrap().len(), 1);
    assert_eq!(
        h.app.status_message.as_deref(),
        Some("Dropped 1 stale calendar entries")
    );
}
