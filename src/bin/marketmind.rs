//! MarketMind - Terminal dashboard for macro releases, news sentiment and
//! earnings countdowns
//!
//! Usage: marketmind [config.yaml]
//!
//! Logs go to the configured log file; writing to stdout would corrupt the
//! alternate screen.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use marketmind::application::dashboard::{ui, App};
use marketmind::infrastructure::{init_file_tracing, DashboardConfig};
use marketmind_dashboard::bin_common::{load_config_from_env, parse_args, ConfigType};

/// Input poll timeout, bounds how stale listener updates can get
const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config_path = load_config_from_env(ConfigType::from_args(&parse_args()));
    let config = if config_path.exists() {
        DashboardConfig::load(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        DashboardConfig::default()
    };

    init_file_tracing(&config.log_level, &config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    config.log();

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = runtime.block_on(App::initialize(runtime.handle().clone(), &config))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.shutdown();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.on_tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
