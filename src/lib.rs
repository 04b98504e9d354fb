//! MarketMind Dashboard - Main Library
//!
//! Terminal dashboard over the `market_data` document collection: macro
//! releases with countdowns, scored news, earnings and a ticker watchlist.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **marketmind**: Dashboard domain, views and commands (re-exported from workspace)
//! - **docsync**: Realtime document sources (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use marketmind_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use marketmind_dashboard::marketmind::application::dashboard::App;
//! ```

// Re-export workspace libraries for convenience
pub use docsync;
pub use marketmind;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
