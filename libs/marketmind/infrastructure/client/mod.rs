//! External API clients

pub mod search;
pub mod yahoo;

pub use search::{SearchError, SymbolCandidate, SymbolSearch};
pub use yahoo::{YahooSearchClient, DEFAULT_SEARCH_URL};
