//! Yahoo Finance data providers.

pub mod client;
pub mod provider;
pub mod quote;
pub mod search;
pub mod timeseries;

pub use client::YahooClient;
pub use provider::YahooProvider;
pub use search::{SymbolMatch, YahooSymbolSearch};
