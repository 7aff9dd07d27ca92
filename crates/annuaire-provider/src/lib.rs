//! Directory provider: fetches the two external sources, extracts candidate
//! records by positional rule, and resolves them against the query with the
//! core field matcher.

pub mod client;
mod directory;
mod error;
mod extract;
mod registry;
mod select;

pub use client::DirectoryClient;
pub use error::ProviderError;
