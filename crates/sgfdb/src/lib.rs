//! Application layer around `sgf-core`: persisted directory
//! configuration, the bulk indexer, the in-memory catalog, and the
//! plain-text rendering used by the `sgfdb` binary.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod indexer;

pub use catalog::{Catalog, GameRecord, ListQuery, ListResult, SearchScope, SortBy, SortOrder};
pub use config::Config;
pub use error::AppError;
pub use indexer::{IndexPhase, IndexProgress};
