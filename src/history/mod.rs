//! Generation history: the persisted, ordered record of past results.
//!
//! - [`HistoryStore`] owns the collection (newest first) and persists it on
//!   every mutation through a [`KeyValueStore`](crate::storage::KeyValueStore)
//! - [`HistoryFilter`] describes a query (prompt substring, language,
//!   favorites) and parses the CLI filter syntax
//! - [`HistoryView`] is the lazy result of a query; it borrows the store and
//!   is recomputed on every iteration
//!
//! Favorite toggles resolve to an entry id before mutating, so a position in a
//! filtered view always refers to the entry the user saw there.

pub mod filter;
pub mod store;

pub use filter::HistoryFilter;
pub use store::{HistoryStats, HistoryStore, HistoryView};
