//! Code Copilot - natural-language code generation with a searchable history
//!
//! This library holds the core of a code-generation front-end:
//!
//! - A heuristic classifier that decides whether a prompt asks for code
//! - A gateway that sends accepted prompts to an external generation backend
//! - A persisted, filterable history of past generations with favorites
//! - Persisted session preferences (dark mode)
//!
//! [`Session`] ties these together; the `code-copilot` binary drives it from
//! the command line.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use code_copilot::{FileStore, Gateway, HttpBackend, LanguageTag, PromptClassifier, Session};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(60))?;
//! let session = Session::load(
//!     PromptClassifier::default(),
//!     Gateway::new(Arc::new(backend)),
//!     Arc::new(FileStore::new("/tmp/code-copilot")),
//! );
//!
//! let written = session.submit("write a function to reverse a string", LanguageTag::Python).await?;
//! println!("{}", written.value.code);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod export;
pub mod gateway;
pub mod history;
pub mod models;
pub mod preferences;
pub mod session;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use classifier::{PromptClassifier, REJECTION_NOTICE, classify};
pub use gateway::{Gateway, GatewayError, GenerationBackend, HttpBackend};
pub use history::{HistoryFilter, HistoryStore};
pub use models::{HistoryEntry, LanguageFilter, LanguageTag};
pub use preferences::Preferences;
pub use session::{Session, SessionError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Written};
