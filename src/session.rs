//! Application context tying the classifier, gateway, history, and preferences together.
//!
//! A [`Session`] is loaded once from storage and then serves one user action
//! at a time. [`Session::submit`] runs the full flow:
//!
//! ```text
//! prompt + language -> input checks -> classifier -> gateway -> history (prepend, persist)
//! ```
//!
//! While a gateway call is outstanding the session is busy and further
//! submissions are refused rather than queued. A submission that has been
//! spawned onto the runtime keeps running even if nobody awaits it, and its
//! result is still recorded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::classifier::{Assessment, PromptClassifier, REJECTION_NOTICE};
use crate::gateway::{Gateway, GatewayError};
use crate::history::HistoryStore;
use crate::models::{HistoryEntry, LanguageTag, MAX_PROMPT_CHARS};
use crate::preferences::Preferences;
use crate::storage::{KeyValueStore, Written};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a generation request is already in progress")]
    Busy,

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("prompt is too long ({len} characters, max {max})")]
    PromptTooLong { len: usize, max: usize },

    /// The classifier found no coding signal in the prompt
    #[error("{}", REJECTION_NOTICE)]
    RejectedPrompt(Assessment),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub struct Session {
    classifier: PromptClassifier,
    gateway: Gateway,
    history: Mutex<HistoryStore>,
    preferences: Mutex<Preferences>,
    busy: AtomicBool,
}

impl Session {
    /// Load history and preferences from `storage` and build a session around them
    pub fn load(
        classifier: PromptClassifier,
        gateway: Gateway,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            classifier,
            gateway,
            history: Mutex::new(HistoryStore::load(storage.clone())),
            preferences: Mutex::new(Preferences::load(storage)),
            busy: AtomicBool::new(false),
        }
    }

    pub fn classifier(&self) -> &PromptClassifier {
        &self.classifier
    }

    pub fn history(&self) -> MutexGuard<'_, HistoryStore> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn preferences(&self) -> MutexGuard<'_, Preferences> {
        self.preferences.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Input-boundary checks followed by classification. Touches no state.
    pub fn check_prompt(&self, prompt: &str) -> Result<Assessment, SessionError> {
        if prompt.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        let len = prompt.chars().count();
        if len > MAX_PROMPT_CHARS {
            return Err(SessionError::PromptTooLong { len, max: MAX_PROMPT_CHARS });
        }

        let assessment = self.classifier.assess(prompt);
        if !assessment.is_code_related() {
            info!(negative = ?assessment.negative_matches, "rejected non-coding prompt");
            return Err(SessionError::RejectedPrompt(assessment));
        }

        Ok(assessment)
    }

    /// Classify, generate, and record.
    ///
    /// On any error nothing is recorded. On success the returned [`Written`]
    /// reports whether the updated history reached storage.
    pub async fn submit(
        &self,
        prompt: &str,
        language: LanguageTag,
    ) -> Result<Written<HistoryEntry>, SessionError> {
        let _busy = BusyGuard::acquire(&self.busy).ok_or(SessionError::Busy)?;

        self.check_prompt(prompt)?;

        let result = self.gateway.generate(prompt, language).await?;

        let written = self.history().record(result);
        if let Some(e) = &written.persist_error {
            warn!("Generated code kept for this session only: {}", e);
        }

        Ok(written)
    }
}

/// Holds the busy flag for the lifetime of one submission
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).ok()?;
        Some(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
