//! History and preferences persistence through the file store
mod common;

use std::fs;
use std::sync::Arc;

use code_copilot::history::{HistoryFilter, HistoryStore};
use code_copilot::models::{GenerationResult, LanguageTag};
use code_copilot::preferences::Preferences;
use code_copilot::storage::{FileStore, KeyValueStore};
use common::{DataDirBuilder, HistoryEntryBuilder};

fn result(prompt: &str, language: LanguageTag) -> GenerationResult {
    GenerationResult { prompt: prompt.to_string(), code: format!("// {}", prompt), requested_language: language }
}

fn open(dir: &std::path::Path) -> HistoryStore {
    HistoryStore::load(Arc::new(FileStore::new(dir)))
}

#[test]
fn test_history_survives_reload() {
    let data = DataDirBuilder::new();

    let mut store = open(data.path());
    store.record(result("sort an array", LanguageTag::Go));
    let head = store.record(result("fibonacci function", LanguageTag::Python));
    assert!(head.is_durable());
    store.toggle_favorite_by_id(head.value.id).unwrap();

    let reloaded = open(data.path());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.entries()[0].prompt, "fibonacci function");
    assert_eq!(reloaded.entries()[0].language, LanguageTag::Python);
    assert!(reloaded.entries()[0].favorite);
    assert_eq!(reloaded.entries()[1].language, LanguageTag::Go);
    assert_eq!(reloaded.entries(), store.entries());
}

#[test]
fn test_clear_removes_stored_value() {
    let data = DataDirBuilder::new();
    let mut store = open(data.path());
    store.record(result("reverse a string", LanguageTag::Rust));
    assert!(data.path().join("history.json").exists());

    let cleared = store.clear();
    assert_eq!(cleared.value, 1);
    assert!(cleared.is_durable());
    assert!(!data.path().join("history.json").exists());

    assert!(store.query(&HistoryFilter::new()).is_empty());
    assert!(open(data.path()).is_empty());
}

#[test]
fn test_loads_hand_written_history() {
    let data = DataDirBuilder::new().with_history_entries(&[
        HistoryEntryBuilder::new().prompt("binary search").language("Python").favorite(true),
        HistoryEntryBuilder::new()
            .id("6ba7b810-9dad-11d1-80b4-00c04fd430c8")
            .prompt("hello world")
            .language("kotlin")
            .timestamp("2025-01-14T10:00:00Z"),
    ]);

    let store = open(data.path());
    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].language, LanguageTag::Python);
    assert_eq!(store.entries()[1].language, LanguageTag::Unknown("kotlin".to_string()));

    let favorites = HistoryFilter::new().favorites_only(true);
    let view = store.query(&favorites);
    assert_eq!(view.count(), 1);
    assert_eq!(view.get(0).unwrap().prompt, "binary search");
}

#[test]
fn test_epoch_millis_timestamps_load() {
    let data = DataDirBuilder::new().with_history(
        r#"[{"id":"550e8400-e29b-41d4-a716-446655440000","prompt":"p","code":"c","language":"go","timestamp":1736935200000}]"#,
    );

    let store = open(data.path());
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].timestamp.timestamp_millis(), 1_736_935_200_000);
}

#[test]
fn test_malformed_history_loads_empty_and_is_replaced() {
    let data = DataDirBuilder::new().with_history("{ this is not json");

    let mut store = open(data.path());
    assert!(store.is_empty());

    store.record(result("parse json", LanguageTag::TypeScript));
    let raw = fs::read_to_string(data.path().join("history.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_history_with_invalid_record_loads_empty() {
    let data = DataDirBuilder::new().with_history(r#"[{"prompt":"missing code and language"}]"#);
    assert!(open(data.path()).is_empty());
}

#[test]
fn test_dark_mode_persists_independently() {
    let data = DataDirBuilder::new().with_dark_mode("true");
    let storage = Arc::new(FileStore::new(data.path()));

    let mut preferences = Preferences::load(storage.clone());
    assert!(preferences.dark_mode());

    preferences.toggle_dark_mode();
    assert_eq!(storage.get("darkMode").unwrap().as_deref(), Some("false"));

    let mut store = HistoryStore::load(storage.clone());
    store.record(result("sort array", LanguageTag::Go));
    store.clear();

    assert!(!Preferences::load(storage).dark_mode());
}
