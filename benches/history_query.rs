use std::hint::black_box;
use std::sync::Arc;

use chrono::{Duration, Utc};
use code_copilot::history::{HistoryFilter, HistoryStore};
use code_copilot::models::{GenerationResult, HistoryEntry, LanguageTag};
use code_copilot::storage::{HISTORY_KEY, KeyValueStore, MemoryStore};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Store with `num_entries` entries spread over the supported languages
fn generate_store(num_entries: usize) -> HistoryStore {
    let now = Utc::now();
    let entries: Vec<HistoryEntry> = (0..num_entries)
        .map(|i| {
            let result = GenerationResult {
                prompt: format!("write a function number {} that sorts an array", i),
                code: format!("// entry {}", i),
                requested_language: LanguageTag::SUPPORTED[i % LanguageTag::SUPPORTED.len()].clone(),
            };
            HistoryEntry::from_result(result, now - Duration::seconds(i as i64))
        })
        .collect();

    let storage = MemoryStore::new();
    storage.set(HISTORY_KEY, &serde_json::to_string(&entries).unwrap()).unwrap();
    HistoryStore::load(Arc::new(storage))
}

fn bench_history_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_query");
    group.sample_size(20);

    for size in [1_000, 10_000].iter() {
        let store = generate_store(*size);
        let by_language = HistoryFilter::new().language(LanguageTag::Rust);
        let by_text = HistoryFilter::new().text("NUMBER 99");

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("language_filter", size), size, |b, _| {
            b.iter(|| store.query(black_box(&by_language)).count());
        });
        group.bench_with_input(BenchmarkId::new("text_filter", size), size, |b, _| {
            b.iter(|| store.query(black_box(&by_text)).count());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_history_query);
criterion_main!(benches);
