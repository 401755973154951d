use std::hint::black_box;

use code_copilot::classifier::PromptClassifier;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Prompt of roughly `words` words with a coding term near the end
fn generate_prompt(words: usize) -> String {
    let filler = ["please", "make", "me", "something", "that", "handles", "the", "input", "nicely"];
    let mut prompt: Vec<&str> = (0..words.saturating_sub(2)).map(|i| filler[i % filler.len()]).collect();
    prompt.push("python");
    prompt.push("function");
    prompt.join(" ")
}

fn bench_classification(c: &mut Criterion) {
    let classifier = PromptClassifier::default();
    let mut group = c.benchmark_group("classification");

    for words in [10, 100, 800].iter() {
        let prompt = generate_prompt(*words);

        group.throughput(Throughput::Bytes(prompt.len() as u64));
        group.bench_with_input(BenchmarkId::new("accepted", words), &prompt, |b, prompt| {
            b.iter(|| classifier.classify(black_box(prompt)));
        });
    }

    let rejected = "what's the weather forecast for my vacation and any good movie recommendations";
    group.bench_function("rejected", |b| {
        b.iter(|| classifier.assess(black_box(rejected)));
    });

    group.finish();
}

criterion_group!(benches, bench_classification);
criterion_main!(benches);
