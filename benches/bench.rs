//! Criterion benchmarks for Kopis.
//!
//! Covers text analysis, training (statistics, chi-square selection and
//! parameter estimation) and prediction over a synthetic corpus.

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use kopis::analysis::analyzer::{Analyzer, StandardAnalyzer};
use kopis::classifier::NaiveBayes;
use kopis::document::TextTokenizer;
use kopis::feature::{DEFAULT_CRITICAL_VALUE, extract_stats, select_features};

/// Generate a labeled corpus where each category favors its own vocabulary.
fn generate_dataset(categories: usize, docs_per_category: usize) -> BTreeMap<String, Vec<String>> {
    let shared = ["report", "today", "people", "new", "year", "time", "world"];
    let topical = [
        ["goal", "match", "league", "coach", "score", "team"],
        ["stock", "bond", "market", "price", "trade", "bank"],
        ["vote", "party", "election", "senate", "policy", "law"],
        ["album", "band", "concert", "song", "tour", "stage"],
    ];

    let mut dataset = BTreeMap::new();
    for c in 0..categories {
        let words = &topical[c % topical.len()];
        let mut examples = Vec::with_capacity(docs_per_category);
        for i in 0..docs_per_category {
            let doc_length = 20 + (i % 30);
            let mut doc_words = Vec::with_capacity(doc_length);
            for j in 0..doc_length {
                if (i + j) % 3 == 0 {
                    doc_words.push(shared[(i * 7 + j * 13) % shared.len()]);
                } else {
                    doc_words.push(words[(i * 5 + j * 11) % words.len()]);
                }
            }
            examples.push(doc_words.join(" "));
        }
        dataset.insert(format!("category_{c}"), examples);
    }

    dataset
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new().unwrap();
    let dataset = generate_dataset(1, 100);
    let texts = &dataset["category_0"];

    group.bench_function("analyze_single_document", |b| {
        b.iter(|| {
            let tokens: Vec<_> = analyzer.analyze(black_box(&texts[0])).unwrap().collect();
            black_box(tokens)
        })
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("tokenize_batch_documents", |b| {
        let tokenizer = TextTokenizer::standard().unwrap();
        b.iter(|| {
            for text in texts {
                let _ = black_box(tokenizer.tokenize(black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark training.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(20);

    let dataset = generate_dataset(4, 250);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("feature_selection", |b| {
        let tokenizer = TextTokenizer::standard().unwrap();
        let documents: Vec<_> = dataset
            .iter()
            .flat_map(|(category, examples)| {
                let tokenizer = &tokenizer;
                examples.iter().map(move |text| {
                    tokenizer.tokenize(text).unwrap().with_category(category.clone())
                })
            })
            .collect();

        b.iter(|| {
            let stats = extract_stats(black_box(&documents));
            black_box(select_features(&stats, DEFAULT_CRITICAL_VALUE))
        })
    });

    group.bench_function("train_naive_bayes", |b| {
        b.iter(|| {
            let mut classifier = NaiveBayes::new().unwrap();
            classifier.train(black_box(&dataset)).unwrap();
            black_box(classifier)
        })
    });

    group.finish();
}

/// Benchmark prediction.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let dataset = generate_dataset(4, 250);
    let mut classifier = NaiveBayes::new().unwrap();
    classifier.train(&dataset).unwrap();
    let query = "the coach said the team will score in the league match this year";

    group.bench_function("predict", |b| {
        b.iter(|| black_box(classifier.predict(black_box(query)).unwrap()))
    });

    group.bench_function("predict_ranked", |b| {
        b.iter(|| black_box(classifier.predict_ranked(black_box(query)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_training, bench_prediction);
criterion_main!(benches);
