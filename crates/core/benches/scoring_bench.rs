//! Benchmarks for full-length trial quantization and scoring
//!
//! Trials span the whole 300 s duration cap, i.e. 300k frames each.
//!
//! Run with: cargo bench -p segscore-core --bench scoring_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use segscore_core::{EvalConfig, Evaluator, Reference, parse_table, quantize, score_framewise};
use std::hint::black_box;

/// A table of `trials` trials, each cut into `segments` equal intervals.
fn generate_table(trials: usize, segments: usize, label_offset: usize) -> String {
  let step = 300.0 / segments as f64;
  let mut table = String::new();
  for t in 0..trials {
    for s in 0..segments {
      let start = s as f64 * step;
      let end = if s + 1 == segments { 300.0 } else { (s + 1) as f64 * step };
      let label = (s + label_offset) % 4;
      table.push_str(&format!("t{t:03}_ra,{start},{end},ra_{label}\n"));
    }
  }
  table
}

fn bench_quantize_and_score(c: &mut Criterion) {
  let config = EvalConfig::default();
  let reference = Reference::from_records(parse_table(&generate_table(1, 200, 0)), &config).unwrap();
  let trial = reference.trial("t000_ra").unwrap();
  let reference_frames = reference.frames("t000_ra").unwrap();

  let mut group = c.benchmark_group("single_trial");
  group.throughput(Throughput::Elements(reference_frames.len() as u64));
  group.bench_function("quantize", |b| b.iter(|| quantize(black_box(trial.intervals()))));
  group.bench_function("score_framewise", |b| {
    let hypothesis = trial.frames();
    b.iter(|| score_framewise(black_box(reference_frames), black_box(&hypothesis)))
  });
  group.finish();
}

fn bench_evaluate_submission(c: &mut Criterion) {
  let config = EvalConfig::default();
  let mut group = c.benchmark_group("evaluate_records");
  group.sample_size(20);

  for trials in [4, 16] {
    let reference = Reference::from_records(parse_table(&generate_table(trials, 100, 0)), &config).unwrap();
    let evaluator = Evaluator::new(&reference);
    let submission = generate_table(trials, 100, 1);

    group.throughput(Throughput::Elements(reference.total_frames() as u64));
    group.bench_with_input(BenchmarkId::from_parameter(trials), &submission, |b, submission| {
      b.iter(|| evaluator.evaluate_records(parse_table(black_box(submission))))
    });
  }
  group.finish();
}

criterion_group!(benches, bench_quantize_and_score, bench_evaluate_submission);
criterion_main!(benches);
