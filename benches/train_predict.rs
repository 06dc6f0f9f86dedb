//! Decision tree benchmarks.
//!
//! - Fitting: sample count and depth scaling, sequential vs parallel
//!   split scoring.
//! - Prediction: batch throughput, sequential vs parallel traversal.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use cartree::data::{Dataset, SamplesView};
use cartree::inference::TreePredictor;
use cartree::testing::{clustered_samples, random_samples};
use cartree::training::{TreeBuilder, TreeParams};
use cartree::Parallelism;

fn bench_params(max_depth: usize) -> TreeParams {
    TreeParams {
        max_depth,
        ..Default::default()
    }
}

/// Fit time as the training set grows.
fn bench_fit_sample_scaling(c: &mut Criterion) {
    let n_features = 10;
    let params = bench_params(6);

    let mut group = c.benchmark_group("fit/samples");

    for n_samples in [1_000, 10_000, 50_000] {
        let (samples, labels) = clustered_samples(n_samples, n_features, 4, 42);
        let dataset = Dataset::from_samples(samples.view(), labels).unwrap();

        group.throughput(Throughput::Elements((n_samples * n_features) as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", n_samples),
            &dataset,
            |b, dataset| {
                let builder = TreeBuilder::new(params, Parallelism::Sequential);
                b.iter(|| black_box(builder.fit(black_box(dataset))));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", n_samples),
            &dataset,
            |b, dataset| {
                let builder = TreeBuilder::new(params, Parallelism::Parallel);
                b.iter(|| black_box(builder.fit(black_box(dataset))));
            },
        );
    }

    group.finish();
}

/// Fit time as the depth budget grows.
fn bench_fit_depth_scaling(c: &mut Criterion) {
    let (samples, labels) = clustered_samples(10_000, 10, 4, 42);
    let dataset = Dataset::from_samples(samples.view(), labels).unwrap();

    let mut group = c.benchmark_group("fit/depth");

    for max_depth in [2usize, 4, 8, 12] {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_depth),
            &max_depth,
            |b, &max_depth| {
                let builder = TreeBuilder::new(bench_params(max_depth), Parallelism::Sequential);
                b.iter(|| black_box(builder.fit(black_box(&dataset))));
            },
        );
    }

    group.finish();
}

/// Batch prediction throughput.
fn bench_predict_batch(c: &mut Criterion) {
    let n_features = 10;
    let (samples, labels) = clustered_samples(10_000, n_features, 4, 42);
    let dataset = Dataset::from_samples(samples.view(), labels).unwrap();
    let tree = TreeBuilder::new(bench_params(8), Parallelism::Sequential).fit(&dataset);
    let predictor = TreePredictor::new(&tree);

    let mut group = c.benchmark_group("predict/batch");

    for n_queries in [1_000, 10_000, 100_000] {
        let queries = random_samples(n_queries, n_features, 7, -5.0, 20.0);
        let flat = queries.as_slice().unwrap();
        let view = SamplesView::from_slice(flat, n_queries, n_features).unwrap();

        group.throughput(Throughput::Elements(n_queries as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", n_queries),
            &view,
            |b, view| {
                b.iter(|| {
                    black_box(
                        predictor
                            .predict_batch(*view, Parallelism::Sequential)
                            .unwrap(),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", n_queries),
            &view,
            |b, view| {
                b.iter(|| {
                    black_box(
                        predictor
                            .predict_batch(*view, Parallelism::Parallel)
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fit_sample_scaling,
    bench_fit_depth_scaling,
    bench_predict_batch
);
criterion_main!(benches);
