use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use weber_mh::{log_likelihood, MetropolisChain, Posterior, Prior, TrialData};

fn make_trials(n: usize) -> TrialData {
    let records: Vec<(bool, f64, f64)> = (0..n)
        .map(|i| {
            let n1 = 5.0 + (i % 13) as f64;
            let n2 = 5.0 + ((i * 7) % 17) as f64;
            (i % 3 != 0, n1, n2)
        })
        .collect();
    TrialData::from_records(&records).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let trials = make_trials(1_000);

    c.bench_function("log_likelihood 1000 trials", |b| {
        b.iter(|| log_likelihood(black_box(&trials), black_box(0.6)))
    });

    c.bench_function("prior chain 1000 draws", |b| {
        b.iter(|| {
            let rng = SmallRng::seed_from_u64(42);
            let mut chain = MetropolisChain::new(Prior, 0.6, 0.1, rng).unwrap();
            chain.run(black_box(1_000)).unwrap()
        })
    });

    c.bench_function("posterior chain 100 draws, 1000 trials", |b| {
        b.iter(|| {
            let rng = SmallRng::seed_from_u64(42);
            let mut chain =
                MetropolisChain::new(Posterior::new(&trials), 0.6, 0.1, rng).unwrap();
            chain.run(black_box(100)).unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
