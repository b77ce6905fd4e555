use blindavg::ckks::CkksParams;
use blindavg::protocol::{self, CkksScheme, ComputeAgent, PlaintextSample, UserAgent};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_encrypted_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypted_average");

    for &degree in &[256, 512] {
        let params = CkksParams::with_degree(degree);
        let values: Vec<f64> = (0..100).map(|i| 100.0 + (i as f64) * 0.5).collect();
        let sample = PlaintextSample::new(values).unwrap();

        group.bench_function(format!("full_exchange_degree_{degree}"), |b| {
            let mut rng = ChaCha20Rng::seed_from_u64(123);
            b.iter(|| {
                let report =
                    protocol::run::<CkksScheme, _>(black_box(&params), &sample, &mut rng)
                        .expect("protocol run failed");
                black_box(report.average)
            });
        });

        group.bench_function(format!("server_compute_degree_{degree}"), |b| {
            // Setup once; measure only the homomorphic work plus transport
            // decode and encode, the compute party's steady-state cost.
            let mut rng = ChaCha20Rng::seed_from_u64(123);
            let user = UserAgent::<CkksScheme>::new(&params, &mut rng)
                .expect("context creation failed");
            let server = ComputeAgent::<CkksScheme>::new(user.eval_context(), sample.len())
                .expect("compute agent creation failed");
            let request = user
                .encrypt_sample(&sample, &mut rng)
                .expect("encryption failed");

            b.iter(|| {
                let response = server
                    .compute_average(black_box(&request))
                    .expect("homomorphic average failed");
                black_box(response)
            });
        });
    }

    group.bench_function("direct_mean_100_elements", |b| {
        let values: Vec<f64> = (0..100).map(|i| 100.0 + (i as f64) * 0.5).collect();
        b.iter(|| {
            let sum: f64 = black_box(&values).iter().sum();
            black_box(sum / values.len() as f64)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encrypted_average);
criterion_main!(benches);
