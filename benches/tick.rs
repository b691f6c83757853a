use criterion::Criterion;
use rand::{rngs::StdRng, SeedableRng};
use rocketry::{
    random::{ProbBinding, ProbStatic},
    Config, Simulation,
};

fn bench_tick(bench: &mut Criterion) {
    let config = Config {
        population: 500,
        obstacles: vec![],
        start_pos: [300, 750],
        goal: [300, 50],
    };
    let mut sim = Simulation::with_rng(
        config,
        ProbBinding::new(ProbStatic::default(), StdRng::seed_from_u64(0)),
    );

    bench.bench_function("advance-500", |b| b.iter(|| sim.advance().unwrap()));

    bench.bench_function("snapshot-500", |b| b.iter(|| sim.snapshot()));
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_tick(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
