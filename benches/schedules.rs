use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use parjacobi::matrix::fixtures::model_problem;
use parjacobi::{JacobiOptions, Schedule, solve};

fn bench_schedules(c: &mut Criterion) {
    let n = 400;
    let (a, b) = model_problem::<f64>(n);
    let workers = JacobiOptions::default().worker_count.min(4);

    let mut group = c.benchmark_group("jacobi model problem");
    group.sample_size(10);
    for schedule in [Schedule::Fixed, Schedule::Dynamic, Schedule::Guided] {
        for chunk in [1usize, 16, 64] {
            let opts = JacobiOptions::default()
                .with_tolerance(1e-6)
                .with_max_iterations(200)
                .with_worker_count(workers)
                .with_schedule(schedule)
                .with_chunk_size(Some(chunk));
            group.bench_with_input(
                BenchmarkId::new(schedule.as_str(), chunk),
                &opts,
                |ben, opts| {
                    ben.iter(|| {
                        let (_x, stats) = solve(black_box(&a), black_box(&b), opts).unwrap();
                        stats.iterations
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_schedules);
criterion_main!(benches);
