//! Parallel Jacobi demo on the model problem.
//!
//! ```sh
//! cargo run --release --example jacobi_cli -- 1000 1e-6 1000 4 dynamic 16
//! RUST_LOG=parjacobi=debug cargo run --example jacobi_cli -- 200 1e-8 5000 2 guided
//! ```

use clap::Parser;
use parjacobi::matrix::fixtures::model_problem;
use parjacobi::{JacobiOptions, Schedule, solve};

#[derive(Parser)]
#[command(name = "jacobi_cli")]
#[command(about = "Solve the diagonally dominant model problem with parallel Jacobi iteration")]
struct Cli {
    /// Size of the system.
    size: Option<usize>,
    /// Update-norm tolerance.
    accuracy: Option<f64>,
    /// Iteration cap.
    max_iters: Option<usize>,
    /// Number of worker threads (default: one per CPU).
    threads: Option<usize>,
    /// Schedule: static, dynamic or guided.
    schedule: Option<Schedule>,
    /// Rows per chunk.
    chunk_size: Option<usize>,
    /// Extra divisor for guided chunk sizing.
    #[arg(long, default_value_t = 1)]
    guided_factor: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let defaults = JacobiOptions::default();
    let opts = JacobiOptions {
        size: cli.size.unwrap_or(defaults.size),
        tolerance: cli.accuracy.unwrap_or(defaults.tolerance),
        max_iterations: cli.max_iters.unwrap_or(defaults.max_iterations),
        worker_count: cli.threads.unwrap_or(defaults.worker_count),
        schedule: cli.schedule.unwrap_or(defaults.schedule),
        chunk_size: cli.chunk_size.or(defaults.chunk_size),
        guided_factor: cli.guided_factor,
    };
    opts.validate()?;
    println!("{}", opts);

    let (a, b) = model_problem::<f64>(opts.size);
    let (x, stats) = solve(&a, &b, &opts)?;
    println!("{}", stats);

    println!("\nFirst 5 components:");
    for (i, xi) in x.iter().take(5).enumerate() {
        println!("x[{}] = {}", i, xi);
    }
    Ok(())
}
