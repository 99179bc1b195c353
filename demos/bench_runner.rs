//! Benchmark runner for staffdb
//!
//! Builds a throwaway database, fills it with synthetic employees and times
//! every query plan with and without the optimization index.

use std::fs;

use staffdb::{Benchmark, EmployeeStore, Generator};

const RANDOM_EMPLOYEES: usize = 200_000;
const BIASED_EMPLOYEES: usize = 100;
const BATCH_SIZE: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("staffdb Query Benchmark");
    println!("=======================");

    let bench_file = "staffdb_benchmark.db";
    let _ = fs::remove_file(bench_file);

    let mut store = EmployeeStore::open(bench_file)?;
    store.create_schema()?;

    let mut generator = Generator::new();
    generator.generate_dataset(&mut store, RANDOM_EMPLOYEES, BIASED_EMPLOYEES, BATCH_SIZE, |p| {
        if p.total_done % 50_000 == 0 {
            println!("  {} employees inserted", p.total_done);
        }
    })?;

    store.drop_optimizations()?;
    println!("\nWithout index:");
    let mut bench = Benchmark::new(&store);
    for result in bench.run_plan_matrix()? {
        println!("  {}", result);
    }

    store.apply_optimizations()?;
    println!("\nWith index:");
    let mut bench = Benchmark::new(&store);
    for result in bench.run_plan_matrix()? {
        println!("  {}", result);
    }

    store.close()?;
    let _ = fs::remove_file(bench_file);

    Ok(())
}
