//! Synthetic employee data
//!
//! Produces random employees for load testing, plus a biased subset that is
//! guaranteed to match the benchmark filter (male, surname starting with
//! "F"), and streams them into the store in batches.

use chrono::{Duration, NaiveDate};
use log::info;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::core::dates;
use crate::core::errors::{Result, StoreError};
use crate::core::record::{Employee, Gender};
use crate::storage::query::{FILTER_GENDER, FILTER_PREFIX};
use crate::storage::EmployeeStore;

const DAYS_PER_YEAR: f64 = 365.25;

/// Youngest generated age, in days
pub const MIN_AGE_DAYS: i64 = (18.0 * DAYS_PER_YEAR) as i64;

/// Oldest generated age, in days
pub const MAX_AGE_DAYS: i64 = (70.0 * DAYS_PER_YEAR) as i64;

/// Which part of the dataset a batch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Random,
    Biased,
}

/// Reported after every committed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    pub phase: Phase,
    /// Rows committed so far in this phase
    pub phase_done: usize,
    /// Rows this phase will produce
    pub phase_total: usize,
    /// Rows committed so far across both phases
    pub total_done: usize,
}

/// Random employee generator
pub struct Generator<R: Rng> {
    rng: R,
    today: NaiveDate,
}

impl Generator<ThreadRng> {
    /// Generator using the thread RNG and the local date
    pub fn new() -> Self {
        Generator::with_rng(rand::thread_rng(), dates::today())
    }
}

impl Default for Generator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<StdRng> {
    /// Deterministic generator for reproducible datasets
    pub fn seeded(seed: u64, today: NaiveDate) -> Self {
        Generator::with_rng(StdRng::seed_from_u64(seed), today)
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        Generator { rng, today }
    }

    /// Date that birth dates are counted back from
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn lowercase(&mut self, name: &mut String, min: usize, max: usize) {
        let len = self.rng.gen_range(min..=max);
        for _ in 0..len {
            name.push(self.rng.gen_range(b'a'..=b'z') as char);
        }
    }

    fn uppercase(&mut self) -> char {
        self.rng.gen_range(b'A'..=b'Z') as char
    }

    /// "Surname First Middle" with the given surname initial
    fn full_name(&mut self, surname_initial: char) -> String {
        let mut name = String::with_capacity(36);

        name.push(surname_initial);
        self.lowercase(&mut name, 4, 10);
        name.push(' ');

        let initial = self.uppercase();
        name.push(initial);
        self.lowercase(&mut name, 3, 8);
        name.push(' ');

        let initial = self.uppercase();
        name.push(initial);
        self.lowercase(&mut name, 5, 12);

        name
    }

    fn birth_date(&mut self) -> NaiveDate {
        let days = self.rng.gen_range(MIN_AGE_DAYS..=MAX_AGE_DAYS);
        self.today - Duration::days(days)
    }

    /// One employee with uniformly random name letters, age and gender
    pub fn random_record(&mut self) -> Employee {
        let initial = self.uppercase();
        let full_name = self.full_name(initial);
        let birth_date = self.birth_date();
        let gender = if self.rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };

        Employee::from_generated(full_name, birth_date, gender)
    }

    /// One employee that matches the benchmark filter
    pub fn random_biased_record(&mut self) -> Employee {
        let full_name = self.full_name(FILTER_PREFIX);
        let birth_date = self.birth_date();

        Employee::from_generated(full_name, birth_date, FILTER_GENDER)
    }

    /// Insert `total_random` random and then `total_biased` biased employees,
    /// at most `batch_size` per transaction.
    ///
    /// Existing rows are kept. `progress` is called after each batch commits.
    /// Returns the number of rows inserted.
    pub fn generate_dataset<F>(
        &mut self,
        store: &mut EmployeeStore,
        total_random: usize,
        total_biased: usize,
        batch_size: usize,
        mut progress: F,
    ) -> Result<usize>
    where
        F: FnMut(GenerationProgress),
    {
        if batch_size == 0 {
            return Err(StoreError::InvalidOperation(
                "Batch size must be greater than zero".to_string(),
            ));
        }

        let mut total_done = 0;
        for (phase, phase_total) in [(Phase::Random, total_random), (Phase::Biased, total_biased)] {
            info!("Generating {} {:?} employees", phase_total, phase);

            let mut phase_done = 0;
            while phase_done < phase_total {
                let size = batch_size.min(phase_total - phase_done);
                let batch: Vec<Employee> = (0..size)
                    .map(|_| match phase {
                        Phase::Random => self.random_record(),
                        Phase::Biased => self.random_biased_record(),
                    })
                    .collect();

                store.insert_batch(&batch)?;
                phase_done += size;
                total_done += size;

                progress(GenerationProgress {
                    phase,
                    phase_done,
                    phase_total,
                    total_done,
                });
            }
        }

        info!("Generation complete: {} employees inserted", total_done);
        Ok(total_done)
    }
}
