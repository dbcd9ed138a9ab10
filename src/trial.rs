//! Trial Runner
//!
//! Generates the measurements behind a growth curve. One trial samples a
//! random sequence of `max_n` values in `[0, 1)` and sorts every prefix of it,
//! from length 0 to `max_n - 1`, recording one operation count per prefix.
//! Each prefix is copied out of the untouched sample before sorting, so no
//! prefix ever sees work done by a previous one.
//!
//! ## Randomness
//!
//! The random source is always passed in. Sequential runs draw every sample
//! straight from it. Parallel runs first draw one seed per trial from it, then
//! give each trial its own `StdRng`, so a seeded run produces the same table no
//! matter how rayon schedules the trials.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::counting_sort::Algorithm;
use crate::table::TrialTable;

/// Runs `num_trials` trials of prefix sorts up to `max_n` elements.
///
/// # Example
///
/// ```
/// use quad_sort_growth::{Algorithm, TrialRunner};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let table = TrialRunner::new(10, 3).run_algorithm(Algorithm::Selection, &mut rng);
/// assert_eq!(table.num_rows(), 3);
/// assert_eq!(table.num_columns(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct TrialRunner {
    max_n: usize,
    num_trials: usize,
    parallel: bool,
}

impl TrialRunner {
    pub fn new(max_n: usize, num_trials: usize) -> Self {
        Self {
            max_n,
            num_trials,
            parallel: false,
        }
    }

    /// Run trials on rayon's thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }

    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Run all trials with one of the instrumented sorts.
    pub fn run_algorithm<R>(&self, algorithm: Algorithm, rng: &mut R) -> TrialTable
    where
        R: Rng + ?Sized,
    {
        info!(
            algorithm = algorithm.name(),
            max_n = self.max_n,
            trials = self.num_trials,
            parallel = self.parallel,
            "Generating trial table"
        );
        self.run(|items: &mut [f64]| algorithm.count(items), rng)
    }

    /// Run all trials with an arbitrary counting sorter.
    ///
    /// `max_n == 0` gives one empty row per trial; `num_trials == 0` gives a
    /// table without rows.
    pub fn run<F, R>(&self, sorter: F, rng: &mut R) -> TrialTable
    where
        F: Fn(&mut [f64]) -> u64 + Sync,
        R: Rng + ?Sized,
    {
        let start = Instant::now();
        let max_n = self.max_n;

        let rows: Vec<Vec<u64>> = if self.parallel {
            let seeds: Vec<u64> = (0..self.num_trials).map(|_| rng.gen()).collect();
            seeds
                .par_iter()
                .enumerate()
                .map(|(trial, &seed)| {
                    let mut trial_rng = StdRng::seed_from_u64(seed);
                    let sample = sample_sequence(&mut trial_rng, max_n);
                    let row = run_trial(&sorter, &sample);
                    debug!(trial, columns = row.len(), "Trial finished");
                    row
                })
                .collect()
        } else {
            (0..self.num_trials)
                .map(|trial| {
                    let sample = sample_sequence(rng, max_n);
                    let row = run_trial(&sorter, &sample);
                    debug!(trial, columns = row.len(), "Trial finished");
                    row
                })
                .collect()
        };

        info!(
            trials = rows.len(),
            max_n,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Trial table complete"
        );

        TrialTable::from_rows(rows)
    }
}

/// Draw `len` independent uniform values in `[0, 1)`.
pub fn sample_sequence<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen::<f64>()).collect()
}

/// Count every prefix of `sample`: column `n` is the sorter's count on a fresh
/// copy of `sample[..n]`.
pub fn run_trial<F>(sorter: &F, sample: &[f64]) -> Vec<u64>
where
    F: Fn(&mut [f64]) -> u64 + ?Sized,
{
    let mut buffer = Vec::with_capacity(sample.len());

    (0..sample.len())
        .map(|n| {
            buffer.clear();
            buffer.extend_from_slice(&sample[..n]);
            sorter(&mut buffer)
        })
        .collect()
}

/// Sequential convenience wrapper around [`TrialRunner::run`].
pub fn run_trials<F, R>(sorter: F, max_n: usize, num_trials: usize, rng: &mut R) -> TrialTable
where
    F: Fn(&mut [f64]) -> u64 + Sync,
    R: Rng + ?Sized,
{
    TrialRunner::new(max_n, num_trials).run(sorter, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting_sort::{bubble_sort, is_sorted};
    use std::sync::Mutex;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_table_shape() {
        let table = run_trials(bubble_sort::<f64>, 20, 5, &mut seeded(3));
        assert_eq!(table.num_rows(), 5);
        assert!(table.rows().iter().all(|row| row.len() == 20));
    }

    #[test]
    fn test_two_element_bubble_trial() {
        let table = run_trials(bubble_sort::<f64>, 2, 1, &mut seeded(11));
        assert_eq!(table.rows(), &[vec![1, 1]]);
    }

    #[test]
    fn test_zero_max_n() {
        let table = run_trials(bubble_sort::<f64>, 0, 3, &mut seeded(5));
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 0);
    }

    #[test]
    fn test_zero_trials() {
        let table = run_trials(bubble_sort::<f64>, 10, 0, &mut seeded(5));
        assert!(table.is_empty());
    }

    #[test]
    fn test_single_trial_matches_standalone_sorts() {
        for algorithm in Algorithm::ALL {
            let sample = sample_sequence(&mut seeded(42), 25);
            let table = TrialRunner::new(25, 1).run_algorithm(algorithm, &mut seeded(42));

            let row = &table.rows()[0];
            for (n, &count) in row.iter().enumerate() {
                let mut prefix = sample[..n].to_vec();
                assert_eq!(count, algorithm.count(&mut prefix), "{} at n={}", algorithm, n);
            }
        }
    }

    #[test]
    fn test_each_prefix_gets_unsorted_copy() {
        let seen: Mutex<Vec<Vec<f64>>> = Mutex::new(Vec::new());
        let sorter = |items: &mut [f64]| {
            seen.lock().unwrap().push(items.to_vec());
            let count = bubble_sort(items);
            assert!(is_sorted(items));
            count
        };

        let sample = sample_sequence(&mut seeded(9), 8);
        run_trials(sorter, 8, 1, &mut seeded(9));

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 8);
        for (n, input) in seen.iter().enumerate() {
            assert_eq!(input.as_slice(), &sample[..n]);
        }
    }

    #[test]
    fn test_samples_in_unit_interval() {
        let sample = sample_sequence(&mut seeded(1), 1000);
        assert!(sample.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let runner = TrialRunner::new(30, 16).parallel(true);
        let first = runner.run_algorithm(Algorithm::Insertion, &mut seeded(77));
        let second = runner.run_algorithm(Algorithm::Insertion, &mut seeded(77));
        assert_eq!(first, second);
        assert_eq!(first.num_rows(), 16);
        assert_eq!(first.num_columns(), 30);
    }

    #[test]
    fn test_parallel_rows_follow_seed_order() {
        let mut rng = seeded(21);
        let seeds: Vec<u64> = (0..4).map(|_| rng.gen()).collect();

        let table = TrialRunner::new(12, 4)
            .parallel(true)
            .run_algorithm(Algorithm::Bubble, &mut seeded(21));

        for (row, seed) in table.rows().iter().zip(seeds) {
            let sample = sample_sequence(&mut StdRng::seed_from_u64(seed), 12);
            assert_eq!(row, &run_trial(&bubble_sort::<f64>, &sample));
        }
    }

    #[test]
    fn test_selection_rows_are_identical_across_trials() {
        // Selection sort does the same work for every input of a given length.
        let table = TrialRunner::new(15, 4).run_algorithm(Algorithm::Selection, &mut seeded(8));
        let first = &table.rows()[0];
        assert!(table.rows().iter().all(|row| row == first));
    }
}
