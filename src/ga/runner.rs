//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! mutation and repair → evaluation → truncation → crossover refill → repeat.

use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual};
use crate::random::{create_rng, resolve_seed};
use crate::telemetry::{self, Progress, TelemetrySample};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations executed.
    pub generations: usize,

    /// Best fitness so far: the initial population, then one entry per
    /// generation.
    pub fitness_history: Vec<f64>,

    /// One sample per generation.
    pub telemetry: Vec<TelemetrySample>,
}

/// Executes the GA evolutionary loop.
///
/// Each generation mutates individuals with probability
/// [`mutation_rate`](GaConfig::mutation_rate), occasionally repairs them,
/// evaluates the population, keeps the better half, and refills it with
/// children of uniformly chosen survivors.
///
/// # Usage
///
/// ```ignore
/// let problem = TimetableProblem::new(&catalog);
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config);
/// println!("Best score: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from a random population.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        Self::run_with_progress(problem, config, Vec::new(), None)
    }

    /// Runs the GA with `seeds` placed in the initial population.
    ///
    /// Seeds beyond the population size are dropped; missing individuals
    /// are created at random.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run_seeded<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        seeds: Vec<P::Individual>,
    ) -> GaResult<P::Individual> {
        Self::run_with_progress(problem, config, seeds, None)
    }

    /// Runs the GA, reporting `(generation, max_generations, message)`
    /// after every generation.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run_with_progress<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        seeds: Vec<P::Individual>,
        progress: Option<Progress<'_>>,
    ) -> GaResult<P::Individual> {
        config.validate().expect("invalid GaConfig");

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let started = Instant::now();
        info!(
            "ga: population {}, generations {}, seed {}",
            config.population_size, config.max_generations, seed
        );

        // 1. Initialize and evaluate population
        let mut population = initial_population(problem, config.population_size, seeds, &mut rng);
        evaluate_population(problem, &mut population, config.parallel);

        // 2. Track best
        let mut best = find_best(&population).clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness().to_f64());
        let mut samples = Vec::with_capacity(config.max_generations);

        let survivors = (config.population_size / 2).max(1);

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            for individual in population.iter_mut() {
                if rng.random_bool(config.mutation_rate) {
                    problem.mutate(individual, &mut rng);
                }
                if config.use_correction && rng.random_bool(config.correction_rate) {
                    problem.repair(individual, &mut rng);
                }
            }
            evaluate_population(problem, &mut population, config.parallel);

            // Truncation selection
            sort_by_fitness(&mut population);
            population.truncate(survivors);

            // Refill with children of random survivors
            let mut children = Vec::with_capacity(config.population_size - population.len());
            while population.len() + children.len() < config.population_size {
                let p1 = rng.random_range(0..population.len());
                let p2 = rng.random_range(0..population.len());
                for mut child in problem.crossover(&population[p1], &population[p2], &mut rng) {
                    if population.len() + children.len() >= config.population_size {
                        break;
                    }
                    if rng.random_bool(config.mutation_rate) {
                        problem.mutate(&mut child, &mut rng);
                    }
                    children.push(child);
                }
            }
            evaluate_population(problem, &mut children, config.parallel);
            population.extend(children);

            // Update best
            let gen_best = find_best(&population);
            if gen_best.fitness() < best.fitness() {
                best = gen_best.clone();
            }

            let best_value = best.fitness().to_f64();
            let mean = telemetry::mean(population.iter().map(|i| i.fitness().to_f64()));
            fitness_history.push(best_value);
            samples.push(TelemetrySample {
                elapsed: started.elapsed(),
                step: gen + 1,
                best: best_value,
                mean,
            });
            debug!("ga: generation {} best {} mean {:.2}", gen + 1, best_value, mean);

            if let Some(report) = progress {
                report(
                    gen + 1,
                    config.max_generations,
                    &format!("Generation {}", gen + 1),
                );
            }
        }

        info!(
            "ga: finished {} generations in {:.2?}, best {:?}",
            config.max_generations,
            started.elapsed(),
            best.fitness()
        );

        GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            fitness_history,
            telemetry: samples,
        }
    }
}

fn initial_population<P: GaProblem, R: Rng>(
    problem: &P,
    size: usize,
    mut seeds: Vec<P::Individual>,
    rng: &mut R,
) -> Vec<P::Individual> {
    if seeds.len() > size {
        warn!(
            "ga: {} seed individuals for a population of {}, dropping {}",
            seeds.len(),
            size,
            seeds.len() - size
        );
        seeds.truncate(size);
    }
    while seeds.len() < size {
        seeds.push(problem.create_individual(rng));
    }
    seeds
}

/// Evaluate all individuals in the population.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

fn sort_by_fitness<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Find the individual with the best (lowest) fitness.
///
/// The population is never empty: its size is validated to be at least 2.
fn find_best<I: Individual>(population: &[I]) -> &I {
    let mut best = &population[0];
    for ind in &population[1..] {
        if ind.fitness() < best.fitness() {
            best = ind;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
