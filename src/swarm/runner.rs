//! Swarm search loop.

use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::SwarmConfig;
use super::types::{Particle, SwarmProblem};
use crate::ga::{Fitness, Individual};
use crate::random::{create_rng, resolve_seed};
use crate::telemetry::{self, Progress, TelemetrySample};

/// Result of a swarm run.
#[derive(Debug, Clone)]
pub struct SwarmResult<S: Individual> {
    /// Global best solution.
    pub best: S,

    /// Fitness of `best`.
    pub best_fitness: S::Fitness,

    /// Iterations executed.
    pub iterations: usize,

    /// Global best fitness: the initial swarm, then one entry per
    /// iteration.
    pub fitness_history: Vec<f64>,

    /// One sample per iteration; the mean is over personal bests.
    pub telemetry: Vec<TelemetrySample>,

    /// The final swarm.
    pub particles: Vec<Particle<S>>,
}

/// Executes the swarm search.
///
/// Every iteration perturbs each particle by resampling its fields with
/// [`resample_probability`](SwarmConfig::resample_probability),
/// occasionally repairs it, evaluates the swarm, then updates personal
/// bests and the global best in particle order.
pub struct SwarmRunner;

impl SwarmRunner {
    /// Runs the swarm from random particles.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (see [`SwarmConfig::validate`]).
    pub fn run<P: SwarmProblem>(problem: &P, config: &SwarmConfig) -> SwarmResult<P::Solution> {
        Self::run_with_progress(problem, config, Vec::new(), None)
    }

    /// Runs the swarm with `seeds` as the first particles.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run_seeded<P: SwarmProblem>(
        problem: &P,
        config: &SwarmConfig,
        seeds: Vec<P::Solution>,
    ) -> SwarmResult<P::Solution> {
        Self::run_with_progress(problem, config, seeds, None)
    }

    /// Runs the swarm, reporting `(iteration, max_iterations, message)`
    /// after every iteration.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run_with_progress<P: SwarmProblem>(
        problem: &P,
        config: &SwarmConfig,
        mut seeds: Vec<P::Solution>,
        progress: Option<Progress<'_>>,
    ) -> SwarmResult<P::Solution> {
        config.validate().expect("invalid SwarmConfig");

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let started = Instant::now();
        info!(
            "swarm: {} particles, {} iterations, seed {}",
            config.swarm_size, config.max_iterations, seed
        );

        if seeds.len() > config.swarm_size {
            warn!(
                "swarm: {} seed solutions for a swarm of {}, dropping {}",
                seeds.len(),
                config.swarm_size,
                seeds.len() - config.swarm_size
            );
            seeds.truncate(config.swarm_size);
        }
        let mut positions = seeds;
        while positions.len() < config.swarm_size {
            positions.push(problem.create_solution(&mut rng));
        }
        evaluate_all(problem, &mut positions, config.parallel);

        let mut particles: Vec<Particle<P::Solution>> =
            positions.into_iter().map(Particle::new).collect();
        let mut global = best_of(&particles).clone();
        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        fitness_history.push(global.fitness().to_f64());
        let mut samples = Vec::with_capacity(config.max_iterations);

        for iter in 0..config.max_iterations {
            for particle in particles.iter_mut() {
                problem.perturb(&mut particle.position, config.resample_probability, &mut rng);
                if config.use_correction && rng.random_bool(config.correction_rate) {
                    problem.repair(&mut particle.position, &mut rng);
                }
            }

            evaluate_particles(problem, &mut particles, config.parallel);

            for particle in particles.iter_mut() {
                if particle.update_best() && particle.best.fitness() < global.fitness() {
                    global = particle.best.clone();
                }
            }

            let best_value = global.fitness().to_f64();
            let mean = telemetry::mean(particles.iter().map(|p| p.best.fitness().to_f64()));
            fitness_history.push(best_value);
            samples.push(TelemetrySample {
                elapsed: started.elapsed(),
                step: iter + 1,
                best: best_value,
                mean,
            });
            debug!("swarm: iteration {} best {} mean {:.2}", iter + 1, best_value, mean);

            if let Some(report) = progress {
                report(
                    iter + 1,
                    config.max_iterations,
                    &format!("Iteration {}", iter + 1),
                );
            }
        }

        info!(
            "swarm: finished {} iterations in {:.2?}, best {:?}",
            config.max_iterations,
            started.elapsed(),
            global.fitness()
        );

        SwarmResult {
            best_fitness: global.fitness(),
            best: global,
            iterations: config.max_iterations,
            fitness_history,
            telemetry: samples,
            particles,
        }
    }
}

fn evaluate_all<P: SwarmProblem>(problem: &P, solutions: &mut [P::Solution], parallel: bool) {
    #[cfg(feature = "parallel")]
    if parallel {
        solutions.par_iter_mut().for_each(|s| {
            let f = problem.evaluate(s);
            s.set_fitness(f);
        });
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for s in solutions.iter_mut() {
        let f = problem.evaluate(s);
        s.set_fitness(f);
    }
}

fn evaluate_particles<P: SwarmProblem>(
    problem: &P,
    particles: &mut [Particle<P::Solution>],
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    if parallel {
        particles.par_iter_mut().for_each(|p| {
            let f = problem.evaluate(&p.position);
            p.position.set_fitness(f);
        });
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for p in particles.iter_mut() {
        let f = problem.evaluate(&p.position);
        p.position.set_fitness(f);
    }
}

/// Lowest personal best. The swarm is validated to be non-empty.
fn best_of<S: Individual>(particles: &[Particle<S>]) -> &S {
    let mut best = &particles[0].best;
    for p in &particles[1..] {
        if p.best.fitness() < best.fitness() {
            best = &p.best;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct Bits {
        bits: Vec<bool>,
        fitness: u64,
    }

    impl Individual for Bits {
        type Fitness = u64;
        fn fitness(&self) -> u64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: u64) {
            self.fitness = f;
        }
    }

    /// Minimize the number of unset bits.
    struct ZeroCount {
        n: usize,
        repairs: AtomicUsize,
    }

    impl ZeroCount {
        fn new(n: usize) -> Self {
            Self {
                n,
                repairs: AtomicUsize::new(0),
            }
        }
    }

    impl SwarmProblem for ZeroCount {
        type Solution = Bits;

        fn create_solution<R: Rng>(&self, rng: &mut R) -> Bits {
            Bits {
                bits: (0..self.n).map(|_| rng.random_bool(0.5)).collect(),
                fitness: u64::MAX,
            }
        }

        fn evaluate(&self, s: &Bits) -> u64 {
            s.bits.iter().filter(|&&b| !b).count() as u64
        }

        fn perturb<R: Rng>(&self, s: &mut Bits, probability: f64, rng: &mut R) {
            for bit in s.bits.iter_mut() {
                if rng.random_bool(probability) {
                    *bit = rng.random_bool(0.5);
                }
            }
        }

        fn repair<R: Rng>(&self, _s: &mut Bits, _rng: &mut R) {
            self.repairs.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn sequential(size: usize, iterations: usize) -> SwarmConfig {
        SwarmConfig::default()
            .with_swarm_size(size)
            .with_max_iterations(iterations)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_global_best_never_regresses() {
        let problem = ZeroCount::new(24);
        let result = SwarmRunner::run(&problem, &sequential(10, 60));

        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0], "{} > {}", window[1], window[0]);
        }
        assert!(result.best_fitness < 12);
        assert_eq!(result.fitness_history.len(), 61);
        assert_eq!(result.telemetry.len(), 60);
    }

    #[test]
    fn test_personal_bests_bound_global() {
        let problem = ZeroCount::new(16);
        let result = SwarmRunner::run(&problem, &sequential(8, 30));

        assert_eq!(result.particles.len(), 8);
        for p in &result.particles {
            assert!(p.best.fitness() <= p.position.fitness());
            assert!(result.best_fitness <= p.best.fitness());
        }
        assert!(result.telemetry.iter().all(|s| s.mean >= s.best));
    }

    #[test]
    fn test_same_seed_same_run() {
        let problem = ZeroCount::new(16);
        let a = SwarmRunner::run(&problem, &sequential(8, 25));
        let b = SwarmRunner::run(&problem, &sequential(8, 25).with_parallel(true));
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.bits, b.best.bits);
    }

    #[test]
    fn test_seeded_optimum_is_returned() {
        let problem = ZeroCount::new(10);
        let optimum = Bits {
            bits: vec![true; 10],
            fitness: u64::MAX,
        };
        let result = SwarmRunner::run_seeded(&problem, &sequential(5, 10), vec![optimum]);
        assert_eq!(result.fitness_history[0], 0.0);
        assert_eq!(result.best_fitness, 0);
        assert!(result.best.bits.iter().all(|&b| b));
    }

    #[test]
    fn test_repair_hook_follows_config() {
        let problem = ZeroCount::new(8);
        SwarmRunner::run(&problem, &sequential(5, 4).with_correction_rate(1.0));
        assert_eq!(problem.repairs.load(Ordering::Relaxed), 20);
    }

    #[test]
    fn test_zero_probability_keeps_positions() {
        let problem = ZeroCount::new(12);
        let config = sequential(4, 5)
            .with_resample_probability(0.0)
            .with_correction(false);
        let result = SwarmRunner::run(&problem, &config);
        assert!(result.fitness_history.windows(2).all(|w| w[0] == w[1]));
    }
}
