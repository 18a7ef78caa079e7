//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// Configuration for the genetic search.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.1)
///     .with_correction(false)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Half of it survives each generation; the rest is refilled by
    /// crossover.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Probability of mutating an individual each generation, and of
    /// mutating each new child (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether individuals are occasionally passed through the problem's
    /// repair.
    pub use_correction: bool,

    /// Probability of repairing an individual each generation (0.0–1.0).
    pub correction_rate: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 50,
            mutation_rate: 0.2,
            use_correction: true,
            correction_rate: 0.001,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables the repair step.
    pub fn with_correction(mut self, enabled: bool) -> Self {
        self.use_correction = enabled;
        self
    }

    /// Sets the repair probability.
    pub fn with_correction_rate(mut self, rate: f64) -> Self {
        self.correction_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick feasibility checks.
    ///
    /// - Population: 40, Generations: 25
    pub fn fast() -> Self {
        Self {
            population_size: 40,
            max_generations: 25,
            ..Self::default()
        }
    }

    /// Preset matching the defaults.
    ///
    /// - Population: 100, Generations: 50
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for overnight runs: large population, many generations and
    /// more frequent repair.
    ///
    /// - Population: 200, Generations: 300, Correction rate: 0.01
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 300,
            correction_rate: 0.01,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.correction_rate) {
            return Err("correction_rate must be within [0, 1]".into());
        }
        Ok(())
    }
}
