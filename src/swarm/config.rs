//! Swarm configuration.

/// Configuration for the swarm search.
///
/// ```
/// use u_timetable::swarm::SwarmConfig;
///
/// let config = SwarmConfig::default()
///     .with_swarm_size(30)
///     .with_max_iterations(200)
///     .with_seed(1);
/// assert!((config.resample_probability - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Number of iterations to run.
    pub max_iterations: usize,

    /// Probability of resampling each field of each component per
    /// iteration (0.0–1.0).
    pub resample_probability: f64,

    /// Whether particles are occasionally passed through the problem's
    /// repair.
    pub use_correction: bool,

    /// Probability of repairing a particle each iteration (0.0–1.0).
    pub correction_rate: f64,

    /// Whether to evaluate particles in parallel using rayon.
    ///
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            swarm_size: 100,
            max_iterations: 100,
            resample_probability: 0.1,
            use_correction: true,
            correction_rate: 0.001,
            parallel: true,
            seed: None,
        }
    }
}

impl SwarmConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the per-field resampling probability.
    pub fn with_resample_probability(mut self, p: f64) -> Self {
        self.resample_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_correction(mut self, enabled: bool) -> Self {
        self.use_correction = enabled;
        self
    }

    pub fn with_correction_rate(mut self, rate: f64) -> Self {
        self.correction_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.swarm_size == 0 {
            return Err("swarm_size must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.resample_probability) {
            return Err("resample_probability must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.correction_rate) {
            return Err("correction_rate must be within [0, 1]".into());
        }
        Ok(())
    }
}
