//! Seeded train/test splitter

/// Train/test splitter with a fixed test fraction
///
/// Shuffles sample indices with a seeded LCG so the same seed always yields
/// the same partition for a given sample count.
#[derive(Clone, Debug)]
pub struct TrainTestSplit {
    test_fraction: f64,
    seed: u64,
}

impl TrainTestSplit {
    /// Create a splitter reserving `test_fraction` of samples for testing
    pub fn new(test_fraction: f64) -> Self {
        Self {
            test_fraction,
            seed: 42,
        }
    }

    /// Set random seed for shuffling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate (train, test) index partitions for `n_samples` samples
    ///
    /// The test partition holds `ceil(n_samples * test_fraction)` indices.
    pub fn split(&self, n_samples: usize) -> (Vec<usize>, Vec<usize>) {
        let mut indices: Vec<usize> = (0..n_samples).collect();

        // LCG-based shuffle for reproducibility
        let mut rng_state = self.seed;
        for i in (1..n_samples).rev() {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let j = (rng_state >> 33) as usize % (i + 1);
            indices.swap(i, j);
        }

        let n_test = ((n_samples as f64) * self.test_fraction).ceil() as usize;
        let n_test = n_test.min(n_samples);

        let test_indices = indices[..n_test].to_vec();
        let train_indices = indices[n_test..].to_vec();
        (train_indices, test_indices)
    }
}
