//! Built-in deterministic datasets
//!
//! Synthetic stand-ins for the classic iris and digits benchmarks, generated
//! from fixed seeds so repeated loads are bit-identical. Shapes match the
//! originals: iris is 150 samples x 4 features over 3 classes, digits is
//! 1797 samples x 64 features (8x8 intensity grids in 0..=16) over 10
//! classes.

use super::{Dataset, DatasetProvider};
use crate::error::Result;

/// Deterministic LCG over the unit interval
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0, 1)
    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 33) as f64 / (1u64 << 31) as f64
    }

    /// Roughly bell-shaped noise in (-1, 1), mean 0
    fn next_noise(&mut self) -> f64 {
        self.next_f64() + self.next_f64() - 1.0
    }
}

/// Iris-like dataset: 150 samples, 4 features, 3 classes
///
/// Three Gaussian-ish clusters around the class means of the classic iris
/// data (sepal length/width, petal length/width in cm).
#[derive(Clone, Copy, Debug, Default)]
pub struct IrisDataset;

/// Per-class feature means and spreads for the iris clusters
const IRIS_MEANS: [[f64; 4]; 3] = [
    [5.0, 3.4, 1.5, 0.2],
    [5.9, 2.8, 4.3, 1.3],
    [6.6, 3.0, 5.6, 2.0],
];
const IRIS_SPREADS: [[f64; 4]; 3] = [
    [0.35, 0.38, 0.17, 0.10],
    [0.52, 0.31, 0.47, 0.20],
    [0.64, 0.32, 0.55, 0.27],
];

impl DatasetProvider for IrisDataset {
    fn load(&self) -> Result<Dataset> {
        let mut rng = Lcg::new(0x4952_4953); // "IRIS"
        let mut features = Vec::with_capacity(150);
        let mut labels = Vec::with_capacity(150);

        for class in 0..3 {
            for _ in 0..50 {
                let row: Vec<f64> = (0..4)
                    .map(|f| {
                        let v = IRIS_MEANS[class][f] + rng.next_noise() * IRIS_SPREADS[class][f];
                        // keep measurements physical
                        (v.max(0.1) * 10.0).round() / 10.0
                    })
                    .collect();
                features.push(row);
                labels.push(class);
            }
        }

        Dataset::new(features, labels)
    }
}

/// Digits-like dataset: 1797 samples, 64 features, 10 classes
///
/// Each class has a fixed 8x8 prototype intensity grid; samples are the
/// prototype plus bounded noise, clamped to the 0..=16 intensity range.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigitsDataset;

impl DigitsDataset {
    /// Prototype intensity for class `class` at pixel `pixel`
    fn prototype(class: usize, pixel: usize) -> f64 {
        ((class + 1) * (pixel + 3) % 17) as f64
    }
}

impl DatasetProvider for DigitsDataset {
    fn load(&self) -> Result<Dataset> {
        let mut rng = Lcg::new(0x4449_4749); // "DIGI"
        let n_samples = 1797;
        let mut features = Vec::with_capacity(n_samples);
        let mut labels = Vec::with_capacity(n_samples);

        for i in 0..n_samples {
            let class = i % 10;
            let row: Vec<f64> = (0..64)
                .map(|pixel| {
                    let v = Self::prototype(class, pixel) + rng.next_noise() * 4.0;
                    v.clamp(0.0, 16.0).round()
                })
                .collect();
            features.push(row);
            labels.push(class);
        }

        Dataset::new(features, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iris_shape() {
        let ds = IrisDataset.load().unwrap();
        assert_eq!(ds.n_samples(), 150);
        assert_eq!(ds.n_features(), 4);
        assert_eq!(ds.n_classes(), 3);
    }

    #[test]
    fn test_iris_class_balance() {
        let ds = IrisDataset.load().unwrap();
        for class in 0..3 {
            let count = ds.labels().iter().filter(|&&l| l == class).count();
            assert_eq!(count, 50);
        }
    }

    #[test]
    fn test_iris_load_is_deterministic() {
        let a = IrisDataset.load().unwrap();
        let b = IrisDataset.load().unwrap();
        assert_eq!(a.features(), b.features());
        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn test_digits_shape() {
        let ds = DigitsDataset.load().unwrap();
        assert_eq!(ds.n_samples(), 1797);
        assert_eq!(ds.n_features(), 64);
        assert_eq!(ds.n_classes(), 10);
    }

    #[test]
    fn test_digits_intensity_range() {
        let ds = DigitsDataset.load().unwrap();
        for row in ds.features() {
            for &v in row {
                assert!((0.0..=16.0).contains(&v), "intensity {v} out of range");
            }
        }
    }

    #[test]
    fn test_digits_load_is_deterministic() {
        let a = DigitsDataset.load().unwrap();
        let b = DigitsDataset.load().unwrap();
        assert_eq!(a.features()[0], b.features()[0]);
        assert_eq!(a.features()[1796], b.features()[1796]);
    }
}
