//! Uniform random sampling over the search space (the exploratory hand).

use rand::Rng;
use th_types::{Hypothesis, SearchSpace};

/// Independent uniform sampling across every dimension of the search space.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    space: SearchSpace,
}

impl RandomSampler {
    pub fn new(space: SearchSpace) -> Self {
        Self { space }
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Draw one point with coordinate `i` uniform in `[low_i, high_i]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Hypothesis {
        self.space
            .bounds()
            .iter()
            .map(|b| rng.random_range(b.low..=b.high))
            .collect::<Vec<f64>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_space() -> SearchSpace {
        SearchSpace::from_ranges(&[(1.0, 120.0), (1.0, 180.0), (-0.5, 0.5)]).unwrap()
    }

    #[test]
    fn random_sampler_respects_bounds() {
        let sampler = RandomSampler::new(sample_space());
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..1_000 {
            let point = sampler.sample(&mut rng);
            assert_eq!(point.len(), 3);
            for (x, b) in point.iter().zip(sampler.space().bounds()) {
                assert!(*x >= b.low && *x <= b.high, "{x} outside [{}, {}]", b.low, b.high);
            }
        }
    }

    #[test]
    fn degenerate_dimension_returns_its_value() {
        let space = SearchSpace::from_ranges(&[(3.0, 3.0), (0.0, 1.0)]).unwrap();
        let sampler = RandomSampler::new(space);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..20 {
            assert_eq!(sampler.sample(&mut rng)[0], 3.0);
        }
    }

    #[test]
    fn same_seed_same_points() {
        let sampler = RandomSampler::new(sample_space());
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }

    #[test]
    fn samples_cover_the_range() {
        let space = SearchSpace::from_ranges(&[(0.0, 1.0)]).unwrap();
        let sampler = RandomSampler::new(space);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let points: Vec<f64> = (0..500).map(|_| sampler.sample(&mut rng)[0]).collect();
        assert!(points.iter().any(|x| *x < 0.1));
        assert!(points.iter().any(|x| *x > 0.9));
    }

    #[test]
    fn widest_accepted_space_samples_finite_points() {
        let space = SearchSpace::from_ranges(&[(-1e307, 1e307)]).unwrap();
        let sampler = RandomSampler::new(space);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let point = sampler.sample(&mut rng);
            assert!(point.is_finite());
            assert!(sampler.space().contains(&point));
        }
    }
}
