use rand::Rng;

/// Bernoulli draw: `u ~ Uniform(0, 1)`, occurred when `u < probability`.
pub struct OccurrenceSampler;

impl OccurrenceSampler {
    pub fn sample<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
        rng.random::<f64>() < probability
    }
}
