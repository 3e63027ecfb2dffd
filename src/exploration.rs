use rand::Rng;

use crate::decay::Decay;

/// Exploration policy result
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Invoke epsilon greedy policy for the current episode
    ///
    /// The random source is injected so that seeded runs reproduce exactly.
    /// One draw is consumed per call regardless of the outcome.
    pub fn choose(&self, rng: &mut impl Rng, episode: u32) -> Choice {
        let epsilon = self.epsilon.evaluate(episode as f64);
        if rng.gen::<f64>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}
