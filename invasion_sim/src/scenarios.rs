//! Randomly generated worlds for stress runs.

use invasion_core::Direction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Limits for generated worlds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWorldConfig {
    /// Upper bound on city count (at least one city is generated)
    pub max_cities: usize,

    /// Upper bound on alien count (at least one alien is requested)
    pub max_agents: usize,

    /// Probability that a given direction of a city gets a link
    pub link_probability: f64,
}

impl Default for RandomWorldConfig {
    fn default() -> Self {
        Self {
            max_cities: 10,
            max_agents: 4,
            link_probability: 0.5,
        }
    }
}

/// A generated world definition plus the number of aliens to drop on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWorld {
    /// Seed the world was generated from
    pub seed: u64,

    /// Number of aliens to deploy
    pub agents: usize,

    /// City names, in generation order
    pub cities: Vec<String>,

    /// World definition in the input notation
    pub text: String,
}

impl RandomWorld {
    /// Generates a world from `seed`.
    ///
    /// City names are random letter strings; links may point back at their
    /// source and two names may collide, both of which the engine must handle.
    pub fn generate(seed: u64, config: &RandomWorldConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let city_count = rng.gen_range(1..=config.max_cities.max(1));
        let agents = rng.gen_range(1..=config.max_agents.max(1));

        let cities: Vec<String> = (0..city_count).map(|_| random_name(&mut rng)).collect();

        let mut lines = Vec::with_capacity(city_count);
        for source in &cities {
            let mut line = source.clone();
            for direction in Direction::ALL {
                if rng.gen_bool(config.link_probability.clamp(0.0, 1.0)) {
                    let target = &cities[rng.gen_range(0..cities.len())];
                    line.push_str(&format!(" {}={}", direction, target));
                }
            }
            lines.push(line);
        }

        Self {
            seed,
            agents,
            cities,
            text: lines.join("\n"),
        }
    }
}

fn random_name(rng: &mut ChaCha8Rng) -> String {
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let len = rng.gen_range(1..=5);
    (0..len)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}
