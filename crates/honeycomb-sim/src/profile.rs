//! Seeded dummy profiles.

use honeycomb_engine::ItemId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const NAMES: &[&str] = &[
    "Ada", "Bea", "Cal", "Dee", "Eli", "Fay", "Gus", "Hal", "Ivy", "Jo", "Kai", "Lou", "Max",
    "Nia", "Oto", "Pia", "Rex", "Sam", "Tess", "Uma", "Vic", "Wren", "Yan", "Zoe",
];

const TAGS: &[&str] = &[
    "climbing", "coffee", "jazz", "running", "board games", "cooking", "film", "hiking", "yoga",
    "photography",
];

/// One user shown on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ItemId,
    pub name: String,
    pub age: u8,
    pub distance_km: u32,
    pub tags: Vec<String>,
}

/// Deterministic profile source. Ids count up from zero.
#[derive(Debug, Clone)]
pub struct ProfileGenerator {
    rng: StdRng,
    next_id: u64,
}

impl ProfileGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    /// Number of profiles generated so far.
    pub fn generated(&self) -> u64 {
        self.next_id
    }

    pub fn next_profile(&mut self) -> Profile {
        let id = ItemId(self.next_id);
        self.next_id += 1;

        let name = NAMES.choose(&mut self.rng).copied().unwrap_or("Anon");
        let tags = TAGS
            .choose_multiple(&mut self.rng, 3)
            .map(|tag| tag.to_string())
            .collect();

        Profile {
            id,
            name: name.to_string(),
            age: self.rng.gen_range(18..=45),
            distance_km: self.rng.gen_range(1..=80),
            tags,
        }
    }

    pub fn page(&mut self, count: usize) -> Vec<Profile> {
        (0..count).map(|_| self.next_profile()).collect()
    }

    /// Roll for a simulated failure with probability `rate`.
    pub fn roll_failure(&mut self, rate: f64) -> bool {
        rate > 0.0 && self.rng.gen_bool(rate.min(1.0))
    }
}
