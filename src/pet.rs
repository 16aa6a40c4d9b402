// 🐾 Pet Entity - the one record the whole session revolves around
//
// Invariants:
// - all five stats always lie in [0,100]
// - stage is a pure function of level
// - level is a pure function of experience (never decreases)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SPECIES & STAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Rabbit,
    Hamster,
}

impl PetType {
    pub const ALL: [PetType; 4] = [PetType::Dog, PetType::Cat, PetType::Rabbit, PetType::Hamster];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "dog",
            PetType::Cat => "cat",
            PetType::Rabbit => "rabbit",
            PetType::Hamster => "hamster",
        }
    }
}

/// Growth stage, derived from level: <5 baby, <10 child, else adult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStage {
    Baby,
    Child,
    Adult,
}

impl PetStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStage::Baby => "baby",
            PetStage::Child => "child",
            PetStage::Adult => "adult",
        }
    }
}

// ============================================================================
// PROGRESSION HELPERS
// ============================================================================

/// Clamp a stat into the [0,100] range.
pub fn clamp_stat(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// level = floor(experience / 100) + 1
pub fn level_for_experience(experience: u32) -> u32 {
    experience / 100 + 1
}

pub fn stage_for_level(level: u32) -> PetStage {
    if level < 5 {
        PetStage::Baby
    } else if level < 10 {
        PetStage::Child
    } else {
        PetStage::Adult
    }
}

// ============================================================================
// PET RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub species: PetType,
    pub stage: PetStage,
    pub level: u32,
    pub experience: u32,

    // Core stats (0-100)
    pub hunger: f64,
    pub happiness: f64,
    pub health: f64,
    pub energy: f64,
    pub hygiene: f64,

    // Care timestamps
    pub created_at: DateTime<Utc>,
    pub last_fed: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
    pub last_cleaned: DateTime<Utc>,
}

impl Pet {
    /// Create a newborn pet: all stats full, level 1, no experience.
    pub fn new(name: String, species: PetType, now: DateTime<Utc>) -> Self {
        Pet {
            name,
            species,
            stage: PetStage::Baby,
            level: 1,
            experience: 0,
            hunger: 100.0,
            happiness: 100.0,
            health: 100.0,
            energy: 100.0,
            hygiene: 100.0,
            created_at: now,
            last_fed: now,
            last_played: now,
            last_cleaned: now,
        }
    }

    /// Display emoji for this species at its current growth stage.
    pub fn emoji(&self) -> &'static str {
        match (self.species, self.stage) {
            (PetType::Dog, _) => "🐕",
            (PetType::Cat, PetStage::Adult) => "🐈",
            (PetType::Cat, _) => "🐱",
            (PetType::Rabbit, PetStage::Adult) => "🐇",
            (PetType::Rabbit, _) => "🐰",
            (PetType::Hamster, _) => "🐹",
        }
    }

    /// Add experience and recompute progression. Level and stage only ever
    /// move forward.
    pub fn gain_experience(&mut self, amount: u32) {
        self.experience += amount;
        let new_level = level_for_experience(self.experience);
        if new_level > self.level {
            self.level = new_level;
            self.stage = stage_for_level(new_level);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
