// 🎮 Care Actions - fixed catalog of seven actions with fixed stat deltas
//
// The resolver is pure on its input pet and assumes the cost has already
// been authorized; affordability, currency debit and the ledger append all
// live in the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pet::{clamp_stat, Pet};

// ============================================================================
// ACTION CATALOG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Feed,
    Play,
    Rest,
    Clean,
    Vet,
    Toy,
    Treat,
}

impl Action {
    /// Catalog order, as presented to the player.
    pub const ALL: [Action; 7] = [
        Action::Feed,
        Action::Play,
        Action::Rest,
        Action::Clean,
        Action::Vet,
        Action::Toy,
        Action::Treat,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::Play => "play",
            Action::Rest => "rest",
            Action::Clean => "clean",
            Action::Vet => "vet",
            Action::Toy => "toy",
            Action::Treat => "treat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Feed => "Feed",
            Action::Play => "Play",
            Action::Rest => "Rest",
            Action::Clean => "Clean",
            Action::Vet => "Vet Visit",
            Action::Toy => "Buy Toy",
            Action::Treat => "Give Treat",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Action::Feed => "🍖",
            Action::Play => "🎾",
            Action::Rest => "😴",
            Action::Clean => "🫧",
            Action::Vet => "🏥",
            Action::Toy => "🧸",
            Action::Treat => "🍪",
        }
    }

    pub fn cost(&self) -> f64 {
        match self {
            Action::Feed => 5.0,
            Action::Play => 3.0,
            Action::Rest => 0.0,
            Action::Clean => 4.0,
            Action::Vet => 25.0,
            Action::Toy => 15.0,
            Action::Treat => 8.0,
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Action::Feed => "Give your pet food",
            Action::Play => "Play with your pet",
            Action::Rest => "Let your pet sleep",
            Action::Clean => "Give your pet a bath",
            Action::Vet => "Take to the vet",
            Action::Toy => "Purchase a new toy",
            Action::Treat => "Special treat",
        }
    }

    pub fn is_free(&self) -> bool {
        self.cost() == 0.0
    }
}

// ============================================================================
// ACTION RESOLVER
// ============================================================================

/// Experience granted by every action, paid or free.
pub const EXPERIENCE_PER_ACTION: u32 = 10;

/// Apply an action's stat deltas to a copy of the pet, clamp every touched
/// stat to [0,100], refresh the relevant care timestamp, then grant
/// experience and recompute progression.
pub fn apply_action(pet: &Pet, action: Action, now: DateTime<Utc>) -> Pet {
    let mut updated = pet.clone();

    match action {
        Action::Feed => {
            updated.hunger = clamp_stat(updated.hunger + 30.0);
            updated.health = clamp_stat(updated.health + 5.0);
            updated.last_fed = now;
        }
        Action::Play => {
            updated.happiness = clamp_stat(updated.happiness + 25.0);
            updated.energy = clamp_stat(updated.energy - 15.0);
            updated.hunger = clamp_stat(updated.hunger - 10.0);
            updated.last_played = now;
        }
        Action::Rest => {
            updated.energy = clamp_stat(updated.energy + 40.0);
            updated.health = clamp_stat(updated.health + 10.0);
        }
        Action::Clean => {
            updated.hygiene = clamp_stat(updated.hygiene + 35.0);
            updated.happiness = clamp_stat(updated.happiness + 10.0);
            updated.last_cleaned = now;
        }
        Action::Vet => {
            // Absolute set, not a delta
            updated.health = 100.0;
            updated.happiness = clamp_stat(updated.happiness - 10.0);
        }
        Action::Toy => {
            updated.happiness = clamp_stat(updated.happiness + 30.0);
            updated.energy = clamp_stat(updated.energy - 10.0);
            updated.last_played = now;
        }
        Action::Treat => {
            updated.happiness = clamp_stat(updated.happiness + 20.0);
            updated.hunger = clamp_stat(updated.hunger + 15.0);
            updated.last_fed = now;
        }
    }

    updated.gain_experience(EXPERIENCE_PER_ACTION);
    updated
}

// ============================================================================
// TESTS
// ============================================================================
