// 🎭 Mood Classifier - derive a display state from the current stat vector
//
// Fixed rules evaluated in strict priority order, first match wins.
// Survival-critical conditions (health) mask cosmetic ones, so the ordering
// is part of the contract, not an implementation detail.

use serde::{Deserialize, Serialize};

use crate::pet::Pet;

// ============================================================================
// MOOD & TONE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Sick,
    Energetic,
    Tired,
    Hungry,
    Dirty,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Sick => "sick",
            Mood::Energetic => "energetic",
            Mood::Tired => "tired",
            Mood::Hungry => "hungry",
            Mood::Dirty => "dirty",
        }
    }
}

/// Color tag the presentation layer maps onto its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Critical,
    Warning,
    Muted,
    Info,
    Positive,
}

// ============================================================================
// PET STATE (derived, never persisted)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetState {
    pub mood: Mood,
    pub emoji: &'static str,
    pub message: String,
    pub tone: Tone,
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Classify the pet's current state. Thresholds are strict comparisons:
/// health=30 is NOT sick, health=29.9 is.
pub fn classify(pet: &Pet) -> PetState {
    let name = &pet.name;

    if pet.health < 30.0 {
        PetState {
            mood: Mood::Sick,
            emoji: "🤒",
            message: format!("{} is feeling sick and needs a vet visit!", name),
            tone: Tone::Critical,
        }
    } else if pet.hunger < 20.0 {
        PetState {
            mood: Mood::Hungry,
            emoji: "😋",
            message: format!("{} is very hungry!", name),
            tone: Tone::Warning,
        }
    } else if pet.hygiene < 25.0 {
        PetState {
            mood: Mood::Dirty,
            emoji: "🫧",
            message: format!("{} needs a bath!", name),
            tone: Tone::Muted,
        }
    } else if pet.energy < 20.0 {
        PetState {
            mood: Mood::Tired,
            emoji: "😴",
            message: format!("{} is exhausted and needs rest.", name),
            tone: Tone::Muted,
        }
    } else if pet.happiness < 30.0 {
        PetState {
            mood: Mood::Sad,
            emoji: "😢",
            message: format!("{} is feeling sad. Play with them!", name),
            tone: Tone::Info,
        }
    } else if pet.energy > 70.0 && pet.happiness > 70.0 {
        PetState {
            mood: Mood::Energetic,
            emoji: "🤩",
            message: format!("{} is full of energy and joy!", name),
            tone: Tone::Positive,
        }
    } else if pet.happiness > 60.0 && pet.health > 60.0 && pet.hunger > 50.0 {
        PetState {
            mood: Mood::Happy,
            emoji: "😊",
            message: format!("{} is happy and healthy!", name),
            tone: Tone::Positive,
        }
    } else {
        PetState {
            mood: Mood::Happy,
            emoji: "😊",
            message: format!("{} is doing great!", name),
            tone: Tone::Positive,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
