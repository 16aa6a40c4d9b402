// ⏳ Needs Decay - stats drop as wall-clock minutes pass
//
// Decay only ever runs over whole elapsed minutes; the sub-minute remainder
// is the caller's to carry forward (see Session::tick).

use chrono::{DateTime, Utc};

use crate::pet::Pet;

// ============================================================================
// DECAY RATES (per minute)
// ============================================================================

pub const HUNGER_RATE: f64 = 0.5;
pub const HAPPINESS_RATE: f64 = 0.3;
pub const ENERGY_RATE: f64 = 0.2;
pub const HYGIENE_RATE: f64 = 0.25;
pub const HEALTH_RATE: f64 = 0.1;

// ============================================================================
// DECAY ENGINE
// ============================================================================

/// Whole minutes elapsed between two instants: floor(ms / 60000).
/// Negative elapsed time (clock skew) counts as zero, never negative decay.
pub fn elapsed_minutes(last_update: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = now.signed_duration_since(last_update).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        millis / 60_000
    }
}

/// Return a copy of the pet with every stat reduced by rate * minutes,
/// floored at 0. Zero (or negative) minutes is an exact no-op.
/// Health never regenerates here; only action effects raise it.
pub fn apply_decay(pet: &Pet, minutes: i64) -> Pet {
    if minutes <= 0 {
        return pet.clone();
    }

    let m = minutes as f64;
    let mut decayed = pet.clone();
    decayed.hunger = (pet.hunger - HUNGER_RATE * m).max(0.0);
    decayed.happiness = (pet.happiness - HAPPINESS_RATE * m).max(0.0);
    decayed.energy = (pet.energy - ENERGY_RATE * m).max(0.0);
    decayed.hygiene = (pet.hygiene - HYGIENE_RATE * m).max(0.0);
    decayed.health = (pet.health - HEALTH_RATE * m).max(0.0);
    decayed
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::PetType;
    use chrono::{Duration, TimeZone};

    const EPSILON: f64 = 1e-9;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn test_pet() -> Pet {
        Pet::new("Biscuit".to_string(), PetType::Dog, t0())
    }

    #[test]
    fn test_elapsed_minutes_floors() {
        assert_eq!(elapsed_minutes(t0(), t0()), 0);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(59)), 0);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(60)), 1);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(119)), 1);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::minutes(90)), 90);
    }

    #[test]
    fn test_elapsed_minutes_clock_skew_is_zero() {
        // last_update in the future must never produce negative decay
        assert_eq!(elapsed_minutes(t0() + Duration::minutes(10), t0()), 0);
    }

    #[test]
    fn test_zero_minutes_is_exact_noop() {
        let pet = test_pet();
        let updated = apply_decay(&pet, 0);
        assert_eq!(updated, pet);
    }

    #[test]
    fn test_decay_rates_applied_per_minute() {
        let pet = test_pet();
        let updated = apply_decay(&pet, 10);

        assert!((updated.hunger - 95.0).abs() < EPSILON);
        assert!((updated.happiness - 97.0).abs() < EPSILON);
        assert!((updated.energy - 98.0).abs() < EPSILON);
        assert!((updated.hygiene - 97.5).abs() < EPSILON);
        assert!((updated.health - 99.0).abs() < EPSILON);
    }

    #[test]
    fn test_decay_never_increases_stats() {
        let mut pet = test_pet();
        pet.hunger = 40.0;
        pet.happiness = 3.0;
        pet.energy = 0.0;
        pet.hygiene = 12.5;
        pet.health = 77.0;

        let updated = apply_decay(&pet, 30);

        assert!(updated.hunger <= pet.hunger);
        assert!(updated.happiness <= pet.happiness);
        assert!(updated.energy <= pet.energy);
        assert!(updated.hygiene <= pet.hygiene);
        assert!(updated.health <= pet.health);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let mut pet = test_pet();
        pet.hunger = 1.0;

        // 0.5/min * 1000 min would be -499 without the floor
        let updated = apply_decay(&pet, 1000);

        assert_eq!(updated.hunger, 0.0);
        assert_eq!(updated.happiness, 0.0);
        assert_eq!(updated.energy, 0.0);
        assert_eq!(updated.hygiene, 0.0);
        assert_eq!(updated.health, 0.0);
    }

    #[test]
    fn test_decay_linearity() {
        // Decaying 2Δ in one step equals decaying Δ twice in sequence
        let pet = test_pet();

        let one_step = apply_decay(&pet, 14);
        let two_steps = apply_decay(&apply_decay(&pet, 7), 7);

        assert!((one_step.hunger - two_steps.hunger).abs() < EPSILON);
        assert!((one_step.happiness - two_steps.happiness).abs() < EPSILON);
        assert!((one_step.energy - two_steps.energy).abs() < EPSILON);
        assert!((one_step.hygiene - two_steps.hygiene).abs() < EPSILON);
        assert!((one_step.health - two_steps.health).abs() < EPSILON);
    }

    #[test]
    fn test_decay_leaves_non_stat_fields_alone() {
        let mut pet = test_pet();
        pet.experience = 120;
        pet.level = 2;

        let updated = apply_decay(&pet, 5);

        assert_eq!(updated.name, pet.name);
        assert_eq!(updated.species, pet.species);
        assert_eq!(updated.level, 2);
        assert_eq!(updated.experience, 120);
        assert_eq!(updated.created_at, pet.created_at);
    }
}
