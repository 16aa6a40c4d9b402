// 🏠 Session - the single owner of pet, wallet, ledger and last-update marker
//
// Every mutation is a synchronous read-modify-write in response to one
// discrete event: a care action, an earning, a timer tick, or resume at
// load. Paid actions are all-or-nothing: the debit is the only failure
// point and happens before anything else changes.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::actions::{apply_action, Action};
use crate::decay::{apply_decay, elapsed_minutes};
use crate::ledger::{Ledger, Transaction, Wallet};
use crate::mood::{classify, PetState};
use crate::pet::{Pet, PetType};

/// Fixed period of the host's decay timer.
pub const TICK: std::time::Duration = std::time::Duration::from_secs(60);

/// Currency a brand-new session starts with.
pub const STARTING_BALANCE: f64 = 100.0;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    InsufficientFunds { cost: f64, balance: f64 },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InsufficientFunds { cost, balance } => write!(
                f,
                "Not enough money! Need ${:.2}, have ${:.2}",
                cost, balance
            ),
        }
    }
}

impl std::error::Error for SessionError {}

// ============================================================================
// SAVED SESSION (what the storage layer hands back at load)
// ============================================================================

#[derive(Debug, Clone)]
pub struct SavedSession {
    pub pet: Pet,
    pub balance: f64,
    pub ledger: Ledger,
    /// Missing marker (first save was interrupted, or blob malformed)
    /// means "no time passed": resume from now.
    pub last_update: Option<DateTime<Utc>>,
}

// ============================================================================
// SESSION
// ============================================================================

pub struct Session {
    pet: Pet,
    wallet: Wallet,
    ledger: Ledger,
    last_update: DateTime<Utc>,
}

impl Session {
    /// First-run setup: newborn pet, starting balance, empty ledger.
    pub fn new(name: &str, species: PetType, now: DateTime<Utc>) -> Self {
        Session {
            pet: Pet::new(name.to_string(), species, now),
            wallet: Wallet::new(STARTING_BALANCE),
            ledger: Ledger::new(),
            last_update: now,
        }
    }

    /// Resume a persisted session, applying decay for the entire wall-clock
    /// gap since the saved marker in one step. The marker advances by the
    /// whole minutes consumed, so the sub-minute remainder carries forward
    /// into the next tick instead of being discarded.
    pub fn resume(saved: SavedSession, now: DateTime<Utc>) -> Self {
        let last = saved.last_update.unwrap_or(now).min(now);
        let minutes = elapsed_minutes(last, now);

        Session {
            pet: apply_decay(&saved.pet, minutes),
            wallet: Wallet::new(saved.balance),
            ledger: saved.ledger,
            last_update: last + Duration::minutes(minutes),
        }
    }

    /// Timer-tick entry point. Decays over the whole minutes elapsed since
    /// the marker; returns whether anything changed. Safe to call on any
    /// cadence - under a minute of elapsed time it is a no-op.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let minutes = elapsed_minutes(self.last_update, now);
        if minutes == 0 {
            return false;
        }

        self.pet = apply_decay(&self.pet, minutes);
        self.last_update = self.last_update + Duration::minutes(minutes);
        true
    }

    /// Perform a care action. Paid actions debit the wallet and append one
    /// negative ledger entry atomically with the pet update; free actions
    /// touch neither wallet nor ledger. On refusal nothing mutates.
    pub fn perform(&mut self, action: Action, now: DateTime<Utc>) -> Result<(), SessionError> {
        let cost = action.cost();
        if cost > 0.0 {
            self.wallet
                .debit(cost)
                .map_err(|e| SessionError::InsufficientFunds {
                    cost: e.cost,
                    balance: e.balance,
                })?;
            self.ledger.record(Transaction::new(action.label(), -cost, now));
        }

        self.pet = apply_action(&self.pet, action, now);
        Ok(())
    }

    /// Credit an earning from a mini-activity and record it in the ledger.
    pub fn earn(&mut self, amount: f64, description: &str, now: DateTime<Utc>) {
        self.wallet.credit(amount);
        self.ledger.record(Transaction::new(description, amount, now));
    }

    /// Derived display state, recomputed on every read.
    pub fn state(&self) -> PetState {
        classify(&self.pet)
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn balance(&self) -> f64 {
        self.wallet.balance()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::mood::Mood;
    use chrono::TimeZone;

    const EPSILON: f64 = 1e-9;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn saved_with_balance(balance: f64, last_update: DateTime<Utc>) -> SavedSession {
        SavedSession {
            pet: Pet::new("Biscuit".to_string(), PetType::Dog, last_update),
            balance,
            ledger: Ledger::new(),
            last_update: Some(last_update),
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new("Biscuit", PetType::Dog, t0());

        assert_eq!(session.balance(), STARTING_BALANCE);
        assert!(session.ledger().is_empty());
        assert_eq!(session.last_update(), t0());
        assert_eq!(session.pet().level, 1);
    }

    #[test]
    fn test_paid_action_debits_and_records() {
        let mut session = Session::new("Biscuit", PetType::Dog, t0());

        session.perform(Action::Feed, t0()).unwrap();

        assert_eq!(session.balance(), 95.0);
        assert_eq!(session.ledger().len(), 1);

        let entry = &session.ledger().entries()[0];
        assert_eq!(entry.description, "Feed");
        assert_eq!(entry.amount, -5.0);
        assert_eq!(session.pet().experience, 10);
    }

    #[test]
    fn test_free_action_leaves_wallet_and_ledger_alone() {
        let mut session = Session::new("Biscuit", PetType::Dog, t0());

        session.perform(Action::Rest, t0()).unwrap();

        assert_eq!(session.balance(), STARTING_BALANCE);
        assert!(session.ledger().is_empty());
        assert_eq!(session.pet().experience, 10);
    }

    #[test]
    fn test_unaffordable_action_rejected_without_mutation() {
        let mut session = Session::resume(saved_with_balance(20.0, t0()), t0());
        let stats_before = session.pet().clone();

        let err = session.perform(Action::Vet, t0()).unwrap_err();

        assert_eq!(
            err,
            SessionError::InsufficientFunds {
                cost: 25.0,
                balance: 20.0
            }
        );
        assert_eq!(session.balance(), 20.0);
        assert!(session.ledger().is_empty());
        assert_eq!(*session.pet(), stats_before);
    }

    #[test]
    fn test_earn_credits_and_records() {
        let mut session = Session::new("Biscuit", PetType::Dog, t0());

        session.earn(15.0, "Washed the car", t0());

        assert_eq!(session.balance(), 115.0);
        let entry = &session.ledger().entries()[0];
        assert_eq!(entry.description, "Washed the car");
        assert_eq!(entry.amount, 15.0);
    }

    #[test]
    fn test_tick_under_a_minute_is_noop() {
        let clock = ManualClock::new(t0());
        let mut session = Session::new("Biscuit", PetType::Dog, clock.now());

        clock.advance(Duration::seconds(59));
        assert!(!session.tick(clock.now()));
        assert_eq!(session.pet().hunger, 100.0);
        assert_eq!(session.last_update(), t0());
    }

    #[test]
    fn test_tick_carries_subminute_remainder_forward() {
        let clock = ManualClock::new(t0());
        let mut session = Session::new("Biscuit", PetType::Dog, clock.now());

        // 90s in: one whole minute decays, marker advances to t0+60s
        clock.advance(Duration::seconds(90));
        assert!(session.tick(clock.now()));
        assert!((session.pet().hunger - 99.5).abs() < EPSILON);
        assert_eq!(session.last_update(), t0() + Duration::seconds(60));

        // 30s later the carried remainder completes a second minute
        clock.advance(Duration::seconds(30));
        assert!(session.tick(clock.now()));
        assert!((session.pet().hunger - 99.0).abs() < EPSILON);
        assert_eq!(session.last_update(), t0() + Duration::seconds(120));
    }

    #[test]
    fn test_resume_applies_whole_gap_in_one_step() {
        let away = Duration::hours(2);
        let session = Session::resume(saved_with_balance(100.0, t0()), t0() + away);

        // 120 minutes of decay applied at once
        assert!((session.pet().hunger - 40.0).abs() < EPSILON);
        assert!((session.pet().happiness - 64.0).abs() < EPSILON);
        assert_eq!(session.last_update(), t0() + away);
    }

    #[test]
    fn test_resume_with_future_marker_decays_nothing() {
        let mut saved = saved_with_balance(100.0, t0());
        saved.last_update = Some(t0() + Duration::hours(1));

        let session = Session::resume(saved, t0());

        assert_eq!(session.pet().hunger, 100.0);
        // Marker clamped back so decay resumes immediately
        assert_eq!(session.last_update(), t0());
    }

    #[test]
    fn test_resume_without_marker_starts_from_now() {
        let mut saved = saved_with_balance(100.0, t0());
        saved.last_update = None;

        let session = Session::resume(saved, t0() + Duration::hours(5));

        assert_eq!(session.pet().hunger, 100.0);
        assert_eq!(session.last_update(), t0() + Duration::hours(5));
    }

    #[test]
    fn test_long_neglect_makes_pet_sick() {
        // 12 hours away: health 100 - 0.1*720 = 28 -> sick wins the cascade
        let session = Session::resume(saved_with_balance(100.0, t0()), t0() + Duration::hours(12));
        assert_eq!(session.state().mood, Mood::Sick);
    }
}
