// Pocket Pet - Core Library
// Exposes all modules for use in the TUI binary and tests

pub mod actions;
pub mod clock;
pub mod decay;
pub mod ledger;
pub mod mood;
pub mod pet;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use actions::{apply_action, Action, EXPERIENCE_PER_ACTION};
pub use clock::{Clock, ManualClock, SystemClock};
pub use decay::{apply_decay, elapsed_minutes};
pub use ledger::{InsufficientFunds, Ledger, Transaction, Wallet, LEDGER_CAP};
pub use mood::{classify, Mood, PetState, Tone};
pub use pet::{clamp_stat, level_for_experience, stage_for_level, Pet, PetStage, PetType};
pub use session::{SavedSession, Session, SessionError, STARTING_BALANCE, TICK};
pub use store::SaveFile;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
