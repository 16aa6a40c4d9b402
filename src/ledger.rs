// 💰 Wallet & Transaction Ledger
//
// Transactions are immutable values with UUID identity; the ledger keeps
// only the 50 most recent, newest first. The wallet is the single currency
// balance, debited only after an affordability check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TRANSACTION
// ============================================================================

/// Maximum number of ledger entries retained (oldest evicted first).
pub const LEDGER_CAP: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identity (UUID) - never changes
    pub id: String,
    pub description: String,
    /// Signed: positive for earnings, negative for spending
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(description: &str, amount: f64, timestamp: DateTime<Utc>) -> Self {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.to_string(),
            amount,
            timestamp,
        }
    }
}

// ============================================================================
// LEDGER
// ============================================================================

/// Append-only transaction history, newest first, capped at [`LEDGER_CAP`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger { entries: Vec::new() }
    }

    /// Record a transaction at the head of the list, evicting the oldest
    /// entry once the cap is reached.
    pub fn record(&mut self, transaction: Transaction) {
        self.entries.insert(0, transaction);
        self.entries.truncate(LEDGER_CAP);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// WALLET
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsufficientFunds {
    pub cost: f64,
    pub balance: f64,
}

impl fmt::Display for InsufficientFunds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "not enough money: need ${:.2}, have ${:.2}",
            self.cost, self.balance
        )
    }
}

impl std::error::Error for InsufficientFunds {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wallet {
    balance: f64,
}

impl Wallet {
    pub fn new(balance: f64) -> Self {
        Wallet { balance }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }

    /// Debit the wallet, refusing (with no mutation) when the balance
    /// cannot cover the amount.
    pub fn debit(&mut self, amount: f64) -> Result<(), InsufficientFunds> {
        if amount > self.balance {
            return Err(InsufficientFunds {
                cost: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
