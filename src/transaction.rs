//! Transaction records flowing through the round-up pipeline.
//!
//! Every record is a request-scoped value: it is deserialized from the
//! request, transformed, and serialized into the response.

use crate::amount::Amount;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Raw transaction as received: a timestamp and a signed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "crate::timestamp")]
    pub date: NaiveDateTime,

    pub amount: Amount,
}

impl Transaction {
    pub fn new(date: NaiveDateTime, amount: Amount) -> Self {
        Transaction { date, amount }
    }
}

/// A transaction with its round-up computed.
///
/// # Invariants
///
/// For a parsed transaction with `amount > 0`, `ceiling` is the smallest
/// multiple of 100 not below `amount` and `0 <= remanent < 100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    #[serde(with = "crate::timestamp")]
    pub date: NaiveDateTime,

    pub amount: Amount,

    /// Next multiple of 100 at or above `amount`.
    #[serde(default)]
    pub ceiling: Amount,

    /// Round-up contribution: `ceiling - amount`.
    #[serde(default)]
    pub remanent: Amount,
}

impl ParsedTransaction {
    /// Computes ceiling and remanent for a raw transaction.
    ///
    /// Non-positive amounts are computed the same way; validation is what
    /// rejects them.
    pub fn from_transaction(tx: &Transaction) -> Self {
        let ceiling = tx.amount.round_up_to_hundred();
        ParsedTransaction {
            date: tx.date,
            amount: tx.amount,
            ceiling,
            remanent: ceiling - tx.amount,
        }
    }
}

/// A transaction after the Q/P/K window rules have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredTransaction {
    #[serde(with = "crate::timestamp")]
    pub date: NaiveDateTime,

    /// Original amount, never modified by window rules.
    pub amount: Amount,

    #[serde(default)]
    pub ceiling: Amount,

    #[serde(default)]
    pub remanent: Amount,

    /// Whether the date falls inside at least one K window.
    #[serde(rename = "inKPeriod", default)]
    pub in_k_period: bool,
}

impl FilteredTransaction {
    /// Record emitted for a non-positive amount: no round-up, no window rules.
    pub fn unrounded(tx: &Transaction) -> Self {
        FilteredTransaction {
            date: tx.date,
            amount: tx.amount,
            ceiling: Amount::ZERO,
            remanent: Amount::ZERO,
            in_k_period: false,
        }
    }
}

/// Why validation rejected a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// `amount <= 0`.
    NonPositiveAmount,

    /// `amount > wage`.
    ExceedsWage,

    /// Same `(date, amount)` as a transaction already accepted in this pass.
    Duplicate,
}

impl InvalidReason {
    /// The fixed message emitted for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            InvalidReason::NonPositiveAmount => "Negative or zero amount is not allowed",
            InvalidReason::ExceedsWage => "Amount exceeds wage",
            InvalidReason::Duplicate => "Duplicate transaction",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for InvalidReason {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.message())
    }
}

/// A transaction rejected by validation.
///
/// Zero-valued numeric fields are left out of the serialized form, so a
/// rejected non-positive amount from the filter path carries only its date,
/// its amount (when non-zero) and the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidTransaction {
    #[serde(with = "crate::timestamp")]
    pub date: NaiveDateTime,

    #[serde(skip_serializing_if = "Amount::is_zero")]
    pub amount: Amount,

    #[serde(skip_serializing_if = "Amount::is_zero")]
    pub ceiling: Amount,

    #[serde(skip_serializing_if = "Amount::is_zero")]
    pub remanent: Amount,

    #[serde(rename = "message")]
    pub reason: InvalidReason,
}
