//! Request and response bodies of the pipeline operations.

use crate::amount::Amount;
use crate::transaction::{FilteredTransaction, InvalidTransaction, ParsedTransaction, Transaction};
use crate::window::{KWindow, PWindow, QWindow};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of a validate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub transactions: Vec<ParsedTransaction>,

    /// Upper bound for a single valid transaction amount.
    pub wage: Amount,
}

/// Window-adjusted transactions handed from the filter step to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValidationRequest {
    pub transactions: Vec<FilteredTransaction>,
    pub wage: Amount,
}

/// Body of a filter request.
///
/// Window lists may be omitted or `null`; both mean "no windows".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub q: Vec<QWindow>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub p: Vec<PWindow>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub k: Vec<KWindow>,

    pub wage: Amount,

    pub transactions: Vec<Transaction>,
}

/// Result of a validation pass: two buckets in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome<T> {
    pub valid: Vec<T>,
    pub invalid: Vec<InvalidTransaction>,
}

impl<T> ValidationOutcome<T> {
    pub fn new() -> Self {
        ValidationOutcome {
            valid: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Total number of classified records.
    pub fn len(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }
}

impl<T> Default for ValidationOutcome<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
