//! Round-up pipeline: parse, validate, and filter-then-validate.
//!
//! All operations are pure functions over their inputs. Records are processed
//! strictly in input order, and that order is preserved in every output.

use crate::amount::Amount;
use crate::request::{FilterRequest, FilterValidationRequest, ValidationOutcome, ValidationRequest};
use crate::transaction::{
    FilteredTransaction, InvalidReason, InvalidTransaction, ParsedTransaction, Transaction,
};
use crate::window::{in_any_k_window, select_q_window, total_p_extra};
use chrono::NaiveDateTime;
use log::{debug, info};
use std::collections::HashSet;

/// Accessors validation needs from a record.
pub trait Classify {
    fn date(&self) -> NaiveDateTime;
    fn amount(&self) -> Amount;

    /// Builds the rejected form of this record.
    fn reject(&self, reason: InvalidReason) -> InvalidTransaction;
}

impl Classify for ParsedTransaction {
    fn date(&self) -> NaiveDateTime {
        self.date
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn reject(&self, reason: InvalidReason) -> InvalidTransaction {
        InvalidTransaction {
            date: self.date,
            amount: self.amount,
            ceiling: self.ceiling,
            remanent: self.remanent,
            reason,
        }
    }
}

impl Classify for FilteredTransaction {
    fn date(&self) -> NaiveDateTime {
        self.date
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn reject(&self, reason: InvalidReason) -> InvalidTransaction {
        InvalidTransaction {
            date: self.date,
            amount: self.amount,
            ceiling: self.ceiling,
            remanent: self.remanent,
            reason,
        }
    }
}

/// Computes ceiling and remanent for every transaction, one output per input.
pub fn parse(transactions: &[Transaction]) -> Vec<ParsedTransaction> {
    let parsed: Vec<_> = transactions
        .iter()
        .map(ParsedTransaction::from_transaction)
        .collect();
    info!("Parsed {} transactions", parsed.len());
    parsed
}

/// Validates transactions produced by [`parse`].
pub fn validate_parsed(request: ValidationRequest) -> ValidationOutcome<ParsedTransaction> {
    validate(request.wage, request.transactions)
}

/// Validates window-adjusted transactions, keeping their `inKPeriod` flag.
pub fn validate_filtered(
    request: FilterValidationRequest,
) -> ValidationOutcome<FilteredTransaction> {
    validate(request.wage, request.transactions)
}

/// Applies the Q, P and K window rules, then validates the survivors.
///
/// Transactions matched by a Q window whose `fixed` is zero are absent from
/// both buckets of the result.
pub fn filter_and_validate(request: FilterRequest) -> ValidationOutcome<FilteredTransaction> {
    let transactions = apply_windows(&request);
    validate_filtered(FilterValidationRequest {
        transactions,
        wage: request.wage,
    })
}

/// Applies the window rules to every transaction of a filter request.
///
/// Non-positive amounts skip the rules and carry zero ceiling and remanent so
/// that validation rejects them later.
pub fn apply_windows(request: &FilterRequest) -> Vec<FilteredTransaction> {
    let mut adjusted = Vec::with_capacity(request.transactions.len());

    for (idx, tx) in request.transactions.iter().enumerate() {
        if !tx.amount.is_positive() {
            adjusted.push(FilteredTransaction::unrounded(tx));
            continue;
        }

        let mut ceiling = tx.amount.round_up_to_hundred();
        let mut remanent = ceiling - tx.amount;

        if let Some(q) = select_q_window(&request.q, tx.date) {
            if q.fixed.is_zero() {
                debug!(
                    "Transaction {}: dropped by zero fixed Q window starting {}",
                    idx, q.start
                );
                continue;
            }
            remanent = q.fixed;
            ceiling = tx.amount + q.fixed;
        }

        remanent += total_p_extra(&request.p, tx.date);

        adjusted.push(FilteredTransaction {
            date: tx.date,
            amount: tx.amount,
            ceiling,
            remanent,
            in_k_period: in_any_k_window(&request.k, tx.date),
        });
    }

    adjusted
}

/// Classifies records into valid and invalid buckets.
///
/// Rules are checked in priority order and the first match wins:
/// non-positive amount, amount above wage, then `(date, amount)` already
/// accepted earlier in this pass.
fn validate<T: Classify>(wage: Amount, records: Vec<T>) -> ValidationOutcome<T> {
    let mut outcome = ValidationOutcome::new();
    let mut accepted: HashSet<(NaiveDateTime, Amount)> = HashSet::new();

    for (idx, record) in records.into_iter().enumerate() {
        let key = (record.date(), record.amount());

        let reason = if !key.1.is_positive() {
            Some(InvalidReason::NonPositiveAmount)
        } else if key.1 > wage {
            Some(InvalidReason::ExceedsWage)
        } else if accepted.contains(&key) {
            Some(InvalidReason::Duplicate)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!("Transaction {}: rejected, {}", idx, reason);
                outcome.invalid.push(record.reject(reason));
            }
            None => {
                accepted.insert(key);
                outcome.valid.push(record);
            }
        }
    }

    info!(
        "Validated {} transactions: {} valid, {} invalid",
        outcome.len(),
        outcome.valid.len(),
        outcome.invalid.len()
    );

    outcome
}
