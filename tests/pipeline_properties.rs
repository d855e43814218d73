//! Property-based tests for the round-up pipeline.
//!
//! 1. **Round-up range**: for `amount > 0`, `ceiling` is a multiple of 100
//!    and `0 <= remanent < 100`
//! 2. **Parse idempotence**: parsing the same batch twice gives equal output
//! 3. **Partition**: validation puts every record in exactly one bucket and
//!    keeps the input order inside each bucket
//! 4. **Totality**: amounts and window payloads anywhere in the `Decimal`
//!    range never abort the pipeline

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use roundup_engine::{pipeline, Amount, FilterRequest, PWindow, QWindow, Transaction, ValidationRequest};
use rust_decimal::Decimal;

fn base_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Amounts with two decimal places in `[-1000.00, 100000.00]`.
fn amount_strategy() -> impl Strategy<Value = Amount> {
    (-100_000i64..10_000_000).prop_map(|cents| Amount::new(Decimal::new(cents, 2)))
}

/// Any `Decimal`: full 96-bit mantissa, any sign, any scale.
fn any_amount_strategy() -> impl Strategy<Value = Amount> {
    let max_mantissa = (1i128 << 96) - 1;
    (-max_mantissa..=max_mantissa, 0u32..=28)
        .prop_map(|(mantissa, scale)| Amount::new(Decimal::from_i128_with_scale(mantissa, scale)))
}

/// Small date range so duplicates actually occur.
fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (0i64..5, amount_strategy())
        .prop_map(|(minutes, amount)| Transaction::new(base_date() + Duration::minutes(minutes), amount))
}

proptest! {
    #[test]
    fn prop_round_up_range(amount in amount_strategy()) {
        prop_assume!(amount.is_positive());

        let parsed = pipeline::parse(&[Transaction::new(base_date(), amount)]);
        let ceiling = parsed[0].ceiling.into_inner();
        let remanent = parsed[0].remanent.into_inner();

        prop_assert!(ceiling >= amount.into_inner());
        prop_assert_eq!(ceiling % Decimal::ONE_HUNDRED, Decimal::ZERO);
        prop_assert!(remanent >= Decimal::ZERO);
        prop_assert!(remanent < Decimal::ONE_HUNDRED);
        prop_assert_eq!(ceiling - amount.into_inner(), remanent);
    }

    #[test]
    fn prop_parse_idempotent(transactions in prop::collection::vec(transaction_strategy(), 0..20)) {
        prop_assert_eq!(pipeline::parse(&transactions), pipeline::parse(&transactions));
    }

    #[test]
    fn prop_validate_partitions_input(
        transactions in prop::collection::vec(transaction_strategy(), 0..40),
        wage in amount_strategy(),
    ) {
        let parsed = pipeline::parse(&transactions);
        let outcome = pipeline::validate_parsed(ValidationRequest {
            transactions: parsed.clone(),
            wage,
        });

        prop_assert_eq!(outcome.len(), parsed.len());

        // Walk the input once, consuming each bucket in order.
        let mut valid = outcome.valid.iter().peekable();
        let mut invalid = outcome.invalid.iter().peekable();
        for record in &parsed {
            if valid.peek().map_or(false, |v| *v == record) {
                valid.next();
            } else {
                let rejected = invalid.next();
                prop_assert!(rejected.is_some());
                let rejected = rejected.unwrap();
                prop_assert_eq!(rejected.date, record.date);
                prop_assert_eq!(rejected.amount, record.amount);
            }
        }
        prop_assert!(valid.next().is_none());
        prop_assert!(invalid.next().is_none());
    }

    #[test]
    fn prop_valid_records_are_unique_and_within_wage(
        transactions in prop::collection::vec(transaction_strategy(), 0..40),
        wage in amount_strategy(),
    ) {
        let outcome = pipeline::validate_parsed(ValidationRequest {
            transactions: pipeline::parse(&transactions),
            wage,
        });

        for (idx, v) in outcome.valid.iter().enumerate() {
            prop_assert!(v.amount.is_positive());
            prop_assert!(v.amount <= wage);
            prop_assert!(outcome.valid[..idx]
                .iter()
                .all(|earlier| (earlier.date, earlier.amount) != (v.date, v.amount)));
        }
    }
}

proptest! {
    #[test]
    fn prop_parse_total_over_decimal_range(
        amounts in prop::collection::vec(any_amount_strategy(), 0..20),
    ) {
        let transactions: Vec<Transaction> = amounts
            .iter()
            .map(|amount| Transaction::new(base_date(), *amount))
            .collect();

        let parsed = pipeline::parse(&transactions);

        prop_assert_eq!(parsed.len(), transactions.len());
        for p in parsed.iter().filter(|p| p.amount.is_positive()) {
            prop_assert!(p.ceiling >= p.amount);
            prop_assert!(p.remanent >= Amount::ZERO);
            prop_assert!(p.remanent <= Amount::from(100));
        }
    }

    #[test]
    fn prop_filter_total_over_decimal_range(
        amount in any_amount_strategy(),
        fixed in any_amount_strategy(),
        extras in prop::collection::vec(any_amount_strategy(), 0..4),
        wage in any_amount_strategy(),
    ) {
        let start = base_date();
        let end = base_date() + Duration::days(1);
        let request = FilterRequest {
            q: vec![QWindow { fixed, start, end }],
            p: extras
                .into_iter()
                .map(|extra| PWindow { extra, start, end })
                .collect(),
            k: Vec::new(),
            wage,
            transactions: vec![Transaction::new(base_date(), amount)],
        };

        let outcome = pipeline::filter_and_validate(request);

        let dropped = amount.is_positive() && fixed.is_zero();
        prop_assert_eq!(outcome.len(), if dropped { 0 } else { 1 });
        prop_assert!(serde_json::to_string(&outcome).is_ok());
    }
}
