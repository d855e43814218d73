//! # Round-up Engine
//!
//! Computes round-up savings for a batch of transactions and validates them
//! against a wage ceiling and a set of time windows.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: Amounts are `rust_decimal` values, never floats
//! - **Pure pipeline**: No shared state; every request stands alone
//! - **Order preserving**: Outputs keep the relative order of the input
//! - **Typed results**: Valid and invalid records live in separate buckets
//!
//! ## Example
//!
//! ```
//! use roundup_engine::{pipeline, FilterRequest};
//!
//! let body = r#"{
//!     "wage": 100,
//!     "transactions": [{"date": "2023-01-01 10:00:00", "amount": 45}]
//! }"#;
//! let request: FilterRequest = serde_json::from_str(body).unwrap();
//! let outcome = pipeline::filter_and_validate(request);
//! assert_eq!(outcome.valid[0].remanent.to_string(), "55");
//! ```

pub mod amount;
pub mod auth;
pub mod config;
pub mod error;
pub mod performance;
pub mod pipeline;
pub mod request;
pub mod timestamp;
pub mod transaction;
pub mod window;

pub use amount::Amount;
pub use auth::ApiKeyGuard;
pub use config::Config;
pub use error::{Result, RoundupError};
pub use timestamp::TimestampError;
pub use performance::PerformanceReport;
pub use request::{FilterRequest, FilterValidationRequest, ValidationOutcome, ValidationRequest};
pub use transaction::{
    FilteredTransaction, InvalidReason, InvalidTransaction, ParsedTransaction, Transaction,
};
pub use window::{KWindow, PWindow, QWindow, Window};
