//! Time windows that modify the round-up of transactions falling inside them.
//!
//! - **Q** windows override the remanent with a fixed value; a fixed value of
//!   zero excludes the transaction altogether.
//! - **P** windows add an extra amount to the remanent.
//! - **K** windows only flag the transaction as being in a special period.
//!
//! Both bounds of every window are inclusive.

use crate::amount::Amount;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` time range.
pub trait Window {
    fn start(&self) -> NaiveDateTime;
    fn end(&self) -> NaiveDateTime;

    /// Returns `true` if `start <= date <= end`.
    fn contains(&self, date: NaiveDateTime) -> bool {
        self.start() <= date && date <= self.end()
    }
}

/// Fixed-remanent override window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QWindow {
    /// Replacement remanent; zero drops the transaction.
    pub fixed: Amount,

    #[serde(with = "crate::timestamp")]
    pub start: NaiveDateTime,

    #[serde(with = "crate::timestamp")]
    pub end: NaiveDateTime,
}

/// Extra-remanent window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PWindow {
    /// Added to the remanent of every transaction inside the window.
    pub extra: Amount,

    #[serde(with = "crate::timestamp")]
    pub start: NaiveDateTime,

    #[serde(with = "crate::timestamp")]
    pub end: NaiveDateTime,
}

/// Special-period window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KWindow {
    #[serde(with = "crate::timestamp")]
    pub start: NaiveDateTime,

    #[serde(with = "crate::timestamp")]
    pub end: NaiveDateTime,
}

macro_rules! impl_window {
    ($($ty:ty),+) => {
        $(
            impl Window for $ty {
                fn start(&self) -> NaiveDateTime {
                    self.start
                }

                fn end(&self) -> NaiveDateTime {
                    self.end
                }
            }
        )+
    };
}

impl_window!(QWindow, PWindow, KWindow);

/// Picks the Q window governing `date`.
///
/// Among the windows containing `date`, the one with the latest `start` wins.
/// When several share that latest start, the first one in `windows` is kept.
pub fn select_q_window(windows: &[QWindow], date: NaiveDateTime) -> Option<&QWindow> {
    windows
        .iter()
        .filter(|q| q.contains(date))
        .fold(None, |selected: Option<&QWindow>, q| match selected {
            Some(current) if q.start <= current.start => Some(current),
            _ => Some(q),
        })
}

/// Sum of `extra` over every P window containing `date`.
pub fn total_p_extra(windows: &[PWindow], date: NaiveDateTime) -> Amount {
    windows
        .iter()
        .filter(|p| p.contains(date))
        .fold(Amount::ZERO, |total, p| total + p.extra)
}

/// Returns `true` if any K window contains `date`.
pub fn in_any_k_window(windows: &[KWindow], date: NaiveDateTime) -> bool {
    windows.iter().any(|k| k.contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        timestamp::parse(s).unwrap()
    }

    fn q(fixed: i64, start: &str, end: &str) -> QWindow {
        QWindow {
            fixed: Amount::from(fixed),
            start: ts(start),
            end: ts(end),
        }
    }

    fn p(extra: i64, start: &str, end: &str) -> PWindow {
        PWindow {
            extra: Amount::from(extra),
            start: ts(start),
            end: ts(end),
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let k = KWindow {
            start: ts("2023-03-01 00:00:00"),
            end: ts("2023-03-31 23:59:59"),
        };

        assert!(k.contains(ts("2023-03-01 00:00:00")));
        assert!(k.contains(ts("2023-03-31 23:59:59")));
        assert!(k.contains(ts("2023-03-15 12:00:00")));
        assert!(!k.contains(ts("2023-02-28 23:59:59")));
        assert!(!k.contains(ts("2023-04-01 00:00:00")));
    }

    #[test]
    fn test_inverted_window_contains_nothing() {
        let k = KWindow {
            start: ts("2023-03-31 00:00:00"),
            end: ts("2023-03-01 00:00:00"),
        };
        assert!(!k.contains(ts("2023-03-15 00:00:00")));
    }

    #[test]
    fn test_select_q_prefers_latest_start() {
        let windows = vec![
            q(10, "2023-01-01 00:00:00", "2023-12-31 23:59:59"),
            q(20, "2023-06-01 00:00:00", "2023-06-30 23:59:59"),
            q(30, "2023-03-01 00:00:00", "2023-09-30 23:59:59"),
        ];

        let selected = select_q_window(&windows, ts("2023-06-15 10:00:00")).unwrap();
        assert_eq!(selected.fixed, Amount::from(20));
    }

    #[test]
    fn test_select_q_tie_keeps_first_seen() {
        let windows = vec![
            q(7, "2023-06-01 00:00:00", "2023-06-30 23:59:59"),
            q(9, "2023-06-01 00:00:00", "2023-07-31 23:59:59"),
        ];

        let selected = select_q_window(&windows, ts("2023-06-15 10:00:00")).unwrap();
        assert_eq!(selected.fixed, Amount::from(7));
    }

    #[test]
    fn test_select_q_ignores_windows_not_containing_date() {
        let windows = vec![
            q(10, "2023-01-01 00:00:00", "2023-12-31 23:59:59"),
            q(20, "2023-07-01 00:00:00", "2023-07-31 23:59:59"),
        ];

        let selected = select_q_window(&windows, ts("2023-06-15 10:00:00")).unwrap();
        assert_eq!(selected.fixed, Amount::from(10));
        assert!(select_q_window(&windows, ts("2024-01-01 00:00:00")).is_none());
    }

    #[test]
    fn test_total_p_extra_is_cumulative() {
        let windows = vec![
            p(2, "2023-01-01 00:00:00", "2023-12-31 23:59:59"),
            p(3, "2023-06-01 00:00:00", "2023-06-30 23:59:59"),
            p(100, "2024-01-01 00:00:00", "2024-12-31 23:59:59"),
        ];

        assert_eq!(
            total_p_extra(&windows, ts("2023-06-15 10:00:00")),
            Amount::from(5)
        );
        assert!(total_p_extra(&[], ts("2023-06-15 10:00:00")).is_zero());
    }

    #[test]
    fn test_window_deserializes_from_wire() {
        let window: QWindow = serde_json::from_str(
            r#"{"fixed": 0, "start": "2023-07-01 00:00:00", "end": "2023-07-31 23:59:59"}"#,
        )
        .unwrap();
        assert!(window.fixed.is_zero());
        assert_eq!(window.end, ts("2023-07-31 23:59:59"));
    }
}
