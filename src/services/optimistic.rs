//! Optimistic "mark as paid" tracking
//!
//! A row flagged as paid counts toward the displayed paid total at once, while
//! the remote move is still running. Each row follows
//! `Pending -> Committed | RolledBack`; a rolled back row can be tried again.

use std::collections::HashMap;
use std::fmt;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Money, RowId};

/// Lifecycle of one optimistic payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    /// Shown as paid, remote move in flight
    Pending,
    /// Remote move succeeded
    Committed,
    /// Remote move failed, display restored
    RolledBack,
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Committed => write!(f, "committed"),
            Self::RolledBack => write!(f, "rolled back"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Payment {
    amount: Money,
    state: PaymentState,
}

/// Per-row payment states on top of the loaded paid total
#[derive(Debug, Clone, Default)]
pub struct PaymentTracker {
    loaded_paid: Money,
    payments: HashMap<RowId, Payment>,
}

impl PaymentTracker {
    pub fn new(loaded_paid: Money) -> Self {
        Self {
            loaded_paid,
            payments: HashMap::new(),
        }
    }

    /// Forget all row states after a reload
    pub fn reset(&mut self, loaded_paid: Money) {
        self.loaded_paid = loaded_paid;
        self.payments.clear();
    }

    /// Flag a row as paid before the remote move completes
    pub fn begin(&mut self, id: RowId, amount: Money) -> DashboardResult<()> {
        if let Some(existing) = self.payments.get(&id) {
            match existing.state {
                PaymentState::Pending => {
                    return Err(DashboardError::Validation(format!(
                        "row {} is already being marked as paid",
                        id.position
                    )))
                }
                PaymentState::Committed => {
                    return Err(DashboardError::Validation(format!(
                        "row {} is already paid",
                        id.position
                    )))
                }
                PaymentState::RolledBack => {}
            }
        }

        self.payments.insert(
            id,
            Payment {
                amount,
                state: PaymentState::Pending,
            },
        );
        Ok(())
    }

    /// The remote move succeeded
    pub fn commit(&mut self, id: RowId) -> DashboardResult<Money> {
        self.transition(id, PaymentState::Committed)
    }

    /// The remote move failed; the row's amount leaves the displayed total
    pub fn rollback(&mut self, id: RowId) -> DashboardResult<Money> {
        self.transition(id, PaymentState::RolledBack)
    }

    fn transition(&mut self, id: RowId, to: PaymentState) -> DashboardResult<Money> {
        let payment = self.payments.get_mut(&id).ok_or_else(|| {
            DashboardError::Validation(format!("no payment in progress for {}", id))
        })?;
        if payment.state != PaymentState::Pending {
            return Err(DashboardError::Validation(format!(
                "payment for {} is {}, not pending",
                id, payment.state
            )));
        }
        payment.state = to;
        Ok(payment.amount)
    }

    pub fn state(&self, id: RowId) -> Option<PaymentState> {
        self.payments.get(&id).map(|p| p.state)
    }

    /// Whether the row should show as paid
    pub fn is_flagged(&self, id: RowId) -> bool {
        matches!(
            self.state(id),
            Some(PaymentState::Pending | PaymentState::Committed)
        )
    }

    pub fn has_pending(&self) -> bool {
        self.payments
            .values()
            .any(|p| p.state == PaymentState::Pending)
    }

    /// Loaded paid total plus every flagged row
    pub fn displayed_paid(&self) -> Money {
        self.loaded_paid
            + self
                .payments
                .values()
                .filter(|p| p.state != PaymentState::RolledBack)
                .map(|p| p.amount)
                .sum::<Money>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_increases_displayed_total() {
        let mut tracker = PaymentTracker::new(Money::from_rubles(1000));
        tracker.begin(RowId::expense(1), Money::from_rubles(1500)).unwrap();

        assert_eq!(tracker.displayed_paid(), Money::from_rubles(2500));
        assert!(tracker.is_flagged(RowId::expense(1)));
        assert!(tracker.has_pending());
    }

    #[test]
    fn test_rollback_restores_total() {
        let mut tracker = PaymentTracker::new(Money::from_rubles(1000));
        let id = RowId::expense(2);
        tracker.begin(id, Money::from_rubles(1500)).unwrap();

        assert_eq!(tracker.rollback(id).unwrap(), Money::from_rubles(1500));
        assert_eq!(tracker.displayed_paid(), Money::from_rubles(1000));
        assert!(!tracker.is_flagged(id));
        assert_eq!(tracker.state(id), Some(PaymentState::RolledBack));
    }

    #[test]
    fn test_commit_keeps_total() {
        let mut tracker = PaymentTracker::new(Money::zero());
        let id = RowId::expense(1);
        tracker.begin(id, Money::from_rubles(700)).unwrap();
        tracker.commit(id).unwrap();

        assert_eq!(tracker.displayed_paid(), Money::from_rubles(700));
        assert!(!tracker.has_pending());
        assert!(tracker.rollback(id).is_err());
    }

    #[test]
    fn test_duplicate_pending_rejected() {
        let mut tracker = PaymentTracker::new(Money::zero());
        let id = RowId::expense(1);
        tracker.begin(id, Money::from_rubles(700)).unwrap();
        assert!(tracker.begin(id, Money::from_rubles(700)).is_err());
        assert_eq!(tracker.displayed_paid(), Money::from_rubles(700));
    }

    #[test]
    fn test_retry_after_rollback() {
        let mut tracker = PaymentTracker::new(Money::zero());
        let id = RowId::expense(1);
        tracker.begin(id, Money::from_rubles(700)).unwrap();
        tracker.rollback(id).unwrap();
        tracker.begin(id, Money::from_rubles(700)).unwrap();
        assert_eq!(tracker.state(id), Some(PaymentState::Pending));
    }

    #[test]
    fn test_independent_rows() {
        let mut tracker = PaymentTracker::new(Money::zero());
        let a = RowId::expense(1);
        let b = RowId::expense(2);
        tracker.begin(a, Money::from_rubles(100)).unwrap();
        tracker.begin(b, Money::from_rubles(200)).unwrap();

        // Results may arrive in any order
        tracker.rollback(b).unwrap();
        tracker.commit(a).unwrap();
        assert_eq!(tracker.displayed_paid(), Money::from_rubles(100));
    }

    #[test]
    fn test_reset_clears_states() {
        let mut tracker = PaymentTracker::new(Money::zero());
        tracker.begin(RowId::expense(1), Money::from_rubles(100)).unwrap();
        tracker.reset(Money::from_rubles(100));
        assert!(tracker.state(RowId::expense(1)).is_none());
        assert_eq!(tracker.displayed_paid(), Money::from_rubles(100));
    }
}
