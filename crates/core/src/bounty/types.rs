//! Bounty records and status bucket classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of paid work with independent tracking flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bounty {
    pub id: i64,
    /// Hidden bounties are left out of every aggregate.
    pub show: bool,
    /// Empty when nobody is assigned.
    pub assignee: String,
    pub completed: bool,
    pub paid: bool,
    pub payment_pending: bool,
    pub payment_failed: bool,
    /// No floor is enforced; stored data may be negative.
    pub proof_of_work_count: i64,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl Bounty {
    pub fn is_assigned(&self) -> bool {
        !self.assignee.is_empty()
    }
}

/// Input for inserting a bounty.
///
/// Bounty creation belongs to another service; this exists so operators and
/// tests can seed the table.
#[derive(Debug, Clone, Default)]
pub struct NewBounty {
    /// Explicit id, or `None` to let storage assign one.
    pub id: Option<i64>,
    pub show: bool,
    pub assignee: String,
    pub completed: bool,
    pub paid: bool,
    pub payment_pending: bool,
    pub payment_failed: bool,
    pub proof_of_work_count: i64,
    pub updated: Option<DateTime<Utc>>,
}

/// Counts per report bucket.
///
/// Buckets overlap: an assigned, completed and paid bounty is counted in all
/// three.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: i64,
    pub assigned: i64,
    pub completed: i64,
    pub paid: i64,
    pub pending: i64,
    pub failed: i64,
}

impl StatusCounts {
    /// Classify every bounty in one pass.
    pub fn classify<'a, I>(bounties: I) -> Self
    where
        I: IntoIterator<Item = &'a Bounty>,
    {
        bounties
            .into_iter()
            .fold(Self::default(), |mut counts, bounty| {
                counts.record(bounty);
                counts
            })
    }

    /// Add a single bounty to the counts.
    pub fn record(&mut self, bounty: &Bounty) {
        if !bounty.show {
            return;
        }

        if bounty.is_assigned() {
            self.assigned += 1;
        } else {
            self.open += 1;
        }
        if bounty.completed {
            self.completed += 1;
        }
        if bounty.paid {
            self.paid += 1;
        }
        if bounty.payment_pending {
            self.pending += 1;
        }
        if bounty.payment_failed {
            self.failed += 1;
        }
    }

    /// Iterate `(bucket, count)` pairs in a fixed order.
    pub fn buckets(&self) -> [(&'static str, i64); 6] {
        [
            ("open", self.open),
            ("assigned", self.assigned),
            ("completed", self.completed),
            ("paid", self.paid),
            ("pending", self.pending),
            ("failed", self.failed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounty(show: bool, assignee: &str) -> Bounty {
        Bounty {
            id: 0,
            show,
            assignee: assignee.to_string(),
            completed: false,
            paid: false,
            payment_pending: false,
            payment_failed: false,
            proof_of_work_count: 0,
            created: Utc::now(),
            updated: None,
        }
    }

    #[test]
    fn test_classify_empty() {
        let counts = StatusCounts::classify(&[]);
        assert_eq!(counts, StatusCounts::default());
    }

    #[test]
    fn test_hidden_bounties_never_count() {
        let mut everything = bounty(false, "user1");
        everything.completed = true;
        everything.paid = true;
        everything.payment_pending = true;
        everything.payment_failed = true;

        let counts = StatusCounts::classify(&[bounty(false, ""), everything]);
        assert_eq!(counts, StatusCounts::default());
    }

    #[test]
    fn test_completed_without_assignee_counts_as_open_and_completed() {
        let mut b = bounty(true, "");
        b.completed = true;

        let counts = StatusCounts::classify(&[b]);
        assert_eq!(
            counts,
            StatusCounts {
                open: 1,
                completed: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_buckets_overlap() {
        let mut b = bounty(true, "user1");
        b.completed = true;
        b.paid = true;

        let counts = StatusCounts::classify(&[b]);
        assert_eq!(counts.assigned, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.paid, 1);
        assert_eq!(counts.open, 0);
    }

    #[test]
    fn test_mixed_statuses() {
        let open = bounty(true, "");
        let assigned = bounty(true, "user1");
        let mut completed = bounty(true, "user2");
        completed.completed = true;
        let mut paid = bounty(true, "user3");
        paid.paid = true;
        let mut pending = bounty(true, "user4");
        pending.payment_pending = true;
        let mut failed = bounty(true, "user5");
        failed.payment_failed = true;
        let mut hidden = bounty(false, "user6");
        hidden.paid = true;

        let counts =
            StatusCounts::classify(&[open, assigned, completed, paid, pending, failed, hidden]);

        assert_eq!(
            counts,
            StatusCounts {
                open: 1,
                assigned: 5,
                completed: 1,
                paid: 1,
                pending: 1,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_buckets_order() {
        let counts = StatusCounts {
            open: 1,
            assigned: 2,
            completed: 3,
            paid: 4,
            pending: 5,
            failed: 6,
        };
        let names: Vec<_> = counts.buckets().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["open", "assigned", "completed", "paid", "pending", "failed"]
        );
        assert_eq!(counts.buckets()[5].1, 6);
    }
}
