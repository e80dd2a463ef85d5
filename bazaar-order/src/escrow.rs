use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::manager::OrderError;

/// Longest hold or refund window a policy may configure (about a century).
pub const MAX_ESCROW_DAYS: u64 = 36_500;

/// How long payment is held and refunds stay open after an order is placed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EscrowPolicy {
    #[serde(default = "default_payment_hold_days")]
    pub payment_hold_days: u64,
    #[serde(default = "default_refund_window_days")]
    pub refund_window_days: u64,
}

fn default_payment_hold_days() -> u64 { 7 }

fn default_refund_window_days() -> u64 { 14 }

impl Default for EscrowPolicy {
    fn default() -> Self {
        Self {
            payment_hold_days: default_payment_hold_days(),
            refund_window_days: default_refund_window_days(),
        }
    }
}

/// Informational escrow dates attached to an order confirmation.
///
/// Nothing releases funds at these instants; they are a projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EscrowTimeline {
    pub placed_at: DateTime<Utc>,
    pub payment_hold_until: DateTime<Utc>,
    pub refund_eligible_until: DateTime<Utc>,
}

impl EscrowTimeline {
    /// Project with the default 7/14 day policy on the UTC calendar.
    pub fn project(placed_at: DateTime<Utc>) -> Result<Self, OrderError> {
        EscrowPolicy::default().project(&placed_at)
    }
}

impl EscrowPolicy {
    /// Reject windows longer than [`MAX_ESCROW_DAYS`].
    pub fn validate(&self) -> Result<(), OrderError> {
        for days in [self.payment_hold_days, self.refund_window_days] {
            if days > MAX_ESCROW_DAYS {
                return Err(OrderError::EscrowOutOfRange(days));
            }
        }
        Ok(())
    }

    /// Project from `placed_at`, adding calendar days in `placed_at`'s own time zone.
    pub fn project<Tz: TimeZone>(&self, placed_at: &DateTime<Tz>) -> Result<EscrowTimeline, OrderError> {
        Ok(EscrowTimeline {
            placed_at: placed_at.with_timezone(&Utc),
            payment_hold_until: add_calendar_days(placed_at, self.payment_hold_days)?,
            refund_eligible_until: add_calendar_days(placed_at, self.refund_window_days)?,
        })
    }
}

fn add_calendar_days<Tz: TimeZone>(start: &DateTime<Tz>, days: u64) -> Result<DateTime<Utc>, OrderError> {
    if let Some(end) = start.clone().checked_add_days(Days::new(days)) {
        return Ok(end.with_timezone(&Utc));
    }

    // Local wall-clock time missing on the target date (DST gap): use fixed 24h days.
    i64::try_from(days)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|offset| start.with_timezone(&Utc).checked_add_signed(offset))
        .ok_or(OrderError::EscrowOutOfRange(days))
}
