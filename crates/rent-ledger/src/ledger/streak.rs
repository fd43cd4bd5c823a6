use super::domain::Payment;
use std::cmp::Ordering;

/// Days after the due date a payment may land and still count as on time.
pub const ON_TIME_GRACE_DAYS: i64 = 5;

/// Whether a paid payment landed inside the on-time grace window.
pub fn is_on_time(payment: &Payment) -> bool {
    payment
        .days_late()
        .map(|days| days <= ON_TIME_GRACE_DAYS)
        .unwrap_or(false)
}

/// Most recent due date first, ties broken by ascending id.
pub(crate) fn most_recent_first(a: &Payment, b: &Payment) -> Ordering {
    b.due_date.cmp(&a.due_date).then_with(|| a.id.cmp(&b.id))
}

/// Count consecutive on-time payments walking back from the latest due date.
///
/// The walk stops at the first unpaid or late payment; older history is never
/// consulted once the chain breaks.
pub fn compute_streak(payments: &[Payment]) -> u32 {
    let mut ordered: Vec<&Payment> = payments.iter().collect();
    ordered.sort_by(|a, b| most_recent_first(a, b));

    let mut streak = 0;
    for payment in ordered {
        if !is_on_time(payment) {
            break;
        }
        streak += 1;
    }

    streak
}
