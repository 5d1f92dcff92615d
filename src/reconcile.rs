//! Keeps a doubt's status in line with the work items raised for it.

use crate::models::{Doubt, DoubtStatus, WorkItem};

/// Status a doubt should carry given its linked work items, `None` when nothing is linked.
pub fn derived_status(doubt_id: &str, work_items: &[WorkItem]) -> Option<DoubtStatus> {
    let mut linked = work_items.iter().filter(|item| item.is_linked_to(doubt_id));
    let first = linked.next()?;
    let all_done = first.status.is_complete() && linked.all(|item| item.status.is_complete());
    Some(if all_done {
        DoubtStatus::Resolved
    } else {
        DoubtStatus::InProgress
    })
}

/// Recompute `doubt.status` from the work items linked to it.
///
/// - no linked item: unchanged
/// - any linked item not done: in progress
/// - every linked item done: resolved
///
/// Every other field passes through. Applying it to its own output is a no-op.
pub fn reconcile_doubt(doubt: &Doubt, work_items: &[WorkItem]) -> Doubt {
    let mut reconciled = doubt.clone();
    if let Some(status) = derived_status(&doubt.id, work_items) {
        reconciled.status = status;
    }
    reconciled
}

/// The doubts whose status changes under [`reconcile_doubt`], as their reconciled values.
pub fn changed_doubts(doubts: &[Doubt], work_items: &[WorkItem]) -> Vec<Doubt> {
    doubts
        .iter()
        .filter_map(|doubt| {
            let reconciled = reconcile_doubt(doubt, work_items);
            (reconciled.status != doubt.status).then_some(reconciled)
        })
        .collect()
}
