// Pick queue: a coach's ordered wish list and the rule for choosing the next
// pick from it.

use std::collections::HashSet;
use std::fmt;

use crate::pool::PoolIndex;

/// What to do with queue entries that cannot be drafted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Drop invalid entries and keep looking further down the queue.
    Skip,
    /// Stop at the first invalid entry and leave the queue as it is.
    Stop,
}

/// Why no pick came out of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    /// The head entry is unknown or already drafted.
    Unavailable,
    /// The head entry costs more than the coach has left.
    OverBudget,
    /// Nothing left in the queue.
    Empty,
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HoldReason::Unavailable => "unavailable",
            HoldReason::OverBudget => "over budget",
            HoldReason::Empty => "empty",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueAction {
    /// Draft the item with this key.
    Pick(String),
    Hold(HoldReason),
}

/// Result of walking a queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDecision {
    pub action: QueueAction,
    /// The queue with the chosen pick and any skipped entries taken out.
    pub queue_after: Vec<String>,
    /// Entries dropped because they were unavailable or over budget.
    pub removed: Vec<String>,
}

/// Choose the next pick from `queue`.
///
/// The queue is de-duplicated first (first occurrence wins). Entries are
/// pool keys; unknown keys count as unavailable.
pub fn next_pick_from_queue(
    queue: &[String],
    pool: &PoolIndex,
    drafted: &HashSet<String>,
    remaining: u32,
    mode: QueueMode,
) -> QueueDecision {
    let mut seen = HashSet::new();
    let mut pending: Vec<String> = queue
        .iter()
        .filter(|&key| seen.insert(key.as_str()))
        .cloned()
        .collect();
    let mut removed = Vec::new();

    while let Some(head) = pending.first() {
        let hold = match pool.lookup(head) {
            None => Some(HoldReason::Unavailable),
            Some(item) if drafted.contains(&item.key()) => Some(HoldReason::Unavailable),
            Some(item) if item.cost > remaining => Some(HoldReason::OverBudget),
            Some(_) => None,
        };

        match (hold, mode) {
            (None, _) => {
                let pick = pending.remove(0);
                return QueueDecision {
                    action: QueueAction::Pick(pick),
                    queue_after: pending,
                    removed,
                };
            }
            (Some(reason), QueueMode::Stop) => {
                return QueueDecision {
                    action: QueueAction::Hold(reason),
                    queue_after: pending,
                    removed,
                };
            }
            (Some(_), QueueMode::Skip) => {
                removed.push(pending.remove(0));
            }
        }
    }

    QueueDecision {
        action: QueueAction::Hold(HoldReason::Empty),
        queue_after: Vec::new(),
        removed,
    }
}
