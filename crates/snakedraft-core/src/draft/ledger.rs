// Per-coach budget and pick list.

use thiserror::Error;

use crate::pool::PoolItem;

/// Session bookkeeping disagrees with itself. Only a logic defect (a corrupt
/// undo history) can produce one of these; they are never operator mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("coach '{coach}' holds no pick '{item}'")]
    PickMissing { coach: String, item: String },

    #[error("history names unknown coach '{coach}'")]
    UnknownCoach { coach: String },

    #[error("'{item}' is in history but not marked drafted")]
    NotDrafted { item: String },
}

/// A single coach's side of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub name: String,
    /// Starting budget, fixed for the session.
    pub budget: u32,
    /// Picks in the order this coach made them.
    picks: Vec<PoolItem>,
}

impl Coach {
    pub fn new(name: impl Into<String>, budget: u32) -> Self {
        Coach {
            name: name.into(),
            budget,
            picks: Vec::new(),
        }
    }

    pub fn picks(&self) -> &[PoolItem] {
        &self.picks
    }

    /// Total points spent on picks so far.
    pub fn spent(&self) -> u32 {
        self.picks.iter().map(|p| p.cost).sum()
    }

    /// Budget left. The session never commits a pick that would make this
    /// negative, so the subtraction cannot underflow.
    pub fn remaining(&self) -> u32 {
        self.budget.saturating_sub(self.spent())
    }

    /// Append a pick. Budget and availability checks are the caller's job
    /// and must already have passed.
    pub fn add_pick(&mut self, item: PoolItem) {
        self.picks.push(item);
    }

    /// Remove the most recent pick whose key is `key` and return it.
    pub fn remove_pick(&mut self, key: &str) -> Result<PoolItem, ConsistencyError> {
        let idx = self
            .picks
            .iter()
            .rposition(|p| p.key() == key)
            .ok_or_else(|| ConsistencyError::PickMissing {
                coach: self.name.clone(),
                item: key.to_string(),
            })?;
        Ok(self.picks.remove(idx))
    }
}
