// Draft session: coaches, availability, turn cursor and undo history.
//
// The session is a single owned value. Every operator command goes through
// `apply`, which either changes state completely or not at all.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::command::{self, Command, CommandError, LIST_LIMIT};
use super::ledger::{Coach, ConsistencyError};
use super::order::snake_order;
use super::queue::{next_pick_from_queue, HoldReason, QueueAction, QueueMode};
use crate::config::{normalize_coaches, validate_coaches, Config, ConfigError};
use crate::pool::{pool_key, PoolIndex, PoolItem};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure from `DraftSession::apply`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Operator mistake. Nothing changed; report it and prompt again.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The session's own bookkeeping is broken. Do not keep drafting.
    #[error("internal consistency error: {0}")]
    Inconsistent(#[from] ConsistencyError),
}

impl SessionError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::Command(_))
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Complete,
}

/// One committed pick, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub coach: String,
    /// Pool key of the drafted item.
    pub item: String,
}

/// Budget line and roster for one coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamReport {
    pub name: String,
    pub budget: u32,
    pub spent: u32,
    pub remaining: u32,
    pub picks: Vec<PoolItem>,
}

impl TeamReport {
    fn from_coach(coach: &Coach) -> Self {
        TeamReport {
            name: coach.name.clone(),
            budget: coach.budget,
            spent: coach.spent(),
            remaining: coach.remaining(),
            picks: coach.picks().to_vec(),
        }
    }
}

/// Confirmation of a committed pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickReceipt {
    /// 1-based turn number the pick was made on.
    pub turn: usize,
    pub coach: String,
    pub item: PoolItem,
    /// Coach's budget left after the pick.
    pub remaining: u32,
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing happened.
    Idle,
    Listing(Vec<PoolItem>),
    Team(TeamReport),
    Budgets(Vec<TeamReport>),
    Order { order: Vec<String>, cursor: usize },
    /// The new snake order after a shuffle.
    Shuffled { order: Vec<String> },
    Help,
    Queue { coach: String, items: Vec<PoolItem> },
    Queued { coach: String, item: PoolItem, added: bool },
    QueueCleared { coach: String, removed: usize },
    Drafted(PickReceipt),
    AutoDrafted { receipt: PickReceipt, skipped: Vec<String> },
    Undone { coach: String, item: PoolItem, turn: usize },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The complete state of a live draft.
#[derive(Debug, Clone)]
pub struct DraftSession {
    pool: PoolIndex,
    /// Coaches in registration order.
    coaches: Vec<Coach>,
    /// First-round order. Starts as registration order; only a shuffle
    /// before the first pick changes it.
    base_order: Vec<String>,
    rounds: usize,
    /// Snake turn sequence built from `base_order`.
    order: Vec<String>,
    /// Keys of every item some coach holds.
    drafted: HashSet<String>,
    history: Vec<HistoryEntry>,
    /// Index into `order` of the coach on the clock.
    cursor: usize,
    /// Per-coach wish lists of pool keys. Advisory only; undo ignores them.
    queues: HashMap<String, Vec<String>>,
}

impl DraftSession {
    /// Create a new session.
    ///
    /// # Arguments
    /// - `coaches`: coach names in registration order (at least 2, unique)
    /// - `budget`: starting budget shared by every coach
    /// - `team_size`: picks per coach, i.e. snake rounds
    /// - `pool`: the loaded item pool
    pub fn new(
        coaches: &[String],
        budget: u32,
        team_size: usize,
        pool: PoolIndex,
    ) -> Result<Self, ConfigError> {
        let names = normalize_coaches(coaches);
        validate_coaches(&names)?;
        if budget == 0 {
            return Err(ConfigError::ValidationError {
                field: "league.budget".into(),
                message: "must be greater than 0".into(),
            });
        }

        let order = snake_order(&names, team_size);
        info!(
            "Draft session created: {} coaches, {} rounds, {} turns, budget {}",
            names.len(),
            team_size,
            order.len(),
            budget
        );

        Ok(DraftSession {
            pool,
            coaches: names.iter().map(|n| Coach::new(n.clone(), budget)).collect(),
            base_order: names,
            rounds: team_size,
            order,
            drafted: HashSet::new(),
            history: Vec::new(),
            cursor: 0,
            queues: HashMap::new(),
        })
    }

    /// Create a session from a validated league config.
    pub fn from_config(config: &Config, pool: PoolIndex) -> Result<Self, ConfigError> {
        Self::new(
            &config.league.coaches,
            config.league.budget,
            config.league.team_size,
            pool,
        )
    }

    /// Randomize the first-round order and rebuild the snake from it.
    ///
    /// Refused once any pick is in the history. Registration order, and with
    /// it the summary order, is unchanged.
    pub fn shuffle_order<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&[String], CommandError> {
        if !self.history.is_empty() {
            return Err(CommandError::ShuffleAfterPicks);
        }

        self.base_order.shuffle(rng);
        self.order = snake_order(&self.base_order, self.rounds);
        info!("Draft order shuffled: {}", self.base_order.join(", "));

        Ok(&self.order)
    }

    // -- Queries ------------------------------------------------------------

    pub fn status(&self) -> SessionStatus {
        if self.cursor >= self.order.len() {
            SessionStatus::Complete
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Complete
    }

    /// Zero-based index of the next turn.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_turns(&self) -> usize {
        self.order.len()
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn pool(&self) -> &PoolIndex {
        &self.pool
    }

    pub fn coaches(&self) -> &[Coach] {
        &self.coaches
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_drafted(&self, name: &str) -> bool {
        self.drafted.contains(&pool_key(name))
    }

    pub fn drafted_count(&self) -> usize {
        self.drafted.len()
    }

    /// The coach on the clock, or `None` once the draft is complete.
    pub fn current_coach(&self) -> Option<&Coach> {
        let name = self.order.get(self.cursor)?;
        self.coach(name)
    }

    /// Look up a coach by exact name, falling back to a case-insensitive match.
    pub fn coach(&self, name: &str) -> Option<&Coach> {
        self.coach_index(name).map(|i| &self.coaches[i])
    }

    /// Queue of pool keys for a coach (empty if none was ever set).
    pub fn queue(&self, coach: &str) -> &[String] {
        self.queues.get(coach).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Final (or running) summary: every coach in registration order.
    pub fn summary(&self) -> Vec<TeamReport> {
        self.coaches.iter().map(TeamReport::from_coach).collect()
    }

    fn coach_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.coaches
            .iter()
            .position(|c| c.name == name)
            .or_else(|| {
                self.coaches
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
            })
    }

    /// Undrafted items matching `predicate`, cost then strength descending.
    fn available<F>(&self, predicate: F, limit: Option<usize>) -> Vec<PoolItem>
    where
        F: Fn(&PoolItem) -> bool,
    {
        self.pool
            .filter_sorted(|p| !self.drafted.contains(&p.key()) && predicate(p), limit)
            .into_iter()
            .cloned()
            .collect()
    }

    // -- Commands -----------------------------------------------------------

    /// Parse and apply one line of operator input.
    pub fn apply(&mut self, raw_input: &str) -> Result<Outcome, SessionError> {
        let result = command::parse(raw_input)
            .map_err(SessionError::from)
            .and_then(|cmd| self.execute(cmd));
        if let Err(e) = &result {
            debug!("Rejected input {:?}: {}", raw_input.trim(), e);
        }
        result
    }

    /// Apply an already parsed command.
    pub fn execute(&mut self, cmd: Command) -> Result<Outcome, SessionError> {
        match cmd {
            Command::Empty => Ok(Outcome::Idle),
            Command::List { tier } => Ok(Outcome::Listing(self.available(
                |p| p.tier.to_string() == tier,
                Some(LIST_LIMIT),
            ))),
            Command::Top { count } => Ok(Outcome::Listing(self.available(|_| true, Some(count)))),
            Command::Team { coach } => {
                let found = self
                    .coach(&coach)
                    .ok_or(CommandError::UnknownCoach { name: coach })?;
                Ok(Outcome::Team(TeamReport::from_coach(found)))
            }
            Command::Budgets => Ok(Outcome::Budgets(self.summary())),
            Command::Order => Ok(Outcome::Order {
                order: self.order.clone(),
                cursor: self.cursor,
            }),
            Command::Help => Ok(Outcome::Help),
            Command::Undo => self.undo(),
            Command::ShowQueue => self.show_queue(),
            Command::QueueAdd { item } => self.queue_add(&item),
            Command::QueueClear => self.queue_clear(),
            Command::Auto { strict } => self.auto_pick(strict),
            Command::Shuffle => {
                let order = self.shuffle_order(&mut rand::thread_rng())?.to_vec();
                Ok(Outcome::Shuffled { order })
            }
            Command::Draft { name } => self.draft(&name).map(Outcome::Drafted),
        }
    }

    /// Draft `name` for the coach on the clock.
    ///
    /// Checks run in a fixed order and the first failure wins: the name must
    /// resolve, the item must be undrafted, and the coach must afford it.
    fn draft(&mut self, name: &str) -> Result<PickReceipt, SessionError> {
        let coach_idx = self.on_the_clock()?;

        let item = self
            .pool
            .lookup(name)
            .ok_or_else(|| CommandError::NotFound {
                name: name.trim().to_string(),
            })?
            .clone();
        let key = item.key();

        if self.drafted.contains(&key) {
            return Err(CommandError::AlreadyDrafted { name: item.name }.into());
        }

        let remaining = self.coaches[coach_idx].remaining();
        if item.cost > remaining {
            return Err(CommandError::InsufficientBudget {
                cost: item.cost,
                remaining,
            }
            .into());
        }

        // Commit: ledger, availability, history, cursor.
        let coach = &mut self.coaches[coach_idx];
        coach.add_pick(item.clone());
        let receipt = PickReceipt {
            turn: self.cursor + 1,
            coach: coach.name.clone(),
            item,
            remaining: coach.remaining(),
        };
        self.drafted.insert(key.clone());
        self.history.push(HistoryEntry {
            coach: receipt.coach.clone(),
            item: key,
        });
        self.cursor += 1;

        info!(
            "Pick {}/{}: {} -> {} ({} pts, {} remaining)",
            receipt.turn,
            self.order.len(),
            receipt.coach,
            receipt.item.name,
            receipt.item.cost,
            receipt.remaining
        );
        if self.is_complete() {
            info!("Draft complete after {} picks", self.history.len());
        }

        Ok(receipt)
    }

    /// Reverse the most recent pick and step the cursor back one turn.
    fn undo(&mut self) -> Result<Outcome, SessionError> {
        let Some(entry) = self.history.last().cloned() else {
            return Err(CommandError::NothingToUndo.into());
        };

        // Verify everything before touching anything.
        let coach_idx = self
            .coach_index(&entry.coach)
            .ok_or_else(|| ConsistencyError::UnknownCoach {
                coach: entry.coach.clone(),
            })?;
        if !self.drafted.contains(&entry.item) {
            return Err(ConsistencyError::NotDrafted {
                item: entry.item.clone(),
            }
            .into());
        }
        let item = self.coaches[coach_idx].remove_pick(&entry.item)?;

        self.drafted.remove(&entry.item);
        self.history.pop();
        self.cursor = self.cursor.saturating_sub(1);

        info!(
            "Undo: {} -> {} (back to turn {})",
            entry.coach,
            item.name,
            self.cursor + 1
        );

        Ok(Outcome::Undone {
            coach: entry.coach,
            item,
            turn: self.cursor + 1,
        })
    }

    fn on_the_clock(&self) -> Result<usize, SessionError> {
        let name = self
            .order
            .get(self.cursor)
            .ok_or(CommandError::DraftComplete)?;
        self.coach_index(name).ok_or_else(|| {
            ConsistencyError::UnknownCoach {
                coach: name.clone(),
            }
            .into()
        })
    }

    fn current_coach_name(&self) -> Result<String, SessionError> {
        let idx = self.on_the_clock()?;
        Ok(self.coaches[idx].name.clone())
    }

    fn show_queue(&self) -> Result<Outcome, SessionError> {
        let coach = self.current_coach_name()?;
        let items = self
            .queue(&coach)
            .iter()
            .filter_map(|key| self.pool.lookup(key).cloned())
            .collect();
        Ok(Outcome::Queue { coach, items })
    }

    fn queue_add(&mut self, name: &str) -> Result<Outcome, SessionError> {
        let coach = self.current_coach_name()?;
        let item = self
            .pool
            .lookup(name)
            .ok_or_else(|| CommandError::NotFound {
                name: name.trim().to_string(),
            })?
            .clone();

        let key = item.key();
        let queue = self.queues.entry(coach.clone()).or_default();
        let added = !queue.contains(&key);
        if added {
            queue.push(key);
            debug!("{} queued {}", coach, item.name);
        }
        Ok(Outcome::Queued { coach, item, added })
    }

    fn queue_clear(&mut self) -> Result<Outcome, SessionError> {
        let coach = self.current_coach_name()?;
        let removed = self.queues.remove(&coach).map(|q| q.len()).unwrap_or(0);
        Ok(Outcome::QueueCleared { coach, removed })
    }

    /// Draft from the current coach's queue.
    ///
    /// Non-strict drops entries that are taken or unaffordable and drafts the
    /// first valid one. Strict drafts the head or fails, leaving the queue as
    /// it was.
    fn auto_pick(&mut self, strict: bool) -> Result<Outcome, SessionError> {
        let coach_idx = self.on_the_clock()?;
        let coach = self.coaches[coach_idx].name.clone();
        let queue = self.queue(&coach).to_vec();
        if queue.is_empty() {
            return Err(CommandError::QueueEmpty { coach }.into());
        }

        let decision = next_pick_from_queue(
            &queue,
            &self.pool,
            &self.drafted,
            self.coaches[coach_idx].remaining(),
            if strict { QueueMode::Stop } else { QueueMode::Skip },
        );
        let blocked_head = decision.queue_after.first().cloned();
        self.queues.insert(coach.clone(), decision.queue_after);

        match decision.action {
            QueueAction::Pick(key) => {
                let receipt = self.draft(&key)?;
                Ok(Outcome::AutoDrafted {
                    receipt,
                    skipped: decision.removed,
                })
            }
            QueueAction::Hold(reason @ (HoldReason::Unavailable | HoldReason::OverBudget)) => {
                Err(CommandError::QueueHeadBlocked {
                    coach,
                    item: blocked_head.unwrap_or_default(),
                    reason,
                }
                .into())
            }
            QueueAction::Hold(HoldReason::Empty) => Err(CommandError::NoValidQueuedPick {
                coach,
                skipped: decision.removed.len(),
            }
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
