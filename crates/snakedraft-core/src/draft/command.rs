// Operator command grammar.
//
// One line of input is one command. A small set of keywords is recognized
// case-insensitively; any other non-empty line is treated as the name of the
// item to draft.

use thiserror::Error;

use super::queue::HoldReason;

/// Rows returned by `list <tier>`.
pub const LIST_LIMIT: usize = 50;

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line: re-prompt the same turn.
    Empty,
    /// Undrafted items of one tier (tier letter already uppercased).
    List { tier: String },
    /// The `count` most expensive undrafted items.
    Top { count: usize },
    /// One coach's budget and picks.
    Team { coach: String },
    /// Every coach's budget line.
    Budgets,
    /// The full snake order with the cursor marked.
    Order,
    Help,
    Undo,
    /// Show the current coach's pick queue.
    ShowQueue,
    QueueAdd { item: String },
    QueueClear,
    /// Draft from the current coach's queue. Non-strict drops entries that
    /// cannot be drafted and keeps looking; strict only ever takes the head.
    Auto { strict: bool },
    /// Randomize the base order. Only allowed before the first pick.
    Shuffle,
    /// Draft the named item for the coach on the clock.
    Draft { name: String },
}

/// A recoverable per-turn failure. Never changes session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("usage: {usage}")]
    Usage { usage: &'static str },

    #[error("'{value}' is not a valid number")]
    InvalidNumber { value: String },

    #[error("unknown coach '{name}'")]
    UnknownCoach { name: String },

    #[error("'{name}' not found in pool")]
    NotFound { name: String },

    #[error("{name} already drafted")]
    AlreadyDrafted { name: String },

    #[error("not enough budget (cost {cost}, remaining {remaining})")]
    InsufficientBudget { cost: u32, remaining: u32 },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("draft is complete")]
    DraftComplete,

    #[error("{coach} has an empty queue")]
    QueueEmpty { coach: String },

    #[error("no draftable entry in {coach}'s queue ({skipped} removed)")]
    NoValidQueuedPick { coach: String, skipped: usize },

    #[error("next entry in {coach}'s queue, '{item}', is {reason}")]
    QueueHeadBlocked {
        coach: String,
        item: String,
        reason: HoldReason,
    },

    #[error("cannot shuffle after picks have been made")]
    ShuffleAfterPicks,
}

const LIST_USAGE: &str = "list <tier>";
const TOP_USAGE: &str = "top <n>";
const TEAM_USAGE: &str = "team <coach>";
const QUEUE_USAGE: &str = "queue [add <item> | clear]";

/// Parse one line of operator input.
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Command::Empty);
    }

    let (head, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    let keyword = head.to_lowercase();
    let cmd = match (keyword.as_str(), arg.is_empty()) {
        ("list", true) => return Err(CommandError::Usage { usage: LIST_USAGE }),
        ("list", false) => Command::List {
            tier: arg.to_uppercase(),
        },
        ("top", true) => return Err(CommandError::Usage { usage: TOP_USAGE }),
        ("top", false) => Command::Top {
            count: arg.parse().map_err(|_| CommandError::InvalidNumber {
                value: arg.to_string(),
            })?,
        },
        ("team", true) => return Err(CommandError::Usage { usage: TEAM_USAGE }),
        ("team", false) => Command::Team {
            coach: arg.to_string(),
        },
        ("queue", true) => Command::ShowQueue,
        ("queue", false) => parse_queue(arg)?,
        ("undo", true) => Command::Undo,
        ("auto", true) => Command::Auto { strict: false },
        ("auto", false) if arg.eq_ignore_ascii_case("strict") => Command::Auto { strict: true },
        ("shuffle", true) => Command::Shuffle,
        ("budgets", true) => Command::Budgets,
        ("order", true) => Command::Order,
        ("help", true) => Command::Help,
        _ => Command::Draft {
            name: trimmed.to_string(),
        },
    };

    Ok(cmd)
}

fn parse_queue(arg: &str) -> Result<Command, CommandError> {
    let (action, rest) = match arg.split_once(char::is_whitespace) {
        Some((action, rest)) => (action, rest.trim()),
        None => (arg, ""),
    };

    match (action.to_lowercase().as_str(), rest.is_empty()) {
        ("add", false) => Ok(Command::QueueAdd {
            item: rest.to_string(),
        }),
        ("clear", true) => Ok(Command::QueueClear),
        _ => Err(CommandError::Usage { usage: QUEUE_USAGE }),
    }
}
