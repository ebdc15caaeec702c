// Plain-text rendering of session state and command outcomes.
//
// Every function returns a String so the operator loop decides where it goes
// and tests can assert on exact text.

use snakedraft_core::draft::command::CommandError;
use snakedraft_core::draft::session::{Outcome, PickReceipt, TeamReport};
use snakedraft_core::pool::PoolItem;

pub const HELP: &str = "\
Commands:
  <name>            draft that item for the coach on the clock
  list <tier>       undrafted items in a tier (up to 50)
  top <n>           the n most expensive undrafted items
  team <coach>      a coach's budget and picks
  budgets           every coach's budget line
  order             the snake order with the current turn marked
  undo              take back the last pick
  queue             show the current coach's queue
  queue add <name>  append an item to the current coach's queue
  queue clear       empty the current coach's queue
  auto              draft the first valid item in the current coach's queue
  auto strict       draft the head of the queue, or stop if it is taken
  shuffle           randomize the draft order (before the first pick only)
  help              this message";

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Turn prompt, e.g. `[3/20] Sven (remaining 64) > `.
pub fn prompt(turn: usize, total: usize, coach: &str, remaining: u32) -> String {
    format!("[{turn}/{total}] {coach} (remaining {remaining}) > ")
}

pub fn banner(league: &str, coaches: usize, total_turns: usize) -> String {
    let name = if league.is_empty() { "Draft" } else { league };
    format!("{name}: {coaches} coaches, {total_turns} picks")
}

/// One pool row in a listing.
pub fn item_row(item: &PoolItem) -> String {
    format!(
        "{:<15} {:<20} bst={:<3} pts={} tier={}",
        item.name, item.types, item.strength, item.cost, item.tier
    )
}

pub fn listing(items: &[PoolItem]) -> String {
    if items.is_empty() {
        return "(no matching items)".to_string();
    }
    items.iter().map(item_row).collect::<Vec<_>>().join("\n")
}

/// A coach's budget line followed by one line per pick.
pub fn team(report: &TeamReport) -> String {
    let mut lines = vec![format!(
        "{}: spent {} / {} (remaining {})",
        report.name, report.spent, report.budget, report.remaining
    )];
    if report.picks.is_empty() {
        lines.push("  (no picks)".to_string());
    }
    for p in &report.picks {
        lines.push(format!(
            "- {} ({}) pts={} bst={} tier={}",
            p.name, p.types, p.cost, p.strength, p.tier
        ));
    }
    lines.join("\n")
}

pub fn budgets(reports: &[TeamReport]) -> String {
    reports
        .iter()
        .map(|r| {
            format!(
                "{:<12} spent {:>4} / {:<4} remaining {:>4}  picks {}",
                r.name,
                r.spent,
                r.budget,
                r.remaining,
                r.picks.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The snake order; the entry at `cursor` (if any) is wrapped in brackets.
pub fn order(order: &[String], cursor: Option<usize>) -> String {
    let body = order
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if Some(i) == cursor {
                format!("[{name}]")
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" -> ");
    format!("Snake order: {body}")
}

pub fn summary(reports: &[TeamReport], complete: bool) -> String {
    let heading = if complete {
        "=== Final summary ==="
    } else {
        "=== Summary (draft incomplete) ==="
    };
    let mut parts = vec![heading.to_string()];
    parts.extend(reports.iter().map(team));
    parts.join("\n")
}

pub fn error(err: &CommandError) -> String {
    format!("Error: {err}")
}

fn receipt(r: &PickReceipt) -> String {
    format!(
        "{} drafted {} for {} pts (remaining {})",
        r.coach, r.item.name, r.item.cost, r.remaining
    )
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Text for a successful command, or `None` when there is nothing to show.
pub fn outcome(outcome: &Outcome) -> Option<String> {
    let text = match outcome {
        Outcome::Idle => return None,
        Outcome::Listing(items) => listing(items),
        Outcome::Team(report) => team(report),
        Outcome::Budgets(reports) => budgets(reports),
        Outcome::Order { order: o, cursor } => order(o, Some(*cursor)),
        Outcome::Shuffled { order: o } => format!("Shuffled. {}", order(o, None)),
        Outcome::Help => HELP.to_string(),
        Outcome::Queue { coach, items } if items.is_empty() => {
            format!("{coach}'s queue is empty")
        }
        Outcome::Queue { coach, items } => {
            let mut lines = vec![format!("{coach}'s queue:")];
            lines.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("{:>2}. {}", i + 1, p)),
            );
            lines.join("\n")
        }
        Outcome::Queued { coach, item, added: true } => {
            format!("Queued {} for {coach}", item.name)
        }
        Outcome::Queued { coach, item, added: false } => {
            format!("{} is already in {coach}'s queue", item.name)
        }
        Outcome::QueueCleared { coach, removed } => {
            format!("Cleared {removed} entries from {coach}'s queue")
        }
        Outcome::Drafted(r) => receipt(r),
        Outcome::AutoDrafted { receipt: r, skipped } if skipped.is_empty() => receipt(r),
        Outcome::AutoDrafted { receipt: r, skipped } => {
            format!("{} (skipped {})", receipt(r), skipped.join(", "))
        }
        Outcome::Undone { coach, item, turn } => {
            format!("Undid {coach}'s pick of {}; back to turn {turn}", item.name)
        }
    };
    Some(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, cost: u32, tier: char) -> PoolItem {
        PoolItem {
            dex: None,
            name: name.to_string(),
            types: "psychic".to_string(),
            strength: 500,
            cost,
            tier,
        }
    }

    fn report(name: &str, picks: Vec<PoolItem>) -> TeamReport {
        let spent = picks.iter().map(|p| p.cost).sum();
        TeamReport {
            name: name.to_string(),
            budget: 110,
            spent,
            remaining: 110 - spent,
            picks,
        }
    }

    #[test]
    fn prompt_format() {
        assert_eq!(prompt(3, 20, "Sven", 64), "[3/20] Sven (remaining 64) > ");
    }

    #[test]
    fn item_row_pads_columns() {
        let row = item_row(&item("Alakazam", 14, 'A'));
        assert_eq!(
            row,
            "Alakazam        psychic              bst=500 pts=14 tier=A"
        );
    }

    #[test]
    fn empty_listing() {
        assert_eq!(listing(&[]), "(no matching items)");
    }

    #[test]
    fn team_lists_picks_in_order() {
        let text = team(&report("Billy", vec![item("Mewtwo", 30, 'S'), item("Abra", 3, 'F')]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Billy: spent 33 / 110 (remaining 77)");
        assert_eq!(lines[1], "- Mewtwo (psychic) pts=30 bst=500 tier=S");
        assert_eq!(lines[2], "- Abra (psychic) pts=3 bst=500 tier=F");
    }

    #[test]
    fn team_without_picks() {
        let text = team(&report("Sven", vec![]));
        assert!(text.ends_with("(no picks)"));
    }

    #[test]
    fn order_marks_cursor() {
        let o: Vec<String> = ["A", "B", "B", "A"].iter().map(|s| s.to_string()).collect();
        assert_eq!(order(&o, Some(2)), "Snake order: A -> B -> [B] -> A");
        assert_eq!(order(&o, None), "Snake order: A -> B -> B -> A");
        // Cursor past the end marks nothing.
        assert_eq!(order(&o, Some(4)), "Snake order: A -> B -> B -> A");
    }

    #[test]
    fn summary_heading_depends_on_completion() {
        let reports = vec![report("A", vec![]), report("B", vec![])];
        assert!(summary(&reports, true).starts_with("=== Final summary ==="));
        assert!(summary(&reports, false).starts_with("=== Summary (draft incomplete) ==="));
        assert!(summary(&reports, true).contains("B: spent 0 / 110"));
    }

    #[test]
    fn drafted_and_undone_messages() {
        let r = PickReceipt {
            turn: 1,
            coach: "A".into(),
            item: item("Gengar", 13, 'A'),
            remaining: 97,
        };
        assert_eq!(
            outcome(&Outcome::Drafted(r.clone())).unwrap(),
            "A drafted Gengar for 13 pts (remaining 97)"
        );
        assert_eq!(
            outcome(&Outcome::AutoDrafted {
                receipt: r,
                skipped: vec!["mew".into(), "onix".into()]
            })
            .unwrap(),
            "A drafted Gengar for 13 pts (remaining 97) (skipped mew, onix)"
        );
        assert_eq!(
            outcome(&Outcome::Undone {
                coach: "A".into(),
                item: item("Gengar", 13, 'A'),
                turn: 1
            })
            .unwrap(),
            "Undid A's pick of Gengar; back to turn 1"
        );
    }

    #[test]
    fn shuffled_shows_new_order() {
        let o: Vec<String> = ["C", "A", "A", "C"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            outcome(&Outcome::Shuffled { order: o }).unwrap(),
            "Shuffled. Snake order: C -> A -> A -> C"
        );
    }

    #[test]
    fn idle_renders_nothing() {
        assert!(outcome(&Outcome::Idle).is_none());
    }

    #[test]
    fn error_prefix() {
        let err = CommandError::InsufficientBudget {
            cost: 30,
            remaining: 12,
        };
        assert_eq!(
            error(&err),
            "Error: not enough budget (cost 30, remaining 12)"
        );
    }
}
