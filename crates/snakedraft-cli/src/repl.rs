// Line-oriented operator loop.
//
// One prompt per turn, one command per line. Recoverable errors are printed
// and the same turn is prompted again. The loop ends when the draft is
// complete or the input stream closes.

use std::io::{BufRead, Write};

use anyhow::Context;
use snakedraft_core::draft::session::{DraftSession, SessionError};
use tracing::{error, info, warn};

use crate::render;

/// How the operator loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Every turn was taken.
    Complete,
    /// Input closed before the draft finished.
    Aborted,
}

/// Drive `session` from `input` until the draft completes or input ends,
/// writing prompts and results to `out`.
///
/// Returns an error only for I/O failures and internal consistency errors;
/// operator mistakes are printed and the loop continues. Input bytes that are
/// not valid UTF-8 are replaced rather than treated as a read failure.
pub fn run<R: BufRead, W: Write>(
    session: &mut DraftSession,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<LoopExit> {
    let mut buf = Vec::new();

    writeln!(out, "{}", render::order(session.order(), None))?;

    let exit = loop {
        let Some(coach) = session.current_coach() else {
            break LoopExit::Complete;
        };
        let prompt = render::prompt(
            session.cursor() + 1,
            session.total_turns(),
            &coach.name,
            coach.remaining(),
        );
        write!(out, "{prompt}")?;
        out.flush()?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("failed to read operator input")?;
        if read == 0 {
            warn!(
                "Input closed at turn {}/{}; draft aborted",
                session.cursor() + 1,
                session.total_turns()
            );
            writeln!(out)?;
            break LoopExit::Aborted;
        }
        let line = String::from_utf8_lossy(&buf);

        match session.apply(&line) {
            Ok(outcome) => {
                if let Some(text) = render::outcome(&outcome) {
                    writeln!(out, "{text}")?;
                }
            }
            Err(SessionError::Command(e)) => writeln!(out, "{}", render::error(&e))?,
            Err(e @ SessionError::Inconsistent(_)) => {
                error!("Stopping draft: {}", e);
                return Err(e).context("draft state is inconsistent");
            }
        }
    };

    let complete = exit == LoopExit::Complete;
    if complete {
        info!("Draft loop finished: all {} picks made", session.total_turns());
        writeln!(out, "Draft complete!")?;
    }
    writeln!(out, "{}", render::summary(&session.summary(), complete))?;
    out.flush()?;

    Ok(exit)
}
