//! Vote tallying, elimination, and win evaluation.
//!
//! These are the pure decision rules the round engine applies after all of
//! a round's votes are in. They are deliberately free of session state so
//! the tie-break and win-precedence policies can be pinned by table tests.

use crate::agent::AgentId;
use crate::protocol::VoteIntent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One public statement made during a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speech {
    pub speaker: String,
    pub public_text: String,
    pub private_reasoning: Option<String>,
}

/// One cast ballot, kept verbatim for audit display.
#[derive(Debug, Clone)]
pub struct Ballot {
    pub voter: String,
    pub intent: VoteIntent,
}

/// The winning side of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Civilians,
    Spy,
}

/// Terminal result of a game, fixed once a win condition fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Winner,
    pub rounds: u32,
    pub spy_name: String,
}

/// Whether the game continues after a round.
#[derive(Debug, Clone)]
pub enum RoundStatus {
    Continuing,
    Finished(GameResult),
}

/// Everything that happened in one round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub round: u32,
    pub speeches: Vec<Speech>,
    pub ballots: Vec<Ballot>,
    pub eliminated: Option<String>,
    pub status: RoundStatus,
}

impl RoundOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self.status, RoundStatus::Finished(_))
    }
}

/// Resolve a vote target against the active roster by exact display name.
///
/// This is the single place name matching happens; a fuzzier strategy can
/// be swapped in here without touching the tally or elimination rules.
/// Stale or unknown names resolve to nothing and are silently dropped.
pub fn resolve_vote(target: &str, active: &[(AgentId, &str)]) -> Option<AgentId> {
    active
        .iter()
        .find(|(_, name)| *name == target)
        .map(|(id, _)| *id)
}

/// Count votes whose target resolves to a currently active player.
pub fn tally_votes(intents: &[VoteIntent], active: &[(AgentId, &str)]) -> HashMap<AgentId, usize> {
    let mut tally = HashMap::new();
    for intent in intents {
        let Some(target) = intent.target() else {
            continue;
        };
        if let Some(id) = resolve_vote(target, active) {
            *tally.entry(id).or_insert(0) += 1;
        } else {
            tracing::debug!(vote_target = %target, "discarding vote for inactive or unknown name");
        }
    }
    tally
}

/// Pick the agent to eliminate, if any.
///
/// The unique highest-count candidate is eliminated. An exact tie at the
/// top, however many candidates share it, blocks elimination for the
/// round, as does an empty tally.
pub fn decide_elimination(tally: &HashMap<AgentId, usize>) -> Option<AgentId> {
    let mut counts: Vec<(AgentId, usize)> = tally.iter().map(|(id, n)| (*id, *n)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    match counts.as_slice() {
        [] => None,
        [(winner, _)] => Some(*winner),
        [(winner, top), (_, second), ..] => {
            if second == top {
                None
            } else {
                Some(*winner)
            }
        }
    }
}

/// Evaluate the terminal conditions after an elimination decision.
///
/// Checked in order against the post-elimination roster:
/// 1. The eliminated player is the spy: civilians win.
/// 2. Exactly two players remain: spy wins if still active, civilians
///    otherwise.
/// Runs every round whether or not anyone was eliminated.
pub fn evaluate_win(eliminated: Option<AgentId>, active: &[AgentId], spy: AgentId) -> Option<Winner> {
    if eliminated == Some(spy) {
        return Some(Winner::Civilians);
    }
    if active.len() == 2 {
        if active.contains(&spy) {
            return Some(Winner::Spy);
        }
        return Some(Winner::Civilians);
    }
    None
}
