//! Run outcome types.
//!
//! This module defines the result of one scheduling pass.

use super::{Match, Member};

/// Outcome of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Weekend or configured day off - nothing touched
    DayOff,
    /// Everyone on the roster already had their coffee this period
    NothingToDo,
    /// Pairs were announced; `leftover` is whoever stays queued for a later day
    Matched { matches: Vec<Match>, leftover: Vec<Member> },
}

impl RunOutcome {
    /// Pairs announced during the run.
    pub fn matches(&self) -> &[Match] {
        match self {
            RunOutcome::Matched { matches, .. } => matches,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_outcome_variants() {
        assert_eq!(RunOutcome::DayOff, RunOutcome::DayOff);
        assert_ne!(RunOutcome::DayOff, RunOutcome::NothingToDo);
    }

    #[test]
    fn test_run_outcome_matches() {
        assert!(RunOutcome::DayOff.matches().is_empty());

        let pair = Match::new(Member::from("A"), Member::from("B")).unwrap();
        let outcome = RunOutcome::Matched {
            matches: vec![pair.clone()],
            leftover: vec![],
        };
        assert_eq!(outcome.matches(), &[pair]);
    }
}
