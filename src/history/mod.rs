//! Match history: who already had their coffee this period.
//!
//! In memory the history is a set ([`MatchHistory`]). On disk it is a plain
//! UTF-8 text file with one member id per line ([`HistoryStore`]), read once
//! at the start of a run and overwritten once at the end.

mod store;

pub use store::HistoryStore;

use std::collections::BTreeSet;

use crate::domain::{Match, Member};

/// Members already matched in the current period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchHistory {
    members: BTreeSet<Member>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, member: &Member) -> bool {
        self.members.contains(member)
    }

    /// Record a single member. Returns false if they were already present.
    pub fn insert(&mut self, member: Member) -> bool {
        self.members.insert(member)
    }

    /// Record both sides of a match.
    pub fn record(&mut self, pair: &Match) {
        for member in pair.members() {
            self.members.insert(member.clone());
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }
}

impl FromIterator<Member> for MatchHistory {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
