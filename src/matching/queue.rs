//! Queue construction from the roster and the match history.

use std::collections::HashSet;

use crate::domain::Member;
use crate::history::MatchHistory;

/// Members still waiting for their coffee this period, in roster order.
///
/// Duplicate roster entries are collapsed so a member can never end up paired
/// with themselves.
pub fn build_queue(members: &[Member], history: &MatchHistory) -> Vec<Member> {
    let mut seen = HashSet::new();
    let mut queue = Vec::new();

    for member in members {
        if !seen.insert(member) {
            continue;
        }
        if history.contains(member) {
            log::debug!("{} already had a coffee", member);
        } else {
            log::debug!("{} may have a coffee", member);
            queue.push(member.clone());
        }
    }

    queue
}
