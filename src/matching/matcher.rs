//! Daily matcher.
//!
//! The queue is consumed evenly over the working days left in the period:
//! each day takes `ceil(queue / days_left)` people, adjusted to an even
//! number so everyone taken today gets a partner.

use crate::domain::{Match, Member};
use crate::error::{CoffeeError, Result};

/// Result of one day's matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDay {
    /// Pairs formed today
    pub matches: Vec<Match>,
    /// Members not selected today, in their original queue order
    pub remaining: Vec<Member>,
}

/// Number of queued members to match today.
///
/// - `ceil(queue_len / days_left)` is today's even share.
/// - A share of one still forms a single pair, so the queue always moves.
/// - An odd share grows by one, or shrinks by one when it already covers the
///   whole queue, which leaves a single member over.
pub fn daily_target(queue_len: usize, days_left: u32) -> usize {
    let days_left = days_left.max(1) as usize;
    let target = queue_len.div_ceil(days_left);

    if target == 1 {
        return 2;
    }
    if target % 2 == 0 {
        return target;
    }
    if target == queue_len { target - 1 } else { target + 1 }
}

/// Select today's players from the front of the queue and pair them.
///
/// The queue must already be shuffled and hold at least two members; a lone
/// member has to be handled by the caller.
pub fn create_matches(mut queue: Vec<Member>, days_left: u32) -> Result<MatchDay> {
    if days_left == 0 {
        return Err(CoffeeError::InvalidState("days left must be at least 1".to_string()));
    }
    if queue.len() < 2 {
        return Err(CoffeeError::InvalidState(format!(
            "cannot match a queue of {} member(s)",
            queue.len()
        )));
    }

    let target = daily_target(queue.len(), days_left);
    if target == 2 {
        log::info!("one match today");
    } else {
        log::info!("{} matched today", target);
    }

    let remaining = queue.split_off(target);
    let players = queue;

    // Pair from the back of the selection
    let matches = players
        .rchunks_exact(2)
        .map(|chunk| Match::new(chunk[1].clone(), chunk[0].clone()))
        .collect::<Result<Vec<_>>>()?;

    Ok(MatchDay { matches, remaining })
}
