//! One scheduling pass.
//!
//! A run is terminal after one pass:
//! 1. Reset the history when it is missing or today starts a new period
//! 2. Stop on weekends and days off
//! 3. Build the queue from the roster minus the history
//! 4. Stop when nobody is waiting
//! 5. A lone waiting member is paired with any other roster member
//! 6. Otherwise shuffle the queue and match today's share
//! 7. On the last working day a single leftover is paired with someone not matched today
//! 8. Persist the history
//!
//! Failures before step 8 leave the history file as it was after step 1.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::calendar::PeriodState;
use crate::chat::{Niceties, Notifier, RosterProvider};
use crate::domain::{Match, Member, RunOutcome};
use crate::error::Result;
use crate::history::{HistoryStore, MatchHistory};
use crate::matching::{build_queue, create_matches};

/// Everything a run needs besides the chat collaborators.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Day zero of the first period. Expected to be a Monday.
    pub epoch: NaiveDate,
    /// Period length in weeks
    pub week_period: u32,
    /// Dates with no matching, on top of weekends
    pub days_off: HashSet<NaiveDate>,
    /// One member id per line
    pub history_file: PathBuf,
    /// Announcement templates
    pub niceties: Niceties,
}

impl RunSettings {
    pub fn period(&self, today: NaiveDate) -> PeriodState {
        PeriodState::new(today, self.epoch, self.week_period)
    }

    pub fn store(&self) -> HistoryStore {
        HistoryStore::new(&self.history_file)
    }
}

/// Run the matcher once for `today`.
///
/// All randomness (queue shuffle, partner picks, template picks) comes from `rng`.
pub async fn coffeeconnection<R: Rng + ?Sized>(
    settings: &RunSettings,
    roster: &dyn RosterProvider,
    notifier: &dyn Notifier,
    today: NaiveDate,
    rng: &mut R,
) -> Result<RunOutcome> {
    let period = settings.period(today);
    let store = settings.store();

    if !store.exists() || period.is_reset_day() {
        log::info!("reset queue");
        store.reset()?;
    }

    if period.is_off(&settings.days_off) {
        log::info!("no coffee today");
        return Ok(RunOutcome::DayOff);
    }

    if !period.epoch_is_aligned() {
        log::warn!("epoch {} is not a Monday, days left may be off", settings.epoch);
    }
    let days_left = period.working_days_left();
    log::info!("{} days left", days_left);

    let members = roster.list_eligible_members().await?;
    let mut history = store.load()?;
    let mut queue = build_queue(&members, &history);
    log::info!("number in queue {}", queue.len());

    if queue.is_empty() {
        return Ok(RunOutcome::NothingToDo);
    }

    let mut matches = Vec::new();
    let mut leftover = Vec::new();

    if queue.len() == 1 {
        let member = queue.remove(0);
        match pick_partner(&member, &members, &HashSet::new(), rng) {
            Some(partner) => {
                let pair = Match::new(partner, member)?;
                announce(settings, notifier, &pair, &mut history, rng).await?;
                matches.push(pair);
            }
            None => {
                log::warn!("{} is alone on the roster, nobody to meet", member);
                leftover.push(member);
            }
        }
    } else {
        queue.shuffle(rng);
        let day = create_matches(queue, days_left)?;

        for pair in day.matches {
            announce(settings, notifier, &pair, &mut history, rng).await?;
            matches.push(pair);
        }
        leftover = day.remaining;

        if leftover.len() == 1 && days_left == 1 {
            let member = leftover.remove(0);
            log::info!("one leftover {}", member);

            let partner = {
                let matched_today: HashSet<&Member> = matches.iter().flat_map(|m| m.members()).collect();
                pick_partner(&member, &members, &matched_today, rng).or_else(|| {
                    log::info!("everyone else was matched today, {} may meet anyone", member);
                    pick_partner(&member, &members, &HashSet::new(), rng)
                })
            };

            match partner {
                Some(partner) => {
                    let pair = Match::new(partner, member)?;
                    announce(settings, notifier, &pair, &mut history, rng).await?;
                    matches.push(pair);
                }
                None => {
                    log::warn!("{} is alone on the roster, nobody to meet", member);
                    leftover.push(member);
                }
            }
        }
    }

    store.save(&history)?;
    Ok(RunOutcome::Matched { matches, leftover })
}

/// Random roster member other than `member`, skipping `exclude`.
fn pick_partner<R: Rng + ?Sized>(
    member: &Member,
    roster: &[Member],
    exclude: &HashSet<&Member>,
    rng: &mut R,
) -> Option<Member> {
    let candidates: Vec<&Member> = roster
        .iter()
        .filter(|other| *other != member && !exclude.contains(other))
        .collect();
    candidates.choose(rng).map(|other| (*other).clone())
}

async fn announce<R: Rng + ?Sized>(
    settings: &RunSettings,
    notifier: &dyn Notifier,
    pair: &Match,
    history: &mut MatchHistory,
    rng: &mut R,
) -> Result<()> {
    let text = settings.niceties.announcement(pair, rng);
    notifier.announce(pair, &text).await?;
    history.record(pair);
    Ok(())
}
