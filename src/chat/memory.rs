//! In-memory roster and notifier
//!
//! Stand-ins for the chat service, used to drive the orchestrator without a
//! live workspace.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Notifier, RosterProvider};
use crate::domain::{Match, Member};
use crate::error::{CoffeeError, Result};

/// Roster with a fixed member list.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    members: Vec<Member>,
}

impl StaticRoster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn from_ids(ids: &[&str]) -> Self {
        Self::new(ids.iter().map(|id| Member::from(*id)).collect())
    }
}

#[async_trait]
impl RosterProvider for StaticRoster {
    async fn list_eligible_members(&self) -> Result<Vec<Member>> {
        Ok(self.members.clone())
    }
}

/// Notifier that keeps every announcement, optionally failing after a number of them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Match, String)>>,
    fail_after: Option<usize>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` announcements, then fail every following one.
    pub fn failing_after(count: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_after: Some(count),
        }
    }

    /// Announcements received so far.
    pub fn sent(&self) -> Vec<(Match, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Pairs announced so far.
    pub fn pairs(&self) -> Vec<Match> {
        self.sent().into_iter().map(|(pair, _)| pair).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn announce(&self, pair: &Match, text: &str) -> Result<()> {
        let mut sent = self.sent.lock().map_err(|e| CoffeeError::InvalidState(e.to_string()))?;
        if self.fail_after.is_some_and(|limit| sent.len() >= limit) {
            return Err(CoffeeError::Slack("notifier unavailable".to_string()));
        }
        sent.push((pair.clone(), text.to_string()));
        Ok(())
    }
}
