//! Chat collaborator layer - roster lookup and match announcements
//!
//! This module provides:
//! - RosterProvider / Notifier traits, the seams the orchestrator calls
//! - SlackClient implementation of both
//! - ConsoleNotifier for dry runs
//! - StaticRoster / RecordingNotifier in-memory stand-ins
//! - Niceties, the pool of announcement templates

pub mod console;
pub mod memory;
pub mod niceties;
pub mod slack;

pub use console::ConsoleNotifier;
pub use memory::{RecordingNotifier, StaticRoster};
pub use niceties::Niceties;
pub use slack::{SlackClient, SlackConfig};

use async_trait::async_trait;

use crate::domain::{Match, Member};
use crate::error::Result;

/// Source of the members eligible for matching.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Eligible members in a stable order. Two calls within one run must
    /// return the same set.
    async fn list_eligible_members(&self) -> Result<Vec<Member>>;
}

/// Announces a match to the group.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an already rendered announcement for `pair`.
    async fn announce(&self, pair: &Match, text: &str) -> Result<()>;
}
