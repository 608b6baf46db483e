//! Matching module: who is waiting and who meets today.
//!
//! This module provides:
//! - **Queue building**: roster members minus those already in the history.
//! - **Matcher**: takes the shuffled queue and the working days left, picks
//!   today's share of the queue and pairs it up.
//!
//! # Example
//!
//! ```ignore
//! use coffeeconnection::matching::{build_queue, create_matches};
//!
//! let queue = build_queue(&members, &history);
//! let day = create_matches(queue, days_left)?;
//! for pair in &day.matches {
//!     println!("{}", pair);
//! }
//! ```

mod matcher;
mod queue;

pub use matcher::{MatchDay, create_matches, daily_target};
pub use queue::build_queue;
