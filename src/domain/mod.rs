//! Domain types for coffeeconnection
//!
//! This module contains the core domain types:
//! - Member: opaque chat member identifier
//! - Match: an unordered pair of two distinct members
//! - RunOutcome: what a single scheduling run did

pub mod member;
pub mod outcome;
pub mod pair;

pub use member::Member;
pub use outcome::RunOutcome;
pub use pair::Match;
