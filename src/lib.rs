//! coffeeconnection - recurring coffee chat matching
//!
//! Pairs members of a chat channel so that everyone is matched roughly once
//! per period, with the matches spread evenly over the working days left in
//! the period. Weekends and configured days off are skipped.

pub mod calendar;
pub mod chat;
pub mod domain;
pub mod error;
pub mod history;
pub mod matching;
pub mod orchestrator;

pub use error::{CoffeeError, Result};
pub use orchestrator::{RunSettings, coffeeconnection};
