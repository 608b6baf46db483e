//! A single coffee match.

use std::fmt;

use super::Member;
use crate::error::{CoffeeError, Result};

/// Two distinct members selected to meet. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    first: Member,
    second: Member,
}

impl Match {
    /// Pair two members, refusing to pair a member with themselves.
    pub fn new(first: Member, second: Member) -> Result<Self> {
        if first == second {
            return Err(CoffeeError::InvalidMatch(format!("{} cannot be matched with themselves", first)));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &Member {
        &self.first
    }

    pub fn second(&self) -> &Member {
        &self.second
    }

    /// Both members of the pair.
    pub fn members(&self) -> [&Member; 2] {
        [&self.first, &self.second]
    }

    pub fn contains(&self, member: &Member) -> bool {
        self.first == *member || self.second == *member
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <> {}", self.first, self.second)
    }
}
