//! Announcement templates.
//!
//! A template holds two `{}` placeholders, filled with the mentions of the
//! two matched members in order.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::Match;
use crate::error::{CoffeeError, Result};

const BUILTIN_NICETIES: &str = include_str!("niceties.txt");

const PLACEHOLDER: &str = "{}";

/// Pool of announcement templates, one picked uniformly per match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Niceties {
    templates: Vec<String>,
}

impl Niceties {
    /// Build a pool from template lines. Lines of one character or less are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let templates: Vec<String> = content
            .lines()
            .filter(|line| line.len() > 1)
            .map(|line| line.trim().to_string())
            .collect();

        if templates.is_empty() {
            return Err(CoffeeError::Config("no message templates found".to_string()));
        }
        Ok(Self { templates })
    }

    /// Load templates from a file, one per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CoffeeError::Config(format!("Failed to read templates {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Pick a template at random and fill it in for `pair`.
    pub fn announcement<R: Rng + ?Sized>(&self, pair: &Match, rng: &mut R) -> String {
        match self.templates.choose(rng) {
            Some(template) => render(template, pair),
            None => format!("{} {}", pair.first().mention(), pair.second().mention()),
        }
    }
}

impl Default for Niceties {
    fn default() -> Self {
        Self {
            templates: BUILTIN_NICETIES
                .lines()
                .filter(|line| line.len() > 1)
                .map(|line| line.trim().to_string())
                .collect(),
        }
    }
}

/// Fill the first two placeholders with the members' mentions.
///
/// Further placeholders are left as they are.
pub fn render(template: &str, pair: &Match) -> String {
    template
        .replacen(PLACEHOLDER, &pair.first().mention(), 1)
        .replacen(PLACEHOLDER, &pair.second().mention(), 1)
}
