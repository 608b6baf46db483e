//! Notifier that prints announcements instead of posting them.

use async_trait::async_trait;
use colored::*;

use super::Notifier;
use crate::domain::Match;
use crate::error::Result;

/// Prints each announcement to stdout. Used for dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn announce(&self, pair: &Match, text: &str) -> Result<()> {
        println!("{} {}", "Match:".green(), pair);
        println!("  {}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Member;

    #[tokio::test]
    async fn test_console_notifier_never_fails() {
        let pair = Match::new(Member::from("A"), Member::from("B")).unwrap();
        assert!(ConsoleNotifier::new().announce(&pair, "<@A> and <@B>").await.is_ok());
    }
}
