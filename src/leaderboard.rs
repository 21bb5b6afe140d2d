//! Score submission and ranking
//!
//! The in-memory leaderboard behind the scoreboard service, also used
//! directly by the game client: entries ordered by score descending, ties
//! kept in submission order, ranks 1-based.

use serde::{Deserialize, Serialize};

/// A submitted score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// The boundary the game talks to; the in-process board and a remote
/// service both look like this.
pub trait ScoreService {
    /// Record a score and return the 1-based rank it lands at
    fn submit(&mut self, name: &str, score: u32) -> usize;

    /// All submitted scores, highest first
    fn scores(&self) -> Vec<ScoreEntry>;
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest `n` entries
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

impl ScoreService for Leaderboard {
    fn submit(&mut self, name: &str, score: u32) -> usize {
        // First strictly-lower slot keeps equal scores in submission order
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            ScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        pos + 1
    }

    fn scores(&self) -> Vec<ScoreEntry> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_submission_ranks_first() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("ada", 3), 1);
    }

    #[test]
    fn test_descending_order() {
        let mut board = Leaderboard::new();
        board.submit("low", 1);
        board.submit("high", 9);
        board.submit("mid", 5);

        let scores: Vec<u32> = board.scores().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 1]);
    }

    #[test]
    fn test_rank_is_position_of_new_entry() {
        let mut board = Leaderboard::new();
        board.submit("a", 10);
        board.submit("b", 2);
        assert_eq!(board.submit("c", 5), 2);
        assert_eq!(board.submit("d", 1), 4);
        assert_eq!(board.submit("e", 11), 1);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::new();
        board.submit("first", 5);
        // Same score, even same name: the newcomer ranks below
        assert_eq!(board.submit("second", 5), 2);
        assert_eq!(board.submit("first", 5), 3);

        let scores = board.scores();
        assert_eq!(scores[0].name, "first");
        assert_eq!(scores[1].name, "second");
    }

    #[test]
    fn test_top_slice() {
        let mut board = Leaderboard::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            board.submit(name, i as u32);
        }
        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(2)[0].score, 2);
        assert_eq!(board.top(10).len(), 3);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scores_always_sorted_descending(
                submissions in prop::collection::vec(0u32..100, 1..50),
            ) {
                let mut board = Leaderboard::new();
                for (i, score) in submissions.iter().enumerate() {
                    let rank = board.submit(&format!("p{i}"), *score);
                    prop_assert!(rank >= 1);
                    prop_assert!(rank <= board.len());
                }
                let scores = board.scores();
                prop_assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
