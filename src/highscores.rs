//! Score counters and round leaderboard
//!
//! Lives for the lifetime of the process only; nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Maximum number of rounds to keep on the leaderboard
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Difficulty level reached
    pub level: u32,
    /// Seconds survived
    pub survived_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Score of the running (or last) round
    pub current: u64,
    /// Best score seen this session
    pub high: u64,
    /// Any point has been scored this session
    pub any_score: bool,
    /// Top rounds, sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gain(&mut self, amount: u64) {
        self.any_score = true;
        self.current += amount;
        if self.current > self.high {
            self.high = self.current;
        }
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished round; returns its rank if it made the board
    pub fn record_round(&mut self, score: u64, level: u32, survived_secs: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            survived_secs,
        };

        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Format seconds survived as `m:ss`
pub fn format_survived(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_tracks_high() {
        let mut board = ScoreBoard::new();
        assert!(!board.any_score);
        board.gain(5);
        board.reset_current();
        board.gain(3);
        assert_eq!(board.current, 3);
        assert_eq!(board.high, 5);
        assert!(board.any_score);
    }

    #[test]
    fn test_leaderboard_ordering_and_cap() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.record_round(0, 0, 1.0), None);
        for score in 1..=12u64 {
            board.record_round(score, 1, score as f64);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(12));
        assert_eq!(board.entries.last().unwrap().score, 3);
        assert_eq!(board.potential_rank(2), None);
        assert_eq!(board.potential_rank(7), Some(7));
        assert_eq!(board.record_round(100, 4, 60.0), Some(1));
    }

    #[test]
    fn test_format_survived() {
        assert_eq!(format_survived(0.4), "0:00");
        assert_eq!(format_survived(75.9), "1:15");
    }
}
