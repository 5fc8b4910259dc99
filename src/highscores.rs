//! High score leaderboard
//!
//! Tracks the top 10 finished runs. Storage is the host's job; the board
//! only converts to and from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::{EndReason, GameOutcome, Rating};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score including bonuses
    pub score: u64,
    pub tasks_collected: u32,
    pub total_tasks: u32,
    pub bugs_debugged: u32,
    pub rating: Rating,
    pub reason: EndReason,
    /// Unix timestamp (ms) when achieved, supplied by the host
    pub timestamp: f64,
}

impl HighScoreEntry {
    pub fn from_outcome(outcome: &GameOutcome, timestamp: f64) -> Self {
        Self {
            score: outcome.final_score,
            tasks_collected: outcome.tasks_collected,
            total_tasks: outcome.total_tasks,
            bugs_debugged: outcome.bugs_debugged,
            rating: outcome.rating,
            reason: outcome.reason,
            timestamp,
        }
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn record(&mut self, outcome: &GameOutcome, timestamp: f64) -> Option<usize> {
        if !self.qualifies(outcome.final_score) {
            return None;
        }

        let entry = HighScoreEntry::from_outcome(outcome, timestamp);

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("High score recorded at rank {rank}");
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a stored board, keeping at most `MAX_HIGH_SCORES` entries in
    /// descending score order
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }
}
