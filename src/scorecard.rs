//! Scoring labels and the in-session scorecard
//!
//! Kept in memory for the current round only.

use serde::{Deserialize, Serialize};

/// Name for a hole's score relative to par
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    HoleInOne,
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogeyPlus,
}

impl ScoreLabel {
    pub fn for_score(strokes: u32, par: u32) -> Self {
        if strokes == 1 {
            return ScoreLabel::HoleInOne;
        }
        match strokes as i64 - par as i64 {
            i64::MIN..=-3 => ScoreLabel::Albatross,
            -2 => ScoreLabel::Eagle,
            -1 => ScoreLabel::Birdie,
            0 => ScoreLabel::Par,
            1 => ScoreLabel::Bogey,
            2 => ScoreLabel::DoubleBogey,
            _ => ScoreLabel::TripleBogeyPlus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::HoleInOne => "Hole in One",
            ScoreLabel::Albatross => "Albatross",
            ScoreLabel::Eagle => "Eagle",
            ScoreLabel::Birdie => "Birdie",
            ScoreLabel::Par => "Par",
            ScoreLabel::Bogey => "Bogey",
            ScoreLabel::DoubleBogey => "Double Bogey",
            ScoreLabel::TripleBogeyPlus => "Triple Bogey+",
        }
    }
}

/// A single completed hole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleScore {
    /// 1-based hole number
    pub hole: usize,
    pub strokes: u32,
    pub par: u32,
}

impl HoleScore {
    pub fn to_par(&self) -> i32 {
        self.strokes as i32 - self.par as i32
    }

    pub fn label(&self) -> ScoreLabel {
        ScoreLabel::for_score(self.strokes, self.par)
    }
}

/// Scores for the round so far
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scorecard {
    pub entries: Vec<HoleScore>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished hole, replacing any earlier score for it
    pub fn record(&mut self, hole: usize, strokes: u32, par: u32) -> ScoreLabel {
        let entry = HoleScore { hole, strokes, par };
        let label = entry.label();
        match self.entries.iter().position(|e| e.hole >= hole) {
            Some(i) if self.entries[i].hole == hole => self.entries[i] = entry,
            Some(i) => self.entries.insert(i, entry),
            None => self.entries.push(entry),
        }
        log::info!("Hole {}: {} ({})", hole, strokes, label.as_str());
        label
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_strokes(&self) -> u32 {
        self.entries.iter().map(|e| e.strokes).sum()
    }

    pub fn total_par(&self) -> u32 {
        self.entries.iter().map(|e| e.par).sum()
    }

    pub fn to_par(&self) -> i32 {
        self.entries.iter().map(HoleScore::to_par).sum()
    }

    /// "E", "+3", "-2"
    pub fn to_par_string(&self) -> String {
        match self.to_par() {
            0 => "E".to_string(),
            n if n > 0 => format!("+{}", n),
            n => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ScoreLabel::for_score(1, 3), ScoreLabel::HoleInOne);
        assert_eq!(ScoreLabel::for_score(2, 5), ScoreLabel::Albatross);
        assert_eq!(ScoreLabel::for_score(2, 4), ScoreLabel::Eagle);
        assert_eq!(ScoreLabel::for_score(3, 4), ScoreLabel::Birdie);
        assert_eq!(ScoreLabel::for_score(4, 4), ScoreLabel::Par);
        assert_eq!(ScoreLabel::for_score(5, 4), ScoreLabel::Bogey);
        assert_eq!(ScoreLabel::for_score(6, 4), ScoreLabel::DoubleBogey);
        assert_eq!(ScoreLabel::for_score(9, 4), ScoreLabel::TripleBogeyPlus);
        assert_eq!(ScoreLabel::TripleBogeyPlus.as_str(), "Triple Bogey+");
    }

    #[test]
    fn test_scorecard_totals() {
        let mut card = Scorecard::new();
        assert!(card.is_empty());
        assert_eq!(card.to_par_string(), "E");

        card.record(1, 5, 4);
        card.record(2, 2, 3);
        card.record(3, 6, 5);
        assert_eq!(card.total_strokes(), 13);
        assert_eq!(card.total_par(), 12);
        assert_eq!(card.to_par(), 1);
        assert_eq!(card.to_par_string(), "+1");
    }

    #[test]
    fn test_record_replaces_and_orders() {
        let mut card = Scorecard::new();
        card.record(3, 4, 4);
        card.record(1, 3, 4);
        card.record(3, 6, 4);
        let holes: Vec<usize> = card.entries.iter().map(|e| e.hole).collect();
        assert_eq!(holes, vec![1, 3]);
        assert_eq!(card.total_strokes(), 9);
        assert_eq!(card.to_par_string(), "+1");
    }
}
