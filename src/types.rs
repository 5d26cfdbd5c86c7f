use serde::Serialize;

pub trait Token {
    fn text(&self) -> &str;
}

impl Token for &str {
    fn text(&self) -> &str {
        self
    }
}

impl Token for String {
    fn text(&self) -> &str {
        self
    }
}

/// Tag stored in the operation grid for each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditOp {
    /// Boundary cell, or tokens are equal.
    #[default]
    Match,
    Substitution,
    /// Hypothesis token with no reference counterpart.
    Insertion,
    /// Reference token with no hypothesis counterpart.
    Deletion,
}

/// Indices of a reference and a hypothesis token that the optimal path aligns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchPair {
    pub reference: usize,
    pub hypothesis: usize,
}

impl MatchPair {
    pub fn new(reference: usize, hypothesis: usize) -> Self {
        Self {
            reference,
            hypothesis,
        }
    }

    /// Column of this pair before any gap slots are inserted.
    pub fn column(&self) -> usize {
        self.reference.max(self.hypothesis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EditCounts {
    /// Reference length
    #[serde(rename = "N")]
    pub reference_len: usize,
    #[serde(rename = "C")]
    pub correct: usize,
    /// Total wrong, i.e. the edit distance.
    #[serde(rename = "W")]
    pub wrong: usize,
    #[serde(rename = "I")]
    pub insertions: usize,
    #[serde(rename = "D")]
    pub deletions: usize,
    #[serde(rename = "S")]
    pub substitutions: usize,
}

impl EditCounts {
    /// Word or character error rate, depending on how the input was tokenized.
    pub fn error_rate(&self) -> f64 {
        if self.reference_len == 0 {
            if self.wrong == 0 {
                0.0
            } else {
                1.0
            }
        } else {
            self.wrong as f64 / self.reference_len as f64
        }
    }
}
