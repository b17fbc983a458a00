//! Judgment
//!
//! Tallies how many collected clue occurrences point at the accused and turns
//! the total into a verdict.

use crate::data::{ClueStore, SuspectIndex};
use serde::{Deserialize, Serialize};

/// Occurrences needed for an accusation to stand
pub const SUSTAIN_THRESHOLD: u32 = 2;

/// How the accusation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Sustained,
    Insufficient,
    Unfounded,
}

impl Outcome {
    pub fn from_total(total: u32) -> Self {
        match total {
            0 => Outcome::Unfounded,
            t if t >= SUSTAIN_THRESHOLD => Outcome::Sustained,
            _ => Outcome::Insufficient,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Sustained => write!(f, "Acusação sustentada"),
            Outcome::Insufficient => write!(f, "Provas insuficientes"),
            Outcome::Unfounded => write!(f, "Acusação infundada"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accused: String,
    pub total: u32,
    pub outcome: Outcome,
}

impl Verdict {
    pub fn new(accused: &str, total: u32) -> Self {
        Self {
            accused: accused.to_string(),
            total,
            outcome: Outcome::from_total(total),
        }
    }
}

/// Result of the final phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Judgment {
    /// The player named nobody
    NoJudgment,
    Verdict(Verdict),
}

/// Sum the occurrences of every collected clue whose suspect is exactly
/// `accused`. Clues without an association count for nothing.
pub fn tally(clues: &ClueStore, suspects: &SuspectIndex, accused: &str) -> u32 {
    clues
        .iter()
        .filter(|(text, _)| suspects.lookup(text) == Some(accused))
        .map(|(_, occurrences)| occurrences)
        .sum()
}

/// Judge `accused`, or skip judgment when no name was given
pub fn judge(clues: &ClueStore, suspects: &SuspectIndex, accused: Option<&str>) -> Judgment {
    match accused.map(str::trim) {
        Some(name) if !name.is_empty() => {
            let total = tally(clues, suspects, name);
            tracing::info!(accused = name, total, "accusation judged");
            Judgment::Verdict(Verdict::new(name, total))
        }
        _ => {
            tracing::info!("no accusation made");
            Judgment::NoJudgment
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn evidence() -> (ClueStore, SuspectIndex) {
        let suspects = SuspectIndex::from_pairs([
            ("Pegada de lama", "Sr. Verdes"),
            ("Chave enferrujada", "Sr. Verdes"),
            ("Copo quebrado", "Sra. Marinho"),
        ]);
        let clues: ClueStore = ["Pegada de lama", "Chave enferrujada", "Copo quebrado", "Bilhete"]
            .into_iter()
            .collect();
        (clues, suspects)
    }

    #[test_case(0 => Outcome::Unfounded)]
    #[test_case(1 => Outcome::Insufficient)]
    #[test_case(2 => Outcome::Sustained)]
    #[test_case(7 => Outcome::Sustained)]
    fn thresholds(total: u32) -> Outcome {
        Outcome::from_total(total)
    }

    #[test]
    fn tally_sums_matching_clues() {
        let (clues, suspects) = evidence();
        assert_eq!(tally(&clues, &suspects, "Sr. Verdes"), 2);
        assert_eq!(tally(&clues, &suspects, "Sra. Marinho"), 1);
        assert_eq!(tally(&clues, &suspects, "Motorista"), 0);
    }

    #[test]
    fn tally_counts_repeat_occurrences() {
        let (mut clues, suspects) = evidence();
        clues.insert("Copo quebrado");
        assert_eq!(tally(&clues, &suspects, "Sra. Marinho"), 2);
    }

    #[test]
    fn name_match_is_exact() {
        let (clues, suspects) = evidence();
        assert_eq!(tally(&clues, &suspects, "sr. verdes"), 0);
    }

    #[test]
    fn blank_accusation_is_not_judged() {
        let (clues, suspects) = evidence();
        assert_eq!(judge(&clues, &suspects, None), Judgment::NoJudgment);
        assert_eq!(judge(&clues, &suspects, Some("")), Judgment::NoJudgment);
        assert_eq!(judge(&clues, &suspects, Some("   ")), Judgment::NoJudgment);
    }

    #[test]
    fn padded_name_is_judged_trimmed() {
        let (clues, suspects) = evidence();
        assert_eq!(
            judge(&clues, &suspects, Some(" Sr. Verdes ")),
            Judgment::Verdict(Verdict::new("Sr. Verdes", 2))
        );
    }
}
