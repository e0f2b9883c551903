//! Presentation: star rating and the result record shown to users.

use serde::{Deserialize, Serialize};

pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '⯨';
pub const EMPTY_STAR: char = '☆';

/// Shown until real explanations are generated.
pub const EXPLANATION_PLACEHOLDER: &str = "___";

/// Five glyphs for a 0..=100 score: full stars, then at most one half star, then empty ones.
pub fn star_rating(score: f64) -> String {
    let stars = (score / 100.0 * 5.0).clamp(0.0, 5.0);
    let full = stars.floor() as usize;
    let half = usize::from(stars - full as f64 >= 0.5);
    let empty = 5 - full - half;

    let mut out = String::with_capacity(5 * 3);
    out.extend(std::iter::repeat(FULL_STAR).take(full));
    out.extend(std::iter::repeat(HALF_STAR).take(half));
    out.extend(std::iter::repeat(EMPTY_STAR).take(empty));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityResult {
    pub score: f64,
    pub ratings: String,
    pub explanation: String,
}

impl CredibilityResult {
    pub fn from_score(score: f64) -> Self {
        Self {
            score,
            ratings: star_rating(score),
            explanation: EXPLANATION_PLACEHOLDER.to_string(),
        }
    }

    /// Score as shown to users: always at least one decimal (`63.0`, `87.75`).
    pub fn display_score(&self) -> String {
        format!("{:?}", self.score)
    }

    /// Pretty JSON with the star glyphs kept as-is.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes() {
        assert_eq!(star_rating(0.0), "☆☆☆☆☆");
        assert_eq!(star_rating(100.0), "★★★★★");
    }

    #[test]
    fn documented_example() {
        // 63.0 -> 3.15 stars: three full, no half, two empty
        assert_eq!(star_rating(63.0), "★★★☆☆");
    }

    #[test]
    fn half_star_at_point_five() {
        assert_eq!(star_rating(70.0), "★★★⯨☆");
        assert_eq!(star_rating(87.75), "★★★★☆");
        assert_eq!(star_rating(95.0), "★★★★⯨");
        assert_eq!(star_rating(9.99), "☆☆☆☆☆");
        assert_eq!(star_rating(10.0), "⯨☆☆☆☆");
    }

    #[test]
    fn always_five_glyphs() {
        for i in 0..=1000 {
            let s = star_rating(i as f64 / 10.0);
            assert_eq!(s.chars().count(), 5, "score {}", i as f64 / 10.0);
        }
    }

    #[test]
    fn whole_scores_display_with_a_decimal() {
        assert_eq!(CredibilityResult::from_score(63.0).display_score(), "63.0");
        assert_eq!(CredibilityResult::from_score(87.75).display_score(), "87.75");
        assert_eq!(CredibilityResult::from_score(0.0).display_score(), "0.0");
    }

    #[test]
    fn result_json_keeps_glyphs() {
        let r = CredibilityResult::from_score(63.0);
        let json = r.to_json_pretty().unwrap();
        assert!(json.contains("\"ratings\": \"★★★☆☆\""));
        assert!(json.contains("\"explanation\": \"___\""));
        assert!(json.contains("\"score\": 63.0"));
    }
}
