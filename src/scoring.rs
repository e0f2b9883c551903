//! Fixed-weight aggregation of the five top-level sub-scores.
//!
//! final = round(Σ round(raw_i × w_i, 2), 2)
//!
//! Weights are fixed and sum to 1.0, so raw scores in [0,100] always give a
//! final score in [0,100]. A raw score outside that range (or not finite)
//! fails the aggregation instead of being clamped.

use serde::Serialize;

use crate::error::ScoreError;
use crate::signals::bias::BiasReading;
use crate::signals::domain_trust::DomainTrust;
use crate::signals::SignalKind;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Weights {
    pub domain_trust: f64,
    pub content_relevance: f64,
    pub fact_check: f64,
    pub bias: f64,
    pub citation: f64,
}

pub const WEIGHTS: Weights = Weights {
    domain_trust: 0.275,
    content_relevance: 0.275,
    fact_check: 0.275,
    bias: 0.125,
    citation: 0.05,
};

impl Weights {
    pub fn sum(&self) -> f64 {
        self.domain_trust + self.content_relevance + self.fact_check + self.bias + self.citation
    }
}

/// Round to two decimals, ties to even (`5.125` -> `5.12`, `4.625` -> `4.62`).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// The five raw sub-scores, each expected in [0,100].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RawScores {
    pub domain_trust: f64,
    pub content_relevance: f64,
    pub fact_check: f64,
    pub bias: f64,
    pub citation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WeightedScore {
    pub raw: f64,
    pub weighted: f64,
}

/// Result of scoring one (query, URL) pair. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreReport {
    pub url: String,
    pub domain_trust: WeightedScore,
    pub content_relevance: WeightedScore,
    pub fact_check: WeightedScore,
    pub bias: WeightedScore,
    pub citation: WeightedScore,
    pub final_score: f64,
    /// Safety / domain age / popularity readings behind `domain_trust`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_trust_breakdown: Option<DomainTrust>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_detail: Option<BiasReading>,
    /// Signals that were replaced by their default value.
    pub fallbacks: Vec<SignalKind>,
}

fn weigh(kind: &'static str, raw: f64, weight: f64) -> Result<WeightedScore, ScoreError> {
    if !raw.is_finite() || !(0.0..=100.0).contains(&raw) {
        return Err(ScoreError::OutOfRange { kind, value: raw });
    }
    Ok(WeightedScore {
        raw,
        weighted: round2(raw * weight),
    })
}

/// Weigh each raw score and sum. Diagnostics start empty; the checker fills them in.
pub fn aggregate(url: &str, raw: &RawScores) -> Result<ScoreReport, ScoreError> {
    let w = WEIGHTS;
    let domain_trust = weigh("domain_trust", raw.domain_trust, w.domain_trust)?;
    let content_relevance = weigh("content_relevance", raw.content_relevance, w.content_relevance)?;
    let fact_check = weigh("fact_check", raw.fact_check, w.fact_check)?;
    let bias = weigh("bias", raw.bias, w.bias)?;
    let citation = weigh("citation", raw.citation, w.citation)?;

    let final_score = round2(
        domain_trust.weighted
            + content_relevance.weighted
            + fact_check.weighted
            + bias.weighted
            + citation.weighted,
    );

    Ok(ScoreReport {
        url: url.to_string(),
        domain_trust,
        content_relevance,
        fact_check,
        bias,
        citation,
        final_score,
        domain_trust_breakdown: None,
        bias_detail: None,
        fallbacks: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(dt: f64, cr: f64, fc: f64, b: f64, c: f64) -> RawScores {
        RawScores {
            domain_trust: dt,
            content_relevance: cr,
            fact_check: fc,
            bias: b,
            citation: c,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert!((WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn documented_example_weighs_as_expected() {
        let r = aggregate("https://example.com", &raw(100.0, 80.0, 100.0, 70.0, 40.0)).unwrap();
        assert!((r.domain_trust.weighted - 27.5).abs() < 1e-9);
        assert!((r.content_relevance.weighted - 22.0).abs() < 1e-9);
        assert!((r.fact_check.weighted - 27.5).abs() < 1e-9);
        assert!((r.bias.weighted - 8.75).abs() < 1e-9);
        assert!((r.citation.weighted - 2.0).abs() < 1e-9);
        assert!((r.final_score - 87.75).abs() < 1e-9);
    }

    #[test]
    fn final_is_rounded_sum_of_rounded_weights() {
        let r = aggregate("u", &raw(63.33, 41.17, 25.0, 97.41, 30.0)).unwrap();
        let sum = r.domain_trust.weighted
            + r.content_relevance.weighted
            + r.fact_check.weighted
            + r.bias.weighted
            + r.citation.weighted;
        assert_eq!(r.final_score, round2(sum));
        assert_eq!(r.bias.weighted, round2(97.41 * 0.125));
    }

    #[test]
    fn exact_ties_round_to_even() {
        let r = aggregate("u", &raw(0.0, 0.0, 0.0, 41.0, 0.0)).unwrap();
        assert_eq!(r.bias.weighted, 5.12);
        let r = aggregate("u", &raw(0.0, 0.0, 0.0, 37.0, 0.0)).unwrap();
        assert_eq!(r.bias.weighted, 4.62);
        let r = aggregate("u", &raw(0.0, 0.0, 0.0, 33.0, 0.0)).unwrap();
        assert_eq!(r.bias.weighted, 4.12);
        // Non-ties are unaffected.
        assert_eq!(round2(8.756), 8.76);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn bounds_hold_across_a_grid() {
        let steps = [0.0, 1.0, 25.0, 50.0, 63.0, 99.99, 100.0];
        for &a in &steps {
            for &b in &steps {
                for &c in &steps {
                    let r = aggregate("u", &raw(a, b, c, b, a)).unwrap();
                    assert!((0.0..=100.0).contains(&r.final_score), "{a} {b} {c} -> {}", r.final_score);
                }
            }
        }
        assert_eq!(aggregate("u", &raw(0.0, 0.0, 0.0, 0.0, 0.0)).unwrap().final_score, 0.0);
        assert_eq!(aggregate("u", &raw(100.0, 100.0, 100.0, 100.0, 100.0)).unwrap().final_score, 100.0);
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let input = raw(55.5, 12.25, 25.0, 88.1, 70.0);
        assert_eq!(aggregate("u", &input).unwrap(), aggregate("u", &input).unwrap());
    }

    #[test]
    fn out_of_range_or_nan_fails() {
        assert!(matches!(
            aggregate("u", &raw(100.0, 120.0, 0.0, 0.0, 0.0)),
            Err(ScoreError::OutOfRange { kind: "content_relevance", .. })
        ));
        assert!(matches!(
            aggregate("u", &raw(100.0, 50.0, 0.0, f64::NAN, 0.0)),
            Err(ScoreError::OutOfRange { kind: "bias", .. })
        ));
        assert!(aggregate("u", &raw(-1.0, 50.0, 0.0, 0.0, 0.0)).is_err());
    }
}
