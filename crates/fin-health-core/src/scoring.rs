//! Data-driven scoring primitives shared by every assessment module.
//!
//! A factor maps an indicator to points through an ordered bracket table
//! (first match wins) or a binary pass/fail scale. Conclusions come from an
//! ordered list of predicate rules over a module's flag set, with an
//! explicit fallback.

use std::ops::{Bound, RangeBounds};

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Text};
use crate::types::{serialize_float, Points};

pub use std::ops::Bound::{Excluded, Included, Unbounded};

pub const MAX_SCORE: Points = 100.0;

// ---------------------------------------------------------------------------
// Brackets and factors
// ---------------------------------------------------------------------------

/// One scoring band: `value ∈ (lower, upper)` earns `points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
    pub points: Points,
}

impl Bracket {
    pub const fn new(lower: Bound<f64>, upper: Bound<f64>, points: Points) -> Self {
        Self {
            lower,
            upper,
            points,
        }
    }

    /// Catch-all band, matches anything (NaN included).
    pub const fn otherwise(points: Points) -> Self {
        Self::new(Unbounded, Unbounded, points)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower, self.upper).contains(&value)
    }
}

/// Points from the first bracket containing `value`, 0 if none does.
pub fn bracket_points(brackets: &[Bracket], value: f64) -> Points {
    brackets
        .iter()
        .find(|b| b.contains(value))
        .map_or(0.0, |b| b.points)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Brackets(&'static [Bracket]),
    /// Binary factor: the indicator is `1.0` for pass, `0.0` for fail.
    Binary { pass: Points, fail: Points },
}

impl Scale {
    pub fn points(&self, value: f64) -> Points {
        match self {
            Scale::Brackets(brackets) => bracket_points(brackets, value),
            Scale::Binary { pass, fail } => {
                if value > 0.0 {
                    *pass
                } else {
                    *fail
                }
            }
        }
    }
}

/// Indicator value for a binary factor.
pub fn flag(passed: bool) -> f64 {
    if passed {
        1.0
    } else {
        0.0
    }
}

/// A weighted scoring factor. `weight` is the maximum it can contribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor {
    pub name: Text,
    pub weight: Points,
    pub scale: Scale,
}

impl Factor {
    pub fn score(&self, value: f64, locale: Locale) -> FactorScore {
        FactorScore {
            name: self.name.get(locale).to_string(),
            weight: self.weight,
            value,
            points: self.scale.points(value),
        }
    }
}

/// The contribution of one factor to a module score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub name: String,
    pub weight: Points,
    #[serde(serialize_with = "serialize_float")]
    pub value: f64,
    pub points: Points,
}

/// Sum of factor points clamped to `[0, 100]`; a NaN total scores 0.
pub fn total_score(factors: &[FactorScore]) -> Points {
    clamp_score(factors.iter().map(|f| f.points).sum())
}

pub fn clamp_score(score: Points) -> Points {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE)
    }
}

// ---------------------------------------------------------------------------
// Flags and conclusions
// ---------------------------------------------------------------------------

/// A yes/no diagnostic answer, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub question: String,
    pub answer: String,
    pub passed: bool,
}

pub fn details(checks: &[(Text, bool)], locale: Locale) -> Vec<Detail> {
    checks
        .iter()
        .map(|(question, passed)| Detail {
            question: question.get(locale).to_string(),
            answer: locale.answer(*passed).to_string(),
            passed: *passed,
        })
        .collect()
}

/// A conclusion that applies when `when` holds over the module's flags.
pub struct Rule<F> {
    pub when: fn(&F) -> bool,
    pub text: Text,
}

impl<F> Rule<F> {
    pub const fn new(when: fn(&F) -> bool, text: Text) -> Self {
        Self { when, text }
    }
}

/// Text of the first matching rule, else `fallback`.
pub fn select_conclusion<F>(rules: &[Rule<F>], flags: &F, fallback: Text) -> Text {
    rules
        .iter()
        .find(|rule| (rule.when)(flags))
        .map_or(fallback, |rule| rule.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANDS: &[Bracket] = &[
        Bracket::new(Included(1.0), Unbounded, 30.0),
        Bracket::new(Included(0.5), Excluded(1.0), 15.0),
        Bracket::otherwise(3.0),
    ];

    #[test]
    fn test_first_matching_bracket_wins() {
        assert_eq!(bracket_points(BANDS, 1.0), 30.0);
        assert_eq!(bracket_points(BANDS, f64::INFINITY), 30.0);
        assert_eq!(bracket_points(BANDS, 0.99), 15.0);
        assert_eq!(bracket_points(BANDS, 0.5), 15.0);
        assert_eq!(bracket_points(BANDS, 0.49), 3.0);
        assert_eq!(bracket_points(BANDS, f64::NAN), 3.0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let bands = [Bracket::new(Excluded(0.0), Unbounded, 5.0)];
        assert_eq!(bracket_points(&bands, -1.0), 0.0);
    }

    #[test]
    fn test_binary_scale() {
        let scale = Scale::Binary {
            pass: 15.0,
            fail: 7.5,
        };
        assert_eq!(scale.points(flag(true)), 15.0);
        assert_eq!(scale.points(flag(false)), 7.5);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(120.0), 100.0);
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn test_factor_score_is_localized() {
        let factor = Factor {
            name: Text::new("Band", "區間"),
            weight: 30.0,
            scale: Scale::Brackets(BANDS),
        };
        let s = factor.score(0.7, Locale::ZhTw);
        assert_eq!(s.name, "區間");
        assert_eq!(s.points, 15.0);
        assert_eq!(total_score(&[s.clone(), s]), 30.0);
    }

    struct Flags {
        a: bool,
        b: bool,
    }

    #[test]
    fn test_rules_first_match_then_fallback() {
        let rules = [
            Rule::new(|f: &Flags| f.a && f.b, Text::new("both", "兩者")),
            Rule::new(|f: &Flags| f.a, Text::new("a", "甲")),
        ];
        let fallback = Text::new("neither", "皆否");
        let pick = |a, b| select_conclusion(&rules, &Flags { a, b }, fallback).en;
        assert_eq!(pick(true, true), "both");
        assert_eq!(pick(true, false), "a");
        assert_eq!(pick(false, true), "neither");
    }

    #[test]
    fn test_details_keep_order() {
        let d = details(
            &[(Text::new("Q1?", "問1?"), true), (Text::new("Q2?", "問2?"), false)],
            Locale::En,
        );
        assert_eq!(d[0].question, "Q1?");
        assert_eq!(d[0].answer, "Yes");
        assert_eq!(d[1].answer, "No");
        assert!(!d[1].passed);
    }
}
