//! Independent-Poisson score grid
//!
//! Exact summation over a bounded `goal_grid × goal_grid` grid of
//! `P(h; λ_h) · P(a; λ_a)`. Deterministic and cheap (36 cells by default).

use tracing::trace;

use super::round_to;
use crate::config::{ModelConfig, MAX_MARKET_LINE};
use crate::domain::{ExpectedGoals, GoalMarkets, MatchProbabilities, OutcomeDistribution};

/// `P(k; λ)` for `k` in `0..len`
pub fn poisson_pmf(lambda: f64, len: usize) -> Vec<f64> {
    let lambda = sanitize_rate(lambda);
    let mut out = vec![0.0; len];
    if len == 0 {
        return out;
    }

    out[0] = (-lambda).exp();
    for k in 1..len {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}

fn sanitize_rate(lambda: f64) -> f64 {
    if lambda.is_finite() && lambda > 0.0 {
        lambda
    } else {
        0.0
    }
}

/// Score-grid outcome model
#[derive(Debug, Clone, Copy)]
pub struct ProbabilityEngine {
    goal_grid: usize,
}

impl Default for ProbabilityEngine {
    fn default() -> Self {
        Self { goal_grid: 6 }
    }
}

impl ProbabilityEngine {
    pub fn new(config: &ModelConfig) -> Self {
        Self::with_grid(config.goal_grid as usize)
    }

    pub fn with_grid(goal_grid: usize) -> Self {
        Self {
            goal_grid: goal_grid.max(1),
        }
    }

    /// Outcome distribution and goal markets for the given rates.
    ///
    /// Percentages carry one decimal; the draw absorbs the rounding residue so
    /// the three outcomes sum to 100. Both rates at zero (or a grid without
    /// mass) yields [`OutcomeDistribution::NEUTRAL`].
    pub fn match_probabilities(&self, xg: ExpectedGoals) -> MatchProbabilities {
        let lambda_home = sanitize_rate(xg.home);
        let lambda_away = sanitize_rate(xg.away);
        let g = self.goal_grid;

        let ph = poisson_pmf(lambda_home, g);
        let pa = poisson_pmf(lambda_away, g);

        let mut draw = 0.0;
        for k in 0..g {
            draw += ph[k] * pa[k];
        }

        // Summed along diagonals (margin d) so that swapping the rates swaps
        // home and away bit for bit.
        let mut home = 0.0;
        let mut away = 0.0;
        for d in 1..g {
            for k in 0..(g - d) {
                home += ph[k + d] * pa[k];
                away += pa[k + d] * ph[k];
            }
        }

        let mut over_1_5 = 0.0;
        let mut over_2_5 = 0.0;
        let mut over_3_5 = 0.0;
        let mut btts = 0.0;
        for (h, p_h) in ph.iter().enumerate() {
            for (a, p_a) in pa.iter().enumerate() {
                let p = p_h * p_a;
                let total = h + a;
                if total > 1 {
                    over_1_5 += p;
                }
                if total > 2 {
                    over_2_5 += p;
                }
                if total > 3 {
                    over_3_5 += p;
                }
                if h > 0 && a > 0 {
                    btts += p;
                }
            }
        }

        let mass = (home + away) + draw;
        if !(mass.is_finite() && mass > 0.0) {
            trace!(lambda_home, lambda_away, "empty score grid, neutral distribution");
            return MatchProbabilities::neutral();
        }

        let goals = GoalMarkets {
            over_1_5: to_percent(over_1_5 / mass),
            over_2_5: to_percent(over_2_5 / mass),
            over_3_5: to_percent(over_3_5 / mass),
            under_2_5: round_to(100.0 - over_2_5 / mass * 100.0, 1).clamp(0.0, 100.0),
            btts: to_percent(btts / mass),
        };

        if lambda_home == 0.0 && lambda_away == 0.0 {
            return MatchProbabilities {
                outcome: OutcomeDistribution::NEUTRAL,
                goals,
            };
        }

        let home_win = to_percent(home / mass);
        let away_win = to_percent(away / mass);
        let draw = round_to(100.0 - (home_win + away_win), 1).clamp(0.0, 100.0);

        trace!(
            lambda_home,
            lambda_away,
            home_win,
            draw,
            away_win,
            "score grid evaluated"
        );

        MatchProbabilities {
            outcome: OutcomeDistribution {
                home_win,
                draw,
                away_win,
            },
            goals,
        }
    }

    /// `P(X > line)` in percent for a Poisson count with mean `lambda`
    pub fn over_line(&self, lambda: f64, line: f64) -> f64 {
        let lambda = sanitize_rate(lambda);
        if lambda == 0.0 || !line.is_finite() || line > MAX_MARKET_LINE {
            return 0.0;
        }
        if line < 0.0 {
            return 100.0;
        }

        let max_k = line.floor() as usize;
        let at_or_below: f64 = poisson_pmf(lambda, max_k + 1).iter().sum();
        to_percent(1.0 - at_or_below)
    }
}

fn to_percent(p: f64) -> f64 {
    round_to(p * 100.0, 1).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ProbabilityEngine {
        ProbabilityEngine::default()
    }

    #[test]
    fn test_pmf_matches_closed_form() {
        let pmf = poisson_pmf(1.5, 4);
        assert!((pmf[0] - (-1.5f64).exp()).abs() < 1e-12);
        assert!((pmf[2] - (-1.5f64).exp() * 1.5 * 1.5 / 2.0).abs() < 1e-12);
        assert_eq!(poisson_pmf(0.0, 3), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_degenerate_input_is_neutral() {
        let probs = engine().match_probabilities(ExpectedGoals::new(0.0, 0.0));
        assert_eq!(probs.outcome, OutcomeDistribution::NEUTRAL);
        assert_eq!(probs.goals.over_2_5, 0.0);
        assert_eq!(probs.goals.btts, 0.0);
    }

    #[test]
    fn test_invalid_rates_are_clamped() {
        let probs = engine().match_probabilities(ExpectedGoals::new(f64::NAN, -2.0));
        assert_eq!(probs.outcome, OutcomeDistribution::NEUTRAL);

        let probs = engine().match_probabilities(ExpectedGoals::new(1e6, 1e6));
        assert_eq!(probs.outcome, OutcomeDistribution::NEUTRAL);
    }

    #[test]
    fn test_outcomes_sum_to_100() {
        let rates = [0.0, 0.1, 0.5, 0.9, 1.3, 1.8, 2.5, 3.4, 5.0, 8.0];
        for &h in &rates {
            for &a in &rates {
                let o = engine().match_probabilities(ExpectedGoals::new(h, a)).outcome;
                assert!((o.total() - 100.0).abs() <= 0.2, "{h}/{a}: {o:?}");
                for p in [o.home_win, o.draw, o.away_win] {
                    assert!((0.0..=100.0).contains(&p), "{h}/{a}: {o:?}");
                }
            }
        }
    }

    #[test]
    fn test_swapping_rates_swaps_outcomes() {
        let pairs = [(1.8, 1.0), (0.4, 2.7), (1.234, 1.233), (3.0, 0.0)];
        for (h, a) in pairs {
            let fwd = engine().match_probabilities(ExpectedGoals::new(h, a));
            let rev = engine().match_probabilities(ExpectedGoals::new(a, h));
            assert_eq!(fwd.outcome.home_win, rev.outcome.away_win);
            assert_eq!(fwd.outcome.away_win, rev.outcome.home_win);
            assert_eq!(fwd.outcome.draw, rev.outcome.draw);
        }
    }

    #[test]
    fn test_stronger_home_side_ordering() {
        let o = engine()
            .match_probabilities(ExpectedGoals::new(1.8, 1.0))
            .outcome;
        assert!(o.home_win > o.draw, "{o:?}");
        assert!(o.draw > o.away_win, "{o:?}");
    }

    #[test]
    fn test_goal_markets_are_consistent() {
        let g = engine()
            .match_probabilities(ExpectedGoals::new(1.6, 1.2))
            .goals;
        assert!(g.over_1_5 > g.over_2_5);
        assert!(g.over_2_5 > g.over_3_5);
        assert!((g.over_2_5 + g.under_2_5 - 100.0).abs() < 0.11);
        assert!(g.btts > 0.0 && g.btts < 100.0);
    }

    #[test]
    fn test_high_scoring_rates_favour_overs() {
        let g = engine()
            .match_probabilities(ExpectedGoals::new(2.2, 1.8))
            .goals;
        assert!(g.over_2_5 > 60.0, "{g:?}");
    }

    #[test]
    fn test_over_line_tail() {
        let e = engine();
        assert_eq!(e.over_line(0.0, 9.5), 0.0);
        let low = e.over_line(8.0, 9.5);
        let high = e.over_line(11.0, 9.5);
        assert!(low < high);
        assert!((0.0..=100.0).contains(&low));
        // P(X > 0.5) = 1 - e^-1
        assert_eq!(e.over_line(1.0, 0.5), 63.2);
        assert_eq!(e.over_line(10.0, 1e12), 0.0);
    }
}
