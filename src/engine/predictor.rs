use serde::{Deserialize, Serialize};

use super::{
    derive_expected_goals, round_to, FormAggregator, ProbabilityEngine, SideInputs,
    ValueDetector,
};
use crate::config::ModelConfig;
use crate::domain::{
    ExpectedGoals, MarketEstimate, MarketKind, MatchProbabilities, OddsQuote, ValueSignal,
};

/// Everything the model says about one fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub expected_goals: ExpectedGoals,
    pub probabilities: MatchProbabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_corners: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_cards: Option<f64>,
    pub markets: Vec<MarketEstimate>,
    pub signals: Vec<ValueSignal>,
}

impl MatchPrediction {
    pub fn value_signals(&self) -> impl Iterator<Item = &ValueSignal> {
        self.signals.iter().filter(|s| s.is_value())
    }
}

/// Form aggregation, score grid and value detection under one configuration
#[derive(Clone)]
pub struct Predictor {
    config: ModelConfig,
    aggregator: FormAggregator,
    engine: ProbabilityEngine,
    detector: ValueDetector,
}

impl Predictor {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            aggregator: FormAggregator::new(&config),
            engine: ProbabilityEngine::new(&config),
            detector: ValueDetector::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn aggregator(&self) -> &FormAggregator {
        &self.aggregator
    }

    /// Price a fixture. Placeholder quotes are shown to users but never used
    /// for value detection.
    pub fn predict(
        &self,
        home: SideInputs<'_>,
        away: SideInputs<'_>,
        quote: Option<&OddsQuote>,
    ) -> MatchPrediction {
        let expected_goals = derive_expected_goals(home, away, &self.config);
        self.predict_from_rates(expected_goals, home, away, quote)
    }

    /// Price a fixture from already derived Poisson rates
    pub fn predict_from_rates(
        &self,
        expected_goals: ExpectedGoals,
        home: SideInputs<'_>,
        away: SideInputs<'_>,
        quote: Option<&OddsQuote>,
    ) -> MatchPrediction {
        let probabilities = self.engine.match_probabilities(expected_goals);
        let outcome = probabilities.outcome;
        let goals = probabilities.goals;

        let mut markets = vec![
            MarketEstimate::new(MarketKind::HomeWin, "Home win", outcome.home_win),
            MarketEstimate::new(MarketKind::Draw, "Draw", outcome.draw),
            MarketEstimate::new(MarketKind::AwayWin, "Away win", outcome.away_win),
            MarketEstimate::new(MarketKind::Over15, "Over 1.5 goals", goals.over_1_5),
            MarketEstimate::new(MarketKind::Over25, "Over 2.5 goals", goals.over_2_5),
            MarketEstimate::new(MarketKind::Over35, "Over 3.5 goals", goals.over_3_5),
            MarketEstimate::new(MarketKind::Under25, "Under 2.5 goals", goals.under_2_5),
            MarketEstimate::new(MarketKind::BttsYes, "Both teams score", goals.btts),
        ];

        let expected_corners = combined_average(home, away, |s| s.avg_corners);
        if let Some(corners) = expected_corners {
            let line = self.config.corners_line;
            markets.push(MarketEstimate::new(
                MarketKind::CornersOver,
                format!("Over {line} corners"),
                self.engine.over_line(corners, line),
            ));
        }

        let expected_cards = combined_average(home, away, |s| s.avg_cards);
        if let Some(cards) = expected_cards {
            let line = self.config.cards_line;
            markets.push(MarketEstimate::new(
                MarketKind::CardsOver,
                format!("Over {line} cards"),
                self.engine.over_line(cards, line),
            ));
        }

        if let Some(quote) = quote.filter(|q| !q.estimated) {
            for market in markets.iter_mut() {
                if let Some(price) = quote.price_for(market.market) {
                    let source = if market.market == MarketKind::Draw && quote.draw_derived {
                        format!("{} (derived)", quote.source)
                    } else {
                        quote.source.clone()
                    };
                    market.odds = Some(price);
                    market.odds_source = Some(source);
                }
            }
        }

        let signals = self.detector.scan(&markets);

        MatchPrediction {
            expected_goals,
            probabilities,
            expected_corners,
            expected_cards,
            markets,
            signals,
        }
    }
}

/// Mean of a per-match average across the sides that have history
fn combined_average<F>(home: SideInputs<'_>, away: SideInputs<'_>, field: F) -> Option<f64>
where
    F: Fn(&crate::domain::TeamSnapshot) -> f64,
{
    let values: Vec<f64> = [home.snapshot, away.snapshot]
        .into_iter()
        .flatten()
        .filter(|s| s.has_history())
        .map(field)
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(round_to(values.iter().sum::<f64>() / values.len() as f64, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TeamSnapshot;

    fn snapshot(xg: f64, conceded: f64) -> TeamSnapshot {
        let mut s = TeamSnapshot::empty(1);
        s.matches_analyzed = 8;
        s.expected_goals = xg;
        s.avg_goals_conceded = conceded;
        s.avg_corners = 10.0;
        s.avg_cards = 4.0;
        s
    }

    fn quote() -> OddsQuote {
        OddsQuote {
            home: 3.5,
            draw: 3.6,
            away: 2.1,
            source: "Bet365".into(),
            draw_derived: true,
            estimated: false,
            over_2_5: Some(1.9),
            under_2_5: Some(1.95),
            btts_yes: None,
        }
    }

    #[test]
    fn test_prediction_has_core_markets() {
        let predictor = Predictor::new(ModelConfig::default());
        let home = snapshot(2.0, 0.8);
        let away = snapshot(1.0, 1.6);
        let p = predictor.predict(
            SideInputs::new(Some(&home), None),
            SideInputs::new(Some(&away), None),
            None,
        );

        assert!(p.probabilities.outcome.home_win > p.probabilities.outcome.away_win);
        assert_eq!(p.expected_corners, Some(10.0));
        assert_eq!(p.expected_cards, Some(4.0));
        assert_eq!(p.markets.len(), 10);
        assert!(p.markets.iter().all(|m| m.odds.is_none()));
        assert_eq!(p.value_signals().count(), 0);
    }

    #[test]
    fn test_quoted_odds_drive_value_signals() {
        let predictor = Predictor::new(ModelConfig::default());
        let home = snapshot(2.0, 0.8);
        let away = snapshot(1.0, 1.6);
        let q = quote();
        let p = predictor.predict(
            SideInputs::new(Some(&home), None),
            SideInputs::new(Some(&away), None),
            Some(&q),
        );

        let home_market = p
            .markets
            .iter()
            .find(|m| m.market == MarketKind::HomeWin)
            .unwrap();
        assert_eq!(home_market.odds, Some(3.5));
        let draw_market = p.markets.iter().find(|m| m.market == MarketKind::Draw).unwrap();
        assert_eq!(draw_market.odds_source.as_deref(), Some("Bet365 (derived)"));

        // Strong home side priced as an outsider
        assert!(p
            .value_signals()
            .any(|s| s.market() == MarketKind::HomeWin));
    }

    #[test]
    fn test_placeholder_quote_is_ignored() {
        let predictor = Predictor::new(ModelConfig::default());
        let home = snapshot(2.5, 0.5);
        let away = snapshot(0.5, 2.5);
        let placeholder = OddsQuote::placeholder();
        let p = predictor.predict(
            SideInputs::new(Some(&home), None),
            SideInputs::new(Some(&away), None),
            Some(&placeholder),
        );
        assert!(p.markets.iter().all(|m| m.odds.is_none()));
        assert_eq!(p.value_signals().count(), 0);
    }

    #[test]
    fn test_no_history_is_neutral_without_corner_markets() {
        let predictor = Predictor::new(ModelConfig::default());
        let p = predictor.predict(SideInputs::default(), SideInputs::default(), None);
        assert_eq!(
            p.probabilities.outcome,
            crate::domain::OutcomeDistribution::NEUTRAL
        );
        assert_eq!(p.markets.len(), 8);
        assert!(p.expected_corners.is_none());
    }
}
