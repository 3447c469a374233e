use serde::{Deserialize, Serialize};

/// Wager types the model prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    #[serde(rename = "home_win")]
    HomeWin,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "away_win")]
    AwayWin,
    #[serde(rename = "over_1_5")]
    Over15,
    #[serde(rename = "over_2_5")]
    Over25,
    #[serde(rename = "over_3_5")]
    Over35,
    #[serde(rename = "under_2_5")]
    Under25,
    #[serde(rename = "btts_yes")]
    BttsYes,
    #[serde(rename = "corners_over")]
    CornersOver,
    #[serde(rename = "cards_over")]
    CardsOver,
}

impl MarketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketKind::HomeWin => "home_win",
            MarketKind::Draw => "draw",
            MarketKind::AwayWin => "away_win",
            MarketKind::Over15 => "over_1_5",
            MarketKind::Over25 => "over_2_5",
            MarketKind::Over35 => "over_3_5",
            MarketKind::Under25 => "under_2_5",
            MarketKind::BttsYes => "btts_yes",
            MarketKind::CornersOver => "corners_over",
            MarketKind::CardsOver => "cards_over",
        }
    }

    /// Markets on the number of goals, eligible for high-probability signals
    pub fn is_goal_market(&self) -> bool {
        matches!(
            self,
            MarketKind::Over15
                | MarketKind::Over25
                | MarketKind::Over35
                | MarketKind::Under25
                | MarketKind::BttsYes
        )
    }
}

impl std::fmt::Display for MarketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A priced market: model probability plus the quoted odds, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEstimate {
    pub market: MarketKind,
    pub label: String,
    /// Model probability in percent
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds_source: Option<String>,
}

impl MarketEstimate {
    pub fn new(market: MarketKind, label: impl Into<String>, probability: f64) -> Self {
        Self {
            market,
            label: label.into(),
            probability,
            odds: None,
            odds_source: None,
        }
    }

    pub fn with_odds(mut self, odds: f64, source: impl Into<String>) -> Self {
        self.odds = Some(odds);
        self.odds_source = Some(source.into());
        self
    }
}

/// A market flagged by the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSignal {
    /// Model probability beats the odds-implied probability by more than the margin
    Value {
        market: MarketKind,
        label: String,
        probability: f64,
        odds: f64,
        implied_probability: f64,
        /// Percentage points between model and implied probability
        edge: f64,
        /// Expected return per unit staked
        expected_value: f64,
    },
    /// Goal market the model rates above the high-confidence threshold, odds aside
    HighProbability {
        market: MarketKind,
        label: String,
        probability: f64,
    },
}

impl ValueSignal {
    pub fn market(&self) -> MarketKind {
        match self {
            ValueSignal::Value { market, .. } | ValueSignal::HighProbability { market, .. } => {
                *market
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ValueSignal::Value { label, .. } | ValueSignal::HighProbability { label, .. } => label,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, ValueSignal::Value { .. })
    }
}

/// Decimal odds attached to a fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
    /// Bookmaker title, or "Estimated" for the placeholder
    pub source: String,
    /// Draw price computed from the two-way prices rather than quoted
    #[serde(default)]
    pub draw_derived: bool,
    /// Placeholder prices with no bookmaker behind them
    #[serde(default)]
    pub estimated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_2_5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under_2_5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btts_yes: Option<f64>,
}

impl OddsQuote {
    pub const PLACEHOLDER_SOURCE: &'static str = "Estimated";

    /// Generic prices shown when no bookmaker quotes the fixture
    pub fn placeholder() -> Self {
        Self {
            home: 2.10,
            draw: 3.40,
            away: 3.50,
            source: Self::PLACEHOLDER_SOURCE.to_string(),
            draw_derived: false,
            estimated: true,
            over_2_5: None,
            under_2_5: None,
            btts_yes: None,
        }
    }

    /// Price for a market, `None` when not quoted
    pub fn price_for(&self, market: MarketKind) -> Option<f64> {
        match market {
            MarketKind::HomeWin => Some(self.home),
            MarketKind::Draw => Some(self.draw),
            MarketKind::AwayWin => Some(self.away),
            MarketKind::Over25 => self.over_2_5,
            MarketKind::Under25 => self.under_2_5,
            MarketKind::BttsYes => self.btts_yes,
            _ => None,
        }
    }
}
