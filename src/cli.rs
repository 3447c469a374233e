use clap::{Parser, Subcommand};

use crate::config::ModelConfig;
use crate::domain::{ExpectedGoals, OddsQuote};
use crate::engine::{MatchPrediction, Predictor, SideInputs};
use crate::error::{BetBrainError, Result};

#[derive(Parser)]
#[command(name = "betbrain")]
#[command(version)]
#[command(about = "Football match probabilities, odds and value bets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default.toml plus the BETBRAIN_ENV override)
    #[arg(short, long, default_value = "config")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,
    },
    /// Price a fixture offline from two expected-goal rates
    Predict {
        /// Expected goals of the home side
        #[arg(long)]
        home_xg: f64,
        /// Expected goals of the away side
        #[arg(long)]
        away_xg: f64,
        /// Decimal odds for the home win
        #[arg(long, requires_all = ["draw_odds", "away_odds"])]
        home_odds: Option<f64>,
        /// Decimal odds for the draw
        #[arg(long, requires_all = ["home_odds", "away_odds"])]
        draw_odds: Option<f64>,
        /// Decimal odds for the away win
        #[arg(long, requires_all = ["home_odds", "draw_odds"])]
        away_odds: Option<f64>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Offline prediction for the `predict` command
pub fn predict(
    model: ModelConfig,
    home_xg: f64,
    away_xg: f64,
    odds: Option<(f64, f64, f64)>,
) -> Result<MatchPrediction> {
    if !(home_xg.is_finite() && away_xg.is_finite()) || home_xg < 0.0 || away_xg < 0.0 {
        return Err(BetBrainError::Validation(
            "expected goals must be finite and non-negative".to_string(),
        ));
    }

    let quote = odds.map(|(home, draw, away)| OddsQuote {
        home,
        draw,
        away,
        source: "command line".to_string(),
        draw_derived: false,
        estimated: false,
        over_2_5: None,
        under_2_5: None,
        btts_yes: None,
    });

    let predictor = Predictor::new(model);
    Ok(predictor.predict_from_rates(
        ExpectedGoals::new(home_xg, away_xg),
        SideInputs::default(),
        SideInputs::default(),
        quote.as_ref(),
    ))
}

pub fn print_prediction(prediction: &MatchPrediction) {
    let xg = prediction.expected_goals;
    let outcome = prediction.probabilities.outcome;

    println!("\n\x1b[36m═══ Match Prediction ═══\x1b[0m");
    println!("Expected goals:  {:.2} - {:.2}", xg.home, xg.away);
    println!(
        "1X2:             {:.1}% / {:.1}% / {:.1}%",
        outcome.home_win, outcome.draw, outcome.away_win
    );

    println!("\n{:<22} {:>8} {:>8}", "Market", "Model", "Odds");
    println!("{}", "─".repeat(40));
    for market in &prediction.markets {
        let odds = market
            .odds
            .map(|o| format!("{:.2}", o))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<22} {:>7.1}% {:>8}", market.label, market.probability, odds);
    }

    if prediction.signals.is_empty() {
        println!("\nNo signals.");
    } else {
        println!("\n\x1b[33mSignals\x1b[0m");
        for signal in &prediction.signals {
            println!("  {}", signal.label());
        }
    }
}
