//! Team-name similarity for correlating fixtures with odds events.
//!
//! The two providers name clubs differently ("Real Madrid CF" vs "Real
//! Madrid"), so names are normalised and compared with a Sørensen–Dice bigram
//! ratio. Matching is best-effort.

use strsim::sorensen_dice;

/// Club-type affixes that carry no identifying information
const NOISE_WORDS: &[&str] = &[
    "fc", "cf", "afc", "sc", "ac", "as", "cd", "ud", "sd", "rc", "rcd", "ssc", "club", "de",
    "calcio", "the",
];

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        c if c.is_alphanumeric() => c,
        _ => ' ',
    }
}

/// Lowercase, strip accents and punctuation, drop club affixes
pub fn normalize_team_name(name: &str) -> String {
    let folded: String = name.to_lowercase().chars().map(fold_char).collect();
    let words: Vec<&str> = folded.split_whitespace().collect();
    let kept: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !NOISE_WORDS.contains(w))
        .collect();

    if kept.is_empty() {
        words.join(" ")
    } else {
        kept.join(" ")
    }
}

/// Similarity ratio in [0, 1] between two team names
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_team_name(a);
    let b = normalize_team_name(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    sorensen_dice(&a, &b)
}

/// Names match when their similarity exceeds `threshold`
pub fn names_match(a: &str, b: &str, threshold: f64) -> bool {
    name_similarity(a, b) > threshold
}

/// Best candidate whose home and away names both exceed `threshold`.
///
/// `teams` extracts the (home, away) names of a candidate.
pub fn best_match<'a, T, F>(
    candidates: &'a [T],
    home: &str,
    away: &str,
    threshold: f64,
    teams: F,
) -> Option<&'a T>
where
    F: Fn(&T) -> (&str, &str),
{
    candidates
        .iter()
        .filter_map(|candidate| {
            let (c_home, c_away) = teams(candidate);
            let home_score = name_similarity(home, c_home);
            let away_score = name_similarity(away, c_away);
            (home_score > threshold && away_score > threshold)
                .then_some((candidate, home_score + away_score))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}
