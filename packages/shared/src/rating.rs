//! Elo rating math for settled games. Pure functions, no storage access.

pub const DEFAULT_K_FACTOR: f64 = 32.0;

#[derive(Debug)]
pub enum RatingError {
    NonFiniteInput(String),
}

impl std::fmt::Display for RatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingError::NonFiniteInput(msg) => write!(f, "Non-finite rating input: {}", msg),
        }
    }
}

impl std::error::Error for RatingError {}

/// Computes post-game ratings from the standard logistic expected-score
/// model. Returns (new winner rating, new loser rating).
pub fn update_ratings(
    winner_rating: f64,
    loser_rating: f64,
    k_factor: f64,
) -> Result<(f64, f64), RatingError> {
    if !winner_rating.is_finite() || !loser_rating.is_finite() || !k_factor.is_finite() {
        return Err(RatingError::NonFiniteInput(format!(
            "winner={}, loser={}, k={}",
            winner_rating, loser_rating, k_factor
        )));
    }

    let expected_winner = 1.0 / (1.0 + 10f64.powf((loser_rating - winner_rating) / 400.0));
    let expected_loser = 1.0 - expected_winner;

    let new_winner_rating = winner_rating + k_factor * (1.0 - expected_winner);
    let new_loser_rating = loser_rating + k_factor * (0.0 - expected_loser);

    Ok((new_winner_rating, new_loser_rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ratings_split_k_evenly() {
        let (winner, loser) = update_ratings(1200.0, 1200.0, 32.0).unwrap();

        assert_eq!(winner, 1216.0);
        assert_eq!(loser, 1184.0);
    }

    #[test]
    fn test_upset_swings_harder_than_expected_win() {
        // Favourite wins: small gain.
        let (favourite_after, _) = update_ratings(1400.0, 1200.0, 32.0).unwrap();
        let favourite_gain = favourite_after - 1400.0;

        // Underdog wins: large gain.
        let (underdog_after, _) = update_ratings(1200.0, 1400.0, 32.0).unwrap();
        let underdog_gain = underdog_after - 1200.0;

        assert!(favourite_gain < underdog_gain);
        assert!(favourite_gain > 0.0);
    }

    #[test]
    fn test_rating_changes_are_symmetric() {
        let (winner, loser) = update_ratings(1350.0, 1275.0, 32.0).unwrap();

        let winner_delta = winner - 1350.0;
        let loser_delta = loser - 1275.0;

        assert!((winner_delta + loser_delta).abs() < 1e-9);
    }

    #[test]
    fn test_default_k_factor() {
        assert_eq!(DEFAULT_K_FACTOR, 32.0);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(update_ratings(f64::NAN, 1200.0, 32.0).is_err());
        assert!(update_ratings(1200.0, f64::INFINITY, 32.0).is_err());
        assert!(update_ratings(1200.0, 1200.0, f64::NAN).is_err());
    }
}
