use super::category::{Category, CategoryRatings, CategoryWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("rating for category '{0}' is missing")]
    MissingCategory(Category),
}

/// Stateless scorer applying category weights to a record's ratings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine {
    weights: CategoryWeights,
}

impl ScoreEngine {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    /// Weighted sum of the six category ratings, rounded to two decimals.
    pub fn composite_score(&self, ratings: &CategoryRatings) -> Result<f64, ScoreError> {
        let mut total = 0.0;
        for category in Category::ordered() {
            let rating = ratings
                .get(category)
                .ok_or(ScoreError::MissingCategory(category))?;
            total += rating * self.weights.weight(category);
        }
        Ok(round_to_cents(total))
    }
}

/// Scores `ratings` with the standard weights.
pub fn compute_composite_score(ratings: &CategoryRatings) -> Result<f64, ScoreError> {
    ScoreEngine::default().composite_score(ratings)
}

/// Half-up rounding at the second decimal.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Nearest multiple of 0.5; ties go away from zero.
pub fn round_to_nearest_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
