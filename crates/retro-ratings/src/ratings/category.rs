use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One of the six fixed rating dimensions of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gameplay,
    Graphics,
    Music,
    Replay,
    Challenge,
    Slant,
}

impl Category {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Gameplay,
            Self::Graphics,
            Self::Music,
            Self::Replay,
            Self::Challenge,
            Self::Slant,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Gameplay => "gameplay",
            Self::Graphics => "graphics",
            Self::Music => "music",
            Self::Replay => "replay",
            Self::Challenge => "challenge",
            Self::Slant => "slant",
        }
    }

    /// Heading used for the category in a score breakdown.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gameplay => "Gameplay",
            Self::Graphics => "Graphics / Animations",
            Self::Music => "Music / Sounds",
            Self::Replay => "Replayability / Length",
            Self::Challenge => "Challenge / Fairness",
            Self::Slant => "Personal Slant",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("weight for {category} must be within [0, 1], got {value}")]
    OutOfRange { category: Category, value: f64 },
    #[error("category weights must sum to 1.0, got {sum}")]
    BadSum { sum: f64 },
    #[error("unknown rating category '{0}'")]
    UnknownCategory(String),
    #[error("missing weight for {0}")]
    MissingCategory(Category),
    #[error("malformed weight entry '{0}', expected <category>=<weight>")]
    Malformed(String),
}

/// Per-category weights of the composite score. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub gameplay: f64,
    pub graphics: f64,
    pub music: f64,
    pub replay: f64,
    pub challenge: f64,
    pub slant: f64,
}

impl CategoryWeights {
    pub const STANDARD: Self = Self {
        gameplay: 0.2,
        graphics: 0.2,
        music: 0.2,
        replay: 0.1,
        challenge: 0.1,
        slant: 0.2,
    };

    const SUM_TOLERANCE: f64 = 1e-6;

    pub const fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Gameplay => self.gameplay,
            Category::Graphics => self.graphics,
            Category::Music => self.music,
            Category::Replay => self.replay,
            Category::Challenge => self.challenge,
            Category::Slant => self.slant,
        }
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        for category in Category::ordered() {
            let value = self.weight(category);
            if !(0.0..=1.0).contains(&value) {
                return Err(WeightsError::OutOfRange { category, value });
            }
        }

        let sum: f64 = Category::ordered()
            .into_iter()
            .map(|category| self.weight(category))
            .sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(WeightsError::BadSum { sum });
        }

        Ok(())
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Parses `gameplay=0.2,graphics=0.2,...`. Every category must be named once.
impl FromStr for CategoryWeights {
    type Err = WeightsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parsed: BTreeMap<Category, f64> = BTreeMap::new();

        for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| WeightsError::Malformed(entry.to_string()))?;
            let key = key.trim().to_ascii_lowercase();
            let category = Category::from_key(&key)
                .ok_or_else(|| WeightsError::UnknownCategory(key.clone()))?;
            let value = value
                .trim()
                .parse::<f64>()
                .map_err(|_| WeightsError::Malformed(entry.to_string()))?;
            parsed.insert(category, value);
        }

        let lookup = |category: Category| {
            parsed
                .get(&category)
                .copied()
                .ok_or(WeightsError::MissingCategory(category))
        };

        let weights = Self {
            gameplay: lookup(Category::Gameplay)?,
            graphics: lookup(Category::Graphics)?,
            music: lookup(Category::Music)?,
            replay: lookup(Category::Replay)?,
            challenge: lookup(Category::Challenge)?,
            slant: lookup(Category::Slant)?,
        };
        weights.validate()?;
        Ok(weights)
    }
}

/// Ratings of one record keyed by category, each expected in [0, 5].
///
/// A category may be absent; scoring reports the gap instead of guessing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryRatings(BTreeMap<Category, f64>);

impl CategoryRatings {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Every category rated with the same value.
    pub fn uniform(value: f64) -> Self {
        Category::ordered()
            .into_iter()
            .map(|category| (category, value))
            .collect()
    }

    pub fn with(mut self, category: Category, value: f64) -> Self {
        self.0.insert(category, value);
        self
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.0.get(&category).copied()
    }

    pub fn missing(&self) -> Option<Category> {
        Category::ordered()
            .into_iter()
            .find(|category| !self.0.contains_key(category))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(category, value)| (*category, *value))
    }

    /// Clamps every value into [0, 5], returning the categories that moved.
    pub(crate) fn clamp_in_place(&mut self) -> Vec<(Category, f64)> {
        let mut adjusted = Vec::new();
        for (category, value) in self.0.iter_mut() {
            let clamped = value.clamp(Self::MIN, Self::MAX);
            if clamped != *value {
                adjusted.push((*category, *value));
                *value = clamped;
            }
        }
        adjusted
    }
}

impl FromIterator<(Category, f64)> for CategoryRatings {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for CategoryRatings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        let mut ratings = BTreeMap::new();
        for (key, value) in raw {
            match Category::from_key(&key) {
                Some(category) => {
                    ratings.insert(category, value);
                }
                None => debug!(key = %key, "ignoring unknown rating category"),
            }
        }
        Ok(Self(ratings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_weights_are_valid() {
        CategoryWeights::STANDARD
            .validate()
            .expect("standard weights sum to one");
        assert_eq!(CategoryWeights::default(), CategoryWeights::STANDARD);
        assert_eq!(CategoryWeights::STANDARD.weight(Category::Replay), 0.1);
    }

    #[test]
    fn parses_weight_override() {
        let weights: CategoryWeights =
            "gameplay=0.3, graphics=0.1,music=0.2,replay=0.1,challenge=0.1,SLANT=0.2"
                .parse()
                .expect("override parses");
        assert_eq!(weights.gameplay, 0.3);
        assert_eq!(weights.graphics, 0.1);
        assert_eq!(weights.slant, 0.2);
    }

    #[test]
    fn rejects_override_missing_a_category() {
        let err = "gameplay=0.5,graphics=0.5"
            .parse::<CategoryWeights>()
            .expect_err("incomplete override rejected");
        assert_eq!(err, WeightsError::MissingCategory(Category::Music));
    }

    #[test]
    fn rejects_override_not_summing_to_one() {
        let err = "gameplay=0.5,graphics=0.5,music=0.5,replay=0,challenge=0,slant=0"
            .parse::<CategoryWeights>()
            .expect_err("sum above one rejected");
        assert!(matches!(err, WeightsError::BadSum { .. }));
    }

    #[test]
    fn rejects_unknown_and_malformed_entries() {
        assert_eq!(
            "speed=1".parse::<CategoryWeights>(),
            Err(WeightsError::UnknownCategory("speed".to_string()))
        );
        assert_eq!(
            "gameplay".parse::<CategoryWeights>(),
            Err(WeightsError::Malformed("gameplay".to_string()))
        );
    }

    #[test]
    fn ratings_ignore_unknown_keys_and_report_missing() {
        let ratings: CategoryRatings =
            serde_json::from_str(r#"{"gameplay":4.5,"graphics":3,"story":5}"#)
                .expect("ratings parse");
        assert_eq!(ratings.get(Category::Gameplay), Some(4.5));
        assert_eq!(ratings.iter().count(), 2);
        assert_eq!(ratings.missing(), Some(Category::Music));
        assert_eq!(CategoryRatings::uniform(1.0).missing(), None);
    }

    #[test]
    fn clamping_reports_adjusted_categories() {
        let mut ratings = CategoryRatings::uniform(3.0)
            .with(Category::Music, 7.0)
            .with(Category::Slant, -1.0);
        let adjusted = ratings.clamp_in_place();
        assert_eq!(
            adjusted,
            vec![(Category::Music, 7.0), (Category::Slant, -1.0)]
        );
        assert_eq!(ratings.get(Category::Music), Some(5.0));
        assert_eq!(ratings.get(Category::Slant), Some(0.0));
    }
}
