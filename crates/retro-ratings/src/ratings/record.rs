use super::category::CategoryRatings;
use serde::{Deserialize, Serialize};

/// One reviewed game as it appears in the ratings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRatingRecord")]
pub struct RatingRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub platform: String,
    pub ratings: CategoryRatings,
}

impl RatingRecord {
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        ratings: CategoryRatings,
    ) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            platform: platform.into(),
            ratings,
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Short name when the review has one, full name otherwise.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRatingRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    game: Option<String>,
    #[serde(default, alias = "short_name")]
    short_name: Option<String>,
    platform: String,
    ratings: CategoryRatings,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rating entry has neither a 'name' nor a 'game' field")]
pub struct MissingNameError;

impl TryFrom<RawRatingRecord> for RatingRecord {
    type Error = MissingNameError;

    fn try_from(raw: RawRatingRecord) -> Result<Self, Self::Error> {
        let name = non_blank(raw.name)
            .or_else(|| non_blank(raw.game))
            .ok_or(MissingNameError)?;

        Ok(Self {
            name,
            short_name: non_blank(raw.short_name),
            platform: raw.platform,
            ratings: raw.ratings,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// A record paired with its composite score for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: RatingRecord,
    pub composite_score: f64,
}
