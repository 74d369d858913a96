use super::category::{Category, CategoryWeights};
use super::platform::resolve_platform_icon;
use super::record::{RatingRecord, ScoredRecord};
use super::score::{ScoreEngine, ScoreError};
use super::stars::{StarGlyphs, StarRating};
use super::views::{BreakdownEntry, BreakdownView, RatingSummaryView, RenderRow};
use tracing::warn;

const TOTAL_LABEL: &str = "Total";

/// Turns loaded records into ranked, display-ready rows.
///
/// Holds no per-row state; expand/collapse belongs to whoever mounts the rows.
#[derive(Debug, Clone, Default)]
pub struct RatingsTablePresenter {
    engine: ScoreEngine,
    glyphs: StarGlyphs,
}

impl RatingsTablePresenter {
    pub fn new(weights: CategoryWeights) -> Self {
        Self {
            engine: ScoreEngine::new(weights),
            glyphs: StarGlyphs::default(),
        }
    }

    pub fn with_glyphs(mut self, glyphs: StarGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn score_record(&self, record: &RatingRecord) -> Result<ScoredRecord, ScoreError> {
        let composite_score = self.engine.composite_score(&record.ratings)?;
        Ok(ScoredRecord {
            record: record.clone(),
            composite_score,
        })
    }

    /// Scores every record and sorts best-first. Ties keep their input order.
    ///
    /// Records missing a category are skipped with a warning.
    pub fn build_scored_list(&self, records: &[RatingRecord]) -> Vec<ScoredRecord> {
        let mut scored: Vec<ScoredRecord> = records
            .iter()
            .filter_map(|record| match self.score_record(record) {
                Ok(scored) => Some(scored),
                Err(err) => {
                    warn!(game = %record.name, error = %err, "skipping unscorable rating");
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
        scored
    }

    /// One row per scored record, indexed by position in `scored`.
    pub fn build_render_rows(
        &self,
        scored: &[ScoredRecord],
    ) -> Result<Vec<RenderRow>, ScoreError> {
        scored
            .iter()
            .enumerate()
            .map(|(index, scored)| self.render_row(index, scored))
            .collect()
    }

    /// Scores, ranks and renders in one pass.
    pub fn render(&self, records: &[RatingRecord]) -> Vec<RenderRow> {
        let scored = self.build_scored_list(records);
        scored
            .iter()
            .enumerate()
            .filter_map(|(index, scored)| self.render_row(index, scored).ok())
            .collect()
    }

    fn render_row(&self, index: usize, scored: &ScoredRecord) -> Result<RenderRow, ScoreError> {
        let record = &scored.record;
        let score = scored.composite_score;

        let categories = Category::ordered()
            .into_iter()
            .map(|category| {
                let rating = record
                    .ratings
                    .get(category)
                    .ok_or(ScoreError::MissingCategory(category))?;
                Ok(BreakdownEntry {
                    category: Some(category),
                    label: category.label(),
                    rating,
                    stars: self.stars(rating),
                })
            })
            .collect::<Result<Vec<_>, ScoreError>>()?;

        let summary = RatingSummaryView {
            platform: record.platform.clone(),
            icon: resolve_platform_icon(&record.platform),
            display_name: record.display_name().to_string(),
            full_name: record.name.clone(),
            abbreviated: record.short_name.is_some(),
            stars: self.stars(score),
            score,
            score_label: format!("{score:.2}"),
        };

        Ok(RenderRow {
            index,
            summary,
            breakdown: BreakdownView {
                categories,
                total: BreakdownEntry {
                    category: None,
                    label: TOTAL_LABEL,
                    rating: score,
                    stars: self.stars(score),
                },
            },
        })
    }

    fn stars(&self, value: f64) -> String {
        StarRating::from_score(value).render(&self.glyphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::category::CategoryRatings;

    fn record(name: &str, rating: f64) -> RatingRecord {
        RatingRecord::new(name, "SNES", CategoryRatings::uniform(rating))
    }

    fn names(scored: &[ScoredRecord]) -> Vec<&str> {
        scored
            .iter()
            .map(|entry| entry.record.name.as_str())
            .collect()
    }

    #[test]
    fn sorts_descending_by_score() {
        let presenter = RatingsTablePresenter::default();
        let records = vec![record("b", 2.0), record("a", 4.5), record("c", 3.0)];

        let scored = presenter.build_scored_list(&records);

        assert_eq!(names(&scored), vec!["a", "c", "b"]);
        assert!(scored
            .windows(2)
            .all(|pair| pair[0].composite_score >= pair[1].composite_score));
    }

    #[test]
    fn ties_keep_input_order() {
        let presenter = RatingsTablePresenter::default();
        let records = vec![
            record("first", 3.0),
            record("top", 4.0),
            record("second", 3.0),
            record("third", 3.0),
        ];

        let scored = presenter.build_scored_list(&records);

        assert_eq!(names(&scored), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn rescoring_sorted_output_is_stable() {
        let presenter = RatingsTablePresenter::default();
        let records = vec![
            record("x", 1.5),
            record("y", 3.0),
            record("z", 3.0),
            record("w", 5.0),
        ];

        let first = presenter.build_scored_list(&records);
        let again: Vec<RatingRecord> = first.iter().map(|entry| entry.record.clone()).collect();
        let second = presenter.build_scored_list(&again);

        assert_eq!(first, second);
    }

    #[test]
    fn skips_records_missing_a_category() {
        let presenter = RatingsTablePresenter::default();
        let partial = RatingRecord::new(
            "partial",
            "NES",
            CategoryRatings::new().with(Category::Gameplay, 5.0),
        );
        let records = vec![partial.clone(), record("whole", 2.0)];

        let scored = presenter.build_scored_list(&records);

        assert_eq!(names(&scored), vec!["whole"]);
        assert_eq!(
            presenter.score_record(&partial),
            Err(ScoreError::MissingCategory(Category::Graphics))
        );
    }

    #[test]
    fn summary_prefers_short_name_and_keeps_full_name() {
        let presenter = RatingsTablePresenter::default();
        let records = vec![RatingRecord::new(
            "The Legend of Zelda: A Link to the Past",
            "SNES",
            CategoryRatings::uniform(4.5),
        )
        .with_short_name("ALttP")];

        let rows = presenter.render(&records);

        let summary = &rows[0].summary;
        assert_eq!(summary.display_name, "ALttP");
        assert_eq!(summary.full_name, "The Legend of Zelda: A Link to the Past");
        assert!(summary.abbreviated);
        assert_eq!(summary.icon, Some("assets/platforms/snes.png"));
        assert_eq!(summary.score_label, "4.50");
        assert_eq!(summary.stars, "★★★★⯪");
    }

    #[test]
    fn breakdown_lists_categories_then_total() {
        let presenter = RatingsTablePresenter::default();
        let ratings = CategoryRatings::uniform(3.0)
            .with(Category::Gameplay, 5.0)
            .with(Category::Challenge, 1.5);
        let rows = presenter.render(&[RatingRecord::new("Ninja Gaiden", "NES", ratings)]);

        let breakdown = &rows[0].breakdown;
        let labels: Vec<&str> = breakdown.categories.iter().map(|entry| entry.label).collect();
        assert_eq!(
            labels,
            vec![
                "Gameplay",
                "Graphics / Animations",
                "Music / Sounds",
                "Replayability / Length",
                "Challenge / Fairness",
                "Personal Slant",
            ]
        );
        assert_eq!(breakdown.categories[0].stars, "★★★★★");
        assert_eq!(breakdown.categories[4].stars, "★⯪☆☆☆");
        assert_eq!(breakdown.total.label, "Total");
        assert_eq!(breakdown.total.stars, rows[0].summary.stars);
        assert_eq!(breakdown.total.category, None);
    }

    #[test]
    fn rows_are_indexed_by_sorted_position() {
        let presenter = RatingsTablePresenter::default();
        let records = vec![record("low", 1.0), record("high", 4.0)];

        let rows = presenter.render(&records);

        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].summary.full_name, "high");
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].summary_id(), "rating-1");
        assert_eq!(rows[1].breakdown_id(), "breakdown-1");
    }

    #[test]
    fn render_rows_reject_hand_built_records_with_gaps() {
        let presenter = RatingsTablePresenter::default();
        let scored = vec![ScoredRecord {
            record: RatingRecord::new("gap", "NES", CategoryRatings::new()),
            composite_score: 0.0,
        }];

        let err = presenter
            .build_render_rows(&scored)
            .expect_err("gap surfaces");
        assert_eq!(err, ScoreError::MissingCategory(Category::Gameplay));
    }

    #[test]
    fn empty_input_renders_nothing() {
        let presenter = RatingsTablePresenter::default();
        assert!(presenter.render(&[]).is_empty());
        assert_eq!(presenter.build_render_rows(&[]), Ok(Vec::new()));
    }

    #[test]
    fn outline_glyphs_can_be_selected() {
        let presenter = RatingsTablePresenter::default().with_glyphs(StarGlyphs::OUTLINE_HALF);
        let rows = presenter.render(&[record("half", 2.5)]);
        assert_eq!(rows[0].summary.stars, "★★☆☆☆");
    }
}
