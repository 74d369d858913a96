//! Weighted review scoring and the ranked ratings table built from it.

pub mod category;
pub mod export;
pub mod loader;
pub mod platform;
pub mod presenter;
pub mod record;
pub mod score;
pub mod stars;
pub mod views;

pub use category::{Category, CategoryRatings, CategoryWeights, WeightsError};
pub use export::{write_csv, ExportError};
pub use loader::{DataLoadError, RatingsDataset, RatingsLoader, RejectedEntry};
pub use platform::resolve_platform_icon;
pub use presenter::RatingsTablePresenter;
pub use record::{RatingRecord, ScoredRecord};
pub use score::{
    compute_composite_score, round_to_cents, round_to_nearest_half, ScoreEngine, ScoreError,
};
pub use stars::{render_star_glyphs, StarGlyphs, StarRating};
pub use views::{BreakdownEntry, BreakdownView, RatingSummaryView, RenderRow};
