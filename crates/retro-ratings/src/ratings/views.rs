use super::category::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummaryView {
    pub platform: String,
    pub icon: Option<&'static str>,
    pub display_name: String,
    pub full_name: String,
    pub abbreviated: bool,
    pub stars: String,
    pub score: f64,
    pub score_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub label: &'static str,
    pub rating: f64,
    pub stars: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownView {
    pub categories: Vec<BreakdownEntry>,
    pub total: BreakdownEntry,
}

/// Display-ready row pair: the summary line and its expandable breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRow {
    pub index: usize,
    pub summary: RatingSummaryView,
    pub breakdown: BreakdownView,
}

impl RenderRow {
    pub fn summary_id(&self) -> String {
        format!("rating-{}", self.index)
    }

    pub fn breakdown_id(&self) -> String {
        format!("breakdown-{}", self.index)
    }
}
