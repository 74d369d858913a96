use crate::infra::RatingsTable;
use retro_ratings::ratings::{BreakdownEntry, RenderRow};
use std::collections::BTreeSet;

pub(crate) const EMPTY_STATE: &str = "No ratings yet.";
pub(crate) const LOAD_FAILURE: &str = "Failed to load ratings. Please check the data file.";

/// Which breakdown rows are open, keyed by row index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpansionState {
    expanded: BTreeSet<usize>,
}

impl ExpansionState {
    pub(crate) fn all(rows: &[RenderRow]) -> Self {
        Self {
            expanded: rows.iter().map(|row| row.index).collect(),
        }
    }

    /// Flips one row, returning whether it is now expanded.
    pub(crate) fn toggle(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    pub(crate) fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}

impl FromIterator<usize> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut state = Self::default();
        for index in iter {
            state.toggle(index);
        }
        state
    }
}

pub(crate) fn render_table(table: &RatingsTable, expansion: &ExpansionState) -> String {
    let mut out = String::new();

    if table.rows.is_empty() {
        out.push_str(EMPTY_STATE);
        out.push('\n');
    } else {
        let name_width = table
            .rows
            .iter()
            .map(|row| row.summary.display_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Game".len());
        let platform_width = table
            .rows
            .iter()
            .map(|row| row.summary.platform.chars().count())
            .max()
            .unwrap_or(0)
            .max("Platform".len());

        out.push_str(&format!(
            "{:>3}  {:<platform_width$}  {:<name_width$}  {:<5}  {:>5}\n",
            "#", "Platform", "Game", "Stars", "Score"
        ));
        for row in &table.rows {
            write_summary(&mut out, row, platform_width, name_width);
            if expansion.is_expanded(row.index) {
                write_breakdown(&mut out, row);
            }
        }
    }

    let skipped = table.skipped();
    if skipped > 0 {
        let noun = if skipped == 1 { "entry" } else { "entries" };
        out.push_str(&format!(
            "\n{skipped} {noun} skipped ({} malformed, {} incomplete)\n",
            table.rejected().len(),
            table.unscored()
        ));
    }

    out
}

fn write_summary(out: &mut String, row: &RenderRow, platform_width: usize, name_width: usize) {
    let summary = &row.summary;
    out.push_str(&format!(
        "{:>3}  {:<platform_width$}  {:<name_width$}  {}  {:>5}\n",
        row.index, summary.platform, summary.display_name, summary.stars, summary.score_label
    ));
    if summary.abbreviated {
        out.push_str(&format!(
            "     {:<platform_width$}  ({})\n",
            "", summary.full_name
        ));
    }
}

fn write_breakdown(out: &mut String, row: &RenderRow) {
    let label_width = row
        .breakdown
        .categories
        .iter()
        .map(|entry| entry.label.len())
        .max()
        .unwrap_or(0);

    let mut line = |entry: &BreakdownEntry| {
        out.push_str(&format!(
            "       {:<label_width$}  {}\n",
            entry.label, entry.stars
        ));
    };
    for entry in &row.breakdown.categories {
        line(entry);
    }
    line(&row.breakdown.total);
}
