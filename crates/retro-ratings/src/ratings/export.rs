use super::category::Category;
use super::record::ScoredRecord;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write ratings CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush ratings CSV: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    rank: usize,
    platform: &'a str,
    name: &'a str,
    short_name: &'a str,
    score: String,
    gameplay: Option<f64>,
    graphics: Option<f64>,
    music: Option<f64>,
    replay: Option<f64>,
    challenge: Option<f64>,
    slant: Option<f64>,
}

impl<'a> CsvRow<'a> {
    fn new(rank: usize, scored: &'a ScoredRecord) -> Self {
        let record = &scored.record;
        let rating = |category| record.ratings.get(category);
        Self {
            rank,
            platform: &record.platform,
            name: &record.name,
            short_name: record.short_name.as_deref().unwrap_or_default(),
            score: format!("{:.2}", scored.composite_score),
            gameplay: rating(Category::Gameplay),
            graphics: rating(Category::Graphics),
            music: rating(Category::Music),
            replay: rating(Category::Replay),
            challenge: rating(Category::Challenge),
            slant: rating(Category::Slant),
        }
    }
}

/// Writes ranked records as CSV, rank 1 first, in the order given.
pub fn write_csv<W: Write>(scored: &[ScoredRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (position, entry) in scored.iter().enumerate() {
        csv_writer.serialize(CsvRow::new(position + 1, entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}
