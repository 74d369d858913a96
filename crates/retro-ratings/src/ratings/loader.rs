use super::category::CategoryRatings;
use super::record::RatingRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("ratings data file {} not found", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read ratings data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ratings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An entry of the document that could not be turned into a [`RatingRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEntry {
    pub position: usize,
    pub reason: String,
}

/// Records read from one ratings document, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingsDataset {
    pub records: Vec<RatingRecord>,
    pub rejected: Vec<RejectedEntry>,
}

impl RatingsDataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingsDocument {
    #[serde(default)]
    ratings_list: Option<Vec<Value>>,
    #[serde(default)]
    ratings: Option<Vec<Value>>,
}

impl RatingsDocument {
    fn into_entries(self) -> Vec<Value> {
        self.ratings_list.or(self.ratings).unwrap_or_default()
    }
}

/// Reads ratings documents. Each call yields a complete dataset or one error.
pub struct RatingsLoader;

impl RatingsLoader {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<RatingsDataset, DataLoadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| Self::io_error(path, err))?;
        Self::from_slice(&bytes)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RatingsDataset, DataLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| Self::io_error(path, err))?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RatingsDataset, DataLoadError> {
        let document: RatingsDocument = serde_json::from_reader(reader)?;
        Ok(Self::collect(document))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<RatingsDataset, DataLoadError> {
        let document: RatingsDocument = serde_json::from_slice(bytes)?;
        Ok(Self::collect(document))
    }

    fn io_error(path: &Path, err: std::io::Error) -> DataLoadError {
        if err.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            DataLoadError::Io(err)
        }
    }

    fn collect(document: RatingsDocument) -> RatingsDataset {
        let mut dataset = RatingsDataset::default();

        for (position, entry) in document.into_entries().into_iter().enumerate() {
            match serde_json::from_value::<RatingRecord>(entry) {
                Ok(mut record) => {
                    for (category, value) in record.ratings.clamp_in_place() {
                        warn!(
                            game = %record.name,
                            %category,
                            value,
                            "rating outside [{}, {}], clamped",
                            CategoryRatings::MIN,
                            CategoryRatings::MAX
                        );
                    }
                    dataset.records.push(record);
                }
                Err(err) => {
                    warn!(position, error = %err, "skipping malformed rating entry");
                    dataset.rejected.push(RejectedEntry {
                        position,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            entries = dataset.records.len(),
            rejected = dataset.rejected.len(),
            "loaded ratings"
        );
        dataset
    }
}
