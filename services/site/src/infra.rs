use metrics_exporter_prometheus::PrometheusHandle;
use retro_ratings::config::RatingsConfig;
use retro_ratings::ratings::{
    DataLoadError, RatingsDataset, RatingsLoader, RatingsTablePresenter, RejectedEntry, RenderRow,
};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: Arc<RatingsSource>,
}

/// Result of one load-and-render pass.
#[derive(Debug)]
pub(crate) struct RatingsTable {
    pub(crate) dataset: RatingsDataset,
    pub(crate) rows: Vec<RenderRow>,
}

impl RatingsTable {
    pub(crate) fn rejected(&self) -> &[RejectedEntry] {
        &self.dataset.rejected
    }

    /// Loaded records that produced no row because a category was missing.
    pub(crate) fn unscored(&self) -> usize {
        self.dataset.records.len().saturating_sub(self.rows.len())
    }

    /// Document entries that did not make it into the table for any reason.
    pub(crate) fn skipped(&self) -> usize {
        self.rejected().len() + self.unscored()
    }
}

/// The ratings document plus the presenter that ranks it.
#[derive(Debug, Clone)]
pub(crate) struct RatingsSource {
    data_path: PathBuf,
    assets_dir: PathBuf,
    presenter: RatingsTablePresenter,
}

impl RatingsSource {
    pub(crate) fn new(config: &RatingsConfig) -> Self {
        Self {
            data_path: config.data_path.clone(),
            assets_dir: config.assets_dir.clone(),
            presenter: RatingsTablePresenter::new(config.weights),
        }
    }

    pub(crate) fn presenter(&self) -> &RatingsTablePresenter {
        &self.presenter
    }

    pub(crate) fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Reads the document afresh and renders every row; nothing is cached.
    pub(crate) async fn load(&self) -> Result<RatingsTable, DataLoadError> {
        let dataset = RatingsLoader::load(&self.data_path)
            .await
            .inspect_err(|err| {
                error!(path = %self.data_path.display(), error = %err, "failed to load ratings")
            })?;
        let rows = self.presenter.render(&dataset.records);
        Ok(RatingsTable { dataset, rows })
    }

    /// Maps a request path under `/assets` onto the assets directory.
    ///
    /// Only plain relative components are accepted.
    pub(crate) fn asset_path(&self, requested: &str) -> Option<PathBuf> {
        let relative = Path::new(requested);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if requested.is_empty() || !plain {
            return None;
        }
        Some(self.assets_dir.join("assets").join(relative))
    }
}
