//! Guest dataset sources

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use alfred_core::{DatasetSource, Error, GuestRecord, Result};

/// Guest list used by the gala demo
pub const DEFAULT_HUB_DATASET: &str = "agents-course/unit3-invitees";
pub const DEFAULT_SPLIT: &str = "train";

const DATASETS_SERVER_URL: &str = "https://datasets-server.huggingface.co";
const ROWS_PAGE_SIZE: usize = 100;

/// Load guests from a local JSON array or JSON Lines file
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse either a JSON array of records or one record per line
    pub fn parse(content: &str) -> Result<Vec<GuestRecord>> {
        let trimmed = content.trim_start();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        if trimmed.starts_with('[') {
            return serde_json::from_str(trimmed)
                .map_err(|e| Error::Dataset(format!("invalid JSON guest list: {}", e)));
        }

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .map_err(|e| Error::Dataset(format!("line {}: {}", n + 1, e)))
            })
            .collect()
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    async fn load(&self) -> Result<Vec<GuestRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records = Self::parse(&content)?;
        info!(path = %self.path.display(), records = records.len(), "loaded guest file");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[derive(Deserialize)]
struct RowsPage {
    rows: Vec<RowEntry>,
    #[serde(default)]
    num_rows_total: Option<usize>,
}

#[derive(Deserialize)]
struct RowEntry {
    row: GuestRecord,
}

/// Load guests from the Hugging Face datasets-server rows API
pub struct HubDatasetSource {
    client: Client,
    base_url: Url,
    dataset: String,
    config: String,
    split: String,
}

impl HubDatasetSource {
    pub fn new(dataset: impl Into<String>, split: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(DATASETS_SERVER_URL)
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            dataset: dataset.into(),
            config: "default".to_string(),
            split: split.into(),
        })
    }

    /// Point at a different datasets-server deployment
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| Error::Configuration(format!("invalid dataset server URL: {}", e)))?;
        Ok(self)
    }

    async fn fetch_page(&self, offset: usize) -> Result<RowsPage> {
        let url = self
            .base_url
            .join("rows")
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let offset = offset.to_string();
        let length = ROWS_PAGE_SIZE.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("dataset", self.dataset.as_str()),
                ("config", self.config.as_str()),
                ("split", self.split.as_str()),
                ("offset", offset.as_str()),
                ("length", length.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Dataset(format!(
                "dataset server returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[async_trait]
impl DatasetSource for HubDatasetSource {
    async fn load(&self) -> Result<Vec<GuestRecord>> {
        let mut records = Vec::new();

        loop {
            let page = self.fetch_page(records.len()).await?;
            let fetched = page.rows.len();
            records.extend(page.rows.into_iter().map(|entry| entry.row));

            let done = match page.num_rows_total {
                Some(total) => records.len() >= total,
                None => fetched < ROWS_PAGE_SIZE,
            };
            if fetched == 0 || done {
                break;
            }
        }

        info!(dataset = %self.dataset, split = %self.split, records = records.len(), "loaded guest dataset");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("dataset {} ({})", self.dataset, self.split)
    }
}

/// Pick a source for `location`
///
/// Existing paths and `.json`/`.jsonl` names are files, anything else is a
/// hub dataset id.
pub fn dataset_source(location: &str, split: &str) -> Result<Box<dyn DatasetSource>> {
    let path = Path::new(location);
    let is_file = path.exists()
        || matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("json") | Some("jsonl")
        );

    if is_file {
        Ok(Box::new(FileDatasetSource::new(path)))
    } else {
        Ok(Box::new(HubDatasetSource::new(location, split)?))
    }
}

/// Load records, treating any failure as an empty guest list
pub async fn load_records_or_empty(source: &dyn DatasetSource) -> Vec<GuestRecord> {
    match source.load().await {
        Ok(records) => records,
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "no guest records available");
            Vec::new()
        }
    }
}
