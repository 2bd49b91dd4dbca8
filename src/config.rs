use std::{path::PathBuf, time::Duration};

use crate::services::openai_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};

pub const DEFAULT_DATASET_PATH: &str = "data/travel_details.csv";

/// Settings for one planner run, resolved from flags, environment and defaults
///
/// The API key may be absent: it is only checked when a completion request
/// is about to be sent, so an unknown destination is reported without one.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub dataset_path: PathBuf,
    pub timeout: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Read `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` and `TRAVEL_DATASET`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(path) = std::env::var("TRAVEL_DATASET") {
            config.dataset_path = PathBuf::from(path);
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
