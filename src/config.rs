// SYNOID Genre Config
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Pipeline settings. Loaded from JSON with a default fallback, then
// optionally overridden from the environment (.env supported).

use crate::error::{GenreError, Result};
use crate::posters::normalizer::TargetSize;
use crate::training::forest::{ForestConfig, MaxFeatures};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreConfig {
    /// Root of the on-disk data; posters live under `<data_root>/images`.
    pub data_root: PathBuf,
    pub api_url: String,
    pub api_key: Option<String>,
    /// Pause after each successful download.
    pub rate_limit_pause_ms: u64,
    pub target_size: TargetSize,
    pub allow_network: bool,
    pub cv_folds: usize,
    pub forest: ForestConfig,
}

impl Default for GenreConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            rate_limit_pause_ms: 500,
            target_size: TargetSize::default(),
            allow_network: false,
            cv_folds: 5,
            forest: ForestConfig::default(),
        }
    }
}

impl GenreConfig {
    /// Read a JSON config file, falling back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("[CONFIG] Loaded genre config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("[CONFIG] Ignoring invalid config {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("[CONFIG] Using default genre config");
                Self::default()
            }
        }
    }

    /// Defaults plus `.env` / process environment overrides.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(root) = std::env::var("SYNOID_DATA_ROOT") {
            self.data_root = PathBuf::from(root);
        }
        if let Ok(url) = std::env::var("SYNOID_OMDB_URL") {
            self.api_url = url;
        }
        if let Ok(key) = std::env::var("SYNOID_OMDB_API_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.target_size.height == 0 || self.target_size.width == 0 {
            return Err(GenreError::Config(format!(
                "target size {}x{} has no pixels",
                self.target_size.height, self.target_size.width
            )));
        }
        if self.cv_folds < 2 {
            return Err(GenreError::Config(format!(
                "cv_folds must be at least 2, got {}",
                self.cv_folds
            )));
        }
        if self.forest.n_estimators == 0 {
            return Err(GenreError::Config("forest needs at least one estimator".to_string()));
        }
        if let MaxFeatures::Fraction(f) = self.forest.max_features {
            if !(f > 0.0 && f <= 1.0) {
                return Err(GenreError::Config(format!(
                    "max_features fraction must be in (0, 1], got {}",
                    f
                )));
            }
        }
        Ok(())
    }

    pub fn image_cache_dir(&self) -> PathBuf {
        self.data_root.join("images")
    }

    pub fn rate_limit_pause(&self) -> Duration {
        Duration::from_millis(self.rate_limit_pause_ms)
    }
}
