use log::warn;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://yelp_dataset.db?mode=rwc";
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_BATCH_SIZE: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub database_url: String,
    pub data_dir: PathBuf,
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl LoaderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let batch_size = match value("LOAD_BATCH_SIZE") {
            None => defaults.batch_size,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(
                        "LOAD_BATCH_SIZE={:?} is not a positive integer, using {}",
                        raw, defaults.batch_size
                    );
                    defaults.batch_size
                }
            },
        };

        Self {
            database_url: value("DATABASE_URL").unwrap_or(defaults.database_url),
            data_dir: value("YELP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            batch_size,
        }
    }
}
