use super::Dataset;
use crate::error::LoadError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};

pub type DatasetInput = Box<dyn AsyncBufRead + Send + Unpin>;

/// Where the raw line-delimited datasets come from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn open(&self, dataset: Dataset) -> Result<DatasetInput, LoadError>;
}

/// Reads each dataset from its conventional file name inside one directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(dataset.file_name())
    }
}

#[async_trait]
impl DatasetSource for DirectorySource {
    async fn open(&self, dataset: Dataset) -> Result<DatasetInput, LoadError> {
        let path = self.path_of(dataset);
        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|source| LoadError::Open {
                dataset,
                path,
                source,
            })?;
        Ok(Box::new(BufReader::new(file)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_conventional_names() {
        let source = DirectorySource::new("/data/yelp");
        assert_eq!(
            source.path_of(Dataset::Checkin),
            PathBuf::from("/data/yelp/yelp_academic_dataset_checkin.json")
        );
    }

    #[tokio::test]
    async fn missing_file_is_an_open_error() {
        let source = DirectorySource::new("/nonexistent/yelp-loader-test");
        match source.open(Dataset::User).await {
            Err(LoadError::Open { dataset, .. }) => assert_eq!(dataset, Dataset::User),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("opened a missing file"),
        }
    }
}
