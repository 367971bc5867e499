use super::Dataset;
use crate::error::LoadError;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Decodes one JSON object per line, tracking the line number for error reports.
pub struct RecordReader<R> {
    dataset: Dataset,
    lines: Lines<R>,
    line: usize,
}

impl<R: AsyncBufRead + Unpin> RecordReader<R> {
    pub fn new(dataset: Dataset, input: R) -> Self {
        Self {
            dataset,
            lines: input.lines(),
            line: 0,
        }
    }

    /// Line number of the record most recently returned.
    pub fn line(&self) -> usize {
        self.line
    }

    pub async fn next_record<T: DeserializeOwned>(&mut self) -> Result<Option<T>, LoadError> {
        loop {
            let text = self
                .lines
                .next_line()
                .await
                .map_err(|source| LoadError::Read {
                    dataset: self.dataset,
                    line: self.line,
                    source,
                })?;
            let Some(text) = text else {
                return Ok(None);
            };
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            return serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| LoadError::from_json(self.dataset, self.line, source));
        }
    }
}
