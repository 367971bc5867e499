use crate::dataset::Dataset;
use sea_orm::{DbErr, SqlErr};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("cannot open {dataset} dataset at {}: {source}", .path.display())]
    Open {
        dataset: Dataset,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read error in {dataset} dataset after line {line}: {source}")]
    Read {
        dataset: Dataset,
        line: usize,
        source: std::io::Error,
    },
    #[error("malformed {dataset} record at line {line}: {source}")]
    Malformed {
        dataset: Dataset,
        line: usize,
        source: serde_json::Error,
    },
    #[error("{dataset} record at line {line} is missing a required field: {source}")]
    MissingField {
        dataset: Dataset,
        line: usize,
        source: serde_json::Error,
    },
    #[error("{dataset} record at line {line} has an empty check-in label")]
    EmptyCheckinLabel { dataset: Dataset, line: usize },
    #[error("{dataset} record at line {line}: check-in total for day of {label:?} overflows")]
    CheckinOverflow {
        dataset: Dataset,
        line: usize,
        label: String,
    },
    #[error("constraint violation in table {table}: {source}")]
    Constraint { table: String, source: DbErr },
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl LoadError {
    /// Splits serde_json failures into missing-field errors and everything else.
    pub fn from_json(dataset: Dataset, line: usize, source: serde_json::Error) -> Self {
        if source.is_data() && source.to_string().starts_with("missing field") {
            LoadError::MissingField {
                dataset,
                line,
                source,
            }
        } else {
            LoadError::Malformed {
                dataset,
                line,
                source,
            }
        }
    }

    pub fn from_write(table: &str, source: DbErr) -> Self {
        if is_unique_violation(&source) {
            LoadError::Constraint {
                table: table.to_owned(),
                source,
            }
        } else {
            LoadError::Db(source)
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    // sql_err() 只识别带 sqlx 扩展错误码的数据库错误；主键冲突 (1555) 及以
    // RuntimeErr::Internal 文本形式上报的错误不会被归类，只能按 sqlite 的报错文本判断
    err.to_string().contains("UNIQUE constraint failed")
}
