use crate::model::TaskId;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("unparseable time value: {0:?}")]
    Unparseable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid time grid: {0}")]
    InvalidGrid(&'static str),
}

/// Avertissement non bloquant remonté par une passe de layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutWarning {
    pub task_id: TaskId,
    pub message: String,
}
