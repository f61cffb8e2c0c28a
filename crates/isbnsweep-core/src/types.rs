//! Data-model types shared by the sweep passes and the reporter

use serde::{Deserialize, Serialize};

/// One query-result row: an entity and the ISBN value stored on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnRecord {
    pub qid: String,
    pub value: String,
}

/// An intended claim overwrite, consumed immediately by the write step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub qid: String,
    pub old_value: String,
    pub new_value: String,
}

/// One invalid stored value, destined for the error report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub qid: String,
    pub value: String,
}

impl ErrorEntry {
    pub fn new(qid: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            qid: qid.into(),
            value: value.into(),
        }
    }
}
