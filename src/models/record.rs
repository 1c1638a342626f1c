use serde::{Deserialize, Serialize};

/// One numbered failure as printed by the test runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub sequence_number: u32,
    pub title: String,
    /// Diagnostic text after the title line, up to the next failure marker.
    pub body: String,
}

impl FailureRecord {
    pub fn new(sequence_number: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sequence_number,
            title: title.into(),
            body: body.into(),
        }
    }
}
