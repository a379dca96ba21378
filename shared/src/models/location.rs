//! Location search models

use serde::{Deserialize, Serialize};

/// A candidate city produced by location search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationCandidate {
    pub id: String,
    pub name: String,
    pub country: String,
}

impl LocationCandidate {
    pub fn indian(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: "India".to_string(),
        }
    }
}
