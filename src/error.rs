//! Error types for property discovery

use thiserror::Error;

/// Errors raised while validating criteria or records
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscoveryError {
    /// A criteria field holds a value outside its domain
    #[error("invalid criteria: {field} = {value:?}")]
    InvalidCriteria { field: &'static str, value: String },

    /// A record breaks the data model invariants
    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },
}

impl DiscoveryError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        DiscoveryError::InvalidCriteria {
            field,
            value: value.into(),
        }
    }

    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        DiscoveryError::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code, used by the CLI's JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            DiscoveryError::InvalidCriteria { .. } => "invalid_criteria",
            DiscoveryError::MalformedRecord { .. } => "malformed_record",
        }
    }
}

pub type Result<T, E = DiscoveryError> = std::result::Result<T, E>;
