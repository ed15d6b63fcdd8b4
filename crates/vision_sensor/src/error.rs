//! Error types for the sensor and its collaborators

use thiserror::Error;

/// Failure reported by a spatial index or occlusion test
///
/// Collaborator failures are transient from the sensor's point of view: the
/// scan cycle that hit one is skipped and the previous result kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The backing structure cannot be queried right now (rebuilding, locked)
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The query ran but failed
    #[error("collaborator query failed: {0}")]
    Failed(String),
}

/// Sensor errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    /// A configuration update was rejected; the previous config stays active
    #[error("invalid sensor configuration: {field} {reason}")]
    Configuration {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A collaborator failed during a scan cycle
    #[error("scan cycle skipped: {0}")]
    TransientQuery(#[from] CollaboratorError),
}

impl SensorError {
    /// Shorthand for a configuration error
    pub fn configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;
