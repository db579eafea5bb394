//! Error types for the logging pipeline
//!
//! Errors only surface at construction and serialization seams. Dispatch
//! (`Receptacle::log`) and recording (`Recorder::record`) never propagate
//! errors to the log call site.

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// IO error on a sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry wire serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A platform facility required by a recorder is not present
    #[error("Log facility unavailable: {facility}")]
    FacilityUnavailable { facility: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a facility-unavailable error
    pub fn unavailable(facility: impl Into<String>) -> Self {
        PipelineError::FacilityUnavailable {
            facility: facility.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PipelineError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::unavailable("platform log facade");
        assert_eq!(
            err.to_string(),
            "Log facility unavailable: platform log facade"
        );

        let err = PipelineError::config("RemoteRecorder", "missing endpoint");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for RemoteRecorder: missing endpoint"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: PipelineError = io_err.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
