use thiserror::Error;

/// Message shown when the POST never reached GitHub.
pub const PUSH_FAILED: &str = "Unable to push to GitHub. \
    Please ensure your personal access token exists and is not expired, \
    and that your username is typed correctly.";

#[derive(Error, Debug)]
pub enum GistError {
    /// Missing or unusable credential file.
    #[error("{0}")]
    Config(String),

    /// A submission field broke one of its rules.
    #[error("{0}")]
    Validation(String),

    /// Transport failure. The cause stays available through `source()`
    /// for logging but is never part of the message.
    #[error("{PUSH_FAILED}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GistError {
    pub fn validation(message: impl Into<String>) -> Self {
        GistError::Validation(message.into())
    }

    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        GistError::Network(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, GistError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn network_error_hides_cause_in_message() {
        let err = GistError::network(io::Error::new(io::ErrorKind::TimedOut, "dns lookup failed"));
        let shown = err.to_string();
        assert!(shown.starts_with("Unable to push to GitHub."));
        assert!(!shown.contains("dns lookup failed"));
        assert_eq!(err.source().unwrap().to_string(), "dns lookup failed");
    }
}
