//! Errors raised by remote API calls.

use thiserror::Error;

/// Errors arising from a single remote lookup or download.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was empty; no request was sent.
    #[error("{argument} must be specified")]
    InvalidArgument {
        /// Name of the rejected argument.
        argument: &'static str,
    },

    /// The request failed at the transport level or returned an error status.
    #[error("request failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The response body was not the expected JSON document.
    #[error("malformed response from {url}: {reason}")]
    Decode {
        /// The URL whose body failed to decode.
        url: String,
        /// The decoder's description of the problem.
        reason: String,
    },

    /// Writing a downloaded body to disk failed.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_the_argument() {
        let err = ApiError::InvalidArgument {
            argument: "version",
        };
        assert_eq!(err.to_string(), "version must be specified");
    }

    #[test]
    fn not_found_names_the_url() {
        let err = ApiError::NotFound {
            url: "https://example.test/versions/9.9".to_owned(),
        };
        assert!(err.to_string().contains("/versions/9.9"));
    }
}
