//! Solve pipeline error types.

use thiserror::Error;

/// Why a single solve attempt was abandoned.
///
/// None of these is fatal to the session; the caller's state is left exactly
/// as it was before the attempt.
#[derive(Error, Debug)]
pub enum SolveError {
    /// Solve triggered with nothing drawn.
    #[error("nothing to solve: the canvas has no ink")]
    EmptyInk,

    /// A solve is already outstanding for this session.
    #[error("a solve request is already in flight")]
    InFlight,

    /// The request did not complete (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not the expected envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The service reported an error in its envelope.
    #[error("service rejected the request: {0}")]
    Rejected(String),

    /// The surface could not be encoded as PNG.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Invalid solver configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SolveError {
    /// Whether re-submitting the same, unmodified ink may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SolveError::Transport(_)
                | SolveError::Status { .. }
                | SolveError::MalformedResponse(_)
                | SolveError::Rejected(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SolveError>;
