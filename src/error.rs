use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error("request to {url} returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("unexpected payload: {0}")]
    Payload(String),
    #[error("invalid configuration:\n  - {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The two failure kinds a fetch can end in, plus everything that is not a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    MalformedPayload,
    Other,
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn payload<T: Into<String>>(msg: T) -> Self {
        AppError::Payload(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Reqwest(err) if err.is_decode() => FailureKind::MalformedPayload,
            AppError::Reqwest(_) | AppError::Status { .. } => FailureKind::Network,
            AppError::Json(_) | AppError::Payload(_) => FailureKind::MalformedPayload,
            AppError::Other(err) => match err.downcast_ref::<AppError>() {
                Some(inner) => inner.kind(),
                None if err.downcast_ref::<reqwest::Error>().is_some() => FailureKind::Network,
                None if err.downcast_ref::<serde_json::Error>().is_some() => {
                    FailureKind::MalformedPayload
                }
                None => FailureKind::Other,
            },
            _ => FailureKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_as_network_failure() {
        let err = AppError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            url: "http://localhost/api/stocks/search".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Network);
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn classifies_decode_errors_as_malformed_payload() {
        let json_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        assert_eq!(AppError::from(json_err).kind(), FailureKind::MalformedPayload);
        assert_eq!(
            AppError::payload("expected an array").kind(),
            FailureKind::MalformedPayload
        );
    }

    #[test]
    fn context_wrapped_errors_keep_their_kind() {
        let json_err = serde_json::from_str::<Vec<u32>>("[").unwrap_err();
        let wrapped: std::result::Result<(), _> = Err(json_err);
        let err: AppError = wrapped.context("decoding suggestions").unwrap_err().into();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);
    }
}
