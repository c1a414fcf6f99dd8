use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SolverError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream returned status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Response missing required field `{field}`. Full response: {response}")]
    MissingField {
        field: &'static str,
        response: Value,
    },
}

impl SolverError {
    /// Status code carried by the error, if the upstream answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SolverError::HttpStatus { status, .. } => Some(*status),
            SolverError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Response body carried by the error, if any was read.
    pub fn body(&self) -> Option<&str> {
        match self {
            SolverError::HttpStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Full response of a registration that lacked a required field.
    pub fn response(&self) -> Option<&Value> {
        match self {
            SolverError::MissingField { response, .. } => Some(response),
            _ => None,
        }
    }
}
