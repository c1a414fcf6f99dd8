use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SolverError;

const TOKEN_PREVIEW_CHARS: usize = 12;

/// Candidate identity sent to the generate-webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    pub name: String,
    #[serde(rename = "regNo", alias = "reg_no")]
    pub reg_no: String,
    pub email: String,
}

/// Webhook URL and access token issued by the generate-webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookCredential {
    pub webhook_url: String,
    pub access_token: String,
}

impl WebhookCredential {
    /// Extract `webhook` and `accessToken` from a generate-webhook response body.
    ///
    /// Non-string values are kept as their JSON text; `null` counts as absent.
    pub fn from_payload(payload: &Value) -> Result<Self, SolverError> {
        let webhook_url = required_field(payload, "webhook")?;
        let access_token = required_field(payload, "accessToken")?;
        Ok(Self {
            webhook_url,
            access_token,
        })
    }

    /// Access token cut down for logging.
    pub fn token_preview(&self) -> String {
        if self.access_token.chars().count() > TOKEN_PREVIEW_CHARS {
            let head: String = self.access_token.chars().take(TOKEN_PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.access_token.clone()
        }
    }
}

fn required_field(payload: &Value, key: &'static str) -> Result<String, SolverError> {
    match payload.get(key) {
        None | Some(Value::Null) => Err(SolverError::MissingField {
            field: key,
            response: payload.clone(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// Body submitted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerPayload {
    #[serde(rename = "finalQuery")]
    pub final_query: String,
}

/// What the webhook answered to a successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub status: StatusCode,
    pub body: String,
}
