use crate::config::HttpConfig;
use crate::error::SolverError;
use crate::types::hiring::{AnswerPayload, Identity, SubmissionReceipt, WebhookCredential};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Build the HTTP client shared by both calls of a run.
pub fn build_http_client(
    http: &HttpConfig,
    proxy: Option<&Url>,
) -> Result<reqwest::Client, SolverError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(http.user_agent.clone())
        .connect_timeout(http.connect_timeout())
        .timeout(http.timeout());
    if let Some(proxy_url) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}

/// Stateless endpoints of the hiring service.
pub struct HiringApi;

impl HiringApi {
    /// Register `identity` and read back the webhook URL and access token.
    pub async fn generate_webhook(
        client: &reqwest::Client,
        url: &Url,
        identity: &Identity,
    ) -> Result<WebhookCredential, SolverError> {
        let resp = client.post(url.clone()).json(identity).send().await?;
        let resp = ensure_success(resp).await?;

        let bytes = resp.bytes().await?;
        debug!(len = bytes.len(), "generateWebhook response received");
        let payload: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        WebhookCredential::from_payload(&payload)
    }

    /// Post `answer` to the issued webhook with the raw token as `Authorization`.
    pub async fn submit_answer(
        client: &reqwest::Client,
        credential: &WebhookCredential,
        answer: &AnswerPayload,
    ) -> Result<SubmissionReceipt, SolverError> {
        let url = Url::parse(&credential.webhook_url)?;
        let resp = client
            .post(url)
            .header(AUTHORIZATION, credential.access_token.as_str())
            .json(answer)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;

        let status = resp.status();
        let body = resp.text().await?;
        Ok(SubmissionReceipt { status, body })
    }
}

/// Turn a non-2xx response into `SolverError::HttpStatus`, keeping its body.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, SolverError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SolverError::HttpStatus { status, body })
}
