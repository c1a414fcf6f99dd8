use crate::api::hiring_api::{HiringApi, build_http_client};
use crate::config::Config;
use crate::error::SolverError;
use crate::service::question::Question;
use crate::types::hiring::{Identity, SubmissionReceipt, WebhookCredential};
use tracing::{error, info, warn};
use url::Url;

/// How a run ended. Failures are already logged when this is returned.
#[derive(Debug)]
pub enum FlowOutcome {
    RegistrationFailed(SolverError),
    SubmissionFailed {
        question: Question,
        error: SolverError,
    },
    Submitted {
        question: Question,
        receipt: SubmissionReceipt,
    },
}

/// Register, pick the answer, submit it to the issued webhook.
pub struct WebhookFlow {
    client: reqwest::Client,
    generate_webhook_url: Url,
    identity: Identity,
}

impl WebhookFlow {
    pub fn new(client: reqwest::Client, generate_webhook_url: Url, identity: Identity) -> Self {
        Self {
            client,
            generate_webhook_url,
            identity,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, SolverError> {
        let client = build_http_client(&cfg.http, cfg.proxy.as_ref())?;
        Ok(Self::new(
            client,
            cfg.solver.generate_webhook_url.clone(),
            cfg.solver.request.clone(),
        ))
    }

    /// Run both steps once. Never fails; every error is logged and reported in the outcome.
    pub async fn run(&self) -> FlowOutcome {
        info!("Starting webhook flow");
        let outcome = self.run_inner().await;
        info!("Webhook flow completed");
        outcome
    }

    async fn run_inner(&self) -> FlowOutcome {
        let credential = match self.register().await {
            Ok(credential) => credential,
            Err(e) => return FlowOutcome::RegistrationFailed(e),
        };

        let question = Question::for_reg_no(&self.identity.reg_no);
        info!(reg_no = %self.identity.reg_no, "RegNo considered {}", question.label());
        if question == Question::Two {
            warn!("No answer prepared for Question 2; submitting the Question 1 query");
        }
        let answer = question.answer();

        info!("Submitting final query to webhook");
        match HiringApi::submit_answer(&self.client, &credential, &answer).await {
            Ok(receipt) => {
                info!(status = %receipt.status, "Submit response status");
                info!(body = %receipt.body, "Submit response body");
                FlowOutcome::Submitted { question, receipt }
            }
            Err(e) => {
                log_failure("submitting finalQuery", &e);
                FlowOutcome::SubmissionFailed { question, error: e }
            }
        }
    }

    async fn register(&self) -> Result<WebhookCredential, SolverError> {
        info!(url = %self.generate_webhook_url, "Calling generateWebhook endpoint");
        let credential =
            HiringApi::generate_webhook(&self.client, &self.generate_webhook_url, &self.identity)
                .await
                .inspect_err(|e| log_failure("calling generateWebhook", e))?;
        info!(webhook = %credential.webhook_url, "Received webhook URL");
        info!(
            access_token = %credential.token_preview(),
            "Received accessToken (truncated)"
        );
        Ok(credential)
    }
}

fn log_failure(stage: &str, err: &SolverError) {
    match err {
        SolverError::HttpStatus { status, body } => {
            error!(%status, body = %body, "Non-2xx status when {}", stage);
        }
        SolverError::MissingField { field, response } => {
            error!(
                field = *field,
                "Response missing required fields when {}. Full response: {}", stage, response
            );
        }
        other => {
            error!(error = %other, "Exception when {}", stage);
        }
    }
}
