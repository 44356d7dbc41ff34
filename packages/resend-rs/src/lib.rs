// https://resend.com/docs/api-reference/emails/send-email

use std::fmt;

pub mod models;
use reqwest::{header, Client};

use crate::models::{ApiErrorBody, SendEmailRequest, SendEmailResponse};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone)]
pub struct ResendOptions {
    pub api_key: String,
    pub base_url: String,
}

impl ResendOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ResendError {
    /// The request never produced a response (DNS, TLS, timeout...)
    Transport(reqwest::Error),
    /// The API answered with a non-success status
    Api { status: u16, message: String },
    /// The API answered 2xx but the body was not understood
    Decode(reqwest::Error),
}

impl fmt::Display for ResendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResendError::Transport(e) => write!(f, "request to Resend failed: {}", e),
            ResendError::Api { status, message } => {
                write!(f, "Resend returned an error ({}): {}", status, message)
            }
            ResendError::Decode(e) => write!(f, "failed to parse Resend response: {}", e),
        }
    }
}

impl std::error::Error for ResendError {}

#[derive(Debug, Clone)]
pub struct ResendService {
    options: ResendOptions,
    client: Client,
}

impl ResendService {
    pub fn new(options: ResendOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    pub async fn send_email(
        &self,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, ResendError> {
        let url = format!("{}/emails", self.options.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.options.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(ResendError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(ResendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SendEmailResponse>()
            .await
            .map_err(ResendError::Decode)
    }
}
