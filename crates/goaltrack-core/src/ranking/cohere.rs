//! Cohere chat API as a ranking oracle.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::oracle::RankingOracle;
use crate::error::OracleError;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_MODEL: &str = "command-r-08-2024";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct CohereOracle {
    api_key: String,
    model: String,
    endpoint: Url,
    client: Client,
}

impl CohereOracle {
    /// Build a client for `{base_url}/v1/chat` with a bounded request timeout.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OracleError::NotConfigured("missing Cohere API key".into()));
        }
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join("v1/chat"))
            .map_err(|e| OracleError::NotConfigured(format!("invalid base URL '{base_url}': {e}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key,
            model: model.into(),
            endpoint,
            client,
        })
    }
}

impl RankingOracle for CohereOracle {
    fn name(&self) -> &str {
        "cohere"
    }

    fn rank(&self, prompt: &str) -> Result<String, OracleError> {
        let body = json!({
            "message": prompt,
            "model": self.model,
        });

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = resp.json()?;
        chat.text
            .filter(|t| !t.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}
