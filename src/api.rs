use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::constants::{ASK_PATH, ASK_SETTINGS_PATH, HISTORY_PATH, USER_SETTINGS_PATH};
use crate::error::{ClientError, Result};
use crate::history::History;
use crate::settings::{display_value, is_truthy, UserSettings};

// Body of POST /ask and POST /ask_settings
#[derive(Serialize)]
struct AskRequest<'a> {
    message: &'a str,
}

// Either `reply` or `error` is set; the backend uses a 500 status for the latter.
#[derive(Deserialize, Debug)]
struct AskResponse {
    #[serde(default)]
    reply: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default, rename = "needsConfirmation")]
    needs_confirmation: Option<bool>,
}

/// Result of a successful round trip to one of the ask endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Reply {
        text: String,
        /// The assistant summarised a meal and is waiting for the user to log it.
        needs_confirmation: bool,
    },
    /// Application-level error text reported by the backend.
    BackendError(String),
}

/// Thin client over the backend's JSON endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /ask
    pub async fn ask(&self, message: &str) -> Result<AskOutcome> {
        self.post_message(ASK_PATH, message).await
    }

    /// POST /ask_settings
    pub async fn ask_settings(&self, message: &str) -> Result<AskOutcome> {
        self.post_message(ASK_SETTINGS_PATH, message).await
    }

    /// GET /get_user_settings
    pub async fn get_user_settings(&self) -> Result<UserSettings> {
        self.get_json(USER_SETTINGS_PATH).await
    }

    /// GET /get_history
    pub async fn get_history(&self) -> Result<History> {
        self.get_json(HISTORY_PATH).await
    }

    #[instrument(skip(self, message))]
    pub async fn post_message(&self, path: &str, message: &str) -> Result<AskOutcome> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(&AskRequest { message })
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        if !status.is_success() {
            // The body still carries the `{error}` payload, so keep going.
            warn!(%status, "Backend answered with a non-success status");
        }

        let parsed: AskResponse =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode {
                url: url.clone(),
                source,
            })?;
        debug!(?parsed, "Decoded ask response");

        if let Some(error) = parsed.error.as_ref().filter(|e| is_truthy(e)) {
            return Ok(AskOutcome::BackendError(display_value(error)));
        }

        match parsed.reply {
            Some(reply) if !reply.is_null() => Ok(AskOutcome::Reply {
                text: display_value(&reply),
                needs_confirmation: parsed.needs_confirmation.unwrap_or(false),
            }),
            _ => Err(ClientError::MissingReply { url }),
        }
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        if !status.is_success() {
            // Unlike the ask endpoints, an error body here is never data.
            warn!(%status, "Backend answered with a non-success status");
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })?;
        // Both GET endpoints serve objects; anything else would decode as all defaults.
        if !value.is_object() {
            return Err(ClientError::NotAnObject { url });
        }
        serde_json::from_value(value).map_err(|source| ClientError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/ask"), "http://localhost:5000/ask");
    }

    #[test]
    fn test_base_url_requires_http_scheme() {
        let err = ApiClient::new("localhost:5000").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_ask_request_shape() {
        let body = serde_json::to_value(AskRequest { message: "hello" }).unwrap();
        assert_eq!(body, serde_json::json!({"message": "hello"}));
    }
}
