//! The reqwest-backed remote source.

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use quotevault_core::quotes::model::{validate, Quote, QuoteDraft};
use quotevault_core::remote::{RemoteError, RemoteSourceTrait};

use crate::config::RemoteSourceConfig;

/// Category assigned to remote records that arrive without one.
const REMOTE_CATEGORY: &str = "Server";

// ============================================================================
// Wire shape
// ============================================================================

/// One element of the remote JSON array.
///
/// The endpoint may serve native quote objects (`text`/`category`) or
/// post-shaped objects (`title`/`body`); `title` stands in for `text`
/// when the latter is absent. Everything else about the remote shape
/// stays private to this adapter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteQuoteDto {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

impl RemoteQuoteDto {
    fn into_draft(self) -> QuoteDraft {
        QuoteDraft {
            text: self.text.or(self.title),
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .or_else(|| Some(REMOTE_CATEGORY.to_string())),
            author: self.author,
        }
    }
}

/// Translate one remote array element into a quote. Returns `None` for
/// records that are structurally wrong or fail validation; the batch
/// never aborts over a single bad record.
fn translate_record(value: &Value) -> Option<Quote> {
    let dto: RemoteQuoteDto = match serde_json::from_value(value.clone()) {
        Ok(dto) => dto,
        Err(e) => {
            warn!("Dropping malformed remote record: {}", e);
            return None;
        }
    };
    match validate(dto.into_draft()) {
        Ok(quote) => Some(quote),
        Err(e) => {
            warn!("Dropping invalid remote record: {}", e);
            None
        }
    }
}

// ============================================================================
// HttpRemoteSource
// ============================================================================

/// Remote source adapter over a single HTTP(S) endpoint.
pub struct HttpRemoteSource {
    client: Client,
    endpoint: String,
}

impl HttpRemoteSource {
    pub fn new(config: RemoteSourceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: config.endpoint,
        }
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout(e.to_string())
    } else {
        RemoteError::Network(e.to_string())
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(RemoteError::Status {
            code: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        })
    }
}

#[async_trait]
impl RemoteSourceTrait for HttpRemoteSource {
    async fn fetch_quotes(&self, limit: usize) -> Result<Vec<Quote>, RemoteError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(&response)?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidPayload(e.to_string()))?;
        let Value::Array(entries) = payload else {
            return Err(RemoteError::InvalidPayload(
                "expected a JSON array".to_string(),
            ));
        };

        Ok(entries
            .iter()
            .take(limit)
            .filter_map(translate_record)
            .collect())
    }

    async fn publish(&self, quote: &Quote) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(quote)
            .send()
            .await
            .map_err(transport_error)?;
        // Only an acknowledgment is expected; the body is not interpreted.
        check_status(&response)
    }
}
