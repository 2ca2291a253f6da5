//! Carbon Calculator API client implementation

use crate::{
    error::{ServiceError, ServiceErrorItem},
    types::{
        AggregateSearchCriteria, AggregateTransactionFootprint, ErrorResponse,
        HistoricalTransactionFootprints, PaymentCard, PaymentCardEnrolment, PaymentCardReference,
    },
};
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

const DEFAULT_API_URL: &str = "https://api.carbon-calculator.example.com/cts";

/// Carbon Calculator API client
///
/// Owns the HTTP transport, API key, and base URL. One method per remote
/// endpoint; higher-level invariants live in the service facades.
#[derive(Clone)]
pub struct CarbonApiClient {
    client: Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeletionRequest<'a> {
    payment_card_ids: &'a [String],
}

impl CarbonApiClient {
    /// Create a new client with API key from environment
    ///
    /// Reads `CARBON_API_KEY` (required) and `CARBON_API_URL` (optional,
    /// defaults to the production endpoint).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MissingApiKey` if `CARBON_API_KEY` is not set
    pub fn from_env() -> Result<Self, ServiceError> {
        let api_key = std::env::var("CARBON_API_KEY").map_err(|_| ServiceError::MissingApiKey)?;

        let client = Self::new(api_key);
        match std::env::var("CARBON_API_URL") {
            Ok(url) => Ok(client.with_api_url(url)),
            Err(_) => Ok(client),
        }
    }

    /// Create a new client with explicit API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Builder: point the client at a different base URL (e.g. sandbox)
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Register a single payment card
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, remote rejections, or parsing
    /// failures
    pub async fn register_payment_card(
        &self,
        card: &PaymentCard,
    ) -> Result<PaymentCardReference, ServiceError> {
        let response = self
            .client
            .post(format!("{}/payment-cards", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(card)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Register multiple payment cards in one call
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, remote rejections, or parsing
    /// failures; a rejection fails the whole batch
    pub async fn register_batch_payment_cards(
        &self,
        cards: &[PaymentCard],
    ) -> Result<Vec<PaymentCardEnrolment>, ServiceError> {
        let response = self
            .client
            .post(format!("{}/payment-card-enrolments", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(cards)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Query aggregate carbon footprints for a set of cards
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, remote rejections, or parsing
    /// failures
    pub async fn aggregate_transaction_footprints(
        &self,
        criteria: &AggregateSearchCriteria,
    ) -> Result<Vec<AggregateTransactionFootprint>, ServiceError> {
        let response = self
            .client
            .post(format!("{}/aggregate-transaction-footprints", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(criteria)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Query historical transaction footprints for one card over a date range
    ///
    /// Dates are sent as `YYYY-MM-DD` query parameters; range inclusivity is
    /// whatever the remote service defines.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, remote rejections (including an
    /// unknown card id or an inverted date range), or parsing failures
    pub async fn historical_transaction_footprints(
        &self,
        payment_card_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
        offset: u32,
        limit: u32,
    ) -> Result<HistoricalTransactionFootprints, ServiceError> {
        let response = self
            .client
            .get(format!(
                "{}/payment-cards/{payment_card_id}/transaction-footprints",
                self.api_url
            ))
            .header("x-api-key", &self.api_key)
            .query(&[
                ("from_date", from_date.format("%Y-%m-%d").to_string()),
                ("to_date", to_date.format("%Y-%m-%d").to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    /// Delete enrolled cards by id list
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or remote rejections
    pub async fn delete_payment_cards(
        &self,
        payment_card_ids: &[String],
    ) -> Result<(), ServiceError> {
        let response = self
            .client
            .delete(format!("{}/payment-cards", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(&DeletionRequest { payment_card_ids })
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::decode_error(response).await)
    }

    /// Decode a response: 2xx parses the typed body, everything else becomes
    /// a `ServiceError`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ServiceError::ResponseParseFailed(e.to_string()));
        }
        Err(Self::decode_error(response).await)
    }

    async fn decode_error(response: Response) -> ServiceError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return ServiceError::Unauthorized;
        }

        let body = response.text().await.unwrap_or_default();
        let errors = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(envelope) if !envelope.errors.error.is_empty() => envelope.errors.error,
            _ => vec![ServiceErrorItem::from_raw(status.as_u16(), &body)],
        };

        tracing::warn!(status = status.as_u16(), ?errors, "remote call rejected");
        ServiceError::Api {
            status: status.as_u16(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CarbonApiClient::new("test-key".to_string());
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_client_with_api_url() {
        let client =
            CarbonApiClient::new("test-key".to_string()).with_api_url("http://localhost:9999");
        assert_eq!(client.api_url, "http://localhost:9999");
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_deletion_request_wire_shape() {
        let ids = vec!["card-1".to_string(), "card-2".to_string()];
        let body = serde_json::to_string(&DeletionRequest {
            payment_card_ids: &ids,
        })
        .unwrap();
        assert_eq!(body, r#"{"paymentCardIds":["card-1","card-2"]}"#);
    }
}
