//! Footprint query and card deletion facade

use crate::{
    client::CarbonApiClient,
    error::ServiceError,
    types::{
        AggregateSearchCriteria, AggregateTransactionFootprint, HistoricalTransactionFootprints,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Capability for querying footprints and deleting enrolled cards
#[async_trait]
pub trait FootprintQuerier {
    /// Fetch aggregate footprints for the cards named in `criteria`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on invalid criteria, transport failure, or
    /// remote rejection
    async fn aggregate_transactions(
        &self,
        criteria: &AggregateSearchCriteria,
    ) -> Result<Vec<AggregateTransactionFootprint>, ServiceError>;

    /// Fetch one page of historical footprints for one card over a date range
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on invalid paging parameters, transport
    /// failure, an unknown card id, or an inverted date range (the latter two
    /// are remote-side rejections)
    async fn transaction_history(
        &self,
        payment_card_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
        offset: u32,
        page_size: u32,
    ) -> Result<HistoricalTransactionFootprints, ServiceError>;

    /// Delete enrolled cards by id.
    ///
    /// Deleting an already-deleted id is remote-defined and not guaranteed to
    /// be an error.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on transport failure or remote rejection
    async fn delete_cards(&self, payment_card_ids: &[String]) -> Result<(), ServiceError>;
}

/// Footprint query service backed by the Carbon Calculator API
#[derive(Clone)]
pub struct PaymentCardService {
    client: CarbonApiClient,
}

impl PaymentCardService {
    /// Create a service over an API client
    #[must_use]
    pub fn new(client: CarbonApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FootprintQuerier for PaymentCardService {
    async fn aggregate_transactions(
        &self,
        criteria: &AggregateSearchCriteria,
    ) -> Result<Vec<AggregateTransactionFootprint>, ServiceError> {
        if criteria.payment_card_ids.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "aggregate criteria requires at least one payment card id".to_string(),
            ));
        }

        tracing::debug!(
            cards = criteria.payment_card_ids.len(),
            aggregate_type = ?criteria.aggregate_type,
            "querying aggregate footprints"
        );
        self.client.aggregate_transaction_footprints(criteria).await
    }

    /// Date-window inclusivity is the remote service's; dates are passed
    /// through verbatim as `YYYY-MM-DD`.
    async fn transaction_history(
        &self,
        payment_card_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
        offset: u32,
        page_size: u32,
    ) -> Result<HistoricalTransactionFootprints, ServiceError> {
        if payment_card_id.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "payment card id must be non-empty".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(ServiceError::InvalidRequest(
                "page size must be greater than zero".to_string(),
            ));
        }

        tracing::debug!(%payment_card_id, %from_date, %to_date, offset, page_size, "querying transaction history");
        self.client
            .historical_transaction_footprints(payment_card_id, from_date, to_date, offset, page_size)
            .await
    }

    async fn delete_cards(&self, payment_card_ids: &[String]) -> Result<(), ServiceError> {
        if payment_card_ids.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "deletion requires at least one payment card id".to_string(),
            ));
        }

        tracing::info!(count = payment_card_ids.len(), "deleting payment cards");
        self.client.delete_payment_cards(payment_card_ids).await
    }
}
