//! Card enrolment facade

use crate::{
    client::CarbonApiClient,
    error::ServiceError,
    types::{PaymentCard, PaymentCardEnrolment, PaymentCardReference},
};
use async_trait::async_trait;

/// Capability for enrolling payment cards.
///
/// Constructed once at the top of a run and passed to whatever drives the
/// enrolment scenarios; test harnesses can substitute their own
/// implementation.
#[async_trait]
pub trait CardRegistrar {
    /// Register a single card, returning its service-assigned reference
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on any transport failure or remote rejection
    async fn register_payment_card(
        &self,
        card: &PaymentCard,
    ) -> Result<PaymentCardReference, ServiceError>;

    /// Register several cards in one logical operation
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on any transport failure or remote rejection;
    /// one bad card fails the whole batch
    async fn register_batch_payment_cards(
        &self,
        cards: &[PaymentCard],
    ) -> Result<Vec<PaymentCardEnrolment>, ServiceError>;
}

/// Card enrolment service backed by the Carbon Calculator API
#[derive(Clone)]
pub struct AddCardService {
    client: CarbonApiClient,
}

impl AddCardService {
    /// Create a service over an API client
    #[must_use]
    pub fn new(client: CarbonApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CardRegistrar for AddCardService {
    /// Register a single card.
    ///
    /// The returned reference carries a non-empty id that is immediately
    /// usable in footprint queries and deletion, plus the redacted last-4
    /// value; the full FPAN is never returned.
    async fn register_payment_card(
        &self,
        card: &PaymentCard,
    ) -> Result<PaymentCardReference, ServiceError> {
        if card.fpan.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "fpan must be non-empty".to_string(),
            ));
        }

        tracing::debug!(currency = %card.card_base_currency, "registering payment card");
        let reference = self.client.register_payment_card(card).await?;
        tracing::info!(payment_card_id = %reference.payment_card_id, "payment card registered");
        Ok(reference)
    }

    /// Register a batch of cards, all-or-nothing.
    ///
    /// The result has the same length and order correspondence as the input;
    /// a response with a different number of enrolments is rejected.
    async fn register_batch_payment_cards(
        &self,
        cards: &[PaymentCard],
    ) -> Result<Vec<PaymentCardEnrolment>, ServiceError> {
        if cards.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "batch registration requires at least one card".to_string(),
            ));
        }

        tracing::debug!(count = cards.len(), "registering payment card batch");
        let enrolments = self.client.register_batch_payment_cards(cards).await?;

        if enrolments.len() != cards.len() {
            return Err(ServiceError::ResponseParseFailed(format!(
                "batch enrolment returned {} results for {} cards",
                enrolments.len(),
                cards.len()
            )));
        }
        Ok(enrolments)
    }
}
