//! # Carbon Calculator API Client
//!
//! Rust client library for a Carbon Calculator REST service: payment-card
//! enrolment (single and bulk), aggregate and historical carbon-footprint
//! queries, and card deletion.
//!
//! The API surface is split into a low-level [`CarbonApiClient`] (one method
//! per remote endpoint) and two facades behind capability traits:
//! [`AddCardService`] for enrolment and [`PaymentCardService`] for footprint
//! queries and deletion.
//!
//! ## Example
//!
//! ```no_run
//! use carbon_calculator::{
//!     AddCardService, CardRegistrar, CarbonApiClient, PaymentCard, pan::generate_fpan,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from CARBON_API_KEY / CARBON_API_URL environment variables
//!     let client = CarbonApiClient::from_env()?;
//!     let registrar = AddCardService::new(client);
//!
//!     let card = PaymentCard::new(generate_fpan("5425"), "EUR");
//!     let reference = registrar.register_payment_card(&card).await?;
//!
//!     println!("Enrolled card {}", reference.payment_card_id);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod footprints;
pub mod pan;
pub mod registration;
pub mod types;

// Re-export main types for convenience
pub use client::CarbonApiClient;
pub use error::{ServiceError, ServiceErrorItem};
pub use footprints::{FootprintQuerier, PaymentCardService};
pub use registration::{AddCardService, CardRegistrar};
pub use types::{
    AggregateSearchCriteria, AggregateTransactionFootprint, AggregateType, FootprintAggregation,
    HistoricalTransactionFootprints, PaymentCard, PaymentCardEnrolment, PaymentCardReference,
    TransactionFootprint,
};
