//! Core types for the Carbon Calculator API

use crate::error::ServiceErrorItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payment card to enrol, as submitted by the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    /// Funding primary account number (full card number)
    pub fpan: String,
    /// ISO 4217 currency code the card settles in
    pub card_base_currency: String,
}

impl PaymentCard {
    /// Create a card from an FPAN and a base currency
    #[must_use]
    pub fn new(fpan: impl Into<String>, card_base_currency: impl Into<String>) -> Self {
        Self {
            fpan: fpan.into(),
            card_base_currency: card_base_currency.into(),
        }
    }
}

/// Reference to an enrolled card, returned by single registration.
///
/// Carries the service-assigned id and a redacted last-4 value; the full FPAN
/// is never returned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCardReference {
    /// Service-assigned card identifier, usable immediately in footprint
    /// queries and deletion
    pub payment_card_id: String,
    /// Last four digits of the submitted FPAN
    #[serde(rename = "last4fpan")]
    pub last4_fpan: String,
    /// Enrolment status, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Currency echoed back by the service, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_base_currency: Option<String>,
}

/// One enrolment result from bulk registration, same shape as
/// [`PaymentCardReference`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCardEnrolment {
    /// Service-assigned card identifier
    pub payment_card_id: String,
    /// Last four digits of the submitted FPAN
    #[serde(rename = "last4fpan")]
    pub last4_fpan: String,
    /// Enrolment status, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Time bucket for aggregate footprint queries.
///
/// Serialized as an integer on the wire: 0=daily, 1=weekly, 2=monthly,
/// 3=yearly.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "u8", try_from = "u8")]
pub enum AggregateType {
    /// One bucket per day
    Daily,
    /// One bucket per ISO week
    Weekly,
    /// One bucket per calendar month
    Monthly,
    /// One bucket per calendar year
    Yearly,
}

impl From<AggregateType> for u8 {
    fn from(value: AggregateType) -> Self {
        match value {
            AggregateType::Daily => 0,
            AggregateType::Weekly => 1,
            AggregateType::Monthly => 2,
            AggregateType::Yearly => 3,
        }
    }
}

impl TryFrom<u8> for AggregateType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Daily),
            1 => Ok(Self::Weekly),
            2 => Ok(Self::Monthly),
            3 => Ok(Self::Yearly),
            other => Err(format!("unrecognized aggregate type {other} (expected 0..=3)")),
        }
    }
}

/// Criteria for an aggregate footprint query
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSearchCriteria {
    /// Cards to aggregate over; must be non-empty
    pub payment_card_ids: Vec<String>,
    /// Time bucket granularity
    pub aggregate_type: AggregateType,
}

impl AggregateSearchCriteria {
    /// Create criteria for a set of card ids and a bucket granularity
    #[must_use]
    pub fn new(payment_card_ids: Vec<String>, aggregate_type: AggregateType) -> Self {
        Self {
            payment_card_ids,
            aggregate_type,
        }
    }
}

/// Aggregate footprint result for one card
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTransactionFootprint {
    /// Card the aggregation is scoped to
    pub payment_card_id: String,
    /// One entry per time bucket with activity
    #[serde(default)]
    pub footprints: Vec<FootprintAggregation>,
}

/// Carbon footprint totals for one time bucket
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FootprintAggregation {
    /// Bucket granularity this row was computed at
    pub aggregate_type: AggregateType,
    /// Bucket label as reported by the service (e.g. a date or month)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_date: Option<String>,
    /// Total emission for the bucket, grams of CO2e
    pub carbon_emission_in_grams: f64,
    /// Total emission for the bucket, ounces of CO2e
    pub carbon_emission_in_ounces: f64,
    /// Number of transactions in the bucket
    #[serde(default)]
    pub transaction_count: u32,
}

/// Paginated historical footprint result for one card
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTransactionFootprints {
    /// Number of rows in this page
    pub count: u32,
    /// Requested page size
    pub limit: u32,
    /// Requested page offset
    pub offset: u32,
    /// Total rows matching the query across all pages
    pub total: u32,
    /// Footprint rows for this page
    #[serde(default)]
    pub items: Vec<TransactionFootprint>,
}

/// Carbon footprint of a single transaction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFootprint {
    /// Service-assigned transaction identifier
    pub transaction_id: String,
    /// Date the transaction was made
    pub transaction_date: NaiveDate,
    /// Transaction amount in the card's base currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Emission attributed to the transaction, grams of CO2e
    pub carbon_emission_in_grams: f64,
    /// Emission attributed to the transaction, ounces of CO2e
    pub carbon_emission_in_ounces: f64,
}

/// Error envelope returned by the remote service on rejections
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Envelope wrapper
    #[serde(rename = "Errors")]
    pub errors: ErrorWrapper,
}

/// Inner wrapper of the remote error envelope
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorWrapper {
    /// Structured error entries; non-empty on any rejection
    #[serde(rename = "Error")]
    pub error: Vec<ServiceErrorItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn test_payment_card_wire_names() {
        let card = PaymentCard::new("5425390000000000", "EUR");
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""fpan":"5425390000000000""#));
        assert!(json.contains(r#""cardBaseCurrency":"EUR""#));
    }

    #[test]
    fn test_card_reference_last4_wire_name() {
        let json = r#"{"paymentCardId":"card-123","last4fpan":"4619","status":"ACTIVE"}"#;
        let reference: PaymentCardReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.payment_card_id, "card-123");
        assert_eq!(reference.last4_fpan, "4619");
        assert_eq!(reference.status.as_deref(), Some("ACTIVE"));
    }

    #[test]
    fn test_aggregate_type_serializes_as_integer() {
        let daily = serde_json::to_string(&AggregateType::Daily).unwrap();
        assert_eq!(daily, "0");
        let yearly = serde_json::to_string(&AggregateType::Yearly).unwrap();
        assert_eq!(yearly, "3");
    }

    #[test]
    fn test_aggregate_type_rejects_out_of_range() {
        let result: Result<AggregateType, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    #[test]
    fn test_aggregate_criteria_wire_shape() {
        let criteria =
            AggregateSearchCriteria::new(vec!["card-123".to_string()], AggregateType::Daily);
        let json = serde_json::to_string(&criteria).unwrap();
        assert!(json.contains(r#""paymentCardIds":["card-123"]"#));
        assert!(json.contains(r#""aggregateType":0"#));
    }

    #[test]
    fn test_historical_footprints_deserialization() {
        let json = r#"{
            "count": 1,
            "limit": 50,
            "offset": 0,
            "total": 1,
            "items": [{
                "transactionId": "txn-1",
                "transactionDate": "2020-09-20",
                "amount": 12.5,
                "carbonEmissionInGrams": 4000.0,
                "carbonEmissionInOunces": 141.1
            }]
        }"#;
        let page: HistoricalTransactionFootprints = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.items[0].transaction_date,
            NaiveDate::from_ymd_opt(2020, 9, 20).unwrap()
        );
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let json = r#"{
            "Errors": {
                "Error": [{
                    "Source": "CarbonCalculator",
                    "ReasonCode": "INVALID_REQUEST_PARAMETER",
                    "Description": "BIN is not supported",
                    "Recoverable": false
                }]
            }
        }"#;
        let envelope: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.errors.error.len(), 1);
        assert_eq!(
            envelope.errors.error[0].reason_code,
            "INVALID_REQUEST_PARAMETER"
        );
    }
}
