//! # Error Location Codec
//!
//! When a bulk import partially fails, the platform reports *which*
//! sub-records caused the failure through the document's `configs` map. Each
//! failure category has its own key, and its value is a comma separated list
//! of `recordIndex:subIndex` pairs.
//!
//! ## Wire Format
//! ```text
//! configs["orders_with_unmatched_lines"] = "0:2,1:0"
//!                                           │ │
//!                                           │ └── line index within order 0
//!                                           └──── order index in dataRecords
//! ```
//!
//! Decoding is tolerant: malformed tokens are skipped, and an absent key
//! yields an empty list.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Error Location
// =============================================================================

/// Position of one failing sub-record inside an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorLocation {
    /// Index of the record in the document's `dataRecords`.
    pub record_index: usize,
    /// Index of the line, surcharge or payment inside that record.
    pub sub_index: usize,
}

impl ErrorLocation {
    pub fn new(record_index: usize, sub_index: usize) -> Self {
        ErrorLocation {
            record_index,
            sub_index,
        }
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.record_index, self.sub_index)
    }
}

impl FromStr for ErrorLocation {
    type Err = CoreError;

    /// Strict parse of a single `recordIndex:subIndex` token.
    fn from_str(token: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidLocation {
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty token"));
        }

        let mut parts = trimmed.split(':');
        let (record, sub) = match (parts.next(), parts.next(), parts.next()) {
            (Some(record), Some(sub), None) => (record, sub),
            _ => return Err(invalid("expected exactly one ':' separator")),
        };

        let record_index = record
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("record index is not a non-negative number"))?;
        let sub_index = sub
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("sub index is not a non-negative number"))?;

        Ok(ErrorLocation::new(record_index, sub_index))
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Failure categories reported through `configs`, one key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Order lines not matched to a supplier product.
    OrderUnmatchedLines,
    /// Order lines with no price for the customer account.
    OrderUnpricedLines,
    /// Order surcharges not matched to a supplier surcharge.
    OrderUnmatchedSurcharges,
    /// Order surcharges with no price for the customer account.
    OrderUnpricedSurcharges,
    /// Order payments not matched to a supplier payment type.
    OrderUnmatchedPayments,
    /// Purchase order lines not mapped to a supplier product.
    OrderUnmappedLines,
    /// Invoice lines not mapped to a customer product.
    InvoiceUnmappedLines,
    /// Invoice line tax codes not mapped for the customer.
    InvoiceUnmappedLineTaxcodes,
    /// Invoice surcharges not mapped for the customer.
    InvoiceUnmappedSurcharges,
    /// Invoice surcharge tax codes not mapped for the customer.
    InvoiceUnmappedSurchargeTaxcodes,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 10] = [
        ErrorCategory::OrderUnmatchedLines,
        ErrorCategory::OrderUnpricedLines,
        ErrorCategory::OrderUnmatchedSurcharges,
        ErrorCategory::OrderUnpricedSurcharges,
        ErrorCategory::OrderUnmatchedPayments,
        ErrorCategory::OrderUnmappedLines,
        ErrorCategory::InvoiceUnmappedLines,
        ErrorCategory::InvoiceUnmappedLineTaxcodes,
        ErrorCategory::InvoiceUnmappedSurcharges,
        ErrorCategory::InvoiceUnmappedSurchargeTaxcodes,
    ];

    /// The `configs` key carrying this category's locations.
    pub fn key(&self) -> &'static str {
        match self {
            ErrorCategory::OrderUnmatchedLines => "orders_with_unmatched_lines",
            ErrorCategory::OrderUnpricedLines => "orders_with_unpriced_lines",
            ErrorCategory::OrderUnmatchedSurcharges => "orders_with_unmatched_surcharges",
            ErrorCategory::OrderUnpricedSurcharges => "orders_with_unpriced_surcharges",
            ErrorCategory::OrderUnmatchedPayments => "orders_with_unmatched_payments",
            ErrorCategory::OrderUnmappedLines => "orders_with_unmapped_lines",
            ErrorCategory::InvoiceUnmappedLines => "invoices_with_unmapped_lines",
            ErrorCategory::InvoiceUnmappedLineTaxcodes => "invoices_with_unmapped_line_taxcodes",
            ErrorCategory::InvoiceUnmappedSurcharges => "invoices_with_unmapped_surcharges",
            ErrorCategory::InvoiceUnmappedSurchargeTaxcodes => {
                "invoices_with_unmapped_surcharge_taxcodes"
            }
        }
    }

    /// Looks a category up by its `configs` key.
    pub fn from_key(key: &str) -> Option<Self> {
        ErrorCategory::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Codec
// =============================================================================

/// Decodes the locations stored under `key`. Absent key → empty list.
pub fn decode(configs: &HashMap<String, String>, key: &str) -> Vec<ErrorLocation> {
    configs
        .get(key)
        .map(|value| decode_csv(value))
        .unwrap_or_default()
}

/// Decodes one CSV value, silently skipping malformed tokens.
pub fn decode_csv(value: &str) -> Vec<ErrorLocation> {
    value
        .split(',')
        .filter_map(|token| token.parse::<ErrorLocation>().ok())
        .collect()
}

/// Encodes locations back into the wire CSV form.
pub fn encode(locations: &[ErrorLocation]) -> String {
    locations
        .iter()
        .map(ErrorLocation::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// =============================================================================
// Unit Tests
// =============================================================================
