//! # Result Codes
//!
//! Wire values of the platform's result code taxonomy. These strings are
//! compared verbatim against what the platform returns, so spelling
//! (including `SERVER_ERROR_UNKOWN`) must never be "corrected".
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Result Code Families                              │
//! │                                                                         │
//! │  MARKERS           SUCCESS, FAILURE                                    │
//! │                                                                         │
//! │  LOCAL (produced by the dispatcher, never by the platform)             │
//! │  ├── SERVER_ERROR_MALFORMED_URL                                        │
//! │  ├── SERVER_ERROR_REQUEST_PROTOCOL                                     │
//! │  ├── SERVER_ERROR_CONNECTION                                           │
//! │  ├── SERVER_ERROR_IO                                                   │
//! │  ├── SERVER_ERROR_RESPONSE      (non-200 HTTP status)                  │
//! │  └── SERVER_ERROR_UNKOWN        (also the "no code" sentinel)          │
//! │                                                                         │
//! │  REMOTE (business rejections passed through verbatim)                  │
//! │  ├── organisation / credentials / session                              │
//! │  ├── notifications / credit / certificates                             │
//! │  ├── data import + document shape                                      │
//! │  └── order / invoice matching and pricing                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Markers
// =============================================================================

pub const SUCCESS: &str = "SUCCESS";
pub const FAILURE: &str = "FAILURE";

// =============================================================================
// Local Transport Failures
// =============================================================================

/// Sentinel for "no result code known". Spelling matches the platform.
pub const ERROR_UNKNOWN: &str = "SERVER_ERROR_UNKOWN";
pub const ERROR_MALFORMED_URL: &str = "SERVER_ERROR_MALFORMED_URL";
pub const ERROR_RESPONSE: &str = "SERVER_ERROR_RESPONSE";
pub const ERROR_REQUEST_PROTOCOL: &str = "SERVER_ERROR_REQUEST_PROTOCOL";
pub const ERROR_CONNECTION: &str = "SERVER_ERROR_CONNECTION";
pub const ERROR_IO: &str = "SERVER_ERROR_IO";

// =============================================================================
// Organisation, Credentials & Session
// =============================================================================

pub const ERROR_ORG_NOT_FOUND: &str = "SERVER_ERROR_ORG_NOT_FOUND";
pub const ERROR_INCORRECT_API_CREDENTIALS: &str = "SERVER_ERROR_INCORRECT_API_CREDENTIALS";
pub const ERROR_ORG_INACTIVE: &str = "SERVER_ERROR_ORG_INACTIVE";
pub const ERROR_SESSION_INVALID: &str = "SERVER_ERROR_SESSION_INVALID";

// =============================================================================
// Notifications, Credit & Certificates
// =============================================================================

pub const ERROR_INVALID_NOTIFICATION_CATEGORY: &str = "SERVER_ERROR_INVALID_NOTIFICATION_CATEGORY";
pub const ERROR_NO_ORG_PEOPLE_TO_NOTIFY: &str = "SERVER_ERROR_NO_ORG_PEOPLE_TO_NOTIFY";
pub const ERROR_INSUFFICIENT_CREDIT: &str = "SERVER_ERROR_INSUFFICIENT_CREDIT";
pub const ERROR_SECURITY_CERTIFICATE_NOT_FOUND: &str = "SERVER_ERROR_SECURITY_CERTIFICATE_NOT_FOUND";
pub const ERROR_SENDER_DOES_NOT_MATCH_CERTIFICATE_COMMON_NAME: &str =
    "SERVER_ERROR_SENDER_DOES_NOT_MATCH_CERTIFICATE_COMMON_NAME";

// =============================================================================
// Data Import & Document Shape
// =============================================================================

pub const ERROR_DATA_IMPORT_MISSING_IMPORT_TYPE: &str = "SERVER_ERROR_DATA_IMPORT_MISSING_IMPORT_TYPE";
pub const ERROR_DATA_IMPORT_MAX_IMPORTS_RUNNING: &str = "SERVER_ERROR_DATA_IMPORT_MAX_IMPORTS_RUNNING";
pub const ERROR_DATA_IMPORT_BUSY: &str = "SERVER_ERROR_DATA_IMPORT_BUSY";
pub const ERROR_DATA_IMPORT_NOT_FOUND: &str = "SERVER_ERROR_DATA_IMPORT_NOT_FOUND";
pub const ERROR_DATA_JSON_WRONG_CONTENT_TYPE: &str = "SERVER_ERROR_DATA_JSON_WRONG_CONTENT_TYPE";
pub const ERROR_DATA_JSON_MALFORMED: &str = "SERVER_ERROR_DATA_JSON_MALFORMED";
pub const ERROR_ESD_DOCUMENT_HEADER_MALFORMED: &str = "SERVER_ERROR_ESD_DOCUMENT_HEADER_MALFORMED";
pub const ERROR_ESD_DOCUMENT_HEADER_MISSING_ATTRIBUTES: &str =
    "SERVER_ERROR_ESD_DOCUMENT_HEADER_MISSING_ATTRIBUTES";
pub const ERROR_DATA_IMPORT_ABORTED: &str = "SERVER_ERROR_DATA_IMPORT_ABORTED";
pub const ERROR_ESD_DOCUMENT_UNSUCCESSFUL: &str = "SERVER_ERROR_ESD_DOCUMENT_UNSUCCESSFUL";
pub const ERROR_ESD_DOCUMENT_NO_RECORD: &str = "SERVER_ERROR_ESD_DOCUMENT_NO_RECORD";

// =============================================================================
// Order & Invoice Matching
// =============================================================================

pub const ERROR_ORDER_PRODUCT_NOT_MATCHED: &str = "SERVER_ERROR_ORDER_PRODUCT_NOT_MATCHED";
pub const ERROR_ORDER_PRODUCT_NOT_MAPPED: &str = "SERVER_ERROR_ORDER_PRODUCT_NOT_MAPPED";
pub const ERROR_ORDER_LINE_PRICING_MISSING: &str = "SERVER_ERROR_ORDER_LINE_PRICING_MISSING";
pub const ERROR_ORDER_SURCHARGE_NOT_FOUND: &str = "SERVER_ERROR_ORDER_SURCHARGE_NOT_FOUND";
pub const ERROR_ORDER_SURCHARGE_PRICING_MISSING: &str = "SERVER_ERROR_ORDER_SURCHARGE_PRICING_MISSING";
pub const ERROR_ORDER_PAYMENT_NOT_MATCHED: &str = "SERVER_ERROR_ORDER_PAYMENT_NOT_MATCHED";
pub const ERROR_INVOICE_PRODUCT_NOT_MAPPED: &str = "SERVER_ERROR_INVOICE_PRODUCT_NOT_MAPPED";
pub const ERROR_INVOICE_LINE_TAXCODE_NOT_MAPPED: &str = "SERVER_ERROR_INVOICE_LINE_TAXCODE_NOT_MAPPED";
pub const ERROR_INVOICE_SURCHARGE_NOT_MAPPED: &str = "SERVER_ERROR_INVOICE_SURCHARGE_NOT_MAPPED";
pub const ERROR_INVOICE_SURCHARGE_TAXCODE_NOT_MAPPED: &str =
    "SERVER_ERROR_INVOICE_SURCHARGE_TAXCODE_NOT_MAPPED";

/// Returns true for codes the dispatcher produces itself when the platform
/// could not be reached or its reply could not be read.
pub fn is_local_failure(code: &str) -> bool {
    matches!(
        code,
        ERROR_MALFORMED_URL
            | ERROR_REQUEST_PROTOCOL
            | ERROR_CONNECTION
            | ERROR_IO
            | ERROR_RESPONSE
            | ERROR_UNKNOWN
    )
}
