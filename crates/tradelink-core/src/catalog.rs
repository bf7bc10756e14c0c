//! # Message Catalog
//!
//! Maps a result code to a human-readable sentence. The catalog is a plain
//! value handed to the dispatcher at construction; there is no global
//! resource bundle.
//!
//! ## Fallback
//! ```text
//! resolve("SERVER_ERROR_IO")       → "An error occurred ... IO (Reading or Writing) error."
//! resolve("SOME_FUTURE_CODE")      → "SOME_FUTURE_CODE"
//! for_locale("fr_FR")              → en_AU catalog
//! ```

use std::collections::HashMap;

use crate::codes;

/// English (Australia) sentences for every known result code.
const EN_AU: &[(&str, &str)] = &[
    (codes::SUCCESS, "API endpoint was successfully called."),
    (codes::FAILURE, "An error occurred when the API endpoint was called."),
    (codes::ERROR_UNKNOWN, "An unknown or non-specified error occurred when calling the API endpoint."),
    (codes::ERROR_MALFORMED_URL, "An error occurred when calling the API endpoint due to URL being not correctly set."),
    (codes::ERROR_RESPONSE, "An error occurred when calling the API endpoint due to the server returning a bad response. The platform's API may be unavailable, under heavy load, or a network connection error could be occurring."),
    (codes::ERROR_REQUEST_PROTOCOL, "An error occurred when calling the API endpoint due to an issue with the protocol used to call the endpoint."),
    (codes::ERROR_CONNECTION, "An error occurred when calling the API endpoint due to an issue with connecting to the platform's servers. Check that your internet connection is available and no other networking issues are occurring."),
    (codes::ERROR_IO, "An error occurred when calling the API endpoint due to an IO (Reading or Writing) error."),
    (codes::ERROR_ORG_NOT_FOUND, "An error occurred when calling the API endpoint since no organisation could be found matching the ID given."),
    (codes::ERROR_INCORRECT_API_CREDENTIALS, "An error occurred when calling the API endpoint due to incorrect API credentials being given for the organisation."),
    (codes::ERROR_ORG_INACTIVE, "An error occurred when calling the API endpoint due to the organisation being inactive or deleted from the platform."),
    (codes::ERROR_SESSION_INVALID, "An error occurred when calling the API endpoint due to the API session not existing or previously destroyed."),
    (codes::ERROR_INVALID_NOTIFICATION_CATEGORY, "An error occurred when calling the API endpoint due to an incorrect notification category been given to it."),
    (codes::ERROR_NO_ORG_PEOPLE_TO_NOTIFY, "An error occurred when calling the API endpoint due to no people being configured in the organisation to receive the notification."),
    (codes::ERROR_INSUFFICIENT_CREDIT, "An error occurred when calling the API endpoint due to the organisation having insufficient trading tokens in the platform to process the request."),
    (codes::ERROR_SECURITY_CERTIFICATE_NOT_FOUND, "An error occurred when calling the API endpoint due to the organisation's security certificate not able to found or does not exist."),
    (codes::ERROR_SENDER_DOES_NOT_MATCH_CERTIFICATE_COMMON_NAME, "An error occurred when calling the API endpoint, due to the common name set in the organisation's security certificate not matching the IP address of the internet connection used to call the endpoint"),
    (codes::ERROR_DATA_IMPORT_MISSING_IMPORT_TYPE, "An error occurred when calling the API endpoint due to no data type set indicating the kind of data being imported."),
    (codes::ERROR_DATA_IMPORT_MAX_IMPORTS_RUNNING, "An error occurred when calling the API endpoint due to the maximum number of data imports being run over a short period of time. Wait a while before calling the endpoint again and consider calling the endpoint less often."),
    (codes::ERROR_DATA_IMPORT_BUSY, "An error occurred when calling the API endpoint due to another data import already running or the API is busy processing other requests."),
    (codes::ERROR_DATA_IMPORT_NOT_FOUND, "An error occurred when calling the API endpoint due to an incorrect or unsupported data type being set."),
    (codes::ERROR_DATA_JSON_WRONG_CONTENT_TYPE, "An error occurred when calling the API endpoint due to the content type in the request headers not being set to application/json, specifying that data imported is in the JSON data format."),
    (codes::ERROR_DATA_JSON_MALFORMED, "An error occurred when calling the API endpoint due to the data being imported in the JSON data format not able to be processed, because it has not been correctly formed. Check for syntax errors with the JSON data."),
    (codes::ERROR_ESD_DOCUMENT_HEADER_MALFORMED, "An error occurred when calling the API endpoint due to the Ecommerce Standards Document uploaded missing an opening bracket in its JSON data."),
    (codes::ERROR_ESD_DOCUMENT_HEADER_MISSING_ATTRIBUTES, "An error occurred when calling the API endpoint due to the Ecommerce Standards Document being uploaded missing the dataRecords attribute that should contain the record data to import."),
    (codes::ERROR_DATA_IMPORT_ABORTED, "An error occurred when calling the API endpoint due to the data import being aborted. It may have been aborted by a person or by the platform."),
    (codes::ERROR_ESD_DOCUMENT_UNSUCCESSFUL, "An error occurred when calling the API endpoint due to Ecommerce Standards Document failing to import. Check that the document was correctly formed."),
    (codes::ERROR_ESD_DOCUMENT_NO_RECORD, "An error occurred when calling the API endpoint due to Ecommerce Standards Document not containing any records to import. Look to add one or more records to the document."),
    (codes::ERROR_ORDER_PRODUCT_NOT_MATCHED, "An error occurred when calling the API endpoint due to one or more order lines not matching a product of the supplying organisation."),
    (codes::ERROR_ORDER_PRODUCT_NOT_MAPPED, "An error occurred when calling the API endpoint due to one or more order lines not being mapped to a product of the supplying organisation."),
    (codes::ERROR_ORDER_LINE_PRICING_MISSING, "An error occurred when calling the API endpoint due to one or more order lines not having a price available for the customer account."),
    (codes::ERROR_ORDER_SURCHARGE_NOT_FOUND, "An error occurred when calling the API endpoint due to one or more order surcharges not matching a surcharge of the supplying organisation."),
    (codes::ERROR_ORDER_SURCHARGE_PRICING_MISSING, "An error occurred when calling the API endpoint due to one or more order surcharges not having a price available for the customer account."),
    (codes::ERROR_ORDER_PAYMENT_NOT_MATCHED, "An error occurred when calling the API endpoint due to one or more order payments not matching a payment type of the supplying organisation."),
    (codes::ERROR_INVOICE_PRODUCT_NOT_MAPPED, "An error occurred when calling the API endpoint due to one or more invoice lines not being mapped to a product of the customer organisation."),
    (codes::ERROR_INVOICE_LINE_TAXCODE_NOT_MAPPED, "An error occurred when calling the API endpoint due to one or more invoice lines having a tax code that is not mapped to a tax code of the customer organisation."),
    (codes::ERROR_INVOICE_SURCHARGE_NOT_MAPPED, "An error occurred when calling the API endpoint due to one or more invoice surcharges not being mapped to a surcharge of the customer organisation."),
    (codes::ERROR_INVOICE_SURCHARGE_TAXCODE_NOT_MAPPED, "An error occurred when calling the API endpoint due to one or more invoice surcharges having a tax code that is not mapped to a tax code of the customer organisation."),
];

/// Bundled locales and their tables.
const BUNDLED: &[(&str, &[(&str, &str)])] = &[("en_AU", EN_AU)];

/// Result code → localized message table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Creates a catalog from an explicit table.
    pub fn new(locale: impl Into<String>, messages: HashMap<String, String>) -> Self {
        MessageCatalog {
            locale: locale.into(),
            messages,
        }
    }

    /// The built-in English (Australia) catalog.
    pub fn en_au() -> Self {
        Self::from_table(crate::DEFAULT_LOCALE, EN_AU)
    }

    fn from_table(locale: &str, table: &[(&str, &str)]) -> Self {
        let messages = table
            .iter()
            .map(|(code, message)| (code.to_string(), message.to_string()))
            .collect();
        MessageCatalog::new(locale, messages)
    }

    /// Returns the built-in catalog for `locale`, falling back to en_AU.
    ///
    /// Locale names are matched case-insensitively and accept either `_` or
    /// `-` as separator (`en_AU`, `en-au`).
    pub fn for_locale(locale: &str) -> Self {
        let normalized = locale.trim().replace('-', "_");
        BUNDLED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&normalized))
            .map(|(name, table)| Self::from_table(name, table))
            .unwrap_or_else(MessageCatalog::en_au)
    }

    /// Adds or replaces one entry.
    pub fn with_message(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(code.into(), message.into());
        self
    }

    /// Returns the catalog's locale name.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the message for `code`, if the catalog has one.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.messages.get(code).map(String::as_str)
    }

    /// Returns the message for `code`, or the code itself when unknown.
    pub fn resolve(&self, code: &str) -> String {
        self.lookup(code).unwrap_or(code).to_string()
    }

    /// Returns true if a message exists for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.messages.contains_key(code)
    }
}
