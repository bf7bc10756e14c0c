//! # Documents
//!
//! Payloads exchanged with the document-oriented endpoints. The platform
//! wraps records in an "Ecommerce Standards Document": a result status, a
//! `configs` side channel of string pairs, and the records themselves.
//!
//! The record schema is owned by callers. [`EsDocument`] is generic over the
//! record type and defaults to raw JSON values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::location::{self, ErrorCategory, ErrorLocation};

/// `resultStatus` value meaning the platform accepted the document.
pub const RESULT_SUCCESS: i32 = 1;

/// `configs` key holding the platform's result code.
pub const CONFIG_RESULT_CODE: &str = "result_code";

// =============================================================================
// Document Trait
// =============================================================================

/// Anything the dispatcher can decode as a response document.
pub trait Document {
    /// True if the platform reported the document as successful.
    fn is_successful(&self) -> bool;

    /// Side channel of string key/value pairs, if present.
    fn configs(&self) -> Option<&HashMap<String, String>>;

    /// Free-text message from the platform, used when the catalog has no
    /// sentence for the result code.
    fn message(&self) -> Option<&str> {
        None
    }

    fn result_code(&self) -> Option<&str> {
        self.configs()
            .and_then(|configs| configs.get(CONFIG_RESULT_CODE))
            .map(String::as_str)
    }

    fn error_locations(&self, category: ErrorCategory) -> Vec<ErrorLocation> {
        self.configs()
            .map(|configs| location::decode(configs, category.key()))
            .unwrap_or_default()
    }
}

// =============================================================================
// Ecommerce Standards Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsDocument<R = serde_json::Value> {
    #[serde(default)]
    pub result_status: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub total_data_records: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configs: Option<HashMap<String, String>>,

    #[serde(default = "Vec::new")]
    pub data_records: Vec<R>,
}

impl<R> EsDocument<R> {
    /// Creates an outgoing document wrapping `records`.
    pub fn new(records: Vec<R>) -> Self {
        EsDocument {
            result_status: 0,
            message: None,
            total_data_records: records.len() as u64,
            configs: None,
            data_records: records,
        }
    }

    /// Adds a `configs` entry, creating the map if needed.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configs
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

impl<R> Default for EsDocument<R> {
    fn default() -> Self {
        EsDocument::new(Vec::new())
    }
}

impl<R> Document for EsDocument<R> {
    fn is_successful(&self) -> bool {
        self.result_status == RESULT_SUCCESS
    }

    fn configs(&self) -> Option<&HashMap<String, String>> {
        self.configs.as_ref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_platform_document() {
        let doc: EsDocument = serde_json::from_value(json!({
            "resultStatus": 0,
            "message": "some orders could not be matched",
            "configs": {
                "result_code": "SERVER_ERROR_ORDER_PRODUCT_NOT_MATCHED",
                "orders_with_unmatched_lines": "0:2,1:0"
            },
            "dataRecords": [],
            "somethingNew": true
        }))
        .unwrap();

        assert!(!doc.is_successful());
        assert_eq!(doc.result_code(), Some("SERVER_ERROR_ORDER_PRODUCT_NOT_MATCHED"));
        assert_eq!(
            doc.error_locations(ErrorCategory::OrderUnmatchedLines),
            vec![ErrorLocation::new(0, 2), ErrorLocation::new(1, 0)]
        );
    }

    #[test]
    fn test_missing_configs() {
        let doc: EsDocument = serde_json::from_value(json!({ "resultStatus": 1 })).unwrap();
        assert!(doc.is_successful());
        assert_eq!(doc.result_code(), None);
        assert!(doc.error_locations(ErrorCategory::OrderUnpricedLines).is_empty());
    }

    #[test]
    fn test_typed_records() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Line {
            #[serde(rename = "keyProductID")]
            key_product_id: String,
        }

        let doc = EsDocument::new(vec![Line {
            key_product_id: "P-1".to_string(),
        }])
        .with_config("dataFields", "keyProductID");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["totalDataRecords"], 1);
        assert_eq!(value["dataRecords"][0]["keyProductID"], "P-1");
        assert_eq!(value["configs"]["dataFields"], "keyProductID");
    }
}
