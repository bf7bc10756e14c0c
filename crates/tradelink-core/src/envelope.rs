//! # Response Envelopes
//!
//! Every endpoint call produces exactly one envelope, whether the platform
//! answered or the request never left the machine.
//!
//! ## Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ResponseEnvelope                                                       │
//! │  ├── result          SUCCESS | FAILURE                                 │
//! │  ├── result_code     always set (SERVER_ERROR_UNKOWN when unknown)     │
//! │  ├── result_message  resolved through the MessageCatalog               │
//! │  ├── api_version     "1.0.0.0" unless the platform says otherwise      │
//! │  ├── session_id      set by create_session                             │
//! │  └── session_valid   set by validate_session                           │
//! │                                                                         │
//! │  DocumentEnvelope<D> = ResponseEnvelope + Option<D>                    │
//! │  (document absent ⇒ result is FAILURE)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::codes;
use crate::document::Document;
use crate::location::{ErrorCategory, ErrorLocation};

// =============================================================================
// Endpoint Result
// =============================================================================

/// Coarse outcome of an endpoint call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum EndpointResult {
    #[serde(rename = "SUCCESS")]
    Success,
    #[default]
    #[serde(rename = "FAILURE")]
    Failure,
}

impl EndpointResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointResult::Success => codes::SUCCESS,
            EndpointResult::Failure => codes::FAILURE,
        }
    }
}

/// Anything other than `SUCCESS` counts as a failure.
impl From<String> for EndpointResult {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case(codes::SUCCESS) {
            EndpointResult::Success
        } else {
            EndpointResult::Failure
        }
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

fn default_result_code() -> String {
    codes::ERROR_UNKNOWN.to_string()
}

fn default_api_version() -> String {
    crate::DEFAULT_API_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub result: EndpointResult,

    #[serde(default = "default_result_code")]
    pub result_code: String,

    #[serde(default)]
    pub result_message: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_valid: Option<String>,
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        ResponseEnvelope {
            result: EndpointResult::Failure,
            result_code: default_result_code(),
            result_message: String::new(),
            api_version: default_api_version(),
            session_id: None,
            session_valid: None,
        }
    }
}

impl ResponseEnvelope {
    /// A fresh failure envelope carrying `code` and `message`.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        ResponseEnvelope {
            result_code: code.into(),
            result_message: message.into(),
            ..ResponseEnvelope::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == EndpointResult::Success
    }

    /// Replaces an empty result code with the unknown sentinel.
    pub fn normalize(mut self) -> Self {
        if self.result_code.trim().is_empty() {
            self.result_code = default_result_code();
        }
        if self.api_version.trim().is_empty() {
            self.api_version = default_api_version();
        }
        self
    }

    /// True if the platform rejected the call's session.
    pub fn is_session_invalid(&self) -> bool {
        self.result_code == codes::ERROR_SESSION_INVALID
    }
}

// =============================================================================
// Document Envelope
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEnvelope<D> {
    pub envelope: ResponseEnvelope,
    pub document: Option<D>,
}

impl<D> DocumentEnvelope<D> {
    /// A failure envelope with no document.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentEnvelope {
            envelope: ResponseEnvelope::failure(code, message),
            document: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.document.is_some() && self.envelope.is_success()
    }

    pub fn result_code(&self) -> &str {
        &self.envelope.result_code
    }

    pub fn result_message(&self) -> &str {
        &self.envelope.result_message
    }
}

impl<D: Document> DocumentEnvelope<D> {
    /// Decodes the locations reported for `category`. Empty when there is no
    /// document or the key is absent.
    pub fn error_locations(&self, category: ErrorCategory) -> Vec<ErrorLocation> {
        self.document
            .as_ref()
            .map(|doc| doc.error_locations(category))
            .unwrap_or_default()
    }
}
