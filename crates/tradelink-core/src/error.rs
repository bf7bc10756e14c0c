//! # Error Types
//!
//! Domain-specific error types for tradelink-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tradelink-core errors (this file)                                     │
//! │  └── CoreError        - Strict parsing of protocol values              │
//! │                                                                         │
//! │  tradelink-client errors (separate crate)                              │
//! │  └── ClientError      - Local transport and config failures            │
//! │                                                                         │
//! │  Flow: ClientError → ResponseEnvelope (result_code) → Caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Core errors never reach endpoint callers directly. The tolerant decoders
//! in [`crate::location`] swallow them token by token.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while parsing protocol values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An error-location token is not `recordIndex:subIndex`.
    ///
    /// ## When This Occurs
    /// - Empty token between two commas
    /// - Missing or extra `:` separators
    /// - Negative or non-numeric indices
    #[error("Invalid error location '{token}': {reason}")]
    InvalidLocation { token: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
