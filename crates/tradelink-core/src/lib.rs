//! # tradelink-core: Pure Protocol Types for the Organisation API
//!
//! This crate holds everything about the platform protocol that can be
//! expressed without touching the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tradelink Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Endpoint callers (tradelink-client)             │   │
//! │  │   import_sales_order, create_notification, search records ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          OrgSession + RequestDispatcher (tradelink-client)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tradelink-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ envelope  │  │ document  │  │ location  │  │  catalog  │  │   │
//! │  │   │ Response  │  │ EsDocument│  │ ErrorLoc  │  │ Messages  │  │   │
//! │  │   │ Document  │  │ configs   │  │ decode    │  │ fallback  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`codes`] - Result code wire values (success, local and remote failures)
//! - [`envelope`] - `ResponseEnvelope` and `DocumentEnvelope`
//! - [`document`] - The `Document` trait and the generic `EsDocument`
//! - [`location`] - Error-location codec for partial import failures
//! - [`catalog`] - Result code → localized message lookup
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use tradelink_core::location::{decode, ErrorLocation};
//!
//! let mut configs = HashMap::new();
//! configs.insert("orders_with_unmatched_lines".to_string(), "0:1,bad,2:3".to_string());
//!
//! let locations = decode(&configs, "orders_with_unmatched_lines");
//! assert_eq!(locations, vec![ErrorLocation::new(0, 1), ErrorLocation::new(2, 3)]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod codes;
pub mod document;
pub mod envelope;
pub mod error;
pub mod location;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::MessageCatalog;
pub use document::{Document, EsDocument};
pub use envelope::{DocumentEnvelope, EndpointResult, ResponseEnvelope};
pub use error::{CoreError, CoreResult};
pub use location::{ErrorCategory, ErrorLocation};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// API version reported by envelopes that never reached the platform.
pub const DEFAULT_API_VERSION: &str = "1.0.0.0";

/// Locale used when none is configured, and the fallback for unknown locales.
pub const DEFAULT_LOCALE: &str = "en_AU";
