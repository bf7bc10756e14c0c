//! # tradelink-client: Network Layer for the Organisation API
//!
//! Blocking HTTP client for the trading platform's organisation endpoints.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tradelink-client                                 │
//! │                                                                         │
//! │   endpoints::*  ──►  OrgSession  ──►  RequestDispatcher  ──►  Transport │
//! │   (query/body)       (session id,     (URL, gzip, JSON,      (reqwest)  │
//! │                       auto-expiry)     failure → envelope)               │
//! │                                                                         │
//! │   ClientConfig: TOML file + TRADELINK_* environment overrides           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dispatcher`] - One request in, one envelope out
//! - [`session`] - Organisation session lifecycle and session-scoped calls
//! - [`endpoints`] - Notification, certificate, import, retrieval, procurement and
//!   customer account callers
//! - [`transport`] - `HttpTransport` seam and the `reqwest` implementation
//! - [`encoding`] - gzip / deflate and default-value pruning
//! - [`config`] - Client configuration
//! - [`error`] - Local error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tradelink_client::config::ClientConfig;
//! use tradelink_client::endpoints::{create_notification, NotifyCategory};
//! use tradelink_client::session::OrgSession;
//!
//! # fn main() -> Result<(), tradelink_client::error::ClientError> {
//! let config = ClientConfig::load(None)?;
//! let mut session = OrgSession::from_config(&config)?;
//!
//! let created = session.validate_or_create();
//! if created.is_success() {
//!     let envelope = create_notification(
//!         &mut session,
//!         Duration::from_secs(30),
//!         NotifyCategory::Org,
//!         "Nightly import finished",
//!         &[],
//!     );
//!     println!("{}: {}", envelope.result_code, envelope.result_message);
//!     session.destroy();
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod encoding;
pub mod endpoints;
pub mod error;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use dispatcher::{DocumentRequest, EndpointRequest, QueryParams, RequestDispatcher};
pub use error::{ClientError, ClientResult};
pub use session::{OrgCredentials, OrgSession, SessionState};
pub use transport::{HttpMethod, HttpTransport, ReqwestTransport};
