//! # Organisation Session
//!
//! Owns one organisation's API credentials and the session the platform
//! issues for them. Every endpoint except `create_session` is scoped by the
//! session id, so calls routed through [`OrgSession::send`] and
//! [`OrgSession::send_document`] get the id appended automatically.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session State Machine                           │
//! │                                                                         │
//! │                   create() → SUCCESS + non-empty id                     │
//! │   ┌─────────────┐ ─────────────────────────────────► ┌─────────────┐   │
//! │   │  NoSession  │                                    │   Active    │   │
//! │   │             │ ◄───────────────────────────────── │ session_id  │   │
//! │   └─────────────┘   validate() → SESSION_INVALID     └─────────────┘   │
//! │                     any send() → SESSION_INVALID                        │
//! │                     destroy()  (whatever the outcome)                   │
//! │                     mark_expired()                                      │
//! │                                                                         │
//! │  Transitions follow result codes only. A 200 reply can still carry a   │
//! │  business failure, and a local transport failure changes nothing.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The session is mutable state: every operation takes `&mut self`. Share
//! one across threads only behind a `Mutex`. The dispatcher underneath is
//! stateless and may be used freely.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use tradelink_core::{codes, Document, DocumentEnvelope, ResponseEnvelope};

use crate::config::ClientConfig;
use crate::dispatcher::{DocumentRequest, EndpointRequest, RequestDispatcher};
use crate::endpoints::{CREATE_SESSION, DESTROY_SESSION, VALIDATE_SESSION};
use crate::error::ClientResult;
use crate::transport::{HttpTransport, ReqwestTransport};

// =============================================================================
// Credentials
// =============================================================================

/// Organisation API credentials issued by the platform.
#[derive(Clone, PartialEq, Eq)]
pub struct OrgCredentials {
    pub org_id: String,
    pub api_key: String,
    pub api_password: String,
}

impl OrgCredentials {
    pub fn new(
        org_id: impl Into<String>,
        api_key: impl Into<String>,
        api_password: impl Into<String>,
    ) -> Self {
        OrgCredentials {
            org_id: org_id.into(),
            api_key: api_key.into(),
            api_password: api_password.into(),
        }
    }
}

impl fmt::Debug for OrgCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgCredentials")
            .field("org_id", &self.org_id)
            .field("api_key", &self.api_key)
            .field("api_password", &"<redacted>")
            .finish()
    }
}

/// Wire body of `create_session`, sent as plain JSON text.
#[derive(Serialize)]
struct CreateSessionBody<'a> {
    org_id: &'a str,
    api_org_key: &'a str,
    api_org_password: &'a str,
}

// =============================================================================
// Session State
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoSession,
    Active { session_id: String },
}

// =============================================================================
// Org Session
// =============================================================================

pub struct OrgSession<T = ReqwestTransport> {
    credentials: OrgCredentials,
    dispatcher: RequestDispatcher<T>,
    timeout: Duration,
    api_version: String,
    state: SessionState,
}

impl OrgSession<ReqwestTransport> {
    /// Builds a session against the real platform from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let credentials = config.credentials()?;
        let dispatcher = RequestDispatcher::connect(config.api.base_url.clone(), config.catalog())?;
        Ok(OrgSession::new(credentials, dispatcher, config.timeout()))
    }
}

impl<T: HttpTransport> OrgSession<T> {
    /// Creates a session in `NoSession` state. `timeout` applies to the
    /// session's own create/validate/destroy calls.
    pub fn new(credentials: OrgCredentials, dispatcher: RequestDispatcher<T>, timeout: Duration) -> Self {
        OrgSession {
            credentials,
            dispatcher,
            timeout,
            api_version: tradelink_core::DEFAULT_API_VERSION.to_string(),
            state: SessionState::NoSession,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Asks the platform for a new session with the stored credentials.
    pub fn create(&mut self) -> ResponseEnvelope {
        let body = CreateSessionBody {
            org_id: &self.credentials.org_id,
            api_org_key: &self.credentials.api_key,
            api_org_password: &self.credentials.api_password,
        };
        let envelope = match serde_json::to_string(&body) {
            Ok(json) => {
                let request = EndpointRequest::post(CREATE_SESSION)
                    .with_json_body(json)
                    .with_timeout(self.timeout);
                self.dispatcher.send_request(request)
            }
            Err(e) => self.dispatcher.failure_envelope(CREATE_SESSION, &e.into()),
        };

        let issued = envelope
            .session_id
            .as_deref()
            .filter(|id| envelope.is_success() && !id.is_empty());

        match issued {
            Some(id) => {
                info!(org_id = %self.credentials.org_id, "Organisation session created");
                self.state = SessionState::Active {
                    session_id: id.to_string(),
                };
                self.api_version = envelope.api_version.clone();
            }
            None => {
                warn!(
                    org_id = %self.credentials.org_id,
                    result_code = %envelope.result_code,
                    "Organisation session could not be created"
                );
                self.state = SessionState::NoSession;
            }
        }

        envelope
    }

    /// Checks the current session with the platform.
    pub fn validate(&mut self) -> ResponseEnvelope {
        let request = EndpointRequest::get(VALIDATE_SESSION).with_timeout(self.timeout);
        self.send(request)
    }

    /// Ends the session. Local state is `NoSession` afterwards whatever the
    /// platform answers.
    pub fn destroy(&mut self) -> ResponseEnvelope {
        let request = EndpointRequest::post(DESTROY_SESSION).with_timeout(self.timeout);
        let had_session = self.session_exists();
        let envelope = self.send(request);
        if had_session {
            info!(org_id = %self.credentials.org_id, result_code = %envelope.result_code, "Organisation session destroyed");
        }
        self.mark_expired();
        envelope
    }

    /// Validates the session, creating a new one if the platform (or the
    /// local state) says there is none.
    pub fn validate_or_create(&mut self) -> ResponseEnvelope {
        let envelope = self.validate();
        if envelope.is_session_invalid() {
            debug!(org_id = %self.credentials.org_id, "Session invalid, creating a new one");
            return self.create();
        }
        envelope
    }

    /// Forgets the session locally without calling the platform.
    pub fn mark_expired(&mut self) {
        self.state = SessionState::NoSession;
    }

    pub fn session_exists(&self) -> bool {
        self.session_id().is_some()
    }

    /// The current session id, only while the session is active.
    pub fn session_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active { session_id } if !session_id.is_empty() => Some(session_id),
            _ => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// API version reported when the session was created.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn credentials(&self) -> &OrgCredentials {
        &self.credentials
    }

    pub fn dispatcher(&self) -> &RequestDispatcher<T> {
        &self.dispatcher
    }

    // =========================================================================
    // Session-Scoped Dispatch
    // =========================================================================

    /// Sends `request` to `{endpoint}/{session_id}`.
    ///
    /// Without a session nothing is sent and a session-invalid failure is
    /// returned. A session-invalid reply expires the local session.
    pub fn send(&mut self, mut request: EndpointRequest) -> ResponseEnvelope {
        if !self.scope(&mut request) {
            return self.no_session_envelope();
        }
        let envelope = self.dispatcher.send_request(request);
        self.observe(&envelope);
        envelope
    }

    /// Document variant of [`OrgSession::send`]. Accepts a plain
    /// [`EndpointRequest`] for fetches or a [`DocumentRequest`] for uploads.
    pub fn send_document<D, R>(&mut self, request: R) -> DocumentEnvelope<D>
    where
        D: Document + DeserializeOwned,
        R: Into<DocumentRequest>,
    {
        let mut request = request.into();
        if !self.scope(&mut request.request) {
            return DocumentEnvelope {
                envelope: self.no_session_envelope(),
                document: None,
            };
        }
        let envelope = self.dispatcher.send_document_request(request);
        self.observe(&envelope.envelope);
        envelope
    }

    /// Appends the session id to the endpoint. False without a session.
    fn scope(&self, request: &mut EndpointRequest) -> bool {
        let Some(session_id) = self.session_id() else {
            return false;
        };
        request.endpoint = format!(
            "{}/{}",
            request.endpoint.trim_end_matches('/'),
            urlencoding::encode(session_id)
        );
        true
    }

    fn observe(&mut self, envelope: &ResponseEnvelope) {
        if envelope.is_session_invalid() && self.session_exists() {
            warn!(org_id = %self.credentials.org_id, "Platform reports session invalid, expiring local session");
            self.mark_expired();
        }
    }

    fn no_session_envelope(&self) -> ResponseEnvelope {
        debug!(org_id = %self.credentials.org_id, "No active session, call not sent");
        let code = codes::ERROR_SESSION_INVALID;
        ResponseEnvelope::failure(code, self.dispatcher.catalog().resolve(code))
    }
}

impl<T> fmt::Debug for OrgSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgSession")
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("api_version", &self.api_version)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
