//! # HTTP Transport
//!
//! The seam between the dispatcher and the network. The dispatcher builds an
//! [`HttpRequest`], hands it to an [`HttpTransport`], and reads the returned
//! [`HttpResponse`] body itself so it can choose the decompressor.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Transport Flow                                 │
//! │                                                                         │
//! │  RequestDispatcher                 HttpTransport                        │
//! │  ─────────────────                 ─────────────                        │
//! │  HttpRequest {                                                          │
//! │    method, url,        ────────►   execute()                            │
//! │    headers, body,                    │                                  │
//! │    timeout                           │  blocking send, wait for status │
//! │  }                                   ▼                                  │
//! │                         ◄────────  HttpResponse {                       │
//! │                                      status,                            │
//! │                                      content_encoding,                  │
//! │                                      body: Box<dyn Read>  (owned)       │
//! │                                    }                                    │
//! │                                                                         │
//! │  Dropping the response releases the connection on every path.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `reqwest` is built without its decompression features, so the body
//! arrives exactly as the platform encoded it.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, CONTENT_ENCODING};
use tracing::trace;
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request / Response
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready for the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Zero means wait indefinitely.
    pub timeout: Duration,
}

impl HttpRequest {
    /// Returns the first header value matching `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status line plus an owned, still unread body stream.
pub struct HttpResponse {
    pub status: u16,
    pub content_encoding: Option<String>,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_encoding", &self.content_encoding)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Executes one blocking HTTP exchange.
///
/// Implementations map their own failures onto the transport variants of
/// [`ClientError`] so the dispatcher can classify them.
pub trait HttpTransport {
    fn execute(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

// =============================================================================
// Reqwest Transport
// =============================================================================

/// Production transport backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> ClientResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, request.url);

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Protocol(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Protocol(format!("invalid header value: {}", e)))?;
            builder = builder.header(name, value);
        }

        if !request.timeout.is_zero() {
            builder = builder.timeout(request.timeout);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let content_encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        trace!(status, ?content_encoding, "Response headers received");

        Ok(HttpResponse {
            status,
            content_encoding,
            body: Box::new(response),
        })
    }
}

// =============================================================================
// Test Double
// =============================================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// One canned reply: status, optional Content-Encoding and raw body.
    pub struct MockReply {
        pub status: u16,
        pub content_encoding: Option<String>,
        pub body: Vec<u8>,
    }

    impl MockReply {
        pub fn json(body: serde_json::Value) -> ClientResult<MockReply> {
            Ok(MockReply {
                status: 200,
                content_encoding: None,
                body: body.to_string().into_bytes(),
            })
        }

        pub fn raw(status: u16, content_encoding: Option<&str>, body: Vec<u8>) -> ClientResult<MockReply> {
            Ok(MockReply {
                status,
                content_encoding: content_encoding.map(str::to_string),
                body,
            })
        }
    }

    /// Records every request and answers from a queue.
    #[derive(Default)]
    pub struct MockTransport {
        replies: RefCell<VecDeque<ClientResult<MockReply>>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_reply(self, reply: ClientResult<MockReply>) -> Self {
            self.replies.borrow_mut().push_back(reply);
            self
        }

        pub fn push_reply(&self, reply: ClientResult<MockReply>) {
            self.replies.borrow_mut().push_back(reply);
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    impl HttpTransport for MockTransport {
        fn execute(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
            self.requests.borrow_mut().push(request);
            let reply = self
                .replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Connection("no reply queued".into())))?;
            Ok(HttpResponse {
                status: reply.status,
                content_encoding: reply.content_encoding,
                body: Box::new(Cursor::new(reply.body)),
            })
        }
    }
}
