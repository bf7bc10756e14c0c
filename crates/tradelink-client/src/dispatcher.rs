//! # Request Dispatcher
//!
//! Turns one [`EndpointRequest`] into exactly one envelope. Every local
//! failure (bad URL, refused connection, unreadable body) is folded into a
//! failure envelope here, so callers only ever inspect result codes.
//!
//! ## Dispatch Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Dispatch Pipeline                              │
//! │                                                                         │
//! │  EndpointRequest                                                        │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  1. URL       base + /rest/1/org/ + endpoint [+ ?query]                │
//! │      │        parse failure ──────────────► SERVER_ERROR_MALFORMED_URL │
//! │      ▼                                                                  │
//! │  2. Body      document → pruned JSON → gzip (document requests only)   │
//! │      │        text     → as-is + Content-Length                        │
//! │      ▼                                                                  │
//! │  3. Send      HttpTransport::execute (blocking, timeout 0 = forever)   │
//! │      │        connect failure ────────────► SERVER_ERROR_CONNECTION    │
//! │      ▼                                                                  │
//! │  4. Status    != 200 ─────────────────────► SERVER_ERROR_RESPONSE      │
//! │      ▼                                                                  │
//! │  5. Decode    gzip | deflate | identity → UTF-8 → JSON                 │
//! │      │        read / parse failure ───────► SERVER_ERROR_IO            │
//! │      ▼                                                                  │
//! │  6. Envelope  result, result_code, message from MessageCatalog         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Result Rules
//! - [`RequestDispatcher::send_request`] trusts the platform's own envelope.
//!   Its body is plain text or nothing, never compressed.
//! - [`RequestDispatcher::send_document_request`] derives the outcome from
//!   the returned document: its success flag, and `configs["result_code"]`.
//!   Only a [`DocumentRequest`] can carry a gzip document upload.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use tradelink_core::codes;
use tradelink_core::{Document, DocumentEnvelope, EndpointResult, MessageCatalog, ResponseEnvelope};

use crate::encoding::{decoder_for, document_json, gzip_encode, read_text};
use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};

/// Scheme and host of the platform API.
pub const DEFAULT_BASE_URL: &str = "https://api.squizz.com";

/// Path prefix shared by every organisation endpoint.
pub const ORG_API_PATH: &str = "/rest/1/org/";

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_CONTENT_ENCODING: &str = "Content-Encoding";
pub const HEADER_CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const ENCODING_GZIP: &str = "gzip";

// =============================================================================
// Query Parameters
// =============================================================================

/// Ordered `key=value` pairs, percent-encoded on output.
///
/// Used both for URL query strings and for form-encoded POST bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// `Y` / `N` flag values used by the platform's query parameters.
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Y"
    } else {
        "N"
    }
}

// =============================================================================
// Endpoint Request
// =============================================================================

/// Plain body of an endpoint request, written to the wire as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Text(String),
}

/// Everything needed to call one endpoint once.
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    pub method: HttpMethod,
    /// Endpoint name plus any path segments, e.g. `validate_session/{id}`.
    pub endpoint: String,
    /// Already encoded query string, without the leading `?`.
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Zero waits indefinitely.
    pub timeout: Duration,
}

impl EndpointRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        EndpointRequest {
            method,
            endpoint: endpoint.into(),
            query: String::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: Duration::ZERO,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_text_body(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Text(body.into());
        self
    }

    /// Uncompressed JSON text body.
    pub fn with_json_body(self, json: impl Into<String>) -> Self {
        self.with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with_text_body(json)
    }

    /// Form-encoded POST body.
    pub fn with_form(self, form: &QueryParams) -> Self {
        self.with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_FORM)
            .with_text_body(form.encode())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Turns this into a document request uploading `document` as pruned,
    /// gzip-compressed JSON. Any text body is dropped.
    pub fn with_document<P: Serialize + ?Sized>(mut self, document: &P) -> DocumentRequest {
        self.body = RequestBody::Empty;
        let upload = document_json(document).and_then(|json| gzip_encode(&json));
        DocumentRequest {
            request: self,
            upload: Some(upload),
        }
    }
}

/// A request answered with a document, optionally uploading one.
#[derive(Debug)]
pub struct DocumentRequest {
    pub request: EndpointRequest,
    /// Compressed upload, or the error that stopped it being encoded.
    upload: Option<ClientResult<Vec<u8>>>,
}

impl DocumentRequest {
    pub fn has_upload(&self) -> bool {
        self.upload.is_some()
    }
}

impl From<EndpointRequest> for DocumentRequest {
    fn from(request: EndpointRequest) -> Self {
        DocumentRequest {
            request,
            upload: None,
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

enum Reply {
    Text(String),
    Status(u16),
}

/// Stateless request executor. Safe to reuse for any number of calls.
#[derive(Debug)]
pub struct RequestDispatcher<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    catalog: MessageCatalog,
}

impl RequestDispatcher<ReqwestTransport> {
    /// Dispatcher over a real HTTP client.
    pub fn connect(base_url: impl Into<String>, catalog: MessageCatalog) -> ClientResult<Self> {
        Ok(RequestDispatcher::new(ReqwestTransport::new()?, base_url, catalog))
    }
}

impl<T: HttpTransport> RequestDispatcher<T> {
    pub fn new(transport: T, base_url: impl Into<String>, catalog: MessageCatalog) -> Self {
        RequestDispatcher {
            transport,
            base_url: base_url.into(),
            catalog,
        }
    }

    /// Platform host with the en_AU catalog.
    pub fn with_defaults(transport: T) -> Self {
        Self::new(transport, DEFAULT_BASE_URL, MessageCatalog::en_au())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Builds the absolute URL for `endpoint` with an optional query.
    pub fn endpoint_url(&self, endpoint: &str, query: &str) -> ClientResult<Url> {
        let mut raw = format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            ORG_API_PATH,
            endpoint.trim_start_matches('/')
        );
        if !query.is_empty() {
            raw.push('?');
            raw.push_str(query);
        }
        Ok(Url::parse(&raw)?)
    }

    // =========================================================================
    // Public Operations
    // =========================================================================

    /// Calls an endpoint whose reply is a plain response envelope.
    pub fn send_request(&self, request: EndpointRequest) -> ResponseEnvelope {
        let endpoint = request.endpoint.clone();
        let reply = self
            .exchange(request, None)
            .and_then(|reply| match reply {
                Reply::Text(text) => serde_json::from_str::<ResponseEnvelope>(&text)
                    .map(|envelope| Ok(envelope.normalize()))
                    .map_err(ClientError::from),
                Reply::Status(status) => Ok(Err(status)),
            });

        match reply {
            Ok(Ok(mut envelope)) => {
                envelope.result_message = self.platform_message(
                    &envelope.result_code,
                    Some(envelope.result_message.as_str()),
                );
                debug!(
                    endpoint = %endpoint,
                    result = envelope.result.as_str(),
                    result_code = %envelope.result_code,
                    "Endpoint replied"
                );
                envelope
            }
            Ok(Err(status)) => self.status_failure(&endpoint, status),
            Err(err) => self.failure_envelope(&endpoint, &err),
        }
    }

    /// Calls an endpoint whose reply is a document of type `D`.
    pub fn send_document_request<D, R>(&self, request: R) -> DocumentEnvelope<D>
    where
        D: Document + DeserializeOwned,
        R: Into<DocumentRequest>,
    {
        let DocumentRequest { request, upload } = request.into();
        let endpoint = request.endpoint.clone();
        let reply = upload
            .transpose()
            .and_then(|upload| self.exchange(request, upload))
            .and_then(|reply| match reply {
                Reply::Text(text) => serde_json::from_str::<D>(&text)
                    .map(Ok)
                    .map_err(ClientError::from),
                Reply::Status(status) => Ok(Err(status)),
            });

        match reply {
            Ok(Ok(document)) => {
                let result = if document.is_successful() {
                    EndpointResult::Success
                } else {
                    EndpointResult::Failure
                };
                let result_code = document
                    .result_code()
                    .filter(|code| !code.trim().is_empty())
                    .unwrap_or(codes::ERROR_UNKNOWN)
                    .to_string();
                let result_message = self.platform_message(&result_code, document.message());

                debug!(
                    endpoint = %endpoint,
                    result = result.as_str(),
                    result_code = %result_code,
                    "Endpoint returned document"
                );

                DocumentEnvelope {
                    envelope: ResponseEnvelope {
                        result,
                        result_code,
                        result_message,
                        ..ResponseEnvelope::default()
                    },
                    document: Some(document),
                }
            }
            Ok(Err(status)) => DocumentEnvelope {
                envelope: self.status_failure(&endpoint, status),
                document: None,
            },
            Err(err) => DocumentEnvelope {
                envelope: self.failure_envelope(&endpoint, &err),
                document: None,
            },
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn exchange(&self, request: EndpointRequest, upload: Option<Vec<u8>>) -> ClientResult<Reply> {
        let http_request = self.build_http_request(request, upload)?;
        debug!(method = %http_request.method, url = %http_request.url, "Dispatching request");

        let response = self.transport.execute(http_request)?;
        if response.status != 200 {
            return Ok(Reply::Status(response.status));
        }

        let reader = decoder_for(response.content_encoding.as_deref(), response.body);
        Ok(Reply::Text(read_text(reader)?))
    }

    fn build_http_request(&self, request: EndpointRequest, upload: Option<Vec<u8>>) -> ClientResult<HttpRequest> {
        let url = self.endpoint_url(&request.endpoint, &request.query)?;
        let mut headers = request.headers;

        let body = match (request.method, upload, request.body) {
            (HttpMethod::Get, _, _) => None,
            (HttpMethod::Post, Some(gzipped), _) => {
                headers.push((HEADER_CONTENT_ENCODING.to_string(), ENCODING_GZIP.to_string()));
                headers.push((HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()));
                Some(gzipped)
            }
            (HttpMethod::Post, None, RequestBody::Text(text)) => {
                headers.push((HEADER_CONTENT_LENGTH.to_string(), text.len().to_string()));
                Some(text.into_bytes())
            }
            (HttpMethod::Post, None, RequestBody::Empty) => None,
        };

        Ok(HttpRequest {
            method: request.method,
            url,
            headers,
            body,
            timeout: request.timeout,
        })
    }

    /// Catalog sentence, else the platform's own message, else the code.
    fn platform_message(&self, code: &str, server_message: Option<&str>) -> String {
        match self.catalog.lookup(code) {
            Some(message) => message.to_string(),
            None => server_message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(code)
                .to_string(),
        }
    }

    /// Fresh failure envelope for a call that failed before or while
    /// reaching the platform.
    pub fn failure_envelope(&self, endpoint: &str, err: &ClientError) -> ResponseEnvelope {
        let code = err.result_code();
        warn!(endpoint = %endpoint, result_code = code, error = %err, "Endpoint call failed locally");
        ResponseEnvelope::failure(code, format!("{}\n{}", self.catalog.resolve(code), err.detail()))
    }

    fn status_failure(&self, endpoint: &str, status: u16) -> ResponseEnvelope {
        let code = codes::ERROR_RESPONSE;
        warn!(endpoint = %endpoint, status, "Endpoint returned HTTP error status");
        ResponseEnvelope::failure(code, format!("{}\nHTTP {}", self.catalog.resolve(code), status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::{MockReply, MockTransport};
    use flate2::read::GzDecoder;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::io::Read;
    use tradelink_core::{EsDocument, ErrorCategory, ErrorLocation};

    fn dispatcher(transport: MockTransport) -> RequestDispatcher<MockTransport> {
        RequestDispatcher::with_defaults(transport)
    }

    fn gunzip(bytes: &[u8]) -> Value {
        let mut text = String::new();
        GzDecoder::new(bytes).read_to_string(&mut text).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        let d = dispatcher(MockTransport::new());
        assert_eq!(
            d.endpoint_url("validate_session/abc", "").unwrap().as_str(),
            "https://api.squizz.com/rest/1/org/validate_session/abc"
        );
        assert_eq!(
            d.endpoint_url("import_esd/abc", "import_type_id=6").unwrap().as_str(),
            "https://api.squizz.com/rest/1/org/import_esd/abc?import_type_id=6"
        );
    }

    #[test]
    fn test_query_params_encoding() {
        let params = QueryParams::new()
            .with("supplier_org_id", "11EA 64")
            .with("customer_account_code", "A&B");
        assert_eq!(
            params.encode(),
            "supplier_org_id=11EA%2064&customer_account_code=A%26B"
        );
        assert!(QueryParams::new().is_empty());
        assert_eq!(yes_no(true), "Y");
    }

    #[test]
    fn test_platform_envelope_passes_through() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({
            "result": "SUCCESS",
            "result_code": "SUCCESS",
            "api_version": "1.0.0.0",
            "session_id": "s-1"
        }))));

        let envelope = d.send_request(EndpointRequest::post("create_session"));
        assert!(envelope.is_success());
        assert_eq!(envelope.session_id.as_deref(), Some("s-1"));
        assert_eq!(envelope.result_message, "API endpoint was successfully called.");
    }

    #[test]
    fn test_document_upload_is_gzipped_json() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({
            "resultStatus": 1,
            "configs": { "result_code": "SUCCESS" }
        }))));

        let upload = EsDocument::new(vec![json!({ "keyProductID": "P1", "quantity": 0 })]);
        let envelope: DocumentEnvelope<EsDocument> = d.send_document_request(
            EndpointRequest::post("import_esd/s-1")
                .with_query("import_type_id=6")
                .with_document(&upload),
        );

        assert!(envelope.is_success());
        assert_eq!(envelope.result_code(), "SUCCESS");

        let sent = d.transport().last_request().unwrap();
        assert_eq!(sent.header("Content-Encoding"), Some("gzip"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));

        let body = gunzip(sent.body.as_deref().unwrap());
        assert_eq!(
            body,
            json!({ "totalDataRecords": 1, "dataRecords": [ { "keyProductID": "P1" } ] })
        );
    }

    #[test]
    fn test_non_200_is_response_error() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::raw(503, None, b"busy".to_vec())));
        let envelope: DocumentEnvelope<EsDocument> =
            d.send_document_request(EndpointRequest::get("search_customer_account_records_esd/s"));

        assert!(!envelope.is_success());
        assert!(envelope.document.is_none());
        assert_eq!(envelope.result_code(), codes::ERROR_RESPONSE);
        assert!(envelope.result_message().ends_with("\nHTTP 503"));
    }

    #[test]
    fn test_connection_failure_is_local_error() {
        let d = dispatcher(
            MockTransport::new().with_reply(Err(ClientError::Connection("refused".into()))),
        );
        let envelope = d.send_request(EndpointRequest::get("validate_session/s"));

        assert!(!envelope.is_success());
        assert_eq!(envelope.result_code, codes::ERROR_CONNECTION);
        let expected = format!(
            "{}\nrefused",
            MessageCatalog::en_au().resolve(codes::ERROR_CONNECTION)
        );
        assert_eq!(envelope.result_message, expected);
    }

    #[test]
    fn test_garbage_json_is_io_error() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::raw(200, None, b"<html>".to_vec())));
        let envelope = d.send_request(EndpointRequest::get("validate_session/s"));
        assert_eq!(envelope.result_code, codes::ERROR_IO);
        assert_eq!(envelope.api_version, "1.0.0.0");
    }

    #[test]
    fn test_gzip_and_deflate_responses() {
        let body = json!({ "result": "SUCCESS", "result_code": "SUCCESS" }).to_string();
        let gzipped = gzip_encode(body.as_bytes()).unwrap();

        let d = dispatcher(MockTransport::new().with_reply(MockReply::raw(200, Some("GZIP"), gzipped)));
        assert!(d.send_request(EndpointRequest::get("validate_session/s")).is_success());

        let mut deflater =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        std::io::Write::write_all(&mut deflater, body.as_bytes()).unwrap();
        let deflated = deflater.finish().unwrap();

        let d = dispatcher(MockTransport::new().with_reply(MockReply::raw(200, Some("deflate"), deflated)));
        assert!(d.send_request(EndpointRequest::get("validate_session/s")).is_success());
    }

    #[test]
    fn test_unmatched_lines_reported() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({
            "resultStatus": 0,
            "configs": {
                "result_code": "SERVER_ERROR_ORDER_PRODUCT_NOT_MATCHED",
                "orders_with_unmatched_lines": "0:2,1:0"
            }
        }))));

        let order = EsDocument::new(vec![json!({ "keyPurchaseOrderID": "PO-1" })]);
        let envelope: DocumentEnvelope<EsDocument> = d.send_document_request(
            EndpointRequest::post("import_sales_order_esd/s").with_document(&order),
        );

        assert!(!envelope.is_success());
        assert_eq!(envelope.envelope.result, EndpointResult::Failure);
        assert_eq!(envelope.result_code(), codes::ERROR_ORDER_PRODUCT_NOT_MATCHED);
        assert_eq!(
            envelope.error_locations(ErrorCategory::OrderUnmatchedLines),
            vec![ErrorLocation::new(0, 2), ErrorLocation::new(1, 0)]
        );
        assert!(envelope
            .error_locations(ErrorCategory::OrderUnpricedLines)
            .is_empty());
    }

    #[test]
    fn test_document_without_configs_has_unknown_code() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({ "resultStatus": 1 }))));
        let envelope: DocumentEnvelope<EsDocument> =
            d.send_document_request(EndpointRequest::get("retrieve_customer_account_record_esd/s"));

        assert_eq!(envelope.envelope.result, EndpointResult::Success);
        assert_eq!(envelope.result_code(), codes::ERROR_UNKNOWN);
        assert!(envelope.document.is_some());
    }

    #[test]
    fn test_malformed_base_url_never_sends() {
        let d = RequestDispatcher::new(MockTransport::new(), "not a url", MessageCatalog::en_au());
        let envelope = d.send_request(EndpointRequest::get("validate_session/s"));
        assert_eq!(envelope.result_code, codes::ERROR_MALFORMED_URL);
        assert_eq!(d.transport().request_count(), 0);
    }

    #[test]
    fn test_get_never_carries_body() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({ "result": "SUCCESS" }))));
        d.send_request(EndpointRequest::get("validate_session/s").with_text_body("ignored"));
        let sent = d.transport().last_request().unwrap();
        assert!(sent.body.is_none());
        assert_eq!(sent.header("Content-Length"), None);
    }

    #[test]
    fn test_text_body_sets_content_length() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({ "result": "SUCCESS" }))));
        let form = QueryParams::new().with("org_security_certificate_id", "c-1");
        d.send_request(
            EndpointRequest::post("validate_cert/s")
                .with_form(&form)
                .with_timeout(Duration::from_secs(5)),
        );

        let sent = d.transport().last_request().unwrap();
        assert_eq!(sent.body.as_deref(), Some(&b"org_security_certificate_id=c-1"[..]));
        assert_eq!(sent.header("Content-Length"), Some("31"));
        assert_eq!(sent.header("Content-Type"), Some(CONTENT_TYPE_FORM));
        assert_eq!(sent.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_json_text_body_is_not_compressed() {
        let d = dispatcher(MockTransport::new().with_reply(MockReply::json(json!({ "result": "SUCCESS" }))));
        let json = json!({ "org_id": "org-1" }).to_string();
        d.send_request(EndpointRequest::post("create_session").with_json_body(json.clone()));

        let sent = d.transport().last_request().unwrap();
        assert_eq!(sent.header("Content-Encoding"), None);
        assert_eq!(sent.header("Content-Type"), Some(CONTENT_TYPE_JSON));
        assert_eq!(sent.header("Content-Length"), Some(json.len().to_string().as_str()));
        assert_eq!(sent.body.as_deref(), Some(json.as_bytes()));
    }

    #[test]
    fn test_unencodable_upload_never_sends() {
        let d = dispatcher(MockTransport::new());
        let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
        bad.insert((1, 2), 3);

        let request = EndpointRequest::post("import_esd/s").with_document(&bad);
        assert!(request.has_upload());
        let envelope: DocumentEnvelope<EsDocument> = d.send_document_request(request);

        assert_eq!(envelope.result_code(), codes::ERROR_IO);
        assert!(envelope.document.is_none());
        assert_eq!(d.transport().request_count(), 0);
    }

    #[test]
    fn test_message_resolution_fallbacks() {
        let d = dispatcher(
            MockTransport::new()
                .with_reply(MockReply::json(json!({
                    "result": "FAILURE",
                    "result_code": "SERVER_ERROR_FROM_THE_FUTURE",
                    "result_message": "server says no"
                })))
                .with_reply(MockReply::json(json!({
                    "result": "FAILURE",
                    "result_code": "SERVER_ERROR_FROM_THE_FUTURE"
                })))
                .with_reply(MockReply::json(json!({
                    "result": "FAILURE",
                    "result_code": "SERVER_ERROR_SESSION_INVALID",
                    "result_message": "server wording"
                }))),
        );

        let first = d.send_request(EndpointRequest::get("validate_session/s"));
        assert_eq!(first.result_message, "server says no");

        let second = d.send_request(EndpointRequest::get("validate_session/s"));
        assert_eq!(second.result_message, "SERVER_ERROR_FROM_THE_FUTURE");

        let third = d.send_request(EndpointRequest::get("validate_session/s"));
        assert!(third.result_message.contains("session not existing"));
    }
}
