//! Data and sales order imports.
//!
//! Both calls upload a gzip-compressed document and take their outcome from
//! the document the platform sends back. Partial failures of a sales order
//! import are described by error locations:
//!
//! ```text
//! envelope.error_locations(ErrorCategory::OrderUnmatchedLines)
//!     → [ErrorLocation { record_index: 0, sub_index: 2 }, ...]
//!        order 0 in dataRecords, its line 2
//! ```

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tradelink_core::{DocumentEnvelope, EsDocument};

use crate::dispatcher::{yes_no, EndpointRequest, QueryParams};
use crate::endpoints::{IMPORT_ESD, IMPORT_SALES_ORDER_ESD};
use crate::session::OrgSession;
use crate::transport::HttpTransport;

/// Kind of data an `import_esd` call replaces on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportType(u32);

impl ImportType {
    pub const TAXCODES: ImportType = ImportType(1);
    pub const PRICE_LEVELS: ImportType = ImportType(2);
    pub const PRODUCTS: ImportType = ImportType(3);
    pub const PRODUCT_PRICE_LEVEL_UNIT_PRICING: ImportType = ImportType(6);
    pub const PRODUCT_PRICE_LEVEL_QUANTITY_PRICING: ImportType = ImportType(7);
    pub const PRODUCT_CUSTOMER_ACCOUNT_PRICING: ImportType = ImportType(8);
    pub const CATEGORIES: ImportType = ImportType(9);
    pub const ATTRIBUTES: ImportType = ImportType(11);
    pub const MAKERS: ImportType = ImportType(44);
    pub const MAKER_MODELS: ImportType = ImportType(45);
    pub const MAKER_MODEL_MAPPINGS: ImportType = ImportType(46);

    /// Any import type id the platform accepts.
    pub const fn new(id: u32) -> Self {
        ImportType(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Imports a document of `import_type` records, replacing the
/// organisation's existing data of that type.
pub fn import_document<T, R>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    import_type: ImportType,
    document: &EsDocument<R>,
) -> DocumentEnvelope<EsDocument>
where
    T: HttpTransport,
    R: Serialize,
{
    let query = QueryParams::new().with("import_type_id", import_type.to_string());
    let request = EndpointRequest::post(IMPORT_ESD)
        .with_query(query.encode())
        .with_timeout(timeout)
        .with_document(document);
    session.send_document(request)
}

/// Imports a sales order. With `reprice` the platform recalculates line
/// prices from the customer account's pricing.
pub fn import_sales_order<T, R>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    order: &EsDocument<R>,
    reprice: bool,
) -> DocumentEnvelope<EsDocument>
where
    T: HttpTransport,
    R: Serialize,
{
    let query = QueryParams::new().with("reprice_order", yes_no(reprice));
    let request = EndpointRequest::post(IMPORT_SALES_ORDER_ESD)
        .with_query(query.encode())
        .with_timeout(timeout)
        .with_document(order);
    session.send_document(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::active_session;
    use crate::error::ClientError;
    use crate::transport::mock::MockReply;
    use serde_json::json;
    use tradelink_core::{codes, ErrorCategory, ErrorLocation};

    #[test]
    fn test_import_document_query() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 1,
            "configs": { "result_code": "SUCCESS" }
        }))]);

        let products = EsDocument::new(vec![json!({ "keyProductID": "P1", "name": "Widget" })]);
        let envelope = import_document(&mut session, Duration::from_secs(30), ImportType::PRODUCTS, &products);

        assert!(envelope.is_success());
        let sent = session.dispatcher().transport().last_request().unwrap();
        assert_eq!(sent.url.path(), "/rest/1/org/import_esd/s-1");
        assert_eq!(sent.url.query(), Some("import_type_id=3"));
    }

    #[test]
    fn test_sales_order_partial_failure() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 0,
            "configs": {
                "result_code": "SERVER_ERROR_ORDER_LINE_PRICING_MISSING",
                "orders_with_unpriced_lines": "0:1, 0:3"
            }
        }))]);

        let order = EsDocument::new(vec![json!({
            "keyCustomerAccountID": "ACC-1",
            "lines": [ { "keyProductID": "A" }, { "keyProductID": "B" } ]
        })]);
        let envelope = import_sales_order(&mut session, Duration::from_secs(30), &order, true);

        assert!(!envelope.is_success());
        assert_eq!(envelope.result_code(), codes::ERROR_ORDER_LINE_PRICING_MISSING);
        assert_eq!(
            envelope.error_locations(ErrorCategory::OrderUnpricedLines),
            vec![ErrorLocation::new(0, 1), ErrorLocation::new(0, 3)]
        );

        let sent = session.dispatcher().transport().last_request().unwrap();
        assert_eq!(sent.url.query(), Some("reprice_order=Y"));
    }

    #[test]
    fn test_import_without_session_sends_nothing() {
        let mut session = active_session(Vec::new());
        session.mark_expired();

        let envelope = import_sales_order(&mut session, Duration::ZERO, &EsDocument::<serde_json::Value>::default(), false);
        assert_eq!(envelope.result_code(), codes::ERROR_SESSION_INVALID);
        assert!(envelope.document.is_none());
        assert_eq!(session.dispatcher().transport().request_count(), 1);
    }

    #[test]
    fn test_timeout_surfaces_as_io() {
        let mut session = active_session(vec![Err(ClientError::Io("operation timed out".into()))]);
        let envelope = import_document(
            &mut session,
            Duration::from_millis(1),
            ImportType::TAXCODES,
            &EsDocument::<serde_json::Value>::default(),
        );
        assert_eq!(envelope.result_code(), codes::ERROR_IO);
        assert!(session.session_exists());
    }

    #[test]
    fn test_catalog_import_types() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 1,
            "configs": { "result_code": "SUCCESS" }
        }))]);

        let makers = EsDocument::new(vec![json!({ "keyMakerID": "M1", "name": "Acme" })]);
        import_document(&mut session, Duration::from_secs(30), ImportType::MAKERS, &makers);

        let sent = session.dispatcher().transport().last_request().unwrap();
        assert_eq!(sent.url.query(), Some("import_type_id=44"));
        assert_eq!(sent.header("Content-Encoding"), Some("gzip"));
        assert_eq!(ImportType::new(46), ImportType::MAKER_MODEL_MAPPINGS);
    }
}
