//! # Supplier Data Retrieval
//!
//! Pulls one kind of catalog data (products, pricing, stock, categories,
//! attributes, makers) from a supplier organisation the caller trades with.
//!
//! ## Paging
//! ```text
//! start 0     ──► retrieve(records_start_index = 0,    max = 5000) ──► 5000 records
//! start 5000  ──► retrieve(records_start_index = 5000, max = 5000) ──► 1200 records
//!                                                    fewer than max ──► done
//! ```
//! The platform returns at most `records_max_amount` records per call; the
//! caller advances `records_start_index` until a short page comes back.

use std::fmt;
use std::time::Duration;

use tradelink_core::{DocumentEnvelope, EsDocument};

use crate::dispatcher::{EndpointRequest, QueryParams};
use crate::endpoints::RETRIEVE_ESD;
use crate::session::OrgSession;
use crate::transport::HttpTransport;

/// Records per call when the caller does not choose.
pub const DEFAULT_RECORDS_MAX_AMOUNT: u32 = 5000;

/// Kind of supplier data a `retrieve_esd` call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetrieveType(u32);

impl RetrieveType {
    pub const PRODUCTS: RetrieveType = RetrieveType(3);
    pub const CATEGORIES: RetrieveType = RetrieveType(8);
    pub const PRODUCT_STOCK: RetrieveType = RetrieveType(10);
    pub const ATTRIBUTES: RetrieveType = RetrieveType(11);
    /// Prices for the customer account.
    pub const PRICING: RetrieveType = RetrieveType(37);
    pub const MAKERS: RetrieveType = RetrieveType(44);
    pub const MAKER_MODELS: RetrieveType = RetrieveType(45);
    pub const MAKER_MODEL_MAPPINGS: RetrieveType = RetrieveType(46);

    pub const fn new(id: u32) -> Self {
        RetrieveType(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RetrieveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of one `retrieve_esd` page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveRequest {
    pub retrieve_type: RetrieveType,
    pub supplier_org_id: String,
    /// Needed for pricing and stock when the supplier assigned several
    /// accounts to the caller.
    pub customer_account_code: String,
    pub records_max_amount: u32,
    pub records_start_index: u32,
    /// Extra `key=value&...` pairs appended verbatim, e.g. `ignore_products=Y`.
    pub extra_params: String,
}

impl RetrieveRequest {
    pub fn new(retrieve_type: RetrieveType, supplier_org_id: impl Into<String>) -> Self {
        RetrieveRequest {
            retrieve_type,
            supplier_org_id: supplier_org_id.into(),
            customer_account_code: String::new(),
            records_max_amount: DEFAULT_RECORDS_MAX_AMOUNT,
            records_start_index: 0,
            extra_params: String::new(),
        }
    }

    pub fn customer_account(mut self, code: impl Into<String>) -> Self {
        self.customer_account_code = code.into();
        self
    }

    pub fn page(mut self, start_index: u32, max_amount: u32) -> Self {
        self.records_start_index = start_index;
        self.records_max_amount = max_amount;
        self
    }

    pub fn extra_params(mut self, params: impl Into<String>) -> Self {
        self.extra_params = params.into();
        self
    }

    /// Request for the page after one that returned `returned` records,
    /// or `None` when that page was the last.
    pub fn next_page(&self, returned: usize) -> Option<Self> {
        if returned < self.records_max_amount as usize {
            return None;
        }
        let mut next = self.clone();
        next.records_start_index = self.records_start_index.saturating_add(self.records_max_amount);
        Some(next)
    }

    pub fn query(&self) -> String {
        let query = QueryParams::new()
            .with("retrieve_type_id", self.retrieve_type.to_string())
            .with("supplier_org_id", self.supplier_org_id.as_str())
            .with("customer_account_code", self.customer_account_code.as_str())
            .with("records_max_amount", self.records_max_amount.to_string())
            .with("records_start_index", self.records_start_index.to_string())
            .encode();

        let extra = self.extra_params.trim().trim_start_matches('&');
        if extra.is_empty() {
            query
        } else {
            format!("{}&{}", query, extra)
        }
    }
}

/// Retrieves one page of supplier data.
pub fn retrieve_esd<T: HttpTransport>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    retrieve: &RetrieveRequest,
) -> DocumentEnvelope<EsDocument> {
    let request = EndpointRequest::get(RETRIEVE_ESD)
        .with_query(retrieve.query())
        .with_timeout(timeout);
    session.send_document(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::active_session;
    use crate::transport::mock::MockReply;
    use crate::transport::HttpMethod;
    use serde_json::json;
    use tradelink_core::{codes, EndpointResult};

    #[test]
    fn test_query_with_extra_params() {
        let retrieve = RetrieveRequest::new(RetrieveType::CATEGORIES, "11EA 64")
            .page(5000, 5000)
            .extra_params("ignore_products=Y");

        assert_eq!(
            retrieve.query(),
            "retrieve_type_id=8&supplier_org_id=11EA%2064&customer_account_code=\
             &records_max_amount=5000&records_start_index=5000&ignore_products=Y"
        );
    }

    #[test]
    fn test_next_page() {
        let first = RetrieveRequest::new(RetrieveType::PRODUCTS, "11EA").page(0, 100);

        let second = first.next_page(100).unwrap();
        assert_eq!(second.records_start_index, 100);
        assert_eq!(second.records_max_amount, 100);

        assert!(second.next_page(42).is_none());
    }

    #[test]
    fn test_pricing_is_get_with_document_result() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 1,
            "totalDataRecords": 1,
            "configs": { "result_code": "SUCCESS" },
            "dataRecords": [ { "keyProductID": "P1", "price": 12.5, "quantity": 1 } ]
        }))]);

        let retrieve = RetrieveRequest::new(RetrieveType::PRICING, "11EA").customer_account("ACC-1");
        let envelope = retrieve_esd(&mut session, Duration::from_secs(60), &retrieve);

        assert!(envelope.is_success());
        assert_eq!(envelope.document.unwrap().data_records[0]["price"], 12.5);

        let sent = session.dispatcher().transport().last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url.path(), "/rest/1/org/retrieve_esd/s-1");
        assert_eq!(
            sent.url.query(),
            Some("retrieve_type_id=37&supplier_org_id=11EA&customer_account_code=ACC-1&records_max_amount=5000&records_start_index=0")
        );
        assert!(sent.body.is_none());
    }

    #[test]
    fn test_failed_document_is_failure() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 0,
            "configs": { "result_code": "SERVER_ERROR_ESD_DOCUMENT_UNSUCCESSFUL" }
        }))]);

        let retrieve = RetrieveRequest::new(RetrieveType::PRODUCT_STOCK, "11EA");
        let envelope = retrieve_esd(&mut session, Duration::from_secs(60), &retrieve);

        assert_eq!(envelope.envelope.result, EndpointResult::Failure);
        assert_eq!(envelope.result_code(), codes::ERROR_ESD_DOCUMENT_UNSUCCESSFUL);
        assert!(envelope.document.is_some());
    }
}
