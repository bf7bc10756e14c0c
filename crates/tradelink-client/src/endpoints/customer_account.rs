//! # Customer Account Records
//!
//! Live enquiries into a supplier organisation's business system for the
//! records of one customer account: invoices, orders, back orders,
//! transactions, credits and payments.
//!
//! ## Paging
//! ```text
//! page 1 ──► search(page_number = 1) ──► N records
//! page 2 ──► search(page_number = 2) ──► ...
//! ```
//! Each page is one call. Paging is done by the caller, one page after the
//! other.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tradelink_core::{DocumentEnvelope, EsDocument};

use crate::dispatcher::{yes_no, EndpointRequest, QueryParams};
use crate::endpoints::{RETRIEVE_CUSTOMER_ACCOUNT_RECORD_ESD, SEARCH_CUSTOMER_ACCOUNT_RECORDS_ESD};
use crate::session::OrgSession;
use crate::transport::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRecordType {
    Invoice,
    OrderSale,
    Backorder,
    Transaction,
    Credit,
    Payment,
}

impl AccountRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRecordType::Invoice => "INVOICE",
            AccountRecordType::OrderSale => "ORDER_SALE",
            AccountRecordType::Backorder => "BACKORDER",
            AccountRecordType::Transaction => "TRANSACTION",
            AccountRecordType::Credit => "CREDIT",
            AccountRecordType::Payment => "PAYMENT",
        }
    }
}

impl fmt::Display for AccountRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one `search_customer_account_records_esd` page.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecordSearch {
    pub record_type: AccountRecordType,
    pub supplier_org_id: String,
    /// Only needed when the supplier assigned several accounts to the caller.
    pub customer_account_code: String,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub page_number: u32,
    pub records_max_amount: u32,
    /// Only records still outstanding, such as unpaid invoices.
    pub outstanding_records: bool,
    pub search_string: String,
    /// Comma separated key record ids to match on.
    pub key_record_ids: String,
    /// Record field the search string is matched against.
    pub search_type: String,
}

impl AccountRecordSearch {
    /// First page of up to 100 records of `record_type` between `begin`
    /// and `end`.
    pub fn new(
        record_type: AccountRecordType,
        supplier_org_id: impl Into<String>,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        AccountRecordSearch {
            record_type,
            supplier_org_id: supplier_org_id.into(),
            customer_account_code: String::new(),
            begin,
            end,
            page_number: 1,
            records_max_amount: 100,
            outstanding_records: false,
            search_string: String::new(),
            key_record_ids: String::new(),
            search_type: String::new(),
        }
    }

    pub fn page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .with("record_type", self.record_type.as_str())
            .with("supplier_org_id", self.supplier_org_id.as_str())
            .with("customer_account_code", self.customer_account_code.as_str())
            .with("begin_date_time", self.begin.timestamp_millis().to_string())
            .with("end_date_time", self.end.timestamp_millis().to_string())
            .with("page_number", self.page_number.to_string())
            .with("records_max_amount", self.records_max_amount.to_string())
            .with("outstanding_records", yes_no(self.outstanding_records))
            .with("search_string", self.search_string.as_str())
            .with("key_record_ids", self.key_record_ids.as_str())
            .with("search_type", self.search_type.as_str())
    }
}

/// Searches a customer account's records in the supplier's system.
pub fn search_customer_account_records<T: HttpTransport>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    search: &AccountRecordSearch,
) -> DocumentEnvelope<EsDocument> {
    let request = EndpointRequest::get(SEARCH_CUSTOMER_ACCOUNT_RECORDS_ESD)
        .with_query(search.query().encode())
        .with_timeout(timeout);
    session.send_document(request)
}

/// Retrieves one record, with its lines, by key record id.
pub fn retrieve_customer_account_record<T: HttpTransport>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    record_type: AccountRecordType,
    supplier_org_id: &str,
    customer_account_code: &str,
    key_record_id: &str,
) -> DocumentEnvelope<EsDocument> {
    let query = QueryParams::new()
        .with("record_type", record_type.as_str())
        .with("supplier_org_id", supplier_org_id)
        .with("customer_account_code", customer_account_code)
        .with("key_record_id", key_record_id);
    let request = EndpointRequest::get(RETRIEVE_CUSTOMER_ACCOUNT_RECORD_ESD)
        .with_query(query.encode())
        .with_timeout(timeout);
    session.send_document(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::active_session;
    use crate::transport::mock::MockReply;
    use chrono::TimeZone;
    use serde_json::json;
    use tradelink_core::codes;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_search_query() {
        let (begin, end) = window();
        let mut search = AccountRecordSearch::new(AccountRecordType::Invoice, "11EA", begin, end).page(2);
        search.outstanding_records = true;
        search.search_string = "INV 1".to_string();

        assert_eq!(
            search.query().encode(),
            "record_type=INVOICE&supplier_org_id=11EA&customer_account_code=\
             &begin_date_time=1704067200000&end_date_time=1706745600000\
             &page_number=2&records_max_amount=100&outstanding_records=Y\
             &search_string=INV%201&key_record_ids=&search_type="
        );
    }

    #[test]
    fn test_search_is_get_without_body() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 1,
            "totalDataRecords": 1,
            "configs": { "result_code": "SUCCESS" },
            "dataRecords": [ { "keyInvoiceID": "INV-1", "balance": 10.5 } ]
        }))]);

        let (begin, end) = window();
        let search = AccountRecordSearch::new(AccountRecordType::Invoice, "11EA", begin, end);
        let envelope = search_customer_account_records(&mut session, Duration::from_secs(60), &search);

        assert!(envelope.is_success());
        let document = envelope.document.unwrap();
        assert_eq!(document.data_records[0]["keyInvoiceID"], "INV-1");

        let sent = session.dispatcher().transport().last_request().unwrap();
        assert_eq!(sent.method, crate::transport::HttpMethod::Get);
        assert_eq!(sent.url.path(), "/rest/1/org/search_customer_account_records_esd/s-1");
        assert!(sent.body.is_none());
    }

    #[test]
    fn test_retrieve_record() {
        let mut session = active_session(vec![MockReply::json(json!({
            "resultStatus": 0,
            "configs": { "result_code": "SERVER_ERROR_ESD_DOCUMENT_NO_RECORD" }
        }))]);

        let envelope = retrieve_customer_account_record(
            &mut session,
            Duration::from_secs(60),
            AccountRecordType::OrderSale,
            "11EA",
            "",
            "SO/100",
        );

        assert_eq!(envelope.result_code(), codes::ERROR_ESD_DOCUMENT_NO_RECORD);
        let sent = session.dispatcher().transport().last_request().unwrap();
        assert_eq!(
            sent.url.query(),
            Some("record_type=ORDER_SALE&supplier_org_id=11EA&customer_account_code=&key_record_id=SO%2F100")
        );
    }
}
