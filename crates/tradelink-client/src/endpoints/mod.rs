//! # Endpoint Callers
//!
//! Thin wrappers that build one endpoint's query string or body, route the
//! call through [`OrgSession`](crate::session::OrgSession), and hand back the
//! envelope untouched. Each module covers one endpoint family.
//!
//! ## Result Rule per Family
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Outer envelope (ResponseEnvelope)    │  Document (DocumentEnvelope)    │
//! │  ───────────────────────────────────  │  ─────────────────────────────  │
//! │  create / validate / destroy session  │  import_esd                     │
//! │  create_notification *                │  import_sales_order_esd         │
//! │  validate_cert *                      │  retrieve_esd                   │
//! │                                       │  procure_purchase_order_...     │
//! │                                       │  send_customer_invoice_...      │
//! │                                       │  search / retrieve account recs │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `*` These two are sent the way document endpoints send text: POST with a
//! plain form body (no compression, `Content-Length` set). Their reply is
//! shaped like a plain envelope (`result`, `result_code`) with no
//! `resultStatus`, so it is read with the outer envelope rule. Reading it as
//! a document would always report failure with an unknown code.

pub mod certificate;
pub mod customer_account;
pub mod import;
pub mod notification;
pub mod procurement;
pub mod retrieve;

pub use certificate::validate_security_certificate;
pub use customer_account::{
    retrieve_customer_account_record, search_customer_account_records, AccountRecordSearch,
    AccountRecordType,
};
pub use import::{import_document, import_sales_order, ImportType};
pub use notification::{create_notification, NotificationLink, NotifyCategory};
pub use procurement::{procure_purchase_order_from_supplier, send_customer_invoice_to_customer};
pub use retrieve::{retrieve_esd, RetrieveRequest, RetrieveType};

// =============================================================================
// Endpoint Names
// =============================================================================

pub const CREATE_SESSION: &str = "create_session";
pub const VALIDATE_SESSION: &str = "validate_session";
pub const DESTROY_SESSION: &str = "destroy_session";
pub const CREATE_NOTIFICATION: &str = "create_notification";
pub const VALIDATE_CERT: &str = "validate_cert";
pub const IMPORT_ESD: &str = "import_esd";
pub const IMPORT_SALES_ORDER_ESD: &str = "import_sales_order_esd";
pub const RETRIEVE_ESD: &str = "retrieve_esd";
pub const PROCURE_PURCHASE_ORDER_FROM_SUPPLIER: &str = "procure_purchase_order_from_supplier";
pub const SEND_CUSTOMER_INVOICE_TO_CUSTOMER: &str = "send_customer_invoice_to_customer";
pub const SEARCH_CUSTOMER_ACCOUNT_RECORDS_ESD: &str = "search_customer_account_records_esd";
pub const RETRIEVE_CUSTOMER_ACCOUNT_RECORD_ESD: &str = "retrieve_customer_account_record_esd";

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use serde_json::json;

    use crate::dispatcher::RequestDispatcher;
    use crate::error::ClientResult;
    use crate::session::{OrgCredentials, OrgSession};
    use crate::transport::mock::{MockReply, MockTransport};

    /// A session holding id `s-1` whose next replies are `replies`.
    pub fn active_session(replies: Vec<ClientResult<MockReply>>) -> OrgSession<MockTransport> {
        let transport = MockTransport::new().with_reply(MockReply::json(json!({
            "result": "SUCCESS",
            "result_code": "SUCCESS",
            "session_id": "s-1"
        })));
        for reply in replies {
            transport.push_reply(reply);
        }
        let mut session = OrgSession::new(
            OrgCredentials::new("org-1", "key-1", "secret-1"),
            RequestDispatcher::with_defaults(transport),
            Duration::from_secs(10),
        );
        session.create();
        session
    }

    pub fn sent_body_text(session: &OrgSession<MockTransport>) -> String {
        let sent = session.dispatcher().transport().last_request().unwrap();
        String::from_utf8(sent.body.unwrap_or_default()).unwrap()
    }
}
