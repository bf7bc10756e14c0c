//! Trading between connected organisations: purchase orders sent to a
//! supplier, invoices sent to a customer.
//!
//! Both return the platform's converted document. When lines cannot be
//! mapped between the two organisations the failing positions are listed
//! under [`ErrorCategory::OrderUnmappedLines`] or the `Invoice*` categories.
//!
//! [`ErrorCategory::OrderUnmappedLines`]: tradelink_core::ErrorCategory::OrderUnmappedLines

use std::time::Duration;

use serde::Serialize;
use tradelink_core::{DocumentEnvelope, EsDocument};

use crate::dispatcher::{EndpointRequest, QueryParams};
use crate::endpoints::{PROCURE_PURCHASE_ORDER_FROM_SUPPLIER, SEND_CUSTOMER_INVOICE_TO_CUSTOMER};
use crate::session::OrgSession;
use crate::transport::HttpTransport;

/// Sends a purchase order to a supplier organisation, which receives it as
/// a sales order against `customer_account_code`.
pub fn procure_purchase_order_from_supplier<T, R>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    supplier_org_id: &str,
    customer_account_code: &str,
    order: &EsDocument<R>,
) -> DocumentEnvelope<EsDocument>
where
    T: HttpTransport,
    R: Serialize,
{
    let query = QueryParams::new()
        .with("supplier_org_id", supplier_org_id)
        .with("customer_account_code", customer_account_code);
    let request = EndpointRequest::post(PROCURE_PURCHASE_ORDER_FROM_SUPPLIER)
        .with_query(query.encode())
        .with_timeout(timeout)
        .with_document(order);
    session.send_document(request)
}

/// Sends an invoice to a customer organisation, which receives it as a
/// purchase invoice against `supplier_account_code`.
pub fn send_customer_invoice_to_customer<T, R>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    customer_org_id: &str,
    supplier_account_code: &str,
    invoice: &EsDocument<R>,
) -> DocumentEnvelope<EsDocument>
where
    T: HttpTransport,
    R: Serialize,
{
    let query = QueryParams::new()
        .with("customer_org_id", customer_org_id)
        .with("supplier_account_code", supplier_account_code);
    let request = EndpointRequest::post(SEND_CUSTOMER_INVOICE_TO_CUSTOMER)
        .with_query(query.encode())
        .with_timeout(timeout)
        .with_document(invoice);
    session.send_document(request)
}
