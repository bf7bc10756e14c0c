//! Security certificate validation.

use std::time::Duration;

use tradelink_core::ResponseEnvelope;

use crate::dispatcher::{EndpointRequest, QueryParams};
use crate::endpoints::VALIDATE_CERT;
use crate::session::OrgSession;
use crate::transport::HttpTransport;

/// Asks the platform to check the organisation's security certificate
/// against the connection the call arrives from.
pub fn validate_security_certificate<T: HttpTransport>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    certificate_id: &str,
) -> ResponseEnvelope {
    let form = QueryParams::new().with("org_security_certificate_id", certificate_id);
    let request = EndpointRequest::post(VALIDATE_CERT)
        .with_form(&form)
        .with_timeout(timeout);
    session.send(request)
}
