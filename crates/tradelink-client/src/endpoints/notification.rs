//! Organisation notifications.
//!
//! Raises a notification shown to the people assigned to one of the
//! organisation's notification categories. The message may contain the
//! placeholders `{1}` to `{5}`, each replaced by a link and/or label.

use std::fmt;
use std::time::Duration;

use tradelink_core::ResponseEnvelope;

use crate::dispatcher::{EndpointRequest, QueryParams};
use crate::endpoints::CREATE_NOTIFICATION;
use crate::session::OrgSession;
use crate::transport::HttpTransport;

/// Placeholders the platform substitutes, `{1}` to `{5}`.
pub const MAX_MESSAGE_PLACEHOLDERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyCategory {
    Org,
    Account,
    OrderSale,
    OrderPurchase,
    Feed,
}

impl NotifyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyCategory::Org => "org",
            NotifyCategory::Account => "account",
            NotifyCategory::OrderSale => "order_sale",
            NotifyCategory::OrderPurchase => "order_purchase",
            NotifyCategory::Feed => "feed",
        }
    }
}

impl fmt::Display for NotifyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value for one message placeholder. Blank fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationLink {
    pub url: String,
    pub label: String,
}

impl NotificationLink {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        NotificationLink {
            url: url.into(),
            label: label.into(),
        }
    }
}

fn notification_form(category: NotifyCategory, message: &str, links: &[NotificationLink]) -> QueryParams {
    let mut form = QueryParams::new()
        .with("notify_category", category.as_str())
        .with("message", message);

    let placeholders = links.iter().take(MAX_MESSAGE_PLACEHOLDERS).enumerate();

    for (i, link) in placeholders.clone() {
        if !link.url.trim().is_empty() {
            form.push(format!("link{}_url", i + 1), link.url.as_str());
        }
    }
    for (i, link) in placeholders {
        if !link.label.trim().is_empty() {
            form.push(format!("link{}_label", i + 1), link.label.as_str());
        }
    }

    form
}

/// Creates an organisation notification. Requires trading tokens.
pub fn create_notification<T: HttpTransport>(
    session: &mut OrgSession<T>,
    timeout: Duration,
    category: NotifyCategory,
    message: &str,
    links: &[NotificationLink],
) -> ResponseEnvelope {
    let form = notification_form(category, message, links);
    let request = EndpointRequest::post(CREATE_NOTIFICATION)
        .with_form(&form)
        .with_timeout(timeout);
    session.send(request)
}
