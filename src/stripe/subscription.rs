use reqwest::Method;
use serde::Serialize;

use super::Endpoint;
use crate::types::{List, Subscription, SubscriptionStatus};

/// `GET v1/subscriptions`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListSubscriptions {
    pub customer: String,
    pub status: SubscriptionStatus,
    pub limit: u8,
}

impl ListSubscriptions {
    pub fn new(customer: &str, status: SubscriptionStatus, limit: u8) -> Self {
        ListSubscriptions {
            customer: customer.to_string(),
            status,
            limit,
        }
    }
}

impl Endpoint for ListSubscriptions {
    type Result = List<Subscription>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path_segments(&self) -> Vec<&str> {
        vec!["v1", "subscriptions"]
    }

    fn query(&self) -> Option<&Self> {
        Some(self)
    }
}

/// `POST v1/subscriptions/{id}`. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdateSubscription {
    #[serde(skip)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
}

impl UpdateSubscription {
    pub fn cancel_at_period_end(id: &str) -> Self {
        UpdateSubscription {
            id: id.to_string(),
            cancel_at_period_end: Some(true),
        }
    }
}

impl Endpoint for UpdateSubscription {
    type Result = Subscription;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path_segments(&self) -> Vec<&str> {
        vec!["v1", "subscriptions", self.id.as_str()]
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}
