use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom attribute holding the account's Stripe customer id.
pub const STRIPE_CUSTOMER_ID: &str = "stripe_customer_id";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(default)]
    pub custom_attributes: HashMap<String, Value>,
}

impl Account {
    pub fn new(id: i64) -> Self {
        Account {
            id,
            custom_attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.custom_attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn custom_attribute(&self, key: &str) -> Option<&Value> {
        self.custom_attributes.get(key)
    }

    /// The Stripe customer id, or `None` when the attribute is unset, not a
    /// string, or blank.
    pub fn stripe_customer_id(&self) -> Option<&str> {
        self.custom_attribute(STRIPE_CUSTOMER_ID)
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
    }
}
