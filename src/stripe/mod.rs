pub mod subscription;

use std::fmt;

use async_trait::async_trait;
use displaydoc::Display;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{List, Subscription};
pub use subscription::{ListSubscriptions, UpdateSubscription};

#[derive(Debug, Display, Error)]
pub enum Error {
    /// Failed to parse stripe API base url: {0}
    ParseEndpoint(url::ParseError),
    /// Stripe API base url cannot carry a path: {0}
    BaseNotHierarchical(url::Url),
    /// Failed to send stripe request: {0}
    SendRequest(reqwest::Error),
    /// Failed to read stripe response: {0}
    ReadResponse(reqwest::Error),
    /// Failed to parse stripe response: {0}
    ParseResponse(serde_json::Error),
    /// Stripe returned {status}: {error}
    Api { status: u16, error: ApiError },
    /// Bad error code from stripe: {status}
    ResponseCode { status: u16 },
}

/// The `error` object Stripe sends with every non-2xx response.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: String,
    pub code: Option<String>,
    pub message: Option<String>,
    pub param: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

/// A single Stripe API call.
pub trait Endpoint: Serialize + Send + Sync {
    type Result: DeserializeOwned;

    /// The HTTP Method used for this endpoint.
    fn method(&self) -> Method;

    /// Path segments below the API base, e.g. `["v1", "subscriptions", id]`.
    /// Each segment is percent-encoded on its own, so ids cannot add segments.
    fn path_segments(&self) -> Vec<&str>;

    /// Serialized into the url query string.
    fn query(&self) -> Option<&Self> {
        None
    }

    /// Serialized as a form-encoded body.
    fn body(&self) -> Option<&Self> {
        None
    }
}

/// Blocking access to the subscription endpoints.
pub trait Billing {
    fn list_subscriptions(&self, params: &ListSubscriptions) -> Result<List<Subscription>, Error>;

    fn update_subscription(&self, params: &UpdateSubscription) -> Result<Subscription, Error>;
}

#[async_trait]
pub trait AsyncBilling: Send + Sync {
    async fn async_list_subscriptions(
        &self,
        params: &ListSubscriptions,
    ) -> Result<List<Subscription>, Error>;

    async fn async_update_subscription(
        &self,
        params: &UpdateSubscription,
    ) -> Result<Subscription, Error>;
}

pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, Error> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(Error::ParseResponse);
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) => Err(Error::Api {
            status: status.as_u16(),
            error: resp.error,
        }),
        Err(_) => Err(Error::ResponseCode {
            status: status.as_u16(),
        }),
    }
}
