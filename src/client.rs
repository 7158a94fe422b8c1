use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::config::Config;
use crate::stripe::{
    self, AsyncBilling, Billing, Endpoint, Error, ListSubscriptions, UpdateSubscription,
};
use crate::types::{List, Subscription};

/// Pinned by `build.rs` from `[package.metadata.stripe]`.
pub const API_VERSION: &str = env!("STRIPE_API_VERSION");
const STRIPE_VERSION_HEADER: &str = "Stripe-Version";

#[derive(Clone)]
pub struct StripeClient {
    pub api_key: String,
    pub base_url: Url,
}

impl StripeClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, Error> {
        let base_url = base_url.parse().map_err(Error::ParseEndpoint)?;
        Ok(Self {
            api_key: api_key.to_string(),
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.stripe_secret.clone(),
            base_url: config.stripe_api_base.clone(),
        }
    }

    fn url<E: Endpoint>(&self, endpoint: &E) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::BaseNotHierarchical(self.base_url.clone()))?
            .pop_if_empty()
            .extend(endpoint.path_segments());
        Ok(url)
    }

    pub fn request<E: Endpoint>(&self, endpoint: &E) -> Result<E::Result, Error> {
        let url = self.url(endpoint)?;
        debug!("stripe {} {}", endpoint.method(), url);

        let mut request = reqwest::blocking::Client::new()
            .request(endpoint.method(), url)
            .basic_auth(&self.api_key, None::<&str>)
            .header(STRIPE_VERSION_HEADER, API_VERSION);
        if let Some(query) = endpoint.query() {
            request = request.query(query);
        }
        if let Some(body) = endpoint.body() {
            request = request.form(body);
        }

        let response = request.send().map_err(Error::SendRequest)?;
        let status = response.status();
        let body = response.text().map_err(Error::ReadResponse)?;
        stripe::decode(status, &body)
    }

    pub async fn async_request<E: Endpoint>(&self, endpoint: &E) -> Result<E::Result, Error> {
        let url = self.url(endpoint)?;
        debug!("stripe {} {}", endpoint.method(), url);

        let mut request = reqwest::Client::new()
            .request(endpoint.method(), url)
            .basic_auth(&self.api_key, None::<&str>)
            .header(STRIPE_VERSION_HEADER, API_VERSION);
        if let Some(query) = endpoint.query() {
            request = request.query(query);
        }
        if let Some(body) = endpoint.body() {
            request = request.form(body);
        }

        let response = request.send().await.map_err(Error::SendRequest)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::ReadResponse)?;
        stripe::decode(status, &body)
    }
}

impl Billing for StripeClient {
    fn list_subscriptions(&self, params: &ListSubscriptions) -> Result<List<Subscription>, Error> {
        self.request(params)
    }

    fn update_subscription(&self, params: &UpdateSubscription) -> Result<Subscription, Error> {
        self.request(params)
    }
}

#[async_trait]
impl AsyncBilling for StripeClient {
    async fn async_list_subscriptions(
        &self,
        params: &ListSubscriptions,
    ) -> Result<List<Subscription>, Error> {
        self.async_request(params).await
    }

    async fn async_update_subscription(
        &self,
        params: &UpdateSubscription,
    ) -> Result<Subscription, Error> {
        self.async_request(params).await
    }
}
