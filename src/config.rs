use std::env as stdenv;
use std::fmt;

use displaydoc::Display;
use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

pub const STRIPE_SECRET_VAR: &str = "STRIPE_SECRET_KEY";
pub const STRIPE_API_BASE_VAR: &str = "STRIPE_API_BASE";
pub const DEPLOYMENT_ENV_VAR: &str = "DEPLOYMENT_ENV";

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com/";

#[derive(Debug, Display, Error)]
pub enum Error {
    /// {STRIPE_SECRET_VAR:?} is not set.
    SecretMissing,
    /// Failed to parse {STRIPE_API_BASE_VAR:?}: {0}
    ParseApiBase(url::ParseError),
}

/// Where the application is running. Only `Cloud` deployments manage
/// subscriptions through Stripe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Deployment {
    Cloud,
    #[default]
    SelfHosted,
}

impl Deployment {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.trim().eq_ignore_ascii_case("cloud") => Deployment::Cloud,
            _ => Deployment::SelfHosted,
        }
    }

    pub fn is_cloud(self) -> bool {
        self == Deployment::Cloud
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deployment::Cloud => write!(f, "cloud"),
            Deployment::SelfHosted => write!(f, "self-hosted"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub stripe_secret: String,
    pub stripe_api_base: Url,
    pub deployment: Deployment,
}

impl Config {
    /// Reads the process environment after loading any `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        dotenv().ok();
        Self::from_lookup(|key| stdenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stripe_secret = lookup(STRIPE_SECRET_VAR)
            .filter(|secret| !secret.is_empty())
            .ok_or(Error::SecretMissing)?;
        let stripe_api_base = lookup(STRIPE_API_BASE_VAR)
            .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string())
            .parse()
            .map_err(Error::ParseApiBase)?;
        let deployment = Deployment::from_env_value(lookup(DEPLOYMENT_ENV_VAR).as_deref());

        Ok(Config {
            stripe_secret,
            stripe_api_base,
            deployment,
        })
    }
}

// The secret never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("stripe_secret", &"***")
            .field("stripe_api_base", &self.stripe_api_base.as_str())
            .field("deployment", &self.deployment)
            .finish()
    }
}
