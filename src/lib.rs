pub mod account;
pub mod billing;
pub mod client;
pub mod config;
pub mod logger;
pub mod stripe;
pub mod types;

pub use account::Account;
pub use billing::CancelCloudSubscriptionsService;
pub use client::StripeClient;
pub use config::{Config, Deployment};
