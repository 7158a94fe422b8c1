//! Moves an account's live Stripe subscriptions onto cancel-at-period-end so
//! they lapse at the end of the paid period instead of renewing.

use log::{debug, info, warn};

use crate::account::Account;
use crate::config::Deployment;
use crate::stripe::{AsyncBilling, Billing, Error, ListSubscriptions, UpdateSubscription};
use crate::types::{List, Subscription, SubscriptionStatus};

/// Only the first page is processed; accounts with more active subscriptions
/// than this are left partially flagged.
pub const LIST_LIMIT: u8 = 100;

pub struct CancelCloudSubscriptionsService<'a, B> {
    account: &'a Account,
    deployment: Deployment,
    billing: &'a B,
}

impl<'a, B> CancelCloudSubscriptionsService<'a, B> {
    pub fn new(account: &'a Account, deployment: Deployment, billing: &'a B) -> Self {
        Self {
            account,
            deployment,
            billing,
        }
    }

    /// The customer to work on, or `None` when either guard says to skip.
    fn customer_id(&self) -> Option<&'a str> {
        let Some(customer_id) = self.account.stripe_customer_id() else {
            debug!("account {} has no stripe customer id, skipping", self.account.id);
            return None;
        };
        if !self.deployment.is_cloud() {
            debug!(
                "account {}: {} deployment, skipping",
                self.account.id, self.deployment
            );
            return None;
        }
        Some(customer_id)
    }

    fn renewing<'s>(&self, subscriptions: &'s List<Subscription>) -> Vec<&'s Subscription> {
        if subscriptions.has_more {
            warn!(
                "account {} has more than {} active subscriptions, only the first page is flagged",
                self.account.id, LIST_LIMIT
            );
        }
        subscriptions.data.iter().filter(|sub| sub.renews()).collect()
    }
}

fn log_flagged(account_id: i64, subscription: &Subscription) {
    match subscription.current_period_end {
        Some(period_end) => info!(
            "account {}: {} set to cancel at period end ({})",
            account_id, subscription.id, period_end
        ),
        None => info!(
            "account {}: {} set to cancel at period end",
            account_id, subscription.id
        ),
    }
}

fn list_active(customer_id: &str) -> ListSubscriptions {
    ListSubscriptions::new(customer_id, SubscriptionStatus::Active, LIST_LIMIT)
}

impl<B: Billing> CancelCloudSubscriptionsService<'_, B> {
    /// Any provider error aborts the run and is returned as-is.
    pub fn perform(&self) -> Result<(), Error> {
        let Some(customer_id) = self.customer_id() else {
            return Ok(());
        };

        let subscriptions = self.billing.list_subscriptions(&list_active(customer_id))?;
        for subscription in self.renewing(&subscriptions) {
            let update = UpdateSubscription::cancel_at_period_end(&subscription.id);
            self.billing.update_subscription(&update)?;
            log_flagged(self.account.id, subscription);
        }
        Ok(())
    }
}

impl<B: AsyncBilling> CancelCloudSubscriptionsService<'_, B> {
    pub async fn async_perform(&self) -> Result<(), Error> {
        let Some(customer_id) = self.customer_id() else {
            return Ok(());
        };

        let subscriptions = self
            .billing
            .async_list_subscriptions(&list_active(customer_id))
            .await?;
        for subscription in self.renewing(&subscriptions) {
            let update = UpdateSubscription::cancel_at_period_end(&subscription.id);
            self.billing.async_update_subscription(&update).await?;
            log_flagged(self.account.id, subscription);
        }
        Ok(())
    }
}
