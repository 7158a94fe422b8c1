pub mod list;
pub mod subscription;

pub use list::List;
pub use subscription::{Subscription, SubscriptionStatus};
