pub mod billing_period;
pub mod month;
pub mod new_subscription;
pub mod page;
pub mod price;
pub mod service_name;
pub mod subscription;
pub mod subscription_filter;
pub mod validation_error;
